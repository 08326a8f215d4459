//! # Model Errors
//!
//! Errors raised when a structurally valid backup breaks a cross-record
//! invariant.

use thiserror::Error;

/// Cross-record invariant violations in a decoded backup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A note references a notebook id that no notebook in the backup carries.
    #[error("note {note_id} references notebook {notebook_id}, which is not in the backup")]
    UnknownNotebook {
        /// Id of the referencing note.
        note_id: i64,
        /// The dangling notebook id.
        notebook_id: i64,
    },
}
