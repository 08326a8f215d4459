//! # Export Errors

use std::fmt;
use std::path::PathBuf;

use quill_core::ModelError;
use thiserror::Error;

/// Failure while planning or writing an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A note names a notebook that is not in the backup.
    #[error("note {note_id} references notebook {notebook_id}, which is not in the backup")]
    UnknownNotebook {
        /// The referencing note.
        note_id: i64,
        /// The dangling notebook id.
        notebook_id: i64,
    },

    /// A notebook name would place its folder outside the base folder.
    #[error("notebook {notebook_id} has name {name:?}, which leads outside the export folder")]
    UnsafeNotebookName {
        /// The notebook.
        notebook_id: i64,
        /// Its name as found in the backup.
        name: String,
    },

    /// A target folder could not be created.
    #[error("failed to create folder {}: {source}", .path.display())]
    CreateDir {
        /// The folder.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A note file could not be written.
    #[error("failed to write note {note_id} to {}: {source}", .path.display())]
    Write {
        /// The note.
        note_id: i64,
        /// The file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Some notes could not be written; collected when continuing past
    /// failures.
    #[error("{} of {attempted} notes could not be written; first: {}", .failures.len(), first_failure(.failures))]
    WriteFailures {
        /// Notes attempted in the run.
        attempted: usize,
        /// Every note that failed, in plan order.
        failures: Vec<WriteFailure>,
    },
}

impl From<ModelError> for ExportError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownNotebook {
                note_id,
                notebook_id,
            } => Self::UnknownNotebook {
                note_id,
                notebook_id,
            },
        }
    }
}

/// One note that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    /// The note.
    pub note_id: i64,
    /// Where it was going.
    pub path: PathBuf,
    /// What went wrong.
    pub reason: String,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "note {} ({}): {}",
            self.note_id,
            self.path.display(),
            self.reason
        )
    }
}

fn first_failure(failures: &[WriteFailure]) -> String {
    failures
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}
