#![deny(missing_docs)]

//! # quill-core — Backup Domain Model
//!
//! Defines the value records that a Quillnote backup document materializes
//! into once it has passed shape validation. The crate has no internal
//! dependencies and performs no I/O.
//!
//! ## Design Principles
//!
//! 1. **Records are immutable values.** A [`Backup`] is built once per
//!    validation pass and never mutated; it owns its notes, notebooks, and
//!    id mappings outright.
//!
//! 2. **Native field names.** Fields use Rust `snake_case` names. Translating
//!    to and from the `camelCase` wire names is the job of the shape
//!    transformer in `quill-schema`, not of serde attributes here.
//!
//! 3. **Business invariants are checked at the point of use.** A note whose
//!    `notebook_id` names no notebook is still structurally valid; the
//!    mismatch surfaces as [`ModelError::UnknownNotebook`] from
//!    [`Backup::notebook_for`].

pub mod error;
pub mod model;

pub use error::ModelError;
pub use model::{Backup, IdMapping, Note, Notebook, TaskItem};
