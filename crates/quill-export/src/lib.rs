//! # quill-export — Markdown Export
//!
//! Turns a decoded [`Backup`](quill_core::Backup) into one Markdown file
//! per note, laid out as `<base>/<notebook name>/<title>.md`. Notes without
//! a notebook go directly under `<base>`.
//!
//! ## Stages
//!
//! - [`render`] — file content and file name for a single note.
//! - [`plan`] — decide every target path without touching the filesystem.
//! - [`write`] — create the folders once each, then write the files.
//!
//! [`export`] runs the last two stages back to back.
//!
//! ## Failure Policy
//!
//! By default the first failure ends the run. With
//! [`ExportOptions::keep_going`] every note is attempted and all write
//! failures are returned together. A note is never skipped silently.

pub mod error;
pub mod plan;
pub mod render;
pub mod write;

pub use error::{ExportError, WriteFailure};
pub use plan::{plan, ExportOptions, MissingNotebookPolicy, PlannedFile};
pub use render::{file_stem, render_content, GENERATED_NAME_RANGE};
pub use write::{export, write, ExportReport};
