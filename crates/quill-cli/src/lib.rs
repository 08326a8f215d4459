//! # quill-cli — Command-Line Interface
//!
//! Provides the `quill` binary for working with Quillnote backup files.
//!
//! ## Subcommands
//!
//! - `quill validate` — Check a backup against its schema and summarize it.
//! - `quill export` — Write every note as a Markdown file.
//! - `quill reformat` — Re-emit a backup as canonical pretty-printed JSON.
//!
//! ```bash
//! quill validate --input backup.json
//! quill export --input backup.json --output notes --missing-notebook base-folder
//! QUILL_INPUT=backup.json quill reformat --output clean.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here delegate to the
//!   library crates and add file-level context to their errors.

pub mod config;
pub mod export;
pub mod reformat;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use quill_core::Backup;

/// Read and decode the backup file at `path`.
pub fn read_backup(path: &Path) -> Result<Backup> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read backup: {}", path.display()))?;
    let backup = quill_schema::decode(&text)
        .with_context(|| format!("invalid backup: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        notes = backup.notes.len(),
        notebooks = backup.notebooks.len(),
        "backup decoded"
    );
    Ok(backup)
}
