//! # Export Writing
//!
//! Creates each target folder once, then writes the planned files in plan
//! order. Folder creation for a file always happens before its write.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use quill_core::Backup;
use rand::Rng;

use crate::error::{ExportError, WriteFailure};
use crate::plan::{plan, ExportOptions, PlannedFile};

/// Outcome of a completed export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Files written.
    pub written: usize,
    /// Distinct folders created or reused.
    pub folders: usize,
    /// Writes that replaced a file written earlier in the same run.
    pub collisions: usize,
}

/// Plan and write the export of `backup` under `base`.
pub fn export<R: Rng + ?Sized>(
    backup: &Backup,
    base: &Path,
    options: &ExportOptions,
    rng: &mut R,
) -> Result<ExportReport, ExportError> {
    let files = plan(backup, base, options, rng)?;
    tracing::info!(notes = files.len(), base = %base.display(), "exporting notes");
    write(&files, options)
}

/// Write planned files.
///
/// Two notes with the same target path are both written; the later one
/// wins and the collision is counted and logged.
///
/// # Errors
///
/// Without `keep_going`, the first [`ExportError::CreateDir`] or
/// [`ExportError::Write`]. With it, [`ExportError::WriteFailures`] listing
/// every note that could not be written, after all notes were attempted.
pub fn write(files: &[PlannedFile], options: &ExportOptions) -> Result<ExportReport, ExportError> {
    let mut folder_errors: BTreeMap<&Path, String> = BTreeMap::new();
    let mut folders = 0;
    for folder in unique_folders(files) {
        match std::fs::create_dir_all(folder) {
            Ok(()) => folders += 1,
            Err(source) if !options.keep_going => {
                return Err(ExportError::CreateDir {
                    path: folder.to_path_buf(),
                    source,
                });
            }
            Err(source) => {
                tracing::warn!(folder = %folder.display(), error = %source, "failed to create folder");
                folder_errors.insert(folder, format!("failed to create folder: {source}"));
            }
        }
    }

    let mut report = ExportReport {
        folders,
        ..ExportReport::default()
    };
    let mut failures = Vec::new();
    let mut seen: HashSet<&PathBuf> = HashSet::new();

    for file in files {
        if let Some(reason) = folder_errors.get(file.folder.as_path()) {
            failures.push(WriteFailure {
                note_id: file.note_id,
                path: file.path.clone(),
                reason: reason.clone(),
            });
            continue;
        }

        if !seen.insert(&file.path) {
            report.collisions += 1;
            tracing::warn!(
                note_id = file.note_id,
                path = %file.path.display(),
                "file name already used by an earlier note; overwriting"
            );
        }

        match std::fs::write(&file.path, &file.content) {
            Ok(()) => {
                report.written += 1;
                tracing::debug!(note_id = file.note_id, path = %file.path.display(), "wrote note");
            }
            Err(source) if !options.keep_going => {
                return Err(ExportError::Write {
                    note_id: file.note_id,
                    path: file.path.clone(),
                    source,
                });
            }
            Err(source) => {
                tracing::warn!(note_id = file.note_id, error = %source, "failed to write note");
                failures.push(WriteFailure {
                    note_id: file.note_id,
                    path: file.path.clone(),
                    reason: source.to_string(),
                });
            }
        }
    }

    if !failures.is_empty() {
        return Err(ExportError::WriteFailures {
            attempted: files.len(),
            failures,
        });
    }

    tracing::info!(
        written = report.written,
        folders = report.folders,
        collisions = report.collisions,
        "export complete"
    );
    Ok(report)
}

fn unique_folders(files: &[PlannedFile]) -> Vec<&Path> {
    let mut seen = HashSet::new();
    files
        .iter()
        .map(|file| file.folder.as_path())
        .filter(|folder| seen.insert(*folder))
        .collect()
}
