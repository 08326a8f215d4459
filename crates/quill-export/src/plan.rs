//! # Export Planning
//!
//! Maps every note to a target path and content without touching the
//! filesystem, so the whole layout is known before the first write.

use std::path::{Component, Path, PathBuf};

use quill_core::{Backup, ModelError, Note};
use rand::Rng;

use crate::error::ExportError;
use crate::render::{file_stem, render_content};

/// What to do with a note whose notebook is not in the backup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingNotebookPolicy {
    /// Abort the export with [`ExportError::UnknownNotebook`].
    #[default]
    Fail,
    /// Write the note directly under the base folder.
    BaseFolder,
}

/// Export settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Handling of dangling notebook references.
    pub missing_notebook: MissingNotebookPolicy,
    /// Attempt every note and report write failures together at the end
    /// instead of stopping at the first one.
    pub keep_going: bool,
}

/// One file the export will write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Source note.
    pub note_id: i64,
    /// Folder holding the file.
    pub folder: PathBuf,
    /// Full file path.
    pub path: PathBuf,
    /// File content.
    pub content: String,
}

/// Plan the export of every note in `backup` under `base`, in note order.
///
/// # Errors
///
/// [`ExportError::UnknownNotebook`] for the first note with a dangling
/// notebook reference, unless the policy is
/// [`MissingNotebookPolicy::BaseFolder`].
/// [`ExportError::UnsafeNotebookName`] for a notebook name that climbs out
/// of `base` with a `..` component.
pub fn plan<R: Rng + ?Sized>(
    backup: &Backup,
    base: &Path,
    options: &ExportOptions,
    rng: &mut R,
) -> Result<Vec<PlannedFile>, ExportError> {
    backup
        .notes
        .iter()
        .map(|note| {
            let folder = folder_for(backup, note, base, options.missing_notebook)?;
            let path = folder.join(format!("{}.md", file_stem(note, &mut *rng)));
            Ok(PlannedFile {
                note_id: note.id,
                folder,
                path,
                content: render_content(note),
            })
        })
        .collect()
}

fn folder_for(
    backup: &Backup,
    note: &Note,
    base: &Path,
    policy: MissingNotebookPolicy,
) -> Result<PathBuf, ExportError> {
    match backup.notebook_for(note) {
        Ok(Some(notebook)) => {
            let relative = notebook_folder(&notebook.name).ok_or_else(|| {
                ExportError::UnsafeNotebookName {
                    notebook_id: notebook.id,
                    name: notebook.name.clone(),
                }
            })?;
            if relative.as_os_str().is_empty() {
                Ok(base.to_path_buf())
            } else {
                Ok(base.join(relative))
            }
        }
        Ok(None) => Ok(base.to_path_buf()),
        Err(err @ ModelError::UnknownNotebook { notebook_id, .. }) => match policy {
            MissingNotebookPolicy::Fail => Err(err.into()),
            MissingNotebookPolicy::BaseFolder => {
                tracing::warn!(
                    note_id = note.id,
                    notebook_id,
                    "notebook not found; writing note to the base folder"
                );
                Ok(base.to_path_buf())
            }
        },
    }
}

/// Relative folder for a notebook name, always below the base folder.
///
/// Root and drive prefixes are dropped, so `/Work` and `Work` are the same
/// folder. Returns `None` when the name contains a `..` component. An empty
/// result means the base folder itself.
fn notebook_folder(name: &str) -> Option<PathBuf> {
    let mut folder = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => folder.push(part),
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => return None,
        }
    }
    Some(folder)
}
