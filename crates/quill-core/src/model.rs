//! # Backup Records
//!
//! The five record types of a Quillnote backup. Timestamps are epoch
//! milliseconds kept as plain integers; nothing in the export path needs
//! calendar arithmetic on them.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A complete backup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Backup {
    /// Backup format version as written by the app.
    pub schema_version: i64,
    /// All notes, in document order.
    pub notes: Vec<Note>,
    /// All notebooks, in document order.
    pub notebooks: Vec<Notebook>,
    /// Sync provider mappings between local and remote note ids.
    pub id_mappings: Vec<IdMapping>,
}

impl Backup {
    /// Find the first notebook carrying `id`.
    pub fn notebook(&self, id: i64) -> Option<&Notebook> {
        self.notebooks.iter().find(|notebook| notebook.id == id)
    }

    /// Resolve the notebook a note belongs to.
    ///
    /// Returns `Ok(None)` when the note has no `notebook_id`, and
    /// [`ModelError::UnknownNotebook`] when it has one that no notebook in
    /// this backup carries.
    pub fn notebook_for(&self, note: &Note) -> Result<Option<&Notebook>, ModelError> {
        match note.notebook_id {
            None => Ok(None),
            Some(notebook_id) => {
                self.notebook(notebook_id)
                    .map(Some)
                    .ok_or(ModelError::UnknownNotebook {
                        note_id: note.id,
                        notebook_id,
                    })
            }
        }
    }
}

/// A single note: free text, or a checklist when `is_list` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Note {
    /// Note id, unique within a backup.
    pub id: i64,
    /// Optional title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional free-text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Pinned to the top of the note list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    /// Hidden behind the app lock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    /// Moved to the bin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    /// Excluded from sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_local_only: Option<bool>,
    /// Body is the task list rather than `content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_list: Option<bool>,
    /// Creation time, epoch millis.
    pub creation_date: i64,
    /// Time the note was moved to the bin, epoch millis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_date: Option<i64>,
    /// Last modification time, epoch millis.
    pub modified_date: i64,
    /// Checklist items, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_list: Option<Vec<TaskItem>>,
    /// Owning notebook, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notebook_id: Option<i64>,
}

impl Note {
    /// Whether the note renders as a checklist.
    pub fn is_list(&self) -> bool {
        self.is_list.unwrap_or(false)
    }

    /// The title, treating an empty string the same as no title.
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }
}

/// One checklist entry of a list note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskItem {
    /// Item id, unique within its note.
    pub id: i64,
    /// Item text.
    pub content: String,
    /// Checked off.
    pub is_done: bool,
}

/// A named notebook grouping notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Notebook {
    /// Notebook id.
    pub id: i64,
    /// Display name, used as the export folder name.
    pub name: String,
}

/// Link between a local note and its copy at a sync provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdMapping {
    /// Mapping row id.
    pub mapping_id: i64,
    /// Local note id.
    pub local_note_id: i64,
    /// Note id at the provider.
    pub remote_note_id: i64,
    /// Provider name.
    pub provider: String,
    /// Provider-specific payload, stored opaquely.
    pub extras: String,
    /// The local copy was deleted and the deletion is pending sync.
    pub is_deleted_locally: bool,
    /// A sync update is in flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_being_updated: Option<bool>,
}
