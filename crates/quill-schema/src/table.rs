//! # Type Table
//!
//! Named shapes, resolved lazily at transform time so that entries can refer
//! to each other in any order. The table is verified once when built and is
//! read-only afterwards.
//!
//! ## Termination
//!
//! Resolution follows references until it reaches a non-reference shape, and
//! a union tries its alternatives without consuming any input. A chain of
//! references and union alternatives that leads back to where it started
//! would therefore recurse forever on any value. [`TypeTable::new`] rejects
//! such chains. Recursion through an array or object is allowed, since each
//! step descends into a strictly smaller part of a finite document.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use thiserror::Error;

use crate::shape::{Field, Shape};
use crate::transform::TransformError;

/// Root type of a backup document.
pub const BACKUP: &str = "Backup";
/// A note.
pub const NOTE: &str = "Note";
/// A checklist entry.
pub const TASK_ITEM: &str = "TaskItem";
/// A notebook.
pub const NOTEBOOK: &str = "Notebook";
/// A sync id mapping.
pub const ID_MAPPING: &str = "IdMapping";

/// Defects in a table definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A shape refers to a name the table does not define.
    #[error("type '{referrer}' refers to undefined type '{name}'")]
    UnknownReference {
        /// Entry containing the reference.
        referrer: String,
        /// The undefined name.
        name: String,
    },

    /// Resolving the named entry can return to itself without consuming input.
    #[error("type '{name}' refers back to itself without an array or object in between")]
    ReferenceCycle {
        /// Entry on the cycle.
        name: String,
    },
}

/// Immutable map from type name to shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTable {
    entries: BTreeMap<String, Shape>,
}

impl TypeTable {
    /// Build and verify a table.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownReference`] if any shape names a missing entry,
    /// [`TableError::ReferenceCycle`] if an entry can resolve back to itself
    /// without passing through an array or object.
    pub fn new<N: Into<String>>(
        entries: impl IntoIterator<Item = (N, Shape)>,
    ) -> Result<Self, TableError> {
        let table = Self {
            entries: entries
                .into_iter()
                .map(|(name, shape)| (name.into(), shape))
                .collect(),
        };
        table.verify()?;
        Ok(table)
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.entries.get(name)
    }

    /// Entry names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follow references from `shape` until a non-reference shape is reached.
    ///
    /// # Errors
    ///
    /// [`TransformError::UnknownReference`] when `shape` (which need not come
    /// from this table) names an undefined entry.
    pub fn resolve<'a>(&'a self, mut shape: &'a Shape) -> Result<&'a Shape, TransformError> {
        while let Shape::Reference(name) = shape {
            shape = self
                .entries
                .get(name)
                .ok_or_else(|| TransformError::UnknownReference { name: name.clone() })?;
        }
        Ok(shape)
    }

    fn verify(&self) -> Result<(), TableError> {
        for (referrer, shape) in &self.entries {
            let mut names = Vec::new();
            collect_references(shape, &mut names);
            if let Some(name) = names.into_iter().find(|name| !self.entries.contains_key(*name)) {
                return Err(TableError::UnknownReference {
                    referrer: referrer.clone(),
                    name: name.to_string(),
                });
            }
        }

        for start in self.entries.keys() {
            let mut seen = BTreeSet::new();
            let mut pending: Vec<&str> = Vec::new();
            if let Some(shape) = self.entries.get(start) {
                unguarded_references(shape, &mut pending);
            }
            while let Some(name) = pending.pop() {
                if name == start.as_str() {
                    return Err(TableError::ReferenceCycle {
                        name: start.clone(),
                    });
                }
                if !seen.insert(name) {
                    continue;
                }
                if let Some(shape) = self.entries.get(name) {
                    unguarded_references(shape, &mut pending);
                }
            }
        }
        Ok(())
    }
}

/// Every reference anywhere inside `shape`.
fn collect_references<'a>(shape: &'a Shape, out: &mut Vec<&'a str>) {
    match shape {
        Shape::Reference(name) => out.push(name),
        Shape::ArrayOf(item) => collect_references(item, out),
        Shape::UnionOf(alternatives) => {
            for alternative in alternatives {
                collect_references(alternative, out);
            }
        }
        Shape::ObjectOf(object) => {
            for field in object.fields() {
                collect_references(&field.shape, out);
            }
            collect_references(object.additional(), out);
        }
        Shape::Any
        | Shape::Null
        | Shape::Never
        | Shape::Absent
        | Shape::Primitive(_)
        | Shape::EnumOf(_) => {}
    }
}

/// References reachable from `shape` without descending into an array or
/// object.
fn unguarded_references<'a>(shape: &'a Shape, out: &mut Vec<&'a str>) {
    match shape {
        Shape::Reference(name) => out.push(name),
        Shape::UnionOf(alternatives) => {
            for alternative in alternatives {
                unguarded_references(alternative, out);
            }
        }
        _ => {}
    }
}

/// The shared table describing a Quillnote backup.
///
/// Built on first use and kept for the life of the process.
///
/// # Errors
///
/// Returns the verification error if the built-in definition is defective.
pub fn backup_table() -> Result<&'static TypeTable, TableError> {
    static TABLE: OnceLock<Result<TypeTable, TableError>> = OnceLock::new();
    TABLE
        .get_or_init(|| TypeTable::new(backup_entries()))
        .as_ref()
        .map_err(Clone::clone)
}

fn backup_entries() -> Vec<(&'static str, Shape)> {
    vec![
        (
            BACKUP,
            Shape::object(
                [
                    Field::new("version", "schema_version", Shape::integer()),
                    Field::same("notes", Shape::array(Shape::reference(NOTE))),
                    Field::same("notebooks", Shape::array(Shape::reference(NOTEBOOK))),
                    Field::new(
                        "idMappings",
                        "id_mappings",
                        Shape::array(Shape::reference(ID_MAPPING)),
                    ),
                ],
                Shape::Never,
            ),
        ),
        (
            ID_MAPPING,
            Shape::object(
                [
                    Field::new("mappingId", "mapping_id", Shape::integer()),
                    Field::new("localNoteId", "local_note_id", Shape::integer()),
                    Field::new("remoteNoteId", "remote_note_id", Shape::integer()),
                    Field::same("provider", Shape::string()),
                    Field::same("extras", Shape::string()),
                    Field::new("isDeletedLocally", "is_deleted_locally", Shape::boolean()),
                    Field::new(
                        "isBeingUpdated",
                        "is_being_updated",
                        Shape::optional(Shape::boolean()),
                    ),
                ],
                Shape::Never,
            ),
        ),
        (
            NOTEBOOK,
            Shape::object(
                [
                    Field::same("name", Shape::string()),
                    Field::same("id", Shape::integer()),
                ],
                Shape::Never,
            ),
        ),
        (
            NOTE,
            Shape::object(
                [
                    Field::same("title", Shape::optional(Shape::string())),
                    Field::same("content", Shape::optional(Shape::string())),
                    Field::new("isPinned", "is_pinned", Shape::optional(Shape::boolean())),
                    Field::new("isDeleted", "is_deleted", Shape::optional(Shape::boolean())),
                    Field::new("isHidden", "is_hidden", Shape::optional(Shape::boolean())),
                    Field::new("isLocalOnly", "is_local_only", Shape::optional(Shape::boolean())),
                    Field::new("creationDate", "creation_date", Shape::integer()),
                    Field::new("deletionDate", "deletion_date", Shape::optional(Shape::integer())),
                    Field::new("modifiedDate", "modified_date", Shape::integer()),
                    Field::same("id", Shape::integer()),
                    Field::new("isList", "is_list", Shape::optional(Shape::boolean())),
                    Field::new(
                        "taskList",
                        "task_list",
                        Shape::optional(Shape::array(Shape::reference(TASK_ITEM))),
                    ),
                    Field::new("notebookId", "notebook_id", Shape::optional(Shape::integer())),
                ],
                Shape::Never,
            ),
        ),
        (
            TASK_ITEM,
            Shape::object(
                [
                    Field::same("id", Shape::integer()),
                    Field::same("content", Shape::string()),
                    Field::new("isDone", "is_done", Shape::boolean()),
                ],
                Shape::Never,
            ),
        ),
    ]
}
