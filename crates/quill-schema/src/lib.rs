//! # quill-schema — Shape Table & Validating Transformer
//!
//! Checks untyped JSON against a declarative table of shapes and renames
//! object keys between the backup's wire names and the model's native names.
//!
//! ## Shapes (`shape`)
//!
//! A [`Shape`] is a closed set of variants (primitive, reference, array,
//! union, enum, object, plus the `any`/`null`/`never`/`absent` sentinels).
//! Optional fields are unions with [`Shape::Absent`]; objects that reject
//! unknown keys use [`Shape::Never`] as their additional-key shape.
//!
//! ## Table (`table`)
//!
//! A [`TypeTable`] maps type names to shapes and is verified once at
//! construction: dangling references and reference loops that never pass
//! through an array or object are rejected there, so resolution at
//! transform time always terminates. [`backup_table`] is the process-wide
//! table for Quillnote backups.
//!
//! ## Transformer (`transform`)
//!
//! One recursive walk serves both directions. [`Direction`] decides which
//! half of each field's name pair is read and which is written; nothing
//! else differs between decoding and encoding.
//!
//! ## Conversions (`convert`)
//!
//! [`decode`] and [`encode`] bridge JSON text and the typed
//! [`quill_core::Backup`].
//!
//! ## Crate Policy
//!
//! - Depends only on `quill-core` internally.
//! - The first mismatch aborts the walk. There is no best-effort mode.

pub mod convert;
pub mod shape;
pub mod table;
pub mod transform;

pub use convert::{decode, decode_value, encode, encode_value, ConvertError};
pub use shape::{Field, ObjectShape, PrimitiveKind, Shape};
pub use table::{backup_table, TableError, TypeTable, BACKUP, ID_MAPPING, NOTE, NOTEBOOK, TASK_ITEM};
pub use transform::{Direction, TransformError, Transformer};
