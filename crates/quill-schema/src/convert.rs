//! # Backup Conversions
//!
//! Typed entry points: JSON text in, [`Backup`] out, and back. Decoding
//! validates and renames in one pass over the parsed document, then hands the
//! native-named value to serde; encoding runs the same walk the other way.

use quill_core::Backup;
use serde_json::Value;
use thiserror::Error;

use crate::table::{backup_table, TableError, BACKUP};
use crate::transform::{TransformError, Transformer};

/// Failure converting between JSON and the backup model.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document does not have the backup shape.
    #[error("backup does not match its schema: {0}")]
    Shape(#[from] TransformError),

    /// The built-in shape table failed verification.
    #[error("backup schema table is invalid: {0}")]
    Table(#[from] TableError),

    /// A shape-checked value could not be mapped to or from the typed model.
    #[error("model mapping failed: {0}")]
    Materialize(#[source] serde_json::Error),
}

/// Parse and validate backup JSON text.
///
/// # Errors
///
/// [`ConvertError::Parse`] for malformed text, [`ConvertError::Shape`] for
/// the first value that does not fit the backup shape.
pub fn decode(text: &str) -> Result<Backup, ConvertError> {
    let value: Value = serde_json::from_str(text).map_err(ConvertError::Parse)?;
    decode_value(&value)
}

/// Validate an already-parsed backup document.
pub fn decode_value(value: &Value) -> Result<Backup, ConvertError> {
    let table = backup_table()?;
    let native = Transformer::new(table).decode(value, BACKUP)?;
    serde_json::from_value(native).map_err(ConvertError::Materialize)
}

/// Render a backup as a wire-format JSON value.
pub fn encode_value(backup: &Backup) -> Result<Value, ConvertError> {
    let table = backup_table()?;
    let native = serde_json::to_value(backup).map_err(ConvertError::Materialize)?;
    Ok(Transformer::new(table).encode(&native, BACKUP)?)
}

/// Render a backup as pretty-printed JSON text with two-space indentation.
pub fn encode(backup: &Backup) -> Result<String, ConvertError> {
    let value = encode_value(backup)?;
    serde_json::to_string_pretty(&value).map_err(ConvertError::Materialize)
}
