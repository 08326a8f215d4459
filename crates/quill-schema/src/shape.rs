//! # Shape Descriptors
//!
//! The vocabulary used to describe what a JSON value must look like.
//! Shapes are plain data; all behavior lives in the transformer.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::transform::Direction;

/// Runtime JSON types a [`Shape::Primitive`] can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Any JSON number.
    Number,
    /// A JSON number with an exact `i64` representation.
    Integer,
    /// A JSON string.
    String,
    /// `true` or `false`.
    Boolean,
}

impl PrimitiveKind {
    /// Whether `value` has this runtime type. Only the type is inspected,
    /// never the value itself.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

/// Expected shape of a JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Accepts every value, including absence, unchanged.
    Any,
    /// Accepts exactly `null`.
    Null,
    /// Accepts nothing. Used as the additional-key shape of closed objects.
    Never,
    /// Accepts only a missing value. Paired with another shape in a union
    /// to make a field optional.
    Absent,
    /// A value of the given runtime type.
    Primitive(PrimitiveKind),
    /// Indirection through a named [`TypeTable`](crate::TypeTable) entry.
    Reference(String),
    /// An array whose every element matches the inner shape.
    ArrayOf(Box<Shape>),
    /// The first alternative, in order, that accepts the value wins.
    UnionOf(Vec<Shape>),
    /// One of a fixed set of literal values, compared by equality.
    EnumOf(Vec<Value>),
    /// A JSON object with declared fields.
    ObjectOf(ObjectShape),
}

impl Shape {
    /// A JSON number.
    pub fn number() -> Self {
        Self::Primitive(PrimitiveKind::Number)
    }

    /// An integral JSON number.
    pub fn integer() -> Self {
        Self::Primitive(PrimitiveKind::Integer)
    }

    /// A JSON string.
    pub fn string() -> Self {
        Self::Primitive(PrimitiveKind::String)
    }

    /// A JSON boolean.
    pub fn boolean() -> Self {
        Self::Primitive(PrimitiveKind::Boolean)
    }

    /// Reference to a table entry by name.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Array of `item`.
    pub fn array(item: Shape) -> Self {
        Self::ArrayOf(Box::new(item))
    }

    /// Ordered union of alternatives.
    pub fn union(alternatives: impl IntoIterator<Item = Shape>) -> Self {
        Self::UnionOf(alternatives.into_iter().collect())
    }

    /// `shape`, or nothing at all.
    pub fn optional(shape: Shape) -> Self {
        Self::UnionOf(vec![Self::Absent, shape])
    }

    /// Fixed set of literal values.
    pub fn enumeration(cases: impl IntoIterator<Item = Value>) -> Self {
        Self::EnumOf(cases.into_iter().collect())
    }

    /// Object with declared fields; undeclared keys must match `additional`.
    pub fn object(fields: impl IntoIterator<Item = Field>, additional: Shape) -> Self {
        Self::ObjectOf(ObjectShape::new(fields, additional))
    }

    /// Object with no declared fields whose every value matches `values`.
    pub fn map(values: Shape) -> Self {
        Self::ObjectOf(ObjectShape::new([], values))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Null => f.write_str("null"),
            Self::Never => f.write_str("never"),
            Self::Absent => f.write_str("absent"),
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Reference(name) => f.write_str(name),
            Self::ArrayOf(item) => write!(f, "array<{item}>"),
            Self::UnionOf(alternatives) => {
                f.write_str("union<")?;
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{alternative}")?;
                }
                f.write_str(">")
            }
            Self::EnumOf(cases) => {
                f.write_str("one of [")?;
                for (i, case) in cases.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{case}")?;
                }
                f.write_str("]")
            }
            Self::ObjectOf(object) => {
                f.write_str("object{")?;
                for (i, field) in object.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&field.wire)?;
                }
                write!(f, "; additional: {}}}", object.additional())
            }
        }
    }
}

/// One declared object field: its name on the wire, its name in the
/// native model, and the shape its value must have.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Key in the backup document.
    pub wire: String,
    /// Key in the native model.
    pub native: String,
    /// Shape of the value.
    pub shape: Shape,
}

impl Field {
    /// A field renamed between `wire` and `native`.
    pub fn new(wire: impl Into<String>, native: impl Into<String>, shape: Shape) -> Self {
        Self {
            wire: wire.into(),
            native: native.into(),
            shape,
        }
    }

    /// A field whose name is the same on both sides.
    pub fn same(name: impl Into<String>, shape: Shape) -> Self {
        let name = name.into();
        Self::new(name.clone(), name, shape)
    }
}

/// Declared fields of an object shape, with both key indexes built up front.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectShape {
    fields: Vec<Field>,
    additional: Box<Shape>,
    by_wire: HashMap<String, usize>,
    by_native: HashMap<String, usize>,
}

impl ObjectShape {
    /// Build an object shape. Field order is kept for output and error
    /// reporting.
    pub fn new(fields: impl IntoIterator<Item = Field>, additional: Shape) -> Self {
        let fields: Vec<Field> = fields.into_iter().collect();
        let by_wire = fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.wire.clone(), i))
            .collect();
        let by_native = fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.native.clone(), i))
            .collect();
        Self {
            fields,
            additional: Box::new(additional),
            by_wire,
            by_native,
        }
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Shape applied to keys that no field declares.
    pub fn additional(&self) -> &Shape {
        &self.additional
    }

    /// The field whose source-side key is `key` when reading in `direction`.
    pub fn field_for_source(&self, direction: Direction, key: &str) -> Option<&Field> {
        let index = match direction {
            Direction::Decode => self.by_wire.get(key),
            Direction::Encode => self.by_native.get(key),
        };
        index.map(|&i| &self.fields[i])
    }
}
