//! # Validating Transformer
//!
//! Walks a JSON value and a [`Shape`] in lockstep, depth-first, producing a
//! copy of the value whose declared object keys are renamed for the chosen
//! [`Direction`]. The first value that fits no rule aborts the walk with a
//! [`TransformError::ShapeMismatch`].
//!
//! ## Absence
//!
//! A missing object key is passed down as `None` rather than as JSON `null`.
//! It satisfies [`Shape::Absent`] and [`Shape::Any`] and nothing else, so an
//! optional field is `union<absent | T>` and a required field fails on
//! absence exactly as it would on a wrong type. An absent result leaves the
//! key out of the output object.
//!
//! ## Error keys
//!
//! Errors carry the nearest enclosing field key as it appears in the input.
//! Array elements report their array's key without an index, and a union
//! that matches no alternative reports the whole union rather than the
//! closest alternative.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::shape::{ObjectShape, Shape};
use crate::table::TypeTable;

/// Which half of each field's name pair is read, and which is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Wire names in, native names out.
    Decode,
    /// Native names in, wire names out.
    Encode,
}

impl Direction {
    /// Order a field's `(wire, native)` names as `(source, target)`.
    pub fn select<'a>(self, wire: &'a str, native: &'a str) -> (&'a str, &'a str) {
        match self {
            Self::Decode => (wire, native),
            Self::Encode => (native, wire),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode => f.write_str("decode"),
            Self::Encode => f.write_str("encode"),
        }
    }
}

/// Failure to transform a value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The value does not have the expected shape.
    #[error("{}", mismatch_message(.expected, .actual, .key))]
    ShapeMismatch {
        /// Description of the shape that was required.
        expected: String,
        /// The offending value; `None` when the value was missing.
        actual: Option<Value>,
        /// Key of the nearest enclosing field, if any.
        key: Option<String>,
    },

    /// A shape names a type the table does not define.
    #[error("reference to undefined type '{name}'")]
    UnknownReference {
        /// The undefined name.
        name: String,
    },
}

impl TransformError {
    fn mismatch(expected: &Shape, actual: Option<&Value>, key: Option<&str>) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.cloned(),
            key: key.map(str::to_owned),
        }
    }

    /// The field key a mismatch was reported against.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::ShapeMismatch { key, .. } => key.as_deref(),
            Self::UnknownReference { .. } => None,
        }
    }
}

fn mismatch_message(expected: &str, actual: &Option<Value>, key: &Option<String>) -> String {
    let actual = match actual {
        Some(value) => value.to_string(),
        None => "nothing".to_string(),
    };
    match key {
        Some(key) => format!("invalid value for key \"{key}\": expected {expected}, got {actual}"),
        None => format!("invalid value {actual} for type {expected}"),
    }
}

/// Shape-directed transformer over a [`TypeTable`].
#[derive(Debug, Clone, Copy)]
pub struct Transformer<'t> {
    table: &'t TypeTable,
}

impl<'t> Transformer<'t> {
    /// A transformer resolving references against `table`.
    pub fn new(table: &'t TypeTable) -> Self {
        Self { table }
    }

    /// Check a wire-format value against the named type and rename its
    /// keys to native names.
    pub fn decode(&self, value: &Value, type_name: &str) -> Result<Value, TransformError> {
        self.transform_root(value, type_name, Direction::Decode)
    }

    /// Check a native-format value against the named type and rename its
    /// keys to wire names.
    pub fn encode(&self, value: &Value, type_name: &str) -> Result<Value, TransformError> {
        self.transform_root(value, type_name, Direction::Encode)
    }

    fn transform_root(
        &self,
        value: &Value,
        type_name: &str,
        direction: Direction,
    ) -> Result<Value, TransformError> {
        let root = Shape::reference(type_name);
        let out = self.transform(Some(value), &root, direction, None)?;
        Ok(out.unwrap_or(Value::Null))
    }

    /// Transform `value` against `shape`.
    ///
    /// `value` is `None` when the enclosing object has no such key. `key` is
    /// the enclosing field key used in error reports.
    ///
    /// # Errors
    ///
    /// [`TransformError::ShapeMismatch`] for the first value that does not
    /// fit, [`TransformError::UnknownReference`] if `shape` names a type
    /// missing from the table.
    pub fn transform(
        &self,
        value: Option<&Value>,
        shape: &Shape,
        direction: Direction,
        key: Option<&str>,
    ) -> Result<Option<Value>, TransformError> {
        let shape = self.table.resolve(shape)?;
        match shape {
            Shape::Any => Ok(value.cloned()),
            Shape::Null => match value {
                Some(Value::Null) => Ok(Some(Value::Null)),
                _ => Err(TransformError::mismatch(shape, value, key)),
            },
            Shape::Never => Err(TransformError::mismatch(shape, value, key)),
            Shape::Absent => match value {
                None => Ok(None),
                Some(_) => Err(TransformError::mismatch(shape, value, key)),
            },
            Shape::Primitive(kind) => match value {
                Some(v) if kind.matches(v) => Ok(Some(v.clone())),
                _ => Err(TransformError::mismatch(shape, value, key)),
            },
            Shape::EnumOf(cases) => match value {
                Some(v) if cases.contains(v) => Ok(Some(v.clone())),
                _ => Err(TransformError::mismatch(shape, value, key)),
            },
            Shape::ArrayOf(item) => match value {
                Some(Value::Array(elements)) => {
                    let out = elements
                        .iter()
                        .map(|element| {
                            self.transform(Some(element), item, direction, key)
                                .map(|v| v.unwrap_or(Value::Null))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Some(Value::Array(out)))
                }
                _ => Err(TransformError::mismatch(shape, value, key)),
            },
            Shape::UnionOf(alternatives) => {
                for alternative in alternatives {
                    match self.transform(value, alternative, direction, key) {
                        Ok(out) => return Ok(out),
                        Err(TransformError::ShapeMismatch { .. }) => continue,
                        Err(e) => return Err(e),
                    }
                }
                Err(TransformError::mismatch(shape, value, key))
            }
            Shape::ObjectOf(object) => match value {
                Some(Value::Object(map)) => {
                    self.transform_object(map, object, direction).map(Some)
                }
                _ => Err(TransformError::mismatch(shape, value, key)),
            },
            // `resolve` never returns a reference.
            Shape::Reference(name) => Err(TransformError::UnknownReference { name: name.clone() }),
        }
    }

    fn transform_object(
        &self,
        map: &Map<String, Value>,
        object: &ObjectShape,
        direction: Direction,
    ) -> Result<Value, TransformError> {
        let mut out = Map::new();

        for field in object.fields() {
            let (source, target) = direction.select(&field.wire, &field.native);
            if let Some(v) = self.transform(map.get(source), &field.shape, direction, Some(source))? {
                out.insert(target.to_string(), v);
            }
        }

        for (k, v) in map {
            if object.field_for_source(direction, k).is_some() {
                continue;
            }
            if let Some(v) = self.transform(Some(v), object.additional(), direction, Some(k))? {
                out.insert(k.clone(), v);
            }
        }

        Ok(Value::Object(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Field;
    use serde_json::json;

    fn empty_table() -> TypeTable {
        TypeTable::new(Vec::<(String, Shape)>::new()).unwrap()
    }

    fn run(shape: &Shape, value: Option<&Value>) -> Result<Option<Value>, TransformError> {
        let table = empty_table();
        Transformer::new(&table).transform(value, shape, Direction::Decode, None)
    }

    #[test]
    fn select_swaps_with_direction() {
        assert_eq!(Direction::Decode.select("a", "b"), ("a", "b"));
        assert_eq!(Direction::Encode.select("a", "b"), ("b", "a"));
    }

    #[test]
    fn any_accepts_everything_unchanged() {
        for v in [json!(null), json!(1), json!("x"), json!([1, {"a": 2}])] {
            assert_eq!(run(&Shape::Any, Some(&v)).unwrap(), Some(v.clone()));
        }
        assert_eq!(run(&Shape::Any, None).unwrap(), None);
    }

    #[test]
    fn null_accepts_only_null() {
        assert_eq!(run(&Shape::Null, Some(&json!(null))).unwrap(), Some(json!(null)));
        assert!(run(&Shape::Null, Some(&json!(0))).is_err());
        assert!(run(&Shape::Null, None).is_err());
    }

    #[test]
    fn never_rejects_everything() {
        assert!(run(&Shape::Never, Some(&json!(null))).is_err());
        assert!(run(&Shape::Never, None).is_err());
    }

    #[test]
    fn primitive_mismatch_carries_value_and_key() {
        let table = empty_table();
        let err = Transformer::new(&table)
            .transform(Some(&json!(5)), &Shape::string(), Direction::Decode, Some("title"))
            .unwrap_err();
        assert_eq!(
            err,
            TransformError::ShapeMismatch {
                expected: "string".into(),
                actual: Some(json!(5)),
                key: Some("title".into()),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid value for key \"title\": expected string, got 5"
        );
    }

    #[test]
    fn mismatch_without_key_names_the_type() {
        let err = run(&Shape::boolean(), Some(&json!("yes"))).unwrap_err();
        assert_eq!(err.to_string(), "invalid value \"yes\" for type boolean");
    }

    #[test]
    fn enum_uses_strict_equality() {
        let shape = Shape::enumeration([json!("a"), json!(1)]);
        assert!(run(&shape, Some(&json!("a"))).is_ok());
        assert!(run(&shape, Some(&json!(1))).is_ok());
        assert!(run(&shape, Some(&json!("1"))).is_err());
        assert!(run(&shape, Some(&json!(1.5))).is_err());
        let err = run(&shape, Some(&json!("b"))).unwrap_err();
        assert!(err.to_string().contains("one of [\"a\", 1]"));
    }

    #[test]
    fn optional_string_accepts_absent_and_string_only() {
        let shape = Shape::optional(Shape::string());
        assert_eq!(run(&shape, None).unwrap(), None);
        assert_eq!(run(&shape, Some(&json!("hi"))).unwrap(), Some(json!("hi")));
        assert!(run(&shape, Some(&json!(3))).is_err());
        assert!(run(&shape, Some(&json!(null))).is_err());
    }

    #[test]
    fn union_first_match_wins() {
        let table = TypeTable::new([(
            "Renamed",
            Shape::object([Field::new("a", "first", Shape::Any)], Shape::Any),
        )])
        .unwrap();
        let shape = Shape::union([
            Shape::reference("Renamed"),
            Shape::map(Shape::Any),
        ]);
        let out = Transformer::new(&table)
            .transform(Some(&json!({"a": 1})), &shape, Direction::Decode, None)
            .unwrap();
        assert_eq!(out, Some(json!({"first": 1})));
    }

    #[test]
    fn union_failure_reports_all_alternatives() {
        let shape = Shape::union([Shape::integer(), Shape::boolean()]);
        let err = run(&shape, Some(&json!("x"))).unwrap_err();
        let TransformError::ShapeMismatch { expected, .. } = err else {
            panic!("expected a shape mismatch");
        };
        assert_eq!(expected, "union<integer | boolean>");
    }

    #[test]
    fn union_propagates_unknown_reference() {
        let shape = Shape::union([Shape::reference("Missing"), Shape::Any]);
        let err = run(&shape, Some(&json!(1))).unwrap_err();
        assert_eq!(
            err,
            TransformError::UnknownReference {
                name: "Missing".into()
            }
        );
    }

    #[test]
    fn array_rejects_non_arrays_regardless_of_item_shape() {
        for item in [Shape::Any, Shape::string(), Shape::Never] {
            let shape = Shape::array(item);
            for v in [json!({}), json!("[]"), json!(null), json!(1)] {
                assert!(run(&shape, Some(&v)).is_err());
            }
            assert!(run(&shape, None).is_err());
        }
    }

    #[test]
    fn array_element_error_reports_outer_key_only() {
        let table = empty_table();
        let err = Transformer::new(&table)
            .transform(
                Some(&json!([1, 2, "three"])),
                &Shape::array(Shape::integer()),
                Direction::Decode,
                Some("ids"),
            )
            .unwrap_err();
        assert_eq!(err.key(), Some("ids"));
        let TransformError::ShapeMismatch { actual, .. } = err else {
            panic!("expected a shape mismatch");
        };
        assert_eq!(actual, Some(json!("three")));
    }

    #[test]
    fn object_renames_declared_fields_by_direction() {
        let shape = Shape::object(
            [
                Field::new("isDone", "is_done", Shape::boolean()),
                Field::same("id", Shape::integer()),
            ],
            Shape::Never,
        );
        let table = empty_table();
        let t = Transformer::new(&table);

        let decoded = t
            .transform(Some(&json!({"isDone": true, "id": 3})), &shape, Direction::Decode, None)
            .unwrap();
        assert_eq!(decoded, Some(json!({"is_done": true, "id": 3})));

        let encoded = t
            .transform(decoded.as_ref(), &shape, Direction::Encode, None)
            .unwrap();
        assert_eq!(encoded, Some(json!({"isDone": true, "id": 3})));
    }

    #[test]
    fn object_rejects_non_objects() {
        let shape = Shape::map(Shape::Any);
        for v in [json!(null), json!([]), json!("{}"), json!(0)] {
            assert!(run(&shape, Some(&v)).is_err());
        }
    }

    #[test]
    fn missing_required_field_is_a_mismatch_on_that_field() {
        let shape = Shape::object([Field::same("id", Shape::integer())], Shape::Never);
        let err = run(&shape, Some(&json!({}))).unwrap_err();
        assert_eq!(
            err,
            TransformError::ShapeMismatch {
                expected: "integer".into(),
                actual: None,
                key: Some("id".into()),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid value for key \"id\": expected integer, got nothing"
        );
    }

    #[test]
    fn absent_optional_field_is_omitted() {
        let shape = Shape::object(
            [Field::new("notebookId", "notebook_id", Shape::optional(Shape::integer()))],
            Shape::Never,
        );
        assert_eq!(run(&shape, Some(&json!({}))).unwrap(), Some(json!({})));
    }

    #[test]
    fn extra_key_hits_additional_shape() {
        let closed = Shape::object([Field::same("id", Shape::integer())], Shape::Never);
        let err = run(&closed, Some(&json!({"id": 1, "color": "red"}))).unwrap_err();
        assert_eq!(err.key(), Some("color"));

        let open = Shape::object(
            [Field::new("isDone", "is_done", Shape::boolean())],
            Shape::string(),
        );
        let out = run(&open, Some(&json!({"isDone": false, "tagName": "x"}))).unwrap();
        assert_eq!(out, Some(json!({"is_done": false, "tagName": "x"})));
    }

    #[test]
    fn native_key_is_extra_when_decoding() {
        let shape = Shape::object(
            [Field::new("isDone", "is_done", Shape::optional(Shape::boolean()))],
            Shape::Never,
        );
        let err = run(&shape, Some(&json!({"is_done": true}))).unwrap_err();
        assert_eq!(err.key(), Some("is_done"));
    }

    #[test]
    fn references_resolve_lazily_and_transitively() {
        let table = TypeTable::new([
            ("Alias", Shape::reference("Item")),
            (
                "Item",
                Shape::object([Field::new("isDone", "is_done", Shape::boolean())], Shape::Never),
            ),
            ("List", Shape::array(Shape::reference("Alias"))),
        ])
        .unwrap();
        let out = Transformer::new(&table)
            .decode(&json!([{"isDone": true}, {"isDone": false}]), "List")
            .unwrap();
        assert_eq!(out, json!([{"is_done": true}, {"is_done": false}]));
    }

    #[test]
    fn recursive_shapes_terminate_on_finite_input() {
        let table = TypeTable::new([(
            "Tree",
            Shape::object(
                [Field::same("children", Shape::optional(Shape::array(Shape::reference("Tree"))))],
                Shape::Never,
            ),
        )])
        .unwrap();
        let doc = json!({"children": [{"children": [{}]}, {}]});
        assert_eq!(Transformer::new(&table).decode(&doc, "Tree").unwrap(), doc);
    }
}
