//! Defensive field access over raw NetBox JSON.
//!
//! NetBox embeds related objects in several shapes: a full nested object with
//! `name` and `display`, a brief stub with only `display`, a bare scalar, or
//! nothing at all. `FieldRef` gives those cases names so lookups can fall
//! back explicitly instead of guessing.

use serde_json::{Map, Value};

/// One field of a raw object, classified by shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    /// Missing key or explicit null
    Absent,
    /// String, number or boolean (arrays count as scalars too)
    Scalar(&'a Value),
    /// Nested object
    Object(&'a Map<String, Value>),
}

impl<'a> FieldRef<'a> {
    /// Classify an optional value
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldRef::Absent,
            Some(Value::Object(map)) => FieldRef::Object(map),
            Some(other) => FieldRef::Scalar(other),
        }
    }

    /// Field `key` of `raw`; absent when `raw` is not an object
    pub fn get(raw: &'a Value, key: &str) -> Self {
        Self::of(raw.get(key))
    }

    /// Field `key` of this field, when this field is an object
    pub fn child(self, key: &str) -> FieldRef<'a> {
        match self {
            FieldRef::Object(map) => Self::of(map.get(key)),
            _ => FieldRef::Absent,
        }
    }

    pub fn is_present(self) -> bool {
        !matches!(self, FieldRef::Absent)
    }

    /// Preferred label: `name`, else `display`, else nothing
    ///
    /// A bare string stands for itself. Empty strings do not count as a name.
    pub fn name_or_display(self) -> Option<String> {
        match self {
            FieldRef::Object(map) => non_empty_str(map.get("name"))
                .or_else(|| non_empty_str(map.get("display"))),
            FieldRef::Scalar(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Numeric `id` of a nested object
    pub fn id(self) -> Option<u64> {
        match self {
            FieldRef::Object(map) => map.get("id").and_then(Value::as_u64),
            _ => None,
        }
    }

    /// `url` of a nested object
    pub fn url(self) -> Option<String> {
        match self {
            FieldRef::Object(map) => non_empty_str(map.get("url")),
            _ => None,
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Label of `raw` itself (not one of its fields)
pub fn label(raw: &Value) -> Option<String> {
    FieldRef::of(Some(raw)).name_or_display()
}

/// Label of field `key` of `raw`
pub fn name_or_display(raw: &Value, key: &str) -> Option<String> {
    FieldRef::get(raw, key).name_or_display()
}

/// String field `key` of `raw`
pub fn string_field(raw: &Value, key: &str) -> Option<String> {
    non_empty_str(raw.get(key))
}

/// Numeric `id` of `raw`
pub fn id_of(raw: &Value) -> Option<u64> {
    raw.get("id").and_then(Value::as_u64)
}
