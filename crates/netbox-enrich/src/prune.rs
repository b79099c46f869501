//! Recursive removal of empty and placeholder values ("crush").

use serde_json::Value;

/// Strings NetBox uses for "no value"
const PLACEHOLDER_STRINGS: [&str; 2] = ["Unspecified", "unspecified"];

/// Whether a value counts as absent: null, "", [], {} or a placeholder string
pub fn is_placeholder(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty() || PLACEHOLDER_STRINGS.contains(&s.as_str()),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Prune placeholders at every nesting level
///
/// Children are pruned first, so a nested object or array that only held
/// placeholders disappears from its parent as well. The top-level value is
/// returned even if it ends up empty.
pub fn crush(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(crush)
                .filter(|item| !is_placeholder(item))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, item)| (key, crush(item)))
                .filter(|(_, item)| !is_placeholder(item))
                .collect(),
        ),
        scalar => scalar,
    }
}
