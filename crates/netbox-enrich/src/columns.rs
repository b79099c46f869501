//! Row-to-column folding of pruned records.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Ordered mapping from field name to the values seen for that field
///
/// Field order is first-occurrence order across the folded records. A record
/// that lacks a field contributes nothing to that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    columns: Vec<(String, Vec<Value>)>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold records into columns; values that are not objects are skipped
    pub fn collect<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        records.into_iter().fold(Self::new(), |mut columns, record| {
            if let Value::Object(fields) = record {
                for (key, value) in fields {
                    columns.push(key, value);
                }
            }
            columns
        })
    }

    /// Append `value` to column `key`, creating the column on first use
    pub fn push(&mut self, key: String, value: Value) {
        match self.columns.iter_mut().find(|(name, _)| *name == key) {
            Some((_, values)) => values.push(value),
            None => self.columns.push((key, vec![value])),
        }
    }

    /// Values of one column
    pub fn get(&self, key: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Column names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Flatten one level of nested lists in column `key` and drop repeats,
    /// keeping the first occurrence of each value
    pub fn flatten_unique(&mut self, key: &str) {
        let Some((_, values)) = self.columns.iter_mut().find(|(name, _)| name == key) else {
            return;
        };

        let mut unique: Vec<Value> = Vec::with_capacity(values.len());
        for value in values.drain(..) {
            let items = match value {
                Value::Array(items) => items,
                single => vec![single],
            };
            for item in items {
                if !unique.contains(&item) {
                    unique.push(item);
                }
            }
        }
        *values = unique;
    }

    /// Render as a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.columns
                .iter()
                .map(|(name, values)| (name.clone(), Value::Array(values.clone())))
                .collect(),
        )
    }
}

impl Serialize for Columns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, values) in &self.columns {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}
