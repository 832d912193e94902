//! Permissive field extraction
//!
//! Clients vary in how carefully they shape requests. Every field read at the
//! params boundary goes through [`field`]: a missing or wrongly typed value is
//! replaced by the caller's default and never turns into an error.

use serde_json::{Map, Value};

/// A value read from a JSON object, with a record of whether it was usable.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<T> {
    pub value: T,
    /// True when the key was present and held the expected JSON type.
    pub present: bool,
}

impl<T> Extracted<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Read `key` from `fields` with `extract`, falling back to `default`.
pub fn field<'a, T>(
    fields: &'a Map<String, Value>,
    key: &str,
    extract: impl FnOnce(&'a Value) -> Option<T>,
    default: T,
) -> Extracted<T> {
    match fields.get(key).and_then(extract) {
        Some(value) => Extracted {
            value,
            present: true,
        },
        None => Extracted {
            value: default,
            present: false,
        },
    }
}

pub fn string_or<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    default: &'a str,
) -> Extracted<&'a str> {
    field(fields, key, Value::as_str, default)
}

/// Owned copy of a nested object, or an empty map.
pub fn object_or_empty(fields: &Map<String, Value>, key: &str) -> Extracted<Map<String, Value>> {
    field(fields, key, |v| v.as_object().cloned(), Map::new())
}
