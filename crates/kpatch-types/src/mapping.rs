//! String-keyed, string-valued state snapshots.
//!
//! A [`Mapping`] is what the diff engine compares: one layer of declared
//! configuration such as a label or annotation map. Values are always
//! strings; loosely typed input is validated on the way in and never coerced.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TypeError;

/// Immutable snapshot of string-keyed string values.
///
/// Backed by a `BTreeMap` so iteration order is stable across runs, which in
/// turn keeps generated patches deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping(BTreeMap<String, String>);

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from a JSON object, rejecting any non-string value.
    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self, TypeError> {
        let mut entries = BTreeMap::new();
        for (key, value) in object {
            match value {
                Value::String(s) => {
                    entries.insert(key.clone(), s.clone());
                }
                other => {
                    return Err(TypeError::TypeMismatch {
                        key: key.clone(),
                        found: json_type_name(other),
                    });
                }
            }
        }
        Ok(Self(entries))
    }

    /// Build a mapping from an arbitrary JSON value, which must be an object.
    ///
    /// `null` is accepted as the empty mapping, matching how an absent field
    /// reaches us from the configuration layer.
    pub fn from_json(value: &Value) -> Result<Self, TypeError> {
        match value {
            Value::Object(object) => Self::from_json_object(object),
            Value::Null => Ok(Self::new()),
            other => Err(TypeError::NotAnObject {
                found: json_type_name(other),
            }),
        }
    }

    /// Render the mapping as a JSON object value.
    pub fn to_json_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, String> {
        self.0.keys()
    }

    /// Consume the snapshot, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for Mapping {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self(entries)
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Human-readable name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
