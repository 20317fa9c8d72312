use serde_json::Value;

use crate::error::TypeError;
use crate::mapping::json_type_name;

/// Convert a loosely typed list into strings.
///
/// Upstream configuration parsers turn empty strings inside lists into
/// `null`, so `null` maps back to `""`. Any other non-string entry is a
/// [`TypeError::TypeMismatch`] keyed by its index.
pub fn expand_string_list(items: &[Value]) -> Result<Vec<String>, TypeError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Null => Ok(String::new()),
            other => Err(TypeError::TypeMismatch {
                key: i.to_string(),
                found: json_type_name(other),
            }),
        })
        .collect()
}
