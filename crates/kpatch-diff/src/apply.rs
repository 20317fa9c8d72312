//! Apply a patch to a flat mapping.
//!
//! This is the inverse direction of the diff: it lets callers check what a
//! patch will do to a live mapping before submitting it. Only the shapes the
//! diff engine produces are supported: operations on the prefix itself, or
//! on a single key directly below it.

use std::collections::BTreeMap;

use serde_json::Value;

use kpatch_types::{json_type_name, Mapping};

use crate::error::{DiffError, DiffResult};
use crate::operation::PatchOperation;
use crate::pointer;

/// Apply `ops` in order to `target`, which lives at `prefix`.
///
/// - `add` at the prefix replaces the whole mapping with the object value;
///   `add` at a key inserts or overwrites it.
/// - `replace` at a key overwrites it, failing if the key is absent.
/// - `remove` at a key deletes it, failing if the key is absent; `remove`
///   at the prefix clears the mapping.
///
/// Keys in `target` that no operation touches are kept as they are.
pub fn apply_to_mapping(
    prefix: &str,
    target: &Mapping,
    ops: &[PatchOperation],
) -> DiffResult<Mapping> {
    let prefix = pointer::normalize_prefix(prefix);
    let mut entries: BTreeMap<String, String> = target.clone().into_inner();

    for op in ops {
        match locate(prefix, op.path())? {
            Target::Root => match op {
                PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => {
                    entries = Mapping::from_json(value)?.into_inner();
                }
                PatchOperation::Remove { .. } => entries.clear(),
            },
            Target::Key(key) => match op {
                PatchOperation::Add { path, value } => {
                    entries.insert(key, string_value(path, value)?);
                }
                PatchOperation::Replace { path, value } => {
                    let value = string_value(path, value)?;
                    match entries.get_mut(&key) {
                        Some(slot) => *slot = value,
                        None => return Err(DiffError::PathNotFound { path: path.clone() }),
                    }
                }
                PatchOperation::Remove { path } => {
                    if entries.remove(&key).is_none() {
                        return Err(DiffError::PathNotFound { path: path.clone() });
                    }
                }
            },
        }
    }

    Ok(Mapping::from(entries))
}

enum Target {
    Root,
    Key(String),
}

fn locate(prefix: &str, path: &str) -> DiffResult<Target> {
    if path == prefix {
        return Ok(Target::Root);
    }
    let segment = path
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or_else(|| DiffError::InvalidTarget {
            path: path.to_string(),
            reason: format!("not under prefix {prefix:?}"),
        })?;
    if segment.contains('/') {
        return Err(DiffError::InvalidTarget {
            path: path.to_string(),
            reason: "nested paths are not supported".into(),
        });
    }
    Ok(Target::Key(pointer::unescape(segment).into_owned()))
}

fn string_value(path: &str, value: &Value) -> DiffResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(DiffError::InvalidTarget {
            path: path.to_string(),
            reason: format!("expected string value, got {}", json_type_name(other)),
        }),
    }
}
