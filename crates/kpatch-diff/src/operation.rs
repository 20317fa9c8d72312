//! Patch operations and operation sequences.
//!
//! Operations serialize to the JSON Patch (RFC 6902) wire shape: every
//! object carries `op` and `path`, and `value` appears only for `add` and
//! `replace`. The `op` tag comes from the enum variant during serialization
//! and is never stored alongside the data.

use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DiffError, DiffResult};

/// The kind of a [`PatchOperation`], as written in the `op` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpKind {
    Add,
    Replace,
    Remove,
}

impl OpKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Replace => "replace",
            OpKind::Remove => "remove",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single patch operation addressed by a JSON Pointer path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase", deny_unknown_fields)]
pub enum PatchOperation {
    /// Create the value at `path`. The value is a string for a single key,
    /// or a whole object when the target did not exist at all.
    Add { path: String, value: Value },
    /// Overwrite an existing value at `path`.
    Replace { path: String, value: Value },
    /// Delete the value at `path`.
    Remove { path: String },
}

impl PatchOperation {
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Add {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Replace {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self::Remove { path: path.into() }
    }

    pub fn kind(&self) -> OpKind {
        match self {
            Self::Add { .. } => OpKind::Add,
            Self::Replace { .. } => OpKind::Replace,
            Self::Remove { .. } => OpKind::Remove,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. } | Self::Replace { path, .. } | Self::Remove { path } => path,
        }
    }

    /// The carried value; `None` for removals.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Add { value, .. } | Self::Replace { value, .. } => Some(value),
            Self::Remove { .. } => None,
        }
    }
}

impl fmt::Display for PatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// An ordered sequence of patch operations.
///
/// `PartialEq` compares in insertion order. Use [`ops_equal_unordered`] or
/// [`PatchOperations::equivalent`] to compare regardless of emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchOperations {
    ops: Vec<PatchOperation>,
}

impl PatchOperations {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: PatchOperation) {
        self.ops.push(op);
    }

    /// Returns `true` if there are no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, PatchOperation> {
        self.ops.iter()
    }

    pub fn as_slice(&self) -> &[PatchOperation] {
        &self.ops
    }

    pub fn into_vec(self) -> Vec<PatchOperation> {
        self.ops
    }

    /// Number of `add` operations.
    pub fn additions(&self) -> usize {
        self.count(OpKind::Add)
    }

    /// Number of `replace` operations.
    pub fn replacements(&self) -> usize {
        self.count(OpKind::Replace)
    }

    /// Number of `remove` operations.
    pub fn removals(&self) -> usize {
        self.count(OpKind::Remove)
    }

    fn count(&self, kind: OpKind) -> usize {
        self.ops.iter().filter(|op| op.kind() == kind).count()
    }

    /// A copy of the operations stably sorted by path. `self` is untouched.
    pub fn sorted_by_path(&self) -> Vec<PatchOperation> {
        sorted_by_path(&self.ops)
    }

    /// Order-independent comparison against any slice of operations.
    pub fn equivalent(&self, other: &[PatchOperation]) -> bool {
        ops_equal_unordered(&self.ops, other)
    }

    /// Serialize to the compact JSON array sent on the wire.
    pub fn to_json(&self) -> DiffResult<String> {
        serde_json::to_string(self).map_err(|e| DiffError::Serialization(e.to_string()))
    }

    /// Serialize to an indented JSON array.
    pub fn to_json_pretty(&self) -> DiffResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiffError::Serialization(e.to_string()))
    }

    /// Parse a JSON array of operations.
    pub fn from_json(json: &str) -> DiffResult<Self> {
        serde_json::from_str(json).map_err(|e| DiffError::Serialization(e.to_string()))
    }
}

impl From<Vec<PatchOperation>> for PatchOperations {
    fn from(ops: Vec<PatchOperation>) -> Self {
        Self { ops }
    }
}

impl FromIterator<PatchOperation> for PatchOperations {
    fn from_iter<I: IntoIterator<Item = PatchOperation>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PatchOperations {
    type Item = &'a PatchOperation;
    type IntoIter = slice::Iter<'a, PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl IntoIterator for PatchOperations {
    type Item = PatchOperation;
    type IntoIter = std::vec::IntoIter<PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

fn sorted_by_path(ops: &[PatchOperation]) -> Vec<PatchOperation> {
    let mut sorted = ops.to_vec();
    // `sort_by` is stable; `str` ordering is byte-wise.
    sorted.sort_by(|a, b| a.path().cmp(b.path()));
    sorted
}

/// Compare two operation lists ignoring emission order.
///
/// Both sides are sorted by path (stable, byte order) into copies, then
/// compared element by element for full structural equality. Neither input
/// is reordered.
pub fn ops_equal_unordered(a: &[PatchOperation], b: &[PatchOperation]) -> bool {
    a.len() == b.len() && sorted_by_path(a) == sorted_by_path(b)
}
