use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};
use crate::pointer::normalize_prefix;

/// Configuration for a diff run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Reject malformed path prefixes instead of normalizing them.
    ///
    /// A strict prefix must be empty or start with `/`, and must not end
    /// with `/`. When `false`, trailing slashes are stripped and anything
    /// else is accepted as written.
    pub strict_prefix: bool,
    /// When the old mapping is empty, emit a single `add` of the whole new
    /// mapping at the prefix. When `false`, emit one `add` per key instead,
    /// for callers that know the parent object already exists.
    pub whole_map_add: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            strict_prefix: false,
            whole_map_add: true,
        }
    }
}

impl DiffOptions {
    /// Default behavior plus strict prefix validation.
    pub fn strict() -> Self {
        Self {
            strict_prefix: true,
            ..Default::default()
        }
    }

    /// Validate or normalize `prefix` according to these options.
    pub fn check_prefix<'a>(&self, prefix: &'a str) -> DiffResult<&'a str> {
        if !self.strict_prefix {
            return Ok(normalize_prefix(prefix));
        }
        if !prefix.is_empty() && !prefix.starts_with('/') {
            return Err(DiffError::MalformedPrefix {
                prefix: prefix.to_string(),
                reason: "must be empty or start with '/'".into(),
            });
        }
        if prefix.ends_with('/') {
            return Err(DiffError::MalformedPrefix {
                prefix: prefix.to_string(),
                reason: "must not end with '/'".into(),
            });
        }
        Ok(prefix)
    }
}
