//! Error types for the diff crate.

use kpatch_types::TypeError;

/// Errors that can occur while diffing or applying patches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// An input mapping could not be built from the caller's data.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The path prefix was rejected under strict prefix checking.
    #[error("malformed path prefix {prefix:?}: {reason}")]
    MalformedPrefix { prefix: String, reason: String },

    /// A replace or remove targeted a key that does not exist.
    #[error("path not found: {path}")]
    PathNotFound { path: String },

    /// An operation addressed something a flat mapping cannot hold.
    #[error("invalid patch target {path}: {reason}")]
    InvalidTarget { path: String, reason: String },

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
