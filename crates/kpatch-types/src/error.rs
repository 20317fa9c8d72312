use thiserror::Error;

/// Errors produced when converting caller input into kpatch types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A value that must be a string was some other JSON type.
    #[error("type mismatch for {key:?}: expected string, got {found}")]
    TypeMismatch { key: String, found: &'static str },

    /// The input was not a JSON object.
    #[error("expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// A resource identifier did not have the `namespace/name` shape.
    #[error("unexpected ID format ({id:?}), expected \"namespace/name\"")]
    InvalidId { id: String },
}
