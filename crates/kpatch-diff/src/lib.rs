//! Diff engine for kpatch.
//!
//! Compares an old and a new [`Mapping`](kpatch_types::Mapping) and produces
//! the JSON Patch (RFC 6902) operations that turn one into the other, with
//! keys escaped into JSON Pointer (RFC 6901) segments.
//!
//! # Key Types
//!
//! - [`PatchOperation`] / [`OpKind`] -- A single add/replace/remove operation
//! - [`PatchOperations`] -- Ordered operation sequence, serialized as a JSON array
//! - [`DiffOptions`] -- Prefix strictness and whole-object creation settings
//!
//! # Modules
//!
//! - [`pointer`] -- Segment escaping and prefix handling
//! - [`diff`] -- The diff engine
//! - [`operation`] -- Operation model and order-independent comparison
//! - [`apply`] -- Applying a patch back onto a mapping

pub mod apply;
pub mod diff;
pub mod error;
pub mod operation;
pub mod options;
pub mod pointer;

pub use apply::apply_to_mapping;
pub use diff::{diff_json_objects, diff_mappings, diff_with_options};
pub use error::{DiffError, DiffResult};
pub use operation::{ops_equal_unordered, OpKind, PatchOperation, PatchOperations};
pub use options::DiffOptions;
