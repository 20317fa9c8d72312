//! Foundation types for kpatch.
//!
//! This crate holds the values that cross the boundary between a schema
//! translation layer and the diff engine. Everything here is plain data with
//! strict conversion from loosely typed JSON input.
//!
//! # Key Types
//!
//! - [`Mapping`] — Immutable string-keyed, string-valued snapshot of one layer of state
//! - [`ResourceId`] — `namespace/name` identifier of a remote resource
//! - [`TypeError`] — Input conversion failures (type mismatches, malformed ids)

pub mod error;
pub mod id;
pub mod list;
pub mod mapping;

pub use error::TypeError;
pub use id::ResourceId;
pub use list::expand_string_list;
pub use mapping::{json_type_name, Mapping};
