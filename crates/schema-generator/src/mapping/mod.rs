//! Mapping of model properties to storage.
//!
//! - [`datatype`] recognizes primitive vocabulary datatypes
//! - [`storage`] infers the column type of a primitive property
//! - [`relation`] turns a relation's cardinality into mapping declarations
//! - [`reserved`] knows which names collide with SQL keywords

pub mod datatype;
pub mod relation;
pub mod reserved;
pub mod storage;

pub use datatype::{native_type, NativeType};
pub use relation::{relation_attributes, resolve_target};
pub use reserved::is_reserved;
pub use storage::{is_collection, is_relation, storage_type, DEFAULT_STORAGE_TYPE};
