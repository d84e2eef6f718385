//! In-memory domain model.
//!
//! The ingestion stage builds these types from a vocabulary. Mutators then
//! change them in place, generators read them, and the merge engine consumes
//! them to update the target artifact. Relations between classes are plain
//! names resolved through [`ClassRegistry`], so no class owns another.

mod attribute;
mod cardinality;
mod class;
mod property;
mod registry;

pub use attribute::{dedup_attributes, Arguments, Attribute, Constant, Use};
pub use cardinality::Cardinality;
pub use class::{Class, ParentRef};
pub use property::{Property, Range};
pub use registry::ClassRegistry;
