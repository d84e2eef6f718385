//! Column type inference.

use super::datatype::{native_type, NativeType};
use crate::model::Property;

/// Column type assumed by the persistence backend when none is given.
pub const DEFAULT_STORAGE_TYPE: &str = "string";

/// Infers the column type of a property.
///
/// Returns `None` when the property is a relation and must be mapped by
/// the cardinality resolver instead.
pub fn storage_type(property: &Property) -> Option<&'static str> {
    if property.is_enum {
        return Some(if property.is_array { "simple_array" } else { "string" });
    }

    let native = property.range.as_ref().and_then(|r| native_type(&r.uri))?;

    if property.is_array {
        return Some("json");
    }

    Some(match native {
        NativeType::Time => "time",
        NativeType::DateTime => "datetime",
        NativeType::Date => "date",
        NativeType::Boolean => "boolean",
        NativeType::Integer => "integer",
        NativeType::Float => "float",
        NativeType::Text => "text",
        NativeType::Interval => "string",
    })
}

/// Whether the property points to another class.
pub fn is_relation(property: &Property) -> bool {
    !property.is_id && storage_type(property).is_none()
}

/// Whether the property is typed as a collection object rather than a bare list.
pub fn is_collection(property: &Property, use_collection: bool) -> bool {
    use_collection && property.is_array && is_relation(property)
}
