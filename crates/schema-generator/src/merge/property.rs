//! Field synthesis.

use serde_json::Value;

use crate::artifact::PropertyDecl;
use crate::config::{GeneratorConfig, IdStrategy};
use crate::mapping::{is_collection, native_type};
use crate::model::Property;

/// Element type of a property: the relation target, the native type, or
/// `string` for enums.
pub(crate) fn item_type(property: &Property) -> Option<String> {
    if property.is_enum {
        return Some("string".to_string());
    }
    let range = property.range.as_ref()?;
    match native_type(&range.uri) {
        Some(native) => Some(native.type_hint().to_string()),
        None => Some(range.name.clone()),
    }
}

/// Type hint of the generated field.
pub(crate) fn type_hint(property: &Property, class_name: &str, config: &GeneratorConfig) -> Option<String> {
    if property.is_id {
        let hint = match config.id_for(class_name).generation_strategy {
            IdStrategy::Auto => "int",
            _ => "string",
        };
        return Some(hint.to_string());
    }

    if property.is_array {
        let hint = if is_collection(property, config.doctrine.use_collection) {
            "Collection"
        } else {
            "array"
        };
        return Some(hint.to_string());
    }

    item_type(property)
}

/// Whether the field accepts null. Identifiers filled in by the database
/// are null until persisted.
pub(crate) fn is_nullable(property: &Property, class_name: &str, config: &GeneratorConfig) -> bool {
    if property.is_id {
        let id = config.id_for(class_name);
        return id.generation_strategy != IdStrategy::None && !property.is_writable;
    }
    !property.is_array && property.is_nullable
}

fn default_value(property: &Property, class_name: &str, config: &GeneratorConfig) -> Option<Value> {
    if property.is_array {
        if is_collection(property, config.doctrine.use_collection) {
            return None;
        }
        return Some(Value::Array(Vec::new()));
    }
    is_nullable(property, class_name, config).then_some(Value::Null)
}

fn doc_comment(property: &Property) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(description) = &property.description {
        parts.push(description.trim().to_string());
    }
    if let Some(uri) = &property.uri {
        parts.push(format!("@see {}", uri));
    }
    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

/// Builds the field declaration of a modeled property.
pub(crate) fn synthesize_property(
    property: &Property,
    class_name: &str,
    config: &GeneratorConfig,
) -> PropertyDecl {
    PropertyDecl {
        name: property.name.clone(),
        visibility: config.field_visibility,
        type_hint: type_hint(property, class_name, config),
        nullable: is_nullable(property, class_name, config),
        default: default_value(property, class_name, config),
        attributes: property.attributes.clone(),
        comment: doc_comment(property),
    }
}
