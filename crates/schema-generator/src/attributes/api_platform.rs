//! Resource metadata declarations.

use serde_json::Value;

use super::{AttributeGenerator, GeneratorContext, GeneratorKind, Operations};
use crate::diagnostic::SchemaError;
use crate::model::{Arguments, Attribute, Class, Property, Use};

/// Generates API resource declarations.
pub struct ApiPlatformGenerator;

impl ApiPlatformGenerator {
    pub fn new(_context: GeneratorContext<'_>) -> Self {
        Self
    }

    fn is_resource(class: &Class) -> bool {
        !class.is_enum && !class.is_embeddable
    }
}

impl AttributeGenerator for ApiPlatformGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::ApiPlatform
    }

    fn class_attributes(&self, class: &Class) -> Result<Vec<Attribute>, SchemaError> {
        if !Self::is_resource(class) {
            return Ok(Vec::new());
        }

        let mut resource = Attribute::new("ApiResource").arg("shortName", class.name.as_str());
        if let Some(uri) = &class.uri {
            resource = resource.arg("types", vec![Value::String(uri.clone())]);
        }
        if let Some(security) = &class.security {
            resource = resource.arg("security", security.as_str());
        }
        if !class.operations.is_empty() {
            let operations = Operations::resolve(&class.name, &class.operations)?;
            resource = resource
                .arg("itemOperations", operations.item)
                .arg("collectionOperations", operations.collection);
        }

        Ok(vec![resource])
    }

    fn property_attributes(
        &self,
        property: &Property,
        _class_name: &str,
    ) -> Result<Vec<Attribute>, SchemaError> {
        let mut arguments = Arguments::new();

        if !property.is_readable_link {
            arguments.insert("readableLink".to_string(), false.into());
        }
        if !property.is_writable_link {
            arguments.insert("writableLink".to_string(), false.into());
        }
        if let Some(security) = &property.security {
            arguments.insert("security".to_string(), security.as_str().into());
        }
        if !property.is_custom {
            if let Some(uri) = &property.uri {
                arguments.insert("types".to_string(), Value::Array(vec![uri.as_str().into()]));
            }
        }

        if arguments.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Attribute::with_arguments("ApiProperty", arguments)])
    }

    fn uses(&self, class: &Class) -> Vec<Use> {
        if !Self::is_resource(class) {
            return Vec::new();
        }

        let mut uses = vec![Use::new("ApiPlatform\\Metadata\\ApiResource")];
        let has_property_metadata = class
            .properties
            .values()
            .any(|p| matches!(self.property_attributes(p, &class.name), Ok(attrs) if !attrs.is_empty()));
        if has_property_metadata {
            uses.push(Use::new("ApiPlatform\\Metadata\\ApiProperty"));
        }
        uses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generator() -> ApiPlatformGenerator {
        ApiPlatformGenerator
    }

    #[test]
    fn resource_declaration() {
        let mut book = Class::new("Book").with_uri("https://schema.org/Book");
        book.security = Some("is_granted('ROLE_USER')".to_string());
        book.operations = json!({ "item": { "get": {} } }).as_object().cloned().unwrap();

        let attrs = generator().class_attributes(&book).unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(
            Value::Object(attrs[0].arguments.clone()),
            json!({
                "shortName": "Book",
                "types": ["https://schema.org/Book"],
                "security": "is_granted('ROLE_USER')",
                "itemOperations": { "get": {} },
                "collectionOperations": {}
            })
        );
    }

    #[test]
    fn invalid_operations_are_fatal() {
        let mut book = Class::new("Book");
        book.operations = json!({ "weird": {} }).as_object().cloned().unwrap();

        let err = generator().class_attributes(&book).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownOperationGroup { .. }));
    }

    #[test]
    fn enums_are_not_resources() {
        let mut gender = Class::new("GenderType");
        gender.is_enum = true;
        assert!(generator().class_attributes(&gender).unwrap().is_empty());
        assert!(generator().uses(&gender).is_empty());
    }

    #[test]
    fn property_defaults_emit_only_the_identifier() {
        let name = Property::new("name").with_uri("https://schema.org/name");
        let attrs = generator().property_attributes(&name, "Book").unwrap();
        assert_eq!(
            Value::Object(attrs[0].arguments.clone()),
            json!({ "types": ["https://schema.org/name"] })
        );
    }

    #[test]
    fn property_overrides() {
        let mut author = Property::new("author").with_uri("https://schema.org/author");
        author.is_readable_link = false;
        author.security = Some("is_granted('ROLE_ADMIN')".to_string());
        author.is_custom = true;

        let attrs = generator().property_attributes(&author, "Book").unwrap();
        assert_eq!(
            Value::Object(attrs[0].arguments.clone()),
            json!({ "readableLink": false, "security": "is_granted('ROLE_ADMIN')" })
        );

        let mut custom = Property::new("slug");
        custom.is_custom = true;
        assert!(generator().property_attributes(&custom, "Book").unwrap().is_empty());
    }
}
