//! Validation constraint declarations.

use serde_json::Value;

use super::{AttributeGenerator, GeneratorContext, GeneratorKind};
use crate::config::GeneratorConfig;
use crate::diagnostic::SchemaError;
use crate::mapping::{native_type, NativeType};
use crate::model::{Attribute, Class, Property, Use};

/// Generates validation constraints.
pub struct ConstraintGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ConstraintGenerator<'a> {
    pub fn new(context: GeneratorContext<'a>) -> Self {
        Self {
            config: context.config,
        }
    }

    fn unique_properties(class: &Class) -> impl Iterator<Item = &Property> {
        class.properties.values().filter(|p| p.is_unique && !p.is_id)
    }
}

impl AttributeGenerator for ConstraintGenerator<'_> {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Constraint
    }

    fn class_attributes(&self, class: &Class) -> Result<Vec<Attribute>, SchemaError> {
        if class.is_enum {
            return Ok(Vec::new());
        }

        Ok(Self::unique_properties(class)
            .map(|p| {
                Attribute::new("UniqueEntity").arg("fields", vec![Value::String(p.name.clone())])
            })
            .collect())
    }

    fn property_attributes(
        &self,
        property: &Property,
        _class_name: &str,
    ) -> Result<Vec<Attribute>, SchemaError> {
        if property.is_id {
            return Ok(Vec::new());
        }

        let mut attributes = Vec::new();
        let native = property.range.as_ref().and_then(|r| native_type(&r.uri));

        if native == Some(NativeType::Text) && !property.is_array {
            if property.name.eq_ignore_ascii_case("email") {
                attributes.push(Attribute::new("Assert\\Email"));
            } else if property.range_name() == Some("URL") || property.range_name() == Some("anyURI") {
                attributes.push(Attribute::new("Assert\\Url"));
            }
        }

        if property.is_enum {
            if let Some(target) = property.range_name() {
                let mut choice = Attribute::new("Assert\\Choice").arg(
                    "callback",
                    vec![Value::String(target.to_string()), Value::String("toArray".to_string())],
                );
                if property.is_array {
                    choice = choice.arg("multiple", true);
                }
                attributes.push(choice);
            }
        }

        if !property.is_nullable && !property.is_array {
            attributes.push(Attribute::new("Assert\\NotNull"));
        }

        Ok(attributes)
    }

    fn uses(&self, class: &Class) -> Vec<Use> {
        if class.is_enum {
            return Vec::new();
        }

        let mut uses = Vec::new();

        let constrained = class.properties.values().any(|p| {
            matches!(self.property_attributes(p, &class.name), Ok(attrs) if !attrs.is_empty())
        });
        if constrained {
            uses.push(Use::aliased("Symfony\\Component\\Validator\\Constraints", "Assert"));
        }

        if Self::unique_properties(class).next().is_some() {
            uses.push(Use::new("Symfony\\Bridge\\Doctrine\\Validator\\Constraints\\UniqueEntity"));
        }

        for property in class.properties.values().filter(|p| p.is_enum) {
            if let Some(target) = property.range_name() {
                uses.push(Use::new(format!("{}\\{}", self.config.namespaces.enum_, target)));
            }
        }

        uses
    }
}
