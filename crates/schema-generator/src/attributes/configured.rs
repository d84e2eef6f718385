//! Declarations taken literally from the configuration.

use super::{literal_attributes, AttributeGenerator, GeneratorContext, GeneratorKind};
use crate::config::GeneratorConfig;
use crate::diagnostic::SchemaError;
use crate::model::{Attribute, Class, Property, Use};

/// Emits `types[class].attributes` and `types[class].properties[prop].attributes`.
pub struct ConfiguredGenerator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ConfiguredGenerator<'a> {
    pub fn new(context: GeneratorContext<'a>) -> Self {
        Self {
            config: context.config,
        }
    }
}

impl AttributeGenerator for ConfiguredGenerator<'_> {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Configuration
    }

    fn class_attributes(&self, class: &Class) -> Result<Vec<Attribute>, SchemaError> {
        match self.config.type_config(&class.name) {
            Some(type_config) => literal_attributes(&type_config.attributes, None),
            None => Ok(Vec::new()),
        }
    }

    fn property_attributes(
        &self,
        property: &Property,
        class_name: &str,
    ) -> Result<Vec<Attribute>, SchemaError> {
        match self.config.property_config(class_name, &property.name) {
            Some(property_config) => literal_attributes(&property_config.attributes, None),
            None => Ok(Vec::new()),
        }
    }

    fn uses(&self, _class: &Class) -> Vec<Use> {
        Vec::new()
    }
}
