//! Per-class configuration applied onto the model.

use super::ClassMutator;
use crate::config::{GeneratorConfig, ParentConfig};
use crate::model::{Class, ParentRef};

/// Copies `types[class]` settings (parent, security, operations, property
/// storage options) onto the class and its properties.
pub struct ClassConfigMutator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ClassConfigMutator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }
}

impl ClassMutator for ClassConfigMutator<'_> {
    fn name(&self) -> &str {
        "class-config"
    }

    fn apply(&self, class: &mut Class) {
        let Some(type_config) = self.config.type_config(&class.name) else {
            return;
        };

        match &type_config.parent {
            Some(ParentConfig::Flag(false)) => class.parent = ParentRef::None,
            Some(ParentConfig::Name(name)) => class.parent = ParentRef::Named(name.clone()),
            Some(ParentConfig::Flag(true)) | None => {}
        }

        if let Some(security) = &type_config.security {
            class.security = Some(security.clone());
        }
        if let Some(operations) = &type_config.operations {
            class.operations = operations.clone();
        }

        for (name, property_config) in &type_config.properties {
            let Some(property) = class.properties.get_mut(name) else {
                tracing::warn!(class = %class.name, property = %name, "configured property is not modeled");
                continue;
            };
            if let Some(table) = &property_config.relation_table_name {
                property.relation_table_name = Some(table.clone());
            }
            for (key, value) in &property_config.column_options {
                property.column_options.insert(key.clone(), value.clone());
            }
        }
    }
}
