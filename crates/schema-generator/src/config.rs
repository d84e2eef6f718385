//! Generator configuration.
//!
//! Mirrors the configuration document the generator is driven by. Every key
//! has a default, so an empty document (`{}`) is a valid configuration.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::artifact::Visibility;
use crate::attributes::GeneratorKind;
use crate::diagnostic::SchemaError;
use crate::model::{Arguments, Class};

/// Configuration for the schema generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Global identifier settings.
    pub id: IdConfig,

    /// Per-class settings keyed by class name.
    pub types: BTreeMap<String, TypeConfig>,

    pub doctrine: DoctrineConfig,

    /// Generate getters, setters, adders, and removers.
    pub accessor_methods: bool,

    /// Mutators return `$this` instead of nothing.
    pub fluent_mutator_methods: bool,

    /// Visibility of generated fields.
    pub field_visibility: Visibility,

    /// File header written to artifacts that have none.
    pub header: Option<String>,

    pub namespaces: NamespacesConfig,

    /// Attribute generators, in the order they run.
    pub attribute_generators: Vec<GeneratorKind>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            id: IdConfig::default(),
            types: BTreeMap::new(),
            doctrine: DoctrineConfig::default(),
            accessor_methods: true,
            fluent_mutator_methods: false,
            field_visibility: Visibility::Private,
            header: None,
            namespaces: NamespacesConfig::default(),
            attribute_generators: GeneratorKind::ALL.to_vec(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration document.
    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Builds a configuration from an already parsed document.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn type_config(&self, class: &str) -> Option<&TypeConfig> {
        self.types.get(class)
    }

    pub fn property_config(&self, class: &str, property: &str) -> Option<&PropertyConfig> {
        self.types.get(class)?.properties.get(property)
    }

    /// Effective identifier settings for a class.
    ///
    /// `types[class].pk` is merged key by key over the global `id` section;
    /// a key set on the class wins.
    pub fn id_for(&self, class: &str) -> IdConfig {
        match self.types.get(class).and_then(|t| t.pk.as_ref()) {
            Some(pk) => self.id.merged(pk),
            None => self.id.clone(),
        }
    }

    /// Namespace the artifact of a class lives in.
    pub fn namespace_for(&self, class: &Class) -> &str {
        if class.is_enum {
            &self.namespaces.enum_
        } else {
            &self.namespaces.entity
        }
    }
}

/// Identifier generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Auto,
    Uuid,
    Mongoid,
    None,
}

impl IdStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdStrategy::Auto => "auto",
            IdStrategy::Uuid => "uuid",
            IdStrategy::Mongoid => "mongoid",
            IdStrategy::None => "none",
        }
    }
}

/// Which classes receive an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdOnClass {
    /// Every class.
    All,
    /// Skip classes that have a parent.
    Parent,
    /// Skip classes that have a child.
    #[default]
    Child,
}

/// Identifier settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdConfig {
    pub generate: bool,
    pub generation_strategy: IdStrategy,
    pub writable: bool,
    pub on_class: IdOnClass,
    pub name: String,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            generate: true,
            generation_strategy: IdStrategy::Auto,
            writable: false,
            on_class: IdOnClass::Child,
            name: "id".to_string(),
        }
    }
}

impl IdConfig {
    /// Applies the keys set in `over` on top of `self`.
    pub fn merged(&self, over: &PartialIdConfig) -> IdConfig {
        IdConfig {
            generate: over.generate.unwrap_or(self.generate),
            generation_strategy: over.generation_strategy.unwrap_or(self.generation_strategy),
            writable: over.writable.unwrap_or(self.writable),
            on_class: over.on_class.unwrap_or(self.on_class),
            name: over.name.clone().unwrap_or_else(|| self.name.clone()),
        }
    }
}

/// Per-class identifier overrides. Unset keys fall back to the global section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialIdConfig {
    pub generate: Option<bool>,
    pub generation_strategy: Option<IdStrategy>,
    pub writable: Option<bool>,
    pub on_class: Option<IdOnClass>,
    pub name: Option<String>,
}

/// Persistence-mapping settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctrineConfig {
    /// Type many-valued relations as collections instead of bare lists.
    pub use_collection: bool,

    /// Declarations emitted for abstract classes instead of a mapped superclass.
    pub inheritance_attributes: Option<Arguments>,
}

impl Default for DoctrineConfig {
    fn default() -> Self {
        Self {
            use_collection: true,
            inheritance_attributes: None,
        }
    }
}

/// Namespaces of generated artifacts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamespacesConfig {
    pub entity: String,
    #[serde(rename = "enum")]
    pub enum_: String,
}

impl Default for NamespacesConfig {
    fn default() -> Self {
        Self {
            entity: "App\\Entity".to_string(),
            enum_: "App\\Enum".to_string(),
        }
    }
}

/// Settings of a single class.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeConfig {
    pub doctrine: TypeDoctrineConfig,

    /// Identifier overrides for this class.
    pub pk: Option<PartialIdConfig>,

    pub properties: BTreeMap<String, PropertyConfig>,

    /// Operations grouped by `item` and `collection`.
    pub operations: Option<Arguments>,

    pub security: Option<String>,

    pub parent: Option<ParentConfig>,

    /// Literal class declarations: name -> arguments.
    pub attributes: Arguments,
}

/// Persistence settings of a single class.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TypeDoctrineConfig {
    /// Literal declarations replacing the derived ones.
    pub attributes: Option<Arguments>,
}

/// Parent setting of a class: `false` for none, or the parent's name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParentConfig {
    Flag(bool),
    Name(String),
}

/// Settings of a single property.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyConfig {
    pub relation_table_name: Option<String>,

    /// Column options merged over the generated column declaration.
    pub column_options: Arguments,

    /// Literal property declarations: name -> arguments.
    pub attributes: Arguments,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_uses_defaults() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert!(config.accessor_methods);
        assert!(config.doctrine.use_collection);
        assert_eq!(config.id.generation_strategy, IdStrategy::Auto);
        assert_eq!(config.field_visibility, Visibility::Private);
        assert_eq!(config.attribute_generators, GeneratorKind::ALL.to_vec());
    }

    #[test]
    fn class_pk_merges_key_by_key() {
        let config = GeneratorConfig::from_value(json!({
            "id": { "generationStrategy": "uuid", "writable": false },
            "types": {
                "Book": { "pk": { "writable": true } }
            }
        }))
        .unwrap();

        let book = config.id_for("Book");
        assert_eq!(book.generation_strategy, IdStrategy::Uuid);
        assert!(book.writable);

        let other = config.id_for("Person");
        assert!(!other.writable);
    }

    #[test]
    fn parses_type_sections() {
        let config = GeneratorConfig::from_value(json!({
            "types": {
                "Person": {
                    "parent": false,
                    "properties": {
                        "knows": { "relationTableName": "person_knows" }
                    }
                },
                "Book": { "parent": "CreativeWork" }
            }
        }))
        .unwrap();

        assert_eq!(
            config.property_config("Person", "knows").unwrap().relation_table_name.as_deref(),
            Some("person_knows")
        );
        assert_eq!(config.types["Person"].parent, Some(ParentConfig::Flag(false)));
        assert_eq!(
            config.types["Book"].parent,
            Some(ParentConfig::Name("CreativeWork".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = GeneratorConfig::from_value(json!({ "id": { "generationStrategy": "sequence" } }))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConfig { .. }));
    }
}
