//! Declarative metadata generation.
//!
//! Each [`AttributeGenerator`] produces one family of declarations (relational
//! mapping, resource metadata, validation constraints, literal configuration).
//! The configured generators run in order; each one's output is deduplicated
//! on its own and the outputs are then concatenated as they are.

mod api_platform;
mod configured;
mod constraint;
mod doctrine;
mod operations;

pub use api_platform::ApiPlatformGenerator;
pub use configured::ConfiguredGenerator;
pub use constraint::ConstraintGenerator;
pub use doctrine::DoctrineOrmGenerator;
pub use operations::Operations;

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::config::GeneratorConfig;
use crate::diagnostic::SchemaError;
use crate::model::{dedup_attributes, Arguments, Attribute, Class, ClassRegistry, Property, Use};

/// Available generator variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    DoctrineOrm,
    ApiPlatform,
    Constraint,
    Configuration,
}

impl GeneratorKind {
    /// Every variant, in the default run order.
    pub const ALL: [GeneratorKind; 4] = [
        GeneratorKind::DoctrineOrm,
        GeneratorKind::ApiPlatform,
        GeneratorKind::Constraint,
        GeneratorKind::Configuration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::DoctrineOrm => "doctrine-orm",
            GeneratorKind::ApiPlatform => "api-platform",
            GeneratorKind::Constraint => "constraint",
            GeneratorKind::Configuration => "configuration",
        }
    }
}

/// Read-only inputs shared by every generator.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorContext<'a> {
    pub config: &'a GeneratorConfig,
    pub registry: &'a ClassRegistry,
}

/// Trait for declaration generators.
pub trait AttributeGenerator {
    fn kind(&self) -> GeneratorKind;

    /// Declarations for the class itself.
    fn class_attributes(&self, class: &Class) -> Result<Vec<Attribute>, SchemaError>;

    /// Declarations for one property of the class named `class_name`.
    fn property_attributes(
        &self,
        property: &Property,
        class_name: &str,
    ) -> Result<Vec<Attribute>, SchemaError>;

    /// Imports needed by the declarations of this generator.
    fn uses(&self, class: &Class) -> Vec<Use>;
}

/// Creates the generators listed in the configuration, in order.
pub fn create_generators<'a>(context: GeneratorContext<'a>) -> Vec<Box<dyn AttributeGenerator + 'a>> {
    context
        .config
        .attribute_generators
        .iter()
        .map(|kind| create_generator(*kind, context))
        .collect()
}

/// Creates a single generator.
pub fn create_generator<'a>(
    kind: GeneratorKind,
    context: GeneratorContext<'a>,
) -> Box<dyn AttributeGenerator + 'a> {
    match kind {
        GeneratorKind::DoctrineOrm => Box::new(DoctrineOrmGenerator::new(context)),
        GeneratorKind::ApiPlatform => Box::new(ApiPlatformGenerator::new(context)),
        GeneratorKind::Constraint => Box::new(ConstraintGenerator::new(context)),
        GeneratorKind::Configuration => Box::new(ConfiguredGenerator::new(context)),
    }
}

/// Everything the generators produced for one class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassMetadata {
    pub class_attributes: Vec<Attribute>,
    pub property_attributes: BTreeMap<String, Vec<Attribute>>,
    pub uses: Vec<Use>,
}

impl ClassMetadata {
    /// Runs every generator over a class.
    pub fn generate(
        generators: &[Box<dyn AttributeGenerator + '_>],
        class: &Class,
    ) -> Result<Self, SchemaError> {
        let mut metadata = ClassMetadata::default();

        for generator in generators {
            tracing::trace!(class = %class.name, generator = generator.kind().as_str(), "running generator");
            metadata
                .class_attributes
                .extend(dedup_attributes(generator.class_attributes(class)?));

            for property in class.properties.values() {
                let attributes = dedup_attributes(generator.property_attributes(property, &class.name)?);
                metadata
                    .property_attributes
                    .entry(property.name.clone())
                    .or_default()
                    .extend(attributes);
            }

            for import in generator.uses(class) {
                if !metadata.uses.contains(&import) {
                    metadata.uses.push(import);
                }
            }
        }

        Ok(metadata)
    }

    /// Attaches the generated declarations and imports to the class,
    /// replacing declarations attached by an earlier run.
    pub fn apply(mut self, class: &mut Class) {
        class.attributes = self.class_attributes;
        for property in class.properties.values_mut() {
            property.attributes = self
                .property_attributes
                .remove(&property.name)
                .unwrap_or_default();
        }
        for import in self.uses {
            class.add_use(import);
        }
    }

    /// Number of declarations, class and property level.
    pub fn len(&self) -> usize {
        self.class_attributes.len()
            + self.property_attributes.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns a `name -> arguments` mapping from the configuration into declarations.
///
/// Names without a namespace separator get `prefix` prepended.
pub(crate) fn literal_attributes(
    literals: &Arguments,
    prefix: Option<&str>,
) -> Result<Vec<Attribute>, SchemaError> {
    literals
        .iter()
        .map(|(name, arguments)| {
            let name = match prefix {
                Some(prefix) if !name.contains('\\') => format!("{}{}", prefix, name),
                _ => name.clone(),
            };
            Ok(Attribute::with_arguments(name, arguments_of(arguments, "declaration")?))
        })
        .collect()
}

/// Reads the arguments of a literal declaration; `null` means none.
pub(crate) fn arguments_of(value: &Value, what: &str) -> Result<Arguments, SchemaError> {
    match value {
        Value::Null => Ok(Arguments::new()),
        Value::Object(arguments) => Ok(arguments.clone()),
        other => Err(SchemaError::InvalidConfig {
            message: format!("{} arguments must be a mapping, got {}", what, other),
        }),
    }
}
