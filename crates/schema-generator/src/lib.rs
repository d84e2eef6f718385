//! # Schema Generator
//!
//! This crate turns a vocabulary-derived class model into entity artifacts
//! carrying persistence-mapping and API-resource metadata, and re-applies the
//! generation onto previously generated (and hand-edited) artifacts without
//! losing manual edits.
//!
//! ## Architecture
//!
//! ```text
//! ClassRegistry (from ingestion)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Mutators   │  Class config, identifier injection
//! │ (in place)   │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Generators  │  Doctrine ORM, API Platform, constraints, literals
//! │ (read-only)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Merge     │  Fold into existing artifacts per element kind
//! │ (artifacts)  │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schema_generator::{GeneratorConfig, SchemaGenerator};
//!
//! let config = GeneratorConfig::from_json(&config_source)?;
//! let generator = SchemaGenerator::new(config);
//!
//! let mut artifacts = BTreeMap::new();
//! let result = generator.generate(&mut registry, &mut artifacts)?;
//! ```

pub mod artifact;
pub mod attributes;
pub mod config;
pub mod diagnostic;
pub mod mapping;
pub mod merge;
pub mod model;
pub mod mutate;

use std::collections::{BTreeMap, HashMap, HashSet};

pub use artifact::ArtifactFile;
pub use config::GeneratorConfig;
pub use diagnostic::SchemaError;
pub use merge::MergeOutcome;
pub use model::{Class, ClassRegistry, Property};

use attributes::{create_generators, ClassMetadata, GeneratorContext};

/// The main generator struct that orchestrates the pipeline.
pub struct SchemaGenerator {
    config: GeneratorConfig,
}

impl SchemaGenerator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs the whole pipeline over every class of the registry.
    ///
    /// 1. Apply mutators to the model
    /// 2. Generate declarations and attach them to the model
    /// 3. Merge every class into its artifact (created when missing)
    ///
    /// A configuration error aborts the run before anything is merged.
    pub fn generate(
        &self,
        registry: &mut ClassRegistry,
        artifacts: &mut BTreeMap<String, ArtifactFile>,
    ) -> Result<GenerateResult, SchemaError> {
        // Phase 1: Mutate
        self.mutate(registry);

        // Phase 2: Generate declarations
        let declarations = self.annotate(registry)?;

        // Phase 3: Merge
        let mut result = GenerateResult {
            classes: registry.len(),
            properties: registry.iter().map(|c| c.properties.len()).sum(),
            declarations,
            methods_added: 0,
        };
        for class in registry.iter() {
            let file = artifacts.entry(class.name.clone()).or_default();
            let outcome = merge::merge_class(class, &self.config, file);
            result.methods_added += outcome.methods_added;
        }

        tracing::info!(
            classes = result.classes,
            declarations = result.declarations,
            methods = result.methods_added,
            "generation finished"
        );

        Ok(result)
    }

    /// Applies the mutator pipeline to every class.
    pub fn mutate(&self, registry: &mut ClassRegistry) {
        let mutators = mutate::create_mutators(&self.config);
        mutate::mutate_all(&mutators, registry);
    }

    /// Runs the configured generators and attaches their declarations to the
    /// classes. Returns the number of declarations produced.
    ///
    /// Generators read the whole registry while they run; the results are
    /// attached afterwards.
    pub fn annotate(&self, registry: &mut ClassRegistry) -> Result<usize, SchemaError> {
        let generated = {
            let context = GeneratorContext {
                config: &self.config,
                registry: &*registry,
            };
            let generators = create_generators(context);

            registry
                .iter()
                .map(|class| {
                    tracing::debug!(class = %class.name, "generating declarations");
                    ClassMetadata::generate(&generators, class)
                        .map(|metadata| (class.name.clone(), metadata))
                })
                .collect::<Result<Vec<_>, SchemaError>>()?
        };

        let mut declarations = 0;
        for (name, metadata) in generated {
            declarations += metadata.len();
            if let Some(class) = registry.get_mut(&name) {
                metadata.apply(class);
            }
        }

        mark_constructors(registry, &self.config);

        Ok(declarations)
    }

    /// Merges one class of the registry into an artifact.
    pub fn merge(
        &self,
        registry: &ClassRegistry,
        class_name: &str,
        file: &mut ArtifactFile,
    ) -> Result<MergeOutcome, SchemaError> {
        let class = registry.get(class_name).ok_or_else(|| SchemaError::UnknownClass {
            name: class_name.to_string(),
        })?;
        Ok(merge::merge_class(class, &self.config, file))
    }
}

/// Flags classes that get a constructor, and children that inherit one from
/// any registered ancestor.
fn mark_constructors(registry: &mut ClassRegistry, config: &GeneratorConfig) {
    let declared: HashMap<String, bool> = registry
        .iter()
        .map(|c| (c.name.clone(), c.has_constructor || merge::needs_constructor(c, config)))
        .collect();
    let parents: HashMap<String, Option<String>> = registry
        .iter()
        .map(|c| (c.name.clone(), c.parent_name().map(str::to_string)))
        .collect();

    for class in registry.iter_mut() {
        class.has_constructor = declared.get(&class.name).copied().unwrap_or_default();
        if let Some(inherited) = inherits_constructor(&class.name, &declared, &parents) {
            class.parent_has_constructor = inherited;
        }
    }
}

/// Whether an ancestor of `name` declares a constructor. `None` when the
/// direct parent is not registered. The walk stops at the first unregistered
/// ancestor and never visits a class twice.
fn inherits_constructor(
    name: &str,
    declared: &HashMap<String, bool>,
    parents: &HashMap<String, Option<String>>,
) -> Option<bool> {
    let parent = parents.get(name)?.as_deref()?;
    declared.get(parent)?;

    let mut visited = HashSet::from([name]);
    let mut current = Some(parent);
    while let Some(ancestor) = current {
        if !visited.insert(ancestor) {
            break;
        }
        match declared.get(ancestor) {
            Some(true) => return Some(true),
            Some(false) => {}
            None => break,
        }
        current = parents.get(ancestor).and_then(|p| p.as_deref());
    }

    Some(false)
}

/// Result of a successful generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateResult {
    /// Number of classes processed.
    pub classes: usize,
    /// Number of modeled properties after mutation.
    pub properties: usize,
    /// Declarations produced by the generators.
    pub declarations: usize,
    /// Methods added to artifacts.
    pub methods_added: usize,
}
