//! Structural transforms applied to the model before generation.

mod class_config;
mod id_property;

pub use class_config::ClassConfigMutator;
pub use id_property::IdPropertyMutator;

use crate::config::GeneratorConfig;
use crate::model::{Class, ClassRegistry};

/// Trait for in-place class transforms.
pub trait ClassMutator {
    /// Returns the mutator name, for logging.
    fn name(&self) -> &str;

    /// Transforms the class in place. Must not drop properties it did not add.
    fn apply(&self, class: &mut Class);
}

/// Creates the mutators in the order they run.
pub fn create_mutators(config: &GeneratorConfig) -> Vec<Box<dyn ClassMutator + '_>> {
    vec![
        Box::new(ClassConfigMutator::new(config)),
        Box::new(IdPropertyMutator::new(config)),
    ]
}

/// Applies every mutator to every class of the registry.
pub fn mutate_all(mutators: &[Box<dyn ClassMutator + '_>], registry: &mut ClassRegistry) {
    for class in registry.iter_mut() {
        for mutator in mutators {
            tracing::trace!(class = %class.name, mutator = mutator.name(), "applying mutator");
            mutator.apply(class);
        }
    }
}
