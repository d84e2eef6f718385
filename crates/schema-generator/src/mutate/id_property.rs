//! Identifier injection.

use super::ClassMutator;
use crate::config::{GeneratorConfig, IdOnClass};
use crate::model::{Cardinality, Class, Property};

/// Adds the identifier property to classes that need one.
pub struct IdPropertyMutator<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> IdPropertyMutator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }
}

impl ClassMutator for IdPropertyMutator<'_> {
    fn name(&self) -> &str {
        "id-property"
    }

    fn apply(&self, class: &mut Class) {
        if class.is_enum || class.is_embeddable {
            return;
        }

        let id = self.config.id_for(&class.name);
        if !id.generate {
            return;
        }

        let excluded = match id.on_class {
            IdOnClass::All => false,
            IdOnClass::Parent => class.has_parent(),
            IdOnClass::Child => class.has_child,
        };
        if excluded {
            return;
        }

        let mut property = Property::new(id.name);
        property.cardinality = Cardinality::OneToOne;
        property.is_id = true;
        property.is_custom = true;
        property.is_nullable = false;
        property.is_readable = true;
        property.is_writable = id.writable;

        class.add_property(property);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParentRef;
    use serde_json::json;

    fn config(value: serde_json::Value) -> GeneratorConfig {
        GeneratorConfig::from_value(value).unwrap()
    }

    #[test]
    fn injects_identifier() {
        let config = config(json!({ "id": { "writable": true } }));
        let mut person = Class::new("Person").with_property(Property::new("name"));

        IdPropertyMutator::new(&config).apply(&mut person);

        let id = person.id_property().unwrap();
        assert_eq!(id.name, "id");
        assert!(id.is_writable);
        assert!(!id.is_nullable);
        assert!(person.property("name").is_some());
    }

    #[test]
    fn replaces_same_named_property() {
        let config = config(json!({ "id": { "name": "identifier" } }));
        let mut person = Class::new("Person").with_property(Property::new("identifier"));

        IdPropertyMutator::new(&config).apply(&mut person);

        assert_eq!(person.properties.len(), 1);
        assert!(person.property("identifier").unwrap().is_id);
    }

    #[test]
    fn skips_enums_and_embeddables() {
        let config = GeneratorConfig::default();
        let mutator = IdPropertyMutator::new(&config);

        let mut gender = Class::new("GenderType");
        gender.is_enum = true;
        mutator.apply(&mut gender);
        assert!(gender.id_property().is_none());

        let mut address = Class::new("PostalAddress");
        address.is_embeddable = true;
        mutator.apply(&mut address);
        assert!(address.id_property().is_none());
    }

    #[test]
    fn parent_child_filter() {
        let mut child = Class::new("Person");
        child.parent = ParentRef::Named("Thing".to_string());
        let mut parent = Class::new("Thing");
        parent.has_child = true;

        let only_children = config(json!({ "id": { "onClass": "child" } }));
        let mut c = child.clone();
        let mut p = parent.clone();
        IdPropertyMutator::new(&only_children).apply(&mut c);
        IdPropertyMutator::new(&only_children).apply(&mut p);
        assert!(c.id_property().is_some());
        assert!(p.id_property().is_none());

        let only_roots = config(json!({ "id": { "onClass": "parent" } }));
        let mut c = child.clone();
        let mut p = parent.clone();
        IdPropertyMutator::new(&only_roots).apply(&mut c);
        IdPropertyMutator::new(&only_roots).apply(&mut p);
        assert!(c.id_property().is_none());
        assert!(p.id_property().is_some());

        let everywhere = config(json!({ "id": { "onClass": "all" } }));
        let mut c = child;
        let mut p = parent;
        IdPropertyMutator::new(&everywhere).apply(&mut c);
        IdPropertyMutator::new(&everywhere).apply(&mut p);
        assert!(c.id_property().is_some());
        assert!(p.id_property().is_some());
    }

    #[test]
    fn class_can_opt_out() {
        let config = config(json!({ "types": { "Person": { "pk": { "generate": false } } } }));
        let mut person = Class::new("Person");
        IdPropertyMutator::new(&config).apply(&mut person);
        assert!(person.id_property().is_none());
    }
}
