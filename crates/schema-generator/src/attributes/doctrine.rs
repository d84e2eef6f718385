//! Relational mapping declarations.

use serde_json::Value;

use super::{arguments_of, literal_attributes, AttributeGenerator, GeneratorContext, GeneratorKind};
use crate::config::{GeneratorConfig, IdStrategy};
use crate::diagnostic::SchemaError;
use crate::mapping::{is_collection, is_reserved, relation_attributes, resolve_target, storage_type, DEFAULT_STORAGE_TYPE};
use crate::model::{Arguments, Attribute, Class, ClassRegistry, Property, Use};

/// Key of a literal override whose entries each become an index declaration.
const INDEXES_KEY: &str = "Indexes";

/// Generates persistence-mapping declarations.
pub struct DoctrineOrmGenerator<'a> {
    config: &'a GeneratorConfig,
    registry: &'a ClassRegistry,
}

impl<'a> DoctrineOrmGenerator<'a> {
    pub fn new(context: GeneratorContext<'a>) -> Self {
        Self {
            config: context.config,
            registry: context.registry,
        }
    }

    /// Declarations from a `types[class].doctrine.attributes` override.
    fn override_attributes(&self, literals: &Arguments) -> Result<Vec<Attribute>, SchemaError> {
        let mut attributes = Vec::new();

        for (name, arguments) in literals {
            if name != INDEXES_KEY {
                let mut single = Arguments::new();
                single.insert(name.clone(), arguments.clone());
                attributes.extend(literal_attributes(&single, Some("ORM\\"))?);
                continue;
            }

            for (index, index_arguments) in arguments_of(arguments, INDEXES_KEY)? {
                let mut flattened = Arguments::new();
                flattened.insert("name".to_string(), Value::String(index));
                flattened.extend(arguments_of(&index_arguments, "index")?);
                attributes.push(Attribute::with_arguments("ORM\\Index", flattened));
            }
        }

        Ok(attributes)
    }

    fn id_attributes(&self, property: &Property, class_name: &str) -> Vec<Attribute> {
        let id = self.config.id_for(class_name);
        let mut attributes = vec![Attribute::new("ORM\\Id")];

        if id.generation_strategy != IdStrategy::None && !property.is_writable {
            attributes.push(
                Attribute::new("ORM\\GeneratedValue")
                    .arg("strategy", id.generation_strategy.as_str().to_uppercase()),
            );
        }

        let column_type = match id.generation_strategy {
            IdStrategy::Uuid => "guid",
            IdStrategy::Auto => "integer",
            _ => DEFAULT_STORAGE_TYPE,
        };
        let column = if column_type == DEFAULT_STORAGE_TYPE {
            Attribute::new("ORM\\Column")
        } else {
            Attribute::new("ORM\\Column").arg("type", column_type)
        };
        attributes.push(column);

        attributes
    }

    fn relation(&self, property: &Property, class_name: &str) -> Vec<Attribute> {
        let target = match resolve_target(property, class_name, self.registry) {
            Ok(target) => target,
            Err(err) => {
                tracing::error!(
                    class = class_name,
                    property = %property.name,
                    target = property.range_name().unwrap_or_default(),
                    "{}; no mapping generated for this property",
                    err
                );
                return Vec::new();
            }
        };

        if property.is_embedded {
            let mut embedded = Attribute::new("ORM\\Embedded").arg("class", target.name.as_str());
            if let Some(prefix) = &property.column_prefix {
                embedded = embedded.arg("columnPrefix", prefix.as_str());
            }
            return vec![embedded];
        }

        relation_attributes(property, &target.name)
    }
}

impl AttributeGenerator for DoctrineOrmGenerator<'_> {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::DoctrineOrm
    }

    fn class_attributes(&self, class: &Class) -> Result<Vec<Attribute>, SchemaError> {
        if class.is_enum {
            return Ok(Vec::new());
        }

        let literal = self
            .config
            .type_config(&class.name)
            .and_then(|t| t.doctrine.attributes.as_ref());
        if let Some(literal) = literal {
            return self.override_attributes(literal);
        }

        let mut attributes = Vec::new();

        if class.is_embeddable {
            attributes.push(Attribute::new("ORM\\Embeddable"));
            return Ok(attributes);
        }

        if class.is_abstract {
            match &self.config.doctrine.inheritance_attributes {
                Some(inheritance) => attributes.extend(literal_attributes(inheritance, Some("ORM\\"))?),
                None => attributes.push(Attribute::new("ORM\\MappedSuperclass")),
            }
        } else {
            attributes.push(Attribute::new("ORM\\Entity"));
        }

        if is_reserved(&class.name) {
            attributes.push(Attribute::new("ORM\\Table").arg("name", class.name.to_lowercase()));
        }

        Ok(attributes)
    }

    fn property_attributes(
        &self,
        property: &Property,
        class_name: &str,
    ) -> Result<Vec<Attribute>, SchemaError> {
        if property.is_id {
            return Ok(self.id_attributes(property, class_name));
        }

        let Some(column_type) = storage_type(property) else {
            return Ok(self.relation(property, class_name));
        };

        let mut arguments = Arguments::new();
        if column_type != DEFAULT_STORAGE_TYPE {
            arguments.insert("type".to_string(), column_type.into());
        }
        if property.is_nullable {
            arguments.insert("nullable".to_string(), true.into());
        }
        if property.is_unique {
            arguments.insert("unique".to_string(), true.into());
        }
        if is_reserved(&property.name) {
            arguments.insert("name".to_string(), format!("`{}`", property.name).into());
        }
        for (key, value) in &property.column_options {
            arguments.insert(key.clone(), value.clone());
        }

        Ok(vec![Attribute::with_arguments("ORM\\Column", arguments)])
    }

    fn uses(&self, class: &Class) -> Vec<Use> {
        if class.is_enum {
            return Vec::new();
        }

        let mut uses = vec![Use::aliased("Doctrine\\ORM\\Mapping", "ORM")];

        let use_collection = self.config.doctrine.use_collection;
        if class.properties.values().any(|p| is_collection(p, use_collection)) {
            uses.push(Use::new("Doctrine\\Common\\Collections\\ArrayCollection"));
            uses.push(Use::new("Doctrine\\Common\\Collections\\Collection"));
        }

        uses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cardinality, Range};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::Level;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn registry() -> ClassRegistry {
        [
            Class::new("Person"),
            Class::new("Book"),
            {
                let mut address = Class::new("PostalAddress");
                address.is_embeddable = true;
                address
            },
        ]
        .into_iter()
        .collect()
    }

    fn names(attributes: &[Attribute]) -> Vec<&str> {
        attributes.iter().map(|a| a.name.as_str()).collect()
    }

    fn with_generator<T>(config: serde_json::Value, f: impl FnOnce(&DoctrineOrmGenerator<'_>) -> T) -> T {
        let config = GeneratorConfig::from_value(config).unwrap();
        let registry = registry();
        let generator = DoctrineOrmGenerator::new(GeneratorContext {
            config: &config,
            registry: &registry,
        });
        f(&generator)
    }

    fn id_property(writable: bool) -> Property {
        let mut id = Property::new("id");
        id.is_id = true;
        id.is_writable = writable;
        id
    }

    #[test]
    fn concrete_class_is_an_entity() {
        with_generator(json!({}), |g| {
            let attrs = g.class_attributes(&Class::new("Person")).unwrap();
            assert_eq!(names(&attrs), vec!["ORM\\Entity"]);
        });
    }

    #[test]
    fn reserved_class_name_gets_lowercase_table() {
        with_generator(json!({}), |g| {
            let attrs = g.class_attributes(&Class::new("Group")).unwrap();
            assert_eq!(names(&attrs), vec!["ORM\\Entity", "ORM\\Table"]);
            assert_eq!(attrs[1].argument("name"), Some(&json!("group")));
        });
    }

    #[test]
    fn enums_embeddables_and_abstract_classes() {
        with_generator(json!({}), |g| {
            let mut enum_class = Class::new("GenderType");
            enum_class.is_enum = true;
            assert!(g.class_attributes(&enum_class).unwrap().is_empty());
            assert!(g.uses(&enum_class).is_empty());

            let mut embeddable = Class::new("PostalAddress");
            embeddable.is_embeddable = true;
            assert_eq!(names(&g.class_attributes(&embeddable).unwrap()), vec!["ORM\\Embeddable"]);

            let mut thing = Class::new("Thing");
            thing.is_abstract = true;
            assert_eq!(names(&g.class_attributes(&thing).unwrap()), vec!["ORM\\MappedSuperclass"]);
        });
    }

    #[test]
    fn abstract_class_uses_configured_inheritance() {
        let config = json!({
            "doctrine": {
                "inheritanceAttributes": {
                    "InheritanceType": { "value": "JOINED" },
                    "DiscriminatorColumn": { "name": "discr" }
                }
            }
        });
        with_generator(config, |g| {
            let mut thing = Class::new("Thing");
            thing.is_abstract = true;
            let attrs = g.class_attributes(&thing).unwrap();
            assert_eq!(names(&attrs), vec!["ORM\\InheritanceType", "ORM\\DiscriminatorColumn"]);
        });
    }

    #[test]
    fn literal_override_wins_and_flattens_indexes() {
        let config = json!({
            "types": {
                "Group": {
                    "doctrine": {
                        "attributes": {
                            "Entity": { "repositoryClass": "App\\Repository\\GroupRepository" },
                            "Indexes": {
                                "search_idx": { "fields": ["name"] },
                                "date_idx": { "fields": ["foundingDate"] }
                            }
                        }
                    }
                }
            }
        });
        with_generator(config, |g| {
            let attrs = g.class_attributes(&Class::new("Group")).unwrap();
            assert_eq!(names(&attrs), vec!["ORM\\Entity", "ORM\\Index", "ORM\\Index"]);
            assert_eq!(attrs[1].argument("name"), Some(&json!("search_idx")));
            assert_eq!(attrs[2].argument("fields"), Some(&json!(["foundingDate"])));
        });
    }

    #[test]
    fn generated_uuid_identifier() {
        with_generator(json!({ "id": { "generationStrategy": "uuid" } }), |g| {
            let attrs = g.property_attributes(&id_property(false), "Person").unwrap();
            assert_eq!(names(&attrs), vec!["ORM\\Id", "ORM\\GeneratedValue", "ORM\\Column"]);
            assert_eq!(attrs[1].argument("strategy"), Some(&json!("UUID")));
            assert_eq!(attrs[2].argument("type"), Some(&json!("guid")));
        });
    }

    #[test]
    fn writable_identifier_is_not_generated() {
        with_generator(json!({ "id": { "generationStrategy": "uuid" } }), |g| {
            let attrs = g.property_attributes(&id_property(true), "Person").unwrap();
            assert_eq!(names(&attrs), vec!["ORM\\Id", "ORM\\Column"]);
        });
    }

    #[test]
    fn none_strategy_never_generates_values() {
        with_generator(json!({ "id": { "generationStrategy": "none" } }), |g| {
            for writable in [true, false] {
                let attrs = g.property_attributes(&id_property(writable), "Person").unwrap();
                assert_eq!(names(&attrs), vec!["ORM\\Id", "ORM\\Column"]);
                assert!(attrs[1].arguments.is_empty());
            }
        });
    }

    #[test]
    fn class_pk_override_changes_strategy() {
        let config = json!({
            "id": { "generationStrategy": "uuid" },
            "types": { "Book": { "pk": { "generationStrategy": "auto" } } }
        });
        with_generator(config, |g| {
            let attrs = g.property_attributes(&id_property(false), "Book").unwrap();
            assert_eq!(attrs[1].argument("strategy"), Some(&json!("AUTO")));
            assert_eq!(attrs[2].argument("type"), Some(&json!("integer")));
        });
    }

    #[test]
    fn column_arguments() {
        with_generator(json!({}), |g| {
            let mut order = Property::new("order").with_range(Range::from_uri("https://schema.org/Integer"));
            order.is_unique = true;
            order.column_options.insert("nullable".to_string(), json!(false));
            order.column_options.insert("options".to_string(), json!({ "unsigned": true }));

            let attrs = g.property_attributes(&order, "Person").unwrap();
            assert_eq!(
                serde_json::Value::Object(attrs[0].arguments.clone()),
                json!({
                    "type": "integer",
                    "nullable": false,
                    "unique": true,
                    "name": "`order`",
                    "options": { "unsigned": true }
                })
            );
        });
    }

    #[test]
    fn default_type_is_omitted() {
        with_generator(json!({}), |g| {
            let mut gender = Property::new("gender").with_range(Range::from_uri("https://schema.org/GenderType"));
            gender.is_enum = true;
            gender.is_nullable = false;

            let attrs = g.property_attributes(&gender, "Person").unwrap();
            assert_eq!(names(&attrs), vec!["ORM\\Column"]);
            assert!(attrs[0].arguments.is_empty());
        });
    }

    #[test]
    fn relations_and_embedded_values() {
        with_generator(json!({}), |g| {
            let author = Property::new("author")
                .with_range(Range::from_uri("https://schema.org/Person"))
                .with_cardinality(Cardinality::ManyToOne);
            let attrs = g.property_attributes(&author, "Book").unwrap();
            assert_eq!(names(&attrs), vec!["ORM\\ManyToOne", "ORM\\JoinColumn"]);

            let mut address = Property::new("address")
                .with_range(Range::from_uri("https://schema.org/PostalAddress"));
            address.is_embedded = true;
            address.column_prefix = Some("addr_".to_string());
            let attrs = g.property_attributes(&address, "Person").unwrap();
            assert_eq!(names(&attrs), vec!["ORM\\Embedded"]);
            assert_eq!(attrs[0].argument("class"), Some(&json!("PostalAddress")));
            assert_eq!(attrs[0].argument("columnPrefix"), Some(&json!("addr_")));
        });
    }

    /// Collects the level and fields of every event emitted while installed.
    #[derive(Clone, Default)]
    struct CapturedEvents(Arc<Mutex<Vec<(Level, BTreeMap<String, String>)>>>);

    struct FieldCollector<'a>(&'a mut BTreeMap<String, String>);

    impl Visit for FieldCollector<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{:?}", value));
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for CapturedEvents {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = BTreeMap::new();
            event.record(&mut FieldCollector(&mut fields));
            self.0.lock().unwrap().push((*event.metadata().level(), fields));
        }
    }

    #[test]
    fn unresolved_relation_yields_nothing() {
        let events = CapturedEvents::default();
        let subscriber = tracing_subscriber::registry().with(events.clone());

        tracing::subscriber::with_default(subscriber, || {
            with_generator(json!({}), |g| {
                let publisher = Property::new("publisher")
                    .with_range(Range::from_uri("https://schema.org/Organization"));
                assert!(g.property_attributes(&publisher, "Book").unwrap().is_empty());
            });
        });

        let events = events.0.lock().unwrap();
        let errors: Vec<_> = events.iter().filter(|(level, _)| *level == Level::ERROR).collect();
        assert_eq!(errors.len(), 1);

        let fields = &errors[0].1;
        assert_eq!(fields["class"], "Book");
        assert_eq!(fields["property"], "publisher");
        assert_eq!(fields["target"], "Organization");
        assert!(fields["message"].contains("no mapping generated"));
    }

    #[test]
    fn collection_imports() {
        with_generator(json!({}), |g| {
            let person = Class::new("Person").with_property(
                Property::new("knows")
                    .with_range(Range::from_uri("https://schema.org/Person"))
                    .with_cardinality(Cardinality::ZeroToMany),
            );
            let uses = g.uses(&person);
            assert_eq!(uses.len(), 3);
            assert_eq!(uses[0], Use::aliased("Doctrine\\ORM\\Mapping", "ORM"));
        });
    }
}
