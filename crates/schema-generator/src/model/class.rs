//! Classes of the domain model.

use std::collections::{BTreeMap, BTreeSet};

use super::{Arguments, Attribute, Constant, Property, Use};

/// Parent reference of a class.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParentRef {
    /// Nothing is known about the parent yet.
    #[default]
    Unknown,

    /// The class explicitly has no parent.
    None,

    /// The class extends the named class.
    Named(String),
}

/// A class to be generated.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Name, unique within its namespace.
    pub name: String,

    /// Canonical identifier of the class in the vocabulary.
    pub uri: Option<String>,

    pub description: Option<String>,

    pub parent: ParentRef,

    pub interface: Option<String>,

    /// Properties keyed (and ordered) by name.
    pub properties: BTreeMap<String, Property>,

    pub uses: BTreeSet<Use>,

    /// Class-level declarations attached by the generator pipeline.
    pub attributes: Vec<Attribute>,

    pub constants: BTreeMap<String, Constant>,

    pub is_abstract: bool,
    pub is_embeddable: bool,
    pub is_enum: bool,
    pub has_child: bool,
    pub has_constructor: bool,
    pub parent_has_constructor: bool,

    /// Access policy applied to the whole resource.
    pub security: Option<String>,

    /// Raw operations configuration: group -> method -> options.
    pub operations: Arguments,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: None,
            description: None,
            parent: ParentRef::Unknown,
            interface: None,
            properties: BTreeMap::new(),
            uses: BTreeSet::new(),
            attributes: Vec::new(),
            constants: BTreeMap::new(),
            is_abstract: false,
            is_embeddable: false,
            is_enum: false,
            has_child: false,
            has_constructor: false,
            parent_has_constructor: false,
            security: None,
            operations: Arguments::new(),
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.add_property(property);
        self
    }

    /// Attaches a property, replacing any property with the same name.
    /// Returns the replaced property.
    pub fn add_property(&mut self, property: Property) -> Option<Property> {
        self.properties.insert(property.name.clone(), property)
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.get_mut(name)
    }

    /// The identifier property, if one is modeled.
    pub fn id_property(&self) -> Option<&Property> {
        self.properties.values().find(|p| p.is_id)
    }

    pub fn parent_name(&self) -> Option<&str> {
        match &self.parent {
            ParentRef::Named(name) => Some(name),
            _ => None,
        }
    }

    pub fn has_parent(&self) -> bool {
        self.parent_name().is_some()
    }

    pub fn add_use(&mut self, import: Use) {
        self.uses.insert(import);
    }

    /// Adds a declaration unless an equal one is already attached.
    pub fn add_attribute(&mut self, attribute: Attribute) {
        if !self.attributes.contains(&attribute) {
            self.attributes.push(attribute);
        }
    }

    pub fn add_constant(&mut self, constant: Constant) {
        self.constants.insert(constant.name.clone(), constant);
    }
}
