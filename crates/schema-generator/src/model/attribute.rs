//! Declarations, imports, and constants attached to generated elements.

use serde_json::Value;

/// Named arguments of a declaration, in insertion order.
pub type Arguments = serde_json::Map<String, Value>;

/// A declarative metadata entry such as `ORM\Column(type: 'text')`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Declaration name, possibly namespace-aliased (e.g. `ORM\Entity`).
    pub name: String,

    /// Named arguments. Values may be scalars, lists, or nested mappings.
    pub arguments: Arguments,
}

impl Attribute {
    /// Creates a declaration without arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::new(),
        }
    }

    /// Creates a declaration with the given arguments.
    pub fn with_arguments(name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Adds (or replaces) one argument.
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Returns the value of an argument.
    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key)
    }
}

/// Removes repeated declarations, keeping the first occurrence of each
/// `(name, arguments)` pair.
pub fn dedup_attributes(attributes: Vec<Attribute>) -> Vec<Attribute> {
    let mut unique: Vec<Attribute> = Vec::with_capacity(attributes.len());
    for attribute in attributes {
        if !unique.contains(&attribute) {
            unique.push(attribute);
        }
    }
    unique
}

/// An imported symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Use {
    pub name: String,
    pub alias: Option<String>,
}

impl Use {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

/// A class constant. `value` is the literal as it should be emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub name: String,
    pub value: String,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
