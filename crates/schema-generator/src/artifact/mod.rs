//! Target artifact structure.
//!
//! An in-memory view of a generated source file, owned by the merge engine
//! and handed to the code-emission backend for printing. It may contain
//! manual additions from earlier runs, which the merge engine preserves.

use serde::Deserialize;
use serde_json::Value;

use crate::model::{Attribute, Constant, Use};

/// Name of the constructor method.
pub const CONSTRUCTOR: &str = "__construct";

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// A source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactFile {
    /// Leading file comment.
    pub header: Option<String>,

    pub namespaces: Vec<NamespaceDecl>,
}

impl ArtifactFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(&self, name: &str) -> Option<&NamespaceDecl> {
        self.namespaces.iter().find(|n| n.name == name)
    }

    pub fn namespace_mut(&mut self, name: &str) -> Option<&mut NamespaceDecl> {
        self.namespaces.iter_mut().find(|n| n.name == name)
    }

    /// Returns the namespace, appending an empty one if missing.
    pub fn namespace_or_insert(&mut self, name: &str) -> &mut NamespaceDecl {
        match self.namespaces.iter().position(|n| n.name == name) {
            Some(index) => &mut self.namespaces[index],
            None => {
                self.namespaces.push(NamespaceDecl::new(name));
                let last = self.namespaces.len() - 1;
                &mut self.namespaces[last]
            }
        }
    }

    /// Finds a class in any namespace.
    pub fn find_class(&self, name: &str) -> Option<&ClassDecl> {
        self.namespaces.iter().find_map(|n| n.class(name))
    }
}

/// A namespace block with its imports and classes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceDecl {
    pub name: String,
    pub uses: Vec<Use>,
    pub classes: Vec<ClassDecl>,
}

impl NamespaceDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uses: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// Whether the symbol is imported, with or without an alias.
    pub fn has_use(&self, name: &str) -> bool {
        self.uses.iter().any(|u| u.name == name)
    }

    /// Imports a symbol unless already imported. Returns whether it was added.
    pub fn add_use(&mut self, import: Use) -> bool {
        if self.has_use(&import.name) {
            return false;
        }
        self.uses.push(import);
        true
    }

    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn class_mut(&mut self, name: &str) -> Option<&mut ClassDecl> {
        self.classes.iter_mut().find(|c| c.name == name)
    }

    /// Returns the class, appending an empty one if missing.
    pub fn class_or_insert(&mut self, name: &str) -> &mut ClassDecl {
        match self.classes.iter().position(|c| c.name == name) {
            Some(index) => &mut self.classes[index],
            None => {
                self.classes.push(ClassDecl::new(name));
                let last = self.classes.len() - 1;
                &mut self.classes[last]
            }
        }
    }
}

/// A class declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub comment: Option<String>,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub is_abstract: bool,
    pub attributes: Vec<Attribute>,
    pub constants: Vec<Constant>,
    pub properties: Vec<PropertyDecl>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.iter().any(|c| c.name == name)
    }

    pub fn add_constant(&mut self, constant: Constant) {
        self.constants.push(constant);
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut PropertyDecl> {
        self.properties.iter_mut().find(|p| p.name == name)
    }

    pub fn add_property(&mut self, property: PropertyDecl) {
        self.properties.push(property);
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn add_method(&mut self, method: MethodDecl) {
        self.methods.push(method);
    }

    pub fn constructor(&self) -> Option<&MethodDecl> {
        self.method(CONSTRUCTOR)
    }
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub name: String,
    pub visibility: Visibility,
    pub type_hint: Option<String>,
    pub nullable: bool,
    pub default: Option<Value>,
    pub attributes: Vec<Attribute>,
    pub comment: Option<String>,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Private,
            type_hint: None,
            nullable: false,
            default: None,
            attributes: Vec::new(),
            comment: None,
        }
    }
}

/// A method declaration. The body is kept as source lines.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub visibility: Visibility,
    pub parameters: Vec<ParameterDecl>,
    pub return_type: Option<String>,
    pub body: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub comment: Option<String>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            parameters: Vec::new(),
            return_type: None,
            body: Vec::new(),
            attributes: Vec::new(),
            comment: None,
        }
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub name: String,
    pub type_hint: Option<String>,
    pub nullable: bool,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, type_hint: Option<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            type_hint,
            nullable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_and_classes_are_created_once() {
        let mut file = ArtifactFile::new();
        file.namespace_or_insert("App\\Entity").class_or_insert("Person");
        file.namespace_or_insert("App\\Entity").class_or_insert("Person");

        assert_eq!(file.namespaces.len(), 1);
        assert_eq!(file.namespaces[0].classes.len(), 1);
        assert!(file.find_class("Person").is_some());
        assert!(file.find_class("Book").is_none());
    }

    #[test]
    fn uses_are_deduplicated_by_symbol() {
        let mut ns = NamespaceDecl::new("App\\Entity");
        assert!(ns.add_use(Use::aliased("Doctrine\\ORM\\Mapping", "ORM")));
        assert!(!ns.add_use(Use::new("Doctrine\\ORM\\Mapping")));
        assert_eq!(ns.uses.len(), 1);
    }

    #[test]
    fn class_queries() {
        let mut class = ClassDecl::new("Person");
        class.add_attribute(Attribute::new("ORM\\Entity"));
        class.add_method(MethodDecl::new(CONSTRUCTOR));
        class.add_property(PropertyDecl::new("name"));

        assert!(class.has_attribute("ORM\\Entity"));
        assert!(class.constructor().is_some());
        assert!(class.property("name").is_some());
        assert!(!class.has_method("getName"));
    }
}
