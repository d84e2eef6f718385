//! Class properties.

use super::{Arguments, Attribute, Cardinality};

/// The semantic type of a property's values.
///
/// For primitive datatypes `uri` is the datatype identifier. For relations
/// `name` is the target class name, looked up later in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    /// Bare local name (e.g. `Person`, `Date`).
    pub name: String,

    /// Full identifier (e.g. `https://schema.org/Person`).
    pub uri: String,
}

impl Range {
    /// Creates a range from an identifier, deriving the local name from it.
    pub fn from_uri(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let name = local_name(&uri).to_string();
        Self { name, uri }
    }

    /// Creates a range with an explicit local name.
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
        }
    }
}

/// Returns the part of an identifier after the last `#` or `/`.
pub(crate) fn local_name(uri: &str) -> &str {
    uri.rsplit(['#', '/']).next().unwrap_or(uri)
}

/// A property of a [`super::Class`].
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Name, unique within the owning class.
    pub name: String,

    /// Canonical identifier of the property in the vocabulary.
    pub uri: Option<String>,

    /// Human readable description, used for the leading doc comment.
    pub description: Option<String>,

    pub cardinality: Cardinality,

    /// Datatype or relation target. `None` for synthesized properties.
    pub range: Option<Range>,

    /// Extra storage options merged over the generated column declaration.
    pub column_options: Arguments,

    pub is_array: bool,
    pub is_readable: bool,
    pub is_writable: bool,
    pub is_nullable: bool,
    pub is_unique: bool,
    /// Not part of the vocabulary; skips the resource identifier.
    pub is_custom: bool,
    pub is_embedded: bool,
    pub is_id: bool,
    pub is_enum: bool,
    pub is_readable_link: bool,
    pub is_writable_link: bool,

    /// Inverse side name on the target class (owning side of a collection).
    pub mapped_by: Option<String>,

    /// Inverse side name on the target class (owning side of a single value).
    pub inversed_by: Option<String>,

    /// Join table name for many-valued relations.
    pub relation_table_name: Option<String>,

    /// Column prefix for embedded values.
    pub column_prefix: Option<String>,

    pub security: Option<String>,

    /// Declarations attached by the generator pipeline.
    pub attributes: Vec<Attribute>,
}

impl Property {
    /// Creates a readable, writable, nullable property with unknown cardinality.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: None,
            description: None,
            cardinality: Cardinality::Unknown,
            range: None,
            column_options: Arguments::new(),
            is_array: false,
            is_readable: true,
            is_writable: true,
            is_nullable: true,
            is_unique: false,
            is_custom: false,
            is_embedded: false,
            is_id: false,
            is_enum: false,
            is_readable_link: true,
            is_writable_link: true,
            mapped_by: None,
            inversed_by: None,
            relation_table_name: None,
            column_prefix: None,
            security: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    /// Sets the cardinality and derives `is_array` and `is_nullable` from it.
    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self.is_array = cardinality.is_collection();
        self.is_nullable = !matches!(
            cardinality,
            Cardinality::OneToOne | Cardinality::ManyToOne | Cardinality::OneToMany
        );
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Name of the relation target, if the range names one.
    pub fn range_name(&self) -> Option<&str> {
        self.range.as_ref().map(|r| r.name.as_str())
    }

    /// Adds a declaration unless an equal one is already attached.
    pub fn add_attribute(&mut self, attribute: Attribute) {
        if !self.attributes.contains(&attribute) {
            self.attributes.push(attribute);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_local_name_from_uri() {
        assert_eq!(Range::from_uri("https://schema.org/Person").name, "Person");
        assert_eq!(
            Range::from_uri("http://www.w3.org/2001/XMLSchema#date").name,
            "date"
        );
        assert_eq!(Range::from_uri("Thing").name, "Thing");
    }

    #[test]
    fn cardinality_drives_shape() {
        let p = Property::new("knows").with_cardinality(Cardinality::OneToMany);
        assert!(p.is_array);
        assert!(!p.is_nullable);

        let p = Property::new("spouse").with_cardinality(Cardinality::ZeroToOne);
        assert!(!p.is_array);
        assert!(p.is_nullable);
    }
}
