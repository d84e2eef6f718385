//! Relationship multiplicity.

use serde::{Deserialize, Serialize};

/// Multiplicity of a property, written `<owner side>..<target side>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cardinality {
    #[serde(rename = "0..1")]
    ZeroToOne,
    #[serde(rename = "1..1")]
    OneToOne,
    #[serde(rename = "0..N")]
    ZeroToMany,
    #[serde(rename = "1..N")]
    OneToMany,
    #[serde(rename = "N..0")]
    ManyToZero,
    #[serde(rename = "N..1")]
    ManyToOne,
    #[serde(rename = "N..N")]
    ManyToMany,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Cardinality {
    /// Parse a cardinality from its textual form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "0..1" => Some(Cardinality::ZeroToOne),
            "1..1" => Some(Cardinality::OneToOne),
            "0..N" | "0..n" | "0..*" => Some(Cardinality::ZeroToMany),
            "1..N" | "1..n" | "1..*" => Some(Cardinality::OneToMany),
            "N..0" | "n..0" => Some(Cardinality::ManyToZero),
            "N..1" | "n..1" => Some(Cardinality::ManyToOne),
            "N..N" | "n..n" | "*..*" => Some(Cardinality::ManyToMany),
            "unknown" => Some(Cardinality::Unknown),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::ZeroToOne => "0..1",
            Cardinality::OneToOne => "1..1",
            Cardinality::ZeroToMany => "0..N",
            Cardinality::OneToMany => "1..N",
            Cardinality::ManyToZero => "N..0",
            Cardinality::ManyToOne => "N..1",
            Cardinality::ManyToMany => "N..N",
            Cardinality::Unknown => "unknown",
        }
    }

    /// Whether the owning side holds many values.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Cardinality::ZeroToMany | Cardinality::OneToMany | Cardinality::ManyToMany
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_textual_forms() {
        assert_eq!(Cardinality::from_str("1..N"), Some(Cardinality::OneToMany));
        assert_eq!(Cardinality::from_str("0..*"), Some(Cardinality::ZeroToMany));
        assert_eq!(Cardinality::from_str("2..3"), None);
        assert_eq!(Cardinality::ManyToMany.as_str(), "N..N");
    }

    #[test]
    fn deserializes_from_config_notation() {
        let parsed: Cardinality = serde_json::from_str("\"N..1\"").unwrap();
        assert_eq!(parsed, Cardinality::ManyToOne);
        assert!(!parsed.is_collection());
        assert!(Cardinality::OneToMany.is_collection());
    }
}
