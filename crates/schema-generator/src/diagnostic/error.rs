//! Generator error types.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while mutating, generating, or merging.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SchemaError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid generator configuration: {message}")]
    #[diagnostic(code(schema::config::invalid))]
    InvalidConfig {
        message: String,
    },

    #[error("Unknown operation group '{group}' on class '{class}'")]
    #[diagnostic(
        code(schema::config::unknown_operation_group),
        help("Operations must be grouped under 'item' and 'collection' only.")
    )]
    UnknownOperationGroup {
        class: String,
        group: String,
    },

    #[error("Operation group '{group}' on class '{class}' must be a mapping of method names to options")]
    #[diagnostic(code(schema::config::invalid_operation_group))]
    InvalidOperationGroup {
        class: String,
        group: String,
    },

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("Relation target '{target}' of {class}::{property} is not a known class")]
    #[diagnostic(
        code(schema::relation::unresolved),
        help("Add the target class to the vocabulary selection or give the property a primitive range.")
    )]
    UnresolvedRelation {
        class: String,
        property: String,
        target: String,
    },

    #[error("Property {class}::{property} has no range")]
    #[diagnostic(code(schema::relation::missing_range))]
    MissingRange {
        class: String,
        property: String,
    },

    #[error("Unknown class: {name}")]
    #[diagnostic(code(schema::merge::unknown_class))]
    UnknownClass {
        name: String,
    },
}

impl SchemaError {
    /// Whether the error only affects a single property and generation can go on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SchemaError::UnresolvedRelation { .. } | SchemaError::MissingRange { .. }
        )
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::InvalidConfig {
            message: err.to_string(),
        }
    }
}
