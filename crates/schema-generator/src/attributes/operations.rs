//! Validation of resource operations.

use serde_json::Value;

use crate::diagnostic::SchemaError;
use crate::model::Arguments;

const ITEM: &str = "item";
const COLLECTION: &str = "collection";

/// Operations of a resource, grouped by the kind of target they act on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operations {
    /// Method name -> options, for single-resource operations.
    pub item: Arguments,

    /// Method name -> options, for collection operations.
    pub collection: Arguments,
}

impl Operations {
    /// Validates a raw operations mapping.
    ///
    /// Only the `item` and `collection` groups are accepted; a missing group
    /// is empty. Anything else rejects the whole mapping.
    pub fn resolve(class: &str, raw: &Arguments) -> Result<Self, SchemaError> {
        let mut operations = Operations::default();

        for (group, methods) in raw {
            let target = match group.as_str() {
                ITEM => &mut operations.item,
                COLLECTION => &mut operations.collection,
                _ => {
                    return Err(SchemaError::UnknownOperationGroup {
                        class: class.to_string(),
                        group: group.clone(),
                    })
                }
            };

            match methods {
                Value::Null => {}
                Value::Object(methods) => target.extend(methods.clone()),
                Value::Array(methods) if methods.is_empty() => {}
                _ => {
                    return Err(SchemaError::InvalidOperationGroup {
                        class: class.to_string(),
                        group: group.clone(),
                    })
                }
            }
        }

        Ok(operations)
    }
}
