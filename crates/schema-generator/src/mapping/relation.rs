//! Relational mapping of class-valued properties.

use crate::diagnostic::SchemaError;
use crate::model::{Attribute, Cardinality, Class, ClassRegistry, Property};

/// Looks up the class a property points to.
pub fn resolve_target<'r>(
    property: &Property,
    class_name: &str,
    registry: &'r ClassRegistry,
) -> Result<&'r Class, SchemaError> {
    let target = property.range_name().ok_or_else(|| SchemaError::MissingRange {
        class: class_name.to_string(),
        property: property.name.clone(),
    })?;

    registry
        .get(target)
        .ok_or_else(|| SchemaError::UnresolvedRelation {
            class: class_name.to_string(),
            property: property.name.clone(),
            target: target.to_string(),
        })
}

/// Relation declarations for a property, in emission order.
///
/// The target is always referenced by its bare class name.
pub fn relation_attributes(property: &Property, target: &str) -> Vec<Attribute> {
    let mut attributes = Vec::new();

    match property.cardinality {
        Cardinality::ZeroToOne => {
            attributes.push(Attribute::new("ORM\\OneToOne").arg("targetEntity", target));
        }
        Cardinality::OneToOne => {
            attributes.push(Attribute::new("ORM\\OneToOne").arg("targetEntity", target));
            attributes.push(Attribute::new("ORM\\JoinColumn").arg("nullable", false));
        }
        Cardinality::Unknown | Cardinality::ManyToZero => {
            attributes.push(many_to_one(property, target));
        }
        Cardinality::ManyToOne => {
            attributes.push(many_to_one(property, target));
            attributes.push(Attribute::new("ORM\\JoinColumn").arg("nullable", false));
        }
        Cardinality::ZeroToMany | Cardinality::OneToMany => {
            if let Some(mapped_by) = &property.mapped_by {
                attributes.push(
                    Attribute::new("ORM\\OneToMany")
                        .arg("targetEntity", target)
                        .arg("mappedBy", mapped_by.as_str()),
                );
            } else {
                attributes.push(many_to_many(property, target));
                if let Some(table) = &property.relation_table_name {
                    attributes.push(Attribute::new("ORM\\JoinTable").arg("name", table.as_str()));
                }
                let inverse = if property.cardinality == Cardinality::OneToMany {
                    Attribute::new("ORM\\InverseJoinColumn")
                        .arg("nullable", false)
                        .arg("unique", true)
                } else {
                    Attribute::new("ORM\\InverseJoinColumn").arg("unique", true)
                };
                attributes.push(inverse);
            }
        }
        Cardinality::ManyToMany => {
            let mut relation = many_to_many(property, target);
            if let Some(mapped_by) = &property.mapped_by {
                relation = relation.arg("mappedBy", mapped_by.as_str());
            }
            attributes.push(relation);
            if let Some(table) = &property.relation_table_name {
                attributes.push(Attribute::new("ORM\\JoinTable").arg("name", table.as_str()));
            }
        }
    }

    attributes
}

fn many_to_one(property: &Property, target: &str) -> Attribute {
    let attribute = Attribute::new("ORM\\ManyToOne").arg("targetEntity", target);
    match &property.inversed_by {
        Some(inversed_by) => attribute.arg("inversedBy", inversed_by.as_str()),
        None => attribute,
    }
}

fn many_to_many(property: &Property, target: &str) -> Attribute {
    let attribute = Attribute::new("ORM\\ManyToMany").arg("targetEntity", target);
    match &property.inversed_by {
        Some(inversed_by) => attribute.arg("inversedBy", inversed_by.as_str()),
        None => attribute,
    }
}
