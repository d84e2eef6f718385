//! Folding generated output into an existing artifact.
//!
//! Each element kind has its own rule:
//!
//! - class declarations are appended when no declaration of the same name exists
//! - fields are always regenerated, keeping a doc comment found on the target
//! - methods are only added; a method that already exists is never touched
//! - a constructor is added when collections need initializing and none exists
//!
//! Running a merge against its own output changes nothing.

mod method;
mod property;

pub(crate) use method::needs_constructor;

use std::collections::HashSet;

use crate::artifact::{ArtifactFile, ClassDecl};
use crate::config::GeneratorConfig;
use crate::model::{Class, ParentRef, Property};

/// What a merge added to the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub attributes_added: usize,
    pub properties_merged: usize,
    pub methods_added: usize,
}

/// Merges a generated class into the artifact, creating its namespace and
/// class declaration when missing.
pub fn merge_class(class: &Class, config: &GeneratorConfig, file: &mut ArtifactFile) -> MergeOutcome {
    if file.header.is_none() {
        file.header = config.header.clone();
    }

    let namespace = file.namespace_or_insert(config.namespace_for(class));
    for import in &class.uses {
        namespace.add_use(import.clone());
    }

    let target = namespace.class_or_insert(&class.name);
    merge_signature(class, target);

    let mut outcome = MergeOutcome {
        attributes_added: merge_attributes(class, target),
        ..MergeOutcome::default()
    };

    for constant in class.constants.values() {
        if !target.has_constant(&constant.name) {
            target.add_constant(constant.clone());
        }
    }

    outcome.properties_merged = merge_properties(class, config, target);
    outcome.methods_added = merge_methods(class, config, target);

    tracing::debug!(
        class = %class.name,
        attributes = outcome.attributes_added,
        methods = outcome.methods_added,
        "merged class"
    );

    outcome
}

fn merge_signature(class: &Class, target: &mut ClassDecl) {
    match &class.parent {
        ParentRef::Named(parent) => target.extends = Some(parent.clone()),
        ParentRef::None => target.extends = None,
        ParentRef::Unknown => {}
    }
    if let Some(interface) = &class.interface {
        if !target.implements.contains(interface) {
            target.implements.push(interface.clone());
        }
    }
    target.is_abstract = class.is_abstract;
    if target.comment.is_none() {
        target.comment = class_comment(class);
    }
}

fn class_comment(class: &Class) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(description) = &class.description {
        parts.push(description.trim().to_string());
    }
    if let Some(uri) = &class.uri {
        parts.push(format!("@see {}", uri));
    }
    (!parts.is_empty()).then(|| parts.join("\n\n"))
}

/// Appends declarations whose name the target did not carry before this merge.
fn merge_attributes(class: &Class, target: &mut ClassDecl) -> usize {
    let existing: HashSet<String> = target.attributes.iter().map(|a| a.name.clone()).collect();
    let mut added = 0;
    for attribute in &class.attributes {
        if !existing.contains(&attribute.name) {
            target.add_attribute(attribute.clone());
            added += 1;
        }
    }
    added
}

/// Regenerates every modeled field. The identifier comes first, the other
/// modeled fields follow in model order, and fields only found on the target
/// keep their relative order after them.
fn merge_properties(class: &Class, config: &GeneratorConfig, target: &mut ClassDecl) -> usize {
    let mut previous = std::mem::take(&mut target.properties);
    let mut merged = Vec::with_capacity(previous.len() + class.properties.len());

    for property in ordered_properties(class) {
        let mut decl = property::synthesize_property(property, &class.name, config);
        if let Some(index) = previous.iter().position(|p| p.name == decl.name) {
            let existing = previous.remove(index);
            if existing.comment.is_some() {
                decl.comment = existing.comment;
            }
        }
        merged.push(decl);
    }

    let count = merged.len();
    merged.extend(previous);
    target.properties = merged;
    count
}

fn merge_methods(class: &Class, config: &GeneratorConfig, target: &mut ClassDecl) -> usize {
    let mut added = 0;

    if target.constructor().is_none() {
        if let Some(constructor) = method::constructor(class, config) {
            target.methods.insert(0, constructor);
            added += 1;
        }
    }

    if !config.accessor_methods {
        return added;
    }

    for property in ordered_properties(class) {
        for accessor in method::accessors(property, &class.name, config) {
            if !target.has_method(&accessor.name) {
                target.add_method(accessor);
                added += 1;
            }
        }
    }

    added
}

fn ordered_properties(class: &Class) -> impl Iterator<Item = &Property> {
    let id = class.properties.values().filter(|p| p.is_id);
    let rest = class.properties.values().filter(|p| !p.is_id);
    id.chain(rest)
}
