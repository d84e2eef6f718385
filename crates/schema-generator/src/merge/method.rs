//! Accessor and constructor synthesis.

use heck::{ToLowerCamelCase, ToUpperCamelCase};

use super::property::{is_nullable, item_type, type_hint};
use crate::artifact::{MethodDecl, ParameterDecl, CONSTRUCTOR};
use crate::config::GeneratorConfig;
use crate::mapping::is_collection;
use crate::model::{Class, Property};

/// Getter, setter, adder, and remover for a property, as applicable.
pub(crate) fn accessors(property: &Property, class_name: &str, config: &GeneratorConfig) -> Vec<MethodDecl> {
    let mut methods = Vec::new();
    let field = &property.name;
    let hint = type_hint(property, class_name, config);
    let nullable = is_nullable(property, class_name, config);

    if property.is_readable {
        let mut getter = MethodDecl::new(format!("get{}", field.to_upper_camel_case()));
        getter.return_type = hint.as_ref().map(|h| optional(h, nullable));
        getter.body.push(format!("return $this->{};", field));
        methods.push(getter);
    }

    if !property.is_writable {
        return methods;
    }

    if property.is_array && !property.is_enum {
        let collection = is_collection(property, config.doctrine.use_collection);
        let item = singularize(field).to_lower_camel_case();
        let item_hint = item_type(property);
        let item_suffix = item.to_upper_camel_case();

        let mut adder = mutator(format!("add{}", item_suffix), config);
        adder.parameters.push(ParameterDecl::new(&item, item_hint.clone(), false));
        adder.body.push(format!("$this->{}[] = ${};", field, item));
        methods.push(finish(adder, config));

        let mut remover = mutator(format!("remove{}", item_suffix), config);
        remover.parameters.push(ParameterDecl::new(&item, item_hint, false));
        if collection {
            remover.body.push(format!("$this->{}->removeElement(${});", field, item));
        } else {
            remover.body.extend([
                format!("if (false !== $key = array_search(${}, $this->{}, true)) {{", item, field),
                format!("    unset($this->{}[$key]);", field),
                "}".to_string(),
            ]);
        }
        methods.push(finish(remover, config));
    } else {
        let mut setter = mutator(format!("set{}", field.to_upper_camel_case()), config);
        setter.parameters.push(ParameterDecl::new(field, hint, nullable));
        setter.body.push(format!("$this->{} = ${};", field, field));
        methods.push(finish(setter, config));
    }

    methods
}

/// Whether the class needs a constructor to initialize collections.
pub(crate) fn needs_constructor(class: &Class, config: &GeneratorConfig) -> bool {
    collection_properties(class, config).next().is_some()
}

/// Constructor initializing every collection-valued property.
pub(crate) fn constructor(class: &Class, config: &GeneratorConfig) -> Option<MethodDecl> {
    if !needs_constructor(class, config) {
        return None;
    }

    let mut method = MethodDecl::new(CONSTRUCTOR);
    if class.parent_has_constructor {
        method.body.push("parent::__construct();".to_string());
    }
    for property in collection_properties(class, config) {
        method
            .body
            .push(format!("$this->{} = new ArrayCollection();", property.name));
    }
    Some(method)
}

fn collection_properties<'c>(class: &'c Class, config: &GeneratorConfig) -> impl Iterator<Item = &'c Property> {
    let use_collection = config.doctrine.use_collection;
    class
        .properties
        .values()
        .filter(move |p| !p.is_enum && is_collection(p, use_collection))
}

fn mutator(name: String, config: &GeneratorConfig) -> MethodDecl {
    let mut method = MethodDecl::new(name);
    let return_type = if config.fluent_mutator_methods { "self" } else { "void" };
    method.return_type = Some(return_type.to_string());
    method
}

fn finish(mut method: MethodDecl, config: &GeneratorConfig) -> MethodDecl {
    if config.fluent_mutator_methods {
        method.body.push(String::new());
        method.body.push("return $this;".to_string());
    }
    method
}

fn optional(hint: &str, nullable: bool) -> String {
    if nullable {
        format!("?{}", hint)
    } else {
        hint.to_string()
    }
}

/// Naive English singular of a plural property name.
fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    for suffix in ["sses", "shes", "ches", "xes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => word.to_string(),
    }
}
