//! Element value mapping for language variant upserts.
//!
//! Linked items and multiple-choice options are sent as codename
//! references, asset elements are sent empty, everything else is sent as
//! exported.

use kcport_types::{ContentItem, ContentType, ElementKind, VariantElement};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Element kinds declared by one content type, keyed by element codename.
#[derive(Debug, Clone, Default)]
pub struct ElementKindMap {
    kinds: HashMap<String, ElementKind>,
}

impl ElementKindMap {
    pub fn from_type(content_type: &ContentType) -> Self {
        Self {
            kinds: content_type
                .elements
                .iter()
                .map(|e| (e.codename.clone(), e.element_type))
                .collect(),
        }
    }

    /// The declared kind of `codename`, or `fallback` when the type does not
    /// declare it.
    pub fn kind_of(&self, codename: &str, fallback: ElementKind) -> ElementKind {
        self.kinds.get(codename).copied().unwrap_or(fallback)
    }
}

/// Maps one element value according to its kind.
pub fn map_element_value(kind: ElementKind, value: &Value) -> Value {
    match kind {
        ElementKind::ModularContent | ElementKind::MultipleChoice => codename_refs(value),
        ElementKind::Asset => json!([]),
        _ => value.clone(),
    }
}

/// Maps every element of `item`.
///
/// Kinds come from `kinds` when the item's type is known, otherwise from
/// the tag each element was exported with.
pub fn map_elements(item: &ContentItem, kinds: Option<&ElementKindMap>) -> Vec<VariantElement> {
    item.elements
        .iter()
        .map(|(codename, element)| {
            let kind = match kinds {
                Some(map) => map.kind_of(codename, element.element_type),
                None => element.element_type,
            };
            VariantElement::by_codename(codename.as_str(), map_element_value(kind, &element.value))
        })
        .collect()
}

fn codename_refs(value: &Value) -> Value {
    let refs = value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(codename_of)
                .map(|codename| json!({ "codename": codename }))
                .collect()
        })
        .unwrap_or_default();
    Value::Array(refs)
}

/// Codename of a linked item or option: a bare string, or an object with
/// `codename` or `system.codename`.
fn codename_of(entry: &Value) -> Option<&str> {
    match entry {
        Value::String(codename) => Some(codename),
        Value::Object(fields) => fields
            .get("codename")
            .and_then(Value::as_str)
            .or_else(|| fields.get("system")?.get("codename")?.as_str()),
        _ => None,
    }
}
