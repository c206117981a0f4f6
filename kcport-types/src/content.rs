//! Content types, content items and their elements.

use crate::Reference;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a content element.
///
/// The kind is fixed by the content type definition and decides how an
/// element's value is carried into a target project. Serialized as its wire
/// tag; tags are read case-insensitively and unrecognised ones (snippets,
/// subpages) become `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Text,
    RichText,
    Number,
    DateTime,
    MultipleChoice,
    Asset,
    /// Linked items.
    ModularContent,
    Taxonomy,
    UrlSlug,
    Custom,
    Guidelines,
    Unknown,
}

impl ElementKind {
    /// Returns the wire tag of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::RichText => "rich_text",
            Self::Number => "number",
            Self::DateTime => "date_time",
            Self::MultipleChoice => "multiple_choice",
            Self::Asset => "asset",
            Self::ModularContent => "modular_content",
            Self::Taxonomy => "taxonomy",
            Self::UrlSlug => "url_slug",
            Self::Custom => "custom",
            Self::Guidelines => "guidelines",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a wire tag case-insensitively; unrecognised tags map to `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "rich_text" => Self::RichText,
            "number" => Self::Number,
            "date_time" => Self::DateTime,
            "multiple_choice" => Self::MultipleChoice,
            "asset" => Self::Asset,
            "modular_content" => Self::ModularContent,
            "taxonomy" => Self::Taxonomy,
            "url_slug" => Self::UrlSlug,
            "custom" => Self::Custom,
            "guidelines" => Self::Guidelines,
            _ => Self::Unknown,
        }
    }
}

impl Serialize for ElementKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One option of a multiple-choice element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    #[serde(default)]
    pub name: String,
    pub codename: String,
}

/// System attributes of a content type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeSystem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// An element declared by a content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDefinition {
    pub codename: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub element_type: ElementKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    /// Taxonomy group of a taxonomy element. The delivery API names it by
    /// codename, the management API by id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_group: Option<Reference>,
}

impl ElementDefinition {
    /// Shorthand for an element without options or taxonomy group.
    pub fn new(codename: &str, name: &str, element_type: ElementKind) -> Self {
        Self {
            codename: codename.into(),
            name: name.into(),
            element_type,
            options: Vec::new(),
            taxonomy_group: None,
        }
    }
}

/// A content type: the schema content items are created from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentType {
    pub system: TypeSystem,
    #[serde(default)]
    pub elements: Vec<ElementDefinition>,
}

impl ContentType {
    pub fn codename(&self) -> &str {
        &self.system.codename
    }
}

/// System attributes of a content item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemSystem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub codename: String,
    /// Language codename; empty for items listed without a language.
    #[serde(default)]
    pub language: String,
    /// Content type codename.
    #[serde(rename = "type", default)]
    pub content_type: String,
    /// Content type id, set for items listed through the management API
    /// until the type codename has been resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// A raw element value of a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemElement {
    #[serde(rename = "type")]
    pub element_type: ElementKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl ItemElement {
    pub fn new(element_type: ElementKind, value: serde_json::Value) -> Self {
        Self {
            element_type,
            name: String::new(),
            value,
        }
    }
}

/// A content item in one language with its element values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub system: ItemSystem,
    #[serde(default)]
    pub elements: BTreeMap<String, ItemElement>,
}

impl ContentItem {
    pub fn codename(&self) -> &str {
        &self.system.codename
    }

    pub fn language(&self) -> &str {
        &self.system.language
    }

    pub fn content_type(&self) -> &str {
        &self.system.content_type
    }

    /// Returns `true` when the item carries a language, i.e. it has a
    /// language variant that can be replayed.
    pub fn has_language(&self) -> bool {
        !self.system.language.is_empty()
    }
}
