use crate::Reference;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One element value of a language variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantElement {
    pub element: Reference,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl VariantElement {
    /// Element value addressed by element codename.
    pub fn by_codename(codename: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            element: Reference::codename(codename),
            value,
        }
    }
}

/// The language-specific element values of one content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageVariant {
    pub item: Reference,
    pub language: Reference,
    #[serde(default)]
    pub elements: Vec<VariantElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}
