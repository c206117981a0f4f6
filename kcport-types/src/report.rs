//! Results and progress records returned by the import and cleanup flows.

use crate::{Asset, ContentItem, ContentType, LanguageVariant, Taxonomy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity a progress record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessedKind {
    ContentType,
    Taxonomy,
    ContentItem,
    LanguageVariant,
    PublishedItem,
}

impl fmt::Display for ProcessedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ContentType => "Content type",
            Self::Taxonomy => "Taxonomy",
            Self::ContentItem => "Content item",
            Self::LanguageVariant => "Language variant",
            Self::PublishedItem => "Published item",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Imported,
    Published,
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imported => f.write_str("imported"),
            Self::Published => f.write_str("published"),
        }
    }
}

/// One created entity, as reported to the progress callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedItem {
    pub kind: ProcessedKind,
    /// Display name, usually the codename assigned by the target project.
    pub name: String,
    pub status: ProcessingStatus,
}

impl ProcessedItem {
    pub fn imported(kind: ProcessedKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            status: ProcessingStatus::Imported,
        }
    }

    pub fn published(name: impl Into<String>) -> Self {
        Self {
            kind: ProcessedKind::PublishedItem,
            name: name.into(),
            status: ProcessingStatus::Published,
        }
    }
}

impl fmt::Display for ProcessedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' {}", self.kind, self.name, self.status)
    }
}

/// Request to publish one content item in one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublishRequest {
    pub item_codename: String,
    pub language_codename: String,
}

impl PublishRequest {
    /// Builds the request for an item, or `None` when the item has no language.
    pub fn for_item(item: &ContentItem) -> Option<Self> {
        item.has_language().then(|| Self {
            item_codename: item.codename().to_string(),
            language_codename: item.language().to_string(),
        })
    }
}

/// A language variant the target project accepted for publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedItem {
    pub item_codename: String,
    pub language_codename: String,
}

impl From<PublishRequest> for PublishedItem {
    fn from(req: PublishRequest) -> Self {
        Self {
            item_codename: req.item_codename,
            language_codename: req.language_codename,
        }
    }
}

/// Everything an import created in the target project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportResult {
    pub imported_content_types: Vec<ContentType>,
    pub imported_taxonomies: Vec<Taxonomy>,
    pub imported_content_items: Vec<ContentItem>,
    pub imported_language_variants: Vec<LanguageVariant>,
    pub published_items: Vec<PublishedItem>,
}

/// The entities a cleanup deletes from a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupData {
    pub content_items: Vec<ContentItem>,
    pub assets: Vec<Asset>,
    pub taxonomies: Vec<Taxonomy>,
    pub content_types: Vec<ContentType>,
}

impl CleanupData {
    pub fn is_empty(&self) -> bool {
        self.content_items.is_empty()
            && self.assets.is_empty()
            && self.taxonomies.is_empty()
            && self.content_types.is_empty()
    }
}

/// Counts of deleted entities per group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    pub content_items: usize,
    pub assets: usize,
    pub taxonomies: usize,
    pub content_types: usize,
}
