use crate::{Asset, ContentItem, ContentType, LanguageVariant, Taxonomy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// All exported entities of one project.
///
/// Entities are keyed by codename, unique per kind within a project. A
/// bundle is not validated: references between entities are checked by the
/// target project when the bundle is replayed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentBundle {
    pub content_types: Vec<ContentType>,
    pub content_items: Vec<ContentItem>,
    pub taxonomies: Vec<Taxonomy>,
    pub assets: Vec<Asset>,
    pub language_variants: Vec<LanguageVariant>,
}

impl ContentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct language codenames used by the bundle's content items, sorted.
    ///
    /// The target project must contain these languages before an import.
    pub fn required_languages(&self) -> Vec<String> {
        self.content_items
            .iter()
            .filter(|i| i.has_language())
            .map(|i| i.language().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn summary(&self) -> BundleSummary {
        BundleSummary {
            content_types: self.content_types.len(),
            content_items: self.content_items.len(),
            taxonomies: self.taxonomies.len(),
            assets: self.assets.len(),
            language_variants: self.language_variants.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary().total() == 0
    }
}

/// Entity counts of a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSummary {
    pub content_types: usize,
    pub content_items: usize,
    pub taxonomies: usize,
    pub assets: usize,
    pub language_variants: usize,
}

impl BundleSummary {
    pub fn total(&self) -> usize {
        self.content_types + self.content_items + self.taxonomies + self.assets + self.language_variants
    }
}

impl fmt::Display for BundleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} content types, {} content items, {} taxonomies, {} assets, {} language variants",
            self.content_types, self.content_items, self.taxonomies, self.assets, self.language_variants
        )
    }
}
