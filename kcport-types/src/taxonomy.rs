use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// System attributes of a taxonomy group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomySystem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub codename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// A term of a taxonomy group; terms nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    #[serde(default)]
    pub name: String,
    pub codename: String,
    #[serde(default)]
    pub terms: Vec<TaxonomyTerm>,
}

/// A taxonomy group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    pub system: TaxonomySystem,
    #[serde(default)]
    pub terms: Vec<TaxonomyTerm>,
}

impl Taxonomy {
    pub fn codename(&self) -> &str {
        &self.system.codename
    }

    /// Counts terms at every depth.
    pub fn term_count(&self) -> usize {
        fn count(terms: &[TaxonomyTerm]) -> usize {
            terms.iter().map(|t| 1 + count(&t.terms)).sum()
        }
        count(&self.terms)
    }
}
