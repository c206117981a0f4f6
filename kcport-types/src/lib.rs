//! Content model types for kcport.
//!
//! This crate defines the plain data shared by every other kcport crate:
//! - [`ContentType`], [`ContentItem`], [`Taxonomy`], [`Asset`], [`LanguageVariant`]
//!   as they appear in remote API payloads and in export archives
//! - [`ElementKind`], the tagged union deciding how an element value is carried
//!   into a target project
//! - [`ContentBundle`], the in-memory export of one project
//! - [`ImportResult`], [`CleanupData`] and progress records
//! - [`Page`], one page of a paginated listing
//!
//! Serialized field names follow the platform's snake_case JSON so that archive
//! files can be compared with raw API responses.

mod asset;
mod bundle;
mod content;
mod page;
mod reference;
mod report;
mod taxonomy;
mod variant;

pub use asset::Asset;
pub use bundle::{BundleSummary, ContentBundle};
pub use content::{
    ChoiceOption, ContentItem, ContentType, ElementDefinition, ElementKind, ItemElement,
    ItemSystem, TypeSystem,
};
pub use page::Page;
pub use reference::Reference;
pub use report::{
    CleanupData, CleanupReport, ImportResult, ProcessedItem, ProcessedKind, ProcessingStatus,
    PublishRequest, PublishedItem,
};
pub use taxonomy::{Taxonomy, TaxonomySystem, TaxonomyTerm};
pub use variant::{LanguageVariant, VariantElement};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when decoding content model payloads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid asset url: {0}")]
    InvalidAssetUrl(String),
}
