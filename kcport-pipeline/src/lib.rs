//! Export, import, publish and cleanup flows between content projects.
//!
//! - [`Exporter`] assembles a [`ContentBundle`](kcport_types::ContentBundle)
//!   from the delivery or management API and packages it as a zip archive.
//! - [`ImportDataLoader`] builds [`ImportData`] from a source project, an
//!   archive, or a published template package.
//! - [`Importer`] replays the data into a target project: content types,
//!   taxonomies, content items with language variants, then publishing.
//! - [`Cleaner`] empties a project: content items, assets, taxonomies and
//!   content types, with a pause between groups.
//!
//! All remote access goes through the `kcport-client` traits.

pub mod cleanup;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod import;
pub mod loader;
pub mod progress;
pub mod publish;

pub use cleanup::Cleaner;
pub use config::{CleanupConfig, DEFAULT_CLEANUP_DELAY_MS, ExportConfig, ImportConfig};
pub use error::{PipelineError, PipelineResult, Stage};
pub use export::Exporter;
pub use fetch::{DeliveryFetcher, ManagementFetcher, fetch_all};
pub use import::{
    ContentItemsImporter, ContentTypesImporter, ImportedItems, Importer, TaxonomiesImporter,
};
pub use loader::{ImportData, ImportDataLoader};
pub use progress::{NoopProgress, ProgressReporter};
pub use publish::Publisher;
