//! Import into a target project.
//!
//! Stages run strictly in order, each finishing before the next starts:
//! content types, taxonomies, content items with their language variants,
//! and publishing when configured. Within a stage every entity is sent
//! concurrently and the first failure aborts the run.

mod content_items;
mod content_types;
pub mod elements;
mod taxonomies;

pub use content_items::{ContentItemsImporter, ImportedItems};
pub use content_types::ContentTypesImporter;
pub use taxonomies::TaxonomiesImporter;

use crate::config::ImportConfig;
use crate::error::PipelineResult;
use crate::loader::ImportData;
use crate::progress::ProgressReporter;
use crate::publish::Publisher;
use kcport_types::ImportResult;
use tracing::info;

/// Runs all import stages against the target of an [`ImportData`].
pub struct Importer<'a> {
    config: ImportConfig,
    progress: &'a dyn ProgressReporter,
}

impl<'a> Importer<'a> {
    pub fn new(config: ImportConfig, progress: &'a dyn ProgressReporter) -> Self {
        Self { config, progress }
    }

    pub async fn import(&self, data: &ImportData) -> PipelineResult<ImportResult> {
        let target = data.target.as_ref();
        let bundle = &data.bundle;
        info!(
            "Importing {} into project {}",
            bundle.summary(),
            data.target_project_id()
        );

        let imported_content_types = ContentTypesImporter::new(target, self.progress)
            .import(&bundle.content_types)
            .await?;

        let imported_taxonomies = TaxonomiesImporter::new(target, self.progress)
            .import(&bundle.taxonomies)
            .await?;

        let items = ContentItemsImporter::new(target, self.progress)
            .import(bundle)
            .await?;

        let published_items = if self.config.publish_items {
            let requests = Publisher::requests_for(&items.content_items);
            Publisher::new(target, self.progress).publish(requests).await?
        } else {
            Vec::new()
        };

        info!("Import into project {} finished", data.target_project_id());
        Ok(ImportResult {
            imported_content_types,
            imported_taxonomies,
            imported_content_items: items.content_items,
            imported_language_variants: items.language_variants,
            published_items,
        })
    }
}
