//! Taxonomy stage.

use crate::error::{PipelineError, PipelineResult, Stage};
use crate::progress::ProgressReporter;
use futures::future::try_join_all;
use kcport_client::{ClientError, ManagementApi};
use kcport_types::{ProcessedItem, ProcessedKind, Taxonomy};
use tracing::{debug, info};

/// Creates taxonomy groups, with their terms, in the target project.
pub struct TaxonomiesImporter<'a> {
    target: &'a dyn ManagementApi,
    progress: &'a dyn ProgressReporter,
}

impl<'a> TaxonomiesImporter<'a> {
    pub fn new(target: &'a dyn ManagementApi, progress: &'a dyn ProgressReporter) -> Self {
        Self { target, progress }
    }

    pub async fn import(&self, taxonomies: &[Taxonomy]) -> PipelineResult<Vec<Taxonomy>> {
        let created = try_join_all(taxonomies.iter().map(|t| self.create(t)))
            .await
            .map_err(PipelineError::stage(Stage::Taxonomies))?;

        info!("Imported {} taxonomies", created.len());
        Ok(created)
    }

    async fn create(&self, taxonomy: &Taxonomy) -> Result<Taxonomy, ClientError> {
        let created = self.target.create_taxonomy(taxonomy).await?;
        debug!(
            "Created taxonomy '{}' with {} terms",
            created.codename(),
            taxonomy.term_count()
        );

        self.progress.process_item(&ProcessedItem::imported(
            ProcessedKind::Taxonomy,
            created.codename(),
        ));
        Ok(created)
    }
}
