//! Content type stage.

use crate::error::{PipelineError, PipelineResult, Stage};
use crate::progress::ProgressReporter;
use futures::future::try_join_all;
use kcport_client::{ClientError, ManagementApi};
use kcport_types::{ContentType, ProcessedItem, ProcessedKind};
use tracing::{debug, info};

/// Creates content types in the target project.
pub struct ContentTypesImporter<'a> {
    target: &'a dyn ManagementApi,
    progress: &'a dyn ProgressReporter,
}

impl<'a> ContentTypesImporter<'a> {
    pub fn new(target: &'a dyn ManagementApi, progress: &'a dyn ProgressReporter) -> Self {
        Self { target, progress }
    }

    /// Creates every type concurrently and returns them as the target
    /// project stored them.
    pub async fn import(&self, content_types: &[ContentType]) -> PipelineResult<Vec<ContentType>> {
        let created = try_join_all(content_types.iter().map(|t| self.create(t)))
            .await
            .map_err(PipelineError::stage(Stage::ContentTypes))?;

        info!("Imported {} content types", created.len());
        Ok(created)
    }

    async fn create(&self, content_type: &ContentType) -> Result<ContentType, ClientError> {
        let created = self.target.create_content_type(content_type).await?;
        debug!("Created content type '{}'", created.codename());

        let name = if created.codename().is_empty() {
            content_type.codename()
        } else {
            created.codename()
        };
        self.progress
            .process_item(&ProcessedItem::imported(ProcessedKind::ContentType, name));
        Ok(created)
    }
}
