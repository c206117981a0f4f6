//! Publishing of imported language variants.

use crate::error::{PipelineError, PipelineResult, Stage};
use crate::progress::ProgressReporter;
use futures::future::try_join_all;
use kcport_client::{ClientError, ManagementApi};
use kcport_types::{ContentItem, ProcessedItem, PublishRequest, PublishedItem};
use tracing::{debug, info};

/// Publishes language variants in the target project.
pub struct Publisher<'a> {
    target: &'a dyn ManagementApi,
    progress: &'a dyn ProgressReporter,
}

impl<'a> Publisher<'a> {
    pub fn new(target: &'a dyn ManagementApi, progress: &'a dyn ProgressReporter) -> Self {
        Self { target, progress }
    }

    /// One request per item that has a language.
    pub fn requests_for(items: &[ContentItem]) -> Vec<PublishRequest> {
        items.iter().filter_map(PublishRequest::for_item).collect()
    }

    /// Publishes every request concurrently; the first rejection fails the
    /// stage.
    pub async fn publish(&self, requests: Vec<PublishRequest>) -> PipelineResult<Vec<PublishedItem>> {
        let published = try_join_all(requests.into_iter().map(|r| self.publish_one(r)))
            .await
            .map_err(PipelineError::stage(Stage::Publish))?;

        info!("Published {} language variants", published.len());
        Ok(published)
    }

    async fn publish_one(&self, request: PublishRequest) -> Result<PublishedItem, ClientError> {
        self.target
            .publish_language_variant(&request.item_codename, &request.language_codename)
            .await?;
        debug!(
            "Published '{}' [{}]",
            request.item_codename, request.language_codename
        );

        self.progress.process_item(&ProcessedItem::published(format!(
            "{} [{}]",
            request.item_codename, request.language_codename
        )));
        Ok(request.into())
    }
}
