//! Project cleanup: deletes content items, assets, taxonomies and content
//! types, in that order.

use crate::config::CleanupConfig;
use crate::error::{PipelineError, PipelineResult, Stage};
use crate::fetch::ManagementFetcher;
use futures::future::join_all;
use kcport_client::{ClientResult, ManagementApi};
use kcport_types::{CleanupData, CleanupReport};
use std::future::Future;
use tracing::{debug, info};

/// Deletes the content of a project.
pub struct Cleaner<'a> {
    target: &'a dyn ManagementApi,
    config: CleanupConfig,
}

impl<'a> Cleaner<'a> {
    pub fn new(target: &'a dyn ManagementApi, config: CleanupConfig) -> Self {
        Self { target, config }
    }

    /// Lists everything a cleanup would delete.
    pub async fn prepare(&self) -> PipelineResult<CleanupData> {
        let fetcher = ManagementFetcher::new(self.target);
        let (content_items, assets, taxonomies, content_types) = futures::try_join!(
            fetcher.all_items(),
            fetcher.all_assets(),
            fetcher.all_taxonomies(),
            fetcher.all_types()
        )?;

        Ok(CleanupData {
            content_items,
            assets,
            taxonomies,
            content_types,
        })
    }

    /// Deletes `data` group by group, pausing between groups.
    ///
    /// Every delete of a group is awaited before the group's first failure,
    /// if any, is returned; later groups are then left untouched.
    pub async fn cleanup(&self, data: &CleanupData) -> PipelineResult<CleanupReport> {
        let target = self.target;
        info!("Cleaning up project {}", target.project_id());

        let content_items = self
            .delete_group(
                Stage::DeleteContentItems,
                data.content_items
                    .iter()
                    .map(|i| target.delete_content_item(i.codename())),
            )
            .await?;
        self.pause().await;

        let assets = self
            .delete_group(
                Stage::DeleteAssets,
                data.assets.iter().map(|a| target.delete_asset(&a.id)),
            )
            .await?;
        self.pause().await;

        let taxonomies = self
            .delete_group(
                Stage::DeleteTaxonomies,
                data.taxonomies
                    .iter()
                    .map(|t| target.delete_taxonomy(t.codename())),
            )
            .await?;
        self.pause().await;

        let content_types = self
            .delete_group(
                Stage::DeleteContentTypes,
                data.content_types
                    .iter()
                    .map(|t| target.delete_content_type(t.codename())),
            )
            .await?;

        let report = CleanupReport {
            content_items,
            assets,
            taxonomies,
            content_types,
        };
        info!(
            "Deleted {} content items, {} assets, {} taxonomies, {} content types",
            report.content_items, report.assets, report.taxonomies, report.content_types
        );
        Ok(report)
    }

    async fn delete_group<F>(
        &self,
        stage: Stage,
        deletes: impl Iterator<Item = F>,
    ) -> PipelineResult<usize>
    where
        F: Future<Output = ClientResult<()>>,
    {
        let results = join_all(deletes).await;
        let count = results.len();
        if let Some(err) = results.into_iter().find_map(Result::err) {
            return Err(PipelineError::Stage { stage, source: err });
        }

        debug!("{}: {} deleted", stage, count);
        Ok(count)
    }

    async fn pause(&self) {
        tokio::time::sleep(self.config.cleanup_delay()).await;
    }
}
