//! Import data loading: from a source project, an archive, or a published
//! template package.

use crate::error::PipelineResult;
use crate::export::management_bundle;
use crate::fetch::DeliveryFetcher;
use kcport_client::{AssetSource, DeliveryApi, ManagementApi};
use kcport_package::{ArchiveLayout, AssetFile, ExportPackage};
use kcport_types::ContentBundle;
use std::sync::Arc;
use tracing::info;

/// Content to import together with the project it goes into.
pub struct ImportData {
    pub bundle: ContentBundle,
    /// Asset binaries found in the archive the data was loaded from.
    pub assets_from_file: Vec<AssetFile>,
    pub target: Arc<dyn ManagementApi>,
}

impl ImportData {
    pub fn new(bundle: ContentBundle, target: Arc<dyn ManagementApi>) -> Self {
        Self {
            bundle,
            assets_from_file: Vec::new(),
            target,
        }
    }

    pub fn target_project_id(&self) -> &str {
        self.target.project_id()
    }
}

/// Builds [`ImportData`] for one target project.
pub struct ImportDataLoader {
    target: Arc<dyn ManagementApi>,
    layout: ArchiveLayout,
}

impl ImportDataLoader {
    pub fn new(target: Arc<dyn ManagementApi>, layout: ArchiveLayout) -> Self {
        Self { target, layout }
    }

    /// Loads types, items and taxonomies of a source project concurrently.
    pub async fn from_project(
        &self,
        source: &dyn DeliveryApi,
        languages: &[String],
    ) -> PipelineResult<ImportData> {
        info!(
            "Loading project {} for import into {}",
            source.project_id(),
            self.target.project_id()
        );
        let fetcher = DeliveryFetcher::new(source);

        let (content_types, content_items, taxonomies) = futures::try_join!(
            fetcher.all_types(),
            fetcher.all_items_in(languages),
            fetcher.all_taxonomies()
        )?;

        let bundle = ContentBundle {
            content_types,
            content_items,
            taxonomies,
            ..Default::default()
        };
        info!("Loaded {}", bundle.summary());
        Ok(ImportData::new(bundle, self.target.clone()))
    }

    /// Loads a source project through its management API, fetching what
    /// [`Exporter::from_management`](crate::Exporter::from_management) does.
    ///
    /// Management items carry no language, so they are imported without
    /// language variants.
    pub async fn from_management_project(
        &self,
        source: &dyn ManagementApi,
    ) -> PipelineResult<ImportData> {
        info!(
            "Loading project {} through the management API for import into {}",
            source.project_id(),
            self.target.project_id()
        );
        let bundle = management_bundle(source).await?;
        info!("Loaded {}", bundle.summary());
        Ok(ImportData::new(bundle, self.target.clone()))
    }

    /// Loads an export archive.
    ///
    /// Fails without contacting the target project when a required entry is
    /// missing or malformed.
    pub fn from_archive(&self, bytes: &[u8]) -> PipelineResult<ImportData> {
        let package = ExportPackage::from_bytes(bytes, &self.layout)?;
        info!(
            "Loaded archive: {}, {} asset files",
            package.bundle.summary(),
            package.assets_from_file.len()
        );

        Ok(ImportData {
            bundle: package.bundle,
            assets_from_file: package.assets_from_file,
            target: self.target.clone(),
        })
    }

    /// Downloads a published template package and loads it as an archive.
    pub async fn from_url(
        &self,
        downloader: &dyn AssetSource,
        url: &str,
    ) -> PipelineResult<ImportData> {
        info!("Downloading template package {}", url);
        let bytes = downloader.fetch_binary(url).await?;
        self.from_archive(&bytes)
    }
}
