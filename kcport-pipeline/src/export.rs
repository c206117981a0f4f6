//! Export assembly and packaging.

use crate::config::ExportConfig;
use crate::error::PipelineResult;
use crate::fetch::{DeliveryFetcher, ManagementFetcher};
use futures::future::try_join_all;
use kcport_client::{AssetSource, DeliveryApi, ManagementApi};
use kcport_package::PackageBuilder;
use kcport_types::{
    Asset, ContentBundle, ContentItem, ContentType, ElementKind, LanguageVariant, Reference,
    Taxonomy, VariantElement,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Builds [`ContentBundle`]s from a source project and packages them.
pub struct Exporter {
    config: ExportConfig,
    asset_source: Arc<dyn AssetSource>,
}

impl Exporter {
    pub fn new(config: ExportConfig, asset_source: Arc<dyn AssetSource>) -> Self {
        Self {
            config,
            asset_source,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Exports published content through the delivery API.
    ///
    /// Types, then items (one feed walk per language, the default language
    /// when `languages` is empty), then taxonomies. Assets and language
    /// variants are derived from the item responses.
    pub async fn from_delivery(
        &self,
        api: &dyn DeliveryApi,
        languages: &[String],
    ) -> PipelineResult<ContentBundle> {
        info!("Exporting project {} through the delivery API", api.project_id());
        let fetcher = DeliveryFetcher::new(api);

        let mut bundle = ContentBundle {
            content_types: fetcher.all_types().await?,
            ..Default::default()
        };

        let items = fetcher.all_items_in(languages).await?;
        let mut seen_assets = HashSet::new();
        for item in items {
            for asset in assets_of(&item)? {
                if seen_assets.insert(asset.id.clone()) {
                    bundle.assets.push(asset);
                }
            }
            bundle.language_variants.push(variant_of(&item));
            bundle.content_items.push(item);
        }

        bundle.taxonomies = fetcher.all_taxonomies().await?;

        info!("Exported {}", bundle.summary());
        Ok(bundle)
    }

    /// Exports the full project through the management API.
    pub async fn from_management(&self, api: &dyn ManagementApi) -> PipelineResult<ContentBundle> {
        info!("Exporting project {} through the management API", api.project_id());
        let bundle = management_bundle(api).await?;
        info!("Exported {}", bundle.summary());
        Ok(bundle)
    }

    /// Writes `bundle` into an archive, downloading every asset binary.
    ///
    /// Downloads run one at a time; the first failed download aborts the
    /// packaging.
    pub async fn package(&self, bundle: &ContentBundle) -> PipelineResult<Vec<u8>> {
        let mut builder = PackageBuilder::new(bundle).layout(self.config.layout.clone());

        for (i, asset) in bundle.assets.iter().enumerate() {
            debug!(
                "Downloading asset {}/{}: {}",
                i + 1,
                bundle.assets.len(),
                asset.file_name
            );
            let data = self.asset_source.fetch_binary(&asset.url).await?;
            builder = builder.add_asset(&asset.id, &asset.file_name, data);
        }

        let bytes = builder.build()?;
        info!(
            "Packaged {} ({} assets, {} bytes)",
            bundle.summary(),
            bundle.assets.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// File name of the archive exported from `project_id`.
    pub fn package_filename(&self, project_id: &str) -> String {
        self.config.layout.package_filename(project_id)
    }
}

/// Reads a whole project through the management API.
///
/// Assets, types, items and taxonomies are fetched concurrently; language
/// variants are fetched afterwards, one listing per content type.
pub(crate) async fn management_bundle(api: &dyn ManagementApi) -> PipelineResult<ContentBundle> {
    let fetcher = ManagementFetcher::new(api);

    let (assets, mut content_types, mut content_items, taxonomies) = futures::try_join!(
        fetcher.all_assets(),
        fetcher.all_types(),
        fetcher.all_items(),
        fetcher.all_taxonomies()
    )?;

    resolve_type_codenames(&mut content_items, &content_types);
    resolve_taxonomy_groups(&mut content_types, &taxonomies);

    let variant_lists = try_join_all(
        content_types
            .iter()
            .map(|t| fetcher.language_variants_for(t.codename())),
    )
    .await?;
    let language_variants = keep_known_items(variant_lists.into_iter().flatten(), &content_items);

    Ok(ContentBundle {
        content_types,
        content_items,
        taxonomies,
        assets,
        language_variants,
    })
}

/// Assets referenced by the item's asset elements.
fn assets_of(item: &ContentItem) -> PipelineResult<Vec<Asset>> {
    let mut assets = Vec::new();

    for element in item.elements.values() {
        if element.element_type != ElementKind::Asset {
            continue;
        }
        let Some(entries) = element.value.as_array() else {
            continue;
        };

        for entry in entries {
            let Some(url) = entry.get("url").and_then(|u| u.as_str()) else {
                warn!("Asset without url in item '{}'", item.codename());
                continue;
            };
            let mime_type = entry.get("type").and_then(|t| t.as_str()).unwrap_or_default();
            let size = entry.get("size").and_then(|s| s.as_u64()).unwrap_or_default();

            let mut asset = Asset::from_delivery_url(url, mime_type, size)?;
            asset.title = entry
                .get("description")
                .and_then(|d| d.as_str())
                .filter(|d| !d.is_empty())
                .map(str::to_string);
            assets.push(asset);
        }
    }

    Ok(assets)
}

/// The language variant carried by a delivery item.
fn variant_of(item: &ContentItem) -> LanguageVariant {
    LanguageVariant {
        item: Reference::codename(item.codename()),
        language: Reference::codename(item.language()),
        elements: item
            .elements
            .iter()
            .map(|(codename, element)| {
                VariantElement::by_codename(codename.as_str(), element.value.clone())
            })
            .collect(),
        last_modified: item.system.last_modified,
    }
}

fn resolve_type_codenames(items: &mut [ContentItem], types: &[ContentType]) {
    for item in items.iter_mut() {
        let Some(type_id) = item.system.type_id.as_deref() else {
            continue;
        };
        match types.iter().find(|t| t.system.id == type_id) {
            Some(t) => item.system.content_type = t.codename().to_string(),
            None => warn!(
                "Item '{}' references unknown content type {}",
                item.codename(),
                type_id
            ),
        }
    }
}

/// Fills in the codename of taxonomy groups referenced only by id.
fn resolve_taxonomy_groups(types: &mut [ContentType], taxonomies: &[Taxonomy]) {
    for content_type in types.iter_mut() {
        let type_codename = content_type.system.codename.clone();
        for element in content_type.elements.iter_mut() {
            let Some(group) = element.taxonomy_group.as_mut() else {
                continue;
            };
            if group.codename.is_some() {
                continue;
            }
            let Some(group_id) = group.id.as_deref() else {
                continue;
            };
            match taxonomies.iter().find(|t| t.system.id == group_id) {
                Some(taxonomy) => group.codename = Some(taxonomy.codename().to_string()),
                None => warn!(
                    "Element '{}' of content type '{}' references unknown taxonomy group {}",
                    element.codename, type_codename, group_id
                ),
            }
        }
    }
}

fn keep_known_items(
    variants: impl Iterator<Item = LanguageVariant>,
    items: &[ContentItem],
) -> Vec<LanguageVariant> {
    let ids: HashSet<&str> = items.iter().map(|i| i.system.id.as_str()).collect();
    let codenames: HashSet<&str> = items.iter().map(|i| i.codename()).collect();

    variants
        .filter(|v| {
            v.item.id_str().is_some_and(|id| ids.contains(id))
                || v.item.codename_str().is_some_and(|c| codenames.contains(c))
        })
        .collect()
}
