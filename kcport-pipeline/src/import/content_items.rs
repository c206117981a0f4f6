//! Content item stage: bare items first, then their language variants.

use crate::error::{PipelineError, PipelineResult, Stage};
use crate::import::elements::{ElementKindMap, map_elements};
use crate::progress::ProgressReporter;
use futures::future::try_join_all;
use kcport_client::{ClientError, ManagementApi};
use kcport_types::{
    ContentBundle, ContentItem, LanguageVariant, ProcessedItem, ProcessedKind,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Items and variants created by the content item stage.
#[derive(Debug, Clone, Default)]
pub struct ImportedItems {
    pub content_items: Vec<ContentItem>,
    pub language_variants: Vec<LanguageVariant>,
}

/// Creates content items and upserts their language variants.
pub struct ContentItemsImporter<'a> {
    target: &'a dyn ManagementApi,
    progress: &'a dyn ProgressReporter,
}

impl<'a> ContentItemsImporter<'a> {
    pub fn new(target: &'a dyn ManagementApi, progress: &'a dyn ProgressReporter) -> Self {
        Self { target, progress }
    }

    /// Imports every item of `bundle` concurrently.
    ///
    /// Each item is created from its name and type, then its variant is
    /// upserted under the codename the target assigned. Items without a
    /// language are created without a variant. Returned items carry the
    /// target codename and the language they were imported in.
    pub async fn import(&self, bundle: &ContentBundle) -> PipelineResult<ImportedItems> {
        let kinds: HashMap<&str, ElementKindMap> = bundle
            .content_types
            .iter()
            .map(|t| (t.codename(), ElementKindMap::from_type(t)))
            .collect();

        let results = try_join_all(
            bundle
                .content_items
                .iter()
                .map(|item| self.import_item(item, kinds.get(item.content_type()))),
        )
        .await
        .map_err(PipelineError::stage(Stage::ContentItems))?;

        let mut imported = ImportedItems::default();
        for (item, variant) in results {
            imported.content_items.push(item);
            imported.language_variants.extend(variant);
        }

        info!(
            "Imported {} content items, {} language variants",
            imported.content_items.len(),
            imported.language_variants.len()
        );
        Ok(imported)
    }

    async fn import_item(
        &self,
        item: &ContentItem,
        kinds: Option<&ElementKindMap>,
    ) -> Result<(ContentItem, Option<LanguageVariant>), ClientError> {
        let name = if item.system.name.is_empty() {
            item.codename()
        } else {
            item.system.name.as_str()
        };
        let mut created = self
            .target
            .create_content_item(name, item.content_type())
            .await?;
        created.system.language = item.language().to_string();
        let codename = created.codename().to_string();
        debug!("Created content item '{}' from '{}'", codename, item.codename());
        self.progress.process_item(&ProcessedItem::imported(
            ProcessedKind::ContentItem,
            codename.as_str(),
        ));

        if !item.has_language() {
            warn!(
                "Content item '{}' has no language; language variant skipped",
                item.codename()
            );
            return Ok((created, None));
        }

        let elements = map_elements(item, kinds);
        let variant = self
            .target
            .upsert_language_variant(&codename, item.language(), &elements)
            .await?;
        self.progress.process_item(&ProcessedItem::imported(
            ProcessedKind::LanguageVariant,
            format!("{} [{}]", codename, item.language()),
        ));

        Ok((created, Some(variant)))
    }
}
