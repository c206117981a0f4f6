//! Remote API abstraction traits.
//!
//! The pipeline only talks to these traits; `DeliveryClient`,
//! `ManagementClient` and `HttpAssetSource` are the HTTP implementations.

use crate::error::ClientResult;
use async_trait::async_trait;
use kcport_types::{
    Asset, ContentItem, ContentType, LanguageVariant, Page, Taxonomy, VariantElement,
};

/// Read-only content delivery API of one project.
#[async_trait]
pub trait DeliveryApi: Send + Sync {
    /// Project the client reads from.
    fn project_id(&self) -> &str;

    /// Lists one page of content types.
    async fn list_content_types(&self, continuation: Option<&str>)
        -> ClientResult<Page<ContentType>>;

    /// Lists one page of content items in `language` (the project's default
    /// language when `None`). Items carry their element values.
    async fn list_content_items(
        &self,
        language: Option<&str>,
        continuation: Option<&str>,
    ) -> ClientResult<Page<ContentItem>>;

    /// Lists one page of taxonomy groups.
    async fn list_taxonomies(&self, continuation: Option<&str>) -> ClientResult<Page<Taxonomy>>;
}

/// Read/write content management API of one project.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Project the client reads from and writes to.
    fn project_id(&self) -> &str;

    async fn list_assets(&self, continuation: Option<&str>) -> ClientResult<Page<Asset>>;

    /// Lists one page of content items. Items carry only their system record,
    /// with `type_id` set and no language.
    async fn list_content_items(&self, continuation: Option<&str>)
        -> ClientResult<Page<ContentItem>>;

    async fn list_taxonomies(&self, continuation: Option<&str>) -> ClientResult<Page<Taxonomy>>;

    async fn list_content_types(&self, continuation: Option<&str>)
        -> ClientResult<Page<ContentType>>;

    /// Lists one page of the language variants of items based on a content type.
    async fn list_language_variants(
        &self,
        type_codename: &str,
        continuation: Option<&str>,
    ) -> ClientResult<Page<LanguageVariant>>;

    async fn create_content_type(&self, content_type: &ContentType) -> ClientResult<ContentType>;

    async fn create_taxonomy(&self, taxonomy: &Taxonomy) -> ClientResult<Taxonomy>;

    /// Creates a bare content item; the codename is assigned by the target.
    async fn create_content_item(&self, name: &str, type_codename: &str)
        -> ClientResult<ContentItem>;

    async fn upsert_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
        elements: &[VariantElement],
    ) -> ClientResult<LanguageVariant>;

    async fn publish_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
    ) -> ClientResult<()>;

    async fn delete_content_item(&self, codename: &str) -> ClientResult<()>;

    async fn delete_asset(&self, id: &str) -> ClientResult<()>;

    async fn delete_taxonomy(&self, codename: &str) -> ClientResult<()>;

    async fn delete_content_type(&self, codename: &str) -> ClientResult<()>;
}

/// Source of binary payloads addressed by URL (asset binaries, packages).
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch_binary(&self, url: &str) -> ClientResult<Vec<u8>>;
}
