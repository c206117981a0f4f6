//! Content management API client.
//!
//! Read/write, keyed by project id and authenticated with the project's
//! management API key. Listings send the continuation token in the
//! `x-continuation` header and return the next one in
//! `pagination.continuation_token`.

use crate::api::ManagementApi;
use crate::error::{ClientError, ClientResult};
use crate::http::{
    build_http_client, encode, ensure_success, Listing, CONTINUATION_HEADER,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kcport_types::{
    Asset, ChoiceOption, ContentItem, ContentType, ElementDefinition, ElementKind, ItemSystem,
    LanguageVariant, Page, Reference, Taxonomy, TaxonomySystem, TaxonomyTerm, TypeSystem,
    VariantElement,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Management API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ManagementConfig {
    pub project_id: String,
    /// Management API key of the project.
    pub api_key: String,
    /// Base URL of the management API (e.g. `https://manage.kontent.ai/v2`).
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: String::new(),
            api_base_url: "https://manage.kontent.ai/v2".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ManagementConfig {
    pub fn for_project(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}

impl fmt::Debug for ManagementConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagementConfig")
            .field("project_id", &self.project_id)
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

// ── Wire shapes ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ManagementContentType {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    codename: String,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    elements: Vec<ManagementElement>,
}

#[derive(Debug, Deserialize)]
struct ManagementElement {
    #[serde(default)]
    codename: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    element_type: ElementKind,
    #[serde(default)]
    options: Vec<ChoiceOption>,
    #[serde(default)]
    taxonomy_group: Option<Reference>,
}

impl From<ManagementContentType> for ContentType {
    fn from(t: ManagementContentType) -> Self {
        let elements = t
            .elements
            .into_iter()
            .map(|e| ElementDefinition {
                codename: e.codename.unwrap_or_default(),
                name: e.name,
                element_type: e.element_type,
                options: e.options,
                taxonomy_group: e.taxonomy_group,
            })
            .collect();

        ContentType {
            system: TypeSystem {
                id: t.id,
                name: t.name,
                codename: t.codename,
                last_modified: t.last_modified,
            },
            elements,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ManagementTaxonomy {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    codename: String,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    terms: Vec<TaxonomyTerm>,
}

impl From<ManagementTaxonomy> for Taxonomy {
    fn from(t: ManagementTaxonomy) -> Self {
        Taxonomy {
            system: TaxonomySystem {
                id: t.id,
                name: t.name,
                codename: t.codename,
                last_modified: t.last_modified,
            },
            terms: t.terms,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ManagementItem {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    codename: String,
    #[serde(rename = "type", default)]
    content_type: Reference,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
}

impl From<ManagementItem> for ContentItem {
    fn from(i: ManagementItem) -> Self {
        ContentItem {
            system: ItemSystem {
                id: i.id,
                name: i.name,
                codename: i.codename,
                language: String::new(),
                content_type: i.content_type.codename.unwrap_or_default(),
                type_id: i.content_type.id,
                last_modified: i.last_modified,
            },
            elements: Default::default(),
        }
    }
}

#[derive(Serialize)]
struct NewContentType<'a> {
    name: &'a str,
    codename: &'a str,
    elements: Vec<NewElement<'a>>,
}

#[derive(Serialize)]
struct NewElement<'a> {
    name: &'a str,
    codename: &'a str,
    #[serde(rename = "type")]
    element_type: ElementKind,
    #[serde(skip_serializing_if = "no_options")]
    options: &'a [ChoiceOption],
    #[serde(skip_serializing_if = "Option::is_none")]
    taxonomy_group: Option<Reference>,
}

impl<'a> From<&'a ContentType> for NewContentType<'a> {
    fn from(t: &'a ContentType) -> Self {
        NewContentType {
            name: display_name(&t.system.name, &t.system.codename),
            codename: &t.system.codename,
            elements: t
                .elements
                .iter()
                .filter(|e| creatable(&t.system.codename, e))
                .map(|e| NewElement {
                    name: display_name(&e.name, &e.codename),
                    codename: &e.codename,
                    element_type: e.element_type,
                    options: &e.options,
                    taxonomy_group: e.taxonomy_group.as_ref().map(group_reference),
                })
                .collect(),
        }
    }
}

/// Elements without a codename (guidelines) or of an unsupported kind cannot
/// be recreated and are left out of the new type.
fn creatable(type_codename: &str, element: &ElementDefinition) -> bool {
    if element.codename.is_empty() {
        warn!(
            "Skipping {} element without codename in content type '{}'",
            element.element_type, type_codename
        );
        return false;
    }
    if element.element_type == ElementKind::Unknown {
        warn!(
            "Skipping element '{}' of unsupported type in content type '{}'",
            element.codename, type_codename
        );
        return false;
    }
    true
}

/// Ids differ between projects, so a group is sent by codename when known.
fn group_reference(group: &Reference) -> Reference {
    match group.codename_str() {
        Some(codename) => Reference::codename(codename),
        None => group.clone(),
    }
}

#[derive(Serialize)]
struct NewTaxonomy<'a> {
    name: &'a str,
    codename: &'a str,
    terms: &'a [TaxonomyTerm],
}

#[derive(Serialize)]
struct NewContentItem<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    content_type: Reference,
}

#[derive(Serialize)]
struct VariantUpsert<'a> {
    elements: &'a [VariantElement],
}

fn no_options(options: &&[ChoiceOption]) -> bool {
    options.is_empty()
}

fn display_name<'a>(name: &'a str, codename: &'a str) -> &'a str {
    if name.is_empty() { codename } else { name }
}

// ── Client ──────────────────────────────────────────────────────

/// HTTP client for the management API.
pub struct ManagementClient {
    config: ManagementConfig,
    client: Client,
}

impl ManagementClient {
    pub fn new(config: ManagementConfig) -> ClientResult<Self> {
        if config.api_key.is_empty() {
            return Err(ClientError::Config("management API key is empty".to_string()));
        }
        let client = build_http_client(config.request_timeout_secs)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ManagementConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/projects/{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.project_id,
            path
        );
        self.client
            .request(method, url)
            .bearer_auth(&self.config.api_key)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        action: &str,
        continuation: Option<&str>,
    ) -> ClientResult<Page<T>> {
        let mut request = self.request(Method::GET, path);
        if let Some(token) = continuation {
            request = request.header(CONTINUATION_HEADER, token);
        }

        let response = ensure_success(request.send().await?, action).await?;
        let listing: Listing<T> = response.json().await?;
        let next = listing.pagination.and_then(|p| p.continuation_token);
        debug!("{}: {} entries, more: {}", action, listing.entries.len(), next.is_some());

        Ok(Page::new(listing.entries, next))
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        action: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(method, path).json(body).send().await?;
        let response = ensure_success(response, action).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, method: Method, path: &str, action: &str) -> ClientResult<()> {
        let response = self.request(method, path).send().await?;
        ensure_success(response, action).await?;
        Ok(())
    }
}

#[async_trait]
impl ManagementApi for ManagementClient {
    fn project_id(&self) -> &str {
        &self.config.project_id
    }

    async fn list_assets(&self, continuation: Option<&str>) -> ClientResult<Page<Asset>> {
        self.get_page("assets", "list assets", continuation).await
    }

    async fn list_content_items(
        &self,
        continuation: Option<&str>,
    ) -> ClientResult<Page<ContentItem>> {
        let page: Page<ManagementItem> =
            self.get_page("items", "list content items", continuation).await?;
        Ok(Page {
            items: page.items.into_iter().map(ContentItem::from).collect(),
            continuation: page.continuation,
        })
    }

    async fn list_taxonomies(&self, continuation: Option<&str>) -> ClientResult<Page<Taxonomy>> {
        let page: Page<ManagementTaxonomy> =
            self.get_page("taxonomies", "list taxonomies", continuation).await?;
        Ok(Page {
            items: page.items.into_iter().map(Taxonomy::from).collect(),
            continuation: page.continuation,
        })
    }

    async fn list_content_types(
        &self,
        continuation: Option<&str>,
    ) -> ClientResult<Page<ContentType>> {
        let page: Page<ManagementContentType> =
            self.get_page("types", "list content types", continuation).await?;
        Ok(Page {
            items: page.items.into_iter().map(ContentType::from).collect(),
            continuation: page.continuation,
        })
    }

    async fn list_language_variants(
        &self,
        type_codename: &str,
        continuation: Option<&str>,
    ) -> ClientResult<Page<LanguageVariant>> {
        let path = format!("types/codename/{}/variants", encode(type_codename));
        self.get_page(&path, "list language variants", continuation).await
    }

    async fn create_content_type(&self, content_type: &ContentType) -> ClientResult<ContentType> {
        let body = NewContentType::from(content_type);
        let created: ManagementContentType = self
            .send_json(Method::POST, "types", "create content type", &body)
            .await?;
        Ok(created.into())
    }

    async fn create_taxonomy(&self, taxonomy: &Taxonomy) -> ClientResult<Taxonomy> {
        let body = NewTaxonomy {
            name: display_name(&taxonomy.system.name, &taxonomy.system.codename),
            codename: &taxonomy.system.codename,
            terms: &taxonomy.terms,
        };
        let created: ManagementTaxonomy = self
            .send_json(Method::POST, "taxonomies", "create taxonomy", &body)
            .await?;
        Ok(created.into())
    }

    async fn create_content_item(
        &self,
        name: &str,
        type_codename: &str,
    ) -> ClientResult<ContentItem> {
        let body = NewContentItem {
            name,
            content_type: Reference::codename(type_codename),
        };
        let created: ManagementItem = self
            .send_json(Method::POST, "items", "create content item", &body)
            .await?;

        let mut item = ContentItem::from(created);
        if item.system.content_type.is_empty() {
            item.system.content_type = type_codename.to_string();
        }
        Ok(item)
    }

    async fn upsert_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
        elements: &[VariantElement],
    ) -> ClientResult<LanguageVariant> {
        let path = format!(
            "items/codename/{}/variants/codename/{}",
            encode(item_codename),
            encode(language_codename)
        );
        self.send_json(
            Method::PUT,
            &path,
            "upsert language variant",
            &VariantUpsert { elements },
        )
        .await
    }

    async fn publish_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
    ) -> ClientResult<()> {
        let path = format!(
            "items/codename/{}/variants/codename/{}/publish",
            encode(item_codename),
            encode(language_codename)
        );
        self.send_empty(Method::PUT, &path, "publish language variant").await
    }

    async fn delete_content_item(&self, codename: &str) -> ClientResult<()> {
        let path = format!("items/codename/{}", encode(codename));
        self.send_empty(Method::DELETE, &path, "delete content item").await
    }

    async fn delete_asset(&self, id: &str) -> ClientResult<()> {
        let path = format!("assets/{}", encode(id));
        self.send_empty(Method::DELETE, &path, "delete asset").await
    }

    async fn delete_taxonomy(&self, codename: &str) -> ClientResult<()> {
        let path = format!("taxonomies/codename/{}", encode(codename));
        self.send_empty(Method::DELETE, &path, "delete taxonomy").await
    }

    async fn delete_content_type(&self, codename: &str) -> ClientResult<()> {
        let path = format!("types/codename/{}", encode(codename));
        self.send_empty(Method::DELETE, &path, "delete content type").await
    }
}
