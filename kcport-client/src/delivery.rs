//! Content delivery API client.
//!
//! Read-only, keyed by project id. Listings are paginated through the
//! `x-continuation` header: the token returned by one response is sent with
//! the request for the next page.

use crate::api::DeliveryApi;
use crate::error::ClientResult;
use crate::http::{
    build_http_client, ensure_success, Listing, CONTINUATION_HEADER, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use async_trait::async_trait;
use kcport_types::{
    ChoiceOption, ContentItem, ContentType, ElementDefinition, ElementKind, Page, Reference,
    Taxonomy, TypeSystem,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Delivery API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    pub project_id: String,
    /// Base URL of the delivery API (e.g. `https://deliver.kontent.ai`).
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_base_url: "https://deliver.kontent.ai".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl DeliveryConfig {
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

/// Content type as served by the delivery API: elements keyed by codename.
#[derive(Debug, Deserialize)]
struct DeliveryContentType {
    system: TypeSystem,
    #[serde(default)]
    elements: BTreeMap<String, DeliveryElement>,
}

#[derive(Debug, Deserialize)]
struct DeliveryElement {
    #[serde(rename = "type")]
    element_type: ElementKind,
    #[serde(default)]
    name: String,
    #[serde(default)]
    options: Vec<ChoiceOption>,
    #[serde(default)]
    taxonomy_group: Option<String>,
}

impl From<DeliveryContentType> for ContentType {
    fn from(t: DeliveryContentType) -> Self {
        let elements = t
            .elements
            .into_iter()
            .map(|(codename, e)| ElementDefinition {
                codename,
                name: e.name,
                element_type: e.element_type,
                options: e.options,
                taxonomy_group: e.taxonomy_group.map(Reference::codename),
            })
            .collect();

        ContentType {
            system: t.system,
            elements,
        }
    }
}

/// HTTP client for the delivery API.
pub struct DeliveryClient {
    config: DeliveryConfig,
    client: Client,
}

impl DeliveryClient {
    pub fn new(config: DeliveryConfig) -> ClientResult<Self> {
        let client = build_http_client(config.request_timeout_secs)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.project_id,
            path
        )
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
        continuation: Option<&str>,
    ) -> ClientResult<Page<T>> {
        let request = match continuation {
            Some(token) => request.header(CONTINUATION_HEADER, token),
            None => request,
        };

        let response = ensure_success(request.send().await?, action).await?;
        let next = response
            .headers()
            .get(CONTINUATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let listing: Listing<T> = response.json().await?;
        debug!("{}: {} entries, more: {}", action, listing.entries.len(), next.is_some());

        Ok(Page::new(listing.entries, next))
    }
}

#[async_trait]
impl DeliveryApi for DeliveryClient {
    fn project_id(&self) -> &str {
        &self.config.project_id
    }

    async fn list_content_types(
        &self,
        continuation: Option<&str>,
    ) -> ClientResult<Page<ContentType>> {
        let request = self.client.get(self.url("types"));
        let page: Page<DeliveryContentType> =
            self.get_page(request, "list content types", continuation).await?;

        Ok(Page {
            items: page.items.into_iter().map(ContentType::from).collect(),
            continuation: page.continuation,
        })
    }

    async fn list_content_items(
        &self,
        language: Option<&str>,
        continuation: Option<&str>,
    ) -> ClientResult<Page<ContentItem>> {
        let mut request = self.client.get(self.url("items-feed"));
        if let Some(language) = language {
            request = request.query(&[("language", language)]);
        }
        self.get_page(request, "list content items", continuation).await
    }

    async fn list_taxonomies(&self, continuation: Option<&str>) -> ClientResult<Page<Taxonomy>> {
        let request = self.client.get(self.url("taxonomies"));
        self.get_page(request, "list taxonomies", continuation).await
    }
}
