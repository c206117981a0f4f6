//! In-memory stand-ins for the remote services.
#![allow(dead_code)]

use async_trait::async_trait;
use kcport_client::{AssetSource, ClientError, ClientResult, DeliveryApi, ManagementApi};
use kcport_types::{
    Asset, ChoiceOption, ContentItem, ContentType, ElementDefinition, ElementKind, ItemElement,
    ItemSystem, LanguageVariant, Page, Reference, Taxonomy, TaxonomySystem, TaxonomyTerm,
    TypeSystem, VariantElement,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

fn page<T: Clone>(all: &[T], continuation: Option<&str>, size: usize) -> Page<T> {
    let start = continuation
        .map(|c| c.parse::<usize>().expect("numeric token"))
        .unwrap_or(0);
    let end = (start + size).min(all.len());
    let next = (end < all.len()).then(|| end.to_string());
    Page::new(all[start..end].to_vec(), next)
}

fn rejected(action: &str, status: u16, message: &str) -> ClientError {
    ClientError::Api {
        action: action.to_string(),
        status,
        message: message.to_string(),
    }
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

// ── Target project ──────────────────────────────────────────────

#[derive(Default)]
pub struct TargetState {
    pub content_types: Vec<ContentType>,
    pub taxonomies: Vec<Taxonomy>,
    pub content_items: Vec<ContentItem>,
    pub assets: Vec<Asset>,
    /// Variants keyed by the codename of their item's content type.
    pub variants: Vec<(String, LanguageVariant)>,
    pub published: Vec<(String, String)>,
    next_id: usize,
}

impl TargetState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// Management API over in-memory state. Records every call in order.
///
/// Deletes take `delete_latency` and are recorded again in `settled` once
/// they complete.
pub struct FakeTarget {
    project_id: String,
    page_size: usize,
    delete_latency: Option<Duration>,
    pub state: Mutex<TargetState>,
    calls: Mutex<Vec<(String, Instant)>>,
    settled: Mutex<Vec<(String, Instant)>>,
    fail_on: Mutex<Option<String>>,
}

impl FakeTarget {
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            page_size: 2,
            delete_latency: None,
            state: Mutex::new(TargetState::default()),
            calls: Mutex::new(Vec::new()),
            settled: Mutex::new(Vec::new()),
            fail_on: Mutex::new(None),
        }
    }

    pub fn with_delete_latency(mut self, latency: Duration) -> Self {
        self.delete_latency = Some(latency);
        self
    }

    /// Makes every call starting with `prefix` fail with a 400.
    pub fn fail_on(&self, prefix: &str) {
        *self.fail_on.lock().unwrap() = Some(prefix.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn timed_calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose name starts with `prefix`.
    pub fn calls_of(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    /// Completed deletes with the time they completed.
    pub fn settled_calls(&self) -> Vec<(String, Instant)> {
        self.settled.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: String) -> ClientResult<()> {
        let fail = self
            .fail_on
            .lock()
            .unwrap()
            .as_deref()
            .is_some_and(|p| call.starts_with(p));
        self.calls.lock().unwrap().push((call.clone(), Instant::now()));
        if fail {
            return Err(rejected(&call, 400, "The provided request body is invalid."));
        }
        Ok(())
    }

    async fn wait_delete_latency(&self) {
        if let Some(latency) = self.delete_latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn settle(&self, call: String) {
        self.settled.lock().unwrap().push((call, Instant::now()));
    }

    pub fn seed_type(&self, content_type: ContentType) {
        self.state.lock().unwrap().content_types.push(content_type);
    }

    pub fn seed_taxonomy(&self, taxonomy: Taxonomy) {
        self.state.lock().unwrap().taxonomies.push(taxonomy);
    }

    pub fn seed_item(&self, item: ContentItem) {
        self.state.lock().unwrap().content_items.push(item);
    }

    pub fn seed_asset(&self, asset: Asset) {
        self.state.lock().unwrap().assets.push(asset);
    }

    pub fn seed_variant(&self, type_codename: &str, variant: LanguageVariant) {
        self.state
            .lock()
            .unwrap()
            .variants
            .push((type_codename.to_string(), variant));
    }

    pub fn item_codenames(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .content_items
            .iter()
            .map(|i| i.codename().to_string())
            .collect()
    }
}

#[async_trait]
impl ManagementApi for FakeTarget {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn list_assets(&self, continuation: Option<&str>) -> ClientResult<Page<Asset>> {
        self.record(format!("list_assets:{}", continuation.unwrap_or("")))?;
        let state = self.state.lock().unwrap();
        Ok(page(&state.assets, continuation, self.page_size))
    }

    async fn list_content_items(
        &self,
        continuation: Option<&str>,
    ) -> ClientResult<Page<ContentItem>> {
        self.record(format!("list_items:{}", continuation.unwrap_or("")))?;
        let state = self.state.lock().unwrap();
        Ok(page(&state.content_items, continuation, self.page_size))
    }

    async fn list_taxonomies(&self, continuation: Option<&str>) -> ClientResult<Page<Taxonomy>> {
        self.record(format!("list_taxonomies:{}", continuation.unwrap_or("")))?;
        let state = self.state.lock().unwrap();
        Ok(page(&state.taxonomies, continuation, self.page_size))
    }

    async fn list_content_types(
        &self,
        continuation: Option<&str>,
    ) -> ClientResult<Page<ContentType>> {
        self.record(format!("list_types:{}", continuation.unwrap_or("")))?;
        let state = self.state.lock().unwrap();
        Ok(page(&state.content_types, continuation, self.page_size))
    }

    async fn list_language_variants(
        &self,
        type_codename: &str,
        continuation: Option<&str>,
    ) -> ClientResult<Page<LanguageVariant>> {
        self.record(format!(
            "list_variants:{}:{}",
            type_codename,
            continuation.unwrap_or("")
        ))?;
        let state = self.state.lock().unwrap();
        let variants: Vec<LanguageVariant> = state
            .variants
            .iter()
            .filter(|(t, _)| t == type_codename)
            .map(|(_, v)| v.clone())
            .collect();
        Ok(page(&variants, continuation, self.page_size))
    }

    async fn create_content_type(&self, content_type: &ContentType) -> ClientResult<ContentType> {
        self.record(format!("create_type:{}", content_type.codename()))?;
        let mut state = self.state.lock().unwrap();
        if state
            .content_types
            .iter()
            .any(|t| t.codename() == content_type.codename())
        {
            return Err(rejected(
                "create content type",
                400,
                "The specified codename is already in use.",
            ));
        }
        let mut created = content_type.clone();
        created.system.id = state.next_id("type");
        state.content_types.push(created.clone());
        Ok(created)
    }

    async fn create_taxonomy(&self, taxonomy: &Taxonomy) -> ClientResult<Taxonomy> {
        self.record(format!("create_taxonomy:{}", taxonomy.codename()))?;
        let mut state = self.state.lock().unwrap();
        let mut created = taxonomy.clone();
        created.system.id = state.next_id("taxonomy");
        state.taxonomies.push(created.clone());
        Ok(created)
    }

    async fn create_content_item(
        &self,
        name: &str,
        type_codename: &str,
    ) -> ClientResult<ContentItem> {
        self.record(format!("create_item:{}", name))?;
        let mut state = self.state.lock().unwrap();
        if !state
            .content_types
            .iter()
            .any(|t| t.codename() == type_codename)
        {
            return Err(rejected(
                "create content item",
                400,
                &format!("Content type '{}' does not exist.", type_codename),
            ));
        }

        let base = slug(name);
        let mut codename = base.clone();
        let mut n = 1;
        while state.content_items.iter().any(|i| i.codename() == codename) {
            n += 1;
            codename = format!("{}_{}", base, n);
        }

        let created = ContentItem {
            system: ItemSystem {
                id: state.next_id("item"),
                name: name.to_string(),
                codename,
                content_type: type_codename.to_string(),
                ..Default::default()
            },
            elements: Default::default(),
        };
        state.content_items.push(created.clone());
        Ok(created)
    }

    async fn upsert_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
        elements: &[VariantElement],
    ) -> ClientResult<LanguageVariant> {
        self.record(format!("upsert:{}:{}", item_codename, language_codename))?;
        let mut state = self.state.lock().unwrap();
        let Some(item) = state
            .content_items
            .iter()
            .find(|i| i.codename() == item_codename)
            .cloned()
        else {
            return Err(rejected("upsert language variant", 404, "Item not found."));
        };

        let variant = LanguageVariant {
            item: Reference {
                id: Some(item.system.id.clone()),
                codename: Some(item.codename().to_string()),
                external_id: None,
            },
            language: Reference::codename(language_codename),
            elements: elements.to_vec(),
            last_modified: None,
        };
        state
            .variants
            .push((item.content_type().to_string(), variant.clone()));
        Ok(variant)
    }

    async fn publish_language_variant(
        &self,
        item_codename: &str,
        language_codename: &str,
    ) -> ClientResult<()> {
        self.record(format!("publish:{}:{}", item_codename, language_codename))?;
        let mut state = self.state.lock().unwrap();
        let exists = state.variants.iter().any(|(_, v)| {
            v.item.codename_str() == Some(item_codename)
                && v.language.codename_str() == Some(language_codename)
        });
        if !exists {
            return Err(rejected("publish language variant", 404, "Variant not found."));
        }
        state
            .published
            .push((item_codename.to_string(), language_codename.to_string()));
        Ok(())
    }

    async fn delete_content_item(&self, codename: &str) -> ClientResult<()> {
        let call = format!("delete_item:{}", codename);
        self.record(call.clone())?;
        self.wait_delete_latency().await;
        {
            let mut state = self.state.lock().unwrap();
            let before = state.content_items.len();
            state.content_items.retain(|i| i.codename() != codename);
            if state.content_items.len() == before {
                return Err(rejected("delete content item", 404, "Item not found."));
            }
        }
        self.settle(call);
        Ok(())
    }

    async fn delete_asset(&self, id: &str) -> ClientResult<()> {
        let call = format!("delete_asset:{}", id);
        self.record(call.clone())?;
        self.wait_delete_latency().await;
        self.state.lock().unwrap().assets.retain(|a| a.id != id);
        self.settle(call);
        Ok(())
    }

    async fn delete_taxonomy(&self, codename: &str) -> ClientResult<()> {
        let call = format!("delete_taxonomy:{}", codename);
        self.record(call.clone())?;
        self.wait_delete_latency().await;
        self.state
            .lock()
            .unwrap()
            .taxonomies
            .retain(|t| t.codename() != codename);
        self.settle(call);
        Ok(())
    }

    async fn delete_content_type(&self, codename: &str) -> ClientResult<()> {
        let call = format!("delete_type:{}", codename);
        self.record(call.clone())?;
        self.wait_delete_latency().await;
        self.state
            .lock()
            .unwrap()
            .content_types
            .retain(|t| t.codename() != codename);
        self.settle(call);
        Ok(())
    }
}

// ── Source project (delivery) ───────────────────────────────────

/// Delivery API over fixed content. Items without a requested language are
/// served in `default_language`.
pub struct FakeSource {
    project_id: String,
    default_language: String,
    page_size: usize,
    pub content_types: Vec<ContentType>,
    pub content_items: Vec<ContentItem>,
    pub taxonomies: Vec<Taxonomy>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            default_language: "en-US".to_string(),
            page_size: 2,
            content_types: Vec::new(),
            content_items: Vec::new(),
            taxonomies: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryApi for FakeSource {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    async fn list_content_types(
        &self,
        continuation: Option<&str>,
    ) -> ClientResult<Page<ContentType>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("types:{}", continuation.unwrap_or("")));
        Ok(page(&self.content_types, continuation, self.page_size))
    }

    async fn list_content_items(
        &self,
        language: Option<&str>,
        continuation: Option<&str>,
    ) -> ClientResult<Page<ContentItem>> {
        let language = language.unwrap_or(self.default_language.as_str());
        self.calls.lock().unwrap().push(format!(
            "items:{}:{}",
            language,
            continuation.unwrap_or("")
        ));
        let items: Vec<ContentItem> = self
            .content_items
            .iter()
            .filter(|i| i.language() == language)
            .cloned()
            .collect();
        Ok(page(&items, continuation, self.page_size))
    }

    async fn list_taxonomies(&self, continuation: Option<&str>) -> ClientResult<Page<Taxonomy>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("taxonomies:{}", continuation.unwrap_or("")));
        Ok(page(&self.taxonomies, continuation, self.page_size))
    }
}

// ── Asset downloads ─────────────────────────────────────────────

#[derive(Default)]
pub struct FakeAssets {
    files: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
}

impl FakeAssets {
    pub fn with(mut self, url: &str, data: &[u8]) -> Self {
        self.files.insert(url.to_string(), data.to_vec());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetSource for FakeAssets {
    async fn fetch_binary(&self, url: &str) -> ClientResult<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| rejected("download binary", 404, "not found"))
    }
}

// ── Fixtures ────────────────────────────────────────────────────

pub const BEANS_URL: &str = "https://assets.example/source/a1/beans.jpg";

pub fn article_type() -> ContentType {
    let mut category = ElementDefinition::new("category", "Category", ElementKind::MultipleChoice);
    category.options = vec![
        ChoiceOption {
            name: "News".into(),
            codename: "news".into(),
        },
        ChoiceOption {
            name: "Review".into(),
            codename: "review".into(),
        },
    ];
    let mut tags = ElementDefinition::new("tags", "Tags", ElementKind::Taxonomy);
    tags.taxonomy_group = Some(Reference::codename("regions"));

    ContentType {
        system: TypeSystem {
            id: "source-t1".into(),
            name: "Article".into(),
            codename: "article".into(),
            last_modified: None,
        },
        elements: vec![
            ElementDefinition::new("title", "Title", ElementKind::Text),
            ElementDefinition::new("related", "Related", ElementKind::ModularContent),
            category,
            ElementDefinition::new("teaser", "Teaser", ElementKind::Asset),
            tags,
        ],
    }
}

pub fn regions_taxonomy() -> Taxonomy {
    Taxonomy {
        system: TaxonomySystem {
            id: "source-g1".into(),
            name: "Regions".into(),
            codename: "regions".into(),
            last_modified: None,
        },
        terms: vec![TaxonomyTerm {
            name: "Europe".into(),
            codename: "europe".into(),
            terms: vec![],
        }],
    }
}

pub fn article(codename: &str, name: &str, language: &str, related: &[&str]) -> ContentItem {
    let mut elements = std::collections::BTreeMap::new();
    elements.insert(
        "title".to_string(),
        ItemElement::new(ElementKind::Text, json!(name)),
    );
    elements.insert(
        "related".to_string(),
        ItemElement::new(ElementKind::ModularContent, json!(related)),
    );
    elements.insert(
        "category".to_string(),
        ItemElement::new(
            ElementKind::MultipleChoice,
            json!([{"name": "News", "codename": "news"}]),
        ),
    );
    elements.insert(
        "teaser".to_string(),
        ItemElement::new(
            ElementKind::Asset,
            json!([{
                "name": "beans.jpg",
                "type": "image/jpeg",
                "size": 4,
                "description": "Beans",
                "url": BEANS_URL
            }]),
        ),
    );
    elements.insert(
        "tags".to_string(),
        ItemElement::new(ElementKind::Taxonomy, json!([{"codename": "europe"}])),
    );

    ContentItem {
        system: ItemSystem {
            id: format!("source-{}", codename),
            name: name.to_string(),
            codename: codename.to_string(),
            language: language.to_string(),
            content_type: "article".to_string(),
            ..Default::default()
        },
        elements,
    }
}

/// A source project with one type, one taxonomy and three articles: two in
/// en-US, one in es-ES.
pub fn sample_source() -> FakeSource {
    let mut source = FakeSource::new("source");
    source.content_types = vec![article_type()];
    source.taxonomies = vec![regions_taxonomy()];
    source.content_items = vec![
        article("coffee", "Coffee", "en-US", &["tea"]),
        article("tea", "Tea", "en-US", &[]),
        article("cafe", "Cafe", "es-ES", &[]),
    ];
    source
}

fn management_item(n: usize, type_id: &str) -> ContentItem {
    ContentItem {
        system: ItemSystem {
            id: format!("i{}", n),
            name: format!("Item {}", n),
            codename: format!("item_{}", n),
            type_id: Some(type_id.to_string()),
            ..Default::default()
        },
        elements: Default::default(),
    }
}

fn management_variant(item_id: &str) -> LanguageVariant {
    LanguageVariant {
        item: Reference::id(item_id),
        language: Reference::id("l1"),
        elements: vec![VariantElement {
            element: Reference::id("e1"),
            value: json!("text"),
        }],
        last_modified: None,
    }
}

/// A project as the management API lists it: five items referencing their
/// type by id, the taxonomy group referenced by id, one variant per item plus
/// one of a deleted item, and one asset.
pub fn management_source() -> FakeTarget {
    let mut content_type = article_type();
    for element in content_type.elements.iter_mut() {
        if element.taxonomy_group.is_some() {
            element.taxonomy_group = Some(Reference::id("source-g1"));
        }
    }

    let source = FakeTarget::new("source");
    source.seed_type(content_type);
    source.seed_taxonomy(regions_taxonomy());
    for n in 1..=5 {
        source.seed_item(management_item(n, "source-t1"));
        source.seed_variant("article", management_variant(&format!("i{}", n)));
    }
    source.seed_variant("article", management_variant("deleted-item"));
    source.seed_asset(Asset {
        id: "a1".into(),
        file_name: "beans.jpg".into(),
        title: None,
        size: 4,
        mime_type: "image/jpeg".into(),
        url: BEANS_URL.into(),
    });
    source
}
