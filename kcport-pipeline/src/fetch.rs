//! Paginated fetching.
//!
//! [`fetch_all`] walks a continuation-token listing to the end. The fetchers
//! wrap it for each listing of the delivery and management APIs.

use kcport_client::{ClientResult, DeliveryApi, ManagementApi};
use kcport_types::{Asset, ContentItem, ContentType, LanguageVariant, Page, Taxonomy};
use std::future::Future;
use tracing::debug;

/// Collects every page of a listing into one `Vec`, in page order.
///
/// `fetch_page` is called with `None` first and then with the token of the
/// previous page until a page comes back without one. The first failing
/// page aborts the walk; pages gathered so far are dropped.
pub async fn fetch_all<T, F, Fut>(label: &str, mut fetch_page: F) -> ClientResult<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = ClientResult<Page<T>>>,
{
    let mut all = Vec::new();
    let mut continuation = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(continuation.take()).await?;
        pages += 1;
        all.extend(page.items);
        debug!("{}: page {} fetched, {} so far", label, pages, all.len());

        match page.continuation {
            Some(token) if !token.is_empty() => continuation = Some(token),
            _ => break,
        }
    }

    Ok(all)
}

/// Complete listings of the delivery API.
#[derive(Clone, Copy)]
pub struct DeliveryFetcher<'a> {
    api: &'a dyn DeliveryApi,
}

impl<'a> DeliveryFetcher<'a> {
    pub fn new(api: &'a dyn DeliveryApi) -> Self {
        Self { api }
    }

    pub async fn all_types(&self) -> ClientResult<Vec<ContentType>> {
        let api = self.api;
        fetch_all("content types", move |c| async move {
            api.list_content_types(c.as_deref()).await
        })
        .await
    }

    /// Items in `language`, or in the project's default language for `None`.
    pub async fn all_items(&self, language: Option<&str>) -> ClientResult<Vec<ContentItem>> {
        let api = self.api;
        fetch_all("content items", move |c| async move {
            api.list_content_items(language, c.as_deref()).await
        })
        .await
    }

    /// Items in each of `languages` in turn; the default language when empty.
    pub async fn all_items_in(&self, languages: &[String]) -> ClientResult<Vec<ContentItem>> {
        if languages.is_empty() {
            return self.all_items(None).await;
        }

        let mut items = Vec::new();
        for language in languages {
            items.extend(self.all_items(Some(language.as_str())).await?);
        }
        Ok(items)
    }

    pub async fn all_taxonomies(&self) -> ClientResult<Vec<Taxonomy>> {
        let api = self.api;
        fetch_all("taxonomies", move |c| async move {
            api.list_taxonomies(c.as_deref()).await
        })
        .await
    }
}

/// Complete listings of the management API.
#[derive(Clone, Copy)]
pub struct ManagementFetcher<'a> {
    api: &'a dyn ManagementApi,
}

impl<'a> ManagementFetcher<'a> {
    pub fn new(api: &'a dyn ManagementApi) -> Self {
        Self { api }
    }

    pub async fn all_types(&self) -> ClientResult<Vec<ContentType>> {
        let api = self.api;
        fetch_all("content types", move |c| async move {
            api.list_content_types(c.as_deref()).await
        })
        .await
    }

    /// Items as listed by the management API: no language, no element values.
    pub async fn all_items(&self) -> ClientResult<Vec<ContentItem>> {
        let api = self.api;
        fetch_all("content items", move |c| async move {
            api.list_content_items(c.as_deref()).await
        })
        .await
    }

    pub async fn all_taxonomies(&self) -> ClientResult<Vec<Taxonomy>> {
        let api = self.api;
        fetch_all("taxonomies", move |c| async move {
            api.list_taxonomies(c.as_deref()).await
        })
        .await
    }

    pub async fn all_assets(&self) -> ClientResult<Vec<Asset>> {
        let api = self.api;
        fetch_all("assets", move |c| async move { api.list_assets(c.as_deref()).await }).await
    }

    /// Language variants of every item of one content type.
    pub async fn language_variants_for(
        &self,
        type_codename: &str,
    ) -> ClientResult<Vec<LanguageVariant>> {
        let api = self.api;
        let label = format!("language variants of '{}'", type_codename);
        fetch_all(&label, move |c| async move {
            api.list_language_variants(type_codename, c.as_deref()).await
        })
        .await
    }
}
