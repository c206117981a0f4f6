//! Binary downloads by URL.

use crate::api::AssetSource;
use crate::error::ClientResult;
use crate::http::{build_http_client, ensure_success, DEFAULT_REQUEST_TIMEOUT_SECS};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Downloads asset binaries and packages over plain HTTP(S).
pub struct HttpAssetSource {
    client: Client,
}

impl HttpAssetSource {
    pub fn new() -> ClientResult<Self> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> ClientResult<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
        })
    }
}

#[async_trait]
impl AssetSource for HttpAssetSource {
    async fn fetch_binary(&self, url: &str) -> ClientResult<Vec<u8>> {
        debug!("Downloading {}", url);

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response, "download binary").await?;
        let bytes = response.bytes().await?;

        Ok(bytes.to_vec())
    }
}
