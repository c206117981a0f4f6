//! Shared HTTP plumbing for the API clients.

use crate::error::{ClientError, ClientResult};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// Header carrying the continuation token of paginated listings.
pub(crate) const CONTINUATION_HEADER: &str = "x-continuation";

/// Default transport timeout for remote calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub(crate) fn build_http_client(timeout_secs: u64) -> ClientResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(ClientError::Http)
}

/// Passes a success response through; turns anything else into
/// `ClientError::Api` carrying the remote message.
pub(crate) async fn ensure_success(response: Response, action: &str) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::api(action, status.as_u16(), &body))
}

pub(crate) fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// A listing response: one array of entities plus optional pagination.
///
/// The array's key differs per endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Listing<T> {
    #[serde(
        alias = "items",
        alias = "types",
        alias = "taxonomies",
        alias = "assets",
        alias = "variants"
    )]
    pub entries: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pagination {
    #[serde(default)]
    pub continuation_token: Option<String>,
}
