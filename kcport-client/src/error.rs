//! Client error types.

use thiserror::Error;

/// Result type for remote API operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur when talking to the remote APIs.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote service rejected the request. `message` is the service's
    /// own explanation, kept verbatim.
    #[error("{action} failed ({status}): {message}")]
    Api {
        action: String,
        status: u16,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Builds an API error from a non-success response body.
    ///
    /// Error bodies carry a `message` field; when the body is not JSON or has
    /// no message, the raw body is used.
    pub fn api(action: &str, status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        ClientError::Api {
            action: action.to_string(),
            status,
            message,
        }
    }

    /// Returns the HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this error represents a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
