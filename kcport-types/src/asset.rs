use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A binary asset of a project.
///
/// Only the metadata travels in `assets.json`; the binary is fetched from
/// `url` when an archive is packaged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(alias = "delivery_url", default)]
    pub url: String,
}

impl Asset {
    /// Builds an asset from a delivery URL of the form
    /// `https://host/<project id>/<asset id>/<file name>`.
    ///
    /// The asset id and file name are the last two path segments; query
    /// strings and fragments are ignored.
    pub fn from_delivery_url(url: &str, mime_type: &str, size: u64) -> Result<Self> {
        let without_scheme = url
            .split_once("://")
            .map(|(_, rest)| rest)
            .ok_or_else(|| Error::InvalidAssetUrl(url.to_string()))?;
        let path = without_scheme
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        // host, project id, asset id, file name
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 3 {
            return Err(Error::InvalidAssetUrl(url.to_string()));
        }
        let file_name = segments[segments.len() - 1];
        let id = segments[segments.len() - 2];

        Ok(Self {
            id: id.to_string(),
            file_name: file_name.to_string(),
            title: None,
            size,
            mime_type: mime_type.to_string(),
            url: url.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_url_yields_id_and_file_name() {
        let asset = Asset::from_delivery_url(
            "https://assets-us-01.kc-usercontent.com/p1/a7c1/coffee.jpg?w=300",
            "image/jpeg",
            42,
        )
        .unwrap();
        assert_eq!(asset.id, "a7c1");
        assert_eq!(asset.file_name, "coffee.jpg");
        assert_eq!(asset.size, 42);
    }

    #[test]
    fn short_url_is_rejected() {
        assert!(Asset::from_delivery_url("https://host/file.png", "image/png", 1).is_err());
        assert!(Asset::from_delivery_url("not a url", "image/png", 1).is_err());
    }
}
