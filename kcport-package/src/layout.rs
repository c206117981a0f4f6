//! Entry names inside an export archive.

use serde::{Deserialize, Serialize};

/// Names of the entries an export archive is made of.
///
/// Readers and writers must agree on the layout; the default matches the
/// archives produced by earlier exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveLayout {
    pub content_types: String,
    pub content_items: String,
    pub taxonomies: String,
    pub assets: String,
    pub language_variants: String,
    /// Folder holding asset binaries as `<folder>/<asset id>/<file name>`.
    pub assets_folder: String,
    /// Prefix of generated archive file names.
    pub package_prefix: String,
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self {
            content_types: "content-types.json".to_string(),
            content_items: "content-items.json".to_string(),
            taxonomies: "taxonomies.json".to_string(),
            assets: "assets.json".to_string(),
            language_variants: "language-variants.json".to_string(),
            assets_folder: "assets".to_string(),
            package_prefix: "kc-export-".to_string(),
        }
    }
}

impl ArchiveLayout {
    /// Entry name of an asset binary.
    pub fn asset_entry(&self, asset_id: &str, file_name: &str) -> String {
        format!("{}/{}/{}", self.assets_folder, asset_id, file_name)
    }

    /// Splits an asset entry name into `(asset id, file name)`.
    ///
    /// Returns `None` for entries outside the assets folder and for the
    /// folder entries themselves.
    pub fn parse_asset_entry<'a>(&self, entry: &'a str) -> Option<(&'a str, &'a str)> {
        let rest = entry
            .strip_prefix(self.assets_folder.as_str())?
            .strip_prefix('/')?;
        let (id, file_name) = rest.split_once('/')?;
        if id.is_empty() || file_name.is_empty() || file_name.ends_with('/') {
            return None;
        }
        Some((id, file_name))
    }

    /// File name of the archive exported from `project_id`.
    pub fn package_filename(&self, project_id: &str) -> String {
        format!("{}{}.zip", self.package_prefix, project_id)
    }
}
