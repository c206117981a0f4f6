//! Export archive packing and unpacking.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};

use kcport_types::ContentBundle;
use serde::Serialize;
use serde::de::DeserializeOwned;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::layout::ArchiveLayout;
use crate::{PackageError, PackageResult};

/// An asset binary stored in an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    pub asset_id: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// An opened export archive with parsed contents.
#[derive(Debug, Clone)]
pub struct ExportPackage {
    pub bundle: ContentBundle,
    /// Asset binaries found under the assets folder, ordered by entry name.
    pub assets_from_file: Vec<AssetFile>,
}

impl ExportPackage {
    /// Opens and parses an export archive from a reader.
    ///
    /// Content types, content items and taxonomies are required; assets,
    /// language variants and asset binaries are loaded when present. Missing
    /// required entries are reported before any JSON is parsed.
    pub fn open<R: Read + Seek>(reader: R, layout: &ArchiveLayout) -> PackageResult<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            entries.insert(name, data);
        }

        let taxonomies = required(&entries, &layout.taxonomies)?;
        let content_types = required(&entries, &layout.content_types)?;
        let content_items = required(&entries, &layout.content_items)?;

        let bundle = ContentBundle {
            taxonomies: parse(taxonomies)?,
            content_types: parse(content_types)?,
            content_items: parse(content_items)?,
            assets: optional(&entries, &layout.assets)?,
            language_variants: optional(&entries, &layout.language_variants)?,
        };

        let mut assets_from_file = Vec::new();
        for (name, data) in entries {
            if let Some((asset_id, file_name)) = layout.parse_asset_entry(&name) {
                assets_from_file.push(AssetFile {
                    asset_id: asset_id.to_string(),
                    file_name: file_name.to_string(),
                    data,
                });
            }
        }

        Ok(Self {
            bundle,
            assets_from_file,
        })
    }

    /// Opens an archive held in memory.
    pub fn from_bytes(bytes: &[u8], layout: &ArchiveLayout) -> PackageResult<Self> {
        Self::open(Cursor::new(bytes), layout)
    }
}

fn required<'a>(entries: &'a BTreeMap<String, Vec<u8>>, name: &str) -> PackageResult<&'a [u8]> {
    entries
        .get(name)
        .map(Vec::as_slice)
        .ok_or_else(|| PackageError::MissingEntry(name.to_string()))
}

fn optional<T: DeserializeOwned>(
    entries: &BTreeMap<String, Vec<u8>>,
    name: &str,
) -> PackageResult<Vec<T>> {
    match entries.get(name) {
        Some(data) => parse(data),
        None => Ok(Vec::new()),
    }
}

fn parse<T: DeserializeOwned>(data: &[u8]) -> PackageResult<Vec<T>> {
    Ok(serde_json::from_slice(data)?)
}

/// Fluent builder for export archives.
pub struct PackageBuilder<'a> {
    bundle: &'a ContentBundle,
    layout: ArchiveLayout,
    assets: Vec<AssetFile>,
}

impl<'a> PackageBuilder<'a> {
    pub fn new(bundle: &'a ContentBundle) -> Self {
        Self {
            bundle,
            layout: ArchiveLayout::default(),
            assets: Vec::new(),
        }
    }

    pub fn layout(mut self, layout: ArchiveLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn add_asset(
        mut self,
        asset_id: impl Into<String>,
        file_name: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.assets.push(AssetFile {
            asset_id: asset_id.into(),
            file_name: file_name.into(),
            data,
        });
        self
    }

    /// Builds the zip archive and returns the raw bytes.
    pub fn build(self) -> PackageResult<Vec<u8>> {
        let buf = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(buf);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let layout = &self.layout;
        let bundle = self.bundle;
        write_json(&mut zip, options, &layout.content_types, &bundle.content_types)?;
        write_json(&mut zip, options, &layout.content_items, &bundle.content_items)?;
        write_json(&mut zip, options, &layout.taxonomies, &bundle.taxonomies)?;
        write_json(&mut zip, options, &layout.assets, &bundle.assets)?;
        write_json(
            &mut zip,
            options,
            &layout.language_variants,
            &bundle.language_variants,
        )?;

        for asset in &self.assets {
            if asset.asset_id.is_empty() || asset.file_name.is_empty() {
                return Err(PackageError::InvalidEntry(format!(
                    "asset '{}' has no id or file name",
                    asset.asset_id
                )));
            }
            zip.start_file(layout.asset_entry(&asset.asset_id, &asset.file_name), options)?;
            zip.write_all(&asset.data)?;
        }

        let finished = zip.finish()?;
        Ok(finished.into_inner())
    }
}

fn write_json<W: Write + Seek, T: Serialize>(
    zip: &mut ZipWriter<W>,
    options: SimpleFileOptions,
    name: &str,
    value: &T,
) -> PackageResult<()> {
    let json = serde_json::to_vec(value)?;
    zip.start_file(name, options)?;
    zip.write_all(&json)?;
    Ok(())
}
