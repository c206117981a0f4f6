//! kcport export archive format.
//!
//! An export archive is a zip file containing:
//! - `content-types.json`    : content type definitions (required)
//! - `content-items.json`    : content items with element values (required)
//! - `taxonomies.json`       : taxonomy groups (required)
//! - `assets.json`           : asset metadata (optional)
//! - `language-variants.json`: language variants (optional)
//! - `assets/<id>/<file>`    : asset binaries (optional)
//!
//! Entry names are configurable through [`ArchiveLayout`]; the names above
//! are the defaults.

mod error;
mod layout;
mod package;

pub use error::{PackageError, PackageResult};
pub use layout::ArchiveLayout;
pub use package::{AssetFile, ExportPackage, PackageBuilder};
