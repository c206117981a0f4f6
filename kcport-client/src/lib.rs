//! HTTP clients for the content delivery and content management APIs.
//!
//! - [`DeliveryClient`] reads published content of a project (types, items
//!   with element values, taxonomies).
//! - [`ManagementClient`] reads and writes a project's content model and
//!   content, authenticated with the project's management API key.
//! - [`HttpAssetSource`] downloads asset binaries and packages by URL.
//!
//! Callers depend on the [`DeliveryApi`], [`ManagementApi`] and
//! [`AssetSource`] traits so that the remote services can be replaced in tests.

mod api;
mod assets;
mod delivery;
mod error;
mod http;
mod management;

pub use api::{AssetSource, DeliveryApi, ManagementApi};
pub use assets::HttpAssetSource;
pub use delivery::{DeliveryClient, DeliveryConfig};
pub use error::{ClientError, ClientResult};
pub use http::DEFAULT_REQUEST_TIMEOUT_SECS;
pub use management::{ManagementClient, ManagementConfig};
