//! Error types for the package crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required entry: {0}")]
    MissingEntry(String),

    #[error("invalid entry: {0}")]
    InvalidEntry(String),
}

pub type PackageResult<T> = Result<T, PackageError>;
