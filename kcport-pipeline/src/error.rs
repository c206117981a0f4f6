//! Error types for the pipeline.

use kcport_client::ClientError;
use kcport_package::PackageError;
use std::fmt;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// A step of an import or cleanup run, named in stage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ContentTypes,
    Taxonomies,
    ContentItems,
    Publish,
    DeleteContentItems,
    DeleteAssets,
    DeleteTaxonomies,
    DeleteContentTypes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ContentTypes => "content types import",
            Self::Taxonomies => "taxonomies import",
            Self::ContentItems => "content items import",
            Self::Publish => "publishing",
            Self::DeleteContentItems => "content items cleanup",
            Self::DeleteAssets => "assets cleanup",
            Self::DeleteTaxonomies => "taxonomies cleanup",
            Self::DeleteContentTypes => "content types cleanup",
        };
        f.write_str(label)
    }
}

/// Errors that can occur in export, import and cleanup runs.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A remote call outside of a stage failed (fetching, downloading).
    #[error("{0}")]
    Client(#[from] ClientError),

    /// The archive could not be written or read.
    #[error("archive error: {0}")]
    Package(#[from] PackageError),

    /// Exported content could not be interpreted.
    #[error("content error: {0}")]
    Content(#[from] kcport_types::Error),

    /// A remote call inside a stage failed; the stage was abandoned.
    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: ClientError,
    },
}

impl PipelineError {
    pub(crate) fn stage(stage: Stage) -> impl FnOnce(ClientError) -> Self {
        move |source| Self::Stage { stage, source }
    }

    /// The stage that failed, if the error happened inside one.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
