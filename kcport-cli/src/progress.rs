//! Progress records written to the log.

use kcport_pipeline::ProgressReporter;
use kcport_types::{ProcessedItem, ProcessedKind};
use tracing::{debug, info};

/// Logs every created entity; language variants only at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn process_item(&self, item: &ProcessedItem) {
        match item.kind {
            ProcessedKind::LanguageVariant => debug!("{}", item),
            _ => info!("{}", item),
        }
    }
}
