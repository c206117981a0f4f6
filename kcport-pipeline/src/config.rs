//! Configuration of the export, import and cleanup flows.

use kcport_package::ArchiveLayout;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pause between cleanup groups.
pub const DEFAULT_CLEANUP_DELAY_MS: u64 = 1500;

/// Configuration for exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Archive entry names used when packaging.
    pub layout: ArchiveLayout,
}

/// Configuration for imports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Publish every imported language variant after the import.
    pub publish_items: bool,
    /// Archive entry names used when reading packages.
    pub layout: ArchiveLayout,
}

/// Configuration for cleanups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Pause between deletion groups (ms).
    pub cleanup_delay_ms: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cleanup_delay_ms: DEFAULT_CLEANUP_DELAY_MS,
        }
    }
}

impl CleanupConfig {
    pub fn cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.cleanup_delay_ms)
    }
}
