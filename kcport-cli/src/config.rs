//! Optional TOML config file. Command-line flags take precedence over it.
//!
//! ```toml
//! languages = ["en-US", "es-ES"]
//! publish_items = true
//! cleanup_delay_ms = 1500
//!
//! [source]
//! project_id = "..."
//! api_key = "..."
//!
//! [target]
//! project_id = "..."
//! api_key = "..."
//!
//! [layout]
//! package_prefix = "kc-export-"
//! ```

use crate::args::{SourceArgs, TargetArgs};
use anyhow::{Context, Result, anyhow};
use kcport_client::{DeliveryConfig, ManagementConfig};
use kcport_package::ArchiveLayout;
use kcport_pipeline::{CleanupConfig, ExportConfig, ImportConfig};
use serde::Deserialize;
use std::path::Path;

/// Project coordinates from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    /// Overrides the API base URL (delivery or management, by command).
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub source: ProjectSection,
    pub target: ProjectSection,
    pub languages: Vec<String>,
    pub publish_items: bool,
    pub cleanup_delay_ms: Option<u64>,
    pub layout: ArchiveLayout,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn delivery(&self, args: &SourceArgs) -> Result<DeliveryConfig> {
        let project_id = pick(&args.project_id, &self.source.project_id, "source project id")?;
        let mut config = DeliveryConfig::for_project(project_id);
        if let Some(base_url) = &self.source.base_url {
            config.api_base_url = base_url.clone();
        }
        Ok(config)
    }

    pub fn source_management(&self, args: &SourceArgs) -> Result<ManagementConfig> {
        management(&args.project_id, &args.api_key, &self.source, "source")
    }

    pub fn target_management(&self, args: &TargetArgs) -> Result<ManagementConfig> {
        management(&args.project_id, &args.api_key, &self.target, "target")
    }

    /// Flag languages when any were given, else the file's.
    pub fn languages(&self, flags: &[String]) -> Vec<String> {
        if flags.is_empty() {
            self.languages.clone()
        } else {
            flags.to_vec()
        }
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            layout: self.layout.clone(),
        }
    }

    pub fn import_config(&self, publish_flag: bool) -> ImportConfig {
        ImportConfig {
            publish_items: publish_flag || self.publish_items,
            layout: self.layout.clone(),
        }
    }

    pub fn cleanup_config(&self, delay_flag: Option<u64>) -> CleanupConfig {
        match delay_flag.or(self.cleanup_delay_ms) {
            Some(cleanup_delay_ms) => CleanupConfig { cleanup_delay_ms },
            None => CleanupConfig::default(),
        }
    }
}

fn management(
    flag_project: &Option<String>,
    flag_key: &Option<String>,
    section: &ProjectSection,
    role: &str,
) -> Result<ManagementConfig> {
    let project_id = pick(flag_project, &section.project_id, &format!("{} project id", role))?;
    let api_key = pick(flag_key, &section.api_key, &format!("{} API key", role))?;
    let mut config = ManagementConfig::for_project(project_id, api_key);
    if let Some(base_url) = &section.base_url {
        config.api_base_url = base_url.clone();
    }
    Ok(config)
}

/// Non-empty flag value, else non-empty file value.
fn pick(flag: &Option<String>, file: &Option<String>, what: &str) -> Result<String> {
    let given = |v: &Option<String>| v.as_deref().filter(|v| !v.is_empty()).map(str::to_string);
    given(flag)
        .or_else(|| given(file))
        .ok_or_else(|| anyhow!("No {} given (flag or config file)", what))
}
