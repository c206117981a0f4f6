//! Command-line arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kcport")]
#[command(about = "Export, import and clean up content projects")]
pub struct Cli {
    /// Path to a TOML config file with default projects and settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a project into a zip archive
    Export(ExportArgs),

    /// Import content into a target project
    #[command(subcommand)]
    Import(ImportCommand),

    /// Delete all content of a target project
    Cleanup(CleanupArgs),
}

/// API a source project is read through.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceApi {
    /// Published content only; no API key needed
    Delivery,
    /// Full project including unpublished variants and all assets
    Management,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Source project id
    #[arg(id = "source_project_id", long = "source-project")]
    pub project_id: Option<String>,

    /// Management API key of the source project
    #[arg(id = "source_api_key", long = "source-key", env = "KCPORT_SOURCE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Target project id
    #[arg(id = "target_project_id", long = "target-project")]
    pub project_id: Option<String>,

    /// Management API key of the target project
    #[arg(id = "target_api_key", long = "target-key", env = "KCPORT_TARGET_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(long, value_enum, default_value = "delivery")]
    pub api: SourceApi,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Language to export (repeatable; delivery API only)
    #[arg(long = "language")]
    pub languages: Vec<String>,

    /// Archive path (defaults to the generated package name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ImportOptions {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Publish every imported language variant
    #[arg(long)]
    pub publish: bool,
}

#[derive(Subcommand, Debug)]
pub enum ImportCommand {
    /// Import an export archive
    File {
        path: PathBuf,
        #[command(flatten)]
        options: ImportOptions,
    },

    /// Import straight from a source project
    Project {
        #[arg(long, value_enum, default_value = "delivery")]
        api: SourceApi,
        #[command(flatten)]
        source: SourceArgs,
        /// Language to import (repeatable; delivery API only)
        #[arg(long = "language")]
        languages: Vec<String>,
        #[command(flatten)]
        options: ImportOptions,
    },

    /// Download a template package and import it
    Url {
        url: String,
        #[command(flatten)]
        options: ImportOptions,
    },
}

#[derive(Args, Debug)]
pub struct CleanupArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Pause between deletion groups (ms)
    #[arg(long = "delay-ms")]
    pub delay_ms: Option<u64>,

    /// Confirm deletion of all project content
    #[arg(long)]
    pub yes: bool,
}
