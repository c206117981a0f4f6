//! Command implementations: wire flags and config into the pipeline and
//! print a summary.

use crate::args::{CleanupArgs, Cli, Command, ExportArgs, ImportCommand, SourceApi};
use crate::config::FileConfig;
use crate::progress::LogProgress;
use anyhow::{Context, Result, bail};
use kcport_client::{DeliveryClient, HttpAssetSource, ManagementApi, ManagementClient};
use kcport_pipeline::{Cleaner, Exporter, ImportDataLoader, Importer};
use kcport_types::{CleanupReport, ImportResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = FileConfig::load_optional(cli.config.as_deref())?;

    match cli.command {
        Command::Export(args) => export(&config, args).await,
        Command::Import(command) => import(&config, command).await,
        Command::Cleanup(args) => cleanup(&config, args).await,
    }
}

async fn export(config: &FileConfig, args: ExportArgs) -> Result<()> {
    let exporter = Exporter::new(config.export_config(), Arc::new(HttpAssetSource::new()?));

    let (project_id, bundle) = match args.api {
        SourceApi::Delivery => {
            let client = DeliveryClient::new(config.delivery(&args.source)?)?;
            let languages = config.languages(&args.languages);
            let bundle = exporter
                .from_delivery(&client, &languages)
                .await
                .context("Export failed")?;
            (client.config().project_id.clone(), bundle)
        }
        SourceApi::Management => {
            let client = ManagementClient::new(config.source_management(&args.source)?)?;
            let bundle = exporter
                .from_management(&client)
                .await
                .context("Export failed")?;
            (client.config().project_id.clone(), bundle)
        }
    };

    let bytes = exporter
        .package(&bundle)
        .await
        .context("Failed to package export")?;
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(exporter.package_filename(&project_id)));
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported {}", bundle.summary());
    println!("  Archive: {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

async fn import(config: &FileConfig, command: ImportCommand) -> Result<()> {
    let options = match &command {
        ImportCommand::File { options, .. }
        | ImportCommand::Project { options, .. }
        | ImportCommand::Url { options, .. } => options.clone(),
    };
    let import_config = config.import_config(options.publish);
    let target: Arc<dyn ManagementApi> = Arc::new(ManagementClient::new(
        config.target_management(&options.target)?,
    )?);
    let loader = ImportDataLoader::new(target, import_config.layout.clone());

    let data = match command {
        ImportCommand::File { path, .. } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            loader
                .from_archive(&bytes)
                .with_context(|| format!("Failed to load archive {}", path.display()))?
        }
        ImportCommand::Project {
            api: SourceApi::Delivery,
            source,
            languages,
            ..
        } => {
            let client = DeliveryClient::new(config.delivery(&source)?)?;
            loader
                .from_project(&client, &config.languages(&languages))
                .await
                .context("Failed to load source project")?
        }
        ImportCommand::Project {
            api: SourceApi::Management,
            source,
            ..
        } => {
            let client = ManagementClient::new(config.source_management(&source)?)?;
            loader
                .from_management_project(&client)
                .await
                .context("Failed to load source project")?
        }
        ImportCommand::Url { url, .. } => loader
            .from_url(&HttpAssetSource::new()?, &url)
            .await
            .with_context(|| format!("Failed to load template {}", url))?,
    };

    let languages = data.bundle.required_languages();
    if !languages.is_empty() {
        info!(
            "Target project must contain languages: {}",
            languages.join(", ")
        );
    }

    let result = Importer::new(import_config, &LogProgress)
        .import(&data)
        .await
        .context("Import failed")?;

    print_import(data.target_project_id(), &result);
    Ok(())
}

async fn cleanup(config: &FileConfig, args: CleanupArgs) -> Result<()> {
    let management = config.target_management(&args.target)?;
    if !args.yes {
        bail!(
            "Cleanup deletes all content of project {}; pass --yes to confirm",
            management.project_id
        );
    }

    let client = ManagementClient::new(management)?;
    let cleaner = Cleaner::new(&client, config.cleanup_config(args.delay_ms));

    let data = cleaner
        .prepare()
        .await
        .context("Failed to list project content")?;
    if data.is_empty() {
        println!("Project {} is already empty", client.config().project_id);
        return Ok(());
    }

    let report = cleaner.cleanup(&data).await.context("Cleanup failed")?;
    print_cleanup(&client.config().project_id, &report);
    Ok(())
}

fn print_import(project_id: &str, result: &ImportResult) {
    println!("Imported into project {}", project_id);
    println!("  Content types:     {}", result.imported_content_types.len());
    println!("  Taxonomies:        {}", result.imported_taxonomies.len());
    println!("  Content items:     {}", result.imported_content_items.len());
    println!("  Language variants: {}", result.imported_language_variants.len());
    println!("  Published:         {}", result.published_items.len());
}

fn print_cleanup(project_id: &str, report: &CleanupReport) {
    println!("Cleaned up project {}", project_id);
    println!("  Content items: {}", report.content_items);
    println!("  Assets:        {}", report.assets);
    println!("  Taxonomies:    {}", report.taxonomies);
    println!("  Content types: {}", report.content_types);
}
