mod common;

use common::{BEANS_URL, FakeAssets, FakeTarget, management_source, sample_source};
use kcport_package::{ArchiveLayout, PackageError};
use kcport_pipeline::{
    ExportConfig, Exporter, ImportConfig, ImportDataLoader, Importer, NoopProgress, PipelineError,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const TEMPLATE_URL: &str = "https://templates.example/coffee-shop.zip";

fn languages() -> Vec<String> {
    vec!["en-US".to_string(), "es-ES".to_string()]
}

async fn exported_archive() -> Vec<u8> {
    let exporter = Exporter::new(
        ExportConfig::default(),
        Arc::new(FakeAssets::default().with(BEANS_URL, b"jpeg")),
    );
    let bundle = exporter
        .from_delivery(&sample_source(), &languages())
        .await
        .unwrap();
    exporter.package(&bundle).await.unwrap()
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

#[tokio::test]
async fn project_source_is_loaded_without_touching_the_target() {
    let target = Arc::new(FakeTarget::new("target"));
    let source = sample_source();
    let loader = ImportDataLoader::new(target.clone(), ArchiveLayout::default());

    let data = loader.from_project(&source, &languages()).await.unwrap();

    assert_eq!(data.target_project_id(), "target");
    assert_eq!(data.bundle.content_types.len(), 1);
    assert_eq!(data.bundle.taxonomies.len(), 1);
    assert_eq!(data.bundle.content_items.len(), 3);
    assert!(data.assets_from_file.is_empty());
    assert!(target.calls().is_empty());
}

#[tokio::test]
async fn management_project_is_loaded_without_touching_the_target() {
    let target = Arc::new(FakeTarget::new("target"));
    let source = management_source();
    let loader = ImportDataLoader::new(target.clone(), ArchiveLayout::default());

    let data = loader.from_management_project(&source).await.unwrap();

    assert_eq!(data.target_project_id(), "target");
    assert_eq!(data.bundle.content_types.len(), 1);
    assert_eq!(data.bundle.taxonomies.len(), 1);
    assert_eq!(data.bundle.content_items.len(), 5);
    assert_eq!(data.bundle.assets.len(), 1);
    assert_eq!(data.bundle.language_variants.len(), 5);
    assert!(data.bundle.content_items.iter().all(|i| i.content_type() == "article"));
    assert!(data.assets_from_file.is_empty());
    assert!(target.calls().is_empty());

    let calls = source.calls();
    for listing in ["list_assets:", "list_types:", "list_items:", "list_taxonomies:"] {
        assert!(calls.iter().any(|c| c.starts_with(listing)), "{listing} not fetched");
    }
    assert_eq!(
        source.calls_of("list_variants:"),
        vec![
            "list_variants:article:",
            "list_variants:article:2",
            "list_variants:article:4"
        ]
    );
}

#[tokio::test]
async fn management_project_imports_items_without_variants() {
    let target = Arc::new(FakeTarget::new("target"));
    let loader = ImportDataLoader::new(target.clone(), ArchiveLayout::default());
    let data = loader
        .from_management_project(&management_source())
        .await
        .unwrap();

    let result = Importer::new(ImportConfig::default(), &NoopProgress)
        .import(&data)
        .await
        .unwrap();

    assert_eq!(result.imported_content_types.len(), 1);
    assert_eq!(result.imported_taxonomies.len(), 1);
    assert_eq!(result.imported_content_items.len(), 5);
    assert!(result.imported_language_variants.is_empty());
    assert!(target.calls_of("upsert:").is_empty());

    let state = target.state.lock().unwrap();
    let tags = state.content_types[0]
        .elements
        .iter()
        .find(|e| e.codename == "tags")
        .unwrap();
    assert_eq!(
        tags.taxonomy_group.as_ref().and_then(|g| g.codename_str()),
        Some("regions")
    );
}

#[tokio::test]
async fn archive_keeps_asset_binaries() {
    let target = Arc::new(FakeTarget::new("target"));
    let loader = ImportDataLoader::new(target, ArchiveLayout::default());

    let data = loader.from_archive(&exported_archive().await).unwrap();

    assert_eq!(data.bundle.content_items.len(), 3);
    assert_eq!(data.bundle.language_variants.len(), 3);
    assert_eq!(data.assets_from_file.len(), 1);
    assert_eq!(data.assets_from_file[0].file_name, "beans.jpg");
}

#[tokio::test]
async fn archive_without_taxonomies_fails_before_import() {
    let target = Arc::new(FakeTarget::new("target"));
    let layout = ArchiveLayout {
        taxonomies: "taxonomy-groups.json".into(),
        ..Default::default()
    };
    let loader = ImportDataLoader::new(target.clone(), layout);

    let err = match loader.from_archive(&exported_archive().await) {
        Ok(_) => panic!("archive without taxonomies was accepted"),
        Err(err) => err,
    };

    assert!(matches!(
        err,
        PipelineError::Package(PackageError::MissingEntry(ref name)) if name == "taxonomy-groups.json"
    ));
    assert!(target.calls().is_empty());
}

#[tokio::test]
async fn template_url_is_downloaded_then_read() {
    let target = Arc::new(FakeTarget::new("target"));
    let loader = ImportDataLoader::new(target, ArchiveLayout::default());
    let templates = FakeAssets::default().with(TEMPLATE_URL, &exported_archive().await);

    let data = loader.from_url(&templates, TEMPLATE_URL).await.unwrap();

    assert_eq!(templates.calls(), vec![TEMPLATE_URL]);
    assert_eq!(data.bundle.content_items.len(), 3);
}

#[tokio::test]
async fn unknown_template_url_fails() {
    let target = Arc::new(FakeTarget::new("target"));
    let loader = ImportDataLoader::new(target.clone(), ArchiveLayout::default());

    let err = match loader.from_url(&FakeAssets::default(), TEMPLATE_URL).await {
        Ok(_) => panic!("missing template was loaded"),
        Err(err) => err,
    };

    assert!(matches!(err, PipelineError::Client(ref e) if e.is_not_found()));
    assert!(target.calls().is_empty());
}

#[tokio::test]
async fn exported_archive_imports_into_an_empty_project() {
    let source = sample_source();
    let target = Arc::new(FakeTarget::new("target"));
    let loader = ImportDataLoader::new(target.clone(), ArchiveLayout::default());
    let data = loader.from_archive(&exported_archive().await).unwrap();

    let result = Importer::new(
        ImportConfig {
            publish_items: true,
            ..Default::default()
        },
        &NoopProgress,
    )
    .import(&data)
    .await
    .unwrap();

    let state = target.state.lock().unwrap();
    assert_eq!(
        sorted(state.content_types.iter().map(|t| t.codename().to_string()).collect()),
        sorted(source.content_types.iter().map(|t| t.codename().to_string()).collect())
    );
    assert_eq!(
        sorted(state.taxonomies.iter().map(|t| t.codename().to_string()).collect()),
        sorted(source.taxonomies.iter().map(|t| t.codename().to_string()).collect())
    );
    assert_eq!(state.content_items.len(), source.content_items.len());
    assert_eq!(result.imported_language_variants.len(), 3);
    assert_eq!(
        sorted(
            state
                .published
                .iter()
                .map(|(item, language)| format!("{}:{}", item, language))
                .collect()
        ),
        vec!["cafe:es-ES", "coffee:en-US", "tea:en-US"]
    );
}
