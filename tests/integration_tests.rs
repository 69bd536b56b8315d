use anyhow::Result;
use httpmock::prelude::*;
use pkg_catalog::{
    CatalogEngine, CatalogError, CatalogPipeline, LocalStorage, Package, PackageType, TomlConfig,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BASE_URL: &str = "https://packages.encounter.plus";

fn write_definition(root: &Path, category: &str, id: &str, manifest_url: &str, extra: &str) {
    let dir = root.join(category).join(id);
    fs::create_dir_all(&dir).unwrap();
    let yaml = format!(
        "id: {id}\nname: {id} title\ncontent: adventure\nrepository: https://github.com/example/{id}\npackage: {manifest_url}\n{extra}"
    );
    fs::write(dir.join(format!("{}.yaml", id)), yaml).unwrap();
}

fn config_for(source: &Path) -> TomlConfig {
    let source_path = source.display().to_string().replace('\\', "/");
    let toml_content = format!(
        r#"
[source]
path = "{source_path}"

[output]
path = "{source_path}/dist"
base_url = "{BASE_URL}"
"#
    );
    TomlConfig::from_toml_str(&toml_content).unwrap()
}

fn engine_for(
    source: &Path,
) -> CatalogEngine<CatalogPipeline<LocalStorage, TomlConfig, pkg_catalog::HttpManifestFetcher>> {
    let storage = LocalStorage::new(source.join("dist"));
    let pipeline = CatalogPipeline::with_http(storage, config_for(source)).unwrap();
    CatalogEngine::new(pipeline)
}

#[tokio::test]
async fn test_end_to_end_catalog_build() -> Result<()> {
    let source = TempDir::new()?;
    let server = MockServer::start_async().await;

    let sys1_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/sys1.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "description": "System one",
                    "category": "rules",
                    "version": "1.0",
                    "download": "http://x/1.0.zip",
                    "website": "https://sys1.example.com",
                    "authors": ["Remote Author"]
                }));
        })
        .await;
    let sys2_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/sys2.json");
            then.status(404);
        })
        .await;
    let m1_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/m1.json");
            then.status(200)
                .json_body(serde_json::json!({"version": "2.0", "description": "no download"}));
        })
        .await;
    let m2_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/m2.json");
            then.status(200).json_body(serde_json::json!({
                "version": "0.3",
                "download": "http://x/m2.zip",
                "authors": "Module Author"
            }));
        })
        .await;

    write_definition(
        source.path(),
        "systems",
        "sys1",
        &server.url("/sys1.json"),
        "authors:\n  - Local Author\nmedia:\n  - icon.png\n",
    );
    fs::write(source.path().join("systems/sys1/icon.png"), "icon")?;
    write_definition(
        source.path(),
        "systems",
        "sys2",
        &server.url("/sys2.json"),
        "media:\n  - icon.png\n",
    );
    fs::write(source.path().join("systems/sys2/icon.png"), "icon")?;
    write_definition(source.path(), "modules", "m1", &server.url("/m1.json"), "");
    write_definition(source.path(), "modules", "m2", &server.url("/m2.json"), "");
    fs::write(source.path().join("CNAME"), "packages.encounter.plus\n")?;

    let output_path = engine_for(source.path()).run().await?;

    sys1_mock.assert_async().await;
    sys2_mock.assert_async().await;
    m1_mock.assert_async().await;
    m2_mock.assert_async().await;

    let dist = source.path().join("dist");
    assert_eq!(Path::new(&output_path), dist.join("packages.json"));

    let packages: Vec<Package> = serde_json::from_str(&fs::read_to_string(&output_path)?)?;
    let ids: Vec<&str> = packages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["sys1", "m2"]);

    let sys1 = &packages[0];
    assert_eq!(sys1.name, "sys1 title");
    assert_eq!(sys1.package_type, PackageType::System);
    assert_eq!(sys1.content, Some(serde_json::json!("adventure")));
    assert_eq!(sys1.version, "1.0");
    assert_eq!(sys1.download, "http://x/1.0.zip");
    assert_eq!(sys1.category.as_deref(), Some("rules"));
    assert_eq!(sys1.authors, Some(vec!["Local Author".to_string()]));
    assert_eq!(
        sys1.media,
        vec![format!("{}/assets/systems/sys1/icon.png", BASE_URL)]
    );

    let m2 = &packages[1];
    assert_eq!(m2.package_type, PackageType::Module);
    assert_eq!(m2.authors, Some(vec!["Module Author".to_string()]));
    assert!(m2.media.is_empty());

    assert_eq!(
        fs::read_to_string(dist.join("assets/systems/sys1/icon.png"))?,
        "icon"
    );
    assert!(!dist.join("assets/systems/sys2").exists());
    assert_eq!(
        fs::read_to_string(dist.join("CNAME"))?,
        "packages.encounter.plus\n"
    );

    let raw: Vec<serde_json::Value> = serde_json::from_str(&fs::read_to_string(&output_path)?)?;
    assert_eq!(raw[0]["type"], "system");
    assert!(raw[1].get("website").is_none());
    assert_eq!(raw[1]["media"], serde_json::json!([]));

    Ok(())
}

#[tokio::test]
async fn test_broken_category_does_not_stop_the_other() -> Result<()> {
    let source = TempDir::new()?;
    let server = MockServer::start_async().await;

    let manifest_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/m1.json");
            then.status(200)
                .json_body(serde_json::json!({"version": "1.0", "download": "http://x/m1.zip"}));
        })
        .await;

    write_definition(
        source.path(),
        "systems",
        "sys1",
        &server.url("/sys1.json"),
        "",
    );
    fs::create_dir_all(source.path().join("systems/no-descriptor"))?;
    write_definition(source.path(), "modules", "m1", &server.url("/m1.json"), "");
    fs::write(source.path().join("CNAME"), "example.com")?;

    let output_path = engine_for(source.path()).run().await?;

    manifest_mock.assert_async().await;
    let packages: Vec<Package> = serde_json::from_str(&fs::read_to_string(&output_path)?)?;
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].id, "m1");

    Ok(())
}

#[tokio::test]
async fn test_missing_media_stops_the_run() -> Result<()> {
    let source = TempDir::new()?;
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/sys1.json");
            then.status(200)
                .json_body(serde_json::json!({"version": "1.0", "download": "http://x/1.0.zip"}));
        })
        .await;

    write_definition(
        source.path(),
        "systems",
        "sys1",
        &server.url("/sys1.json"),
        "media:\n  - missing.png\n",
    );
    fs::write(source.path().join("CNAME"), "example.com")?;

    let err = engine_for(source.path()).run().await.unwrap_err();

    assert!(matches!(err, CatalogError::MissingAsset { .. }));
    assert_eq!(err.exit_code(), 3);
    assert!(!source.path().join("dist/packages.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_missing_domain_file_stops_the_run() -> Result<()> {
    let source = TempDir::new()?;

    let err = engine_for(source.path()).run().await.unwrap_err();

    assert!(matches!(err, CatalogError::MissingDomainFile { .. }));
    assert_eq!(err.exit_code(), 4);

    Ok(())
}

#[tokio::test]
async fn test_dry_run_fetches_nothing() -> Result<()> {
    let source = TempDir::new()?;
    let server = MockServer::start_async().await;

    let manifest_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/m1.json");
            then.status(200);
        })
        .await;
    write_definition(source.path(), "modules", "m1", &server.url("/m1.json"), "");

    let definitions = engine_for(source.path()).dry_run().await?;

    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].package, server.url("/m1.json"));
    assert_eq!(manifest_mock.hits_async().await, 0);
    assert!(!source.path().join("dist").exists());

    Ok(())
}

#[tokio::test]
async fn test_off_type_manifest_fields_still_publish() -> Result<()> {
    let source = TempDir::new()?;
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/sys1.json");
            then.status(200).json_body(serde_json::json!({
                "version": 2,
                "download": "http://x/2.zip",
                "authors": [{"name": "A"}]
            }));
        })
        .await;

    write_definition(source.path(), "systems", "sys1", &server.url("/sys1.json"), "");
    fs::write(source.path().join("CNAME"), "example.com")?;

    let output_path = engine_for(source.path()).run().await?;

    let packages: Vec<Package> = serde_json::from_str(&fs::read_to_string(&output_path)?)?;
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].version, "2");
    assert_eq!(packages[0].authors, Some(vec!["A".to_string()]));

    Ok(())
}
