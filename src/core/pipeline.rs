use crate::core::catalog::CatalogWriter;
use crate::core::fetcher::HttpManifestFetcher;
use crate::core::loader::load_definitions;
use crate::core::merge::create_package;
use crate::core::publisher::AssetPublisher;
use crate::core::{
    ConfigProvider, Definition, ManifestSource, Package, PackageType, Pipeline, Storage,
};
use crate::utils::error::Result;
use std::path::Path;

pub struct CatalogPipeline<S: Storage, C: ConfigProvider, M: ManifestSource> {
    storage: S,
    config: C,
    source: M,
    publisher: AssetPublisher,
    writer: CatalogWriter,
}

impl<S: Storage, C: ConfigProvider, M: ManifestSource> CatalogPipeline<S, C, M> {
    pub fn new(storage: S, config: C, source: M) -> Result<Self> {
        let publisher = AssetPublisher::new(config.source_dir(), config.base_url())?;
        let writer = CatalogWriter::new(config.domain_file_path());

        Ok(Self {
            storage,
            config,
            source,
            publisher,
            writer,
        })
    }
}

impl<S: Storage, C: ConfigProvider> CatalogPipeline<S, C, HttpManifestFetcher> {
    /// Pipeline that fetches manifests over HTTP.
    pub fn with_http(storage: S, config: C) -> Result<Self> {
        Self::new(storage, config, HttpManifestFetcher::new()?)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, M: ManifestSource> Pipeline for CatalogPipeline<S, C, M> {
    async fn extract(&self) -> Result<Vec<Definition>> {
        let source_root = Path::new(self.config.source_dir());

        let mut definitions = Vec::new();
        for package_type in PackageType::ALL {
            definitions.extend(load_definitions(source_root, package_type));
        }

        Ok(definitions)
    }

    async fn transform(&self, definitions: Vec<Definition>) -> Result<Vec<Package>> {
        let mut packages = Vec::new();

        for definition in &definitions {
            tracing::info!("processing: {}", definition.name);

            let manifest = match self.source.fetch_manifest(&definition.package).await {
                Some(manifest) if manifest.is_complete() => manifest,
                Some(_) => {
                    tracing::debug!(
                        "Skipping '{}': manifest has no version or download",
                        definition.id
                    );
                    continue;
                }
                None => continue,
            };

            let mut package = create_package(definition, &manifest);
            self.publisher
                .publish(&self.storage, definition, &mut package)
                .await?;

            packages.push(package);
        }

        Ok(packages)
    }

    async fn load(&self, packages: Vec<Package>) -> Result<String> {
        let output_path = self.writer.write(&self.storage, &packages).await?;
        Ok(output_path.display().to_string())
    }
}
