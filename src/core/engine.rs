use crate::core::{Definition, Pipeline};
use crate::utils::error::Result;

pub struct CatalogEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CatalogEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting catalog build...");

        let definitions = self.pipeline.extract().await?;
        tracing::info!("Loaded {} definitions", definitions.len());

        let packages = self.pipeline.transform(definitions).await?;
        tracing::info!("Built {} packages", packages.len());

        let output_path = self.pipeline.load(packages).await?;
        tracing::info!("Catalog saved to: {}", output_path);

        tracing::info!("finished");
        Ok(output_path)
    }

    /// Loads definitions only; nothing is fetched or written.
    pub async fn dry_run(&self) -> Result<Vec<Definition>> {
        let definitions = self.pipeline.extract().await?;
        tracing::info!("Dry run: {} definitions would be processed", definitions.len());
        Ok(definitions)
    }
}
