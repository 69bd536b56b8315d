use crate::domain::model::{Definition, Manifest, Package};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Output tree the catalog is published into. Paths are relative to `root()`.
pub trait Storage: Send + Sync {
    fn root(&self) -> &Path;

    /// Creates the root directory itself (not its parents) if it is missing.
    fn create_root(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Copies a file from outside the tree to `path`, creating parent
    /// directories and overwriting an existing file.
    fn copy_file(
        &self,
        from: &Path,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Directory holding `systems/`, `modules/` and the domain file.
    fn source_dir(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Public URL the output directory is served from.
    fn base_url(&self) -> &str;
    fn domain_file(&self) -> &str;

    /// Domain file location; relative paths resolve against the source dir.
    fn domain_file_path(&self) -> PathBuf {
        Path::new(self.source_dir()).join(self.domain_file())
    }
}

#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Fetches the manifest at `url`. Failures are logged and yield `None`.
    async fn fetch_manifest(&self, url: &str) -> Option<Manifest>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Definition>>;
    async fn transform(&self, definitions: Vec<Definition>) -> Result<Vec<Package>>;
    async fn load(&self, packages: Vec<Package>) -> Result<String>;
}
