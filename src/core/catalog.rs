use crate::domain::model::Package;
use crate::domain::ports::Storage;
use crate::utils::error::{CatalogError, Result};
use std::path::{Path, PathBuf};

pub const CATALOG_FILE: &str = "packages.json";
pub const DOMAIN_FILE: &str = "CNAME";

/// Writes `packages.json` and the domain-association file into the output.
pub struct CatalogWriter {
    domain_file: PathBuf,
}

impl CatalogWriter {
    pub fn new(domain_file: impl Into<PathBuf>) -> Self {
        Self {
            domain_file: domain_file.into(),
        }
    }

    pub async fn write<S: Storage>(&self, storage: &S, packages: &[Package]) -> Result<PathBuf> {
        storage.create_root().await?;

        let json_data = serde_json::to_string_pretty(packages)?;
        tracing::debug!(
            "Writing {} packages ({} bytes) to {}",
            packages.len(),
            json_data.len(),
            CATALOG_FILE
        );
        storage
            .write_file(Path::new(CATALOG_FILE), json_data.as_bytes())
            .await?;
        tracing::info!("JSON data is saved.");

        if !self.domain_file.is_file() {
            return Err(CatalogError::MissingDomainFile {
                path: self.domain_file.clone(),
            });
        }
        storage
            .copy_file(&self.domain_file, Path::new(DOMAIN_FILE))
            .await?;
        tracing::info!("CNAME copied.");

        Ok(storage.root().join(CATALOG_FILE))
    }
}
