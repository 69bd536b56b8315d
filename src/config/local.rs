use crate::core::Storage;
use crate::utils::error::{CatalogError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Resolves `path` under the base path. Absolute paths and `..` are refused.
    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        let escapes = path.components().any(|component| {
            matches!(
                component,
                Component::RootDir | Component::Prefix(_) | Component::ParentDir
            )
        });
        if escapes {
            return Err(CatalogError::PathOutsideOutput {
                path: path.to_path_buf(),
            });
        }
        Ok(self.base_path.join(path))
    }
}

impl Storage for LocalStorage {
    fn root(&self) -> &Path {
        &self.base_path
    }

    async fn create_root(&self) -> Result<()> {
        if !self.base_path.exists() {
            fs::create_dir(&self.base_path)?;
        }
        Ok(())
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn copy_file(&self, from: &Path, path: &Path) -> Result<()> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::copy(from, &full_path).map_err(|source| CatalogError::AssetCopyError {
            from: from.to_path_buf(),
            to: full_path.clone(),
            source,
        })?;
        Ok(())
    }
}
