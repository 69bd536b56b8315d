//! Definition loading.
//!
//! Each category root (`systems/`, `modules/`) holds one directory per item
//! with a `<name>/<name>.yaml` descriptor. A single unreadable or malformed
//! descriptor fails the whole category; the failure is logged and the
//! category contributes no definitions to the run.

use crate::domain::model::{Definition, Descriptor, PackageType};
use crate::utils::error::{CatalogError, Result};
use std::fs;
use std::path::Path;

pub const DESCRIPTOR_EXTENSION: &str = "yaml";

/// Loads every definition of `package_type` under `source_root`.
///
/// Returned in directory-listing order, which is platform dependent.
pub fn load_definitions(source_root: &Path, package_type: PackageType) -> Vec<Definition> {
    let dir = source_root.join(package_type.directory());

    match scan_directory(&dir, package_type) {
        Ok(definitions) => {
            tracing::info!(
                "Loaded {} {} definitions from {}",
                definitions.len(),
                package_type,
                dir.display()
            );
            definitions
        }
        Err(e) => {
            tracing::error!(
                "Failed to load {} definitions from {}: {}",
                package_type,
                dir.display(),
                e
            );
            Vec::new()
        }
    }
}

fn scan_directory(dir: &Path, package_type: PackageType) -> Result<Vec<Definition>> {
    let mut definitions = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let descriptor_path = dir
            .join(&name)
            .join(format!("{}.{}", name, DESCRIPTOR_EXTENSION));

        let contents =
            fs::read_to_string(&descriptor_path).map_err(|e| CatalogError::DescriptorError {
                path: descriptor_path.clone(),
                message: e.to_string(),
            })?;
        let descriptor =
            Descriptor::from_yaml(&contents).map_err(|e| CatalogError::DescriptorError {
                path: descriptor_path.clone(),
                message: e.to_string(),
            })?;

        let path = Path::new(package_type.directory()).join(&name);
        tracing::debug!("Loaded definition '{}' from {}", descriptor.id, path.display());

        definitions.push(Definition::from_descriptor(descriptor, path, package_type));
    }

    Ok(definitions)
}
