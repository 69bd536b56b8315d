//! Media publishing.
//!
//! Media of a definition at `systems/sys1` is copied to
//! `<output>/assets/systems/sys1/` and published as
//! `<base url>/assets/systems/sys1/<file>`, so the recorded URL always points
//! at the copied file.

use crate::domain::model::{Definition, Package};
use crate::domain::ports::Storage;
use crate::utils::error::{CatalogError, Result};
use std::path::{Component, Path, PathBuf};
use url::Url;

pub const ASSETS_DIR: &str = "assets";

pub struct AssetPublisher {
    source_root: PathBuf,
    base_url: Url,
}

impl AssetPublisher {
    pub fn new(source_root: impl Into<PathBuf>, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CatalogError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot be used as a base for asset paths".to_string(),
            });
        }

        Ok(Self {
            source_root: source_root.into(),
            base_url,
        })
    }

    /// Copies every media file of `definition` into `storage` and sets
    /// `package.media` to their public URLs, in descriptor order.
    ///
    /// Media entries are checked before anything is copied. An absolute entry
    /// or one that climbs out with `..` aborts with
    /// [`CatalogError::InvalidMediaPath`]; a missing media file aborts with
    /// [`CatalogError::MissingAsset`].
    pub async fn publish<S: Storage>(
        &self,
        storage: &S,
        definition: &Definition,
        package: &mut Package,
    ) -> Result<()> {
        for file in &definition.media {
            check_media_path(file)?;
        }

        let target_dir = Path::new(ASSETS_DIR).join(&definition.path);
        let mut media = Vec::with_capacity(definition.media.len());

        for file in &definition.media {
            let source = self.source_root.join(&definition.path).join(file);
            if !source.is_file() {
                return Err(CatalogError::MissingAsset { path: source });
            }

            storage.copy_file(&source, &target_dir.join(file)).await?;

            let url = self.asset_url(&definition.path.join(file))?;
            tracing::debug!("Published {} as {}", source.display(), url);
            media.push(url);
        }

        package.media = media;
        Ok(())
    }

    /// Public URL of a file stored at `assets/<relative>`.
    pub fn asset_url(&self, relative: &Path) -> Result<String> {
        let mut url = self.base_url.clone();
        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|_| CatalogError::InvalidConfigValueError {
                        field: "base_url".to_string(),
                        value: self.base_url.to_string(),
                        reason: "URL cannot be used as a base for asset paths".to_string(),
                    })?;

            segments.pop_if_empty().push(ASSETS_DIR);
            for component in relative.components() {
                if let Component::Normal(part) = component {
                    segments.push(&part.to_string_lossy());
                }
            }
        }
        Ok(url.to_string())
    }
}

/// A media entry must name a file below its definition directory.
fn check_media_path(file: &str) -> Result<()> {
    let mut named = false;
    for component in Path::new(file).components() {
        match component {
            Component::Normal(_) => named = true,
            Component::CurDir => {}
            _ => {
                return Err(CatalogError::InvalidMediaPath {
                    path: file.to_string(),
                })
            }
        }
    }

    if named {
        Ok(())
    } else {
        Err(CatalogError::InvalidMediaPath {
            path: file.to_string(),
        })
    }
}
