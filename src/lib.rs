pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{local::LocalStorage, toml_config::TomlConfig};

pub use core::{engine::CatalogEngine, fetcher::HttpManifestFetcher, pipeline::CatalogPipeline};
pub use domain::model::{Definition, Manifest, Package, PackageType};
pub use utils::error::{CatalogError, Result};
