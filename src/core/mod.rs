pub mod catalog;
pub mod engine;
pub mod fetcher;
pub mod loader;
pub mod merge;
pub mod pipeline;
pub mod publisher;

pub use crate::domain::model::{Definition, Manifest, Package, PackageType};
pub use crate::domain::ports::{ConfigProvider, ManifestSource, Pipeline, Storage};
pub use crate::utils::error::Result;
