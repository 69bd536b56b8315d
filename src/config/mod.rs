pub mod local;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://packages.encounter.plus";
pub const DEFAULT_SOURCE_DIR: &str = ".";
pub const DEFAULT_OUTPUT_PATH: &str = "./dist";
pub const DEFAULT_DOMAIN_FILE: &str = "CNAME";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "pkg-catalog")]
#[command(about = "Builds the package catalog from local definitions and remote manifests")]
pub struct CliConfig {
    /// Directory holding systems/, modules/ and the domain file
    #[arg(long, default_value = DEFAULT_SOURCE_DIR)]
    pub source_dir: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    /// Public URL the output directory is served from
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Domain-association file, relative to the source directory
    #[arg(long, default_value = DEFAULT_DOMAIN_FILE)]
    pub domain_file: String,

    /// TOML configuration file; replaces the path and URL options above
    #[arg(short, long)]
    pub config: Option<String>,

    /// List the definitions that would be processed without fetching or writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_dir(&self) -> &str {
        &self.source_dir
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn domain_file(&self) -> &str {
        &self.domain_file
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_path("source_dir", config.source_dir())?;
    validate_path("output_path", config.output_path())?;
    validate_path("domain_file", config.domain_file())?;
    validate_url("base_url", config.base_url())?;
    Ok(())
}
