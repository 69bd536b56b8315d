use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid descriptor {}: {message}", path.display())]
    DescriptorError { path: PathBuf, message: String },

    #[error("Media file not found: {}", path.display())]
    MissingAsset { path: PathBuf },

    #[error("Media entry '{path}' must be a relative path inside its definition")]
    InvalidMediaPath { path: String },

    #[error("Refusing to write outside the output directory: {}", path.display())]
    PathOutsideOutput { path: PathBuf },

    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    AssetCopyError {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Domain file not found: {}", path.display())]
    MissingDomainFile { path: PathBuf },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Input,
    Asset,
    Publish,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::HttpError(_) => ErrorCategory::Network,
            CatalogError::IoError(_) => ErrorCategory::System,
            CatalogError::SerializationError(_) | CatalogError::DescriptorError { .. } => {
                ErrorCategory::Input
            }
            CatalogError::MissingAsset { .. }
            | CatalogError::InvalidMediaPath { .. }
            | CatalogError::AssetCopyError { .. } => ErrorCategory::Asset,
            CatalogError::MissingDomainFile { .. } | CatalogError::PathOutsideOutput { .. } => {
                ErrorCategory::Publish
            }
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Asset | ErrorCategory::Publish | ErrorCategory::System => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Process exit code for a run that stopped on this error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Asset => 3,
            ErrorCategory::Publish => 4,
            _ => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CatalogError::HttpError(_) => {
                "Check network connectivity and the manifest URLs in the descriptors".to_string()
            }
            CatalogError::IoError(_) => {
                "Check that the source and output directories exist and are writable".to_string()
            }
            CatalogError::SerializationError(_) => {
                "The package list could not be encoded; check descriptor values".to_string()
            }
            CatalogError::DescriptorError { path, .. } => format!(
                "Check that {} exists and has id, name and package keys",
                path.display()
            ),
            CatalogError::MissingAsset { path } => format!(
                "Add the missing file {} or remove it from the descriptor's media list",
                path.display()
            ),
            CatalogError::InvalidMediaPath { path } => format!(
                "List '{}' by its file name relative to the descriptor directory",
                path
            ),
            CatalogError::PathOutsideOutput { .. } => {
                "Output paths must stay relative to the output directory".to_string()
            }
            CatalogError::AssetCopyError { to, .. } => format!(
                "Make sure {} is writable and there is enough disk space",
                to.display()
            ),
            CatalogError::MissingDomainFile { path } => format!(
                "Create {} or point --domain-file at the right file",
                path.display()
            ),
            CatalogError::ConfigError { .. } => {
                "Review the command line arguments or the configuration file".to_string()
            }
            CatalogError::ConfigValidationError { field, .. }
            | CatalogError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Input => format!("Invalid input data: {}", self),
            ErrorCategory::Asset => format!("Asset publishing failed: {}", self),
            ErrorCategory::Publish => format!("Catalog publishing failed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
