use crate::domain::model::Manifest;
use crate::domain::ports::ManifestSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

const USER_AGENT: &str = concat!("pkg-catalog/", env!("CARGO_PKG_VERSION"));

/// Why a manifest could not be fetched. Callers treat every variant the same
/// way (the definition is skipped); the distinction is for the logs.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid response from {url}: HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("manifest at {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub struct HttpManifestFetcher {
    client: Client,
}

impl HttpManifestFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn try_fetch(&self, url: &str) -> std::result::Result<Manifest, FetchError> {
        let network = |source| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;

        tracing::debug!("Manifest response status: {}", response.status());

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.bytes().await.map_err(network)?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ManifestSource for HttpManifestFetcher {
    async fn fetch_manifest(&self, url: &str) -> Option<Manifest> {
        tracing::info!("downloading manifest: {}", url);

        match self.try_fetch(url).await {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }
}
