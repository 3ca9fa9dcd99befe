//! HTTP Asset Fetcher
//!
//! Implements `AssetFetcherPort` for the one-time release-asset bootstrap.
//! Redirects are followed, since release hosting serves files through them.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{AssetFetcherPort, FetchError};

/// HTTP asset fetcher configuration
#[derive(Debug, Clone)]
pub struct HttpAssetFetcherConfig {
    /// Download timeout (seconds); model weights are large
    pub timeout_secs: u64,
}

impl Default for HttpAssetFetcherConfig {
    fn default() -> Self {
        Self { timeout_secs: 600 }
    }
}

/// HTTP asset fetcher.
pub struct HttpAssetFetcher {
    client: Client,
}

impl HttpAssetFetcher {
    pub fn new(config: HttpAssetFetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(HttpAssetFetcherConfig::default())
    }
}

#[async_trait]
impl AssetFetcherPort for HttpAssetFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        tracing::info!(url = %url, "Downloading asset");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkError(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
