//! Asset Fetcher Port
//!
//! Transport used by the one-time asset bootstrap; the concrete HTTP client
//! lives in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

/// Asset fetch error
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Remote returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
}

/// Asset Fetcher Port
#[async_trait]
pub trait AssetFetcherPort: Send + Sync {
    /// Download a remote asset into memory.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
