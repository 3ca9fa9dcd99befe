//! Asset fetch adapters

mod http_fetcher;

pub use http_fetcher::{HttpAssetFetcher, HttpAssetFetcherConfig};
