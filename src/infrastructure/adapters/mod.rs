//! Infrastructure Adapters
//!
//! Concrete implementations of the application ports.

mod assets;
mod encoder;
mod model;
mod stress;
mod telemetry;

pub use assets::{HttpAssetFetcher, HttpAssetFetcherConfig};
pub use encoder::WavEncoder;
pub use model::{
    FakeModelClient, FakeModelClientConfig, HttpModelClient, HttpModelClientConfig,
};
pub use stress::HeuristicStressPredictor;
pub use telemetry::{HttpTelemetrySink, HttpTelemetrySinkConfig};
