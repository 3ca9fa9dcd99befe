//! Application Ports
//!
//! Outbound abstractions between the application core and the
//! infrastructure adapters.

mod asset_fetcher;
mod audio_encoder;
mod synthesis_model;
mod telemetry_sink;

pub use asset_fetcher::{AssetFetcherPort, FetchError};
pub use audio_encoder::{AudioEncoderPort, EncodeError};
pub use synthesis_model::{Device, ModelError, SynthesisModelPort, Waveform};
pub use telemetry_sink::{SinkError, TelemetrySinkPort};
