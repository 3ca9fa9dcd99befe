//! Application Layer
//!
//! Ports to the infrastructure adapters plus the synthesis orchestrator.

pub mod error;
pub mod orchestrator;
pub mod ports;

pub use error::ApplicationError;
pub use orchestrator::{
    OrchestratorConfig, SynthesisOrchestrator, SynthesisOutput, DEFAULT_TEXT_LIMIT,
};
pub use ports::{
    AssetFetcherPort, AudioEncoderPort, Device, EncodeError, FetchError, ModelError,
    SinkError, SynthesisModelPort, TelemetrySinkPort, Waveform,
};
