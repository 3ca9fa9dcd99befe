//! Audio Encoder Port
//!
//! Abstraction over waveform-to-bytes encoding; the container/subtype pair
//! comes validated from the request layer.

use thiserror::Error;

use crate::domain::request::AudioSpec;

use super::synthesis_model::Waveform;

/// Encoding error
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Audio Encoder Port
///
/// Pure CPU work, hence a synchronous trait.
pub trait AudioEncoderPort: Send + Sync {
    /// Encode a waveform into the requested container and sample subtype.
    fn encode(&self, waveform: &Waveform, spec: &AudioSpec) -> Result<Vec<u8>, EncodeError>;
}
