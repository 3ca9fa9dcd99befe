//! Synthesis Model Port
//!
//! Abstraction over the neural synthesis backend; concrete adapters live in
//! the infrastructure layer. The backend consumes stressed text plus a
//! speaker embedding and returns a raw waveform.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::SpeakerEmbedding;

/// Synthesis backend error
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Compute device for the synthesis backend, selected once at process start
/// and never re-selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Cuda,
}

impl Device {
    /// Explicit configuration value, when present.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "cpu" => Some(Self::Cpu),
            "cuda" => Some(Self::Cuda),
            _ => None,
        }
    }

    /// Pick the accelerator when one is visible, else fall back to CPU.
    pub fn detect() -> Self {
        let visible = std::env::var("CUDA_VISIBLE_DEVICES")
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);
        if visible {
            Self::Cuda
        } else {
            Self::Cpu
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw synthesized audio.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn duration_ms(&self) -> u64 {
        (self.duration_secs() * 1000.0) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Synthesis Model Port
#[async_trait]
pub trait SynthesisModelPort: Send + Sync {
    /// Synthesize a waveform from stressed text and a speaker embedding.
    async fn synthesize(
        &self,
        stressed_text: &str,
        speaker: &SpeakerEmbedding,
    ) -> Result<Waveform, ModelError>;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> bool {
        true // default implementation
    }
}
