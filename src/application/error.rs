//! Application Error Taxonomy
//!
//! Synthesis-path errors propagate synchronously to the caller; setup errors
//! are fatal at startup; telemetry errors never appear here because the
//! flush worker absorbs them.

use thiserror::Error;

use crate::application::ports::{EncodeError, ModelError};

/// Application error
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Rejected before any processing; no side effects.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The process cannot serve requests; not retried.
    #[error("Setup error: {0}")]
    Setup(String),

    /// The synthesis backend failed for this request.
    #[error("Synthesis backend error: {0}")]
    Backend(String),

    /// Waveform encoding failed for this request.
    #[error("Audio encoding error: {0}")]
    Encode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<ModelError> for ApplicationError {
    fn from(err: ModelError) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<EncodeError> for ApplicationError {
    fn from(err: EncodeError) -> Self {
        Self::Encode(err.to_string())
    }
}
