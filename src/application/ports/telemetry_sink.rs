//! Telemetry Sink Port
//!
//! Delivery transport for usage-record batches. The flush worker treats the
//! upload as all-or-nothing: any error requeues the whole batch.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::telemetry::LogRecord;

/// Telemetry delivery error
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Sink rejected batch: {0}")]
    Rejected(String),
}

/// Telemetry Sink Port
#[async_trait]
pub trait TelemetrySinkPort: Send + Sync {
    /// Deliver one ordered batch of records.
    async fn upload(&self, batch: &[LogRecord]) -> Result<(), SinkError>;
}
