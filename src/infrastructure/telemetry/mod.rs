//! Telemetry Infrastructure
//!
//! Queue plus the background flush worker. Only constructed when a delivery
//! credential is configured; otherwise requests never enqueue anything.

mod queue;
mod worker;

pub use queue::TelemetryQueue;
pub use worker::{TelemetryWorker, TelemetryWorkerConfig, TelemetryWorkerHandle};
