//! Infrastructure Layer
//!
//! Port adapters, the asset bootstrap, the telemetry queue/worker and the
//! HTTP serving surface.

pub mod adapters;
pub mod assets;
pub mod http;
pub mod telemetry;
