//! Naholos - Ukrainian stress-aware TTS service
//!
//! Architecture: Hexagonal (ports & adapters)
//!
//! Domain layer (domain/):
//! - Stress Context: dictionary, tokenizer, resolver
//! - Voice Context: voice identifiers and the speaker embedding table
//! - Request/telemetry value objects and text preprocessing
//!
//! Application layer (application/):
//! - Ports: SynthesisModel, AudioEncoder, AssetFetcher, TelemetrySink
//! - SynthesisOrchestrator: validation, truncation, resolution, dispatch
//!
//! Infrastructure layer (infrastructure/):
//! - Adapters: HTTP backend client + fake, WAV encoder, heuristic stress
//!   predictor, HTTP telemetry sink, HTTP asset fetcher
//! - Assets: one-time release-asset bootstrap
//! - Telemetry: in-memory queue + cancellable background flush worker
//! - HTTP: RESTful serving surface

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::{load_config, AppConfig};
