//! Synthesis backend adapters

mod fake_model_client;
mod http_model_client;

pub use fake_model_client::{FakeModelClient, FakeModelClientConfig};
pub use http_model_client::{HttpModelClient, HttpModelClientConfig};
