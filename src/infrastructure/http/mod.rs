//! HTTP Infrastructure
//!
//! RESTful serving surface over the synthesis orchestrator.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
