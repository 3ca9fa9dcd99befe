//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping            GET   health check
//! - /api/tts/voices      GET   list accepted voices
//! - /api/tts/stress      POST  resolve stress without synthesis
//! - /api/tts/synthesize  POST  synthesize audio (binary response)

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// Build every route
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/tts", tts_routes())
}

fn tts_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/voices", get(handlers::list_voices))
        .route("/stress", post(handlers::resolve_stress))
        .route("/synthesize", post(handlers::synthesize))
}
