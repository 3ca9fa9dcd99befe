//! Synthesize Handler
//!
//! Returns encoded audio as the response body with machine-readable
//! metadata in headers; the stressed text itself is served by the stress
//! endpoint, since header values cannot carry Cyrillic.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::domain::request::SynthesisRequest;
use crate::infrastructure::http::dto::SynthesizeRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesizeRequest>,
) -> Result<Response, ApiError> {
    let output = state
        .orchestrator
        .synthesize(SynthesisRequest {
            text: request.text,
            voice: request.voice,
            stress_mode: request.stress,
            format: request.format,
            subtype: request.subtype,
        })
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, output.content_type)
        .header(header::CONTENT_LENGTH, output.audio.len())
        .header("X-Sample-Rate", output.sample_rate)
        .header("X-Audio-Duration-Ms", output.duration_ms)
        .body(Body::from(output.audio))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
