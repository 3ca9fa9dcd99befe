//! Voices Handler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::infrastructure::http::dto::{ApiResponse, VoicesResponse};
use crate::infrastructure::http::state::AppState;

/// List every accepted voice name.
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<ApiResponse<VoicesResponse>> {
    let voices = state.orchestrator.voices();
    Json(ApiResponse::success(VoicesResponse { voices }))
}
