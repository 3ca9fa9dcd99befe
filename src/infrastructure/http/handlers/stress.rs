//! Stress Handler
//!
//! Resolves stress without synthesizing audio; mirrors the preprocessing and
//! truncation of the full pipeline.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::stress::StressMode;
use crate::infrastructure::http::dto::{ApiResponse, StressRequest, StressResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn resolve_stress(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StressRequest>,
) -> Result<Json<ApiResponse<StressResponse>>, ApiError> {
    let mode = StressMode::parse(&request.stress).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "invalid stress mode `{}`, expected one of: dictionary, model",
            request.stress
        ))
    })?;

    let stressed_text = state.orchestrator.resolve_stress(&request.text, mode);
    Ok(Json(ApiResponse::success(StressResponse { stressed_text })))
}
