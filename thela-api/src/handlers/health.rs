//! Health endpoint.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::dto::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Health check handler
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.config.version.clone(),
        uptime_secs: state.uptime_secs(),
    }))
}
