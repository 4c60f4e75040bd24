//! Postal area resolution endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use thela_core::ResolvedArea;

use crate::dto::ResolveAreaQuery;
use crate::error::ApiResult;
use crate::state::AppState;

/// Resolve coordinates to the nearest postal area within the search radius
pub async fn resolve_area(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveAreaQuery>,
) -> ApiResult<Json<ResolvedArea>> {
    let area = state.areas.resolve(query.lat, query.lon).await?;
    Ok(Json(area))
}
