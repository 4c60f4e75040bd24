//! Rating submission endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use thela_core::{ConsensusSnapshot, Role, VendorId};

use crate::auth::AuthSession;
use crate::dto::SubmitRatingRequest;
use crate::error::ApiResult;
use crate::handlers::require_role;
use crate::state::AppState;

/// Submit or re-submit the caller's rating of a vendor
pub async fn submit_rating(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<String>,
    Json(request): Json<SubmitRatingRequest>,
) -> ApiResult<Json<ConsensusSnapshot>> {
    require_role(&identity, Role::Customer, "rate a vendor")?;
    request.validate()?;

    let snapshot = state
        .consensus
        .submit(
            &identity,
            &VendorId(vendor_id),
            request.value,
            request.review,
        )
        .await?;
    Ok(Json(snapshot))
}
