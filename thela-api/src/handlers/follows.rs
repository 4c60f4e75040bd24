//! Follow ledger endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use thela_core::{Role, Vendor, VendorId};

use crate::auth::AuthSession;
use crate::dto::{FollowResponse, ListResponse};
use crate::error::ApiResult;
use crate::handlers::require_role;
use crate::state::AppState;

/// Follow a vendor
pub async fn follow_vendor(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<String>,
) -> ApiResult<(StatusCode, Json<FollowResponse>)> {
    require_role(&identity, Role::Customer, "follow a vendor")?;

    let vendor_id = VendorId(vendor_id);
    state.ledger.follow(&identity.user_id, &vendor_id).await?;
    let follower_count = state.ledger.follower_count(&vendor_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(FollowResponse {
            vendor_id: vendor_id.0,
            following: true,
            follower_count,
        }),
    ))
}

/// Unfollow a vendor
pub async fn unfollow_vendor(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<String>,
) -> ApiResult<Json<FollowResponse>> {
    require_role(&identity, Role::Customer, "unfollow a vendor")?;

    let vendor_id = VendorId(vendor_id);
    state.ledger.unfollow(&identity.user_id, &vendor_id).await?;
    let follower_count = state.ledger.follower_count(&vendor_id).await?;
    Ok(Json(FollowResponse {
        vendor_id: vendor_id.0,
        following: false,
        follower_count,
    }))
}

/// Vendors the caller follows, newest first
pub async fn list_followed(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListResponse<Vendor>>> {
    require_role(&identity, Role::Customer, "list followed vendors")?;

    let vendors = state.ledger.list_followed(&identity.user_id).await?;
    Ok(Json(vendors.into()))
}
