//! Discussion endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use thela_core::{Comment, CommentId, VendorId};
use thela_engine::CommentDraft;
use thela_store::CommentOrder;

use crate::auth::AuthSession;
use crate::dto::{AreaCommentsQuery, ListResponse, MessageResponse, PostCommentRequest};
use crate::error::ApiResult;
use crate::state::AppState;

fn comment_order(sort_by: Option<&str>) -> CommentOrder {
    match sort_by {
        Some("likes") => CommentOrder::Likes,
        _ => CommentOrder::Recent,
    }
}

/// Post a comment (customers only; enforced by the discussion scoper)
pub async fn post_comment(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Json(request): Json<PostCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    request.validate()?;

    let comment = state
        .board
        .post(
            &identity,
            CommentDraft {
                content: request.content,
                pincode: request.pincode,
                vendor_label: request.vendor_label,
                vendor_profile: request.vendor_profile.map(VendorId),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// General area discussion, scoped by pincode when supplied
pub async fn list_area_comments(
    AuthSession(_identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Query(query): Query<AreaCommentsQuery>,
) -> ApiResult<Json<ListResponse<Comment>>> {
    let feed = state
        .board
        .area_feed(query.pincode.as_deref(), comment_order(query.sort_by.as_deref()))
        .await?;
    Ok(Json(feed.into()))
}

/// General comments from the calling vendor's own postal area
pub async fn vendor_area_comments(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListResponse<Comment>>> {
    let feed = state.board.vendor_area_feed(&identity).await?;
    Ok(Json(feed.into()))
}

/// Public feed of comments targeting one vendor
pub async fn list_vendor_comments(
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<String>,
) -> ApiResult<Json<ListResponse<Comment>>> {
    let feed = state.board.vendor_feed(&VendorId(vendor_id)).await?;
    Ok(Json(feed.into()))
}

/// Toggle the caller's like on a comment
pub async fn toggle_like(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<Comment>> {
    let comment = state
        .board
        .toggle_like(&identity, &CommentId(comment_id))
        .await?;
    Ok(Json(comment))
}

/// Delete the caller's own comment
pub async fn delete_comment(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.board.delete(&identity, &CommentId(comment_id)).await?;
    Ok(Json(MessageResponse {
        message: "comment deleted".to_string(),
    }))
}
