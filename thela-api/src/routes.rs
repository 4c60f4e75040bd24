//! API Routes
//!
//! Route definitions for the directory API. Authentication is opt-in per
//! handler through the `AuthSession` extractor; routes listed here without
//! it are public.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let enable_cors = state.config.enable_cors;

    let mut router = Router::new()
        // Health
        .route("/health", get(health_check))
        // Postal areas
        .route("/areas/resolve", get(resolve_area))
        // Vendor discovery and onboarding
        .route("/vendors", get(list_vendors).post(onboard_vendor))
        .route("/vendors/me/location", put(update_location))
        .route("/vendors/me/menu", post(add_menu_item))
        .route("/vendors/my-area/comments", get(vendor_area_comments))
        .route("/vendors/:vendor_id", get(get_vendor))
        .route("/vendors/:vendor_id/menu", get(list_menu))
        .route("/vendors/:vendor_id/comments", get(list_vendor_comments))
        // Ratings
        .route("/vendors/:vendor_id/ratings", post(submit_rating))
        // Follow ledger
        .route(
            "/vendors/:vendor_id/follow",
            post(follow_vendor).delete(unfollow_vendor),
        )
        .route("/customers/me/following", get(list_followed))
        // Discussion
        .route("/comments", post(post_comment).get(list_area_comments))
        .route("/comments/:comment_id", delete(delete_comment))
        .route("/comments/:comment_id/like", post(toggle_like))
        .with_state(state);

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http())
}

/// Create a router for the V1 API with /api/v1 prefix
pub fn create_v1_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api/v1", create_router(state))
}

/// Build the full application router
pub fn build_app(state: AppState) -> Router {
    let state = Arc::new(state);

    let root_router = Router::new().route("/", get(|| async { "Thela Directory API" }));

    let health_router = Router::new()
        .route("/health", get(health_check))
        .with_state(state.clone());

    root_router
        .merge(health_router)
        .merge(create_v1_router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use thela_store::MemoryStore;
    use tower::util::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_vendors_list_endpoint() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/vendors")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_vendor_not_found() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/vendors/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_comment_requires_session() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/comments")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"content":"hi","pincode":"110001"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_resolve_area_without_records() {
        let app = build_app(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/areas/resolve?lat=28.63&lon=77.21")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
