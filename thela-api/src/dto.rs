//! Data Transfer Objects
//!
//! Request and response DTOs for the directory API. Domain entities
//! (`EnrichedVendor`, `Comment`, `ConsensusSnapshot`, ...) already carry
//! their wire shape and are serialized directly; the DTOs here cover
//! inbound payloads and the thin response envelopes.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================
// Query DTOs
// ============================================

/// Coordinates to resolve to a postal area
#[derive(Debug, Deserialize)]
pub struct ResolveAreaQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Vendor listing filter parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListVendorsQuery {
    pub cuisine: Option<String>,
    pub pincode: Option<String>,
    pub status: Option<String>,
    pub min_rating: Option<f64>,
    pub sort_by: Option<String>,
}

/// Area comment feed parameters
#[derive(Debug, Default, Deserialize)]
pub struct AreaCommentsQuery {
    pub pincode: Option<String>,
    pub sort_by: Option<String>,
}

// ============================================
// Request DTOs
// ============================================

/// Vendor onboarding payload
#[derive(Debug, Deserialize, Validate)]
pub struct OnboardVendorRequest {
    #[validate(length(min = 1, max = 120))]
    pub business_name: String,
    #[validate(length(max = 60))]
    pub cuisine: String,
    pub pincode: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

/// Vendor location ping
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    pub accuracy: Option<f64>,
}

/// New menu item payload
#[derive(Debug, Deserialize, Validate)]
pub struct AddMenuItemRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(max = 60))]
    pub category: String,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

/// Rating submission payload
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRatingRequest {
    pub value: u8,
    #[validate(length(max = 500))]
    pub review: Option<String>,
}

/// New comment payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PostCommentRequest {
    #[validate(length(min = 1, max = 500))]
    pub content: String,
    pub pincode: Option<String>,
    #[validate(length(max = 120))]
    pub vendor_label: Option<String>,
    pub vendor_profile: Option<String>,
}

// ============================================
// Response DTOs
// ============================================

/// Simple list envelope
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// Follow state after a ledger mutation
#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub vendor_id: String,
    pub following: bool,
    pub follower_count: u64,
}

/// Acknowledgement for deletions
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health report
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}
