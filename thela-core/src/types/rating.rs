//! Rating rows and the consensus snapshot returned to submitters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{RatingId, UserId, VendorId};
use super::vendor::RatingSummary;

/// Inclusive bounds for a rating value
pub const MIN_RATING_VALUE: u8 = 1;
pub const MAX_RATING_VALUE: u8 = 5;

/// Maximum review length in characters
pub const MAX_REVIEW_CHARS: usize = 500;

/// One customer's rating of one vendor.
///
/// The `(customer_id, vendor_id)` pair is unique at the storage layer;
/// resubmission updates the row in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub customer_id: UserId,
    pub vendor_id: VendorId,
    /// 1..=5 inclusive
    pub value: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(customer_id: UserId, vendor_id: VendorId, value: u8, review: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: RatingId::generate(),
            customer_id,
            vendor_id,
            value,
            review,
            created_at: now,
            updated_at: now,
        }
    }
}

/// What the consensus maintainer returns after a write: the vendor's new
/// aggregate alongside the caller's own (created or updated) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusSnapshot {
    pub vendor_id: VendorId,
    pub summary: RatingSummary,
    pub rating: Rating,
}
