//! Rating consensus maintenance.
//!
//! Every write recomputes the vendor's aggregate from the full set of
//! committed rating rows rather than applying an incremental delta. The
//! write costs one extra read, but the summary cannot drift: the last
//! writer's recomputation reflects every row committed at the time of its
//! read.

use std::sync::Arc;

use thela_core::{
    ConsensusSnapshot, DirectoryError, DirectoryResult, Identity, Rating, RatingSummary, VendorId,
    MAX_RATING_VALUE, MAX_REVIEW_CHARS, MIN_RATING_VALUE,
};
use thela_store::DirectoryStore;

/// Maintains each vendor's `{average, count}` rating consensus.
pub struct RatingConsensus {
    store: Arc<dyn DirectoryStore>,
}

impl RatingConsensus {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Record (or re-record) the caller's rating of a vendor and refresh
    /// the vendor's consensus.
    ///
    /// An existing row for the `(customer, vendor)` pair is updated in
    /// place: the value is always overwritten, the review only when a new
    /// one is supplied.
    pub async fn submit(
        &self,
        identity: &Identity,
        vendor_id: &VendorId,
        value: u8,
        review: Option<String>,
    ) -> DirectoryResult<ConsensusSnapshot> {
        if !(MIN_RATING_VALUE..=MAX_RATING_VALUE).contains(&value) {
            return Err(DirectoryError::validation(format!(
                "rating value must be between {MIN_RATING_VALUE} and {MAX_RATING_VALUE}"
            )));
        }
        if let Some(text) = &review {
            if text.chars().count() > MAX_REVIEW_CHARS {
                return Err(DirectoryError::validation(format!(
                    "review must be at most {MAX_REVIEW_CHARS} characters"
                )));
            }
        }

        let mut vendor = self
            .store
            .get_vendor(vendor_id)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Vendor", vendor_id.as_str()))?;

        let rating = match self.store.get_rating(&identity.user_id, vendor_id).await? {
            Some(mut existing) => {
                existing.value = value;
                if review.is_some() {
                    existing.review = review;
                }
                existing.updated_at = chrono::Utc::now();
                existing
            }
            None => Rating::new(identity.user_id.clone(), vendor_id.clone(), value, review),
        };
        self.store.upsert_rating(&rating).await?;

        // Recompute from the full committed set
        let rows = self.store.ratings_for_vendor(vendor_id).await?;
        let values: Vec<u8> = rows.iter().map(|r| r.value).collect();
        let summary = RatingSummary::from_values(&values);

        vendor.ratings = summary;
        vendor.updated_at = chrono::Utc::now();
        self.store.update_vendor(&vendor).await?;

        tracing::debug!(
            vendor_id = %vendor_id,
            average = summary.average,
            count = summary.count,
            "Rating consensus refreshed"
        );

        Ok(ConsensusSnapshot {
            vendor_id: vendor_id.clone(),
            summary,
            rating,
        })
    }
}
