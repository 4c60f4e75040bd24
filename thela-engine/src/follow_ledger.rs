//! Customer→vendor follow ledger.
//!
//! The ledger is the sole source of truth for follow relationships; the
//! legacy embedded follower list on the vendor entity is never consulted.
//! Edge uniqueness is enforced by the store, so two concurrent follows for
//! the same pair cannot both succeed.

use std::sync::Arc;

use thela_core::{DirectoryError, DirectoryResult, Follow, UserId, Vendor, VendorId};
use thela_store::DirectoryStore;

pub struct FollowLedger {
    store: Arc<dyn DirectoryStore>,
}

impl FollowLedger {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Create a follow edge; Conflict when it already exists.
    pub async fn follow(&self, customer: &UserId, vendor_id: &VendorId) -> DirectoryResult<Follow> {
        if self.store.get_vendor(vendor_id).await?.is_none() {
            return Err(DirectoryError::not_found("Vendor", vendor_id.as_str()));
        }

        let edge = Follow::new(customer.clone(), vendor_id.clone());
        match self.store.insert_follow(&edge).await {
            Ok(()) => Ok(edge),
            Err(thela_store::StoreError::Conflict(_)) => {
                Err(DirectoryError::conflict("already following this vendor"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a follow edge; NotFound when none exists.
    pub async fn unfollow(&self, customer: &UserId, vendor_id: &VendorId) -> DirectoryResult<()> {
        if self.store.delete_follow(customer, vendor_id).await? {
            Ok(())
        } else {
            Err(DirectoryError::not_found("Follow", vendor_id.as_str()))
        }
    }

    pub async fn is_following(
        &self,
        customer: &UserId,
        vendor_id: &VendorId,
    ) -> DirectoryResult<bool> {
        Ok(self.store.follow_exists(customer, vendor_id).await?)
    }

    /// Live edge count for a vendor
    pub async fn follower_count(&self, vendor_id: &VendorId) -> DirectoryResult<u64> {
        Ok(self.store.count_followers(vendor_id).await?)
    }

    /// Materialize the vendors a customer follows, newest edge first.
    /// Dangling edges (vendor deleted) are skipped.
    pub async fn list_followed(&self, customer: &UserId) -> DirectoryResult<Vec<Vendor>> {
        let edges = self.store.follows_for_customer(customer).await?;
        let mut vendors = Vec::with_capacity(edges.len());
        for edge in &edges {
            match self.store.get_vendor(&edge.vendor_id).await? {
                Some(vendor) => vendors.push(vendor),
                None => {
                    tracing::debug!(
                        customer = %customer,
                        vendor_id = %edge.vendor_id,
                        "Skipping dangling follow edge"
                    );
                }
            }
        }
        Ok(vendors)
    }
}
