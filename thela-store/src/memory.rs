//! In-memory store backend.
//!
//! Thread-safe implementation used for tests, development, and
//! single-process deployments. Each table lives behind its own `RwLock`;
//! the tables that carry uniqueness constraints keep their unique index in
//! the same locked section as the rows, so constraint checks and writes are
//! atomic with respect to concurrent callers.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use thela_core::types::{
    Account, Comment, CommentId, Follow, MenuItem, MenuItemId, Pincode, PostalAreaRecord, Rating,
    RatingId, UserId, Vendor, VendorId,
};

use crate::error::{StoreError, StoreResult};
use crate::geo::haversine_m;
use crate::store::{CommentFilter, CommentOrder, DirectoryStore, TargetFilter, VendorFilter};

#[derive(Default)]
struct VendorTable {
    rows: HashMap<VendorId, Vendor>,
    by_owner: HashMap<UserId, VendorId>,
}

#[derive(Default)]
struct MenuTable {
    rows: HashMap<MenuItemId, MenuItem>,
    by_vendor: HashMap<VendorId, Vec<MenuItemId>>,
}

#[derive(Default)]
struct RatingTable {
    rows: HashMap<RatingId, Rating>,
    by_pair: HashMap<(UserId, VendorId), RatingId>,
}

/// In-memory [`DirectoryStore`] backend
#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<UserId, Account>>,
    vendors: RwLock<VendorTable>,
    menu: RwLock<MenuTable>,
    ratings: RwLock<RatingTable>,
    follows: RwLock<HashMap<(UserId, VendorId), Follow>>,
    comments: RwLock<HashMap<CommentId, Comment>>,
    areas: RwLock<Vec<PostalAreaRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    // ==================== Accounts ====================

    async fn put_account(&self, account: &Account) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn get_account(&self, user_id: &UserId) -> StoreResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(user_id).cloned())
    }

    // ==================== Vendors ====================

    async fn insert_vendor(&self, vendor: &Vendor) -> StoreResult<()> {
        let mut table = self.vendors.write().await;
        if table.by_owner.contains_key(&vendor.owner) {
            return Err(StoreError::Conflict(format!(
                "owner {} already has a vendor profile",
                vendor.owner
            )));
        }
        table.by_owner.insert(vendor.owner.clone(), vendor.id.clone());
        table.rows.insert(vendor.id.clone(), vendor.clone());
        Ok(())
    }

    async fn get_vendor(&self, id: &VendorId) -> StoreResult<Option<Vendor>> {
        let table = self.vendors.read().await;
        Ok(table.rows.get(id).cloned())
    }

    async fn get_vendor_by_owner(&self, owner: &UserId) -> StoreResult<Option<Vendor>> {
        let table = self.vendors.read().await;
        if let Some(id) = table.by_owner.get(owner) {
            return Ok(table.rows.get(id).cloned());
        }
        Ok(None)
    }

    async fn update_vendor(&self, vendor: &Vendor) -> StoreResult<()> {
        let mut table = self.vendors.write().await;
        if !table.rows.contains_key(&vendor.id) {
            return Err(StoreError::Missing(format!("vendor {}", vendor.id)));
        }
        table.rows.insert(vendor.id.clone(), vendor.clone());
        Ok(())
    }

    async fn find_vendors(&self, filter: &VendorFilter, limit: usize) -> StoreResult<Vec<Vendor>> {
        let table = self.vendors.read().await;
        let cuisine_needle = filter.cuisine.as_ref().map(|c| c.to_lowercase());

        let mut matches: Vec<Vendor> = table
            .rows
            .values()
            .filter(|v| {
                if let Some(needle) = &cuisine_needle {
                    if !v.cuisine.to_lowercase().contains(needle) {
                        return false;
                    }
                }
                if let Some(pincode) = &filter.pincode {
                    if &v.pincode != pincode {
                        return false;
                    }
                }
                if let Some(status) = filter.status {
                    if v.status != status {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        // Deterministic scan order before the cap
        matches.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        matches.truncate(limit);
        Ok(matches)
    }

    // ==================== Menu items ====================

    async fn insert_menu_item(&self, item: &MenuItem) -> StoreResult<()> {
        let mut table = self.menu.write().await;
        table
            .by_vendor
            .entry(item.vendor_id.clone())
            .or_default()
            .push(item.id.clone());
        table.rows.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn menu_for_vendor(&self, vendor_id: &VendorId) -> StoreResult<Vec<MenuItem>> {
        let table = self.menu.read().await;
        let items = table
            .by_vendor
            .get(vendor_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| table.rows.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(items)
    }

    async fn menu_for_vendors(&self, vendor_ids: &[VendorId]) -> StoreResult<Vec<MenuItem>> {
        let table = self.menu.read().await;
        let mut items = Vec::new();
        for vendor_id in vendor_ids {
            if let Some(ids) = table.by_vendor.get(vendor_id) {
                items.extend(ids.iter().filter_map(|id| table.rows.get(id).cloned()));
            }
        }
        Ok(items)
    }

    // ==================== Ratings ====================

    async fn get_rating(
        &self,
        customer: &UserId,
        vendor: &VendorId,
    ) -> StoreResult<Option<Rating>> {
        let table = self.ratings.read().await;
        let key = (customer.clone(), vendor.clone());
        if let Some(id) = table.by_pair.get(&key) {
            return Ok(table.rows.get(id).cloned());
        }
        Ok(None)
    }

    async fn upsert_rating(&self, rating: &Rating) -> StoreResult<()> {
        let mut table = self.ratings.write().await;
        let key = (rating.customer_id.clone(), rating.vendor_id.clone());
        // Evict any existing row for the pair inside the same write
        // section, so the pair can never hold two rows.
        if let Some(old_id) = table.by_pair.insert(key, rating.id.clone()) {
            if old_id != rating.id {
                table.rows.remove(&old_id);
            }
        }
        table.rows.insert(rating.id.clone(), rating.clone());
        Ok(())
    }

    async fn ratings_for_vendor(&self, vendor: &VendorId) -> StoreResult<Vec<Rating>> {
        let table = self.ratings.read().await;
        Ok(table
            .rows
            .values()
            .filter(|r| &r.vendor_id == vendor)
            .cloned()
            .collect())
    }

    // ==================== Follows ====================

    async fn insert_follow(&self, follow: &Follow) -> StoreResult<()> {
        let mut follows = self.follows.write().await;
        let key = (follow.customer_id.clone(), follow.vendor_id.clone());
        if follows.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "follow edge {} -> {} already exists",
                follow.customer_id, follow.vendor_id
            )));
        }
        follows.insert(key, follow.clone());
        Ok(())
    }

    async fn delete_follow(&self, customer: &UserId, vendor: &VendorId) -> StoreResult<bool> {
        let mut follows = self.follows.write().await;
        Ok(follows.remove(&(customer.clone(), vendor.clone())).is_some())
    }

    async fn follow_exists(&self, customer: &UserId, vendor: &VendorId) -> StoreResult<bool> {
        let follows = self.follows.read().await;
        Ok(follows.contains_key(&(customer.clone(), vendor.clone())))
    }

    async fn count_followers(&self, vendor: &VendorId) -> StoreResult<u64> {
        let follows = self.follows.read().await;
        Ok(follows.keys().filter(|(_, v)| v == vendor).count() as u64)
    }

    async fn follows_for_customer(&self, customer: &UserId) -> StoreResult<Vec<Follow>> {
        let follows = self.follows.read().await;
        let mut edges: Vec<Follow> = follows
            .values()
            .filter(|f| &f.customer_id == customer)
            .cloned()
            .collect();
        edges.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(edges)
    }

    // ==================== Comments ====================

    async fn insert_comment(&self, comment: &Comment) -> StoreResult<()> {
        let mut comments = self.comments.write().await;
        comments.insert(comment.id.clone(), comment.clone());
        Ok(())
    }

    async fn get_comment(&self, id: &CommentId) -> StoreResult<Option<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments.get(id).cloned())
    }

    async fn update_comment(&self, comment: &Comment) -> StoreResult<()> {
        let mut comments = self.comments.write().await;
        if !comments.contains_key(&comment.id) {
            return Err(StoreError::Missing(format!("comment {}", comment.id)));
        }
        comments.insert(comment.id.clone(), comment.clone());
        Ok(())
    }

    async fn delete_comment(&self, id: &CommentId) -> StoreResult<bool> {
        let mut comments = self.comments.write().await;
        Ok(comments.remove(id).is_some())
    }

    async fn find_comments(
        &self,
        filter: &CommentFilter,
        limit: usize,
    ) -> StoreResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        let mut matches: Vec<Comment> = comments
            .values()
            .filter(|c| {
                match &filter.target {
                    TargetFilter::GeneralOnly => {
                        if c.vendor_profile.is_some() {
                            return false;
                        }
                    }
                    TargetFilter::Vendor(vendor_id) => {
                        if c.vendor_profile.as_ref() != Some(vendor_id) {
                            return false;
                        }
                    }
                }
                if let Some(pincode) = &filter.pincode {
                    if &c.pincode != pincode {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        match filter.order {
            CommentOrder::Recent => {
                matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            CommentOrder::Likes => {
                matches.sort_by(|a, b| {
                    b.likes
                        .cmp(&a.likes)
                        .then_with(|| b.created_at.cmp(&a.created_at))
                });
            }
        }
        matches.truncate(limit);
        Ok(matches)
    }

    // ==================== Postal areas ====================

    async fn put_area(&self, record: &PostalAreaRecord) -> StoreResult<()> {
        let mut areas = self.areas.write().await;
        if let Some(existing) = areas.iter_mut().find(|a| a.pincode == record.pincode) {
            *existing = record.clone();
        } else {
            areas.push(record.clone());
        }
        Ok(())
    }

    async fn area_by_pincode(&self, pincode: &Pincode) -> StoreResult<Option<PostalAreaRecord>> {
        let areas = self.areas.read().await;
        Ok(areas.iter().find(|a| &a.pincode == pincode).cloned())
    }

    async fn nearest_area(
        &self,
        latitude: f64,
        longitude: f64,
        max_radius_m: f64,
    ) -> StoreResult<Option<PostalAreaRecord>> {
        let areas = self.areas.read().await;
        let mut best: Option<(f64, &PostalAreaRecord)> = None;
        for record in areas.iter() {
            let d = haversine_m(
                latitude,
                longitude,
                record.location.latitude,
                record.location.longitude,
            );
            if d <= max_radius_m && best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, record));
            }
        }
        Ok(best.map(|(_, record)| record.clone()))
    }
}
