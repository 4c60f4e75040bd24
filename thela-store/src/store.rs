//! The document storage interface consumed by the directory core.

use async_trait::async_trait;

use thela_core::types::{
    Account, Comment, CommentId, Follow, MenuItem, Pincode, PostalAreaRecord, Rating, UserId,
    Vendor, VendorId, VendorStatus,
};

use crate::error::StoreResult;

/// Vendor listing filter. All criteria are conjunctive; `cuisine` is a
/// case-insensitive substring match, the rest are exact.
#[derive(Debug, Clone, Default)]
pub struct VendorFilter {
    pub cuisine: Option<String>,
    pub pincode: Option<Pincode>,
    pub status: Option<VendorStatus>,
}

/// Which comments a find targets.
///
/// `GeneralOnly` excludes every vendor-targeted row — there is no filter
/// that returns the unscoped table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetFilter {
    /// Comments with no vendor-profile target
    GeneralOnly,
    /// Comments targeting exactly this vendor
    Vendor(VendorId),
}

/// Comment ordering applied before the result cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentOrder {
    /// Newest first
    #[default]
    Recent,
    /// Most liked first
    Likes,
}

#[derive(Debug, Clone)]
pub struct CommentFilter {
    pub target: TargetFilter,
    /// Exact pincode constraint; `None` means any pincode
    pub pincode: Option<Pincode>,
    pub order: CommentOrder,
}

impl CommentFilter {
    /// General-discussion filter, optionally scoped to one pincode
    pub fn general(pincode: Option<Pincode>, order: CommentOrder) -> Self {
        Self {
            target: TargetFilter::GeneralOnly,
            pincode,
            order,
        }
    }

    /// All comments targeting one vendor, regardless of pincode
    pub fn vendor(vendor_id: VendorId) -> Self {
        Self {
            target: TargetFilter::Vendor(vendor_id),
            pincode: None,
            order: CommentOrder::Recent,
        }
    }
}

/// Document storage operations required by the directory core.
///
/// Backends enforce three uniqueness constraints inside their own write
/// sections: one vendor per owner, one rating per `(customer, vendor)`
/// pair, one follow edge per `(customer, vendor)` pair. Filtered finds
/// apply their ordering before the result cap.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    // ==================== Accounts ====================

    /// Insert or replace an account record (identity-collaborator seed data)
    async fn put_account(&self, account: &Account) -> StoreResult<()>;

    async fn get_account(&self, user_id: &UserId) -> StoreResult<Option<Account>>;

    // ==================== Vendors ====================

    /// Insert a vendor; fails with `Conflict` when the owner already has one
    async fn insert_vendor(&self, vendor: &Vendor) -> StoreResult<()>;

    async fn get_vendor(&self, id: &VendorId) -> StoreResult<Option<Vendor>>;

    async fn get_vendor_by_owner(&self, owner: &UserId) -> StoreResult<Option<Vendor>>;

    /// Replace an existing vendor row; fails with `Missing` when absent
    async fn update_vendor(&self, vendor: &Vendor) -> StoreResult<()>;

    /// Filtered find, capped at `limit` rows (applied at the query)
    async fn find_vendors(&self, filter: &VendorFilter, limit: usize) -> StoreResult<Vec<Vendor>>;

    // ==================== Menu items ====================

    async fn insert_menu_item(&self, item: &MenuItem) -> StoreResult<()>;

    async fn menu_for_vendor(&self, vendor_id: &VendorId) -> StoreResult<Vec<MenuItem>>;

    /// Batch fetch: every menu item belonging to any of the given vendors
    async fn menu_for_vendors(&self, vendor_ids: &[VendorId]) -> StoreResult<Vec<MenuItem>>;

    // ==================== Ratings ====================

    async fn get_rating(
        &self,
        customer: &UserId,
        vendor: &VendorId,
    ) -> StoreResult<Option<Rating>>;

    /// Insert or replace the rating for the row's `(customer, vendor)`
    /// pair. The pair index is maintained in the same write section, so two
    /// concurrent submissions for one pair cannot create two rows.
    async fn upsert_rating(&self, rating: &Rating) -> StoreResult<()>;

    async fn ratings_for_vendor(&self, vendor: &VendorId) -> StoreResult<Vec<Rating>>;

    // ==================== Follows ====================

    /// Insert a follow edge; fails with `Conflict` when it already exists
    async fn insert_follow(&self, follow: &Follow) -> StoreResult<()>;

    /// Delete an edge; returns whether one existed
    async fn delete_follow(&self, customer: &UserId, vendor: &VendorId) -> StoreResult<bool>;

    async fn follow_exists(&self, customer: &UserId, vendor: &VendorId) -> StoreResult<bool>;

    /// Live edge count for a vendor — never a cached field
    async fn count_followers(&self, vendor: &VendorId) -> StoreResult<u64>;

    /// A customer's follow edges, newest first
    async fn follows_for_customer(&self, customer: &UserId) -> StoreResult<Vec<Follow>>;

    // ==================== Comments ====================

    async fn insert_comment(&self, comment: &Comment) -> StoreResult<()>;

    async fn get_comment(&self, id: &CommentId) -> StoreResult<Option<Comment>>;

    /// Replace an existing comment row; fails with `Missing` when absent
    async fn update_comment(&self, comment: &Comment) -> StoreResult<()>;

    /// Delete a comment; returns whether one existed
    async fn delete_comment(&self, id: &CommentId) -> StoreResult<bool>;

    /// Filtered find, ordered per the filter, capped at `limit`
    async fn find_comments(
        &self,
        filter: &CommentFilter,
        limit: usize,
    ) -> StoreResult<Vec<Comment>>;

    // ==================== Postal areas ====================

    /// Seed or replace a postal area record
    async fn put_area(&self, record: &PostalAreaRecord) -> StoreResult<()>;

    async fn area_by_pincode(&self, pincode: &Pincode) -> StoreResult<Option<PostalAreaRecord>>;

    /// Nearest postal area record within `max_radius_m` meters of the
    /// coordinate, or `None` when no record lies inside the radius
    async fn nearest_area(
        &self,
        latitude: f64,
        longitude: f64,
        max_radius_m: f64,
    ) -> StoreResult<Option<PostalAreaRecord>>;
}
