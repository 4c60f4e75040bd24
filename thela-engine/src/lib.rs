//! Vendor discovery and aggregation engine.
//!
//! The five core services of the directory, each a thin request-scoped
//! facade over [`thela_store::DirectoryStore`]:
//!
//! - [`area_index::AreaIndex`] — coordinate→postal-area resolution
//! - [`consensus::RatingConsensus`] — rating consensus maintenance
//! - [`follow_ledger::FollowLedger`] — unique customer→vendor follow edges
//! - [`listing::VendorDirectory`] — ranked, enriched vendor listings
//! - [`discussion::DiscussionBoard`] — pincode/vendor/role-scoped comments
//!
//! plus [`profiles::VendorProfiles`], the idempotent vendor-profile factory
//! the vendor-role paths share. Services hold no state of their own; all
//! durable state lives behind the store and every call re-reads what it
//! needs.

pub mod area_index;
pub mod consensus;
pub mod discussion;
pub mod follow_ledger;
pub mod listing;
pub mod profiles;

pub use area_index::{AreaIndex, MAX_RESOLVE_RADIUS_M};
pub use consensus::RatingConsensus;
pub use discussion::{CommentDraft, DiscussionBoard};
pub use follow_ledger::FollowLedger;
pub use listing::{EnrichedVendor, ListingQuery, SortOrder, VendorDirectory, MAX_CANDIDATES};
pub use profiles::{VendorDraft, VendorProfiles};
