//! Pincode-scoped discussion with role-gated visibility.

use std::sync::Arc;

use thela_core::{
    Comment, CommentId, DirectoryError, DirectoryResult, Identity, Pincode, Role, VendorId,
    MAX_COMMENT_CHARS,
};
use thela_store::{CommentFilter, CommentOrder, DirectoryStore};

use crate::profiles::VendorProfiles;

/// Result cap for the customer area feed and the specific-vendor feed
pub const AREA_FEED_CAP: usize = 100;
/// Result cap for a vendor's own-area feed
pub const VENDOR_AREA_FEED_CAP: usize = 50;

/// A comment to be posted
#[derive(Debug, Clone, Default)]
pub struct CommentDraft {
    pub content: String,
    /// Raw pincode as supplied by the caller; validated here
    pub pincode: Option<String>,
    pub vendor_label: Option<String>,
    pub vendor_profile: Option<VendorId>,
}

/// Scopes comment reads and writes by postal area, vendor identity, and
/// caller role.
pub struct DiscussionBoard {
    store: Arc<dyn DirectoryStore>,
    profiles: VendorProfiles,
}

impl DiscussionBoard {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        let profiles = VendorProfiles::new(store.clone());
        Self { store, profiles }
    }

    /// General area discussion visible to any authenticated caller.
    ///
    /// With a pincode: general comments for that area. Without: every
    /// general comment — vendor-targeted rows are excluded either way; the
    /// unscoped table is never exposed.
    pub async fn area_feed(
        &self,
        pincode: Option<&str>,
        order: CommentOrder,
    ) -> DirectoryResult<Vec<Comment>> {
        let pincode = pincode.map(Pincode::parse).transpose()?;
        let filter = CommentFilter::general(pincode, order);
        Ok(self.store.find_comments(&filter, AREA_FEED_CAP).await?)
    }

    /// General comments from the calling vendor's own postal area.
    ///
    /// Requires the vendor role; the vendor profile is created on the fly
    /// from the account record when it does not exist yet.
    pub async fn vendor_area_feed(&self, identity: &Identity) -> DirectoryResult<Vec<Comment>> {
        if identity.role != Role::Vendor {
            return Err(DirectoryError::forbidden(
                "only vendors may read the vendor area feed",
            ));
        }
        let vendor = self.profiles.ensure(&identity.user_id).await?;
        let filter = CommentFilter::general(Some(vendor.pincode), CommentOrder::Recent);
        Ok(self
            .store
            .find_comments(&filter, VENDOR_AREA_FEED_CAP)
            .await?)
    }

    /// Comments targeting one specific vendor, regardless of pincode.
    pub async fn vendor_feed(&self, vendor_id: &VendorId) -> DirectoryResult<Vec<Comment>> {
        if self.store.get_vendor(vendor_id).await?.is_none() {
            return Err(DirectoryError::not_found("Vendor", vendor_id.as_str()));
        }
        let filter = CommentFilter::vendor(vendor_id.clone());
        Ok(self.store.find_comments(&filter, AREA_FEED_CAP).await?)
    }

    /// Post a comment. Customers only; the pincode comes from the draft or
    /// is inherited from the targeted vendor profile.
    pub async fn post(&self, identity: &Identity, draft: CommentDraft) -> DirectoryResult<Comment> {
        if identity.role != Role::Customer {
            return Err(DirectoryError::forbidden("only customers may post comments"));
        }
        if draft.content.trim().is_empty() {
            return Err(DirectoryError::validation("comment content is required"));
        }
        if draft.content.chars().count() > MAX_COMMENT_CHARS {
            return Err(DirectoryError::validation(format!(
                "comment must be at most {MAX_COMMENT_CHARS} characters"
            )));
        }

        let target = match &draft.vendor_profile {
            Some(vendor_id) => Some(self.profiles.require(vendor_id).await?),
            None => None,
        };

        let pincode = match draft.pincode.as_deref() {
            Some(raw) => Pincode::parse(raw)?,
            None => match &target {
                Some(vendor) => vendor.pincode.clone(),
                None => return Err(DirectoryError::validation("postal code is required")),
            },
        };

        let account = self
            .store
            .get_account(&identity.user_id)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Account", identity.user_id.as_str()))?;

        let mut comment = Comment::new(
            identity.user_id.clone(),
            account.display_name,
            pincode,
            draft.content,
        );
        comment.vendor_label = draft.vendor_label;
        comment.vendor_profile = draft.vendor_profile;

        self.store.insert_comment(&comment).await?;
        Ok(comment)
    }

    /// Toggle the caller's like on a comment; returns the updated comment.
    pub async fn toggle_like(
        &self,
        identity: &Identity,
        comment_id: &CommentId,
    ) -> DirectoryResult<Comment> {
        let mut comment = self
            .store
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Comment", comment_id.as_str()))?;

        comment.toggle_like(&identity.user_id);
        self.store.update_comment(&comment).await?;
        Ok(comment)
    }

    /// Delete a comment; permitted only to its author.
    pub async fn delete(&self, identity: &Identity, comment_id: &CommentId) -> DirectoryResult<()> {
        let comment = self
            .store
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Comment", comment_id.as_str()))?;

        if comment.author != identity.user_id {
            return Err(DirectoryError::forbidden(
                "only the author may delete a comment",
            ));
        }
        self.store.delete_comment(comment_id).await?;
        Ok(())
    }
}
