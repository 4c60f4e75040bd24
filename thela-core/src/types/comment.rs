//! Pincode-scoped discussion comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{CommentId, Pincode, UserId, VendorId};

/// Maximum comment body length in characters
pub const MAX_COMMENT_CHARS: usize = 500;

/// A discussion comment.
///
/// Targeting invariant: `vendor_profile` is `None` for general area
/// discussion (visible by pincode) or names exactly one vendor (visible only
/// through that vendor's feed). `likes` always equals `liked_by.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: UserId,
    /// Author display name snapshotted at creation
    pub author_name: String,
    pub pincode: Pincode,
    pub content: String,
    /// Free-text vendor label, e.g. "the dosa cart near the metro gate"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_label: Option<String>,
    /// Specific vendor this comment targets, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_profile: Option<VendorId>,
    pub likes: u32,
    pub liked_by: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: UserId, author_name: impl Into<String>, pincode: Pincode, content: impl Into<String>) -> Self {
        Self {
            id: CommentId::generate(),
            author,
            author_name: author_name.into(),
            pincode,
            content: content.into(),
            vendor_label: None,
            vendor_profile: None,
            likes: 0,
            liked_by: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Toggle `user` in the like set, keeping `likes` equal to the set
    /// cardinality. Returns true when the user now likes the comment.
    pub fn toggle_like(&mut self, user: &UserId) -> bool {
        if let Some(pos) = self.liked_by.iter().position(|u| u == user) {
            self.liked_by.remove(pos);
            self.likes = self.likes.saturating_sub(1);
            false
        } else {
            self.liked_by.push(user.clone());
            self.likes = self.liked_by.len() as u32;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_comment() -> Comment {
        Comment::new(
            UserId::from("user_a"),
            "Asha",
            Pincode::parse("400050").unwrap(),
            "The pav bhaji stall is back after the rains",
        )
    }

    #[test]
    fn test_like_toggle_round_trip() {
        let mut comment = sample_comment();
        let user = UserId::from("user_b");

        assert!(comment.toggle_like(&user));
        assert_eq!(comment.likes, 1);
        assert_eq!(comment.liked_by.len(), 1);

        assert!(!comment.toggle_like(&user));
        assert_eq!(comment.likes, 0);
        assert!(comment.liked_by.is_empty());
    }

    #[test]
    fn test_like_count_tracks_distinct_users() {
        let mut comment = sample_comment();
        comment.toggle_like(&UserId::from("u1"));
        comment.toggle_like(&UserId::from("u2"));
        comment.toggle_like(&UserId::from("u1"));
        assert_eq!(comment.likes, 1);
        assert_eq!(comment.liked_by, vec![UserId::from("u2")]);
    }

    #[test]
    fn test_unlike_floors_at_zero() {
        let mut comment = sample_comment();
        // Inconsistent seed data: counter behind the set
        comment.likes = 0;
        comment.liked_by.push(UserId::from("u1"));
        comment.toggle_like(&UserId::from("u1"));
        assert_eq!(comment.likes, 0);
    }
}
