//! Vendor and menu entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{GeoPoint, MenuItemId, Pincode, UserId, VendorId};

/// Vendor lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    Open,
    Closed,
    Relocating,
    SoldOut,
}

impl VendorStatus {
    /// Parse a status from its wire form (`open`, `closed`, `relocating`,
    /// `sold_out`)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            "relocating" => Some(Self::Relocating),
            "sold_out" => Some(Self::SoldOut),
            _ => None,
        }
    }
}

/// Aggregate rating consensus stored on the vendor.
///
/// Maintained exclusively by the rating consensus service; always the
/// arithmetic mean (one decimal place) and row count of the vendor's
/// current rating rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self {
            average: 0.0,
            count: 0,
        }
    }
}

impl RatingSummary {
    /// Recompute the summary from the full set of rating values.
    ///
    /// Empty input yields `{average: 0.0, count: 0}`.
    pub fn from_values(values: &[u8]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let sum: u32 = values.iter().map(|v| u32::from(*v)).sum();
        let mean = f64::from(sum) / values.len() as f64;
        Self {
            average: round1(mean),
            count: values.len() as u32,
        }
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Maximum number of image references a vendor may carry
pub const MAX_VENDOR_IMAGES: usize = 5;

/// A street-food vendor profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    /// Owning account; at most one vendor per owner (store-enforced)
    pub owner: UserId,
    pub business_name: String,
    pub cuisine: String,
    pub pincode: Pincode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub ratings: RatingSummary,
    pub status: VendorStatus,
    /// Up to [`MAX_VENDOR_IMAGES`] image references
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Legacy embedded follower list. The follow ledger is authoritative;
    /// this field is kept for wire compatibility and is never consulted.
    #[serde(default)]
    pub followers: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vendor {
    /// Create a new vendor profile with empty consensus and no location
    pub fn new(
        owner: UserId,
        business_name: impl Into<String>,
        cuisine: impl Into<String>,
        pincode: Pincode,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: VendorId::generate(),
            owner,
            business_name: business_name.into(),
            cuisine: cuisine.into(),
            pincode,
            location: None,
            ratings: RatingSummary::default(),
            status: VendorStatus::Open,
            images: Vec::new(),
            phone: None,
            followers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone;
        self
    }
}

/// A single item on a vendor's menu. Owned by its vendor; no independent
/// lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub vendor_id: VendorId,
    pub name: String,
    /// Non-negative price in the vendor's local currency
    pub price: f64,
    pub category: String,
    pub available: bool,
}

impl MenuItem {
    pub fn new(
        vendor_id: VendorId,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: MenuItemId::generate(),
            vendor_id,
            name: name.into(),
            price,
            category: category.into(),
            available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_empty() {
        let summary = RatingSummary::from_values(&[]);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_summary_mean_rounds_to_one_decimal() {
        // (5 + 4 + 4) / 3 = 4.333... -> 4.3
        let summary = RatingSummary::from_values(&[5, 4, 4]);
        assert_eq!(summary.average, 4.3);
        assert_eq!(summary.count, 3);

        // (5 + 4) / 2 = 4.5 stays exact
        let summary = RatingSummary::from_values(&[5, 4]);
        assert_eq!(summary.average, 4.5);
    }

    #[test]
    fn test_summary_single_value() {
        let summary = RatingSummary::from_values(&[2]);
        assert_eq!(summary.average, 2.0);
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(VendorStatus::parse("open"), Some(VendorStatus::Open));
        assert_eq!(VendorStatus::parse("sold_out"), Some(VendorStatus::SoldOut));
        assert_eq!(VendorStatus::parse("demolished"), None);
    }

    #[test]
    fn test_new_vendor_defaults() {
        let vendor = Vendor::new(
            UserId::from("user_1"),
            "Raju Chaat Corner",
            "chaat",
            Pincode::parse("110006").unwrap(),
        );
        assert_eq!(vendor.status, VendorStatus::Open);
        assert_eq!(vendor.ratings.count, 0);
        assert!(vendor.location.is_none());
        assert!(vendor.followers.is_empty());
    }
}
