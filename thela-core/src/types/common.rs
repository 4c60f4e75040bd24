//! Common identifier and value types.
//!
//! Ids are opaque string newtypes (uuid v4 underneath) so that entity
//! references cannot be mixed up across tables.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DirectoryError;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a fresh random id
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, uuid::Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Account identifier supplied by the identity collaborator
    UserId,
    "user"
);
string_id!(
    /// Vendor profile identifier
    VendorId,
    "vendor"
);
string_id!(
    /// Menu item identifier
    MenuItemId,
    "item"
);
string_id!(
    /// Rating row identifier
    RatingId,
    "rating"
);
string_id!(
    /// Comment identifier
    CommentId,
    "comment"
);

/// 6-digit postal code identifying a delivery zone.
///
/// Construction through [`Pincode::parse`] is the single validation point;
/// a held value is always exactly six ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pincode(String);

impl Pincode {
    /// Parse and validate a pincode string
    pub fn parse(raw: &str) -> Result<Self, DirectoryError> {
        if raw.len() == 6 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(DirectoryError::validation(
                "pincode must be exactly 6 digits",
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Geographic point with optional accuracy in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            accuracy: None,
        }
    }
}

/// Caller role asserted by the session layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Vendor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Vendor => "vendor",
        }
    }
}

/// Authenticated caller context.
///
/// The role here is the token-asserted one and takes precedence over the
/// role stored on the account record when the two disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn customer(user_id: impl Into<String>) -> Self {
        Self::new(UserId(user_id.into()), Role::Customer)
    }

    pub fn vendor(user_id: impl Into<String>) -> Self {
        Self::new(UserId(user_id.into()), Role::Vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pincode_accepts_six_digits() {
        let pin = Pincode::parse("560001").unwrap();
        assert_eq!(pin.as_str(), "560001");
    }

    #[test]
    fn test_pincode_rejects_short() {
        assert!(Pincode::parse("12345").is_err());
    }

    #[test]
    fn test_pincode_rejects_non_digits() {
        assert!(Pincode::parse("56000a").is_err());
        assert!(Pincode::parse("5600 1").is_err());
        assert!(Pincode::parse("５６０００１").is_err()); // full-width digits
    }

    #[test]
    fn test_pincode_rejects_seven_digits() {
        assert!(Pincode::parse("5600011").is_err());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(VendorId::generate(), VendorId::generate());
    }

    #[test]
    fn test_id_prefix() {
        assert!(VendorId::generate().as_str().starts_with("vendor_"));
        assert!(UserId::generate().as_str().starts_with("user_"));
    }
}
