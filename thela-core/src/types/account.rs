//! Account records from the identity collaborator.

use serde::{Deserialize, Serialize};

use super::common::{Pincode, Role, UserId};

/// Durable account record.
///
/// Seeded by the external identity/session collaborator; the directory core
/// reads it for display-name snapshots and vendor-profile synthesis. The
/// `role` stored here can lag the token-asserted role; authorization always
/// uses the latter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: UserId,
    pub display_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<Pincode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Account {
    pub fn new(id: UserId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
            pincode: None,
            phone: None,
        }
    }

    pub fn with_pincode(mut self, pincode: Pincode) -> Self {
        self.pincode = Some(pincode);
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}
