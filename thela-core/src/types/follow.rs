//! Follow ledger edges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{UserId, VendorId};

/// A customer→vendor follow edge.
///
/// Unique per `(customer_id, vendor_id)` pair at the storage layer; created
/// on follow, deleted on unfollow, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follow {
    pub customer_id: UserId,
    pub vendor_id: VendorId,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(customer_id: UserId, vendor_id: VendorId) -> Self {
        Self {
            customer_id,
            vendor_id,
            created_at: Utc::now(),
        }
    }
}
