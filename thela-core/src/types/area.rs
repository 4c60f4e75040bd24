//! Postal area reference data.

use serde::{Deserialize, Serialize};

use super::common::{GeoPoint, Pincode};

/// Read-mostly reference record mapping a pincode to an area name and a
/// representative geographic point. Externally seeded; never mutated by the
/// directory core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostalAreaRecord {
    pub pincode: Pincode,
    pub area_name: String,
    pub location: GeoPoint,
}

impl PostalAreaRecord {
    pub fn new(pincode: Pincode, area_name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            pincode,
            area_name: area_name.into(),
            location,
        }
    }
}

/// The pincode/area pair a coordinate resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArea {
    pub pincode: Pincode,
    pub area_name: String,
}

impl From<&PostalAreaRecord> for ResolvedArea {
    fn from(record: &PostalAreaRecord) -> Self {
        Self {
            pincode: record.pincode.clone(),
            area_name: record.area_name.clone(),
        }
    }
}
