//! Postal area index: coordinate→pincode resolution.

use std::sync::Arc;

use thela_core::{DirectoryError, DirectoryResult, GeoPoint, Pincode, ResolvedArea, Vendor, VendorId};
use thela_store::DirectoryStore;

/// Maximum nearest-neighbor search radius in meters
pub const MAX_RESOLVE_RADIUS_M: f64 = 5_000.0;

/// Geospatial lookup over the seeded postal area records.
pub struct AreaIndex {
    store: Arc<dyn DirectoryStore>,
}

impl AreaIndex {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Resolve a coordinate to the nearest postal area within
    /// [`MAX_RESOLVE_RADIUS_M`]. NotFound when no record lies inside the
    /// radius.
    pub async fn resolve(&self, latitude: f64, longitude: f64) -> DirectoryResult<ResolvedArea> {
        let record = self
            .store
            .nearest_area(latitude, longitude, MAX_RESOLVE_RADIUS_M)
            .await?;

        record.as_ref().map(ResolvedArea::from).ok_or_else(|| {
            DirectoryError::not_found("PostalArea", format!("{latitude:.4},{longitude:.4}"))
        })
    }

    /// Exact area-name lookup by pincode, used for listing enrichment
    pub async fn area_name(&self, pincode: &Pincode) -> DirectoryResult<Option<String>> {
        let record = self.store.area_by_pincode(pincode).await?;
        Ok(record.map(|r| r.area_name))
    }

    /// Persist a vendor's new location and refresh its pincode.
    ///
    /// The geo point is always written. The pincode is overwritten only
    /// when resolution succeeds and yields a different area; a failed
    /// resolution never clears the existing value (stale-location
    /// tolerance).
    pub async fn refresh_vendor_location(
        &self,
        vendor_id: &VendorId,
        point: GeoPoint,
    ) -> DirectoryResult<Vendor> {
        let mut vendor = self
            .store
            .get_vendor(vendor_id)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Vendor", vendor_id.as_str()))?;

        vendor.location = Some(point);

        match self.resolve(point.latitude, point.longitude).await {
            Ok(area) => {
                if area.pincode != vendor.pincode {
                    tracing::info!(
                        vendor_id = %vendor.id,
                        from = %vendor.pincode,
                        to = %area.pincode,
                        "Vendor moved to a new postal area"
                    );
                    vendor.pincode = area.pincode;
                }
            }
            Err(DirectoryError::NotFound { .. }) => {
                tracing::debug!(
                    vendor_id = %vendor.id,
                    lat = point.latitude,
                    lon = point.longitude,
                    "No postal area within radius; keeping stored pincode"
                );
            }
            Err(e) => return Err(e),
        }

        vendor.updated_at = chrono::Utc::now();
        self.store.update_vendor(&vendor).await?;
        Ok(vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thela_core::{PostalAreaRecord, UserId};
    use thela_store::MemoryStore;

    async fn seeded_index() -> (AreaIndex, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store
            .put_area(&PostalAreaRecord::new(
                Pincode::parse("110001").unwrap(),
                "Connaught Place",
                GeoPoint::new(77.2167, 28.6315),
            ))
            .await
            .unwrap();
        store
            .put_area(&PostalAreaRecord::new(
                Pincode::parse("110006").unwrap(),
                "Chandni Chowk",
                GeoPoint::new(77.2303, 28.6506),
            ))
            .await
            .unwrap();
        (AreaIndex::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_resolve_nearest_within_radius() {
        let (index, _) = seeded_index().await;
        let area = index.resolve(28.6500, 77.2300).await.unwrap();
        assert_eq!(area.pincode.as_str(), "110006");
        assert_eq!(area.area_name, "Chandni Chowk");
    }

    #[tokio::test]
    async fn test_resolve_outside_radius_is_not_found() {
        let (index, _) = seeded_index().await;
        // Jaipur: hundreds of km from either seed record
        let err = index.resolve(26.9124, 75.7873).await.unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_refresh_updates_pincode_on_move() {
        let (index, store) = seeded_index().await;
        let vendor = Vendor::new(
            UserId::from("user_1"),
            "Old Delhi Parathas",
            "north indian",
            Pincode::parse("110001").unwrap(),
        );
        store.insert_vendor(&vendor).await.unwrap();

        let updated = index
            .refresh_vendor_location(&vendor.id, GeoPoint::new(77.2303, 28.6506))
            .await
            .unwrap();
        assert_eq!(updated.pincode.as_str(), "110006");
        assert!(updated.location.is_some());
    }

    #[tokio::test]
    async fn test_refresh_keeps_pincode_when_resolution_fails() {
        let (index, store) = seeded_index().await;
        let vendor = Vendor::new(
            UserId::from("user_1"),
            "Old Delhi Parathas",
            "north indian",
            Pincode::parse("110001").unwrap(),
        );
        store.insert_vendor(&vendor).await.unwrap();

        // Ping from far outside any seeded area
        let updated = index
            .refresh_vendor_location(&vendor.id, GeoPoint::new(75.7873, 26.9124))
            .await
            .unwrap();
        assert_eq!(updated.pincode.as_str(), "110001");
        // Location itself is still persisted
        assert_eq!(updated.location.unwrap().latitude, 26.9124);
    }

    #[tokio::test]
    async fn test_refresh_unknown_vendor_is_not_found() {
        let (index, _) = seeded_index().await;
        let err = index
            .refresh_vendor_location(&VendorId::from("vendor_missing"), GeoPoint::new(77.0, 28.0))
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { .. }));
    }
}
