//! Vendor aggregation and ranking.
//!
//! Pure read-side composition: candidate vendors from one capped store
//! query, menu prices from one batch fetch, area names from the postal
//! index, then filter and sort in memory. Nothing here is persisted; the
//! enriched view is reassembled per request so derived fields cannot drift
//! from their sources.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use thela_core::{DirectoryResult, Pincode, Vendor, VendorId, VendorStatus};
use thela_store::{DirectoryStore, VendorFilter};

use crate::area_index::AreaIndex;

/// Candidate cap applied at the storage query.
///
/// The cap runs before any `min_rating` filtering, so a listing that
/// combines a busy filter with a high rating floor can under-report
/// qualifying vendors. Known approximate-listing policy.
pub const MAX_CANDIDATES: usize = 50;

/// Listing sort orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Business name, case-sensitive lexicographic ascending
    #[default]
    Name,
    /// Average rating, descending
    Rating,
    /// Rating count descending — an engagement proxy, not a live follower
    /// count
    Followers,
    /// Average menu price, descending
    PriceHigh,
    /// Average menu price, ascending
    PriceLow,
}

impl SortOrder {
    /// Parse the wire form; anything unrecognized falls back to the
    /// default name ordering.
    pub fn parse(s: &str) -> Self {
        match s {
            "rating" => Self::Rating,
            "followers" => Self::Followers,
            "price_high" => Self::PriceHigh,
            "price_low" => Self::PriceLow,
            _ => Self::Name,
        }
    }
}

/// Listing request
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Case-insensitive cuisine substring
    pub cuisine: Option<String>,
    pub pincode: Option<Pincode>,
    pub status: Option<VendorStatus>,
    /// Drop vendors whose consensus average is below this
    pub min_rating: Option<f64>,
    pub sort: SortOrder,
}

/// A vendor augmented at read time with derived fields
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedVendor {
    #[serde(flatten)]
    pub vendor: Vendor,
    pub average_menu_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_name: Option<String>,
}

/// The vendor listing engine.
pub struct VendorDirectory {
    store: Arc<dyn DirectoryStore>,
    areas: AreaIndex,
}

impl VendorDirectory {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        let areas = AreaIndex::new(store.clone());
        Self { store, areas }
    }

    /// Assemble the ranked, enriched listing for a filter request.
    pub async fn list(&self, query: &ListingQuery) -> DirectoryResult<Vec<EnrichedVendor>> {
        let filter = VendorFilter {
            cuisine: query.cuisine.clone(),
            pincode: query.pincode.clone(),
            status: query.status,
        };
        let candidates = self.store.find_vendors(&filter, MAX_CANDIDATES).await?;

        let mut enriched = self.enrich(candidates).await?;

        if let Some(min_rating) = query.min_rating {
            enriched.retain(|e| e.vendor.ratings.average >= min_rating);
        }

        sort_listing(&mut enriched, query.sort);
        Ok(enriched)
    }

    /// Enriched fetch of a single vendor
    pub async fn get(&self, vendor_id: &VendorId) -> DirectoryResult<Option<EnrichedVendor>> {
        let Some(vendor) = self.store.get_vendor(vendor_id).await? else {
            return Ok(None);
        };
        let mut enriched = self.enrich(vec![vendor]).await?;
        Ok(enriched.pop())
    }

    /// Join menu-price averages and area names onto the candidates.
    /// One batch menu query for the whole set; area resolution is
    /// best-effort per vendor.
    async fn enrich(&self, candidates: Vec<Vendor>) -> DirectoryResult<Vec<EnrichedVendor>> {
        let ids: Vec<VendorId> = candidates.iter().map(|v| v.id.clone()).collect();
        let items = self.store.menu_for_vendors(&ids).await?;

        let mut price_groups: HashMap<VendorId, (f64, u32)> = HashMap::new();
        for item in &items {
            let entry = price_groups.entry(item.vendor_id.clone()).or_insert((0.0, 0));
            entry.0 += item.price;
            entry.1 += 1;
        }

        let mut enriched = Vec::with_capacity(candidates.len());
        for vendor in candidates {
            let average_menu_price = price_groups
                .get(&vendor.id)
                .map(|(sum, count)| sum / f64::from(*count))
                .unwrap_or(0.0);
            let area_name = self.areas.area_name(&vendor.pincode).await.unwrap_or_else(|e| {
                tracing::debug!(pincode = %vendor.pincode, error = %e, "Area lookup failed");
                None
            });
            enriched.push(EnrichedVendor {
                vendor,
                average_menu_price,
                area_name,
            });
        }
        Ok(enriched)
    }
}

fn sort_listing(listing: &mut [EnrichedVendor], order: SortOrder) {
    match order {
        SortOrder::Name => {
            listing.sort_by(|a, b| a.vendor.business_name.cmp(&b.vendor.business_name));
        }
        SortOrder::Rating => {
            listing.sort_by(|a, b| b.vendor.ratings.average.total_cmp(&a.vendor.ratings.average));
        }
        SortOrder::Followers => {
            listing.sort_by(|a, b| b.vendor.ratings.count.cmp(&a.vendor.ratings.count));
        }
        SortOrder::PriceHigh => {
            listing.sort_by(|a, b| b.average_menu_price.total_cmp(&a.average_menu_price));
        }
        SortOrder::PriceLow => {
            listing.sort_by(|a, b| a.average_menu_price.total_cmp(&b.average_menu_price));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thela_core::{GeoPoint, MenuItem, PostalAreaRecord, RatingSummary, UserId};
    use thela_store::MemoryStore;

    fn pin(raw: &str) -> Pincode {
        Pincode::parse(raw).unwrap()
    }

    async fn seed_vendor(
        store: &MemoryStore,
        owner: &str,
        name: &str,
        cuisine: &str,
        pincode: &str,
        average: f64,
        count: u32,
        prices: &[f64],
    ) -> VendorId {
        let mut vendor = Vendor::new(UserId::from(owner), name, cuisine, pin(pincode));
        vendor.ratings = RatingSummary { average, count };
        store.insert_vendor(&vendor).await.unwrap();
        for price in prices {
            store
                .insert_menu_item(&MenuItem::new(vendor.id.clone(), "item", *price, "misc"))
                .await
                .unwrap();
        }
        vendor.id
    }

    async fn directory() -> (VendorDirectory, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (VendorDirectory::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_average_menu_price() {
        let (directory, store) = directory().await;
        let id = seed_vendor(&store, "o1", "A", "chaat", "110001", 0.0, 0, &[10.0, 20.0, 30.0])
            .await;

        let listing = directory.list(&ListingQuery::default()).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].vendor.id, id);
        assert_eq!(listing[0].average_menu_price, 20.0);
    }

    #[tokio::test]
    async fn test_empty_menu_averages_to_zero() {
        let (directory, store) = directory().await;
        seed_vendor(&store, "o1", "A", "chaat", "110001", 0.0, 0, &[]).await;

        let listing = directory.list(&ListingQuery::default()).await.unwrap();
        assert_eq!(listing[0].average_menu_price, 0.0);
    }

    #[tokio::test]
    async fn test_area_name_enrichment_is_best_effort() {
        let (directory, store) = directory().await;
        store
            .put_area(&PostalAreaRecord::new(
                pin("110001"),
                "Connaught Place",
                GeoPoint::new(77.2167, 28.6315),
            ))
            .await
            .unwrap();
        seed_vendor(&store, "o1", "A", "chaat", "110001", 0.0, 0, &[]).await;
        seed_vendor(&store, "o2", "B", "chaat", "999999", 0.0, 0, &[]).await;

        let listing = directory.list(&ListingQuery::default()).await.unwrap();
        assert_eq!(listing[0].area_name.as_deref(), Some("Connaught Place"));
        assert!(listing[1].area_name.is_none());
    }

    #[tokio::test]
    async fn test_min_rating_drops_low_vendors() {
        let (directory, store) = directory().await;
        seed_vendor(&store, "o1", "A", "chaat", "110001", 4.5, 10, &[]).await;
        seed_vendor(&store, "o2", "B", "chaat", "110001", 3.0, 4, &[]).await;

        let query = ListingQuery {
            min_rating: Some(4.0),
            ..Default::default()
        };
        let listing = directory.list(&query).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].vendor.business_name, "A");
    }

    #[tokio::test]
    async fn test_sort_by_rating_is_non_increasing() {
        let (directory, store) = directory().await;
        seed_vendor(&store, "o1", "A", "chaat", "110001", 3.1, 5, &[]).await;
        seed_vendor(&store, "o2", "B", "chaat", "110001", 4.8, 9, &[]).await;
        seed_vendor(&store, "o3", "C", "chaat", "110001", 4.2, 2, &[]).await;

        let query = ListingQuery {
            sort: SortOrder::Rating,
            ..Default::default()
        };
        let listing = directory.list(&query).await.unwrap();
        let averages: Vec<f64> = listing.iter().map(|e| e.vendor.ratings.average).collect();
        assert!(averages.windows(2).all(|w| w[0] >= w[1]), "{averages:?}");
    }

    #[tokio::test]
    async fn test_sort_by_price_low_is_non_decreasing() {
        let (directory, store) = directory().await;
        seed_vendor(&store, "o1", "A", "chaat", "110001", 0.0, 0, &[50.0]).await;
        seed_vendor(&store, "o2", "B", "chaat", "110001", 0.0, 0, &[20.0, 30.0]).await;
        seed_vendor(&store, "o3", "C", "chaat", "110001", 0.0, 0, &[]).await;

        let query = ListingQuery {
            sort: SortOrder::PriceLow,
            ..Default::default()
        };
        let listing = directory.list(&query).await.unwrap();
        let prices: Vec<f64> = listing.iter().map(|e| e.average_menu_price).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]), "{prices:?}");
        assert_eq!(prices[0], 0.0);
    }

    #[tokio::test]
    async fn test_sort_by_followers_uses_rating_count() {
        let (directory, store) = directory().await;
        seed_vendor(&store, "o1", "A", "chaat", "110001", 4.0, 2, &[]).await;
        seed_vendor(&store, "o2", "B", "chaat", "110001", 3.0, 9, &[]).await;

        let query = ListingQuery {
            sort: SortOrder::Followers,
            ..Default::default()
        };
        let listing = directory.list(&query).await.unwrap();
        assert_eq!(listing[0].vendor.business_name, "B");
    }

    #[tokio::test]
    async fn test_default_sort_is_name_case_sensitive() {
        let (directory, store) = directory().await;
        seed_vendor(&store, "o1", "banana leaf", "south", "110001", 0.0, 0, &[]).await;
        seed_vendor(&store, "o2", "Anna Idli", "south", "110001", 0.0, 0, &[]).await;
        seed_vendor(&store, "o3", "Zam Zam", "mughlai", "110001", 0.0, 0, &[]).await;

        let listing = directory.list(&ListingQuery::default()).await.unwrap();
        let names: Vec<&str> = listing
            .iter()
            .map(|e| e.vendor.business_name.as_str())
            .collect();
        // Uppercase sorts before lowercase in a case-sensitive ordering
        assert_eq!(names, vec!["Anna Idli", "Zam Zam", "banana leaf"]);
    }

    #[tokio::test]
    async fn test_filters_compose() {
        let (directory, store) = directory().await;
        seed_vendor(&store, "o1", "A", "South Indian", "110001", 0.0, 0, &[]).await;
        seed_vendor(&store, "o2", "B", "South Indian", "560001", 0.0, 0, &[]).await;
        seed_vendor(&store, "o3", "C", "chaat", "110001", 0.0, 0, &[]).await;

        let query = ListingQuery {
            cuisine: Some("south".to_string()),
            pincode: Some(pin("110001")),
            ..Default::default()
        };
        let listing = directory.list(&query).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].vendor.business_name, "A");
    }

    #[tokio::test]
    async fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("rating"), SortOrder::Rating);
        assert_eq!(SortOrder::parse("price_low"), SortOrder::PriceLow);
        assert_eq!(SortOrder::parse("price_high"), SortOrder::PriceHigh);
        assert_eq!(SortOrder::parse("followers"), SortOrder::Followers);
        assert_eq!(SortOrder::parse("anything-else"), SortOrder::Name);
    }
}
