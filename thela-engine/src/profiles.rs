//! Idempotent vendor-profile factory.
//!
//! Several vendor-role operations need a profile to exist before they can
//! run. Rather than scattering create-if-absent logic across each service,
//! [`VendorProfiles::ensure`] is the single factory invoked at the top of
//! any such operation.

use std::sync::Arc;

use thela_core::{DirectoryError, DirectoryResult, Pincode, UserId, Vendor};
use thela_store::DirectoryStore;

/// Explicit vendor onboarding payload
#[derive(Debug, Clone)]
pub struct VendorDraft {
    pub business_name: String,
    pub cuisine: String,
    pub pincode: Pincode,
    pub phone: Option<String>,
}

/// Vendor profile creation and lookup
pub struct VendorProfiles {
    store: Arc<dyn DirectoryStore>,
}

impl VendorProfiles {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Create a vendor profile for `owner`.
    ///
    /// Owner uniqueness is the store's constraint; a duplicate surfaces as
    /// Conflict.
    pub async fn onboard(&self, owner: &UserId, draft: VendorDraft) -> DirectoryResult<Vendor> {
        if draft.business_name.trim().is_empty() {
            return Err(DirectoryError::validation("business name is required"));
        }

        let vendor = Vendor::new(
            owner.clone(),
            draft.business_name,
            draft.cuisine,
            draft.pincode,
        )
        .with_phone(draft.phone);

        match self.store.insert_vendor(&vendor).await {
            Ok(()) => {
                tracing::info!(vendor_id = %vendor.id, owner = %owner, "Vendor onboarded");
                Ok(vendor)
            }
            Err(thela_store::StoreError::Conflict(_)) => Err(DirectoryError::conflict(
                "account already has a vendor profile",
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Return the owner's vendor profile, synthesizing and persisting one
    /// from the account record when none exists yet.
    ///
    /// Idempotent: when a concurrent caller wins the insert race, the
    /// winner's row is re-read and returned.
    pub async fn ensure(&self, owner: &UserId) -> DirectoryResult<Vendor> {
        if let Some(vendor) = self.store.get_vendor_by_owner(owner).await? {
            return Ok(vendor);
        }

        let account = self
            .store
            .get_account(owner)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Account", owner.as_str()))?;

        let pincode = account.pincode.clone().ok_or_else(|| {
            DirectoryError::validation("account has no pincode to seed a vendor profile")
        })?;

        let vendor = Vendor::new(owner.clone(), account.display_name.clone(), "", pincode)
            .with_phone(account.phone.clone());

        match self.store.insert_vendor(&vendor).await {
            Ok(()) => {
                tracing::info!(vendor_id = %vendor.id, owner = %owner, "Vendor profile synthesized");
                Ok(vendor)
            }
            // Lost the race to a concurrent ensure; the winner's row is
            // authoritative.
            Err(thela_store::StoreError::Conflict(_)) => self
                .store
                .get_vendor_by_owner(owner)
                .await?
                .ok_or_else(|| DirectoryError::Storage("vendor row vanished after conflict".into())),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a vendor by id, mapping absence to NotFound
    pub async fn require(&self, vendor_id: &thela_core::VendorId) -> DirectoryResult<Vendor> {
        self.store
            .get_vendor(vendor_id)
            .await?
            .ok_or_else(|| DirectoryError::not_found("Vendor", vendor_id.as_str()))
    }
}
