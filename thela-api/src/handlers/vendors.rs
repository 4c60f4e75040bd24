//! Vendor listing, onboarding, location, and menu endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use thela_core::{GeoPoint, MenuItem, Pincode, Role, Vendor, VendorId, VendorStatus};
use thela_engine::{EnrichedVendor, ListingQuery, SortOrder};

use crate::auth::AuthSession;
use crate::dto::{
    AddMenuItemRequest, ListResponse, ListVendorsQuery, OnboardVendorRequest,
    UpdateLocationRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::handlers::require_role;
use crate::state::AppState;

/// Ranked, enriched vendor listing
pub async fn list_vendors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListVendorsQuery>,
) -> ApiResult<Json<ListResponse<EnrichedVendor>>> {
    let pincode = query
        .pincode
        .as_deref()
        .map(Pincode::parse)
        .transpose()
        .map_err(ApiError::from)?;
    let status = query
        .status
        .as_deref()
        .map(|s| {
            VendorStatus::parse(s)
                .ok_or_else(|| ApiError::validation(format!("unknown vendor status: {s}")))
        })
        .transpose()?;
    let sort = query
        .sort_by
        .as_deref()
        .map(SortOrder::parse)
        .unwrap_or_default();

    let listing = state
        .directory
        .list(&ListingQuery {
            cuisine: query.cuisine,
            pincode,
            status,
            min_rating: query.min_rating,
            sort,
        })
        .await?;
    Ok(Json(listing.into()))
}

/// Enriched fetch of one vendor
pub async fn get_vendor(
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<String>,
) -> ApiResult<Json<EnrichedVendor>> {
    let enriched = state
        .directory
        .get(&VendorId(vendor_id.clone()))
        .await?
        .ok_or_else(|| ApiError::not_found("Vendor", vendor_id))?;
    Ok(Json(enriched))
}

/// Public menu listing for a vendor
pub async fn list_menu(
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<String>,
) -> ApiResult<Json<ListResponse<MenuItem>>> {
    let vendor_id = VendorId(vendor_id);
    state.profiles.require(&vendor_id).await?;
    let items = state
        .store
        .menu_for_vendor(&vendor_id)
        .await
        .map_err(thela_core::DirectoryError::from)?;
    Ok(Json(items.into()))
}

/// Vendor onboarding
pub async fn onboard_vendor(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Json(request): Json<OnboardVendorRequest>,
) -> ApiResult<(StatusCode, Json<Vendor>)> {
    require_role(&identity, Role::Vendor, "onboard a vendor profile")?;
    request.validate()?;

    let vendor = state
        .profiles
        .onboard(
            &identity.user_id,
            thela_engine::VendorDraft {
                business_name: request.business_name,
                cuisine: request.cuisine,
                pincode: Pincode::parse(&request.pincode)?,
                phone: request.phone,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(vendor)))
}

/// Vendor location ping: persists the point and refreshes the pincode
pub async fn update_location(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateLocationRequest>,
) -> ApiResult<Json<Vendor>> {
    require_role(&identity, Role::Vendor, "update a vendor location")?;
    request.validate()?;

    let vendor = state.profiles.ensure(&identity.user_id).await?;
    let point = GeoPoint {
        longitude: request.longitude,
        latitude: request.latitude,
        accuracy: request.accuracy,
    };
    let updated = state.areas.refresh_vendor_location(&vendor.id, point).await?;
    Ok(Json(updated))
}

/// Add an item to the calling vendor's menu
pub async fn add_menu_item(
    AuthSession(identity): AuthSession,
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddMenuItemRequest>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    require_role(&identity, Role::Vendor, "edit a menu")?;
    request.validate()?;

    let vendor = state.profiles.ensure(&identity.user_id).await?;
    let mut item = MenuItem::new(vendor.id, request.name, request.price, request.category);
    item.available = request.available;
    state
        .store
        .insert_menu_item(&item)
        .await
        .map_err(thela_core::DirectoryError::from)?;
    Ok((StatusCode::CREATED, Json(item)))
}
