//! Farmer management endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};

use farm_core::constants::MAX_PAGE_LIMIT;
use farm_core::types::{FarmerId, FarmerRecord, FarmerUpdate};
use farm_db::{FarmerFilter, NewFarmer};

use crate::dto::{FarmerResponse, ListQueryParams, PaginatedResponse, RegisterFarmerRequest};
use crate::error::{ApiError, ApiResult};
use crate::routes::require_admin;
use crate::state::AppState;

/// Register a new farmer
pub async fn register_farmer(
    State(state): State<AppState>,
    Json(req): Json<RegisterFarmerRequest>,
) -> ApiResult<Json<FarmerResponse>> {
    let record = state
        .farmers
        .register_farmer(NewFarmer {
            phone: req.phone,
            name: req.name,
            location: req.location,
            coordinates: req.coordinates,
            language: req.language.unwrap_or_else(|| "en".to_string()),
            crops: req.crops,
            field_boundaries: req.field_boundaries,
        })
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(farmer_to_response(&record)))
}

/// Get farmer by ID
pub async fn get_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<String>,
) -> ApiResult<Json<FarmerResponse>> {
    let farmer = state
        .farmers
        .get_farmer(&FarmerId(farmer_id.clone()))
        .await
        .map_err(ApiError::Domain)?
        .ok_or_else(|| ApiError::NotFound(format!("Farmer {} not found", farmer_id)))?;

    Ok(Json(farmer_to_response(&farmer)))
}

/// Update farmer profile fields
pub async fn update_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<String>,
    Json(update): Json<FarmerUpdate>,
) -> ApiResult<Json<FarmerResponse>> {
    let updated = state
        .farmers
        .update_farmer(&FarmerId(farmer_id), update)
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(farmer_to_response(&updated)))
}

/// Delete a farmer (explicit admin action)
pub async fn delete_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<serde_json::Value>> {
    require_admin(&state, &headers)?;

    state
        .farmers
        .delete_farmer(&FarmerId(farmer_id.clone()))
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(serde_json::json!({
        "farmer_id": farmer_id,
        "deleted": true
    })))
}

/// List farmers with optional crop/language filters
pub async fn list_farmers(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> ApiResult<Json<PaginatedResponse<FarmerResponse>>> {
    let limit = params.limit.min(MAX_PAGE_LIMIT);

    let filter = FarmerFilter {
        crop: params.crop.clone(),
        language: params.language.clone(),
    };

    let farmers = state
        .farmers
        .list_farmers(filter, limit, params.offset)
        .await
        .map_err(ApiError::Domain)?;

    let total = state.farmers.count_farmers().await.map_err(ApiError::Domain)?;

    Ok(Json(PaginatedResponse {
        items: farmers.iter().map(farmer_to_response).collect(),
        total,
        limit,
        offset: params.offset,
    }))
}

// Helper functions

pub(crate) fn farmer_to_response(record: &FarmerRecord) -> FarmerResponse {
    FarmerResponse {
        farmer_id: record.farmer_id.0.clone(),
        phone: record.phone.clone(),
        name: record.name.clone(),
        location: record.location.clone(),
        coordinates: record.coordinates,
        language: record.language.clone(),
        crops: record.crops.clone(),
        field_boundaries: record.field_boundaries.clone(),
        total_acres: record.total_acres(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
