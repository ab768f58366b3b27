//! Geocoding endpoint

use axum::{
    Json,
    extract::{Query, State},
};

use farm_connect::ConnectError;
use farm_core::logging::operations;

use crate::dto::{GeocodeQuery, GeocodeResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Forward geocode a free-text location
pub async fn geocode_location(
    State(state): State<AppState>,
    Query(params): Query<GeocodeQuery>,
) -> ApiResult<Json<GeocodeResponse>> {
    if params.q.trim().is_empty() {
        return Err(ApiError::Validation("q query parameter is empty".to_string()));
    }

    let credentials = state
        .credentials
        .get()
        .await
        .map_err(ApiError::Domain)?
        .maps
        .ok_or_else(|| ConnectError::MissingCredentials("maps".to_string()))?;

    let result = state
        .connectors
        .geocode(&credentials)
        .geocode(&params.q)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No geocoding result for '{}'", params.q)))?;

    tracing::debug!(operation = operations::GEOCODE, "Location geocoded");

    Ok(Json(GeocodeResponse {
        query: params.q,
        formatted_address: result.formatted_address,
        coordinates: result.coordinates,
    }))
}
