//! Vendor credential endpoints
//!
//! The credential set is read and written whole. Responses always mask
//! secrets to their last four characters.

use axum::{Json, extract::State, http::HeaderMap};

use farm_core::types::VendorCredentials;

use crate::error::{ApiError, ApiResult};
use crate::routes::require_admin;
use crate::state::AppState;

/// Fetch the stored credential set, masked
pub async fn get_credentials(
    State(state): State<AppState>,
) -> ApiResult<Json<VendorCredentials>> {
    let credentials = state.credentials.get().await.map_err(ApiError::Domain)?;
    Ok(Json(credentials.masked()))
}

/// Replace the credential set
pub async fn put_credentials(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(credentials): Json<VendorCredentials>,
) -> ApiResult<Json<VendorCredentials>> {
    require_admin(&state, &headers)?;

    let stored = state
        .credentials
        .save(credentials)
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(stored.masked()))
}
