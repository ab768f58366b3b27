//! Carbon credit endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
};

use farm_connect::RegistryEnrollment;
use farm_core::constants::MAX_PAGE_LIMIT;
use farm_core::credit;
use farm_core::logging::operations;
use farm_core::types::{CreditId, CreditRecord, FarmerId, VerificationStatus};
use farm_db::CreditFilter;

use crate::dto::{
    CreditResponse, EnrollCreditRequest, EstimateCreditRequest, EstimateCreditResponse,
    ListQueryParams, PaginatedResponse, UpdateVerificationRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Estimate credits without persisting anything
pub async fn estimate_credits(
    State(_state): State<AppState>,
    Json(req): Json<EstimateCreditRequest>,
) -> ApiResult<Json<EstimateCreditResponse>> {
    let estimate = credit::estimate(&req.practices, req.acreage, &req.crop)
        .map_err(ApiError::Domain)?;

    tracing::debug!(
        operation = operations::CREDIT_ESTIMATE,
        "Credit estimate computed"
    );

    Ok(Json(EstimateCreditResponse {
        credits_tco2e: estimate.credits_tco2e,
        value_usd: estimate.value_usd,
        crop_multiplier: estimate.crop_multiplier,
        breakdown: estimate.breakdown,
    }))
}

/// Calculate and persist an enrollment
///
/// With `submit_to_registry` the enrollment is also forwarded to the
/// carbon registry; a registry failure leaves the row pending without a
/// reference.
pub async fn enroll_credit(
    State(state): State<AppState>,
    Json(req): Json<EnrollCreditRequest>,
) -> ApiResult<Json<CreditResponse>> {
    let registry_credentials = if req.submit_to_registry {
        let credentials = state
            .credentials
            .get()
            .await
            .map_err(ApiError::Domain)?
            .registry
            .ok_or_else(|| {
                farm_connect::ConnectError::MissingCredentials("registry".to_string())
            })?;
        Some(credentials)
    } else {
        None
    };

    let farmer_id = FarmerId(req.farmer_id);
    let mut record = state
        .credits
        .enroll(&farmer_id, req.practices, req.acreage, req.crop)
        .await
        .map_err(ApiError::Domain)?;

    if let Some(credentials) = registry_credentials {
        let enrollment = RegistryEnrollment {
            farmer_ref: record.farmer_id.0.clone(),
            practices: record.practices.clone(),
            acreage: record.acreage,
            crop: record.crop.clone(),
            credits_tco2e: record.credits_tco2e,
        };

        match state
            .connectors
            .registry(&credentials)
            .submit_enrollment(&enrollment)
            .await
        {
            Ok(reference) => {
                tracing::info!(
                    credit_id = %record.credit_id,
                    operation = operations::REGISTRY_SUBMIT,
                    "Enrollment submitted to registry"
                );
                record = state
                    .credits
                    .attach_registry_ref(&record.credit_id, &reference)
                    .await
                    .map_err(ApiError::Domain)?;
            }
            Err(e) => {
                // Row stays pending with no reference
                tracing::warn!(
                    credit_id = %record.credit_id,
                    error = %e,
                    operation = operations::REGISTRY_SUBMIT,
                    "Registry submission failed"
                );
            }
        }
    }

    Ok(Json(credit_to_response(&record)))
}

/// Get credit record by ID
pub async fn get_credit(
    State(state): State<AppState>,
    Path(credit_id): Path<String>,
) -> ApiResult<Json<CreditResponse>> {
    let record = state
        .credits
        .get_credit(&CreditId(credit_id.clone()))
        .await
        .map_err(ApiError::Domain)?
        .ok_or_else(|| ApiError::NotFound(format!("Credit {} not found", credit_id)))?;

    Ok(Json(credit_to_response(&record)))
}

/// Decide a pending enrollment
pub async fn update_verification(
    State(state): State<AppState>,
    Path(credit_id): Path<String>,
    Json(req): Json<UpdateVerificationRequest>,
) -> ApiResult<Json<CreditResponse>> {
    let new_status = parse_verification_status(&req.status)?;

    let updated = state
        .credits
        .set_verification(&CreditId(credit_id), new_status)
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(credit_to_response(&updated)))
}

/// List the credit ledger, filterable by farmer and status
pub async fn list_credits(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> ApiResult<Json<PaginatedResponse<CreditResponse>>> {
    let limit = params.limit.min(MAX_PAGE_LIMIT);

    if let Some(status) = &params.status {
        parse_verification_status(status)?;
    }

    let filter = CreditFilter {
        farmer_id: params.farmer_id.clone(),
        verification_status: params.status.clone(),
    };

    let credits = state
        .credits
        .list_credits(filter, limit, params.offset)
        .await
        .map_err(ApiError::Domain)?;

    let total = state.credits.count_credits().await.map_err(ApiError::Domain)?;

    Ok(Json(PaginatedResponse {
        items: credits.iter().map(credit_to_response).collect(),
        total,
        limit,
        offset: params.offset,
    }))
}

// Helper functions

fn parse_verification_status(s: &str) -> ApiResult<VerificationStatus> {
    VerificationStatus::parse(s)
        .ok_or_else(|| ApiError::Validation(format!("Invalid verification status: {s}")))
}

pub(crate) fn credit_to_response(record: &CreditRecord) -> CreditResponse {
    CreditResponse {
        credit_id: record.credit_id.0.clone(),
        farmer_id: record.farmer_id.0.clone(),
        practices: record.practices.clone(),
        acreage: record.acreage,
        crop: record.crop.clone(),
        credits_tco2e: record.credits_tco2e,
        value_usd: record.value_usd,
        verification_status: record.verification_status.as_str().to_string(),
        registry_ref: record.registry_ref.clone(),
        enrolled_at: record.enrolled_at,
        updated_at: record.updated_at,
    }
}
