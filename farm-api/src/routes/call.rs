//! Call log endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
};

use farm_core::constants::MAX_PAGE_LIMIT;
use farm_core::types::{CallChannel, CallDirection, CallId, CallRecord, CallStatus};
use farm_db::{CallFilter, CallOutcome};

use crate::dto::{
    CallResponse, ListQueryParams, LogCallRequest, PaginatedResponse, UpdateCallStatusRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Log an interaction row (inbound webhooks, manual entries)
pub async fn log_call(
    State(state): State<AppState>,
    Json(req): Json<LogCallRequest>,
) -> ApiResult<Json<CallResponse>> {
    let channel = parse_channel(&req.channel)?;
    let direction = parse_direction(&req.direction)?;
    let status = match &req.status {
        Some(s) => parse_status(s)?,
        None => CallStatus::Initiated,
    };

    // First contact creates the profile
    let farmer = state
        .farmers
        .ensure_by_phone(&req.phone)
        .await
        .map_err(ApiError::Domain)?;

    let call = state
        .calls
        .log_call(&farmer.farmer_id, channel, direction, status, req.vendor_ref)
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(call_to_response(&call)))
}

/// Get call by ID
pub async fn get_call(
    State(state): State<AppState>,
    Path(call_id): Path<String>,
) -> ApiResult<Json<CallResponse>> {
    let call = state
        .calls
        .get_call(&CallId(call_id.clone()))
        .await
        .map_err(ApiError::Domain)?
        .ok_or_else(|| ApiError::NotFound(format!("Call {} not found", call_id)))?;

    Ok(Json(call_to_response(&call)))
}

/// Update call status and attach transcript/summary
pub async fn update_status(
    State(state): State<AppState>,
    Path(call_id): Path<String>,
    Json(req): Json<UpdateCallStatusRequest>,
) -> ApiResult<Json<CallResponse>> {
    let new_status = parse_status(&req.status)?;

    let outcome = CallOutcome {
        transcript: req.transcript,
        summary: req.summary,
        duration_secs: req.duration_secs,
    };

    let updated = state
        .calls
        .update_status(&CallId(call_id), new_status, outcome)
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(call_to_response(&updated)))
}

/// List calls, filterable by farmer and channel
pub async fn list_calls(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> ApiResult<Json<PaginatedResponse<CallResponse>>> {
    let limit = params.limit.min(MAX_PAGE_LIMIT);

    if let Some(channel) = &params.channel {
        parse_channel(channel)?;
    }

    let filter = CallFilter {
        farmer_id: params.farmer_id.clone(),
        channel: params.channel.clone(),
    };

    let calls = state
        .calls
        .list_calls(filter, limit, params.offset)
        .await
        .map_err(ApiError::Domain)?;

    let total = state.calls.count_calls().await.map_err(ApiError::Domain)?;

    Ok(Json(PaginatedResponse {
        items: calls.iter().map(call_to_response).collect(),
        total,
        limit,
        offset: params.offset,
    }))
}

// Helper functions

fn parse_channel(s: &str) -> ApiResult<CallChannel> {
    CallChannel::parse(s)
        .ok_or_else(|| ApiError::Validation(format!("Invalid channel: {s}")))
}

fn parse_direction(s: &str) -> ApiResult<CallDirection> {
    CallDirection::parse(s)
        .ok_or_else(|| ApiError::Validation(format!("Invalid direction: {s}")))
}

pub(crate) fn parse_status(s: &str) -> ApiResult<CallStatus> {
    CallStatus::parse(s)
        .ok_or_else(|| ApiError::Validation(format!("Invalid call status: {s}")))
}

pub(crate) fn call_to_response(record: &CallRecord) -> CallResponse {
    CallResponse {
        call_id: record.call_id.0.clone(),
        farmer_id: record.farmer_id.0.clone(),
        channel: record.channel.as_str().to_string(),
        direction: record.direction.as_str().to_string(),
        status: record.status.as_str().to_string(),
        vendor_ref: record.vendor_ref.clone(),
        transcript: record.transcript.clone(),
        summary: record.summary.clone(),
        duration_secs: record.duration_secs,
        started_at: record.started_at,
        updated_at: record.updated_at,
    }
}
