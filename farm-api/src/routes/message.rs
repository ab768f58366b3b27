//! Outbound messaging proxies
//!
//! One handler per vendor path. Each handler resolves credentials,
//! forwards to the vendor, then appends a call row. The recipient's
//! profile is created on first contact.

use axum::{Json, extract::State};

use farm_connect::ConnectError;
use farm_core::constants::MAX_SMS_BODY_CHARS;
use farm_core::logging::operations;
use farm_core::types::{CallChannel, CallDirection, CallStatus};

use crate::dto::{MessageResponse, SendSmsRequest, SendVoiceRequest, SendWhatsAppRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Send an SMS
pub async fn send_sms(
    State(state): State<AppState>,
    Json(req): Json<SendSmsRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if req.body.trim().is_empty() {
        return Err(ApiError::Validation("SMS body is empty".to_string()));
    }
    if req.body.chars().count() > MAX_SMS_BODY_CHARS {
        return Err(ApiError::Validation(format!(
            "SMS body too long (max {MAX_SMS_BODY_CHARS} characters)"
        )));
    }

    let credentials = state
        .credentials
        .get()
        .await
        .map_err(ApiError::Domain)?
        .messaging
        .ok_or_else(|| ConnectError::MissingCredentials("messaging".to_string()))?;

    let farmer = state
        .farmers
        .ensure_by_phone(&req.to)
        .await
        .map_err(ApiError::Domain)?;

    let receipt = state
        .connectors
        .messaging(&credentials)
        .send_sms(&req.to, &req.body)
        .await?;

    tracing::info!(
        farmer_id = %farmer.farmer_id,
        vendor_ref = %receipt.vendor_ref,
        operation = operations::SMS_SEND,
        "SMS sent"
    );

    let call = state
        .calls
        .log_call(
            &farmer.farmer_id,
            CallChannel::Sms,
            CallDirection::Outbound,
            CallStatus::Completed,
            Some(receipt.vendor_ref.clone()),
        )
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(MessageResponse {
        call_id: call.call_id.0,
        farmer_id: farmer.farmer_id.0,
        vendor_ref: Some(receipt.vendor_ref),
        status: receipt.status,
    }))
}

/// Place an outbound IVR voice call
pub async fn send_voice(
    State(state): State<AppState>,
    Json(req): Json<SendVoiceRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if req.callback_url.trim().is_empty() {
        return Err(ApiError::Validation("callback_url is empty".to_string()));
    }

    let credentials = state
        .credentials
        .get()
        .await
        .map_err(ApiError::Domain)?
        .messaging
        .ok_or_else(|| ConnectError::MissingCredentials("messaging".to_string()))?;

    let farmer = state
        .farmers
        .ensure_by_phone(&req.to)
        .await
        .map_err(ApiError::Domain)?;

    let receipt = state
        .connectors
        .messaging(&credentials)
        .start_voice_call(&req.to, &req.callback_url)
        .await?;

    tracing::info!(
        farmer_id = %farmer.farmer_id,
        vendor_ref = %receipt.vendor_ref,
        operation = operations::VOICE_CALL,
        "Voice call initiated"
    );

    // The call progresses through status updates from the vendor webhook
    let call = state
        .calls
        .log_call(
            &farmer.farmer_id,
            CallChannel::Ivr,
            CallDirection::Outbound,
            CallStatus::Initiated,
            Some(receipt.vendor_ref.clone()),
        )
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(MessageResponse {
        call_id: call.call_id.0,
        farmer_id: farmer.farmer_id.0,
        vendor_ref: Some(receipt.vendor_ref),
        status: receipt.status,
    }))
}

/// Send a WhatsApp text or template message
pub async fn send_whatsapp(
    State(state): State<AppState>,
    Json(req): Json<SendWhatsAppRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let credentials = state
        .credentials
        .get()
        .await
        .map_err(ApiError::Domain)?
        .whatsapp
        .ok_or_else(|| ConnectError::MissingCredentials("whatsapp".to_string()))?;

    let farmer = state
        .farmers
        .ensure_by_phone(&req.to)
        .await
        .map_err(ApiError::Domain)?;

    let client = state.connectors.whatsapp(&credentials);
    let receipt = match (&req.body, &req.template) {
        (Some(body), None) => client.send_text(&req.to, body).await?,
        (None, Some(template)) => {
            let language = req.language.as_deref().unwrap_or("en");
            client.send_template(&req.to, template, language).await?
        }
        _ => {
            return Err(ApiError::Validation(
                "Exactly one of body or template must be set".to_string(),
            ));
        }
    };

    tracing::info!(
        farmer_id = %farmer.farmer_id,
        vendor_ref = %receipt.vendor_ref,
        operation = operations::WHATSAPP_SEND,
        "WhatsApp message sent"
    );

    let call = state
        .calls
        .log_call(
            &farmer.farmer_id,
            CallChannel::WhatsApp,
            CallDirection::Outbound,
            CallStatus::Completed,
            Some(receipt.vendor_ref.clone()),
        )
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(MessageResponse {
        call_id: call.call_id.0,
        farmer_id: farmer.farmer_id.0,
        vendor_ref: Some(receipt.vendor_ref),
        status: receipt.status,
    }))
}
