//! API route handlers

pub mod call;
pub mod credentials;
pub mod credit;
pub mod farmer;
pub mod geocode;
pub mod health;
pub mod insight;
pub mod message;

use axum::{Router, http::HeaderMap, routing::get, routing::post};

use farm_core::constants::API_VERSION;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Require the admin token on destructive endpoints
///
/// A no-op when no token is configured.
pub(crate) fn require_admin(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let Some(expected) = &state.admin_token else {
        return Ok(());
    };
    let provided = headers.get("x-admin-token").and_then(|v| v.to_str().ok());
    if provided == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin token required".to_string()))
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Farmer endpoints
        .route(
            "/farmers",
            post(farmer::register_farmer).get(farmer::list_farmers),
        )
        .route(
            "/farmers/:farmer_id",
            get(farmer::get_farmer)
                .put(farmer::update_farmer)
                .delete(farmer::delete_farmer),
        )
        // Credential endpoints
        .route(
            "/credentials",
            get(credentials::get_credentials).put(credentials::put_credentials),
        )
        // Messaging proxies
        .route("/messages/sms", post(message::send_sms))
        .route("/messages/voice", post(message::send_voice))
        .route("/messages/whatsapp", post(message::send_whatsapp))
        // Call log
        .route("/calls", post(call::log_call).get(call::list_calls))
        .route("/calls/:call_id", get(call::get_call))
        .route("/calls/:call_id/status", post(call::update_status))
        // Satellite insights
        .route("/insights/generate", post(insight::generate_insight))
        .route("/insights", get(insight::list_insights))
        // Carbon credits
        .route("/credits/estimate", post(credit::estimate_credits))
        .route("/credits/enroll", post(credit::enroll_credit))
        .route("/credits", get(credit::list_credits))
        .route("/credits/:credit_id", get(credit::get_credit))
        .route(
            "/credits/:credit_id/verify",
            post(credit::update_verification),
        )
        // Geocoding
        .route("/geocode", get(geocode::geocode_location));

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .nest(&format!("/api/{API_VERSION}"), api)
        // State
        .with_state(state)
}
