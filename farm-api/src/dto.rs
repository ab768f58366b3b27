//! Data Transfer Objects for API requests and responses

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use farm_core::constants::DEFAULT_PAGE_LIMIT;
use farm_core::types::{BoundingBox, Coordinates, FieldBoundary, PracticeContribution};

/// Deserialize a `Decimal` from a JSON number or numeric string.
///
/// `surrealdb` transitively enables `rust_decimal`'s `serde-str` feature,
/// which makes the default `Decimal` deserializer accept only strings.
/// Request bodies send `acreage` as a plain JSON number, so deserialize it
/// explicitly via its textual form to preserve full precision.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => {
            Decimal::from_str(&n.to_string()).map_err(serde::de::Error::custom)
        }
        serde_json::Value::String(s) => {
            Decimal::from_str(&s).map_err(serde::de::Error::custom)
        }
        other => Err(serde::de::Error::custom(format!(
            "expected a number for decimal field, got {other}"
        ))),
    }
}

// ============ Farmer DTOs ============

/// Register farmer request
#[derive(Debug, Deserialize)]
pub struct RegisterFarmerRequest {
    /// E.164 phone number
    pub phone: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub coordinates: Option<Coordinates>,
    /// Language code, defaults to "en"
    pub language: Option<String>,
    #[serde(default)]
    pub crops: Vec<String>,
    #[serde(default)]
    pub field_boundaries: Vec<FieldBoundary>,
}

/// Farmer response
#[derive(Debug, Serialize)]
pub struct FarmerResponse {
    pub farmer_id: String,
    pub phone: String,
    pub name: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub language: String,
    pub crops: Vec<String>,
    pub field_boundaries: Vec<FieldBoundary>,
    /// Approximate total acreage from field boundaries
    pub total_acres: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============ Messaging DTOs ============

/// Send SMS request
#[derive(Debug, Deserialize)]
pub struct SendSmsRequest {
    /// Recipient phone number (E.164)
    pub to: String,
    pub body: String,
}

/// Start outbound voice call request
#[derive(Debug, Deserialize)]
pub struct SendVoiceRequest {
    /// Recipient phone number (E.164)
    pub to: String,
    /// URL the vendor fetches call instructions from
    pub callback_url: String,
}

/// Send WhatsApp message request
///
/// Either a plain `body` or a `template` name must be set.
#[derive(Debug, Deserialize)]
pub struct SendWhatsAppRequest {
    /// Recipient phone number (E.164)
    pub to: String,
    pub body: Option<String>,
    pub template: Option<String>,
    /// Template language code, defaults to "en"
    pub language: Option<String>,
}

/// Response for any outbound message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub call_id: String,
    pub farmer_id: String,
    pub vendor_ref: Option<String>,
    pub status: String,
}

// ============ Call DTOs ============

/// Log an interaction (inbound webhooks, manual entries)
#[derive(Debug, Deserialize)]
pub struct LogCallRequest {
    /// Farmer phone; the profile is created on first contact
    pub phone: String,
    /// ivr, sms, whatsapp, voice_ai
    pub channel: String,
    /// inbound, outbound
    pub direction: String,
    /// Initial status, defaults to "initiated"
    pub status: Option<String>,
    pub vendor_ref: Option<String>,
}

/// Update call status request
#[derive(Debug, Deserialize)]
pub struct UpdateCallStatusRequest {
    /// New status (in_progress, completed, failed)
    pub status: String,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub duration_secs: Option<u32>,
}

/// Call record response
#[derive(Debug, Serialize)]
pub struct CallResponse {
    pub call_id: String,
    pub farmer_id: String,
    pub channel: String,
    pub direction: String,
    pub status: String,
    pub vendor_ref: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub duration_secs: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============ Insight DTOs ============

/// Generate insight request
#[derive(Debug, Deserialize)]
pub struct GenerateInsightRequest {
    pub farmer_id: String,
    /// Observation date, defaults to today
    pub observed_on: Option<NaiveDate>,
    /// Explicit area override; otherwise derived from the farmer's
    /// boundaries or coordinates
    pub bbox: Option<BoundingBox>,
}

/// Satellite insight response
#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub insight_id: String,
    pub farmer_id: String,
    pub ndvi_score: Decimal,
    pub moisture_score: Decimal,
    pub health_status: String,
    pub recommendation: String,
    /// "live" or "synthetic"
    pub source: String,
    pub observed_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// ============ Credit DTOs ============

/// Estimate credits request (no persistence)
#[derive(Debug, Deserialize)]
pub struct EstimateCreditRequest {
    pub practices: Vec<String>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub acreage: Decimal,
    pub crop: String,
}

/// Estimate credits response
#[derive(Debug, Serialize)]
pub struct EstimateCreditResponse {
    pub credits_tco2e: Decimal,
    pub value_usd: Decimal,
    pub crop_multiplier: Decimal,
    pub breakdown: Vec<PracticeContribution>,
}

/// Enroll request
#[derive(Debug, Deserialize)]
pub struct EnrollCreditRequest {
    pub farmer_id: String,
    pub practices: Vec<String>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub acreage: Decimal,
    pub crop: String,
    /// Forward the enrollment to the carbon registry when true
    #[serde(default)]
    pub submit_to_registry: bool,
}

/// Credit record response
#[derive(Debug, Serialize)]
pub struct CreditResponse {
    pub credit_id: String,
    pub farmer_id: String,
    pub practices: Vec<String>,
    pub acreage: Decimal,
    pub crop: String,
    pub credits_tco2e: Decimal,
    pub value_usd: Decimal,
    pub verification_status: String,
    pub registry_ref: Option<String>,
    pub enrolled_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update verification status request
#[derive(Debug, Deserialize)]
pub struct UpdateVerificationRequest {
    /// New status (verified, rejected)
    pub status: String,
}

// ============ Geocode DTOs ============

/// Geocode query parameters
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

/// Geocode response
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub query: String,
    pub formatted_address: String,
    pub coordinates: Coordinates,
}

// ============ Health DTOs ============

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ============ Pagination ============

/// Paginated list response
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// Query parameters for list endpoints
#[derive(Debug, Deserialize, Default)]
pub struct ListQueryParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    pub crop: Option<String>,
    pub language: Option<String>,
    pub farmer_id: Option<String>,
    pub channel: Option<String>,
    pub status: Option<String>,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}
