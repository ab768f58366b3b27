//! Integration tests for the farm API endpoints
//!
//! All tests run against an in-memory datastore with mock vendor
//! clients.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;

use farm_api::{AppState, create_router};
use farm_connect::mock::MockConnectorFactory;
use farm_core::types::TenantId;
use farm_db::{Datastore, SurrealConfig};

/// Create test app state backed by an in-memory database
async fn create_test_state(factory: Arc<MockConnectorFactory>, admin_token: Option<&str>) -> AppState {
    let datastore = Arc::new(
        Datastore::connect(SurrealConfig::memory())
            .await
            .unwrap(),
    );
    let tenant_id = TenantId("test".to_string());
    AppState::new(
        datastore,
        tenant_id,
        factory,
        admin_token.map(|t| t.to_string()),
    )
    .await
    .unwrap()
}

/// Create test server with default mocks
async fn create_test_server() -> TestServer {
    let factory = Arc::new(MockConnectorFactory::new());
    let state = create_test_state(factory, None).await;
    TestServer::new(create_router(state)).unwrap()
}

/// Create test server keeping a handle on the mock factory
async fn create_test_server_with(factory: Arc<MockConnectorFactory>) -> TestServer {
    let state = create_test_state(factory, None).await;
    TestServer::new(create_router(state)).unwrap()
}

/// Store a full credential set through the API
async fn put_test_credentials(server: &TestServer) {
    let response = server
        .put("/api/v1/credentials")
        .json(&json!({
            "messaging": {
                "account_sid": "AC0000000000",
                "auth_token": "test_auth_token",
                "sms_number": "+15550001111",
                "voice_number": "+15550002222"
            },
            "whatsapp": {
                "access_token": "test_access_token",
                "phone_number_id": "1234567890"
            },
            "satellite": {
                "client_id": "sat-client",
                "client_secret": "sat-secret-value"
            },
            "maps": { "api_key": "maps_key_0042" },
            "voice_ai": { "api_key": "voiceai_key_0042" },
            "registry": { "api_key": "registry_key_0042", "registry_url": null }
        }))
        .await;
    response.assert_status_ok();
}

async fn register_test_farmer(server: &TestServer, phone: &str) -> String {
    let response = server
        .post("/api/v1/farmers")
        .json(&json!({
            "phone": phone,
            "name": "Anand",
            "location": "Mandya, Karnataka",
            "coordinates": { "lat": 12.52, "lng": 76.89 },
            "language": "kn",
            "crops": ["ragi", "paddy"]
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["farmer_id"].as_str().unwrap().to_string()
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_check() {
    let server = create_test_server().await;

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
}

// ============ Farmer Endpoint Tests ============

#[tokio::test]
async fn test_farmer_round_trip() {
    let server = create_test_server().await;

    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    let response = server.get(&format!("/api/v1/farmers/{farmer_id}")).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["phone"], "+919876543210");
    assert_eq!(body["name"], "Anand");
    assert_eq!(body["language"], "kn");
    assert_eq!(body["crops"], json!(["ragi", "paddy"]));

    let response = server.get("/api/v1/farmers").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_phone_rejected() {
    let server = create_test_server().await;

    register_test_farmer(&server, "+919876543210").await;

    let response = server
        .post("/api/v1/farmers")
        .json(&json!({
            "phone": "+919876543210",
            "name": "Someone Else"
        }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn test_invalid_phone_rejected() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/farmers")
        .json(&json!({
            "phone": "98765",
            "name": "Bad Phone"
        }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_farmer_not_found() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/farmers/nonexistent_farmer").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_farmer_profile() {
    let server = create_test_server().await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    let response = server
        .put(&format!("/api/v1/farmers/{farmer_id}"))
        .json(&json!({
            "name": "Anand Kumar",
            "crops": ["ragi", "paddy", "sugarcane"]
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Anand Kumar");
    assert_eq!(body["crops"].as_array().unwrap().len(), 3);
    // Untouched fields survive
    assert_eq!(body["location"], "Mandya, Karnataka");
}

#[tokio::test]
async fn test_delete_farmer() {
    let server = create_test_server().await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    let response = server.delete(&format!("/api/v1/farmers/{farmer_id}")).await;
    response.assert_status_ok();

    let response = server.get(&format!("/api/v1/farmers/{farmer_id}")).await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_admin_guard_on_delete() {
    let factory = Arc::new(MockConnectorFactory::new());
    let state = create_test_state(factory, Some("sekrit")).await;
    let server = TestServer::new(create_router(state)).unwrap();

    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    // Without the token
    let response = server.delete(&format!("/api/v1/farmers/{farmer_id}")).await;
    response.assert_status_forbidden();

    // With the token
    let response = server
        .delete(&format!("/api/v1/farmers/{farmer_id}"))
        .add_header(
            HeaderName::from_static("x-admin-token"),
            HeaderValue::from_static("sekrit"),
        )
        .await;
    response.assert_status_ok();
}

// ============ Credentials Endpoint Tests ============

#[tokio::test]
async fn test_credentials_default_empty() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/credentials").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["messaging"].is_null());
    assert!(body["satellite"].is_null());
}

#[tokio::test]
async fn test_credentials_masked_on_read() {
    let server = create_test_server().await;
    put_test_credentials(&server).await;

    let response = server.get("/api/v1/credentials").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    // Secrets reduced to the last four characters
    assert_eq!(body["messaging"]["auth_token"], "****oken");
    assert_eq!(body["satellite"]["client_secret"], "****alue");
    assert_eq!(body["maps"]["api_key"], "****0042");
    // Non-secret fields intact
    assert_eq!(body["messaging"]["account_sid"], "AC0000000000");
    assert_eq!(body["whatsapp"]["phone_number_id"], "1234567890");
}

// ============ Messaging Endpoint Tests ============

#[tokio::test]
async fn test_send_sms_logs_call_and_creates_farmer() {
    let factory = Arc::new(MockConnectorFactory::new());
    let server = create_test_server_with(factory.clone()).await;
    put_test_credentials(&server).await;

    let response = server
        .post("/api/v1/messages/sms")
        .json(&json!({
            "to": "+919812345678",
            "body": "Namaskara! Your NDVI report is ready."
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["vendor_ref"].as_str().unwrap().starts_with("SM"));
    assert_eq!(body["status"], "queued");

    // The farmer was created on first contact
    let farmer_id = body["farmer_id"].as_str().unwrap();
    let response = server.get(&format!("/api/v1/farmers/{farmer_id}")).await;
    response.assert_status_ok();

    // The send was recorded as an outbound sms call row
    let response = server
        .get(&format!("/api/v1/calls?farmer_id={farmer_id}"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["channel"], "sms");
    assert_eq!(items[0]["direction"], "outbound");
    assert_eq!(items[0]["status"], "completed");

    // The mock vendor actually saw the message
    let sent = factory.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "+919812345678");
}

#[tokio::test]
async fn test_send_sms_without_credentials() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/messages/sms")
        .json(&json!({ "to": "+919812345678", "body": "hello" }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "MISSING_CREDENTIALS");
}

#[tokio::test]
async fn test_send_voice_starts_initiated_call() {
    let server = create_test_server().await;
    put_test_credentials(&server).await;

    let response = server
        .post("/api/v1/messages/voice")
        .json(&json!({
            "to": "+919812345678",
            "callback_url": "https://farmbase.example.com/ivr/menu"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let call_id = body["call_id"].as_str().unwrap();

    let response = server.get(&format!("/api/v1/calls/{call_id}")).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["channel"], "ivr");
    assert_eq!(body["status"], "initiated");
}

#[tokio::test]
async fn test_send_whatsapp_text() {
    let server = create_test_server().await;
    put_test_credentials(&server).await;

    let response = server
        .post("/api/v1/messages/whatsapp")
        .json(&json!({ "to": "+919812345678", "body": "Market price update" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["vendor_ref"].as_str().unwrap().starts_with("wamid."));
}

#[tokio::test]
async fn test_send_whatsapp_requires_body_or_template() {
    let server = create_test_server().await;
    put_test_credentials(&server).await;

    let response = server
        .post("/api/v1/messages/whatsapp")
        .json(&json!({
            "to": "+919812345678",
            "body": "text",
            "template": "price_alert"
        }))
        .await;

    response.assert_status_bad_request();
}

// ============ Call Status Transition Tests ============

#[tokio::test]
async fn test_call_status_forward_transitions() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/calls")
        .json(&json!({
            "phone": "+919812345678",
            "channel": "voice_ai",
            "direction": "inbound"
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let call_id = body["call_id"].as_str().unwrap().to_string();
    assert_eq!(body["status"], "initiated");

    let response = server
        .post(&format!("/api/v1/calls/{call_id}/status"))
        .json(&json!({ "status": "in_progress" }))
        .await;
    response.assert_status_ok();

    let response = server
        .post(&format!("/api/v1/calls/{call_id}/status"))
        .json(&json!({
            "status": "completed",
            "transcript": "Farmer asked about tomato prices.",
            "summary": "price enquiry",
            "duration_secs": 184
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "completed");
    assert_eq!(body["duration_secs"], 184);
    assert_eq!(body["summary"], "price enquiry");
}

#[tokio::test]
async fn test_call_status_backward_transition_rejected() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/calls")
        .json(&json!({
            "phone": "+919812345678",
            "channel": "ivr",
            "direction": "inbound",
            "status": "initiated"
        }))
        .await;
    let body: serde_json::Value = response.json();
    let call_id = body["call_id"].as_str().unwrap().to_string();

    // Straight to failed is allowed
    let response = server
        .post(&format!("/api/v1/calls/{call_id}/status"))
        .json(&json!({ "status": "failed" }))
        .await;
    response.assert_status_ok();

    // Terminal rows never move again
    let response = server
        .post(&format!("/api/v1/calls/{call_id}/status"))
        .json(&json!({ "status": "in_progress" }))
        .await;
    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

// ============ Insight Endpoint Tests ============

#[tokio::test]
async fn test_insight_synthetic_without_credentials() {
    let server = create_test_server().await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    let response = server
        .post("/api/v1/insights/generate")
        .json(&json!({ "farmer_id": farmer_id, "observed_on": "2025-07-14" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["source"], "synthetic");
    assert!(!body["recommendation"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_insight_live_with_credentials() {
    let server = create_test_server().await;
    put_test_credentials(&server).await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    let response = server
        .post("/api/v1/insights/generate")
        .json(&json!({ "farmer_id": farmer_id }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["source"], "live");
    // The mock vendor's fixed observation
    assert_eq!(body["ndvi_score"], "0.62");
    assert_eq!(body["health_status"], "healthy");
}

#[tokio::test]
async fn test_insight_falls_back_when_vendor_down() {
    let factory = Arc::new(MockConnectorFactory::new().with_satellite_down());
    let server = create_test_server_with(factory).await;
    put_test_credentials(&server).await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    let response = server
        .post("/api/v1/insights/generate")
        .json(&json!({ "farmer_id": farmer_id, "observed_on": "2025-07-14" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["source"], "synthetic");
}

#[tokio::test]
async fn test_insight_listing_newest_first() {
    let server = create_test_server().await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    for date in ["2025-07-01", "2025-07-11"] {
        let response = server
            .post("/api/v1/insights/generate")
            .json(&json!({ "farmer_id": farmer_id, "observed_on": date }))
            .await;
        response.assert_status_ok();
    }

    let response = server
        .get(&format!("/api/v1/insights?farmer_id={farmer_id}"))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_insight_for_unknown_farmer() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/insights/generate")
        .json(&json!({ "farmer_id": "nope" }))
        .await;

    response.assert_status_not_found();
}

// ============ Credit Endpoint Tests ============

#[tokio::test]
async fn test_credit_estimate_documented_values() {
    let server = create_test_server().await;

    // cover_cropping on 10 acres of wheat: 0.5 * 10 * 1.0 = 5 tCO2e at 15 USD/t
    let response = server
        .post("/api/v1/credits/estimate")
        .json(&json!({
            "practices": ["cover_cropping"],
            "acreage": 10,
            "crop": "wheat"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["credits_tco2e"], "5.0000");
    assert_eq!(body["value_usd"], "75.00");
    assert_eq!(body["breakdown"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_credit_estimate_unknown_practice_ignored() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/credits/estimate")
        .json(&json!({
            "practices": ["no_till", "biochar"],
            "acreage": 1,
            "crop": "wheat"
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["credits_tco2e"], "0.3000");
}

#[tokio::test]
async fn test_credit_estimate_zero_acreage_rejected() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/credits/estimate")
        .json(&json!({ "practices": ["no_till"], "acreage": 0, "crop": "wheat" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_credit_enroll_and_verify_flow() {
    let server = create_test_server().await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    let response = server
        .post("/api/v1/credits/enroll")
        .json(&json!({
            "farmer_id": farmer_id,
            "practices": ["no_till", "agroforestry"],
            "acreage": 4,
            "crop": "rice"
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let credit_id = body["credit_id"].as_str().unwrap().to_string();
    assert_eq!(body["verification_status"], "pending");
    assert!(body["registry_ref"].is_null());
    // (0.3 + 1.2) * 4 * 1.3 = 7.8
    assert_eq!(body["credits_tco2e"], "7.8000");

    // Decide it
    let response = server
        .post(&format!("/api/v1/credits/{credit_id}/verify"))
        .json(&json!({ "status": "verified" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["verification_status"], "verified");

    // Decided enrollments never move again
    let response = server
        .post(&format!("/api/v1/credits/{credit_id}/verify"))
        .json(&json!({ "status": "rejected" }))
        .await;
    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_credit_enroll_with_registry_submission() {
    let server = create_test_server().await;
    put_test_credentials(&server).await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    let response = server
        .post("/api/v1/credits/enroll")
        .json(&json!({
            "farmer_id": farmer_id,
            "practices": ["composting"],
            "acreage": 2,
            "crop": "pulses",
            "submit_to_registry": true
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["registry_ref"].as_str().unwrap().starts_with("REG-"));
    assert_eq!(body["verification_status"], "pending");
}

#[tokio::test]
async fn test_credit_enroll_registry_failure_leaves_row_pending() {
    let factory = Arc::new(MockConnectorFactory::new().with_registry_down());
    let server = create_test_server_with(factory).await;
    put_test_credentials(&server).await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    let response = server
        .post("/api/v1/credits/enroll")
        .json(&json!({
            "farmer_id": farmer_id,
            "practices": ["composting"],
            "acreage": 2,
            "crop": "pulses",
            "submit_to_registry": true
        }))
        .await;

    // The enrollment persists without a reference
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["registry_ref"].is_null());
    assert_eq!(body["verification_status"], "pending");
}

#[tokio::test]
async fn test_credit_ledger_filter_by_status() {
    let server = create_test_server().await;
    let farmer_id = register_test_farmer(&server, "+919876543210").await;

    for _ in 0..2 {
        let response = server
            .post("/api/v1/credits/enroll")
            .json(&json!({
                "farmer_id": farmer_id,
                "practices": ["no_till"],
                "acreage": 1,
                "crop": "wheat"
            }))
            .await;
        response.assert_status_ok();
    }

    let response = server.get("/api/v1/credits?status=pending").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let response = server.get("/api/v1/credits?status=verified").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
}

// ============ Geocode Endpoint Tests ============

#[tokio::test]
async fn test_geocode_without_credentials() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/geocode?q=Mandya").await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "MISSING_CREDENTIALS");
}

#[tokio::test]
async fn test_geocode_returns_top_hit() {
    let server = create_test_server().await;
    put_test_credentials(&server).await;

    let response = server.get("/api/v1/geocode?q=Mandya").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["formatted_address"], "Mandya, IN");
    assert!(body["coordinates"]["lat"].is_number());
}
