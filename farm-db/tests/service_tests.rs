//! Service-level tests against an in-memory datastore

use rust_decimal::Decimal;
use std::sync::Arc;

use farm_core::error::FarmError;
use farm_core::types::{
    CallChannel, CallDirection, CallStatus, MessagingCredentials, TenantId, VendorCredentials,
    VerificationStatus,
};
use farm_db::{
    CallOutcome, CallService, CredentialsService, CreditService, Datastore, FarmDatabase,
    FarmerFilter, FarmerService, NewFarmer, SurrealConfig,
};

async fn create_test_database() -> Arc<FarmDatabase> {
    let datastore = Arc::new(
        Datastore::connect(SurrealConfig::memory())
            .await
            .unwrap(),
    );
    let database = Arc::new(FarmDatabase::new(datastore));
    database.init_schema().await.unwrap();
    database
}

fn test_tenant() -> TenantId {
    TenantId("test".to_string())
}

fn new_farmer(phone: &str) -> NewFarmer {
    NewFarmer {
        phone: phone.to_string(),
        name: "Lakshmi".to_string(),
        location: "Hassan".to_string(),
        coordinates: None,
        language: "kn".to_string(),
        crops: vec!["ragi".to_string()],
        field_boundaries: Vec::new(),
    }
}

#[tokio::test]
async fn test_farmer_round_trips_on_phone_lookup() {
    let database = create_test_database().await;
    let farmers = FarmerService::new(database, test_tenant());

    let created = farmers.register_farmer(new_farmer("+919000000001")).await.unwrap();

    let by_phone = farmers
        .get_by_phone("+919000000001")
        .await
        .unwrap()
        .expect("farmer should round-trip on phone lookup");
    assert_eq!(by_phone.farmer_id, created.farmer_id);
    assert_eq!(by_phone.name, "Lakshmi");

    let by_id = farmers.get_farmer(&created.farmer_id).await.unwrap().unwrap();
    assert_eq!(by_id.phone, "+919000000001");
}

#[tokio::test]
async fn test_duplicate_phone_registration_rejected() {
    let database = create_test_database().await;
    let farmers = FarmerService::new(database, test_tenant());

    farmers.register_farmer(new_farmer("+919000000001")).await.unwrap();
    let result = farmers.register_farmer(new_farmer("+919000000001")).await;

    assert!(matches!(result, Err(FarmError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_ensure_by_phone_is_idempotent() {
    let database = create_test_database().await;
    let farmers = FarmerService::new(database, test_tenant());

    let first = farmers.ensure_by_phone("+919000000002").await.unwrap();
    let second = farmers.ensure_by_phone("+919000000002").await.unwrap();

    assert_eq!(first.farmer_id, second.farmer_id);
    assert_eq!(farmers.count_farmers().await.unwrap(), 1);
}

#[tokio::test]
async fn test_farmer_list_filters_by_crop() {
    let database = create_test_database().await;
    let farmers = FarmerService::new(database, test_tenant());

    farmers.register_farmer(new_farmer("+919000000001")).await.unwrap();
    let mut other = new_farmer("+919000000002");
    other.crops = vec!["cotton".to_string()];
    farmers.register_farmer(other).await.unwrap();

    let ragi_only = farmers
        .list_farmers(
            FarmerFilter {
                crop: Some("ragi".to_string()),
                language: None,
            },
            100,
            0,
        )
        .await
        .unwrap();

    assert_eq!(ragi_only.len(), 1);
    assert_eq!(ragi_only[0].phone, "+919000000001");
}

#[tokio::test]
async fn test_call_status_transition_rules() {
    let database = create_test_database().await;
    let farmers = FarmerService::new(database.clone(), test_tenant());
    let calls = CallService::new(database, test_tenant());

    let farmer = farmers.ensure_by_phone("+919000000003").await.unwrap();
    let call = calls
        .log_call(
            &farmer.farmer_id,
            CallChannel::Ivr,
            CallDirection::Outbound,
            CallStatus::Initiated,
            Some("CA123".to_string()),
        )
        .await
        .unwrap();

    let call = calls
        .update_status(&call.call_id, CallStatus::InProgress, CallOutcome::default())
        .await
        .unwrap();
    assert_eq!(call.status, CallStatus::InProgress);

    let call = calls
        .update_status(
            &call.call_id,
            CallStatus::Completed,
            CallOutcome {
                transcript: Some("menu 2 selected".to_string()),
                summary: None,
                duration_secs: Some(95),
            },
        )
        .await
        .unwrap();
    assert_eq!(call.status, CallStatus::Completed);
    assert_eq!(call.duration_secs, Some(95));

    // Terminal rows reject further transitions
    let result = calls
        .update_status(&call.call_id, CallStatus::InProgress, CallOutcome::default())
        .await;
    assert!(matches!(result, Err(FarmError::InvalidStateTransition(_))));
}

#[tokio::test]
async fn test_credit_enrollment_values_and_verification() {
    let database = create_test_database().await;
    let farmers = FarmerService::new(database.clone(), test_tenant());
    let credits = CreditService::new(database, test_tenant());

    let farmer = farmers.ensure_by_phone("+919000000004").await.unwrap();

    // cover_cropping on 10 acres of wheat: 0.5 * 10 * 1.0 = 5 tCO2e
    let record = credits
        .enroll(
            &farmer.farmer_id,
            vec!["cover_cropping".to_string()],
            Decimal::from(10),
            "wheat".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(record.credits_tco2e, "5.0000".parse().unwrap());
    assert_eq!(record.value_usd, "75.00".parse().unwrap());
    assert_eq!(record.verification_status, VerificationStatus::Pending);

    let verified = credits
        .set_verification(&record.credit_id, VerificationStatus::Verified)
        .await
        .unwrap();
    assert_eq!(verified.verification_status, VerificationStatus::Verified);

    // Decided enrollments never return to pending or flip
    let result = credits
        .set_verification(&record.credit_id, VerificationStatus::Rejected)
        .await;
    assert!(matches!(result, Err(FarmError::InvalidStateTransition(_))));
}

#[tokio::test]
async fn test_credit_enroll_requires_existing_farmer() {
    let database = create_test_database().await;
    let credits = CreditService::new(database, test_tenant());

    let result = credits
        .enroll(
            &farm_core::types::FarmerId("missing".to_string()),
            vec!["no_till".to_string()],
            Decimal::ONE,
            "wheat".to_string(),
        )
        .await;

    assert!(matches!(result, Err(FarmError::NotFound(_))));
}

#[tokio::test]
async fn test_credentials_default_then_round_trip() {
    let database = create_test_database().await;
    let credentials = CredentialsService::new(database, test_tenant());

    // Empty before anything is stored
    let initial = credentials.get().await.unwrap();
    assert!(initial.messaging.is_none());

    let stored = credentials
        .save(VendorCredentials {
            messaging: Some(MessagingCredentials {
                account_sid: "AC42".to_string(),
                auth_token: "token_value".to_string(),
                sms_number: "+15550001111".to_string(),
                voice_number: "+15550002222".to_string(),
            }),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(stored.messaging.is_some());

    let fetched = credentials.get().await.unwrap();
    assert_eq!(fetched.messaging.unwrap().account_sid, "AC42");

    // Saving again replaces the single row
    let replaced = credentials.save(VendorCredentials::default()).await.unwrap();
    assert!(replaced.messaging.is_none());
    let fetched = credentials.get().await.unwrap();
    assert!(fetched.messaging.is_none());
}
