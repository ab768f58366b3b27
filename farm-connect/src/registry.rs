//! Carbon registry client
//!
//! Forwards an enrollment to the registry and returns its reference id.
//! A failed submission is reported to the caller; the enrollment row is
//! kept regardless, so there is no compensating action here.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use farm_core::constants::VENDOR_REQUEST_TIMEOUT_SECS;
use farm_core::types::RegistryCredentials;

use crate::error::{ConnectError, ConnectResult};
use crate::retry::{RetryConfig, execute_with_retry};

const DEFAULT_REGISTRY_URL: &str = "https://api.carbonregistry.example.com/v1";

/// Enrollment payload forwarded to the registry
#[derive(Debug, Clone)]
pub struct RegistryEnrollment {
    pub farmer_ref: String,
    pub practices: Vec<String>,
    pub acreage: Decimal,
    pub crop: String,
    pub credits_tco2e: Decimal,
}

#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Submit an enrollment, returning the registry reference
    async fn submit_enrollment(&self, enrollment: &RegistryEnrollment) -> ConnectResult<String>;
}

/// HTTP implementation against the registry REST API
pub struct HttpRegistryClient {
    base_url: String,
    client: reqwest::Client,
    credentials: RegistryCredentials,
    timeout: Duration,
    retry_config: RetryConfig,
}

#[derive(Debug, Deserialize)]
struct RegistrySubmitResponse {
    reference: String,
}

impl HttpRegistryClient {
    pub fn new(credentials: RegistryCredentials) -> Self {
        let base_url = credentials
            .registry_url
            .clone()
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            credentials,
            timeout: Duration::from_secs(VENDOR_REQUEST_TIMEOUT_SECS),
            retry_config: RetryConfig::default(),
        }
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    async fn submit_once(&self, enrollment: &RegistryEnrollment) -> ConnectResult<String> {
        let url = format!("{}/enrollments", self.base_url);

        let payload = json!({
            "external_ref": enrollment.farmer_ref,
            "practices": enrollment.practices,
            "acreage": enrollment.acreage.to_string(),
            "crop": enrollment.crop,
            "estimated_tco2e": enrollment.credits_tco2e.to_string(),
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.api_key)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ConnectError::VendorUnavailable(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::RequestFailed { status, body });
        }

        let parsed: RegistrySubmitResponse = response
            .json()
            .await
            .map_err(|e| ConnectError::InvalidResponse(e.to_string()))?;

        Ok(parsed.reference)
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn submit_enrollment(&self, enrollment: &RegistryEnrollment) -> ConnectResult<String> {
        execute_with_retry(&self.retry_config, || self.submit_once(enrollment)).await
    }
}
