//! Satellite imagery vendor client
//!
//! Two-step flow: an OAuth client-credentials token fetch, then a
//! statistics request returning mean index values for a bounding box.
//! Transport failures and non-2xx responses surface as errors; the
//! caller decides whether to fall back to synthetic data.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use farm_core::constants::VENDOR_REQUEST_TIMEOUT_SECS;
use farm_core::types::{BoundingBox, Observation, SatelliteCredentials};

use crate::error::{ConnectError, ConnectResult};
use crate::retry::{RetryConfig, execute_with_retry};

#[async_trait]
pub trait SatelliteClient: Send + Sync {
    /// Fetch mean NDVI/moisture for a bounding box on a given date
    async fn fetch_observation(
        &self,
        bbox: BoundingBox,
        date: NaiveDate,
    ) -> ConnectResult<Observation>;
}

/// HTTP implementation against the vendor statistics API
pub struct HttpSatelliteClient {
    auth_url: String,
    stats_url: String,
    client: reqwest::Client,
    credentials: SatelliteCredentials,
    timeout: Duration,
    retry_config: RetryConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    ndvi_mean: f64,
    moisture_mean: f64,
}

impl HttpSatelliteClient {
    pub fn new(auth_url: &str, stats_url: &str, credentials: SatelliteCredentials) -> Self {
        Self {
            auth_url: auth_url.to_string(),
            stats_url: stats_url.to_string(),
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

    async fn fetch_token(&self) -> ConnectResult<String> {
        let response = self
            .client
            .post(&self.auth_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ConnectError::VendorUnavailable(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::RequestFailed { status, body });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ConnectError::InvalidResponse(e.to_string()))?;

        Ok(token.access_token)
    }

    async fn fetch_stats(
        &self,
        token: &str,
        bbox: BoundingBox,
        date: NaiveDate,
    ) -> ConnectResult<Observation> {
        let payload = json!({
            "bbox": [bbox.min_lng, bbox.min_lat, bbox.max_lng, bbox.max_lat],
            "date": date.format("%Y-%m-%d").to_string(),
            "indices": ["ndvi", "moisture"]
        });

        let response = self
            .client
            .post(&self.stats_url)
            .bearer_auth(token)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ConnectError::VendorUnavailable(format!("Stats request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::RequestFailed { status, body });
        }

        let stats: StatsResponse = response
            .json()
            .await
            .map_err(|e| ConnectError::InvalidResponse(e.to_string()))?;

        let to_score = |value: f64| {
            Decimal::from_f64_retain(value.clamp(0.0, 1.0))
                .unwrap_or(Decimal::ZERO)
                .round_dp(3)
        };

        Ok(Observation {
            ndvi: to_score(stats.ndvi_mean),
            moisture: to_score(stats.moisture_mean),
        })
    }
}

#[async_trait]
impl SatelliteClient for HttpSatelliteClient {
    async fn fetch_observation(
        &self,
        bbox: BoundingBox,
        date: NaiveDate,
    ) -> ConnectResult<Observation> {
        execute_with_retry(&self.retry_config, || async {
            let token = self.fetch_token().await?;
            self.fetch_stats(&token, bbox, date).await
        })
        .await
    }
}
