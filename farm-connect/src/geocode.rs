//! Forward geocoding client

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use farm_core::constants::VENDOR_REQUEST_TIMEOUT_SECS;
use farm_core::types::{Coordinates, MapsCredentials};

use crate::error::{ConnectError, ConnectResult};

/// Top geocoding hit for a query
#[derive(Debug, Clone)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub coordinates: Coordinates,
}

#[async_trait]
pub trait GeocodeClient: Send + Sync {
    /// Resolve a free-text location to its best-matching coordinates
    async fn geocode(&self, query: &str) -> ConnectResult<Option<GeocodeResult>>;
}

/// HTTP implementation against the maps vendor
pub struct HttpGeocodeClient {
    base_url: String,
    client: reqwest::Client,
    credentials: MapsCredentials,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct VendorLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct VendorGeometry {
    location: VendorLocation,
}

#[derive(Debug, Deserialize)]
struct VendorGeocodeHit {
    formatted_address: String,
    geometry: VendorGeometry,
}

#[derive(Debug, Deserialize)]
struct VendorGeocodeResponse {
    results: Vec<VendorGeocodeHit>,
    status: String,
}

impl HttpGeocodeClient {
    pub fn new(base_url: &str, credentials: MapsCredentials) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            credentials,
            timeout: Duration::from_secs(VENDOR_REQUEST_TIMEOUT_SECS),
        }
    }
}

#[async_trait]
impl GeocodeClient for HttpGeocodeClient {
    async fn geocode(&self, query: &str) -> ConnectResult<Option<GeocodeResult>> {
        let url = format!("{}/geocode/json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("address", query), ("key", self.credentials.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ConnectError::VendorUnavailable(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::RequestFailed { status, body });
        }

        let parsed: VendorGeocodeResponse = response
            .json()
            .await
            .map_err(|e| ConnectError::InvalidResponse(e.to_string()))?;

        if parsed.status == "ZERO_RESULTS" {
            return Ok(None);
        }
        if parsed.status != "OK" {
            return Err(ConnectError::InvalidResponse(format!(
                "Geocoder status: {}",
                parsed.status
            )));
        }

        Ok(parsed.results.into_iter().next().map(|hit| GeocodeResult {
            formatted_address: hit.formatted_address,
            coordinates: Coordinates::new(hit.geometry.location.lat, hit.geometry.location.lng),
        }))
    }
}
