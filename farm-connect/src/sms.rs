//! SMS and voice messaging client
//!
//! The vendor exposes a form-encoded REST API authenticated with basic
//! auth (account SID + auth token). Sending returns a vendor-side SID
//! and an initial status string.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use farm_core::constants::VENDOR_REQUEST_TIMEOUT_SECS;
use farm_core::types::MessagingCredentials;

use crate::error::{ConnectError, ConnectResult};

/// Receipt returned by a messaging vendor
#[derive(Debug, Clone)]
pub struct MessageReceipt {
    /// Vendor-side message or call SID
    pub vendor_ref: String,
    /// Vendor-side status ("queued", "initiated", ...)
    pub status: String,
}

/// SMS and outbound voice operations
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Send an SMS to an E.164 number
    async fn send_sms(&self, to: &str, body: &str) -> ConnectResult<MessageReceipt>;

    /// Place an outbound voice call; the vendor fetches call
    /// instructions from `callback_url` once the call connects
    async fn start_voice_call(&self, to: &str, callback_url: &str) -> ConnectResult<MessageReceipt>;
}

/// HTTP implementation against the vendor REST API
pub struct HttpMessagingClient {
    base_url: String,
    client: reqwest::Client,
    credentials: MessagingCredentials,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct VendorMessageResponse {
    sid: String,
    status: Option<String>,
}

impl HttpMessagingClient {
    pub fn new(base_url: &str, credentials: MessagingCredentials) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            credentials,
            timeout: Duration::from_secs(VENDOR_REQUEST_TIMEOUT_SECS),
        }
    }

    async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> ConnectResult<MessageReceipt> {
        let response = self
            .client
            .post(url)
            .basic_auth(&self.credentials.account_sid, Some(&self.credentials.auth_token))
            .form(params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ConnectError::VendorUnavailable(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectError::RequestFailed { status, body });
        }

        let parsed: VendorMessageResponse = response
            .json()
            .await
            .map_err(|e| ConnectError::InvalidResponse(e.to_string()))?;

        Ok(MessageReceipt {
            vendor_ref: parsed.sid,
            status: parsed.status.unwrap_or_else(|| "queued".to_string()),
        })
    }
}

#[async_trait]
impl MessagingClient for HttpMessagingClient {
    async fn send_sms(&self, to: &str, body: &str) -> ConnectResult<MessageReceipt> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.credentials.account_sid
        );
        self.post_form(
            &url,
            &[
                ("To", to),
                ("From", self.credentials.sms_number.as_str()),
                ("Body", body),
            ],
        )
        .await
    }

    async fn start_voice_call(&self, to: &str, callback_url: &str) -> ConnectResult<MessageReceipt> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.base_url, self.credentials.account_sid
        );
        self.post_form(
            &url,
            &[
                ("To", to),
                ("From", self.credentials.voice_number.as_str()),
                ("Url", callback_url),
            ],
        )
        .await
    }
}
