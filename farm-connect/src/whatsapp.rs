//! WhatsApp Business messaging client
//!
//! Graph-style JSON API: bearer token, one POST per message against the
//! configured phone-number id.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use farm_core::constants::VENDOR_REQUEST_TIMEOUT_SECS;
use farm_core::types::WhatsAppCredentials;

use crate::error::{ConnectError, ConnectResult};
use crate::sms::MessageReceipt;

#[async_trait]
pub trait WhatsAppClient: Send + Sync {
    /// Send a plain text message
    async fn send_text(&self, to: &str, body: &str) -> ConnectResult<MessageReceipt>;

    /// Send a pre-approved template by name
    async fn send_template(
        &self,
        to: &str,
        template_name: &str,
        language: &str,
    ) -> ConnectResult<MessageReceipt>;
}

/// HTTP implementation against the graph API
pub struct HttpWhatsAppClient {
    base_url: String,
    client: reqwest::Client,
    credentials: WhatsAppCredentials,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GraphMessageId {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GraphSendResponse {
    messages: Vec<GraphMessageId>,
}

impl HttpWhatsAppClient {
    pub fn new(base_url: &str, credentials: WhatsAppCredentials) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            credentials,
            timeout: Duration::from_secs(VENDOR_REQUEST_TIMEOUT_SECS),
        }
    }

    async fn post_message(&self, payload: serde_json::Value) -> ConnectResult<MessageReceipt> {
        let url = format!(
            "{}/{}/messages",
            self.base_url, self.credentials.phone_number_id
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.credentials.access_token)
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

        let parsed: GraphSendResponse = response
            .json()
            .await
            .map_err(|e| ConnectError::InvalidResponse(e.to_string()))?;

        let message_id = parsed
            .messages
            .into_iter()
            .next()
            .map(|m| m.id)
            .ok_or_else(|| ConnectError::InvalidResponse("Empty messages array".to_string()))?;

        Ok(MessageReceipt {
            vendor_ref: message_id,
            status: "accepted".to_string(),
        })
    }
}

#[async_trait]
impl WhatsAppClient for HttpWhatsAppClient {
    async fn send_text(&self, to: &str, body: &str) -> ConnectResult<MessageReceipt> {
        self.post_message(json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "text",
            "text": { "body": body }
        }))
        .await
    }

    async fn send_template(
        &self,
        to: &str,
        template_name: &str,
        language: &str,
    ) -> ConnectResult<MessageReceipt> {
        self.post_message(json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "template",
            "template": {
                "name": template_name,
                "language": { "code": language }
            }
        }))
        .await
    }
}
