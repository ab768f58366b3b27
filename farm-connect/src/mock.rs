//! Mock vendor clients for tests
//!
//! Record every send and answer with deterministic receipts. The
//! satellite and registry mocks can be flipped to unavailable to
//! exercise fallback paths.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use farm_core::types::{
    BoundingBox, Coordinates, MapsCredentials, MessagingCredentials, Observation,
    RegistryCredentials, SatelliteCredentials, WhatsAppCredentials,
};

use crate::error::{ConnectError, ConnectResult};
use crate::factory::ConnectorFactory;
use crate::geocode::{GeocodeClient, GeocodeResult};
use crate::registry::{RegistryClient, RegistryEnrollment};
use crate::satellite::SatelliteClient;
use crate::sms::{MessageReceipt, MessagingClient};
use crate::whatsapp::WhatsAppClient;

/// One recorded outbound message
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub channel: &'static str,
    pub to: String,
    pub body: String,
}

type SentLog = Arc<Mutex<Vec<SentMessage>>>;

/// Factory handing out mock clients backed by shared state
pub struct MockConnectorFactory {
    satellite_available: bool,
    registry_available: bool,
    observation: Observation,
    sent: SentLog,
}

impl Default for MockConnectorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnectorFactory {
    pub fn new() -> Self {
        Self {
            satellite_available: true,
            registry_available: true,
            observation: Observation {
                ndvi: Decimal::new(62, 2),
                moisture: Decimal::new(38, 2),
            },
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Satellite vendor answers with this observation
    pub fn with_observation(mut self, observation: Observation) -> Self {
        self.observation = observation;
        self
    }

    /// Satellite vendor refuses every request
    pub fn with_satellite_down(mut self) -> Self {
        self.satellite_available = false;
        self
    }

    /// Registry vendor refuses every request
    pub fn with_registry_down(mut self) -> Self {
        self.registry_available = false;
        self
    }

    /// Everything sent through any messaging mock so far
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("sent log poisoned").clone()
    }
}

struct MockMessagingClient {
    sent: SentLog,
}

#[async_trait]
impl MessagingClient for MockMessagingClient {
    async fn send_sms(&self, to: &str, body: &str) -> ConnectResult<MessageReceipt> {
        self.sent.lock().expect("sent log poisoned").push(SentMessage {
            channel: "sms",
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(MessageReceipt {
            vendor_ref: format!("SM{}", Uuid::new_v4().simple()),
            status: "queued".to_string(),
        })
    }

    async fn start_voice_call(&self, to: &str, callback_url: &str) -> ConnectResult<MessageReceipt> {
        self.sent.lock().expect("sent log poisoned").push(SentMessage {
            channel: "voice",
            to: to.to_string(),
            body: callback_url.to_string(),
        });
        Ok(MessageReceipt {
            vendor_ref: format!("CA{}", Uuid::new_v4().simple()),
            status: "initiated".to_string(),
        })
    }
}

struct MockWhatsAppClient {
    sent: SentLog,
}

#[async_trait]
impl WhatsAppClient for MockWhatsAppClient {
    async fn send_text(&self, to: &str, body: &str) -> ConnectResult<MessageReceipt> {
        self.sent.lock().expect("sent log poisoned").push(SentMessage {
            channel: "whatsapp",
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(MessageReceipt {
            vendor_ref: format!("wamid.{}", Uuid::new_v4().simple()),
            status: "accepted".to_string(),
        })
    }

    async fn send_template(
        &self,
        to: &str,
        template_name: &str,
        _language: &str,
    ) -> ConnectResult<MessageReceipt> {
        self.sent.lock().expect("sent log poisoned").push(SentMessage {
            channel: "whatsapp",
            to: to.to_string(),
            body: format!("template:{template_name}"),
        });
        Ok(MessageReceipt {
            vendor_ref: format!("wamid.{}", Uuid::new_v4().simple()),
            status: "accepted".to_string(),
        })
    }
}

struct MockSatelliteClient {
    available: bool,
    observation: Observation,
}

#[async_trait]
impl SatelliteClient for MockSatelliteClient {
    async fn fetch_observation(
        &self,
        _bbox: BoundingBox,
        _date: NaiveDate,
    ) -> ConnectResult<Observation> {
        if !self.available {
            return Err(ConnectError::VendorUnavailable(
                "satellite vendor down".to_string(),
            ));
        }
        Ok(self.observation)
    }
}

struct MockGeocodeClient;

#[async_trait]
impl GeocodeClient for MockGeocodeClient {
    async fn geocode(&self, query: &str) -> ConnectResult<Option<GeocodeResult>> {
        if query.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(GeocodeResult {
            formatted_address: format!("{query}, IN"),
            coordinates: Coordinates::new(12.9716, 77.5946),
        }))
    }
}

struct MockRegistryClient {
    available: bool,
}

#[async_trait]
impl RegistryClient for MockRegistryClient {
    async fn submit_enrollment(&self, _enrollment: &RegistryEnrollment) -> ConnectResult<String> {
        if !self.available {
            return Err(ConnectError::VendorUnavailable(
                "registry vendor down".to_string(),
            ));
        }
        Ok(format!("REG-{}", Uuid::new_v4().simple()))
    }
}

impl ConnectorFactory for MockConnectorFactory {
    fn messaging(&self, _credentials: &MessagingCredentials) -> Arc<dyn MessagingClient> {
        Arc::new(MockMessagingClient {
            sent: self.sent.clone(),
        })
    }

    fn whatsapp(&self, _credentials: &WhatsAppCredentials) -> Arc<dyn WhatsAppClient> {
        Arc::new(MockWhatsAppClient {
            sent: self.sent.clone(),
        })
    }

    fn satellite(&self, _credentials: &SatelliteCredentials) -> Arc<dyn SatelliteClient> {
        Arc::new(MockSatelliteClient {
            available: self.satellite_available,
            observation: self.observation,
        })
    }

    fn geocode(&self, _credentials: &MapsCredentials) -> Arc<dyn GeocodeClient> {
        Arc::new(MockGeocodeClient)
    }

    fn registry(&self, _credentials: &RegistryCredentials) -> Arc<dyn RegistryClient> {
        Arc::new(MockRegistryClient {
            available: self.registry_available,
        })
    }
}
