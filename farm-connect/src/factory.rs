//! Connector construction
//!
//! Vendor clients are built per request from the tenant's stored
//! credentials. The factory seam lets the API swap HTTP clients for
//! mocks in tests.

use std::sync::Arc;

use farm_core::types::{
    MapsCredentials, MessagingCredentials, RegistryCredentials, SatelliteCredentials,
    WhatsAppCredentials,
};

use crate::geocode::{GeocodeClient, HttpGeocodeClient};
use crate::registry::{HttpRegistryClient, RegistryClient};
use crate::satellite::{HttpSatelliteClient, SatelliteClient};
use crate::sms::{HttpMessagingClient, MessagingClient};
use crate::whatsapp::{HttpWhatsAppClient, WhatsAppClient};

/// Builds vendor clients from credentials
pub trait ConnectorFactory: Send + Sync {
    fn messaging(&self, credentials: &MessagingCredentials) -> Arc<dyn MessagingClient>;
    fn whatsapp(&self, credentials: &WhatsAppCredentials) -> Arc<dyn WhatsAppClient>;
    fn satellite(&self, credentials: &SatelliteCredentials) -> Arc<dyn SatelliteClient>;
    fn geocode(&self, credentials: &MapsCredentials) -> Arc<dyn GeocodeClient>;
    fn registry(&self, credentials: &RegistryCredentials) -> Arc<dyn RegistryClient>;
}

/// Production factory pointing at the real vendor endpoints
pub struct HttpConnectorFactory {
    pub messaging_base_url: String,
    pub whatsapp_base_url: String,
    pub satellite_auth_url: String,
    pub satellite_stats_url: String,
    pub geocode_base_url: String,
}

impl Default for HttpConnectorFactory {
    fn default() -> Self {
        Self {
            messaging_base_url: "https://api.twilio.com".to_string(),
            whatsapp_base_url: "https://graph.facebook.com/v19.0".to_string(),
            satellite_auth_url: "https://services.sentinel-hub.com/oauth/token".to_string(),
            satellite_stats_url: "https://services.sentinel-hub.com/api/v1/statistics".to_string(),
            geocode_base_url: "https://maps.googleapis.com/maps/api".to_string(),
        }
    }
}

impl ConnectorFactory for HttpConnectorFactory {
    fn messaging(&self, credentials: &MessagingCredentials) -> Arc<dyn MessagingClient> {
        Arc::new(HttpMessagingClient::new(
            &self.messaging_base_url,
            credentials.clone(),
        ))
    }

    fn whatsapp(&self, credentials: &WhatsAppCredentials) -> Arc<dyn WhatsAppClient> {
        Arc::new(HttpWhatsAppClient::new(
            &self.whatsapp_base_url,
            credentials.clone(),
        ))
    }

    fn satellite(&self, credentials: &SatelliteCredentials) -> Arc<dyn SatelliteClient> {
        Arc::new(HttpSatelliteClient::new(
            &self.satellite_auth_url,
            &self.satellite_stats_url,
            credentials.clone(),
        ))
    }

    fn geocode(&self, credentials: &MapsCredentials) -> Arc<dyn GeocodeClient> {
        Arc::new(HttpGeocodeClient::new(
            &self.geocode_base_url,
            credentials.clone(),
        ))
    }

    fn registry(&self, credentials: &RegistryCredentials) -> Arc<dyn RegistryClient> {
        Arc::new(HttpRegistryClient::new(credentials.clone()))
    }
}
