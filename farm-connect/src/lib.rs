//! Farm Connect
//!
//! Outbound vendor HTTP clients for the farmbase platform. Every vendor
//! sits behind a trait so handlers depend on the operation, not the
//! transport:
//! - [`sms::MessagingClient`] for SMS and outbound IVR voice calls
//! - [`whatsapp::WhatsAppClient`] for WhatsApp Business messages
//! - [`satellite::SatelliteClient`] for NDVI/moisture statistics
//! - [`geocode::GeocodeClient`] for forward geocoding
//! - [`registry::RegistryClient`] for carbon registry submissions
//!
//! Clients are built per request from stored tenant credentials via
//! [`factory::ConnectorFactory`]; [`mock`] provides a factory of
//! recording mocks for tests.

pub mod error;
pub mod factory;
pub mod geocode;
pub mod mock;
pub mod registry;
pub mod retry;
pub mod satellite;
pub mod sms;
pub mod whatsapp;

pub use error::{ConnectError, ConnectResult};
pub use factory::{ConnectorFactory, HttpConnectorFactory};
pub use geocode::{GeocodeClient, GeocodeResult};
pub use registry::{RegistryClient, RegistryEnrollment};
pub use retry::{RetryConfig, execute_with_retry};
pub use satellite::SatelliteClient;
pub use sms::{MessageReceipt, MessagingClient};
pub use whatsapp::WhatsAppClient;
