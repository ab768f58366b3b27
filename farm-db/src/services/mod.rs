//! Domain services
//!
//! Services orchestrate repositories, enforce status-transition rules
//! and convert between storage entities and domain records. Handlers
//! and the CLI talk to services, never to repos directly.

mod call_service;
mod credentials_service;
mod credit_service;
mod farmer_service;
mod insight_service;

pub use call_service::*;
pub use credentials_service::*;
pub use credit_service::*;
pub use farmer_service::*;
pub use insight_service::*;
