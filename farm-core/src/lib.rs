//! Farm Core
//!
//! Domain types and pure logic for the farmbase platform:
//! - Farmer, call-log, satellite-insight and carbon-credit record types
//! - The carbon credit rate tables and estimate calculation
//! - The deterministic synthetic satellite observation generator
//! - Input validation and shared constants
//!
//! Persistence lives in `farm-db`, vendor HTTP clients in
//! `farm-connect`, and the REST surface in `farm-api`.

pub mod constants;
pub mod credit;
pub mod error;
pub mod insight;
pub mod logging;
pub mod types;
pub mod validation;

pub use constants::*;
pub use error::*;
pub use types::*;
