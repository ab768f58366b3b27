//! Farm API Server
//!
//! REST surface for the farmbase platform.
//!
//! ## Endpoints
//!
//! ### Farmers
//! - POST /api/v1/farmers - Register farmer
//! - GET /api/v1/farmers - List farmers (crop/language filters)
//! - GET /api/v1/farmers/:farmer_id - Get farmer
//! - PUT /api/v1/farmers/:farmer_id - Update profile fields
//! - DELETE /api/v1/farmers/:farmer_id - Delete (admin)
//!
//! ### Vendor credentials
//! - GET /api/v1/credentials - Fetch masked credential set
//! - PUT /api/v1/credentials - Replace credential set (admin)
//!
//! ### Messaging
//! - POST /api/v1/messages/sms - Send SMS
//! - POST /api/v1/messages/voice - Start outbound IVR call
//! - POST /api/v1/messages/whatsapp - Send WhatsApp text/template
//! - POST /api/v1/calls - Log an interaction
//! - GET /api/v1/calls - List call log
//! - GET /api/v1/calls/:call_id - Get call
//! - POST /api/v1/calls/:call_id/status - Update call status
//!
//! ### Satellite insights
//! - POST /api/v1/insights/generate - Fetch or synthesize an insight
//! - GET /api/v1/insights?farmer_id= - List insights for a farmer
//!
//! ### Carbon credits
//! - POST /api/v1/credits/estimate - Pure calculation
//! - POST /api/v1/credits/enroll - Calculate and persist
//! - GET /api/v1/credits - Credit ledger
//! - GET /api/v1/credits/:credit_id - Get enrollment
//! - POST /api/v1/credits/:credit_id/verify - Decide verification
//!
//! ### Geocoding
//! - GET /api/v1/geocode?q= - Forward geocode a location

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use dto::*;
pub use error::*;
pub use routes::*;
pub use server::*;
pub use state::*;
