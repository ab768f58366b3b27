//! Logging conventions
//!
//! All crates log through `tracing` with structured fields. Use the
//! constants below for field values so log output stays greppable.
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Datastore failures, credential decode failures |
//! | WARN  | Vendor call failed, fallback taken, retry exhausted |
//! | INFO  | Row written, message sent, server lifecycle |
//! | DEBUG | Request parameters, vendor response shapes |

/// Standard structured field names
pub mod fields {
    pub const FARMER_ID: &str = "farmer_id";
    pub const CALL_ID: &str = "call_id";
    pub const CREDIT_ID: &str = "credit_id";
    pub const INSIGHT_ID: &str = "insight_id";
    pub const CHANNEL: &str = "channel";
    pub const VENDOR: &str = "vendor";
    pub const OPERATION: &str = "operation";
    pub const DURATION_MS: &str = "duration_ms";
    pub const ERROR: &str = "error";
    pub const STATUS: &str = "status";
    pub const SOURCE: &str = "source";
    pub const COUNT: &str = "count";
}

/// Operation names used as the `operation` field value
pub mod operations {
    pub const FARMER_REGISTER: &str = "farmer_register";
    pub const FARMER_UPDATE: &str = "farmer_update";
    pub const FARMER_DELETE: &str = "farmer_delete";
    pub const CALL_LOG: &str = "call_log";
    pub const CALL_STATUS_UPDATE: &str = "call_status_update";
    pub const SMS_SEND: &str = "sms_send";
    pub const VOICE_CALL: &str = "voice_call";
    pub const WHATSAPP_SEND: &str = "whatsapp_send";
    pub const INSIGHT_GENERATE: &str = "insight_generate";
    pub const INSIGHT_FALLBACK: &str = "insight_fallback";
    pub const CREDIT_ESTIMATE: &str = "credit_estimate";
    pub const CREDIT_ENROLL: &str = "credit_enroll";
    pub const CREDIT_VERIFY: &str = "credit_verify";
    pub const REGISTRY_SUBMIT: &str = "registry_submit";
    pub const GEOCODE: &str = "geocode";
    pub const SCHEMA_INIT: &str = "schema_init";
    pub const HEALTH_CHECK: &str = "health_check";
}
