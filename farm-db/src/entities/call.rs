//! Call log entity

use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use farm_core::types::TenantId;

use super::Entity;

/// One logged interaction, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEntity {
    pub tenant_id: TenantId,
    pub call_id: String,
    pub farmer_id: String,
    /// ivr, whatsapp, voice_ai
    pub channel: String,
    /// inbound, outbound
    pub direction: String,
    /// initiated, in_progress, completed, failed
    pub call_status: String,
    pub vendor_ref: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub duration_secs: Option<u32>,
    pub started_at: Datetime,
    pub updated_at: Datetime,
}

impl Entity for CallEntity {
    const TABLE: &'static str = "farm_call";

    fn key(&self) -> &str {
        &self.call_id
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant_id
    }
}

impl CallEntity {
    pub fn new(
        tenant_id: TenantId,
        call_id: String,
        farmer_id: String,
        channel: String,
        direction: String,
        status: String,
    ) -> Self {
        let now = Datetime::from(chrono::Utc::now());
        Self {
            tenant_id,
            call_id,
            farmer_id,
            channel,
            direction,
            call_status: status,
            vendor_ref: None,
            transcript: None,
            summary: None,
            duration_secs: None,
            started_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn with_vendor_ref(mut self, vendor_ref: impl Into<String>) -> Self {
        self.vendor_ref = Some(vendor_ref.into());
        self
    }
}
