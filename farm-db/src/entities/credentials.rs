//! Vendor credentials entity

use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use farm_core::types::{TenantId, VendorCredentials};

use super::Entity;

/// The single mutable credential row for a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsEntity {
    pub tenant_id: TenantId,
    /// Full vendor credential blob
    pub payload: VendorCredentials,
    pub updated_at: Datetime,
}

impl Entity for CredentialsEntity {
    const TABLE: &'static str = "farm_credentials";

    fn key(&self) -> &str {
        &self.tenant_id.0
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant_id
    }
}

impl CredentialsEntity {
    pub fn new(tenant_id: TenantId, payload: VendorCredentials) -> Self {
        Self {
            tenant_id,
            payload,
            updated_at: Datetime::from(chrono::Utc::now()),
        }
    }
}
