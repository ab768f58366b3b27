//! Farmer entity

use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use farm_core::types::{Coordinates, FieldBoundary, TenantId};

use super::Entity;

/// Farmer profile stored in SurrealDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerEntity {
    pub tenant_id: TenantId,
    /// Farmer ID, unique across the platform
    pub farmer_id: String,
    /// E.164 phone number, unique per tenant
    pub phone: String,
    pub name: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub language: String,
    pub crops: Vec<String>,
    pub field_boundaries: Vec<FieldBoundary>,
    pub created_at: Datetime,
    pub updated_at: Datetime,
}

impl Entity for FarmerEntity {
    const TABLE: &'static str = "farm_farmer";

    fn key(&self) -> &str {
        &self.farmer_id
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant_id
    }
}

impl FarmerEntity {
    /// Create a new farmer entity with empty optional fields
    pub fn new(
        tenant_id: TenantId,
        farmer_id: String,
        phone: String,
        name: String,
        language: String,
    ) -> Self {
        let now = Datetime::from(chrono::Utc::now());
        Self {
            tenant_id,
            farmer_id,
            phone,
            name,
            location: String::new(),
            coordinates: None,
            language,
            crops: Vec::new(),
            field_boundaries: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
