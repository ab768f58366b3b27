//! Carbon credit entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use farm_core::types::TenantId;

use super::Entity;

/// One carbon program enrollment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditEntity {
    pub tenant_id: TenantId,
    pub credit_id: String,
    pub farmer_id: String,
    pub practices: Vec<String>,
    /// Stored as strings for precision
    pub acreage: String,
    pub crop: String,
    pub credits_tco2e: String,
    pub value_usd: String,
    /// pending, verified, rejected
    pub verification_status: String,
    pub methodology_version: String,
    pub registry_ref: Option<String>,
    pub enrolled_at: Datetime,
    pub updated_at: Datetime,
}

impl Entity for CreditEntity {
    const TABLE: &'static str = "farm_credit";

    fn key(&self) -> &str {
        &self.credit_id
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant_id
    }
}

impl CreditEntity {
    pub fn acreage_decimal(&self) -> Decimal {
        self.acreage.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn credits_decimal(&self) -> Decimal {
        self.credits_tco2e.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn value_decimal(&self) -> Decimal {
        self.value_usd.parse().unwrap_or(Decimal::ZERO)
    }
}
