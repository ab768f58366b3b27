//! Satellite insight entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Datetime;

use farm_core::types::TenantId;

use super::Entity;

/// One stored observation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightEntity {
    pub tenant_id: TenantId,
    pub insight_id: String,
    pub farmer_id: String,
    /// Stored as string for precision
    pub ndvi_score: String,
    pub moisture_score: String,
    /// bare, stressed, moderate, healthy
    pub health_status: String,
    pub recommendation: String,
    /// live, synthetic
    pub source: String,
    /// ISO date, "2025-07-14"
    pub observed_on: String,
    pub created_at: Datetime,
}

impl Entity for InsightEntity {
    const TABLE: &'static str = "farm_insight";

    fn key(&self) -> &str {
        &self.insight_id
    }

    fn tenant(&self) -> &TenantId {
        &self.tenant_id
    }
}

impl InsightEntity {
    pub fn ndvi_decimal(&self) -> Decimal {
        self.ndvi_score.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn moisture_decimal(&self) -> Decimal {
        self.moisture_score.parse().unwrap_or(Decimal::ZERO)
    }
}
