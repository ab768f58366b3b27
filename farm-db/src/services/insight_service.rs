//! Satellite insight service

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use surrealdb::sql::Datetime;

use farm_core::error::{FarmError, FarmResult};
use farm_core::insight;
use farm_core::types::{
    FarmerId, HealthStatus, InsightId, InsightRecord, InsightSource, Observation, TenantId,
};

use crate::FarmDatabase;
use crate::entities::InsightEntity;
use crate::error::FarmDbError;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct InsightService {
    database: Arc<FarmDatabase>,
    tenant_id: TenantId,
    sequence: AtomicU64,
}

impl InsightService {
    pub fn new(database: Arc<FarmDatabase>, tenant_id: TenantId) -> Self {
        Self {
            database,
            tenant_id,
            sequence: AtomicU64::new(0),
        }
    }

    fn generate_insight_id(&self) -> InsightId {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        InsightId(format!("ins_{timestamp:016x}_{seq:08x}"))
    }

    fn map_db_error(e: FarmDbError) -> FarmError {
        FarmError::Storage(e.to_string())
    }

    fn entity_to_record(entity: &InsightEntity) -> InsightRecord {
        InsightRecord {
            insight_id: InsightId(entity.insight_id.clone()),
            farmer_id: FarmerId(entity.farmer_id.clone()),
            ndvi_score: entity.ndvi_decimal(),
            moisture_score: entity.moisture_decimal(),
            health_status: HealthStatus::parse(&entity.health_status)
                .unwrap_or(HealthStatus::Moderate),
            recommendation: entity.recommendation.clone(),
            source: InsightSource::parse(&entity.source).unwrap_or(InsightSource::Synthetic),
            observed_on: NaiveDate::parse_from_str(&entity.observed_on, DATE_FORMAT)
                .unwrap_or(NaiveDate::MIN),
            created_at: entity.created_at.0,
        }
    }

    /// Persist one observation, deriving the health bucket and
    /// recommendation from the scores
    pub async fn record_observation(
        &self,
        farmer_id: &FarmerId,
        observation: Observation,
        source: InsightSource,
        observed_on: NaiveDate,
    ) -> FarmResult<InsightRecord> {
        self.database
            .farmers
            .get_by_id(&self.tenant_id, &farmer_id.0)
            .await
            .map_err(Self::map_db_error)?
            .ok_or_else(|| FarmError::NotFound(format!("Farmer {} not found", farmer_id.0)))?;

        let health = HealthStatus::from_ndvi(observation.ndvi);
        let recommendation = insight::recommendation_for(health, observation.moisture);

        let entity = InsightEntity {
            tenant_id: self.tenant_id.clone(),
            insight_id: self.generate_insight_id().0,
            farmer_id: farmer_id.0.clone(),
            ndvi_score: observation.ndvi.to_string(),
            moisture_score: observation.moisture.to_string(),
            health_status: health.as_str().to_string(),
            recommendation: recommendation.to_string(),
            source: source.as_str().to_string(),
            observed_on: observed_on.format(DATE_FORMAT).to_string(),
            created_at: Datetime::from(Utc::now()),
        };

        let created = self
            .database
            .insights
            .create(&entity)
            .await
            .map_err(Self::map_db_error)?;

        tracing::info!(
            insight_id = %created.insight_id,
            farmer_id = %created.farmer_id,
            source = source.as_str(),
            status = health.as_str(),
            operation = farm_core::logging::operations::INSIGHT_GENERATE,
            "Insight recorded"
        );

        Ok(Self::entity_to_record(&created))
    }

    pub async fn list_for_farmer(
        &self,
        farmer_id: &FarmerId,
        limit: u32,
    ) -> FarmResult<Vec<InsightRecord>> {
        let entities = self
            .database
            .insights
            .list_for_farmer(&self.tenant_id, &farmer_id.0, limit)
            .await
            .map_err(Self::map_db_error)?;

        Ok(entities.iter().map(Self::entity_to_record).collect())
    }
}
