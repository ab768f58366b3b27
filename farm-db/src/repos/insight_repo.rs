//! Satellite insight repository

use std::sync::Arc;

use farm_core::types::TenantId;

use crate::datastore::Datastore;
use crate::entities::{Entity, InsightEntity};
use crate::error::{FarmDbError, FarmDbResult};

pub struct InsightRepo {
    datastore: Arc<Datastore>,
}

impl InsightRepo {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    pub async fn create(&self, entity: &InsightEntity) -> FarmDbResult<InsightEntity> {
        let query = format!("CREATE {} CONTENT $data RETURN AFTER", InsightEntity::TABLE);
        let entity_clone = entity.clone();

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("data", entity_clone))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let result: Option<InsightEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        result.ok_or_else(|| FarmDbError::QueryError("Failed to create insight".to_string()))
    }

    pub async fn get_by_id(
        &self,
        tenant: &TenantId,
        insight_id: &str,
    ) -> FarmDbResult<Option<InsightEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant AND insight_id = $insight_id LIMIT 1",
            InsightEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .bind(("insight_id", insight_id.to_string()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }

    /// List insights for a farmer, newest first
    pub async fn list_for_farmer(
        &self,
        tenant: &TenantId,
        farmer_id: &str,
        limit: u32,
    ) -> FarmDbResult<Vec<InsightEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant AND farmer_id = $farmer_id ORDER BY created_at DESC LIMIT $limit",
            InsightEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .bind(("farmer_id", farmer_id.to_string()))
            .bind(("limit", limit))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }
}
