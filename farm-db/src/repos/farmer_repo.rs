//! Farmer repository

use std::sync::Arc;

use farm_core::types::TenantId;

use crate::datastore::Datastore;
use crate::entities::{Entity, FarmerEntity};
use crate::error::{FarmDbError, FarmDbResult};

use super::CountRow;

/// Optional filters for farmer listings
#[derive(Debug, Clone, Default)]
pub struct FarmerFilter {
    pub crop: Option<String>,
    pub language: Option<String>,
}

pub struct FarmerRepo {
    datastore: Arc<Datastore>,
}

impl FarmerRepo {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    /// Create a new farmer
    pub async fn create(&self, entity: &FarmerEntity) -> FarmDbResult<FarmerEntity> {
        let query = format!("CREATE {} CONTENT $data RETURN AFTER", FarmerEntity::TABLE);
        let entity_clone = entity.clone();

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("data", entity_clone))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let result: Option<FarmerEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        result.ok_or_else(|| FarmDbError::QueryError("Failed to create farmer".to_string()))
    }

    /// Get farmer by ID
    pub async fn get_by_id(
        &self,
        tenant: &TenantId,
        farmer_id: &str,
    ) -> FarmDbResult<Option<FarmerEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant AND farmer_id = $farmer_id LIMIT 1",
            FarmerEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .bind(("farmer_id", farmer_id.to_string()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }

    /// Get farmer by phone number
    pub async fn get_by_phone(
        &self,
        tenant: &TenantId,
        phone: &str,
    ) -> FarmDbResult<Option<FarmerEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant AND phone = $phone LIMIT 1",
            FarmerEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .bind(("phone", phone.to_string()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }

    /// Replace a farmer row
    pub async fn update(&self, entity: &FarmerEntity) -> FarmDbResult<FarmerEntity> {
        let query = format!(
            "UPDATE {} CONTENT $data WHERE tenant_id = $tenant AND farmer_id = $farmer_id RETURN AFTER",
            FarmerEntity::TABLE
        );
        let entity_clone = entity.clone();

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("data", entity_clone))
            .bind(("tenant", entity.tenant_id.0.clone()))
            .bind(("farmer_id", entity.farmer_id.clone()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let result: Option<FarmerEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        result.ok_or_else(|| FarmDbError::NotFound(format!("Farmer {}", entity.farmer_id)))
    }

    /// Delete a farmer, true when a row was removed
    pub async fn delete(&self, tenant: &TenantId, farmer_id: &str) -> FarmDbResult<bool> {
        let query = format!(
            "DELETE {} WHERE tenant_id = $tenant AND farmer_id = $farmer_id RETURN BEFORE",
            FarmerEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .bind(("farmer_id", farmer_id.to_string()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let removed: Vec<FarmerEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        Ok(!removed.is_empty())
    }

    /// List farmers, newest first
    pub async fn list(
        &self,
        tenant: &TenantId,
        filter: &FarmerFilter,
        limit: u32,
        offset: u32,
    ) -> FarmDbResult<Vec<FarmerEntity>> {
        let mut query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant",
            FarmerEntity::TABLE
        );
        if filter.crop.is_some() {
            query.push_str(" AND crops CONTAINS $crop");
        }
        if filter.language.is_some() {
            query.push_str(" AND language = $language");
        }
        query.push_str(" ORDER BY created_at DESC LIMIT $limit START $offset");

        let mut request = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .bind(("limit", limit))
            .bind(("offset", offset));
        if let Some(crop) = &filter.crop {
            request = request.bind(("crop", crop.clone()));
        }
        if let Some(language) = &filter.language {
            request = request.bind(("language", language.clone()));
        }

        let mut response = request
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }

    /// Count farmers for a tenant
    pub async fn count(&self, tenant: &TenantId) -> FarmDbResult<u64> {
        let query = format!(
            "SELECT count() AS count FROM {} WHERE tenant_id = $tenant GROUP ALL",
            FarmerEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let row: Option<CountRow> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}
