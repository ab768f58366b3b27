//! Carbon credit repository

use std::sync::Arc;

use farm_core::types::TenantId;

use crate::datastore::Datastore;
use crate::entities::{CreditEntity, Entity};
use crate::error::{FarmDbError, FarmDbResult};

use super::CountRow;

/// Optional filters for credit listings
#[derive(Debug, Clone, Default)]
pub struct CreditFilter {
    pub farmer_id: Option<String>,
    pub verification_status: Option<String>,
}

pub struct CreditRepo {
    datastore: Arc<Datastore>,
}

impl CreditRepo {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    pub async fn create(&self, entity: &CreditEntity) -> FarmDbResult<CreditEntity> {
        let query = format!("CREATE {} CONTENT $data RETURN AFTER", CreditEntity::TABLE);
        let entity_clone = entity.clone();

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("data", entity_clone))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let result: Option<CreditEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        result.ok_or_else(|| FarmDbError::QueryError("Failed to create credit record".to_string()))
    }

    pub async fn get_by_id(
        &self,
        tenant: &TenantId,
        credit_id: &str,
    ) -> FarmDbResult<Option<CreditEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant AND credit_id = $credit_id LIMIT 1",
            CreditEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .bind(("credit_id", credit_id.to_string()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }

    /// Update verification status
    pub async fn update_status(
        &self,
        tenant: &TenantId,
        credit_id: &str,
        status: &str,
    ) -> FarmDbResult<CreditEntity> {
        let query = format!(
            "UPDATE {} SET verification_status = $status, updated_at = time::now() WHERE tenant_id = $tenant AND credit_id = $credit_id RETURN AFTER",
            CreditEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("status", status.to_string()))
            .bind(("tenant", tenant.0.clone()))
            .bind(("credit_id", credit_id.to_string()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let result: Option<CreditEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        result.ok_or_else(|| FarmDbError::NotFound(format!("Credit {credit_id}")))
    }

    /// Attach the registry reference after a successful submission
    pub async fn set_registry_ref(
        &self,
        tenant: &TenantId,
        credit_id: &str,
        registry_ref: &str,
    ) -> FarmDbResult<CreditEntity> {
        let query = format!(
            "UPDATE {} SET registry_ref = $registry_ref, updated_at = time::now() WHERE tenant_id = $tenant AND credit_id = $credit_id RETURN AFTER",
            CreditEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("registry_ref", registry_ref.to_string()))
            .bind(("tenant", tenant.0.clone()))
            .bind(("credit_id", credit_id.to_string()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let result: Option<CreditEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        result.ok_or_else(|| FarmDbError::NotFound(format!("Credit {credit_id}")))
    }

    /// List enrollments, newest first
    pub async fn list(
        &self,
        tenant: &TenantId,
        filter: &CreditFilter,
        limit: u32,
        offset: u32,
    ) -> FarmDbResult<Vec<CreditEntity>> {
        let mut query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant",
            CreditEntity::TABLE
        );
        if filter.farmer_id.is_some() {
            query.push_str(" AND farmer_id = $farmer_id");
        }
        if filter.verification_status.is_some() {
            query.push_str(" AND verification_status = $verification_status");
        }
        query.push_str(" ORDER BY enrolled_at DESC LIMIT $limit START $offset");

        let mut request = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .bind(("limit", limit))
            .bind(("offset", offset));
        if let Some(farmer_id) = &filter.farmer_id {
            request = request.bind(("farmer_id", farmer_id.clone()));
        }
        if let Some(status) = &filter.verification_status {
            request = request.bind(("verification_status", status.clone()));
        }

        let mut response = request
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }

    /// Count enrollments for a tenant
    pub async fn count(&self, tenant: &TenantId) -> FarmDbResult<u64> {
        let query = format!(
            "SELECT count() AS count FROM {} WHERE tenant_id = $tenant GROUP ALL",
            CreditEntity::TABLE
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
