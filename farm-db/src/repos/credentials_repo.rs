//! Vendor credentials repository
//!
//! One row per tenant, addressed by a deterministic record key so reads
//! and writes always hit the same row.

use std::sync::Arc;

use farm_core::types::TenantId;

use crate::datastore::Datastore;
use crate::entities::{CredentialsEntity, Entity};
use crate::error::{FarmDbError, FarmDbResult};

pub struct CredentialsRepo {
    datastore: Arc<Datastore>,
}

impl CredentialsRepo {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    /// Fetch the credential row for a tenant
    pub async fn get(&self, tenant: &TenantId) -> FarmDbResult<Option<CredentialsEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant LIMIT 1",
            CredentialsEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }

    /// Replace the credential row, creating it when absent
    pub async fn upsert(&self, entity: &CredentialsEntity) -> FarmDbResult<CredentialsEntity> {
        let query = format!(
            "UPSERT type::thing('{}', $key) CONTENT $data RETURN AFTER",
            CredentialsEntity::TABLE
        );
        let entity_clone = entity.clone();

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("key", entity.tenant_id.0.clone()))
            .bind(("data", entity_clone))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let result: Option<CredentialsEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        result.ok_or_else(|| FarmDbError::QueryError("Failed to store credentials".to_string()))
    }
}
