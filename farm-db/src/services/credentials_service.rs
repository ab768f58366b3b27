//! Vendor credentials service

use std::sync::Arc;

use farm_core::error::{FarmError, FarmResult};
use farm_core::types::{TenantId, VendorCredentials};

use crate::FarmDatabase;
use crate::entities::CredentialsEntity;
use crate::error::FarmDbError;

pub struct CredentialsService {
    database: Arc<FarmDatabase>,
    tenant_id: TenantId,
}

impl CredentialsService {
    pub fn new(database: Arc<FarmDatabase>, tenant_id: TenantId) -> Self {
        Self {
            database,
            tenant_id,
        }
    }

    fn map_db_error(e: FarmDbError) -> FarmError {
        FarmError::Storage(e.to_string())
    }

    /// Fetch the credential set, empty when nothing is stored yet
    pub async fn get(&self) -> FarmResult<VendorCredentials> {
        let entity = self
            .database
            .credentials
            .get(&self.tenant_id)
            .await
            .map_err(Self::map_db_error)?;

        Ok(entity.map(|e| e.payload).unwrap_or_default())
    }

    /// Replace the credential row
    pub async fn save(&self, credentials: VendorCredentials) -> FarmResult<VendorCredentials> {
        let entity = CredentialsEntity::new(self.tenant_id.clone(), credentials);

        let stored = self
            .database
            .credentials
            .upsert(&entity)
            .await
            .map_err(Self::map_db_error)?;

        tracing::info!("Vendor credentials updated");

        Ok(stored.payload)
    }
}
