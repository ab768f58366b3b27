//! Application state for the API server

use std::sync::Arc;

use farm_connect::ConnectorFactory;
use farm_core::error::FarmError;
use farm_core::types::TenantId;
use farm_db::{
    CallService, CredentialsService, CreditService, Datastore, FarmDatabase, FarmerService,
    InsightService,
};

/// API server state
#[derive(Clone)]
pub struct AppState {
    pub farmers: Arc<FarmerService>,
    pub calls: Arc<CallService>,
    pub insights: Arc<InsightService>,
    pub credits: Arc<CreditService>,
    pub credentials: Arc<CredentialsService>,
    /// Builds vendor clients from stored credentials
    pub connectors: Arc<dyn ConnectorFactory>,
    pub database: Arc<FarmDatabase>,
    /// Shared secret guarding destructive admin endpoints, off when None
    pub admin_token: Option<String>,
    pub version: String,
}

impl AppState {
    /// Create new app state from a connected datastore
    pub async fn new(
        datastore: Arc<Datastore>,
        tenant_id: TenantId,
        connectors: Arc<dyn ConnectorFactory>,
        admin_token: Option<String>,
    ) -> Result<Self, FarmError> {
        let database = Arc::new(FarmDatabase::new(datastore));

        database
            .init_schema()
            .await
            .map_err(|e| FarmError::Storage(e.to_string()))?;

        let farmers = Arc::new(FarmerService::new(database.clone(), tenant_id.clone()));
        let calls = Arc::new(CallService::new(database.clone(), tenant_id.clone()));
        let insights = Arc::new(InsightService::new(database.clone(), tenant_id.clone()));
        let credits = Arc::new(CreditService::new(database.clone(), tenant_id.clone()));
        let credentials = Arc::new(CredentialsService::new(database.clone(), tenant_id));

        Ok(Self {
            farmers,
            calls,
            insights,
            credits,
            credentials,
            connectors,
            database,
            admin_token,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub tenant_id: String,
    pub admin_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
            tenant_id: "default".to_string(),
            admin_token: None,
        }
    }
}
