//! SurrealDB connection management

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;

use crate::error::{FarmDbError, FarmDbResult};

/// Datastore configuration
#[derive(Debug, Clone)]
pub struct SurrealConfig {
    /// Endpoint, e.g. "mem://", "rocksdb://data/farm.db" or "ws://host:8000"
    pub endpoint: String,
    pub namespace: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SurrealConfig {
    /// In-memory datastore for tests and local demos
    pub fn memory() -> Self {
        Self {
            endpoint: "mem://".to_string(),
            namespace: "farm".to_string(),
            database: "farm".to_string(),
            username: None,
            password: None,
        }
    }
}

impl Default for SurrealConfig {
    fn default() -> Self {
        Self::memory()
    }
}

/// Connected SurrealDB datastore
pub struct Datastore {
    client: Surreal<Any>,
    config: SurrealConfig,
}

impl Datastore {
    /// Connect and select the configured namespace/database
    pub async fn connect(config: SurrealConfig) -> FarmDbResult<Self> {
        let client = any::connect(&config.endpoint)
            .await
            .map_err(|e| FarmDbError::Connection(e.to_string()))?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            client
                .signin(Root {
                    username: username.as_str(),
                    password: password.as_str(),
                })
                .await
                .map_err(|e| FarmDbError::Connection(e.to_string()))?;
        }

        client
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| FarmDbError::Connection(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Underlying SurrealDB client
    pub fn client(&self) -> &Surreal<Any> {
        &self.client
    }

    pub fn config(&self) -> &SurrealConfig {
        &self.config
    }

    /// Cheap connectivity probe
    pub async fn ping(&self) -> FarmDbResult<()> {
        self.client
            .query("RETURN 1")
            .await
            .map_err(|e| FarmDbError::Connection(e.to_string()))?;
        Ok(())
    }
}
