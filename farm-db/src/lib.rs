//! Farm Database Layer
//!
//! SurrealDB persistence for the farmbase platform: entities, table
//! repositories, domain services and the schema definition.
//!
//! # Usage
//!
//! ```ignore
//! use farm_db::{Datastore, FarmDatabase, SurrealConfig};
//! use std::sync::Arc;
//!
//! async fn example() {
//!     let datastore = Arc::new(Datastore::connect(SurrealConfig::memory()).await.unwrap());
//!     let db = FarmDatabase::new(datastore);
//!     db.init_schema().await.unwrap();
//! }
//! ```

pub mod datastore;
pub mod entities;
pub mod error;
pub mod repos;
pub mod schema;
pub mod services;

pub use datastore::{Datastore, SurrealConfig};
pub use entities::*;
pub use error::*;
pub use repos::*;
pub use schema::FARM_SCHEMA;
pub use services::{
    CallService, CredentialsService, CreditService, FarmerService, InsightService, NewFarmer,
};

use std::sync::Arc;

/// Database facade
///
/// Owns one repository per table over a shared datastore. Construct
/// once at startup, wrap in an `Arc` and hand to the services.
pub struct FarmDatabase {
    datastore: Arc<Datastore>,
    pub farmers: FarmerRepo,
    pub calls: CallRepo,
    pub insights: InsightRepo,
    pub credits: CreditRepo,
    pub credentials: CredentialsRepo,
}

impl FarmDatabase {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self {
            farmers: FarmerRepo::new(datastore.clone()),
            calls: CallRepo::new(datastore.clone()),
            insights: InsightRepo::new(datastore.clone()),
            credits: CreditRepo::new(datastore.clone()),
            credentials: CredentialsRepo::new(datastore.clone()),
            datastore,
        }
    }

    /// Initialize the schema
    ///
    /// Run once on startup; all definitions are idempotent.
    pub async fn init_schema(&self) -> FarmDbResult<()> {
        self.datastore
            .client()
            .query(FARM_SCHEMA)
            .await
            .map_err(|e| FarmDbError::SchemaError(e.to_string()))?;

        tracing::info!(
            operation = farm_core::logging::operations::SCHEMA_INIT,
            "Database schema initialized"
        );
        Ok(())
    }

    /// Check datastore connectivity
    pub async fn health_check(&self) -> FarmDbResult<bool> {
        self.datastore.ping().await.map(|_| true)
    }

    /// Get the underlying datastore
    pub fn datastore(&self) -> &Arc<Datastore> {
        &self.datastore
    }
}
