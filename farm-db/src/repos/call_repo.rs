//! Call log repository

use std::sync::Arc;

use farm_core::types::TenantId;

use crate::datastore::Datastore;
use crate::entities::{CallEntity, Entity};
use crate::error::{FarmDbError, FarmDbResult};

use super::CountRow;

/// Optional filters for call listings
#[derive(Debug, Clone, Default)]
pub struct CallFilter {
    pub farmer_id: Option<String>,
    pub channel: Option<String>,
}

/// Fields attached when a call reaches a later status
#[derive(Debug, Clone, Default)]
pub struct CallOutcome {
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub duration_secs: Option<u32>,
}

pub struct CallRepo {
    datastore: Arc<Datastore>,
}

impl CallRepo {
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    /// Append a call row
    pub async fn create(&self, entity: &CallEntity) -> FarmDbResult<CallEntity> {
        let query = format!("CREATE {} CONTENT $data RETURN AFTER", CallEntity::TABLE);
        let entity_clone = entity.clone();

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("data", entity_clone))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let result: Option<CallEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        result.ok_or_else(|| FarmDbError::QueryError("Failed to create call record".to_string()))
    }

    /// Get call by ID
    pub async fn get_by_id(
        &self,
        tenant: &TenantId,
        call_id: &str,
    ) -> FarmDbResult<Option<CallEntity>> {
        let query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant AND call_id = $call_id LIMIT 1",
            CallEntity::TABLE
        );

        let mut response = self
            .datastore
            .client()
            .query(query)
            .bind(("tenant", tenant.0.clone()))
            .bind(("call_id", call_id.to_string()))
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }

    /// Update status and attach outcome fields
    pub async fn update_status(
        &self,
        tenant: &TenantId,
        call_id: &str,
        status: &str,
        outcome: &CallOutcome,
    ) -> FarmDbResult<CallEntity> {
        let mut query = format!(
            "UPDATE {} SET call_status = $status, updated_at = time::now()",
            CallEntity::TABLE
        );
        if outcome.transcript.is_some() {
            query.push_str(", transcript = $transcript");
        }
        if outcome.summary.is_some() {
            query.push_str(", summary = $summary");
        }
        if outcome.duration_secs.is_some() {
            query.push_str(", duration_secs = $duration_secs");
        }
        query.push_str(" WHERE tenant_id = $tenant AND call_id = $call_id RETURN AFTER");

        let mut request = self
            .datastore
            .client()
            .query(query)
            .bind(("status", status.to_string()))
            .bind(("tenant", tenant.0.clone()))
            .bind(("call_id", call_id.to_string()));
        if let Some(transcript) = &outcome.transcript {
            request = request.bind(("transcript", transcript.clone()));
        }
        if let Some(summary) = &outcome.summary {
            request = request.bind(("summary", summary.clone()));
        }
        if let Some(duration) = outcome.duration_secs {
            request = request.bind(("duration_secs", duration));
        }

        let mut response = request
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        let result: Option<CallEntity> = response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        result.ok_or_else(|| FarmDbError::NotFound(format!("Call {call_id}")))
    }

    /// List calls, newest first
    pub async fn list(
        &self,
        tenant: &TenantId,
        filter: &CallFilter,
        limit: u32,
        offset: u32,
    ) -> FarmDbResult<Vec<CallEntity>> {
        let mut query = format!(
            "SELECT * FROM {} WHERE tenant_id = $tenant",
            CallEntity::TABLE
        );
        if filter.farmer_id.is_some() {
            query.push_str(" AND farmer_id = $farmer_id");
        }
        if filter.channel.is_some() {
            query.push_str(" AND channel = $channel");
        }
        query.push_str(" ORDER BY started_at DESC LIMIT $limit START $offset");

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
        if let Some(channel) = &filter.channel {
            request = request.bind(("channel", channel.clone()));
        }

        let mut response = request
            .await
            .map_err(|e| FarmDbError::QueryError(e.to_string()))?;

        response
            .take(0)
            .map_err(|e| FarmDbError::QueryError(e.to_string()))
    }

    /// Count calls for a tenant
    pub async fn count(&self, tenant: &TenantId) -> FarmDbResult<u64> {
        let query = format!(
            "SELECT count() AS count FROM {} WHERE tenant_id = $tenant GROUP ALL",
            CallEntity::TABLE
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
