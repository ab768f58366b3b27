//! Call log service

use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use farm_core::constants::MAX_TRANSCRIPT_BYTES;
use farm_core::error::{FarmError, FarmResult};
use farm_core::types::{CallChannel, CallDirection, CallId, CallRecord, CallStatus, FarmerId, TenantId};

use crate::FarmDatabase;
use crate::entities::CallEntity;
use crate::error::FarmDbError;
use crate::repos::{CallFilter, CallOutcome};

pub struct CallService {
    database: Arc<FarmDatabase>,
    tenant_id: TenantId,
    sequence: AtomicU64,
}

impl CallService {
    pub fn new(database: Arc<FarmDatabase>, tenant_id: TenantId) -> Self {
        Self {
            database,
            tenant_id,
            sequence: AtomicU64::new(0),
        }
    }

    fn generate_call_id(&self) -> CallId {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        CallId(format!("call_{timestamp:016x}_{seq:08x}"))
    }

    fn map_db_error(e: FarmDbError) -> FarmError {
        FarmError::Storage(e.to_string())
    }

    fn entity_to_record(entity: &CallEntity) -> CallRecord {
        CallRecord {
            call_id: CallId(entity.call_id.clone()),
            farmer_id: FarmerId(entity.farmer_id.clone()),
            channel: CallChannel::parse(&entity.channel).unwrap_or(CallChannel::Ivr),
            direction: CallDirection::parse(&entity.direction).unwrap_or(CallDirection::Outbound),
            status: CallStatus::parse(&entity.call_status).unwrap_or(CallStatus::Initiated),
            vendor_ref: entity.vendor_ref.clone(),
            transcript: entity.transcript.clone(),
            summary: entity.summary.clone(),
            duration_secs: entity.duration_secs,
            started_at: entity.started_at.0,
            updated_at: entity.updated_at.0,
        }
    }

    /// Append a call row
    pub async fn log_call(
        &self,
        farmer_id: &FarmerId,
        channel: CallChannel,
        direction: CallDirection,
        status: CallStatus,
        vendor_ref: Option<String>,
    ) -> FarmResult<CallRecord> {
        let call_id = self.generate_call_id();
        let mut entity = CallEntity::new(
            self.tenant_id.clone(),
            call_id.0.clone(),
            farmer_id.0.clone(),
            channel.as_str().to_string(),
            direction.as_str().to_string(),
            status.as_str().to_string(),
        );
        if let Some(vendor_ref) = vendor_ref {
            entity = entity.with_vendor_ref(vendor_ref);
        }

        let created = self
            .database
            .calls
            .create(&entity)
            .await
            .map_err(Self::map_db_error)?;

        tracing::info!(
            call_id = %created.call_id,
            farmer_id = %created.farmer_id,
            channel = channel.as_str(),
            operation = farm_core::logging::operations::CALL_LOG,
            "Call logged"
        );

        Ok(Self::entity_to_record(&created))
    }

    /// Move a call forward in its lifecycle and attach outcome fields
    pub async fn update_status(
        &self,
        call_id: &CallId,
        new_status: CallStatus,
        outcome: CallOutcome,
    ) -> FarmResult<CallRecord> {
        if let Some(transcript) = &outcome.transcript {
            if transcript.len() > MAX_TRANSCRIPT_BYTES {
                return Err(FarmError::Validation(format!(
                    "Transcript too long: {} bytes (max {})",
                    transcript.len(),
                    MAX_TRANSCRIPT_BYTES
                )));
            }
        }

        let entity = self
            .database
            .calls
            .get_by_id(&self.tenant_id, &call_id.0)
            .await
            .map_err(Self::map_db_error)?
            .ok_or_else(|| FarmError::NotFound(format!("Call {} not found", call_id.0)))?;

        let current = CallStatus::parse(&entity.call_status).ok_or_else(|| {
            FarmError::Storage(format!("Corrupt call status: {}", entity.call_status))
        })?;

        if !current.can_transition_to(new_status) {
            return Err(FarmError::InvalidStateTransition(format!(
                "Call {} cannot move from {} to {}",
                call_id.0,
                current.as_str(),
                new_status.as_str()
            )));
        }

        let updated = self
            .database
            .calls
            .update_status(&self.tenant_id, &call_id.0, new_status.as_str(), &outcome)
            .await
            .map_err(Self::map_db_error)?;

        tracing::info!(
            call_id = %updated.call_id,
            status = new_status.as_str(),
            operation = farm_core::logging::operations::CALL_STATUS_UPDATE,
            "Call status updated"
        );

        Ok(Self::entity_to_record(&updated))
    }

    pub async fn get_call(&self, call_id: &CallId) -> FarmResult<Option<CallRecord>> {
        let result = self
            .database
            .calls
            .get_by_id(&self.tenant_id, &call_id.0)
            .await
            .map_err(Self::map_db_error)?;

        Ok(result.map(|e| Self::entity_to_record(&e)))
    }

    pub async fn list_calls(
        &self,
        filter: CallFilter,
        limit: u32,
        offset: u32,
    ) -> FarmResult<Vec<CallRecord>> {
        let entities = self
            .database
            .calls
            .list(&self.tenant_id, &filter, limit, offset)
            .await
            .map_err(Self::map_db_error)?;

        Ok(entities.iter().map(Self::entity_to_record).collect())
    }

    pub async fn count_calls(&self) -> FarmResult<u64> {
        self.database
            .calls
            .count(&self.tenant_id)
            .await
            .map_err(Self::map_db_error)
    }
}
