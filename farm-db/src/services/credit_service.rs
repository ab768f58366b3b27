//! Carbon credit service

use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use surrealdb::sql::Datetime;

use farm_core::constants::CREDIT_METHODOLOGY_VERSION;
use farm_core::credit;
use farm_core::error::{FarmError, FarmResult};
use farm_core::types::{CreditId, CreditRecord, FarmerId, TenantId, VerificationStatus};

use crate::FarmDatabase;
use crate::entities::CreditEntity;
use crate::error::FarmDbError;
use crate::repos::CreditFilter;

pub struct CreditService {
    database: Arc<FarmDatabase>,
    tenant_id: TenantId,
    sequence: AtomicU64,
}

impl CreditService {
    pub fn new(database: Arc<FarmDatabase>, tenant_id: TenantId) -> Self {
        Self {
            database,
            tenant_id,
            sequence: AtomicU64::new(0),
        }
    }

    fn generate_credit_id(&self) -> CreditId {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        CreditId(format!("cc_{timestamp:016x}_{seq:08x}"))
    }

    fn map_db_error(e: FarmDbError) -> FarmError {
        FarmError::Storage(e.to_string())
    }

    fn entity_to_record(entity: &CreditEntity) -> CreditRecord {
        CreditRecord {
            credit_id: CreditId(entity.credit_id.clone()),
            farmer_id: FarmerId(entity.farmer_id.clone()),
            practices: entity.practices.clone(),
            acreage: entity.acreage_decimal(),
            crop: entity.crop.clone(),
            credits_tco2e: entity.credits_decimal(),
            value_usd: entity.value_decimal(),
            verification_status: VerificationStatus::parse(&entity.verification_status)
                .unwrap_or(VerificationStatus::Pending),
            registry_ref: entity.registry_ref.clone(),
            enrolled_at: entity.enrolled_at.0,
            updated_at: entity.updated_at.0,
        }
    }

    /// Calculate and persist an enrollment with status pending
    pub async fn enroll(
        &self,
        farmer_id: &FarmerId,
        practices: Vec<String>,
        acreage: Decimal,
        crop: String,
    ) -> FarmResult<CreditRecord> {
        self.database
            .farmers
            .get_by_id(&self.tenant_id, &farmer_id.0)
            .await
            .map_err(Self::map_db_error)?
            .ok_or_else(|| FarmError::NotFound(format!("Farmer {} not found", farmer_id.0)))?;

        let estimate = credit::estimate(&practices, acreage, &crop)?;

        let now = Datetime::from(Utc::now());
        let entity = CreditEntity {
            tenant_id: self.tenant_id.clone(),
            credit_id: self.generate_credit_id().0,
            farmer_id: farmer_id.0.clone(),
            practices,
            acreage: acreage.to_string(),
            crop,
            credits_tco2e: estimate.credits_tco2e.to_string(),
            value_usd: estimate.value_usd.to_string(),
            verification_status: VerificationStatus::Pending.as_str().to_string(),
            methodology_version: CREDIT_METHODOLOGY_VERSION.to_string(),
            registry_ref: None,
            enrolled_at: now.clone(),
            updated_at: now,
        };

        let created = self
            .database
            .credits
            .create(&entity)
            .await
            .map_err(Self::map_db_error)?;

        tracing::info!(
            credit_id = %created.credit_id,
            farmer_id = %created.farmer_id,
            operation = farm_core::logging::operations::CREDIT_ENROLL,
            "Credit enrollment persisted"
        );

        Ok(Self::entity_to_record(&created))
    }

    /// Decide a pending enrollment
    pub async fn set_verification(
        &self,
        credit_id: &CreditId,
        new_status: VerificationStatus,
    ) -> FarmResult<CreditRecord> {
        let entity = self
            .database
            .credits
            .get_by_id(&self.tenant_id, &credit_id.0)
            .await
            .map_err(Self::map_db_error)?
            .ok_or_else(|| FarmError::NotFound(format!("Credit {} not found", credit_id.0)))?;

        let current = VerificationStatus::parse(&entity.verification_status).ok_or_else(|| {
            FarmError::Storage(format!(
                "Corrupt verification status: {}",
                entity.verification_status
            ))
        })?;

        if !current.can_transition_to(new_status) {
            return Err(FarmError::InvalidStateTransition(format!(
                "Credit {} cannot move from {} to {}",
                credit_id.0,
                current.as_str(),
                new_status.as_str()
            )));
        }

        let updated = self
            .database
            .credits
            .update_status(&self.tenant_id, &credit_id.0, new_status.as_str())
            .await
            .map_err(Self::map_db_error)?;

        tracing::info!(
            credit_id = %updated.credit_id,
            status = new_status.as_str(),
            operation = farm_core::logging::operations::CREDIT_VERIFY,
            "Credit verification updated"
        );

        Ok(Self::entity_to_record(&updated))
    }

    /// Attach the registry reference after a successful submission
    pub async fn attach_registry_ref(
        &self,
        credit_id: &CreditId,
        registry_ref: &str,
    ) -> FarmResult<CreditRecord> {
        let updated = self
            .database
            .credits
            .set_registry_ref(&self.tenant_id, &credit_id.0, registry_ref)
            .await
            .map_err(|e| match e {
                FarmDbError::NotFound(msg) => FarmError::NotFound(msg),
                other => Self::map_db_error(other),
            })?;

        Ok(Self::entity_to_record(&updated))
    }

    pub async fn get_credit(&self, credit_id: &CreditId) -> FarmResult<Option<CreditRecord>> {
        let result = self
            .database
            .credits
            .get_by_id(&self.tenant_id, &credit_id.0)
            .await
            .map_err(Self::map_db_error)?;

        Ok(result.map(|e| Self::entity_to_record(&e)))
    }

    pub async fn list_credits(
        &self,
        filter: CreditFilter,
        limit: u32,
        offset: u32,
    ) -> FarmResult<Vec<CreditRecord>> {
        let entities = self
            .database
            .credits
            .list(&self.tenant_id, &filter, limit, offset)
            .await
            .map_err(Self::map_db_error)?;

        Ok(entities.iter().map(Self::entity_to_record).collect())
    }

    pub async fn count_credits(&self) -> FarmResult<u64> {
        self.database
            .credits
            .count(&self.tenant_id)
            .await
            .map_err(Self::map_db_error)
    }
}
