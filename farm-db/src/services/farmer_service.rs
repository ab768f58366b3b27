//! Farmer service

use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use farm_core::error::{FarmError, FarmResult};
use farm_core::types::{Coordinates, FarmerId, FarmerRecord, FarmerUpdate, FieldBoundary, TenantId};
use farm_core::validation;

use crate::FarmDatabase;
use crate::entities::FarmerEntity;
use crate::error::FarmDbError;
use crate::repos::FarmerFilter;

/// Input for a new farmer registration
#[derive(Debug, Clone)]
pub struct NewFarmer {
    pub phone: String,
    pub name: String,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub language: String,
    pub crops: Vec<String>,
    pub field_boundaries: Vec<FieldBoundary>,
}

pub struct FarmerService {
    database: Arc<FarmDatabase>,
    tenant_id: TenantId,
    sequence: AtomicU64,
}

impl FarmerService {
    pub fn new(database: Arc<FarmDatabase>, tenant_id: TenantId) -> Self {
        Self {
            database,
            tenant_id,
            sequence: AtomicU64::new(0),
        }
    }

    fn generate_farmer_id(&self) -> FarmerId {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        FarmerId(format!("farmer_{timestamp:016x}_{seq:08x}"))
    }

    fn map_db_error(e: FarmDbError) -> FarmError {
        FarmError::Storage(e.to_string())
    }

    fn entity_to_record(entity: &FarmerEntity) -> FarmerRecord {
        FarmerRecord {
            farmer_id: FarmerId(entity.farmer_id.clone()),
            phone: entity.phone.clone(),
            name: entity.name.clone(),
            location: entity.location.clone(),
            coordinates: entity.coordinates,
            language: entity.language.clone(),
            crops: entity.crops.clone(),
            field_boundaries: entity.field_boundaries.clone(),
            created_at: entity.created_at.0,
            updated_at: entity.updated_at.0,
        }
    }

    fn validate_new(farmer: &NewFarmer) -> FarmResult<()> {
        validation::validate_phone(&farmer.phone)?;
        validation::validate_language(&farmer.language)?;
        validation::validate_crops(&farmer.crops)?;
        validation::validate_boundaries(&farmer.field_boundaries)?;
        if let Some(coords) = &farmer.coordinates {
            validation::validate_coordinates(coords)?;
        }
        Ok(())
    }

    /// Register a new farmer; the phone must not already be taken
    pub async fn register_farmer(&self, farmer: NewFarmer) -> FarmResult<FarmerRecord> {
        Self::validate_new(&farmer)?;

        if self
            .database
            .farmers
            .get_by_phone(&self.tenant_id, &farmer.phone)
            .await
            .map_err(Self::map_db_error)?
            .is_some()
        {
            return Err(FarmError::AlreadyExists(format!(
                "Farmer with phone {} already registered",
                farmer.phone
            )));
        }

        let farmer_id = self.generate_farmer_id();
        let mut entity = FarmerEntity::new(
            self.tenant_id.clone(),
            farmer_id.0.clone(),
            farmer.phone,
            farmer.name,
            farmer.language,
        );
        entity.location = farmer.location;
        entity.coordinates = farmer.coordinates;
        entity.crops = farmer.crops;
        entity.field_boundaries = farmer.field_boundaries;

        let created = self
            .database
            .farmers
            .create(&entity)
            .await
            .map_err(Self::map_db_error)?;

        tracing::info!(
            farmer_id = %created.farmer_id,
            operation = farm_core::logging::operations::FARMER_REGISTER,
            "Farmer registered"
        );

        Ok(Self::entity_to_record(&created))
    }

    pub async fn get_farmer(&self, farmer_id: &FarmerId) -> FarmResult<Option<FarmerRecord>> {
        let result = self
            .database
            .farmers
            .get_by_id(&self.tenant_id, &farmer_id.0)
            .await
            .map_err(Self::map_db_error)?;

        Ok(result.map(|e| Self::entity_to_record(&e)))
    }

    pub async fn get_by_phone(&self, phone: &str) -> FarmResult<Option<FarmerRecord>> {
        let result = self
            .database
            .farmers
            .get_by_phone(&self.tenant_id, phone)
            .await
            .map_err(Self::map_db_error)?;

        Ok(result.map(|e| Self::entity_to_record(&e)))
    }

    /// Fetch by phone, creating a minimal profile on first contact
    pub async fn ensure_by_phone(&self, phone: &str) -> FarmResult<FarmerRecord> {
        if let Some(existing) = self.get_by_phone(phone).await? {
            return Ok(existing);
        }

        validation::validate_phone(phone)?;
        let farmer_id = self.generate_farmer_id();
        let entity = FarmerEntity::new(
            self.tenant_id.clone(),
            farmer_id.0.clone(),
            phone.to_string(),
            String::new(),
            "en".to_string(),
        );

        let created = self
            .database
            .farmers
            .create(&entity)
            .await
            .map_err(Self::map_db_error)?;

        tracing::info!(
            farmer_id = %created.farmer_id,
            operation = farm_core::logging::operations::FARMER_REGISTER,
            "Farmer auto-created on first contact"
        );

        Ok(Self::entity_to_record(&created))
    }

    /// Apply a manual profile edit
    pub async fn update_farmer(
        &self,
        farmer_id: &FarmerId,
        update: FarmerUpdate,
    ) -> FarmResult<FarmerRecord> {
        if update.is_empty() {
            return Err(FarmError::Validation("No fields to update".to_string()));
        }

        let mut entity = self
            .database
            .farmers
            .get_by_id(&self.tenant_id, &farmer_id.0)
            .await
            .map_err(Self::map_db_error)?
            .ok_or_else(|| FarmError::NotFound(format!("Farmer {} not found", farmer_id.0)))?;

        if let Some(name) = update.name {
            entity.name = name;
        }
        if let Some(location) = update.location {
            entity.location = location;
        }
        if let Some(coords) = update.coordinates {
            validation::validate_coordinates(&coords)?;
            entity.coordinates = Some(coords);
        }
        if let Some(language) = update.language {
            validation::validate_language(&language)?;
            entity.language = language;
        }
        if let Some(crops) = update.crops {
            validation::validate_crops(&crops)?;
            entity.crops = crops;
        }
        if let Some(boundaries) = update.field_boundaries {
            validation::validate_boundaries(&boundaries)?;
            entity.field_boundaries = boundaries;
        }
        entity.updated_at = surrealdb::sql::Datetime::from(Utc::now());

        let updated = self
            .database
            .farmers
            .update(&entity)
            .await
            .map_err(Self::map_db_error)?;

        tracing::info!(
            farmer_id = %updated.farmer_id,
            operation = farm_core::logging::operations::FARMER_UPDATE,
            "Farmer profile updated"
        );

        Ok(Self::entity_to_record(&updated))
    }

    /// Explicit admin delete
    pub async fn delete_farmer(&self, farmer_id: &FarmerId) -> FarmResult<()> {
        let removed = self
            .database
            .farmers
            .delete(&self.tenant_id, &farmer_id.0)
            .await
            .map_err(Self::map_db_error)?;

        if !removed {
            return Err(FarmError::NotFound(format!(
                "Farmer {} not found",
                farmer_id.0
            )));
        }

        tracing::info!(
            farmer_id = %farmer_id.0,
            operation = farm_core::logging::operations::FARMER_DELETE,
            "Farmer deleted"
        );

        Ok(())
    }

    pub async fn list_farmers(
        &self,
        filter: FarmerFilter,
        limit: u32,
        offset: u32,
    ) -> FarmResult<Vec<FarmerRecord>> {
        let entities = self
            .database
            .farmers
            .list(&self.tenant_id, &filter, limit, offset)
            .await
            .map_err(Self::map_db_error)?;

        Ok(entities.iter().map(Self::entity_to_record).collect())
    }

    pub async fn count_farmers(&self) -> FarmResult<u64> {
        self.database
            .farmers
            .count(&self.tenant_id)
            .await
            .map_err(Self::map_db_error)
    }
}
