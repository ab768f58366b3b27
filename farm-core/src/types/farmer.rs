//! Farmer profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Coordinates, FarmerId, FieldBoundary};

/// Farmer profile record
///
/// Created on registration or on first inbound message. The phone number
/// is the natural key and is unique within a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerRecord {
    pub farmer_id: FarmerId,
    /// E.164 phone number, unique per tenant
    pub phone: String,
    pub name: String,
    /// Free-text location ("Mandya, Karnataka")
    pub location: String,
    pub coordinates: Option<Coordinates>,
    /// Preferred language code ("kn", "hi", "en")
    pub language: String,
    pub crops: Vec<String>,
    pub field_boundaries: Vec<FieldBoundary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FarmerRecord {
    /// Total acreage across all recorded field boundaries
    pub fn total_acres(&self) -> f64 {
        self.field_boundaries.iter().map(|b| b.approx_acres()).sum()
    }
}

/// Mutable profile fields for a manual edit
///
/// A `None` field leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FarmerUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub language: Option<String>,
    pub crops: Option<Vec<String>>,
    pub field_boundaries: Option<Vec<FieldBoundary>>,
}

impl FarmerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.coordinates.is_none()
            && self.language.is_none()
            && self.crops.is_none()
            && self.field_boundaries.is_none()
    }
}
