//! Satellite insight types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{FarmerId, InsightId};

/// Where an observation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    /// Fetched from the satellite vendor
    Live,
    /// Produced by the deterministic demo generator
    Synthetic,
}

impl InsightSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Synthetic => "synthetic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "live" => Some(Self::Live),
            "synthetic" => Some(Self::Synthetic),
            _ => None,
        }
    }
}

/// Vegetation health bucket derived from NDVI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Bare,
    Stressed,
    Moderate,
    Healthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bare => "bare",
            Self::Stressed => "stressed",
            Self::Moderate => "moderate",
            Self::Healthy => "healthy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bare" => Some(Self::Bare),
            "stressed" => Some(Self::Stressed),
            "moderate" => Some(Self::Moderate),
            "healthy" => Some(Self::Healthy),
            _ => None,
        }
    }

    /// Bucket an NDVI score: <0.2 bare, <0.4 stressed, <0.6 moderate,
    /// otherwise healthy
    pub fn from_ndvi(ndvi: Decimal) -> Self {
        if ndvi < Decimal::new(2, 1) {
            Self::Bare
        } else if ndvi < Decimal::new(4, 1) {
            Self::Stressed
        } else if ndvi < Decimal::new(6, 1) {
            Self::Moderate
        } else {
            Self::Healthy
        }
    }
}

/// Raw index scores for one observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Mean NDVI over the observed area, 0..1
    pub ndvi: Decimal,
    /// Soil moisture index, 0..1
    pub moisture: Decimal,
}

/// One stored satellite insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRecord {
    pub insight_id: InsightId,
    pub farmer_id: FarmerId,
    pub ndvi_score: Decimal,
    pub moisture_score: Decimal,
    pub health_status: HealthStatus,
    pub recommendation: String,
    pub source: InsightSource,
    pub observed_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndvi_buckets() {
        assert_eq!(HealthStatus::from_ndvi(Decimal::new(1, 1)), HealthStatus::Bare);
        assert_eq!(HealthStatus::from_ndvi(Decimal::new(25, 2)), HealthStatus::Stressed);
        assert_eq!(HealthStatus::from_ndvi(Decimal::new(45, 2)), HealthStatus::Moderate);
        assert_eq!(HealthStatus::from_ndvi(Decimal::new(6, 1)), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_ndvi(Decimal::new(85, 2)), HealthStatus::Healthy);
    }
}
