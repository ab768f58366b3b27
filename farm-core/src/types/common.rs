//! Common types shared across the platform
//!
//! Naming conventions:
//! - snake_case for field names
//! - *_id suffix for primary keys
//! - *_ref suffix for references to external systems

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tenant identifier for multi-tenant scoping
///
/// Every stored row carries a tenant id and every query filters by it,
/// so no request path can read or write across tenants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Farmer identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FarmerId(pub String);

impl fmt::Display for FarmerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Call record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub String);

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Satellite insight identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InsightId(pub String);

impl fmt::Display for InsightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Carbon credit enrollment identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreditId(pub String);

impl fmt::Display for CreditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// WGS84 point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check the point lies within valid WGS84 ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Axis-aligned bounding box around a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Compute the bounding box of a point set, None when empty
    pub fn around(points: &[Coordinates]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self {
            min_lat: first.lat,
            min_lng: first.lng,
            max_lat: first.lat,
            max_lng: first.lng,
        };
        for p in &points[1..] {
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.min_lng = bbox.min_lng.min(p.lng);
            bbox.max_lat = bbox.max_lat.max(p.lat);
            bbox.max_lng = bbox.max_lng.max(p.lng);
        }
        Some(bbox)
    }

    pub fn center(&self) -> Coordinates {
        Coordinates {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lng: (self.min_lng + self.max_lng) / 2.0,
        }
    }
}

/// Named field boundary, a closed ring of WGS84 points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBoundary {
    /// Display name ("north plot")
    pub name: String,
    /// Boundary ring; the last point is implicitly connected to the first
    pub ring: Vec<Coordinates>,
}

const EARTH_RADIUS_M: f64 = 6_371_000.0;
const SQUARE_METERS_PER_ACRE: f64 = 4_046.856_422_4;

impl FieldBoundary {
    /// Approximate enclosed area in acres
    ///
    /// Shoelace formula on an equirectangular projection centered on the
    /// ring. Good enough for field-sized polygons; returns 0 for rings
    /// with fewer than 3 points.
    pub fn approx_acres(&self) -> f64 {
        if self.ring.len() < 3 {
            return 0.0;
        }
        let lat0 = self.ring.iter().map(|p| p.lat).sum::<f64>() / self.ring.len() as f64;
        let cos_lat0 = lat0.to_radians().cos();
        let project = |p: &Coordinates| {
            (
                p.lng.to_radians() * EARTH_RADIUS_M * cos_lat0,
                p.lat.to_radians() * EARTH_RADIUS_M,
            )
        };
        let mut twice_area = 0.0;
        for i in 0..self.ring.len() {
            let (x1, y1) = project(&self.ring[i]);
            let (x2, y2) = project(&self.ring[(i + 1) % self.ring.len()]);
            twice_area += x1 * y2 - x2 * y1;
        }
        (twice_area.abs() / 2.0) / SQUARE_METERS_PER_ACRE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validity() {
        assert!(Coordinates::new(12.97, 77.59).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -181.0).is_valid());
    }

    #[test]
    fn test_bounding_box() {
        let points = vec![
            Coordinates::new(10.0, 70.0),
            Coordinates::new(11.0, 72.0),
            Coordinates::new(10.5, 71.0),
        ];
        let bbox = BoundingBox::around(&points).unwrap();
        assert_eq!(bbox.min_lat, 10.0);
        assert_eq!(bbox.max_lng, 72.0);
        let center = bbox.center();
        assert!((center.lat - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_area_one_hectare() {
        // Roughly 100m x 100m square near the equator, about 2.47 acres
        let boundary = FieldBoundary {
            name: "test plot".to_string(),
            ring: vec![
                Coordinates::new(0.0, 0.0),
                Coordinates::new(0.0, 0.0009),
                Coordinates::new(0.0009, 0.0009),
                Coordinates::new(0.0009, 0.0),
            ],
        };
        let acres = boundary.approx_acres();
        assert!((acres - 2.47).abs() < 0.1, "got {acres}");
    }

    #[test]
    fn test_degenerate_boundary_has_zero_area() {
        let boundary = FieldBoundary {
            name: "line".to_string(),
            ring: vec![Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 1.0)],
        };
        assert_eq!(boundary.approx_acres(), 0.0);
    }
}
