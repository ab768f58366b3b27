//! Satellite insight endpoints
//!
//! Generation tries the live satellite vendor first and falls back to
//! the deterministic synthetic generator on any vendor failure or when
//! no satellite credentials are configured. The stored row is tagged
//! with its source either way.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use farm_core::constants::MAX_PAGE_LIMIT;
use farm_core::insight;
use farm_core::logging::operations;
use farm_core::types::{
    BoundingBox, Coordinates, FarmerId, FarmerRecord, InsightRecord, InsightSource,
};

use crate::dto::{GenerateInsightRequest, InsightResponse, ListQueryParams, PaginatedResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Fall-back box half-width in degrees when only a point is known
const POINT_BBOX_RADIUS_DEG: f64 = 0.005;

/// Generate and persist an insight for a farmer
pub async fn generate_insight(
    State(state): State<AppState>,
    Json(req): Json<GenerateInsightRequest>,
) -> ApiResult<Json<InsightResponse>> {
    let farmer_id = FarmerId(req.farmer_id.clone());
    let farmer = state
        .farmers
        .get_farmer(&farmer_id)
        .await
        .map_err(ApiError::Domain)?
        .ok_or_else(|| ApiError::NotFound(format!("Farmer {} not found", req.farmer_id)))?;

    let observed_on = req.observed_on.unwrap_or_else(|| Utc::now().date_naive());
    let bbox = req.bbox.or_else(|| bbox_for_farmer(&farmer));

    let satellite_credentials = state
        .credentials
        .get()
        .await
        .map_err(ApiError::Domain)?
        .satellite;

    let (observation, source) = match (satellite_credentials, bbox) {
        (Some(credentials), Some(bbox)) => {
            let client = state.connectors.satellite(&credentials);
            match client.fetch_observation(bbox, observed_on).await {
                Ok(observation) => (observation, InsightSource::Live),
                Err(e) => {
                    tracing::warn!(
                        farmer_id = %farmer.farmer_id,
                        error = %e,
                        operation = operations::INSIGHT_FALLBACK,
                        "Satellite vendor failed, substituting synthetic observation"
                    );
                    (
                        insight::generate(&farmer.farmer_id, observed_on),
                        InsightSource::Synthetic,
                    )
                }
            }
        }
        _ => (
            insight::generate(&farmer.farmer_id, observed_on),
            InsightSource::Synthetic,
        ),
    };

    let record = state
        .insights
        .record_observation(&farmer.farmer_id, observation, source, observed_on)
        .await
        .map_err(ApiError::Domain)?;

    Ok(Json(insight_to_response(&record)))
}

/// List insights for a farmer, newest first
pub async fn list_insights(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> ApiResult<Json<PaginatedResponse<InsightResponse>>> {
    let farmer_id = params
        .farmer_id
        .ok_or_else(|| ApiError::BadRequest("farmer_id query parameter required".to_string()))?;

    let limit = params.limit.min(MAX_PAGE_LIMIT);

    let insights = state
        .insights
        .list_for_farmer(&FarmerId(farmer_id), limit)
        .await
        .map_err(ApiError::Domain)?;

    let total = insights.len() as u64;

    Ok(Json(PaginatedResponse {
        items: insights.iter().map(insight_to_response).collect(),
        total,
        limit,
        offset: 0,
    }))
}

// Helper functions

/// Derive the observation area from boundaries, else from the point
fn bbox_for_farmer(farmer: &FarmerRecord) -> Option<BoundingBox> {
    let points: Vec<Coordinates> = farmer
        .field_boundaries
        .iter()
        .flat_map(|b| b.ring.iter().copied())
        .collect();

    if let Some(bbox) = BoundingBox::around(&points) {
        return Some(bbox);
    }

    farmer.coordinates.map(|c| BoundingBox {
        min_lat: c.lat - POINT_BBOX_RADIUS_DEG,
        min_lng: c.lng - POINT_BBOX_RADIUS_DEG,
        max_lat: c.lat + POINT_BBOX_RADIUS_DEG,
        max_lng: c.lng + POINT_BBOX_RADIUS_DEG,
    })
}

pub(crate) fn insight_to_response(record: &InsightRecord) -> InsightResponse {
    InsightResponse {
        insight_id: record.insight_id.0.clone(),
        farmer_id: record.farmer_id.0.clone(),
        ndvi_score: record.ndvi_score,
        moisture_score: record.moisture_score,
        health_status: record.health_status.as_str().to_string(),
        recommendation: record.recommendation.clone(),
        source: record.source.as_str().to_string(),
        observed_on: record.observed_on,
        created_at: record.created_at,
    }
}
