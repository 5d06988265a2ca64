//! REST API endpoint handlers for the points server.
//!
//! All handlers go through the backend-agnostic [`PointStore`] held in
//! the shared [`AppState`]; none of them know which spatial backend is
//! live.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/points` | Create a point from WKT + value |
//! | `GET` | `/points` | List all points |
//! | `GET` | `/points/bbox` | Points inside a lat/lon envelope |
//! | `GET` | `/health` | Application + database health |

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use geopoint_db::SpatialPoint;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /points`.
#[derive(Debug, serde::Deserialize)]
pub struct CreatePointRequest {
    /// WKT point geometry, e.g. `POINT(-0.11944 51.50339)`.
    pub geom: String,
    /// Numeric value to associate with the point.
    pub value: f64,
}

/// Query parameters for `GET /points/bbox`. All four bounds are
/// required; bounds are inclusive.
#[derive(Debug, serde::Deserialize)]
pub struct BboxQuery {
    /// Minimum latitude (south bound).
    pub min_lat: f64,
    /// Maximum latitude (north bound).
    pub max_lat: f64,
    /// Minimum longitude (west bound).
    pub min_lon: f64,
    /// Maximum longitude (east bound).
    pub max_lon: f64,
}

/// Create a new geospatial point.
///
/// Expects a WKT point in the form `POINT(longitude latitude)` and a
/// numeric value; the geometry is stored with SRID 4326. Unparseable
/// WKT is a 422; no row is created.
pub async fn create_point(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePointRequest>,
) -> Result<(StatusCode, Json<SpatialPoint>), ApiError> {
    let created = state.store.create(&payload.geom, payload.value).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Return all stored points. Ordering is not guaranteed.
pub async fn list_points(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SpatialPoint>>, ApiError> {
    Ok(Json(state.store.list_all().await?))
}

/// Return points inside a bounding box (WGS84, inclusive bounds).
///
/// Inverted bounds (`min > max`) are not rejected: an inverted envelope
/// is empty, so the response is an empty list. This is deliberate
/// empty-envelope semantics, not missing validation.
pub async fn points_in_bbox(
    State(state): State<Arc<AppState>>,
    Query(bbox): Query<BboxQuery>,
) -> Result<Json<Vec<SpatialPoint>>, ApiError> {
    let points = state
        .store
        .query_bbox(bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon)
        .await?;
    Ok(Json(points))
}

/// Check application and database health.
///
/// Probes the active backend with a trivial statement. A failed probe
/// reports degraded rather than erroring: the health endpoint itself is
/// always up.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.backend().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "db": "up" })),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "health probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "degraded", "db": "down" })),
            )
        }
    }
}
