//! Axum router construction for the points API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the points server.
///
/// The router includes:
/// - `POST /points` -- create a point
/// - `GET /points` -- list all points
/// - `GET /points/bbox` -- envelope query
/// - `GET /health` -- application + database health
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/points", post(handlers::create_point).get(handlers::list_points))
        .route("/points/bbox", get(handlers::points_in_bbox))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
