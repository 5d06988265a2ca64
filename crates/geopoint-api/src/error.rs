//! Error types for the points API layer.
//!
//! [`ApiError`] wraps the data-layer error and maps each kind onto an
//! HTTP response via its [`IntoResponse`] implementation. The mapping
//! follows the error taxonomy: caller faults (bad geometry) are 4xx and
//! never logged as system errors; backend faults are 5xx.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geopoint_db::StoreError;

/// Errors that can occur while serving an API request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The data access layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let Self::Store(err) = self;
        let status = match &err {
            // Caller fault: unparseable WKT input.
            StoreError::Geometry(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // Backend unreachable: the degraded-health signal.
            StoreError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Storage(_)
            | StoreError::Migration(_)
            | StoreError::CorruptGeometry(_)
            | StoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        }

        let body = serde_json::json!({
            "error": err.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
