//! Shared application state for the points API server.

use geopoint_db::PointStore;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. The store is constructed exactly once at startup around
/// the selected backend and torn down at shutdown; no handler owns
/// database state of its own.
#[derive(Clone)]
pub struct AppState {
    /// The backend-agnostic spatial record store.
    pub store: PointStore,
}

impl AppState {
    /// Create the application state around an already-wired store.
    pub const fn new(store: PointStore) -> Self {
        Self { store }
    }
}
