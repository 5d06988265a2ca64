//! Data access layer for the Geopoint service (`SpatiaLite` + `PostGIS`).
//!
//! One store, two interchangeable spatial backends chosen at startup:
//! an embedded `SpatiaLite` file in development, a networked
//! `PostgreSQL`/`PostGIS` server in production. The store and everything
//! above it are backend-agnostic; only the selector and the connection
//! providers know which engine is live.
//!
//! # Architecture
//!
//! ```text
//! mode --> BackendDescriptor::resolve --+--> SpatialitePool \
//!                                       |                    +--> Arc<dyn PointBackend>
//!                                       +--> PostgisPool    /         |
//!                                                                     v
//!                WKT in --> geopoint-geom codec --> PointStore --> WKT out
//! ```
//!
//! The migration binding runs through the same resolver as the live
//! provider, so the schema is always evolved against the backend that
//! serves traffic.
//!
//! # Modules
//!
//! - [`backend`] -- mode parsing and backend descriptor resolution
//! - [`spatialite`] -- embedded `SpatiaLite` provider (development)
//! - [`postgis`] -- networked `PostGIS` provider (production)
//! - [`store`] -- backend-agnostic point store and capability trait
//! - [`error`] -- shared error types

pub mod backend;
pub mod error;
pub mod postgis;
pub mod spatialite;
pub mod store;

// Re-export primary types for convenience.
pub use backend::{BackendDescriptor, BackendMode, PostgresSettings};
pub use error::StoreError;
pub use postgis::{PostgisConfig, PostgisPool};
pub use spatialite::SpatialitePool;
pub use store::{PointBackend, PointRow, PointStore, SpatialPoint};
