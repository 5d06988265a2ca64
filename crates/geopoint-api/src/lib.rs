//! Points API server (Axum HTTP) for the Geopoint service.
//!
//! Thin plumbing around the data access core: request and response
//! shaping, routing, error-to-status mapping, and the server lifecycle.
//! The real work -- geometry codec, backend dispatch, spatial queries --
//! lives in `geopoint-db` and `geopoint-geom`; this crate never learns
//! which backend is active.
//!
//! # Modules
//!
//! - [`state`] -- shared application state (the injected store)
//! - [`handlers`] -- REST endpoint handlers
//! - [`router`] -- route table and middleware
//! - [`server`] -- bind-and-serve lifecycle
//! - [`error`] -- error-to-response mapping

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{start_server, ServerConfig};
pub use state::AppState;
