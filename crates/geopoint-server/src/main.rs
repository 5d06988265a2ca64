//! Service entry point for the Geopoint server.
//!
//! Startup order matters and every step before serving is fatal on
//! failure:
//!
//! 1. initialize structured logging;
//! 2. load configuration from the environment;
//! 3. resolve the backend descriptor for the configured mode;
//! 4. open the connection provider (extension loading included);
//! 5. run the backend's schema migrations against that same target;
//! 6. build the store and serve HTTP until terminated.
//!
//! The migration step and the live provider share a single freshly
//! resolved descriptor, so the schema can never be evolved against a
//! different backend than the one serving traffic.

mod config;

use std::sync::Arc;

use geopoint_api::{start_server, AppState, ServerConfig};
use geopoint_db::{BackendDescriptor, PointStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the backend is
/// unreachable, migrations fail, or the HTTP server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("geopoint-server starting");

    // Load configuration from environment
    let config = AppConfig::from_env()?;
    info!(
        mode = ?config.mode,
        host = config.host,
        port = config.port,
        "configuration loaded"
    );

    // Resolve and open the spatial backend, then migrate its schema.
    // Resolution happens fresh every startup; nothing is cached from a
    // previous run.
    let descriptor =
        BackendDescriptor::resolve(config.mode, &config.spatialite_path, &config.postgres);
    let backend = descriptor.connect().await?;
    backend.run_migrations().await?;

    let store = PointStore::new(Arc::clone(&backend));
    let state = Arc::new(AppState::new(store));

    let server_config = ServerConfig {
        host: config.host,
        port: config.port,
    };
    start_server(&server_config, state).await?;

    // Construction-once, teardown-at-shutdown: close the pool the
    // descriptor opened.
    backend.close().await;
    info!("geopoint-server stopped");

    Ok(())
}
