//! Error types for the data access layer.
//!
//! All errors are propagated via [`StoreError`], which wraps the
//! underlying [`sqlx`] and codec errors with context about which kind of
//! failure occurred. Nothing in this layer retries; retry policy, if any,
//! belongs to the caller.

use geopoint_geom::GeometryError;

/// Errors that can occur in the data access layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The configured backend could not be opened or reached.
    ///
    /// Fatal at startup; the process must not serve traffic.
    #[error("backend connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// A read or write against the backend failed after a successful
    /// connection.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// A schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Inbound geometry text was rejected by the codec.
    ///
    /// A caller fault, not a system fault: surfaced as a rejected
    /// request, never logged as an error.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Geometry read back from a backend failed to decode.
    ///
    /// Unlike [`StoreError::Geometry`] this indicates stored data the
    /// service cannot interpret, which is a system fault.
    #[error("stored geometry could not be decoded: {0}")]
    CorruptGeometry(#[source] GeometryError),

    /// Backend configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}
