//! `SpatiaLite` connection provider and point operations.
//!
//! The development backend: a single-file `SQLite` database with the
//! `mod_spatialite` extension module loaded into every pooled connection
//! before any statement executes. A connection without the extension
//! cannot evaluate geometry columns, so the extension is wired into the
//! connect options rather than applied after the fact.
//!
//! The file engine allows at most one writer at a time; concurrent
//! writers queue at the engine level. That is an inherent limitation of
//! the embedded backend, not something this module works around -- WAL
//! mode keeps readers unblocked and the pool stays small.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geopoint_geom::BackendGeometry;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

use crate::error::StoreError;
use crate::store::{PointBackend, PointRow};

/// Default maximum connections in the pool. Kept small: the file engine
/// serializes writers anyway.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default pool acquire timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection pool handle to the embedded `SpatiaLite` database.
#[derive(Clone)]
pub struct SpatialitePool {
    pool: SqlitePool,
}

impl std::fmt::Debug for SpatialitePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialitePool").finish_non_exhaustive()
    }
}

impl SpatialitePool {
    /// Open the database file, creating it if absent (first-run
    /// bootstrap is intentional and observable), and prepare it for
    /// geometry columns.
    ///
    /// Every connection handed out by the pool has `mod_spatialite`
    /// loaded; spatial metadata is initialized idempotently after the
    /// pool comes up.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the file is unwritable or
    /// the extension module cannot be loaded.
    pub async fn connect(path: &Path) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .extension("mod_spatialite");

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .acquire_timeout(DEFAULT_CONNECT_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(StoreError::Connection)?;

        // No-op when the spatial metadata tables already exist.
        sqlx::query("SELECT InitSpatialMetaData(1)")
            .execute(&pool)
            .await
            .map_err(StoreError::Connection)?;

        tracing::info!(path = %path.display(), "opened SpatiaLite database");
        Ok(Self { pool })
    }
}

/// Row tuple shape shared by every point query against this backend.
type RawRow = (i64, DateTime<Utc>, Vec<u8>, f64);

fn into_row(raw: RawRow) -> PointRow {
    let (id, created_at, geom, value) = raw;
    PointRow {
        id,
        created_at,
        geom: BackendGeometry::Wkb(geom),
        value,
    }
}

#[async_trait]
impl PointBackend for SpatialitePool {
    async fn insert_point(
        &self,
        wkt: &str,
        value: f64,
        created_at: DateTime<Utc>,
    ) -> Result<PointRow, StoreError> {
        let raw = sqlx::query_as::<_, RawRow>(
            r"INSERT INTO spatial_points (geom, value, created_at)
              VALUES (ST_GeomFromText(?1, 4326), ?2, ?3)
              RETURNING id, created_at, ST_AsBinary(geom), value",
        )
        .bind(wkt)
        .bind(value)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(into_row(raw))
    }

    async fn fetch_all_points(&self) -> Result<Vec<PointRow>, StoreError> {
        let rows = sqlx::query_as::<_, RawRow>(
            r"SELECT id, created_at, ST_AsBinary(geom), value
              FROM spatial_points",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(into_row).collect())
    }

    async fn fetch_points_in_envelope(
        &self,
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<Vec<PointRow>, StoreError> {
        let rows = sqlx::query_as::<_, RawRow>(
            r"SELECT id, created_at, ST_AsBinary(geom), value
              FROM spatial_points
              WHERE ST_Intersects(geom, BuildMBR(?1, ?2, ?3, ?4, 4326))
              ORDER BY id",
        )
        .bind(min_lon)
        .bind(min_lat)
        .bind(max_lon)
        .bind(max_lat)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(into_row).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("migrations/spatialite").run(&self.pool).await?;
        tracing::info!("SpatiaLite migrations applied");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SpatiaLite pool closed");
    }
}
