//! Spatial record store: backend-agnostic point persistence.
//!
//! [`PointStore`] owns the geometry codec boundary: WKT text in, WKT text
//! out, with the backend wire encoding normalized through
//! [`BackendGeometry`] in between. The active backend is injected once at
//! startup as an `Arc<dyn PointBackend>`; no store operation branches on
//! which backend is behind the trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geopoint_geom::{wkt, BackendGeometry};

use crate::error::StoreError;

/// A raw row as returned by a backend, geometry still in wire form.
#[derive(Debug, Clone)]
pub struct PointRow {
    /// Backend-assigned surrogate key.
    pub id: i64,
    /// Insertion timestamp, as stored.
    pub created_at: DateTime<Utc>,
    /// Geometry in the backend's wire encoding.
    pub geom: BackendGeometry,
    /// Measurement value.
    pub value: f64,
}

/// A persisted spatial point with geometry serialized to canonical WKT.
///
/// This is the shape handed to API callers:
/// `{ id, created_at, geom, value }`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SpatialPoint {
    /// Surrogate primary key, positive, immutable.
    pub id: i64,
    /// UTC insertion timestamp, immutable.
    pub created_at: DateTime<Utc>,
    /// Canonical WKT, `POINT (lon lat)`.
    pub geom: String,
    /// Measurement value associated with the point.
    pub value: f64,
}

/// Capability interface implemented by each spatial backend.
///
/// Selected once at startup (see
/// [`BackendDescriptor::connect`](crate::backend::BackendDescriptor::connect))
/// and injected into [`PointStore`]. Implementations evaluate the
/// envelope predicate natively (`ST_Intersects` against a built
/// envelope), never by unpacking coordinates in application code.
#[async_trait]
pub trait PointBackend: Send + Sync {
    /// Insert one point row. Geometry arrives as canonical WKT and is
    /// stored with SRID 4326; `created_at` is assigned by the caller so
    /// both backends share identical timestamp semantics.
    async fn insert_point(
        &self,
        wkt: &str,
        value: f64,
        created_at: DateTime<Utc>,
    ) -> Result<PointRow, StoreError>;

    /// Fetch every stored row. Ordering is backend-defined.
    async fn fetch_all_points(&self) -> Result<Vec<PointRow>, StoreError>;

    /// Fetch rows whose geometry intersects the axis-aligned envelope
    /// `(min_lon, min_lat) .. (max_lon, max_lat)`, bounds inclusive.
    async fn fetch_points_in_envelope(
        &self,
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<Vec<PointRow>, StoreError>;

    /// Cheap connectivity probe for health reporting.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Apply this backend's pending schema migrations.
    async fn run_migrations(&self) -> Result<(), StoreError>;

    /// Close the underlying pool gracefully.
    async fn close(&self);
}

/// Backend-agnostic store for spatial point records.
///
/// Cheap to clone; clones share the injected backend.
#[derive(Clone)]
pub struct PointStore {
    backend: Arc<dyn PointBackend>,
}

impl PointStore {
    /// Create a store over an already-opened backend.
    pub const fn new(backend: Arc<dyn PointBackend>) -> Self {
        Self { backend }
    }

    /// Access the underlying backend (health probes, shutdown).
    pub const fn backend(&self) -> &Arc<dyn PointBackend> {
        &self.backend
    }

    /// Parse, persist, and return a new point.
    ///
    /// The input WKT is validated before anything touches the backend; a
    /// parse failure creates no row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Geometry`] for unparseable WKT, or
    /// [`StoreError::Storage`] if the write fails.
    pub async fn create(&self, geom_text: &str, value: f64) -> Result<SpatialPoint, StoreError> {
        let point = wkt::parse(geom_text)?;
        let canonical = wkt::format(point);
        let row = self
            .backend
            .insert_point(&canonical, value, Utc::now())
            .await?;
        let created = row_to_point(row)?;
        tracing::debug!(id = created.id, "created spatial point");
        Ok(created)
    }

    /// Return every stored point.
    ///
    /// Ordering is NOT guaranteed; callers that need a stable order must
    /// sort downstream.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the read fails.
    pub async fn list_all(&self) -> Result<Vec<SpatialPoint>, StoreError> {
        let rows = self.backend.fetch_all_points().await?;
        rows.into_iter().map(row_to_point).collect()
    }

    /// Return every point inside the latitude/longitude envelope, bounds
    /// inclusive.
    ///
    /// The containment test is evaluated natively by the backend. An
    /// inverted envelope (`min > max` on either axis) is empty by
    /// definition and is answered without a backend round-trip, so both
    /// backends agree on the permissive contract.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the query fails.
    pub async fn query_bbox(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Vec<SpatialPoint>, StoreError> {
        if min_lat > max_lat || min_lon > max_lon {
            return Ok(Vec::new());
        }
        let rows = self
            .backend
            .fetch_points_in_envelope(min_lon, min_lat, max_lon, max_lat)
            .await?;
        tracing::debug!(count = rows.len(), "bounding-box query");
        rows.into_iter().map(row_to_point).collect()
    }
}

/// Normalize a backend row into the caller-facing shape.
fn row_to_point(row: PointRow) -> Result<SpatialPoint, StoreError> {
    let point = row.geom.decode().map_err(StoreError::CorruptGeometry)?;
    Ok(SpatialPoint {
        id: row.id,
        created_at: row.created_at,
        geom: wkt::format(point),
        value: row.value,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use geopoint_geom::wkb;

    use super::*;

    /// A backend that fails every operation; used to prove which paths
    /// never reach the backend at all.
    struct UnreachableBackend;

    #[async_trait]
    impl PointBackend for UnreachableBackend {
        async fn insert_point(
            &self,
            _wkt: &str,
            _value: f64,
            _created_at: DateTime<Utc>,
        ) -> Result<PointRow, StoreError> {
            Err(StoreError::Config(String::from("backend touched")))
        }

        async fn fetch_all_points(&self) -> Result<Vec<PointRow>, StoreError> {
            Err(StoreError::Config(String::from("backend touched")))
        }

        async fn fetch_points_in_envelope(
            &self,
            _min_lon: f64,
            _min_lat: f64,
            _max_lon: f64,
            _max_lat: f64,
        ) -> Result<Vec<PointRow>, StoreError> {
            Err(StoreError::Config(String::from("backend touched")))
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }

        async fn run_migrations(&self) -> Result<(), StoreError> {
            Ok(())
        }

        async fn close(&self) {}
    }

    #[tokio::test]
    async fn inverted_envelope_is_empty_without_a_round_trip() {
        let store = PointStore::new(Arc::new(UnreachableBackend));
        let result = store.query_bbox(90.0, -90.0, -180.0, 180.0).await.unwrap();
        assert!(result.is_empty());

        let result = store.query_bbox(-90.0, 90.0, 180.0, -180.0).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn invalid_wkt_creates_no_row() {
        let store = PointStore::new(Arc::new(UnreachableBackend));
        let err = store.create("NOT A POINT", 10.5).await.unwrap_err();
        assert!(matches!(err, StoreError::Geometry(_)));
    }

    #[test]
    fn rows_normalize_to_canonical_wkt() {
        let row = PointRow {
            id: 7,
            created_at: Utc::now(),
            geom: BackendGeometry::Wkb(wkb::encode(geo::Point::new(-0.11944, 51.50339))),
            value: 10.5,
        };
        let point = row_to_point(row).unwrap();
        assert_eq!(point.id, 7);
        assert_eq!(point.geom, "POINT (-0.11944 51.50339)");
        assert_eq!(point.value, 10.5);
    }

    #[test]
    fn corrupt_geometry_is_not_a_caller_fault() {
        let row = PointRow {
            id: 1,
            created_at: Utc::now(),
            geom: BackendGeometry::Wkb(vec![0xFF]),
            value: 0.0,
        };
        assert!(matches!(
            row_to_point(row).unwrap_err(),
            StoreError::CorruptGeometry(_)
        ));
    }
}
