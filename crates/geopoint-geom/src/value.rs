//! Backend geometry values: the tagged wire shape returned by a database.
//!
//! The two backends put geometry on the wire in different encodings: the
//! embedded `SpatiaLite` backend returns plain WKB, `PostGIS` returns
//! extended WKB with an embedded SRID. [`BackendGeometry`] tags the bytes
//! with their provenance so callers carry one type regardless of which
//! backend produced them, and normalizes both shapes to the same point
//! value (and therefore the same canonical WKT) in one step.

use geo::Point;

use crate::error::GeometryError;
use crate::{wkb, wkt};

/// Geometry bytes as returned by a spatial backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendGeometry {
    /// Plain WKB, as returned by `SpatiaLite`'s `ST_AsBinary`.
    Wkb(Vec<u8>),
    /// Extended WKB with an embedded SRID, as returned by `PostGIS`'s
    /// `ST_AsEWKB`.
    Ewkb(Vec<u8>),
}

impl BackendGeometry {
    /// Normalize either wire shape to a point value.
    ///
    /// The WKB buffer is self-describing, so both variants go through the
    /// same decoder; the tag records where the bytes came from.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Wkb`] if the bytes do not decode as a
    /// single 2D point.
    pub fn decode(&self) -> Result<Point<f64>, GeometryError> {
        match self {
            Self::Wkb(bytes) | Self::Ewkb(bytes) => wkb::decode(bytes),
        }
    }

    /// Normalize either wire shape to canonical WKT (`POINT (x y)`).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Wkb`] if the bytes do not decode as a
    /// single 2D point.
    pub fn to_wkt(&self) -> Result<String, GeometryError> {
        Ok(wkt::format(self.decode()?))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn both_shapes_normalize_to_the_same_wkt() {
        let point = Point::new(-0.11944, 51.50339);

        let plain = BackendGeometry::Wkb(wkb::encode(point));

        let mut ewkb = vec![1];
        ewkb.extend_from_slice(&(1_u32 | 0x2000_0000).to_le_bytes());
        ewkb.extend_from_slice(&4326_u32.to_le_bytes());
        ewkb.extend_from_slice(&point.x().to_le_bytes());
        ewkb.extend_from_slice(&point.y().to_le_bytes());
        let wrapped = BackendGeometry::Ewkb(ewkb);

        assert_eq!(plain.to_wkt().unwrap(), "POINT (-0.11944 51.50339)");
        assert_eq!(wrapped.to_wkt().unwrap(), plain.to_wkt().unwrap());
    }

    #[test]
    fn decode_failure_propagates() {
        assert!(BackendGeometry::Wkb(vec![9, 9, 9]).decode().is_err());
    }
}
