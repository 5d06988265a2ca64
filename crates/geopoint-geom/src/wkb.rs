//! Well-Known Binary decoding and encoding for points.
//!
//! The decoder accepts both plain ISO WKB (what `SpatiaLite` returns from
//! `ST_AsBinary`) and `PostGIS` extended WKB, which sets a flag bit in the
//! geometry type word and follows it with a 4-byte SRID. Both byte orders
//! are handled; the buffer is self-describing.
//!
//! The encoder emits little-endian plain WKB only. It exists for callers
//! that need to fabricate backend-shaped geometry (in-memory test
//! backends) and for symmetry with [`decode`].

use geo::Point;

use crate::error::GeometryError;

/// WKB geometry type code for a 2D point.
const WKB_POINT: u32 = 1;

/// EWKB flag: a 4-byte SRID follows the type word.
const EWKB_SRID_FLAG: u32 = 0x2000_0000;

/// EWKB flag: geometry carries Z coordinates.
const EWKB_Z_FLAG: u32 = 0x8000_0000;

/// EWKB flag: geometry carries M coordinates.
const EWKB_M_FLAG: u32 = 0x4000_0000;

/// Decode a WKB or EWKB point.
///
/// # Errors
///
/// Returns [`GeometryError::Wkb`] if the buffer is truncated, uses an
/// unknown byte-order marker, encodes a geometry other than a 2D point,
/// or carries non-finite coordinates (the `PostGIS` encoding of
/// `POINT EMPTY`).
pub fn decode(bytes: &[u8]) -> Result<Point<f64>, GeometryError> {
    let mut reader = Reader::new(bytes);

    let [order] = reader.take::<1>()?;
    let little_endian = match order {
        0 => false,
        1 => true,
        other => {
            return Err(GeometryError::Wkb(format!(
                "unknown byte-order marker {other:#04x}"
            )));
        }
    };

    let type_word = reader.read_u32(little_endian)?;
    if type_word & (EWKB_Z_FLAG | EWKB_M_FLAG) != 0 {
        return Err(GeometryError::Wkb(
            "Z/M dimensions are not supported".to_owned(),
        ));
    }
    if type_word & EWKB_SRID_FLAG != 0 {
        // EWKB: skip the embedded SRID. Every row in the system is 4326.
        reader.read_u32(little_endian)?;
    }

    let geometry_type = type_word & !EWKB_SRID_FLAG;
    if geometry_type != WKB_POINT {
        return Err(GeometryError::Wkb(format!(
            "unsupported geometry type code {geometry_type}"
        )));
    }

    let x = reader.read_f64(little_endian)?;
    let y = reader.read_f64(little_endian)?;
    if !x.is_finite() || !y.is_finite() {
        return Err(GeometryError::Wkb("non-finite coordinates".to_owned()));
    }

    Ok(Point::new(x, y))
}

/// Encode a point as little-endian plain WKB (21 bytes).
pub fn encode(point: Point<f64>) -> Vec<u8> {
    let mut out = Vec::with_capacity(21);
    out.push(1);
    out.extend_from_slice(&WKB_POINT.to_le_bytes());
    out.extend_from_slice(&point.x().to_le_bytes());
    out.extend_from_slice(&point.y().to_le_bytes());
    out
}

/// Forward-only cursor over a byte slice.
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    const fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], GeometryError> {
        let (head, rest) = self
            .buf
            .split_at_checked(N)
            .ok_or_else(|| GeometryError::Wkb("truncated buffer".to_owned()))?;
        self.buf = rest;
        let mut arr = [0_u8; N];
        arr.copy_from_slice(head);
        Ok(arr)
    }

    fn read_u32(&mut self, little_endian: bool) -> Result<u32, GeometryError> {
        let raw = self.take::<4>()?;
        Ok(if little_endian {
            u32::from_le_bytes(raw)
        } else {
            u32::from_be_bytes(raw)
        })
    }

    fn read_f64(&mut self, little_endian: bool) -> Result<f64, GeometryError> {
        let raw = self.take::<8>()?;
        Ok(if little_endian {
            f64::from_le_bytes(raw)
        } else {
            f64::from_be_bytes(raw)
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    /// Build an EWKB point by hand: LE marker, type word with SRID flag,
    /// SRID 4326, then the coordinates.
    fn ewkb_point(x: f64, y: f64) -> Vec<u8> {
        let mut out = vec![1];
        out.extend_from_slice(&(WKB_POINT | EWKB_SRID_FLAG).to_le_bytes());
        out.extend_from_slice(&4326_u32.to_le_bytes());
        out.extend_from_slice(&x.to_le_bytes());
        out.extend_from_slice(&y.to_le_bytes());
        out
    }

    #[test]
    fn encode_decode_round_trip() {
        let point = Point::new(-0.11944, 51.50339);
        let decoded = decode(&encode(point)).unwrap();
        assert_eq!(decoded.x(), point.x());
        assert_eq!(decoded.y(), point.y());
    }

    #[test]
    fn decodes_ewkb_with_srid() {
        let decoded = decode(&ewkb_point(13.4, 52.52)).unwrap();
        assert_eq!(decoded.x(), 13.4);
        assert_eq!(decoded.y(), 52.52);
    }

    #[test]
    fn decodes_big_endian() {
        let mut bytes = vec![0];
        bytes.extend_from_slice(&WKB_POINT.to_be_bytes());
        bytes.extend_from_slice(&1.25_f64.to_be_bytes());
        bytes.extend_from_slice(&(-3.5_f64).to_be_bytes());
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.x(), 1.25);
        assert_eq!(decoded.y(), -3.5);
    }

    #[test]
    fn rejects_truncated_buffer() {
        let full = encode(Point::new(1.0, 2.0));
        let truncated = full.get(..full.len() - 1).unwrap();
        assert!(decode(truncated).is_err());
        assert!(decode(&[]).is_err());
        assert!(decode(&[1]).is_err());
    }

    #[test]
    fn rejects_unknown_byte_order() {
        assert!(decode(&[7, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn rejects_non_point_type() {
        let mut bytes = vec![1];
        bytes.extend_from_slice(&2_u32.to_le_bytes()); // LINESTRING
        bytes.extend_from_slice(&0.0_f64.to_le_bytes());
        bytes.extend_from_slice(&0.0_f64.to_le_bytes());
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn rejects_z_dimension() {
        let mut bytes = vec![1];
        bytes.extend_from_slice(&(WKB_POINT | EWKB_Z_FLAG).to_le_bytes());
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn rejects_nan_coordinates() {
        assert!(decode(&encode(Point::new(f64::NAN, f64::NAN))).is_err());
    }
}
