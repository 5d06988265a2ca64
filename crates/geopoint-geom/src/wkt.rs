//! Well-Known Text parsing and canonical formatting for points.
//!
//! Parsing is tolerant of the two common spellings (`POINT(x y)` and
//! `POINT (x y)`), a case-insensitive tag, and surrounding whitespace.
//! Formatting always produces the canonical space-before-parenthesis form
//! `POINT (x y)`; API consumers compare WKT byte-for-byte, so the output
//! must be stable.

use geo::Point;

use crate::error::GeometryError;

/// Length of the `POINT` tag.
const TAG_LEN: usize = 5;

/// Parse a WKT point such as `POINT(-0.11944 51.50339)`.
///
/// Only two-dimensional single points are accepted. `POINT EMPTY`, Z/M
/// dimensions, other geometry kinds, and trailing garbage are all
/// rejected. The SRID is implicit (WGS84); no SRID prefix is accepted.
///
/// # Errors
///
/// Returns [`GeometryError::Wkt`] if the text is not a valid point.
pub fn parse(text: &str) -> Result<Point<f64>, GeometryError> {
    let trimmed = text.trim();
    let rest = strip_point_tag(trimmed)
        .ok_or_else(|| GeometryError::Wkt(format!("expected POINT geometry, got {trimmed:?}")))?;

    let inner = rest
        .trim_start()
        .strip_prefix('(')
        .and_then(|r| r.trim_end().strip_suffix(')'))
        .ok_or_else(|| {
            GeometryError::Wkt(format!("expected parenthesized coordinates, got {rest:?}"))
        })?;

    let mut coords = inner.split_whitespace();
    let x = parse_coordinate(coords.next(), inner)?;
    let y = parse_coordinate(coords.next(), inner)?;
    if coords.next().is_some() {
        return Err(GeometryError::Wkt(format!(
            "expected exactly two coordinates, got {inner:?}"
        )));
    }

    Ok(Point::new(x, y))
}

/// Format a point in canonical WKT: `POINT (x y)`.
///
/// Coordinates use the shortest representation that round-trips the `f64`
/// exactly, so `parse` followed by `format` is byte-stable.
pub fn format(point: Point<f64>) -> String {
    format!("POINT ({} {})", point.x(), point.y())
}

/// Strip a case-insensitive `POINT` tag, returning the remainder.
fn strip_point_tag(text: &str) -> Option<&str> {
    let (tag, rest) = text.split_at_checked(TAG_LEN)?;
    tag.eq_ignore_ascii_case("POINT").then_some(rest)
}

/// Parse one coordinate token, rejecting non-finite values.
fn parse_coordinate(token: Option<&str>, inner: &str) -> Result<f64, GeometryError> {
    let token = token.ok_or_else(|| {
        GeometryError::Wkt(format!("expected two coordinates, got {inner:?}"))
    })?;
    let coord: f64 = token
        .parse()
        .map_err(|_| GeometryError::Wkt(format!("invalid coordinate {token:?}")))?;
    if !coord.is_finite() {
        return Err(GeometryError::Wkt(format!(
            "non-finite coordinate {token:?}"
        )));
    }
    Ok(coord)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parses_compact_form() {
        let point = parse("POINT(-0.11944 51.50339)").unwrap();
        assert_eq!(point.x(), -0.11944);
        assert_eq!(point.y(), 51.50339);
    }

    #[test]
    fn parses_spaced_form_and_whitespace() {
        let point = parse("  point ( 1.5   -2.25 )  ").unwrap();
        assert_eq!(point.x(), 1.5);
        assert_eq!(point.y(), -2.25);
    }

    #[test]
    fn formats_canonical_form() {
        let point = Point::new(-0.11944, 51.50339);
        assert_eq!(format(point), "POINT (-0.11944 51.50339)");
    }

    #[test]
    fn format_trims_integral_coordinates() {
        assert_eq!(format(Point::new(1.0, 0.0)), "POINT (1 0)");
    }

    #[test]
    fn round_trip_is_byte_stable() {
        let text = "POINT (-0.11944 51.50339)";
        let reparsed = parse(&format(parse(text).unwrap())).unwrap();
        assert!((reparsed.x() - -0.11944).abs() < 1e-9);
        assert!((reparsed.y() - 51.50339).abs() < 1e-9);
        assert_eq!(format(reparsed), text);
    }

    #[test]
    fn rejects_non_point_text() {
        assert!(parse("NOT A POINT").is_err());
        assert!(parse("LINESTRING(0 0, 1 1)").is_err());
        assert!(parse("MULTIPOINT((0 0))").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn rejects_point_empty() {
        assert!(parse("POINT EMPTY").is_err());
    }

    #[test]
    fn rejects_extra_dimensions() {
        assert!(parse("POINT Z (1 2 3)").is_err());
        assert!(parse("POINT(1 2 3)").is_err());
    }

    #[test]
    fn rejects_trailing_garbage_and_bad_numbers() {
        assert!(parse("POINT(1 2)x").is_err());
        assert!(parse("POINT(1)").is_err());
        assert!(parse("POINT(a b)").is_err());
        assert!(parse("POINT(inf 0)").is_err());
        assert!(parse("POINT(NaN 0)").is_err());
    }
}
