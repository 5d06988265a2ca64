//! Error type for the geometry codec.

/// Errors produced while converting geometry between representations.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// The input text could not be parsed as a single WKT point.
    #[error("invalid WKT point: {0}")]
    Wkt(String),

    /// The binary input could not be decoded as a single WKB point.
    #[error("invalid WKB point: {0}")]
    Wkb(String),
}
