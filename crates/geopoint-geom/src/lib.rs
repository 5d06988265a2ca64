//! Geometry codec for the Geopoint service.
//!
//! The service exchanges geometry with API callers as Well-Known Text
//! (`POINT (lon lat)`) and with the database backends as binary: plain WKB
//! from the embedded `SpatiaLite` backend, extended WKB (EWKB, with an
//! embedded SRID) from `PostGIS`. This crate is the single place where
//! those representations meet. It has no I/O and no knowledge of which
//! backend is active.
//!
//! # Modules
//!
//! - [`wkt`] -- parse and canonically format WKT point text
//! - [`wkb`] -- decode WKB/EWKB point bytes, encode plain WKB
//! - [`value`] -- [`BackendGeometry`], the tagged wire-shape variant
//! - [`error`] -- shared error type

pub mod error;
pub mod value;
pub mod wkb;
pub mod wkt;

pub use error::GeometryError;
pub use value::BackendGeometry;
