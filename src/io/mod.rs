//! Readers and writers for the interchange formats of [`Geometry`](crate::geometry::Geometry):
//! WKB, WKT, GeoJSON and the [`geo`] crate's types.

pub mod geo;
pub mod geojson;
pub mod wkb;
pub mod wkt;
