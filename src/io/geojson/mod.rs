//! Conversion between [`Geometry`](crate::geometry::Geometry) and
//! [GeoJSON](https://geojson.org/) geometry objects.
//!
//! GeoJSON carries no SRID, so one is dropped on write and never set on read.

pub use reader::{from_geojson, from_geojson_str, from_geojson_value};
pub use writer::{to_geojson, to_geojson_string, to_geojson_value};

mod reader;
mod writer;
