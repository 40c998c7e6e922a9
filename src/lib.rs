//! A planar geometry kernel: an immutable geometry model, WKB/WKT/GeoJSON codecs, DE-9IM
//! predicates, measurement and overlay, prepared geometries with a handle-based context, and
//! point predicates vectorized over Arrow arrays.
//!
//! ```
//! use geokernel::io::wkt::from_wkt;
//! use geokernel::PreparedGeometry;
//!
//! let polygon = from_wkt("POLYGON ((0 0, 4 0, 4 4, 0 4, 0 0))").unwrap();
//! let point = from_wkt("POINT (1 1)").unwrap();
//! assert!(geokernel::algorithm::relate::contains(&polygon, &point).unwrap());
//!
//! let prepared = PreparedGeometry::new(polygon);
//! assert!(prepared.contains(&point).unwrap());
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use context::{GeometryContext, GeometryHandle};
pub use error::{GeoKernelError, Result};
pub use geometry::{Geometry, GeometryKind};
pub use indexed::PreparedGeometry;

pub mod algorithm;
pub mod context;
pub mod error;
pub mod geometry;
pub mod indexed;
pub mod io;
#[cfg(test)]
pub(crate) mod test;
pub mod vectorized;
