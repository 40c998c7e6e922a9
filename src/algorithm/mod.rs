//! Planar algorithms over [`Geometry`](crate::geometry::Geometry) values.

pub mod measure;
pub mod native;
pub mod overlay;
pub mod relate;
pub mod validation;
