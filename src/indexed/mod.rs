//! Geometries associated with a spatial index for efficient repeated queries.

pub mod prepared;
mod segment_index;

pub use prepared::PreparedGeometry;
pub use segment_index::SegmentIndex;
