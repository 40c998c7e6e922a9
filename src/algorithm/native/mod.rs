//! Algorithms implemented directly on the geometry model, without conversion to `geo`.

pub mod bounding_rect;
pub(crate) mod components;
pub mod locate;
pub(crate) mod segment;

pub use bounding_rect::BoundingRect;
pub use locate::{locate_point, Location, PointLocator};
