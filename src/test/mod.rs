pub(crate) mod multipoint;
pub(crate) mod point;
pub(crate) mod polygon;

use crate::geometry::Coord;

pub(crate) fn coords(raw: &[(f64, f64)]) -> Vec<Coord> {
    raw.iter().copied().map(Coord::from).collect()
}
