use crate::geometry::{Coord, Dimension};

/// A single position, possibly empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coord: Option<Coord>,
    dim: Dimension,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self::from_coord(Coord::new(x, y))
    }

    pub fn new_z(x: f64, y: f64, z: f64) -> Self {
        Self::from_coord(Coord::new_z(x, y, z))
    }

    pub fn from_coord(coord: Coord) -> Self {
        Self {
            dim: coord.dimension(),
            coord: Some(coord),
        }
    }

    pub fn empty(dim: Dimension) -> Self {
        Self { coord: None, dim }
    }

    pub fn coord(&self) -> Option<Coord> {
        self.coord
    }

    /// Zero or one coordinates.
    pub fn coord_slice(&self) -> &[Coord] {
        self.coord.as_slice()
    }

    pub fn x(&self) -> Option<f64> {
        self.coord.map(|c| c.x)
    }

    pub fn y(&self) -> Option<f64> {
        self.coord.map(|c| c.y)
    }

    pub fn z(&self) -> Option<f64> {
        self.coord.and_then(|c| c.z)
    }

    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.coord.is_none()
    }
}

impl From<Coord> for Point {
    fn from(value: Coord) -> Self {
        Self::from_coord(value)
    }
}
