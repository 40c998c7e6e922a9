use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{GeoKernelError, Result};

/// The coordinate dimension of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dimension {
    /// Two-dimensional.
    #[default]
    XY,

    /// Three-dimensional.
    XYZ,
}

impl Dimension {
    /// Returns the number of ordinates per coordinate.
    pub fn size(&self) -> usize {
        match self {
            Dimension::XY => 2,
            Dimension::XYZ => 3,
        }
    }

    /// Build a dimension from an ordinate count.
    pub fn from_size(size: usize) -> Result<Self> {
        match size {
            2 => Ok(Dimension::XY),
            3 => Ok(Dimension::XYZ),
            _ => Err(GeoKernelError::Construction(format!(
                "Unsupported coordinate dimension {size}"
            ))),
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::XY => write!(f, "XY"),
            Dimension::XYZ => write!(f, "XYZ"),
        }
    }
}

/// A single coordinate tuple, with an optional z ordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coord {
    /// A 2D coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// A 3D coordinate.
    pub fn new_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    pub fn dimension(&self) -> Dimension {
        match self.z {
            Some(_) => Dimension::XYZ,
            None => Dimension::XY,
        }
    }

    /// The planar part of this coordinate.
    #[inline]
    pub fn xy(&self) -> geo::Coord<f64> {
        geo::Coord {
            x: self.x,
            y: self.y,
        }
    }

    /// Drop the z ordinate when the requested dimension is 2D.
    pub fn force_dim(self, dim: Dimension) -> Self {
        match dim {
            Dimension::XY => Self::new(self.x, self.y),
            Dimension::XYZ => self,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.map_or(true, f64::is_finite)
    }

    /// All ordinates NaN, the binary encoding of an empty point.
    pub(crate) fn is_all_nan(&self) -> bool {
        self.x.is_nan() && self.y.is_nan() && self.z.map_or(true, f64::is_nan)
    }

    /// Planar equality, ignoring z.
    #[inline]
    pub fn equals_2d(&self, other: &Coord) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64, f64)> for Coord {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new_z(x, y, z)
    }
}

impl From<[f64; 2]> for Coord {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 3]> for Coord {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new_z(x, y, z)
    }
}

impl From<geo::Coord<f64>> for Coord {
    fn from(value: geo::Coord<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

/// Check that every coordinate agrees with `dim`.
pub(crate) fn check_coords_dim(coords: &[Coord], dim: Dimension) -> Result<()> {
    match coords.iter().position(|c| c.dimension() != dim) {
        Some(idx) => Err(GeoKernelError::Construction(format!(
            "Coordinate {idx} has dimension {} but the geometry is {dim}",
            coords[idx].dimension()
        ))),
        None => Ok(()),
    }
}

/// The dimension implied by a coordinate sequence, XY when empty.
pub(crate) fn infer_dim(coords: &[Coord]) -> Dimension {
    coords
        .first()
        .map(Coord::dimension)
        .unwrap_or(Dimension::XY)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mixed_dimensions_rejected() {
        let coords = vec![Coord::new(0., 0.), Coord::new_z(1., 1., 1.)];
        let err = check_coords_dim(&coords, infer_dim(&coords)).unwrap_err();
        assert!(matches!(err, GeoKernelError::Construction(_)));
    }

    #[test]
    fn force_dim_drops_z() {
        let c = Coord::new_z(1., 2., 3.);
        assert_eq!(c.force_dim(Dimension::XY), Coord::new(1., 2.));
        assert_eq!(c.force_dim(Dimension::XYZ), c);
    }
}
