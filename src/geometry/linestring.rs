use crate::error::{GeoKernelError, Result};
use crate::geometry::coord::{check_coords_dim, infer_dim};
use crate::geometry::{Coord, Dimension};

/// An ordered sequence of two or more coordinates, or nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    coords: Vec<Coord>,
    dim: Dimension,
}

impl LineString {
    /// Create a new LineString, inferring the dimension from the first coordinate.
    pub fn try_new(coords: Vec<Coord>) -> Result<Self> {
        let dim = infer_dim(&coords);
        Self::try_new_with_dim(coords, dim)
    }

    pub fn try_new_with_dim(coords: Vec<Coord>, dim: Dimension) -> Result<Self> {
        check_coords_dim(&coords, dim)?;
        if coords.len() == 1 {
            return Err(GeoKernelError::Construction(
                "LineString must have at least 2 coordinates".to_string(),
            ));
        }
        Ok(Self { coords, dim })
    }

    pub fn empty(dim: Dimension) -> Self {
        Self {
            coords: vec![],
            dim,
        }
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn into_coords(self) -> Vec<Coord> {
        self.coords
    }

    pub fn num_coords(&self) -> usize {
        self.coords.len()
    }

    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Whether the first and last coordinates coincide in the plane.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => false,
        }
    }

    pub fn start(&self) -> Option<Coord> {
        self.coords.first().copied()
    }

    pub fn end(&self) -> Option<Coord> {
        self.coords.last().copied()
    }

    /// Consecutive coordinate pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.coords.windows(2).map(|w| (w[0], w[1]))
    }

    /// Planar length.
    pub fn length(&self) -> f64 {
        self.segments()
            .map(|(a, b)| (b.x - a.x).hypot(b.y - a.y))
            .sum()
    }
}

/// A closed LineString used as a polygon boundary.
///
/// Non-empty rings hold at least four coordinates and their first coordinate equals the last.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing(LineString);

impl LinearRing {
    pub fn try_new(coords: Vec<Coord>) -> Result<Self> {
        let dim = infer_dim(&coords);
        Self::try_new_with_dim(coords, dim)
    }

    pub fn try_new_with_dim(coords: Vec<Coord>, dim: Dimension) -> Result<Self> {
        let line = LineString::try_new_with_dim(coords, dim)?;
        if line.is_empty() {
            return Ok(Self(line));
        }
        if !line.is_closed() {
            return Err(GeoKernelError::Construction(
                "Points of LinearRing do not form a closed linestring".to_string(),
            ));
        }
        if line.num_coords() < 4 {
            return Err(GeoKernelError::Construction(format!(
                "Invalid number of points in LinearRing found {} - must be 0 or >= 4",
                line.num_coords()
            )));
        }
        Ok(Self(line))
    }

    /// Create a ring from a possibly open coordinate list, appending the first coordinate when
    /// the list does not already close.
    pub fn closing(mut coords: Vec<Coord>) -> Result<Self> {
        if let (Some(first), Some(last)) = (coords.first().copied(), coords.last()) {
            if !first.equals_2d(last) {
                coords.push(first);
            }
        }
        Self::try_new(coords)
    }

    pub fn empty(dim: Dimension) -> Self {
        Self(LineString::empty(dim))
    }

    pub fn coords(&self) -> &[Coord] {
        self.0.coords()
    }

    pub fn num_coords(&self) -> usize {
        self.0.num_coords()
    }

    pub fn dimension(&self) -> Dimension {
        self.0.dimension()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.0.segments()
    }

    pub fn length(&self) -> f64 {
        self.0.length()
    }

    /// Shoelace area, positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        let twice: f64 = self.segments().map(|(a, b)| a.x * b.y - b.x * a.y).sum();
        twice / 2.0
    }

    pub fn as_line_string(&self) -> &LineString {
        &self.0
    }

    pub fn into_line_string(self) -> LineString {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn coords(raw: &[(f64, f64)]) -> Vec<Coord> {
        raw.iter().copied().map(Coord::from).collect()
    }

    #[test]
    fn single_coordinate_line_rejected() {
        assert!(LineString::try_new(coords(&[(0., 0.)])).is_err());
        assert!(LineString::try_new(vec![]).unwrap().is_empty());
    }

    #[test]
    fn open_ring_rejected() {
        let err = LinearRing::try_new(coords(&[(0., 0.), (1., 0.), (1., 1.), (0., 1.)]));
        assert!(matches!(err, Err(GeoKernelError::Construction(_))));
    }

    #[test]
    fn short_ring_rejected() {
        let err = LinearRing::try_new(coords(&[(0., 0.), (1., 0.), (0., 0.)]));
        assert!(matches!(err, Err(GeoKernelError::Construction(_))));
    }

    #[test]
    fn closing_appends_first_coord() {
        let ring = LinearRing::closing(coords(&[(0., 0.), (1., 0.), (1., 1.)])).unwrap();
        assert_eq!(ring.num_coords(), 4);
        assert_eq!(ring.coords()[3], Coord::new(0., 0.));
        assert_eq!(ring.signed_area(), 0.5);
    }
}
