use crate::error::{GeoKernelError, Result};
use crate::geometry::{Coord, Dimension, LinearRing};

/// An exterior ring with zero or more interior rings (holes).
///
/// An empty polygon holds no rings at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<LinearRing>,
    dim: Dimension,
}

impl Polygon {
    pub fn try_new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Result<Self> {
        let dim = exterior.dimension();
        if exterior.is_empty() {
            if interiors.iter().any(|ring| !ring.is_empty()) {
                return Err(GeoKernelError::Construction(
                    "Polygon with an empty exterior ring cannot have interior rings".to_string(),
                ));
            }
            return Ok(Self::empty(dim));
        }
        if let Some(idx) = interiors.iter().position(LinearRing::is_empty) {
            return Err(GeoKernelError::Construction(format!("Interior ring {idx} is empty")));
        }
        if let Some(idx) = interiors.iter().position(|ring| ring.dimension() != dim) {
            return Err(GeoKernelError::Construction(format!(
                "Interior ring {idx} has dimension {} but the exterior is {dim}",
                interiors[idx].dimension()
            )));
        }

        let mut rings = Vec::with_capacity(interiors.len() + 1);
        rings.push(exterior);
        rings.extend(interiors);
        Ok(Self { rings, dim })
    }

    /// Build a polygon from raw coordinate lists, closing any open ring.
    pub fn from_coords(exterior: Vec<Coord>, interiors: Vec<Vec<Coord>>) -> Result<Self> {
        let exterior = LinearRing::closing(exterior)?;
        let interiors = interiors
            .into_iter()
            .map(LinearRing::closing)
            .collect::<Result<Vec<_>>>()?;
        Self::try_new(exterior, interiors)
    }

    pub fn empty(dim: Dimension) -> Self {
        Self { rings: vec![], dim }
    }

    pub fn exterior(&self) -> Option<&LinearRing> {
        self.rings.first()
    }

    pub fn interiors(&self) -> &[LinearRing] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// The exterior ring followed by the interior rings.
    pub fn rings(&self) -> &[LinearRing] {
        &self.rings
    }

    pub fn num_interiors(&self) -> usize {
        self.interiors().len()
    }

    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Planar area with holes subtracted.
    pub fn area(&self) -> f64 {
        let shell = self.exterior().map_or(0.0, |ring| ring.signed_area().abs());
        let holes: f64 = self
            .interiors()
            .iter()
            .map(|ring| ring.signed_area().abs())
            .sum();
        shell - holes
    }

    /// Total length of all rings.
    pub fn perimeter(&self) -> f64 {
        self.rings.iter().map(LinearRing::length).sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::polygon::{square, square_with_hole};

    #[test]
    fn area_subtracts_holes() {
        assert_eq!(square().area(), 1.0);
        assert_eq!(square_with_hole().area(), 1.0 - 0.0625);
        assert_eq!(square_with_hole().num_interiors(), 1);
    }

    #[test]
    fn empty_exterior_with_hole_rejected() {
        let hole = LinearRing::closing(vec![
            Coord::new(0.25, 0.25),
            Coord::new(0.25, 0.5),
            Coord::new(0.5, 0.5),
        ])
        .unwrap();
        let err = Polygon::try_new(LinearRing::empty(Dimension::XY), vec![hole]);
        assert!(matches!(err, Err(GeoKernelError::Construction(_))));
    }

    #[test]
    fn empty_hole_rejected() {
        let exterior = square().exterior().unwrap().clone();
        let err = Polygon::try_new(exterior, vec![LinearRing::empty(Dimension::XY)]);
        assert!(matches!(err, Err(GeoKernelError::Construction(_))));
    }

    #[test]
    fn empty_polygon_has_no_rings() {
        let polygon = Polygon::from_coords(vec![], vec![]).unwrap();
        assert!(polygon.is_empty());
        assert!(polygon.exterior().is_none());
        assert!(polygon.interiors().is_empty());
    }
}
