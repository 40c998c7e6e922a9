use crate::error::{GeoKernelError, Result};
use crate::geometry::{Dimension, Geometry};

/// A heterogeneous collection of geometries.
///
/// Members may themselves be empty. The collection is empty when every member is.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    geoms: Vec<Geometry>,
    dim: Dimension,
}

impl GeometryCollection {
    pub fn try_new(geoms: Vec<Geometry>) -> Result<Self> {
        let dim = geoms
            .first()
            .map(Geometry::dimension)
            .unwrap_or_default();
        Self::try_new_with_dim(geoms, dim)
    }

    /// Members lose their SRID; only the top-level value carries one.
    pub fn try_new_with_dim(geoms: Vec<Geometry>, dim: Dimension) -> Result<Self> {
        if let Some(idx) = geoms.iter().position(|g| g.dimension() != dim) {
            return Err(GeoKernelError::Construction(format!(
                "GeometryCollection member {idx} has dimension {} but the collection is {dim}",
                geoms[idx].dimension()
            )));
        }
        let geoms = geoms.into_iter().map(Geometry::without_srid).collect();
        Ok(Self { geoms, dim })
    }

    pub fn empty(dim: Dimension) -> Self {
        Self { geoms: vec![], dim }
    }

    pub fn geoms(&self) -> &[Geometry] {
        &self.geoms
    }

    pub fn into_geoms(self) -> Vec<Geometry> {
        self.geoms
    }

    pub fn len(&self) -> usize {
        self.geoms.len()
    }

    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.geoms.iter().all(Geometry::is_empty)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{LineString, Point};

    #[test]
    fn all_empty_members_is_empty() {
        let gc = GeometryCollection::try_new(vec![
            Point::empty(Dimension::XY).into(),
            LineString::empty(Dimension::XY).into(),
        ])
        .unwrap();
        assert_eq!(gc.len(), 2);
        assert!(gc.is_empty());

        let gc = GeometryCollection::try_new(vec![
            Point::empty(Dimension::XY).into(),
            Point::new(1., 2.).into(),
        ])
        .unwrap();
        assert!(!gc.is_empty());
    }

    #[test]
    fn member_srid_dropped() {
        let member = Geometry::from(Point::new(1., 2.)).with_srid(4326);
        let gc = GeometryCollection::try_new(vec![member]).unwrap();
        assert_eq!(gc.geoms()[0].srid(), None);
    }
}
