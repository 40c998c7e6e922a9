//! DE-9IM relate and the named spatial predicates built on it.

use geo::Relate;

use crate::algorithm::native::components::Components;
use crate::algorithm::native::Location;
use crate::algorithm::validation::require_valid;
use crate::error::Result;
use crate::geometry::{Coord, Geometry};
use crate::io::geo::geometry_to_geo;

pub use matrix::{Dimensions, IntersectionMatrix};
pub use predicates::{
    contains, covered_by, covers, crosses, disjoint, equals, intersects, overlaps, relate_pattern,
    touches, within,
};

mod matrix;
pub(crate) mod predicates;
pub(crate) mod puntal;

/// Compute the DE-9IM matrix of `a` against `b`.
///
/// Empty and puntal operands are evaluated by point location. Every other pair is delegated to
/// [`geo::Relate`] and requires both operands to be valid.
pub fn relate(a: &Geometry, b: &Geometry) -> Result<IntersectionMatrix> {
    if a.is_empty() || b.is_empty() {
        return Ok(empty_operand_matrix(a, b));
    }
    if a.geom_type().is_puntal() {
        return Ok(puntal::relate_points(&puntal_coords(a), b, b));
    }
    if b.geom_type().is_puntal() {
        return Ok(puntal::relate_points(&puntal_coords(b), a, a).transpose());
    }
    require_valid(a)?;
    require_valid(b)?;
    let matrix = geometry_to_geo(a).relate(&geometry_to_geo(b));
    Ok((&matrix).into())
}

pub(crate) fn puntal_coords(geom: &Geometry) -> Vec<Coord> {
    Components::new(geom).points
}

/// Dimension of the topological boundary.
pub(crate) fn boundary_dimension(geom: &Geometry) -> Dimensions {
    let parts = Components::new(geom);
    if !parts.polygons.is_empty() {
        Dimensions::OneDimensional
    } else if !puntal::line_boundary_points(&parts).is_empty() {
        Dimensions::ZeroDimensional
    } else {
        Dimensions::Empty
    }
}

fn empty_operand_matrix(a: &Geometry, b: &Geometry) -> IntersectionMatrix {
    let mut matrix = IntersectionMatrix::empty();
    matrix.set(
        Location::Exterior,
        Location::Exterior,
        Dimensions::TwoDimensional,
    );
    matrix.set(
        Location::Interior,
        Location::Exterior,
        a.topology_dimension(),
    );
    matrix.set(Location::Boundary, Location::Exterior, boundary_dimension(a));
    matrix.set(
        Location::Exterior,
        Location::Interior,
        b.topology_dimension(),
    );
    matrix.set(Location::Exterior, Location::Boundary, boundary_dimension(b));
    matrix
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeoKernelError;
    use crate::geometry::{Dimension, LineString, Point};
    use crate::test::coords;
    use crate::test::polygon::{bowtie, quad, square, square_with_hole};

    #[test]
    fn polygon_polygon_through_geo() {
        let a: Geometry = square().into();
        let b: Geometry = square_with_hole().into();
        let m = relate(&a, &b).unwrap();
        assert_eq!(m.to_string(), "212F11FF2");
        assert!(m.is_covers());
    }

    #[test]
    fn line_polygon_through_geo() {
        let line: Geometry = LineString::try_new(coords(&[(0.5, 0.5), (2., 0.5)]))
            .unwrap()
            .into();
        let polygon: Geometry = square().into();
        let m = relate(&line, &polygon).unwrap();
        assert_eq!(m.to_string(), "1010F0212");
        assert!(m.is_intersects());
        assert!(m.is_crosses(line.topology_dimension(), polygon.topology_dimension()));
    }

    #[test]
    fn point_polygon_is_native() {
        let point: Geometry = Point::new(0.5, 0.5).into();
        let polygon: Geometry = bowtie().into();
        // Puntal operands do not need a valid counterpart.
        assert!(relate(&point, &polygon).is_ok());
        assert!(relate(&polygon, &point).is_ok());
    }

    #[test]
    fn invalid_operand_is_topological_error() {
        let err = relate(&bowtie().into(), &quad().into()).unwrap_err();
        assert!(matches!(err, GeoKernelError::Topological(_)));
    }

    #[test]
    fn empty_operand() {
        let empty: Geometry = LineString::empty(Dimension::XY).into();
        let polygon: Geometry = square().into();
        assert_eq!(relate(&empty, &polygon).unwrap().to_string(), "FFFFFF212");
        assert_eq!(relate(&polygon, &empty).unwrap().to_string(), "FF2FF1FF2");
        assert_eq!(relate(&empty, &empty).unwrap().to_string(), "FFFFFFFF2");
    }
}
