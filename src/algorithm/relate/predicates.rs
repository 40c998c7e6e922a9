use crate::algorithm::native::components::Components;
use crate::algorithm::native::PointLocator;
use crate::algorithm::relate::{relate, IntersectionMatrix};
use crate::error::Result;
use crate::geometry::Geometry;
use crate::indexed::SegmentIndex;

/// Whether `a` and `b` share at least one point.
///
/// Evaluated without building a matrix: envelope test, edge crossings through a segment index,
/// then location of one coordinate per component. Invalid operands are accepted.
pub fn intersects(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(intersects_native(a, b))
}

pub fn disjoint(a: &Geometry, b: &Geometry) -> Result<bool> {
    Ok(!intersects_native(a, b))
}

pub(crate) fn intersects_native(a: &Geometry, b: &Geometry) -> bool {
    let (Some(rect_a), Some(rect_b)) = (a.bounding_rect(), b.bounding_rect()) else {
        return false;
    };
    if !rect_a.intersects(&rect_b) {
        return false;
    }

    let parts_a = Components::new(a);
    let parts_b = Components::new(b);
    let segments_a = parts_a.segments();
    let segments_b = parts_b.segments();
    if !segments_a.is_empty() && !segments_b.is_empty() {
        let index = SegmentIndex::new(segments_b);
        if segments_a
            .iter()
            .any(|(p, q)| index.intersects_segment(p, q))
        {
            return true;
        }
    }

    parts_a
        .representative_coords()
        .iter()
        .any(|c| b.intersects_coord(c))
        || parts_b
            .representative_coords()
            .iter()
            .any(|c| a.intersects_coord(c))
}

fn relate_boolean(
    a: &Geometry,
    b: &Geometry,
    relate_cb: impl Fn(IntersectionMatrix) -> bool,
) -> Result<bool> {
    Ok(relate_cb(relate(a, b)?))
}

pub fn contains(a: &Geometry, b: &Geometry) -> Result<bool> {
    relate_boolean(a, b, |m| m.is_contains())
}

pub fn within(a: &Geometry, b: &Geometry) -> Result<bool> {
    relate_boolean(a, b, |m| m.is_within())
}

pub fn covers(a: &Geometry, b: &Geometry) -> Result<bool> {
    relate_boolean(a, b, |m| m.is_covers())
}

pub fn covered_by(a: &Geometry, b: &Geometry) -> Result<bool> {
    relate_boolean(a, b, |m| m.is_covered_by())
}

pub fn touches(a: &Geometry, b: &Geometry) -> Result<bool> {
    relate_boolean(a, b, |m| m.is_touches())
}

pub fn crosses(a: &Geometry, b: &Geometry) -> Result<bool> {
    let (dim_a, dim_b) = (a.topology_dimension(), b.topology_dimension());
    relate_boolean(a, b, |m| m.is_crosses(dim_a, dim_b))
}

pub fn overlaps(a: &Geometry, b: &Geometry) -> Result<bool> {
    let (dim_a, dim_b) = (a.topology_dimension(), b.topology_dimension());
    relate_boolean(a, b, |m| m.is_overlaps(dim_a, dim_b))
}

/// Topological equality. Two empty geometries are equal.
pub fn equals(a: &Geometry, b: &Geometry) -> Result<bool> {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ok(true),
        (true, false) | (false, true) => Ok(false),
        (false, false) => relate_boolean(a, b, |m| m.is_equals()),
    }
}

/// Test the DE-9IM matrix of `a` and `b` against a pattern such as `"T*F**F***"`.
pub fn relate_pattern(a: &Geometry, b: &Geometry, pattern: &str) -> Result<bool> {
    relate(a, b)?.matches(pattern)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeoKernelError;
    use crate::geometry::{Dimension, LineString, MultiPoint, Point, Polygon};
    use crate::test::coords;
    use crate::test::linestring::{ls0, zigzag};
    use crate::test::polygon::{bowtie, quad, square, square_with_hole, two_squares};

    fn pt(x: f64, y: f64) -> Geometry {
        Point::new(x, y).into()
    }

    #[test]
    fn invalid_polygon_still_intersects() {
        let invalid: Geometry = bowtie().into();
        let other: Geometry = quad().into();
        assert!(intersects(&invalid, &other).unwrap());
        assert!(!disjoint(&invalid, &other).unwrap());
        assert!(matches!(
            contains(&invalid, &other),
            Err(GeoKernelError::Topological(_))
        ));
    }

    #[test]
    fn point_predicates_on_polygon() {
        let polygon: Geometry = square_with_hole().into();
        assert!(contains(&polygon, &pt(0.1, 0.1)).unwrap());
        assert!(!contains(&polygon, &pt(0.3, 0.3)).unwrap());
        assert!(!contains(&polygon, &pt(1., 0.5)).unwrap());
        assert!(touches(&polygon, &pt(1., 0.5)).unwrap());
        assert!(covers(&polygon, &pt(1., 0.5)).unwrap());
        assert!(within(&pt(0.1, 0.1), &polygon).unwrap());
        assert!(covered_by(&pt(0., 0.), &polygon).unwrap());
        assert!(intersects(&polygon, &pt(0.25, 0.3)).unwrap());
        assert!(!intersects(&polygon, &pt(0.3, 0.3)).unwrap());
    }

    #[test]
    fn polygon_inside_hole_is_disjoint() {
        let inner: Geometry = Polygon::from_coords(
            coords(&[(0.3, 0.3), (0.4, 0.3), (0.4, 0.4), (0.3, 0.4)]),
            vec![],
        )
        .unwrap()
        .into();
        let outer: Geometry = square_with_hole().into();
        assert!(disjoint(&inner, &outer).unwrap());
        assert!(intersects(&inner, &square().into()).unwrap());
    }

    #[test]
    fn lines_cross_and_touch() {
        let a: Geometry = zigzag().into();
        let b: Geometry = LineString::try_new(coords(&[(0., 1.), (1., 0.)]))
            .unwrap()
            .into();
        assert!(crosses(&a, &b).unwrap());
        assert!(!touches(&a, &b).unwrap());

        let c: Geometry = LineString::try_new(coords(&[(3., 1.), (4., 4.)]))
            .unwrap()
            .into();
        assert!(touches(&a, &c).unwrap());
        assert!(!crosses(&a, &c).unwrap());
    }

    #[test]
    fn overlapping_polygons() {
        let a: Geometry = square().into();
        let b: Geometry = Polygon::from_coords(
            coords(&[(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]),
            vec![],
        )
        .unwrap()
        .into();
        assert!(overlaps(&a, &b).unwrap());
        assert!(!contains(&a, &b).unwrap());
        assert!(relate_pattern(&a, &b, "212101212").unwrap());
    }

    #[test]
    fn equality() {
        let a: Geometry = square().into();
        let shifted: Geometry = Polygon::from_coords(
            coords(&[(1., 0.), (1., 1.), (0., 1.), (0., 0.)]),
            vec![],
        )
        .unwrap()
        .into();
        assert!(equals(&a, &shifted).unwrap());
        assert!(!equals(&a, &two_squares().into()).unwrap());

        let e1: Geometry = Point::empty(Dimension::XY).into();
        let e2: Geometry = Polygon::empty(Dimension::XY).into();
        assert!(equals(&e1, &e2).unwrap());
        assert!(!equals(&e1, &a).unwrap());
    }

    #[test]
    fn multipoint_against_line() {
        let mp: Geometry = MultiPoint::try_new(vec![Point::new(1., 0.), Point::new(5., 5.)])
            .unwrap()
            .into();
        let line: Geometry = ls0().into();
        assert!(intersects(&mp, &line).unwrap());
        assert!(!within(&mp, &line).unwrap());
        assert!(crosses(&mp, &line).unwrap());
    }

    #[test]
    fn empty_operands_never_intersect() {
        let empty: Geometry = Point::empty(Dimension::XY).into();
        let polygon: Geometry = square().into();
        assert!(!intersects(&empty, &polygon).unwrap());
        assert!(disjoint(&empty, &polygon).unwrap());
        assert!(!contains(&polygon, &empty).unwrap());
    }
}
