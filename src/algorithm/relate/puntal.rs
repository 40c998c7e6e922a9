//! DE-9IM for a point set against any geometry, by point location alone.

use crate::algorithm::native::components::Components;
use crate::algorithm::native::{Location, PointLocator};
use crate::algorithm::relate::{Dimensions, IntersectionMatrix};
use crate::geometry::{Coord, Geometry};

/// Endpoints that occur an odd number of times across the open lines of `parts`.
pub(crate) fn line_boundary_points(parts: &Components<'_>) -> Vec<Coord> {
    let mut endpoints: Vec<(Coord, usize)> = vec![];
    for line in parts.lines.iter().filter(|line| !line.is_closed()) {
        for endpoint in [line.start(), line.end()].into_iter().flatten() {
            match endpoints.iter_mut().find(|(c, _)| c.equals_2d(&endpoint)) {
                Some((_, count)) => *count += 1,
                None => endpoints.push((endpoint, 1)),
            }
        }
    }
    endpoints
        .into_iter()
        .filter(|(_, count)| count % 2 == 1)
        .map(|(c, _)| c)
        .collect()
}

fn covered_by_points(points: &[Coord], coord: &Coord) -> bool {
    points.iter().any(|p| p.equals_2d(coord))
}

/// Relate the non-empty point set `points` to the non-empty geometry `other`, answering location
/// queries through `locator`.
pub(crate) fn relate_points(
    points: &[Coord],
    other: &Geometry,
    locator: &impl PointLocator,
) -> IntersectionMatrix {
    let mut matrix = IntersectionMatrix::empty();
    matrix.set(
        Location::Exterior,
        Location::Exterior,
        Dimensions::TwoDimensional,
    );

    for point in points {
        let location = locator.locate(point);
        matrix.set_at_least(Location::Interior, location, Dimensions::ZeroDimensional);
    }

    let parts = Components::new(other);
    let exterior_interior = if !parts.polygons.is_empty() {
        Dimensions::TwoDimensional
    } else if !parts.lines.is_empty() {
        Dimensions::OneDimensional
    } else if parts
        .points
        .iter()
        .any(|p| !covered_by_points(points, p))
    {
        Dimensions::ZeroDimensional
    } else {
        Dimensions::Empty
    };
    matrix.set_at_least(Location::Exterior, Location::Interior, exterior_interior);

    let exterior_boundary = if !parts.polygons.is_empty() {
        Dimensions::OneDimensional
    } else if line_boundary_points(&parts)
        .iter()
        .any(|p| !covered_by_points(points, p))
    {
        Dimensions::ZeroDimensional
    } else {
        Dimensions::Empty
    };
    matrix.set_at_least(Location::Exterior, Location::Boundary, exterior_boundary);

    matrix
}
