//! Point-in-geometry location.

use geo::kernels::Orientation;
use serde::{Deserialize, Serialize};

use crate::algorithm::native::segment::{orient, point_on_segment};
use crate::geometry::{Coord, Geometry, GeometryType, LineString, LinearRing, Polygon};

/// Where a point lies relative to a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    /// Index into a DE-9IM row or column.
    pub(crate) fn index(&self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }
}

/// Anything that can answer point location queries.
pub trait PointLocator {
    fn locate(&self, coord: &Coord) -> Location;

    fn intersects_coord(&self, coord: &Coord) -> bool {
        self.locate(coord) != Location::Exterior
    }
}

impl PointLocator for Geometry {
    fn locate(&self, coord: &Coord) -> Location {
        locate_point(self, coord)
    }
}

/// Counts crossings of a rightward ray from a point with ring segments.
///
/// Segments must be fed one at a time; a point on any segment is on the boundary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RayCrossingCounter {
    point: Coord,
    crossings: usize,
    on_segment: bool,
}

impl RayCrossingCounter {
    pub fn new(point: Coord) -> Self {
        Self {
            point,
            crossings: 0,
            on_segment: false,
        }
    }

    pub fn count_segment(&mut self, p1: &Coord, p2: &Coord) {
        let p = self.point;
        if p1.x < p.x && p2.x < p.x {
            return;
        }
        if p.equals_2d(p2) {
            self.on_segment = true;
            return;
        }
        if p1.y == p.y && p2.y == p.y {
            let (minx, maxx) = (p1.x.min(p2.x), p1.x.max(p2.x));
            if p.x >= minx && p.x <= maxx {
                self.on_segment = true;
            }
            return;
        }
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut sign = match orient(p1, p2, &p) {
                Orientation::Collinear => {
                    self.on_segment = true;
                    return;
                }
                Orientation::CounterClockwise => 1,
                Orientation::Clockwise => -1,
            };
            if p2.y < p1.y {
                sign = -sign;
            }
            if sign > 0 {
                self.crossings += 1;
            }
        }
    }

    pub fn is_on_segment(&self) -> bool {
        self.on_segment
    }

    pub fn location(&self) -> Location {
        if self.on_segment {
            Location::Boundary
        } else if self.crossings % 2 == 1 {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}

/// Locate a point against the area enclosed by a closed ring.
pub(crate) fn locate_in_ring(coord: &Coord, ring: &LinearRing) -> Location {
    let mut counter = RayCrossingCounter::new(*coord);
    for (a, b) in ring.segments() {
        counter.count_segment(&b, &a);
        if counter.is_on_segment() {
            break;
        }
    }
    counter.location()
}

pub(crate) fn locate_in_polygon(coord: &Coord, polygon: &Polygon) -> Location {
    let Some(shell) = polygon.exterior() else {
        return Location::Exterior;
    };
    match locate_in_ring(coord, shell) {
        Location::Interior => {}
        other => return other,
    }
    for hole in polygon.interiors() {
        match locate_in_ring(coord, hole) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            Location::Exterior => {}
        }
    }
    Location::Interior
}

/// Locate a point against a line. The endpoints of an open line are its boundary.
pub(crate) fn locate_on_line(coord: &Coord, line: &LineString) -> Location {
    if line.is_empty() {
        return Location::Exterior;
    }
    if !line.is_closed() {
        if let (Some(start), Some(end)) = (line.start(), line.end()) {
            if coord.equals_2d(&start) || coord.equals_2d(&end) {
                return Location::Boundary;
            }
        }
    }
    if line.segments().any(|(a, b)| point_on_segment(coord, &a, &b)) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Combines per-component locations with the mod-2 boundary rule.
///
/// A point on the boundary of an odd number of components is on the boundary; any other
/// boundary or interior hit makes it interior.
#[derive(Debug, Default)]
pub(crate) struct LocationAccumulator {
    is_in: bool,
    boundaries: usize,
}

impl LocationAccumulator {
    pub fn add(&mut self, location: Location) {
        match location {
            Location::Interior => self.is_in = true,
            Location::Boundary => self.boundaries += 1,
            Location::Exterior => {}
        }
    }

    pub fn location(&self) -> Location {
        if self.boundaries % 2 == 1 {
            Location::Boundary
        } else if self.boundaries > 0 || self.is_in {
            Location::Interior
        } else {
            Location::Exterior
        }
    }
}

/// Locate a coordinate relative to a geometry, in the plane.
pub fn locate_point(geom: &Geometry, coord: &Coord) -> Location {
    if geom.is_empty() {
        return Location::Exterior;
    }
    match geom.as_type() {
        GeometryType::Point(g) => match g.coord() {
            Some(c) if c.equals_2d(coord) => Location::Interior,
            _ => Location::Exterior,
        },
        GeometryType::LineString(g) => locate_on_line(coord, g),
        GeometryType::LinearRing(g) => locate_on_line(coord, g.as_line_string()),
        GeometryType::Polygon(g) => locate_in_polygon(coord, g),
        GeometryType::MultiPoint(g) => {
            if g
                .points()
                .iter()
                .filter_map(|p| p.coord())
                .any(|c| c.equals_2d(coord))
            {
                Location::Interior
            } else {
                Location::Exterior
            }
        }
        GeometryType::MultiLineString(g) => {
            let mut acc = LocationAccumulator::default();
            g.lines()
                .iter()
                .for_each(|line| acc.add(locate_on_line(coord, line)));
            acc.location()
        }
        GeometryType::MultiPolygon(g) => {
            let mut acc = LocationAccumulator::default();
            g.polygons()
                .iter()
                .for_each(|polygon| acc.add(locate_in_polygon(coord, polygon)));
            acc.location()
        }
        GeometryType::GeometryCollection(g) => {
            let mut acc = LocationAccumulator::default();
            g.geoms()
                .iter()
                .for_each(|child| acc.add(locate_point(child, coord)));
            acc.location()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::linestring::ls0;
    use crate::test::multilinestring::ml0;
    use crate::test::polygon::{square, square_with_hole, two_squares};

    #[test]
    fn polygon_location() {
        let g: Geometry = square_with_hole().into();
        assert_eq!(g.locate(&Coord::new(0.1, 0.1)), Location::Interior);
        assert_eq!(g.locate(&Coord::new(0.3, 0.3)), Location::Exterior);
        assert_eq!(g.locate(&Coord::new(0.25, 0.3)), Location::Boundary);
        assert_eq!(g.locate(&Coord::new(1., 0.5)), Location::Boundary);
        assert_eq!(g.locate(&Coord::new(0., 0.)), Location::Boundary);
        assert_eq!(g.locate(&Coord::new(1.5, 0.5)), Location::Exterior);
    }

    #[test]
    fn ray_through_vertex() {
        let g: Geometry = square().into();
        // The ray from (-1, 1) runs along the top edge.
        assert_eq!(g.locate(&Coord::new(-1., 1.)), Location::Exterior);
        assert_eq!(g.locate(&Coord::new(0.5, 1.)), Location::Boundary);
    }

    #[test]
    fn line_endpoints_are_boundary() {
        let g: Geometry = ls0().into();
        assert_eq!(g.locate(&Coord::new(0., 0.)), Location::Boundary);
        assert_eq!(g.locate(&Coord::new(1., 0.)), Location::Interior);
        assert_eq!(g.locate(&Coord::new(1., 1.)), Location::Exterior);
    }

    #[test]
    fn mod2_boundary_rule() {
        let joined = crate::geometry::MultiLineString::from_coords(vec![
            crate::test::coords(&[(0., 0.), (1., 0.)]),
            crate::test::coords(&[(1., 0.), (2., 0.)]),
        ])
        .unwrap();
        let g: Geometry = joined.into();
        assert_eq!(g.locate(&Coord::new(1., 0.)), Location::Interior);
        assert_eq!(g.locate(&Coord::new(2., 0.)), Location::Boundary);

        let g: Geometry = ml0().into();
        assert_eq!(g.locate(&Coord::new(3., 6.)), Location::Boundary);
    }

    #[test]
    fn multipolygon_location() {
        let g: Geometry = two_squares().into();
        assert_eq!(g.locate(&Coord::new(2.5, 0.5)), Location::Interior);
        assert_eq!(g.locate(&Coord::new(1.5, 0.5)), Location::Exterior);
    }
}
