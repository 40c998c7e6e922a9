//! OGC validity checks.

use std::fmt::Display;

use crate::algorithm::native::locate::{locate_in_polygon, locate_in_ring};
use crate::algorithm::native::segment::{segment_intersection, SegmentIntersection};
use crate::algorithm::native::Location;
use crate::error::{GeoKernelError, Result};
use crate::geometry::{Coord, Geometry, GeometryType, LineString, LinearRing, Polygon};
use crate::indexed::SegmentIndex;

/// The first problem found that makes a geometry invalid, with its location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidReason {
    /// A NaN or infinite ordinate.
    InvalidCoordinate(Coord),
    /// A line or ring with too few distinct points.
    TooFewPoints(Coord),
    /// A ring crosses or touches itself.
    RingSelfIntersection(Coord),
    /// Two rings of a polygon cross, or overlap along a stretch.
    SelfIntersection(Coord),
    HoleOutsideShell(Coord),
    NestedHoles(Coord),
    /// Members of a multipolygon overlap.
    NestedShells(Coord),
}

impl InvalidReason {
    pub fn location(&self) -> Coord {
        match self {
            InvalidReason::InvalidCoordinate(c)
            | InvalidReason::TooFewPoints(c)
            | InvalidReason::RingSelfIntersection(c)
            | InvalidReason::SelfIntersection(c)
            | InvalidReason::HoleOutsideShell(c)
            | InvalidReason::NestedHoles(c)
            | InvalidReason::NestedShells(c) => *c,
        }
    }
}

impl Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            InvalidReason::InvalidCoordinate(_) => "Invalid Coordinate",
            InvalidReason::TooFewPoints(_) => "Too few points",
            InvalidReason::RingSelfIntersection(_) => "Ring Self-intersection",
            InvalidReason::SelfIntersection(_) => "Self-intersection",
            InvalidReason::HoleOutsideShell(_) => "Hole lies outside shell",
            InvalidReason::NestedHoles(_) => "Holes are nested",
            InvalidReason::NestedShells(_) => "Nested shells",
        };
        let c = self.location();
        write!(f, "{message}[{} {}]", c.x, c.y)
    }
}

pub fn is_valid(geom: &Geometry) -> bool {
    explain_validity(geom).is_none()
}

/// The reason `geom` is invalid, `None` when it is valid. Empty geometries are valid.
pub fn explain_validity(geom: &Geometry) -> Option<InvalidReason> {
    let mut non_finite = None;
    geom.for_each_coord(&mut |c| {
        if non_finite.is_none() && !c.is_finite() {
            non_finite = Some(*c);
        }
    });
    if let Some(c) = non_finite {
        return Some(InvalidReason::InvalidCoordinate(c));
    }

    match geom.as_type() {
        GeometryType::Point(_) | GeometryType::MultiPoint(_) => None,
        GeometryType::LineString(g) => check_line(g),
        GeometryType::LinearRing(g) => check_ring(g),
        GeometryType::Polygon(g) => check_polygon(g),
        GeometryType::MultiLineString(g) => g.lines().iter().find_map(check_line),
        GeometryType::MultiPolygon(g) => g
            .polygons()
            .iter()
            .find_map(check_polygon)
            .or_else(|| check_multipolygon(g.polygons())),
        GeometryType::GeometryCollection(g) => g.geoms().iter().find_map(explain_validity),
    }
}

/// Fail with a topological error when `geom` is invalid.
pub(crate) fn require_valid(geom: &Geometry) -> Result<()> {
    match explain_validity(geom) {
        None => Ok(()),
        Some(reason) => Err(GeoKernelError::Topological(format!(
            "The operation was attempted on an invalid geometry: {reason}"
        ))),
    }
}

fn dedup(coords: &[Coord]) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last().map_or(true, |last| !last.equals_2d(c)) {
            out.push(*c);
        }
    }
    out
}

fn check_line(line: &LineString) -> Option<InvalidReason> {
    if line.is_empty() {
        return None;
    }
    let distinct = dedup(line.coords());
    if distinct.len() < 2 {
        return Some(InvalidReason::TooFewPoints(distinct[0]));
    }
    None
}

fn check_ring(ring: &LinearRing) -> Option<InvalidReason> {
    if ring.is_empty() {
        return None;
    }
    let distinct = dedup(ring.coords());
    if distinct.len() < 4 {
        return Some(InvalidReason::TooFewPoints(distinct[0]));
    }
    ring_self_intersection(&distinct).map(InvalidReason::RingSelfIntersection)
}

/// The first point where a closed ring meets itself other than at shared vertices of
/// consecutive segments.
fn ring_self_intersection(coords: &[Coord]) -> Option<Coord> {
    let segments: Vec<(Coord, Coord)> = coords.windows(2).map(|w| (w[0], w[1])).collect();
    let n = segments.len();
    let index = SegmentIndex::new(segments.iter().copied());
    for (i, (a0, a1)) in segments.iter().enumerate() {
        let min = [a0.x.min(a1.x), a0.y.min(a1.y)];
        let max = [a0.x.max(a1.x), a0.y.max(a1.y)];
        for (j, b0, b1) in index.search_with_ids(min, max) {
            if j <= i {
                continue;
            }
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            match segment_intersection(a0, a1, &b0, &b1) {
                None => {}
                Some(SegmentIntersection::Overlap { start, end }) if !start.equals_2d(&end) => {
                    return Some(start)
                }
                Some(SegmentIntersection::Overlap { start: at, .. })
                | Some(SegmentIntersection::Point { at, .. }) => {
                    if !adjacent {
                        return Some(at);
                    }
                }
            }
        }
    }
    None
}

/// The first point where two distinct rings cross or overlap. Single-point touches are allowed.
fn rings_cross(a: &LinearRing, b: &LinearRing) -> Option<Coord> {
    let index = SegmentIndex::new(b.segments());
    for (a0, a1) in a.segments() {
        let min = [a0.x.min(a1.x), a0.y.min(a1.y)];
        let max = [a0.x.max(a1.x), a0.y.max(a1.y)];
        for (b0, b1) in index.search(min, max) {
            match segment_intersection(&a0, &a1, &b0, &b1) {
                Some(SegmentIntersection::Point { at, proper: true }) => return Some(at),
                Some(SegmentIntersection::Overlap { start, end }) if !start.equals_2d(&end) => {
                    return Some(start)
                }
                _ => {}
            }
        }
    }
    None
}

/// A vertex of `ring` that does not lie on `other`, used to classify one ring against another.
fn vertex_off_ring(ring: &LinearRing, other: &LinearRing) -> Option<Coord> {
    ring.coords()
        .iter()
        .find(|c| locate_in_ring(c, other) != Location::Boundary)
        .copied()
}

fn check_polygon(polygon: &Polygon) -> Option<InvalidReason> {
    if let Some(reason) = polygon.rings().iter().find_map(check_ring) {
        return Some(reason);
    }
    let shell = polygon.exterior()?;
    let holes = polygon.interiors();

    for (i, hole) in holes.iter().enumerate() {
        if let Some(at) = rings_cross(shell, hole) {
            return Some(InvalidReason::SelfIntersection(at));
        }
        for other in &holes[i + 1..] {
            if let Some(at) = rings_cross(hole, other) {
                return Some(InvalidReason::SelfIntersection(at));
            }
        }
    }

    for hole in holes {
        if let Some(c) = vertex_off_ring(hole, shell) {
            if locate_in_ring(&c, shell) == Location::Exterior {
                return Some(InvalidReason::HoleOutsideShell(c));
            }
        }
    }

    for (i, hole) in holes.iter().enumerate() {
        for (j, other) in holes.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(c) = vertex_off_ring(hole, other) {
                if locate_in_ring(&c, other) == Location::Interior {
                    return Some(InvalidReason::NestedHoles(c));
                }
            }
        }
    }
    None
}

fn check_multipolygon(polygons: &[Polygon]) -> Option<InvalidReason> {
    for (i, a) in polygons.iter().enumerate() {
        for b in &polygons[i + 1..] {
            for ring_a in a.rings() {
                for ring_b in b.rings() {
                    if let Some(at) = rings_cross(ring_a, ring_b) {
                        return Some(InvalidReason::SelfIntersection(at));
                    }
                }
            }
        }
    }

    for (i, a) in polygons.iter().enumerate() {
        for (j, b) in polygons.iter().enumerate() {
            if i == j {
                continue;
            }
            let (Some(shell_a), Some(shell_b)) = (a.exterior(), b.exterior()) else {
                continue;
            };
            if let Some(c) = vertex_off_ring(shell_a, shell_b) {
                if locate_in_polygon(&c, b) == Location::Interior {
                    return Some(InvalidReason::NestedShells(c));
                }
            }
        }
    }
    None
}
