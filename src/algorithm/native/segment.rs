//! Robust predicates and distances on single segments.

use geo::kernels::{Kernel, Orientation, RobustKernel};
use geo::line_intersection::{line_intersection, LineIntersection};
use geo::Line;

use crate::geometry::Coord;

#[inline]
pub(crate) fn orient(p: &Coord, q: &Coord, r: &Coord) -> Orientation {
    <RobustKernel as Kernel<f64>>::orient2d(p.xy(), q.xy(), r.xy())
}

/// Whether `p` lies on the closed segment `a`-`b`.
pub(crate) fn point_on_segment(p: &Coord, a: &Coord, b: &Coord) -> bool {
    if orient(a, b, p) != Orientation::Collinear {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Whether the closed segments `a0`-`a1` and `b0`-`b1` share at least one point.
pub(crate) fn segments_intersect(a0: &Coord, a1: &Coord, b0: &Coord, b1: &Coord) -> bool {
    let o1 = orient(a0, a1, b0);
    let o2 = orient(a0, a1, b1);
    let o3 = orient(b0, b1, a0);
    let o4 = orient(b0, b1, a1);

    if o1 != o2
        && o3 != o4
        && o1 != Orientation::Collinear
        && o2 != Orientation::Collinear
        && o3 != Orientation::Collinear
        && o4 != Orientation::Collinear
    {
        return true;
    }

    point_on_segment(b0, a0, a1)
        || point_on_segment(b1, a0, a1)
        || point_on_segment(a0, b0, b1)
        || point_on_segment(a1, b0, b1)
}

/// How two segments meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SegmentIntersection {
    /// A single shared point. `proper` when it is interior to both segments.
    Point { at: Coord, proper: bool },
    /// A shared collinear stretch.
    Overlap { start: Coord, end: Coord },
}

pub(crate) fn segment_intersection(
    a0: &Coord,
    a1: &Coord,
    b0: &Coord,
    b1: &Coord,
) -> Option<SegmentIntersection> {
    let a = Line::new(a0.xy(), a1.xy());
    let b = Line::new(b0.xy(), b1.xy());
    line_intersection(a, b).map(|hit| match hit {
        LineIntersection::SinglePoint {
            intersection,
            is_proper,
        } => SegmentIntersection::Point {
            at: intersection.into(),
            proper: is_proper,
        },
        LineIntersection::Collinear { intersection } => SegmentIntersection::Overlap {
            start: intersection.start.into(),
            end: intersection.end.into(),
        },
    })
}

/// The closest point to `p` on segment `a`-`b`, and its fraction along the segment in `[0, 1]`.
pub(crate) fn closest_point(p: &Coord, a: &Coord, b: &Coord) -> (Coord, f64) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return (Coord::new(a.x, a.y), 0.0);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    (Coord::new(a.x + t * dx, a.y + t * dy), t)
}

#[inline]
pub(crate) fn distance(a: &Coord, b: &Coord) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

pub(crate) fn point_segment_distance(p: &Coord, a: &Coord, b: &Coord) -> f64 {
    let (closest, _) = closest_point(p, a, b);
    distance(p, &closest)
}

pub(crate) fn segment_segment_distance(a0: &Coord, a1: &Coord, b0: &Coord, b1: &Coord) -> f64 {
    if segments_intersect(a0, a1, b0, b1) {
        return 0.0;
    }
    point_segment_distance(a0, b0, b1)
        .min(point_segment_distance(a1, b0, b1))
        .min(point_segment_distance(b0, a0, a1))
        .min(point_segment_distance(b1, a0, a1))
}
