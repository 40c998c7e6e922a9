//! Linear referencing and planar distance.

use crate::algorithm::native::components::Components;
use crate::algorithm::native::segment::{
    closest_point, distance as coord_distance, point_segment_distance, segment_segment_distance,
};
use crate::algorithm::relate::predicates::intersects_native;
use crate::error::{GeoKernelError, Result};
use crate::geometry::{Coord, Dimension, Geometry, GeometryType, LineString, Point};

/// The line parts of a lineal geometry, children of a multi line concatenated in order.
fn lineal_parts(geom: &Geometry) -> Result<Vec<&LineString>> {
    match geom.as_type() {
        GeometryType::LineString(g) => Ok(vec![g]),
        GeometryType::LinearRing(g) => Ok(vec![g.as_line_string()]),
        GeometryType::MultiLineString(g) => Ok(g.lines().iter().collect()),
        _ => Err(GeoKernelError::OperationNotSupported(format!(
            "IllegalArgumentException: LinearIterator only supports lineal geometry components, got {}",
            geom.geom_type()
        ))),
    }
}

fn query_point(geom: &Geometry) -> Result<Coord> {
    match geom.as_type() {
        GeometryType::Point(p) => p.coord().ok_or_else(|| {
            GeoKernelError::OperationNotSupported(
                "IllegalArgumentException: Cannot project an empty Point".to_string(),
            )
        }),
        _ => Err(GeoKernelError::OperationNotSupported(format!(
            "IllegalArgumentException: Argument must be a Point, got {}",
            geom.geom_type()
        ))),
    }
}

/// Distance along `line` to the point on it nearest `point`.
///
/// Only segment lengths are accumulated, so gaps between the children of a multi line do not
/// count. With `normalized` the result is a fraction of the total length.
pub fn project(line: &Geometry, point: &Geometry, normalized: bool) -> Result<f64> {
    let parts = lineal_parts(line)?;
    let p = query_point(point)?;

    let mut best_distance = f64::INFINITY;
    let mut best_position = 0.0;
    let mut travelled = 0.0;
    for (a, b) in parts.iter().flat_map(|part| part.segments()) {
        let segment_length = coord_distance(&a, &b);
        let (closest, fraction) = closest_point(&p, &a, &b);
        let d = coord_distance(&p, &closest);
        if d < best_distance {
            best_distance = d;
            best_position = travelled + fraction * segment_length;
        }
        travelled += segment_length;
    }

    if normalized {
        if travelled == 0.0 {
            return Ok(0.0);
        }
        Ok(best_position / travelled)
    } else {
        Ok(best_position)
    }
}

/// The point at `distance` along `line`.
///
/// Distances outside `[0, length]` clamp to the nearest endpoint. An empty line yields an empty
/// point.
pub fn interpolate(line: &Geometry, distance: f64, normalized: bool) -> Result<Point> {
    let parts = lineal_parts(line)?;
    let dim = line.dimension();
    let total: f64 = parts.iter().map(|part| part.length()).sum();

    let mut segments = parts.iter().flat_map(|part| part.segments()).peekable();
    let Some(&(first, _)) = segments.peek() else {
        return Ok(Point::empty(dim));
    };

    let target = if normalized { distance * total } else { distance };
    if target.is_nan() {
        return Err(GeoKernelError::OperationNotSupported(
            "IllegalArgumentException: Interpolation distance must be a number".to_string(),
        ));
    }
    if target <= 0.0 {
        return Ok(Point::from_coord(first));
    }

    let mut travelled = 0.0;
    let mut last = first;
    for (a, b) in segments {
        let segment_length = coord_distance(&a, &b);
        if travelled + segment_length >= target {
            let fraction = if segment_length == 0.0 {
                0.0
            } else {
                (target - travelled) / segment_length
            };
            return Ok(Point::from_coord(lerp(&a, &b, fraction, dim)));
        }
        travelled += segment_length;
        last = b;
    }
    Ok(Point::from_coord(last))
}

fn lerp(a: &Coord, b: &Coord, fraction: f64, dim: Dimension) -> Coord {
    let x = a.x + fraction * (b.x - a.x);
    let y = a.y + fraction * (b.y - a.y);
    match (dim, a.z, b.z) {
        (Dimension::XYZ, Some(za), Some(zb)) => Coord::new_z(x, y, za + fraction * (zb - za)),
        _ => Coord::new(x, y),
    }
}

/// Minimum planar distance between `a` and `b`, zero when they intersect.
pub fn distance(a: &Geometry, b: &Geometry) -> Result<f64> {
    if a.is_empty() || b.is_empty() {
        return Err(GeoKernelError::OperationNotSupported(
            "IllegalArgumentException: distance is undefined for empty geometries".to_string(),
        ));
    }
    if intersects_native(a, b) {
        return Ok(0.0);
    }

    let parts_a = Components::new(a);
    let parts_b = Components::new(b);
    let segments_a = parts_a.segments();
    let segments_b = parts_b.segments();

    let mut best = f64::INFINITY;
    for p in &parts_a.points {
        for q in &parts_b.points {
            best = best.min(coord_distance(p, q));
        }
        for (q0, q1) in &segments_b {
            best = best.min(point_segment_distance(p, q0, q1));
        }
    }
    for (p0, p1) in &segments_a {
        for q in &parts_b.points {
            best = best.min(point_segment_distance(q, p0, p1));
        }
        for (q0, q1) in &segments_b {
            best = best.min(segment_segment_distance(p0, p1, q0, q1));
        }
    }
    Ok(best)
}
