//! Geometry-valued intersection for the operand kinds the kernel supports.

use geo::BooleanOps;

use crate::algorithm::native::components::Components;
use crate::algorithm::native::segment::{
    point_on_segment, segment_intersection, SegmentIntersection,
};
use crate::algorithm::native::PointLocator;
use crate::algorithm::relate::Dimensions;
use crate::algorithm::validation::require_valid;
use crate::error::{GeoKernelError, Result};
use crate::geometry::{
    Coord, Dimension, Geometry, GeometryCollection, GeometryKind, GeometryType, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::io::geo::{
    multi_line_string_from_geo, multi_line_string_to_geo, multi_polygon_from_geo,
    multi_polygon_to_geo,
};

/// The point set shared by `a` and `b`.
///
/// Both operands must be valid. Puntal operands intersect anything; otherwise polygonal,
/// lineal against polygonal and lineal against lineal pairs are supported. Lower-dimensional
/// touches between areas, and between lines and areas, are not part of the result.
pub fn intersection(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    for operand in [a, b] {
        if operand.geom_type() == GeometryKind::GeometryCollection {
            return Err(GeoKernelError::OperationNotSupported(
                "IllegalArgumentException: Overlay input is mixed-dimension".to_string(),
            ));
        }
    }
    require_valid(a)?;
    require_valid(b)?;

    if a.is_empty() || b.is_empty() {
        return Ok(empty_of_dimension(
            a.topology_dimension().min(b.topology_dimension()),
        ));
    }

    let (kind_a, kind_b) = (a.geom_type(), b.geom_type());
    if kind_a.is_puntal() {
        return points_in(a, b);
    }
    if kind_b.is_puntal() {
        return points_in(b, a);
    }
    match (kind_a.is_polygonal(), kind_b.is_polygonal()) {
        (true, true) => polygon_intersection(a, b),
        (false, true) => clip_lines(a, b),
        (true, false) => clip_lines(b, a),
        (false, false) => line_intersection(a, b),
    }
}

fn empty_of_dimension(dim: Dimensions) -> Geometry {
    match dim {
        Dimensions::TwoDimensional => Polygon::empty(Dimension::XY).into(),
        Dimensions::OneDimensional => LineString::empty(Dimension::XY).into(),
        _ => Point::empty(Dimension::XY).into(),
    }
}

fn collect_points(coords: Vec<Coord>) -> Result<Geometry> {
    match coords.len() {
        0 => Ok(Point::empty(Dimension::XY).into()),
        1 => Ok(Point::from_coord(coords[0].force_dim(Dimension::XY)).into()),
        _ => Ok(MultiPoint::from_coords(
            coords
                .into_iter()
                .map(|c| c.force_dim(Dimension::XY))
                .collect(),
        )?
        .into()),
    }
}

fn simplify_lines(lines: MultiLineString) -> Geometry {
    match lines.len() {
        0 => LineString::empty(Dimension::XY).into(),
        1 => lines.into_lines().remove(0).into(),
        _ => lines.into(),
    }
}

fn points_in(points: &Geometry, other: &Geometry) -> Result<Geometry> {
    let mut kept: Vec<Coord> = vec![];
    for c in Components::new(points).points {
        if other.intersects_coord(&c) && !kept.iter().any(|k| k.equals_2d(&c)) {
            kept.push(c);
        }
    }
    collect_points(kept)
}

fn to_geo_multi_polygon(geom: &Geometry) -> Result<geo::MultiPolygon> {
    match geom.as_type() {
        GeometryType::Polygon(g) => Ok(multi_polygon_to_geo(&MultiPolygon::try_new(vec![
            g.clone(),
        ])?)),
        GeometryType::MultiPolygon(g) => Ok(multi_polygon_to_geo(g)),
        _ => Err(GeoKernelError::OperationNotSupported(format!(
            "Expected a polygonal operand, got {}",
            geom.geom_type()
        ))),
    }
}

fn to_geo_multi_line_string(geom: &Geometry) -> Result<geo::MultiLineString> {
    let lines = Components::new(geom)
        .lines
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    Ok(multi_line_string_to_geo(&MultiLineString::try_new(lines)?))
}

fn polygon_intersection(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    let result = to_geo_multi_polygon(a)?.intersection(&to_geo_multi_polygon(b)?);
    let polygons = multi_polygon_from_geo(&result)?;
    Ok(match polygons.len() {
        0 => Polygon::empty(Dimension::XY).into(),
        1 => polygons.into_polygons().remove(0).into(),
        _ => polygons.into(),
    })
}

fn clip_lines(lines: &Geometry, polygons: &Geometry) -> Result<Geometry> {
    let clipped = to_geo_multi_polygon(polygons)?.clip(&to_geo_multi_line_string(lines)?, false);
    Ok(simplify_lines(multi_line_string_from_geo(&clipped)?))
}

/// Join overlapping pieces that continue one another into longer lines.
fn merge_chains(pieces: Vec<(Coord, Coord)>) -> Vec<Vec<Coord>> {
    let mut chains: Vec<Vec<Coord>> = vec![];
    for (start, end) in pieces {
        match chains
            .last_mut()
            .filter(|chain| chain.last().map_or(false, |last| last.equals_2d(&start)))
        {
            Some(chain) => chain.push(end),
            None => chains.push(vec![start, end]),
        }
    }
    chains
}

fn line_intersection(a: &Geometry, b: &Geometry) -> Result<Geometry> {
    let segments_a = Components::new(a).segments();
    let segments_b = Components::new(b).segments();

    let mut pieces: Vec<(Coord, Coord)> = vec![];
    let mut points: Vec<Coord> = vec![];
    for (a0, a1) in &segments_a {
        for (b0, b1) in &segments_b {
            match segment_intersection(a0, a1, b0, b1) {
                Some(SegmentIntersection::Overlap { start, end }) if !start.equals_2d(&end) => {
                    pieces.push((start, end))
                }
                Some(SegmentIntersection::Overlap { start: at, .. })
                | Some(SegmentIntersection::Point { at, .. }) => points.push(at),
                None => {}
            }
        }
    }

    let lines = merge_chains(pieces)
        .into_iter()
        .map(LineString::try_new)
        .collect::<Result<Vec<_>>>()?;
    let covered = |c: &Coord| {
        lines
            .iter()
            .any(|line| line.segments().any(|(p, q)| point_on_segment(c, &p, &q)))
    };
    let mut isolated: Vec<Coord> = vec![];
    for c in points {
        if !covered(&c) && !isolated.iter().any(|k| k.equals_2d(&c)) {
            isolated.push(c);
        }
    }

    match (lines.is_empty(), isolated.is_empty()) {
        (_, true) => Ok(simplify_lines(MultiLineString::try_new(lines)?)),
        (true, false) => collect_points(isolated),
        (false, false) => {
            let mut geoms: Vec<Geometry> = lines.into_iter().map(Into::into).collect();
            geoms.push(collect_points(isolated)?);
            Ok(GeometryCollection::try_new(geoms)?.into())
        }
    }
}
