use crate::error::Result;
use crate::geometry::{
    Coord, Geometry, GeometryCollection, GeometryType, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};

fn coords_to_geo(coords: &[Coord]) -> geo::LineString {
    geo::LineString::new(coords.iter().map(Coord::xy).collect())
}

/// Convert a Point to a [`geo::Point`], `None` when empty.
///
/// Only the first two dimensions will be kept.
pub fn point_to_geo(point: &Point) -> Option<geo::Point> {
    point.coord().map(|coord| geo::Point(coord.xy()))
}

/// Convert a LineString to a [`geo::LineString`].
///
/// Only the first two dimensions will be kept.
pub fn line_string_to_geo(line_string: &LineString) -> geo::LineString {
    coords_to_geo(line_string.coords())
}

/// Convert a Polygon to a [`geo::Polygon`].
///
/// Only the first two dimensions will be kept.
pub fn polygon_to_geo(polygon: &Polygon) -> geo::Polygon {
    let exterior = polygon
        .exterior()
        .map(|ring| coords_to_geo(ring.coords()))
        .unwrap_or_else(|| geo::LineString::new(vec![]));
    let interiors = polygon
        .interiors()
        .iter()
        .map(|ring| coords_to_geo(ring.coords()))
        .collect();
    geo::Polygon::new(exterior, interiors)
}

/// Convert a MultiPoint to a [`geo::MultiPoint`].
///
/// Only the first two dimensions will be kept.
pub fn multi_point_to_geo(multi_point: &MultiPoint) -> geo::MultiPoint {
    geo::MultiPoint::new(multi_point.points().iter().filter_map(point_to_geo).collect())
}

/// Convert a MultiLineString to a [`geo::MultiLineString`].
///
/// Only the first two dimensions will be kept.
pub fn multi_line_string_to_geo(multi_line_string: &MultiLineString) -> geo::MultiLineString {
    geo::MultiLineString::new(
        multi_line_string
            .lines()
            .iter()
            .map(line_string_to_geo)
            .collect(),
    )
}

/// Convert a MultiPolygon to a [`geo::MultiPolygon`].
///
/// Only the first two dimensions will be kept.
pub fn multi_polygon_to_geo(multi_polygon: &MultiPolygon) -> geo::MultiPolygon {
    geo::MultiPolygon::new(multi_polygon.polygons().iter().map(polygon_to_geo).collect())
}

/// Convert a GeometryCollection to a [`geo::GeometryCollection`].
///
/// Only the first two dimensions will be kept.
pub fn geometry_collection_to_geo(collection: &GeometryCollection) -> geo::GeometryCollection {
    geo::GeometryCollection::new_from(collection.geoms().iter().map(geometry_to_geo).collect())
}

/// Convert any Geometry to a [`geo::Geometry`].
///
/// `geo` has no empty point, so an empty Point becomes an empty [`geo::MultiPoint`]. A
/// LinearRing becomes a [`geo::LineString`]. Only the first two dimensions will be kept.
pub fn geometry_to_geo(geometry: &Geometry) -> geo::Geometry {
    match geometry.as_type() {
        GeometryType::Point(g) => match point_to_geo(g) {
            Some(point) => geo::Geometry::Point(point),
            None => geo::Geometry::MultiPoint(geo::MultiPoint::new(vec![])),
        },
        GeometryType::LineString(g) => geo::Geometry::LineString(line_string_to_geo(g)),
        GeometryType::LinearRing(g) => geo::Geometry::LineString(coords_to_geo(g.coords())),
        GeometryType::Polygon(g) => geo::Geometry::Polygon(polygon_to_geo(g)),
        GeometryType::MultiPoint(g) => geo::Geometry::MultiPoint(multi_point_to_geo(g)),
        GeometryType::MultiLineString(g) => {
            geo::Geometry::MultiLineString(multi_line_string_to_geo(g))
        }
        GeometryType::MultiPolygon(g) => geo::Geometry::MultiPolygon(multi_polygon_to_geo(g)),
        GeometryType::GeometryCollection(g) => {
            geo::Geometry::GeometryCollection(geometry_collection_to_geo(g))
        }
    }
}

fn coords_from_geo(line_string: &geo::LineString) -> Vec<Coord> {
    line_string.0.iter().copied().map(Coord::from).collect()
}

/// Convert a [`geo::Polygon`] into a 2D Polygon, closing open rings.
pub fn polygon_from_geo(polygon: &geo::Polygon) -> Result<Polygon> {
    Polygon::from_coords(
        coords_from_geo(polygon.exterior()),
        polygon.interiors().iter().map(coords_from_geo).collect(),
    )
}

/// Convert a [`geo::MultiPolygon`] into a 2D MultiPolygon, dropping empty members.
pub fn multi_polygon_from_geo(multi_polygon: &geo::MultiPolygon) -> Result<MultiPolygon> {
    let polygons = multi_polygon
        .iter()
        .map(polygon_from_geo)
        .filter(|polygon| !matches!(polygon, Ok(p) if p.is_empty()))
        .collect::<Result<Vec<_>>>()?;
    MultiPolygon::try_new(polygons)
}

/// Convert a [`geo::MultiLineString`] into a 2D MultiLineString, dropping empty members.
pub fn multi_line_string_from_geo(
    multi_line_string: &geo::MultiLineString,
) -> Result<MultiLineString> {
    let lines = multi_line_string
        .iter()
        .filter(|line| !line.0.is_empty())
        .map(|line| LineString::try_new(coords_from_geo(line)))
        .collect::<Result<Vec<_>>>()?;
    MultiLineString::try_new(lines)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::Dimension;
    use crate::test::point::p_z;
    use crate::test::polygon::square_with_hole;

    #[test]
    fn empty_point_becomes_empty_multipoint() {
        let geom = geometry_to_geo(&Point::empty(Dimension::XY).into());
        assert!(matches!(geom, geo::Geometry::MultiPoint(mp) if mp.0.is_empty()));
    }

    #[test]
    fn z_is_dropped() {
        let geom = geometry_to_geo(&p_z().into());
        assert_eq!(geom, geo::Geometry::Point(geo::Point::new(1., 2.)));
    }

    #[test]
    fn polygon_round_trip() {
        let polygon = square_with_hole();
        let back = polygon_from_geo(&polygon_to_geo(&polygon)).unwrap();
        assert_eq!(back, polygon);
    }
}
