use geojson::{PointType, Value};

use crate::error::{GeoKernelError, Result};
use crate::geometry::{Coord, Geometry, GeometryType, LinearRing, Polygon};

fn position(coord: &Coord) -> PointType {
    match coord.z {
        Some(z) => vec![coord.x, coord.y, z],
        None => vec![coord.x, coord.y],
    }
}

fn positions(coords: &[Coord]) -> Vec<PointType> {
    coords.iter().map(position).collect()
}

fn rings(rings: &[LinearRing]) -> Vec<Vec<PointType>> {
    rings.iter().map(|ring| positions(ring.coords())).collect()
}

fn polygon(polygon: &Polygon) -> Vec<Vec<PointType>> {
    rings(polygon.rings())
}

fn value(geom: &Geometry) -> Value {
    match geom.as_type() {
        GeometryType::Point(g) => {
            Value::Point(g.coord().as_ref().map(position).unwrap_or_default())
        }
        GeometryType::LineString(g) => Value::LineString(positions(g.coords())),
        // GeoJSON has no ring type.
        GeometryType::LinearRing(g) => Value::LineString(positions(g.coords())),
        GeometryType::Polygon(g) => Value::Polygon(polygon(g)),
        GeometryType::MultiPoint(g) => Value::MultiPoint(
            g.points()
                .iter()
                .filter_map(|point| point.coord().as_ref().map(position))
                .collect(),
        ),
        GeometryType::MultiLineString(g) => Value::MultiLineString(
            g.lines().iter().map(|line| positions(line.coords())).collect(),
        ),
        GeometryType::MultiPolygon(g) => {
            Value::MultiPolygon(g.polygons().iter().map(polygon).collect())
        }
        GeometryType::GeometryCollection(g) => {
            Value::GeometryCollection(g.geoms().iter().map(to_geojson).collect())
        }
    }
}

/// Convert to a GeoJSON geometry object.
pub fn to_geojson(geom: &Geometry) -> geojson::Geometry {
    geojson::Geometry::new(value(geom))
}

/// Convert to a GeoJSON geometry as a JSON value.
pub fn to_geojson_value(geom: &Geometry) -> Result<serde_json::Value> {
    serde_json::to_value(to_geojson(geom))
        .map_err(|err| GeoKernelError::GeoJson(err.to_string()))
}

/// Convert to serialized GeoJSON text.
pub fn to_geojson_string(geom: &Geometry) -> Result<String> {
    serde_json::to_string(&to_geojson(geom))
        .map_err(|err| GeoKernelError::GeoJson(err.to_string()))
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::geometry::{Dimension, GeometryCollection, LinearRing, Point};
    use crate::test::point::p_z;
    use crate::test::polygon::square;

    #[test]
    fn point_values() {
        let out = to_geojson_value(&Point::new(1., 2.).into()).unwrap();
        assert_eq!(out, json!({"type": "Point", "coordinates": [1.0, 2.0]}));

        let out = to_geojson_value(&p_z().into()).unwrap();
        assert_eq!(out, json!({"type": "Point", "coordinates": [1.0, 2.0, 3.0]}));
    }

    #[test]
    fn polygon_value() {
        let out = to_geojson_value(&square().into()).unwrap();
        assert_eq!(
            out,
            json!({
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
            })
        );
    }

    #[test]
    fn empties() {
        let out = to_geojson_value(&Point::empty(Dimension::XY).into()).unwrap();
        assert_eq!(out, json!({"type": "Point", "coordinates": []}));

        let out = to_geojson_value(&GeometryCollection::empty(Dimension::XY).into()).unwrap();
        assert_eq!(out, json!({"type": "GeometryCollection", "geometries": []}));
    }

    #[test]
    fn ring_is_line_string() {
        let ring = LinearRing::closing(crate::test::coords(&[(0., 0.), (1., 0.), (1., 1.)]))
            .unwrap();
        let out = to_geojson(&ring.into());
        assert!(matches!(out.value, Value::LineString(ref coords) if coords.len() == 4));
    }

    #[test]
    fn srid_is_dropped() {
        let geom = Geometry::from(Point::new(1., 2.)).with_srid(4326);
        let text = to_geojson_string(&geom).unwrap();
        assert!(!text.contains("4326"));
    }
}
