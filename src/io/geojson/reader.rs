use geojson::{PointType, Value};

use crate::error::{GeoKernelError, Result};
use crate::geometry::{
    Coord, Dimension, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

fn coord(position: &[f64]) -> Result<Coord> {
    match *position {
        [x, y] => Ok(Coord::new(x, y)),
        [x, y, z] => Ok(Coord::new_z(x, y, z)),
        _ => Err(GeoKernelError::GeoJson(format!(
            "Position must have 2 or 3 elements, got {}",
            position.len()
        ))),
    }
}

fn coords(positions: &[PointType]) -> Result<Vec<Coord>> {
    positions.iter().map(|p| coord(p)).collect()
}

fn point(position: &[f64]) -> Result<Point> {
    if position.is_empty() {
        return Ok(Point::empty(Dimension::XY));
    }
    Ok(Point::from_coord(coord(position)?))
}

fn polygon(rings: &[Vec<PointType>]) -> Result<Polygon> {
    let mut rings = rings
        .iter()
        .map(|ring| LinearRing::try_new(coords(ring)?))
        .collect::<Result<Vec<_>>>()?;
    if rings.is_empty() {
        return Ok(Polygon::empty(Dimension::XY));
    }
    let exterior = rings.remove(0);
    Polygon::try_new(exterior, rings)
}

/// Convert a GeoJSON geometry object.
///
/// Rings must already be closed; construction rules are the same as for any other input.
pub fn from_geojson(geom: &geojson::Geometry) -> Result<Geometry> {
    let geometry = match &geom.value {
        Value::Point(position) => point(position)?.into(),
        Value::LineString(positions) => LineString::try_new(coords(positions)?)?.into(),
        Value::Polygon(rings) => polygon(rings)?.into(),
        Value::MultiPoint(positions) => positions
            .iter()
            .map(|p| point(p))
            .collect::<Result<Vec<_>>>()
            .and_then(MultiPoint::try_new)?
            .into(),
        Value::MultiLineString(lines) => lines
            .iter()
            .map(|line| LineString::try_new(coords(line)?))
            .collect::<Result<Vec<_>>>()
            .and_then(MultiLineString::try_new)?
            .into(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .map(|rings| polygon(rings))
            .collect::<Result<Vec<_>>>()
            .and_then(MultiPolygon::try_new)?
            .into(),
        Value::GeometryCollection(members) => members
            .iter()
            .map(from_geojson)
            .collect::<Result<Vec<_>>>()
            .and_then(GeometryCollection::try_new)?
            .into(),
    };
    Ok(geometry)
}

/// Convert a GeoJSON geometry held as a JSON value.
pub fn from_geojson_value(value: serde_json::Value) -> Result<Geometry> {
    let geom: geojson::Geometry =
        serde_json::from_value(value).map_err(|err| GeoKernelError::GeoJson(err.to_string()))?;
    from_geojson(&geom)
}

/// Parse GeoJSON geometry text.
pub fn from_geojson_str(text: &str) -> Result<Geometry> {
    let geom: geojson::Geometry =
        serde_json::from_str(text).map_err(|err| GeoKernelError::GeoJson(err.to_string()))?;
    from_geojson(&geom)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::geometry::GeometryKind;
    use crate::io::geojson::{to_geojson, to_geojson_string};
    use crate::test::multilinestring::ml1;
    use crate::test::multipoint::mp0;
    use crate::test::polygon::{square_with_hole, two_squares};

    #[test]
    fn round_trip() {
        let geoms = [
            Geometry::from(mp0()),
            ml1().into(),
            square_with_hole().into(),
            two_squares().into(),
            GeometryCollection::try_new(vec![mp0().into(), square_with_hole().into()])
                .unwrap()
                .into(),
        ];
        for geom in geoms {
            assert_eq!(from_geojson(&to_geojson(&geom)).unwrap(), geom);
            let text = to_geojson_string(&geom).unwrap();
            assert_eq!(from_geojson_str(&text).unwrap(), geom);
        }
    }

    #[test]
    fn empty_hole_rejected() {
        let polygon = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]], []]
        });
        assert!(matches!(
            from_geojson_value(polygon),
            Err(GeoKernelError::Construction(_))
        ));
    }

    #[test]
    fn from_json_values() {
        let geom = from_geojson_value(json!({"type": "Point", "coordinates": [1.0, 2.0, 3.0]}))
            .unwrap();
        assert_eq!(geom, Geometry::from(Point::new_z(1., 2., 3.)));

        let empty = from_geojson_value(json!({"type": "Point", "coordinates": []})).unwrap();
        assert!(empty.is_empty());

        let gc = from_geojson_value(json!({"type": "GeometryCollection", "geometries": []}))
            .unwrap();
        assert_eq!(gc.geom_type(), GeometryKind::GeometryCollection);
        assert!(gc.is_empty());
    }

    #[test]
    fn invalid_input() {
        assert!(matches!(
            from_geojson_value(json!({"type": "Point", "coordinates": [1.0]})),
            Err(GeoKernelError::GeoJson(_))
        ));
        assert!(matches!(
            from_geojson_value(json!({"type": "Circle", "coordinates": [1.0, 2.0]})),
            Err(GeoKernelError::GeoJson(_))
        ));
        assert!(matches!(
            from_geojson_str("not json"),
            Err(GeoKernelError::GeoJson(_))
        ));
        assert!(matches!(
            from_geojson_value(json!({
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]
            })),
            Err(GeoKernelError::Construction(_))
        ));
    }
}
