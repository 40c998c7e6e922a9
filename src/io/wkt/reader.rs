use crate::error::{GeoKernelError, Result};
use crate::geometry::{
    Coord, Dimension, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

/// Nested collections deeper than this are rejected.
const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl Keyword {
    fn parse(word: &str) -> Option<Self> {
        let keyword = match word {
            "POINT" => Self::Point,
            "LINESTRING" => Self::LineString,
            "LINEARRING" => Self::LinearRing,
            "POLYGON" => Self::Polygon,
            "MULTIPOINT" => Self::MultiPoint,
            "MULTILINESTRING" => Self::MultiLineString,
            "MULTIPOLYGON" => Self::MultiPolygon,
            "GEOMETRYCOLLECTION" => Self::GeometryCollection,
            _ => return None,
        };
        Some(keyword)
    }
}

/// Recursive descent parser over WKT text.
///
/// All coordinates of one geometry, nested members included, share a single dimension.
struct WktParser<'a> {
    input: &'a [u8],
    pos: usize,
    dim: Option<Dimension>,
}

impl<'a> WktParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            dim: None,
        }
    }

    fn error(&self, message: impl std::fmt::Display) -> GeoKernelError {
        GeoKernelError::Parse(format!("{message} at byte {}", self.pos))
    }

    fn skip_whitespace(&mut self) {
        while self
            .input
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.input.get(self.pos).copied()
    }

    fn consume(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        if self.consume(expected) {
            return Ok(());
        }
        match self.peek() {
            Some(found) => Err(self.error(format!(
                "Expected '{}', found '{}'",
                expected as char, found as char
            ))),
            None => Err(self.error(format!(
                "Expected '{}', found end of input",
                expected as char
            ))),
        }
    }

    /// The next run of ASCII letters, uppercased, without consuming it.
    fn peek_word(&mut self) -> String {
        self.skip_whitespace();
        self.input[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .map(|b| b.to_ascii_uppercase() as char)
            .collect()
    }

    fn word(&mut self) -> String {
        let word = self.peek_word();
        self.pos += word.len();
        word
    }

    fn consume_word(&mut self, expected: &str) -> bool {
        if self.peek_word() == expected {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_whitespace();
        match lexical_core::parse_partial::<f64>(&self.input[self.pos..]) {
            Ok((value, read)) if read > 0 => {
                self.pos += read;
                Ok(value)
            }
            _ => Err(self.error("Expected a number")),
        }
    }

    fn srid(&mut self) -> Result<Option<i32>> {
        if !self.consume_word("SRID") {
            return Ok(None);
        }
        self.expect(b'=')?;
        self.skip_whitespace();
        let (srid, read) = lexical_core::parse_partial::<i32>(&self.input[self.pos..])
            .map_err(|_| self.error("Expected an integer SRID"))?;
        if read == 0 {
            return Err(self.error("Expected an integer SRID"));
        }
        self.pos += read;
        self.expect(b';')?;
        Ok(Some(srid))
    }

    fn set_dim(&mut self, dim: Dimension) -> Result<()> {
        match self.dim {
            Some(existing) if existing != dim => Err(self.error(format!(
                "Mixed coordinate dimensions: found {dim} after {existing}"
            ))),
            _ => {
                self.dim = Some(dim);
                Ok(())
            }
        }
    }

    fn current_dim(&self) -> Dimension {
        self.dim.unwrap_or_default()
    }

    /// The keyword and its dimension tag, written either apart (`POINT Z`) or joined (`POINTZ`).
    fn tagged_keyword(&mut self) -> Result<Keyword> {
        let start = self.pos;
        let word = self.word();
        let (keyword, joined_tag) = match Keyword::parse(&word) {
            Some(keyword) => (keyword, None),
            None => ["ZM", "Z", "M"]
                .into_iter()
                .find_map(|tag| {
                    let name = word.strip_suffix(tag)?;
                    Some((Keyword::parse(name)?, Some(tag)))
                })
                .ok_or_else(|| {
                    GeoKernelError::Parse(format!("Unknown geometry type '{word}' at byte {start}"))
                })?,
        };

        let tag = match joined_tag {
            Some(tag) => Some(tag.to_string()),
            None => match self.peek_word().as_str() {
                "Z" | "M" | "ZM" => Some(self.word()),
                _ => None,
            },
        };
        match tag.as_deref() {
            None => {}
            Some("Z") => self.set_dim(Dimension::XYZ)?,
            Some(_) => return Err(self.error("Measured geometries are not supported")),
        }
        Ok(keyword)
    }

    /// Whether the next token starts a number, the special values `NaN` and `inf` included.
    fn at_number(&mut self) -> bool {
        match self.peek() {
            Some(b) if b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.') => true,
            Some(b) if b.is_ascii_alphabetic() => {
                matches!(self.peek_word().as_str(), "NAN" | "INF" | "INFINITY")
            }
            _ => false,
        }
    }

    fn coord(&mut self) -> Result<Coord> {
        let x = self.number()?;
        let y = self.number()?;
        let coord = if self.at_number() {
            Coord::new_z(x, y, self.number()?)
        } else {
            Coord::new(x, y)
        };
        if self.at_number() {
            return Err(self.error("Measured coordinates are not supported"));
        }
        self.set_dim(coord.dimension())?;
        Ok(coord)
    }

    /// A parenthesized, comma-separated list of items parsed by `item`.
    fn list<T>(&mut self, mut item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        self.expect(b'(')?;
        let mut items = vec![item(self)?];
        while self.consume(b',') {
            items.push(item(self)?);
        }
        self.expect(b')')?;
        Ok(items)
    }

    fn is_empty_body(&mut self) -> bool {
        self.consume_word("EMPTY")
    }

    fn coord_list(&mut self) -> Result<Vec<Coord>> {
        self.list(Self::coord)
    }

    fn line_string_body(&mut self) -> Result<LineString> {
        if self.is_empty_body() {
            return Ok(LineString::empty(self.current_dim()));
        }
        let coords = self.coord_list()?;
        LineString::try_new_with_dim(coords, self.current_dim())
    }

    fn ring(&mut self) -> Result<LinearRing> {
        if self.is_empty_body() {
            return Ok(LinearRing::empty(self.current_dim()));
        }
        let coords = self.coord_list()?;
        LinearRing::try_new_with_dim(coords, self.current_dim())
    }

    fn polygon_body(&mut self) -> Result<Polygon> {
        if self.is_empty_body() {
            return Ok(Polygon::empty(self.current_dim()));
        }
        let mut rings = self.list(Self::ring)?;
        let exterior = rings.remove(0);
        Polygon::try_new(exterior, rings)
    }

    fn point_body(&mut self) -> Result<Point> {
        if self.is_empty_body() {
            return Ok(Point::empty(self.current_dim()));
        }
        self.expect(b'(')?;
        let coord = self.coord()?;
        self.expect(b')')?;
        Ok(Point::from_coord(coord))
    }

    /// A multipoint member, with or without its own parentheses.
    fn multi_point_member(&mut self) -> Result<Point> {
        if self.peek() == Some(b'(') || self.peek_word() == "EMPTY" {
            self.point_body()
        } else {
            Ok(Point::from_coord(self.coord()?))
        }
    }

    fn geometry(&mut self, depth: usize) -> Result<Geometry> {
        if depth > MAX_DEPTH {
            return Err(self.error(format!("WKT nesting deeper than {MAX_DEPTH}")));
        }
        let keyword = self.tagged_keyword()?;
        let geometry: Geometry = match keyword {
            Keyword::Point => self.point_body()?.into(),
            Keyword::LineString => self.line_string_body()?.into(),
            Keyword::LinearRing => self.ring()?.into(),
            Keyword::Polygon => self.polygon_body()?.into(),
            Keyword::MultiPoint => {
                if self.is_empty_body() {
                    MultiPoint::empty(self.current_dim()).into()
                } else {
                    let points = self.list(Self::multi_point_member)?;
                    MultiPoint::try_new_with_dim(points, self.current_dim())?.into()
                }
            }
            Keyword::MultiLineString => {
                if self.is_empty_body() {
                    MultiLineString::empty(self.current_dim()).into()
                } else {
                    let lines = self.list(Self::line_string_body)?;
                    MultiLineString::try_new_with_dim(lines, self.current_dim())?.into()
                }
            }
            Keyword::MultiPolygon => {
                if self.is_empty_body() {
                    MultiPolygon::empty(self.current_dim()).into()
                } else {
                    let polygons = self.list(Self::polygon_body)?;
                    MultiPolygon::try_new_with_dim(polygons, self.current_dim())?.into()
                }
            }
            Keyword::GeometryCollection => {
                if self.is_empty_body() {
                    GeometryCollection::empty(self.current_dim()).into()
                } else {
                    let members = self.list(|parser| parser.geometry(depth + 1))?;
                    GeometryCollection::try_new_with_dim(members, self.current_dim())?.into()
                }
            }
        };
        Ok(geometry)
    }

    fn parse(mut self) -> Result<Geometry> {
        let srid = self.srid()?;
        let geometry = self.geometry(0)?;
        if self.peek().is_some() {
            return Err(self.error("Unexpected trailing input"));
        }
        Ok(match srid {
            Some(srid) => geometry.with_srid(srid),
            None => geometry,
        })
    }
}

/// Parse WKT, optionally prefixed with `SRID=<n>;` as in extended WKT.
///
/// Keywords are case-insensitive. Measured (`M`/`ZM`) input is rejected.
///
/// ```
/// use geokernel::io::wkt::from_wkt;
///
/// let geom = from_wkt("SRID=4326;POINT Z (1 2 3)").unwrap();
/// assert_eq!(geom.srid(), Some(4326));
/// assert_eq!(geom.coord_dim(), 3);
/// ```
pub fn from_wkt(wkt: &str) -> Result<Geometry> {
    WktParser::new(wkt).parse()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{GeometryKind, GeometryType};
    use crate::io::wkt::{to_wkt, WktWriteOptions};
    use crate::test::linestring::ls1;
    use crate::test::multilinestring::ml1;
    use crate::test::multipoint::mp1;
    use crate::test::point::{p1, p2};
    use crate::test::polygon::{square_with_hole, two_squares};

    #[test]
    fn parse_kinds() {
        assert_eq!(
            from_wkt("POINT (1 2)").unwrap(),
            Geometry::from(Point::new(1., 2.))
        );
        assert_eq!(
            from_wkt("point z(1 2 3)").unwrap(),
            Geometry::from(Point::new_z(1., 2., 3.))
        );
        assert_eq!(
            from_wkt("POINTZ (1 2 3)").unwrap(),
            Geometry::from(Point::new_z(1., 2., 3.))
        );
        assert_eq!(
            from_wkt(
                "POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0), \
                 (0.25 0.25, 0.25 0.5, 0.5 0.5, 0.5 0.25, 0.25 0.25))"
            )
            .unwrap(),
            Geometry::from(square_with_hole())
        );
        let ring = from_wkt("LINEARRING (0 0, 1 0, 1 1, 0 0)").unwrap();
        assert_eq!(ring.geom_type(), GeometryKind::LinearRing);
    }

    #[test]
    fn multipoint_forms() {
        let points = vec![Point::new(0., 1.), Point::new(1., 2.)];
        let expected = Geometry::from(MultiPoint::try_new(points).unwrap());
        assert_eq!(from_wkt("MULTIPOINT ((0 1), (1 2))").unwrap(), expected);
        assert_eq!(from_wkt("MULTIPOINT (0 1, 1 2)").unwrap(), expected);
    }

    #[test]
    fn empties() {
        let point = from_wkt("POINT EMPTY").unwrap();
        assert!(point.is_empty());
        assert_eq!(point.geom_type(), GeometryKind::Point);

        let line = from_wkt("LINESTRING Z EMPTY").unwrap();
        assert_eq!(line.dimension(), Dimension::XYZ);

        let gc = from_wkt("GEOMETRYCOLLECTION (POINT EMPTY, POINT (1 1))").unwrap();
        assert_eq!(gc.num_geometries(), 2);
        assert!(from_wkt("GEOMETRYCOLLECTION EMPTY").unwrap().is_empty());
    }

    #[test]
    fn srid_prefix() {
        let geom = from_wkt("srid=3857; LINESTRING (0 0, 1 1)").unwrap();
        assert_eq!(geom.srid(), Some(3857));
        assert_eq!(geom.geom_type(), GeometryKind::LineString);
        assert!(from_wkt("SRID=abc;POINT (1 2)").is_err());
    }

    #[test]
    fn round_trip_full_precision() {
        let options = WktWriteOptions::default();
        let geoms = [
            Geometry::from(ml1()),
            two_squares().into(),
            Point::new(0.1 + 0.2, 1. / 3.).into(),
            Point::new_z(-1e-7, 12345.678, 1e300).into(),
            GeometryCollection::try_new(vec![p1().into(), p2().into(), ls1().into(), mp1().into()])
                .unwrap()
                .into(),
        ];
        for geom in geoms {
            let text = to_wkt(&geom, &options);
            assert_eq!(from_wkt(&text).unwrap(), geom, "{text}");
        }
    }

    #[test]
    fn special_ordinates() {
        let point = from_wkt("POINT Z (1 2 NaN)").unwrap();
        assert_eq!(point.dimension(), Dimension::XYZ);
        let GeometryType::Point(point) = point.as_type() else {
            panic!("expected a point");
        };
        assert!(point.coord().unwrap().z.unwrap().is_nan());

        let line = from_wkt("LINESTRING Z (0 0 inf, 1 1 -inf)").unwrap();
        assert_eq!(line.dimension(), Dimension::XYZ);
        assert!(from_wkt("POINT (1 2 3 nan)").is_err());
    }

    #[test]
    fn empty_hole_rejected() {
        assert!(matches!(
            from_wkt("POLYGON ((0 0, 1 0, 1 1, 0 0), EMPTY)"),
            Err(GeoKernelError::Construction(_))
        ));
    }

    #[test]
    fn errors_report_offsets() {
        let err = from_wkt("POINT (1 2").unwrap_err();
        assert!(matches!(err, GeoKernelError::Parse(_)));
        assert!(err.to_string().contains("at byte 10"), "{err}");

        let err = from_wkt("CIRCLE (1 2)").unwrap_err();
        assert!(err.to_string().contains("CIRCLE"));

        assert!(from_wkt("POINT (1 2) x").unwrap_err().to_string().contains("trailing"));
        assert!(from_wkt("POINT M (1 2 3)").is_err());
        assert!(from_wkt("POINT (1 2 3 4)").is_err());
        assert!(from_wkt("LINESTRING (0 0, 1 1 1)").is_err());
        assert!(from_wkt("POINT (a b)").is_err());
        assert!(from_wkt("").is_err());
    }

    #[test]
    fn construction_errors_propagate() {
        assert!(matches!(
            from_wkt("LINEARRING (0 0, 1 0, 1 1)"),
            Err(GeoKernelError::Construction(_))
        ));
        assert!(matches!(
            from_wkt("LINESTRING (0 0)"),
            Err(GeoKernelError::Construction(_))
        ));
    }
}
