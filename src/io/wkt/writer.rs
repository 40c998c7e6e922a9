use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Coord, Dimension, Geometry, GeometryType, LinearRing, Polygon};

/// Options for [`to_wkt`].
///
/// Options only affect how numbers are rendered, never what is parsed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WktWriteOptions {
    /// Strip trailing zeros after the decimal point.
    pub trim: bool,
    /// Fixed number of decimals, or -1 for the shortest text that parses back exactly.
    pub rounding_precision: i32,
    /// Values below 3 drop z ordinates.
    pub output_dimension: u8,
}

impl Default for WktWriteOptions {
    fn default() -> Self {
        Self {
            trim: false,
            rounding_precision: -1,
            output_dimension: 3,
        }
    }
}

impl WktWriteOptions {
    pub fn with_trim(self, trim: bool) -> Self {
        Self { trim, ..self }
    }

    pub fn with_rounding_precision(self, rounding_precision: i32) -> Self {
        Self {
            rounding_precision,
            ..self
        }
    }

    pub fn with_output_dimension(self, output_dimension: u8) -> Self {
        Self {
            output_dimension,
            ..self
        }
    }
}

fn format_number(value: f64, options: &WktWriteOptions) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let mut text = match usize::try_from(options.rounding_precision) {
        Ok(precision) => format!("{value:.precision$}"),
        Err(_) => value.to_string(),
    };
    if options.trim {
        if text.contains('.') {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
            text.truncate(trimmed);
        }
        if text == "-0" {
            text = "0".to_string();
        }
    } else if options.rounding_precision < 0 && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

struct WktWriter<'a, W: fmt::Write> {
    out: W,
    options: &'a WktWriteOptions,
    z: bool,
}

impl<'a, W: fmt::Write> WktWriter<'a, W> {
    fn tag(&mut self, name: &str, empty: bool) -> fmt::Result {
        self.out.write_str(name)?;
        if self.z {
            self.out.write_str(" Z")?;
        }
        if empty {
            self.out.write_str(" EMPTY")?;
        }
        Ok(())
    }

    fn coord(&mut self, coord: &Coord) -> fmt::Result {
        let x = format_number(coord.x, self.options);
        let y = format_number(coord.y, self.options);
        write!(self.out, "{x} {y}")?;
        if self.z {
            let z = format_number(coord.z.unwrap_or(f64::NAN), self.options);
            write!(self.out, " {z}")?;
        }
        Ok(())
    }

    fn coord_list(&mut self, coords: &[Coord]) -> fmt::Result {
        self.out.write_char('(')?;
        for (idx, coord) in coords.iter().enumerate() {
            if idx > 0 {
                self.out.write_str(", ")?;
            }
            self.coord(coord)?;
        }
        self.out.write_char(')')
    }

    fn ring_list(&mut self, rings: &[LinearRing]) -> fmt::Result {
        self.out.write_char('(')?;
        for (idx, ring) in rings.iter().enumerate() {
            if idx > 0 {
                self.out.write_str(", ")?;
            }
            self.coord_list(ring.coords())?;
        }
        self.out.write_char(')')
    }

    fn polygon_list(&mut self, polygons: &[Polygon]) -> fmt::Result {
        self.out.write_char('(')?;
        for (idx, polygon) in polygons.iter().enumerate() {
            if idx > 0 {
                self.out.write_str(", ")?;
            }
            if polygon.is_empty() {
                self.out.write_str("EMPTY")?;
            } else {
                self.ring_list(polygon.rings())?;
            }
        }
        self.out.write_char(')')
    }

    fn geometry(&mut self, geom: &Geometry) -> fmt::Result {
        let empty = geom.is_empty();
        match geom.as_type() {
            GeometryType::Point(g) => {
                self.tag("POINT", empty)?;
                if let Some(coord) = g.coord() {
                    self.out.write_char(' ')?;
                    self.coord_list(&[coord])?;
                }
            }
            GeometryType::LineString(g) => {
                self.tag("LINESTRING", empty)?;
                if !empty {
                    self.out.write_char(' ')?;
                    self.coord_list(g.coords())?;
                }
            }
            GeometryType::LinearRing(g) => {
                self.tag("LINEARRING", empty)?;
                if !empty {
                    self.out.write_char(' ')?;
                    self.coord_list(g.coords())?;
                }
            }
            GeometryType::Polygon(g) => {
                self.tag("POLYGON", empty)?;
                if !empty {
                    self.out.write_char(' ')?;
                    self.ring_list(g.rings())?;
                }
            }
            GeometryType::MultiPoint(g) => {
                self.tag("MULTIPOINT", empty)?;
                if !empty {
                    self.out.write_str(" (")?;
                    for (idx, point) in g.points().iter().enumerate() {
                        if idx > 0 {
                            self.out.write_str(", ")?;
                        }
                        match point.coord() {
                            Some(coord) => self.coord_list(&[coord])?,
                            None => self.out.write_str("EMPTY")?,
                        }
                    }
                    self.out.write_char(')')?;
                }
            }
            GeometryType::MultiLineString(g) => {
                self.tag("MULTILINESTRING", empty)?;
                if !empty {
                    self.out.write_str(" (")?;
                    for (idx, line) in g.lines().iter().enumerate() {
                        if idx > 0 {
                            self.out.write_str(", ")?;
                        }
                        if line.is_empty() {
                            self.out.write_str("EMPTY")?;
                        } else {
                            self.coord_list(line.coords())?;
                        }
                    }
                    self.out.write_char(')')?;
                }
            }
            GeometryType::MultiPolygon(g) => {
                self.tag("MULTIPOLYGON", empty)?;
                if !empty {
                    self.out.write_char(' ')?;
                    self.polygon_list(g.polygons())?;
                }
            }
            GeometryType::GeometryCollection(g) => {
                // Collections of only empty members still list them.
                self.tag("GEOMETRYCOLLECTION", g.len() == 0)?;
                if g.len() > 0 {
                    self.out.write_str(" (")?;
                    for (idx, child) in g.geoms().iter().enumerate() {
                        if idx > 0 {
                            self.out.write_str(", ")?;
                        }
                        self.geometry(child)?;
                    }
                    self.out.write_char(')')?;
                }
            }
        }
        Ok(())
    }
}

fn write_wkt<W: fmt::Write>(out: W, geom: &Geometry, options: &WktWriteOptions) -> fmt::Result {
    let z = geom.dimension() == Dimension::XYZ && options.output_dimension >= 3;
    WktWriter { out, options, z }.geometry(geom)
}

/// Render `geom` as WKT.
///
/// ```
/// use geokernel::geometry::{Geometry, Point};
/// use geokernel::io::wkt::{to_wkt, WktWriteOptions};
///
/// let point: Geometry = Point::new(1., 2.5).into();
/// assert_eq!(to_wkt(&point, &WktWriteOptions::default()), "POINT (1.0 2.5)");
/// assert_eq!(
///     to_wkt(&point, &WktWriteOptions::default().with_trim(true)),
///     "POINT (1 2.5)"
/// );
/// ```
pub fn to_wkt(geom: &Geometry, options: &WktWriteOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_wkt(&mut out, geom, options);
    out
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncate to max 3 decimal points
        let options = WktWriteOptions::default()
            .with_trim(true)
            .with_rounding_precision(3);
        write!(f, "<")?;
        write_wkt(&mut *f, self, &options)?;
        write!(f, ">")
    }
}
