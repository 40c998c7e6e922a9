use std::io::Write;
use std::marker::PhantomData;

use byteorder::WriteBytesExt;

use crate::error::{GeoKernelError, Result};
use crate::geometry::{
    Coord, Dimension, Geometry, GeometryType, LineString, LinearRing, Point, Polygon,
};
use crate::io::wkb::common::{
    Endianness, WKBType, WkbFlavor, EWKB_SRID_FLAG, EWKB_Z_FLAG, ISO_Z_OFFSET,
};

/// The byte length of a WKB header: byte order, type code and optional SRID.
fn header_wkb_size(srid: Option<i32>) -> usize {
    1 + 4 + if srid.is_some() { 4 } else { 0 }
}

/// The byte length of `geom` encoded as WKB with `dim` ordinates per coordinate.
pub fn geometry_wkb_size(geom: &Geometry, dim: usize, srid: Option<i32>) -> usize {
    let coords = |n: usize| 4 + n * dim * 8;
    let body = match geom.as_type() {
        GeometryType::Point(_) => dim * 8,
        GeometryType::LineString(g) => coords(g.num_coords()),
        GeometryType::LinearRing(g) => coords(g.num_coords()),
        GeometryType::Polygon(g) => polygon_body_size(g, dim),
        GeometryType::MultiPoint(g) => 4 + g.len() * (header_wkb_size(None) + dim * 8),
        GeometryType::MultiLineString(g) => {
            4 + g
                .lines()
                .iter()
                .map(|line| header_wkb_size(None) + coords(line.num_coords()))
                .sum::<usize>()
        }
        GeometryType::MultiPolygon(g) => {
            4 + g
                .polygons()
                .iter()
                .map(|polygon| header_wkb_size(None) + polygon_body_size(polygon, dim))
                .sum::<usize>()
        }
        GeometryType::GeometryCollection(g) => {
            4 + g
                .geoms()
                .iter()
                .map(|child| geometry_wkb_size(child, dim, None))
                .sum::<usize>()
        }
    };
    header_wkb_size(srid) + body
}

fn polygon_body_size(polygon: &Polygon, dim: usize) -> usize {
    4 + polygon
        .rings()
        .iter()
        .map(|ring| 4 + ring.num_coords() * dim * 8)
        .sum::<usize>()
}

/// Writes geometries as WKB in the byte order `B`.
pub(crate) struct WkbWriter<B> {
    endianness: Endianness,
    flavor: WkbFlavor,
    z: bool,
    _order: PhantomData<B>,
}

impl<B: byteorder::ByteOrder> WkbWriter<B> {
    pub fn new(endianness: Endianness, flavor: WkbFlavor, z: bool) -> Self {
        Self {
            endianness,
            flavor,
            z,
            _order: PhantomData,
        }
    }

    pub fn dim(&self) -> usize {
        if self.z {
            3
        } else {
            2
        }
    }

    fn type_code(&self, wkb_type: WKBType, has_srid: bool) -> u32 {
        let base: u32 = wkb_type.into();
        match self.flavor {
            WkbFlavor::Iso if self.z => base + ISO_Z_OFFSET,
            WkbFlavor::Iso => base,
            WkbFlavor::Extended => {
                let mut code = base;
                if self.z {
                    code |= EWKB_Z_FLAG;
                }
                if has_srid {
                    code |= EWKB_SRID_FLAG;
                }
                code
            }
        }
    }

    fn write_header<W: Write>(
        &self,
        writer: &mut W,
        wkb_type: WKBType,
        srid: Option<i32>,
    ) -> Result<()> {
        let srid = srid.filter(|_| self.flavor == WkbFlavor::Extended);
        writer.write_u8(self.endianness.into())?;
        writer.write_u32::<B>(self.type_code(wkb_type, srid.is_some()))?;
        if let Some(srid) = srid {
            writer.write_i32::<B>(srid)?;
        }
        Ok(())
    }

    fn write_count<W: Write>(&self, writer: &mut W, count: usize) -> Result<()> {
        let count = u32::try_from(count).map_err(|_| {
            GeoKernelError::Encoding(format!("{count} elements do not fit a WKB count"))
        })?;
        writer.write_u32::<B>(count)?;
        Ok(())
    }

    fn write_coord<W: Write>(&self, writer: &mut W, coord: &Coord) -> Result<()> {
        writer.write_f64::<B>(coord.x)?;
        writer.write_f64::<B>(coord.y)?;
        if self.z {
            writer.write_f64::<B>(coord.z.unwrap_or(f64::NAN))?;
        }
        Ok(())
    }

    fn write_coords<W: Write>(&self, writer: &mut W, coords: &[Coord]) -> Result<()> {
        self.write_count(writer, coords.len())?;
        for coord in coords {
            self.write_coord(writer, coord)?;
        }
        Ok(())
    }

    fn write_point<W: Write>(
        &self,
        writer: &mut W,
        point: &Point,
        srid: Option<i32>,
    ) -> Result<()> {
        self.write_header(writer, WKBType::Point, srid)?;
        // Empty points have no WKB form of their own: NaN ordinates mark them.
        let coord = point
            .coord()
            .unwrap_or_else(|| Coord::new_z(f64::NAN, f64::NAN, f64::NAN));
        self.write_coord(writer, &coord)
    }

    fn write_line_string<W: Write>(
        &self,
        writer: &mut W,
        line: &LineString,
        srid: Option<i32>,
    ) -> Result<()> {
        self.write_header(writer, WKBType::LineString, srid)?;
        self.write_coords(writer, line.coords())
    }

    fn write_rings<W: Write>(&self, writer: &mut W, rings: &[LinearRing]) -> Result<()> {
        self.write_count(writer, rings.len())?;
        for ring in rings {
            self.write_coords(writer, ring.coords())?;
        }
        Ok(())
    }

    fn write_polygon<W: Write>(
        &self,
        writer: &mut W,
        polygon: &Polygon,
        srid: Option<i32>,
    ) -> Result<()> {
        self.write_header(writer, WKBType::Polygon, srid)?;
        self.write_rings(writer, polygon.rings())
    }

    /// Write `geom`, with `srid` in its header when given. Members never carry an SRID.
    pub fn write_geometry<W: Write>(
        &self,
        writer: &mut W,
        geom: &Geometry,
        srid: Option<i32>,
    ) -> Result<()> {
        match geom.as_type() {
            GeometryType::Point(g) => self.write_point(writer, g, srid),
            GeometryType::LineString(g) => self.write_line_string(writer, g, srid),
            GeometryType::LinearRing(g) => {
                self.write_line_string(writer, g.as_line_string(), srid)
            }
            GeometryType::Polygon(g) => self.write_polygon(writer, g, srid),
            GeometryType::MultiPoint(g) => {
                self.write_header(writer, WKBType::MultiPoint, srid)?;
                self.write_count(writer, g.len())?;
                for point in g.points() {
                    self.write_point(writer, point, None)?;
                }
                Ok(())
            }
            GeometryType::MultiLineString(g) => {
                self.write_header(writer, WKBType::MultiLineString, srid)?;
                self.write_count(writer, g.len())?;
                for line in g.lines() {
                    self.write_line_string(writer, line, None)?;
                }
                Ok(())
            }
            GeometryType::MultiPolygon(g) => {
                self.write_header(writer, WKBType::MultiPolygon, srid)?;
                self.write_count(writer, g.len())?;
                for polygon in g.polygons() {
                    self.write_polygon(writer, polygon, None)?;
                }
                Ok(())
            }
            GeometryType::GeometryCollection(g) => {
                self.write_header(writer, WKBType::GeometryCollection, srid)?;
                self.write_count(writer, g.len())?;
                for child in g.geoms() {
                    self.write_geometry(writer, child, None)?;
                }
                Ok(())
            }
        }
    }
}

/// Whether output should carry z ordinates for `geom` under the requested output dimension.
pub(crate) fn output_has_z(geom: &Geometry, output_dimension: u8) -> Result<bool> {
    match output_dimension {
        2 => Ok(false),
        3 => Ok(geom.dimension() == Dimension::XYZ),
        other => Err(GeoKernelError::OperationNotSupported(format!(
            "Output dimension must be 2 or 3, got {other}"
        ))),
    }
}

#[cfg(test)]
mod test {
    use byteorder::{BigEndian, LittleEndian};

    use super::*;
    use crate::test::linestring::ls0;
    use crate::test::point::{p0, p_z};
    use crate::test::polygon::square_with_hole;

    fn write<B: byteorder::ByteOrder>(
        geom: &Geometry,
        endianness: Endianness,
        flavor: WkbFlavor,
        srid: Option<i32>,
    ) -> Vec<u8> {
        let z = geom.dimension() == Dimension::XYZ;
        let writer = WkbWriter::<B>::new(endianness, flavor, z);
        let mut out = Vec::with_capacity(geometry_wkb_size(geom, writer.dim(), srid));
        writer.write_geometry(&mut out, geom, srid).unwrap();
        out
    }

    #[test]
    fn point_layout() {
        let out = write::<LittleEndian>(
            &p0().into(),
            Endianness::LittleEndian,
            WkbFlavor::Extended,
            None,
        );
        let mut expected = vec![1, 1, 0, 0, 0];
        expected.extend(0f64.to_le_bytes());
        expected.extend(1f64.to_le_bytes());
        assert_eq!(out, expected);
    }

    #[test]
    fn z_and_srid_flags() {
        let geom: Geometry = p_z().into();
        let out = write::<BigEndian>(
            &geom,
            Endianness::BigEndian,
            WkbFlavor::Extended,
            Some(4326),
        );
        assert_eq!(out[0], 0);
        assert_eq!(&out[1..5], &0xA000_0001u32.to_be_bytes());
        assert_eq!(&out[5..9], &4326i32.to_be_bytes());
        assert_eq!(out.len(), geometry_wkb_size(&geom, 3, Some(4326)));

        let iso = write::<LittleEndian>(
            &geom,
            Endianness::LittleEndian,
            WkbFlavor::Iso,
            Some(4326),
        );
        assert_eq!(&iso[1..5], &1001u32.to_le_bytes());
        assert_eq!(iso.len(), geometry_wkb_size(&geom, 3, None));
    }

    #[test]
    fn sizes_match_output() {
        for geom in [Geometry::from(ls0()), square_with_hole().into()] {
            let out =
                write::<LittleEndian>(&geom, Endianness::LittleEndian, WkbFlavor::Extended, None);
            assert_eq!(out.len(), geometry_wkb_size(&geom, 2, None));
        }
    }

    #[test]
    fn empty_point_is_nan() {
        let geom: Geometry = Point::empty(Dimension::XY).into();
        let out =
            write::<LittleEndian>(&geom, Endianness::LittleEndian, WkbFlavor::Extended, None);
        assert_eq!(out.len(), 21);
        assert!(f64::from_le_bytes(out[5..13].try_into().unwrap()).is_nan());
    }

    #[test]
    fn output_dimension() {
        let geom: Geometry = p_z().into();
        assert!(output_has_z(&geom, 3).unwrap());
        assert!(!output_has_z(&geom, 2).unwrap());
        assert!(!output_has_z(&p0().into(), 3).unwrap());
        assert!(output_has_z(&geom, 4).is_err());
    }
}
