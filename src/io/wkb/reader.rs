use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::{GeoKernelError, Result};
use crate::geometry::{
    Coord, Dimension, Geometry, GeometryCollection, GeometryKind, GeometryType, LineString,
    LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use crate::io::wkb::common::{
    Endianness, WKBType, EWKB_M_FLAG, EWKB_SRID_FLAG, EWKB_Z_FLAG, ISO_Z_OFFSET,
};

/// Nested collections deeper than this are rejected.
const MAX_DEPTH: usize = 128;

/// Smallest possible encoding of a collection member: byte order, type code and a count.
const MIN_MEMBER_BYTES: usize = 1 + 4 + 4;

#[derive(Debug, Clone, Copy)]
struct Header {
    endianness: Endianness,
    wkb_type: WKBType,
    dim: Dimension,
    srid: Option<i32>,
}

/// Decodes one WKB geometry, ISO or extended, from a byte buffer.
pub(crate) struct WkbReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> WkbReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(buf),
        }
    }

    fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    fn truncated(&self) -> GeoKernelError {
        GeoKernelError::Parse(format!(
            "Unexpected end of WKB at byte {}",
            self.position()
        ))
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.cursor.read_u8().map_err(|_| self.truncated())
    }

    fn read_u32(&mut self, endianness: Endianness) -> Result<u32> {
        let value = match endianness {
            Endianness::BigEndian => self.cursor.read_u32::<BigEndian>(),
            Endianness::LittleEndian => self.cursor.read_u32::<LittleEndian>(),
        };
        value.map_err(|_| self.truncated())
    }

    fn read_i32(&mut self, endianness: Endianness) -> Result<i32> {
        let value = match endianness {
            Endianness::BigEndian => self.cursor.read_i32::<BigEndian>(),
            Endianness::LittleEndian => self.cursor.read_i32::<LittleEndian>(),
        };
        value.map_err(|_| self.truncated())
    }

    fn read_f64(&mut self, endianness: Endianness) -> Result<f64> {
        let value = match endianness {
            Endianness::BigEndian => self.cursor.read_f64::<BigEndian>(),
            Endianness::LittleEndian => self.cursor.read_f64::<LittleEndian>(),
        };
        value.map_err(|_| self.truncated())
    }

    fn read_header(&mut self) -> Result<Header> {
        let start = self.position();
        let order = self.read_u8()?;
        let endianness = Endianness::try_from(order).map_err(|other| {
            GeoKernelError::Parse(format!("Invalid byte order {other} at byte {start}"))
        })?;
        let raw = self.read_u32(endianness)?;

        if raw & EWKB_M_FLAG != 0 {
            return Err(GeoKernelError::Parse(format!(
                "Measured geometries are not supported (type {raw:#x} at byte {start})"
            )));
        }
        let code = raw & !(EWKB_Z_FLAG | EWKB_M_FLAG | EWKB_SRID_FLAG);
        let has_z = match code / ISO_Z_OFFSET {
            0 => raw & EWKB_Z_FLAG != 0,
            1 => true,
            2 | 3 => {
                return Err(GeoKernelError::Parse(format!(
                    "Measured geometries are not supported (type {code} at byte {start})"
                )))
            }
            _ => {
                return Err(GeoKernelError::Parse(format!(
                    "Unknown WKB type {raw} at byte {start}"
                )))
            }
        };
        let wkb_type = WKBType::try_from(code % ISO_Z_OFFSET).map_err(|_| {
            GeoKernelError::Parse(format!("Unknown WKB type {raw} at byte {start}"))
        })?;
        let srid = if raw & EWKB_SRID_FLAG != 0 {
            Some(self.read_i32(endianness)?)
        } else {
            None
        };

        Ok(Header {
            endianness,
            wkb_type,
            dim: if has_z { Dimension::XYZ } else { Dimension::XY },
            srid,
        })
    }

    /// Read an element count and check the buffer can hold that many elements.
    fn read_count(&mut self, endianness: Endianness, min_item_bytes: usize) -> Result<usize> {
        let start = self.position();
        let count = self.read_u32(endianness)? as usize;
        if count.saturating_mul(min_item_bytes) > self.remaining() {
            return Err(GeoKernelError::Parse(format!(
                "{count} elements declared at byte {start} exceed the remaining {} bytes",
                self.remaining()
            )));
        }
        Ok(count)
    }

    fn read_coord(&mut self, endianness: Endianness, dim: Dimension) -> Result<Coord> {
        let x = self.read_f64(endianness)?;
        let y = self.read_f64(endianness)?;
        match dim {
            Dimension::XY => Ok(Coord::new(x, y)),
            Dimension::XYZ => Ok(Coord::new_z(x, y, self.read_f64(endianness)?)),
        }
    }

    fn read_coords(&mut self, endianness: Endianness, dim: Dimension) -> Result<Vec<Coord>> {
        let count = self.read_count(endianness, dim.size() * 8)?;
        (0..count)
            .map(|_| self.read_coord(endianness, dim))
            .collect()
    }

    fn read_point(&mut self, header: &Header) -> Result<Point> {
        let coord = self.read_coord(header.endianness, header.dim)?;
        if coord.x.is_nan() && coord.y.is_nan() {
            Ok(Point::empty(header.dim))
        } else {
            Ok(Point::from_coord(coord))
        }
    }

    fn read_line_string(&mut self, header: &Header) -> Result<LineString> {
        let coords = self.read_coords(header.endianness, header.dim)?;
        LineString::try_new_with_dim(coords, header.dim)
    }

    fn read_polygon(&mut self, header: &Header) -> Result<Polygon> {
        let num_rings = self.read_count(header.endianness, 4)?;
        let mut rings = (0..num_rings)
            .map(|_| {
                let coords = self.read_coords(header.endianness, header.dim)?;
                LinearRing::try_new_with_dim(coords, header.dim)
            })
            .collect::<Result<Vec<_>>>()?;
        if rings.is_empty() {
            return Ok(Polygon::empty(header.dim));
        }
        let exterior = rings.remove(0);
        Polygon::try_new(exterior, rings)
    }

    fn read_members(&mut self, header: &Header, depth: usize) -> Result<Vec<Geometry>> {
        let count = self.read_count(header.endianness, MIN_MEMBER_BYTES)?;
        let mut members = Vec::with_capacity(count);
        for _ in 0..count {
            let start = self.position();
            let member = self.read_geometry_at_depth(depth + 1)?;
            if member.dimension() != header.dim {
                return Err(GeoKernelError::Parse(format!(
                    "{} member at byte {start} has dimension {} but its parent is {}",
                    GeometryKind::from(header.wkb_type),
                    member.dimension(),
                    header.dim
                )));
            }
            members.push(member);
        }
        Ok(members)
    }

    /// Read members that must all be of the kind `expected`, unwrapping each with `unwrap`.
    fn read_typed_members<T>(
        &mut self,
        header: &Header,
        depth: usize,
        expected: GeometryKind,
        unwrap: impl Fn(GeometryType) -> Option<T>,
    ) -> Result<Vec<T>> {
        self.read_members(header, depth)?
            .into_iter()
            .map(|member| {
                let kind = member.geom_type();
                unwrap(member.into_inner()).ok_or_else(|| {
                    GeoKernelError::Parse(format!(
                        "{} member must be a {expected}, got {kind}",
                        GeometryKind::from(header.wkb_type)
                    ))
                })
            })
            .collect()
    }

    fn read_geometry_at_depth(&mut self, depth: usize) -> Result<Geometry> {
        if depth > MAX_DEPTH {
            return Err(GeoKernelError::Parse(format!(
                "WKB nesting deeper than {MAX_DEPTH} at byte {}",
                self.position()
            )));
        }
        let header = self.read_header()?;
        let geometry: Geometry = match header.wkb_type {
            WKBType::Point => self.read_point(&header)?.into(),
            WKBType::LineString => self.read_line_string(&header)?.into(),
            WKBType::Polygon => self.read_polygon(&header)?.into(),
            WKBType::MultiPoint => {
                let points = self.read_typed_members(
                    &header,
                    depth,
                    GeometryKind::Point,
                    |g| match g {
                        GeometryType::Point(p) => Some(p),
                        _ => None,
                    },
                )?;
                MultiPoint::try_new_with_dim(points, header.dim)?.into()
            }
            WKBType::MultiLineString => {
                let lines = self.read_typed_members(
                    &header,
                    depth,
                    GeometryKind::LineString,
                    |g| match g {
                        GeometryType::LineString(l) => Some(l),
                        _ => None,
                    },
                )?;
                MultiLineString::try_new_with_dim(lines, header.dim)?.into()
            }
            WKBType::MultiPolygon => {
                let polygons = self.read_typed_members(
                    &header,
                    depth,
                    GeometryKind::Polygon,
                    |g| match g {
                        GeometryType::Polygon(p) => Some(p),
                        _ => None,
                    },
                )?;
                MultiPolygon::try_new_with_dim(polygons, header.dim)?.into()
            }
            WKBType::GeometryCollection => {
                let members = self.read_members(&header, depth)?;
                GeometryCollection::try_new_with_dim(members, header.dim)?.into()
            }
        };
        Ok(match header.srid {
            Some(srid) if depth == 0 => geometry.with_srid(srid),
            _ => geometry,
        })
    }

    /// Read one geometry and require that it spans the whole buffer.
    pub fn read_geometry(mut self) -> Result<Geometry> {
        let geometry = self.read_geometry_at_depth(0)?;
        if self.remaining() > 0 {
            return Err(GeoKernelError::Parse(format!(
                "{} trailing bytes after WKB geometry at byte {}",
                self.remaining(),
                self.position()
            )));
        }
        Ok(geometry)
    }
}

impl From<WKBType> for GeometryKind {
    fn from(value: WKBType) -> Self {
        match value {
            WKBType::Point => GeometryKind::Point,
            WKBType::LineString => GeometryKind::LineString,
            WKBType::Polygon => GeometryKind::Polygon,
            WKBType::MultiPoint => GeometryKind::MultiPoint,
            WKBType::MultiLineString => GeometryKind::MultiLineString,
            WKBType::MultiPolygon => GeometryKind::MultiPolygon,
            WKBType::GeometryCollection => GeometryKind::GeometryCollection,
        }
    }
}
