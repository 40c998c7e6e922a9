use byteorder::{BigEndian, LittleEndian};

use crate::error::{GeoKernelError, Result};
use crate::geometry::Geometry;
use crate::io::wkb::common::{Endianness, WkbWriteOptions};
use crate::io::wkb::reader::WkbReader;
use crate::io::wkb::writer::{geometry_wkb_size, output_has_z, WkbWriter};

/// Parse a WKB buffer, ISO or extended, in either byte order.
///
/// An extended-WKB SRID is attached to the returned geometry.
pub fn from_wkb(buf: &[u8]) -> Result<Geometry> {
    WkbReader::new(buf).read_geometry()
}

/// Parse hex-encoded WKB. Either letter case is accepted.
pub fn from_wkb_hex(text: &str) -> Result<Geometry> {
    let buf = hex::decode(text.trim()).map_err(|err| GeoKernelError::Encoding(err.to_string()))?;
    from_wkb(&buf)
}

/// Encode `geom` as WKB.
///
/// ```
/// use geokernel::geometry::{Geometry, Point};
/// use geokernel::io::wkb::{from_wkb, to_wkb, WkbWriteOptions};
///
/// let point: Geometry = Point::new(1., 2.).into();
/// let buf = to_wkb(&point, &WkbWriteOptions::default().with_srid(4326)).unwrap();
/// assert_eq!(from_wkb(&buf).unwrap(), point.with_srid(4326));
/// ```
pub fn to_wkb(geom: &Geometry, options: &WkbWriteOptions) -> Result<Vec<u8>> {
    let srid = match options.srid {
        Some(srid) => Some(srid),
        None if options.include_srid => geom.srid(),
        None => None,
    };
    let z = output_has_z(geom, options.output_dimension)?;
    let dim = if z { 3 } else { 2 };

    let mut out = Vec::with_capacity(geometry_wkb_size(geom, dim, srid));
    match options.byte_order.endianness() {
        Endianness::BigEndian => WkbWriter::<BigEndian>::new(
            Endianness::BigEndian,
            options.flavor,
            z,
        )
        .write_geometry(&mut out, geom, srid)?,
        Endianness::LittleEndian => WkbWriter::<LittleEndian>::new(
            Endianness::LittleEndian,
            options.flavor,
            z,
        )
        .write_geometry(&mut out, geom, srid)?,
    }
    Ok(out)
}

/// Encode `geom` as uppercase hex WKB.
pub fn to_wkb_hex(geom: &Geometry, options: &WkbWriteOptions) -> Result<String> {
    Ok(hex::encode_upper(to_wkb(geom, options)?))
}
