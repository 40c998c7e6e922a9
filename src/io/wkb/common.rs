use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::geometry::GeometryKind;

/// Base WKB geometry type codes, without dimension or SRID flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum WKBType {
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
}

impl From<GeometryKind> for WKBType {
    /// WKB has no ring type, rings are written as line strings.
    fn from(value: GeometryKind) -> Self {
        match value {
            GeometryKind::Point => WKBType::Point,
            GeometryKind::LineString | GeometryKind::LinearRing => WKBType::LineString,
            GeometryKind::Polygon => WKBType::Polygon,
            GeometryKind::MultiPoint => WKBType::MultiPoint,
            GeometryKind::MultiLineString => WKBType::MultiLineString,
            GeometryKind::MultiPolygon => WKBType::MultiPolygon,
            GeometryKind::GeometryCollection => WKBType::GeometryCollection,
        }
    }
}

/// Extended WKB flag for a z ordinate.
pub(crate) const EWKB_Z_FLAG: u32 = 0x8000_0000;
/// Extended WKB flag for an m ordinate.
pub(crate) const EWKB_M_FLAG: u32 = 0x4000_0000;
/// Extended WKB flag for an SRID following the type code.
pub(crate) const EWKB_SRID_FLAG: u32 = 0x2000_0000;
/// ISO WKB offset added to the base code for z geometries.
pub(crate) const ISO_Z_OFFSET: u32 = 1000;

/// The byte order marker that starts every WKB geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endianness {
    BigEndian,
    LittleEndian,
}

impl TryFrom<u8> for Endianness {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Endianness::BigEndian),
            1 => Ok(Endianness::LittleEndian),
            other => Err(other),
        }
    }
}

impl From<Endianness> for u8 {
    fn from(value: Endianness) -> Self {
        match value {
            Endianness::BigEndian => 0,
            Endianness::LittleEndian => 1,
        }
    }
}

/// Requested byte order of written WKB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// The byte order of the host.
    #[default]
    Native,
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    pub fn endianness(&self) -> Endianness {
        match self {
            ByteOrder::BigEndian => Endianness::BigEndian,
            ByteOrder::LittleEndian => Endianness::LittleEndian,
            ByteOrder::Native if cfg!(target_endian = "big") => Endianness::BigEndian,
            ByteOrder::Native => Endianness::LittleEndian,
        }
    }
}

/// How dimension and SRID are encoded in the type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WkbFlavor {
    /// PostGIS extended WKB: high-bit flags for z and SRID.
    #[default]
    Extended,
    /// ISO SQL/MM: z adds 1000 to the type code. Never carries an SRID.
    Iso,
}

/// Options for [`to_wkb`](crate::io::wkb::to_wkb).
///
/// ```
/// use geokernel::io::wkb::{ByteOrder, WkbWriteOptions};
///
/// let options = WkbWriteOptions::default()
///     .with_byte_order(ByteOrder::BigEndian)
///     .with_srid(4326);
/// assert!(options.include_srid);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WkbWriteOptions {
    pub byte_order: ByteOrder,
    pub flavor: WkbFlavor,
    /// Write the geometry's SRID when it has one.
    pub include_srid: bool,
    /// Tag the output with this SRID. Implies `include_srid`.
    pub srid: Option<i32>,
    /// 2 drops z ordinates; 3 keeps them when present.
    pub output_dimension: u8,
}

impl Default for WkbWriteOptions {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Native,
            flavor: WkbFlavor::Extended,
            include_srid: false,
            srid: None,
            output_dimension: 3,
        }
    }
}

impl WkbWriteOptions {
    pub fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }

    pub fn with_flavor(self, flavor: WkbFlavor) -> Self {
        Self { flavor, ..self }
    }

    pub fn with_include_srid(self, include_srid: bool) -> Self {
        Self {
            include_srid,
            ..self
        }
    }

    pub fn with_srid(self, srid: i32) -> Self {
        Self {
            srid: Some(srid),
            include_srid: true,
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
