//! Reading and writing ISO and extended (PostGIS) WKB.

mod api;
pub(crate) mod common;
pub(crate) mod reader;
pub(crate) mod writer;

pub use api::{from_wkb, from_wkb_hex, to_wkb, to_wkb_hex};
pub use common::{ByteOrder, Endianness, WKBType, WkbFlavor, WkbWriteOptions};
pub use writer::geometry_wkb_size;
