//! Reading and writing WKT, including the `SRID=<n>;` prefix of extended WKT.

mod reader;
mod writer;

pub use reader::from_wkt;
pub use writer::{to_wkt, WktWriteOptions};
