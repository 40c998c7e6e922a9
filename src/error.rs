//! Defines [`GeoKernelError`], representing all errors returned by this crate.

use arrow_schema::ArrowError;
use thiserror::Error;

use crate::geometry::GeometryKind;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoKernelError {
    /// [ArrowError]
    #[error(transparent)]
    Arrow(#[from] ArrowError),

    /// Malformed input coordinates or rings.
    #[error("Invalid geometry: {0}")]
    Construction(String),

    /// A multi geometry was given an empty member.
    #[error("Can't create {0} with empty component")]
    EmptyPart(GeometryKind),

    /// Bad hex or text encoding of a binary payload.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// GeoJSON mapping error
    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Predicate or measurement not defined for the operand kind.
    ///
    /// The message carries the engine diagnostic, e.g. `IllegalArgumentException: ...`.
    #[error("{0}")]
    OperationNotSupported(String),

    /// Malformed WKB or WKT input.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Batch inputs of different lengths.
    #[error("X and Y shapes must be equivalent: {x_len} != {y_len}")]
    ShapeMismatch {
        /// Number of x values.
        x_len: usize,
        /// Number of y values.
        y_len: usize,
    },

    /// The operation requires valid topology and an operand is invalid.
    #[error("Topological error: {0}")]
    Topological(String),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoKernelError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_part_message_names_container() {
        let err = GeoKernelError::EmptyPart(GeometryKind::MultiLineString);
        assert_eq!(
            err.to_string(),
            "Can't create MultiLineString with empty component"
        );
    }

    #[test]
    fn shape_mismatch_message() {
        let err = GeoKernelError::ShapeMismatch { x_len: 3, y_len: 2 };
        assert_eq!(err.to_string(), "X and Y shapes must be equivalent: 3 != 2");
    }
}
