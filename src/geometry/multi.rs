use crate::error::{GeoKernelError, Result};
use crate::geometry::{Coord, Dimension, GeometryKind, LineString, Point, Polygon};

/// Shared validation for homogeneous multi geometries: no empty members and a single dimension.
fn check_parts<T>(
    parts: &[T],
    kind: GeometryKind,
    dim: Dimension,
    is_empty: impl Fn(&T) -> bool,
    dimension: impl Fn(&T) -> Dimension,
) -> Result<()> {
    if parts.iter().any(&is_empty) {
        return Err(GeoKernelError::EmptyPart(kind));
    }
    if let Some(idx) = parts.iter().position(|part| dimension(part) != dim) {
        return Err(GeoKernelError::Construction(format!(
            "{kind} member {idx} has dimension {} but the collection is {dim}",
            dimension(&parts[idx])
        )));
    }
    Ok(())
}

macro_rules! impl_multi {
    ($name:ident, $part:ty, $field:ident, $kind:expr) => {
        impl $name {
            /// Create a new multi geometry, inferring the dimension from the first member.
            pub fn try_new($field: Vec<$part>) -> Result<Self> {
                let dim = $field
                    .first()
                    .map(|part| part.dimension())
                    .unwrap_or_default();
                Self::try_new_with_dim($field, dim)
            }

            pub fn try_new_with_dim($field: Vec<$part>, dim: Dimension) -> Result<Self> {
                check_parts(
                    &$field,
                    $kind,
                    dim,
                    |part| part.is_empty(),
                    |part| part.dimension(),
                )?;
                Ok(Self { $field, dim })
            }

            pub fn empty(dim: Dimension) -> Self {
                Self {
                    $field: vec![],
                    dim,
                }
            }

            pub fn $field(&self) -> &[$part] {
                &self.$field
            }

            pub fn len(&self) -> usize {
                self.$field.len()
            }

            pub fn dimension(&self) -> Dimension {
                self.dim
            }

            pub fn is_empty(&self) -> bool {
                self.$field.is_empty()
            }
        }
    };
}

/// A collection of non-empty points.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    points: Vec<Point>,
    dim: Dimension,
}

impl_multi!(MultiPoint, Point, points, GeometryKind::MultiPoint);

impl MultiPoint {
    pub fn from_coords(coords: Vec<Coord>) -> Result<Self> {
        Self::try_new(coords.into_iter().map(Point::from_coord).collect())
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

/// A collection of non-empty line strings.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    lines: Vec<LineString>,
    dim: Dimension,
}

impl_multi!(MultiLineString, LineString, lines, GeometryKind::MultiLineString);

impl MultiLineString {
    pub fn from_coords(lines: Vec<Vec<Coord>>) -> Result<Self> {
        let lines = lines
            .into_iter()
            .map(LineString::try_new)
            .collect::<Result<Vec<_>>>()?;
        Self::try_new(lines)
    }

    pub fn into_lines(self) -> Vec<LineString> {
        self.lines
    }

    pub fn length(&self) -> f64 {
        self.lines.iter().map(LineString::length).sum()
    }
}

/// A collection of non-empty polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    dim: Dimension,
}

impl_multi!(MultiPolygon, Polygon, polygons, GeometryKind::MultiPolygon);

impl MultiPolygon {
    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon::area).sum()
    }
}
