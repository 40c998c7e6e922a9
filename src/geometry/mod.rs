//! The immutable geometry value model.
//!
//! A [`Geometry`] wraps one of eight concrete kinds ([`GeometryType`]) together with an optional
//! SRID. Values are validated on construction and never mutated afterwards; derived data such as
//! spatial indexes lives outside the value (see [`crate::indexed`] and [`crate::context`]).

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::algorithm::native::bounding_rect::BoundingRect;
use crate::algorithm::relate::Dimensions;
use crate::error::{GeoKernelError, Result};

pub use collection::GeometryCollection;
pub use coord::{Coord, Dimension};
pub use linestring::{LineString, LinearRing};
pub use multi::{MultiLineString, MultiPoint, MultiPolygon};
pub use point::Point;
pub use polygon::Polygon;

mod collection;
pub(crate) mod coord;
mod linestring;
mod multi;
mod point;
mod polygon;

/// The kind of a geometry, independent of its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub fn is_puntal(&self) -> bool {
        matches!(self, GeometryKind::Point | GeometryKind::MultiPoint)
    }

    pub fn is_lineal(&self) -> bool {
        matches!(
            self,
            GeometryKind::LineString | GeometryKind::LinearRing | GeometryKind::MultiLineString
        )
    }

    pub fn is_polygonal(&self) -> bool {
        matches!(self, GeometryKind::Polygon | GeometryKind::MultiPolygon)
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::LinearRing => "LinearRing",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        };
        write!(f, "{name}")
    }
}

/// The concrete contents of a [`Geometry`].
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryType {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

/// A geometry value with an optional spatial reference identifier.
///
/// Equality compares kind, dimension, exact coordinates and SRID.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    inner: GeometryType,
    srid: Option<i32>,
}

impl Geometry {
    pub fn new(inner: GeometryType) -> Self {
        Self { inner, srid: None }
    }

    pub fn as_type(&self) -> &GeometryType {
        &self.inner
    }

    pub fn into_inner(self) -> GeometryType {
        self.inner
    }

    pub fn srid(&self) -> Option<i32> {
        self.srid
    }

    /// Tag this geometry with an SRID, replacing any existing one.
    pub fn with_srid(self, srid: i32) -> Self {
        Self {
            inner: self.inner,
            srid: Some(srid),
        }
    }

    pub(crate) fn without_srid(self) -> Self {
        Self {
            inner: self.inner,
            srid: None,
        }
    }

    pub fn geom_type(&self) -> GeometryKind {
        match &self.inner {
            GeometryType::Point(_) => GeometryKind::Point,
            GeometryType::LineString(_) => GeometryKind::LineString,
            GeometryType::LinearRing(_) => GeometryKind::LinearRing,
            GeometryType::Polygon(_) => GeometryKind::Polygon,
            GeometryType::MultiPoint(_) => GeometryKind::MultiPoint,
            GeometryType::MultiLineString(_) => GeometryKind::MultiLineString,
            GeometryType::MultiPolygon(_) => GeometryKind::MultiPolygon,
            GeometryType::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    pub fn dimension(&self) -> Dimension {
        match &self.inner {
            GeometryType::Point(g) => g.dimension(),
            GeometryType::LineString(g) => g.dimension(),
            GeometryType::LinearRing(g) => g.dimension(),
            GeometryType::Polygon(g) => g.dimension(),
            GeometryType::MultiPoint(g) => g.dimension(),
            GeometryType::MultiLineString(g) => g.dimension(),
            GeometryType::MultiPolygon(g) => g.dimension(),
            GeometryType::GeometryCollection(g) => g.dimension(),
        }
    }

    /// Number of ordinates per coordinate, 2 or 3.
    pub fn coord_dim(&self) -> usize {
        self.dimension().size()
    }

    pub fn is_empty(&self) -> bool {
        match &self.inner {
            GeometryType::Point(g) => g.is_empty(),
            GeometryType::LineString(g) => g.is_empty(),
            GeometryType::LinearRing(g) => g.is_empty(),
            GeometryType::Polygon(g) => g.is_empty(),
            GeometryType::MultiPoint(g) => g.is_empty(),
            GeometryType::MultiLineString(g) => g.is_empty(),
            GeometryType::MultiPolygon(g) => g.is_empty(),
            GeometryType::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// The coordinate sequence of an atomic point or line.
    ///
    /// Polygons and multi geometries have no single sequence and return an error.
    pub fn coords(&self) -> Result<&[Coord]> {
        match &self.inner {
            GeometryType::Point(g) => Ok(g.coord_slice()),
            GeometryType::LineString(g) => Ok(g.coords()),
            GeometryType::LinearRing(g) => Ok(g.coords()),
            _ => Err(GeoKernelError::OperationNotSupported(format!(
                "{} does not provide a single coordinate sequence",
                self.geom_type()
            ))),
        }
    }

    /// Visit every coordinate in storage order.
    pub(crate) fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        match &self.inner {
            GeometryType::Point(g) => g.coord_slice().iter().for_each(f),
            GeometryType::LineString(g) => g.coords().iter().for_each(f),
            GeometryType::LinearRing(g) => g.coords().iter().for_each(f),
            GeometryType::Polygon(g) => g
                .rings()
                .iter()
                .for_each(|ring| ring.coords().iter().for_each(&mut *f)),
            GeometryType::MultiPoint(g) => g
                .points()
                .iter()
                .for_each(|p| p.coord_slice().iter().for_each(&mut *f)),
            GeometryType::MultiLineString(g) => g
                .lines()
                .iter()
                .for_each(|line| line.coords().iter().for_each(&mut *f)),
            GeometryType::MultiPolygon(g) => g.polygons().iter().for_each(|polygon| {
                polygon
                    .rings()
                    .iter()
                    .for_each(|ring| ring.coords().iter().for_each(&mut *f))
            }),
            GeometryType::GeometryCollection(g) => {
                g.geoms().iter().for_each(|child| child.for_each_coord(f))
            }
        }
    }

    /// Number of parts: members of multi kinds and collections, 1 for a non-empty atomic
    /// geometry and 0 for an empty one.
    pub fn num_geometries(&self) -> usize {
        match &self.inner {
            GeometryType::MultiPoint(g) => g.len(),
            GeometryType::MultiLineString(g) => g.len(),
            GeometryType::MultiPolygon(g) => g.len(),
            GeometryType::GeometryCollection(g) => g.len(),
            _ if self.is_empty() => 0,
            _ => 1,
        }
    }

    /// Owned copies of the members of a multi geometry or collection.
    ///
    /// Atomic geometries have no members. The copies are independent of `self`.
    pub fn geoms(&self) -> Vec<Geometry> {
        match &self.inner {
            GeometryType::MultiPoint(g) => g.points().iter().cloned().map(Into::into).collect(),
            GeometryType::MultiLineString(g) => {
                g.lines().iter().cloned().map(Into::into).collect()
            }
            GeometryType::MultiPolygon(g) => {
                g.polygons().iter().cloned().map(Into::into).collect()
            }
            GeometryType::GeometryCollection(g) => g.geoms().to_vec(),
            _ => vec![],
        }
    }

    pub fn geometry_n(&self, idx: usize) -> Option<Geometry> {
        match &self.inner {
            GeometryType::MultiPoint(g) => g.points().get(idx).cloned().map(Into::into),
            GeometryType::MultiLineString(g) => g.lines().get(idx).cloned().map(Into::into),
            GeometryType::MultiPolygon(g) => g.polygons().get(idx).cloned().map(Into::into),
            GeometryType::GeometryCollection(g) => g.geoms().get(idx).cloned(),
            _ => None,
        }
    }

    /// The planar envelope, `None` when empty.
    pub fn bounding_rect(&self) -> Option<BoundingRect> {
        let mut rect = BoundingRect::new();
        self.for_each_coord(&mut |c| rect.update(c));
        if rect.is_empty() {
            None
        } else {
            Some(rect)
        }
    }

    /// Planar length of lineal parts and polygon rings.
    pub fn length(&self) -> f64 {
        match &self.inner {
            GeometryType::Point(_) | GeometryType::MultiPoint(_) => 0.0,
            GeometryType::LineString(g) => g.length(),
            GeometryType::LinearRing(g) => g.length(),
            GeometryType::Polygon(g) => g.perimeter(),
            GeometryType::MultiLineString(g) => g.length(),
            GeometryType::MultiPolygon(g) => g.polygons().iter().map(Polygon::perimeter).sum(),
            GeometryType::GeometryCollection(g) => g.geoms().iter().map(Geometry::length).sum(),
        }
    }

    /// Planar area, holes subtracted.
    pub fn area(&self) -> f64 {
        match &self.inner {
            GeometryType::Polygon(g) => g.area(),
            GeometryType::MultiPolygon(g) => g.area(),
            GeometryType::GeometryCollection(g) => g.geoms().iter().map(Geometry::area).sum(),
            _ => 0.0,
        }
    }

    /// Topological dimension: 0 for points, 1 for lines, 2 for polygons, the maximum over the
    /// members of a collection and [`Dimensions::Empty`] for an empty geometry.
    pub fn topology_dimension(&self) -> Dimensions {
        if self.is_empty() {
            return Dimensions::Empty;
        }
        match &self.inner {
            GeometryType::Point(_) | GeometryType::MultiPoint(_) => Dimensions::ZeroDimensional,
            GeometryType::LineString(_)
            | GeometryType::LinearRing(_)
            | GeometryType::MultiLineString(_) => Dimensions::OneDimensional,
            GeometryType::Polygon(_) | GeometryType::MultiPolygon(_) => {
                Dimensions::TwoDimensional
            }
            GeometryType::GeometryCollection(g) => g
                .geoms()
                .iter()
                .map(Geometry::topology_dimension)
                .max()
                .unwrap_or(Dimensions::Empty),
        }
    }
}

impl From<GeometryType> for Geometry {
    fn from(value: GeometryType) -> Self {
        Self::new(value)
    }
}

macro_rules! impl_from_kind {
    ($kind:ident) => {
        impl From<$kind> for Geometry {
            fn from(value: $kind) -> Self {
                Self::new(GeometryType::$kind(value))
            }
        }
    };
}

impl_from_kind!(Point);
impl_from_kind!(LineString);
impl_from_kind!(LinearRing);
impl_from_kind!(Polygon);
impl_from_kind!(MultiPoint);
impl_from_kind!(MultiLineString);
impl_from_kind!(MultiPolygon);
impl_from_kind!(GeometryCollection);

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::linestring::ls0;
    use crate::test::multilinestring::ml0;
    use crate::test::polygon::square_with_hole;

    #[test]
    fn child_outlives_parent() {
        let child = {
            let parent: Geometry = ml0().into();
            parent.geoms()[1].clone()
        };
        assert_eq!(child.geom_type(), GeometryKind::LineString);
        assert_eq!(child.coords().unwrap()[0], Coord::new(3., 0.));
    }

    #[test]
    fn with_srid_tags_and_compares() {
        let g: Geometry = Point::new(1., 2.).into();
        let tagged = g.clone().with_srid(4326);
        assert_eq!(tagged.srid(), Some(4326));
        assert_ne!(g, tagged);
        assert_eq!(tagged.clone().without_srid(), g);
    }

    #[test]
    fn emptiness_is_orthogonal_to_kind() {
        let empties: Vec<Geometry> = vec![
            Point::empty(Dimension::XY).into(),
            LineString::empty(Dimension::XY).into(),
            Polygon::empty(Dimension::XYZ).into(),
            MultiPolygon::empty(Dimension::XY).into(),
            GeometryCollection::empty(Dimension::XY).into(),
        ];
        for g in empties {
            assert!(g.is_empty());
            assert_eq!(g.bounding_rect(), None);
            assert_eq!(g.num_geometries(), 0);
            assert_eq!(g.topology_dimension(), Dimensions::Empty);
        }
    }

    #[test]
    fn coord_dim_follows_dimension() {
        let g: Geometry = Point::new_z(1., 2., 3.).into();
        assert_eq!(g.coord_dim(), 3);
        assert_eq!(g.coords().unwrap()[0].z, Some(3.));
        let g: Geometry = ls0().into();
        assert_eq!(g.coord_dim(), 2);
    }

    #[test]
    fn polygon_has_no_single_sequence() {
        let g: Geometry = square_with_hole().into();
        assert!(matches!(
            g.coords(),
            Err(GeoKernelError::OperationNotSupported(_))
        ));
        let rect = g.bounding_rect().unwrap();
        assert_eq!((rect.minx, rect.miny, rect.maxx, rect.maxy), (0., 0., 1., 1.));
        assert_eq!(g.area(), 0.9375);
        assert_eq!(g.topology_dimension(), Dimensions::TwoDimensional);
    }
}
