//! A geometry paired with the indexes needed to answer repeated queries quickly.

use std::sync::{Arc, OnceLock};

use crate::algorithm::native::components::Components;
use crate::algorithm::native::locate::LocationAccumulator;
use crate::algorithm::native::{BoundingRect, Location, PointLocator};
use crate::algorithm::relate::puntal::{line_boundary_points, relate_points};
use crate::algorithm::relate::{self, puntal_coords, IntersectionMatrix};
use crate::algorithm::validation::{explain_validity, InvalidReason};
use crate::error::Result;
use crate::geometry::{Coord, Geometry};
use crate::indexed::SegmentIndex;

/// Ring indexes of one polygon.
#[derive(Debug, Clone)]
struct IndexedPolygon {
    shell: SegmentIndex,
    holes: Vec<SegmentIndex>,
}

impl IndexedPolygon {
    fn locate(&self, coord: &Coord) -> Location {
        match self.shell.locate_in_rings(coord) {
            Location::Interior => {}
            other => return other,
        }
        for hole in &self.holes {
            match hole.locate_in_rings(coord) {
                Location::Interior => return Location::Exterior,
                Location::Boundary => return Location::Boundary,
                Location::Exterior => {}
            }
        }
        Location::Interior
    }
}

/// A geometry with segment indexes over its rings and lines, built once and shared.
///
/// Location queries agree with [`locate_point`](crate::algorithm::native::locate_point) on the
/// wrapped geometry. Validity is computed on first use and cached.
#[derive(Debug, Clone)]
pub struct PreparedGeometry {
    geometry: Arc<Geometry>,
    envelope: Option<BoundingRect>,
    points: Vec<Coord>,
    lines: SegmentIndex,
    line_boundary: Vec<Coord>,
    polygons: Vec<IndexedPolygon>,
    edges: SegmentIndex,
    validity: OnceLock<Option<InvalidReason>>,
}

impl PreparedGeometry {
    pub fn new(geometry: impl Into<Arc<Geometry>>) -> Self {
        let geometry: Arc<Geometry> = geometry.into();
        let parts = Components::new(&geometry);

        let lines = SegmentIndex::new(parts.lines.iter().flat_map(|line| line.segments()));
        let line_boundary = line_boundary_points(&parts);
        let polygons = parts
            .polygons
            .iter()
            .filter_map(|polygon| {
                let shell = polygon.exterior()?;
                Some(IndexedPolygon {
                    shell: SegmentIndex::new(shell.segments()),
                    holes: polygon
                        .interiors()
                        .iter()
                        .map(|hole| SegmentIndex::new(hole.segments()))
                        .collect(),
                })
            })
            .collect::<Vec<_>>();
        let edges = SegmentIndex::new(parts.segments());
        let points = parts.points;

        log::debug!(
            "Prepared {}: {} edges, {} polygons, {} points",
            geometry.geom_type(),
            edges.len(),
            polygons.len(),
            points.len()
        );

        Self {
            envelope: geometry.bounding_rect(),
            geometry,
            points,
            lines,
            line_boundary,
            polygons,
            edges,
            validity: OnceLock::new(),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn envelope(&self) -> Option<BoundingRect> {
        self.envelope
    }

    /// The reason the wrapped geometry is invalid, if any.
    pub fn explain_validity(&self) -> Option<InvalidReason> {
        *self
            .validity
            .get_or_init(|| explain_validity(&self.geometry))
    }

    pub fn is_valid(&self) -> bool {
        self.explain_validity().is_none()
    }

    fn locate_on_lines(&self, coord: &Coord) -> Location {
        if self.line_boundary.iter().any(|c| c.equals_2d(coord)) {
            Location::Boundary
        } else if self.lines.covers_point(coord) {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    pub fn contains_point(&self, coord: &Coord) -> bool {
        self.locate(coord) == Location::Interior
    }

    pub fn touches_point(&self, coord: &Coord) -> bool {
        self.locate(coord) == Location::Boundary
    }

    pub fn intersects_point(&self, coord: &Coord) -> bool {
        self.locate(coord) != Location::Exterior
    }

    /// Same as [`intersects_point`](Self::intersects_point): a point is covered exactly when it
    /// is not exterior.
    pub fn covers_point(&self, coord: &Coord) -> bool {
        self.intersects_point(coord)
    }

    /// DE-9IM of the prepared geometry against `other`.
    ///
    /// A puntal `other` is answered from the index and never checks validity; anything else goes
    /// through [`relate::relate`].
    pub fn relate(&self, other: &Geometry) -> Result<IntersectionMatrix> {
        if !self.geometry.is_empty() && !other.is_empty() && other.geom_type().is_puntal() {
            return Ok(relate_points(&puntal_coords(other), &self.geometry, self).transpose());
        }
        relate::relate(&self.geometry, other)
    }

    fn relate_boolean(
        &self,
        other: &Geometry,
        relate_cb: impl Fn(IntersectionMatrix) -> bool,
    ) -> Result<bool> {
        Ok(relate_cb(self.relate(other)?))
    }

    /// Whether the prepared geometry shares a point with `other`. Invalid operands are accepted.
    pub fn intersects(&self, other: &Geometry) -> Result<bool> {
        let (Some(envelope), Some(other_envelope)) = (self.envelope, other.bounding_rect()) else {
            return Ok(false);
        };
        if !envelope.intersects(&other_envelope) {
            return Ok(false);
        }

        let parts = Components::new(other);
        if parts
            .segments()
            .iter()
            .any(|(a, b)| self.edges.intersects_segment(a, b))
        {
            return Ok(true);
        }
        if parts
            .representative_coords()
            .iter()
            .any(|c| self.intersects_point(c))
        {
            return Ok(true);
        }
        Ok(Components::new(&self.geometry)
            .representative_coords()
            .iter()
            .any(|c| other.intersects_coord(c)))
    }

    pub fn disjoint(&self, other: &Geometry) -> Result<bool> {
        Ok(!self.intersects(other)?)
    }

    pub fn contains(&self, other: &Geometry) -> Result<bool> {
        self.relate_boolean(other, |m| m.is_contains())
    }

    pub fn covers(&self, other: &Geometry) -> Result<bool> {
        self.relate_boolean(other, |m| m.is_covers())
    }

    pub fn within(&self, other: &Geometry) -> Result<bool> {
        self.relate_boolean(other, |m| m.is_within())
    }

    pub fn covered_by(&self, other: &Geometry) -> Result<bool> {
        self.relate_boolean(other, |m| m.is_covered_by())
    }

    pub fn touches(&self, other: &Geometry) -> Result<bool> {
        self.relate_boolean(other, |m| m.is_touches())
    }

    pub fn crosses(&self, other: &Geometry) -> Result<bool> {
        let dims = (self.geometry.topology_dimension(), other.topology_dimension());
        self.relate_boolean(other, |m| m.is_crosses(dims.0, dims.1))
    }

    pub fn overlaps(&self, other: &Geometry) -> Result<bool> {
        let dims = (self.geometry.topology_dimension(), other.topology_dimension());
        self.relate_boolean(other, |m| m.is_overlaps(dims.0, dims.1))
    }

    pub fn equals(&self, other: &Geometry) -> Result<bool> {
        match (self.geometry.is_empty(), other.is_empty()) {
            (true, true) => Ok(true),
            (true, false) | (false, true) => Ok(false),
            (false, false) => self.relate_boolean(other, |m| m.is_equals()),
        }
    }
}

impl PointLocator for PreparedGeometry {
    fn locate(&self, coord: &Coord) -> Location {
        match self.envelope {
            Some(envelope) if envelope.contains_xy(coord.x, coord.y) => {}
            _ => return Location::Exterior,
        }
        let mut acc = LocationAccumulator::default();
        if self.points.iter().any(|c| c.equals_2d(coord)) {
            acc.add(Location::Interior);
        }
        if !self.lines.is_empty() {
            acc.add(self.locate_on_lines(coord));
        }
        for polygon in &self.polygons {
            acc.add(polygon.locate(coord));
        }
        acc.location()
    }
}

impl From<Geometry> for PreparedGeometry {
    fn from(value: Geometry) -> Self {
        Self::new(value)
    }
}
