use crate::geometry::{Coord, Geometry, GeometryType, LineString, Polygon};

/// The non-empty atomic parts of a geometry, flattened out of multi kinds and collections.
#[derive(Debug, Default)]
pub(crate) struct Components<'a> {
    pub points: Vec<Coord>,
    pub lines: Vec<&'a LineString>,
    pub polygons: Vec<&'a Polygon>,
}

impl<'a> Components<'a> {
    pub fn new(geom: &'a Geometry) -> Self {
        let mut out = Self::default();
        out.push(geom);
        out
    }

    fn push(&mut self, geom: &'a Geometry) {
        match geom.as_type() {
            GeometryType::Point(g) => self.points.extend(g.coord()),
            GeometryType::LineString(g) => self.push_line(g),
            GeometryType::LinearRing(g) => self.push_line(g.as_line_string()),
            GeometryType::Polygon(g) => self.push_polygon(g),
            GeometryType::MultiPoint(g) => {
                self.points.extend(g.points().iter().filter_map(|p| p.coord()))
            }
            GeometryType::MultiLineString(g) => g.lines().iter().for_each(|l| self.push_line(l)),
            GeometryType::MultiPolygon(g) => {
                g.polygons().iter().for_each(|p| self.push_polygon(p))
            }
            GeometryType::GeometryCollection(g) => g.geoms().iter().for_each(|c| self.push(c)),
        }
    }

    fn push_line(&mut self, line: &'a LineString) {
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    fn push_polygon(&mut self, polygon: &'a Polygon) {
        if !polygon.is_empty() {
            self.polygons.push(polygon);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.polygons.is_empty()
    }

    /// Every segment of every line and polygon ring.
    pub fn segments(&self) -> Vec<(Coord, Coord)> {
        let lines = self.lines.iter().flat_map(|line| line.segments());
        let rings = self
            .polygons
            .iter()
            .flat_map(|polygon| polygon.rings().iter().flat_map(|ring| ring.segments()));
        lines.chain(rings).collect()
    }

    /// One coordinate from each component, used to detect containment without edge crossings.
    pub fn representative_coords(&self) -> Vec<Coord> {
        let lines = self.lines.iter().filter_map(|line| line.start());
        let polygons = self
            .polygons
            .iter()
            .filter_map(|polygon| polygon.exterior().and_then(|ring| ring.coords().first()))
            .copied();
        self.points.iter().copied().chain(lines).chain(polygons).collect()
    }
}
