use rstar::primitives::{GeomWithData, Line};
use rstar::{RTree, RTreeObject, AABB};

use crate::algorithm::native::bounding_rect::BoundingRect;
use crate::algorithm::native::locate::RayCrossingCounter;
use crate::algorithm::native::segment::{point_on_segment, segments_intersect};
use crate::algorithm::native::Location;
use crate::geometry::Coord;

type IndexedSegment = GeomWithData<Line<[f64; 2]>, usize>;

/// An R-tree over planar segments, each tagged with its position in the input.
#[derive(Debug, Clone)]
pub struct SegmentIndex {
    tree: RTree<IndexedSegment>,
}

fn to_coord(p: [f64; 2]) -> Coord {
    Coord::new(p[0], p[1])
}

impl SegmentIndex {
    pub fn new(segments: impl IntoIterator<Item = (Coord, Coord)>) -> Self {
        let lines = segments
            .into_iter()
            .enumerate()
            .map(|(idx, (a, b))| GeomWithData::new(Line::new([a.x, a.y], [b.x, b.y]), idx))
            .collect();
        Self {
            tree: RTree::bulk_load(lines),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_bounds(&self) -> Option<BoundingRect> {
        if self.is_empty() {
            return None;
        }
        let envelope = self.tree.root().envelope();
        Some(BoundingRect {
            minx: envelope.lower()[0],
            miny: envelope.lower()[1],
            maxx: envelope.upper()[0],
            maxy: envelope.upper()[1],
        })
    }

    /// Segments whose envelope intersects the given box.
    pub fn search(
        &self,
        min: [f64; 2],
        max: [f64; 2],
    ) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.search_with_ids(min, max).map(|(_, a, b)| (a, b))
    }

    /// Like [`search`](Self::search), also yielding each segment's input position.
    pub fn search_with_ids(
        &self,
        min: [f64; 2],
        max: [f64; 2],
    ) -> impl Iterator<Item = (usize, Coord, Coord)> + '_ {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_corners(min, max))
            .map(|segment| {
                let line = segment.geom();
                (segment.data, to_coord(line.from), to_coord(line.to))
            })
    }

    /// Whether any indexed segment shares a point with `a`-`b`.
    pub fn intersects_segment(&self, a: &Coord, b: &Coord) -> bool {
        self.search([a.x.min(b.x), a.y.min(b.y)], [a.x.max(b.x), a.y.max(b.y)])
            .any(|(c, d)| segments_intersect(a, b, &c, &d))
    }

    /// Whether `p` lies on any indexed segment.
    pub fn covers_point(&self, p: &Coord) -> bool {
        self.search([p.x, p.y], [p.x, p.y])
            .any(|(a, b)| point_on_segment(p, &a, &b))
    }

    /// Locate `p` against the area enclosed by the indexed segments, which must form closed
    /// rings.
    pub fn locate_in_rings(&self, p: &Coord) -> Location {
        let Some(bounds) = self.total_bounds() else {
            return Location::Exterior;
        };
        if !bounds.contains_xy(p.x, p.y) {
            return Location::Exterior;
        }
        let mut counter = RayCrossingCounter::new(*p);
        for (a, b) in self.search([p.x, p.y], [bounds.maxx, p.y]) {
            counter.count_segment(&b, &a);
            if counter.is_on_segment() {
                break;
            }
        }
        counter.location()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::polygon::square;

    fn square_index() -> SegmentIndex {
        SegmentIndex::new(square().exterior().unwrap().segments())
    }

    #[test]
    fn locate_against_ring() {
        let index = square_index();
        assert_eq!(index.len(), 4);
        assert_eq!(index.locate_in_rings(&Coord::new(0.5, 0.5)), Location::Interior);
        assert_eq!(index.locate_in_rings(&Coord::new(1., 0.5)), Location::Boundary);
        assert_eq!(index.locate_in_rings(&Coord::new(0., 0.)), Location::Boundary);
        assert_eq!(index.locate_in_rings(&Coord::new(1.5, 0.5)), Location::Exterior);
        assert_eq!(index.locate_in_rings(&Coord::new(0.5, 1.)), Location::Boundary);
    }

    #[test]
    fn segment_queries() {
        let index = square_index();
        assert!(index.intersects_segment(&Coord::new(0.5, 0.5), &Coord::new(2., 0.5)));
        assert!(!index.intersects_segment(&Coord::new(0.2, 0.2), &Coord::new(0.8, 0.8)));
        assert!(index.covers_point(&Coord::new(0.5, 0.)));
        assert!(!index.covers_point(&Coord::new(0.5, 0.5)));
    }

    #[test]
    fn empty_index() {
        let index = SegmentIndex::new(vec![]);
        assert!(index.total_bounds().is_none());
        assert_eq!(index.locate_in_rings(&Coord::new(0., 0.)), Location::Exterior);
    }
}
