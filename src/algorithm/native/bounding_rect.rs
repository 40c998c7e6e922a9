use geo::{coord, Rect};

use crate::geometry::Coord;

/// An axis-aligned planar envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl BoundingRect {
    /// New, inverted so that the first [`update`](Self::update) sets every bound.
    pub fn new() -> Self {
        BoundingRect {
            minx: f64::INFINITY,
            miny: f64::INFINITY,
            maxx: -f64::INFINITY,
            maxy: -f64::INFINITY,
        }
    }

    pub fn update(&mut self, coord: &Coord) {
        if coord.x < self.minx {
            self.minx = coord.x;
        }
        if coord.y < self.miny {
            self.miny = coord.y;
        }
        if coord.x > self.maxx {
            self.maxx = coord.x;
        }
        if coord.y > self.maxy {
            self.maxy = coord.y;
        }
    }

    /// True until a coordinate has been added.
    pub fn is_empty(&self) -> bool {
        self.minx > self.maxx || self.miny > self.maxy
    }

    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        x >= self.minx && x <= self.maxx && y >= self.miny && y <= self.maxy
    }

    /// Closed-interval overlap test; touching envelopes intersect.
    pub fn intersects(&self, other: &BoundingRect) -> bool {
        self.minx <= other.maxx
            && other.minx <= self.maxx
            && self.miny <= other.maxy
            && other.miny <= self.maxy
    }

    /// Whether `other` lies entirely inside this envelope.
    pub fn covers(&self, other: &BoundingRect) -> bool {
        self.minx <= other.minx
            && self.miny <= other.miny
            && self.maxx >= other.maxx
            && self.maxy >= other.maxy
    }

    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }

    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
}

impl Default for BoundingRect {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BoundingRect> for Rect {
    fn from(value: BoundingRect) -> Self {
        let min_coord = coord! { x: value.minx, y: value.miny };
        let max_coord = coord! { x: value.maxx, y: value.maxy };
        Rect::new(min_coord, max_coord)
    }
}

impl From<BoundingRect> for ([f64; 2], [f64; 2]) {
    fn from(value: BoundingRect) -> Self {
        ([value.minx, value.miny], [value.maxx, value.maxy])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn touching_envelopes_intersect() {
        let mut a = BoundingRect::new();
        a.update(&Coord::new(0., 0.));
        a.update(&Coord::new(1., 1.));
        let mut b = BoundingRect::new();
        b.update(&Coord::new(1., 1.));
        b.update(&Coord::new(2., 3.));
        assert!(a.intersects(&b));
        assert!(!a.covers(&b));
        assert_eq!(<([f64; 2], [f64; 2])>::from(b), ([1., 1.], [2., 3.]));
    }

    #[test]
    fn new_is_empty() {
        assert!(BoundingRect::new().is_empty());
    }
}
