use crate::geometry::{MultiPolygon, Polygon};
use crate::test::coords;

pub(crate) fn square() -> Polygon {
    Polygon::from_coords(coords(&[(0., 0.), (1., 0.), (1., 1.), (0., 1.)]), vec![]).unwrap()
}

pub(crate) fn square_with_hole() -> Polygon {
    Polygon::from_coords(
        coords(&[(0., 0.), (1., 0.), (1., 1.), (0., 1.)]),
        vec![coords(&[(0.25, 0.25), (0.25, 0.5), (0.5, 0.5), (0.5, 0.25)])],
    )
    .unwrap()
}

/// Self-intersecting at (1/3, 1/3).
pub(crate) fn bowtie() -> Polygon {
    Polygon::from_coords(
        coords(&[(0., 0.), (1., 1.), (1., -1.), (0., 1.), (0., 0.)]),
        vec![],
    )
    .unwrap()
}

/// A valid quadrilateral overlapping [`bowtie`].
pub(crate) fn quad() -> Polygon {
    Polygon::from_coords(
        coords(&[(-0.5, -0.5), (-0.5, 0.5), (0.5, 0.5), (0.5, -5.)]),
        vec![],
    )
    .unwrap()
}

pub(crate) fn two_squares() -> MultiPolygon {
    let far = Polygon::from_coords(coords(&[(2., 0.), (3., 0.), (3., 1.), (2., 1.)]), vec![])
        .unwrap();
    MultiPolygon::try_new(vec![square(), far]).unwrap()
}
