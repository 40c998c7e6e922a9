use crate::geometry::{MultiPoint, Point};

pub(crate) fn mp0() -> MultiPoint {
    MultiPoint::try_new(vec![Point::new(0., 1.), Point::new(1., 2.)]).unwrap()
}

pub(crate) fn mp1() -> MultiPoint {
    MultiPoint::try_new(vec![Point::new(3., 4.), Point::new(5., 6.)]).unwrap()
}
