//! Point predicates evaluated over whole coordinate arrays.
//!
//! Coordinates arrive as two Arrow arrays of any numeric type and are cast to `Float64`. A null
//! in either input yields a null output at that position.

use std::borrow::Cow;

use arrow_array::builder::BooleanBuilder;
use arrow_array::cast::AsArray;
use arrow_array::types::Float64Type;
use arrow_array::{Array, ArrayRef, BooleanArray, Float64Array};
use arrow_schema::DataType;

use crate::error::{GeoKernelError, Result};
use crate::geometry::{Coord, Geometry};
use crate::indexed::PreparedGeometry;

/// The geometry a batch is evaluated against.
///
/// A plain geometry is prepared once for the duration of a call.
#[derive(Debug, Clone, Copy)]
pub enum BatchTarget<'a> {
    Geometry(&'a Geometry),
    Prepared(&'a PreparedGeometry),
}

impl<'a> From<&'a Geometry> for BatchTarget<'a> {
    fn from(value: &'a Geometry) -> Self {
        Self::Geometry(value)
    }
}

impl<'a> From<&'a PreparedGeometry> for BatchTarget<'a> {
    fn from(value: &'a PreparedGeometry) -> Self {
        Self::Prepared(value)
    }
}

impl<'a> BatchTarget<'a> {
    fn prepared(self) -> Cow<'a, PreparedGeometry> {
        match self {
            Self::Prepared(prepared) => Cow::Borrowed(prepared),
            Self::Geometry(geometry) => Cow::Owned(PreparedGeometry::new(geometry.clone())),
        }
    }
}

fn check_shapes(x_len: usize, y_len: usize) -> Result<()> {
    if x_len != y_len {
        return Err(GeoKernelError::ShapeMismatch { x_len, y_len });
    }
    Ok(())
}

fn to_float64(array: &dyn Array) -> Result<ArrayRef> {
    Ok(arrow_cast::cast(array, &DataType::Float64)?)
}

fn evaluate_xy(
    target: BatchTarget<'_>,
    xs: &dyn Array,
    ys: &dyn Array,
    predicate: impl Fn(&PreparedGeometry, &Coord) -> bool,
) -> Result<BooleanArray> {
    check_shapes(xs.len(), ys.len())?;
    let xs = to_float64(xs)?;
    let ys = to_float64(ys)?;
    let xs: &Float64Array = xs.as_primitive::<Float64Type>();
    let ys: &Float64Array = ys.as_primitive::<Float64Type>();

    let prepared = target.prepared();
    let mut output_array = BooleanBuilder::with_capacity(xs.len());
    xs.iter()
        .zip(ys.iter())
        .for_each(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => {
                output_array.append_value(predicate(&prepared, &Coord::new(x, y)))
            }
            _ => output_array.append_null(),
        });
    Ok(output_array.finish())
}

/// Whether each `(x, y)` lies in the interior of `target`.
pub fn contains_xy<'a>(
    target: impl Into<BatchTarget<'a>>,
    xs: &dyn Array,
    ys: &dyn Array,
) -> Result<BooleanArray> {
    evaluate_xy(target.into(), xs, ys, |prepared, c| prepared.contains_point(c))
}

/// Whether each `(x, y)` lies on the boundary of `target`.
pub fn touches_xy<'a>(
    target: impl Into<BatchTarget<'a>>,
    xs: &dyn Array,
    ys: &dyn Array,
) -> Result<BooleanArray> {
    evaluate_xy(target.into(), xs, ys, |prepared, c| prepared.touches_point(c))
}

/// Whether each `(x, y)` shares a point with `target`.
pub fn intersects_xy<'a>(
    target: impl Into<BatchTarget<'a>>,
    xs: &dyn Array,
    ys: &dyn Array,
) -> Result<BooleanArray> {
    evaluate_xy(target.into(), xs, ys, |prepared, c| {
        prepared.intersects_point(c)
    })
}

/// [`contains_xy`] over plain slices.
pub fn contains_xy_slices<'a>(
    target: impl Into<BatchTarget<'a>>,
    xs: &[f64],
    ys: &[f64],
) -> Result<Vec<bool>> {
    check_shapes(xs.len(), ys.len())?;
    let prepared = target.into().prepared();
    Ok(xs
        .iter()
        .zip(ys)
        .map(|(x, y)| prepared.contains_point(&Coord::new(*x, *y)))
        .collect())
}

#[cfg(test)]
mod test {
    use arrow_array::{Float32Array, Int32Array};

    use super::*;
    use crate::test::linestring::ls0;
    use crate::test::polygon::{square, square_with_hole};

    #[test]
    fn contains_over_arrays() {
        let polygon: Geometry = square_with_hole().into();
        let xs = Float64Array::from(vec![Some(0.1), Some(0.3), None, Some(1.), Some(5.)]);
        let ys = Float64Array::from(vec![Some(0.1), Some(0.3), Some(0.5), Some(0.5), Some(5.)]);
        let out = contains_xy(&polygon, &xs, &ys).unwrap();
        assert_eq!(
            out,
            BooleanArray::from(vec![Some(true), Some(false), None, Some(false), Some(false)])
        );

        let touches = touches_xy(&polygon, &xs, &ys).unwrap();
        assert!(touches.value(3));
        assert!(!touches.value(0));
        assert!(touches.is_null(2));
    }

    #[test]
    fn numeric_inputs_are_cast() {
        let polygon: Geometry = square().into();
        let xs = Int32Array::from(vec![0, 1, 2]);
        let ys = Float32Array::from(vec![0.5, 0.5, 0.5]);
        let out = intersects_xy(&polygon, &xs, &ys).unwrap();
        assert_eq!(out, BooleanArray::from(vec![true, true, false]));
    }

    #[test]
    fn prepared_target_matches_plain() {
        let polygon: Geometry = square_with_hole().into();
        let prepared = PreparedGeometry::new(polygon.clone());
        let xs: Vec<f64> = (0..40).map(|i| i as f64 * 0.03).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 1. - x).collect();
        assert_eq!(
            contains_xy_slices(&polygon, &xs, &ys).unwrap(),
            contains_xy_slices(&prepared, &xs, &ys).unwrap()
        );
    }

    #[test]
    fn shape_mismatch() {
        let line: Geometry = ls0().into();
        let xs = Float64Array::from(vec![0., 1.]);
        let ys = Float64Array::from(vec![0.]);
        assert!(matches!(
            contains_xy(&line, &xs, &ys),
            Err(GeoKernelError::ShapeMismatch { x_len: 2, y_len: 1 })
        ));
        assert!(contains_xy_slices(&line, &[0.], &[]).is_err());
    }

    #[test]
    fn empty_batch() {
        let line: Geometry = ls0().into();
        let xs = Float64Array::from(Vec::<f64>::new());
        let out = intersects_xy(&line, &xs, &xs).unwrap();
        assert_eq!(out.len(), 0);
    }
}
