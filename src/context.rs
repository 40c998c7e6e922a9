//! Handle-based ownership of geometries and their prepared indexes.
//!
//! A [`GeometryContext`] owns every geometry inserted into it and lazily builds at most one
//! [`PreparedGeometry`] per handle. Releasing a handle drops the geometry together with its
//! index.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use arrow_array::{Array, BooleanArray};

use crate::algorithm::relate::{self, predicates, IntersectionMatrix};
use crate::error::{GeoKernelError, Result};
use crate::geometry::{Coord, Geometry};
use crate::indexed::PreparedGeometry;
use crate::vectorized;

/// Opaque reference to a geometry owned by a [`GeometryContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(u64);

impl Display for GeometryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Entry {
    geometry: Arc<Geometry>,
    prepared: OnceLock<Arc<PreparedGeometry>>,
}

#[derive(Debug, Default)]
pub struct GeometryContext {
    next_handle: u64,
    entries: HashMap<GeometryHandle, Entry>,
    index_builds: AtomicUsize,
}

impl GeometryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, geometry: Geometry) -> GeometryHandle {
        let handle = GeometryHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(
            handle,
            Entry {
                geometry: Arc::new(geometry),
                prepared: OnceLock::new(),
            },
        );
        handle
    }

    fn entry(&self, handle: GeometryHandle) -> Result<&Entry> {
        self.entries.get(&handle).ok_or_else(|| {
            GeoKernelError::OperationNotSupported(format!("Unknown geometry handle {handle}"))
        })
    }

    pub fn get(&self, handle: GeometryHandle) -> Result<&Geometry> {
        Ok(&self.entry(handle)?.geometry)
    }

    /// Insert an independent copy of the `idx`-th child of a multi geometry or collection.
    pub fn insert_child(&mut self, handle: GeometryHandle, idx: usize) -> Result<GeometryHandle> {
        let parent = self.get(handle)?;
        let child = parent.geometry_n(idx).ok_or_else(|| {
            GeoKernelError::OperationNotSupported(format!(
                "{} {handle} has no child at index {idx}",
                parent.geom_type()
            ))
        })?;
        Ok(self.insert(child))
    }

    /// Drop the geometry behind `handle` and any prepared index built for it.
    pub fn release(&mut self, handle: GeometryHandle) -> Result<Geometry> {
        let entry = self.entries.remove(&handle).ok_or_else(|| {
            GeoKernelError::OperationNotSupported(format!("Unknown geometry handle {handle}"))
        })?;
        if entry.prepared.get().is_some() {
            log::debug!("Evicting prepared index for {handle}");
        }
        drop(entry.prepared);
        Ok(Arc::try_unwrap(entry.geometry).unwrap_or_else(|shared| (*shared).clone()))
    }

    /// The prepared index for `handle`, built on first request.
    pub fn prepare(&self, handle: GeometryHandle) -> Result<Arc<PreparedGeometry>> {
        let entry = self.entry(handle)?;
        if let Some(prepared) = entry.prepared.get() {
            log::debug!("Prepared index cache hit for {handle}");
            return Ok(prepared.clone());
        }
        let prepared = entry.prepared.get_or_init(|| {
            self.index_builds.fetch_add(1, Ordering::Relaxed);
            Arc::new(PreparedGeometry::new(entry.geometry.clone()))
        });
        Ok(prepared.clone())
    }

    pub fn is_prepared(&self, handle: GeometryHandle) -> Result<bool> {
        Ok(self.entry(handle)?.prepared.get().is_some())
    }

    /// Number of prepared indexes built since the context was created.
    pub fn index_builds(&self) -> usize {
        self.index_builds.load(Ordering::Relaxed)
    }

    /// The prepared index for `handle` if one has been built.
    fn existing_index(&self, handle: GeometryHandle) -> Result<Option<&PreparedGeometry>> {
        Ok(self.entry(handle)?.prepared.get().map(|p| p.as_ref()))
    }

    pub fn relate(&self, a: GeometryHandle, b: GeometryHandle) -> Result<IntersectionMatrix> {
        let other = self.get(b)?;
        match self.existing_index(a)? {
            Some(prepared) => prepared.relate(other),
            None => relate::relate(self.get(a)?, other),
        }
    }

    pub fn intersects(&self, a: GeometryHandle, b: GeometryHandle) -> Result<bool> {
        let other = self.get(b)?;
        match self.existing_index(a)? {
            Some(prepared) => prepared.intersects(other),
            None => predicates::intersects(self.get(a)?, other),
        }
    }

    pub fn disjoint(&self, a: GeometryHandle, b: GeometryHandle) -> Result<bool> {
        Ok(!self.intersects(a, b)?)
    }

    pub fn contains(&self, a: GeometryHandle, b: GeometryHandle) -> Result<bool> {
        Ok(self.relate(a, b)?.is_contains())
    }

    pub fn covers(&self, a: GeometryHandle, b: GeometryHandle) -> Result<bool> {
        Ok(self.relate(a, b)?.is_covers())
    }

    pub fn within(&self, a: GeometryHandle, b: GeometryHandle) -> Result<bool> {
        Ok(self.relate(a, b)?.is_within())
    }

    pub fn touches(&self, a: GeometryHandle, b: GeometryHandle) -> Result<bool> {
        Ok(self.relate(a, b)?.is_touches())
    }

    /// Whether `coord` lies in the interior of the geometry, answered from its prepared index.
    pub fn contains_point(&self, handle: GeometryHandle, coord: &Coord) -> Result<bool> {
        Ok(self.prepare(handle)?.contains_point(coord))
    }

    pub fn contains_xy(
        &self,
        handle: GeometryHandle,
        xs: &dyn Array,
        ys: &dyn Array,
    ) -> Result<BooleanArray> {
        vectorized::contains_xy(self.prepare(handle)?.as_ref(), xs, ys)
    }

    pub fn touches_xy(
        &self,
        handle: GeometryHandle,
        xs: &dyn Array,
        ys: &dyn Array,
    ) -> Result<BooleanArray> {
        vectorized::touches_xy(self.prepare(handle)?.as_ref(), xs, ys)
    }

    pub fn intersects_xy(
        &self,
        handle: GeometryHandle,
        xs: &dyn Array,
        ys: &dyn Array,
    ) -> Result<BooleanArray> {
        vectorized::intersects_xy(self.prepare(handle)?.as_ref(), xs, ys)
    }
}

#[cfg(test)]
mod test {
    use arrow_array::Float64Array;

    use super::*;
    use crate::geometry::{GeometryKind, Point};
    use crate::test::polygon::{square, two_squares};

    #[test]
    fn prepare_builds_once() {
        let mut ctx = GeometryContext::new();
        let handle = ctx.insert(square().into());
        assert!(!ctx.is_prepared(handle).unwrap());

        let first = ctx.prepare(handle).unwrap();
        let second = ctx.prepare(handle).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(ctx.index_builds(), 1);
        assert!(ctx.is_prepared(handle).unwrap());

        let xs = Float64Array::from(vec![0.5, 2.]);
        let ys = Float64Array::from(vec![0.5, 0.5]);
        let out = ctx.contains_xy(handle, &xs, &ys).unwrap();
        assert_eq!(out, BooleanArray::from(vec![true, false]));
        assert_eq!(ctx.index_builds(), 1);
    }

    #[test]
    fn concurrent_prepare_builds_once() {
        let mut ctx = GeometryContext::new();
        let handle = ctx.insert(two_squares().into());
        let ctx = &ctx;
        let prepared: Vec<Arc<PreparedGeometry>> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|_| s.spawn(move || ctx.prepare(handle).unwrap()))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        assert_eq!(ctx.index_builds(), 1);
        assert!(prepared.iter().all(|p| Arc::ptr_eq(p, &prepared[0])));
    }

    #[test]
    fn release_evicts_index() {
        let mut ctx = GeometryContext::new();
        let handle = ctx.insert(square().into());
        ctx.prepare(handle).unwrap();
        let geometry = ctx.release(handle).unwrap();
        assert_eq!(geometry, Geometry::from(square()));
        assert!(ctx.is_empty());

        let err = ctx.prepare(handle).unwrap_err();
        assert!(matches!(err, GeoKernelError::OperationNotSupported(_)));
        assert!(err.to_string().contains("#0"));
        assert!(ctx.release(handle).is_err());
    }

    #[test]
    fn released_index_survives_outstanding_reference() {
        let mut ctx = GeometryContext::new();
        let handle = ctx.insert(square().into());
        let prepared = ctx.prepare(handle).unwrap();
        ctx.release(handle).unwrap();
        assert!(prepared.contains_point(&Coord::new(0.5, 0.5)));
    }

    #[test]
    fn child_outlives_parent() {
        let mut ctx = GeometryContext::new();
        let parent = ctx.insert(two_squares().into());
        let child = ctx.insert_child(parent, 1).unwrap();
        ctx.release(parent).unwrap();

        let geometry = ctx.get(child).unwrap();
        assert_eq!(geometry.geom_type(), GeometryKind::Polygon);
        assert!(ctx.contains_point(child, &Coord::new(2.5, 0.5)).unwrap());
        assert!(ctx.insert_child(child, 0).is_err());
    }

    #[test]
    fn predicates_by_handle() {
        let mut ctx = GeometryContext::new();
        let polygon = ctx.insert(square().into());
        let inside = ctx.insert(Point::new(0.5, 0.5).into());
        let edge = ctx.insert(Point::new(1., 0.5).into());

        assert!(ctx.contains(polygon, inside).unwrap());
        assert!(ctx.touches(polygon, edge).unwrap());
        ctx.prepare(polygon).unwrap();
        assert!(ctx.contains(polygon, inside).unwrap());
        assert!(!ctx.contains(polygon, edge).unwrap());
        assert!(ctx.covers(polygon, edge).unwrap());
        assert!(ctx.within(inside, polygon).unwrap());
        assert!(ctx.intersects(polygon, edge).unwrap());
        assert!(!ctx.disjoint(polygon, inside).unwrap());
    }
}
