use arrow_array::Float64Array;
use criterion::{criterion_group, criterion_main, Criterion};
use geokernel::geometry::{Coord, Geometry, Polygon};
use geokernel::vectorized::contains_xy;
use geokernel::PreparedGeometry;

/// A star-shaped polygon with `n` vertices around the unit circle.
fn star(n: usize) -> Geometry {
    let shell = (0..n)
        .map(|i| {
            let angle = i as f64 / n as f64 * std::f64::consts::TAU;
            let radius = if i % 2 == 0 { 1. } else { 0.6 };
            Coord::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    Polygon::from_coords(shell, vec![]).unwrap().into()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let polygon = star(2_000);
    let prepared = PreparedGeometry::new(polygon.clone());
    let xs = Float64Array::from_iter_values((0..100_000).map(|i| (i % 317) as f64 / 158.5 - 1.));
    let ys = Float64Array::from_iter_values((0..100_000).map(|i| (i % 211) as f64 / 105.5 - 1.));

    c.bench_function("prepare 2k-vertex polygon", |b| {
        b.iter(|| PreparedGeometry::new(polygon.clone()))
    });
    c.bench_function("contains_xy 100k points, prepared", |b| {
        b.iter(|| contains_xy(&prepared, &xs, &ys).unwrap())
    });
    c.bench_function("contains_xy 100k points, unprepared", |b| {
        b.iter(|| contains_xy(&polygon, &xs, &ys).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
