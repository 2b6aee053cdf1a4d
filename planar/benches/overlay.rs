use criterion::{criterion_group, criterion_main, Criterion};
use planar::overlay::{overlay, OverlayOp};
use planar::{coord, Coord, Geometry, LinearRing, Polygon};

/// A ragged star polygon with `arms * 2` vertices centred on `(cx, cy)`.
fn star(cx: f64, cy: f64, radius: f64, arms: usize) -> Geometry<f64> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(arms * 2 + 1);
    for i in 0..arms * 2 {
        let angle = std::f64::consts::TAU * i as f64 / (arms * 2) as f64;
        let r = if i % 2 == 0 { radius } else { radius * 0.5 };
        coords.push(coord! { x: cx + r * angle.cos(), y: cy + r * angle.sin() });
    }
    let ring = LinearRing::from_coords(coords).unwrap();
    Geometry::Polygon(Polygon::new(ring, vec![]).unwrap())
}

fn criterion_benchmark(c: &mut Criterion) {
    let a = star(0.0, 0.0, 100.0, 64);
    let b = star(40.0, 30.0, 100.0, 64);

    c.bench_function("intersection of ragged stars", |bencher| {
        bencher.iter(|| overlay(&a, &b, OverlayOp::Intersection).unwrap());
    });

    c.bench_function("union of ragged stars", |bencher| {
        bencher.iter(|| overlay(&a, &b, OverlayOp::Union).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
