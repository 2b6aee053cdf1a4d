use criterion::{criterion_group, criterion_main, Criterion};
use planar::algorithm::relate::Relate;
use planar::prepared::PreparedGeometry;
use planar::{coord, Coord, Geometry, LinearRing, Polygon};

fn wavy_polygon(offset: f64, n: usize) -> Geometry<f64> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(n + 3);
    for i in 0..n {
        let x = i as f64;
        coords.push(coord! { x: x, y: offset + (x * 0.7).sin() * 5.0 });
    }
    coords.push(coord! { x: (n - 1) as f64, y: offset + 50.0 });
    coords.push(coord! { x: 0.0, y: offset + 50.0 });
    let ring = LinearRing::from_coords(coords).unwrap();
    Geometry::Polygon(Polygon::new(ring, vec![]).unwrap())
}

fn criterion_benchmark(c: &mut Criterion) {
    let a = wavy_polygon(0.0, 200);
    let b = wavy_polygon(2.5, 200);

    c.bench_function("relate wavy polygons", |bencher| {
        bencher.iter(|| a.relate(&b).unwrap());
    });

    c.bench_function("prepared relate, repeated queries", |bencher| {
        let prepared = PreparedGeometry::new(&a);
        prepared.build();
        bencher.iter(|| prepared.intersects(&b).unwrap());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
