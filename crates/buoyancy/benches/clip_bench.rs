//! Criterion benchmarks for convex clipping and mass properties.
//! Focus sizes: vertex counts n in {3, 4, 8, 16, 32} for both polygons.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p buoyancy

use buoyancy::geom2::rand::{draw_convex_polygon, RadialCfg, ReplayToken};
use buoyancy::geom2::{clip_polygon, compute_properties};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;

fn polygon(n: usize, seed: u64, center: Vector2<f64>) -> Vec<Vector2<f64>> {
    let cfg = RadialCfg {
        vertices: (n, n),
        angle_jitter_frac: 0.1,
        radial_jitter: 0.05,
        base_radius: 1.0,
        center,
    };
    draw_convex_polygon(cfg, ReplayToken::new(seed, n as u64)).expect("radial polygon")
}

fn bench_clip(c: &mut Criterion) {
    let mut group = c.benchmark_group("geom2");
    for &n in &[3usize, 4, 8, 16, 32] {
        group.bench_with_input(BenchmarkId::new("clip_overlapping", n), &n, |b, &n| {
            b.iter_batched(
                || (polygon(n, 43, Vector2::zeros()), polygon(n, 44, Vector2::new(0.4, -0.3))),
                |(subject, clip)| {
                    let _out = clip_polygon(&subject, &clip).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("clip_then_properties", n), &n, |b, &n| {
            let subject = polygon(n, 45, Vector2::zeros());
            let clip = polygon(n, 46, Vector2::new(0.2, 0.2));
            b.iter(|| {
                let out = clip_polygon(&subject, &clip).unwrap();
                let _props = compute_properties(&out);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_clip);
criterion_main!(benches);
