//! Criterion benchmark for one controller step over many submerged bodies.
//! Focus sizes: tracked bodies m in {1, 10, 100}.

use buoyancy::sandbox::{BodyDef, FixtureDef, World};
use buoyancy::{BuoyancyController, ControllerCfg, ConvexPolygon};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn populated(m: usize, seed: u64) -> (World, BuoyancyController<World>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = World::new(Vector2::new(0.0, -9.81));
    let water = world.create_body(BodyDef::fixed(Vector2::new(0.0, -5.0)));
    let fluid = world
        .create_fixture(
            water,
            FixtureDef::sensor(ConvexPolygon::rect(50.0, 5.0).unwrap().into(), 1.0),
        )
        .unwrap();
    let mut ctl = BuoyancyController::new(&world, fluid, ControllerCfg::default()).unwrap();
    for _ in 0..m {
        let at = Vector2::new(rng.gen_range(-45.0..45.0), rng.gen_range(-9.0..0.5));
        let body = world.create_body(BodyDef::dynamic(at).with_angle(rng.gen_range(0.0..6.0)));
        world.set_linear_velocity(body, Vector2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)));
        let shape = ConvexPolygon::rect(rng.gen_range(0.2..1.0), rng.gen_range(0.2..1.0)).unwrap();
        let f = world.create_fixture(body, FixtureDef::solid(shape.into(), 0.6)).unwrap();
        ctl.add_body(&world, f);
    }
    (world, ctl)
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");
    for &m in &[1usize, 10, 100] {
        group.bench_with_input(BenchmarkId::new("step", m), &m, |b, &m| {
            b.iter_batched(
                || populated(m, 7),
                |(mut world, mut ctl)| {
                    let _report = ctl.step(&mut world);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
