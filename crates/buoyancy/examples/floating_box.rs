//! Drop a few boxes into a pool and print where they settle.
//!
//! Usage:
//!   cargo run -p buoyancy --example floating_box
//!   cargo run -p buoyancy --example floating_box -- 0.25 1.0 3.0
//!
//! Arguments are box densities (fluid density is 2.0). Lighter boxes float with a
//! submerged fraction of `density / 2`, heavier ones sink through the pool.

use buoyancy::sandbox::{route_contact, BodyDef, FixtureDef, World};
use buoyancy::{BuoyancyController, ControllerCfg, ConvexPolygon};
use nalgebra::Vector2;

fn main() {
    let densities: Vec<f64> = std::env::args()
        .skip(1)
        .filter_map(|a| a.parse().ok())
        .collect();
    let densities = if densities.is_empty() {
        vec![0.5, 1.0, 1.5]
    } else {
        densities
    };

    let mut world = World::new(Vector2::new(0.0, -9.81));
    let water = world.create_body(BodyDef::fixed(Vector2::new(0.0, -1.5)));
    let fluid = world
        .create_fixture(
            water,
            FixtureDef::sensor(ConvexPolygon::rect(9.0, 1.0).unwrap().into(), 2.0),
        )
        .unwrap();
    let mut ctl = BuoyancyController::new(&world, fluid, ControllerCfg::default()).unwrap();

    let n = densities.len() as f64;
    let bodies: Vec<_> = densities
        .iter()
        .enumerate()
        .map(|(i, &density)| {
            let x = -6.0 + 12.0 * (i as f64 + 0.5) / n;
            let body = world.create_body(BodyDef::dynamic(Vector2::new(x, 2.0)));
            let shape = ConvexPolygon::rect(0.5, 0.5).unwrap();
            world
                .create_fixture(body, FixtureDef::solid(shape.into(), density))
                .unwrap();
            (body, density)
        })
        .collect();

    for _ in 0..(10 * 60) {
        for event in world.update_contacts() {
            route_contact(&mut ctl, &world, event);
        }
        ctl.step(&mut world);
        world.step(1.0 / 60.0);
    }

    for (body, density) in bodies {
        let c = world.world_center(body);
        let v = world.linear_velocity(body);
        println!(
            "density {density:.2}: center=({:.3}, {:.3}) speed={:.3}",
            c.x,
            c.y,
            v.norm()
        );
    }
}
