//! Boundary to the physics engine that owns bodies, fixtures and integration.
//!
//! The buoyancy model only reads transforms and velocities and accumulates forces;
//! it never creates or destroys bodies. Handles are small `Copy` ids owned by the engine.

use nalgebra::{Isometry2, Vector2};
use std::fmt::Debug;

use crate::shape::Shape;

/// Queries and force accumulation the buoyancy model needs from a rigid-body engine.
///
/// Forces and torques are instantaneous: they add to the body's accumulators for the
/// current step and are integrated by the engine afterwards.
pub trait PhysicsWorld {
    type Body: Copy + Ord + Debug;
    type Fixture: Copy + Ord + Debug;

    fn gravity(&self) -> Vector2<f64>;

    /// `None` for a stale handle.
    fn fixture_shape(&self, fixture: Self::Fixture) -> Option<&Shape>;
    fn fixture_density(&self, fixture: Self::Fixture) -> f64;
    fn fixture_is_sensor(&self, fixture: Self::Fixture) -> bool;
    fn fixture_body(&self, fixture: Self::Fixture) -> Self::Body;

    fn body_transform(&self, body: Self::Body) -> Isometry2<f64>;
    fn body_is_awake(&self, body: Self::Body) -> bool;
    /// Velocity of the material point of `body` currently at world point `point`.
    fn body_velocity_at(&self, body: Self::Body, point: Vector2<f64>) -> Vector2<f64>;
    fn body_angular_velocity(&self, body: Self::Body) -> f64;
    fn body_mass(&self, body: Self::Body) -> f64;
    /// Rotational inertia about the center of mass.
    fn body_inertia(&self, body: Self::Body) -> f64;

    /// Add `force` at world `point`; `wake` wakes a sleeping body.
    fn apply_force(
        &mut self,
        body: Self::Body,
        force: Vector2<f64>,
        point: Vector2<f64>,
        wake: bool,
    );
    fn apply_torque(&mut self, body: Self::Body, torque: f64, wake: bool);
}

/// Current world-space vertices of a polygon fixture; `None` for other shapes.
pub fn world_polygon<W: PhysicsWorld>(world: &W, fixture: W::Fixture) -> Option<Vec<Vector2<f64>>> {
    let polygon = world.fixture_shape(fixture)?.as_polygon()?;
    let iso = world.body_transform(world.fixture_body(fixture));
    Some(polygon.world_vertices(&iso))
}
