//! Minimal rigid-body world implementing `PhysicsWorld`.
//!
//! Purpose
//! - Drive the buoyancy model without an external engine: tests, benches, the CLI.
//! - Keep it explicit: semi-implicit Euler, gravity, force/torque accumulators, optional
//!   sleeping, sensor overlap events. There is no collision response between solids.
//!
//! Conventions
//! - A body's `position` is its origin; velocities are those of its center of mass.
//! - Mass data comes from the fixtures (`density × area`, polar moment about the center).
//!   Dynamic bodies without mass get mass 1, like common engines do.
//! - `force_log` records every `apply_force` call since the last `step`.

use nalgebra::{Isometry2, Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::controller::{Admission, BuoyancyController};
use crate::cross2;
use crate::engine::PhysicsWorld;
use crate::geom2::{clip_polygon, compute_properties};
use crate::shape::Shape;

/// Linear and angular speed below which a body accumulates sleep time.
const SLEEP_SPEED: f64 = 0.01;
/// Seconds at rest before a body falls asleep.
const TIME_TO_SLEEP: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixtureId(usize);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl FixtureId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Static,
    Kinematic,
    Dynamic,
}

/// Initial state of a body.
#[derive(Clone, Copy, Debug)]
pub struct BodyDef {
    pub body_type: BodyType,
    pub position: Vector2<f64>,
    pub angle: f64,
    pub linear_velocity: Vector2<f64>,
    pub angular_velocity: f64,
    pub awake: bool,
}

impl BodyDef {
    fn with_type(body_type: BodyType, position: Vector2<f64>) -> Self {
        Self {
            body_type,
            position,
            angle: 0.0,
            linear_velocity: Vector2::zeros(),
            angular_velocity: 0.0,
            awake: true,
        }
    }

    pub fn fixed(position: Vector2<f64>) -> Self {
        Self::with_type(BodyType::Static, position)
    }

    pub fn dynamic(position: Vector2<f64>) -> Self {
        Self::with_type(BodyType::Dynamic, position)
    }

    /// Moves with a prescribed velocity, unaffected by forces.
    pub fn kinematic(position: Vector2<f64>, linear_velocity: Vector2<f64>) -> Self {
        Self {
            linear_velocity,
            ..Self::with_type(BodyType::Kinematic, position)
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

#[derive(Clone, Debug)]
pub struct FixtureDef {
    pub shape: Shape,
    pub density: f64,
    pub is_sensor: bool,
}

impl FixtureDef {
    pub fn solid(shape: Shape, density: f64) -> Self {
        Self {
            shape,
            density,
            is_sensor: false,
        }
    }

    pub fn sensor(shape: Shape, density: f64) -> Self {
        Self {
            shape,
            density,
            is_sensor: true,
        }
    }
}

/// One `apply_force` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceRecord {
    pub body: BodyId,
    pub force: Vector2<f64>,
    pub point: Vector2<f64>,
}

/// Sensor overlap change. `sensor` is the sensor fixture, `other` the fixture entering
/// or leaving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactEvent {
    Begin { sensor: FixtureId, other: FixtureId },
    End { sensor: FixtureId, other: FixtureId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxError {
    UnknownBody(BodyId),
}

impl fmt::Display for SandboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SandboxError::UnknownBody(b) => write!(f, "unknown body {}", b.0),
        }
    }
}

impl std::error::Error for SandboxError {}

#[derive(Clone, Debug)]
struct Body {
    body_type: BodyType,
    position: Vector2<f64>,
    angle: f64,
    linear_velocity: Vector2<f64>,
    angular_velocity: f64,
    force: Vector2<f64>,
    torque: f64,
    awake: bool,
    sleep_time: f64,
    mass: f64,
    inertia: f64,
    local_center: Vector2<f64>,
    fixtures: Vec<FixtureId>,
}

impl Body {
    #[inline]
    fn transform(&self) -> Isometry2<f64> {
        Isometry2::new(self.position, self.angle)
    }

    #[inline]
    fn world_center(&self) -> Vector2<f64> {
        self.transform()
            .transform_point(&Point2::from(self.local_center))
            .coords
    }

    #[inline]
    fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    fn wake(&mut self) {
        self.awake = true;
        self.sleep_time = 0.0;
    }
}

#[derive(Clone, Debug)]
struct Fixture {
    body: BodyId,
    shape: Shape,
    density: f64,
    is_sensor: bool,
}

/// Rigid-body world with gravity and sensor tracking.
#[derive(Clone, Debug)]
pub struct World {
    gravity: Vector2<f64>,
    allow_sleep: bool,
    bodies: Vec<Body>,
    fixtures: Vec<Fixture>,
    force_log: Vec<ForceRecord>,
    sensor_pairs: BTreeSet<(FixtureId, FixtureId)>,
}

impl World {
    pub fn new(gravity: Vector2<f64>) -> Self {
        Self {
            gravity,
            allow_sleep: false,
            bodies: Vec::new(),
            fixtures: Vec::new(),
            force_log: Vec::new(),
            sensor_pairs: BTreeSet::new(),
        }
    }

    /// Let dynamic bodies at rest fall asleep.
    pub fn with_sleeping(mut self, allow: bool) -> Self {
        self.allow_sleep = allow;
        self
    }

    pub fn create_body(&mut self, def: BodyDef) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(Body {
            body_type: def.body_type,
            position: def.position,
            angle: def.angle,
            linear_velocity: def.linear_velocity,
            angular_velocity: def.angular_velocity,
            force: Vector2::zeros(),
            torque: 0.0,
            awake: def.awake,
            sleep_time: 0.0,
            mass: 0.0,
            inertia: 0.0,
            local_center: Vector2::zeros(),
            fixtures: Vec::new(),
        });
        self.reset_mass_data(id);
        id
    }

    pub fn create_fixture(&mut self, body: BodyId, def: FixtureDef) -> Result<FixtureId, SandboxError> {
        if body.0 >= self.bodies.len() {
            return Err(SandboxError::UnknownBody(body));
        }
        let id = FixtureId(self.fixtures.len());
        self.fixtures.push(Fixture {
            body,
            shape: def.shape,
            density: def.density,
            is_sensor: def.is_sensor,
        });
        self.bodies[body.0].fixtures.push(id);
        self.reset_mass_data(body);
        Ok(id)
    }

    fn reset_mass_data(&mut self, id: BodyId) {
        let mut mass = 0.0;
        let mut weighted = Vector2::zeros();
        let mut parts = Vec::new();
        for fid in &self.bodies[id.0].fixtures {
            let fixture = &self.fixtures[fid.0];
            let Some(props) = fixture.shape.mass_properties() else {
                continue;
            };
            let m = fixture.density * props.area;
            if m <= 0.0 {
                continue;
            }
            mass += m;
            weighted += props.centroid * m;
            parts.push((m, props.centroid, fixture.shape.moment(fixture.density)));
        }
        let body = &mut self.bodies[id.0];
        if !body.is_dynamic() {
            body.mass = 0.0;
            body.inertia = 0.0;
            body.local_center = Vector2::zeros();
            return;
        }
        if mass > 0.0 {
            let center = weighted / mass;
            body.local_center = center;
            body.mass = mass;
            body.inertia = parts
                .iter()
                .map(|(m, c, i)| i + m * (c - center).norm_squared())
                .sum();
        } else {
            body.local_center = Vector2::zeros();
            body.mass = 1.0;
            body.inertia = 0.0;
        }
    }

    #[inline]
    pub fn gravity_vector(&self) -> Vector2<f64> {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vector2<f64>) {
        self.gravity = gravity;
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> impl Iterator<Item = BodyId> {
        (0..self.bodies.len()).map(BodyId)
    }

    pub fn body_type(&self, body: BodyId) -> Option<BodyType> {
        self.bodies.get(body.0).map(|b| b.body_type)
    }

    pub fn body_fixtures(&self, body: BodyId) -> &[FixtureId] {
        self.bodies.get(body.0).map_or(&[][..], |b| b.fixtures.as_slice())
    }

    pub fn body_position(&self, body: BodyId) -> Vector2<f64> {
        self.bodies.get(body.0).map_or(Vector2::zeros(), |b| b.position)
    }

    pub fn body_angle(&self, body: BodyId) -> f64 {
        self.bodies.get(body.0).map_or(0.0, |b| b.angle)
    }

    pub fn world_center(&self, body: BodyId) -> Vector2<f64> {
        self.bodies.get(body.0).map_or(Vector2::zeros(), Body::world_center)
    }

    pub fn linear_velocity(&self, body: BodyId) -> Vector2<f64> {
        self.bodies.get(body.0).map_or(Vector2::zeros(), |b| b.linear_velocity)
    }

    /// Accumulated force for the current step.
    pub fn body_force(&self, body: BodyId) -> Vector2<f64> {
        self.bodies.get(body.0).map_or(Vector2::zeros(), |b| b.force)
    }

    /// Accumulated torque for the current step.
    pub fn body_torque(&self, body: BodyId) -> f64 {
        self.bodies.get(body.0).map_or(0.0, |b| b.torque)
    }

    pub fn set_awake(&mut self, body: BodyId, awake: bool) {
        if let Some(b) = self.bodies.get_mut(body.0) {
            if awake {
                b.wake();
            } else {
                b.awake = false;
                b.sleep_time = 0.0;
                b.linear_velocity = Vector2::zeros();
                b.angular_velocity = 0.0;
                b.force = Vector2::zeros();
                b.torque = 0.0;
            }
        }
    }

    pub fn set_linear_velocity(&mut self, body: BodyId, v: Vector2<f64>) {
        if let Some(b) = self.bodies.get_mut(body.0) {
            if b.body_type != BodyType::Static {
                b.linear_velocity = v;
                b.wake();
            }
        }
    }

    pub fn set_angular_velocity(&mut self, body: BodyId, w: f64) {
        if let Some(b) = self.bodies.get_mut(body.0) {
            if b.body_type != BodyType::Static {
                b.angular_velocity = w;
                b.wake();
            }
        }
    }

    pub fn set_transform(&mut self, body: BodyId, position: Vector2<f64>, angle: f64) {
        if let Some(b) = self.bodies.get_mut(body.0) {
            b.position = position;
            b.angle = angle;
        }
    }

    pub fn force_log(&self) -> &[ForceRecord] {
        &self.force_log
    }

    /// Advance by `dt`: integrate velocities from gravity and accumulated forces, then
    /// positions; clear accumulators and the force log.
    pub fn step(&mut self, dt: f64) {
        let gravity = self.gravity;
        let allow_sleep = self.allow_sleep;
        for body in &mut self.bodies {
            match body.body_type {
                BodyType::Static => continue,
                BodyType::Dynamic if !body.awake => continue,
                BodyType::Dynamic => {
                    body.linear_velocity += (gravity + body.force / body.mass) * dt;
                    if body.inertia > 0.0 {
                        body.angular_velocity += body.torque / body.inertia * dt;
                    }
                }
                BodyType::Kinematic => {}
            }
            let center = body.world_center() + body.linear_velocity * dt;
            body.angle += body.angular_velocity * dt;
            let rotated = Isometry2::rotation(body.angle).transform_vector(&body.local_center);
            body.position = center - rotated;
            body.force = Vector2::zeros();
            body.torque = 0.0;

            if allow_sleep && body.is_dynamic() {
                let resting = body.linear_velocity.norm() < SLEEP_SPEED
                    && body.angular_velocity.abs() < SLEEP_SPEED;
                if resting {
                    body.sleep_time += dt;
                    if body.sleep_time >= TIME_TO_SLEEP {
                        body.awake = false;
                        body.linear_velocity = Vector2::zeros();
                        body.angular_velocity = 0.0;
                    }
                } else {
                    body.sleep_time = 0.0;
                }
            }
        }
        self.force_log.clear();
    }

    /// Recompute sensor overlaps and report what changed since the last call.
    ///
    /// Every sensor fixture is tested against every non-sensor fixture on another body.
    /// Two polygons overlap when their intersection has area; any other shape pair
    /// falls back to world-space bounding boxes. Events come out in handle order.
    pub fn update_contacts(&mut self) -> Vec<ContactEvent> {
        let mut current = BTreeSet::new();
        for (si, sensor) in self.fixtures.iter().enumerate() {
            if !sensor.is_sensor {
                continue;
            }
            let s_box = self.fixture_aabb(sensor);
            for (oi, other) in self.fixtures.iter().enumerate() {
                if other.is_sensor || other.body == sensor.body {
                    continue;
                }
                let touching = aabb_overlap(s_box, self.fixture_aabb(other))
                    && self.shapes_overlap(sensor, other);
                if touching {
                    current.insert((FixtureId(si), FixtureId(oi)));
                }
            }
        }
        let mut events = Vec::new();
        for &(sensor, other) in self.sensor_pairs.difference(&current) {
            events.push(ContactEvent::End { sensor, other });
        }
        for &(sensor, other) in current.difference(&self.sensor_pairs) {
            events.push(ContactEvent::Begin { sensor, other });
        }
        self.sensor_pairs = current;
        events
    }

    fn shapes_overlap(&self, a: &Fixture, b: &Fixture) -> bool {
        let (Some(pa), Some(pb)) = (a.shape.as_polygon(), b.shape.as_polygon()) else {
            return true;
        };
        let wa = pa.world_vertices(&self.bodies[a.body.0].transform());
        let wb = pb.world_vertices(&self.bodies[b.body.0].transform());
        clip_polygon(&wa, &wb)
            .ok()
            .and_then(|overlap| compute_properties(&overlap))
            .is_some_and(|props| props.has_area())
    }

    fn fixture_aabb(&self, fixture: &Fixture) -> (Vector2<f64>, Vector2<f64>) {
        let iso = self.bodies[fixture.body.0].transform();
        let pts: Vec<Vector2<f64>> = match &fixture.shape {
            Shape::Polygon(p) => p.world_vertices(&iso),
            Shape::Circle { center, radius } => {
                let c = iso.transform_point(&Point2::from(*center)).coords;
                let r = Vector2::new(*radius, *radius);
                vec![c - r, c + r]
            }
            Shape::Edge { a, b } => vec![*a, *b]
                .into_iter()
                .map(|v| iso.transform_point(&Point2::from(v)).coords)
                .collect(),
            Shape::Chain { vertices } => vertices
                .iter()
                .map(|v| iso.transform_point(&Point2::from(*v)).coords)
                .collect(),
        };
        let mut lo = Vector2::repeat(f64::INFINITY);
        let mut hi = Vector2::repeat(f64::NEG_INFINITY);
        for p in pts {
            lo = lo.inf(&p);
            hi = hi.sup(&p);
        }
        (lo, hi)
    }
}

#[inline]
fn aabb_overlap(a: (Vector2<f64>, Vector2<f64>), b: (Vector2<f64>, Vector2<f64>)) -> bool {
    a.0.x <= b.1.x && b.0.x <= a.1.x && a.0.y <= b.1.y && b.0.y <= a.1.y
}

impl PhysicsWorld for World {
    type Body = BodyId;
    type Fixture = FixtureId;

    fn gravity(&self) -> Vector2<f64> {
        self.gravity
    }

    fn fixture_shape(&self, fixture: FixtureId) -> Option<&Shape> {
        self.fixtures.get(fixture.0).map(|f| &f.shape)
    }

    fn fixture_density(&self, fixture: FixtureId) -> f64 {
        self.fixtures.get(fixture.0).map_or(0.0, |f| f.density)
    }

    fn fixture_is_sensor(&self, fixture: FixtureId) -> bool {
        self.fixtures.get(fixture.0).is_some_and(|f| f.is_sensor)
    }

    fn fixture_body(&self, fixture: FixtureId) -> BodyId {
        self.fixtures
            .get(fixture.0)
            .map_or(BodyId(usize::MAX), |f| f.body)
    }

    fn body_transform(&self, body: BodyId) -> Isometry2<f64> {
        self.bodies
            .get(body.0)
            .map_or_else(Isometry2::identity, Body::transform)
    }

    fn body_is_awake(&self, body: BodyId) -> bool {
        self.bodies.get(body.0).is_some_and(|b| b.awake)
    }

    fn body_velocity_at(&self, body: BodyId, point: Vector2<f64>) -> Vector2<f64> {
        let Some(b) = self.bodies.get(body.0) else {
            return Vector2::zeros();
        };
        let r = point - b.world_center();
        b.linear_velocity + Vector2::new(-r.y, r.x) * b.angular_velocity
    }

    fn body_angular_velocity(&self, body: BodyId) -> f64 {
        self.bodies.get(body.0).map_or(0.0, |b| b.angular_velocity)
    }

    fn body_mass(&self, body: BodyId) -> f64 {
        self.bodies.get(body.0).map_or(0.0, |b| b.mass)
    }

    fn body_inertia(&self, body: BodyId) -> f64 {
        self.bodies.get(body.0).map_or(0.0, |b| b.inertia)
    }

    fn apply_force(&mut self, body: BodyId, force: Vector2<f64>, point: Vector2<f64>, wake: bool) {
        self.force_log.push(ForceRecord { body, force, point });
        let Some(b) = self.bodies.get_mut(body.0) else {
            return;
        };
        if !b.is_dynamic() {
            return;
        }
        if wake {
            b.wake();
        }
        if b.awake {
            b.force += force;
            b.torque += cross2(point - b.world_center(), force);
        }
    }

    fn apply_torque(&mut self, body: BodyId, torque: f64, wake: bool) {
        let Some(b) = self.bodies.get_mut(body.0) else {
            return;
        };
        if !b.is_dynamic() {
            return;
        }
        if wake {
            b.wake();
        }
        if b.awake {
            b.torque += torque;
        }
    }
}

/// Sensor routing for one fluid: a dynamic body's fixture entering the controller's
/// fluid sensor is tracked, leaving it untracks it. Other events are ignored.
///
/// Returns the admission for `Begin` events that reached the controller.
pub fn route_contact(
    controller: &mut BuoyancyController<World>,
    world: &World,
    event: ContactEvent,
) -> Option<Admission> {
    let (sensor, other) = match event {
        ContactEvent::Begin { sensor, other } | ContactEvent::End { sensor, other } => {
            (sensor, other)
        }
    };
    if sensor != controller.fluid() {
        return None;
    }
    if world.body_type(world.fixture_body(other)) != Some(BodyType::Dynamic) {
        return None;
    }
    match event {
        ContactEvent::Begin { .. } => Some(controller.add_body(world, other)),
        ContactEvent::End { .. } => {
            controller.remove_body(other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ConvexPolygon;
    use nalgebra::vector;

    fn unit_box() -> Shape {
        ConvexPolygon::rect(0.5, 0.5).unwrap().into()
    }

    #[test]
    fn mass_data_from_fixtures() {
        let mut w = World::new(vector![0.0, -10.0]);
        let b = w.create_body(BodyDef::dynamic(vector![1.0, 2.0]));
        w.create_fixture(b, FixtureDef::solid(ConvexPolygon::rect(1.0, 1.0).unwrap().into(), 0.5))
            .unwrap();
        assert!((w.body_mass(b) - 2.0).abs() < 1e-12);
        // m (w² + h²) / 12 = 2 * 8 / 12
        assert!((w.body_inertia(b) - 4.0 / 3.0).abs() < 1e-9);
        assert!((w.world_center(b) - vector![1.0, 2.0]).norm() < 1e-12);
    }

    #[test]
    fn free_fall_under_gravity() {
        let mut w = World::new(vector![0.0, -10.0]);
        let b = w.create_body(BodyDef::dynamic(Vector2::zeros()));
        w.create_fixture(b, FixtureDef::solid(unit_box(), 1.0)).unwrap();
        for _ in 0..60 {
            w.step(1.0 / 60.0);
        }
        assert!((w.linear_velocity(b).y + 10.0).abs() < 1e-9);
        assert!(w.body_position(b).y < -4.0);
    }

    #[test]
    fn off_center_force_spins_body() {
        let mut w = World::new(Vector2::zeros());
        let b = w.create_body(BodyDef::dynamic(Vector2::zeros()));
        w.create_fixture(b, FixtureDef::solid(unit_box(), 1.0)).unwrap();
        w.apply_force(b, vector![0.0, 1.0], vector![0.5, 0.0], true);
        assert!((w.body_torque(b) - 0.5).abs() < 1e-12);
        assert_eq!(w.force_log().len(), 1);
        w.step(0.1);
        assert!(w.body_angular_velocity(b) > 0.0);
        assert!(w.force_log().is_empty());
        assert_eq!(w.body_torque(b), 0.0);
    }

    #[test]
    fn static_bodies_ignore_forces() {
        let mut w = World::new(vector![0.0, -10.0]);
        let b = w.create_body(BodyDef::fixed(Vector2::zeros()));
        w.create_fixture(b, FixtureDef::solid(unit_box(), 1.0)).unwrap();
        w.apply_force(b, vector![0.0, 100.0], Vector2::zeros(), true);
        w.step(1.0);
        assert_eq!(w.body_position(b), Vector2::zeros());
    }

    #[test]
    fn kinematic_body_moves_at_its_velocity() {
        let mut w = World::new(vector![0.0, -10.0]);
        let b = w.create_body(BodyDef::kinematic(Vector2::zeros(), vector![1.0, 0.0]));
        w.step(0.5);
        assert!((w.body_position(b) - vector![0.5, 0.0]).norm() < 1e-12);
        assert!((w.body_velocity_at(b, vector![3.0, 3.0]) - vector![1.0, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn resting_body_falls_asleep() {
        let mut w = World::new(Vector2::zeros()).with_sleeping(true);
        let b = w.create_body(BodyDef::dynamic(Vector2::zeros()));
        w.create_fixture(b, FixtureDef::solid(unit_box(), 1.0)).unwrap();
        for _ in 0..40 {
            w.step(1.0 / 60.0);
        }
        assert!(!w.body_is_awake(b));
        w.apply_force(b, vector![1.0, 0.0], Vector2::zeros(), true);
        assert!(w.body_is_awake(b));
    }

    #[test]
    fn sensor_events_begin_and_end() {
        let mut w = World::new(vector![0.0, -10.0]);
        let water = w.create_body(BodyDef::fixed(Vector2::zeros()));
        let sensor = w
            .create_fixture(water, FixtureDef::sensor(ConvexPolygon::rect(2.0, 1.0).unwrap().into(), 1.0))
            .unwrap();
        let b = w.create_body(BodyDef::dynamic(vector![0.0, 0.5]));
        let other = w.create_fixture(b, FixtureDef::solid(unit_box(), 1.0)).unwrap();
        assert_eq!(w.update_contacts(), vec![ContactEvent::Begin { sensor, other }]);
        assert!(w.update_contacts().is_empty());
        w.set_transform(b, vector![0.0, 5.0], 0.0);
        assert_eq!(w.update_contacts(), vec![ContactEvent::End { sensor, other }]);
    }

    #[test]
    fn bounding_box_overlap_alone_is_not_contact() {
        let mut w = World::new(Vector2::zeros());
        let water = w.create_body(BodyDef::fixed(Vector2::zeros()));
        w.create_fixture(water, FixtureDef::sensor(ConvexPolygon::rect(2.0, 1.0).unwrap().into(), 1.0))
            .unwrap();
        // diamond near the corner: boxes intersect, polygons do not
        let b = w.create_body(BodyDef::dynamic(vector![2.6, 1.6]).with_angle(std::f64::consts::FRAC_PI_4));
        w.create_fixture(b, FixtureDef::solid(unit_box(), 1.0)).unwrap();
        assert!(w.update_contacts().is_empty());
        w.set_transform(b, vector![2.2, 1.2], std::f64::consts::FRAC_PI_4);
        assert_eq!(w.update_contacts().len(), 1);
    }

    #[test]
    fn unknown_body_is_an_error() {
        let mut w = World::new(Vector2::zeros());
        let err = w
            .create_fixture(BodyId(3), FixtureDef::solid(unit_box(), 1.0))
            .unwrap_err();
        assert_eq!(err, SandboxError::UnknownBody(BodyId(3)));
    }
}
