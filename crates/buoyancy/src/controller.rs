//! Per-step buoyancy, drag and lift for fixtures submerged in a convex fluid region.
//!
//! Model (per tracked, awake fixture)
//! - Clip the fluid polygon (subject) by the fixture polygon (clip). The result keeps
//!   the fluid's counter-clockwise winding, so edge normals below point outward.
//! - Buoyancy `-g · ρ · A` at the centroid of the overlap.
//! - For every overlap edge facing the flow (`n̂ · v̂ ≥ 0`, `n̂ = (t̂.y, -t̂.x)` the outward
//!   normal): drag `-v̂ · min(n̂·v̂ · c_d · L · ρ · |v|², max_drag)` and lift
//!   `perp(v̂) · clamp(n̂·v̂ · t̂·v̂ · c_l · L · ρ · |v|², ±max_lift)`, both at the edge midpoint.
//!   `v` is the body's velocity relative to the fluid body at that point.
//! - Optional angular drag torque `-I/m · A · ω · c_ω`.
//!
//! Every force goes through its own `apply_force` call; the engine sums them.
//! Degenerate geometry (empty overlap, zero or non-finite area, non-finite forces)
//! skips the affected force for this step only.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::engine::{world_polygon, PhysicsWorld};
use crate::geom2::{clip_polygon, compute_properties_eps, GeomCfg, PolygonProperties};
use crate::shape::{Shape, ShapeKind};

/// Tunable coefficients. Defaults follow the classic floating-box setup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerCfg {
    /// Linear drag coefficient per unit edge length.
    pub drag: f64,
    /// Lift coefficient per unit edge length.
    pub lift: f64,
    /// Upper bound on the drag magnitude of a single edge.
    pub max_drag: f64,
    /// Upper bound on the lift magnitude of a single edge.
    pub max_lift: f64,
    /// Angular drag coefficient; 0 disables the torque.
    pub angular_drag: f64,
    /// Cache the fluid polygon once instead of re-reading the fluid body every step.
    pub fluid_fixed: bool,
    pub geom: GeomCfg,
}

impl Default for ControllerCfg {
    fn default() -> Self {
        Self {
            drag: 1.0,
            lift: 1.0,
            max_drag: 2.0,
            max_lift: 2.0,
            angular_drag: 0.0,
            fluid_fixed: true,
            geom: GeomCfg::default(),
        }
    }
}

impl ControllerCfg {
    pub fn validate(&self) -> Result<(), BuoyancyError> {
        let finite = [self.drag, self.lift, self.max_drag, self.max_lift, self.angular_drag];
        if finite.iter().any(|c| !c.is_finite()) {
            return Err(BuoyancyError::invalid_cfg("coefficients must be finite"));
        }
        if self.max_drag < 0.0 || self.max_lift < 0.0 {
            return Err(BuoyancyError::invalid_cfg("max_drag and max_lift must be >= 0"));
        }
        if self.angular_drag < 0.0 {
            return Err(BuoyancyError::invalid_cfg("angular_drag must be >= 0"));
        }
        if !(self.geom.eps_area >= 0.0 && self.geom.eps_speed >= 0.0) {
            return Err(BuoyancyError::invalid_cfg("tolerances must be >= 0"));
        }
        Ok(())
    }
}

/// Construction and configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum BuoyancyError {
    /// The fluid fixture is missing or not a convex polygon.
    InvalidFluid { reason: String },
    InvalidCfg { reason: String },
}

impl BuoyancyError {
    fn invalid_fluid(reason: impl Into<String>) -> Self {
        Self::InvalidFluid {
            reason: reason.into(),
        }
    }

    fn invalid_cfg(reason: impl Into<String>) -> Self {
        Self::InvalidCfg {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BuoyancyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFluid { reason } => write!(f, "invalid fluid fixture: {reason}"),
            Self::InvalidCfg { reason } => write!(f, "invalid controller config: {reason}"),
        }
    }
}

impl std::error::Error for BuoyancyError {}

/// Result of `add_body`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    Tracked,
    AlreadyTracked,
    /// Not a polygon fixture (`kind` is `None` for a stale handle). Nothing changed.
    Rejected { kind: Option<ShapeKind> },
}

/// What one `step` did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Tracked fixtures on awake bodies.
    pub processed: usize,
    /// Tracked fixtures skipped because their body sleeps.
    pub asleep: usize,
    /// Processed fixtures with no usable overlap this step, plus tracked handles the
    /// world no longer knows.
    pub dry: usize,
    pub forces_applied: usize,
    pub torques_applied: usize,
    /// Sum of overlap areas over processed fixtures.
    pub submerged_area: f64,
}

/// Applies fluid forces to the fixtures currently overlapping one fluid fixture.
///
/// Membership is driven from outside (sensor begin/end contacts call `add_body` /
/// `remove_body`); the tracked set is ordered so force application is deterministic.
#[derive(Debug)]
pub struct BuoyancyController<W: PhysicsWorld> {
    fluid: W::Fixture,
    fluid_body: W::Body,
    fluid_vertices: Vec<Vector2<f64>>,
    tracked: BTreeSet<W::Fixture>,
    cfg: ControllerCfg,
}

impl<W: PhysicsWorld> BuoyancyController<W> {
    /// Errors
    /// - `InvalidFluid` if `fluid` is not a convex polygon fixture.
    /// - `InvalidCfg` if `cfg.validate()` fails.
    pub fn new(world: &W, fluid: W::Fixture, cfg: ControllerCfg) -> Result<Self, BuoyancyError> {
        cfg.validate()?;
        let fluid_vertices = fluid_polygon(world, fluid)?;
        Ok(Self {
            fluid,
            fluid_body: world.fixture_body(fluid),
            fluid_vertices,
            tracked: BTreeSet::new(),
            cfg,
        })
    }

    #[inline]
    pub fn fluid(&self) -> W::Fixture {
        self.fluid
    }

    #[inline]
    pub fn cfg(&self) -> &ControllerCfg {
        &self.cfg
    }

    /// Replace the configuration; re-caches the fluid polygon.
    pub fn set_cfg(&mut self, world: &W, cfg: ControllerCfg) -> Result<(), BuoyancyError> {
        cfg.validate()?;
        self.cfg = cfg;
        self.refresh_fluid(world)
    }

    /// Re-read the fluid polygon from the fluid body's current transform.
    pub fn refresh_fluid(&mut self, world: &W) -> Result<(), BuoyancyError> {
        self.fluid_vertices = fluid_polygon(world, self.fluid)?;
        Ok(())
    }

    /// Cached world-space fluid polygon (as of construction or the last refresh).
    #[inline]
    pub fn fluid_vertices(&self) -> &[Vector2<f64>] {
        &self.fluid_vertices
    }

    /// Start tracking `fixture`. Non-polygon fixtures are rejected and logged.
    pub fn add_body(&mut self, world: &W, fixture: W::Fixture) -> Admission {
        let shape = world.fixture_shape(fixture);
        match shape.and_then(Shape::as_polygon) {
            Some(polygon) if polygon.len() > 2 => {
                if self.tracked.insert(fixture) {
                    tracing::debug!(?fixture, vertices = polygon.len(), "tracking fixture");
                    Admission::Tracked
                } else {
                    Admission::AlreadyTracked
                }
            }
            _ => {
                let kind = shape.map(Shape::kind);
                tracing::warn!(?fixture, ?kind, "fixture is not a convex polygon; not tracked");
                Admission::Rejected { kind }
            }
        }
    }

    /// Stop tracking `fixture`. Returns whether it was tracked.
    pub fn remove_body(&mut self, fixture: W::Fixture) -> bool {
        let removed = self.tracked.remove(&fixture);
        if removed {
            tracing::debug!(?fixture, "untracking fixture");
        }
        removed
    }

    #[inline]
    pub fn is_tracked(&self, fixture: W::Fixture) -> bool {
        self.tracked.contains(&fixture)
    }

    pub fn tracked(&self) -> impl Iterator<Item = W::Fixture> + '_ {
        self.tracked.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Apply buoyancy, drag, lift (and angular drag if enabled) to every tracked fixture
    /// whose body is awake. Call once per tick, before the engine integrates forces.
    pub fn step(&mut self, world: &mut W) -> StepReport {
        let mut report = StepReport::default();
        if self.tracked.is_empty() {
            return report;
        }
        if !self.cfg.fluid_fixed {
            match fluid_polygon(world, self.fluid) {
                Ok(vertices) => self.fluid_vertices = vertices,
                Err(err) => {
                    tracing::warn!(%err, "fluid polygon unavailable; skipping step");
                    return report;
                }
            }
        }
        let gravity = world.gravity();
        let density = world.fixture_density(self.fluid);
        for &fixture in &self.tracked {
            if world.fixture_shape(fixture).is_none() {
                tracing::trace!(?fixture, "stale fixture handle");
                report.dry += 1;
                continue;
            }
            let body = world.fixture_body(fixture);
            if !world.body_is_awake(body) {
                report.asleep += 1;
                continue;
            }
            report.processed += 1;
            if !self.apply_to_fixture(world, fixture, body, gravity, density, &mut report) {
                report.dry += 1;
            }
        }
        tracing::debug!(
            processed = report.processed,
            asleep = report.asleep,
            dry = report.dry,
            forces = report.forces_applied,
            area = report.submerged_area,
            "buoyancy step"
        );
        report
    }

    /// Overlap of the fluid (as last cached) with `fixture`, and its area and centroid.
    ///
    /// `None` when the fixture is not a polygon or the overlap has no usable area.
    pub fn submerged(
        &self,
        world: &W,
        fixture: W::Fixture,
    ) -> Option<(Vec<Vector2<f64>>, PolygonProperties)> {
        let polygon = world_polygon(world, fixture)?;
        let clipped = match clip_polygon(&self.fluid_vertices, &polygon) {
            Ok(c) => c,
            Err(err) => {
                tracing::warn!(?fixture, %err, "cannot clip fluid by fixture");
                return None;
            }
        };
        if clipped.is_empty() {
            tracing::trace!(?fixture, "no overlap with fluid");
            return None;
        }
        match compute_properties_eps(&clipped, self.cfg.geom.eps_area) {
            Some(props) if props.has_area() => Some((clipped, props)),
            _ => {
                tracing::trace!(?fixture, "overlap has no area");
                None
            }
        }
    }

    /// Returns false if the fixture had no usable overlap.
    fn apply_to_fixture(
        &self,
        world: &mut W,
        fixture: W::Fixture,
        body: W::Body,
        gravity: Vector2<f64>,
        density: f64,
        report: &mut StepReport,
    ) -> bool {
        let Some((clipped, props)) = self.submerged(world, fixture) else {
            return false;
        };
        report.submerged_area += props.area;

        let buoyancy = -gravity * (density * props.area);
        if is_finite(buoyancy) {
            world.apply_force(body, buoyancy, props.centroid, true);
            report.forces_applied += 1;
        }

        report.forces_applied += self.apply_edge_forces(world, body, density, &clipped);

        if self.cfg.angular_drag > 0.0 {
            let mass = world.body_mass(body);
            if mass > 0.0 {
                let torque = -world.body_inertia(body) / mass
                    * props.area
                    * world.body_angular_velocity(body)
                    * self.cfg.angular_drag;
                if torque.is_finite() {
                    world.apply_torque(body, torque, true);
                    report.torques_applied += 1;
                }
            }
        }
        true
    }

    /// Drag and lift on the leading edges of the overlap; returns the number of forces applied.
    fn apply_edge_forces(
        &self,
        world: &mut W,
        body: W::Body,
        density: f64,
        clipped: &[Vector2<f64>],
    ) -> usize {
        let cfg = &self.cfg;
        let n = clipped.len();
        let mut applied = 0;
        for i in 0..n {
            let p0 = clipped[i];
            let p1 = clipped[(i + 1) % n];
            let mid = (p0 + p1) * 0.5;
            let rel = world.body_velocity_at(body, mid) - world.body_velocity_at(self.fluid_body, mid);
            let speed = rel.norm();
            if !(speed > cfg.geom.eps_speed) || !speed.is_finite() {
                continue;
            }
            let dir = rel / speed;
            let edge = p1 - p0;
            let len = edge.norm();
            if !(len > 0.0) || !len.is_finite() {
                continue;
            }
            let tangent = edge / len;
            let normal = Vector2::new(tangent.y, -tangent.x);
            let drag_dot = normal.dot(&dir);
            if drag_dot < 0.0 {
                // trailing edge
                continue;
            }
            let scale = len * density * speed * speed;

            let drag_mag = (drag_dot * cfg.drag * scale).min(cfg.max_drag).max(-cfg.max_drag);
            let drag = dir * -drag_mag;
            if is_finite(drag) {
                world.apply_force(body, drag, mid, true);
                applied += 1;
            }

            let lift_dot = tangent.dot(&dir);
            let lift_mag = (drag_dot * lift_dot * cfg.lift * scale)
                .min(cfg.max_lift)
                .max(-cfg.max_lift);
            let lift = Vector2::new(-dir.y, dir.x) * lift_mag;
            if is_finite(lift) {
                world.apply_force(body, lift, mid, true);
                applied += 1;
            }
        }
        applied
    }
}

fn fluid_polygon<W: PhysicsWorld>(
    world: &W,
    fluid: W::Fixture,
) -> Result<Vec<Vector2<f64>>, BuoyancyError> {
    let shape = world
        .fixture_shape(fluid)
        .ok_or_else(|| BuoyancyError::invalid_fluid(format!("unknown fixture {fluid:?}")))?;
    if shape.as_polygon().is_none() {
        return Err(BuoyancyError::invalid_fluid(format!(
            "fixture {fluid:?} is a {}",
            shape.kind()
        )));
    }
    world_polygon(world, fluid)
        .ok_or_else(|| BuoyancyError::invalid_fluid(format!("fixture {fluid:?} has no polygon")))
}

#[inline]
fn is_finite(v: Vector2<f64>) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
