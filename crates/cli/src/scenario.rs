//! JSON scenarios: a rectangular pool, a controller configuration, and the bodies
//! dropped into it.
//!
//! Missing fields take the defaults of the standard pool: fluid from (-9,-2.5) to
//! (9,-0.5) with density 2, one 2×2 box of density 0.5 released at (0,2).

use anyhow::{anyhow, bail, Context, Result};
use buoyancy::sandbox::{BodyDef, BodyId, FixtureDef, World};
use buoyancy::{BuoyancyController, ControllerCfg, ConvexPolygon, Shape, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub gravity: [f64; 2],
    /// Fixed time step in seconds.
    pub dt: f64,
    pub allow_sleep: bool,
    pub fluid: FluidSpec,
    pub controller: ControllerCfg,
    pub bodies: Vec<BodySpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            gravity: [0.0, -10.0],
            dt: 1.0 / 60.0,
            allow_sleep: true,
            fluid: FluidSpec::default(),
            controller: ControllerCfg::default(),
            bodies: vec![BodySpec::default()],
        }
    }
}

/// Axis-aligned fluid box. A nonzero `velocity` makes it a kinematic current.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidSpec {
    pub center: [f64; 2],
    pub half_extents: [f64; 2],
    pub density: f64,
    pub velocity: [f64; 2],
}

impl Default for FluidSpec {
    fn default() -> Self {
        Self {
            center: [0.0, -1.5],
            half_extents: [9.0, 1.0],
            density: 2.0,
            velocity: [0.0, 0.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySpec {
    pub shape: ShapeSpec,
    pub position: [f64; 2],
    pub angle: f64,
    pub density: f64,
    pub velocity: [f64; 2],
    pub angular_velocity: f64,
}

impl Default for BodySpec {
    fn default() -> Self {
        Self {
            shape: ShapeSpec::Box {
                half_width: 1.0,
                half_height: 1.0,
            },
            position: [0.0, 2.0],
            angle: 0.0,
            density: 0.5,
            velocity: [0.0, 0.0],
            angular_velocity: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeSpec {
    Box { half_width: f64, half_height: f64 },
    Triangle { half_width: f64, half_height: f64 },
    /// Local-frame vertices; reordered into a counter-clockwise hull.
    Polygon { vertices: Vec<[f64; 2]> },
    /// Accepted by the world but never tracked by the controller.
    Circle { radius: f64 },
}

impl ShapeSpec {
    fn build(&self) -> Result<Shape> {
        let polygon = match self {
            ShapeSpec::Box {
                half_width,
                half_height,
            } => ConvexPolygon::rect(*half_width, *half_height),
            ShapeSpec::Triangle {
                half_width,
                half_height,
            } => ConvexPolygon::triangle(*half_width, *half_height),
            ShapeSpec::Polygon { vertices } => {
                let points: Vec<Vec2<f64>> =
                    vertices.iter().map(|p| Vec2::new(p[0], p[1])).collect();
                ConvexPolygon::from_points(&points)
            }
            ShapeSpec::Circle { radius } => {
                if !(radius.is_finite() && *radius > 0.0) {
                    bail!("circle radius must be positive, got {radius}");
                }
                return Ok(Shape::Circle {
                    center: Vec2::zeros(),
                    radius: *radius,
                });
            }
        };
        polygon
            .map(Shape::from)
            .ok_or_else(|| anyhow!("degenerate polygon shape {self:?}"))
    }
}

/// A populated world with its controller and the bodies to record, in scenario order.
pub struct Built {
    pub world: World,
    pub controller: BuoyancyController<World>,
    pub bodies: Vec<BodyId>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn build(&self) -> Result<Built> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            bail!("dt must be positive, got {}", self.dt);
        }
        let mut world = World::new(vec2(self.gravity)).with_sleeping(self.allow_sleep);

        let [hw, hh] = self.fluid.half_extents;
        let pool = ConvexPolygon::rect(hw, hh)
            .ok_or_else(|| anyhow!("fluid box needs positive half extents, got {hw}×{hh}"))?;
        let velocity = vec2(self.fluid.velocity);
        let mut cfg = self.controller;
        let def = if velocity == Vec2::zeros() {
            BodyDef::fixed(vec2(self.fluid.center))
        } else {
            // a moving pool is re-read every step
            if cfg.fluid_fixed {
                tracing::debug!("moving fluid; fluid_fixed overridden");
                cfg.fluid_fixed = false;
            }
            BodyDef::kinematic(vec2(self.fluid.center), velocity)
        };
        let water = world.create_body(def);
        let fluid = world.create_fixture(water, FixtureDef::sensor(pool.into(), self.fluid.density))?;
        let controller = BuoyancyController::new(&world, fluid, cfg)?;

        let mut bodies = Vec::with_capacity(self.bodies.len());
        for (i, spec) in self.bodies.iter().enumerate() {
            let shape = spec.shape.build().with_context(|| format!("body {i}"))?;
            let mut def = BodyDef::dynamic(vec2(spec.position)).with_angle(spec.angle);
            def.linear_velocity = vec2(spec.velocity);
            def.angular_velocity = spec.angular_velocity;
            let body = world.create_body(def);
            world
                .create_fixture(body, FixtureDef::solid(shape, spec.density))
                .with_context(|| format!("body {i}"))?;
            bodies.push(body);
        }
        tracing::debug!(bodies = bodies.len(), "scenario built");
        Ok(Built {
            world,
            controller,
            bodies,
        })
    }
}

fn vec2(p: [f64; 2]) -> Vec2<f64> {
    Vec2::new(p[0], p[1])
}
