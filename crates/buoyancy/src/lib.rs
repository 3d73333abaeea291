//! Buoyancy, drag and lift for convex rigid bodies in a 2D fluid region.
//!
//! Layout
//! - `geom2`: Sutherland–Hodgman clipping, polygon mass properties, seeded random
//!   convex polygons.
//! - `shape`: tagged fixture shapes (`Shape`, `ConvexPolygon`).
//! - `engine`: the boundary to the physics engine that owns bodies and integrates forces.
//! - `controller`: `BuoyancyController`, the per-step force model.
//! - `sandbox`: a small rigid-body world implementing `engine::PhysicsWorld`; drives
//!   the integration tests and the CLI.
//!
//! Conventions
//! - World units are meters, polygons are counter-clockwise.
//! - All vector math is value-returning (`nalgebra::Vector2<f64>`); nothing mutates
//!   a shared vector in place.

pub mod controller;
pub mod engine;
pub mod geom2;
pub mod sandbox;
pub mod shape;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use controller::{Admission, BuoyancyController, BuoyancyError, ControllerCfg, StepReport};
pub use engine::PhysicsWorld;
pub use geom2::{clip_polygon, compute_properties, GeomCfg, GeomError, PolygonProperties};
pub use nalgebra::{Isometry2 as Iso2, Vector2 as Vec2};
pub use shape::{ConvexPolygon, Shape, ShapeKind};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::controller::{
        Admission, BuoyancyController, BuoyancyError, ControllerCfg, StepReport,
    };
    pub use crate::engine::{world_polygon, PhysicsWorld};
    pub use crate::geom2::rand::{draw_convex_polygon, RadialCfg, ReplayToken};
    pub use crate::geom2::{
        clip_polygon, compute_properties, polar_moment, signed_area, GeomCfg, GeomError,
        PolygonProperties,
    };
    pub use crate::shape::{ConvexPolygon, Shape, ShapeKind};
    pub use nalgebra::{Isometry2 as Iso2, Vector2 as Vec2};
}

/// Signed area of the parallelogram spanned by vectors `a` and `b` in R².
/// Positive for a→b counterclockwise, negative otherwise.
#[inline]
pub fn cross2(a: Vec2<f64>, b: Vec2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
