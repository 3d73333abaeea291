//! Vertex-list 2D geometry for convex polygons.
//!
//! Purpose
//! - Clip one convex polygon against another (Sutherland–Hodgman) and compute the
//!   area and centroid of the result, every simulation step.
//! - Keep the API small and numerically explicit: tolerances come from `GeomCfg`,
//!   degeneracies surface as zero area rather than panics.
//!
//! Conventions
//! - Polygons are `&[Vector2<f64>]` in counter-clockwise order. "Inside" an edge means
//!   strictly to its left.
//! - Code cross-refs: `clip_polygon`, `compute_properties`, `GeomCfg`

mod clip;
mod props;
pub mod rand;
mod types;
mod util;

pub use clip::{clip_polygon, edge_intersection, is_inside_edge};
pub use props::{
    compute_properties, compute_properties_eps, polar_moment, signed_area, PolygonProperties,
};
pub use types::{GeomCfg, GeomError, AREA_EPS};
pub use util::convex_hull;
