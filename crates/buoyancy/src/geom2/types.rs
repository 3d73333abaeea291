//! Tolerances and errors shared by the 2D routines.
//!
//! - `GeomCfg`: centralizes epsilons for the area clamp and the zero-speed guard.
//! - `GeomError`: contract violations (not degeneracies, which degrade to zero area).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-precision machine epsilon, the area below which a polygon counts as empty.
pub const AREA_EPS: f64 = f32::EPSILON as f64;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomCfg {
    /// Areas at or below this are clamped to zero.
    pub eps_area: f64,
    /// Relative speeds below this produce no drag or lift.
    pub eps_speed: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_area: AREA_EPS,
            eps_speed: 1e-9,
        }
    }
}

/// Caller contract violations in the geometry routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeomError {
    /// The clip polygon needs at least three vertices.
    DegenerateClip { vertices: usize },
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeomError::DegenerateClip { vertices } => write!(
                f,
                "clip polygon has {vertices} vertices (needs ≥3 to bound a region)"
            ),
        }
    }
}

impl std::error::Error for GeomError {}
