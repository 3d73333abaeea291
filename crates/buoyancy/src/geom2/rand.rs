//! Random convex polygons in 2D (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic convex test shapes for property tests and benches: hulls, bodies
//!   of arbitrary vertex count, fluids that are not axis-aligned boxes.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and radial
//!   jitter, take the convex hull (counter-clockwise), then translate to `center`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::util::convex_hull;

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    /// Inclusive vertex-count range before the hull step; clamped to at least 3.
    pub vertices: (usize, usize),
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub center: Vector2<f64>,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertices: (3, 12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            center: Vector2::zeros(),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// The next token in the same stream.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Draw a random convex polygon (CCW vertices, at least three).
///
/// Returns `None` only if the hull collapses, which needs degenerate `cfg` values
/// (e.g. a zero radius).
pub fn draw_convex_polygon(cfg: RadialCfg, tok: ReplayToken) -> Option<Vec<Vector2<f64>>> {
    let mut rng = tok.to_std_rng();
    let lo = cfg.vertices.0.max(3);
    let hi = cfg.vertices.1.max(lo);
    let n = rng.gen_range(lo..=hi);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    let pts: Vec<Vector2<f64>> = (0..n)
        .map(|k| {
            let theta = phase + (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let r = cfg.base_radius * (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj);
            cfg.center + Vector2::new(theta.cos(), theta.sin()) * r
        })
        .collect();
    convex_hull(&pts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::signed_area;

    #[test]
    fn reproducible_draw() {
        let cfg = RadialCfg {
            vertices: (10, 10),
            ..RadialCfg::default()
        };
        let tok = ReplayToken::new(42, 7);
        let p1 = draw_convex_polygon(cfg, tok).expect("poly");
        let p2 = draw_convex_polygon(cfg, tok).expect("poly");
        assert_eq!(p1, p2);
        let p3 = draw_convex_polygon(cfg, tok.next()).expect("poly");
        assert_ne!(p1, p3);
    }

    #[test]
    fn draws_are_ccw_and_centered_nearby() {
        let cfg = RadialCfg {
            center: Vector2::new(5.0, -3.0),
            ..RadialCfg::default()
        };
        let mut tok = ReplayToken::new(9, 0);
        for _ in 0..50 {
            let p = draw_convex_polygon(cfg, tok).unwrap();
            assert!(p.len() >= 3);
            assert!(signed_area(&p) > 0.0);
            for v in &p {
                assert!((v - cfg.center).norm() <= 1.25 + 1e-12);
            }
            tok = tok.next();
        }
    }
}
