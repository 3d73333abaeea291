//! Area, centroid and polar moment of simple polygons.
//!
//! All three triangulate as a fan from the origin. The reference point does not change
//! the result beyond rounding, and keeping it fixed makes the sums reproducible.

use nalgebra::Vector2;

use super::types::AREA_EPS;
use crate::cross2;

/// Area and area-weighted centroid of a polygon.
///
/// When `area == 0` the centroid is not meaningful; check `has_area()` first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonProperties {
    pub centroid: Vector2<f64>,
    pub area: f64,
}

impl PolygonProperties {
    /// Positive, finite area with a finite centroid.
    #[inline]
    pub fn has_area(&self) -> bool {
        self.area > 0.0
            && self.area.is_finite()
            && self.centroid.x.is_finite()
            && self.centroid.y.is_finite()
    }
}

/// Area and centroid with the default area clamp (`f32::EPSILON`).
///
/// Returns `None` for fewer than three points. Counter-clockwise input gives a positive
/// area; anything at or below the clamp (including clockwise input) reports `area = 0`.
pub fn compute_properties(points: &[Vector2<f64>]) -> Option<PolygonProperties> {
    compute_properties_eps(points, AREA_EPS)
}

/// `compute_properties` with an explicit area clamp.
pub fn compute_properties_eps(points: &[Vector2<f64>], eps: f64) -> Option<PolygonProperties> {
    let count = points.len();
    if count < 3 {
        return None;
    }
    let reference = Vector2::zeros();
    let mut centroid = Vector2::zeros();
    let mut area = 0.0;
    for i in 0..count {
        let p2 = points[i];
        let p3 = points[(i + 1) % count];
        let triangle_area = 0.5 * cross2(p2 - reference, p3 - reference);
        area += triangle_area;
        centroid += (reference + p2 + p3) * (triangle_area / 3.0);
    }
    if area > eps {
        centroid /= area;
    } else {
        area = 0.0;
    }
    Some(PolygonProperties { centroid, area })
}

/// Shoelace signed area (positive for counter-clockwise order).
pub fn signed_area(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        twice += cross2(points[i], points[(i + 1) % n]);
    }
    0.5 * twice
}

/// Moment of inertia about the centroid of a uniform polygon with the given density.
///
/// Returns 0 for polygons without area.
pub fn polar_moment(points: &[Vector2<f64>], density: f64) -> f64 {
    let Some(props) = compute_properties(points) else {
        return 0.0;
    };
    if !props.has_area() {
        return 0.0;
    }
    let n = points.len();
    let mut about_origin = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        about_origin += cross2(a, b) * (a.dot(&a) + a.dot(&b) + b.dot(&b));
    }
    about_origin *= density / 12.0;
    let mass = density * props.area;
    // parallel axis theorem: shift from origin to centroid
    (about_origin - mass * props.centroid.norm_squared()).max(0.0)
}
