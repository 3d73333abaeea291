//! Fixture shapes with an explicit kind tag.
//!
//! Only `Shape::Polygon` takes part in buoyancy; callers check `as_polygon()` instead of
//! attempting a polygon operation and recovering from failure.

use nalgebra::{Isometry2, Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geom2::{compute_properties, convex_hull, polar_moment, PolygonProperties};

/// Discriminator for `Shape`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Polygon,
    Circle,
    Edge,
    Chain,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShapeKind::Polygon => "polygon",
            ShapeKind::Circle => "circle",
            ShapeKind::Edge => "edge",
            ShapeKind::Chain => "chain",
        };
        f.write_str(s)
    }
}

/// Convex polygon in body-local coordinates.
///
/// Invariants:
/// - At least three vertices, counter-clockwise, strictly convex (no collinear runs).
/// - Positive area.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Vector2<f64>>,
}

impl ConvexPolygon {
    /// Convex hull of `points`; `None` if the hull has no area.
    pub fn from_points(points: &[Vector2<f64>]) -> Option<Self> {
        let vertices = convex_hull(points)?;
        let props = compute_properties(&vertices)?;
        if !props.has_area() {
            return None;
        }
        Some(Self { vertices })
    }

    /// Axis-aligned box centered on the body origin.
    pub fn rect(half_width: f64, half_height: f64) -> Option<Self> {
        Self::rect_at(half_width, half_height, Vector2::zeros(), 0.0)
    }

    /// Box with the given center and rotation, in body coordinates.
    pub fn rect_at(
        half_width: f64,
        half_height: f64,
        center: Vector2<f64>,
        angle: f64,
    ) -> Option<Self> {
        let iso = Isometry2::new(center, angle);
        let corners = [
            Vector2::new(-half_width, -half_height),
            Vector2::new(half_width, -half_height),
            Vector2::new(half_width, half_height),
            Vector2::new(-half_width, half_height),
        ];
        let pts: Vec<_> = corners
            .iter()
            .map(|c| iso.transform_point(&Point2::from(*c)).coords)
            .collect();
        Self::from_points(&pts)
    }

    /// Isosceles triangle with its apex on +y.
    pub fn triangle(half_width: f64, half_height: f64) -> Option<Self> {
        Self::from_points(&[
            Vector2::new(-half_width, -half_height),
            Vector2::new(half_width, -half_height),
            Vector2::new(0.0, half_height),
        ])
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices mapped through a body transform.
    pub fn world_vertices(&self, iso: &Isometry2<f64>) -> Vec<Vector2<f64>> {
        self.vertices
            .iter()
            .map(|v| iso.transform_point(&Point2::from(*v)).coords)
            .collect()
    }

    /// Local area and centroid.
    pub fn properties(&self) -> PolygonProperties {
        // construction guarantees ≥3 vertices with positive area
        compute_properties(&self.vertices).unwrap_or(PolygonProperties {
            centroid: Vector2::zeros(),
            area: 0.0,
        })
    }

    /// Moment of inertia about the local centroid.
    pub fn moment(&self, density: f64) -> f64 {
        polar_moment(&self.vertices, density)
    }
}

/// A fixture shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polygon(ConvexPolygon),
    Circle { center: Vector2<f64>, radius: f64 },
    Edge { a: Vector2<f64>, b: Vector2<f64> },
    Chain { vertices: Vec<Vector2<f64>> },
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Edge { .. } => ShapeKind::Edge,
            Shape::Chain { .. } => ShapeKind::Chain,
        }
    }

    #[inline]
    pub fn as_polygon(&self) -> Option<&ConvexPolygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Closed rectangular chain, the kind used for boundary walls.
    pub fn walls(half_width: f64, half_height: f64) -> Self {
        Shape::Chain {
            vertices: vec![
                Vector2::new(-half_width, -half_height),
                Vector2::new(half_width, -half_height),
                Vector2::new(half_width, half_height),
                Vector2::new(-half_width, half_height),
                Vector2::new(-half_width, -half_height),
            ],
        }
    }

    /// Local area and centroid for shapes that carry mass.
    pub fn mass_properties(&self) -> Option<PolygonProperties> {
        match self {
            Shape::Polygon(p) => Some(p.properties()),
            Shape::Circle { center, radius } => Some(PolygonProperties {
                centroid: *center,
                area: std::f64::consts::PI * radius * radius,
            }),
            Shape::Edge { .. } | Shape::Chain { .. } => None,
        }
    }

    /// Moment of inertia about the shape's own centroid.
    pub fn moment(&self, density: f64) -> f64 {
        match self {
            Shape::Polygon(p) => p.moment(density),
            Shape::Circle { radius, .. } => {
                let mass = density * std::f64::consts::PI * radius * radius;
                0.5 * mass * radius * radius
            }
            Shape::Edge { .. } | Shape::Chain { .. } => 0.0,
        }
    }
}

impl From<ConvexPolygon> for Shape {
    fn from(p: ConvexPolygon) -> Self {
        Shape::Polygon(p)
    }
}
