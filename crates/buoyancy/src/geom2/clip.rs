//! Sutherland–Hodgman clipping of a polygon against a convex clip polygon.
//!
//! The subject is walked once per clip edge; each pass keeps the part of the
//! subject strictly left of that edge. Output winding follows the subject.
//!
//! Degeneracies
//! - Points exactly on a clip edge count as outside.
//! - Parallel subject/clip edges make `edge_intersection` divide by zero; the result is
//!   non-finite and is left for the area check in `props` to reject.

use nalgebra::Vector2;

use super::types::GeomError;
use crate::cross2;

/// True iff `p` lies strictly left of the directed edge `e1 → e2`.
#[inline]
pub fn is_inside_edge(p: Vector2<f64>, e1: Vector2<f64>, e2: Vector2<f64>) -> bool {
    (e2.x - e1.x) * (p.y - e1.y) > (e2.y - e1.y) * (p.x - e1.x)
}

/// Intersection of the line through `cp1, cp2` with the line through `s, e`.
#[inline]
pub fn edge_intersection(
    cp1: Vector2<f64>,
    cp2: Vector2<f64>,
    s: Vector2<f64>,
    e: Vector2<f64>,
) -> Vector2<f64> {
    let dc = cp1 - cp2;
    let dp = s - e;
    let n1 = cross2(cp1, cp2);
    let n2 = cross2(s, e);
    let inv = 1.0 / cross2(dc, dp);
    (dp * n1 - dc * n2) * inv
}

/// Clip `subject` against the convex, counter-clockwise `clip` polygon.
///
/// Returns the vertices of the overlap (possibly empty). The subject may have any number
/// of vertices; an empty subject yields an empty result.
///
/// Errors
/// - `GeomError::DegenerateClip` if `clip` has fewer than three vertices.
pub fn clip_polygon(
    subject: &[Vector2<f64>],
    clip: &[Vector2<f64>],
) -> Result<Vec<Vector2<f64>>, GeomError> {
    if clip.len() < 3 {
        return Err(GeomError::DegenerateClip {
            vertices: clip.len(),
        });
    }
    let mut output: Vec<Vector2<f64>> = subject.to_vec();
    let mut input: Vec<Vector2<f64>> = Vec::with_capacity(subject.len() + clip.len());
    let mut cp1 = clip[clip.len() - 1];
    for &cp2 in clip {
        if output.is_empty() {
            return Ok(output);
        }
        std::mem::swap(&mut input, &mut output);
        output.clear();
        let mut s = input[input.len() - 1];
        for &e in &input {
            if is_inside_edge(e, cp1, cp2) {
                if !is_inside_edge(s, cp1, cp2) {
                    output.push(edge_intersection(cp1, cp2, s, e));
                }
                output.push(e);
            } else if is_inside_edge(s, cp1, cp2) {
                output.push(edge_intersection(cp1, cp2, s, e));
            }
            s = e;
        }
        cp1 = cp2;
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn unit_square() -> Vec<Vector2<f64>> {
        vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 1.0],
        ]
    }

    #[test]
    fn inside_test_is_strict() {
        let a = vector![0.0, 0.0];
        let b = vector![1.0, 0.0];
        assert!(is_inside_edge(vector![0.5, 0.1], a, b));
        assert!(!is_inside_edge(vector![0.5, -0.1], a, b));
        // on the line: outside
        assert!(!is_inside_edge(vector![0.5, 0.0], a, b));
    }

    #[test]
    fn intersection_of_axes() {
        let p = edge_intersection(
            vector![-1.0, 0.0],
            vector![1.0, 0.0],
            vector![0.25, -1.0],
            vector![0.25, 1.0],
        );
        assert!((p - vector![0.25, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn parallel_edges_are_not_finite() {
        let p = edge_intersection(
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![0.0, 1.0],
            vector![1.0, 1.0],
        );
        assert!(!p.x.is_finite() || !p.y.is_finite());
    }

    #[test]
    fn rejects_short_clip_polygon() {
        let sq = unit_square();
        assert_eq!(
            clip_polygon(&sq, &sq[..2]),
            Err(GeomError::DegenerateClip { vertices: 2 })
        );
    }

    #[test]
    fn empty_subject_gives_empty_output() {
        let out = clip_polygon(&[], &unit_square()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn half_overlap_keeps_subject_winding() {
        let sq = unit_square();
        let shifted: Vec<_> = sq.iter().map(|p| p + vector![0.5, 0.0]).collect();
        let out = clip_polygon(&sq, &shifted).unwrap();
        assert_eq!(out.len(), 4);
        assert!(crate::geom2::signed_area(&out) > 0.0);
        for p in &out {
            assert!(p.x >= 0.5 - 1e-12 && p.x <= 1.0 + 1e-12);
        }
    }
}
