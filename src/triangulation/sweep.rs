//! Hull-sweep triangulation.
//!
//! A fast, non-Delaunay triangulator over the convex hull: pick the lowest
//! hull vertex as a reference, sort the remaining hull vertices by polar
//! angle around it, then sweep once while a stack of visible vertices is
//! folded into fan triangles. Interior points are not part of the output;
//! the result is a cheap wireframe of the hull when mesh quality does not
//! matter.

use crate::hull::{convex_hull, HullAlgorithm};
use crate::primitives::{Point2, Segment2};
use num_traits::Float;
use tracing::{debug, trace};

/// Triangulates the convex hull of a point set by a polar-angle sweep.
///
/// Only hull vertices participate; points strictly inside the hull never
/// appear in the output. Returns the triangulation as segments, with
/// duplicates where adjacent triangles share an edge. Fewer than 3 hull
/// points yield an empty result.
pub fn sweep_triangulate<F: Float>(points: &[Point2<F>]) -> Vec<Segment2<F>> {
    let hull = convex_hull(points, HullAlgorithm::GiftWrapping);
    if hull.len() < 3 {
        return Vec::new();
    }

    let mut sorted = hull;
    let reference = lowest_point(&sorted);
    sort_by_polar_angle(&mut sorted, reference);
    debug!(n = sorted.len(), "sweeping hull from reference point");

    let mut segments = Vec::new();
    let mut stack: Vec<Point2<F>> = Vec::new();

    for &p in &sorted {
        if p == reference {
            continue;
        }

        while stack.len() >= 2 {
            let top = stack[stack.len() - 1];
            let below = stack[stack.len() - 2];
            // p sees the stack top from the outside: close the triangle
            if on_opposite_side(below, top, reference, p) {
                segments.push(Segment2::new(top, p));
                trace!("popping occluded point");
                stack.pop();
            } else {
                break;
            }
        }

        if let Some(&top) = stack.last() {
            segments.push(Segment2::new(top, p));
        }
        segments.push(Segment2::new(reference, p));
        stack.push(p);
    }

    // Drain the stack: each remaining vertex connects to its neighbor
    while stack.len() >= 2 {
        let Some(top) = stack.pop() else { break };
        if let Some(&next) = stack.last() {
            segments.push(Segment2::new(next, top));
        }
    }

    segments
}

/// The lowest point (smallest y, ties broken by smallest x).
fn lowest_point<F: Float>(points: &[Point2<F>]) -> Point2<F> {
    let mut best = points[0];
    for &p in &points[1..] {
        if p.y < best.y || (p.y == best.y && p.x < best.x) {
            best = p;
        }
    }
    best
}

/// Sorts points by polar angle around the reference, nearest angle first.
fn sort_by_polar_angle<F: Float>(points: &mut [Point2<F>], reference: Point2<F>) {
    points.sort_by(|a, b| {
        let angle_a = (a.y - reference.y).atan2(a.x - reference.x);
        let angle_b = (b.y - reference.y).atan2(b.x - reference.x);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Whether `p` lies strictly on the opposite side of the line `a -> b`
/// from `q`.
fn on_opposite_side<F: Float>(a: Point2<F>, b: Point2<F>, q: Point2<F>, p: Point2<F>) -> bool {
    side(a, b, p) * side(a, b, q) < F::zero()
}

#[inline]
fn side<F: Float>(a: Point2<F>, b: Point2<F>, p: Point2<F>) -> F {
    (b - a).cross(p - a)
}
