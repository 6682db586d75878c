//! Convex hull construction.
//!
//! Two interchangeable algorithms behind one contract, selected by
//! [`HullAlgorithm`]: gift wrapping (Jarvis march, O(n·h)) and a monotone
//! chain scan (Andrew's variant of the Graham scan, O(n log n)). Both return
//! the hull boundary in counter-clockwise order, implicitly closed (the last
//! vertex connects back to the first).
//!
//! The unified degenerate-input contract: fewer than 3 points are returned
//! unchanged. Callers that want an explicit failure instead use
//! [`try_convex_hull`].
//!
//! # Example
//!
//! ```
//! use planum::hull::{convex_hull, HullAlgorithm};
//! use planum::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(4.0, 0.0),
//!     Point2::new(4.0, 4.0),
//!     Point2::new(0.0, 4.0),
//!     Point2::new(2.0, 2.0), // interior
//! ];
//!
//! let hull = convex_hull(&points, HullAlgorithm::MonotoneChain);
//! assert_eq!(hull.len(), 4);
//! ```

use crate::error::GeometryError;
use crate::primitives::Point2;
use num_traits::Float;

/// Selects which convex hull algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullAlgorithm {
    /// Jarvis march: O(n·h), walks the boundary point by point.
    GiftWrapping,
    /// Monotone chain scan: O(n log n), sorts then builds two chains.
    MonotoneChain,
}

/// Computes the convex hull of a point set with the selected algorithm.
///
/// Returns the hull vertices in counter-clockwise order, implicitly cyclic.
/// Fewer than 3 points are returned unchanged (graceful degradation).
pub fn convex_hull<F: Float>(points: &[Point2<F>], algorithm: HullAlgorithm) -> Vec<Point2<F>> {
    match algorithm {
        HullAlgorithm::GiftWrapping => gift_wrapping(points),
        HullAlgorithm::MonotoneChain => monotone_chain(points),
    }
}

/// Computes the convex hull, failing explicitly on insufficient input.
///
/// Identical to [`convex_hull`] for 3 or more points; returns
/// [`GeometryError::InsufficientPoints`] otherwise.
pub fn try_convex_hull<F: Float>(
    points: &[Point2<F>],
    algorithm: HullAlgorithm,
) -> Result<Vec<Point2<F>>, GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::InsufficientPoints {
            needed: 3,
            got: points.len(),
        });
    }
    Ok(convex_hull(points, algorithm))
}

/// Computes the convex hull by gift wrapping (Jarvis march).
///
/// The walk starts at the point with the lowest y coordinate, ties broken by
/// the lowest x. At each step the next hull point is the candidate minimizing
/// the turn angle from the previous hull edge, measured as the inverse cosine
/// of the normalized dot product. The cosine argument is clamped to [-1, 1]
/// before inversion; near-collinear triples otherwise push it fractionally
/// outside the domain and produce NaN.
///
/// Returns the hull in counter-clockwise order. Fewer than 3 points are
/// returned unchanged.
pub fn gift_wrapping<F: Float>(points: &[Point2<F>]) -> Vec<Point2<F>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let start = lowest_point_index(points);
    let mut hull: Vec<Point2<F>> = vec![points[start]];

    let mut current = start;
    // Virtual predecessor one unit to the left, so the first edge direction
    // is +x and the walk turns counter-clockwise.
    let mut previous = Point2::new(points[start].x - F::one(), points[start].y);

    loop {
        let mut next: Option<usize> = None;
        let mut smallest_angle = F::infinity();

        for (i, &candidate) in points.iter().enumerate() {
            if i == current {
                continue;
            }

            let Some(angle) = turn_angle(previous, points[current], candidate) else {
                // Coincides with the current point
                continue;
            };

            if angle < smallest_angle {
                smallest_angle = angle;
                next = Some(i);
            }
        }

        let Some(next) = next else {
            // Every other point coincides with the current one
            break;
        };

        previous = points[current];
        current = next;

        if current == start {
            break;
        }
        hull.push(points[current]);
    }

    hull
}

/// Angle between the edge `previous -> current` and `current -> candidate`.
///
/// Returns `None` when the candidate coincides with `current`.
fn turn_angle<F: Float>(previous: Point2<F>, current: Point2<F>, candidate: Point2<F>) -> Option<F> {
    let incoming = current - previous;
    let outgoing = candidate - current;

    let mag = incoming.magnitude() * outgoing.magnitude();
    if mag <= F::zero() {
        return None;
    }

    let cos = (incoming.dot(outgoing) / mag).max(-F::one()).min(F::one());
    Some(cos.acos())
}

/// Index of the point with the lowest y, ties broken by lowest x.
fn lowest_point_index<F: Float>(points: &[Point2<F>]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let b = points[best];
        if p.y < b.y || (p.y == b.y && p.x < b.x) {
            best = i;
        }
    }
    best
}

/// Computes the convex hull by the monotone chain scan.
///
/// Sorts points lexicographically (by x, ties by y), builds the lower and
/// upper chains independently while popping any triple that is not a strict
/// left turn, then concatenates the chains dropping the duplicated shared
/// endpoints.
///
/// Returns the hull in counter-clockwise order starting from the bottom-left
/// point. Fewer than 3 points are returned unchanged.
pub fn monotone_chain<F: Float>(points: &[Point2<F>]) -> Vec<Point2<F>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted: Vec<Point2<F>> = points.to_vec();
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lower: Vec<Point2<F>> = Vec::new();
    for &p in &sorted {
        while lower.len() >= 2
            && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], &p) <= F::zero()
        {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point2<F>> = Vec::new();
    for &p in sorted.iter().rev() {
        while upper.len() >= 2
            && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], &p) <= F::zero()
        {
            upper.pop();
        }
        upper.push(p);
    }

    // Last point of each chain duplicates the first of the other
    lower.pop();
    upper.pop();

    lower.extend(upper);
    lower
}

/// Computes the area of a convex hull via the shoelace formula.
///
/// Returns 0 for fewer than 3 vertices.
pub fn convex_hull_area<F: Float>(hull: &[Point2<F>]) -> F {
    if hull.len() < 3 {
        return F::zero();
    }

    let mut area = F::zero();
    let n = hull.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area = area + hull[i].x * hull[j].y;
        area = area - hull[j].x * hull[i].y;
    }

    area.abs() / F::from(2.0).unwrap()
}

/// Computes the perimeter of a convex hull.
///
/// Returns 0 for fewer than 2 vertices.
pub fn convex_hull_perimeter<F: Float>(hull: &[Point2<F>]) -> F {
    if hull.len() < 2 {
        return F::zero();
    }

    let mut perimeter = F::zero();
    let n = hull.len();

    for i in 0..n {
        let j = (i + 1) % n;
        perimeter = perimeter + hull[i].distance(hull[j]);
    }

    perimeter
}

/// Tests if a point is inside a convex hull given in CCW order.
///
/// A point on the boundary counts as inside. Returns `false` for hulls with
/// fewer than 3 vertices.
pub fn point_in_convex_hull<F: Float>(hull: &[Point2<F>], point: Point2<F>) -> bool {
    if hull.len() < 3 {
        return false;
    }

    // Inside iff on or left of every directed hull edge
    let n = hull.len();
    for i in 0..n {
        let j = (i + 1) % n;
        if cross(&hull[i], &hull[j], &point) < F::zero() {
            return false;
        }
    }

    true
}

/// Cross product of vectors OA and OB where O is the origin point.
/// Positive if counter-clockwise, negative if clockwise, zero if collinear.
#[inline]
fn cross<F: Float>(o: &Point2<F>, a: &Point2<F>, b: &Point2<F>) -> F {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}
