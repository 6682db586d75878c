//! Geometric predicates used by every other component.
//!
//! These are pure, stateless functions: an orientation test, the circumcircle
//! of a point triple, and a proper-crossing test for segments addressed by
//! point indices.

use crate::primitives::{Circle2, Point2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The three points make a left turn (counter-clockwise, positive area).
    Left,
    /// The three points make a right turn (clockwise, negative area).
    Right,
    /// The three points are collinear (zero area within tolerance).
    Collinear,
}

/// Computes the orientation of the turn `p -> q -> r`.
///
/// Returns [`Orientation::Left`] if `r` is to the left of the directed line
/// from `p` through `q`, [`Orientation::Right`] if to the right, and
/// [`Orientation::Collinear`] if the cross product magnitude does not exceed
/// `eps`.
///
/// The test is the sign of the cross product of `(q - p)` and `(r - p)`,
/// which equals twice the signed area of the triangle `pqr`.
#[inline]
pub fn orientation<F: Float>(p: Point2<F>, q: Point2<F>, r: Point2<F>, eps: F) -> Orientation {
    let cross = (q - p).cross(r - p);

    if cross > eps {
        Orientation::Left
    } else if cross < -eps {
        Orientation::Right
    } else {
        Orientation::Collinear
    }
}

/// Computes the circumcircle of three points.
///
/// Uses the standard determinant formula. Returns `None` when the denominator
/// `2 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y))` vanishes,
/// which happens exactly when the points are collinear (or coincident). The
/// `None` result is the no-circle sentinel: callers treat it as "no candidate"
/// or "skip", never as a fault.
///
/// Center and radius are kept in full floating precision; circumcenters are
/// reused as geometric inputs by the Voronoi builder, so no rounding happens
/// anywhere.
///
/// # Example
///
/// ```
/// use planum::predicates::circumcircle;
/// use planum::Point2;
///
/// // Right triangle: circumcenter at the midpoint of the hypotenuse
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let c = Point2::new(0.0, 1.0);
/// let circle = circumcircle(a, b, c).unwrap();
/// assert!((circle.center.x - 0.5).abs() < 1e-12);
/// assert!((circle.center.y - 0.5).abs() < 1e-12);
///
/// // Collinear points have no circumcircle
/// let d = Point2::new(2.0, 2.0);
/// let e = Point2::new(3.0, 3.0);
/// let f = Point2::new(4.0, 4.0);
/// assert!(circumcircle(d, e, f).is_none());
/// ```
pub fn circumcircle<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Option<Circle2<F>> {
    let two = F::from(2.0).unwrap();

    let d = two * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));

    if d.abs() < F::epsilon() {
        return None;
    }

    let aa = a.x * a.x + a.y * a.y;
    let bb = b.x * b.x + b.y * b.y;
    let cc = c.x * c.x + c.y * c.y;

    let ux = (aa * (b.y - c.y) + bb * (c.y - a.y) + cc * (a.y - b.y)) / d;
    let uy = (aa * (c.x - b.x) + bb * (a.x - c.x) + cc * (b.x - a.x)) / d;

    let center = Point2::new(ux, uy);
    Some(Circle2::new(center, center.distance(a)))
}

/// Tests whether two segments cross at an interior point.
///
/// `(a1, a2)` and `(b1, b2)` cross properly when each segment's endpoints lie
/// strictly on opposite sides of the other segment's supporting line. Touching
/// at an endpoint or collinear overlap does not count as a crossing.
pub fn segments_cross_properly<F: Float>(
    a1: Point2<F>,
    a2: Point2<F>,
    b1: Point2<F>,
    b2: Point2<F>,
) -> bool {
    let eps = F::epsilon();

    let o1 = orientation(a1, a2, b1, eps);
    let o2 = orientation(a1, a2, b2, eps);
    let o3 = orientation(b1, b2, a1, eps);
    let o4 = orientation(b1, b2, a2, eps);

    opposite(o1, o2) && opposite(o3, o4)
}

#[inline]
fn opposite(a: Orientation, b: Orientation) -> bool {
    matches!(
        (a, b),
        (Orientation::Left, Orientation::Right) | (Orientation::Right, Orientation::Left)
    )
}
