//! Static k-d tree over 2D points.
//!
//! The tree is a recursive binary partition built once from a snapshot of the
//! input; any update requires a full rebuild. Each level splits on the median
//! of the active axis (x at even depth, y at odd depth), determined by a full
//! sort of the subset at that level. The O(n log² n) build is deliberate:
//! point sets here are interactive-scale, and the sort keeps the split
//! unambiguous for duplicate coordinates.
//!
//! # Example
//!
//! ```
//! use planum::spatial::KdTree;
//! use planum::Point2;
//!
//! let points: Vec<Point2<f64>> = vec![
//!     Point2::new(2.0, 3.0),
//!     Point2::new(5.0, 4.0),
//!     Point2::new(9.0, 6.0),
//!     Point2::new(4.0, 7.0),
//! ];
//!
//! let tree = KdTree::build(&points);
//! let (nearest, _dist) = tree.nearest(Point2::new(5.0, 5.0)).unwrap();
//! assert_eq!(nearest, Point2::new(5.0, 4.0));
//! ```

use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;
use tracing::trace;

/// A node in the k-d tree.
///
/// Exposes its point, depth, and children for traversal by consumers. The
/// splitting axis is `depth % 2` (0 = x, 1 = y). The tree exclusively owns
/// its subtrees and is immutable once built.
#[derive(Debug, Clone)]
pub struct KdNode<F> {
    /// The point stored at this node (the median of its subset).
    pub point: Point2<F>,
    /// Depth of this node; determines the splitting axis.
    pub depth: usize,
    /// Points whose active-axis coordinate is ≤ this node's.
    pub left: Option<Box<KdNode<F>>>,
    /// Points whose active-axis coordinate is ≥ this node's.
    pub right: Option<Box<KdNode<F>>>,
}

impl<F: Float> KdNode<F> {
    /// The splitting axis at this node: 0 for x, 1 for y.
    #[inline]
    pub fn axis(&self) -> usize {
        self.depth % 2
    }

    /// This node's coordinate on its splitting axis.
    #[inline]
    pub fn split_coord(&self) -> F {
        axis_coord(self.point, self.axis())
    }
}

#[inline]
fn axis_coord<F: Float>(p: Point2<F>, axis: usize) -> F {
    if axis == 0 {
        p.x
    } else {
        p.y
    }
}

/// A static 2D k-d tree.
///
/// Holds owned copies of the input points; the caller's collection is never
/// touched. Every input point appears in the tree exactly once.
#[derive(Debug, Clone)]
pub struct KdTree<F> {
    /// Root of the partition, `None` for an empty input.
    pub root: Option<Box<KdNode<F>>>,
    size: usize,
}

impl<F: Float> KdTree<F> {
    /// Builds a k-d tree from a slice of points.
    ///
    /// Returns an empty tree (no root) if the input is empty.
    pub fn build(points: &[Point2<F>]) -> Self {
        let mut owned: Vec<Point2<F>> = points.to_vec();
        let root = Self::build_recursive(&mut owned, 0);
        KdTree {
            root,
            size: points.len(),
        }
    }

    fn build_recursive(points: &mut [Point2<F>], depth: usize) -> Option<Box<KdNode<F>>> {
        if points.is_empty() {
            return None;
        }

        let axis = depth % 2;
        points.sort_by(|a, b| {
            axis_coord(*a, axis)
                .partial_cmp(&axis_coord(*b, axis))
                .unwrap_or(Ordering::Equal)
        });

        let median = points.len() / 2;
        trace!(depth, axis, median, "split");

        let (left_half, rest) = points.split_at_mut(median);
        let (node_point, right_half) = rest.split_first_mut().map(|(p, r)| (*p, r))?;

        Some(Box::new(KdNode {
            point: node_point,
            depth,
            left: Self::build_recursive(left_half, depth + 1),
            right: Self::build_recursive(right_half, depth + 1),
        }))
    }

    /// Returns the number of points in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Finds the nearest point to a query point.
    ///
    /// Returns the point and its distance, or `None` for an empty tree.
    pub fn nearest(&self, query: Point2<F>) -> Option<(Point2<F>, F)> {
        let root = self.root.as_ref()?;
        let mut best: Option<(Point2<F>, F)> = None;
        Self::nearest_recursive(root, query, &mut best);
        best
    }

    fn nearest_recursive(node: &KdNode<F>, query: Point2<F>, best: &mut Option<(Point2<F>, F)>) {
        let dist = node.point.distance(query);
        match best {
            None => *best = Some((node.point, dist)),
            Some((_, best_dist)) if dist < *best_dist => *best = Some((node.point, dist)),
            _ => {}
        }

        let query_val = axis_coord(query, node.axis());
        let split_val = node.split_coord();

        let (first, second) = if query_val < split_val {
            (&node.left, &node.right)
        } else {
            (&node.right, &node.left)
        };

        if let Some(child) = first {
            Self::nearest_recursive(child, query, best);
        }

        // The far side can only matter if the splitting plane is closer
        // than the best distance found so far
        let axis_dist = (query_val - split_val).abs();
        let should_search_other = match best {
            None => true,
            Some((_, best_dist)) => axis_dist < *best_dist,
        };

        if should_search_other {
            if let Some(child) = second {
                Self::nearest_recursive(child, query, best);
            }
        }
    }

    /// Finds all points within a given distance of a query point.
    pub fn within_radius(&self, query: Point2<F>, radius: F) -> Vec<Point2<F>> {
        let mut results = Vec::new();
        if let Some(root) = &self.root {
            Self::radius_recursive(root, query, radius, &mut results);
        }
        results
    }

    fn radius_recursive(
        node: &KdNode<F>,
        query: Point2<F>,
        radius: F,
        results: &mut Vec<Point2<F>>,
    ) {
        if node.point.distance(query) <= radius {
            results.push(node.point);
        }

        let query_val = axis_coord(query, node.axis());
        let split_val = node.split_coord();

        if let Some(child) = &node.left {
            if query_val - radius <= split_val {
                Self::radius_recursive(child, query, radius, results);
            }
        }
        if let Some(child) = &node.right {
            if query_val + radius >= split_val {
                Self::radius_recursive(child, query, radius, results);
            }
        }
    }
}
