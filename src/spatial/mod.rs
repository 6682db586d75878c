//! Spatial partitioning structures.
//!
//! - [`KdTree`] - a static 2D k-d tree with nearest and radius queries

mod kdtree;

pub use kdtree::{KdNode, KdTree};
