//! planum - Planar computational geometry
//!
//! A small engine for interactive-scale 2D geometry: convex hulls, a static
//! k-d tree, Delaunay-style triangulation, and a Voronoi skeleton, all built
//! on a shared set of floating-point predicates. The triangulators favor
//! simplicity and predictability over asymptotic performance.

pub mod error;
pub mod hull;
pub mod predicates;
pub mod primitives;
pub mod spatial;
pub mod triangulation;

pub use error::GeometryError;
pub use hull::{convex_hull, try_convex_hull, HullAlgorithm};
pub use predicates::{circumcircle, orientation, segments_cross_properly, Orientation};
pub use primitives::{Circle2, Point2, Segment2, Vec2};
pub use spatial::{KdNode, KdTree};
pub use triangulation::{sweep_triangulate, triangulate, DelaunayMesh, Edge, VoronoiSkeleton};
