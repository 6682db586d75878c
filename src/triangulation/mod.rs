//! Triangulation of planar point sets.
//!
//! Two triangulators with different goals:
//! - [`triangulate`] builds a Delaunay-style mesh over an active-edge
//!   worklist, returning an index-based [`DelaunayMesh`]
//! - [`sweep_triangulate`] is a fast polar-angle sweep over the convex hull
//!   that returns a flat segment soup without Delaunay quality
//!
//! [`VoronoiSkeleton`] derives a partial Voronoi dual from a Delaunay mesh.

pub mod delaunay;
pub mod sweep;
pub mod voronoi;

pub use delaunay::{triangulate, DelaunayMesh, Edge};
pub use sweep::sweep_triangulate;
pub use voronoi::VoronoiSkeleton;
