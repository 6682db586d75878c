//! Voronoi skeleton derived from a Delaunay mesh.
//!
//! For each Delaunay edge the builder finds one triangle containing it,
//! takes that triangle's circumcenter as a Voronoi vertex, and emits a
//! segment from the edge's first site to the circumcenter. This yields a
//! partial dual: one segment per Delaunay edge, anchored at the triangle
//! with the smallest-index third vertex, rather than the full cell
//! boundaries. The skeleton is enough to visualize cell structure and is
//! deterministic for a given mesh.

use crate::predicates::circumcircle;
use crate::primitives::{Point2, Segment2};
use crate::triangulation::delaunay::{DelaunayMesh, Edge};
use num_traits::Float;
use tracing::debug;

/// A partial Voronoi diagram built from a Delaunay mesh.
#[derive(Debug, Clone)]
pub struct VoronoiSkeleton<F> {
    /// Distinct circumcenters of the mesh triangles found, in discovery order.
    pub vertices: Vec<Point2<F>>,
    /// One segment per Delaunay edge whose triangle has a circumcircle,
    /// running from the edge's first site to the circumcenter.
    pub segments: Vec<Segment2<F>>,
}

impl<F: Float> VoronoiSkeleton<F> {
    /// Builds the skeleton from a Delaunay mesh.
    ///
    /// Edges whose triangles are degenerate (no circumcircle) and edges that
    /// belong to no triangle in the mesh are skipped.
    pub fn from_mesh(mesh: &DelaunayMesh<F>) -> Self {
        let mut vertices: Vec<Point2<F>> = Vec::new();
        let mut segments: Vec<Segment2<F>> = Vec::new();

        // Stable iteration order over the undirected edge set
        let mut edges: Vec<Edge> = mesh.edges.iter().copied().collect();
        edges.sort_by_key(|e| e.key());

        for &edge in &edges {
            let Some(third) = third_vertex(mesh, edge) else {
                continue;
            };

            let Some(circle) = circumcircle(
                mesh.points[edge.a],
                mesh.points[edge.b],
                mesh.points[third],
            ) else {
                continue;
            };

            if !vertices.contains(&circle.center) {
                vertices.push(circle.center);
            }
            segments.push(Segment2::new(mesh.points[edge.a], circle.center));
        }

        debug!(
            vertices = vertices.len(),
            segments = segments.len(),
            "voronoi skeleton built"
        );
        VoronoiSkeleton { vertices, segments }
    }
}

/// Finds the smallest-index vertex forming a mesh triangle with `edge`.
///
/// A vertex `q` completes a triangle when both `(edge.a, q)` and
/// `(edge.b, q)` are mesh edges. Scanning indices in order makes the choice
/// deterministic when the edge borders two triangles.
fn third_vertex<F: Float>(mesh: &DelaunayMesh<F>, edge: Edge) -> Option<usize> {
    (0..mesh.points.len()).find(|&q| {
        q != edge.a
            && q != edge.b
            && mesh.edges.contains(&Edge::new(edge.a, q))
            && mesh.edges.contains(&Edge::new(edge.b, q))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangulation::triangulate;

    #[test]
    fn test_empty_mesh() {
        let mesh = triangulate::<f64>(&[]);
        let skeleton = VoronoiSkeleton::from_mesh(&mesh);
        assert!(skeleton.vertices.is_empty());
        assert!(skeleton.segments.is_empty());
    }

    #[test]
    fn test_single_triangle() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(2.0, 3.0),
        ];
        let mesh = triangulate(&points);
        let skeleton = VoronoiSkeleton::from_mesh(&mesh);

        // All three edges share the one triangle and its circumcenter
        assert_eq!(skeleton.vertices.len(), 1);
        assert_eq!(skeleton.segments.len(), 3);

        let center = skeleton.vertices[0];
        let da = center.distance(points[0]);
        let db = center.distance(points[1]);
        let dc = center.distance(points[2]);
        assert!((da - db).abs() < 1e-10);
        assert!((db - dc).abs() < 1e-10);
    }

    #[test]
    fn test_one_segment_per_triangulated_edge() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let mesh = triangulate(&points);
        let skeleton = VoronoiSkeleton::from_mesh(&mesh);

        assert!(skeleton.segments.len() <= mesh.edges.len());
        assert!(!skeleton.segments.is_empty());
    }

    #[test]
    fn test_segments_start_at_sites() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(6.0, 1.0),
            Point2::new(3.0, 5.0),
            Point2::new(7.0, 6.0),
        ];
        let mesh = triangulate(&points);
        let skeleton = VoronoiSkeleton::from_mesh(&mesh);

        for s in &skeleton.segments {
            assert!(
                points.contains(&s.start),
                "segment start {:?} is not an input site",
                s.start
            );
        }
    }

    #[test]
    fn test_vertices_are_distinct() {
        let points = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(5.0, 5.0),
        ];
        let mesh = triangulate(&points);
        let skeleton = VoronoiSkeleton::from_mesh(&mesh);

        for (i, v) in skeleton.vertices.iter().enumerate() {
            for w in &skeleton.vertices[i + 1..] {
                assert_ne!(v, w, "duplicate voronoi vertex");
            }
        }
    }

    #[test]
    fn test_deterministic_for_same_mesh() {
        let points = vec![
            Point2::new(1.0_f64, 1.0),
            Point2::new(8.0, 2.0),
            Point2::new(5.0, 7.0),
            Point2::new(2.0, 6.0),
        ];
        let mesh = triangulate(&points);
        let s1 = VoronoiSkeleton::from_mesh(&mesh);
        let s2 = VoronoiSkeleton::from_mesh(&mesh);
        assert_eq!(s1.vertices, s2.vertices);
        assert_eq!(s1.segments.len(), s2.segments.len());
    }
}
