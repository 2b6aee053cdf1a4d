use super::super::GeometryGraph;
use super::SegmentIntersector;
use crate::GeoFloat;

use std::cell::RefCell;

/// Strategy for enumerating candidate segment pairs between edge sets.
pub(crate) trait EdgeSetIntersector<F: GeoFloat> {
    /// Compute all intersections between the edges within a graph,
    /// recording those intersections on the intersecting edges.
    ///
    /// `check_for_self_intersecting_edges`: if false, an edge is not
    /// checked for intersections with itself.
    fn compute_intersections_within_set(
        &self,
        graph: &GeometryGraph<F>,
        check_for_self_intersecting_edges: bool,
        segment_intersector: &mut SegmentIntersector<F>,
    );

    /// Compute all intersections between the edges of two graphs, recording
    /// those intersections on the intersecting edges.
    fn compute_intersections_between_sets(
        &self,
        graph0: &GeometryGraph<F>,
        graph1: &GeometryGraph<F>,
        segment_intersector: &mut SegmentIntersector<F>,
    );
}

/// Brute-force intersector; the oracle the indexed one must agree with.
pub(crate) struct SimpleEdgeSetIntersector;

impl<F: GeoFloat> EdgeSetIntersector<F> for SimpleEdgeSetIntersector {
    fn compute_intersections_within_set(
        &self,
        graph: &GeometryGraph<F>,
        check_for_self_intersecting_edges: bool,
        segment_intersector: &mut SegmentIntersector<F>,
    ) {
        let edges = graph.edges();
        for (i, edge0) in edges.iter().enumerate() {
            for edge1 in &edges[i..] {
                if !check_for_self_intersecting_edges && edge0.as_ptr() == edge1.as_ptr() {
                    continue;
                }
                for segment_0 in 0..RefCell::borrow(edge0).coords().len() - 1 {
                    for segment_1 in 0..RefCell::borrow(edge1).coords().len() - 1 {
                        segment_intersector.add_intersections(edge0, segment_0, edge1, segment_1);
                    }
                }
            }
        }
    }

    fn compute_intersections_between_sets(
        &self,
        graph0: &GeometryGraph<F>,
        graph1: &GeometryGraph<F>,
        segment_intersector: &mut SegmentIntersector<F>,
    ) {
        for edge0 in graph0.edges() {
            for edge1 in graph1.edges() {
                for segment_0 in 0..RefCell::borrow(edge0).coords().len() - 1 {
                    for segment_1 in 0..RefCell::borrow(edge1).coords().len() - 1 {
                        segment_intersector.add_intersections(edge0, segment_0, edge1, segment_1);
                    }
                }
            }
        }
    }
}

/// Intersector backed by the packed segment STR-tree of each graph. The
/// trees are cached on the graphs, so prepared geometries pay for them
/// once.
pub(crate) struct StrTreeEdgeSetIntersector;

impl<F: GeoFloat> EdgeSetIntersector<F> for StrTreeEdgeSetIntersector {
    fn compute_intersections_within_set(
        &self,
        graph: &GeometryGraph<F>,
        check_for_self_intersecting_edges: bool,
        segment_intersector: &mut SegmentIntersector<F>,
    ) {
        let tree = graph.get_or_build_tree();
        let edges = graph.edges();

        for (edge_idx, edge) in edges.iter().enumerate() {
            let coord_count = RefCell::borrow(edge).coords().len();
            for segment_idx in 0..coord_count - 1 {
                let p1 = RefCell::borrow(edge).coords()[segment_idx];
                let p2 = RefCell::borrow(edge).coords()[segment_idx + 1];
                let envelope = crate::Rect::new(p1, p2);
                let mut candidates = Vec::new();
                tree.query(&envelope, &mut |_env, candidate: &super::Segment<F>| {
                    candidates.push((candidate.edge_idx, candidate.segment_idx));
                });
                for (other_edge_idx, other_segment_idx) in candidates {
                    // visit each unordered pair once
                    if (other_edge_idx, other_segment_idx) <= (edge_idx, segment_idx) {
                        continue;
                    }
                    if !check_for_self_intersecting_edges && other_edge_idx == edge_idx {
                        continue;
                    }
                    segment_intersector.add_intersections(
                        edge,
                        segment_idx,
                        &edges[other_edge_idx],
                        other_segment_idx,
                    );
                }
            }
        }
    }

    fn compute_intersections_between_sets(
        &self,
        graph0: &GeometryGraph<F>,
        graph1: &GeometryGraph<F>,
        segment_intersector: &mut SegmentIntersector<F>,
    ) {
        let tree0 = graph0.get_or_build_tree();
        let edges0 = graph0.edges();

        for edge1 in graph1.edges() {
            let coord_count = RefCell::borrow(edge1).coords().len();
            for segment_idx1 in 0..coord_count - 1 {
                let p1 = RefCell::borrow(edge1).coords()[segment_idx1];
                let p2 = RefCell::borrow(edge1).coords()[segment_idx1 + 1];
                let envelope = crate::Rect::new(p1, p2);
                let mut candidates = Vec::new();
                tree0.query(&envelope, &mut |_env, candidate: &super::Segment<F>| {
                    candidates.push((candidate.edge_idx, candidate.segment_idx));
                });
                for (edge_idx0, segment_idx0) in candidates {
                    segment_intersector.add_intersections(
                        &edges0[edge_idx0],
                        segment_idx0,
                        edge1,
                        segment_idx1,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
    use crate::{wkt, Geometry, GeometryCow};

    fn intersection_count<F: crate::GeoFloat>(graph: &GeometryGraph<F>) -> usize {
        graph
            .edges()
            .iter()
            .map(|edge| edge.borrow().edge_intersections().len())
            .sum()
    }

    #[test]
    fn indexed_intersector_matches_the_brute_force_oracle() {
        let a: Geometry<f64> =
            wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
        let b: Geometry<f64> =
            wkt! { POLYGON((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)) }.into();

        let run = |intersector: &dyn EdgeSetIntersector<f64>| {
            let graph_a =
                GeometryGraph::new(0, GeometryCow::from(&a), BoundaryNodeRule::Mod2);
            let graph_b =
                GeometryGraph::new(1, GeometryCow::from(&b), BoundaryNodeRule::Mod2);
            let mut segment_intersector = SegmentIntersector::new(false);
            intersector.compute_intersections_between_sets(
                &graph_a,
                &graph_b,
                &mut segment_intersector,
            );
            (intersection_count(&graph_a), intersection_count(&graph_b))
        };

        let simple = run(&SimpleEdgeSetIntersector);
        let indexed = run(&StrTreeEdgeSetIntersector);
        assert_eq!(simple, indexed);
        // the overlapping squares cross twice
        assert!(simple.0 >= 2);
    }
}
