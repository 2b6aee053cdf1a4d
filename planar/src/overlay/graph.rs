use super::merge::MergedEdge;
use crate::algorithm::coordinate_position::CoordPos;
use crate::algorithm::kernels::{HasKernel, Kernel, Orientation};
use crate::algorithm::relate::geomgraph::quadrant::Quadrant;
use crate::utils::lex_cmp;
use crate::{Coord, Error, GeoFloat};

use std::cmp::Ordering;

/// Identifier of a half-edge in the overlay graph's arena.
pub(crate) type EdgeId = usize;

/// One directed half of a merged overlay edge.
///
/// Half-edges are stored pairwise in the arena (`2k` forward, `2k + 1`
/// reverse), so `sym` is an index flip rather than a pointer; the arena owns
/// everything and tears down in a single drop.
#[derive(Debug)]
pub(crate) struct HalfEdge<F: GeoFloat> {
    pub merged: usize,
    pub forward: bool,
    pub origin: Coord<F>,
    /// the direction point: the next coordinate along the chain
    pub dir: Coord<F>,
    /// the next half-edge when walking a ring keeping the face on the left
    pub next_left: EdgeId,
    /// the node this half-edge leaves, and its position in that node's
    /// CCW-sorted star
    pub node: usize,
    pub star_pos: usize,
    pub in_result_area: bool,
    pub in_result_line: bool,
    pub visited: bool,
}

pub(crate) struct OverlayGraph<F: GeoFloat> {
    pub edges: Vec<HalfEdge<F>>,
    pub merged: Vec<MergedEdge<F>>,
    /// out-edges per node, CCW-sorted; parallel to `node_coords`
    pub node_edges: Vec<Vec<EdgeId>>,
    pub node_coords: Vec<Coord<F>>,
}

pub(crate) fn sym(edge: EdgeId) -> EdgeId {
    edge ^ 1
}

/// CCW comparison of two direction vectors anchored at a shared origin:
/// quadrant first, then the robust orientation test.
fn compare_direction<F: GeoFloat>(
    origin: Coord<F>,
    dir_a: Coord<F>,
    dir_b: Coord<F>,
) -> Ordering {
    let delta_a = dir_a - origin;
    let delta_b = dir_b - origin;
    if delta_a == delta_b {
        return Ordering::Equal;
    }
    let quad_a = Quadrant::new(delta_a.x, delta_a.y);
    let quad_b = Quadrant::new(delta_b.x, delta_b.y);
    match (quad_a, quad_b) {
        (Some(qa), Some(qb)) if qa > qb => Ordering::Greater,
        (Some(qa), Some(qb)) if qa < qb => Ordering::Less,
        _ => match F::Ker::orient2d(origin, dir_b, dir_a) {
            Orientation::Clockwise => Ordering::Less,
            Orientation::CounterClockwise => Ordering::Greater,
            Orientation::Collinear => Ordering::Equal,
        },
    }
}

impl<F: GeoFloat> OverlayGraph<F> {
    /// Assemble the half-edge arena from merged edges: create the edge
    /// pairs, group them into nodes by origin, sort each node's out-edges
    /// counter-clockwise, and link the left-face traversal pointers.
    pub fn build(merged: Vec<MergedEdge<F>>) -> Self {
        let mut edges: Vec<HalfEdge<F>> = Vec::with_capacity(merged.len() * 2);
        for (merged_idx, edge) in merged.iter().enumerate() {
            let coords = &edge.coords;
            let n = coords.len();
            edges.push(HalfEdge {
                merged: merged_idx,
                forward: true,
                origin: coords[0],
                dir: coords[1],
                next_left: 0,
                node: 0,
                star_pos: 0,
                in_result_area: false,
                in_result_line: false,
                visited: false,
            });
            edges.push(HalfEdge {
                merged: merged_idx,
                forward: false,
                origin: coords[n - 1],
                dir: coords[n - 2],
                next_left: 0,
                node: 0,
                star_pos: 0,
                in_result_area: false,
                in_result_line: false,
                visited: false,
            });
        }

        // group out-edges into nodes by origin coordinate
        let mut order: Vec<EdgeId> = (0..edges.len()).collect();
        order.sort_by(|&a, &b| lex_cmp(&edges[a].origin, &edges[b].origin));

        let mut node_edges: Vec<Vec<EdgeId>> = Vec::new();
        let mut node_coords: Vec<Coord<F>> = Vec::new();
        for edge_id in order {
            let origin = edges[edge_id].origin;
            if node_coords.last() != Some(&origin) {
                node_coords.push(origin);
                node_edges.push(Vec::new());
            }
            node_edges.last_mut().expect("just pushed").push(edge_id);
        }

        // CCW-sort each star and link the face-left successor pointers:
        // arriving at a node via e, the continuation keeping the left face
        // is the out-edge immediately clockwise of sym(e).
        for (node, star) in node_edges.iter_mut().enumerate() {
            let origin = edges[star[0]].origin;
            star.sort_by(|&a, &b| compare_direction(origin, edges[a].dir, edges[b].dir));
            let k = star.len();
            for (position, &out_edge) in star.iter().enumerate() {
                edges[out_edge].node = node;
                edges[out_edge].star_pos = position;
                let prev_ccw = star[(position + k - 1) % k];
                // out_edge == sym(arriving edge)
                edges[sym(out_edge)].next_left = prev_ccw;
            }
        }

        OverlayGraph {
            edges,
            merged,
            node_edges,
            node_coords,
        }
    }

    /// The area location of the given side of a half-edge in one input,
    /// reading the merged (canonical-direction) label through the
    /// half-edge's orientation.
    pub fn side_location(&self, edge: EdgeId, geom_index: usize, left_side: bool) -> CoordPos {
        let half = &self.edges[edge];
        let canonical_left = left_side == half.forward;
        self.merged[half.merged]
            .label
            .side_location(geom_index, canonical_left)
    }

    /// The coordinates contributed when traversing `edge` away from its
    /// origin, excluding the origin itself.
    pub fn traversal_coords(&self, edge: EdgeId) -> Vec<Coord<F>> {
        let half = &self.edges[edge];
        let coords = &self.merged[half.merged].coords;
        if half.forward {
            coords[1..].to_vec()
        } else {
            coords[..coords.len() - 1].iter().rev().copied().collect()
        }
    }

    /// Verify that the labelling is consistent around every node: walking
    /// the star counter-clockwise, the wedge between two successive
    /// out-edges is bounded by the left side of the first and the right
    /// side of the second, which must agree for each areal input.
    ///
    /// Disagreement means the noding/labelling did not produce a valid
    /// planar arrangement for this input/precision combination.
    pub fn check_label_consistency(&self, areal: [bool; 2]) -> Result<(), Error> {
        for (node, star) in self.node_edges.iter().enumerate() {
            let k = star.len();
            if k < 2 {
                continue;
            }
            for geom_index in 0..2 {
                if !areal[geom_index] {
                    continue;
                }
                for position in 0..k {
                    let current = star[position];
                    let next = star[(position + 1) % k];
                    // collinear duplicate directions share a wedge
                    if self.edges[current].dir == self.edges[next].dir {
                        continue;
                    }
                    let left_of_current = self.side_location(current, geom_index, true);
                    let right_of_next = self.side_location(next, geom_index, false);
                    if left_of_current != right_of_next {
                        return Err(Error::topology_at(
                            "inconsistent area labelling at node",
                            self.node_coords[node],
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;
    use crate::overlay::label::OverlayLabel;

    fn merged_edge(coords: Vec<Coord<f64>>) -> MergedEdge<f64> {
        MergedEdge {
            coords,
            z: None,
            label: OverlayLabel::new(),
        }
    }

    #[test]
    fn sym_is_an_involution() {
        assert_eq!(sym(4), 5);
        assert_eq!(sym(5), 4);
        assert_eq!(sym(sym(7)), 7);
    }

    #[test]
    fn square_ring_links_into_a_cycle() {
        // a CCW square split into 4 merged edges
        let corners = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 10.0, y: 10.0 },
            coord! { x: 0.0, y: 10.0 },
        ];
        let merged: Vec<MergedEdge<f64>> = (0..4)
            .map(|i| merged_edge(vec![corners[i], corners[(i + 1) % 4]]))
            .collect();
        let graph = OverlayGraph::build(merged);

        assert_eq!(graph.edges.len(), 8);
        assert_eq!(graph.node_edges.len(), 4);

        // walking next_left from any forward edge loops around the square
        // (interior is on the left of a CCW ring)
        let start = 0;
        let mut steps = 0;
        let mut current = start;
        loop {
            current = graph.edges[current].next_left;
            steps += 1;
            assert!(steps <= 4, "walk failed to close");
            if current == start {
                break;
            }
        }
        assert_eq!(steps, 4);
    }
}
