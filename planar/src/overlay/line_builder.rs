use super::graph::OverlayGraph;
use super::label::OverlayDim;
use super::OverlayOp;
use crate::algorithm::coordinate_position::CoordPos;
use crate::{CoordSeq, Error, GeoFloat, LineString};

/// Select and emit the linear part of the overlay result.
///
/// Line edges survive an operation according to the set semantics of the
/// operands as point sets: a line edge is *covered* by the other operand
/// when it coincides with one of its edges or lies in its interior. Area
/// boundaries shared by both operands additionally collapse to lines under
/// INTERSECTION when the interiors do not overlap there.
pub(crate) fn mark_result_line_edges<F: GeoFloat>(graph: &mut OverlayGraph<F>, op: OverlayOp) {
    for merged_idx in 0..graph.merged.len() {
        let label = graph.merged[merged_idx].label;
        let forward = merged_idx * 2;

        let covered_by = |geom_index: usize| {
            label.dim(geom_index) != OverlayDim::NotPart
                || label.side_location(geom_index, true) == CoordPos::Inside
        };
        let line_in = |geom_index: usize| label.dim(geom_index) == OverlayDim::Line;

        let in_result = match op {
            OverlayOp::Intersection => {
                let line_part = (line_in(0) && covered_by(1)) || (line_in(1) && covered_by(0));
                // area boundaries meeting without interior overlap collapse
                // to lines
                let boundary_contact = label.dim(0) == OverlayDim::Boundary
                    && label.dim(1) == OverlayDim::Boundary
                    && !graph.edges[forward].in_result_area
                    && !graph.edges[forward + 1].in_result_area;
                line_part || boundary_contact
            }
            OverlayOp::Union => {
                let absorbed = |geom_index: usize| {
                    label.dim(geom_index) == OverlayDim::Boundary
                        || label.side_location(geom_index, true) == CoordPos::Inside
                };
                (line_in(0) || line_in(1)) && !absorbed(0) && !absorbed(1)
            }
            OverlayOp::Difference => line_in(0) && !covered_by(1),
            OverlayOp::SymDifference => {
                (line_in(0) && !covered_by(1)) || (line_in(1) && !covered_by(0))
            }
        };

        graph.edges[forward].in_result_line = in_result;
    }
}

/// Emit one `LineString` per surviving merged line edge. Edges are not
/// joined across nodes: the noded arrangement is the result, with every
/// shared vertex materialized.
pub(crate) fn build_lines<F: GeoFloat>(
    graph: &OverlayGraph<F>,
    want_z: bool,
) -> Result<Vec<LineString<F>>, Error> {
    let mut lines = Vec::new();
    for merged_idx in 0..graph.merged.len() {
        if !graph.edges[merged_idx * 2].in_result_line {
            continue;
        }
        let edge = &graph.merged[merged_idx];
        let seq = match (&edge.z, want_z) {
            (Some(z), true) => {
                CoordSeq::from_parts(edge.coords.clone(), Some(z.clone()), None)?
            }
            _ => CoordSeq::new(edge.coords.clone()),
        };
        lines.push(LineString::new(seq)?);
    }
    Ok(lines)
}
