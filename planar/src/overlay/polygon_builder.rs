use super::graph::{sym, EdgeId, OverlayGraph};
use super::OverlayOp;
use crate::algorithm::coordinate_position::{locate_in_ring, CoordPos};
use crate::algorithm::winding_order::{winding_order_of, WindingOrder};
use crate::{Coord, CoordSeq, Error, GeoFloat, LinearRing, Polygon};

/// Whether a point with the given per-input area locations belongs to the
/// result region of the operation.
pub(crate) fn is_in_result(op: OverlayOp, loc_a: CoordPos, loc_b: CoordPos) -> bool {
    let a = loc_a == CoordPos::Inside;
    let b = loc_b == CoordPos::Inside;
    match op {
        OverlayOp::Intersection => a && b,
        OverlayOp::Union => a || b,
        OverlayOp::Difference => a && !b,
        OverlayOp::SymDifference => a != b,
    }
}

/// Flag every half-edge which lies on the boundary of the result area,
/// directed so the result interior is on its left.
pub(crate) fn mark_result_area_edges<F: GeoFloat>(graph: &mut OverlayGraph<F>, op: OverlayOp) {
    for edge_id in 0..graph.edges.len() {
        let left_in = is_in_result(
            op,
            graph.side_location(edge_id, 0, true),
            graph.side_location(edge_id, 1, true),
        );
        let right_in = is_in_result(
            op,
            graph.side_location(edge_id, 0, false),
            graph.side_location(edge_id, 1, false),
        );
        graph.edges[edge_id].in_result_area = left_in && !right_in;
    }
}

/// Follow the result edges out of `edge`'s destination node: rotate
/// clockwise from `sym(edge)` to the first result edge.
fn next_result_edge<F: GeoFloat>(graph: &OverlayGraph<F>, edge: EdgeId) -> Option<EdgeId> {
    let twin = sym(edge);
    let star = &graph.node_edges[graph.edges[twin].node];
    let k = star.len();
    let position = graph.edges[twin].star_pos;
    for offset in 1..=k {
        let candidate = star[(position + k - offset) % k];
        if candidate == twin {
            continue;
        }
        if graph.edges[candidate].in_result_area {
            return Some(candidate);
        }
    }
    None
}

struct ResultRing<F: GeoFloat> {
    ring: LinearRing<F>,
    is_shell: bool,
}

/// Build the polygonal result: walk rings out of the flagged half-edges,
/// classify them as shells or holes by winding, and assign each hole to the
/// innermost shell containing it.
pub(crate) fn build_polygons<F: GeoFloat>(
    graph: &mut OverlayGraph<F>,
    want_z: bool,
) -> Result<Vec<Polygon<F>>, Error> {
    let mut rings: Vec<ResultRing<F>> = Vec::new();

    for start in 0..graph.edges.len() {
        if !graph.edges[start].in_result_area || graph.edges[start].visited {
            continue;
        }

        let mut coords: Vec<Coord<F>> = vec![graph.edges[start].origin];
        let mut z: Option<Vec<F>> = want_z.then(|| {
            vec![first_z(graph, start).unwrap_or_else(F::zero)]
        });
        let mut current = start;
        let mut steps = 0usize;
        loop {
            steps += 1;
            if steps > graph.edges.len() + 1 {
                return Err(Error::topology_at(
                    "unable to close result ring",
                    graph.edges[start].origin,
                ));
            }
            graph.edges[current].visited = true;
            graph.edges[sym(current)].visited = true;
            append_traversal(graph, current, &mut coords, &mut z);

            current = match next_result_edge(graph, current) {
                Some(next) => next,
                None => {
                    if coords.first() == coords.last() {
                        break;
                    }
                    return Err(Error::topology_at(
                        "dangling result edge",
                        graph.edges[current].origin,
                    ));
                }
            };
            if current == start {
                break;
            }
        }
        if coords.first() != coords.last() {
            let first = coords[0];
            coords.push(first);
            if let Some(z) = z.as_mut() {
                let first_z = z[0];
                z.push(first_z);
            }
        }
        if coords.len() < 4 {
            continue;
        }

        let is_shell = match winding_order_of(&coords) {
            Some(WindingOrder::CounterClockwise) => true,
            Some(WindingOrder::Clockwise) => false,
            // zero-area slivers are dropped
            None => continue,
        };
        let seq = match z {
            Some(z) if z.len() == coords.len() => CoordSeq::from_parts(coords, Some(z), None)?,
            _ => CoordSeq::new(coords),
        };
        rings.push(ResultRing {
            ring: LinearRing::new(seq)?,
            is_shell,
        });
    }

    assemble_polygons(rings)
}

fn first_z<F: GeoFloat>(graph: &OverlayGraph<F>, edge: EdgeId) -> Option<F> {
    let half = &graph.edges[edge];
    let z = graph.merged[half.merged].z.as_ref()?;
    if half.forward {
        z.first().copied()
    } else {
        z.last().copied()
    }
}

fn append_traversal<F: GeoFloat>(
    graph: &OverlayGraph<F>,
    edge: EdgeId,
    coords: &mut Vec<Coord<F>>,
    z: &mut Option<Vec<F>>,
) {
    coords.extend(graph.traversal_coords(edge));
    if z.is_none() {
        return;
    }
    let half = &graph.edges[edge];
    match graph.merged[half.merged].z.as_ref() {
        Some(edge_z) => {
            let z_out = z.as_mut().expect("checked above");
            if half.forward {
                z_out.extend(edge_z[1..].iter().copied());
            } else {
                z_out.extend(edge_z[..edge_z.len() - 1].iter().rev().copied());
            }
        }
        // an edge without Z forfeits the payload for the whole ring
        None => *z = None,
    }
}

fn assemble_polygons<F: GeoFloat>(rings: Vec<ResultRing<F>>) -> Result<Vec<Polygon<F>>, Error> {
    let mut shells: Vec<LinearRing<F>> = Vec::new();
    let mut holes: Vec<LinearRing<F>> = Vec::new();
    for result_ring in rings {
        if result_ring.is_shell {
            shells.push(result_ring.ring);
        } else {
            holes.push(result_ring.ring);
        }
    }

    let mut shell_holes: Vec<Vec<LinearRing<F>>> = (0..shells.len()).map(|_| Vec::new()).collect();
    for hole in holes {
        let hole_env = hole.envelope().expect("result rings are non-empty");
        // the innermost enclosing shell is the one with the smallest
        // envelope among those containing the hole
        let mut best: Option<(usize, F)> = None;
        for (shell_idx, shell) in shells.iter().enumerate() {
            let shell_env = shell.envelope().expect("result rings are non-empty");
            if !shell_env.contains(&hole_env) {
                continue;
            }
            let probe = hole
                .coords()
                .iter()
                .find(|coord| locate_in_ring(**coord, shell.coords()) != CoordPos::OnBoundary);
            let contained = match probe {
                Some(probe) => locate_in_ring(*probe, shell.coords()) == CoordPos::Inside,
                // hole touches the shell everywhere it was probed
                None => true,
            };
            if contained {
                let size = shell_env.area();
                if best.map(|(_, s)| size < s).unwrap_or(true) {
                    best = Some((shell_idx, size));
                }
            }
        }
        match best {
            Some((shell_idx, _)) => shell_holes[shell_idx].push(hole),
            None => {
                let coord = hole.coords()[0];
                return Err(Error::topology_at("result hole has no shell", coord));
            }
        }
    }

    shells
        .into_iter()
        .zip(shell_holes)
        .map(|(shell, holes)| Polygon::new(shell, holes))
        .collect()
}
