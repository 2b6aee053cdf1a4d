use super::{
    CoordPos, Dimensions, Direction, EdgeEnd, EdgeEndBundle, EdgeEndKey, GeometryGraph,
    IntersectionMatrix, LabeledEdgeEndBundle,
};
use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
use crate::algorithm::coordinate_position::CoordinatePosition;
use crate::algorithm::dimensions::HasDimensions;
use crate::{Error, GeoFloat};

/// An ordered list of [`EdgeEndBundle`]s around a node.
///
/// They are maintained in CCW order (starting with the positive x-axis)
/// around the node for efficient lookup and topology building.
#[derive(Clone, Debug)]
pub(crate) struct EdgeEndBundleStar<F>
where
    F: GeoFloat,
{
    edge_map: std::collections::BTreeMap<EdgeEndKey<F>, EdgeEndBundle<F>>,
}

/// A star whose bundles have been aggregated and whose side labels have
/// been propagated around the node.
#[derive(Clone, Debug)]
pub(crate) struct LabeledEdgeEndBundleStar<F>
where
    F: GeoFloat,
{
    edges: Vec<LabeledEdgeEndBundle<F>>,
}

impl<F: GeoFloat> LabeledEdgeEndBundleStar<F> {
    pub(crate) fn new(
        edges: Vec<LabeledEdgeEndBundle<F>>,
        graph_a: &GeometryGraph<F>,
        graph_b: &GeometryGraph<F>,
    ) -> Result<Self, Error> {
        let mut labeled_bundle_star = Self { edges };
        labeled_bundle_star.compute_labeling(graph_a, graph_b)?;
        Ok(labeled_bundle_star)
    }

    /// Complete the labels of the star's bundles: propagate the side labels
    /// of area edges around the node, then fill any still-undetermined
    /// labels by locating the node against the corresponding geometry.
    fn compute_labeling(
        &mut self,
        graph_a: &GeometryGraph<F>,
        graph_b: &GeometryGraph<F>,
    ) -> Result<(), Error> {
        self.propagate_side_labels(0)?;
        self.propagate_side_labels(1)?;

        let mut has_dimensional_collapse_edge = [false, false];
        for edge_end in self.edges.iter() {
            let label = edge_end.label();
            for (geom_index, is_collapsed) in has_dimensional_collapse_edge.iter_mut().enumerate() {
                *is_collapsed = label.is_line(geom_index)
                    && label.on_position(geom_index) == Some(CoordPos::OnBoundary);
            }
        }

        for edge_end_bundle in &mut self.edges {
            let coord = *edge_end_bundle.coordinate();
            let label = edge_end_bundle.label_mut();
            for (geom_index, is_dimensionally_collapsed) in
                has_dimensional_collapse_edge.iter().enumerate()
            {
                if label.is_any_empty(geom_index) {
                    let position: CoordPos = if *is_dimensionally_collapsed {
                        CoordPos::Outside
                    } else {
                        let geometry = match geom_index {
                            0 => graph_a.geometry(),
                            1 => graph_b.geometry(),
                            _ => unreachable!("there are only two input geometries"),
                        };
                        if geometry.dimensions() == Dimensions::TwoDimensional {
                            geometry.coordinate_position(&coord)
                        } else {
                            // a non-area geometry has no interior to sit in
                            CoordPos::Outside
                        }
                    };
                    label.set_all_positions_if_empty(geom_index, position);
                }
            }
        }
        debug!("labeled edge_end_bundle_star: {:?}", self);
        Ok(())
    }

    /// Walk the bundles CCW around the node carrying the current location
    /// for `geom_index` across each edge: the right side of an edge must
    /// agree with the location arrived at, and its left side becomes the
    /// new current location. Disagreement means the graph labelling is
    /// inconsistent, which surfaces as a topology error pinned to the node.
    fn propagate_side_labels(&mut self, geom_index: usize) -> Result<(), Error> {
        let mut start_position = None;

        for edge_ends in self.edges.iter() {
            let label = edge_ends.label();
            if label.is_geom_area(geom_index) {
                if let Some(position) = label.position(geom_index, Direction::Left) {
                    start_position = Some(position);
                }
            }
        }
        let mut current_position = match start_position {
            Some(position) => position,
            None => return Ok(()),
        };

        for edge_ends in self.edges.iter_mut() {
            let coord = *edge_ends.coordinate();
            let label = edge_ends.label_mut();
            if label.position(geom_index, Direction::On).is_none() {
                label.set_position(geom_index, Direction::On, current_position);
            }
            if label.is_geom_area(geom_index) {
                let left_position = label.position(geom_index, Direction::Left);
                let right_position = label.position(geom_index, Direction::Right);

                if let Some(right_position) = right_position {
                    if right_position != current_position {
                        return Err(Error::topology_at("side location conflict", coord));
                    }
                    let left_position = left_position.ok_or_else(|| {
                        Error::topology_at("single null side at edge", coord)
                    })?;
                    current_position = left_position;
                } else {
                    debug_assert!(label.position(geom_index, Direction::Left).is_none());
                    label.set_position(geom_index, Direction::Right, current_position);
                    label.set_position(geom_index, Direction::Left, current_position);
                }
            }
        }
        Ok(())
    }

    fn edge_end_bundles_iter(&self) -> impl Iterator<Item = &LabeledEdgeEndBundle<F>> {
        self.edges.iter()
    }

    pub fn update_intersection_matrix(&self, intersection_matrix: &mut IntersectionMatrix) {
        for edge_end_bundle in self.edge_end_bundles_iter() {
            edge_end_bundle.update_intersection_matrix(intersection_matrix);
            debug!(
                "updated intersection_matrix: {:?} from edge_end_bundle: {:?}",
                intersection_matrix, edge_end_bundle
            );
        }
    }
}

impl<F> EdgeEndBundleStar<F>
where
    F: GeoFloat,
{
    pub(crate) fn new() -> Self {
        EdgeEndBundleStar {
            edge_map: std::collections::BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, edge_end: EdgeEnd<F>) {
        let bundle = self
            .edge_map
            .entry(edge_end.key().clone())
            .or_insert_with(|| EdgeEndBundle::new(*edge_end.coordinate()));
        bundle.insert(edge_end);
    }

    /// Aggregate each bundle into a labeled bundle, then complete the
    /// labelling around the whole star.
    pub(crate) fn into_labeled(
        self,
        graph_a: &GeometryGraph<F>,
        graph_b: &GeometryGraph<F>,
        boundary_node_rule: BoundaryNodeRule,
    ) -> Result<LabeledEdgeEndBundleStar<F>, Error> {
        let labeled_edges = self
            .edge_map
            .into_values()
            .map(|bundle| bundle.into_labeled(boundary_node_rule))
            .collect();
        LabeledEdgeEndBundleStar::new(labeled_edges, graph_a, graph_b)
    }
}
