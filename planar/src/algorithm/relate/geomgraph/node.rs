use super::{CoordPos, Dimensions, IntersectionMatrix, Label};
use crate::{Coord, GeoFloat};

/// A node of the topology graph: a unique coordinate with the label of its
/// topological position in each input geometry.
///
/// Nodes also track how many linear-component endpoints of each input land
/// on them, so the configured boundary node rule can be evaluated from the
/// true count rather than a parity toggle.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CoordNode<F>
where
    F: GeoFloat,
{
    coordinate: Coord<F>,
    label: Label,
    endpoint_counts: [usize; 2],
}

impl<F: GeoFloat> CoordNode<F> {
    pub fn new(coordinate: Coord<F>) -> CoordNode<F> {
        CoordNode {
            coordinate,
            label: Label::empty_line_or_point(),
            endpoint_counts: [0, 0],
        }
    }

    pub fn coordinate(&self) -> &Coord<F> {
        &self.coordinate
    }

    pub(crate) fn label(&self) -> &Label {
        &self.label
    }

    pub(crate) fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn swap_label_args(&mut self) {
        self.label.swap_args();
        self.endpoint_counts.swap(0, 1);
    }

    pub(crate) fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    pub fn set_label_on_position(&mut self, geom_index: usize, position: CoordPos) {
        self.label.set_on_position(geom_index, position)
    }

    /// Register another linear-component endpoint of input `geom_index`
    /// landing on this node, and return the new endpoint count.
    pub fn increment_endpoint_count(&mut self, geom_index: usize) -> usize {
        self.endpoint_counts[geom_index] += 1;
        self.endpoint_counts[geom_index]
    }

    pub fn update_intersection_matrix(&self, intersection_matrix: &mut IntersectionMatrix) {
        assert!(self.label.geometry_count() >= 2, "found partial label");
        intersection_matrix.set_at_least_if_in_both(
            self.label.on_position(0),
            self.label.on_position(1),
            Dimensions::ZeroDimensional,
        );
        debug!(
            "updated intersection_matrix: {:?} from node: {:?}",
            intersection_matrix, self
        );
    }
}
