use super::{CoordPos, Direction, Edge, EdgeEnd, IntersectionMatrix, Label};
use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
use crate::{Coord, GeoFloat};

/// A collection of [`EdgeEnd`]s which originate at the same node and point
/// in the same direction.
#[derive(Clone, Debug)]
pub(crate) struct EdgeEndBundle<F>
where
    F: GeoFloat,
{
    coordinate: Coord<F>,
    edge_ends: Vec<EdgeEnd<F>>,
}

impl<F> EdgeEndBundle<F>
where
    F: GeoFloat,
{
    pub(crate) fn new(coordinate: Coord<F>) -> Self {
        Self {
            coordinate,
            edge_ends: vec![],
        }
    }

    fn edge_ends_iter(&self) -> impl Iterator<Item = &EdgeEnd<F>> {
        self.edge_ends.iter()
    }

    fn edge_ends_iter_mut(&mut self) -> impl Iterator<Item = &mut EdgeEnd<F>> {
        self.edge_ends.iter_mut()
    }

    pub(crate) fn insert(&mut self, edge_end: EdgeEnd<F>) {
        self.edge_ends.push(edge_end);
    }

    pub(crate) fn into_labeled(
        mut self,
        boundary_node_rule: BoundaryNodeRule,
    ) -> LabeledEdgeEndBundle<F> {
        let is_area = self
            .edge_ends_iter()
            .any(|edge_end| edge_end.label().is_area());

        let mut label = if is_area {
            Label::empty_area()
        } else {
            Label::empty_line_or_point()
        };

        for i in 0..2 {
            self.compute_label_on(&mut label, i, boundary_node_rule);
            if is_area {
                self.compute_label_side(&mut label, i, Direction::Left);
                self.compute_label_side(&mut label, i, Direction::Right);
            }
        }

        LabeledEdgeEndBundle {
            label,
            edge_end_bundle: self,
        }
    }

    /// Compute the overall ON position for the list of EdgeEnds.
    /// (This is essentially equivalent to computing the self-overlay of a
    /// single Geometry.)
    ///
    /// EdgeEnds can be either on the boundary (e.g. a Polygon edge) OR in
    /// the interior (e.g. a segment of a LineString) of their parent
    /// Geometry. In a GeometryCollection an edge can even be both on the
    /// boundary and in the interior (a LineString segment lying on top of a
    /// Polygon edge); the boundary is given precedence.
    ///
    /// These observations result in the following rules:
    /// - if there are boundary edges, the boundary node rule applied to
    ///   their count decides between Boundary and Interior
    /// - otherwise, if there are any interior edges, the position is
    ///   Interior
    fn compute_label_on(
        &mut self,
        label: &mut Label,
        geom_index: usize,
        boundary_node_rule: BoundaryNodeRule,
    ) {
        let mut boundary_count = 0;
        let mut found_interior = false;

        for edge_end in self.edge_ends_iter() {
            match edge_end.label().on_position(geom_index) {
                Some(CoordPos::OnBoundary) => {
                    boundary_count += 1;
                }
                Some(CoordPos::Inside) => {
                    found_interior = true;
                }
                None | Some(CoordPos::Outside) => {}
            }
        }

        let mut position = None;
        if found_interior {
            position = Some(CoordPos::Inside);
        }

        if boundary_count > 0 {
            position = Some(if boundary_node_rule.is_in_boundary(boundary_count) {
                CoordPos::OnBoundary
            } else {
                CoordPos::Inside
            });
        }

        if let Some(position) = position {
            label.set_on_position(geom_index, position);
        } else {
            debug_assert!(
                label.on_position(geom_index).is_none(),
                "position should still be empty when no edge end had one"
            );
        }
    }

    /// The summary label for one side:
    /// - if any edge's location for the side is Interior, the side is
    ///   Interior
    /// - else, if any is Exterior, the side is Exterior
    /// - else the side stays undetermined
    ///
    /// Two sides can hold apparently contradictory information (one edge
    /// claims Interior where another claims Exterior): a
    /// GeometryCollection may contain two polygons touching along an edge.
    /// The Interior-primacy rule makes the summary label carry the interior
    /// on both sides in that case.
    fn compute_label_side(&mut self, label: &mut Label, geom_index: usize, side: Direction) {
        let mut position = None;
        for edge_end in self.edge_ends_iter_mut() {
            if edge_end.label().is_area() {
                match edge_end.label_mut().position(geom_index, side) {
                    Some(CoordPos::Inside) => {
                        position = Some(CoordPos::Inside);
                        break;
                    }
                    Some(CoordPos::Outside) => {
                        position = Some(CoordPos::Outside);
                    }
                    None | Some(CoordPos::OnBoundary) => {}
                }
            }
        }

        if let Some(position) = position {
            label.set_position(geom_index, side, position);
        }
    }
}

/// An [`EdgeEndBundle`] whose topological relationships have been
/// aggregated into a single [`Label`].
#[derive(Clone, Debug)]
pub(crate) struct LabeledEdgeEndBundle<F>
where
    F: GeoFloat,
{
    label: Label,
    edge_end_bundle: EdgeEndBundle<F>,
}

impl<F> LabeledEdgeEndBundle<F>
where
    F: GeoFloat,
{
    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn update_intersection_matrix(&self, intersection_matrix: &mut IntersectionMatrix) {
        Edge::<F>::update_intersection_matrix(self.label(), intersection_matrix);
    }

    pub fn coordinate(&self) -> &Coord<F> {
        &self.edge_end_bundle.coordinate
    }
}
