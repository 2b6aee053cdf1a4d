use super::{
    index::{EdgeSetIntersector, Segment, SegmentIntersector, StrTreeEdgeSetIntersector},
    CoordNode, CoordPos, Edge, Label, PlanarGraph, TopologyPosition,
};
use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
use crate::algorithm::winding_order::{Winding, WindingOrder};
use crate::index::strtree::StrTree;
use crate::{Coord, GeoFloat, GeometryCow, LineString, LinearRing, Point, Polygon};

use std::cell::RefCell;
use std::rc::Rc;

/// The topology graph of a single input geometry: nodes and edges labelled
/// with their topological location relative to the geometry they came from.
///
/// There is no requirement that points of self-intersection be vertices, so
/// a geometry must be self-noded (`compute_self_nodes`) before its graph
/// answers topology questions.
///
/// Two fundamental operations are supported: computing the intersections
/// between all the edges and nodes of a single graph, and computing the
/// intersections between the edges and nodes of two different graphs.
#[derive(Clone)]
pub(crate) struct GeometryGraph<'a, F>
where
    F: GeoFloat,
{
    arg_index: usize,
    parent_geometry: GeometryCow<'a, F>,
    tree: Option<Rc<StrTree<F, Segment<F>>>>,
    boundary_node_rule: BoundaryNodeRule,
    use_boundary_determination_rule: bool,
    has_computed_self_nodes: bool,
    planar_graph: PlanarGraph<F>,
}

/// PlanarGraph delegations.
impl<F> GeometryGraph<'_, F>
where
    F: GeoFloat,
{
    pub(crate) fn set_tree(&mut self, tree: Rc<StrTree<F, Segment<F>>>) {
        self.tree = Some(tree);
    }

    pub(crate) fn get_or_build_tree(&self) -> Rc<StrTree<F, Segment<F>>> {
        self.tree
            .clone()
            .unwrap_or_else(|| Rc::new(self.build_tree()))
    }

    pub(crate) fn build_tree(&self) -> StrTree<F, Segment<F>> {
        let mut tree = StrTree::new();
        for (edge_idx, edge) in self.edges().iter().enumerate() {
            let edge = RefCell::borrow(edge);
            let coords = edge.coords();
            for segment_idx in 0..coords.len() - 1 {
                let segment = Segment::new(edge_idx, segment_idx, coords[segment_idx], coords[segment_idx + 1]);
                tree.insert(segment.envelope, segment);
            }
        }
        tree
    }

    /// A copy of this graph re-labelled as input `arg_index`; used by
    /// prepared geometries to reuse one self-noded graph on both sides of
    /// repeated relate computations.
    pub(crate) fn clone_for_arg_index(&self, arg_index: usize) -> Self {
        debug_assert!(
            self.has_computed_self_nodes,
            "should only be called after computing self nodes"
        );
        let planar_graph = self
            .planar_graph
            .clone_for_arg_index(self.arg_index, arg_index);
        Self {
            arg_index,
            parent_geometry: self.parent_geometry.clone(),
            tree: self.tree.clone(),
            boundary_node_rule: self.boundary_node_rule,
            use_boundary_determination_rule: self.use_boundary_determination_rule,
            has_computed_self_nodes: true,
            planar_graph,
        }
    }

    pub(crate) fn edges(&self) -> &[Rc<RefCell<Edge<F>>>] {
        self.planar_graph.edges()
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge<F>) {
        self.planar_graph.insert_edge(edge)
    }

    pub(crate) fn is_boundary_node(&self, coord: Coord<F>) -> bool {
        self.planar_graph.is_boundary_node(self.arg_index, coord)
    }

    pub(crate) fn add_node_with_coordinate(&mut self, coord: Coord<F>) -> &mut CoordNode<F> {
        self.planar_graph.add_node_with_coordinate(coord)
    }

    pub(crate) fn nodes_iter(&self) -> impl Iterator<Item = &CoordNode<F>> {
        self.planar_graph.nodes.iter()
    }
}

impl<'a, F> GeometryGraph<'a, F>
where
    F: GeoFloat,
{
    pub(crate) fn new(
        arg_index: usize,
        parent_geometry: GeometryCow<'a, F>,
        boundary_node_rule: BoundaryNodeRule,
    ) -> Self {
        let mut graph = GeometryGraph {
            arg_index,
            parent_geometry,
            boundary_node_rule,
            use_boundary_determination_rule: true,
            tree: None,
            has_computed_self_nodes: false,
            planar_graph: PlanarGraph::new(),
        };
        graph.add_geometry(&graph.parent_geometry.clone());
        graph
    }

    pub(crate) fn geometry(&self) -> &GeometryCow<F> {
        &self.parent_geometry
    }

    pub(crate) fn boundary_node_rule(&self) -> BoundaryNodeRule {
        self.boundary_node_rule
    }

    /// Whether a component appearing in `boundary_count` linear elements of
    /// a geometry lies in its boundary or its interior, under this graph's
    /// boundary node rule.
    pub fn determine_boundary(
        boundary_node_rule: BoundaryNodeRule,
        boundary_count: usize,
    ) -> CoordPos {
        if boundary_node_rule.is_in_boundary(boundary_count) {
            CoordPos::OnBoundary
        } else {
            CoordPos::Inside
        }
    }

    fn boundary_nodes(&self) -> impl Iterator<Item = &CoordNode<F>> {
        self.planar_graph.boundary_nodes(self.arg_index)
    }

    pub(crate) fn add_geometry(&mut self, geometry: &GeometryCow<F>) {
        if geometry.is_empty() {
            return;
        }
        match geometry {
            GeometryCow::Point(point) => self.add_point(point),
            GeometryCow::LineString(line_string) => self.add_line_string(line_string),
            GeometryCow::Polygon(polygon) => self.add_polygon(polygon),
            GeometryCow::MultiPoint(multi_point) => {
                for point in multi_point.iter() {
                    self.add_point(point);
                }
            }
            GeometryCow::MultiLineString(multi_line_string) => {
                for line_string in multi_line_string.iter() {
                    self.add_line_string(line_string);
                }
            }
            GeometryCow::MultiPolygon(multi_polygon) => {
                // all collections except MultiPolygons obey the boundary
                // determination rule
                self.use_boundary_determination_rule = false;
                for polygon in multi_polygon.iter() {
                    self.add_polygon(polygon);
                }
            }
            GeometryCow::GeometryCollection(collection) => {
                for geometry in collection.iter() {
                    self.add_geometry(&GeometryCow::from(geometry));
                }
            }
        }
    }

    fn add_polygon_ring(&mut self, ring: &LinearRing<F>, cw_left: CoordPos, cw_right: CoordPos) {
        if ring.is_empty() {
            return;
        }

        // remove repeated coords
        let mut coords: Vec<Coord<F>> = Vec::with_capacity(ring.num_coords());
        for coord in ring.coords() {
            if coords.last() != Some(coord) {
                coords.push(*coord)
            }
        }
        if coords.len() < 4 {
            warn!("encountered collapsed ring, which has undefined results");
        }
        let first_point = coords[0];

        let (left, right) = match ring.winding_order() {
            Some(WindingOrder::Clockwise) => (cw_left, cw_right),
            Some(WindingOrder::CounterClockwise) => (cw_right, cw_left),
            None => {
                warn!("polygon ring has no winding order, results are undefined");
                (cw_left, cw_right)
            }
        };

        let edge = Edge::new(
            coords,
            Label::new(
                self.arg_index,
                TopologyPosition::area(CoordPos::OnBoundary, left, right),
            ),
        );
        self.insert_edge(edge);

        // the ring start is on the boundary by definition
        self.insert_point(self.arg_index, first_point, CoordPos::OnBoundary);
    }

    fn add_polygon(&mut self, polygon: &Polygon<F>) {
        self.add_polygon_ring(polygon.exterior(), CoordPos::Outside, CoordPos::Inside);
        // Holes are topologically labeled opposite to the shell, since the
        // interior of the polygon lies on their opposite side (on the left,
        // if the hole is oriented CW)
        for hole in polygon.interiors() {
            self.add_polygon_ring(hole, CoordPos::Inside, CoordPos::Outside)
        }
    }

    fn add_line_string(&mut self, line_string: &LineString<F>) {
        if line_string.is_empty() {
            return;
        }

        let mut coords: Vec<Coord<F>> = Vec::with_capacity(line_string.num_coords());
        for coord in line_string.coords() {
            if coords.last() != Some(coord) {
                coords.push(*coord)
            }
        }

        if coords.len() < 2 {
            warn!("treating invalid line string as point, which has undefined results");
            self.add_point(&Point::new(coords[0]));
            return;
        }

        self.insert_boundary_point(*coords.first().expect("non-empty checked above"));
        self.insert_boundary_point(*coords.last().expect("non-empty checked above"));

        let edge = Edge::new(
            coords,
            Label::new(
                self.arg_index,
                TopologyPosition::line_or_point(CoordPos::Inside),
            ),
        );
        self.insert_edge(edge);
    }

    /// Add a point computed externally. The point is assumed to be a Point
    /// geometry part, which has a location of INTERIOR.
    fn add_point(&mut self, point: &Point<F>) {
        let coord = match point.coord() {
            Some(coord) => coord,
            None => return,
        };
        self.insert_point(self.arg_index, coord, CoordPos::Inside);
    }

    /// Compute self-nodes, taking advantage of the Geometry type to
    /// minimize the number of intersection tests. (E.g. rings are not
    /// tested for self-intersection, since they are assumed to be valid.)
    pub(crate) fn compute_self_nodes(&mut self) {
        if self.has_computed_self_nodes {
            return;
        }
        self.has_computed_self_nodes = true;

        let mut segment_intersector = SegmentIntersector::new(true);

        // optimize intersection search for valid Polygons and LinearRings
        let is_rings = match self.geometry() {
            GeometryCow::LineString(ls) => ls.is_closed(),
            GeometryCow::MultiLineString(ls) => ls.is_closed(),
            GeometryCow::Polygon(_) | GeometryCow::MultiPolygon(_) => true,
            _ => false,
        };
        let check_for_self_intersecting_edges = !is_rings;

        let edge_set_intersector = StrTreeEdgeSetIntersector;
        edge_set_intersector.compute_intersections_within_set(
            self,
            check_for_self_intersecting_edges,
            &mut segment_intersector,
        );
        self.add_self_intersection_nodes();
    }

    pub(crate) fn compute_edge_intersections(
        &self,
        other: &GeometryGraph<F>,
    ) -> SegmentIntersector<F> {
        let mut segment_intersector = SegmentIntersector::new(false);
        segment_intersector.set_boundary_nodes(
            self.boundary_nodes().cloned().collect(),
            other.boundary_nodes().cloned().collect(),
        );

        let edge_set_intersector = StrTreeEdgeSetIntersector;
        edge_set_intersector.compute_intersections_between_sets(
            self,
            other,
            &mut segment_intersector,
        );

        segment_intersector
    }

    fn insert_point(&mut self, arg_index: usize, coord: Coord<F>, position: CoordPos) {
        let node: &mut CoordNode<F> = self.add_node_with_coordinate(coord);
        node.label_mut().set_on_position(arg_index, position);
    }

    /// Add the boundary points of 1-dim (line) geometries, applying the
    /// boundary node rule to the running endpoint count of the node.
    fn insert_boundary_point(&mut self, coord: Coord<F>) {
        let arg_index = self.arg_index;
        let boundary_node_rule = self.boundary_node_rule;
        let node: &mut CoordNode<F> = self.add_node_with_coordinate(coord);
        let boundary_count = node.increment_endpoint_count(arg_index);

        let new_position = Self::determine_boundary(boundary_node_rule, boundary_count);
        node.label_mut().set_on_position(arg_index, new_position);
    }

    fn add_self_intersection_nodes(&mut self) {
        let positions_and_intersections: Vec<(CoordPos, Vec<Coord<F>>)> = self
            .edges()
            .iter()
            .map(|cell| cell.borrow())
            .map(|edge| {
                let position = edge
                    .label()
                    .on_position(self.arg_index)
                    .expect("all edge labels have an `on` position by now");
                let coordinates = edge
                    .edge_intersections()
                    .iter()
                    .map(|edge_intersection| edge_intersection.coordinate());

                (position, coordinates.collect())
            })
            .collect();

        for (position, edge_intersection_coordinates) in positions_and_intersections {
            for coordinate in edge_intersection_coordinates {
                self.add_self_intersection_node(coordinate, position)
            }
        }
    }

    /// Add a node for a self-intersection.
    ///
    /// If the node is a potential boundary node (e.g. came from an edge
    /// which is a boundary), then insert it as a potential boundary node.
    /// Otherwise, just add it as a regular node.
    fn add_self_intersection_node(&mut self, coord: Coord<F>, position: CoordPos) {
        // if this node is already a boundary node, don't change it
        if self.is_boundary_node(coord) {
            return;
        }

        if position == CoordPos::OnBoundary && self.use_boundary_determination_rule {
            self.insert_boundary_point(coord)
        } else {
            self.insert_point(self.arg_index, coord, position)
        }
    }
}
