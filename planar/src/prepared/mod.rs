//! Prepared geometry: an immutable source geometry bundled with lazily
//! built indexes, for cheap repeated predicate evaluation against many test
//! geometries.

use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use crate::algorithm::dimensions::{Dimensions, HasDimensions};
use crate::algorithm::line_intersection::{line_intersection, point_segment_distance_sq};
use crate::algorithm::relate::geomgraph::GeometryGraph;
use crate::algorithm::relate::{IntersectionMatrix, RelateOperation};
use crate::index::strtree::StrTree;
use crate::{Coord, Error, GeoFloat, Geometry, GeometryCow, Line, Point};

use std::cell::OnceCell;
use std::rc::Rc;

pub mod point_locator;
pub use point_locator::IndexedPointInAreaLocator;

/// A geometry wrapped with cached indexes:
///
/// - a self-noded topology graph with its segment STR-tree, reused across
///   relate computations;
/// - an [`IndexedPointInAreaLocator`] for areal sources.
///
/// All indexes build lazily on first use; call [`PreparedGeometry::build`]
/// to pre-warm them. The lazy build is *not* idempotent under concurrent
/// first access; callers on multiple threads must synchronise or pre-warm.
pub struct PreparedGeometry<'a, F: GeoFloat> {
    geometry: &'a Geometry<F>,
    graph: OnceCell<GeometryGraph<'a, F>>,
    segment_tree: OnceCell<StrTree<F, Line<F>>>,
    area_locator: OnceCell<IndexedPointInAreaLocator<F>>,
}

impl<'a, F: GeoFloat> PreparedGeometry<'a, F> {
    pub fn new(geometry: &'a Geometry<F>) -> Self {
        PreparedGeometry {
            geometry,
            graph: OnceCell::new(),
            segment_tree: OnceCell::new(),
            area_locator: OnceCell::new(),
        }
    }

    pub fn geometry(&self) -> &'a Geometry<F> {
        self.geometry
    }

    /// Pre-warm every index.
    pub fn build(&self) {
        self.graph();
        self.segment_tree().build();
        self.area_locator().build();
    }

    fn graph(&self) -> &GeometryGraph<'a, F> {
        self.graph.get_or_init(|| {
            let mut graph = GeometryGraph::new(
                0,
                GeometryCow::from(self.geometry),
                BoundaryNodeRule::default(),
            );
            graph.compute_self_nodes();
            let tree = Rc::new(graph.build_tree());
            graph.set_tree(tree);
            graph
        })
    }

    fn segment_tree(&self) -> &StrTree<F, Line<F>> {
        self.segment_tree.get_or_init(|| {
            let mut tree = StrTree::new();
            for line in collect_segments(self.geometry) {
                tree.insert(line.envelope(), line);
            }
            tree
        })
    }

    fn area_locator(&self) -> &IndexedPointInAreaLocator<F> {
        self.area_locator
            .get_or_init(|| IndexedPointInAreaLocator::new(self.geometry))
    }

    fn is_areal(&self) -> bool {
        self.geometry.dimensions() == Dimensions::TwoDimensional
    }

    /// The DE-9IM matrix against `other`, reusing the cached self-noded
    /// graph of the prepared side.
    pub fn relate(&self, other: &Geometry<F>) -> Result<IntersectionMatrix, Error> {
        let graph_a = self.graph().clone_for_arg_index(0);
        let cow = GeometryCow::from(other);
        let graph_b = GeometryGraph::new(1, cow.clone(), BoundaryNodeRule::default());
        RelateOperation::from_graphs(graph_a, graph_b).compute_intersection_matrix()
    }

    pub fn relate_pattern(&self, other: &Geometry<F>, pattern: &str) -> Result<bool, Error> {
        self.relate(other)?.matches(pattern)
    }

    /// `true` when any point is shared. Short-circuits through the segment
    /// index: the first candidate segment pair that really crosses settles
    /// it, and containment falls back to two point locations.
    pub fn intersects(&self, other: &Geometry<F>) -> Result<bool, Error> {
        match (self.geometry.envelope(), other.envelope()) {
            (Some(env_a), Some(env_b)) if env_a.intersects(&env_b) => {}
            _ => return Ok(false),
        }

        // any crossing segment pair proves intersection
        let tree = self.segment_tree();
        for other_segment in collect_segments(other) {
            let mut found = false;
            tree.query(&other_segment.envelope(), &mut |_env, segment| {
                if !found && line_intersection(*segment, other_segment).is_some() {
                    found = true;
                }
            });
            if found {
                return Ok(true);
            }
        }

        // no boundary contact: either one contains the other, or disjoint
        if self.is_areal() {
            if let Some(coord) = any_coord(other) {
                if self.area_locator().locate(coord) != CoordPos::Outside {
                    return Ok(true);
                }
            }
        }
        if other.dimensions() == Dimensions::TwoDimensional {
            if let Some(coord) = any_coord(self.geometry) {
                if other.coordinate_position(&coord) != CoordPos::Outside {
                    return Ok(true);
                }
            }
        }
        // point components have no segments; locate them directly
        for coord in collect_point_coords(other) {
            if self.locate(coord) != CoordPos::Outside {
                return Ok(true);
            }
        }
        for coord in collect_point_coords(self.geometry) {
            if other.coordinate_position(&coord) != CoordPos::Outside {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn disjoint(&self, other: &Geometry<F>) -> Result<bool, Error> {
        Ok(!self.intersects(other)?)
    }

    /// Locate a coordinate against the prepared geometry, using the area
    /// index when the source is areal.
    pub fn locate(&self, coord: Coord<F>) -> CoordPos {
        if self.is_areal() {
            self.area_locator().locate(coord)
        } else {
            self.geometry.coordinate_position(&coord)
        }
    }

    /// Containment with the envelope and vertex-location short-circuits:
    /// every vertex of `other` must locate inside or on the prepared
    /// geometry before the full relate runs.
    pub fn contains(&self, other: &Geometry<F>) -> Result<bool, Error> {
        match (self.geometry.envelope(), other.envelope()) {
            (Some(env_a), Some(env_b)) if env_a.contains(&env_b) => {}
            _ => return Ok(false),
        }
        if self.is_areal() {
            let mut all_covered = true;
            let mut saw_coord = false;
            for coord in all_coords(other) {
                saw_coord = true;
                if self.area_locator().locate(coord) == CoordPos::Outside {
                    all_covered = false;
                    break;
                }
            }
            if saw_coord && !all_covered {
                return Ok(false);
            }
        }
        Ok(self.relate(other)?.is_contains())
    }

    pub fn covers(&self, other: &Geometry<F>) -> Result<bool, Error> {
        match (self.geometry.envelope(), other.envelope()) {
            (Some(env_a), Some(env_b)) if env_a.contains(&env_b) => {}
            _ => return Ok(false),
        }
        Ok(self.relate(other)?.is_covers())
    }

    pub fn within(&self, other: &Geometry<F>) -> Result<bool, Error> {
        Ok(self.relate(other)?.is_within())
    }

    pub fn covered_by(&self, other: &Geometry<F>) -> Result<bool, Error> {
        Ok(self.relate(other)?.is_covered_by())
    }

    pub fn touches(&self, other: &Geometry<F>) -> Result<bool, Error> {
        Ok(self.relate(other)?.is_touches())
    }

    pub fn crosses(&self, other: &Geometry<F>) -> Result<bool, Error> {
        let im = self.relate(other)?;
        Ok(im.is_crosses(self.geometry.dimensions(), other.dimensions()))
    }

    pub fn overlaps(&self, other: &Geometry<F>) -> Result<bool, Error> {
        let im = self.relate(other)?;
        Ok(im.is_overlaps(self.geometry.dimensions(), other.dimensions()))
    }

    /// Minimum distance to `other`, via best-first search over the two
    /// segment trees. Intersecting geometries are at distance zero.
    pub fn distance(&self, other: &Geometry<F>) -> Result<F, Error> {
        if self.intersects(other)? {
            return Ok(F::zero());
        }
        Ok(self
            .nearest_points(other)?
            .map(|(a, b)| {
                let d = b - a;
                d.x.hypot(d.y)
            })
            .unwrap_or_else(F::zero))
    }

    pub fn is_within_distance(&self, other: &Geometry<F>, max_distance: F) -> Result<bool, Error> {
        Ok(self.distance(other)? <= max_distance)
    }

    /// The closest pair of points, one on each geometry.
    pub fn nearest_points(&self, other: &Geometry<F>) -> Result<Option<(Coord<F>, Coord<F>)>, Error> {
        let mut other_tree = StrTree::new();
        for line in collect_segments(other) {
            other_tree.insert(line.envelope(), line);
        }
        // degenerate operands: fall back to point sets
        let self_tree = self.segment_tree();
        if self_tree.is_empty() || other_tree.is_empty() {
            return Ok(nearest_coords(self.geometry, other));
        }

        let nearest = self_tree.nearest_neighbour(&other_tree, |a: &Line<F>, b: &Line<F>| {
            segment_nearest(*a, *b).2
        });
        Ok(nearest.map(|(a, b, _)| {
            let (pa, pb, _) = segment_nearest(*a, *b);
            (pa, pb)
        }))
    }
}

/// Closest points between two segments, with their distance.
fn segment_nearest<F: GeoFloat>(a: Line<F>, b: Line<F>) -> (Coord<F>, Coord<F>, F) {
    if line_intersection(a, b).is_some() {
        // any shared point will do; recompute one cheaply
        if let Some(crate::algorithm::line_intersection::LineIntersection::SinglePoint {
            intersection,
            ..
        }) = line_intersection(a, b)
        {
            return (intersection, intersection, F::zero());
        }
        return (a.start, a.start, F::zero());
    }
    let project = |p: Coord<F>, line: Line<F>| -> Coord<F> {
        if line.start == line.end {
            return line.start;
        }
        let d = line.delta();
        let len_sq = d.x * d.x + d.y * d.y;
        let t = ((p.x - line.start.x) * d.x + (p.y - line.start.y) * d.y) / len_sq;
        let t = t.max(F::zero()).min(F::one());
        Coord {
            x: line.start.x + t * d.x,
            y: line.start.y + t * d.y,
        }
    };
    let candidates = [
        (a.start, project(a.start, b)),
        (a.end, project(a.end, b)),
        (project(b.start, a), b.start),
        (project(b.end, a), b.end),
    ];
    let mut best = candidates[0];
    let mut best_sq = point_segment_distance_sq(a.start, b);
    for &(pa, pb) in &candidates[1..] {
        let d = pb - pa;
        let d_sq = d.x * d.x + d.y * d.y;
        if d_sq < best_sq {
            best_sq = d_sq;
            best = (pa, pb);
        }
    }
    (best.0, best.1, best_sq.sqrt())
}

fn nearest_coords<F: GeoFloat>(
    a: &Geometry<F>,
    b: &Geometry<F>,
) -> Option<(Coord<F>, Coord<F>)> {
    use crate::algorithm::map_coords::VisitCoords;
    let mut coords_b = Vec::new();
    b.visit_coords(&mut |c| coords_b.push(c));
    let mut best: Option<(F, (Coord<F>, Coord<F>))> = None;
    a.visit_coords(&mut |ca| {
        for &cb in &coords_b {
            let d = cb - ca;
            let d_sq = d.x * d.x + d.y * d.y;
            if best.map(|(b_sq, _)| d_sq < b_sq).unwrap_or(true) {
                best = Some((d_sq, (ca, cb)));
            }
        }
    });
    best.map(|(_, pair)| pair)
}

fn collect_segments<F: GeoFloat>(geometry: &Geometry<F>) -> Vec<Line<F>> {
    let mut segments = Vec::new();
    collect_segments_into(geometry, &mut segments);
    segments
}

fn collect_segments_into<F: GeoFloat>(geometry: &Geometry<F>, segments: &mut Vec<Line<F>>) {
    match geometry {
        Geometry::LineString(line_string) => segments.extend(line_string.lines()),
        Geometry::MultiLineString(multi) => {
            for line_string in multi.iter() {
                segments.extend(line_string.lines());
            }
        }
        Geometry::Polygon(polygon) => {
            for ring in polygon.rings() {
                segments.extend(ring.lines());
            }
        }
        Geometry::MultiPolygon(multi) => {
            for polygon in multi.iter() {
                for ring in polygon.rings() {
                    segments.extend(ring.lines());
                }
            }
        }
        Geometry::GeometryCollection(collection) => {
            for geometry in collection.iter() {
                collect_segments_into(geometry, segments);
            }
        }
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
    }
}

fn collect_point_coords<F: GeoFloat>(geometry: &Geometry<F>) -> Vec<Coord<F>> {
    let mut coords = Vec::new();
    match geometry {
        Geometry::Point(point) => coords.extend(point.coord()),
        Geometry::MultiPoint(multi) => {
            coords.extend(multi.iter().filter_map(Point::coord));
        }
        Geometry::GeometryCollection(collection) => {
            for geometry in collection.iter() {
                coords.extend(collect_point_coords(geometry));
            }
        }
        _ => {}
    }
    coords
}

fn any_coord<F: GeoFloat>(geometry: &Geometry<F>) -> Option<Coord<F>> {
    use crate::algorithm::map_coords::VisitCoords;
    let mut first = None;
    geometry.visit_coords(&mut |c| {
        if first.is_none() {
            first = Some(c);
        }
    });
    first
}

fn all_coords<F: GeoFloat>(geometry: &Geometry<F>) -> Vec<Coord<F>> {
    use crate::algorithm::map_coords::VisitCoords;
    let mut coords = Vec::new();
    geometry.visit_coords(&mut |c| coords.push(c));
    coords
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn prepared_predicates() {
        let square: Geometry<f64> =
            wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
        let prepared = PreparedGeometry::new(&square);
        prepared.build();

        let inner: Geometry<f64> =
            wkt! { POLYGON((2.0 2.0,4.0 2.0,4.0 4.0,2.0 4.0,2.0 2.0)) }.into();
        let crossing: Geometry<f64> = wkt! { LINESTRING(-5.0 5.0,15.0 5.0) }.into();
        let far: Geometry<f64> = wkt! { POINT(50.0 50.0) }.into();

        assert!(prepared.contains(&inner).unwrap());
        assert!(prepared.covers(&inner).unwrap());
        assert!(prepared.intersects(&inner).unwrap());
        assert!(prepared.intersects(&crossing).unwrap());
        assert!(prepared.crosses(&crossing).unwrap());
        assert!(!prepared.intersects(&far).unwrap());
        assert!(prepared.disjoint(&far).unwrap());
    }

    #[test]
    fn distance_and_nearest() {
        let square: Geometry<f64> =
            wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
        let prepared = PreparedGeometry::new(&square);

        let far_line: Geometry<f64> = wkt! { LINESTRING(20.0 0.0,20.0 10.0) }.into();
        assert_eq!(prepared.distance(&far_line).unwrap(), 10.0);
        assert!(prepared.is_within_distance(&far_line, 10.5).unwrap());
        assert!(!prepared.is_within_distance(&far_line, 9.5).unwrap());

        let (pa, pb) = prepared.nearest_points(&far_line).unwrap().unwrap();
        assert_eq!(pa.x, 10.0);
        assert_eq!(pb.x, 20.0);

        let touching: Geometry<f64> = wkt! { LINESTRING(10.0 5.0,30.0 5.0) }.into();
        assert_eq!(prepared.distance(&touching).unwrap(), 0.0);
    }

    #[test]
    fn point_in_area_queries() {
        let square: Geometry<f64> =
            wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
        let prepared = PreparedGeometry::new(&square);

        assert_eq!(prepared.locate(crate::coord! { x: 5.0, y: 5.0 }), CoordPos::Inside);
        assert_eq!(
            prepared.locate(crate::coord! { x: 0.0, y: 5.0 }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            prepared.locate(crate::coord! { x: -5.0, y: 5.0 }),
            CoordPos::Outside
        );
    }
}
