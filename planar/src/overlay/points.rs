use super::graph::OverlayGraph;
use super::label::OverlayDim;
use super::OverlayOp;
use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use crate::prepared::point_locator::IndexedPointInAreaLocator;
use crate::utils::lex_cmp;
use crate::{Coord, GeoFloat, Geometry, MultiPoint, Point, PrecisionModel};

/// The unique, precision-rounded point coordinates of a geometry.
fn rounded_points<F: GeoFloat>(geometry: &Geometry<F>, pm: &PrecisionModel) -> Vec<Coord<F>> {
    let mut coords = Vec::new();
    match geometry {
        Geometry::Point(point) => {
            if let Some(coord) = point.coord() {
                coords.push(pm.make_coord_precise(coord));
            }
        }
        Geometry::MultiPoint(multi) => {
            for point in multi.iter() {
                if let Some(coord) = point.coord() {
                    coords.push(pm.make_coord_precise(coord));
                }
            }
        }
        Geometry::GeometryCollection(collection) => {
            for geometry in collection.iter() {
                coords.extend(rounded_points(geometry, pm));
            }
        }
        _ => {}
    }
    coords.sort_by(lex_cmp);
    coords.dedup();
    coords
}

/// Set algebra on two pure-point operands, under the rounding of the
/// operation's precision model.
pub(crate) fn overlay_points<F: GeoFloat>(
    a: &Geometry<F>,
    b: &Geometry<F>,
    op: OverlayOp,
    pm: &PrecisionModel,
) -> MultiPoint<F> {
    let points_a = rounded_points(a, pm);
    let points_b = rounded_points(b, pm);

    let in_b = |coord: &Coord<F>| points_b.binary_search_by(|probe| lex_cmp(probe, coord)).is_ok();
    let in_a = |coord: &Coord<F>| points_a.binary_search_by(|probe| lex_cmp(probe, coord)).is_ok();

    let mut result: Vec<Coord<F>> = match op {
        OverlayOp::Intersection => points_a.iter().copied().filter(|c| in_b(c)).collect(),
        OverlayOp::Union => {
            let mut all = points_a.clone();
            all.extend(points_b.iter().copied());
            all
        }
        OverlayOp::Difference => points_a.iter().copied().filter(|c| !in_b(c)).collect(),
        OverlayOp::SymDifference => points_a
            .iter()
            .copied()
            .filter(|c| !in_b(c))
            .chain(points_b.iter().copied().filter(|c| !in_a(c)))
            .collect(),
    };
    result.sort_by(lex_cmp);
    result.dedup();

    MultiPoint::new(result.into_iter().map(|c| Point::new(c)).collect())
}

/// Fast path for a point operand against a higher-dimensional operand:
/// each point is located against the other geometry (through the indexed
/// locator when it is areal) instead of running the full pipeline.
///
/// `point_is_a` records which operand the points came from, which matters
/// for the asymmetric operations.
pub(crate) fn overlay_mixed_points<F: GeoFloat>(
    points: &Geometry<F>,
    other: &Geometry<F>,
    point_is_a: bool,
    op: OverlayOp,
    pm: &PrecisionModel,
) -> Vec<Geometry<F>> {
    let coords = rounded_points(points, pm);

    let areal_locator = match other {
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {
            Some(IndexedPointInAreaLocator::new(other))
        }
        _ => None,
    };
    let locate = |coord: Coord<F>| match &areal_locator {
        Some(locator) => locator.locate(coord),
        None => other.coordinate_position(&coord),
    };

    let covered: Vec<Coord<F>> = coords
        .iter()
        .copied()
        .filter(|&c| locate(c) != CoordPos::Outside)
        .collect();
    let uncovered: Vec<Coord<F>> = coords
        .iter()
        .copied()
        .filter(|&c| locate(c) == CoordPos::Outside)
        .collect();

    let to_points = |coords: Vec<Coord<F>>| -> Vec<Geometry<F>> {
        coords
            .into_iter()
            .map(|c| Geometry::Point(Point::new(c)))
            .collect()
    };

    match op {
        OverlayOp::Intersection => to_points(covered),
        // the higher-dimensional operand passes through; only points
        // clear of it add anything
        OverlayOp::Union | OverlayOp::SymDifference => {
            let mut result = vec![other.clone()];
            result.extend(to_points(uncovered));
            result
        }
        OverlayOp::Difference => {
            if point_is_a {
                to_points(uncovered)
            } else {
                // subtracting measure-zero points leaves the operand as is
                vec![other.clone()]
            }
        }
    }
}

/// Extract the zero-dimensional part of an INTERSECTION result: nodes where
/// both operands are incident but which no result edge covers. These are
/// the isolated touch points (lines crossing, polygons meeting at a
/// vertex).
pub(crate) fn build_intersection_points<F: GeoFloat>(graph: &OverlayGraph<F>) -> Vec<Point<F>> {
    let mut points = Vec::new();
    for (node, star) in graph.node_edges.iter().enumerate() {
        let mut in_a = false;
        let mut in_b = false;
        let mut in_result = false;
        for &edge_id in star {
            let half = &graph.edges[edge_id];
            let label = &graph.merged[half.merged].label;
            in_a |= label.dim(0) != OverlayDim::NotPart;
            in_b |= label.dim(1) != OverlayDim::NotPart;
            in_result |= half.in_result_area
                || graph.edges[super::graph::sym(edge_id)].in_result_area
                || graph.edges[half.merged * 2].in_result_line;
        }
        if in_a && in_b && !in_result {
            points.push(Point::new(graph.node_coords[node]));
        }
    }
    points
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn point_set_algebra() {
        let a: Geometry<f64> = wkt! { MULTIPOINT((1.0 1.0),(2.0 2.0)) }.into();
        let b: Geometry<f64> = wkt! { POINT(2.0 2.0) }.into();
        let pm = PrecisionModel::default();

        let union = overlay_points(&a, &b, OverlayOp::Union, &pm);
        assert_eq!(union.len(), 2);

        let intersection = overlay_points(&a, &b, OverlayOp::Intersection, &pm);
        assert_eq!(intersection.len(), 1);
        assert_eq!(intersection.points()[0].x(), 2.0);

        let difference = overlay_points(&a, &b, OverlayOp::Difference, &pm);
        assert_eq!(difference.len(), 1);
        assert_eq!(difference.points()[0].x(), 1.0);

        let sym = overlay_points(&a, &b, OverlayOp::SymDifference, &pm);
        assert_eq!(sym.len(), 1);
    }

    #[test]
    fn fixed_model_snaps_before_comparing() {
        let a: Geometry<f64> = wkt! { POINT(1.01 1.0) }.into();
        let b: Geometry<f64> = wkt! { POINT(0.99 1.0) }.into();
        let pm = PrecisionModel::fixed(1.0).unwrap();
        let intersection = overlay_points(&a, &b, OverlayOp::Intersection, &pm);
        assert_eq!(intersection.len(), 1);
    }

    #[test]
    fn points_against_polygon() {
        let points: Geometry<f64> = wkt! { MULTIPOINT((5.0 5.0),(20.0 20.0)) }.into();
        let square: Geometry<f64> =
            wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
        let pm = PrecisionModel::default();

        let parts = overlay_mixed_points(&points, &square, true, OverlayOp::Intersection, &pm);
        assert_eq!(parts.len(), 1);

        let parts = overlay_mixed_points(&points, &square, true, OverlayOp::Difference, &pm);
        assert_eq!(parts.len(), 1);
        match &parts[0] {
            Geometry::Point(point) => assert_eq!(point.x(), 20.0),
            other => panic!("expected point, got {other:?}"),
        }

        let parts = overlay_mixed_points(&points, &square, true, OverlayOp::Union, &pm);
        // the polygon plus the uncovered point
        assert_eq!(parts.len(), 2);
    }
}
