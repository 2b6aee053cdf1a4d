//! End-to-end overlay scenarios, checked against independently computed
//! expected results.

use planar::algorithm::equals_exact::EqualsExact;
use planar::algorithm::relate::Relate;
use planar::overlay::{overlay, union::UnaryUnion, BooleanOps, OverlayOp};
use planar::{wkt, Geometry, LineString, MultiLineString};

fn assert_equal_topo(actual: &Geometry<f64>, expected: &Geometry<f64>) {
    let im = actual.relate(expected).unwrap();
    assert!(
        im.is_equal_topo(),
        "expected geometries to be topologically equal:\n actual: {actual:?}\n expected: {expected:?}\n matrix: {im:?}"
    );
}

#[test]
fn polygon_intersection() {
    let a: Geometry<f64> = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
    let b: Geometry<f64> = wkt! { POLYGON((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)) }.into();
    let expected: Geometry<f64> =
        wkt! { POLYGON((5.0 5.0,10.0 5.0,10.0 10.0,5.0 10.0,5.0 5.0)) }.into();

    let result = overlay(&a, &b, OverlayOp::Intersection).unwrap();
    assert_equal_topo(&result, &expected);
}

#[test]
fn crossing_lines_union_is_noded() {
    let a: Geometry<f64> = wkt! { LINESTRING(0.0 0.0,10.0 10.0) }.into();
    let b: Geometry<f64> = wkt! { LINESTRING(0.0 10.0,10.0 0.0) }.into();

    let result = overlay(&a, &b, OverlayOp::Union).unwrap();
    let lines: MultiLineString<f64> = match result {
        Geometry::MultiLineString(lines) => lines,
        other => panic!("expected MULTILINESTRING, got {other:?}"),
    };

    let expected = wkt! { MULTILINESTRING(
        (0.0 0.0,5.0 5.0),
        (5.0 5.0,10.0 10.0),
        (0.0 10.0,5.0 5.0),
        (5.0 5.0,10.0 0.0)
    ) };

    assert_eq!(lines.len(), 4);
    for expected_part in expected.iter() {
        let found = lines.iter().any(|part| {
            part.equals_exact(expected_part, 0.0) || {
                // direction is not significant
                let reversed: LineString<f64> =
                    LineString::new(part.seq().reversed()).unwrap();
                reversed.equals_exact(expected_part, 0.0)
            }
        });
        assert!(found, "missing noded part {expected_part:?} in {lines:?}");
    }
}

#[test]
fn multipoint_union_deduplicates() {
    let a: Geometry<f64> = wkt! { MULTIPOINT((1.0 1.0),(2.0 2.0)) }.into();
    let b: Geometry<f64> = wkt! { POINT(2.0 2.0) }.into();
    let expected: Geometry<f64> = wkt! { MULTIPOINT((1.0 1.0),(2.0 2.0)) }.into();

    let result = overlay(&a, &b, OverlayOp::Union).unwrap();
    assert!(result.equals_exact(&expected, 0.0));
}

#[test]
fn relate_closed_line_under_both_boundary_rules() {
    use planar::algorithm::boundary_node_rule::BoundaryNodeRule;
    use planar::algorithm::relate::IntersectionMatrix;
    use std::str::FromStr;

    let ring = wkt! { LINESTRING(0.0 0.0,10.0 0.0,10.0 10.0,0.0 0.0) };
    let tail = wkt! { LINESTRING(0.0 0.0,0.0 -10.0) };

    let mod2 = ring.relate_with_rule(&tail, BoundaryNodeRule::Mod2).unwrap();
    assert_eq!(mod2, IntersectionMatrix::from_str("F01FFF102").unwrap());

    let endpoint = ring
        .relate_with_rule(&tail, BoundaryNodeRule::EndPoint)
        .unwrap();
    assert_eq!(endpoint, IntersectionMatrix::from_str("FF1F0F102").unwrap());
}

#[test]
fn polygon_difference() {
    let a: Geometry<f64> = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
    let b: Geometry<f64> =
        wkt! { POLYGON((5.0 -5.0,15.0 -5.0,15.0 5.0,5.0 5.0,5.0 -5.0)) }.into();
    let expected: Geometry<f64> =
        wkt! { POLYGON((0.0 0.0,5.0 0.0,5.0 5.0,10.0 5.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();

    let result = overlay(&a, &b, OverlayOp::Difference).unwrap();
    assert_equal_topo(&result, &expected);
}

#[test]
fn unary_union_of_mixed_collection() {
    let collection = wkt! {
        GEOMETRYCOLLECTION(
            POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)),
            POLYGON((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)),
            POINT(20.0 20.0)
        )
    };
    let expected: Geometry<f64> = wkt! {
        GEOMETRYCOLLECTION(
            POLYGON((0.0 0.0,10.0 0.0,10.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 10.0,0.0 10.0,0.0 0.0)),
            POINT(20.0 20.0)
        )
    }
    .into();

    let result = collection.unary_union().unwrap();
    assert_equal_topo(&result, &expected);
}

#[test]
fn touching_polygons_intersect_in_a_line() {
    let a: Geometry<f64> = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
    let b: Geometry<f64> =
        wkt! { POLYGON((10.0 0.0,20.0 0.0,20.0 10.0,10.0 10.0,10.0 0.0)) }.into();

    let result = overlay(&a, &b, OverlayOp::Intersection).unwrap();
    let expected: Geometry<f64> = wkt! { LINESTRING(10.0 0.0,10.0 10.0) }.into();
    assert_equal_topo(&result, &expected);
}

#[test]
fn polygons_touching_at_a_vertex_intersect_in_a_point() {
    let a: Geometry<f64> = wkt! { POLYGON((0.0 0.0,5.0 0.0,5.0 5.0,0.0 5.0,0.0 0.0)) }.into();
    let b: Geometry<f64> = wkt! { POLYGON((5.0 5.0,10.0 5.0,10.0 10.0,5.0 10.0,5.0 5.0)) }.into();

    let result = overlay(&a, &b, OverlayOp::Intersection).unwrap();
    match &result {
        Geometry::Point(point) => {
            assert_eq!(point.coord(), Some(planar::coord! { x: 5.0, y: 5.0 }));
        }
        other => panic!("expected POINT, got {other:?}"),
    }
}

#[test]
fn line_clipped_by_polygon() {
    let line: Geometry<f64> = wkt! { LINESTRING(-5.0 5.0,15.0 5.0) }.into();
    let square: Geometry<f64> =
        wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();

    let inside = overlay(&line, &square, OverlayOp::Intersection).unwrap();
    let expected_inside: Geometry<f64> = wkt! { LINESTRING(0.0 5.0,10.0 5.0) }.into();
    assert_equal_topo(&inside, &expected_inside);

    let outside = overlay(&line, &square, OverlayOp::Difference).unwrap();
    let expected_outside: Geometry<f64> = wkt! { MULTILINESTRING(
        (-5.0 5.0,0.0 5.0),
        (10.0 5.0,15.0 5.0)
    ) }
    .into();
    assert_equal_topo(&outside, &expected_outside);
}

#[test]
fn sym_difference_of_overlapping_squares() {
    let a: Geometry<f64> = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
    let b: Geometry<f64> = wkt! { POLYGON((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)) }.into();

    let result = a.sym_difference(&b).unwrap();
    // the symmetric difference consists of the two L-shaped pieces
    let a_minus_b = a.difference(&b).unwrap();
    let b_minus_a = b.difference(&a).unwrap();
    let rebuilt = a_minus_b.union(&b_minus_a).unwrap();
    assert_equal_topo(&result, &rebuilt);
}

#[test]
fn fixed_precision_intersection_snaps_output() {
    use planar::overlay::{overlay_with_config, OverlayConfig};
    use planar::PrecisionModel;

    let a: Geometry<f64> =
        wkt! { POLYGON((0.0 0.0,10.0 0.1,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
    let b: Geometry<f64> =
        wkt! { POLYGON((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)) }.into();

    let config = OverlayConfig::with_precision_model(PrecisionModel::fixed(1.0).unwrap());
    let result = overlay_with_config(&a, &b, OverlayOp::Intersection, &config).unwrap();

    use planar::algorithm::map_coords::VisitCoords;
    result.visit_coords(&mut |c| {
        assert_eq!(c.x, c.x.round(), "unsnapped x in {result:?}");
        assert_eq!(c.y, c.y.round(), "unsnapped y in {result:?}");
    });
    assert!(!result.is_empty());
}

#[test]
fn hole_is_preserved_through_union() {
    let with_hole: Geometry<f64> = wkt! { POLYGON(
        (0.0 0.0,20.0 0.0,20.0 20.0,0.0 20.0,0.0 0.0),
        (5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)
    ) }
    .into();
    let small: Geometry<f64> =
        wkt! { POLYGON((-5.0 -5.0,2.0 -5.0,2.0 2.0,-5.0 2.0,-5.0 -5.0)) }.into();

    let result = overlay(&with_hole, &small, OverlayOp::Union).unwrap();
    match &result {
        Geometry::Polygon(polygon) => {
            assert_eq!(polygon.interiors().len(), 1, "hole lost: {polygon:?}");
        }
        other => panic!("expected POLYGON, got {other:?}"),
    }
}
