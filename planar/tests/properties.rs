//! Universal invariants that must hold across the public surface, checked
//! over a small zoo of representative geometries.

use planar::algorithm::equals_exact::EqualsExact;
use planar::algorithm::is_valid::IsValid;
use planar::algorithm::map_coords::VisitCoords;
use planar::algorithm::predicates::SpatialPredicates;
use planar::algorithm::relate::Relate;
use planar::overlay::{overlay, OverlayOp};
use planar::{coord, wkt, Geometry};

fn zoo() -> Vec<Geometry<f64>> {
    vec![
        wkt! { POINT(3.0 4.0) }.into(),
        wkt! { MULTIPOINT((1.0 1.0),(9.0 2.0),(4.0 7.0)) }.into(),
        wkt! { LINESTRING(0.0 0.0,5.0 5.0,10.0 0.0) }.into(),
        wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into(),
        wkt! { POLYGON(
            (0.0 0.0,20.0 0.0,20.0 20.0,0.0 20.0,0.0 0.0),
            (5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)
        ) }
        .into(),
        wkt! { MULTIPOLYGON(
            ((0.0 0.0,4.0 0.0,4.0 4.0,0.0 4.0,0.0 0.0)),
            ((10.0 10.0,14.0 10.0,14.0 14.0,10.0 14.0,10.0 10.0))
        ) }
        .into(),
    ]
}

#[test]
fn every_geometry_equals_itself() {
    for geometry in zoo() {
        assert!(geometry.equals_exact(&geometry, 0.0), "{geometry:?}");
        let im = geometry.relate(&geometry).unwrap();
        assert!(im.is_equal_topo(), "{geometry:?}");
    }
}

#[test]
fn envelope_contains_every_coordinate() {
    for geometry in zoo() {
        let envelope = geometry.envelope().unwrap();
        geometry.visit_coords(&mut |coord| {
            assert!(
                envelope.intersects_coord(coord),
                "{coord:?} outside envelope of {geometry:?}"
            );
        });
    }
}

#[test]
fn intersection_envelope_is_contained_in_operand_envelope_overlap() {
    let zoo = zoo();
    for a in &zoo {
        for b in &zoo {
            let result = overlay(a, b, OverlayOp::Intersection).unwrap();
            if result.is_empty() {
                continue;
            }
            let env = result.envelope().unwrap();
            let bound = a
                .envelope()
                .unwrap()
                .intersection(&b.envelope().unwrap())
                .expect("non-empty result implies overlapping envelopes");
            // allow exact envelope equality; the result envelope must not
            // poke outside the operand overlap
            assert!(
                bound.contains(&env),
                "result envelope {env:?} escapes {bound:?} for\n a: {a:?}\n b: {b:?}"
            );
        }
    }
}

#[test]
fn union_and_intersection_are_commutative() {
    let zoo = zoo();
    for a in &zoo {
        for b in &zoo {
            for op in [OverlayOp::Union, OverlayOp::Intersection] {
                let ab = overlay(a, b, op).unwrap();
                let ba = overlay(b, a, op).unwrap();
                if ab.is_empty() && ba.is_empty() {
                    continue;
                }
                let im = ab.relate(&ba).unwrap();
                assert!(
                    im.is_equal_topo(),
                    "{op:?} not commutative for\n a: {a:?}\n b: {b:?}\n ab: {ab:?}\n ba: {ba:?}"
                );
            }
        }
    }
}

#[test]
fn point_membership_distributes_over_union() {
    let a: Geometry<f64> = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
    let b: Geometry<f64> = wkt! { POLYGON((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)) }.into();
    let union = overlay(&a, &b, OverlayOp::Union).unwrap();

    let probes = [
        coord! { x: 2.0, y: 2.0 },
        coord! { x: 7.0, y: 7.0 },
        coord! { x: 12.0, y: 12.0 },
        coord! { x: 30.0, y: 30.0 },
        coord! { x: 12.0, y: 2.0 },
    ];
    use planar::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
    for probe in probes {
        let in_union = union.coordinate_position(&probe) != CoordPos::Outside;
        let in_either = a.coordinate_position(&probe) != CoordPos::Outside
            || b.coordinate_position(&probe) != CoordPos::Outside;
        assert_eq!(in_union, in_either, "membership differs at {probe:?}");
    }
}

#[test]
fn overlay_results_are_valid() {
    let zoo = zoo();
    for a in &zoo {
        for b in &zoo {
            for op in [
                OverlayOp::Intersection,
                OverlayOp::Union,
                OverlayOp::Difference,
                OverlayOp::SymDifference,
            ] {
                let result = overlay(a, b, op).unwrap();
                assert!(
                    result.is_valid(),
                    "invalid {op:?} result\n a: {a:?}\n b: {b:?}\n result: {result:?}"
                );
            }
        }
    }
}

#[test]
fn union_with_empty_is_identity() {
    for geometry in zoo() {
        let empty: Geometry<f64> = wkt! { GEOMETRYCOLLECTION EMPTY }.into();
        let result = overlay(&geometry, &empty, OverlayOp::Union).unwrap();
        assert!(result.equals_exact(&geometry, 0.0), "{geometry:?}");
    }
}

#[test]
fn difference_with_self_is_empty() {
    for geometry in zoo() {
        let result = overlay(&geometry, &geometry, OverlayOp::Difference).unwrap();
        assert!(result.is_empty(), "{geometry:?} minus itself: {result:?}");
    }
}

#[test]
fn containment_predicates_are_consistent() {
    let outer: Geometry<f64> =
        wkt! { POLYGON((0.0 0.0,20.0 0.0,20.0 20.0,0.0 20.0,0.0 0.0)) }.into();
    let inner: Geometry<f64> =
        wkt! { POLYGON((5.0 5.0,10.0 5.0,10.0 10.0,5.0 10.0,5.0 5.0)) }.into();

    assert!(outer.contains(&inner).unwrap());
    assert!(inner.within(&outer).unwrap());
    assert_eq!(
        outer.contains(&inner).unwrap(),
        inner.within(&outer).unwrap()
    );
    assert!(outer.covers(&inner).unwrap());
    assert!(inner.covered_by(&outer).unwrap());
    assert!(outer.intersects(&inner).unwrap());
    assert!(!outer.disjoint(&inner).unwrap());
}
