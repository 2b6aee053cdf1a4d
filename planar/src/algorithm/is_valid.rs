use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
use crate::algorithm::coordinate_position::{locate_in_ring, CoordPos};
use crate::algorithm::is_simple::is_simple_linear;
use crate::algorithm::line_intersection::{line_intersection, LineIntersection};
use crate::noding::SegmentString;
use crate::{
    Coord, Error, GeoFloat, Geometry, GeometryCollection, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

/// Structural and topological validity per the OGC simple-features rules.
///
/// The checks performed:
///
/// - line strings need two or more *distinct* coordinates;
/// - rings must be closed, non-empty-or-4+, and free of self-intersection;
/// - polygon rings must not cross each other; holes must lie inside the
///   shell and not inside other holes;
/// - multipolygon elements must not overlap.
///
/// Interior-connectivity violations caused by chains of touching rings are
/// not detected.
pub trait IsValid<F: GeoFloat> {
    fn is_valid(&self) -> bool {
        self.check_validity().is_ok()
    }

    /// `Err` carries the reason and, where known, the offending location.
    fn check_validity(&self) -> Result<(), Error>;
}

fn check_ring<F: GeoFloat>(ring: &LinearRing<F>) -> Result<(), Error> {
    if ring.is_empty() {
        return Ok(());
    }
    // distinct-coordinate count; closure and minimum length hold by
    // construction
    let mut distinct = ring.coords().to_vec();
    distinct.sort_by(crate::utils::lex_cmp);
    distinct.dedup();
    if distinct.len() < 3 {
        return Err(Error::invalid("ring has too few distinct coordinates"));
    }

    let string = SegmentString::new(ring.coords().to_vec(), 0);
    if !is_simple_linear(&[string], BoundaryNodeRule::Mod2) {
        let coord = ring.coords()[0];
        return Err(Error::topology_at("ring self-intersection", coord));
    }
    Ok(())
}

/// Whether two rings cross (share interior points transversally or along a
/// collinear overlap). Touching at finitely many points is legal.
fn rings_cross<F: GeoFloat>(a: &LinearRing<F>, b: &LinearRing<F>) -> Option<Coord<F>> {
    match (a.envelope(), b.envelope()) {
        (Some(env_a), Some(env_b)) if env_a.intersects(&env_b) => {}
        _ => return None,
    }
    for line_a in a.lines() {
        for line_b in b.lines() {
            match line_intersection(line_a, line_b) {
                Some(LineIntersection::SinglePoint {
                    is_proper: true,
                    intersection,
                }) => return Some(intersection),
                Some(LineIntersection::Collinear { intersection }) => {
                    return Some(intersection.start)
                }
                _ => {}
            }
        }
    }
    None
}

/// A coordinate of `ring` that does not lie on `other`, to use as a probe
/// for containment tests between touching rings.
fn probe_coord<F: GeoFloat>(ring: &LinearRing<F>, other: &LinearRing<F>) -> Option<Coord<F>> {
    ring.coords()
        .iter()
        .find(|coord| locate_in_ring(**coord, other.coords()) != CoordPos::OnBoundary)
        .copied()
}

impl<F: GeoFloat> IsValid<F> for Point<F> {
    fn check_validity(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<F: GeoFloat> IsValid<F> for MultiPoint<F> {
    fn check_validity(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<F: GeoFloat> IsValid<F> for LineString<F> {
    fn check_validity(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        let first = self.coords()[0];
        if self.coords().iter().all(|&coord| coord == first) {
            return Err(Error::invalid(
                "a LineString needs at least two distinct coordinates",
            ));
        }
        Ok(())
    }
}

impl<F: GeoFloat> IsValid<F> for MultiLineString<F> {
    fn check_validity(&self) -> Result<(), Error> {
        for line_string in self.iter() {
            line_string.check_validity()?;
        }
        Ok(())
    }
}

impl<F: GeoFloat> IsValid<F> for LinearRing<F> {
    fn check_validity(&self) -> Result<(), Error> {
        check_ring(self)
    }
}

impl<F: GeoFloat> IsValid<F> for Polygon<F> {
    fn check_validity(&self) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        for ring in self.rings() {
            check_ring(ring)?;
        }

        let shell = self.exterior();
        for (i, hole) in self.interiors().iter().enumerate() {
            if hole.is_empty() {
                continue;
            }
            if let Some(coord) = rings_cross(shell, hole) {
                return Err(Error::topology_at("hole crosses shell", coord));
            }
            // hole inside shell
            if let Some(probe) = probe_coord(hole, shell) {
                if locate_in_ring(probe, shell.coords()) == CoordPos::Outside {
                    return Err(Error::topology_at("hole lies outside shell", probe));
                }
            }
            for other_hole in &self.interiors()[i + 1..] {
                if other_hole.is_empty() {
                    continue;
                }
                if let Some(coord) = rings_cross(hole, other_hole) {
                    return Err(Error::topology_at("holes cross", coord));
                }
                if let Some(probe) = probe_coord(other_hole, hole) {
                    if locate_in_ring(probe, hole.coords()) == CoordPos::Inside {
                        return Err(Error::topology_at("nested holes", probe));
                    }
                }
            }
        }
        Ok(())
    }
}

impl<F: GeoFloat> IsValid<F> for MultiPolygon<F> {
    fn check_validity(&self) -> Result<(), Error> {
        for polygon in self.iter() {
            polygon.check_validity()?;
        }
        // elements must not overlap: boundaries may touch but not cross,
        // and no element may sit inside another
        let polygons: Vec<&Polygon<F>> = self.iter().filter(|p| !p.is_empty()).collect();
        for (i, a) in polygons.iter().enumerate() {
            for b in &polygons[i + 1..] {
                if let Some(coord) = rings_cross(a.exterior(), b.exterior()) {
                    return Err(Error::topology_at("element shells cross", coord));
                }
                if let Some(probe) = probe_coord(a.exterior(), b.exterior()) {
                    if locate_in_ring(probe, b.exterior().coords()) == CoordPos::Inside
                        && !b
                            .interiors()
                            .iter()
                            .any(|hole| locate_in_ring(probe, hole.coords()) != CoordPos::Outside)
                    {
                        return Err(Error::topology_at("nested or overlapping elements", probe));
                    }
                }
            }
        }
        Ok(())
    }
}

impl<F: GeoFloat> IsValid<F> for GeometryCollection<F> {
    fn check_validity(&self) -> Result<(), Error> {
        for geometry in self.iter() {
            geometry.check_validity()?;
        }
        Ok(())
    }
}

impl<F: GeoFloat> IsValid<F> for Geometry<F> {
    fn check_validity(&self) -> Result<(), Error> {
        match self {
            Geometry::Point(g) => g.check_validity(),
            Geometry::LineString(g) => g.check_validity(),
            Geometry::Polygon(g) => g.check_validity(),
            Geometry::MultiPoint(g) => g.check_validity(),
            Geometry::MultiLineString(g) => g.check_validity(),
            Geometry::MultiPolygon(g) => g.check_validity(),
            Geometry::GeometryCollection(g) => g.check_validity(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn valid_polygon_with_hole() {
        let polygon = wkt! { POLYGON(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
            (2.0 2.0,4.0 2.0,4.0 4.0,2.0 4.0,2.0 2.0)
        ) };
        assert!(polygon.is_valid());
    }

    #[test]
    fn self_intersecting_shell_is_invalid() {
        // bowtie
        let polygon = wkt! { POLYGON((0.0 0.0,10.0 10.0,10.0 0.0,0.0 10.0,0.0 0.0)) };
        assert!(!polygon.is_valid());
        assert!(matches!(
            polygon.check_validity(),
            Err(Error::Topology { .. })
        ));
    }

    #[test]
    fn hole_outside_shell_is_invalid() {
        let polygon = wkt! { POLYGON(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
            (20.0 20.0,22.0 20.0,22.0 22.0,20.0 22.0,20.0 20.0)
        ) };
        assert!(!polygon.is_valid());
    }

    #[test]
    fn hole_crossing_shell_is_invalid() {
        let polygon = wkt! { POLYGON(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
            (5.0 5.0,15.0 5.0,15.0 8.0,5.0 8.0,5.0 5.0)
        ) };
        assert!(!polygon.is_valid());
    }

    #[test]
    fn overlapping_multi_polygon_is_invalid() {
        let multi = wkt! { MULTIPOLYGON(
            ((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)),
            ((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0))
        ) };
        assert!(!multi.is_valid());

        let disjoint = wkt! { MULTIPOLYGON(
            ((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)),
            ((20.0 20.0,30.0 20.0,30.0 30.0,20.0 30.0,20.0 20.0))
        ) };
        assert!(disjoint.is_valid());
    }

    #[test]
    fn degenerate_line_string_is_invalid() {
        let line = crate::LineString::from_coords(vec![
            crate::coord! { x: 1.0, y: 1.0 },
            crate::coord! { x: 1.0, y: 1.0 },
        ])
        .unwrap();
        assert!(!line.is_valid());
    }
}
