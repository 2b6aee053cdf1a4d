use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
use crate::algorithm::line_intersection::{line_intersection, LineIntersection};
use crate::index::chain::MonotoneChain;
use crate::index::strtree::StrTree;
use crate::noding::{trivial_intersection, SegmentString};
use crate::utils::lex_cmp;
use crate::{
    Coord, GeoFloat, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

/// Tests whether a geometry is *simple*: free of anomalous self-contact.
///
/// - a point is always simple; a multipoint is simple when it has no
///   repeated points;
/// - linear geometry is simple when the only self-intersections are at
///   boundary points, as selected by the boundary node rule (so a closed
///   ring is simple, but a ring touched at its closure point by another
///   component is not, under `Mod2`);
/// - polygonal geometry is always simple; ring anomalies are the business
///   of the validity predicate.
pub trait IsSimple<F: GeoFloat> {
    fn is_simple(&self) -> bool {
        self.is_simple_with_rule(BoundaryNodeRule::default())
    }

    fn is_simple_with_rule(&self, rule: BoundaryNodeRule) -> bool;
}

/// Simplicity check over a set of linear components.
pub(crate) fn is_simple_linear<F: GeoFloat>(
    strings: &[SegmentString<F>],
    rule: BoundaryNodeRule,
) -> bool {
    let strings: Vec<&SegmentString<F>> =
        strings.iter().filter(|string| string.len() >= 2).collect();

    let is_string_endpoint = |string: &SegmentString<F>, p: Coord<F>| {
        let coords = string.coords();
        p == coords[0] || p == coords[coords.len() - 1]
    };

    // candidate segment pairs via chains in an STR-tree
    let mut chains: Vec<MonotoneChain<'_, F>> = Vec::new();
    for (string_index, string) in strings.iter().enumerate() {
        chains.extend(MonotoneChain::chains_of(string.coords(), string_index));
    }
    let mut tree: StrTree<F, usize> = StrTree::new();
    for (chain_index, chain) in chains.iter().enumerate() {
        tree.insert(*chain.envelope(), chain_index);
    }

    let mut simple = true;
    for (chain_index, chain) in chains.iter().enumerate() {
        if !simple {
            break;
        }
        tree.query(chain.envelope(), &mut |_env, &other_index| {
            if other_index <= chain_index || !simple {
                return;
            }
            let other = &chains[other_index];
            chain.compute_overlaps(other, &mut |seg0, seg1| {
                if !simple {
                    return;
                }
                let string0 = strings[chain.parent];
                let string1 = strings[other.parent];
                if chain.parent == other.parent && seg0 == seg1 {
                    return;
                }
                let line0 = chain.line(seg0);
                let line1 = other.line(seg1);
                let intersection = match line_intersection(line0, line1) {
                    Some(intersection) => intersection,
                    None => return,
                };
                if chain.parent == other.parent
                    && trivial_intersection(&intersection, string0, seg0, seg1)
                {
                    return;
                }
                match intersection {
                    LineIntersection::Collinear { .. } => simple = false,
                    LineIntersection::SinglePoint { is_proper: true, .. } => simple = false,
                    LineIntersection::SinglePoint {
                        intersection: point,
                        ..
                    } => {
                        // improper contact is only allowed at endpoints of
                        // both component strings
                        if !(is_string_endpoint(string0, point)
                            && is_string_endpoint(string1, point))
                        {
                            simple = false;
                        }
                    }
                }
            });
        });
    }
    if !simple {
        return false;
    }

    // Closure points are interior under rules that don't count them as
    // boundary; any extra incidence there is then an interior
    // self-intersection.
    if !rule.is_in_boundary(2) {
        let mut endpoints: Vec<(Coord<F>, bool)> = Vec::new();
        for string in &strings {
            let coords = string.coords();
            let closed = string.is_closed();
            endpoints.push((coords[0], closed));
            endpoints.push((coords[coords.len() - 1], closed));
        }
        endpoints.sort_by(|a, b| lex_cmp(&a.0, &b.0));
        let mut i = 0;
        while i < endpoints.len() {
            let mut j = i + 1;
            let mut any_closed = endpoints[i].1;
            while j < endpoints.len() && endpoints[j].0 == endpoints[i].0 {
                any_closed |= endpoints[j].1;
                j += 1;
            }
            if any_closed && j - i != 2 {
                return false;
            }
            i = j;
        }
    }

    true
}

fn line_string_segments<F: GeoFloat>(line_strings: &[&LineString<F>]) -> Vec<SegmentString<F>> {
    line_strings
        .iter()
        .enumerate()
        .map(|(i, ls)| SegmentString::new(ls.coords().to_vec(), i as u64))
        .collect()
}

impl<F: GeoFloat> IsSimple<F> for Point<F> {
    fn is_simple_with_rule(&self, _rule: BoundaryNodeRule) -> bool {
        true
    }
}

impl<F: GeoFloat> IsSimple<F> for MultiPoint<F> {
    fn is_simple_with_rule(&self, _rule: BoundaryNodeRule) -> bool {
        let mut coords: Vec<Coord<F>> = self.iter().filter_map(Point::coord).collect();
        coords.sort_by(lex_cmp);
        coords.windows(2).all(|pair| pair[0] != pair[1])
    }
}

impl<F: GeoFloat> IsSimple<F> for LineString<F> {
    fn is_simple_with_rule(&self, rule: BoundaryNodeRule) -> bool {
        is_simple_linear(&line_string_segments(&[self]), rule)
    }
}

impl<F: GeoFloat> IsSimple<F> for LinearRing<F> {
    fn is_simple_with_rule(&self, rule: BoundaryNodeRule) -> bool {
        let line_string: LineString<F> = self.clone().into();
        line_string.is_simple_with_rule(rule)
    }
}

impl<F: GeoFloat> IsSimple<F> for MultiLineString<F> {
    fn is_simple_with_rule(&self, rule: BoundaryNodeRule) -> bool {
        let line_strings: Vec<&LineString<F>> = self.iter().collect();
        is_simple_linear(&line_string_segments(&line_strings), rule)
    }
}

impl<F: GeoFloat> IsSimple<F> for Polygon<F> {
    fn is_simple_with_rule(&self, _rule: BoundaryNodeRule) -> bool {
        true
    }
}

impl<F: GeoFloat> IsSimple<F> for MultiPolygon<F> {
    fn is_simple_with_rule(&self, _rule: BoundaryNodeRule) -> bool {
        true
    }
}

impl<F: GeoFloat> IsSimple<F> for GeometryCollection<F> {
    fn is_simple_with_rule(&self, rule: BoundaryNodeRule) -> bool {
        self.iter().all(|geometry| geometry.is_simple_with_rule(rule))
    }
}

impl<F: GeoFloat> IsSimple<F> for Geometry<F> {
    fn is_simple_with_rule(&self, rule: BoundaryNodeRule) -> bool {
        match self {
            Geometry::Point(g) => g.is_simple_with_rule(rule),
            Geometry::LineString(g) => g.is_simple_with_rule(rule),
            Geometry::Polygon(g) => g.is_simple_with_rule(rule),
            Geometry::MultiPoint(g) => g.is_simple_with_rule(rule),
            Geometry::MultiLineString(g) => g.is_simple_with_rule(rule),
            Geometry::MultiPolygon(g) => g.is_simple_with_rule(rule),
            Geometry::GeometryCollection(g) => g.is_simple_with_rule(rule),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn crossing_line_is_not_simple() {
        let bowtie = wkt! { LINESTRING(0.0 0.0,10.0 10.0,10.0 0.0,0.0 10.0) };
        assert!(!bowtie.is_simple());

        let plain = wkt! { LINESTRING(0.0 0.0,10.0 10.0,20.0 0.0) };
        assert!(plain.is_simple());
    }

    #[test]
    fn closed_ring_is_simple() {
        let ring = wkt! { LINESTRING(0.0 0.0,10.0 0.0,10.0 10.0,0.0 0.0) };
        assert!(ring.is_simple());
    }

    #[test]
    fn repeated_multipoint_is_not_simple() {
        let multi = wkt! { MULTIPOINT((1.0 1.0),(2.0 2.0),(1.0 1.0)) };
        assert!(!multi.is_simple());
        let distinct = wkt! { MULTIPOINT((1.0 1.0),(2.0 2.0)) };
        assert!(distinct.is_simple());
    }

    #[test]
    fn lines_touching_at_endpoints_are_simple() {
        let multi = wkt! { MULTILINESTRING((0.0 0.0,5.0 5.0),(5.0 5.0,10.0 0.0)) };
        assert!(multi.is_simple());
    }

    #[test]
    fn line_touching_ring_closure_point() {
        // a ring plus a line ending at the ring's closure point: under
        // mod-2 the closure point is interior to the ring, so this is not
        // simple; under the endpoint rule it is.
        let multi = wkt! { MULTILINESTRING(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 0.0),
            (0.0 0.0,-5.0 -5.0)
        ) };
        assert!(!multi.is_simple());
        assert!(multi.is_simple_with_rule(BoundaryNodeRule::EndPoint));
    }
}
