use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
use crate::utils::lex_cmp;
use crate::{
    Coord, Error, GeoFloat, Geometry, GeometryCollection, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

/// The OGC boundary of a geometry.
///
/// - the boundary of a point set is empty;
/// - the boundary of linear geometry consists of its component endpoints
///   selected by the boundary node rule (a closed line has an empty
///   boundary under `Mod2`);
/// - the boundary of an areal geometry is its rings, as line strings.
///
/// The boundary of a heterogeneous collection is not defined and reports
/// `UnsupportedOperation`.
pub trait Boundary<F: GeoFloat> {
    fn boundary(&self) -> Result<Geometry<F>, Error> {
        self.boundary_with_rule(BoundaryNodeRule::default())
    }

    fn boundary_with_rule(&self, rule: BoundaryNodeRule) -> Result<Geometry<F>, Error>;
}

fn line_strings_boundary<F: GeoFloat>(
    line_strings: &[&LineString<F>],
    rule: BoundaryNodeRule,
) -> Geometry<F> {
    // count endpoint incidences per coordinate; closed lines contribute
    // their closure point twice
    let mut endpoints: Vec<Coord<F>> = Vec::new();
    for line_string in line_strings {
        if line_string.is_empty() {
            continue;
        }
        let coords = line_string.coords();
        endpoints.push(coords[0]);
        endpoints.push(coords[coords.len() - 1]);
    }
    endpoints.sort_by(lex_cmp);

    let mut boundary_points: Vec<Point<F>> = Vec::new();
    let mut i = 0;
    while i < endpoints.len() {
        let mut j = i + 1;
        while j < endpoints.len() && endpoints[j] == endpoints[i] {
            j += 1;
        }
        if rule.is_in_boundary(j - i) {
            boundary_points.push(Point::new(endpoints[i]));
        }
        i = j;
    }
    Geometry::MultiPoint(MultiPoint::new(boundary_points))
}

fn polygons_boundary<F: GeoFloat>(polygons: &[&Polygon<F>]) -> Geometry<F> {
    let rings: Vec<LineString<F>> = polygons
        .iter()
        .flat_map(|polygon| polygon.rings())
        .filter(|ring| !ring.is_empty())
        .map(|ring| ring.clone().into())
        .collect();
    Geometry::MultiLineString(MultiLineString::new(rings))
}

impl<F: GeoFloat> Boundary<F> for Point<F> {
    fn boundary_with_rule(&self, _rule: BoundaryNodeRule) -> Result<Geometry<F>, Error> {
        Ok(Geometry::GeometryCollection(GeometryCollection::empty()))
    }
}

impl<F: GeoFloat> Boundary<F> for MultiPoint<F> {
    fn boundary_with_rule(&self, _rule: BoundaryNodeRule) -> Result<Geometry<F>, Error> {
        Ok(Geometry::GeometryCollection(GeometryCollection::empty()))
    }
}

impl<F: GeoFloat> Boundary<F> for LineString<F> {
    fn boundary_with_rule(&self, rule: BoundaryNodeRule) -> Result<Geometry<F>, Error> {
        Ok(line_strings_boundary(&[self], rule))
    }
}

impl<F: GeoFloat> Boundary<F> for MultiLineString<F> {
    fn boundary_with_rule(&self, rule: BoundaryNodeRule) -> Result<Geometry<F>, Error> {
        let line_strings: Vec<&LineString<F>> = self.iter().collect();
        Ok(line_strings_boundary(&line_strings, rule))
    }
}

impl<F: GeoFloat> Boundary<F> for Polygon<F> {
    fn boundary_with_rule(&self, _rule: BoundaryNodeRule) -> Result<Geometry<F>, Error> {
        Ok(polygons_boundary(&[self]))
    }
}

impl<F: GeoFloat> Boundary<F> for MultiPolygon<F> {
    fn boundary_with_rule(&self, _rule: BoundaryNodeRule) -> Result<Geometry<F>, Error> {
        let polygons: Vec<&Polygon<F>> = self.iter().collect();
        Ok(polygons_boundary(&polygons))
    }
}

impl<F: GeoFloat> Boundary<F> for Geometry<F> {
    fn boundary_with_rule(&self, rule: BoundaryNodeRule) -> Result<Geometry<F>, Error> {
        match self {
            Geometry::Point(g) => g.boundary_with_rule(rule),
            Geometry::LineString(g) => g.boundary_with_rule(rule),
            Geometry::Polygon(g) => g.boundary_with_rule(rule),
            Geometry::MultiPoint(g) => g.boundary_with_rule(rule),
            Geometry::MultiLineString(g) => g.boundary_with_rule(rule),
            Geometry::MultiPolygon(g) => g.boundary_with_rule(rule),
            Geometry::GeometryCollection(_) => Err(Error::unsupported(
                "the boundary of a heterogeneous GeometryCollection is not defined",
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn open_line_boundary_is_its_endpoints() {
        let line = wkt! { LINESTRING(0.0 0.0,5.0 0.0,5.0 5.0) };
        match line.boundary().unwrap() {
            Geometry::MultiPoint(points) => assert_eq!(points.len(), 2),
            other => panic!("expected multipoint boundary, got {other:?}"),
        }
    }

    #[test]
    fn closed_line_boundary_depends_on_the_rule() {
        let ring = wkt! { LINESTRING(0.0 0.0,5.0 0.0,5.0 5.0,0.0 0.0) };
        match ring.boundary().unwrap() {
            Geometry::MultiPoint(points) => assert!(points.points().is_empty()),
            other => panic!("expected multipoint boundary, got {other:?}"),
        }
        match ring.boundary_with_rule(BoundaryNodeRule::EndPoint).unwrap() {
            Geometry::MultiPoint(points) => assert_eq!(points.len(), 1),
            other => panic!("expected multipoint boundary, got {other:?}"),
        }
    }

    #[test]
    fn polygon_boundary_is_its_rings() {
        let polygon = wkt! { POLYGON(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
            (2.0 2.0,4.0 2.0,4.0 4.0,2.0 4.0,2.0 2.0)
        ) };
        match polygon.boundary().unwrap() {
            Geometry::MultiLineString(rings) => assert_eq!(rings.len(), 2),
            other => panic!("expected ring boundary, got {other:?}"),
        }
    }
}
