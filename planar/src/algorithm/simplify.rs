use crate::{
    Coord, GeoFloat, Geometry, LineString, LinearRing, MultiLineString, MultiPolygon, Polygon,
};

/// Simplifies a geometry with the Ramer-Douglas-Peucker algorithm.
///
/// Vertices whose perpendicular distance from the simplified trend line is
/// below `epsilon` are removed. Rings keep at least four coordinates so
/// polygons stay structurally valid; topology preservation beyond that is
/// not attempted (a heavily simplified polygon can self-intersect).
pub trait Simplify<F: GeoFloat> {
    fn simplify(&self, epsilon: F) -> Self;
}

/// Perpendicular distance from `point` to the (infinite extent of the)
/// segment `start`-`end`, degrading to point distance for a degenerate
/// segment.
fn perpendicular_distance<F: GeoFloat>(point: Coord<F>, start: Coord<F>, end: Coord<F>) -> F {
    if start == end {
        let d = point - start;
        return d.x.hypot(d.y);
    }
    let d = end - start;
    let length = d.x.hypot(d.y);
    ((point.x - start.x) * d.y - (point.y - start.y) * d.x).abs() / length
}

fn rdp<F: GeoFloat>(coords: &[Coord<F>], epsilon: F, keep: &mut Vec<Coord<F>>) {
    if coords.len() < 3 {
        keep.extend_from_slice(coords);
        return;
    }
    let start = coords[0];
    let end = coords[coords.len() - 1];

    let mut max_distance = F::zero();
    let mut max_index = 0;
    for (index, &coord) in coords.iter().enumerate().skip(1).take(coords.len() - 2) {
        let distance = perpendicular_distance(coord, start, end);
        if distance > max_distance {
            max_distance = distance;
            max_index = index;
        }
    }

    if max_distance > epsilon {
        rdp(&coords[..=max_index], epsilon, keep);
        keep.pop();
        rdp(&coords[max_index..], epsilon, keep);
    } else {
        keep.push(start);
        keep.push(end);
    }
}

fn simplify_coords<F: GeoFloat>(coords: &[Coord<F>], epsilon: F) -> Vec<Coord<F>> {
    let mut keep = Vec::with_capacity(coords.len().min(8));
    rdp(coords, epsilon, &mut keep);
    keep
}

impl<F: GeoFloat> Simplify<F> for LineString<F> {
    fn simplify(&self, epsilon: F) -> Self {
        LineString::from_coords(simplify_coords(self.coords(), epsilon))
            .expect("simplification keeps segment endpoints")
            .with_context(*self.ctx())
    }
}

impl<F: GeoFloat> Simplify<F> for LinearRing<F> {
    fn simplify(&self, epsilon: F) -> Self {
        let simplified = simplify_coords(self.coords(), epsilon);
        if simplified.len() < 4 {
            // over-simplified ring; the original is the best valid answer
            return self.clone();
        }
        LinearRing::from_coords(simplified)
            .expect("ring keeps its closure")
            .with_context(*self.ctx())
    }
}

impl<F: GeoFloat> Simplify<F> for Polygon<F> {
    fn simplify(&self, epsilon: F) -> Self {
        let exterior = self.exterior().simplify(epsilon);
        let interiors = self
            .interiors()
            .iter()
            .map(|ring| ring.simplify(epsilon))
            .collect();
        Polygon::new(exterior, interiors)
            .expect("simplification keeps ring structure")
            .with_context(*self.ctx())
    }
}

impl<F: GeoFloat> Simplify<F> for MultiLineString<F> {
    fn simplify(&self, epsilon: F) -> Self {
        MultiLineString::new(self.iter().map(|ls| ls.simplify(epsilon)).collect())
            .with_context(*self.ctx())
    }
}

impl<F: GeoFloat> Simplify<F> for MultiPolygon<F> {
    fn simplify(&self, epsilon: F) -> Self {
        MultiPolygon::new(self.iter().map(|p| p.simplify(epsilon)).collect())
            .with_context(*self.ctx())
    }
}

impl<F: GeoFloat> Simplify<F> for Geometry<F> {
    fn simplify(&self, epsilon: F) -> Self {
        match self {
            Geometry::LineString(g) => Geometry::LineString(g.simplify(epsilon)),
            Geometry::Polygon(g) => Geometry::Polygon(g.simplify(epsilon)),
            Geometry::MultiLineString(g) => Geometry::MultiLineString(g.simplify(epsilon)),
            Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.simplify(epsilon)),
            Geometry::GeometryCollection(g) => Geometry::GeometryCollection(
                g.iter()
                    .map(|geometry| geometry.simplify(epsilon))
                    .collect(),
            ),
            // points cannot be simplified
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{coord, wkt};

    #[test]
    fn drops_nearly_collinear_vertices() {
        let line = wkt! { LINESTRING(0.0 0.0,5.0 0.01,10.0 0.0) };
        let simplified = line.simplify(1.0);
        assert_eq!(
            simplified.coords(),
            &[coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }]
        );
    }

    #[test]
    fn keeps_significant_vertices() {
        let line = wkt! { LINESTRING(0.0 0.0,5.0 4.0,10.0 0.0) };
        let simplified = line.simplify(1.0);
        assert_eq!(simplified.num_coords(), 3);
    }

    #[test]
    fn ring_stays_closed_and_valid() {
        let polygon = wkt! { POLYGON((0.0 0.0,5.0 0.1,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) };
        let simplified = polygon.simplify(1.0);
        assert!(simplified.exterior().num_coords() >= 4);
        assert_eq!(
            simplified.exterior().coords().first(),
            simplified.exterior().coords().last()
        );
    }
}
