use crate::algorithm::centroid::Centroid;
use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use crate::algorithm::dimensions::{Dimensions, HasDimensions};
use crate::algorithm::kernels::{HasKernel, Kernel};
use crate::algorithm::map_coords::VisitCoords;
use crate::{coord, Coord, GeoFloat, Geometry, LineString, MultiPolygon, Point, Polygon};

/// Calculation of a representative point guaranteed to lie in the interior
/// of a geometry (on the geometry itself for lines and points).
///
/// For areal geometries the point is found on a horizontal scanline through
/// the middle of the envelope: the widest run of interior is located and
/// its midpoint taken. For lines, the vertex closest to the centroid is
/// chosen; for point sets, the closest member point.
pub trait InteriorPoint<F: GeoFloat> {
    /// A point interior to (or on) the geometry, or `None` when empty.
    fn interior_point(&self) -> Option<Point<F>>;
}

fn scanline_interior_point<F: GeoFloat>(
    polygons: &[&Polygon<F>],
) -> Option<Point<F>> {
    let mut envelope = None;
    for polygon in polygons {
        match (envelope, polygon.envelope()) {
            (None, env) => envelope = env,
            (Some(e), Some(env)) => envelope = Some(e.combine(&env)),
            (Some(_), None) => {}
        }
    }
    let envelope = envelope?;
    let two = F::one() + F::one();
    let scan_y = (envelope.min().y + envelope.max().y) / two;

    // gather the crossings of the scanline with every ring
    let mut crossings: Vec<F> = Vec::new();
    for polygon in polygons {
        for ring in polygon.rings() {
            for line in ring.lines() {
                let (y0, y1) = (line.start.y, line.end.y);
                // half-open rule so a vertex on the scanline counts once
                if (y0 <= scan_y && y1 > scan_y) || (y1 <= scan_y && y0 > scan_y) {
                    let t = (scan_y - y0) / (y1 - y0);
                    crossings.push(line.start.x + t * (line.end.x - line.start.x));
                }
            }
        }
    }
    crossings.sort_by(crate::utils::total_cmp);

    // interior intervals lie between alternating crossing pairs; pick the
    // midpoint of the widest one that really is interior
    let mut best: Option<(F, Coord<F>)> = None;
    for pair in crossings.chunks(2) {
        if pair.len() < 2 {
            break;
        }
        let width = pair[1] - pair[0];
        let midpoint = coord! { x: (pair[0] + pair[1]) / two, y: scan_y };
        let is_interior = polygons
            .iter()
            .any(|polygon| polygon.coordinate_position(&midpoint) == CoordPos::Inside);
        if is_interior && best.map(|(w, _)| width > w).unwrap_or(true) {
            best = Some((width, midpoint));
        }
    }
    best.map(|(_, coord)| Point::new(coord))
}

fn closest_coord_to<F: GeoFloat>(
    geometry: &impl VisitCoords<F>,
    target: Coord<F>,
) -> Option<Coord<F>> {
    let mut best: Option<(F, Coord<F>)> = None;
    geometry.visit_coords(&mut |coord| {
        let distance = F::Ker::square_euclidean_distance(coord, target);
        if best.map(|(d, _)| distance < d).unwrap_or(true) {
            best = Some((distance, coord));
        }
    });
    best.map(|(_, coord)| coord)
}

impl<F: GeoFloat> InteriorPoint<F> for Polygon<F> {
    fn interior_point(&self) -> Option<Point<F>> {
        if self.is_empty() {
            return None;
        }
        scanline_interior_point(&[self]).or_else(|| self.centroid())
    }
}

impl<F: GeoFloat> InteriorPoint<F> for MultiPolygon<F> {
    fn interior_point(&self) -> Option<Point<F>> {
        if self.is_empty() {
            return None;
        }
        let polygons: Vec<&Polygon<F>> = self.iter().filter(|p| !p.is_empty()).collect();
        scanline_interior_point(&polygons).or_else(|| self.centroid())
    }
}

impl<F: GeoFloat> InteriorPoint<F> for LineString<F> {
    fn interior_point(&self) -> Option<Point<F>> {
        let centroid = self.centroid()?;
        closest_coord_to(self, centroid.coord()?).map(|c| Point::new(c))
    }
}

impl<F: GeoFloat> InteriorPoint<F> for Point<F> {
    fn interior_point(&self) -> Option<Point<F>> {
        self.coord().map(|c| Point::new(c))
    }
}

impl<F: GeoFloat> InteriorPoint<F> for Geometry<F> {
    fn interior_point(&self) -> Option<Point<F>> {
        match self {
            Geometry::Point(g) => g.interior_point(),
            Geometry::LineString(g) => g.interior_point(),
            Geometry::Polygon(g) => g.interior_point(),
            Geometry::MultiPolygon(g) => g.interior_point(),
            other => {
                // collections: pick from the highest-dimension parts
                if other.dimensions() == Dimensions::Empty {
                    return None;
                }
                let centroid = other.centroid()?;
                closest_coord_to(other, centroid.coord()?).map(|c| Point::new(c))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn interior_point_is_inside() {
        let polygon = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) };
        let point = polygon.interior_point().unwrap();
        assert_eq!(
            polygon.coordinate_position(&point.coord().unwrap()),
            CoordPos::Inside
        );
    }

    #[test]
    fn hole_under_the_scanline_is_avoided() {
        // hole spans the middle of the envelope where the scanline runs
        let polygon = wkt! { POLYGON(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
            (2.0 4.0,8.0 4.0,8.0 6.0,2.0 6.0,2.0 4.0)
        ) };
        let point = polygon.interior_point().unwrap();
        assert_eq!(
            polygon.coordinate_position(&point.coord().unwrap()),
            CoordPos::Inside
        );
    }

    #[test]
    fn line_interior_point_is_a_vertex() {
        let line = wkt! { LINESTRING(0.0 0.0,5.0 1.0,10.0 0.0) };
        let point = line.interior_point().unwrap();
        assert!(line.coords().contains(&point.coord().unwrap()));
    }
}
