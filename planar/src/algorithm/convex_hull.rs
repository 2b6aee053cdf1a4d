use crate::algorithm::kernels::{HasKernel, Kernel, Orientation};
use crate::algorithm::map_coords::VisitCoords;
use crate::utils::lex_cmp;
use crate::{
    Coord, GeoFloat, Geometry, GeometryCollection, LineString, LinearRing, Point, Polygon,
};

/// Calculate the convex hull of a geometry: the smallest convex polygon
/// containing all of its coordinates.
///
/// The hull is computed with the monotone-chain (Andrew) scan driven by the
/// robust orientation predicate, so collinear boundary points are dropped
/// exactly. Degenerate inputs degrade gracefully: fewer than three distinct
/// coordinates yield a point or a line string rather than a polygon.
pub trait ConvexHull<F: GeoFloat> {
    fn convex_hull(&self) -> Geometry<F>;
}

impl<F: GeoFloat, G: VisitCoords<F>> ConvexHull<F> for G {
    fn convex_hull(&self) -> Geometry<F> {
        let mut coords: Vec<Coord<F>> = Vec::new();
        self.visit_coords(&mut |coord| coords.push(coord));
        hull_of(coords)
    }
}

fn hull_of<F: GeoFloat>(mut coords: Vec<Coord<F>>) -> Geometry<F> {
    coords.sort_by(lex_cmp);
    coords.dedup();

    match coords.len() {
        0 => Geometry::GeometryCollection(GeometryCollection::empty()),
        1 => Geometry::Point(Point::new(coords[0])),
        2 => Geometry::LineString(
            LineString::from_coords(coords).expect("two distinct coordinates form a line"),
        ),
        _ => {
            let hull = monotone_chain_hull(&coords);
            if hull.len() < 3 {
                // all input coordinates collinear
                let line = vec![coords[0], coords[coords.len() - 1]];
                return Geometry::LineString(
                    LineString::from_coords(line).expect("distinct collinear endpoints"),
                );
            }
            let ring = LinearRing::from_coords(hull).expect("hull rings are closed and valid");
            Geometry::Polygon(Polygon::new(ring, vec![]).expect("hull has no holes"))
        }
    }
}

/// Andrew's monotone chain over lexicographically sorted unique
/// coordinates; returns the hull in counter-clockwise order, without the
/// closing coordinate.
fn monotone_chain_hull<F: GeoFloat>(sorted: &[Coord<F>]) -> Vec<Coord<F>> {
    let mut lower: Vec<Coord<F>> = Vec::new();
    for &coord in sorted {
        while lower.len() >= 2
            && F::Ker::orient2d(lower[lower.len() - 2], lower[lower.len() - 1], coord)
                != Orientation::CounterClockwise
        {
            lower.pop();
        }
        lower.push(coord);
    }

    let mut upper: Vec<Coord<F>> = Vec::new();
    for &coord in sorted.iter().rev() {
        while upper.len() >= 2
            && F::Ker::orient2d(upper[upper.len() - 2], upper[upper.len() - 1], coord)
                != Orientation::CounterClockwise
        {
            upper.pop();
        }
        upper.push(coord);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{coord, wkt, MultiPoint};

    #[test]
    fn hull_of_scattered_points() {
        let points: MultiPoint<f64> = vec![
            Point::new(coord! { x: 0.0, y: 0.0 }),
            Point::new(coord! { x: 4.0, y: 0.0 }),
            Point::new(coord! { x: 4.0, y: 4.0 }),
            Point::new(coord! { x: 0.0, y: 4.0 }),
            Point::new(coord! { x: 2.0, y: 2.0 }),
            Point::new(coord! { x: 1.0, y: 3.0 }),
        ]
        .into();
        let hull = points.convex_hull();
        match hull {
            Geometry::Polygon(polygon) => {
                // interior points dropped, 4 corners + closure
                assert_eq!(polygon.exterior().num_coords(), 5);
            }
            other => panic!("expected a polygon hull, got {other:?}"),
        }
    }

    #[test]
    fn collinear_input_collapses_to_line() {
        let line = wkt! { LINESTRING(0.0 0.0,1.0 1.0,2.0 2.0,3.0 3.0) };
        match line.convex_hull() {
            Geometry::LineString(hull) => {
                assert_eq!(
                    hull.coords(),
                    &[coord! { x: 0.0, y: 0.0 }, coord! { x: 3.0, y: 3.0 }]
                );
            }
            other => panic!("expected a line hull, got {other:?}"),
        }
    }

    #[test]
    fn hull_contains_every_input_coordinate() {
        use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
        let zigzag = wkt! { LINESTRING(0.0 0.0,3.0 8.0,6.0 1.0,9.0 7.0,12.0 0.0) };
        let hull = match zigzag.convex_hull() {
            Geometry::Polygon(polygon) => polygon,
            other => panic!("expected polygon, got {other:?}"),
        };
        for &coord in zigzag.coords() {
            assert_ne!(hull.coordinate_position(&coord), CoordPos::Outside);
        }
    }
}
