use crate::{
    coord, Coord, GeoFloat, Geometry, GeometryCollection, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

/// Calculation of the centroid of a geometry.
///
/// The centroid is dimension-weighted: if a geometry (or collection) has
/// any areal component, only areal components contribute; otherwise linear
/// components; otherwise points. This matches the behaviour users expect
/// from mixed collections, where e.g. a stray point should not drag the
/// centroid of a polygon.
pub trait Centroid<F: GeoFloat> {
    /// The centroid, or `None` for an empty geometry.
    fn centroid(&self) -> Option<Point<F>>;
}

/// Accumulator for dimension-weighted centroid sums.
struct CentroidAccumulator<F: GeoFloat> {
    /// area accumulation is relative to an arbitrary base point, which
    /// keeps the triangle areas small for coordinates far from the origin
    base: Option<Coord<F>>,
    area_sum: F,
    area_centroid_sum: Coord<F>,
    length_sum: F,
    length_centroid_sum: Coord<F>,
    point_count: usize,
    point_sum: Coord<F>,
}

impl<F: GeoFloat> CentroidAccumulator<F> {
    fn new() -> Self {
        CentroidAccumulator {
            base: None,
            area_sum: F::zero(),
            area_centroid_sum: Coord::zero(),
            length_sum: F::zero(),
            length_centroid_sum: Coord::zero(),
            point_count: 0,
            point_sum: Coord::zero(),
        }
    }

    fn add_point(&mut self, coord: Coord<F>) {
        self.point_count += 1;
        self.point_sum = self.point_sum + coord;
    }

    fn add_line_string(&mut self, line_string: &LineString<F>) {
        for line in line_string.lines() {
            let length = line.delta().x.hypot(line.delta().y);
            let two = F::one() + F::one();
            let midpoint = (line.start + line.end) / two;
            self.length_sum = self.length_sum + length;
            self.length_centroid_sum = self.length_centroid_sum + midpoint * length;
        }
        if let Some(first) = line_string.coords().first() {
            // degenerate zero-length lines still contribute a point
            if self.length_sum.is_zero() {
                self.add_point(*first);
            }
        }
    }

    fn add_ring(&mut self, ring: &LinearRing<F>, sign: F) {
        let base = match (self.base, ring.coords().first()) {
            (Some(base), _) => base,
            (None, Some(&first)) => {
                self.base = Some(first);
                first
            }
            (None, None) => return,
        };
        let three = F::one() + F::one() + F::one();
        for line in ring.lines() {
            let a = line.start - base;
            let b = line.end - base;
            let cross = a.x * b.y - a.y * b.x;
            let triangle_centroid = (a + b) / three;
            self.area_sum = self.area_sum + sign * cross;
            self.area_centroid_sum = self.area_centroid_sum + triangle_centroid * (sign * cross);
        }
    }

    fn add_polygon(&mut self, polygon: &Polygon<F>) {
        if polygon.is_empty() {
            return;
        }
        // normalize winding through the signed sum itself: holes subtract
        // because their winding opposes the shell's after orientation
        let oriented = polygon.orient();
        self.add_ring(oriented.exterior(), F::one());
        for hole in oriented.interiors() {
            self.add_ring(hole, F::one());
        }
        // fall back on the boundary for zero-area polygons
        if self.area_sum.is_zero() {
            for ring in oriented.rings() {
                let line_string: LineString<F> = ring.clone().into();
                self.add_line_string(&line_string);
            }
        }
    }

    fn add_geometry(&mut self, geometry: &Geometry<F>) {
        match geometry {
            Geometry::Point(g) => {
                if let Some(coord) = g.coord() {
                    self.add_point(coord)
                }
            }
            Geometry::LineString(g) => self.add_line_string(g),
            Geometry::Polygon(g) => self.add_polygon(g),
            Geometry::MultiPoint(g) => {
                for point in g.iter() {
                    if let Some(coord) = point.coord() {
                        self.add_point(coord);
                    }
                }
            }
            Geometry::MultiLineString(g) => {
                for line_string in g.iter() {
                    self.add_line_string(line_string);
                }
            }
            Geometry::MultiPolygon(g) => {
                for polygon in g.iter() {
                    self.add_polygon(polygon);
                }
            }
            Geometry::GeometryCollection(g) => {
                for geometry in g.iter() {
                    self.add_geometry(geometry);
                }
            }
        }
    }

    fn finish(&self) -> Option<Point<F>> {
        let base = self.base.unwrap_or_else(Coord::zero);
        if !self.area_sum.is_zero() {
            let centroid = self.area_centroid_sum / self.area_sum;
            return Some(Point::new(centroid + base));
        }
        if !self.length_sum.is_zero() {
            return Some(Point::new(self.length_centroid_sum / self.length_sum));
        }
        if self.point_count > 0 {
            let count = F::from(self.point_count).expect("point count fits the scalar");
            return Some(Point::new(self.point_sum / count));
        }
        None
    }
}

macro_rules! impl_centroid {
    ($($type:ty,)*) => {
        $(
            impl<F: GeoFloat> Centroid<F> for $type {
                fn centroid(&self) -> Option<Point<F>> {
                    let mut acc = CentroidAccumulator::new();
                    acc.add_geometry(&Geometry::from(self.clone()));
                    acc.finish()
                }
            }
        )*
    };
}

impl_centroid!(
    Point<F>,
    LineString<F>,
    Polygon<F>,
    MultiPoint<F>,
    MultiLineString<F>,
    MultiPolygon<F>,
    GeometryCollection<F>,
);

impl<F: GeoFloat> Centroid<F> for Geometry<F> {
    fn centroid(&self) -> Option<Point<F>> {
        let mut acc = CentroidAccumulator::new();
        acc.add_geometry(self);
        acc.finish()
    }
}

impl<F: GeoFloat> Centroid<F> for LinearRing<F> {
    fn centroid(&self) -> Option<Point<F>> {
        let line_string: LineString<F> = self.clone().into();
        line_string.centroid()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn square_centroid() {
        let square = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) };
        assert_eq!(square.centroid(), Some(Point::new(coord! { x: 5.0, y: 5.0 })));
    }

    #[test]
    fn hole_shifts_centroid() {
        let with_hole = wkt! { POLYGON(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
            (6.0 2.0,8.0 2.0,8.0 8.0,6.0 8.0,6.0 2.0)
        ) };
        let centroid = with_hole.centroid().unwrap();
        // the hole is on the right side, so the centroid shifts left
        assert!(centroid.x() < 5.0);
        assert_eq!(centroid.y(), 5.0);
    }

    #[test]
    fn line_centroid_is_length_weighted() {
        let line = wkt! { LINESTRING(0.0 0.0,8.0 0.0,8.0 2.0) };
        let centroid = line.centroid().unwrap();
        // long horizontal run dominates the short vertical one
        assert!(centroid.y() < 0.5);
    }

    #[test]
    fn mixed_collection_prefers_the_highest_dimension() {
        let collection: Geometry<f64> = wkt! {
            GEOMETRYCOLLECTION(
                POLYGON((0.0 0.0,4.0 0.0,4.0 4.0,0.0 4.0,0.0 0.0)),
                POINT(100.0 100.0)
            )
        }
        .into();
        assert_eq!(
            collection.centroid(),
            Some(Point::new(coord! { x: 2.0, y: 2.0 }))
        );
    }

    #[test]
    fn empty_geometry_has_no_centroid() {
        let empty: Polygon<f64> = wkt! { POLYGON EMPTY };
        assert_eq!(empty.centroid(), None);
    }
}
