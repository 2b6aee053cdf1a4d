use crate::{
    Coord, GeoFloat, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

/// Structural, coordinate-wise equality within an absolute tolerance.
///
/// Two geometries are exactly equal when they are the same variant, have
/// the same component structure, and corresponding coordinates differ by at
/// most `tolerance` in each ordinate. Unlike topological equality this is
/// sensitive to coordinate order and repeated points.
pub trait EqualsExact<F: GeoFloat, Rhs = Self> {
    fn equals_exact(&self, other: &Rhs, tolerance: F) -> bool;
}

fn coord_eq<F: GeoFloat>(a: Coord<F>, b: Coord<F>, tolerance: F) -> bool {
    if tolerance.is_zero() {
        return a == b;
    }
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}

fn coords_eq<F: GeoFloat>(a: &[Coord<F>], b: &[Coord<F>], tolerance: F) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(&a, &b)| coord_eq(a, b, tolerance))
}

impl<F: GeoFloat> EqualsExact<F> for Point<F> {
    fn equals_exact(&self, other: &Self, tolerance: F) -> bool {
        match (self.coord(), other.coord()) {
            (Some(a), Some(b)) => coord_eq(a, b, tolerance),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<F: GeoFloat> EqualsExact<F> for LineString<F> {
    fn equals_exact(&self, other: &Self, tolerance: F) -> bool {
        coords_eq(self.coords(), other.coords(), tolerance)
    }
}

impl<F: GeoFloat> EqualsExact<F> for LinearRing<F> {
    fn equals_exact(&self, other: &Self, tolerance: F) -> bool {
        coords_eq(self.coords(), other.coords(), tolerance)
    }
}

impl<F: GeoFloat> EqualsExact<F> for Polygon<F> {
    fn equals_exact(&self, other: &Self, tolerance: F) -> bool {
        self.exterior().equals_exact(other.exterior(), tolerance)
            && self.interiors().len() == other.interiors().len()
            && self
                .interiors()
                .iter()
                .zip(other.interiors().iter())
                .all(|(a, b)| a.equals_exact(b, tolerance))
    }
}

macro_rules! impl_equals_exact_for_collection {
    ($type:ident, $parts:ident) => {
        impl<F: GeoFloat> EqualsExact<F> for $type<F> {
            fn equals_exact(&self, other: &Self, tolerance: F) -> bool {
                self.$parts().len() == other.$parts().len()
                    && self
                        .iter()
                        .zip(other.iter())
                        .all(|(a, b)| a.equals_exact(b, tolerance))
            }
        }
    };
}

impl_equals_exact_for_collection!(MultiPoint, points);
impl_equals_exact_for_collection!(MultiLineString, line_strings);
impl_equals_exact_for_collection!(MultiPolygon, polygons);
impl_equals_exact_for_collection!(GeometryCollection, geometries);

impl<F: GeoFloat> EqualsExact<F> for Geometry<F> {
    fn equals_exact(&self, other: &Self, tolerance: F) -> bool {
        match (self, other) {
            (Geometry::Point(a), Geometry::Point(b)) => a.equals_exact(b, tolerance),
            (Geometry::LineString(a), Geometry::LineString(b)) => a.equals_exact(b, tolerance),
            (Geometry::Polygon(a), Geometry::Polygon(b)) => a.equals_exact(b, tolerance),
            (Geometry::MultiPoint(a), Geometry::MultiPoint(b)) => a.equals_exact(b, tolerance),
            (Geometry::MultiLineString(a), Geometry::MultiLineString(b)) => {
                a.equals_exact(b, tolerance)
            }
            (Geometry::MultiPolygon(a), Geometry::MultiPolygon(b)) => a.equals_exact(b, tolerance),
            (Geometry::GeometryCollection(a), Geometry::GeometryCollection(b)) => {
                a.equals_exact(b, tolerance)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn tolerance_bounds_equality() {
        let a = wkt! { LINESTRING(0.0 0.0,10.0 0.0) };
        let b = wkt! { LINESTRING(0.05 0.0,10.0 0.05) };
        assert!(a.equals_exact(&a, 0.0));
        assert!(a.equals_exact(&b, 0.1));
        assert!(!a.equals_exact(&b, 0.01));
    }

    #[test]
    fn different_variants_are_never_equal() {
        let point: Geometry<f64> = wkt! { POINT(0.0 0.0) }.into();
        let line: Geometry<f64> = wkt! { LINESTRING(0.0 0.0,1.0 0.0) }.into();
        assert!(!point.equals_exact(&line, 1000.0));
    }
}
