use crate::{
    CoordNum, Geometry, GeometryCollection, GeometryCow, Line, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Rect,
};

/// Geometries can have 0, 1, or two dimensions. Or, in the case of an empty
/// geometry, a special `Empty` dimensionality.
///
/// This is the *topological* dimension; the coordinate shape (XY/XYZ/...) is
/// [`Dims`](crate::Dims).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub enum Dimensions {
    /// Some geometries, like a `MultiPoint` or `GeometryCollection` may have
    /// no elements - thus no dimensions. Note that this is distinct from
    /// being `ZeroDimensional`, like a `Point`.
    Empty,
    /// Dimension of a point
    ZeroDimensional,
    /// Dimension of a line or curve
    OneDimensional,
    /// Dimension of a surface
    TwoDimensional,
}

/// Operate on the dimensionality of geometries.
pub trait HasDimensions {
    /// Some geometries, like a `MultiPoint`, can have zero coordinates - we
    /// call these `empty`.
    fn is_empty(&self) -> bool;

    /// The dimensions of the geometry instance: `Empty` for empty
    /// geometries, otherwise the dimension of the variant (or the greatest
    /// dimension of a collection's elements).
    fn dimensions(&self) -> Dimensions;

    /// The dimensions of the geometry's boundary:
    ///
    /// - points have no boundary
    /// - the boundary of a line is its (zero-dimensional) endpoints, or
    ///   empty if the line is closed
    /// - the boundary of a polygon is its (one-dimensional) rings
    fn boundary_dimensions(&self) -> Dimensions;
}

impl<T: CoordNum> HasDimensions for Point<T> {
    fn is_empty(&self) -> bool {
        Point::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        if self.is_empty() {
            Dimensions::Empty
        } else {
            Dimensions::ZeroDimensional
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        Dimensions::Empty
    }
}

impl<T: CoordNum> HasDimensions for Line<T> {
    fn is_empty(&self) -> bool {
        false
    }

    fn dimensions(&self) -> Dimensions {
        if self.start == self.end {
            Dimensions::ZeroDimensional
        } else {
            Dimensions::OneDimensional
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        if self.start == self.end {
            Dimensions::Empty
        } else {
            Dimensions::ZeroDimensional
        }
    }
}

impl<T: CoordNum> HasDimensions for LineString<T> {
    fn is_empty(&self) -> bool {
        LineString::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        if self.is_empty() {
            return Dimensions::Empty;
        }
        let first = self.coords()[0];
        if self.coords().iter().any(|&coord| coord != first) {
            Dimensions::OneDimensional
        } else {
            // all coords are the same - i.e. a point
            Dimensions::ZeroDimensional
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        if self.is_closed() || self.is_empty() {
            Dimensions::Empty
        } else {
            Dimensions::ZeroDimensional
        }
    }
}

impl<T: CoordNum> HasDimensions for LinearRing<T> {
    fn is_empty(&self) -> bool {
        LinearRing::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        if self.is_empty() {
            Dimensions::Empty
        } else {
            Dimensions::OneDimensional
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        Dimensions::Empty
    }
}

impl<T: CoordNum> HasDimensions for Polygon<T> {
    fn is_empty(&self) -> bool {
        Polygon::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        if self.is_empty() {
            Dimensions::Empty
        } else {
            Dimensions::TwoDimensional
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        if self.is_empty() {
            Dimensions::Empty
        } else {
            Dimensions::OneDimensional
        }
    }
}

impl<T: CoordNum> HasDimensions for Rect<T> {
    fn is_empty(&self) -> bool {
        false
    }

    fn dimensions(&self) -> Dimensions {
        let zero_width = self.min().x == self.max().x;
        let zero_height = self.min().y == self.max().y;
        match (zero_width, zero_height) {
            (true, true) => Dimensions::ZeroDimensional,
            (true, false) | (false, true) => Dimensions::OneDimensional,
            (false, false) => Dimensions::TwoDimensional,
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        match self.dimensions() {
            Dimensions::Empty | Dimensions::ZeroDimensional => Dimensions::Empty,
            Dimensions::OneDimensional => Dimensions::ZeroDimensional,
            Dimensions::TwoDimensional => Dimensions::OneDimensional,
        }
    }
}

fn multi_dimensions<'a, G: HasDimensions + 'a>(
    parts: impl Iterator<Item = &'a G>,
) -> (Dimensions, Dimensions) {
    let mut max = Dimensions::Empty;
    let mut max_boundary = Dimensions::Empty;
    for part in parts {
        max = max.max(part.dimensions());
        max_boundary = max_boundary.max(part.boundary_dimensions());
    }
    (max, max_boundary)
}

impl<T: CoordNum> HasDimensions for MultiPoint<T> {
    fn is_empty(&self) -> bool {
        MultiPoint::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        if self.is_empty() {
            Dimensions::Empty
        } else {
            Dimensions::ZeroDimensional
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        Dimensions::Empty
    }
}

impl<T: CoordNum> HasDimensions for MultiLineString<T> {
    fn is_empty(&self) -> bool {
        MultiLineString::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        multi_dimensions(self.iter()).0
    }

    fn boundary_dimensions(&self) -> Dimensions {
        if self.is_closed() {
            return Dimensions::Empty;
        }
        Dimensions::ZeroDimensional
    }
}

impl<T: CoordNum> HasDimensions for MultiPolygon<T> {
    fn is_empty(&self) -> bool {
        MultiPolygon::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        if self.is_empty() {
            Dimensions::Empty
        } else {
            Dimensions::TwoDimensional
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        if self.is_empty() {
            Dimensions::Empty
        } else {
            Dimensions::OneDimensional
        }
    }
}

impl<T: CoordNum> HasDimensions for GeometryCollection<T> {
    fn is_empty(&self) -> bool {
        GeometryCollection::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        multi_dimensions(self.iter()).0
    }

    fn boundary_dimensions(&self) -> Dimensions {
        multi_dimensions(self.iter()).1
    }
}

impl<T: CoordNum> HasDimensions for Geometry<T> {
    fn is_empty(&self) -> bool {
        Geometry::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        match self {
            Geometry::Point(g) => g.dimensions(),
            Geometry::LineString(g) => g.dimensions(),
            Geometry::Polygon(g) => g.dimensions(),
            Geometry::MultiPoint(g) => g.dimensions(),
            Geometry::MultiLineString(g) => g.dimensions(),
            Geometry::MultiPolygon(g) => g.dimensions(),
            Geometry::GeometryCollection(g) => g.dimensions(),
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        match self {
            Geometry::Point(g) => g.boundary_dimensions(),
            Geometry::LineString(g) => g.boundary_dimensions(),
            Geometry::Polygon(g) => g.boundary_dimensions(),
            Geometry::MultiPoint(g) => g.boundary_dimensions(),
            Geometry::MultiLineString(g) => g.boundary_dimensions(),
            Geometry::MultiPolygon(g) => g.boundary_dimensions(),
            Geometry::GeometryCollection(g) => g.boundary_dimensions(),
        }
    }
}

impl<T: CoordNum> HasDimensions for GeometryCow<'_, T> {
    fn is_empty(&self) -> bool {
        GeometryCow::is_empty(self)
    }

    fn dimensions(&self) -> Dimensions {
        match self {
            GeometryCow::Point(g) => g.dimensions(),
            GeometryCow::LineString(g) => g.dimensions(),
            GeometryCow::Polygon(g) => g.dimensions(),
            GeometryCow::MultiPoint(g) => g.dimensions(),
            GeometryCow::MultiLineString(g) => g.dimensions(),
            GeometryCow::MultiPolygon(g) => g.dimensions(),
            GeometryCow::GeometryCollection(g) => g.dimensions(),
        }
    }

    fn boundary_dimensions(&self) -> Dimensions {
        match self {
            GeometryCow::Point(g) => g.boundary_dimensions(),
            GeometryCow::LineString(g) => g.boundary_dimensions(),
            GeometryCow::Polygon(g) => g.boundary_dimensions(),
            GeometryCow::MultiPoint(g) => g.boundary_dimensions(),
            GeometryCow::MultiLineString(g) => g.boundary_dimensions(),
            GeometryCow::MultiPolygon(g) => g.boundary_dimensions(),
            GeometryCow::GeometryCollection(g) => g.boundary_dimensions(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn dimensions_of_variants() {
        assert_eq!(
            wkt! { POINT(1.0 1.0) }.dimensions(),
            Dimensions::ZeroDimensional
        );
        assert_eq!(
            wkt! { LINESTRING(0.0 0.0,1.0 1.0) }.dimensions(),
            Dimensions::OneDimensional
        );
        assert_eq!(
            wkt! { POLYGON((0.0 0.0,1.0 0.0,1.0 1.0,0.0 0.0)) }.dimensions(),
            Dimensions::TwoDimensional
        );
        let empty_collection: GeometryCollection<f64> = wkt! { GEOMETRYCOLLECTION EMPTY };
        assert_eq!(empty_collection.dimensions(), Dimensions::Empty);
    }

    #[test]
    fn boundary_of_closed_line_is_empty() {
        let closed = wkt! { LINESTRING(0.0 0.0,1.0 0.0,1.0 1.0,0.0 0.0) };
        assert_eq!(closed.boundary_dimensions(), Dimensions::Empty);

        let open = wkt! { LINESTRING(0.0 0.0,1.0 0.0) };
        assert_eq!(open.boundary_dimensions(), Dimensions::ZeroDimensional);
    }
}
