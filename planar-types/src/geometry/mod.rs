pub(crate) mod coord;
pub(crate) mod geometry_collection;
pub(crate) mod line;
pub(crate) mod line_string;
pub(crate) mod linear_ring;
pub(crate) mod multi_line_string;
pub(crate) mod multi_point;
pub(crate) mod multi_polygon;
pub(crate) mod point;
pub(crate) mod polygon;
pub(crate) mod rect;

pub use coord::Coord;
pub use geometry_collection::GeometryCollection;
pub use line::Line;
pub use line_string::LineString;
pub use linear_ring::LinearRing;
pub use multi_line_string::MultiLineString;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;
pub use rect::Rect;

use crate::{CoordNum, Dims, Error, GeomContext};

/// An enum representing any possible geometry variant.
///
/// [`LinearRing`] is not a variant of its own; rings convert to
/// [`LineString`] when treated as stand-alone geometries, as in the
/// simple-features model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry<T: CoordNum = f64> {
    Point(Point<T>),
    LineString(LineString<T>),
    Polygon(Polygon<T>),
    MultiPoint(MultiPoint<T>),
    MultiLineString(MultiLineString<T>),
    MultiPolygon(MultiPolygon<T>),
    GeometryCollection(GeometryCollection<T>),
}

impl<T: CoordNum> Geometry<T> {
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        match self {
            Geometry::Point(g) => g.envelope(),
            Geometry::LineString(g) => g.envelope(),
            Geometry::Polygon(g) => g.envelope(),
            Geometry::MultiPoint(g) => g.envelope(),
            Geometry::MultiLineString(g) => g.envelope(),
            Geometry::MultiPolygon(g) => g.envelope(),
            Geometry::GeometryCollection(g) => g.envelope(),
        }
    }

    /// The coordinate shape of the geometry; a heterogeneous collection
    /// reports the join of its parts.
    pub fn dims(&self) -> Dims {
        match self {
            Geometry::Point(g) => g.dims(),
            Geometry::LineString(g) => g.dims(),
            Geometry::Polygon(g) => g.dims(),
            Geometry::MultiPoint(g) => g.dims(),
            Geometry::MultiLineString(g) => g.dims(),
            Geometry::MultiPolygon(g) => g.dims(),
            Geometry::GeometryCollection(g) => g
                .iter()
                .map(Geometry::dims)
                .fold(Dims::Xy, Dims::join),
        }
    }

    pub fn ctx(&self) -> &GeomContext {
        match self {
            Geometry::Point(g) => g.ctx(),
            Geometry::LineString(g) => g.ctx(),
            Geometry::Polygon(g) => g.ctx(),
            Geometry::MultiPoint(g) => g.ctx(),
            Geometry::MultiLineString(g) => g.ctx(),
            Geometry::MultiPolygon(g) => g.ctx(),
            Geometry::GeometryCollection(g) => g.ctx(),
        }
    }

    pub(crate) fn set_ctx(&mut self, ctx: GeomContext) {
        match self {
            Geometry::Point(g) => g.set_ctx(ctx),
            Geometry::LineString(g) => g.set_ctx(ctx),
            Geometry::Polygon(g) => g.set_ctx(ctx),
            Geometry::MultiPoint(g) => g.set_ctx(ctx),
            Geometry::MultiLineString(g) => g.set_ctx(ctx),
            Geometry::MultiPolygon(g) => g.set_ctx(ctx),
            Geometry::GeometryCollection(g) => g.set_ctx(ctx),
        }
    }

    /// The same geometry re-stamped with `ctx`; used when a derived
    /// geometry inherits the context of its source.
    pub fn with_context(mut self, ctx: GeomContext) -> Self {
        self.set_ctx(ctx);
        self
    }

    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }
}

macro_rules! geometry_from_impl {
    ($($variant:ident, $type:ident,)*) => {
        $(
            impl<T: CoordNum> From<$type<T>> for Geometry<T> {
                fn from(geometry: $type<T>) -> Self {
                    Geometry::$variant(geometry)
                }
            }

            impl<T: CoordNum> TryFrom<Geometry<T>> for $type<T> {
                type Error = Error;

                fn try_from(geometry: Geometry<T>) -> Result<Self, Error> {
                    match geometry {
                        Geometry::$variant(geometry) => Ok(geometry),
                        other => Err(Error::MismatchedGeometry {
                            expected: stringify!($type),
                            found: other.geometry_type(),
                        }),
                    }
                }
            }
        )*
    };
}

geometry_from_impl!(
    Point, Point,
    LineString, LineString,
    Polygon, Polygon,
    MultiPoint, MultiPoint,
    MultiLineString, MultiLineString,
    MultiPolygon, MultiPolygon,
    GeometryCollection, GeometryCollection,
);

impl<T: CoordNum> From<LinearRing<T>> for Geometry<T> {
    fn from(ring: LinearRing<T>) -> Self {
        Geometry::LineString(ring.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn try_from_reports_mismatch() {
        let geometry: Geometry<f64> = Point::new(coord! { x: 1., y: 2. }).into();
        let err = LineString::try_from(geometry).unwrap_err();
        assert_eq!(
            err,
            Error::MismatchedGeometry {
                expected: "LineString",
                found: "Point"
            }
        );
    }

    #[test]
    fn collection_dims_is_join_of_parts() {
        use crate::CoordSeq;
        let xy: Geometry<f64> = Point::new(coord! { x: 0., y: 0. }).into();
        let mut seq = CoordSeq::with_dims(Dims::Xyz);
        seq.push_with(coord! { x: 1., y: 1. }, Some(3.0), None);
        let xyz: Geometry<f64> = Point::from_seq(seq).unwrap().into();
        let collection = GeometryCollection::new(vec![xy, xyz]);
        assert_eq!(Geometry::from(collection).dims(), Dims::Xyz);
    }
}
