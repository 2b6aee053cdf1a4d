use crate::{
    CoordNum, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon, Rect,
};
use std::borrow::Cow;

/// A "one of" enum like [`Geometry`], except the inner value may be borrowed.
///
/// This lets operations that accept any geometry variant "upgrade" a concrete
/// reference without cloning it, e.g. the relate computation and the overlay
/// input wrappers.
#[derive(PartialEq, Debug, Clone)]
pub enum GeometryCow<'a, T>
where
    T: CoordNum,
{
    Point(Cow<'a, Point<T>>),
    LineString(Cow<'a, LineString<T>>),
    Polygon(Cow<'a, Polygon<T>>),
    MultiPoint(Cow<'a, MultiPoint<T>>),
    MultiLineString(Cow<'a, MultiLineString<T>>),
    MultiPolygon(Cow<'a, MultiPolygon<T>>),
    GeometryCollection(Cow<'a, GeometryCollection<T>>),
}

impl<T: CoordNum> GeometryCow<'_, T> {
    pub fn is_empty(&self) -> bool {
        match self {
            GeometryCow::Point(g) => g.is_empty(),
            GeometryCow::LineString(g) => g.is_empty(),
            GeometryCow::Polygon(g) => g.is_empty(),
            GeometryCow::MultiPoint(g) => g.is_empty(),
            GeometryCow::MultiLineString(g) => g.is_empty(),
            GeometryCow::MultiPolygon(g) => g.is_empty(),
            GeometryCow::GeometryCollection(g) => g.is_empty(),
        }
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        match self {
            GeometryCow::Point(g) => g.envelope(),
            GeometryCow::LineString(g) => g.envelope(),
            GeometryCow::Polygon(g) => g.envelope(),
            GeometryCow::MultiPoint(g) => g.envelope(),
            GeometryCow::MultiLineString(g) => g.envelope(),
            GeometryCow::MultiPolygon(g) => g.envelope(),
            GeometryCow::GeometryCollection(g) => g.envelope(),
        }
    }

    pub fn to_geometry(&self) -> Geometry<T> {
        match self {
            GeometryCow::Point(g) => Geometry::Point(g.clone().into_owned()),
            GeometryCow::LineString(g) => Geometry::LineString(g.clone().into_owned()),
            GeometryCow::Polygon(g) => Geometry::Polygon(g.clone().into_owned()),
            GeometryCow::MultiPoint(g) => Geometry::MultiPoint(g.clone().into_owned()),
            GeometryCow::MultiLineString(g) => Geometry::MultiLineString(g.clone().into_owned()),
            GeometryCow::MultiPolygon(g) => Geometry::MultiPolygon(g.clone().into_owned()),
            GeometryCow::GeometryCollection(g) => {
                Geometry::GeometryCollection(g.clone().into_owned())
            }
        }
    }
}

impl<'a, T: CoordNum> From<&'a Geometry<T>> for GeometryCow<'a, T> {
    fn from(geometry: &'a Geometry<T>) -> Self {
        match geometry {
            Geometry::Point(g) => GeometryCow::Point(Cow::Borrowed(g)),
            Geometry::LineString(g) => GeometryCow::LineString(Cow::Borrowed(g)),
            Geometry::Polygon(g) => GeometryCow::Polygon(Cow::Borrowed(g)),
            Geometry::MultiPoint(g) => GeometryCow::MultiPoint(Cow::Borrowed(g)),
            Geometry::MultiLineString(g) => GeometryCow::MultiLineString(Cow::Borrowed(g)),
            Geometry::MultiPolygon(g) => GeometryCow::MultiPolygon(Cow::Borrowed(g)),
            Geometry::GeometryCollection(g) => GeometryCow::GeometryCollection(Cow::Borrowed(g)),
        }
    }
}

macro_rules! geometry_cow_from_impl {
    ($($variant:ident, $type:ident,)*) => {
        $(
            impl<'a, T: CoordNum> From<&'a $type<T>> for GeometryCow<'a, T> {
                fn from(geometry: &'a $type<T>) -> Self {
                    GeometryCow::$variant(Cow::Borrowed(geometry))
                }
            }
        )*
    };
}

geometry_cow_from_impl!(
    Point, Point,
    LineString, LineString,
    Polygon, Polygon,
    MultiPoint, MultiPoint,
    MultiLineString, MultiLineString,
    MultiPolygon, MultiPolygon,
    GeometryCollection, GeometryCollection,
);
