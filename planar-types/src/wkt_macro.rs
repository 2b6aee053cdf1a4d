/// Creates a geometry from a
/// [WKT](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry) literal.
///
/// This is evaluated at compile time, so invalid WKT syntax is a compile
/// error rather than a runtime parse failure.
///
/// ```
/// use planar_types::wkt;
/// let point = wkt! { POINT(1.0 2.0) };
/// assert_eq!(point.x(), 1.0);
/// assert_eq!(point.y(), 2.0);
///
/// let collection = wkt! {
///     GEOMETRYCOLLECTION(
///         POINT(1.0 2.0),
///         LINESTRING EMPTY,
///         POLYGON((0.0 0.0,1.0 0.0,1.0 1.0,0.0 0.0))
///     )
/// };
/// assert_eq!(collection.len(), 3);
/// ```
#[macro_export]
macro_rules! wkt {
    // Hide distracting implementation details from the generated rustdoc.
    ($($wkt:tt)+) => {
        {
            $crate::wkt_internal!($($wkt)+)
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! wkt_internal {
    (POINT EMPTY) => {
        $crate::Point::empty()
    };
    (POINT($x:literal $y:literal)) => {
        $crate::point!(x: $x, y: $y)
    };
    (POINT $($tail:tt)*) => {
        compile_error!("Invalid POINT wkt");
    };
    (LINESTRING EMPTY) => {
        $crate::LineString::empty()
    };
    (LINESTRING ($($x:literal $y:literal),+)) => {
        $crate::LineString::from_coords(
            vec![$($crate::coord!(x: $x, y: $y)),*]
        ).expect("invalid LINESTRING wkt")
    };
    (LINESTRING ()) => {
        compile_error!("use `EMPTY` instead of () for an empty collection")
    };
    (LINESTRING $($tail:tt)*) => {
        compile_error!("Invalid LINESTRING wkt");
    };
    (RING ($($x:literal $y:literal),+)) => {
        $crate::LinearRing::from_coords(
            vec![$($crate::coord!(x: $x, y: $y)),*]
        ).expect("invalid ring wkt")
    };
    (POLYGON EMPTY) => {
        $crate::Polygon::empty()
    };
    (POLYGON ( $exterior_tt:tt )) => {
        $crate::Polygon::new($crate::wkt!(RING $exterior_tt), vec![])
            .expect("invalid POLYGON wkt")
    };
    (POLYGON( $exterior_tt:tt, $($interiors_tt:tt),+ )) => {
        $crate::Polygon::new(
            $crate::wkt!(RING $exterior_tt),
            vec![
               $($crate::wkt!(RING $interiors_tt)),*
            ]
        ).expect("invalid POLYGON wkt")
    };
    (POLYGON ()) => {
        compile_error!("use `EMPTY` instead of () for an empty collection")
    };
    (POLYGON $($tail:tt)*) => {
        compile_error!("Invalid POLYGON wkt");
    };
    (MULTIPOINT EMPTY) => {
        $crate::MultiPoint::empty()
    };
    (MULTIPOINT ()) => {
        compile_error!("use `EMPTY` instead of () for an empty collection")
    };
    (MULTIPOINT ($($tt:tt),*)) => {
        $crate::MultiPoint::new(
            vec![$($crate::wkt_internal!(@point $tt)),*]
        )
    };
    (MULTIPOINT $($tail:tt)*) => {
        compile_error!("Invalid MULTIPOINT wkt");
    };
    (@point ($x:literal $y:literal)) => {
        $crate::point!(x: $x, y: $y)
    };
    (MULTILINESTRING EMPTY) => {
        $crate::MultiLineString::empty()
    };
    (MULTILINESTRING ()) => {
        compile_error!("use `EMPTY` instead of () for an empty collection")
    };
    (MULTILINESTRING ( $($line_string_tt:tt),* )) => {
        $crate::MultiLineString::new(vec![
           $($crate::wkt!(LINESTRING $line_string_tt)),*
        ])
    };
    (MULTILINESTRING $($tail:tt)*) => {
        compile_error!("Invalid MULTILINESTRING wkt");
    };
    (MULTIPOLYGON EMPTY) => {
        $crate::MultiPolygon::empty()
    };
    (MULTIPOLYGON ()) => {
        compile_error!("use `EMPTY` instead of () for an empty collection")
    };
    (MULTIPOLYGON ( $($polygon_tt:tt),* )) => {
        $crate::MultiPolygon::new(vec![
           $($crate::wkt!(POLYGON $polygon_tt)),*
        ])
    };
    (MULTIPOLYGON $($tail:tt)*) => {
        compile_error!("Invalid MULTIPOLYGON wkt");
    };
    (GEOMETRYCOLLECTION EMPTY) => {
        $crate::GeometryCollection::empty()
    };
    (GEOMETRYCOLLECTION ()) => {
        compile_error!("use `EMPTY` instead of () for an empty collection")
    };
    (GEOMETRYCOLLECTION ( $($el_type:tt $el_tt:tt),* )) => {
        $crate::GeometryCollection::new(vec![
           $($crate::Geometry::from($crate::wkt!($el_type $el_tt))),*
        ])
    };
    (GEOMETRYCOLLECTION $($tail:tt)*) => {
        compile_error!("Invalid GEOMETRYCOLLECTION wkt");
    };
    ($name:ident ($($tail:tt)*)) => {
        compile_error!("Unknown type. Must be one of POINT, LINESTRING, POLYGON, MULTIPOINT, MULTILINESTRING, MULTIPOLYGON, or GEOMETRYCOLLECTION");
    };
}

#[cfg(test)]
mod test {
    use crate::geometry::*;

    #[test]
    fn point() {
        let point = wkt! { POINT(1.0 2.0) };
        assert_eq!(point.x(), 1.0);
        assert_eq!(point.y(), 2.0);

        let point: Point<f64> = wkt! { POINT EMPTY };
        assert!(point.is_empty());
    }

    #[test]
    fn line_string() {
        let line_string = wkt! { LINESTRING(1.0 2.0,3.0 4.0) };
        assert_eq!(line_string.num_coords(), 2);
        assert_eq!(line_string.coords()[0], crate::coord! { x: 1.0, y: 2.0 });

        let line_string: LineString<f64> = wkt! { LINESTRING EMPTY };
        assert!(line_string.is_empty());
    }

    #[test]
    fn polygon() {
        let polygon = wkt! { POLYGON((0.0 0.0,4.0 0.0,4.0 4.0,0.0 0.0)) };
        assert_eq!(polygon.exterior().num_coords(), 4);
        assert!(polygon.interiors().is_empty());

        let polygon = wkt! { POLYGON(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
            (2.0 2.0,4.0 2.0,4.0 4.0,2.0 4.0,2.0 2.0)
        ) };
        assert_eq!(polygon.interiors().len(), 1);

        let polygon: Polygon<f64> = wkt! { POLYGON EMPTY };
        assert!(polygon.is_empty());
    }

    #[test]
    fn multi_point() {
        let multi_point = wkt! { MULTIPOINT((1.0 2.0),(3.0 4.0)) };
        assert_eq!(multi_point.len(), 2);
        assert_eq!(multi_point.points()[1].x(), 3.0);
    }

    #[test]
    fn multi_line_string() {
        let multi = wkt! { MULTILINESTRING((1.0 2.0,3.0 4.0),(5.0 6.0,7.0 8.0)) };
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.line_strings()[1].coords()[1], crate::coord! { x: 7.0, y: 8.0 });
    }

    #[test]
    fn multi_polygon() {
        let multi = wkt! { MULTIPOLYGON(
            ((0.0 0.0,4.0 0.0,4.0 4.0,0.0 0.0)),
            ((10.0 10.0,14.0 10.0,14.0 14.0,10.0 10.0))
        ) };
        assert_eq!(multi.len(), 2);
    }

    #[test]
    fn geometry_collection() {
        let collection = wkt! {
            GEOMETRYCOLLECTION(
                POINT(40.0 10.0),
                LINESTRING(10.0 10.0,20.0 20.0,10.0 40.0),
                POLYGON((40.0 40.0,20.0 45.0,45.0 30.0,40.0 40.0))
            )
        };
        assert_eq!(collection.len(), 3);
        match &collection.geometries()[1] {
            Geometry::LineString(line_string) => assert_eq!(line_string.num_coords(), 3),
            other => panic!("unexpected geometry: {other:?}"),
        }
    }
}
