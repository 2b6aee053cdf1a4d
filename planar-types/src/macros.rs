/// Creates a [`Coord`](crate::Coord) from ordinate values.
///
/// ```
/// use planar_types::coord;
///
/// let c = coord! { x: 1.0, y: 2.0 };
/// assert_eq!(c.x, 1.0);
/// assert_eq!(c.y, 2.0);
/// ```
#[macro_export]
macro_rules! coord {
    (x: $x:expr, y: $y:expr $(,)?) => {
        $crate::Coord { x: $x, y: $y }
    };
}

/// Creates a [`Point`](crate::Point) from ordinate values.
///
/// ```
/// use planar_types::point;
///
/// let p = point! { x: 1.0, y: 2.0 };
/// assert_eq!(p.x(), 1.0);
/// ```
#[macro_export]
macro_rules! point {
    (x: $x:expr, y: $y:expr $(,)?) => {
        $crate::Point::new($crate::coord! { x: $x, y: $y })
    };
    ($coord:expr $(,)?) => {
        $crate::Point::new($coord)
    };
}

/// Creates a [`LineString`](crate::LineString) from coordinates.
///
/// A literal with exactly one coordinate is invalid and panics.
///
/// ```
/// use planar_types::line_string;
///
/// let ls = line_string![
///     (x: 0.0, y: 0.0),
///     (x: 10.0, y: 0.0),
/// ];
/// assert_eq!(ls.num_coords(), 2);
/// ```
#[macro_export]
macro_rules! line_string {
    () => {
        $crate::LineString::empty()
    };
    ($(( $($tag:tt : $val:expr),* )),+ $(,)?) => {
        $crate::line_string![$($crate::coord! { $($tag: $val),* }),*]
    };
    ($($coord:expr),+ $(,)?) => {
        $crate::LineString::from_coords(vec![$($coord),*])
            .expect("invalid LineString literal")
    };
}

/// Creates a [`Polygon`](crate::Polygon) from an exterior ring (and,
/// optionally, interior rings). Open rings are closed automatically.
///
/// ```
/// use planar_types::polygon;
///
/// let poly = polygon![
///     (x: 0.0, y: 0.0),
///     (x: 4.0, y: 0.0),
///     (x: 4.0, y: 4.0),
///     (x: 0.0, y: 4.0),
/// ];
/// assert_eq!(poly.exterior().num_coords(), 5);
/// ```
#[macro_export]
macro_rules! polygon {
    () => {
        $crate::Polygon::empty()
    };
    (
        exterior: [ $(( $($ext_tag:tt : $ext_val:expr),* )),* $(,)? ],
        interiors: [ $([ $(( $($int_tag:tt : $int_val:expr),* )),* $(,)? ]),* $(,)? ]
        $(,)?
    ) => {
        $crate::Polygon::new(
            $crate::LinearRing::from_coords(
                vec![$($crate::coord! { $($ext_tag: $ext_val),* }),*]
            ).expect("invalid exterior ring literal"),
            vec![
                $(
                    $crate::LinearRing::from_coords(
                        vec![$($crate::coord! { $($int_tag: $int_val),* }),*]
                    ).expect("invalid interior ring literal")
                ),*
            ],
        ).expect("invalid Polygon literal")
    };
    ($(( $($tag:tt : $val:expr),* )),+ $(,)?) => {
        $crate::polygon![$($crate::coord! { $($tag: $val),* }),*]
    };
    ($($coord:expr),+ $(,)?) => {
        $crate::Polygon::new(
            $crate::LinearRing::from_coords(vec![$($coord),*])
                .expect("invalid ring literal"),
            vec![],
        ).expect("invalid Polygon literal")
    };
}

#[cfg(test)]
mod test {
    #[test]
    fn polygon_with_interiors() {
        let polygon = polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 10.0, y: 0.0),
                (x: 10.0, y: 10.0),
                (x: 0.0, y: 10.0),
            ],
            interiors: [
                [
                    (x: 1.0, y: 1.0),
                    (x: 2.0, y: 1.0),
                    (x: 2.0, y: 2.0),
                    (x: 1.0, y: 2.0),
                ],
            ],
        );
        assert_eq!(polygon.interiors().len(), 1);
        assert_eq!(polygon.exterior().num_coords(), 5);
    }
}
