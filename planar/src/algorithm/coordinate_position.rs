use crate::algorithm::kernels::{HasKernel, Kernel, Orientation};
use crate::{
    Coord, GeoNum, Geometry, GeometryCollection, GeometryCow, Line, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Rect,
};

/// The position of a `Coord` relative to a geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordPos {
    OnBoundary,
    Inside,
    Outside,
}

/// Determine whether a `Coord` lies inside, outside, or on the boundary of a
/// geometry.
///
/// # Examples
///
/// ```
/// use planar::polygon;
/// use planar::coordinate_position::{CoordinatePosition, CoordPos};
///
/// let square = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)];
///
/// assert_eq!(square.coordinate_position(&planar::coord! { x: 1.0, y: 1.0 }), CoordPos::Inside);
/// assert_eq!(square.coordinate_position(&planar::coord! { x: 0.0, y: 1.0 }), CoordPos::OnBoundary);
/// assert_eq!(square.coordinate_position(&planar::coord! { x: 5.0, y: 5.0 }), CoordPos::Outside);
/// ```
pub trait CoordinatePosition {
    type Scalar: GeoNum;

    fn coordinate_position(&self, coord: &Coord<Self::Scalar>) -> CoordPos {
        let mut is_inside = false;
        let mut boundary_count = 0;

        self.calculate_coordinate_position(coord, &mut is_inside, &mut boundary_count);

        // "The boundary of an arbitrary collection of geometries whose
        // interiors are disjoint consists of geometries drawn from the
        // boundaries of the element geometries by application of the
        // 'mod 2' union rule"
        //
        // (OpenGIS Simple Feature Access, 6.1.15.1)
        if boundary_count % 2 == 1 {
            CoordPos::OnBoundary
        } else if is_inside {
            CoordPos::Inside
        } else {
            CoordPos::Outside
        }
    }

    // impls of this trait must:
    //  1. set `is_inside = true` if `coord` is contained within the Interior
    //     of any component.
    //  2. increment `boundary_count` for each component whose Boundary
    //     contains `coord`.
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<Self::Scalar>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    );
}

/// `true` when `coord` lies on the closed segment, decided with the robust
/// orientation predicate.
pub(crate) fn point_on_segment<F: GeoNum>(coord: Coord<F>, line: Line<F>) -> bool {
    if !line.envelope().intersects_coord(coord) {
        return false;
    }
    F::Ker::orient2d(line.start, line.end, coord) == Orientation::Collinear
}

/// Locate a coordinate relative to a closed ring using ray crossing.
///
/// A horizontal ray extends from the coordinate towards positive X; each
/// ring segment crossing the ray flips the parity. Touching a vertex or
/// lying in the interior of a segment is classified `OnBoundary` exactly,
/// via the orientation predicate. The ring winding does not matter.
pub(crate) fn locate_in_ring<F: GeoNum>(coord: Coord<F>, ring: &[Coord<F>]) -> CoordPos {
    if ring.len() < 4 {
        return CoordPos::Outside;
    }
    let p = coord;
    let mut crossing_count = 0usize;

    for window in ring.windows(2) {
        let p1 = window[0];
        let p2 = window[1];

        if p == p2 {
            return CoordPos::OnBoundary;
        }
        // segment strictly left of the ray origin
        if p1.x < p.x && p2.x < p.x {
            continue;
        }
        // horizontal segment at ray height
        if p1.y == p.y && p2.y == p.y {
            let (min_x, max_x) = if p1.x < p2.x { (p1.x, p2.x) } else { (p2.x, p1.x) };
            if p.x >= min_x && p.x <= max_x {
                return CoordPos::OnBoundary;
            }
            continue;
        }
        // Evaluate all non-horizontal segments which cross the horizontal
        // ray to the right of the point. To avoid double-counting shared
        // vertices: upward edges include their starting endpoint and exclude
        // the final one; downward edges exclude the start and include the
        // end.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut sign = F::Ker::orient2d(p1, p2, p).as_sign();
            if sign == 0 {
                return CoordPos::OnBoundary;
            }
            if p2.y < p1.y {
                sign = -sign;
            }
            // the segment crosses the ray if the point is to the left
            if sign == 1 {
                crossing_count += 1;
            }
        }
    }

    if crossing_count % 2 == 1 {
        CoordPos::Inside
    } else {
        CoordPos::Outside
    }
}

impl<T: GeoNum> CoordinatePosition for Coord<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        _boundary_count: &mut usize,
    ) {
        if self == coord {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Point<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        _boundary_count: &mut usize,
    ) {
        if self.coord() == Some(*coord) {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Line<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        // degenerate segment is a point
        if self.start == self.end {
            if *coord == self.start {
                *is_inside = true;
            }
            return;
        }

        if coord == &self.start || coord == &self.end {
            *boundary_count += 1;
        } else if point_on_segment(*coord, *self) {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for LineString<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        if self.num_coords() < 2 {
            return;
        }

        if !self.is_closed() {
            let first = self.coords()[0];
            let last = self.coords()[self.num_coords() - 1];
            if coord == &first || coord == &last {
                *boundary_count += 1;
                return;
            }
        }

        if self.lines().any(|line| point_on_segment(*coord, line)) {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for LinearRing<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        _boundary_count: &mut usize,
    ) {
        // a ring used as a lone geometry is a closed line: no boundary
        if self.lines().any(|line| point_on_segment(*coord, line)) {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Polygon<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        if self.is_empty() {
            return;
        }
        match locate_in_ring(*coord, self.exterior().coords()) {
            CoordPos::Outside => {}
            CoordPos::OnBoundary => *boundary_count += 1,
            CoordPos::Inside => {
                for hole in self.interiors() {
                    match locate_in_ring(*coord, hole.coords()) {
                        CoordPos::Outside => {}
                        CoordPos::OnBoundary => {
                            *boundary_count += 1;
                            return;
                        }
                        CoordPos::Inside => return,
                    }
                }
                *is_inside = true;
            }
        }
    }
}

impl<T: GeoNum> CoordinatePosition for MultiPoint<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for point in self.iter() {
            point.calculate_coordinate_position(coord, is_inside, boundary_count);
        }
    }
}

impl<T: GeoNum> CoordinatePosition for MultiLineString<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for line_string in self.iter() {
            line_string.calculate_coordinate_position(coord, is_inside, boundary_count);
        }
    }
}

impl<T: GeoNum> CoordinatePosition for MultiPolygon<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for polygon in self.iter() {
            polygon.calculate_coordinate_position(coord, is_inside, boundary_count);
        }
    }
}

impl<T: GeoNum> CoordinatePosition for GeometryCollection<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        for geometry in self.iter() {
            geometry.calculate_coordinate_position(coord, is_inside, boundary_count);
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Rect<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        let on_x_edge = coord.x == self.min().x || coord.x == self.max().x;
        let on_y_edge = coord.y == self.min().y || coord.y == self.max().y;
        if !self.intersects_coord(*coord) {
            return;
        }
        if on_x_edge || on_y_edge {
            *boundary_count += 1;
        } else {
            *is_inside = true;
        }
    }
}

impl<T: GeoNum> CoordinatePosition for Geometry<T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        match self {
            Geometry::Point(g) => g.calculate_coordinate_position(coord, is_inside, boundary_count),
            Geometry::LineString(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::Polygon(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::MultiPoint(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::MultiLineString(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::MultiPolygon(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            Geometry::GeometryCollection(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
        }
    }
}

impl<T: GeoNum> CoordinatePosition for GeometryCow<'_, T> {
    type Scalar = T;
    fn calculate_coordinate_position(
        &self,
        coord: &Coord<T>,
        is_inside: &mut bool,
        boundary_count: &mut usize,
    ) {
        match self {
            GeometryCow::Point(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            GeometryCow::LineString(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            GeometryCow::Polygon(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            GeometryCow::MultiPoint(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            GeometryCow::MultiLineString(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            GeometryCow::MultiPolygon(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
            GeometryCow::GeometryCollection(g) => {
                g.calculate_coordinate_position(coord, is_inside, boundary_count)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{coord, polygon, wkt};

    #[test]
    fn point_in_ring_classification() {
        let ring: Vec<Coord<f64>> = vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
            coord! { x: 0., y: 0. },
        ];
        // vertex
        assert_eq!(
            locate_in_ring(coord! { x: 10., y: 10. }, &ring),
            CoordPos::OnBoundary
        );
        // interior of an edge
        assert_eq!(
            locate_in_ring(coord! { x: 5., y: 0. }, &ring),
            CoordPos::OnBoundary
        );
        assert_eq!(
            locate_in_ring(coord! { x: 5., y: 5. }, &ring),
            CoordPos::Inside
        );
        assert_eq!(
            locate_in_ring(coord! { x: 15., y: 5. }, &ring),
            CoordPos::Outside
        );
        // ray through a vertex must not double count
        assert_eq!(
            locate_in_ring(coord! { x: -5., y: 10. }, &ring),
            CoordPos::Outside
        );
    }

    #[test]
    fn polygon_with_hole() {
        let polygon = wkt! { POLYGON(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
            (4.0 4.0,6.0 4.0,6.0 6.0,4.0 6.0,4.0 4.0)
        ) };
        assert_eq!(
            polygon.coordinate_position(&coord! { x: 5.0, y: 5.0 }),
            CoordPos::Outside
        );
        assert_eq!(
            polygon.coordinate_position(&coord! { x: 4.0, y: 5.0 }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            polygon.coordinate_position(&coord! { x: 2.0, y: 5.0 }),
            CoordPos::Inside
        );
    }

    #[test]
    fn line_string_endpoints_are_boundary() {
        let ls = wkt! { LINESTRING(0.0 0.0,10.0 0.0) };
        assert_eq!(
            ls.coordinate_position(&coord! { x: 0.0, y: 0.0 }),
            CoordPos::OnBoundary
        );
        assert_eq!(
            ls.coordinate_position(&coord! { x: 5.0, y: 0.0 }),
            CoordPos::Inside
        );
        assert_eq!(
            ls.coordinate_position(&coord! { x: 5.0, y: 1.0 }),
            CoordPos::Outside
        );
    }

    #[test]
    fn degenerate_polygon() {
        let empty: crate::Polygon<f64> = polygon![];
        assert_eq!(
            empty.coordinate_position(&coord! { x: 0.0, y: 0.0 }),
            CoordPos::Outside
        );
    }
}
