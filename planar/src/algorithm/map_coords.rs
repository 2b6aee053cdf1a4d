use crate::{
    Coord, CoordNum, CoordSeq, Error, Geometry, GeometryCollection, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

/// Map a function over all the coordinates in a geometry, returning a new
/// geometry. This is the editing surface: geometries are immutable, so every
/// transformation (translation, precision snapping, common-bit removal, ...)
/// flows through here.
///
/// The mapping applies to X/Y only; Z/M payloads are carried unchanged. The
/// fallible form reports structural violations introduced by the mapping
/// (e.g. coordinates mapped to non-finite values) as `InvalidArgument`.
pub trait MapCoords<T: CoordNum>: Sized {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error>;

    /// Infallible convenience wrapper.
    ///
    /// # Panics
    /// If the mapping produces an invalid geometry (e.g. NaN ordinates).
    fn map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Self {
        self.try_map_coords(func)
            .expect("coordinate mapping produced an invalid geometry")
    }
}

/// Visit every coordinate of a geometry read-only.
pub trait VisitCoords<T: CoordNum> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>));
}

fn map_seq<T: CoordNum>(seq: &CoordSeq<T>, func: impl Fn(Coord<T>) -> Coord<T>) -> CoordSeq<T> {
    let mut mapped = seq.clone();
    mapped.apply_coords(func);
    mapped
}

impl<T: CoordNum> MapCoords<T> for Point<T> {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error> {
        Ok(Point::from_seq(map_seq(self.seq(), func))?.with_context(*self.ctx()))
    }
}

impl<T: CoordNum> MapCoords<T> for LineString<T> {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error> {
        Ok(LineString::new(map_seq(self.seq(), func))?.with_context(*self.ctx()))
    }
}

impl<T: CoordNum> MapCoords<T> for LinearRing<T> {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error> {
        Ok(LinearRing::new(map_seq(self.seq(), func))?.with_context(*self.ctx()))
    }
}

impl<T: CoordNum> MapCoords<T> for Polygon<T> {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error> {
        let exterior = self.exterior().try_map_coords(func)?;
        let interiors = self
            .interiors()
            .iter()
            .map(|ring| ring.try_map_coords(func))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Polygon::new(exterior, interiors)?.with_context(*self.ctx()))
    }
}

impl<T: CoordNum> MapCoords<T> for MultiPoint<T> {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error> {
        let points = self
            .iter()
            .map(|point| point.try_map_coords(func))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(MultiPoint::new(points).with_context(*self.ctx()))
    }
}

impl<T: CoordNum> MapCoords<T> for MultiLineString<T> {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error> {
        let line_strings = self
            .iter()
            .map(|line_string| line_string.try_map_coords(func))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(MultiLineString::new(line_strings).with_context(*self.ctx()))
    }
}

impl<T: CoordNum> MapCoords<T> for MultiPolygon<T> {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error> {
        let polygons = self
            .iter()
            .map(|polygon| polygon.try_map_coords(func))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(MultiPolygon::new(polygons).with_context(*self.ctx()))
    }
}

impl<T: CoordNum> MapCoords<T> for GeometryCollection<T> {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error> {
        let geometries = self
            .iter()
            .map(|geometry| geometry.try_map_coords(func))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(GeometryCollection::new(geometries).with_context(*self.ctx()))
    }
}

impl<T: CoordNum> MapCoords<T> for Geometry<T> {
    fn try_map_coords(&self, func: impl Fn(Coord<T>) -> Coord<T> + Copy) -> Result<Self, Error> {
        Ok(match self {
            Geometry::Point(g) => Geometry::Point(g.try_map_coords(func)?),
            Geometry::LineString(g) => Geometry::LineString(g.try_map_coords(func)?),
            Geometry::Polygon(g) => Geometry::Polygon(g.try_map_coords(func)?),
            Geometry::MultiPoint(g) => Geometry::MultiPoint(g.try_map_coords(func)?),
            Geometry::MultiLineString(g) => Geometry::MultiLineString(g.try_map_coords(func)?),
            Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.try_map_coords(func)?),
            Geometry::GeometryCollection(g) => {
                Geometry::GeometryCollection(g.try_map_coords(func)?)
            }
        })
    }
}

impl<T: CoordNum> VisitCoords<T> for Point<T> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>)) {
        if let Some(coord) = self.coord() {
            func(coord);
        }
    }
}

impl<T: CoordNum> VisitCoords<T> for LineString<T> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>)) {
        for &coord in self.coords() {
            func(coord);
        }
    }
}

impl<T: CoordNum> VisitCoords<T> for LinearRing<T> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>)) {
        for &coord in self.coords() {
            func(coord);
        }
    }
}

impl<T: CoordNum> VisitCoords<T> for Polygon<T> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>)) {
        for ring in self.rings() {
            ring.visit_coords(func);
        }
    }
}

impl<T: CoordNum> VisitCoords<T> for MultiPoint<T> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>)) {
        for point in self.iter() {
            point.visit_coords(func);
        }
    }
}

impl<T: CoordNum> VisitCoords<T> for MultiLineString<T> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>)) {
        for line_string in self.iter() {
            line_string.visit_coords(func);
        }
    }
}

impl<T: CoordNum> VisitCoords<T> for MultiPolygon<T> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>)) {
        for polygon in self.iter() {
            polygon.visit_coords(func);
        }
    }
}

impl<T: CoordNum> VisitCoords<T> for GeometryCollection<T> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>)) {
        for geometry in self.iter() {
            geometry.visit_coords(func);
        }
    }
}

impl<T: CoordNum> VisitCoords<T> for Geometry<T> {
    fn visit_coords(&self, func: &mut impl FnMut(Coord<T>)) {
        match self {
            Geometry::Point(g) => g.visit_coords(func),
            Geometry::LineString(g) => g.visit_coords(func),
            Geometry::Polygon(g) => g.visit_coords(func),
            Geometry::MultiPoint(g) => g.visit_coords(func),
            Geometry::MultiLineString(g) => g.visit_coords(func),
            Geometry::MultiPolygon(g) => g.visit_coords(func),
            Geometry::GeometryCollection(g) => g.visit_coords(func),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{coord, wkt};

    #[test]
    fn translate_a_polygon() {
        let polygon = wkt! { POLYGON((0.0 0.0,4.0 0.0,4.0 4.0,0.0 0.0)) };
        let moved = polygon.map_coords(|c| coord! { x: c.x + 10.0, y: c.y - 1.0 });
        assert_eq!(
            moved,
            wkt! { POLYGON((10.0 -1.0,14.0 -1.0,14.0 3.0,10.0 -1.0)) }
        );
    }

    #[test]
    fn mapping_to_nan_fails() {
        let ls = wkt! { LINESTRING(0.0 0.0,1.0 1.0) };
        assert!(ls
            .try_map_coords(|c| coord! { x: c.x, y: f64::NAN })
            .is_err());
    }

    #[test]
    fn visit_counts_coords() {
        let collection = wkt! {
            GEOMETRYCOLLECTION(
                POINT(0.0 0.0),
                LINESTRING(0.0 0.0,1.0 1.0)
            )
        };
        let geometry: Geometry<f64> = collection.into();
        let mut count = 0;
        geometry.visit_coords(&mut |_| count += 1);
        assert_eq!(count, 3);
    }
}
