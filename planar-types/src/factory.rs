use crate::{
    Coord, CoordNum, CoordSeq, Error, GeomContext, Geometry, GeometryCollection, LineString,
    LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, PrecisionModel,
};

/// Validating constructor surface for the geometry variants.
///
/// The factory snaps every input coordinate with its precision model, checks
/// the structural invariants the type constructors enforce plus the strict
/// cross-part ones (coordinate shape consistency in homogeneous
/// collections), and stamps its context (precision model + SRID) on the
/// result.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometryFactory {
    precision_model: PrecisionModel,
    srid: i32,
}

impl GeometryFactory {
    pub fn new(precision_model: PrecisionModel, srid: i32) -> Self {
        GeometryFactory {
            precision_model,
            srid,
        }
    }

    pub fn precision_model(&self) -> &PrecisionModel {
        &self.precision_model
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn ctx(&self) -> GeomContext {
        GeomContext::new(self.precision_model, self.srid)
    }

    fn snap_seq<T: CoordNum>(&self, mut seq: CoordSeq<T>) -> CoordSeq<T> {
        let pm = self.precision_model;
        seq.apply_coords(|c| pm.make_coord_precise(c));
        seq
    }

    pub fn create_point<T: CoordNum>(&self, coord: Coord<T>) -> Point<T> {
        let mut point = Point::new(self.precision_model.make_coord_precise(coord));
        point.set_ctx(self.ctx());
        point
    }

    pub fn create_empty_point<T: CoordNum>(&self) -> Point<T> {
        let mut point = Point::empty();
        point.set_ctx(self.ctx());
        point
    }

    pub fn create_point_from_seq<T: CoordNum>(&self, seq: CoordSeq<T>) -> Result<Point<T>, Error> {
        let mut point = Point::from_seq(self.snap_seq(seq))?;
        point.set_ctx(self.ctx());
        Ok(point)
    }

    pub fn create_line_string<T: CoordNum>(
        &self,
        seq: CoordSeq<T>,
    ) -> Result<LineString<T>, Error> {
        let mut line_string = LineString::new(self.snap_seq(seq))?;
        line_string.set_ctx(self.ctx());
        Ok(line_string)
    }

    pub fn create_linear_ring<T: CoordNum>(
        &self,
        seq: CoordSeq<T>,
    ) -> Result<LinearRing<T>, Error> {
        let mut ring = LinearRing::new(self.snap_seq(seq))?;
        ring.set_ctx(self.ctx());
        Ok(ring)
    }

    pub fn create_polygon<T: CoordNum>(
        &self,
        exterior: LinearRing<T>,
        interiors: Vec<LinearRing<T>>,
    ) -> Result<Polygon<T>, Error> {
        let mut polygon = Polygon::new(exterior, interiors)?;
        polygon.set_ctx(self.ctx());
        Ok(polygon)
    }

    pub fn create_multi_point<T: CoordNum>(
        &self,
        points: Vec<Point<T>>,
    ) -> Result<MultiPoint<T>, Error> {
        Self::check_consistent_dims(points.iter().map(|p| (p.is_empty(), p.dims())))?;
        let mut multi = MultiPoint::new(points);
        multi.set_ctx(self.ctx());
        Ok(multi)
    }

    pub fn create_multi_line_string<T: CoordNum>(
        &self,
        line_strings: Vec<LineString<T>>,
    ) -> Result<MultiLineString<T>, Error> {
        Self::check_consistent_dims(line_strings.iter().map(|ls| (ls.is_empty(), ls.dims())))?;
        let mut multi = MultiLineString::new(line_strings);
        multi.set_ctx(self.ctx());
        Ok(multi)
    }

    pub fn create_multi_polygon<T: CoordNum>(
        &self,
        polygons: Vec<Polygon<T>>,
    ) -> Result<MultiPolygon<T>, Error> {
        Self::check_consistent_dims(polygons.iter().map(|p| (p.is_empty(), p.dims())))?;
        let mut multi = MultiPolygon::new(polygons);
        multi.set_ctx(self.ctx());
        Ok(multi)
    }

    pub fn create_geometry_collection<T: CoordNum>(
        &self,
        geometries: Vec<Geometry<T>>,
    ) -> GeometryCollection<T> {
        let mut collection = GeometryCollection::new(geometries);
        collection.set_ctx(self.ctx());
        collection
    }

    /// Wrap a list of geometries in the most specific container that can
    /// hold them: the single element itself, a homogeneous Multi-geometry,
    /// or a GeometryCollection.
    pub fn build_geometry<T: CoordNum>(&self, mut geometries: Vec<Geometry<T>>) -> Geometry<T> {
        match geometries.len() {
            0 => Geometry::GeometryCollection(self.create_geometry_collection(vec![])),
            1 => {
                let mut geometry = geometries.pop().expect("len checked");
                geometry.set_ctx(self.ctx());
                geometry
            }
            _ => {
                let all = |f: fn(&Geometry<T>) -> bool| geometries.iter().all(f);
                if all(|g| matches!(g, Geometry::Point(_))) {
                    let points = geometries
                        .into_iter()
                        .map(|g| Point::try_from(g).expect("variant checked"))
                        .collect();
                    let mut multi = MultiPoint::new(points);
                    multi.set_ctx(self.ctx());
                    Geometry::MultiPoint(multi)
                } else if all(|g| matches!(g, Geometry::LineString(_))) {
                    let line_strings = geometries
                        .into_iter()
                        .map(|g| LineString::try_from(g).expect("variant checked"))
                        .collect();
                    let mut multi = MultiLineString::new(line_strings);
                    multi.set_ctx(self.ctx());
                    Geometry::MultiLineString(multi)
                } else if all(|g| matches!(g, Geometry::Polygon(_))) {
                    let polygons = geometries
                        .into_iter()
                        .map(|g| Polygon::try_from(g).expect("variant checked"))
                        .collect();
                    let mut multi = MultiPolygon::new(polygons);
                    multi.set_ctx(self.ctx());
                    Geometry::MultiPolygon(multi)
                } else {
                    Geometry::GeometryCollection(self.create_geometry_collection(geometries))
                }
            }
        }
    }

    fn check_consistent_dims(
        parts: impl Iterator<Item = (bool, crate::Dims)>,
    ) -> Result<(), Error> {
        let mut expected = None;
        for (is_empty, dims) in parts {
            if is_empty {
                continue;
            }
            match expected {
                None => expected = Some(dims),
                Some(expected) if expected == dims => {}
                Some(expected) => {
                    return Err(Error::invalid(format!(
                        "parts of a homogeneous collection must share one coordinate shape: \
                         found {:?} and {:?}",
                        expected, dims
                    )))
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn factory_snaps_and_stamps() {
        let pm = PrecisionModel::fixed(1.0).unwrap();
        let factory = GeometryFactory::new(pm, 4326);
        let point = factory.create_point(coord! { x: 1.4, y: 2.6 });
        assert_eq!(point.coord(), Some(coord! { x: 1.0, y: 3.0 }));
        assert_eq!(point.ctx().srid, 4326);
        assert_eq!(point.ctx().precision_model, pm);
    }

    #[test]
    fn mixed_shapes_in_multi_point_are_rejected() {
        use crate::{CoordSeq, Dims};
        let factory = GeometryFactory::default();
        let xy = Point::new(coord! { x: 0., y: 0. });
        let mut seq = CoordSeq::with_dims(Dims::Xyz);
        seq.push_with(coord! { x: 1., y: 1. }, Some(9.0), None);
        let xyz = Point::from_seq(seq).unwrap();
        assert!(factory.create_multi_point(vec![xy, xyz]).is_err());
    }

    #[test]
    fn build_geometry_picks_the_tightest_container() {
        let factory = GeometryFactory::default();
        let a: Geometry<f64> = Point::new(coord! { x: 0., y: 0. }).into();
        let b: Geometry<f64> = Point::new(coord! { x: 1., y: 1. }).into();

        assert!(matches!(
            factory.build_geometry(vec![a.clone(), b.clone()]),
            Geometry::MultiPoint(_)
        ));
        assert!(matches!(
            factory.build_geometry(vec![a.clone()]),
            Geometry::Point(_)
        ));

        let ls: Geometry<f64> =
            LineString::from(vec![coord! { x: 0., y: 0. }, coord! { x: 1., y: 0. }]).into();
        assert!(matches!(
            factory.build_geometry(vec![a, ls]),
            Geometry::GeometryCollection(_)
        ));
    }
}
