use crate::{Coord, CoordNum, CoordSeq, Dims, Error, GeomContext, Rect};

/// A zero- or one-coordinate geometry.
///
/// The empty point is representable (its coordinate sequence is empty), so
/// the direct ordinate accessors [`Point::x`] / [`Point::y`] panic on
/// emptiness; algorithm code goes through [`Point::coord`].
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<T: CoordNum = f64> {
    seq: CoordSeq<T>,
    ctx: GeomContext,
}

impl<T: CoordNum> Point<T> {
    pub fn new(coord: impl Into<Coord<T>>) -> Self {
        Point {
            seq: CoordSeq::new(vec![coord.into()]),
            ctx: GeomContext::default(),
        }
    }

    pub fn empty() -> Self {
        Point {
            seq: CoordSeq::default(),
            ctx: GeomContext::default(),
        }
    }

    /// Build from a sequence of at most one coordinate.
    pub fn from_seq(seq: CoordSeq<T>) -> Result<Self, Error> {
        if seq.len() > 1 {
            return Err(Error::invalid(format!(
                "a Point holds at most one coordinate, got {}",
                seq.len()
            )));
        }
        if !seq.is_finite() {
            return Err(Error::invalid("Point coordinate must be finite"));
        }
        Ok(Point {
            seq,
            ctx: GeomContext::default(),
        })
    }

    pub(crate) fn set_ctx(&mut self, ctx: GeomContext) {
        self.ctx = ctx;
    }

    /// The same geometry re-stamped with `ctx`; used when a derived
    /// geometry inherits the context of its source.
    pub fn with_context(mut self, ctx: GeomContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn ctx(&self) -> &GeomContext {
        &self.ctx
    }

    pub fn seq(&self) -> &CoordSeq<T> {
        &self.seq
    }

    pub fn dims(&self) -> Dims {
        self.seq.dims()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn coord(&self) -> Option<Coord<T>> {
        self.seq.first()
    }

    /// X ordinate.
    ///
    /// # Panics
    /// On the empty point.
    pub fn x(&self) -> T {
        self.coord().expect("empty Point has no ordinates").x
    }

    /// Y ordinate.
    ///
    /// # Panics
    /// On the empty point.
    pub fn y(&self) -> T {
        self.coord().expect("empty Point has no ordinates").y
    }

    pub fn z(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.seq.z(0)
        }
    }

    pub fn m(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.seq.m(0)
        }
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.coord().map(Rect::from_coord)
    }
}

impl<T: CoordNum> From<Coord<T>> for Point<T> {
    fn from(coord: Coord<T>) -> Self {
        Point::new(coord)
    }
}

impl<T: CoordNum> From<(T, T)> for Point<T> {
    fn from(coords: (T, T)) -> Self {
        Point::new(coords)
    }
}

impl<T: CoordNum> From<Point<T>> for Option<Coord<T>> {
    fn from(point: Point<T>) -> Self {
        point.coord()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn basic_accessors() {
        let p = Point::new(coord! { x: 1.0, y: 2.0 });
        assert_eq!(p.x(), 1.0);
        assert_eq!(p.y(), 2.0);
        assert!(!p.is_empty());
        assert_eq!(p.envelope(), Some(Rect::from_coord(coord! { x: 1.0, y: 2.0 })));
    }

    #[test]
    fn empty_point() {
        let p: Point<f64> = Point::empty();
        assert!(p.is_empty());
        assert_eq!(p.coord(), None);
        assert_eq!(p.envelope(), None);
    }

    #[test]
    fn from_seq_rejects_multiple_coords() {
        let seq = CoordSeq::new(vec![coord! { x: 0., y: 0. }, coord! { x: 1., y: 1. }]);
        assert!(Point::from_seq(seq).is_err());
    }
}
