use crate::envelope::{envelope_of, EnvelopeCell};
use crate::{Coord, CoordNum, CoordSeq, Dims, Error, GeomContext, Line, LineString, Rect};

/// A closed ring of coordinates: first == last on X/Y, at least 4
/// coordinates when non-empty.
///
/// Construction auto-closes an open sequence by re-appending the first
/// coordinate (the closing operation also copies its Z/M payload), then
/// rejects rings that are still too short. Simplicity is *not* checked here;
/// the validity predicate does that by self-noding.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearRing<T: CoordNum = f64> {
    seq: CoordSeq<T>,
    ctx: GeomContext,
    #[cfg_attr(feature = "serde", serde(skip))]
    envelope: EnvelopeCell<T>,
}

impl<T: CoordNum> LinearRing<T> {
    pub fn new(mut seq: CoordSeq<T>) -> Result<Self, Error> {
        if !seq.is_empty() {
            seq.close();
            if seq.len() < 4 {
                return Err(Error::invalid(format!(
                    "a closed ring needs at least 4 coordinates, got {}",
                    seq.len()
                )));
            }
        }
        if !seq.is_finite() {
            return Err(Error::invalid("ring coordinates must be finite"));
        }
        Ok(LinearRing {
            seq,
            ctx: GeomContext::default(),
            envelope: EnvelopeCell::new(),
        })
    }

    pub fn from_coords(coords: Vec<Coord<T>>) -> Result<Self, Error> {
        LinearRing::new(CoordSeq::new(coords))
    }

    pub fn empty() -> Self {
        LinearRing {
            seq: CoordSeq::default(),
            ctx: GeomContext::default(),
            envelope: EnvelopeCell::new(),
        }
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

    pub fn into_seq(self) -> CoordSeq<T> {
        self.seq
    }

    pub fn dims(&self) -> Dims {
        self.seq.dims()
    }

    pub fn coords(&self) -> &[Coord<T>] {
        self.seq.coords()
    }

    pub fn num_coords(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = Line<T>> + '_ {
        self.seq.coords().windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// The ring traversed in the opposite direction.
    pub fn reversed(&self) -> LinearRing<T> {
        LinearRing {
            seq: self.seq.reversed(),
            ctx: self.ctx,
            envelope: self.envelope.clone(),
        }
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope
            .get_or_compute(|| envelope_of(self.seq.coords()))
    }

    /// Twice the signed area of the ring; positive for counter-clockwise
    /// winding. Used for canonical orientation, not as a robust predicate.
    pub fn twice_signed_area(&self) -> T {
        let mut sum = T::zero();
        for line in self.lines() {
            sum = sum + (line.start.x * line.end.y - line.end.x * line.start.y);
        }
        sum
    }
}

impl<T: CoordNum> From<LinearRing<T>> for LineString<T> {
    fn from(ring: LinearRing<T>) -> Self {
        let ctx = *ring.ctx();
        let mut line_string =
            LineString::new(ring.into_seq()).expect("a valid ring is a valid line string");
        line_string.set_ctx(ctx);
        line_string
    }
}

impl<T: CoordNum> TryFrom<LineString<T>> for LinearRing<T> {
    type Error = Error;

    fn try_from(line_string: LineString<T>) -> Result<Self, Error> {
        let ctx = *line_string.ctx();
        let mut ring = LinearRing::new(line_string.into_seq())?;
        ring.set_ctx(ctx);
        Ok(ring)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    fn square() -> Vec<Coord<f64>> {
        vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
        ]
    }

    #[test]
    fn auto_closes() {
        let ring = LinearRing::from_coords(square()).unwrap();
        assert_eq!(ring.num_coords(), 5);
        assert_eq!(ring.coords().first(), ring.coords().last());
    }

    #[test]
    fn rejects_degenerate_rings() {
        assert!(LinearRing::from_coords(vec![coord! { x: 0., y: 0. }, coord! { x: 1., y: 1. }])
            .is_err());
        assert!(LinearRing::<f64>::from_coords(vec![]).is_ok());
    }

    #[test]
    fn signed_area_sign_tracks_winding() {
        let ccw = LinearRing::from_coords(square()).unwrap();
        assert!(ccw.twice_signed_area() > 0.0);
        assert!(ccw.reversed().twice_signed_area() < 0.0);
        assert_eq!(ccw.twice_signed_area(), 200.0);
    }
}
