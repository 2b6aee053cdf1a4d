use crate::envelope::{envelope_of, EnvelopeCell};
use crate::{Coord, CoordNum, CoordSeq, Dims, Error, GeomContext, Line, Point, Rect};

/// An ordered path of two or more coordinates (or the empty path).
///
/// A `LineString` is _closed_ if its first and last coordinates coincide on
/// X/Y. It is not required to be simple; the `is_simple` predicate in the
/// algorithm crate decides that by self-noding.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineString<T: CoordNum = f64> {
    seq: CoordSeq<T>,
    ctx: GeomContext,
    #[cfg_attr(feature = "serde", serde(skip))]
    envelope: EnvelopeCell<T>,
}

impl<T: CoordNum> LineString<T> {
    /// Validates that the sequence is empty or holds at least two finite
    /// coordinates.
    pub fn new(seq: CoordSeq<T>) -> Result<Self, Error> {
        if seq.len() == 1 {
            return Err(Error::invalid(
                "a non-empty LineString needs at least 2 coordinates",
            ));
        }
        if !seq.is_finite() {
            return Err(Error::invalid("LineString coordinates must be finite"));
        }
        Ok(LineString {
            seq,
            ctx: GeomContext::default(),
            envelope: EnvelopeCell::new(),
        })
    }

    pub fn from_coords(coords: Vec<Coord<T>>) -> Result<Self, Error> {
        LineString::new(CoordSeq::new(coords))
    }

    pub fn empty() -> Self {
        LineString {
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

    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.seq.is_closed()
    }

    /// Iterate over the line segments of the path.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = Line<T>> + '_ {
        self.seq.coords().windows(2).map(|w| Line::new(w[0], w[1]))
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = Point<T>> + '_ {
        self.seq.coords().iter().map(|c| Point::new(*c))
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope
            .get_or_compute(|| envelope_of(self.seq.coords()))
    }
}

impl<T: CoordNum> From<Vec<Coord<T>>> for LineString<T> {
    /// Construction from a raw coordinate vector; a single-coordinate vector
    /// is invalid input and panics.
    fn from(coords: Vec<Coord<T>>) -> Self {
        LineString::from_coords(coords).expect("invalid LineString literal")
    }
}

impl<T: CoordNum> FromIterator<Coord<T>> for LineString<T> {
    fn from_iter<I: IntoIterator<Item = Coord<T>>>(iter: I) -> Self {
        LineString::from(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn rejects_single_coordinate() {
        assert!(LineString::from_coords(vec![coord! { x: 0., y: 0. }]).is_err());
        assert!(LineString::<f64>::from_coords(vec![]).is_ok());
    }

    #[test]
    fn lines_iterator() {
        let ls = LineString::from(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 5., y: 0. },
            coord! { x: 5., y: 5. },
        ]);
        let lines: Vec<_> = ls.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], Line::new(coord! { x: 5., y: 0. }, coord! { x: 5., y: 5. }));
    }

    #[test]
    fn envelope_is_cached_and_ignored_by_eq() {
        let a = LineString::from(vec![coord! { x: 0., y: 0. }, coord! { x: 2., y: 3. }]);
        let b = a.clone();
        let _ = a.envelope();
        // `b` has no computed envelope yet; equality must not care.
        assert_eq!(a, b);
        assert_eq!(
            b.envelope(),
            Some(Rect::new(coord! { x: 0., y: 0. }, coord! { x: 2., y: 3. }))
        );
    }
}
