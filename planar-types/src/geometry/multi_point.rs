use crate::envelope::{combine_envelopes, EnvelopeCell};
use crate::{CoordNum, Dims, GeomContext, Point, Rect};

/// A homogeneous collection of [`Point`]s.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPoint<T: CoordNum = f64> {
    points: Vec<Point<T>>,
    ctx: GeomContext,
    #[cfg_attr(feature = "serde", serde(skip))]
    envelope: EnvelopeCell<T>,
}

impl<T: CoordNum> MultiPoint<T> {
    pub fn new(points: Vec<Point<T>>) -> Self {
        debug_assert!(
            points
                .windows(2)
                .all(|w| w[0].is_empty() || w[1].is_empty() || w[0].dims() == w[1].dims()),
            "parts of a MultiPoint must share one coordinate shape"
        );
        MultiPoint {
            points,
            ctx: GeomContext::default(),
            envelope: EnvelopeCell::new(),
        }
    }

    pub fn empty() -> Self {
        MultiPoint::new(Vec::new())
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

    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point<T>> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Point::is_empty)
    }

    pub fn dims(&self) -> Dims {
        self.points.first().map(Point::dims).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point<T>> {
        self.points.iter()
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope
            .get_or_compute(|| combine_envelopes(self.points.iter().map(Point::envelope)))
    }
}

impl<T: CoordNum> From<Vec<Point<T>>> for MultiPoint<T> {
    fn from(points: Vec<Point<T>>) -> Self {
        MultiPoint::new(points)
    }
}

impl<T: CoordNum> FromIterator<Point<T>> for MultiPoint<T> {
    fn from_iter<I: IntoIterator<Item = Point<T>>>(iter: I) -> Self {
        MultiPoint::new(iter.into_iter().collect())
    }
}
