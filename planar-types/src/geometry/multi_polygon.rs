use crate::envelope::{combine_envelopes, EnvelopeCell};
use crate::{CoordNum, Dims, GeomContext, Polygon, Rect};

/// A homogeneous collection of [`Polygon`]s.
///
/// For the collection to be valid the member polygons must not overlap;
/// that is checked by the validity predicate, not at construction.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPolygon<T: CoordNum = f64> {
    polygons: Vec<Polygon<T>>,
    ctx: GeomContext,
    #[cfg_attr(feature = "serde", serde(skip))]
    envelope: EnvelopeCell<T>,
}

impl<T: CoordNum> MultiPolygon<T> {
    pub fn new(polygons: Vec<Polygon<T>>) -> Self {
        MultiPolygon {
            polygons,
            ctx: GeomContext::default(),
            envelope: EnvelopeCell::new(),
        }
    }

    pub fn empty() -> Self {
        MultiPolygon::new(Vec::new())
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

    pub fn polygons(&self) -> &[Polygon<T>] {
        &self.polygons
    }

    pub fn into_polygons(self) -> Vec<Polygon<T>> {
        self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(Polygon::is_empty)
    }

    pub fn dims(&self) -> Dims {
        self.polygons.first().map(Polygon::dims).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Polygon<T>> {
        self.polygons.iter()
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope
            .get_or_compute(|| combine_envelopes(self.polygons.iter().map(Polygon::envelope)))
    }
}

impl<T: CoordNum> From<Vec<Polygon<T>>> for MultiPolygon<T> {
    fn from(polygons: Vec<Polygon<T>>) -> Self {
        MultiPolygon::new(polygons)
    }
}

impl<T: CoordNum> FromIterator<Polygon<T>> for MultiPolygon<T> {
    fn from_iter<I: IntoIterator<Item = Polygon<T>>>(iter: I) -> Self {
        MultiPolygon::new(iter.into_iter().collect())
    }
}
