use crate::envelope::{combine_envelopes, EnvelopeCell};
use crate::{CoordNum, GeomContext, Geometry, Rect};

/// A heterogeneous collection of [`Geometry`] values.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryCollection<T: CoordNum = f64> {
    geometries: Vec<Geometry<T>>,
    ctx: GeomContext,
    #[cfg_attr(feature = "serde", serde(skip))]
    envelope: EnvelopeCell<T>,
}

impl<T: CoordNum> GeometryCollection<T> {
    pub fn new(geometries: Vec<Geometry<T>>) -> Self {
        GeometryCollection {
            geometries,
            ctx: GeomContext::default(),
            envelope: EnvelopeCell::new(),
        }
    }

    pub fn empty() -> Self {
        GeometryCollection::new(Vec::new())
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

    pub fn geometries(&self) -> &[Geometry<T>] {
        &self.geometries
    }

    pub fn into_geometries(self) -> Vec<Geometry<T>> {
        self.geometries
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.iter().all(Geometry::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Geometry<T>> {
        self.geometries.iter()
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope
            .get_or_compute(|| combine_envelopes(self.geometries.iter().map(Geometry::envelope)))
    }
}

impl<T: CoordNum> From<Vec<Geometry<T>>> for GeometryCollection<T> {
    fn from(geometries: Vec<Geometry<T>>) -> Self {
        GeometryCollection::new(geometries)
    }
}

impl<T: CoordNum> FromIterator<Geometry<T>> for GeometryCollection<T> {
    fn from_iter<I: IntoIterator<Item = Geometry<T>>>(iter: I) -> Self {
        GeometryCollection::new(iter.into_iter().collect())
    }
}
