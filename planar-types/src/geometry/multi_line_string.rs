use crate::envelope::{combine_envelopes, EnvelopeCell};
use crate::{CoordNum, Dims, GeomContext, LineString, Rect};

/// A homogeneous collection of [`LineString`]s.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiLineString<T: CoordNum = f64> {
    line_strings: Vec<LineString<T>>,
    ctx: GeomContext,
    #[cfg_attr(feature = "serde", serde(skip))]
    envelope: EnvelopeCell<T>,
}

impl<T: CoordNum> MultiLineString<T> {
    pub fn new(line_strings: Vec<LineString<T>>) -> Self {
        MultiLineString {
            line_strings,
            ctx: GeomContext::default(),
            envelope: EnvelopeCell::new(),
        }
    }

    pub fn empty() -> Self {
        MultiLineString::new(Vec::new())
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

    pub fn line_strings(&self) -> &[LineString<T>] {
        &self.line_strings
    }

    pub fn into_line_strings(self) -> Vec<LineString<T>> {
        self.line_strings
    }

    pub fn len(&self) -> usize {
        self.line_strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_strings.iter().all(LineString::is_empty)
    }

    /// `true` when every non-empty member path is closed.
    pub fn is_closed(&self) -> bool {
        self.line_strings
            .iter()
            .filter(|ls| !ls.is_empty())
            .all(LineString::is_closed)
    }

    pub fn dims(&self) -> Dims {
        self.line_strings
            .first()
            .map(LineString::dims)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineString<T>> {
        self.line_strings.iter()
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope.get_or_compute(|| {
            combine_envelopes(self.line_strings.iter().map(LineString::envelope))
        })
    }
}

impl<T: CoordNum> From<Vec<LineString<T>>> for MultiLineString<T> {
    fn from(line_strings: Vec<LineString<T>>) -> Self {
        MultiLineString::new(line_strings)
    }
}

impl<T: CoordNum> FromIterator<LineString<T>> for MultiLineString<T> {
    fn from_iter<I: IntoIterator<Item = LineString<T>>>(iter: I) -> Self {
        MultiLineString::new(iter.into_iter().collect())
    }
}
