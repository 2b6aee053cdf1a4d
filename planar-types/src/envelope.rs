use crate::{Coord, CoordNum, Rect};
use core::cell::OnceCell;
use core::fmt;

/// Interior-mutable cache for a geometry's envelope.
///
/// The cache is excluded from equality and cloned by value, so two
/// geometries compare equal regardless of whether their envelopes have been
/// computed yet. The cell is `Send` but not `Sync`: concurrent first access
/// is the caller's problem, matching the lazy-state contract of the crate.
pub(crate) struct EnvelopeCell<T: CoordNum>(OnceCell<Option<Rect<T>>>);

impl<T: CoordNum> EnvelopeCell<T> {
    pub(crate) fn new() -> Self {
        EnvelopeCell(OnceCell::new())
    }

    pub(crate) fn get_or_compute(
        &self,
        compute: impl FnOnce() -> Option<Rect<T>>,
    ) -> Option<Rect<T>> {
        *self.0.get_or_init(compute)
    }
}

impl<T: CoordNum> Default for EnvelopeCell<T> {
    fn default() -> Self {
        EnvelopeCell::new()
    }
}

impl<T: CoordNum> Clone for EnvelopeCell<T> {
    fn clone(&self) -> Self {
        let cell = OnceCell::new();
        if let Some(value) = self.0.get() {
            let _ = cell.set(*value);
        }
        EnvelopeCell(cell)
    }
}

impl<T: CoordNum> PartialEq for EnvelopeCell<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T: CoordNum> fmt::Debug for EnvelopeCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            Some(value) => write!(f, "EnvelopeCell({:?})", value),
            None => write!(f, "EnvelopeCell(<not computed>)"),
        }
    }
}

/// The tight envelope of a coordinate slice, or `None` for an empty slice.
pub(crate) fn envelope_of<T: CoordNum>(coords: &[Coord<T>]) -> Option<Rect<T>> {
    let mut iter = coords.iter();
    let first = iter.next()?;
    let mut rect = Rect::from_coord(*first);
    for coord in iter {
        rect.expand_to_include_coord(*coord);
    }
    Some(rect)
}

/// Combine optional envelopes, ignoring `None`s.
pub(crate) fn combine_envelopes<T: CoordNum>(
    envelopes: impl Iterator<Item = Option<Rect<T>>>,
) -> Option<Rect<T>> {
    let mut result: Option<Rect<T>> = None;
    for envelope in envelopes.flatten() {
        match result.as_mut() {
            Some(rect) => rect.expand_to_include(&envelope),
            None => result = Some(envelope),
        }
    }
    result
}
