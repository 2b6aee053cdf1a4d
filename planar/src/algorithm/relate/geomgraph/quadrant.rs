use crate::GeoNum;

/// Quadrants of the Cartesian plane, labelled as follows:
/// ```ignore
///          (+)
///        NW ┃ NE
///    (-) ━━━╋━━━━ (+)
///        SW ┃ SE
///          (-)
/// ```
///
/// The ordering `NE < NW < SW < SE` follows the counter-clockwise sweep
/// starting at the positive x-axis, which is what edge-end sorting around a
/// node relies on.
#[derive(Debug, Clone, Copy, PartialOrd, PartialEq)]
pub enum Quadrant {
    NE,
    NW,
    SW,
    SE,
}

impl Quadrant {
    /// The quadrant of the direction vector `(dx, dy)`, or `None` for the
    /// zero vector.
    pub fn new<F: GeoNum>(dx: F, dy: F) -> Option<Quadrant> {
        if dx.is_zero() && dy.is_zero() {
            return None;
        }

        match (dy >= F::zero(), dx >= F::zero()) {
            (true, true) => Quadrant::NE,
            (true, false) => Quadrant::NW,
            (false, false) => Quadrant::SW,
            (false, true) => Quadrant::SE,
        }
        .into()
    }
}
