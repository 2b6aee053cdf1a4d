use crate::{Coord, CoordNum, Error};
use num_traits::NumCast;

/// Rule mapping real-valued coordinates onto a representable grid.
///
/// `Floating` is the identity (full IEEE double precision), `FloatingSingle`
/// rounds through `f32`, and `Fixed` snaps onto the integer lattice scaled by
/// `scale`: `make_precise(v) = round(v * scale) / scale`, rounding ties to
/// even. All overlay output is snapped to the model of the operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrecisionModel {
    Floating,
    FloatingSingle,
    Fixed { scale: f64 },
}

impl Default for PrecisionModel {
    fn default() -> Self {
        PrecisionModel::Floating
    }
}

impl PrecisionModel {
    /// A fixed model with `scale` grid cells per unit.
    pub fn fixed(scale: f64) -> Result<Self, Error> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::invalid(format!(
                "fixed precision scale must be finite and positive, got {}",
                scale
            )));
        }
        Ok(PrecisionModel::Fixed { scale })
    }

    pub fn is_floating(&self) -> bool {
        matches!(
            self,
            PrecisionModel::Floating | PrecisionModel::FloatingSingle
        )
    }

    /// The number of grid cells per unit, if the model is fixed.
    pub fn scale(&self) -> Option<f64> {
        match self {
            PrecisionModel::Fixed { scale } => Some(*scale),
            _ => None,
        }
    }

    /// The width of one grid cell, if the model is fixed.
    pub fn grid_size(&self) -> Option<f64> {
        self.scale().map(|s| 1.0 / s)
    }

    pub fn make_precise<T: CoordNum>(&self, value: T) -> T {
        match self {
            PrecisionModel::Floating => value,
            PrecisionModel::FloatingSingle => {
                let v = value.to_f64().unwrap_or(f64::NAN) as f32;
                <T as NumCast>::from(v as f64).unwrap_or(value)
            }
            PrecisionModel::Fixed { scale } => {
                let v = match value.to_f64() {
                    Some(v) => v,
                    None => return value,
                };
                let snapped = (v * scale).round_ties_even() / scale;
                <T as NumCast>::from(snapped).unwrap_or(value)
            }
        }
    }

    pub fn make_coord_precise<T: CoordNum>(&self, coord: Coord<T>) -> Coord<T> {
        Coord {
            x: self.make_precise(coord.x),
            y: self.make_precise(coord.y),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn floating_is_identity() {
        let pm = PrecisionModel::Floating;
        assert_eq!(pm.make_precise(1.000000000001_f64), 1.000000000001);
    }

    #[test]
    fn fixed_rounds_half_even() {
        let pm = PrecisionModel::fixed(1.0).unwrap();
        assert_eq!(pm.make_precise(0.5_f64), 0.0);
        assert_eq!(pm.make_precise(1.5_f64), 2.0);
        assert_eq!(pm.make_precise(2.5_f64), 2.0);
        assert_eq!(pm.make_precise(-0.5_f64), 0.0);
    }

    #[test]
    fn fixed_is_idempotent() {
        let pm = PrecisionModel::fixed(100.0).unwrap();
        let snapped = pm.make_precise(1.23456_f64);
        assert_eq!(snapped, 1.23);
        assert_eq!(pm.make_precise(snapped), snapped);
    }

    #[test]
    fn invalid_scale_is_rejected() {
        assert!(PrecisionModel::fixed(0.0).is_err());
        assert!(PrecisionModel::fixed(-2.0).is_err());
        assert!(PrecisionModel::fixed(f64::NAN).is_err());
    }
}
