use crate::algorithm::map_coords::{MapCoords, VisitCoords};
use crate::{coord, Coord, Error, GeoFloat, Geometry};

/// Accumulates the bit pattern shared by a stream of doubles.
///
/// Two doubles share their sign, exponent, and some prefix of mantissa bits
/// when they are close in magnitude; zeroing everything below the common
/// prefix yields a value that can be subtracted from all of them without
/// losing any of the bits in which they differ.
#[derive(Debug, Clone, Copy)]
pub struct CommonBits {
    is_first: bool,
    common_mantissa_bits: u32,
    common_bits: u64,
    common_sign_exp: u64,
}

impl Default for CommonBits {
    fn default() -> Self {
        CommonBits::new()
    }
}

impl CommonBits {
    pub fn new() -> Self {
        CommonBits {
            is_first: true,
            common_mantissa_bits: 52,
            common_bits: 0,
            common_sign_exp: 0,
        }
    }

    fn sign_exp(bits: u64) -> u64 {
        bits >> 52
    }

    fn zero_lower_bits(bits: u64, n_bits: u32) -> u64 {
        if n_bits >= 64 {
            0
        } else {
            bits & !((1u64 << n_bits) - 1)
        }
    }

    fn common_most_significant_mantissa_bits(bits0: u64, bits1: u64) -> u32 {
        for i in 0..52 {
            let mask_bit = 51 - i;
            if (bits0 >> mask_bit) & 1 != (bits1 >> mask_bit) & 1 {
                return i;
            }
        }
        52
    }

    pub fn add(&mut self, num: f64) {
        let bits = num.to_bits();
        if self.is_first {
            self.common_bits = bits;
            self.common_sign_exp = Self::sign_exp(bits);
            self.is_first = false;
            return;
        }
        if Self::sign_exp(bits) != self.common_sign_exp {
            self.common_bits = 0;
            self.common_mantissa_bits = 0;
            return;
        }
        self.common_mantissa_bits = self
            .common_mantissa_bits
            .min(Self::common_most_significant_mantissa_bits(
                self.common_bits,
                bits,
            ));
        self.common_bits = Self::zero_lower_bits(self.common_bits, 64 - (12 + self.common_mantissa_bits));
    }

    /// The common prefix value of everything added so far.
    pub fn common(&self) -> f64 {
        if self.is_first {
            0.0
        } else {
            f64::from_bits(self.common_bits)
        }
    }
}

/// Removes the common high-order bits of all coordinates of a geometry
/// before an operation and restores them afterwards.
///
/// This converts "large coordinates, small detail" into "small coordinates,
/// same detail", which markedly improves the conditioning of overlay
/// arithmetic on data far from the origin.
#[derive(Debug, Default, Clone)]
pub struct CommonBitsRemover {
    x: CommonBits,
    y: CommonBits,
}

impl CommonBitsRemover {
    pub fn new() -> Self {
        CommonBitsRemover::default()
    }

    /// Fold a geometry's coordinates into the common-bit accumulators.
    pub fn add<F: GeoFloat>(&mut self, geometry: &Geometry<F>) {
        geometry.visit_coords(&mut |coord: Coord<F>| {
            self.x.add(coord.x.to_f64().unwrap_or(0.0));
            self.y.add(coord.y.to_f64().unwrap_or(0.0));
        });
    }

    /// The translation that `apply` subtracts.
    pub fn common_coordinate<F: GeoFloat>(&self) -> Coord<F> {
        coord! {
            x: F::from(self.x.common()).unwrap_or_else(F::zero),
            y: F::from(self.y.common()).unwrap_or_else(F::zero),
        }
    }

    /// The geometry translated so its common bits sit at the origin.
    pub fn apply<F: GeoFloat>(&self, geometry: &Geometry<F>) -> Result<Geometry<F>, Error> {
        let common = self.common_coordinate::<F>();
        geometry.try_map_coords(|c| coord! { x: c.x - common.x, y: c.y - common.y })
    }

    /// Undo [`CommonBitsRemover::apply`] on a result geometry.
    pub fn restore<F: GeoFloat>(&self, geometry: &Geometry<F>) -> Result<Geometry<F>, Error> {
        let common = self.common_coordinate::<F>();
        geometry.try_map_coords(|c| coord! { x: c.x + common.x, y: c.y + common.y })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn identical_values_share_all_bits() {
        let mut bits = CommonBits::new();
        bits.add(1234.5678);
        bits.add(1234.5678);
        assert_eq!(bits.common(), 1234.5678);
    }

    #[test]
    fn differing_exponents_share_nothing() {
        let mut bits = CommonBits::new();
        bits.add(1.0);
        bits.add(1e20);
        assert_eq!(bits.common(), 0.0);
    }

    #[test]
    fn apply_then_restore_is_identity() {
        let geometry: Geometry<f64> = wkt! {
            POLYGON((1000000.5 2000000.25,1000010.5 2000000.25,1000010.5 2000010.25,1000000.5 2000000.25))
        }
        .into();
        let mut remover = CommonBitsRemover::new();
        remover.add(&geometry);

        let reduced = remover.apply(&geometry).unwrap();
        let envelope = reduced.envelope().unwrap();
        // the reduced geometry sits near the origin
        assert!(envelope.max().x.abs() < 1_000_000.0);

        let restored = remover.restore(&reduced).unwrap();
        assert_eq!(restored, geometry);
    }
}
