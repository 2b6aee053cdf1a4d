use super::{Kernel, Orientation};
use crate::Coord;
use std::marker::PhantomData;

/// Robust kernel for floating point scalars.
///
/// Orientation routes through the `robust` crate's adaptive-precision
/// predicate: a fast floating point filter whose error bound certifies the
/// sign, falling back to exact expansion arithmetic when the filter is
/// inconclusive. The result is the symbolically correct sign.
#[derive(Default)]
pub struct RobustKernel<T>(PhantomData<T>);

use num_traits::{Float, NumCast};

impl<T: Float + crate::CoordNum> Kernel for RobustKernel<T> {
    type Scalar = T;

    fn orient2d(
        p: Coord<Self::Scalar>,
        q: Coord<Self::Scalar>,
        r: Coord<Self::Scalar>,
    ) -> Orientation {
        use robust::{orient2d, Coord as RobustCoord};

        let orientation = orient2d(
            RobustCoord {
                x: <f64 as NumCast>::from(p.x).unwrap(),
                y: <f64 as NumCast>::from(p.y).unwrap(),
            },
            RobustCoord {
                x: <f64 as NumCast>::from(q.x).unwrap(),
                y: <f64 as NumCast>::from(q.y).unwrap(),
            },
            RobustCoord {
                x: <f64 as NumCast>::from(r.x).unwrap(),
                y: <f64 as NumCast>::from(r.y).unwrap(),
            },
        );

        if orientation < 0. {
            Orientation::Clockwise
        } else if orientation > 0. {
            Orientation::CounterClockwise
        } else {
            Orientation::Collinear
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    // A near-degenerate triple where naive double arithmetic reports the
    // wrong sign.
    #[test]
    fn near_collinear_is_classified_exactly() {
        let a = coord! { x: 0.0, y: 0.0 };
        let b = coord! { x: 1e-12, y: 1e-12 };
        let q = coord! { x: 1.0, y: 1.0 };
        assert_eq!(RobustKernel::orient2d(a, b, q), Orientation::Collinear);
    }
}
