use crate::algorithm::kernels::{HasKernel, Kernel, Orientation};
use crate::utils::lex_cmp;
use crate::{Coord, GeoNum, LineString, LinearRing};

/// How a closed ring is wound: clockwise or counter-clockwise.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
}

impl WindingOrder {
    pub fn reversed(&self) -> WindingOrder {
        match self {
            WindingOrder::Clockwise => WindingOrder::CounterClockwise,
            WindingOrder::CounterClockwise => WindingOrder::Clockwise,
        }
    }
}

/// Robust winding-order computation on rings.
///
/// The orientation is decided by the robust kernel at the lexicographically
/// smallest vertex (which is always a convex corner of the ring), skipping
/// repeated coordinates. Degenerate rings (all collinear, or too few
/// distinct points) have no winding order.
pub(crate) fn winding_order_of<T: GeoNum>(coords: &[Coord<T>]) -> Option<WindingOrder> {
    // need at least a closed triangle
    if coords.len() < 4 {
        return None;
    }
    debug_assert!(
        coords.first() == coords.last(),
        "winding order is only defined on closed rings"
    );
    // drop the closing coordinate so neighbours wrap cleanly
    let ring = &coords[..coords.len() - 1];
    let n = ring.len();

    let min_idx = ring
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| lex_cmp(a, b))
        .map(|(i, _)| i)?;
    let extreme = ring[min_idx];

    // previous distinct vertex
    let mut prev = None;
    for step in 1..n {
        let candidate = ring[(min_idx + n - step) % n];
        if candidate != extreme {
            prev = Some(candidate);
            break;
        }
    }
    // next distinct vertex
    let mut next = None;
    for step in 1..n {
        let candidate = ring[(min_idx + step) % n];
        if candidate != extreme {
            next = Some(candidate);
            break;
        }
    }

    match (prev, next) {
        (Some(prev), Some(next)) => match T::Ker::orient2d(prev, extreme, next) {
            Orientation::CounterClockwise => Some(WindingOrder::CounterClockwise),
            Orientation::Clockwise => Some(WindingOrder::Clockwise),
            Orientation::Collinear => None,
        },
        _ => None,
    }
}

/// Calculate the winding order of closed geometries.
pub trait Winding {
    type Scalar: GeoNum;

    fn winding_order(&self) -> Option<WindingOrder>;

    /// `true` if the ring is wound counter-clockwise.
    fn is_ccw(&self) -> bool {
        self.winding_order() == Some(WindingOrder::CounterClockwise)
    }

    fn is_cw(&self) -> bool {
        self.winding_order() == Some(WindingOrder::Clockwise)
    }
}

impl<T: GeoNum> Winding for LineString<T> {
    type Scalar = T;

    fn winding_order(&self) -> Option<WindingOrder> {
        if !self.is_closed() {
            return None;
        }
        winding_order_of(self.coords())
    }
}

impl<T: GeoNum> Winding for LinearRing<T> {
    type Scalar = T;

    fn winding_order(&self) -> Option<WindingOrder> {
        winding_order_of(self.coords())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{coord, wkt};

    #[test]
    fn square_windings() {
        let ccw = wkt! { LINESTRING(0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0) };
        assert_eq!(ccw.winding_order(), Some(WindingOrder::CounterClockwise));
        assert!(ccw.is_ccw());

        let cw = wkt! { LINESTRING(0.0 0.0,0.0 10.0,10.0 10.0,10.0 0.0,0.0 0.0) };
        assert_eq!(cw.winding_order(), Some(WindingOrder::Clockwise));
    }

    #[test]
    fn repeated_points_are_skipped() {
        let ring: Vec<Coord<f64>> = vec![
            coord! { x: 0., y: 0. },
            coord! { x: 0., y: 0. },
            coord! { x: 4., y: 0. },
            coord! { x: 4., y: 4. },
            coord! { x: 4., y: 4. },
            coord! { x: 0., y: 4. },
            coord! { x: 0., y: 0. },
        ];
        assert_eq!(winding_order_of(&ring), Some(WindingOrder::CounterClockwise));
    }

    #[test]
    fn degenerate_ring_has_no_winding() {
        let flat: Vec<Coord<f64>> = vec![
            coord! { x: 0., y: 0. },
            coord! { x: 1., y: 0. },
            coord! { x: 2., y: 0. },
            coord! { x: 0., y: 0. },
        ];
        assert_eq!(winding_order_of(&flat), None);

        let open = wkt! { LINESTRING(0.0 0.0,1.0 1.0) };
        assert_eq!(open.winding_order(), None);
    }
}
