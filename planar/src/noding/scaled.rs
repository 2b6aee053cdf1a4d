use super::{Noder, SegmentString};
use crate::{coord, Coord, Error, GeoFloat};

/// Wraps another [`Noder`], rescaling its inputs into a translated integer
/// domain before noding and back afterwards.
///
/// Coordinates are transformed as `round((v - offset) * scale)` on the way
/// in and `v / scale + offset` on the way out. This is how snap rounding is
/// applied to otherwise floating-point inputs: translate the data near the
/// origin, blow it up so the grid is the integer lattice, and node there.
pub struct ScaledNoder<N> {
    noder: N,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl<N> ScaledNoder<N> {
    pub fn new(noder: N, scale: f64) -> Self {
        ScaledNoder {
            noder,
            scale,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.offset_x == 0.0 && self.offset_y == 0.0
    }

    fn scale_string<F: GeoFloat>(&self, string: &SegmentString<F>) -> SegmentString<F> {
        let transform = |c: Coord<F>| {
            let x = ((c.x.to_f64().unwrap_or(f64::NAN) - self.offset_x) * self.scale).round();
            let y = ((c.y.to_f64().unwrap_or(f64::NAN) - self.offset_y) * self.scale).round();
            coord! {
                x: F::from(x).unwrap_or(c.x),
                y: F::from(y).unwrap_or(c.y),
            }
        };
        self.map_string(string, transform)
    }

    fn rescale_string<F: GeoFloat>(&self, string: &SegmentString<F>) -> SegmentString<F> {
        let transform = |c: Coord<F>| {
            let x = c.x.to_f64().unwrap_or(f64::NAN) / self.scale + self.offset_x;
            let y = c.y.to_f64().unwrap_or(f64::NAN) / self.scale + self.offset_y;
            coord! {
                x: F::from(x).unwrap_or(c.x),
                y: F::from(y).unwrap_or(c.y),
            }
        };
        self.map_string(string, transform)
    }

    fn map_string<F: GeoFloat>(
        &self,
        string: &SegmentString<F>,
        transform: impl Fn(Coord<F>) -> Coord<F>,
    ) -> SegmentString<F> {
        // scaling can collapse neighbouring coordinates
        let mut coords: Vec<Coord<F>> = Vec::with_capacity(string.len());
        let mut z: Option<Vec<F>> = string.z().map(|_| Vec::with_capacity(string.len()));
        for (i, &c) in string.coords().iter().enumerate() {
            let mapped = transform(c);
            if coords.last() == Some(&mapped) {
                continue;
            }
            coords.push(mapped);
            if let (Some(z), Some(zs)) = (z.as_mut(), string.z()) {
                z.push(zs[i]);
            }
        }
        match z {
            Some(z) => SegmentString::with_z(coords, z, string.data),
            None => SegmentString::new(coords, string.data),
        }
    }
}

impl<F: GeoFloat, N: Noder<F>> Noder<F> for ScaledNoder<N> {
    fn compute_nodes(
        &mut self,
        input: &[SegmentString<F>],
    ) -> Result<Vec<SegmentString<F>>, Error> {
        if self.is_identity() {
            return self.noder.compute_nodes(input);
        }
        let scaled: Vec<SegmentString<F>> = input
            .iter()
            .map(|string| self.scale_string(string))
            .filter(|string| string.len() >= 2)
            .collect();
        let noded = self.noder.compute_nodes(&scaled)?;
        Ok(noded
            .iter()
            .map(|string| self.rescale_string(string))
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::noding::SimpleNoder;

    #[test]
    fn round_trips_through_the_scaled_domain() {
        let a = SegmentString::new(
            vec![coord! { x: 100.25, y: 100.0 }, coord! { x: 101.25, y: 101.0 }],
            0,
        );
        let b = SegmentString::new(
            vec![coord! { x: 100.25, y: 101.0 }, coord! { x: 101.25, y: 100.0 }],
            1,
        );
        let mut noder = ScaledNoder::new(SimpleNoder::new(), 100.0).with_offset(100.0, 100.0);
        let noded = noder.compute_nodes(&[a, b]).unwrap();
        // crossing noded, coordinates restored to the unscaled frame
        assert_eq!(noded.len(), 4);
        for string in &noded {
            for c in string.coords() {
                assert!(c.x > 99.0 && c.x < 102.0);
                assert!(c.y > 99.0 && c.y < 102.0);
            }
        }
    }

    #[test]
    fn identity_scaling_is_a_passthrough() {
        let a = SegmentString::new(
            vec![coord! { x: 0.5, y: 0.5 }, coord! { x: 1.5, y: 1.5 }],
            0,
        );
        let mut noder = ScaledNoder::new(SimpleNoder::new(), 1.0);
        let noded = noder.compute_nodes(&[a.clone()]).unwrap();
        assert_eq!(noded, vec![a]);
    }
}
