use super::{Noder, SegmentString};
use crate::{Coord, Error, GeoFloat};
use std::collections::HashMap;

/// Recovers boundary-only chains from a set of fully noded segment strings.
///
/// A segment which occurs in two strings (in either direction) is an
/// interior, shared segment (e.g. the common edge of two adjacent coverage
/// rings) and is dropped. The surviving segments are emitted as maximal
/// runs of their original strings.
#[derive(Default)]
pub struct BoundaryChainNoder;

impl BoundaryChainNoder {
    pub fn new() -> Self {
        BoundaryChainNoder
    }

    /// Direction-insensitive segment key on coordinate bit patterns.
    fn segment_key<F: GeoFloat>(p0: Coord<F>, p1: Coord<F>) -> (u64, u64, u64, u64) {
        let bits = |c: Coord<F>| {
            (
                c.x.to_f64().unwrap_or(f64::NAN).to_bits(),
                c.y.to_f64().unwrap_or(f64::NAN).to_bits(),
            )
        };
        let a = bits(p0);
        let b = bits(p1);
        if a <= b {
            (a.0, a.1, b.0, b.1)
        } else {
            (b.0, b.1, a.0, a.1)
        }
    }
}

impl<F: GeoFloat> Noder<F> for BoundaryChainNoder {
    fn compute_nodes(
        &mut self,
        input: &[SegmentString<F>],
    ) -> Result<Vec<SegmentString<F>>, Error> {
        let mut counts: HashMap<(u64, u64, u64, u64), usize> = HashMap::new();
        for string in input {
            for i in 0..string.num_segments() {
                let line = string.line(i);
                *counts.entry(Self::segment_key(line.start, line.end)).or_insert(0) += 1;
            }
        }

        let mut result = Vec::new();
        for string in input {
            let mut run: Vec<Coord<F>> = Vec::new();
            for i in 0..string.num_segments() {
                let line = string.line(i);
                let is_boundary = counts[&Self::segment_key(line.start, line.end)] == 1;
                if is_boundary {
                    if run.is_empty() {
                        run.push(line.start);
                    }
                    run.push(line.end);
                } else if run.len() >= 2 {
                    result.push(SegmentString::new(std::mem::take(&mut run), string.data));
                } else {
                    run.clear();
                }
            }
            if run.len() >= 2 {
                result.push(SegmentString::new(run, string.data));
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn paired_segments_are_dropped() {
        // two squares sharing the edge x=10: the shared edge appears twice
        let left = SegmentString::new(
            vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 10.0, y: 0.0 },
                coord! { x: 10.0, y: 10.0 },
                coord! { x: 0.0, y: 10.0 },
                coord! { x: 0.0, y: 0.0 },
            ],
            0,
        );
        let right = SegmentString::new(
            vec![
                coord! { x: 10.0, y: 0.0 },
                coord! { x: 20.0, y: 0.0 },
                coord! { x: 20.0, y: 10.0 },
                coord! { x: 10.0, y: 10.0 },
                coord! { x: 10.0, y: 0.0 },
            ],
            1,
        );

        let noded = BoundaryChainNoder::new()
            .compute_nodes(&[left, right])
            .unwrap();

        let shared_a = coord! { x: 10.0, y: 10.0 };
        let shared_b = coord! { x: 10.0, y: 0.0 };
        for string in &noded {
            for window in string.coords().windows(2) {
                let is_shared_edge = (window[0] == shared_a && window[1] == shared_b)
                    || (window[0] == shared_b && window[1] == shared_a);
                assert!(!is_shared_edge, "shared edge survived: {window:?}");
            }
        }
        // 3 boundary segments per square
        let total_segments: usize = noded.iter().map(SegmentString::num_segments).sum();
        assert_eq!(total_segments, 6);
    }
}
