use super::{McIndexNoder, Noder, SegmentString};
use crate::interrupt::Interrupt;
use crate::{Error, GeoFloat};

/// Nodes a set of segment strings completely by running the indexed noder
/// repeatedly until no further interior intersections are detected.
///
/// A single noding pass over floating point data can leave residual
/// crossings: the computed intersection point of two segments is rounded,
/// and the rounded vertex may create a new hair-width crossing with a
/// neighbouring segment. Iterating converges for all but pathological
/// inputs; the divergence guard turns the pathological case into a
/// [`Error::Topology`] instead of an endless loop.
pub struct IteratedNoder {
    interrupt: Option<Interrupt>,
}

impl Default for IteratedNoder {
    fn default() -> Self {
        IteratedNoder::new()
    }
}

impl IteratedNoder {
    pub fn new() -> Self {
        IteratedNoder { interrupt: None }
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }
}

impl<F: GeoFloat> Noder<F> for IteratedNoder {
    fn compute_nodes(
        &mut self,
        input: &[SegmentString<F>],
    ) -> Result<Vec<SegmentString<F>>, Error> {
        let mut strings: Vec<SegmentString<F>> = input.to_vec();
        let mut previous_count = usize::MAX;

        loop {
            let mut pass = match &self.interrupt {
                Some(interrupt) => McIndexNoder::new().with_interrupt(interrupt.clone()),
                None => McIndexNoder::new(),
            };
            strings = pass.compute_nodes(&strings)?;
            let count = pass.interior_intersections();
            if count == 0 {
                return Ok(strings);
            }
            if count > previous_count {
                return Err(Error::topology(format!(
                    "iterated noding failed to converge (intersection count rose from {} to {})",
                    previous_count, count
                )));
            }
            previous_count = count;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn simple_input_converges_in_one_round() {
        let a = SegmentString::new(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 }],
            0,
        );
        let b = SegmentString::new(
            vec![coord! { x: 0.0, y: 10.0 }, coord! { x: 10.0, y: 0.0 }],
            1,
        );
        let noded = IteratedNoder::new().compute_nodes(&[a, b]).unwrap();
        assert_eq!(noded.len(), 4);
        // re-noding is a fixpoint
        let renoded = IteratedNoder::new().compute_nodes(&noded).unwrap();
        assert_eq!(renoded.len(), 4);
    }
}
