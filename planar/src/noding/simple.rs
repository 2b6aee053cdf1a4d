use super::{add_intersections_for_pair, extract_substrings, NodedSegmentString, SegmentString};
use super::Noder;
use crate::interrupt::{check_interrupt, Interrupt};
use crate::{Error, GeoFloat};

/// The O(n²) reference noder: every segment of every string is intersected
/// against every other segment. Useful as an oracle and for small inputs;
/// the indexed noders must produce the same node set.
#[derive(Default)]
pub struct SimpleNoder {
    interrupt: Option<Interrupt>,
}

impl SimpleNoder {
    pub fn new() -> Self {
        SimpleNoder::default()
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }
}

impl<F: GeoFloat> Noder<F> for SimpleNoder {
    fn compute_nodes(
        &mut self,
        input: &[SegmentString<F>],
    ) -> Result<Vec<SegmentString<F>>, Error> {
        let mut strings: Vec<NodedSegmentString<F>> = input
            .iter()
            .filter(|string| string.len() >= 2)
            .cloned()
            .map(NodedSegmentString::new)
            .collect();

        for string0 in 0..strings.len() {
            check_interrupt(self.interrupt.as_ref())?;
            for string1 in string0..strings.len() {
                for segment0 in 0..strings[string0].string().num_segments() {
                    let start1 = if string0 == string1 { segment0 } else { 0 };
                    for segment1 in start1..strings[string1].string().num_segments() {
                        add_intersections_for_pair(
                            &mut strings,
                            string0,
                            segment0,
                            string1,
                            segment1,
                        );
                    }
                }
            }
        }

        Ok(extract_substrings(strings))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn crossing_lines_are_noded() {
        let a = SegmentString::new(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 }],
            0,
        );
        let b = SegmentString::new(
            vec![coord! { x: 0.0, y: 10.0 }, coord! { x: 10.0, y: 0.0 }],
            1,
        );
        let noded = SimpleNoder::new().compute_nodes(&[a, b]).unwrap();
        assert_eq!(noded.len(), 4);
        let crossing = coord! { x: 5.0, y: 5.0 };
        // every output substring touching the crossing carries it as a vertex
        assert_eq!(
            noded
                .iter()
                .filter(|s| s.coords().contains(&crossing))
                .count(),
            4
        );
    }

    #[test]
    fn self_intersection_is_noded() {
        let bowtie = SegmentString::new(
            vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 10.0, y: 10.0 },
                coord! { x: 10.0, y: 0.0 },
                coord! { x: 0.0, y: 10.0 },
            ],
            0,
        );
        let noded = SimpleNoder::new().compute_nodes(&[bowtie]).unwrap();
        let crossing = coord! { x: 5.0, y: 5.0 };
        assert!(noded.iter().any(|s| s.coords().contains(&crossing)));
    }

    #[test]
    fn touching_at_endpoint_keeps_exact_vertex() {
        let a = SegmentString::new(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 }],
            0,
        );
        let b = SegmentString::new(
            vec![coord! { x: 5.0, y: 5.0 }, coord! { x: 9.0, y: 0.0 }],
            1,
        );
        let noded = SimpleNoder::new().compute_nodes(&[a.clone(), b.clone()]).unwrap();
        // endpoint contact requires no splitting
        assert_eq!(noded.len(), 2);
        assert_eq!(noded[0], a);
        assert_eq!(noded[1], b);
    }

    #[test]
    fn interrupt_aborts() {
        let interrupt = Interrupt::new();
        interrupt.request();
        let a = SegmentString::new(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }],
            0,
        );
        let result = SimpleNoder::new()
            .with_interrupt(interrupt)
            .compute_nodes(&[a]);
        assert_eq!(result, Err(Error::Interrupted));
    }
}
