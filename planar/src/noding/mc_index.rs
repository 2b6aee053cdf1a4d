use super::{add_intersections_for_pair, extract_substrings, NodedSegmentString, SegmentString};
use super::Noder;
use crate::index::chain::MonotoneChain;
use crate::index::strtree::StrTree;
use crate::interrupt::{check_interrupt, Interrupt};
use crate::{Error, GeoFloat};

/// Noder which finds candidate segment pairs through monotone chains held
/// in an STR-tree: each chain is queried against the tree, overlapping chain
/// pairs are refined by the chains' recursive envelope subdivision, and only
/// the surviving segment pairs reach the robust intersector.
#[derive(Default)]
pub struct McIndexNoder {
    interrupt: Option<Interrupt>,
    /// number of proper intersections found by the last pass
    interior_intersections: usize,
}

impl McIndexNoder {
    pub fn new() -> Self {
        McIndexNoder::default()
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    /// Proper (interior/interior) intersections found by the most recent
    /// `compute_nodes` call. The iterated noder uses this as its progress
    /// measure.
    pub fn interior_intersections(&self) -> usize {
        self.interior_intersections
    }
}

impl<F: GeoFloat> Noder<F> for McIndexNoder {
    fn compute_nodes(
        &mut self,
        input: &[SegmentString<F>],
    ) -> Result<Vec<SegmentString<F>>, Error> {
        let strings: Vec<&SegmentString<F>> =
            input.iter().filter(|string| string.len() >= 2).collect();

        // phase 1: candidate pairs via chain overlap (borrows the inputs)
        let mut candidate_pairs: Vec<(usize, usize, usize, usize)> = Vec::new();
        {
            let mut chains: Vec<MonotoneChain<'_, F>> = Vec::new();
            for (string_index, string) in strings.iter().enumerate() {
                chains.extend(MonotoneChain::chains_of(string.coords(), string_index));
            }

            let mut tree: StrTree<F, usize> = StrTree::new();
            for (chain_index, chain) in chains.iter().enumerate() {
                tree.insert(*chain.envelope(), chain_index);
            }

            for (chain_index, chain) in chains.iter().enumerate() {
                check_interrupt(self.interrupt.as_ref())?;
                tree.query(chain.envelope(), &mut |_env, &other_index| {
                    // process each chain pair once; a chain never crosses itself
                    if other_index <= chain_index {
                        return;
                    }
                    let other = &chains[other_index];
                    chain.compute_overlaps(other, &mut |seg0, seg1| {
                        candidate_pairs.push((chain.parent, seg0, other.parent, seg1));
                    });
                });
            }
        }

        // phase 2: run the robust intersector over the candidates
        let mut noded: Vec<NodedSegmentString<F>> = strings
            .into_iter()
            .cloned()
            .map(NodedSegmentString::new)
            .collect();
        let mut interior = 0;
        for (string0, segment0, string1, segment1) in candidate_pairs {
            if add_intersections_for_pair(&mut noded, string0, segment0, string1, segment1) {
                interior += 1;
            }
        }
        self.interior_intersections = interior;

        Ok(extract_substrings(noded))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;
    use crate::noding::SimpleNoder;

    fn grid_strings() -> Vec<SegmentString<f64>> {
        let mut strings = Vec::new();
        // horizontal and vertical lines crossing in a lattice
        for i in 0..5 {
            let offset = i as f64 * 10.0;
            strings.push(SegmentString::new(
                vec![coord! { x: -5.0, y: offset }, coord! { x: 45.0, y: offset }],
                strings.len() as u64,
            ));
            strings.push(SegmentString::new(
                vec![coord! { x: offset, y: -5.0 }, coord! { x: offset, y: 45.0 }],
                strings.len() as u64,
            ));
        }
        strings
    }

    #[test]
    fn matches_the_simple_noder_oracle() {
        let strings = grid_strings();
        let mut simple: Vec<_> = SimpleNoder::new().compute_nodes(&strings).unwrap();
        let mut indexed: Vec<_> = McIndexNoder::new().compute_nodes(&strings).unwrap();

        let key = |s: &SegmentString<f64>| {
            let c = s.coords();
            (
                (c[0].x.to_bits(), c[0].y.to_bits()),
                (c[c.len() - 1].x.to_bits(), c[c.len() - 1].y.to_bits()),
            )
        };
        simple.sort_by_key(key);
        indexed.sort_by_key(key);
        assert_eq!(simple, indexed);
        // 5 lines each crossed by 5 others: 6 substrings per line
        assert_eq!(indexed.len(), 10 * 6);
    }

    #[test]
    fn records_interior_intersections() {
        let a = SegmentString::new(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 }],
            0,
        );
        let b = SegmentString::new(
            vec![coord! { x: 0.0, y: 10.0 }, coord! { x: 10.0, y: 0.0 }],
            1,
        );
        let mut noder = McIndexNoder::new();
        let _ = Noder::<f64>::compute_nodes(&mut noder, &[a, b]).unwrap();
        assert_eq!(noder.interior_intersections(), 1);
    }
}
