use crate::algorithm::relate::geomgraph::Quadrant;
use crate::{Coord, GeoNum, Line, Rect};

/// A maximal run of segments of a polyline whose direction vectors all lie
/// in one quadrant of the plane.
///
/// Monotonicity buys two properties the intersection search leans on:
///
/// - the envelope of any sub-run is exactly the envelope of its two end
///   coordinates, so no envelope needs to be materialized during search;
/// - a chain never intersects itself.
///
/// A chain borrows the coordinate slice it was built over and identifies its
/// segments by index into that slice.
#[derive(Debug, Clone, Copy)]
pub struct MonotoneChain<'a, T: GeoNum> {
    coords: &'a [Coord<T>],
    start: usize,
    end: usize,
    /// caller-assigned tag, typically the index of the parent segment string
    pub parent: usize,
    envelope: Rect<T>,
}

impl<'a, T: GeoNum> MonotoneChain<'a, T> {
    fn new(coords: &'a [Coord<T>], start: usize, end: usize, parent: usize) -> Self {
        debug_assert!(end > start && end < coords.len());
        let mut envelope = Rect::from_coord(coords[start]);
        for coord in &coords[start + 1..=end] {
            envelope.expand_to_include_coord(*coord);
        }
        MonotoneChain {
            coords,
            start,
            end,
            parent,
            envelope,
        }
    }

    /// Partition `coords` into maximal quadrant-monotone chains.
    pub fn chains_of(coords: &'a [Coord<T>], parent: usize) -> Vec<MonotoneChain<'a, T>> {
        let mut chains = Vec::new();
        if coords.len() < 2 {
            return chains;
        }
        let mut start = 0;
        while start < coords.len() - 1 {
            let end = Self::find_chain_end(coords, start);
            chains.push(MonotoneChain::new(coords, start, end, parent));
            start = end;
        }
        chains
    }

    fn find_chain_end(coords: &[Coord<T>], start: usize) -> usize {
        // skip any leading repeated coordinates
        let mut safe_start = start;
        while safe_start < coords.len() - 1 && coords[safe_start] == coords[safe_start + 1] {
            safe_start += 1;
        }
        if safe_start >= coords.len() - 1 {
            return coords.len() - 1;
        }

        let chain_quad = Quadrant::new(
            coords[safe_start + 1].x - coords[safe_start].x,
            coords[safe_start + 1].y - coords[safe_start].y,
        );
        let mut last = safe_start + 1;
        while last < coords.len() - 1 {
            let quad = Quadrant::new(
                coords[last + 1].x - coords[last].x,
                coords[last + 1].y - coords[last].y,
            );
            // repeated coordinates (no quadrant) stay in the current chain
            if quad.is_some() && quad != chain_quad {
                break;
            }
            last += 1;
        }
        last
    }

    pub fn envelope(&self) -> &Rect<T> {
        &self.envelope
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn coords(&self) -> &'a [Coord<T>] {
        self.coords
    }

    pub fn line(&self, segment_index: usize) -> Line<T> {
        Line::new(self.coords[segment_index], self.coords[segment_index + 1])
    }

    /// Invoke `action(i, j)` for every pair of segment indices (one from
    /// each chain) whose envelopes overlap.
    ///
    /// Sub-chains are pruned by recursive binary partitioning; thanks to
    /// monotonicity a sub-chain's envelope is just the envelope of its end
    /// coordinates.
    pub fn compute_overlaps<F>(&self, other: &MonotoneChain<'_, T>, action: &mut F)
    where
        F: FnMut(usize, usize),
    {
        self.compute_overlaps_recursive(self.start, self.end, other, other.start, other.end, action);
    }

    #[allow(clippy::too_many_arguments)]
    fn compute_overlaps_recursive<F>(
        &self,
        start0: usize,
        end0: usize,
        other: &MonotoneChain<'_, T>,
        start1: usize,
        end1: usize,
        action: &mut F,
    ) where
        F: FnMut(usize, usize),
    {
        // a single segment pair: report it
        if end0 - start0 == 1 && end1 - start1 == 1 {
            action(start0, start1);
            return;
        }
        if !self.sub_envelopes_overlap(start0, end0, other, start1, end1) {
            return;
        }

        let mid0 = (start0 + end0) / 2;
        let mid1 = (start1 + end1) / 2;

        if start0 < mid0 {
            if start1 < mid1 {
                self.compute_overlaps_recursive(start0, mid0, other, start1, mid1, action);
            }
            if mid1 < end1 {
                self.compute_overlaps_recursive(start0, mid0, other, mid1, end1, action);
            }
        }
        if mid0 < end0 {
            if start1 < mid1 {
                self.compute_overlaps_recursive(mid0, end0, other, start1, mid1, action);
            }
            if mid1 < end1 {
                self.compute_overlaps_recursive(mid0, end0, other, mid1, end1, action);
            }
        }
    }

    fn sub_envelopes_overlap(
        &self,
        start0: usize,
        end0: usize,
        other: &MonotoneChain<'_, T>,
        start1: usize,
        end1: usize,
    ) -> bool {
        let env0 = Rect::new(self.coords[start0], self.coords[end0]);
        let env1 = Rect::new(other.coords[start1], other.coords[end1]);
        env0.intersects(&env1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn monotone_runs_are_single_chains() {
        let horizontal: Vec<Coord<f64>> =
            (0..10).map(|x| coord! { x: x as f64, y: 0. }).collect();
        assert_eq!(MonotoneChain::chains_of(&horizontal, 0).len(), 1);

        let vertical: Vec<Coord<f64>> =
            (0..10).rev().map(|y| coord! { x: 0., y: y as f64 }).collect();
        assert_eq!(MonotoneChain::chains_of(&vertical, 0).len(), 1);
    }

    #[test]
    fn direction_change_splits_chains() {
        let zigzag: Vec<Coord<f64>> = vec![
            coord! { x: 0., y: 0. },
            coord! { x: 5., y: 5. },
            coord! { x: 10., y: 0. },
        ];
        let chains = MonotoneChain::chains_of(&zigzag, 0);
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].start(), 0);
        assert_eq!(chains[0].end(), 1);
        assert_eq!(chains[1].start(), 1);
        assert_eq!(chains[1].end(), 2);
    }

    #[test]
    fn duplicate_coords_stay_in_chain() {
        let run: Vec<Coord<f64>> = vec![
            coord! { x: 0., y: 0. },
            coord! { x: 0., y: 1. },
            coord! { x: 0., y: 1. },
            coord! { x: 1., y: 1. },
        ];
        assert_eq!(MonotoneChain::chains_of(&run, 0).len(), 1);
    }

    #[test]
    fn chain_envelope_contains_all_segments() {
        let coords: Vec<Coord<f64>> = vec![
            coord! { x: 0., y: 0. },
            coord! { x: 2., y: 3. },
            coord! { x: 4., y: 3.5 },
            coord! { x: 9., y: 7. },
        ];
        let chains = MonotoneChain::chains_of(&coords, 0);
        for chain in &chains {
            for i in chain.start()..chain.end() {
                assert!(chain.envelope().contains(&chain.line(i).envelope()));
            }
        }
    }

    #[test]
    fn overlaps_reports_crossing_segments() {
        let a: Vec<Coord<f64>> = vec![coord! { x: 0., y: 0. }, coord! { x: 10., y: 10. }];
        let b: Vec<Coord<f64>> = vec![coord! { x: 0., y: 10. }, coord! { x: 10., y: 0. }];
        let ca = MonotoneChain::chains_of(&a, 0);
        let cb = MonotoneChain::chains_of(&b, 1);
        let mut pairs = vec![];
        ca[0].compute_overlaps(&cb[0], &mut |i, j| pairs.push((i, j)));
        assert_eq!(pairs, vec![(0, 0)]);
    }
}
