//! The noding engine: splitting a soup of segment strings so that every
//! interior intersection is materialized as a shared vertex in all strings
//! crossing it.
//!
//! All noders implement [`Noder`]; they differ in how candidate segment
//! pairs are found ([`SimpleNoder`] brute force, [`McIndexNoder`] via
//! monotone chains in an STR-tree) and in their robustness discipline
//! ([`SnapRoundingNoder`] rounds onto a precision grid, [`IteratedNoder`]
//! re-nodes until a fixpoint).

use crate::algorithm::line_intersection::{line_intersection, LineIntersection};
use crate::{Error, GeoFloat};

pub mod boundary_chain;
pub mod iterated;
pub mod mc_index;
pub mod scaled;
pub mod segment_string;
pub mod simple;
pub mod snap_round;

pub use boundary_chain::BoundaryChainNoder;
pub use iterated::IteratedNoder;
pub use mc_index::McIndexNoder;
pub use scaled::ScaledNoder;
pub use segment_string::{NodedSegmentString, SegmentString};
pub use simple::SimpleNoder;
pub use snap_round::SnapRoundingNoder;

/// Computes nodes (shared vertices) for a set of segment strings.
///
/// The output guarantees of every implementation:
///
/// - vertices appear on each output string in along-string order;
/// - repeated intersections are deduplicated by (segment index, distance);
/// - every pair of output strings either does not cross, or shares an exact
///   vertex where they would have crossed.
pub trait Noder<F: GeoFloat> {
    fn compute_nodes(&mut self, input: &[SegmentString<F>])
        -> Result<Vec<SegmentString<F>>, Error>;
}

/// An apparent self-intersection which is just the vertex shared by adjacent
/// segments of one string (including the wrap-around of a closed string).
pub(crate) fn trivial_intersection<F: GeoFloat>(
    intersection: &LineIntersection<F>,
    string: &SegmentString<F>,
    i0: usize,
    i1: usize,
) -> bool {
    if matches!(intersection, LineIntersection::Collinear { .. }) {
        return false;
    }
    let difference = i0.abs_diff(i1);
    if difference == 1 {
        return true;
    }
    if string.is_closed() {
        let max_segment_index = string.num_segments() - 1;
        if difference == max_segment_index {
            return true;
        }
    }
    false
}

/// Intersect one candidate segment pair and record the result on both
/// strings. Returns whether a *proper* (interior/interior) intersection was
/// found, which the iterated noder uses as its progress measure.
pub(crate) fn add_intersections_for_pair<F: GeoFloat>(
    strings: &mut [NodedSegmentString<F>],
    string0: usize,
    segment0: usize,
    string1: usize,
    segment1: usize,
) -> bool {
    if string0 == string1 && segment0 == segment1 {
        return false;
    }
    let line0 = strings[string0].string().line(segment0);
    let line1 = strings[string1].string().line(segment1);
    let intersection = match line_intersection(line0, line1) {
        Some(intersection) => intersection,
        None => return false,
    };

    if string0 == string1
        && trivial_intersection(&intersection, strings[string0].string(), segment0, segment1)
    {
        return false;
    }

    strings[string0].add_intersections(&intersection, line0, segment0);
    strings[string1].add_intersections(&intersection, line1, segment1);
    intersection.is_proper()
}

/// Collect the noded substrings of every string, discarding collapsed ones.
pub(crate) fn extract_substrings<F: GeoFloat>(
    strings: Vec<NodedSegmentString<F>>,
) -> Vec<SegmentString<F>> {
    strings
        .into_iter()
        .flat_map(NodedSegmentString::into_noded_substrings)
        .collect()
}
