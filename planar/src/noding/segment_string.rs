use crate::{Coord, GeoFloat, Line, LineIntersection, Rect};
use std::collections::BTreeSet;

/// A connected chain of line segments, the unit of work of the noders.
///
/// A segment string owns its coordinates, an optional Z payload (parallel to
/// the coordinates), and an opaque `data` word which callers map back to
/// their own bookkeeping; the noders carry it through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentString<F: GeoFloat = f64> {
    coords: Vec<Coord<F>>,
    z: Option<Vec<F>>,
    pub data: u64,
}

impl<F: GeoFloat> SegmentString<F> {
    pub fn new(coords: Vec<Coord<F>>, data: u64) -> Self {
        SegmentString {
            coords,
            z: None,
            data,
        }
    }

    pub fn with_z(coords: Vec<Coord<F>>, z: Vec<F>, data: u64) -> Self {
        debug_assert_eq!(coords.len(), z.len(), "Z payload must parallel coords");
        SegmentString {
            coords,
            z: Some(z),
            data,
        }
    }

    pub fn coords(&self) -> &[Coord<F>] {
        &self.coords
    }

    pub fn z(&self) -> Option<&[F]> {
        self.z.as_deref()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn num_segments(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    pub fn line(&self, segment_index: usize) -> Line<F> {
        Line::new(self.coords[segment_index], self.coords[segment_index + 1])
    }

    pub fn is_closed(&self) -> bool {
        !self.coords.is_empty() && self.coords.first() == self.coords.last()
    }

    pub fn envelope(&self) -> Option<Rect<F>> {
        let mut iter = self.coords.iter();
        let first = iter.next()?;
        let mut env = Rect::from_coord(*first);
        for coord in iter {
            env.expand_to_include_coord(*coord);
        }
        Some(env)
    }

    /// Z value at vertex `i`, if a payload is present.
    fn z_at(&self, i: usize) -> Option<F> {
        self.z.as_ref().map(|z| z[i])
    }

    /// Z at an arbitrary point on segment `segment_index`, linearly
    /// interpolated between the segment's endpoint payloads.
    fn z_interpolated(&self, coord: Coord<F>, segment_index: usize) -> Option<F> {
        let z = self.z.as_ref()?;
        let p0 = self.coords[segment_index];
        let p1 = self.coords[segment_index + 1];
        let z0 = z[segment_index];
        let z1 = z[segment_index + 1];
        if p0 == p1 {
            return Some(z0);
        }
        let seg_len = ((p1.x - p0.x) * (p1.x - p0.x) + (p1.y - p0.y) * (p1.y - p0.y)).sqrt();
        let to_pt = ((coord.x - p0.x) * (coord.x - p0.x) + (coord.y - p0.y) * (coord.y - p0.y))
            .sqrt();
        let t = (to_pt / seg_len).min(F::one());
        Some(z0 + (z1 - z0) * t)
    }
}

/// A node (future vertex) registered on a segment string: a coordinate
/// pinned to a position along the string by (segment index, edge distance).
#[derive(Debug, Clone)]
pub(crate) struct SegmentNode<F: GeoFloat> {
    pub coord: Coord<F>,
    pub segment_index: usize,
    pub dist: F,
}

impl<F: GeoFloat> SegmentNode<F> {
    /// The "edge distance" of a point along a segment: a robust monotone
    /// metric (the dominant-axis offset), not the Euclidean distance.
    pub fn edge_distance(coord: Coord<F>, line: Line<F>) -> F {
        let dx = (line.end.x - line.start.x).abs();
        let dy = (line.end.y - line.start.y).abs();

        let mut dist: F;
        if coord == line.start {
            dist = F::zero();
        } else if coord == line.end {
            if dx > dy {
                dist = dx;
            } else {
                dist = dy;
            }
        } else {
            let coord_dx = (coord.x - line.start.x).abs();
            let coord_dy = (coord.y - line.start.y).abs();
            if dx > dy {
                dist = coord_dx;
            } else {
                dist = coord_dy;
            }
            // ensure non-endpoints always have a non-zero distance
            if dist == F::zero() && coord != line.start {
                dist = coord_dx.max(coord_dy);
            }
        }
        debug_assert!(
            !(dist == F::zero() && coord != line.start),
            "bad edge distance calculation"
        );
        dist
    }
}

impl<F: GeoFloat> PartialEq for SegmentNode<F> {
    fn eq(&self, other: &Self) -> bool {
        self.segment_index == other.segment_index && self.dist == other.dist
    }
}
impl<F: GeoFloat> Eq for SegmentNode<F> {}
impl<F: GeoFloat> PartialOrd for SegmentNode<F> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<F: GeoFloat> Ord for SegmentNode<F> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        debug_assert!(!self.dist.is_nan() && !other.dist.is_nan());
        self.segment_index
            .cmp(&other.segment_index)
            .then_with(|| crate::utils::total_cmp(&self.dist, &other.dist))
    }
}

/// A [`SegmentString`] which accumulates intersection nodes and can split
/// itself at them.
#[derive(Debug, Clone)]
pub struct NodedSegmentString<F: GeoFloat> {
    string: SegmentString<F>,
    nodes: BTreeSet<SegmentNode<F>>,
}

impl<F: GeoFloat> NodedSegmentString<F> {
    pub fn new(string: SegmentString<F>) -> Self {
        NodedSegmentString {
            string,
            nodes: BTreeSet::new(),
        }
    }

    pub fn string(&self) -> &SegmentString<F> {
        &self.string
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Register both (or the single) intersection points of `intersection`,
    /// which was computed for segment `segment_index` of this string.
    pub fn add_intersections(
        &mut self,
        intersection: &LineIntersection<F>,
        line: Line<F>,
        segment_index: usize,
    ) {
        match intersection {
            LineIntersection::SinglePoint { intersection, .. } => {
                self.add_intersection(*intersection, line, segment_index);
            }
            LineIntersection::Collinear { intersection } => {
                self.add_intersection(intersection.start, line, segment_index);
                self.add_intersection(intersection.end, line, segment_index);
            }
        }
    }

    /// Register an intersection node. A node landing exactly on a vertex is
    /// normalized to (following segment, distance 0) so duplicates coalesce.
    pub fn add_intersection(&mut self, coord: Coord<F>, line: Line<F>, segment_index: usize) {
        let mut normalized_segment_index = segment_index;
        let mut dist = SegmentNode::edge_distance(coord, line);

        let next_segment_index = normalized_segment_index + 1;
        if next_segment_index < self.string.coords.len() {
            let next_coord = self.string.coords[next_segment_index];
            if coord == next_coord {
                normalized_segment_index = next_segment_index;
                dist = F::zero();
            }
        }
        self.nodes.insert(SegmentNode {
            coord,
            segment_index: normalized_segment_index,
            dist,
        });
    }

    /// Split the string at every registered node, in along-string order.
    ///
    /// Z payloads are carried over: vertex Z values are copied, node Z
    /// values are linearly interpolated along the split segment.
    pub fn into_noded_substrings(mut self) -> Vec<SegmentString<F>> {
        if self.string.len() < 2 {
            return vec![];
        }
        // endpoints participate as split boundaries
        let first = self.string.coords[0];
        let last_index = self.string.coords.len() - 1;
        let last = self.string.coords[last_index];
        self.nodes.insert(SegmentNode {
            coord: first,
            segment_index: 0,
            dist: F::zero(),
        });
        self.nodes.insert(SegmentNode {
            coord: last,
            segment_index: last_index,
            dist: F::zero(),
        });

        let nodes: Vec<SegmentNode<F>> = self.nodes.iter().cloned().collect();
        let mut result = Vec::with_capacity(nodes.len() - 1);
        for pair in nodes.windows(2) {
            if let Some(split) = self.split_edge(&pair[0], &pair[1]) {
                result.push(split);
            }
        }
        result
    }

    fn split_edge(&self, from: &SegmentNode<F>, to: &SegmentNode<F>) -> Option<SegmentString<F>> {
        let has_z = self.string.z.is_some();
        let mut coords = Vec::with_capacity(to.segment_index - from.segment_index + 2);
        let mut z = has_z.then(Vec::new);

        let mut push = |coord: Coord<F>, zv: Option<F>, coords: &mut Vec<Coord<F>>| {
            if coords.last() == Some(&coord) {
                return;
            }
            coords.push(coord);
            if let (Some(z), Some(zv)) = (z.as_mut(), zv) {
                z.push(zv);
            }
        };

        push(
            from.coord,
            self.z_for_node(from),
            &mut coords,
        );
        for i in (from.segment_index + 1)..=to.segment_index {
            push(self.string.coords[i], self.string.z_at(i), &mut coords);
        }
        let last_seg_start = self.string.coords[to.segment_index];
        if to.dist > F::zero() || to.coord != last_seg_start {
            push(to.coord, self.z_for_node(to), &mut coords);
        }

        if coords.len() < 2 {
            return None;
        }
        Some(match z {
            Some(z) => SegmentString::with_z(coords, z, self.string.data),
            None => SegmentString::new(coords, self.string.data),
        })
    }

    fn z_for_node(&self, node: &SegmentNode<F>) -> Option<F> {
        if node.dist == F::zero() {
            self.string.z_at(node.segment_index)
        } else {
            self.string.z_interpolated(node.coord, node.segment_index)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn split_at_interior_node() {
        let string = SegmentString::new(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }],
            7,
        );
        let mut noded = NodedSegmentString::new(string);
        let line = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
        noded.add_intersection(coord! { x: 4.0, y: 0.0 }, line, 0);

        let parts = noded.into_noded_substrings();
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[0].coords(),
            &[coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 0.0 }]
        );
        assert_eq!(
            parts[1].coords(),
            &[coord! { x: 4.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }]
        );
        assert!(parts.iter().all(|p| p.data == 7));
    }

    #[test]
    fn duplicate_nodes_coalesce() {
        let string = SegmentString::new(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }],
            0,
        );
        let mut noded = NodedSegmentString::new(string);
        let line = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
        noded.add_intersection(coord! { x: 4.0, y: 0.0 }, line, 0);
        noded.add_intersection(coord! { x: 4.0, y: 0.0 }, line, 0);
        assert_eq!(noded.node_count(), 1);
    }

    #[test]
    fn node_on_vertex_is_normalized() {
        let string = SegmentString::new(
            vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 5.0, y: 0.0 },
                coord! { x: 10.0, y: 0.0 },
            ],
            0,
        );
        let mut noded = NodedSegmentString::new(string);
        let line = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 0.0 });
        noded.add_intersection(coord! { x: 5.0, y: 0.0 }, line, 0);
        let parts = noded.into_noded_substrings();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn z_payload_is_interpolated_at_splits() {
        let string = SegmentString::with_z(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }],
            vec![0.0, 10.0],
            0,
        );
        let mut noded = NodedSegmentString::new(string);
        let line = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
        noded.add_intersection(coord! { x: 4.0, y: 0.0 }, line, 0);

        let parts = noded.into_noded_substrings();
        assert_eq!(parts[0].z().unwrap(), &[0.0, 4.0]);
        assert_eq!(parts[1].z().unwrap(), &[4.0, 10.0]);
    }
}
