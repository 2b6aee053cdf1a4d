use crate::utils::total_cmp;
use crate::{CoordNum, GeoFloat, Rect};

use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

const DEFAULT_NODE_CAPACITY: usize = 10;

/// A query-only R-tree packed by the Sort-Tile-Recursive algorithm.
///
/// Items are inserted up front; the tree packs itself on the first query
/// (sort by X centre, partition into √n vertical slices, sort each slice by
/// Y centre, group into nodes of `node_capacity`, recurse) and is frozen
/// afterwards: [`StrTree::insert`] panics once built. [`StrTree::remove`]
/// *is* supported after building: it tombstones the item without
/// re-balancing.
pub struct StrTree<T: CoordNum, I> {
    node_capacity: usize,
    entries: Vec<Entry<T, I>>,
    built: RefCell<Option<PackedTree<T>>>,
}

struct Entry<T: CoordNum, I> {
    envelope: Rect<T>,
    item: I,
    removed: bool,
}

struct PackedTree<T: CoordNum> {
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

struct Node<T: CoordNum> {
    envelope: Rect<T>,
    children: Children,
}

enum Children {
    /// indices into `entries`
    Items(Vec<usize>),
    /// indices into `nodes`
    Nodes(Vec<usize>),
}

impl<T: CoordNum, I> Default for StrTree<T, I> {
    fn default() -> Self {
        StrTree::new()
    }
}

impl<T: CoordNum, I> StrTree<T, I> {
    pub fn new() -> Self {
        StrTree::with_capacity(DEFAULT_NODE_CAPACITY)
    }

    pub fn with_capacity(node_capacity: usize) -> Self {
        assert!(node_capacity >= 2, "node capacity must be at least 2");
        StrTree {
            node_capacity,
            entries: Vec::new(),
            built: RefCell::new(None),
        }
    }

    pub fn size(&self) -> usize {
        self.entries.iter().filter(|e| !e.removed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn is_built(&self) -> bool {
        self.built.borrow().is_some()
    }

    /// Insert an item with its envelope.
    ///
    /// # Panics
    /// If the tree has already been built by a query.
    pub fn insert(&mut self, envelope: Rect<T>, item: I) {
        assert!(
            !self.is_built(),
            "cannot insert into an STR-tree after it has been built"
        );
        self.entries.push(Entry {
            envelope,
            item,
            removed: false,
        });
    }

    /// Tombstone the first entry matching `envelope` and `item`. The packed
    /// structure is not re-balanced. Returns whether an entry was removed.
    pub fn remove(&mut self, envelope: Rect<T>, item: &I) -> bool
    where
        I: PartialEq,
    {
        for entry in self.entries.iter_mut() {
            if !entry.removed && entry.envelope == envelope && &entry.item == item {
                entry.removed = true;
                return true;
            }
        }
        false
    }

    /// Force the packing step; queries build implicitly.
    pub fn build(&self) {
        if self.is_built() {
            return;
        }
        let tree = self.pack();
        *self.built.borrow_mut() = Some(tree);
    }

    /// Visit every (not removed) item whose envelope intersects `query_env`.
    pub fn query<'a>(&'a self, query_env: &Rect<T>, visitor: &mut impl FnMut(&'a Rect<T>, &'a I)) {
        self.build();
        let built = self.built.borrow();
        let tree = built.as_ref().expect("tree was just built");
        let root = match tree.root {
            Some(root) => root,
            None => return,
        };
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            let node = &tree.nodes[node_id];
            if !node.envelope.intersects(query_env) {
                continue;
            }
            match &node.children {
                Children::Nodes(children) => stack.extend(children.iter().copied()),
                Children::Items(children) => {
                    for &entry_id in children {
                        let entry = &self.entries[entry_id];
                        if !entry.removed && entry.envelope.intersects(query_env) {
                            visitor(&entry.envelope, &entry.item);
                        }
                    }
                }
            }
        }
    }

    /// The live items in packed-leaf order: items sharing a leaf (and, at
    /// coarser levels, a subtree) are spatially adjacent, which is what the
    /// cascaded-union merge order wants.
    pub fn packing_order(&self) -> Vec<&I> {
        self.build();
        let built = self.built.borrow();
        let tree = built.as_ref().expect("tree was just built");
        let mut result = Vec::with_capacity(self.entries.len());
        let root = match tree.root {
            Some(root) => root,
            None => return result,
        };
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            match &tree.nodes[node_id].children {
                Children::Nodes(children) => stack.extend(children.iter().rev().copied()),
                Children::Items(children) => {
                    for &entry_id in children {
                        let entry = &self.entries[entry_id];
                        if !entry.removed {
                            result.push(&entry.item);
                        }
                    }
                }
            }
        }
        result
    }

    pub fn query_list(&self, query_env: &Rect<T>) -> Vec<&I> {
        let mut result = Vec::new();
        self.query(query_env, &mut |_env, item| result.push(item));
        // `query` borrows each item immutably from `self.entries`, so the
        // collected references outlive the call.
        result
    }

    fn pack(&self) -> PackedTree<T> {
        let mut nodes: Vec<Node<T>> = Vec::new();

        let live: Vec<usize> = (0..self.entries.len())
            .filter(|&i| !self.entries[i].removed)
            .collect();
        if live.is_empty() {
            return PackedTree { nodes, root: None };
        }

        // leaf level
        let leaf_slices = Self::str_partition(
            live,
            self.node_capacity,
            |&entry_id| self.entries[entry_id].envelope,
        );
        let mut level: Vec<usize> = leaf_slices
            .into_iter()
            .map(|group| {
                let envelope = Self::envelope_of(group.iter().map(|&id| self.entries[id].envelope));
                nodes.push(Node {
                    envelope,
                    children: Children::Items(group),
                });
                nodes.len() - 1
            })
            .collect();

        // pack interior levels until a single root remains
        while level.len() > 1 {
            let groups = {
                let node_env = |id: &usize| nodes[*id].envelope;
                Self::str_partition(level, self.node_capacity, node_env)
            };
            level = groups
                .into_iter()
                .map(|group| {
                    let envelope = Self::envelope_of(group.iter().map(|&id| nodes[id].envelope));
                    nodes.push(Node {
                        envelope,
                        children: Children::Nodes(group),
                    });
                    nodes.len() - 1
                })
                .collect();
        }

        let root = level.first().copied();
        PackedTree { nodes, root }
    }

    /// Sort-Tile-Recursive grouping of `ids` into runs of at most
    /// `capacity`, tiled into vertical slices by X centre then by Y centre
    /// within each slice.
    fn str_partition(
        mut ids: Vec<usize>,
        capacity: usize,
        envelope_of: impl Fn(&usize) -> Rect<T>,
    ) -> Vec<Vec<usize>> {
        let leaf_count = ids.len().div_ceil(capacity);
        let slice_count = (leaf_count as f64).sqrt().ceil() as usize;
        let slice_len = slice_count * capacity;

        ids.sort_by(|a, b| total_cmp(&envelope_of(a).center().x, &envelope_of(b).center().x));

        let mut groups = Vec::with_capacity(leaf_count);
        for slice in ids.chunks_mut(slice_len.max(capacity)) {
            slice.sort_by(|a, b| total_cmp(&envelope_of(a).center().y, &envelope_of(b).center().y));
            for group in slice.chunks(capacity) {
                groups.push(group.to_vec());
            }
        }
        groups
    }

    fn envelope_of(mut envelopes: impl Iterator<Item = Rect<T>>) -> Rect<T> {
        let mut combined = envelopes.next().expect("nodes are never empty");
        for envelope in envelopes {
            combined.expand_to_include(&envelope);
        }
        combined
    }
}

/// Candidate pair for the best-first nearest-neighbour search, ordered by
/// the lower bound on the distance between the two subtrees.
struct PairCandidate<T: CoordNum> {
    distance_lower_bound: T,
    left: PairHalf,
    right: PairHalf,
}

#[derive(Clone, Copy)]
enum PairHalf {
    Node(usize),
    Item(usize),
}

impl<T: CoordNum> PartialEq for PairCandidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.distance_lower_bound == other.distance_lower_bound
    }
}
impl<T: CoordNum> Eq for PairCandidate<T> {}
impl<T: CoordNum> PartialOrd for PairCandidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: CoordNum> Ord for PairCandidate<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        total_cmp(&self.distance_lower_bound, &other.distance_lower_bound)
    }
}

impl<T: GeoFloat, I> StrTree<T, I> {
    /// The pair of items (one from `self`, one from `other`) with minimum
    /// `item_distance`, found by best-first search over node pairs keyed by
    /// the envelope distance lower bound.
    ///
    /// `item_distance` must never report less than the distance between the
    /// item envelopes, or pruning becomes unsound.
    pub fn nearest_neighbour<'a, J>(
        &'a self,
        other: &'a StrTree<T, J>,
        item_distance: impl Fn(&I, &J) -> T,
    ) -> Option<(&'a I, &'a J, T)> {
        self.nearest_neighbour_within(other, item_distance, None)
    }

    /// `true` if some item pair is within `max_distance`; prunes the search
    /// against the bound.
    pub fn is_within_distance<J>(
        &self,
        other: &StrTree<T, J>,
        item_distance: impl Fn(&I, &J) -> T,
        max_distance: T,
    ) -> bool {
        self.nearest_neighbour_within(other, item_distance, Some(max_distance))
            .map(|(_, _, distance)| distance <= max_distance)
            .unwrap_or(false)
    }

    fn nearest_neighbour_within<'a, J>(
        &'a self,
        other: &'a StrTree<T, J>,
        item_distance: impl Fn(&I, &J) -> T,
        max_distance: Option<T>,
    ) -> Option<(&'a I, &'a J, T)> {
        self.build();
        other.build();
        let self_built = self.built.borrow();
        let other_built = other.built.borrow();
        let self_tree = self_built.as_ref().expect("tree was just built");
        let other_tree = other_built.as_ref().expect("tree was just built");
        let (self_root, other_root) = match (self_tree.root, other_tree.root) {
            (Some(a), Some(b)) => (a, b),
            _ => return None,
        };

        let envelope_left = |half: PairHalf| match half {
            PairHalf::Node(id) => self_tree.nodes[id].envelope,
            PairHalf::Item(id) => self.entries[id].envelope,
        };
        let envelope_right = |half: PairHalf| match half {
            PairHalf::Node(id) => other_tree.nodes[id].envelope,
            PairHalf::Item(id) => other.entries[id].envelope,
        };
        let lower_bound = |left: PairHalf, right: PairHalf| {
            envelope_left(left).distance_sq(&envelope_right(right)).sqrt()
        };

        let mut heap: BinaryHeap<Reverse<PairCandidate<T>>> = BinaryHeap::new();
        heap.push(Reverse(PairCandidate {
            distance_lower_bound: lower_bound(PairHalf::Node(self_root), PairHalf::Node(other_root)),
            left: PairHalf::Node(self_root),
            right: PairHalf::Node(other_root),
        }));

        let mut best: Option<(usize, usize, T)> = None;
        let mut best_distance =
            max_distance.unwrap_or_else(<T as num_traits::Bounded>::max_value);

        while let Some(Reverse(candidate)) = heap.pop() {
            if candidate.distance_lower_bound > best_distance {
                break;
            }
            match (candidate.left, candidate.right) {
                (PairHalf::Item(left), PairHalf::Item(right)) => {
                    let distance =
                        item_distance(&self.entries[left].item, &other.entries[right].item);
                    if best.is_none() || distance < best_distance {
                        best = Some((left, right, distance));
                        best_distance = distance;
                    }
                }
                (left, right) => {
                    // expand the half with the larger envelope
                    let expand_left = match (left, right) {
                        (PairHalf::Node(_), PairHalf::Item(_)) => true,
                        (PairHalf::Item(_), PairHalf::Node(_)) => false,
                        (PairHalf::Node(l), PairHalf::Node(r)) => {
                            self_tree.nodes[l].envelope.area()
                                >= other_tree.nodes[r].envelope.area()
                        }
                        _ => unreachable!("item/item pairs are handled above"),
                    };
                    let push = |heap: &mut BinaryHeap<Reverse<PairCandidate<T>>>,
                                l: PairHalf,
                                r: PairHalf| {
                        heap.push(Reverse(PairCandidate {
                            distance_lower_bound: lower_bound(l, r),
                            left: l,
                            right: r,
                        }));
                    };
                    if expand_left {
                        let node_id = match left {
                            PairHalf::Node(id) => id,
                            PairHalf::Item(_) => unreachable!("expand_left implies a node"),
                        };
                        match &self_tree.nodes[node_id].children {
                            Children::Nodes(children) => {
                                for &child in children {
                                    push(&mut heap, PairHalf::Node(child), right);
                                }
                            }
                            Children::Items(children) => {
                                for &child in children {
                                    if !self.entries[child].removed {
                                        push(&mut heap, PairHalf::Item(child), right);
                                    }
                                }
                            }
                        }
                    } else {
                        let node_id = match right {
                            PairHalf::Node(id) => id,
                            PairHalf::Item(_) => unreachable!("expanding the right half"),
                        };
                        match &other_tree.nodes[node_id].children {
                            Children::Nodes(children) => {
                                for &child in children {
                                    push(&mut heap, left, PairHalf::Node(child));
                                }
                            }
                            Children::Items(children) => {
                                for &child in children {
                                    if !other.entries[child].removed {
                                        push(&mut heap, left, PairHalf::Item(child));
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        best.map(|(left, right, distance)| {
            (
                &self.entries[left].item,
                &other.entries[right].item,
                distance,
            )
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    fn envelope(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect<f64> {
        Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 })
    }

    #[test]
    fn empty_tree_queries_are_no_ops() {
        let tree: StrTree<f64, i32> = StrTree::new();
        assert!(tree.query_list(&envelope(0., 0., 100., 100.)).is_empty());
    }

    #[test]
    fn query_matches_brute_force() {
        let mut tree = StrTree::new();
        let mut items = Vec::new();
        // pseudo-random but deterministic layout
        let mut seed = 1u64;
        for i in 0..200 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let x = (seed >> 33) as f64 % 100.0;
            let y = (seed >> 20) as f64 % 100.0;
            let env = envelope(x, y, x + 5.0, y + 5.0);
            tree.insert(env, i);
            items.push((env, i));
        }

        let query = envelope(25.0, 25.0, 50.0, 50.0);
        let mut found: Vec<i32> = tree.query_list(&query).into_iter().copied().collect();
        found.sort_unstable();

        let mut expected: Vec<i32> = items
            .iter()
            .filter(|(env, _)| env.intersects(&query))
            .map(|(_, i)| *i)
            .collect();
        expected.sort_unstable();

        assert_eq!(found, expected);
        assert!(!expected.is_empty());
    }

    #[test]
    #[should_panic(expected = "after it has been built")]
    fn insert_after_build_panics() {
        let mut tree = StrTree::new();
        tree.insert(envelope(0., 0., 1., 1.), 1);
        let _ = tree.query_list(&envelope(0., 0., 1., 1.));
        tree.insert(envelope(2., 2., 3., 3.), 2);
    }

    #[test]
    fn remove_after_build() {
        let mut tree = StrTree::new();
        for i in 0..20 {
            tree.insert(envelope(i as f64, 0.0, i as f64 + 1.0, 1.0), i);
        }
        tree.build();
        assert!(tree.remove(envelope(3.0, 0.0, 4.0, 1.0), &3));
        assert!(!tree.remove(envelope(3.0, 0.0, 4.0, 1.0), &3));
        let found = tree.query_list(&envelope(3.2, 0.2, 3.8, 0.8));
        assert!(!found.contains(&&3));
        assert_eq!(tree.size(), 19);
    }

    #[test]
    fn nearest_neighbour_matches_brute_force() {
        let mut left: StrTree<f64, usize> = StrTree::new();
        let mut right: StrTree<f64, usize> = StrTree::new();
        let left_coords: Vec<(f64, f64)> = (0..30).map(|i| (i as f64 * 3.1, (i % 7) as f64)).collect();
        let right_coords: Vec<(f64, f64)> =
            (0..30).map(|i| (i as f64 * 2.7 + 50.0, (i % 5) as f64 + 20.0)).collect();
        for (i, &(x, y)) in left_coords.iter().enumerate() {
            left.insert(envelope(x, y, x, y), i);
        }
        for (i, &(x, y)) in right_coords.iter().enumerate() {
            right.insert(envelope(x, y, x, y), i);
        }

        let distance = |a: &usize, b: &usize| {
            let (ax, ay) = left_coords[*a];
            let (bx, by) = right_coords[*b];
            ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
        };

        let (a, b, d) = left.nearest_neighbour(&right, distance).unwrap();
        let mut best = f64::MAX;
        let mut best_pair = (0, 0);
        for i in 0..left_coords.len() {
            for j in 0..right_coords.len() {
                let dist = distance(&i, &j);
                if dist < best {
                    best = dist;
                    best_pair = (i, j);
                }
            }
        }
        assert_eq!((*a, *b), best_pair);
        assert_eq!(d, best);

        assert!(left.is_within_distance(&right, distance, best + 1.0));
        assert!(!left.is_within_distance(&right, distance, best - 1.0));
    }
}
