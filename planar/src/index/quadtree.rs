use crate::{coord, Coord, GeoFloat, Rect};

/// An MX-CIF quadtree over the plane, partitioned about the origin.
///
/// Each item lodges at the smallest node whose square wholly contains its
/// envelope; envelopes straddling a subdivision line stay at the parent, and
/// envelopes straddling an axis stay at the root. Zero-extent envelopes are
/// padded by the smallest extent seen so far (`min_extent`), so points index
/// cleanly. The tree grows upward when an item escapes the current covering
/// square.
///
/// Queries return a *candidate superset*: every item whose envelope
/// intersects the query envelope is visited, plus possibly a few more.
pub struct Quadtree<T: GeoFloat, I> {
    root: Root<T>,
    items: Vec<ItemEntry<T, I>>,
    min_extent: T,
}

struct ItemEntry<T: GeoFloat, I> {
    envelope: Rect<T>,
    item: I,
    removed: bool,
}

/// The root holds items whose envelopes straddle an axis, and one subtree
/// per quadrant of the plane.
struct Root<T: GeoFloat> {
    items: Vec<usize>,
    subnodes: [Option<Box<QuadNode<T>>>; 4],
}

struct QuadNode<T: GeoFloat> {
    envelope: Rect<T>,
    centre: Coord<T>,
    /// side length of one of this node's quadrants
    half_side: T,
    items: Vec<usize>,
    subnodes: [Option<Box<QuadNode<T>>>; 4],
}

/// Quadrant of `env` relative to the split point, or `None` if the envelope
/// straddles a split line.
fn quadrant_of<T: GeoFloat>(env: &Rect<T>, split: Coord<T>) -> Option<usize> {
    let east = if env.min().x >= split.x {
        true
    } else if env.max().x <= split.x {
        false
    } else {
        return None;
    };
    let north = if env.min().y >= split.y {
        true
    } else if env.max().y <= split.y {
        false
    } else {
        return None;
    };
    // SW, SE, NW, NE
    Some(match (north, east) {
        (false, false) => 0,
        (false, true) => 1,
        (true, false) => 2,
        (true, true) => 3,
    })
}

impl<T: GeoFloat> QuadNode<T> {
    /// The smallest power-of-two-aligned square node containing `env`.
    fn new_covering(env: &Rect<T>) -> Box<QuadNode<T>> {
        let two = T::one() + T::one();
        let extent = env.width().max(env.height());
        let extent = if extent <= T::zero() { T::one() } else { extent };
        // power-of-two side length ≥ extent
        let exp = extent.log2().ceil();
        let mut side = two.powf(exp);
        // snap the lower corner onto the grid of that size
        let mut min_x = (env.min().x / side).floor() * side;
        let mut min_y = (env.min().y / side).floor() * side;
        // grid snapping can leave the envelope poking out the far edge
        while min_x + side < env.max().x || min_y + side < env.max().y {
            side = side * two;
            min_x = (env.min().x / side).floor() * side;
            min_y = (env.min().y / side).floor() * side;
        }
        Self::from_extent(coord! { x: min_x, y: min_y }, side)
    }

    fn from_extent(min: Coord<T>, side: T) -> Box<QuadNode<T>> {
        let two = T::one() + T::one();
        let envelope = Rect::new(min, coord! { x: min.x + side, y: min.y + side });
        Box::new(QuadNode {
            envelope,
            centre: envelope.center(),
            half_side: side / two,
            items: Vec::new(),
            subnodes: [None, None, None, None],
        })
    }

    /// A node twice the size of `self` whose grid-aligned square also covers
    /// `env`; `self` becomes one of its quadrants.
    fn expanded_to_cover(self: Box<Self>, env: &Rect<T>) -> Box<QuadNode<T>> {
        let combined = self.envelope.combine(env);
        let mut larger = QuadNode::new_covering(&combined);
        larger.absorb(self);
        larger
    }

    /// Place an existing node into the subtree, creating intermediate
    /// quadrant nodes as needed. `node` must lie within one of `self`'s
    /// quadrants (both are aligned to the same power-of-two grid).
    fn absorb(&mut self, node: Box<QuadNode<T>>) {
        debug_assert!(self.envelope.contains(&node.envelope));
        if node.items.is_empty() && node.subnodes.iter().all(Option::is_none) {
            return;
        }
        match quadrant_of(&node.envelope, self.centre) {
            Some(quad) => {
                let two = T::one() + T::one();
                if node.half_side * two == self.half_side {
                    debug_assert!(self.subnodes[quad].is_none());
                    self.subnodes[quad] = Some(node);
                } else {
                    self.ensure_subnode(quad);
                    self.subnodes[quad]
                        .as_mut()
                        .expect("subnode was just created")
                        .absorb(node);
                }
            }
            None => {
                // aligned children never straddle their parent's centre
                // lines, but keep items reachable even if alignment drifted
                self.items.extend(node.items.iter().copied());
                for subnode in node.subnodes.into_iter().flatten() {
                    self.absorb(subnode);
                }
            }
        }
    }

    fn ensure_subnode(&mut self, quad: usize) {
        if self.subnodes[quad].is_none() {
            let min = match quad {
                0 => self.envelope.min(),
                1 => coord! { x: self.centre.x, y: self.envelope.min().y },
                2 => coord! { x: self.envelope.min().x, y: self.centre.y },
                _ => self.centre,
            };
            self.subnodes[quad] = Some(QuadNode::from_extent(min, self.half_side));
        }
    }

    fn insert(&mut self, env: &Rect<T>, entry: usize, min_extent: T) {
        // stop subdividing once cells reach the minimum extent
        if self.half_side <= min_extent {
            self.items.push(entry);
            return;
        }
        match quadrant_of(env, self.centre) {
            Some(quad) => {
                self.ensure_subnode(quad);
                self.subnodes[quad]
                    .as_mut()
                    .expect("subnode was just created")
                    .insert(env, entry, min_extent);
            }
            None => self.items.push(entry),
        }
    }

    fn query(&self, env: &Rect<T>, found: &mut Vec<usize>) {
        if !self.envelope.intersects(env) {
            return;
        }
        found.extend(self.items.iter().copied());
        for subnode in self.subnodes.iter().flatten() {
            subnode.query(env, found);
        }
    }

    fn remove(&mut self, env: &Rect<T>, entry: usize) -> bool {
        if !self.envelope.intersects(env) {
            return false;
        }
        if let Some(position) = self.items.iter().position(|&i| i == entry) {
            self.items.swap_remove(position);
            return true;
        }
        self.subnodes
            .iter_mut()
            .flatten()
            .any(|subnode| subnode.remove(env, entry))
    }

    fn depth(&self) -> usize {
        1 + self
            .subnodes
            .iter()
            .flatten()
            .map(|subnode| subnode.depth())
            .max()
            .unwrap_or(0)
    }
}

impl<T: GeoFloat, I> Default for Quadtree<T, I> {
    fn default() -> Self {
        Quadtree::new()
    }
}

impl<T: GeoFloat, I> Quadtree<T, I> {
    pub fn new() -> Self {
        Quadtree {
            root: Root {
                items: Vec::new(),
                subnodes: [None, None, None, None],
            },
            items: Vec::new(),
            min_extent: T::one(),
        }
    }

    pub fn size(&self) -> usize {
        self.items.iter().filter(|entry| !entry.removed).count()
    }

    pub fn depth(&self) -> usize {
        self.root
            .subnodes
            .iter()
            .flatten()
            .map(|subnode| subnode.depth())
            .max()
            .unwrap_or(0)
    }

    /// Pad zero-extent envelopes so points take a storable cell, and track
    /// the smallest extent seen for that padding.
    fn ensure_extent(&mut self, env: &Rect<T>) -> Rect<T> {
        let two = T::one() + T::one();
        let width = env.width();
        let height = env.height();
        for extent in [width, height] {
            if extent > T::zero() && extent < self.min_extent {
                self.min_extent = extent;
            }
        }
        if width > T::zero() && height > T::zero() {
            return *env;
        }
        let pad = self.min_extent / two;
        env.expanded_by(pad)
    }

    pub fn insert(&mut self, envelope: Rect<T>, item: I) {
        let padded = self.ensure_extent(&envelope);
        let entry = self.items.len();
        // the original envelope is kept for exact matching in query/remove;
        // the padded one only steers node placement
        self.items.push(ItemEntry {
            envelope,
            item,
            removed: false,
        });

        match quadrant_of(&padded, Coord::zero()) {
            None => self.root.items.push(entry),
            Some(quad) => {
                let min_extent = self.min_extent;
                match self.root.subnodes[quad].take() {
                    None => {
                        let mut node = QuadNode::new_covering(&padded);
                        node.insert(&padded, entry, min_extent);
                        self.root.subnodes[quad] = Some(node);
                    }
                    Some(node) => {
                        let mut node = if node.envelope.contains(&padded) {
                            node
                        } else {
                            node.expanded_to_cover(&padded)
                        };
                        node.insert(&padded, entry, min_extent);
                        self.root.subnodes[quad] = Some(node);
                    }
                }
            }
        }
    }

    /// All items whose envelope may intersect `envelope` (a candidate
    /// superset, filtered down to true envelope intersections).
    pub fn query(&self, envelope: &Rect<T>) -> Vec<&I> {
        let mut found = Vec::new();
        self.query_visitor(envelope, &mut |item| found.push(item));
        found
    }

    pub fn query_visitor<'a>(&'a self, envelope: &Rect<T>, visitor: &mut impl FnMut(&'a I)) {
        let mut candidates: Vec<usize> = self.root.items.clone();
        for subnode in self.root.subnodes.iter().flatten() {
            subnode.query(envelope, &mut candidates);
        }
        for entry_id in candidates {
            let entry = &self.items[entry_id];
            if !entry.removed && entry.envelope.intersects(envelope) {
                visitor(&entry.item);
            }
        }
    }

    /// Remove the item matching `envelope` and `item`. Returns whether
    /// anything was removed.
    pub fn remove(&mut self, envelope: Rect<T>, item: &I) -> bool
    where
        I: PartialEq,
    {
        let padded = self.ensure_extent(&envelope);
        let entry_id = match self.items.iter().position(|entry| {
            !entry.removed && entry.envelope == envelope && &entry.item == item
        }) {
            Some(id) => id,
            None => return false,
        };

        self.items[entry_id].removed = true;
        if let Some(position) = self.root.items.iter().position(|&i| i == entry_id) {
            self.root.items.swap_remove(position);
            return true;
        }
        self.root
            .subnodes
            .iter_mut()
            .flatten()
            .any(|subnode| subnode.remove(&padded, entry_id));
        true
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
    fn query_returns_intersecting_items() {
        let mut tree = Quadtree::new();
        for i in 0..50 {
            let x = (i % 10) as f64 * 10.0 - 50.0;
            let y = (i / 10) as f64 * 10.0 - 25.0;
            tree.insert(envelope(x, y, x + 4.0, y + 4.0), i);
        }
        assert_eq!(tree.size(), 50);

        let query = envelope(-10.0, -10.0, 10.0, 10.0);
        let found = tree.query(&query);
        // brute force over the same layout
        let expected = (0..50)
            .filter(|i| {
                let x = (i % 10) as f64 * 10.0 - 50.0;
                let y = (i / 10) as f64 * 10.0 - 25.0;
                envelope(x, y, x + 4.0, y + 4.0).intersects(&query)
            })
            .count();
        assert_eq!(found.len(), expected);
        assert!(tree.depth() > 0);
    }

    #[test]
    fn zero_extent_envelopes_are_padded() {
        let mut tree = Quadtree::new();
        tree.insert(envelope(5.0, 5.0, 5.0, 5.0), "point");
        let found = tree.query(&envelope(4.9, 4.9, 5.1, 5.1));
        assert_eq!(found, vec![&"point"]);
    }

    #[test]
    fn growing_upward_keeps_items_reachable() {
        let mut tree = Quadtree::new();
        tree.insert(envelope(1.0, 1.0, 2.0, 2.0), 1);
        // much larger envelope in the same quadrant forces expansion
        tree.insert(envelope(1.0, 1.0, 500.0, 500.0), 2);
        let found = tree.query(&envelope(0.0, 0.0, 600.0, 600.0));
        assert_eq!(found.len(), 2);

        let small = tree.query(&envelope(1.5, 1.5, 1.6, 1.6));
        assert!(small.contains(&&1));
    }

    #[test]
    fn remove_hides_items() {
        let mut tree = Quadtree::new();
        tree.insert(envelope(0.0, 0.0, 1.0, 1.0), 7);
        tree.insert(envelope(3.0, 3.0, 4.0, 4.0), 8);
        assert!(tree.remove(envelope(0.0, 0.0, 1.0, 1.0), &7));
        assert!(!tree.remove(envelope(0.0, 0.0, 1.0, 1.0), &7));
        assert_eq!(tree.size(), 1);
        assert!(tree.query(&envelope(0.0, 0.0, 5.0, 5.0)).contains(&&8));
        assert!(!tree.query(&envelope(0.0, 0.0, 5.0, 5.0)).contains(&&7));
    }

    #[test]
    fn items_straddling_axes_live_at_the_root() {
        let mut tree = Quadtree::new();
        tree.insert(envelope(-1.0, -1.0, 1.0, 1.0), "astride");
        assert_eq!(tree.query(&envelope(0.5, 0.5, 0.6, 0.6)), vec![&"astride"]);
    }
}
