use crate::utils::lex_cmp;
use crate::{Coord, GeoFloat};

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// A map of nodes, indexed by the lexicographic order of their coordinates.
pub(crate) struct NodeMap<F, NF>
where
    F: GeoFloat,
    NF: NodeFactory<F>,
{
    map: BTreeMap<NodeKey<F>, NF::Node>,
    _node_factory: PhantomData<NF>,
}

/// Creates the node stored in `NodeMap`
pub(crate) trait NodeFactory<F: GeoFloat> {
    type Node;
    fn create_node(coordinate: Coord<F>) -> Self::Node;
}

impl<F, NF> fmt::Debug for NodeMap<F, NF>
where
    F: GeoFloat,
    NF: NodeFactory<F>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeMap")
            .field("map.len()", &self.map.len())
            .finish()
    }
}

impl<F, NF> Clone for NodeMap<F, NF>
where
    F: GeoFloat,
    NF: NodeFactory<F>,
    NF::Node: Clone,
{
    fn clone(&self) -> Self {
        NodeMap {
            map: self.map.clone(),
            _node_factory: PhantomData,
        }
    }
}

impl<F, NF> PartialEq for NodeMap<F, NF>
where
    F: GeoFloat,
    NF: NodeFactory<F>,
    NF::Node: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

#[derive(Clone, Debug, PartialEq)]
struct NodeKey<F: GeoFloat>(Coord<F>);

impl<F: GeoFloat> std::cmp::Ord for NodeKey<F> {
    fn cmp(&self, other: &NodeKey<F>) -> std::cmp::Ordering {
        debug_assert!(!self.0.x.is_nan() && !self.0.y.is_nan());
        debug_assert!(!other.0.x.is_nan() && !other.0.y.is_nan());
        lex_cmp(&self.0, &other.0)
    }
}

impl<F: GeoFloat> std::cmp::PartialOrd for NodeKey<F> {
    fn partial_cmp(&self, other: &NodeKey<F>) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: GeoFloat> std::cmp::Eq for NodeKey<F> {}

impl<F, NF> NodeMap<F, NF>
where
    F: GeoFloat,
    NF: NodeFactory<F>,
{
    pub fn new() -> Self {
        NodeMap {
            map: BTreeMap::new(),
            _node_factory: PhantomData,
        }
    }

    /// The node at `coord`, created through the factory if absent.
    ///
    /// Note: coordinates must be non-NaN.
    pub fn insert_node_with_coordinate(&mut self, coord: Coord<F>) -> &mut NF::Node {
        debug_assert!(
            !coord.x.is_nan() && !coord.y.is_nan(),
            "NaN coordinates are not supported"
        );
        let key = NodeKey(coord);
        self.map.entry(key).or_insert_with(|| NF::create_node(coord))
    }

    pub fn find(&self, coord: Coord<F>) -> Option<&NF::Node> {
        self.map.get(&NodeKey(coord))
    }

    /// Iterates across the nodes in lexical order of their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = &NF::Node> {
        self.map.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut NF::Node> {
        self.map.values_mut()
    }

    pub fn into_iter(self) -> impl Iterator<Item = NF::Node> {
        self.map.into_iter().map(|(_k, v)| v)
    }
}
