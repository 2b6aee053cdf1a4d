//! Spatial indexes used to amortize pairwise work: a packed
//! Sort-Tile-Recursive R-tree, an MX-CIF quadtree, and monotone-chain
//! decomposition of polylines.

pub mod chain;
pub mod quadtree;
pub mod strtree;

pub use chain::MonotoneChain;
pub use quadtree::Quadtree;
pub use strtree::StrTree;
