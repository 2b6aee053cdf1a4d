//! The `planar` crate provides robust planar-geometry algorithms over the
//! [`planar-types`](planar_types) primitives.
//!
//! # Algorithms
//!
//! ## Robust kernel
//!
//! - **[`Kernel`](algorithm::kernels::Kernel)**: exact orientation and
//!   determinant-sign predicates ([`RobustKernel`](algorithm::kernels::RobustKernel)
//!   for floats, [`SimpleKernel`](algorithm::kernels::SimpleKernel) for exact
//!   integers)
//! - **[`line_intersection`](algorithm::line_intersection::line_intersection)**:
//!   robust segment/segment intersection with endpoint-exactness
//! - **[`CoordinatePosition`](algorithm::coordinate_position::CoordinatePosition)**:
//!   locate a coordinate Inside / OnBoundary / Outside of any geometry
//! - **[`Winding`](algorithm::winding_order::Winding)**: robust ring
//!   orientation
//!
//! ## Indexes
//!
//! - **[`StrTree`](index::strtree::StrTree)**: packed Sort-Tile-Recursive
//!   R-tree with best-first nearest-neighbour search
//! - **[`Quadtree`](index::quadtree::Quadtree)**: MX-CIF quadtree
//! - **[`MonotoneChain`](index::chain::MonotoneChain)**: quadrant-monotone
//!   polyline decomposition
//!
//! ## Noding
//!
//! - **[`Noder`](noding::Noder)** implementations: simple, monotone-chain
//!   indexed, snap-rounding, scaled, iterated, and boundary-chain noders
//!
//! ## Topology
//!
//! - **[`Relate`](algorithm::relate::Relate)**: DE-9IM intersection matrix
//!   computation over the labelled topology graph
//! - **[`overlay`]**: the rounded overlay pipeline (intersection, union,
//!   difference, symmetric difference) with an explicit precision model
//! - **[`PreparedGeometry`](prepared::PreparedGeometry)**: cached indexes for
//!   repeated predicate evaluation
//!
//! ## Construction helpers
//!
//! - convex hull, centroid, interior point, boundary, simplification and the
//!   coordinate-mapping (editing) surface under [`algorithm`]

#[macro_use]
extern crate log;

pub use planar_types::{coord, line_string, point, polygon, wkt};
pub use planar_types::{
    Coord, CoordFloat, CoordNum, CoordSeq, Dims, Error, GeomContext, Geometry, GeometryCollection,
    GeometryCow, GeometryFactory, Line, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, PrecisionModel, Rect,
};

pub mod algorithm;
pub mod index;
pub mod interrupt;
pub mod noding;
pub mod overlay;
pub mod precision;
pub mod prepared;
pub(crate) mod utils;

pub use crate::algorithm::*;

use crate::algorithm::kernels::HasKernel;

/// A trait for methods which work for both integers **and** floating point
pub trait GeoNum: CoordNum + HasKernel {}
impl<T> GeoNum for T where T: CoordNum + HasKernel {}

/// A trait for methods which only work with floating point scalars.
pub trait GeoFloat:
    GeoNum + num_traits::Float + num_traits::Signed + num_traits::Bounded + float_next_after::NextAfter
{
}
impl<T> GeoFloat for T where
    T: GeoNum
        + num_traits::Float
        + num_traits::Signed
        + num_traits::Bounded
        + float_next_after::NextAfter
{
}
