/// Kernel trait and implementations providing robust geometric predicates.
pub mod kernels;
pub use kernels::{HasKernel, Kernel, Orientation};

/// OGC boundary of a geometry, under a configurable boundary node rule.
pub mod boundary;
pub use boundary::Boundary;

/// Rule deciding which endpoints of linear geometries lie on the boundary.
pub mod boundary_node_rule;
pub use boundary_node_rule::BoundaryNodeRule;

/// Calculate the centroid of a geometry.
pub mod centroid;
pub use centroid::Centroid;

/// Calculate the convex hull of a geometry.
pub mod convex_hull;
pub use convex_hull::ConvexHull;

/// Determine whether a coordinate lies inside, outside, or on the boundary
/// of a geometry.
pub mod coordinate_position;
pub use coordinate_position::{CoordPos, CoordinatePosition};

/// Topological dimensionality of a geometry.
pub mod dimensions;
pub use dimensions::{Dimensions, HasDimensions};

/// Coordinate-wise geometric equality with tolerance.
pub mod equals_exact;
pub use equals_exact::EqualsExact;

/// Calculate a representative point lying in the interior of a geometry.
pub mod interior_point;
pub use interior_point::InteriorPoint;

/// Determine whether a line string is simple (free of self-intersection).
pub mod is_simple;
pub use is_simple::IsSimple;

/// Structural and topological validity checks.
pub mod is_valid;
pub use is_valid::IsValid;

/// Robust intersection of two line segments.
pub mod line_intersection;
pub use line_intersection::{line_intersection, LineIntersection};

/// Map a function over the coordinates of a geometry (the editing surface).
pub mod map_coords;
pub use map_coords::{MapCoords, VisitCoords};

/// Spatial predicates (`intersects`, `contains`, ...) derived from the
/// DE-9IM intersection matrix.
pub mod predicates;
pub use predicates::SpatialPredicates;

/// Topologically relate two geometries based on DE-9IM semantics.
pub mod relate;
pub use relate::{IntersectionMatrix, Relate};

/// Simplify a geometry using the Ramer-Douglas-Peucker algorithm.
pub mod simplify;
pub use simplify::Simplify;

/// Calculate and manipulate the winding order of rings.
pub mod winding_order;
pub use winding_order::{Winding, WindingOrder};
