pub(crate) use edge_end_builder::EdgeEndBuilder;
pub use geomgraph::intersection_matrix::IntersectionMatrix;
pub(crate) use geomgraph::GeometryGraph;

use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
use crate::{
    Error, GeoFloat, Geometry, GeometryCollection, GeometryCow, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

mod edge_end_builder;
pub(crate) mod geomgraph;
mod relate_operation;

pub(crate) use relate_operation::RelateOperation;

/// Topologically relate two geometries based on
/// [DE-9IM](https://en.wikipedia.org/wiki/DE-9IM) semantics.
///
/// See [`IntersectionMatrix`] for details.
///
/// # Examples
///
/// ```
/// use planar::wkt;
/// use planar::relate::Relate;
///
/// let square = wkt! { POLYGON((2.0 2.0,4.0 2.0,4.0 4.0,2.0 4.0,2.0 2.0)) };
/// let inner_line = wkt! { LINESTRING(2.5 2.5,3.5 3.5) };
///
/// let intersection_matrix = square.relate(&inner_line).unwrap();
/// assert!(intersection_matrix.is_intersects());
/// assert!(intersection_matrix.is_contains());
/// assert!(!intersection_matrix.is_within());
/// ```
///
/// Note: `Relate` must not be called on geometries containing `NaN`
/// coordinates; a [`Error::Topology`] is returned when the graph labelling
/// is inconsistent under the geometry/precision combination.
pub trait Relate<F, T> {
    /// The DE-9IM matrix under the default (`Mod2`) boundary node rule.
    fn relate(&self, other: &T) -> Result<IntersectionMatrix, Error>;

    /// The DE-9IM matrix under an explicit boundary node rule.
    fn relate_with_rule(
        &self,
        other: &T,
        boundary_node_rule: BoundaryNodeRule,
    ) -> Result<IntersectionMatrix, Error>;
}

impl<F: GeoFloat> Relate<F, GeometryCow<'_, F>> for GeometryCow<'_, F> {
    fn relate(&self, other: &GeometryCow<F>) -> Result<IntersectionMatrix, Error> {
        self.relate_with_rule(other, BoundaryNodeRule::default())
    }

    fn relate_with_rule(
        &self,
        other: &GeometryCow<F>,
        boundary_node_rule: BoundaryNodeRule,
    ) -> Result<IntersectionMatrix, Error> {
        RelateOperation::new(self, other, boundary_node_rule).compute_intersection_matrix()
    }
}

macro_rules! relate_impl {
    ($($k:ty, $t:ty;)*) => {
        $(
            impl<F: GeoFloat> Relate<F, $t> for $k {
                fn relate(&self, other: &$t) -> Result<IntersectionMatrix, Error> {
                    GeometryCow::from(self).relate(&GeometryCow::from(other))
                }

                fn relate_with_rule(
                    &self,
                    other: &$t,
                    boundary_node_rule: BoundaryNodeRule,
                ) -> Result<IntersectionMatrix, Error> {
                    GeometryCow::from(self)
                        .relate_with_rule(&GeometryCow::from(other), boundary_node_rule)
                }
            }
        )*
    };
}

/// Call the given macro with every pair of inputs.
macro_rules! cartesian_pairs {
    ($macro_name:ident, [$($a:ty),*]) => {
        cartesian_pairs_helper! { [] [$($a,)*] [$($a,)*] [$($a,)*] $macro_name}
    };
}

macro_rules! cartesian_pairs_helper {
    // popped all a's - we're done. Use the accumulated output as the input
    // to the relate macro.
    ([$($out_pairs:tt)*] [] [$($b:ty,)*] $init_b:tt $macro_name:ident) => {
        $macro_name!{$($out_pairs)*}
    };
    // finished one loop of b, pop next a and reset b
    ($out_pairs:tt [$a_car:ty, $($a_cdr:ty,)*] [] $init_b:tt $macro_name:ident) => {
        cartesian_pairs_helper!{$out_pairs [$($a_cdr,)*] $init_b $init_b $macro_name}
    };
    // pop b through all of b with head of a
    ([$($out_pairs:tt)*] [$a_car:ty, $($a_cdr:ty,)*] [$b_car:ty, $($b_cdr:ty,)*] $init_b:tt $macro_name:ident) => {
        cartesian_pairs_helper!{[$($out_pairs)* $a_car, $b_car;] [$a_car, $($a_cdr,)*] [$($b_cdr,)*] $init_b $macro_name}
    };
}

// Implement `Relate` for every combination of concrete geometry types.
cartesian_pairs!(relate_impl, [Point<F>, LineString<F>, Polygon<F>, MultiPoint<F>, MultiLineString<F>, MultiPolygon<F>, GeometryCollection<F>]);
relate_impl!(Geometry<F>, Geometry<F>;);

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;
    use std::str::FromStr;

    #[test]
    fn line_boundary_rules_differ() {
        // a closed triangle-ish line and a dangling line starting at the
        // triangle's start/end point
        let ring_line = wkt! { LINESTRING(0.0 0.0,10.0 0.0,10.0 10.0,0.0 0.0) };
        let tail = wkt! { LINESTRING(0.0 0.0,0.0 -10.0) };

        let mod2 = ring_line
            .relate_with_rule(&tail, BoundaryNodeRule::Mod2)
            .unwrap();
        // under mod-2 a closed line has no boundary, so the contact at
        // (0, 0) is interior/boundary
        assert_eq!(mod2, IntersectionMatrix::from_str("F01FFF102").unwrap());

        let endpoint = ring_line
            .relate_with_rule(&tail, BoundaryNodeRule::EndPoint)
            .unwrap();
        // under the endpoint rule the closed line's start point is boundary
        assert_eq!(endpoint, IntersectionMatrix::from_str("FF1F0F102").unwrap());
    }

    #[test]
    fn point_in_polygon() {
        let square = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) };
        let inner = wkt! { POINT(5.0 5.0) };
        let im = square.relate(&inner).unwrap();
        assert!(im.is_contains());
        assert!(!im.is_touches());

        let on_boundary = wkt! { POINT(10.0 5.0) };
        let im = square.relate(&on_boundary).unwrap();
        assert!(im.is_touches());
        assert!(!im.is_contains());
        assert!(im.is_covers());
    }

    #[test]
    fn crossing_lines() {
        let a = wkt! { LINESTRING(0.0 0.0,10.0 10.0) };
        let b = wkt! { LINESTRING(0.0 10.0,10.0 0.0) };
        let im = a.relate(&b).unwrap();
        assert_eq!(im, IntersectionMatrix::from_str("0F1FF0102").unwrap());
    }
}
