use crate::algorithm::boundary_node_rule::BoundaryNodeRule;
use crate::algorithm::dimensions::HasDimensions;
use crate::algorithm::relate::{IntersectionMatrix, Relate};
use crate::{Error, GeoFloat};

/// The named spatial predicates, all derived from the DE-9IM intersection
/// matrix of the two geometries.
///
/// Every predicate runs a full relate computation; use a
/// [`PreparedGeometry`](crate::prepared::PreparedGeometry) when testing one
/// geometry against many others.
pub trait SpatialPredicates<F: GeoFloat, Rhs = Self> {
    fn relate_matrix(&self, other: &Rhs) -> Result<IntersectionMatrix, Error>;

    /// The geometries share at least one point.
    fn intersects(&self, other: &Rhs) -> Result<bool, Error> {
        Ok(self.relate_matrix(other)?.is_intersects())
    }

    /// The geometries share no point.
    fn disjoint(&self, other: &Rhs) -> Result<bool, Error> {
        Ok(self.relate_matrix(other)?.is_disjoint())
    }

    /// Every point of `other` is a point of `self`, and their interiors
    /// intersect.
    fn contains(&self, other: &Rhs) -> Result<bool, Error> {
        Ok(self.relate_matrix(other)?.is_contains())
    }

    fn within(&self, other: &Rhs) -> Result<bool, Error> {
        Ok(self.relate_matrix(other)?.is_within())
    }

    /// Every point of `other` is a point of `self` (boundary contact
    /// allowed).
    fn covers(&self, other: &Rhs) -> Result<bool, Error> {
        Ok(self.relate_matrix(other)?.is_covers())
    }

    fn covered_by(&self, other: &Rhs) -> Result<bool, Error> {
        Ok(self.relate_matrix(other)?.is_covered_by())
    }

    /// The geometries touch on their boundaries but their interiors are
    /// disjoint.
    fn touches(&self, other: &Rhs) -> Result<bool, Error> {
        Ok(self.relate_matrix(other)?.is_touches())
    }

    /// The geometries are topologically equal.
    fn equals_topo(&self, other: &Rhs) -> Result<bool, Error> {
        Ok(self.relate_matrix(other)?.is_equal_topo())
    }

    /// The relationship matches an explicit DE-9IM `pattern` such as
    /// `"T*T***T**"`.
    fn relate_pattern(&self, other: &Rhs, pattern: &str) -> Result<bool, Error> {
        self.relate_matrix(other)?.matches(pattern)
    }

    fn crosses(&self, other: &Rhs) -> Result<bool, Error>;
    fn overlaps(&self, other: &Rhs) -> Result<bool, Error>;
}

impl<F, A, B> SpatialPredicates<F, B> for A
where
    F: GeoFloat,
    A: Relate<F, B> + HasDimensions,
    B: HasDimensions,
{
    fn relate_matrix(&self, other: &B) -> Result<IntersectionMatrix, Error> {
        self.relate_with_rule(other, BoundaryNodeRule::Mod2)
    }

    fn crosses(&self, other: &B) -> Result<bool, Error> {
        let im = self.relate_matrix(other)?;
        Ok(im.is_crosses(self.dimensions(), other.dimensions()))
    }

    fn overlaps(&self, other: &B) -> Result<bool, Error> {
        let im = self.relate_matrix(other)?;
        Ok(im.is_overlaps(self.dimensions(), other.dimensions()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn polygon_predicates() {
        let outer = wkt! { POLYGON((0.0 0.0,20.0 0.0,20.0 20.0,0.0 20.0,0.0 0.0)) };
        let inner = wkt! { POLYGON((5.0 5.0,10.0 5.0,10.0 10.0,5.0 10.0,5.0 5.0)) };
        let overlapping = wkt! { POLYGON((10.0 10.0,30.0 10.0,30.0 30.0,10.0 30.0,10.0 10.0)) };

        assert!(outer.contains(&inner).unwrap());
        assert!(inner.within(&outer).unwrap());
        assert!(outer.covers(&inner).unwrap());
        assert!(!outer.contains(&overlapping).unwrap());
        assert!(outer.overlaps(&overlapping).unwrap());
        assert!(outer.intersects(&overlapping).unwrap());
        assert!(!outer.disjoint(&overlapping).unwrap());
    }

    #[test]
    fn line_crosses_polygon() {
        let square = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) };
        let line = wkt! { LINESTRING(-5.0 5.0,15.0 5.0) };
        assert!(line.crosses(&square).unwrap());
        assert!(!line.touches(&square).unwrap());
    }

    #[test]
    fn relate_pattern() {
        let a = wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) };
        let b = wkt! { POLYGON((5.0 5.0,7.0 5.0,7.0 7.0,5.0 7.0,5.0 5.0)) };
        assert!(a.relate_pattern(&b, "T*****FF*").unwrap());
    }
}
