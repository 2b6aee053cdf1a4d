use crate::algorithm::coordinate_position::CoordPos;
use crate::algorithm::dimensions::Dimensions;
use crate::Error;

use std::str::FromStr;

/// Models a *Dimensionally Extended Nine-Intersection Model (DE-9IM)*
/// matrix.
///
/// DE-9IM matrix values (such as "212FF1FF2") specify the topological
/// relationship between two geometries: a 3x3 matrix of the dimensions of
/// the intersections between the Interior, Boundary and Exterior of each
/// geometry, in that order.
///
/// For the matrix semantics and the named predicates derived from it, see
/// OGC 06-103r4 "Simple feature access, Part 1" section 6.1.15 and the OGC
/// 99-049 SFS § 2.1.13.
#[derive(PartialEq, Eq, Clone)]
pub struct IntersectionMatrix(LocationArray<LocationArray<Dimensions>>);

/// Helper struct so the matrix can be indexed by `CoordPos`, preserving the
/// conventional Interior/Boundary/Exterior element ordering for
/// debug output and interop.
#[derive(PartialEq, Eq, Clone, Copy)]
struct LocationArray<T>([T; 3]);

impl<T> LocationArray<T> {
    fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T> std::ops::Index<CoordPos> for LocationArray<T> {
    type Output = T;

    fn index(&self, index: CoordPos) -> &Self::Output {
        match index {
            CoordPos::Inside => &self.0[0],
            CoordPos::OnBoundary => &self.0[1],
            CoordPos::Outside => &self.0[2],
        }
    }
}

impl<T> std::ops::IndexMut<CoordPos> for LocationArray<T> {
    fn index_mut(&mut self, index: CoordPos) -> &mut Self::Output {
        match index {
            CoordPos::Inside => &mut self.0[0],
            CoordPos::OnBoundary => &mut self.0[1],
            CoordPos::Outside => &mut self.0[2],
        }
    }
}

impl std::fmt::Debug for IntersectionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn char_for_dim(dim: &Dimensions) -> &'static str {
            match dim {
                Dimensions::Empty => "F",
                Dimensions::ZeroDimensional => "0",
                Dimensions::OneDimensional => "1",
                Dimensions::TwoDimensional => "2",
            }
        }
        let text = self
            .0
            .iter()
            .flat_map(|r| r.iter().map(char_for_dim))
            .collect::<Vec<&str>>()
            .join("");

        write!(f, "IntersectionMatrix({})", &text)
    }
}

const POSITIONS: [CoordPos; 3] = [CoordPos::Inside, CoordPos::OnBoundary, CoordPos::Outside];

impl IntersectionMatrix {
    pub fn empty() -> Self {
        IntersectionMatrix(LocationArray([LocationArray([Dimensions::Empty; 3]); 3]))
    }

    pub(crate) fn set(&mut self, position_a: CoordPos, position_b: CoordPos, dimensions: Dimensions) {
        self.0[position_a][position_b] = dimensions;
    }

    /// Report an incident of `minimum_dimensions`, updating the element if
    /// it is greater than what has been reported so far.
    pub(crate) fn set_at_least(
        &mut self,
        position_a: CoordPos,
        position_b: CoordPos,
        minimum_dimensions: Dimensions,
    ) {
        if self.0[position_a][position_b] < minimum_dimensions {
            self.0[position_a][position_b] = minimum_dimensions;
        }
    }

    /// If both positions are `Some`, raise the element to at least
    /// `minimum_dimensions`; otherwise do nothing.
    pub(crate) fn set_at_least_if_in_both(
        &mut self,
        position_a: Option<CoordPos>,
        position_b: Option<CoordPos>,
        minimum_dimensions: Dimensions,
    ) {
        if let (Some(position_a), Some(position_b)) = (position_a, position_b) {
            self.set_at_least(position_a, position_b, minimum_dimensions);
        }
    }

    pub(crate) fn set_at_least_from_string(&mut self, dimensions: &str) -> Result<(), Error> {
        if dimensions.len() != 9 {
            return Err(Error::invalid(format!(
                "expected a DE-9IM string of length 9, found: {}",
                dimensions.len()
            )));
        }

        let mut chars = dimensions.chars();
        for a in &POSITIONS {
            for b in &POSITIONS {
                match chars.next().expect("already validated length is 9") {
                    '0' => self.0[*a][*b] = self.0[*a][*b].max(Dimensions::ZeroDimensional),
                    '1' => self.0[*a][*b] = self.0[*a][*b].max(Dimensions::OneDimensional),
                    '2' => self.0[*a][*b] = self.0[*a][*b].max(Dimensions::TwoDimensional),
                    'F' => {}
                    other => {
                        return Err(Error::invalid(format!(
                            "expected '0', '1', '2', or 'F'. Found: {other}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, position_a: CoordPos, position_b: CoordPos) -> Dimensions {
        self.0[position_a][position_b]
    }

    /// Does this matrix match the DE-9IM `pattern`?
    ///
    /// Pattern symbols: `T` (non-empty), `F` (empty), `*` (don't care),
    /// `0`/`1`/`2` (exact dimension).
    pub fn matches(&self, pattern: &str) -> Result<bool, Error> {
        if pattern.len() != 9 {
            return Err(Error::invalid(format!(
                "a DE-9IM pattern must have 9 symbols, got: {pattern}"
            )));
        }
        let mut symbols = pattern.chars();
        for a in &POSITIONS {
            for b in &POSITIONS {
                let dim = self.0[*a][*b];
                let matched = match symbols.next().expect("validated length") {
                    'T' | 't' => dim != Dimensions::Empty,
                    'F' | 'f' => dim == Dimensions::Empty,
                    '*' => true,
                    '0' => dim == Dimensions::ZeroDimensional,
                    '1' => dim == Dimensions::OneDimensional,
                    '2' => dim == Dimensions::TwoDimensional,
                    other => {
                        return Err(Error::invalid(format!(
                            "invalid DE-9IM pattern symbol: {other}"
                        )))
                    }
                };
                if !matched {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn ii(&self) -> Dimensions {
        self.0[CoordPos::Inside][CoordPos::Inside]
    }

    /// The geometries have no points in common.
    pub fn is_disjoint(&self) -> bool {
        self.ii() == Dimensions::Empty
            && self.0[CoordPos::Inside][CoordPos::OnBoundary] == Dimensions::Empty
            && self.0[CoordPos::OnBoundary][CoordPos::Inside] == Dimensions::Empty
            && self.0[CoordPos::OnBoundary][CoordPos::OnBoundary] == Dimensions::Empty
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// Every point of B lies in A, and the interiors meet.
    pub fn is_contains(&self) -> bool {
        self.ii() != Dimensions::Empty
            && self.0[CoordPos::Outside][CoordPos::Inside] == Dimensions::Empty
            && self.0[CoordPos::Outside][CoordPos::OnBoundary] == Dimensions::Empty
    }

    pub fn is_within(&self) -> bool {
        self.ii() != Dimensions::Empty
            && self.0[CoordPos::Inside][CoordPos::Outside] == Dimensions::Empty
            && self.0[CoordPos::OnBoundary][CoordPos::Outside] == Dimensions::Empty
    }

    /// Like `contains`, but allowing B to touch only A's boundary.
    pub fn is_covers(&self) -> bool {
        let touches_somewhere = self.ii() != Dimensions::Empty
            || self.0[CoordPos::Inside][CoordPos::OnBoundary] != Dimensions::Empty
            || self.0[CoordPos::OnBoundary][CoordPos::Inside] != Dimensions::Empty
            || self.0[CoordPos::OnBoundary][CoordPos::OnBoundary] != Dimensions::Empty;
        touches_somewhere
            && self.0[CoordPos::Outside][CoordPos::Inside] == Dimensions::Empty
            && self.0[CoordPos::Outside][CoordPos::OnBoundary] == Dimensions::Empty
    }

    pub fn is_covered_by(&self) -> bool {
        let touches_somewhere = self.ii() != Dimensions::Empty
            || self.0[CoordPos::Inside][CoordPos::OnBoundary] != Dimensions::Empty
            || self.0[CoordPos::OnBoundary][CoordPos::Inside] != Dimensions::Empty
            || self.0[CoordPos::OnBoundary][CoordPos::OnBoundary] != Dimensions::Empty;
        touches_somewhere
            && self.0[CoordPos::Inside][CoordPos::Outside] == Dimensions::Empty
            && self.0[CoordPos::OnBoundary][CoordPos::Outside] == Dimensions::Empty
    }

    /// The geometries are topologically equal: each lies in the other.
    pub fn is_equal_topo(&self) -> bool {
        self.ii() != Dimensions::Empty
            && self.0[CoordPos::Inside][CoordPos::Outside] == Dimensions::Empty
            && self.0[CoordPos::Outside][CoordPos::Inside] == Dimensions::Empty
            && self.0[CoordPos::OnBoundary][CoordPos::Outside] == Dimensions::Empty
            && self.0[CoordPos::Outside][CoordPos::OnBoundary] == Dimensions::Empty
    }

    /// The geometries touch in boundary points only.
    pub fn is_touches(&self) -> bool {
        self.ii() == Dimensions::Empty
            && (self.0[CoordPos::Inside][CoordPos::OnBoundary] != Dimensions::Empty
                || self.0[CoordPos::OnBoundary][CoordPos::Inside] != Dimensions::Empty
                || self.0[CoordPos::OnBoundary][CoordPos::OnBoundary] != Dimensions::Empty)
    }

    /// Whether the interiors cross, for the given operand dimensions.
    pub fn is_crosses(&self, dimension_a: Dimensions, dimension_b: Dimensions) -> bool {
        match (dimension_a, dimension_b) {
            (Dimensions::ZeroDimensional, Dimensions::OneDimensional)
            | (Dimensions::ZeroDimensional, Dimensions::TwoDimensional)
            | (Dimensions::OneDimensional, Dimensions::TwoDimensional) => {
                self.ii() != Dimensions::Empty
                    && self.0[CoordPos::Inside][CoordPos::Outside] != Dimensions::Empty
            }
            (Dimensions::OneDimensional, Dimensions::ZeroDimensional)
            | (Dimensions::TwoDimensional, Dimensions::ZeroDimensional)
            | (Dimensions::TwoDimensional, Dimensions::OneDimensional) => {
                self.ii() != Dimensions::Empty
                    && self.0[CoordPos::Outside][CoordPos::Inside] != Dimensions::Empty
            }
            (Dimensions::OneDimensional, Dimensions::OneDimensional) => {
                self.ii() == Dimensions::ZeroDimensional
            }
            _ => false,
        }
    }

    /// Whether the geometries overlap, for the given operand dimensions.
    pub fn is_overlaps(&self, dimension_a: Dimensions, dimension_b: Dimensions) -> bool {
        match (dimension_a, dimension_b) {
            (Dimensions::ZeroDimensional, Dimensions::ZeroDimensional)
            | (Dimensions::TwoDimensional, Dimensions::TwoDimensional) => {
                self.ii() != Dimensions::Empty
                    && self.0[CoordPos::Inside][CoordPos::Outside] != Dimensions::Empty
                    && self.0[CoordPos::Outside][CoordPos::Inside] != Dimensions::Empty
            }
            (Dimensions::OneDimensional, Dimensions::OneDimensional) => {
                self.ii() == Dimensions::OneDimensional
                    && self.0[CoordPos::Inside][CoordPos::Outside] != Dimensions::Empty
                    && self.0[CoordPos::Outside][CoordPos::Inside] != Dimensions::Empty
            }
            _ => false,
        }
    }
}

impl FromStr for IntersectionMatrix {
    type Err = Error;

    fn from_str(str: &str) -> Result<Self, Self::Err> {
        let mut im = IntersectionMatrix::empty();
        im.set_at_least_from_string(str)?;
        Ok(im)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matrix_round_trips_through_debug() {
        let im = IntersectionMatrix::from_str("212101212").unwrap();
        assert_eq!(format!("{im:?}"), "IntersectionMatrix(212101212)");
    }

    #[test]
    fn predicate_helpers() {
        let contains = IntersectionMatrix::from_str("212FF1FF2").unwrap();
        assert!(contains.is_contains());
        assert!(contains.is_covers());
        assert!(contains.is_intersects());
        assert!(!contains.is_within());
        assert!(!contains.is_disjoint());

        let disjoint = IntersectionMatrix::from_str("FF2FF1212").unwrap();
        assert!(disjoint.is_disjoint());
        assert!(!disjoint.is_intersects());

        let touches = IntersectionMatrix::from_str("FF2F11212").unwrap();
        assert!(touches.is_touches());
        assert!(touches.is_intersects());
    }

    #[test]
    fn pattern_matching() {
        let im = IntersectionMatrix::from_str("212101212").unwrap();
        assert!(im.matches("T*T***T**").unwrap());
        assert!(im.matches("212101212").unwrap());
        assert!(!im.matches("FF*******").unwrap());
        assert!(im.matches("*********").unwrap());
        assert!(im.matches("TTTTTTTTT").unwrap());
        assert!(im.matches("bogus").is_err());
    }
}
