use crate::{Coord, CoordNum, Rect};

/// A single line segment between two coordinates.
///
/// `Line` is a working primitive for the kernel and the noder, not a
/// geometry variant: it carries no context or envelope cache of its own.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line<T: CoordNum = f64> {
    pub start: Coord<T>,
    pub end: Coord<T>,
}

impl<T: CoordNum> Line<T> {
    pub fn new<C: Into<Coord<T>>>(start: C, end: C) -> Self {
        Line {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn dx(&self) -> T {
        self.end.x - self.start.x
    }

    pub fn dy(&self) -> T {
        self.end.y - self.start.y
    }

    pub fn delta(&self) -> Coord<T> {
        self.end - self.start
    }

    pub fn reversed(&self) -> Line<T> {
        Line {
            start: self.end,
            end: self.start,
        }
    }

    pub fn envelope(&self) -> Rect<T> {
        Rect::new(self.start, self.end)
    }

    /// Squared Euclidean length.
    pub fn length_sq(&self) -> T {
        let d = self.delta();
        d.x * d.x + d.y * d.y
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn envelope_and_delta() {
        let line = Line::new(coord! { x: 3., y: 1. }, coord! { x: 0., y: 5. });
        assert_eq!(line.dx(), -3.0);
        assert_eq!(line.dy(), 4.0);
        assert_eq!(line.length_sq(), 25.0);
        assert_eq!(
            line.envelope(),
            Rect::new(coord! { x: 0., y: 1. }, coord! { x: 3., y: 5. })
        );
    }
}
