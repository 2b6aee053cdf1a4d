use crate::{coord, CoordNum};

#[cfg(any(feature = "approx", test))]
use approx::{AbsDiffEq, RelativeEq};

/// A lightweight X/Y pair on the 2-dimensional Cartesian plane.
///
/// Unlike the geometry variants, a `Coord` carries no precision model, SRID
/// or envelope; it only holds ordinate values. Equality is bit-equality on
/// (x, y). Z and M ordinates are not stored here; they ride as side payloads
/// on [`CoordSeq`](crate::CoordSeq).
///
/// This type implements the vector space operations [`Add`], [`Sub`],
/// [`Neg`], [`Mul<T>`][`Mul`] and [`Div<T>`][`Div`].
#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord<T: CoordNum = f64> {
    pub x: T,
    pub y: T,
}

impl<T: CoordNum> From<(T, T)> for Coord<T> {
    #[inline]
    fn from(coords: (T, T)) -> Self {
        coord! { x: coords.0, y: coords.1 }
    }
}

impl<T: CoordNum> From<[T; 2]> for Coord<T> {
    #[inline]
    fn from(coords: [T; 2]) -> Self {
        coord! { x: coords[0], y: coords[1] }
    }
}

impl<T: CoordNum> From<Coord<T>> for (T, T) {
    #[inline]
    fn from(coord: Coord<T>) -> Self {
        (coord.x, coord.y)
    }
}

impl<T: CoordNum> Coord<T> {
    #[inline]
    pub fn x_y(&self) -> (T, T) {
        (self.x, self.y)
    }

    #[inline]
    pub fn zero() -> Self {
        coord! { x: T::zero(), y: T::zero() }
    }

    /// `true` when both ordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        let finite = |v: T| v.to_f64().map(f64::is_finite).unwrap_or(false);
        finite(self.x) && finite(self.y)
    }
}

use core::ops::{Add, Div, Mul, Neg, Sub};

impl<T> Neg for Coord<T>
where
    T: CoordNum + Neg<Output = T>,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        coord! { x: -self.x, y: -self.y }
    }
}

impl<T: CoordNum> Add for Coord<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        coord! { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl<T: CoordNum> Sub for Coord<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        coord! { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl<T: CoordNum> Mul<T> for Coord<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        coord! { x: self.x * rhs, y: self.y * rhs }
    }
}

impl<T: CoordNum> Div<T> for Coord<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        coord! { x: self.x / rhs, y: self.y / rhs }
    }
}

#[cfg(any(feature = "approx", test))]
impl<T: CoordNum + AbsDiffEq<Epsilon = T>> AbsDiffEq for Coord<T> {
    type Epsilon = T;

    #[inline]
    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        T::abs_diff_eq(&self.x, &other.x, epsilon) && T::abs_diff_eq(&self.y, &other.y, epsilon)
    }
}

#[cfg(any(feature = "approx", test))]
impl<T: CoordNum + RelativeEq<Epsilon = T>> RelativeEq for Coord<T> {
    #[inline]
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    #[inline]
    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        T::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && T::relative_eq(&self.y, &other.y, epsilon, max_relative)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vector_ops() {
        let p = coord! { x: 1.25, y: 2.5 };
        let q = coord! { x: 1.5, y: 2.5 };
        assert_eq!(p + q, coord! { x: 2.75, y: 5.0 });
        assert_eq!(q - p, coord! { x: 0.25, y: 0.0 });
        assert_eq!(p * 2.0, coord! { x: 2.5, y: 5.0 });
        assert_eq!(-p, coord! { x: -1.25, y: -2.5 });
    }

    #[test]
    fn finite() {
        assert!(coord! { x: 0.0, y: 1.0 }.is_finite());
        assert!(!coord! { x: f64::NAN, y: 1.0 }.is_finite());
        assert!(!coord! { x: 0.0, y: f64::INFINITY }.is_finite());
    }
}
