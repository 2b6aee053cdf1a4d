use crate::{Coord, CoordNum, Error};

/// The shape of a coordinate: which optional ordinates (Z elevation, M
/// measure) accompany the mandatory X/Y pair.
///
/// Shapes form a lattice: `Xy < {Xyz, Xym} < Xyzm`. [`Dims::join`] is the
/// least upper bound used when combining sequences (mixing Z-only and M-only
/// promotes to `Xyzm`); [`Dims::meet`] is the greatest lower bound used for
/// overlay output shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dims {
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl Default for Dims {
    fn default() -> Self {
        Dims::Xy
    }
}

impl Dims {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Dims::Xy,
            (true, false) => Dims::Xyz,
            (false, true) => Dims::Xym,
            (true, true) => Dims::Xyzm,
        }
    }

    pub fn has_z(&self) -> bool {
        matches!(self, Dims::Xyz | Dims::Xyzm)
    }

    pub fn has_m(&self) -> bool {
        matches!(self, Dims::Xym | Dims::Xyzm)
    }

    /// Number of ordinates per coordinate.
    pub fn size(&self) -> usize {
        2 + usize::from(self.has_z()) + usize::from(self.has_m())
    }

    /// Least upper bound of the two shapes.
    pub fn join(self, other: Dims) -> Dims {
        Dims::new(
            self.has_z() || other.has_z(),
            self.has_m() || other.has_m(),
        )
    }

    /// Greatest lower bound of the two shapes.
    pub fn meet(self, other: Dims) -> Dims {
        Dims::new(
            self.has_z() && other.has_z(),
            self.has_m() && other.has_m(),
        )
    }
}

/// An ordered, random-access container of coordinates sharing one [`Dims`]
/// shape.
///
/// X/Y pairs are packed in a `Vec<Coord>` so that algorithm code can borrow a
/// plain `&[Coord]`; Z and M ride as parallel side payloads which are always
/// the same length as the XY vector. `NaN` in a payload slot denotes an
/// absent ordinate value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordSeq<T: CoordNum = f64> {
    coords: Vec<Coord<T>>,
    z: Option<Vec<T>>,
    m: Option<Vec<T>>,
}

impl<T: CoordNum> Default for CoordSeq<T> {
    fn default() -> Self {
        CoordSeq {
            coords: Vec::new(),
            z: None,
            m: None,
        }
    }
}

impl<T: CoordNum> From<Vec<Coord<T>>> for CoordSeq<T> {
    fn from(coords: Vec<Coord<T>>) -> Self {
        CoordSeq::new(coords)
    }
}

impl<T: CoordNum> FromIterator<Coord<T>> for CoordSeq<T> {
    fn from_iter<I: IntoIterator<Item = Coord<T>>>(iter: I) -> Self {
        CoordSeq::new(iter.into_iter().collect())
    }
}

impl<T: CoordNum> CoordSeq<T> {
    /// An XY sequence over `coords`.
    pub fn new(coords: Vec<Coord<T>>) -> Self {
        CoordSeq {
            coords,
            z: None,
            m: None,
        }
    }

    /// An empty sequence of the given shape.
    pub fn with_dims(dims: Dims) -> Self {
        CoordSeq {
            coords: Vec::new(),
            z: dims.has_z().then(Vec::new),
            m: dims.has_m().then(Vec::new),
        }
    }

    /// Assemble a sequence from XY coords plus optional Z/M payloads.
    ///
    /// Present payloads must match the XY length.
    pub fn from_parts(
        coords: Vec<Coord<T>>,
        z: Option<Vec<T>>,
        m: Option<Vec<T>>,
    ) -> Result<Self, Error> {
        for (name, payload) in [("Z", &z), ("M", &m)] {
            if let Some(payload) = payload {
                if payload.len() != coords.len() {
                    return Err(Error::invalid(format!(
                        "{} payload length {} does not match coordinate count {}",
                        name,
                        payload.len(),
                        coords.len()
                    )));
                }
            }
        }
        Ok(CoordSeq { coords, z, m })
    }

    pub fn dims(&self) -> Dims {
        Dims::new(self.z.is_some(), self.m.is_some())
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn coord(&self, i: usize) -> Coord<T> {
        self.coords[i]
    }

    pub fn coords(&self) -> &[Coord<T>] {
        &self.coords
    }

    pub fn first(&self) -> Option<Coord<T>> {
        self.coords.first().copied()
    }

    pub fn last(&self) -> Option<Coord<T>> {
        self.coords.last().copied()
    }

    pub fn z(&self, i: usize) -> Option<T> {
        self.z.as_ref().map(|z| z[i])
    }

    pub fn m(&self, i: usize) -> Option<T> {
        self.m.as_ref().map(|m| m[i])
    }

    pub fn z_slice(&self) -> Option<&[T]> {
        self.z.as_deref()
    }

    pub fn m_slice(&self) -> Option<&[T]> {
        self.m.as_deref()
    }

    pub fn set_coord(&mut self, i: usize, coord: Coord<T>) {
        self.coords[i] = coord;
    }

    pub fn set_z(&mut self, i: usize, value: T) {
        if let Some(z) = self.z.as_mut() {
            z[i] = value;
        }
    }

    pub fn set_m(&mut self, i: usize, value: T) {
        if let Some(m) = self.m.as_mut() {
            m[i] = value;
        }
    }

    /// Append a coordinate. For shapes with payloads, the matching Z/M values
    /// must be supplied; a missing value is filled with `T::zero()`.
    pub fn push(&mut self, coord: Coord<T>) {
        self.push_with(coord, None, None)
    }

    pub fn push_with(&mut self, coord: Coord<T>, z: Option<T>, m: Option<T>) {
        self.coords.push(coord);
        if let Some(zs) = self.z.as_mut() {
            zs.push(z.unwrap_or_else(T::zero));
        }
        if let Some(ms) = self.m.as_mut() {
            ms.push(m.unwrap_or_else(T::zero));
        }
    }

    /// `true` when the sequence starts and ends on the same X/Y position.
    /// The empty sequence counts as closed.
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(first), Some(last)) => first == last,
            _ => true,
        }
    }

    /// Close the sequence by re-appending the first coordinate (with its
    /// payloads) if first != last.
    pub fn close(&mut self) {
        if !self.is_closed() {
            let first = self.coords[0];
            let z = self.z(0);
            let m = self.m(0);
            self.push_with(first, z, m);
        }
    }

    pub fn reversed(&self) -> Self {
        let mut coords = self.coords.clone();
        coords.reverse();
        let rev = |payload: &Option<Vec<T>>| {
            payload.as_ref().map(|p| {
                let mut p = p.clone();
                p.reverse();
                p
            })
        };
        CoordSeq {
            coords,
            z: rev(&self.z),
            m: rev(&self.m),
        }
    }

    /// Apply `f` to every XY pair in place. Z/M payloads are untouched.
    ///
    /// This is the filter/visitor entry point used by precision snapping and
    /// the coordinate-mapping surface.
    pub fn apply_coords(&mut self, mut f: impl FnMut(Coord<T>) -> Coord<T>) {
        for coord in self.coords.iter_mut() {
            *coord = f(*coord);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord<T>> + '_ {
        self.coords.iter().copied()
    }

    /// `true` when every X/Y ordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(Coord::is_finite)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn dims_lattice() {
        use Dims::*;
        for dims in [Xy, Xyz, Xym, Xyzm] {
            assert_eq!(dims.join(dims), dims);
            assert_eq!(dims.meet(dims), dims);
            assert_eq!(dims.join(Xy), dims);
            assert_eq!(dims.meet(Xyzm), dims);
        }
        assert_eq!(Xyz.join(Xym), Xyzm);
        assert_eq!(Xyz.meet(Xym), Xy);
        assert_eq!(Xyz.join(Xym), Xym.join(Xyz));
    }

    #[test]
    fn payload_length_mismatch_is_rejected() {
        let coords = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }];
        assert!(CoordSeq::from_parts(coords.clone(), Some(vec![1.0]), None).is_err());
        assert!(CoordSeq::from_parts(coords, Some(vec![1.0, 2.0]), None).is_ok());
    }

    #[test]
    fn close_copies_payloads() {
        let mut seq = CoordSeq::from_parts(
            vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 1.0, y: 0.0 },
                coord! { x: 0.0, y: 1.0 },
            ],
            Some(vec![5.0, 6.0, 7.0]),
            None,
        )
        .unwrap();
        assert!(!seq.is_closed());
        seq.close();
        assert!(seq.is_closed());
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.z(3), Some(5.0));
    }

    #[test]
    fn reversed_keeps_payload_alignment() {
        let seq = CoordSeq::from_parts(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }],
            Some(vec![10.0, 20.0]),
            None,
        )
        .unwrap();
        let rev = seq.reversed();
        assert_eq!(rev.coord(0), coord! { x: 1.0, y: 0.0 });
        assert_eq!(rev.z(0), Some(20.0));
        assert_eq!(rev.z(1), Some(10.0));
    }
}
