use crate::envelope::EnvelopeCell;
use crate::{CoordNum, Dims, Error, GeomContext, LinearRing, Rect};

/// A bounded area: one exterior shell and zero or more interior holes, all
/// [`LinearRing`]s.
///
/// Construction enforces that a polygon with a non-empty hole has a
/// non-empty shell, and that all rings share one coordinate shape. The
/// canonical orientation (shell counter-clockwise, holes clockwise) is not
/// forced on construction; [`Polygon::orient`] produces the normalized form.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon<T: CoordNum = f64> {
    exterior: LinearRing<T>,
    interiors: Vec<LinearRing<T>>,
    ctx: GeomContext,
    #[cfg_attr(feature = "serde", serde(skip))]
    envelope: EnvelopeCell<T>,
}

impl<T: CoordNum> Polygon<T> {
    pub fn new(exterior: LinearRing<T>, interiors: Vec<LinearRing<T>>) -> Result<Self, Error> {
        if exterior.is_empty() && interiors.iter().any(|ring| !ring.is_empty()) {
            return Err(Error::invalid(
                "a Polygon with a non-empty hole needs a non-empty shell",
            ));
        }
        let dims = exterior.dims();
        if interiors.iter().any(|ring| ring.dims() != dims) {
            return Err(Error::invalid(
                "all rings of a Polygon must share one coordinate shape",
            ));
        }
        Ok(Polygon {
            exterior,
            interiors,
            ctx: GeomContext::default(),
            envelope: EnvelopeCell::new(),
        })
    }

    pub fn empty() -> Self {
        Polygon {
            exterior: LinearRing::empty(),
            interiors: Vec::new(),
            ctx: GeomContext::default(),
            envelope: EnvelopeCell::new(),
        }
    }

    pub(crate) fn set_ctx(&mut self, ctx: GeomContext) {
        self.ctx = ctx;
    }

    /// The same geometry re-stamped with `ctx`; used when a derived
    /// geometry inherits the context of its source.
    pub fn with_context(mut self, ctx: GeomContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn ctx(&self) -> &GeomContext {
        &self.ctx
    }

    pub fn exterior(&self) -> &LinearRing<T> {
        &self.exterior
    }

    pub fn interiors(&self) -> &[LinearRing<T>] {
        &self.interiors
    }

    /// All rings, shell first.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing<T>> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    pub fn into_inner(self) -> (LinearRing<T>, Vec<LinearRing<T>>) {
        (self.exterior, self.interiors)
    }

    pub fn dims(&self) -> Dims {
        self.exterior.dims()
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    pub fn envelope(&self) -> Option<Rect<T>> {
        self.envelope.get_or_compute(|| self.exterior.envelope())
    }

    /// The polygon with canonical ring orientation: shell counter-clockwise,
    /// holes clockwise (by signed area; exact ties stay as-is).
    pub fn orient(&self) -> Polygon<T> {
        let zero = T::zero();
        let exterior = if self.exterior.twice_signed_area() < zero {
            self.exterior.reversed()
        } else {
            self.exterior.clone()
        };
        let interiors = self
            .interiors
            .iter()
            .map(|ring| {
                if ring.twice_signed_area() > zero {
                    ring.reversed()
                } else {
                    ring.clone()
                }
            })
            .collect();
        let mut polygon =
            Polygon::new(exterior, interiors).expect("reorienting preserves validity");
        polygon.set_ctx(self.ctx);
        polygon
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    fn shell() -> LinearRing<f64> {
        LinearRing::from_coords(vec![
            coord! { x: 0., y: 0. },
            coord! { x: 10., y: 0. },
            coord! { x: 10., y: 10. },
            coord! { x: 0., y: 10. },
        ])
        .unwrap()
    }

    #[test]
    fn empty_shell_with_holes_is_rejected() {
        let hole = LinearRing::from_coords(vec![
            coord! { x: 1., y: 1. },
            coord! { x: 2., y: 1. },
            coord! { x: 2., y: 2. },
            coord! { x: 1., y: 2. },
        ])
        .unwrap();
        assert!(Polygon::new(LinearRing::empty(), vec![hole]).is_err());
        assert!(Polygon::<f64>::new(LinearRing::empty(), vec![]).is_ok());
    }

    #[test]
    fn orient_normalizes_ring_winding() {
        let cw_shell = shell().reversed();
        let ccw_hole = LinearRing::from_coords(vec![
            coord! { x: 2., y: 2. },
            coord! { x: 4., y: 2. },
            coord! { x: 4., y: 4. },
            coord! { x: 2., y: 4. },
        ])
        .unwrap();
        let polygon = Polygon::new(cw_shell, vec![ccw_hole]).unwrap().orient();
        assert!(polygon.exterior().twice_signed_area() > 0.0);
        assert!(polygon.interiors()[0].twice_signed_area() < 0.0);
    }

    #[test]
    fn envelope_is_the_shell_envelope() {
        let polygon = Polygon::new(shell(), vec![]).unwrap();
        assert_eq!(
            polygon.envelope(),
            Some(Rect::new(coord! { x: 0., y: 0. }, coord! { x: 10., y: 10. }))
        );
    }
}
