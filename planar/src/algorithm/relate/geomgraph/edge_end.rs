use super::{Label, Quadrant};
use crate::algorithm::kernels::{HasKernel, Kernel, Orientation};
use crate::{Coord, GeoFloat};

use std::fmt;

/// The end of an edge incident on a node.
///
/// An edge end has a direction determined by the ray from its initial
/// coordinate towards the next coordinate of its parent edge. Edge ends are
/// comparable by their [`EdgeEndKey`], under the ordering "a makes a
/// greater angle with the positive x-axis than b". The comparison is by
/// quadrant first, refined by the robust orientation predicate, so it never
/// computes an actual angle. This ordering sorts the ends counter-clockwise
/// around their node.
#[derive(Clone, Debug)]
pub(crate) struct EdgeEnd<F>
where
    F: GeoFloat,
{
    label: Label,
    key: EdgeEndKey<F>,
}

#[derive(Clone)]
pub(crate) struct EdgeEndKey<F>
where
    F: GeoFloat,
{
    coord_0: Coord<F>,
    coord_1: Coord<F>,
    delta: Coord<F>,
    quadrant: Option<Quadrant>,
}

impl<F: GeoFloat> fmt::Debug for EdgeEndKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeEndKey")
            .field(
                "coords",
                &format!("{:?} -> {:?}", &self.coord_0, &self.coord_1),
            )
            .field("quadrant", &self.quadrant)
            .finish()
    }
}

impl<F> EdgeEnd<F>
where
    F: GeoFloat,
{
    pub fn new(coord_0: Coord<F>, coord_1: Coord<F>, label: Label) -> EdgeEnd<F> {
        let delta = coord_1 - coord_0;
        let quadrant = Quadrant::new(delta.x, delta.y);
        EdgeEnd {
            label,
            key: EdgeEndKey {
                coord_0,
                coord_1,
                delta,
                quadrant,
            },
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn coordinate(&self) -> &Coord<F> {
        &self.key.coord_0
    }

    pub fn key(&self) -> &EdgeEndKey<F> {
        &self.key
    }
}

impl<F> std::cmp::Eq for EdgeEndKey<F> where F: GeoFloat {}

impl<F> std::cmp::PartialEq for EdgeEndKey<F>
where
    F: GeoFloat,
{
    fn eq(&self, other: &EdgeEndKey<F>) -> bool {
        self.delta == other.delta
    }
}

impl<F> std::cmp::PartialOrd for EdgeEndKey<F>
where
    F: GeoFloat,
{
    fn partial_cmp(&self, other: &EdgeEndKey<F>) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<F> std::cmp::Ord for EdgeEndKey<F>
where
    F: GeoFloat,
{
    fn cmp(&self, other: &EdgeEndKey<F>) -> std::cmp::Ordering {
        self.compare_direction(other)
    }
}

impl<F> EdgeEndKey<F>
where
    F: GeoFloat,
{
    pub(crate) fn compare_direction(&self, other: &EdgeEndKey<F>) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        if self.delta == other.delta {
            return Ordering::Equal;
        }

        match (self.quadrant, other.quadrant) {
            (Some(q1), Some(q2)) if q1 > q2 => Ordering::Greater,
            (Some(q1), Some(q2)) if q1 < q2 => Ordering::Less,
            _ => {
                // same quadrant: the robust orientation of the two rays
                // decides
                match F::Ker::orient2d(other.coord_0, other.coord_1, self.coord_1) {
                    Orientation::Clockwise => Ordering::Less,
                    Orientation::CounterClockwise => Ordering::Greater,
                    Orientation::Collinear => Ordering::Equal,
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;

    #[test]
    fn ordering_is_ccw_from_positive_x() {
        let fake_label = Label::empty_line_or_point();
        let east = EdgeEnd::new(
            Coord::zero(),
            coord! { x: 1.0, y: 0.0 },
            fake_label.clone(),
        );
        let north_east = EdgeEnd::new(
            Coord::zero(),
            coord! { x: 1.0, y: 1.0 },
            fake_label.clone(),
        );
        let south_east = EdgeEnd::new(
            Coord::zero(),
            coord! { x: 1.0, y: -1.0 },
            fake_label.clone(),
        );

        assert!(east.key() < north_east.key());
        assert!(north_east.key() < south_east.key());
        assert_eq!(
            north_east.key().cmp(north_east.key()),
            std::cmp::Ordering::Equal
        );
    }
}
