use crate::{coord, Coord, GeoFloat, Rect};

/// Clips polygon rings against an axis-aligned rectangle, one half-plane at
/// a time (the Sutherland-Hodgman discipline specialized to a box).
///
/// The clip box is chosen well clear of the other operand, so the synthetic
/// segments introduced along the box border can never participate in real
/// intersections; they only serve to keep coordinates bounded for the
/// noder.
pub(crate) struct RingClipper<F: GeoFloat> {
    env: Rect<F>,
}

#[derive(Clone, Copy)]
enum BoxEdge {
    Bottom,
    Right,
    Top,
    Left,
}

impl<F: GeoFloat> RingClipper<F> {
    pub fn new(env: Rect<F>) -> Self {
        RingClipper { env }
    }

    /// The clipped ring, closed; empty when the ring is entirely outside.
    pub fn clip(&self, ring: &[Coord<F>]) -> Vec<Coord<F>> {
        let mut current = ring.to_vec();
        for box_edge in [BoxEdge::Bottom, BoxEdge::Right, BoxEdge::Top, BoxEdge::Left] {
            if current.is_empty() {
                break;
            }
            current = self.clip_to_box_edge(&current, box_edge);
        }
        if current.len() < 3 {
            return vec![];
        }
        if current.first() != current.last() {
            let first = current[0];
            current.push(first);
        }
        if current.len() < 4 {
            return vec![];
        }
        current
    }

    fn is_inside(&self, coord: Coord<F>, box_edge: BoxEdge) -> bool {
        match box_edge {
            BoxEdge::Bottom => coord.y >= self.env.min().y,
            BoxEdge::Right => coord.x <= self.env.max().x,
            BoxEdge::Top => coord.y <= self.env.max().y,
            BoxEdge::Left => coord.x >= self.env.min().x,
        }
    }

    /// The crossing point of segment `a`-`b` with the box edge's line.
    fn intersection(&self, a: Coord<F>, b: Coord<F>, box_edge: BoxEdge) -> Coord<F> {
        match box_edge {
            BoxEdge::Bottom | BoxEdge::Top => {
                let clip_y = match box_edge {
                    BoxEdge::Bottom => self.env.min().y,
                    _ => self.env.max().y,
                };
                let t = (clip_y - a.y) / (b.y - a.y);
                coord! { x: a.x + t * (b.x - a.x), y: clip_y }
            }
            BoxEdge::Left | BoxEdge::Right => {
                let clip_x = match box_edge {
                    BoxEdge::Left => self.env.min().x,
                    _ => self.env.max().x,
                };
                let t = (clip_x - a.x) / (b.x - a.x);
                coord! { x: clip_x, y: a.y + t * (b.y - a.y) }
            }
        }
    }

    fn clip_to_box_edge(&self, ring: &[Coord<F>], box_edge: BoxEdge) -> Vec<Coord<F>> {
        // treat the ring as closed regardless of an explicit closing coord
        let open: &[Coord<F>] = if ring.first() == ring.last() && ring.len() > 1 {
            &ring[..ring.len() - 1]
        } else {
            ring
        };
        let mut output = Vec::with_capacity(open.len() + 4);
        for i in 0..open.len() {
            let prev = open[(i + open.len() - 1) % open.len()];
            let curr = open[i];
            match (self.is_inside(prev, box_edge), self.is_inside(curr, box_edge)) {
                (true, true) => output.push(curr),
                (true, false) => output.push(self.intersection(prev, curr, box_edge)),
                (false, true) => {
                    output.push(self.intersection(prev, curr, box_edge));
                    output.push(curr);
                }
                (false, false) => {}
            }
        }
        output
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn square_ring(min: f64, max: f64) -> Vec<Coord<f64>> {
        vec![
            coord! { x: min, y: min },
            coord! { x: max, y: min },
            coord! { x: max, y: max },
            coord! { x: min, y: max },
            coord! { x: min, y: min },
        ]
    }

    #[test]
    fn ring_inside_box_is_unchanged() {
        let clipper = RingClipper::new(Rect::new(
            coord! { x: -100.0, y: -100.0 },
            coord! { x: 100.0, y: 100.0 },
        ));
        let ring = square_ring(0.0, 10.0);
        let clipped = clipper.clip(&ring);
        assert_eq!(clipped.len(), 5);
        for coord in &ring {
            assert!(clipped.contains(coord));
        }
    }

    #[test]
    fn ring_outside_box_vanishes() {
        let clipper = RingClipper::new(Rect::new(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
        ));
        let ring = square_ring(10.0, 20.0);
        assert!(clipper.clip(&ring).is_empty());
    }

    #[test]
    fn straddling_ring_is_cut_at_the_border() {
        let clipper = RingClipper::new(Rect::new(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 5.0, y: 5.0 },
        ));
        let ring = square_ring(-5.0, 10.0);
        let clipped = clipper.clip(&ring);
        assert!(!clipped.is_empty());
        assert_eq!(clipped.first(), clipped.last());
        for coord in &clipped {
            assert!(coord.x >= 0.0 && coord.x <= 5.0);
            assert!(coord.y >= 0.0 && coord.y <= 5.0);
        }
    }
}
