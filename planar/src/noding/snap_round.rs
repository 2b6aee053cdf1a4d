use super::{Noder, NodedSegmentString, SegmentString};
use crate::algorithm::line_intersection::{line_intersection, LineIntersection};
use crate::index::chain::MonotoneChain;
use crate::index::strtree::StrTree;
use crate::interrupt::{check_interrupt, Interrupt};
use crate::{coord, Coord, Error, GeoFloat, PrecisionModel, Rect};

/// A fixed-size square centred on a snap point: the "hot pixel" of snap
/// rounding. Every segment passing through the pixel is noded at the pixel's
/// centre.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HotPixel<F: GeoFloat> {
    pub centre: Coord<F>,
    half_size: F,
}

impl<F: GeoFloat> HotPixel<F> {
    pub fn new(centre: Coord<F>, scale: F) -> Self {
        let two = F::one() + F::one();
        HotPixel {
            centre,
            half_size: F::one() / (scale * two),
        }
    }

    pub fn envelope(&self) -> Rect<F> {
        Rect::new(
            coord! { x: self.centre.x - self.half_size, y: self.centre.y - self.half_size },
            coord! { x: self.centre.x + self.half_size, y: self.centre.y + self.half_size },
        )
    }

    /// Whether the closed pixel square intersects the segment `p0`-`p1`
    /// (Liang-Barsky clipping).
    pub fn intersects_segment(&self, p0: Coord<F>, p1: Coord<F>) -> bool {
        let env = self.envelope();
        if env.intersects_coord(p0) || env.intersects_coord(p1) {
            return true;
        }
        if !env.intersects(&Rect::new(p0, p1)) {
            return false;
        }

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let mut t0 = F::zero();
        let mut t1 = F::one();

        let clips = [
            (-dx, p0.x - env.min().x),
            (dx, env.max().x - p0.x),
            (-dy, p0.y - env.min().y),
            (dy, env.max().y - p0.y),
        ];
        for (p, q) in clips {
            if p == F::zero() {
                if q < F::zero() {
                    return false;
                }
            } else {
                let r = q / p;
                if p < F::zero() {
                    if r > t1 {
                        return false;
                    }
                    if r > t0 {
                        t0 = r;
                    }
                } else {
                    if r < t0 {
                        return false;
                    }
                    if r < t1 {
                        t1 = r;
                    }
                }
            }
        }
        t0 <= t1
    }
}

/// Noder which makes the output robust under a fixed precision model by
/// snap rounding: all coordinates are rounded onto the `1/scale` grid, a hot
/// pixel is raised over every rounded vertex and every intersection point,
/// and every segment passing through a hot pixel is noded at the pixel
/// centre. The output intersects only at vertices of the scaled lattice.
pub struct SnapRoundingNoder {
    scale: f64,
    interrupt: Option<Interrupt>,
}

impl SnapRoundingNoder {
    /// `scale` is the grid density of the fixed precision model (cells per
    /// unit); must be positive and finite.
    pub fn new(scale: f64) -> Result<Self, Error> {
        // reuse the precision-model validation
        PrecisionModel::fixed(scale)?;
        Ok(SnapRoundingNoder {
            scale,
            interrupt: None,
        })
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    /// Round a string onto the grid, dropping collapsed consecutive
    /// duplicates. Returns `None` when the string collapses entirely.
    fn round_string<F: GeoFloat>(&self, string: &SegmentString<F>) -> Option<SegmentString<F>> {
        let pm = PrecisionModel::Fixed { scale: self.scale };
        let mut coords: Vec<Coord<F>> = Vec::with_capacity(string.len());
        let mut z: Option<Vec<F>> = string.z().map(|_| Vec::with_capacity(string.len()));
        for (i, &coord) in string.coords().iter().enumerate() {
            let rounded = pm.make_coord_precise(coord);
            if coords.last() == Some(&rounded) {
                continue;
            }
            coords.push(rounded);
            if let (Some(z), Some(zs)) = (z.as_mut(), string.z()) {
                z.push(zs[i]);
            }
        }
        if coords.len() < 2 {
            return None;
        }
        Some(match z {
            Some(z) => SegmentString::with_z(coords, z, string.data),
            None => SegmentString::new(coords, string.data),
        })
    }

    /// All intersection points among the (rounded) strings, found through
    /// monotone chains.
    fn intersection_points<F: GeoFloat>(
        &self,
        strings: &[SegmentString<F>],
    ) -> Result<Vec<Coord<F>>, Error> {
        let mut points = Vec::new();
        let mut chains: Vec<MonotoneChain<'_, F>> = Vec::new();
        for (string_index, string) in strings.iter().enumerate() {
            chains.extend(MonotoneChain::chains_of(string.coords(), string_index));
        }
        let mut tree: StrTree<F, usize> = StrTree::new();
        for (chain_index, chain) in chains.iter().enumerate() {
            tree.insert(*chain.envelope(), chain_index);
        }
        for (chain_index, chain) in chains.iter().enumerate() {
            check_interrupt(self.interrupt.as_ref())?;
            tree.query(chain.envelope(), &mut |_env, &other_index| {
                if other_index <= chain_index {
                    return;
                }
                let other = &chains[other_index];
                chain.compute_overlaps(other, &mut |seg0, seg1| {
                    let line0 = chain.line(seg0);
                    let line1 = other.line(seg1);
                    match line_intersection(line0, line1) {
                        Some(LineIntersection::SinglePoint { intersection, .. }) => {
                            points.push(intersection)
                        }
                        Some(LineIntersection::Collinear { intersection }) => {
                            points.push(intersection.start);
                            points.push(intersection.end);
                        }
                        None => {}
                    }
                });
            });
        }
        Ok(points)
    }
}

impl<F: GeoFloat> Noder<F> for SnapRoundingNoder {
    fn compute_nodes(
        &mut self,
        input: &[SegmentString<F>],
    ) -> Result<Vec<SegmentString<F>>, Error> {
        let pm = PrecisionModel::Fixed { scale: self.scale };
        let scale = F::from(self.scale).ok_or_else(|| {
            Error::invalid(format!("scale {} is not representable", self.scale))
        })?;

        let rounded: Vec<SegmentString<F>> = input
            .iter()
            .filter_map(|string| self.round_string(string))
            .collect();

        // hot pixels over every intersection point (rounded onto the grid)
        // and every rounded vertex, deduplicated by bit pattern
        let mut pixels: Vec<HotPixel<F>> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        let mut add_pixel = |coord: Coord<F>, pixels: &mut Vec<HotPixel<F>>| {
            let x = coord.x.to_f64().unwrap_or(f64::NAN);
            let y = coord.y.to_f64().unwrap_or(f64::NAN);
            if seen.insert((x.to_bits(), y.to_bits())) {
                pixels.push(HotPixel::new(coord, scale));
            }
        };

        for point in self.intersection_points(&rounded)? {
            add_pixel(pm.make_coord_precise(point), &mut pixels);
        }
        for string in &rounded {
            for &coord in string.coords() {
                add_pixel(coord, &mut pixels);
            }
        }

        let mut pixel_tree: StrTree<F, usize> = StrTree::new();
        for (pixel_index, pixel) in pixels.iter().enumerate() {
            pixel_tree.insert(pixel.envelope(), pixel_index);
        }

        // snap every segment to the hot pixels it passes through
        let mut noded: Vec<NodedSegmentString<F>> = rounded
            .into_iter()
            .map(NodedSegmentString::new)
            .collect();
        for string in noded.iter_mut() {
            check_interrupt(self.interrupt.as_ref())?;
            for segment_index in 0..string.string().num_segments() {
                let line = string.string().line(segment_index);
                let mut hits: Vec<Coord<F>> = Vec::new();
                pixel_tree.query(&line.envelope(), &mut |_env, &pixel_index| {
                    let pixel = &pixels[pixel_index];
                    if pixel.intersects_segment(line.start, line.end) {
                        hits.push(pixel.centre);
                    }
                });
                for centre in hits {
                    string.add_intersection(centre, line, segment_index);
                }
            }
        }

        Ok(super::extract_substrings(noded))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::noding::Noder;

    #[test]
    fn hot_pixel_segment_intersection() {
        let pixel = HotPixel::new(coord! { x: 5.0, y: 5.0 }, 1.0);
        // passes through the pixel
        assert!(pixel.intersects_segment(coord! { x: 0.0, y: 5.0 }, coord! { x: 10.0, y: 5.0 }));
        // misses it
        assert!(!pixel.intersects_segment(coord! { x: 0.0, y: 7.0 }, coord! { x: 10.0, y: 7.0 }));
        // ends inside it
        assert!(pixel.intersects_segment(coord! { x: 0.0, y: 0.0 }, coord! { x: 5.1, y: 5.1 }));
    }

    #[test]
    fn crossing_is_snapped_to_the_grid() {
        let a = SegmentString::<f64>::new(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 }],
            0,
        );
        let b = SegmentString::<f64>::new(
            vec![coord! { x: 0.0, y: 10.3 }, coord! { x: 10.0, y: 0.2 }],
            1,
        );
        let mut noder = SnapRoundingNoder::new(1.0).unwrap();
        let noded = noder.compute_nodes(&[a, b]).unwrap();

        // all output coordinates lie on the integer grid
        for string in &noded {
            for coord in string.coords() {
                assert_eq!(coord.x, coord.x.round());
                assert_eq!(coord.y, coord.y.round());
            }
        }
        // and the two inputs were split at a shared vertex
        assert!(noded.len() >= 4);
    }

    #[test]
    fn collapsed_strings_vanish() {
        let tiny = SegmentString::new(
            vec![coord! { x: 0.01, y: 0.01 }, coord! { x: 0.02, y: 0.02 }],
            0,
        );
        let mut noder = SnapRoundingNoder::new(1.0).unwrap();
        let noded = noder.compute_nodes(&[tiny]).unwrap();
        assert!(noded.is_empty());
    }

    #[test]
    fn rejects_bad_scale() {
        assert!(SnapRoundingNoder::new(0.0).is_err());
        assert!(SnapRoundingNoder::new(-1.0).is_err());
    }
}
