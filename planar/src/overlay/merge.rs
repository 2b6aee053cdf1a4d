use super::edge::EdgeSourceInfo;
use super::label::OverlayLabel;
use crate::noding::SegmentString;
use crate::{Coord, GeoFloat};
use std::collections::HashMap;

/// An undirected overlay edge after coincident noded strings have been
/// folded together: a canonical coordinate chain plus the combined label.
#[derive(Debug, Clone)]
pub(crate) struct MergedEdge<F: GeoFloat> {
    pub coords: Vec<Coord<F>>,
    pub z: Option<Vec<F>>,
    pub label: OverlayLabel,
}

fn coord_bits<F: GeoFloat>(coord: &Coord<F>) -> (u64, u64) {
    (
        coord.x.to_f64().unwrap_or(f64::NAN).to_bits(),
        coord.y.to_f64().unwrap_or(f64::NAN).to_bits(),
    )
}

/// Canonical direction: the chain compared coordinate-wise against its
/// reversal; the lexicographically smaller sequence wins.
fn is_canonical<F: GeoFloat>(coords: &[Coord<F>]) -> bool {
    let n = coords.len();
    for i in 0..n {
        let forward = coord_bits(&coords[i]);
        let backward = coord_bits(&coords[n - 1 - i]);
        if forward != backward {
            return forward < backward;
        }
    }
    true
}

/// Fold coincident noded strings into undirected edges with merged labels.
///
/// Every noded substring covers the same point set as any duplicate of it
/// (the noder guarantees splits at all shared vertices), so coincidence is
/// exact coordinate equality up to direction. Z payloads of duplicates are
/// merged by taking the mean.
pub(crate) fn merge_edges<F: GeoFloat>(
    noded: Vec<SegmentString<F>>,
    infos: &[EdgeSourceInfo],
) -> Vec<MergedEdge<F>> {
    let mut merged: Vec<MergedEdge<F>> = Vec::with_capacity(noded.len());
    let mut index: HashMap<Vec<(u64, u64)>, usize> = HashMap::with_capacity(noded.len());

    for string in noded {
        if string.len() < 2 {
            continue;
        }
        let info = &infos[string.data as usize];
        let mut label = info.initial_label();

        let forward = is_canonical(string.coords());
        let (coords, z): (Vec<Coord<F>>, Option<Vec<F>>) = if forward {
            (string.coords().to_vec(), string.z().map(<[F]>::to_vec))
        } else {
            let mut coords = string.coords().to_vec();
            coords.reverse();
            let z = string.z().map(|z| {
                let mut z = z.to_vec();
                z.reverse();
                z
            });
            // flipping the chain swaps the label sides
            *label.input_mut(info.geom_index) = label.input(info.geom_index).flip();
            (coords, z)
        };

        let key: Vec<(u64, u64)> = coords.iter().map(coord_bits).collect();
        match index.get(&key) {
            Some(&existing) => {
                let edge = &mut merged[existing];
                edge.label.merge(&label);
                // mean-merge Z payloads of coincident edges
                if let (Some(existing_z), Some(new_z)) = (edge.z.as_mut(), z) {
                    let two = F::one() + F::one();
                    for (a, b) in existing_z.iter_mut().zip(new_z) {
                        *a = (*a + b) / two;
                    }
                }
            }
            None => {
                index.insert(key, merged.len());
                merged.push(MergedEdge { coords, z, label });
            }
        }
    }

    merged
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord;
    use crate::overlay::label::OverlayDim;

    fn info(geom_index: usize, is_area: bool) -> EdgeSourceInfo {
        EdgeSourceInfo {
            geom_index,
            is_area,
        }
    }

    #[test]
    fn coincident_opposite_edges_merge() {
        // the same chain extracted once per input, in opposite directions
        let a = SegmentString::new(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }],
            0,
        );
        let b = SegmentString::new(
            vec![coord! { x: 10.0, y: 0.0 }, coord! { x: 0.0, y: 0.0 }],
            1,
        );
        let infos = [info(0, true), info(1, true)];
        let merged = merge_edges(vec![a, b], &infos);
        assert_eq!(merged.len(), 1);
        let label = &merged[0].label;
        assert_eq!(label.dim(0), OverlayDim::Boundary);
        assert_eq!(label.dim(1), OverlayDim::Boundary);
        // the two inputs lie on opposite sides of the shared chain
        use crate::algorithm::coordinate_position::CoordPos;
        assert_ne!(
            label.side_location(0, true) == CoordPos::Inside,
            label.side_location(1, true) == CoordPos::Inside
        );
    }

    #[test]
    fn z_payloads_are_averaged() {
        let a = SegmentString::with_z(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }],
            vec![0.0, 10.0],
            0,
        );
        let b = SegmentString::with_z(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }],
            vec![4.0, 30.0],
            1,
        );
        let infos = [info(0, false), info(1, false)];
        let merged = merge_edges(vec![a, b], &infos);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].z.as_deref(), Some(&[2.0, 20.0][..]));
    }
}
