use crate::algorithm::coordinate_position::CoordPos;
use crate::algorithm::kernels::{HasKernel, Kernel};
use crate::index::strtree::StrTree;
use crate::{Coord, GeoFloat, Geometry, Line, Rect};

/// Point-in-area location backed by an STR-tree of the area's boundary
/// segments, queried by horizontal ray stabs.
///
/// Building the locator costs one pass over the rings; each query then only
/// touches the segments whose Y-interval straddles the query point and
/// which lie rightwards of it. Ring orientation and shell/hole nesting do
/// not matter: crossing parity over *all* rings is the mod-2 location.
pub struct IndexedPointInAreaLocator<F: GeoFloat> {
    tree: StrTree<F, Line<F>>,
}

impl<F: GeoFloat> IndexedPointInAreaLocator<F> {
    pub fn new(geometry: &Geometry<F>) -> Self {
        let mut segments = Vec::new();
        Self::collect_boundary_segments(geometry, &mut segments);
        let mut tree = StrTree::new();
        for line in segments {
            tree.insert(line.envelope(), line);
        }
        IndexedPointInAreaLocator { tree }
    }

    fn collect_boundary_segments(geometry: &Geometry<F>, segments: &mut Vec<Line<F>>) {
        match geometry {
            Geometry::Polygon(polygon) => {
                for ring in polygon.rings() {
                    segments.extend(ring.lines());
                }
            }
            Geometry::MultiPolygon(multi) => {
                for polygon in multi.iter() {
                    for ring in polygon.rings() {
                        segments.extend(ring.lines());
                    }
                }
            }
            Geometry::GeometryCollection(collection) => {
                for geometry in collection.iter() {
                    Self::collect_boundary_segments(geometry, segments);
                }
            }
            // non-areal geometry: no segments, everything locates Outside
            _ => {}
        }
    }

    /// Force the index build; otherwise the first `locate` pays for it.
    pub fn build(&self) {
        self.tree.build();
    }

    /// Locate `coord` relative to the area: `Inside`, `OnBoundary` or
    /// `Outside`.
    pub fn locate(&self, coord: Coord<F>) -> CoordPos {
        // a horizontal ray from `coord` towards +X
        let ray_envelope = Rect::new(
            coord,
            Coord {
                x: <F as num_traits::Bounded>::max_value(),
                y: coord.y,
            },
        );

        let mut crossings = 0usize;
        let mut on_boundary = false;
        self.tree.query(&ray_envelope, &mut |_env, line| {
            if on_boundary {
                return;
            }
            let p1 = line.start;
            let p2 = line.end;
            if coord == p1 || coord == p2 {
                on_boundary = true;
                return;
            }
            if p1.x < coord.x && p2.x < coord.x {
                return;
            }
            if p1.y == coord.y && p2.y == coord.y {
                let (min_x, max_x) = if p1.x < p2.x { (p1.x, p2.x) } else { (p2.x, p1.x) };
                if coord.x >= min_x && coord.x <= max_x {
                    on_boundary = true;
                }
                return;
            }
            if (p1.y > coord.y && p2.y <= coord.y) || (p2.y > coord.y && p1.y <= coord.y) {
                let mut sign = F::Ker::orient2d(p1, p2, coord).as_sign();
                if sign == 0 {
                    on_boundary = true;
                    return;
                }
                if p2.y < p1.y {
                    sign = -sign;
                }
                if sign == 1 {
                    crossings += 1;
                }
            }
        });

        if on_boundary {
            CoordPos::OnBoundary
        } else if crossings % 2 == 1 {
            CoordPos::Inside
        } else {
            CoordPos::Outside
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{coord, wkt};

    #[test]
    fn locates_like_the_direct_algorithm() {
        use crate::algorithm::coordinate_position::CoordinatePosition;
        let polygon = wkt! { POLYGON(
            (0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0),
            (4.0 4.0,6.0 4.0,6.0 6.0,4.0 6.0,4.0 4.0)
        ) };
        let geometry: Geometry<f64> = polygon.clone().into();
        let locator = IndexedPointInAreaLocator::new(&geometry);

        let probes = [
            coord! { x: 2.0, y: 2.0 },
            coord! { x: 5.0, y: 5.0 },
            coord! { x: -1.0, y: 5.0 },
            coord! { x: 0.0, y: 5.0 },
            coord! { x: 4.0, y: 5.0 },
            coord! { x: 10.0, y: 10.0 },
            coord! { x: 5.0, y: 0.0 },
        ];
        for probe in probes {
            assert_eq!(
                locator.locate(probe),
                polygon.coordinate_position(&probe),
                "mismatch at {probe:?}"
            );
        }
    }

    #[test]
    fn non_areal_geometry_is_all_outside() {
        let line: Geometry<f64> = wkt! { LINESTRING(0.0 0.0,10.0 0.0) }.into();
        let locator = IndexedPointInAreaLocator::new(&line);
        assert_eq!(locator.locate(coord! { x: 5.0, y: 0.0 }), CoordPos::Outside);
    }
}
