use super::clip::RingClipper;
use super::label::{InputLabel, OverlayLabel};
use crate::noding::SegmentString;
use crate::{Geometry, GeoFloat, LineString, LinearRing, Polygon, Rect};

/// Where a segment string fed to the noder came from: which operand, and in
/// what role. The string's opaque data word indexes into the info table.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EdgeSourceInfo {
    pub geom_index: usize,
    pub is_area: bool,
}

impl EdgeSourceInfo {
    /// The initial label contribution of an edge from this source, relative
    /// to the direction the string was extracted in.
    pub fn initial_label(&self) -> OverlayLabel {
        let input = if self.is_area {
            // rings are normalized so the interior is on the left
            InputLabel::boundary_interior_left()
        } else {
            InputLabel::line()
        };
        OverlayLabel::with_input(self.geom_index, input)
    }
}

/// Converts the operand geometries into tagged segment strings for the
/// noder. Area rings are orientation-normalized (interior on the left) and
/// optionally clipped against `clip_env`; linear components pass through
/// unchanged; points are not edges and are ignored here (point operands are
/// handled by the point fast paths before the pipeline runs).
pub(crate) struct EdgeCollector<F: GeoFloat> {
    pub strings: Vec<SegmentString<F>>,
    pub infos: Vec<EdgeSourceInfo>,
    clipper: Option<RingClipper<F>>,
    clip_env: Option<Rect<F>>,
}

impl<F: GeoFloat> EdgeCollector<F> {
    pub fn new(clip_env: Option<Rect<F>>) -> Self {
        EdgeCollector {
            strings: Vec::new(),
            infos: Vec::new(),
            clipper: clip_env.map(RingClipper::new),
            clip_env,
        }
    }

    /// Change the clip rectangle for subsequently added geometries; the
    /// operands of asymmetric operations are clipped differently.
    pub fn set_clip_env(&mut self, clip_env: Option<Rect<F>>) {
        self.clipper = clip_env.map(RingClipper::new);
        self.clip_env = clip_env;
    }

    pub fn add_geometry(&mut self, geometry: &Geometry<F>, geom_index: usize) {
        match geometry {
            Geometry::Polygon(polygon) => self.add_polygon(polygon, geom_index),
            Geometry::MultiPolygon(multi) => {
                for polygon in multi.iter() {
                    self.add_polygon(polygon, geom_index);
                }
            }
            Geometry::LineString(line_string) => self.add_line_string(line_string, geom_index),
            Geometry::MultiLineString(multi) => {
                for line_string in multi.iter() {
                    self.add_line_string(line_string, geom_index);
                }
            }
            Geometry::GeometryCollection(collection) => {
                for geometry in collection.iter() {
                    self.add_geometry(geometry, geom_index);
                }
            }
            // points contribute no edges
            Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        }
    }

    fn add_polygon(&mut self, polygon: &Polygon<F>, geom_index: usize) {
        if polygon.is_empty() {
            return;
        }
        let oriented = polygon.orient();
        for ring in oriented.rings() {
            self.add_ring(ring, geom_index);
        }
    }

    fn add_ring(&mut self, ring: &LinearRing<F>, geom_index: usize) {
        if ring.is_empty() {
            return;
        }
        let coords = match (&self.clipper, self.clip_env, ring.envelope()) {
            (Some(clipper), Some(clip_env), Some(ring_env)) if !clip_env.contains(&ring_env) => {
                clipper.clip(ring.coords())
            }
            _ => ring.coords().to_vec(),
        };
        if coords.len() < 4 {
            return;
        }
        // clipping loses Z alignment, so carry Z only on unclipped rings
        let z = if coords.len() == ring.num_coords() {
            ring.seq().z_slice().map(<[F]>::to_vec)
        } else {
            None
        };
        self.push_string(coords, z, geom_index, true);
    }

    fn add_line_string(&mut self, line_string: &LineString<F>, geom_index: usize) {
        if line_string.is_empty() {
            return;
        }
        let coords = line_string.coords().to_vec();
        let z = line_string.seq().z_slice().map(<[F]>::to_vec);
        self.push_string(coords, z, geom_index, false);
    }

    fn push_string(
        &mut self,
        coords: Vec<crate::Coord<F>>,
        z: Option<Vec<F>>,
        geom_index: usize,
        is_area: bool,
    ) {
        let data = self.infos.len() as u64;
        self.infos.push(EdgeSourceInfo {
            geom_index,
            is_area,
        });
        let string = match z {
            Some(z) => SegmentString::with_z(coords, z, data),
            None => SegmentString::new(coords, data),
        };
        self.strings.push(string);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wkt;

    #[test]
    fn rings_are_normalized_interior_left() {
        // clockwise shell: must be reversed on extraction
        let polygon = wkt! { POLYGON((0.0 0.0,0.0 10.0,10.0 10.0,10.0 0.0,0.0 0.0)) };
        let mut collector = EdgeCollector::new(None);
        collector.add_geometry(&polygon.into(), 0);
        assert_eq!(collector.strings.len(), 1);
        let coords = collector.strings[0].coords();
        // counter-clockwise: second coordinate heads east, not north
        assert_eq!(coords[1], crate::coord! { x: 10.0, y: 0.0 });
        assert!(collector.infos[0].is_area);
    }

    #[test]
    fn lines_and_points_in_collections() {
        let collection = wkt! {
            GEOMETRYCOLLECTION(
                LINESTRING(0.0 0.0,5.0 5.0),
                POINT(1.0 1.0)
            )
        };
        let mut collector = EdgeCollector::new(None);
        collector.add_geometry(&collection.into(), 1);
        assert_eq!(collector.strings.len(), 1);
        assert!(!collector.infos[0].is_area);
        assert_eq!(collector.infos[0].geom_index, 1);
    }
}
