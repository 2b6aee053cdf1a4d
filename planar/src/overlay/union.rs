use super::{overlay_with_config, OverlayConfig, OverlayOp};
use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use crate::index::strtree::StrTree;
use crate::utils::lex_cmp;
use crate::{
    Coord, Error, GeoFloat, Geometry, GeometryCollection, GeometryFactory, LineString,
    MultiLineString, MultiPolygon, Point, Polygon,
};

/// Union of all components of a geometry (or collection), computed by
/// cascaded pairwise overlay.
///
/// Polygons are unioned bottom-up: an STR-tree packs spatially close
/// polygons into the same groups, and the groups are merged pairwise so
/// most unions combine small, adjacent inputs. Lines are then unioned and
/// the parts absorbed by the areal result dropped; points survive only
/// where nothing covers them.
pub trait UnaryUnion<F: GeoFloat> {
    fn unary_union(&self) -> Result<Geometry<F>, Error> {
        self.unary_union_with(&OverlayConfig::default())
    }

    fn unary_union_with(&self, config: &OverlayConfig) -> Result<Geometry<F>, Error>;
}

impl<F: GeoFloat> UnaryUnion<F> for Geometry<F> {
    fn unary_union_with(&self, config: &OverlayConfig) -> Result<Geometry<F>, Error> {
        union_all(std::slice::from_ref(self), config)
    }
}

impl<F: GeoFloat> UnaryUnion<F> for GeometryCollection<F> {
    fn unary_union_with(&self, config: &OverlayConfig) -> Result<Geometry<F>, Error> {
        union_all(self.geometries(), config)
    }
}

impl<F: GeoFloat> UnaryUnion<F> for MultiPolygon<F> {
    fn unary_union_with(&self, config: &OverlayConfig) -> Result<Geometry<F>, Error> {
        let geometries: Vec<Geometry<F>> =
            self.iter().cloned().map(Geometry::Polygon).collect();
        union_all(&geometries, config)
    }
}

/// Union over an explicit list of geometries.
pub fn union_all<F: GeoFloat>(
    geometries: &[Geometry<F>],
    config: &OverlayConfig,
) -> Result<Geometry<F>, Error> {
    let mut polygons: Vec<Polygon<F>> = Vec::new();
    let mut lines: Vec<LineString<F>> = Vec::new();
    let mut points: Vec<Point<F>> = Vec::new();
    for geometry in geometries {
        extract_parts(geometry, &mut polygons, &mut lines, &mut points);
    }

    let area = union_polygons(polygons, config)?;
    let line_part = union_lines(lines, area.as_ref(), config)?;

    // points survive only where neither the area nor the lines cover them
    let mut coords: Vec<Coord<F>> = points
        .iter()
        .filter_map(Point::coord)
        .map(|c| config.precision_model.make_coord_precise(c))
        .collect();
    coords.sort_by(lex_cmp);
    coords.dedup();
    let surviving_points: Vec<Point<F>> = coords
        .into_iter()
        .filter(|coord| {
            let in_area = area
                .as_ref()
                .map(|area| area.coordinate_position(coord) != CoordPos::Outside)
                .unwrap_or(false);
            let on_line = line_part
                .as_ref()
                .map(|lines| lines.coordinate_position(coord) != CoordPos::Outside)
                .unwrap_or(false);
            !in_area && !on_line
        })
        .map(|c| Point::new(c))
        .collect();

    let mut parts: Vec<Geometry<F>> = Vec::new();
    if let Some(area) = area {
        parts.push(area);
    }
    if let Some(lines) = line_part {
        parts.extend(lines.into_line_strings().into_iter().map(Geometry::LineString));
    }
    parts.extend(surviving_points.into_iter().map(Geometry::Point));

    let factory = GeometryFactory::new(config.precision_model, 0);
    if parts.is_empty() {
        return Ok(Geometry::GeometryCollection(
            factory.create_geometry_collection(vec![]),
        ));
    }
    Ok(factory.build_geometry(parts))
}

fn extract_parts<F: GeoFloat>(
    geometry: &Geometry<F>,
    polygons: &mut Vec<Polygon<F>>,
    lines: &mut Vec<LineString<F>>,
    points: &mut Vec<Point<F>>,
) {
    match geometry {
        Geometry::Point(point) => points.push(point.clone()),
        Geometry::MultiPoint(multi) => points.extend(multi.iter().cloned()),
        Geometry::LineString(line_string) => lines.push(line_string.clone()),
        Geometry::MultiLineString(multi) => lines.extend(multi.iter().cloned()),
        Geometry::Polygon(polygon) => polygons.push(polygon.clone()),
        Geometry::MultiPolygon(multi) => polygons.extend(multi.iter().cloned()),
        Geometry::GeometryCollection(collection) => {
            for geometry in collection.iter() {
                extract_parts(geometry, polygons, lines, points);
            }
        }
    }
}

/// Cascaded union of the polygonal parts: order the polygons spatially by
/// packing their envelopes through an STR-tree, then reduce pairwise so
/// neighbours merge first.
fn union_polygons<F: GeoFloat>(
    polygons: Vec<Polygon<F>>,
    config: &OverlayConfig,
) -> Result<Option<Geometry<F>>, Error> {
    let polygons: Vec<Polygon<F>> = polygons.into_iter().filter(|p| !p.is_empty()).collect();
    if polygons.is_empty() {
        return Ok(None);
    }

    // spatial merge order from the packed tree: polygons sharing a leaf
    // merge with each other before merging with far-away groups
    let mut tree: StrTree<F, usize> = StrTree::new();
    for (idx, polygon) in polygons.iter().enumerate() {
        if let Some(env) = polygon.envelope() {
            tree.insert(env, idx);
        }
    }
    let ordered: Vec<usize> = tree.packing_order().into_iter().copied().collect();

    let mut level: Vec<Geometry<F>> = ordered
        .into_iter()
        .map(|idx| Geometry::Polygon(polygons[idx].clone()))
        .collect();
    while level.len() > 1 {
        let mut next: Vec<Geometry<F>> = Vec::with_capacity(level.len().div_ceil(2));
        let mut iter = level.into_iter();
        while let Some(first) = iter.next() {
            match iter.next() {
                Some(second) => {
                    next.push(overlay_with_config(
                        &first,
                        &second,
                        OverlayOp::Union,
                        config,
                    )?)
                }
                None => next.push(first),
            }
        }
        level = next;
    }
    Ok(level.into_iter().next())
}

/// Union of the linear parts: one overlay union over all lines at once
/// (the noder handles the whole set), then drop pieces the areal result
/// absorbs.
fn union_lines<F: GeoFloat>(
    lines: Vec<LineString<F>>,
    area: Option<&Geometry<F>>,
    config: &OverlayConfig,
) -> Result<Option<MultiLineString<F>>, Error> {
    let lines: Vec<LineString<F>> = lines.into_iter().filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        return Ok(None);
    }
    // unioning the line set with itself nodes all crossings and dissolves
    // duplicates in one pass
    let all = Geometry::MultiLineString(MultiLineString::new(lines));
    let unioned = overlay_with_config(&all, &all, OverlayOp::Union, config)?;

    let mut result: Vec<LineString<F>> = Vec::new();
    collect_lines(&unioned, &mut result);
    if let Some(area) = area {
        result.retain(|line| {
            let coords = line.coords();
            let two = F::one() + F::one();
            let midpoint = crate::coord! {
                x: (coords[0].x + coords[1].x) / two,
                y: (coords[0].y + coords[1].y) / two,
            };
            area.coordinate_position(&midpoint) == CoordPos::Outside
        });
    }
    if result.is_empty() {
        Ok(None)
    } else {
        Ok(Some(MultiLineString::new(result)))
    }
}

fn collect_lines<F: GeoFloat>(geometry: &Geometry<F>, out: &mut Vec<LineString<F>>) {
    match geometry {
        Geometry::LineString(line) => out.push(line.clone()),
        Geometry::MultiLineString(multi) => out.extend(multi.iter().cloned()),
        Geometry::GeometryCollection(collection) => {
            for geometry in collection.iter() {
                collect_lines(geometry, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::relate::Relate;
    use crate::wkt;

    #[test]
    fn union_of_overlapping_squares_and_a_point() {
        let collection = wkt! {
            GEOMETRYCOLLECTION(
                POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)),
                POLYGON((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)),
                POINT(20.0 20.0)
            )
        };
        let result = collection.unary_union().unwrap();
        match &result {
            Geometry::GeometryCollection(parts) => {
                assert_eq!(parts.len(), 2);
            }
            other => panic!("expected a collection, got {other:?}"),
        }
        let expected: Geometry<f64> = wkt! {
            GEOMETRYCOLLECTION(
                POLYGON((0.0 0.0,10.0 0.0,10.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 10.0,0.0 10.0,0.0 0.0)),
                POINT(20.0 20.0)
            )
        }
        .into();
        assert!(result.relate(&expected).unwrap().is_equal_topo());
    }

    #[test]
    fn union_of_disjoint_polygons_is_a_multi_polygon() {
        let multi = wkt! { MULTIPOLYGON(
            ((0.0 0.0,4.0 0.0,4.0 4.0,0.0 4.0,0.0 0.0)),
            ((10.0 10.0,14.0 10.0,14.0 14.0,10.0 14.0,10.0 10.0))
        ) };
        let result = multi.unary_union().unwrap();
        assert!(matches!(result, Geometry::MultiPolygon(_)));
    }

    #[test]
    fn covered_point_is_absorbed() {
        let collection = wkt! {
            GEOMETRYCOLLECTION(
                POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)),
                POINT(5.0 5.0)
            )
        };
        let result = collection.unary_union().unwrap();
        assert!(matches!(result, Geometry::Polygon(_)));
    }
}
