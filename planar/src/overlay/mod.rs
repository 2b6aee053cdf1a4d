//! The overlay core: computing a rounded overlay of two geometries under an
//! explicit precision model and extracting the result for a chosen boolean
//! operation.
//!
//! The pipeline: operand preconditioning (empty and point fast paths,
//! precision snapping, ring clipping) → noding (snap-rounding under a fixed
//! model, iterated indexed noding otherwise) → coincident-edge merging with
//! label combination → half-edge graph build with label completion and
//! consistency verification → per-dimension result extraction.

use crate::algorithm::coordinate_position::CoordPos;
use crate::algorithm::dimensions::{Dimensions, HasDimensions};
use crate::algorithm::is_valid::IsValid;
use crate::algorithm::map_coords::MapCoords;
use crate::interrupt::{check_interrupt, Interrupt};
use crate::noding::{IteratedNoder, Noder, SnapRoundingNoder};
use crate::prepared::point_locator::IndexedPointInAreaLocator;
use crate::{
    coord, Error, GeomContext, GeoFloat, Geometry, GeometryFactory, LineString, Point, Polygon,
    PrecisionModel, Rect,
};

pub(crate) mod clip;
pub(crate) mod edge;
pub(crate) mod graph;
pub(crate) mod label;
pub(crate) mod line_builder;
pub(crate) mod merge;
pub(crate) mod points;
pub(crate) mod polygon_builder;
pub mod union;

pub use union::UnaryUnion;

/// The boolean overlay operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayOp {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

/// Per-operation configuration.
#[derive(Clone, Debug, Default)]
pub struct OverlayConfig {
    pub precision_model: PrecisionModel,
    /// restrict the result to components of exactly the operation's
    /// natural dimension (no lower-dimensional collapses)
    pub strict_mode: bool,
    /// emit only the areal part of the result
    pub area_result_only: bool,
    /// validate the assembled result and fail on invalidity
    pub validate_output: bool,
    pub interrupt: Option<Interrupt>,
}

impl OverlayConfig {
    pub fn with_precision_model(precision_model: PrecisionModel) -> Self {
        OverlayConfig {
            precision_model,
            ..OverlayConfig::default()
        }
    }
}

/// Spatial set operations backed by the overlay pipeline.
///
/// The precision model of the left operand governs the operation; use
/// [`overlay_with_config`] for explicit control.
pub trait BooleanOps<F: GeoFloat, Rhs = Self> {
    fn boolean_op(&self, other: &Rhs, op: OverlayOp) -> Result<Geometry<F>, Error>;

    fn intersection(&self, other: &Rhs) -> Result<Geometry<F>, Error> {
        self.boolean_op(other, OverlayOp::Intersection)
    }

    fn union(&self, other: &Rhs) -> Result<Geometry<F>, Error> {
        self.boolean_op(other, OverlayOp::Union)
    }

    fn difference(&self, other: &Rhs) -> Result<Geometry<F>, Error> {
        self.boolean_op(other, OverlayOp::Difference)
    }

    fn sym_difference(&self, other: &Rhs) -> Result<Geometry<F>, Error> {
        self.boolean_op(other, OverlayOp::SymDifference)
    }
}

impl<F, A, B> BooleanOps<F, B> for A
where
    F: GeoFloat,
    A: Clone + Into<Geometry<F>>,
    B: Clone + Into<Geometry<F>>,
{
    fn boolean_op(&self, other: &B, op: OverlayOp) -> Result<Geometry<F>, Error> {
        let a: Geometry<F> = self.clone().into();
        let b: Geometry<F> = other.clone().into();
        let config = OverlayConfig::with_precision_model(a.ctx().precision_model);
        overlay_with_config(&a, &b, op, &config)
    }
}

/// Overlay under the default (floating) precision model.
pub fn overlay<F: GeoFloat>(
    a: &Geometry<F>,
    b: &Geometry<F>,
    op: OverlayOp,
) -> Result<Geometry<F>, Error> {
    overlay_with_config(a, b, op, &OverlayConfig::default())
}

/// The natural dimension of a result, used for empty results and strict
/// mode.
fn result_dimension(op: OverlayOp, dim_a: Dimensions, dim_b: Dimensions) -> Dimensions {
    match op {
        OverlayOp::Intersection => dim_a.min(dim_b),
        OverlayOp::Union | OverlayOp::SymDifference => dim_a.max(dim_b),
        OverlayOp::Difference => dim_a,
    }
}

/// The dimension an operand *would* have if non-empty: empty operands keep
/// the dimension of their variant.
fn operand_dimension<F: GeoFloat>(geometry: &Geometry<F>) -> Dimensions {
    if !geometry.is_empty() {
        return geometry.dimensions();
    }
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => Dimensions::ZeroDimensional,
        Geometry::LineString(_) | Geometry::MultiLineString(_) => Dimensions::OneDimensional,
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimensions::TwoDimensional,
        Geometry::GeometryCollection(collection) => collection
            .iter()
            .map(operand_dimension)
            .max()
            .unwrap_or(Dimensions::ZeroDimensional),
    }
}

fn empty_result<F: GeoFloat>(dimension: Dimensions, ctx: GeomContext) -> Geometry<F> {
    match dimension {
        Dimensions::TwoDimensional => Geometry::Polygon(Polygon::empty().with_context(ctx)),
        Dimensions::OneDimensional => {
            Geometry::LineString(LineString::empty().with_context(ctx))
        }
        _ => Geometry::Point(Point::empty().with_context(ctx)),
    }
}

fn is_puntal<F: GeoFloat>(geometry: &Geometry<F>) -> bool {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => true,
        Geometry::GeometryCollection(collection) => {
            !collection.is_empty() && collection.iter().all(is_puntal)
        }
        _ => false,
    }
}

fn snap_to_model<F: GeoFloat>(
    geometry: &Geometry<F>,
    pm: &PrecisionModel,
) -> Result<Geometry<F>, Error> {
    if pm.is_floating() {
        return Ok(geometry.clone());
    }
    let pm = *pm;
    geometry.try_map_coords(move |c| pm.make_coord_precise(c))
}

/// Compute `a op b` under an explicit configuration.
pub fn overlay_with_config<F: GeoFloat>(
    a: &Geometry<F>,
    b: &Geometry<F>,
    op: OverlayOp,
    config: &OverlayConfig,
) -> Result<Geometry<F>, Error> {
    let pm = config.precision_model;
    let ctx = GeomContext::new(pm, a.ctx().srid);
    let dim_a = operand_dimension(a);
    let dim_b = operand_dimension(b);
    let result_dim = result_dimension(op, dim_a, dim_b);

    // empty-operand short circuits
    if a.is_empty() || b.is_empty() {
        return Ok(match op {
            OverlayOp::Intersection => empty_result(result_dim, ctx),
            OverlayOp::Union | OverlayOp::SymDifference => {
                if a.is_empty() && b.is_empty() {
                    empty_result(result_dim, ctx)
                } else if a.is_empty() {
                    snap_to_model(b, &pm)?.with_context(ctx)
                } else {
                    snap_to_model(a, &pm)?.with_context(ctx)
                }
            }
            OverlayOp::Difference => {
                if a.is_empty() {
                    empty_result(result_dim, ctx)
                } else {
                    snap_to_model(a, &pm)?.with_context(ctx)
                }
            }
        });
    }

    // pure point operands take the set-algebra fast path
    if is_puntal(a) && is_puntal(b) {
        let multi = points::overlay_points(a, b, op, &pm);
        return Ok(if multi.is_empty() {
            empty_result(result_dim, ctx)
        } else {
            let factory = GeometryFactory::new(pm, ctx.srid);
            factory.build_geometry(
                multi
                    .into_points()
                    .into_iter()
                    .map(Geometry::Point)
                    .collect(),
            )
        });
    }

    // a point operand against edges dispatches to the locating fast path
    if is_puntal(a) || is_puntal(b) {
        let (points_geom, other, point_is_a) = if is_puntal(a) {
            (a, snap_to_model(b, &pm)?, true)
        } else {
            (b, snap_to_model(a, &pm)?, false)
        };
        let parts = points::overlay_mixed_points(points_geom, &other, point_is_a, op, &pm);
        let parts: Vec<Geometry<F>> = parts.into_iter().filter(|g| !g.is_empty()).collect();
        return Ok(if parts.is_empty() {
            empty_result(result_dim, ctx)
        } else {
            let factory = GeometryFactory::new(pm, ctx.srid);
            factory.build_geometry(parts)
        });
    }

    check_interrupt(config.interrupt.as_ref())?;

    // effective inputs: snapped onto the fixed grid up front so labelling
    // and noding see the same coordinates
    let eff_a = snap_to_model(a, &pm)?;
    let eff_b = snap_to_model(b, &pm)?;

    // edge extraction, clipping rings against the operand envelopes where
    // the operation allows it
    let clip_env = clip_envelope(op, &eff_a, &eff_b, &pm);
    if op == OverlayOp::Intersection && clip_env.is_none() {
        // envelopes are disjoint
        return Ok(empty_result(result_dim, ctx));
    }
    let mut collector = edge::EdgeCollector::new(match op {
        OverlayOp::Intersection => clip_env,
        _ => None,
    });
    collector.add_geometry(&eff_a, 0);
    if op == OverlayOp::Difference {
        collector.set_clip_env(clip_env);
    }
    collector.add_geometry(&eff_b, 1);
    let strings = collector.strings;
    let infos = collector.infos;

    // noding
    let noded = match pm {
        PrecisionModel::Fixed { scale } => {
            let mut noder = SnapRoundingNoder::new(scale)?;
            if let Some(interrupt) = &config.interrupt {
                noder = noder.with_interrupt(interrupt.clone());
            }
            noder.compute_nodes(&strings)?
        }
        _ => {
            let mut noder = IteratedNoder::new();
            if let Some(interrupt) = &config.interrupt {
                noder = noder.with_interrupt(interrupt.clone());
            }
            noder.compute_nodes(&strings)?
        }
    };

    // fold coincident edges and complete the labels against the effective
    // inputs
    let mut merged = merge::merge_edges(noded, &infos);
    let locators = [
        IndexedPointInAreaLocator::new(&eff_a),
        IndexedPointInAreaLocator::new(&eff_b),
    ];
    for edge in merged.iter_mut() {
        for geom_index in 0..2 {
            if !edge.label.is_located(geom_index) {
                let two = F::one() + F::one();
                let midpoint = coord! {
                    x: (edge.coords[0].x + edge.coords[1].x) / two,
                    y: (edge.coords[0].y + edge.coords[1].y) / two,
                };
                let mut position = locators[geom_index].locate(midpoint);
                if position == CoordPos::OnBoundary {
                    // interior points of noded edges can only sit on the
                    // boundary when collinear; resolve as inside
                    position = CoordPos::Inside;
                }
                edge.label.set_located(geom_index, position);
            }
        }
    }

    check_interrupt(config.interrupt.as_ref())?;

    // the topology graph of the noded arrangement
    let mut graph = graph::OverlayGraph::build(merged);
    let areal = [
        dim_a == Dimensions::TwoDimensional,
        dim_b == Dimensions::TwoDimensional,
    ];
    graph.check_label_consistency(areal)?;

    // result extraction, by dimension
    polygon_builder::mark_result_area_edges(&mut graph, op);
    line_builder::mark_result_line_edges(&mut graph, op);

    let want_z = a.dims().meet(b.dims()).has_z();
    let polygons = polygon_builder::build_polygons(&mut graph, want_z)?;
    let lines = line_builder::build_lines(&graph, want_z)?;
    let points = if op == OverlayOp::Intersection {
        points::build_intersection_points(&graph)
    } else {
        vec![]
    };

    let mut parts: Vec<Geometry<F>> = Vec::new();
    parts.extend(polygons.into_iter().map(Geometry::Polygon));
    if !config.area_result_only {
        if !(config.strict_mode && result_dim > Dimensions::OneDimensional) {
            parts.extend(lines.into_iter().map(Geometry::LineString));
        }
        if !(config.strict_mode && result_dim > Dimensions::ZeroDimensional) {
            parts.extend(points.into_iter().map(Geometry::Point));
        }
    }

    let result = if parts.is_empty() {
        empty_result(result_dim, ctx)
    } else {
        let factory = GeometryFactory::new(pm, ctx.srid);
        factory.build_geometry(parts)
    };

    if config.validate_output {
        result.check_validity()?;
    }
    Ok(result)
}

/// The rectangle rings may be clipped against: the overlap of the operand
/// envelopes (for INTERSECTION) or the left operand's envelope (for
/// DIFFERENCE), expanded by a generous safety margin so clipping can never
/// interfere with real intersections.
fn clip_envelope<F: GeoFloat>(
    op: OverlayOp,
    a: &Geometry<F>,
    b: &Geometry<F>,
    pm: &PrecisionModel,
) -> Option<Rect<F>> {
    let env_a = a.envelope()?;
    let env_b = b.envelope()?;
    let base = match op {
        OverlayOp::Intersection => env_a.intersection(&env_b)?,
        OverlayOp::Difference => env_a,
        _ => return None,
    };
    let ten = F::from(10.0).expect("small constants are representable");
    let mut margin = base.width().max(base.height()) / ten;
    if let Some(grid) = pm.grid_size() {
        let grid = F::from(grid).unwrap_or_else(F::one);
        margin = margin.max(grid * ten);
    }
    if margin <= F::zero() {
        margin = F::one();
    }
    Some(base.expanded_by(margin))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::equals_exact::EqualsExact;
    use crate::wkt;

    #[test]
    fn intersection_of_overlapping_squares() {
        let a: Geometry<f64> =
            wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
        let b: Geometry<f64> =
            wkt! { POLYGON((5.0 5.0,15.0 5.0,15.0 15.0,5.0 15.0,5.0 5.0)) }.into();
        let result = overlay(&a, &b, OverlayOp::Intersection).unwrap();
        let expected: Geometry<f64> =
            wkt! { POLYGON((5.0 5.0,10.0 5.0,10.0 10.0,5.0 10.0,5.0 5.0)) }.into();
        use crate::algorithm::relate::Relate;
        assert!(result.relate(&expected).unwrap().is_equal_topo());
    }

    #[test]
    fn empty_operand_short_circuits() {
        let square: Geometry<f64> =
            wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
        let empty: Geometry<f64> = wkt! { POLYGON EMPTY }.into();

        let intersection = overlay(&square, &empty, OverlayOp::Intersection).unwrap();
        assert!(intersection.is_empty());

        let union = overlay(&square, &empty, OverlayOp::Union).unwrap();
        assert!(union.equals_exact(&square, 0.0));

        let difference = overlay(&empty, &square, OverlayOp::Difference).unwrap();
        assert!(difference.is_empty());
    }

    #[test]
    fn difference_is_asymmetric() {
        let a: Geometry<f64> =
            wkt! { POLYGON((0.0 0.0,10.0 0.0,10.0 10.0,0.0 10.0,0.0 0.0)) }.into();
        let b: Geometry<f64> =
            wkt! { POLYGON((5.0 -5.0,15.0 -5.0,15.0 5.0,5.0 5.0,5.0 -5.0)) }.into();
        let result = overlay(&a, &b, OverlayOp::Difference).unwrap();
        let expected: Geometry<f64> =
            wkt! { POLYGON((0.0 0.0,5.0 0.0,5.0 5.0,10.0 5.0,10.0 10.0,0.0 10.0,0.0 0.0)) }
                .into();
        use crate::algorithm::relate::Relate;
        assert!(result.relate(&expected).unwrap().is_equal_topo());
    }
}
