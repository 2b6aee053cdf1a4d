use crate::algorithm::kernels::{HasKernel, Kernel, Orientation::*};
use crate::{coord, Coord, GeoFloat, Line, Rect};

/// The result of intersecting two non-disjoint [`Line`]s.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum LineIntersection<F: GeoFloat> {
    /// Lines intersect in a single point
    SinglePoint {
        intersection: Coord<F>,
        /// For Lines which intersect in a single point, that point may be
        /// either an endpoint or in the interior of each Line. If the point
        /// lies in the interior of both Lines, we call it a _proper_
        /// intersection.
        ///
        /// Due to the limited precision of floating point arithmetic the
        /// calculated intersection point of two nearly-parallel lines may be
        /// snapped to one of the endpoints even when all four endpoints are
        /// distinct; `is_proper` stays `true` in that case.
        is_proper: bool,
    },

    /// Overlapping Lines intersect in a line segment
    Collinear { intersection: Line<F> },
}

impl<F: GeoFloat> LineIntersection<F> {
    pub fn is_proper(&self) -> bool {
        match self {
            Self::Collinear { .. } => false,
            Self::SinglePoint { is_proper, .. } => *is_proper,
        }
    }
}

/// Returns the intersection between two [`Line`]s, with the contract that
/// segments which truly touch only at an endpoint report exactly that
/// endpoint: the coordinate is copied, never recomputed.
///
/// ```
/// use planar::{coord, Line};
/// use planar::line_intersection::{line_intersection, LineIntersection};
///
/// let line_1 = Line::new(coord! {x: 0.0, y: 0.0}, coord! { x: 5.0, y: 5.0 } );
/// let line_2 = Line::new(coord! {x: 0.0, y: 5.0}, coord! { x: 5.0, y: 0.0 } );
/// let expected = LineIntersection::SinglePoint { intersection: coord! { x: 2.5, y: 2.5 }, is_proper: true };
/// assert_eq!(line_intersection(line_1, line_2), Some(expected));
///
/// let line_1 = Line::new(coord! {x: 0.0, y: 0.0}, coord! { x: 5.0, y: 5.0 } );
/// let line_2 = Line::new(coord! {x: 5.0, y: 5.0}, coord! { x: 5.0, y: 0.0 } );
/// let expected = LineIntersection::SinglePoint { intersection: coord! { x: 5.0, y: 5.0 }, is_proper: false };
/// assert_eq!(line_intersection(line_1, line_2), Some(expected));
///
/// let line_1 = Line::new(coord! {x: 0.0, y: 0.0}, coord! { x: 5.0, y: 5.0 } );
/// let line_2 = Line::new(coord! {x: 3.0, y: 3.0}, coord! { x: 6.0, y: 6.0 } );
/// let expected = LineIntersection::Collinear { intersection: Line::new(coord! { x: 3.0, y: 3.0 }, coord! { x: 5.0, y: 5.0 })};
/// assert_eq!(line_intersection(line_1, line_2), Some(expected));
/// ```
pub fn line_intersection<F>(p: Line<F>, q: Line<F>) -> Option<LineIntersection<F>>
where
    F: GeoFloat,
{
    if !p.envelope().intersects(&q.envelope()) {
        return None;
    }

    let p_q1 = F::Ker::orient2d(p.start, p.end, q.start);
    let p_q2 = F::Ker::orient2d(p.start, p.end, q.end);
    if matches!(
        (p_q1, p_q2),
        (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)
    ) {
        return None;
    }

    let q_p1 = F::Ker::orient2d(q.start, q.end, p.start);
    let q_p2 = F::Ker::orient2d(q.start, q.end, p.end);
    if matches!(
        (q_p1, q_p2),
        (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)
    ) {
        return None;
    }

    if matches!(
        (p_q1, p_q2, q_p1, q_p2),
        (Collinear, Collinear, Collinear, Collinear)
    ) {
        return collinear_intersection(p, q);
    }

    // At this point there is a single intersection point (the lines are not
    // collinear).
    //
    // If the intersection is an endpoint, copy the endpoint as the
    // intersection point. Copying the point rather than computing it ensures
    // the point has the exact value, which is important for robustness. It
    // is sufficient to check for an endpoint which lies on the other line,
    // since the input lines must intersect here.
    if p_q1 == Collinear || p_q2 == Collinear || q_p1 == Collinear || q_p2 == Collinear {
        // Check for two equal endpoints explicitly; two separate
        // orientation tests can disagree about a shared endpoint that sits
        // at a large coordinate.
        let intersection: Coord<F>;
        #[allow(clippy::suspicious_operation_groupings)]
        if p.start == q.start || p.start == q.end {
            intersection = p.start;
        } else if p.end == q.start || p.end == q.end {
            intersection = p.end;
            // Now check to see if any endpoint lies on the interior of the other segment.
        } else if p_q1 == Collinear {
            intersection = q.start;
        } else if p_q2 == Collinear {
            intersection = q.end;
        } else if q_p1 == Collinear {
            intersection = p.start;
        } else {
            debug_assert_eq!(q_p2, Collinear);
            intersection = p.end;
        }
        Some(LineIntersection::SinglePoint {
            intersection,
            is_proper: false,
        })
    } else {
        let intersection = proper_intersection(p, q);
        Some(LineIntersection::SinglePoint {
            intersection,
            is_proper: true,
        })
    }
}

fn collinear_intersection<F: GeoFloat>(p: Line<F>, q: Line<F>) -> Option<LineIntersection<F>> {
    fn collinear<F: GeoFloat>(intersection: Line<F>) -> LineIntersection<F> {
        LineIntersection::Collinear { intersection }
    }

    fn improper<F: GeoFloat>(intersection: Coord<F>) -> LineIntersection<F> {
        LineIntersection::SinglePoint {
            intersection,
            is_proper: false,
        }
    }

    let p_bounds = p.envelope();
    let q_bounds = q.envelope();
    Some(
        match (
            p_bounds.intersects_coord(q.start),
            p_bounds.intersects_coord(q.end),
            q_bounds.intersects_coord(p.start),
            q_bounds.intersects_coord(p.end),
        ) {
            (true, true, _, _) => collinear(q),
            (_, _, true, true) => collinear(p),
            (true, false, true, false) if q.start == p.start => improper(q.start),
            (true, _, true, _) => collinear(Line::new(q.start, p.start)),
            (true, false, false, true) if q.start == p.end => improper(q.start),
            (true, _, _, true) => collinear(Line::new(q.start, p.end)),
            (false, true, true, false) if q.end == p.start => improper(q.end),
            (_, true, true, _) => collinear(Line::new(q.end, p.start)),
            (false, true, false, true) if q.end == p.end => improper(q.end),
            (_, true, _, true) => collinear(Line::new(q.end, p.end)),
            _ => return None,
        },
    )
}

/// Squared distance from `point` to the segment `line`.
pub(crate) fn point_segment_distance_sq<F: GeoFloat>(point: Coord<F>, line: Line<F>) -> F {
    if line.start == line.end {
        return F::Ker::square_euclidean_distance(point, line.start);
    }
    let d = line.delta();
    let len_sq = d.x * d.x + d.y * d.y;
    let t = ((point.x - line.start.x) * d.x + (point.y - line.start.y) * d.y) / len_sq;
    let t = t.max(F::zero()).min(F::one());
    let projected = coord! {
        x: line.start.x + t * d.x,
        y: line.start.y + t * d.y,
    };
    F::Ker::square_euclidean_distance(point, projected)
}

/// Finds the endpoint of the segments P and Q which is closest to the other
/// segment. This is a reasonable surrogate for the true intersection point
/// in ill-conditioned cases (e.g. where two segments are nearly coincident,
/// or where the endpoint of one segment lies almost on the other segment).
///
/// This replaces the older CentralEndpoint heuristic, which chose the wrong
/// endpoint in some cases where the segments had very distinct slopes and
/// one endpoint lay almost on the other segment.
fn nearest_endpoint<F: GeoFloat>(p: Line<F>, q: Line<F>) -> Coord<F> {
    let mut nearest_pt = p.start;
    let mut min_dist = point_segment_distance_sq(p.start, q);

    let dist = point_segment_distance_sq(p.end, q);
    if dist < min_dist {
        min_dist = dist;
        nearest_pt = p.end;
    }
    let dist = point_segment_distance_sq(q.start, p);
    if dist < min_dist {
        min_dist = dist;
        nearest_pt = q.start;
    }
    let dist = point_segment_distance_sq(q.end, p);
    if dist < min_dist {
        nearest_pt = q.end;
    }
    nearest_pt
}

fn raw_line_intersection<F: GeoFloat>(p: Line<F>, q: Line<F>) -> Option<Coord<F>> {
    let p_min_x = p.start.x.min(p.end.x);
    let p_min_y = p.start.y.min(p.end.y);
    let p_max_x = p.start.x.max(p.end.x);
    let p_max_y = p.start.y.max(p.end.y);

    let q_min_x = q.start.x.min(q.end.x);
    let q_min_y = q.start.y.min(q.end.y);
    let q_max_x = q.start.x.max(q.end.x);
    let q_max_y = q.start.y.max(q.end.y);

    let int_min_x = p_min_x.max(q_min_x);
    let int_max_x = p_max_x.min(q_max_x);
    let int_min_y = p_min_y.max(q_min_y);
    let int_max_y = p_max_y.min(q_max_y);

    let two = F::one() + F::one();
    let mid_x = (int_min_x + int_max_x) / two;
    let mid_y = (int_min_y + int_max_y) / two;

    // condition ordinate values by subtracting midpoint
    let p1x = p.start.x - mid_x;
    let p1y = p.start.y - mid_y;
    let p2x = p.end.x - mid_x;
    let p2y = p.end.y - mid_y;
    let q1x = q.start.x - mid_x;
    let q1y = q.start.y - mid_y;
    let q2x = q.end.x - mid_x;
    let q2y = q.end.y - mid_y;

    // unrolled computation using homogeneous coordinates eqn
    let px = p1y - p2y;
    let py = p2x - p1x;
    let pw = p1x * p2y - p2x * p1y;

    let qx = q1y - q2y;
    let qy = q2x - q1x;
    let qw = q1x * q2y - q2x * q1y;

    let xw = py * qw - qy * pw;
    let yw = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = xw / w;
    let y_int = yw / w;

    // check for parallel lines
    if (x_int.is_nan() || x_int.is_infinite()) || (y_int.is_nan() || y_int.is_infinite()) {
        None
    } else {
        // de-condition intersection point
        Some(coord! {
            x: x_int + mid_x,
            y: y_int + mid_y,
        })
    }
}

/// This method computes the actual value of the intersection point.
/// To obtain the maximum precision from the intersection calculation,
/// the coordinates are normalized by subtracting the minimum
/// ordinate values (in absolute value).  This has the effect of
/// removing common significant digits from the calculation to
/// maintain more bits of precision.
fn proper_intersection<F: GeoFloat>(p: Line<F>, q: Line<F>) -> Coord<F> {
    // Computes a segment intersection using homogeneous coordinates.
    // Round-off error can cause the raw computation to fail (usually due to
    // the segments being approximately parallel). If this happens, a
    // reasonable approximation is computed instead.
    let mut int_pt = raw_line_intersection(p, q).unwrap_or_else(|| nearest_endpoint(p, q));

    if !(p.envelope().intersects_coord(int_pt) && q.envelope().intersects_coord(int_pt)) {
        // compute a safer result
        int_pt = nearest_endpoint(p, q);
    }
    int_pt
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn disjoint_lines() {
        let line_1 = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 });
        let line_2 = Line::new(coord! { x: 0.0, y: 1.0 }, coord! { x: 5.0, y: 6.0 });
        assert_eq!(line_intersection(line_1, line_2), None);
    }

    #[test]
    fn endpoint_touch_is_exact() {
        // The computed intersection of nearly-collinear segments can drift;
        // a genuine endpoint contact must be returned bit-exact.
        let shared = coord! { x: 19.850257749638203, y: 46.29709338043669 };
        let line_1 = Line::new(shared, coord! { x: 20.31970698357233, y: 46.76654261437082 });
        let line_2 = Line::new(coord! { x: -48.51001596420236, y: -22.063180333403878 }, shared);
        match line_intersection(line_1, line_2) {
            Some(LineIntersection::SinglePoint {
                intersection,
                is_proper,
            }) => {
                assert_eq!(intersection, shared);
                assert!(!is_proper);
            }
            other => panic!("unexpected intersection: {other:?}"),
        }
    }

    /// Based on JTS test `testCentralEndpointHeuristicFailure`:
    /// one segment lies at a significant angle to the other, with only one
    /// endpoint close to the other segment. The nearest-endpoint heuristic
    /// must pick that endpoint.
    #[test]
    fn nearest_endpoint_heuristic() {
        let line_1 = Line::new(
            coord! { x: 163.81867067, y: -211.31840378 },
            coord! { x: 165.9174252, y: -214.1665075 },
        );
        let line_2 = Line::new(
            coord! { x: 2.84139601, y: -57.95412726 },
            coord! { x: 469.59990601, y: -502.63851732 },
        );
        let actual = line_intersection(line_1, line_2);
        let expected = LineIntersection::SinglePoint {
            intersection: coord! { x: 163.81867067, y: -211.31840378 },
            is_proper: true,
        };
        assert_eq!(actual, Some(expected));
    }

    #[test]
    fn collinear_overlap() {
        let line_1 = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 0.0 });
        let line_2 = Line::new(coord! { x: 3.0, y: 0.0 }, coord! { x: 9.0, y: 0.0 });
        let expected = LineIntersection::Collinear {
            intersection: Line::new(coord! { x: 3.0, y: 0.0 }, coord! { x: 5.0, y: 0.0 }),
        };
        assert_eq!(line_intersection(line_1, line_2), Some(expected));
    }
}
