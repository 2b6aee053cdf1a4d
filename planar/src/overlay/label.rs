use crate::algorithm::coordinate_position::CoordPos;

/// What role an edge plays in one input geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OverlayDim {
    /// the edge is not part of this input at all
    NotPart,
    /// part of a linear component of this input
    Line,
    /// part of an areal boundary ring of this input
    Boundary,
}

/// The label of one edge for one input: its role plus the location of the
/// edge's left and right sides in that input's area.
///
/// For a `Boundary` edge the sides are known from the ring orientation at
/// extraction time (after normalization, the interior is always on the left
/// of the ring direction). For `Line` and `NotPart` edges the edge lies
/// wholly inside or wholly outside the input's area, so a single located
/// position fills every slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct InputLabel {
    pub dim: OverlayDim,
    pub left: Option<CoordPos>,
    pub right: Option<CoordPos>,
}

impl InputLabel {
    pub fn not_part() -> Self {
        InputLabel {
            dim: OverlayDim::NotPart,
            left: None,
            right: None,
        }
    }

    pub fn line() -> Self {
        InputLabel {
            dim: OverlayDim::Line,
            left: None,
            right: None,
        }
    }

    /// A boundary edge with the input's interior on its left.
    pub fn boundary_interior_left() -> Self {
        InputLabel {
            dim: OverlayDim::Boundary,
            left: Some(CoordPos::Inside),
            right: Some(CoordPos::Outside),
        }
    }

    pub fn flip(&self) -> Self {
        InputLabel {
            dim: self.dim,
            left: self.right,
            right: self.left,
        }
    }
}

/// The full label of a (merged, undirected) overlay edge: one [`InputLabel`]
/// per input geometry, oriented relative to the edge's canonical direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct OverlayLabel {
    inputs: [InputLabel; 2],
}

impl OverlayLabel {
    pub fn new() -> Self {
        OverlayLabel {
            inputs: [InputLabel::not_part(), InputLabel::not_part()],
        }
    }

    pub fn with_input(geom_index: usize, input: InputLabel) -> Self {
        let mut label = OverlayLabel::new();
        label.inputs[geom_index] = input;
        label
    }

    pub fn input(&self, geom_index: usize) -> &InputLabel {
        &self.inputs[geom_index]
    }

    pub fn input_mut(&mut self, geom_index: usize) -> &mut InputLabel {
        &mut self.inputs[geom_index]
    }

    pub fn dim(&self, geom_index: usize) -> OverlayDim {
        self.inputs[geom_index].dim
    }

    pub fn is_boundary(&self, geom_index: usize) -> bool {
        self.inputs[geom_index].dim == OverlayDim::Boundary
    }

    pub fn is_any_line(&self) -> bool {
        self.inputs
            .iter()
            .any(|input| input.dim == OverlayDim::Line)
    }

    /// Merge the label of a coincident duplicate edge (already aligned to
    /// this edge's canonical direction). Boundary information wins over
    /// located information, and `Inside` wins per side: a side is interior
    /// if any coincident component claims it is.
    pub fn merge(&mut self, other: &OverlayLabel) {
        for geom_index in 0..2 {
            let ours = &mut self.inputs[geom_index];
            let theirs = &other.inputs[geom_index];
            match (ours.dim, theirs.dim) {
                (_, OverlayDim::NotPart) => {}
                (OverlayDim::NotPart, _) => *ours = *theirs,
                (OverlayDim::Line, OverlayDim::Line) => {}
                (OverlayDim::Line, OverlayDim::Boundary) => *ours = *theirs,
                (OverlayDim::Boundary, OverlayDim::Line) => {}
                (OverlayDim::Boundary, OverlayDim::Boundary) => {
                    let inside_wins = |a: Option<CoordPos>, b: Option<CoordPos>| {
                        if a == Some(CoordPos::Inside) || b == Some(CoordPos::Inside) {
                            Some(CoordPos::Inside)
                        } else {
                            a.or(b)
                        }
                    };
                    ours.left = inside_wins(ours.left, theirs.left);
                    ours.right = inside_wins(ours.right, theirs.right);
                }
            }
        }
    }

    /// The area location of a side of the edge (canonical direction) in one
    /// input. `left`/`right` are filled in for every dim by the labelling
    /// pass before this is consulted.
    pub fn side_location(&self, geom_index: usize, left_side: bool) -> CoordPos {
        let input = &self.inputs[geom_index];
        let side = if left_side { input.left } else { input.right };
        side.unwrap_or(CoordPos::Outside)
    }

    /// Fill the located area position for an input whose sides are unknown.
    pub fn set_located(&mut self, geom_index: usize, position: CoordPos) {
        let input = &mut self.inputs[geom_index];
        debug_assert!(
            input.dim != OverlayDim::Boundary,
            "boundary sides are known from ring orientation"
        );
        input.left = Some(position);
        input.right = Some(position);
    }

    pub fn is_located(&self, geom_index: usize) -> bool {
        let input = &self.inputs[geom_index];
        input.left.is_some() && input.right.is_some()
    }
}
