pub(crate) use edge_set_intersector::{
    EdgeSetIntersector, SimpleEdgeSetIntersector, StrTreeEdgeSetIntersector,
};
pub(crate) use segment::Segment;
pub(crate) use segment_intersector::SegmentIntersector;

mod edge_set_intersector;
mod segment;
mod segment_intersector;
