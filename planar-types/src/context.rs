use crate::PrecisionModel;

/// Construction context carried by every geometry: the precision model its
/// coordinates were made precise against, and an opaque spatial reference id.
///
/// The context is stamped by the [`GeometryFactory`](crate::GeometryFactory);
/// geometries built directly through type constructors get the default
/// (floating, SRID 0).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeomContext {
    pub precision_model: PrecisionModel,
    pub srid: i32,
}

impl GeomContext {
    pub fn new(precision_model: PrecisionModel, srid: i32) -> Self {
        GeomContext {
            precision_model,
            srid,
        }
    }
}
