//! The `planar-types` crate provides planar geometry primitive types.
//!
//! # Types
//!
//! - **[`Coord`]**: a two-dimensional coordinate. All geometry types are
//!   composed of [`Coord`]s, though [`Coord`] itself is not a [`Geometry`]
//!   type.
//! - **[`CoordSeq`]**: an ordered container of coordinates sharing one
//!   [`Dims`] shape (XY, XYZ, XYM or XYZM); Z and M ordinates ride as side
//!   payloads.
//! - **[`Point`]**: a single (possibly absent) coordinate.
//! - **[`Line`]**: a line segment of two [`Coord`]s; a working primitive,
//!   not a geometry variant.
//! - **[`LineString`]**: a path of two or more contiguous segments.
//! - **[`LinearRing`]**: a closed [`LineString`] of at least four
//!   coordinates, the building block of [`Polygon`] boundaries.
//! - **[`Polygon`]**: a bounded area with one exterior ring and zero or more
//!   interior rings.
//! - **[`MultiPoint`]**, **[`MultiLineString`]**, **[`MultiPolygon`]**:
//!   homogeneous collections.
//! - **[`GeometryCollection`]**: a heterogeneous collection.
//! - **[`Rect`]**: an axis-aligned envelope.
//!
//! # Semantics
//!
//! The types aim to adhere to the [OpenGIS Simple feature access][OGC-SFA]
//! standards, so they interoperate with other implementations of the
//! standards: JTS, GEOS, etc. Every geometry carries a [`GeomContext`]
//! (precision model and SRID) stamped by the [`GeometryFactory`], and a
//! lazily-computed envelope. Geometries are immutable once constructed:
//! mutating operations go through the factory or the mapping surface of the
//! algorithm crate and return fresh values.
//!
//! [OGC-SFA]: //www.ogc.org/standards/sfa

use core::fmt::Debug;
use num_traits::{Num, NumCast};

#[macro_use]
mod macros;
#[macro_use]
mod wkt_macro;

mod context;
mod coord_seq;
mod envelope;
mod error;
mod factory;
pub mod geometry;
mod geometry_cow;
mod precision;

pub use context::GeomContext;
pub use coord_seq::{CoordSeq, Dims};
pub use error::Error;
pub use factory::GeometryFactory;
pub use geometry::*;
pub use geometry_cow::GeometryCow;
pub use precision::PrecisionModel;

/// The scalar type backing coordinate ordinates: integer or floating point.
pub trait CoordNum: Num + Copy + NumCast + PartialOrd + Debug {}
impl<T: Num + Copy + NumCast + PartialOrd + Debug> CoordNum for T {}

/// A floating point coordinate scalar.
pub trait CoordFloat: CoordNum + num_traits::Float {}
impl<T: CoordNum + num_traits::Float> CoordFloat for T {}
