//! Precision utilities: common-bit removal for improving the conditioning
//! of operations on large-coordinate data. (The precision *model* itself
//! lives with the primitive types; the snap-rounding machinery lives with
//! the noders.)

pub mod common_bits;

pub use common_bits::{CommonBits, CommonBitsRemover};
