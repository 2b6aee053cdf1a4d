use super::Kernel;
use crate::CoordNum;
use std::marker::PhantomData;

/// Kernel for scalars where the default arithmetic is already exact:
/// signed integers small enough that the orientation determinant cannot
/// overflow.
#[derive(Default)]
pub struct SimpleKernel<T>(PhantomData<T>);

impl<T: CoordNum> Kernel for SimpleKernel<T> {
    type Scalar = T;
}
