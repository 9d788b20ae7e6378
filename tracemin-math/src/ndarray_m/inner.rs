// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::ndarray_m::adjoint;
use crate::{BlockGram, BlockInner, MatDot};
use ndarray::{Array2, Zip};
use ndarray_linalg::Scalar;
use num_traits::identities::Zero;

impl<A> BlockGram<Array2<A>> for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn xtx(&self) -> Array2<A> {
        adjoint(self).dot(self)
    }
}

impl<A> BlockInner<Array2<A>> for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn xty(&self, other: &Self) -> Array2<A> {
        adjoint(self).dot(other)
    }
}

impl<A> MatDot<A::Real> for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn frob_dot(&self, other: &Self) -> A::Real {
        Zip::from(self)
            .and(other)
            .fold(A::Real::zero(), |acc, z, w| acc + (z.conj() * *w).re())
    }
}
