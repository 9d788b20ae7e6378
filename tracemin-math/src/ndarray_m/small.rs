// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::ndarray_m::adjoint;
use crate::{SqSym, SqTrace};
use ndarray::Array2;
use ndarray_linalg::Scalar;
use num_traits::identities::Zero;

impl<A> SqTrace<A::Real> for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn trace_re(&self) -> A::Real {
        self.diag().iter().fold(A::Real::zero(), |acc, v| acc + v.re())
    }
}

impl<A> SqSym for Array2<A>
where
    A: Scalar,
{
    fn symmetrized(&self) -> Self {
        let h = adjoint(self);
        let half = A::from_real(A::real(0.5));
        let mut s = self + &h;
        s.mapv_inplace(|v| v * half);
        s
    }
}
