// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::{BlockAddProd, BlockSetProd, SqProd};
use ndarray::Array2;
use ndarray_linalg::Scalar;

impl<A> BlockSetProd<Array2<A>> for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn set_prod(&mut self, w: &Self, s: &Array2<A>) {
        self.assign(&w.dot(s));
    }
}

impl<A> BlockAddProd<Array2<A>, A::Real> for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn add_prod(&mut self, a: A::Real, w: &Self, s: &Array2<A>) {
        let t = w.dot(s);
        let a = A::from_real(a);
        self.zip_mut_with(&t, |z, v| *z = *z + a * *v);
    }
}

impl<A> SqProd for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn prod(&self, other: &Self) -> Self {
        self.dot(other)
    }
}
