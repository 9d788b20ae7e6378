// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::SqInvHpd;
use anyhow::Error;
use ndarray::Array2;
use ndarray_linalg::cholesky::InverseC;
use ndarray_linalg::{Lapack, Scalar};

impl<A> SqInvHpd for Array2<A>
where
    A: Scalar + Lapack,
{
    #[inline]
    fn inv_hpd(&self) -> Result<Self, Error> {
        Ok(self.invc()?)
    }
}
