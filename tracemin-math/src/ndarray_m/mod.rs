// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Implementations of the math traits for `ndarray::Array2`.
//!
//! Blocks and small square matrices are both backed by `Array2<A>` with
//! `A: Scalar` from the `cauchy`/`ndarray-linalg` family, which covers
//! `f32`, `f64`, `Complex<f32>` and `Complex<f64>`. The two LAPACK-backed
//! operations (`inv_hpd`, `eigh_in_metric`) additionally require `A: Lapack`.

mod eigh;
mod inner;
mod inv;
mod prod;
mod shape;
mod small;
mod update;

use ndarray::Array2;
use ndarray_linalg::Scalar;

/// Conjugate transpose `Z†`
pub(crate) fn adjoint<A: Scalar>(m: &Array2<A>) -> Array2<A> {
    m.t().mapv(|v| v.conj())
}
