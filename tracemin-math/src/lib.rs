// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Math
//!
//! Math abstractions for the `tracemin` block eigensolver. The solver core
//! operates on two kinds of objects: tall *blocks* of `p` trial vectors of
//! dimension `n` (shape `(n, p)`) and *small square matrices* of order `p`
//! (Gram matrices, projected operators and scratch). It does not matter what
//! the backing store is — as long as the traits in this crate are implemented
//! the solver is happy. An implementation for `ndarray` (with
//! `ndarray-linalg` providing the two LAPACK-backed operations) is available
//! behind the `ndarray_v0_15` feature and covers real and complex scalars.
//!
//! Every trait represents a single operation, so backends only need to
//! provide what a particular solver configuration actually uses.
//!
//! Notation in the documentation below: `Z†` is the conjugate transpose of
//! `Z`, `tr` is the matrix trace and `Re` takes the real part. All scalar
//! coefficients accepted by these operations are real, even for complex
//! element types; the trace functional the solver minimizes is real-valued.

#[cfg(feature = "ndarray_v0_15")]
extern crate ndarray_0_15 as ndarray;

#[cfg(feature = "ndarray_v0_15")]
extern crate ndarray_linalg_0_16 as ndarray_linalg;

#[cfg(feature = "num-complex_0_4")]
extern crate num_complex_0_4 as num_complex;

#[cfg(feature = "ndarray_all")]
mod ndarray_m;
#[cfg(feature = "ndarray_all")]
pub use crate::ndarray_m::*;

use anyhow::Error;

/// Gram matrix `Z†Z` of a block
pub trait BlockGram<M> {
    /// Compute the Gram matrix `Z†Z` of `self`
    fn xtx(&self) -> M;
}

/// Mixed inner-product matrix `Z†W` of two blocks
pub trait BlockInner<M> {
    /// Compute `Z†W` where `Z` is `self`
    fn xty(&self, other: &Self) -> M;
}

/// Frobenius inner product `Re tr(Z†W)`
pub trait MatDot<F> {
    /// Compute `Re tr(Z†W)` where `Z` is `self`
    fn frob_dot(&self, other: &Self) -> F;
}

/// Block-times-small-matrix product `Z = W·S`
pub trait BlockSetProd<M> {
    /// Overwrite `self` with `W·S`
    fn set_prod(&mut self, w: &Self, s: &M);
}

/// Accumulated block-times-small-matrix product `Z += a·W·S`
pub trait BlockAddProd<M, F> {
    /// Add `a·W·S` to `self`
    fn add_prod(&mut self, a: F, w: &Self, s: &M);
}

/// In-place linear combination `Z = a·Z + b·W`
pub trait MatAxpby<F> {
    /// Overwrite `self` with `a·self + b·other`
    fn axpby(&mut self, a: F, b: F, other: &Self);
}

/// In-place scaling `Z = a·Z`
pub trait MatScale<F> {
    /// Multiply every element of `self` by `a`
    fn scale(&mut self, a: F);
}

/// Element-wise copy from another matrix of the same shape
pub trait MatAssign {
    /// Overwrite `self` with the contents of `other`
    fn assign_from(&mut self, other: &Self);
}

/// Reset to all zeros
pub trait MatZero {
    /// Set every element of `self` to zero
    fn set_zero(&mut self);
}

/// Fused difference-and-backup pass over two blocks
///
/// Visits every element exactly once: `self` becomes `self − prev` while
/// `prev` receives the incoming value of `self`. The conjugate-gradient
/// direction update needs this without allocating a third block.
pub trait BlockDiffSwap {
    /// Replace `self` by `self − prev` and `prev` by the old `self`
    fn diff_swap(&mut self, prev: &mut Self);
}

/// Shape of a block
pub trait BlockShape {
    /// Number of rows (the vector dimension `n`)
    fn nrows(&self) -> usize;
    /// Number of columns (the number of trial vectors `p`)
    fn ncols(&self) -> usize;
}

/// Real part of the trace of a small matrix
pub trait SqTrace<F> {
    /// Compute `Re tr(S)`
    fn trace_re(&self) -> F;
}

/// Product of two small matrices
pub trait SqProd {
    /// Compute `self·other`
    #[must_use]
    fn prod(&self, other: &Self) -> Self;
}

/// Hermitian part `(S + S†)/2` of a small matrix
pub trait SqSym {
    /// Compute `(self + self†)/2`
    #[must_use]
    fn symmetrized(&self) -> Self;
}

/// Inverse of a Hermitian positive-definite small matrix
pub trait SqInvHpd: Sized {
    /// Compute `self⁻¹`, typically via a Cholesky factorization.
    ///
    /// `self` must be Hermitian positive definite; backends are free to read
    /// only one triangle.
    fn inv_hpd(&self) -> Result<Self, Error>;
}

/// Generalized Hermitian-definite eigendecomposition of a small matrix
pub trait SqEighMetric<F>: Sized {
    /// Solve `self·v = λ·metric·v` for a Hermitian `self` and a Hermitian
    /// positive-definite `metric`.
    ///
    /// Returns the eigenvalues in ascending order together with the matrix
    /// `V` of eigenvectors normalized such that `V†·metric·V = I`.
    fn eigh_in_metric(&self, metric: &Self) -> Result<(Vec<F>, Self), Error>;
}
