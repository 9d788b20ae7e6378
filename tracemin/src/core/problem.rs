// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Traits describing the user-supplied collaborators of the eigensolver.
//!
//! The solver owns nothing about the problem: the operator `A`, the
//! preconditioner `K` and the constraint projector are all implemented on
//! user types and borrowed for the duration of a `solve` call. State a C
//! implementation would stash behind a `void *` context lives in `&mut self`.

use crate::core::Error;
use tracemin_math::MatAssign;

/// A Hermitian linear operator acting on a block of trial vectors.
pub trait Operator<B> {
    /// Compute `output = A·input`.
    ///
    /// `is_current` is `true` when `input` is the current iterate `Y` and
    /// `false` when it is a scratch direction (the conjugate-gradient search
    /// direction `D`). Operators which cache intermediate results keyed on
    /// the iterate can use the flag to decide whether to refresh the cache.
    ///
    /// The implementation must be linear and Hermitian, keep the block shape,
    /// and be callable several times within one solver iteration.
    fn apply(&mut self, input: &B, output: &mut B, is_current: bool) -> Result<(), Error>;
}

/// A preconditioner mapping the gradient block to a search-direction block.
///
/// Any symmetric (Hermitian) positive-definite mapping is admissible; a good
/// choice approximates `A⁻¹` on the subspace the solver is working in.
pub trait Preconditioner<B, M, F> {
    /// Compute `out = K(gradient)`.
    ///
    /// `y` is the current (non-orthonormal) block and `yty` its Gram matrix.
    /// `eigenvalues` is `None` during iteration because the block is not
    /// diagonalized until convergence.
    fn apply(
        &mut self,
        gradient: &B,
        out: &mut B,
        y: &B,
        eigenvalues: Option<&[F]>,
        yty: &M,
    ) -> Result<(), Error>;
}

/// A projector onto the admissible manifold of blocks.
///
/// The solver applies it once before the first iteration and after every
/// update of `Y` which precedes the next gradient evaluation. It must be
/// idempotent and preserve the block shape.
pub trait Constraint<B> {
    /// Project `y` in place.
    fn project(&mut self, y: &mut B) -> Result<(), Error>;
}

/// The identity preconditioner: `out = gradient`.
///
/// Stands in when no preconditioning is wanted, the way a NULL callback
/// would in a C interface.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IdentityPreconditioner {}

impl IdentityPreconditioner {
    /// Construct an `IdentityPreconditioner`
    pub fn new() -> Self {
        IdentityPreconditioner {}
    }
}

impl<B, M, F> Preconditioner<B, M, F> for IdentityPreconditioner
where
    B: MatAssign,
{
    fn apply(
        &mut self,
        gradient: &B,
        out: &mut B,
        _y: &B,
        _eigenvalues: Option<&[F]>,
        _yty: &M,
    ) -> Result<(), Error> {
        out.assign_from(gradient);
        Ok(())
    }
}

/// The no-op constraint: every block is admissible.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoConstraint {}

impl NoConstraint {
    /// Construct a `NoConstraint`
    pub fn new() -> Self {
        NoConstraint {}
    }
}

impl<B> Constraint<B> for NoConstraint {
    fn project(&mut self, _y: &mut B) -> Result<(), Error> {
        Ok(())
    }
}
