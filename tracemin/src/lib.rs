// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! tracemin computes the lowest `p` eigenpairs of a large Hermitian linear
//! operator by minimizing the trace of the block Rayleigh quotient
//! `tr((Y†Y)⁻¹·Y†AY)` with a preconditioned nonlinear conjugate-gradient
//! iteration. The block `Y` of `p` trial vectors is never orthonormalized;
//! the method works directly on the manifold of non-orthonormal blocks
//! through the inverse Gram matrix.
//!
//! The operator, an optional preconditioner and an optional constraint
//! projector are supplied as trait implementations on user types, so the
//! solver never needs to know what `A` looks like — a dense matrix, a
//! stencil, an FFT-based operator or something distributed across processes
//! all work the same way. The block storage is equally open: the solver is
//! written against the operation traits of [`tracemin-math`](tracemin_math),
//! which ships an implementation for `ndarray` (real and complex scalars)
//! behind its `ndarray_v0_15` feature.
//!
//! # Algorithm
//!
//! Each iteration normalizes `Y`, inverts the Gram matrix, forms the
//! projected gradient `(I − YUY†)AYU`, preconditions it, combines it with
//! the previous search direction (Fletcher–Reeves or Polak–Ribière,
//! depending on how many workspace blocks are available) and minimizes the
//! trace along the rotation `cos(θ)·Y + (sin(θ)/‖D‖)·D`. The line
//! minimization is either *exact* (bracketing plus Ridder root-finding on
//! the trace derivative) or a single Newton step with a finite-difference
//! second derivative; the solver measures how long the block operations take
//! and switches between the two automatically.
//!
//! On convergence the block is rotated onto eigenvector approximations by
//! diagonalizing `Y†AY` in the `Y†Y` metric, and the eigenvalues are
//! returned in ascending order.
//!
//! # Example
//!
//! ```
//! use ndarray::{array, Array2};
//! use tracemin::core::{Error, IdentityPreconditioner, NoConstraint, Operator};
//! use tracemin::solver::Eigensolver;
//!
//! struct Dense {
//!     a: Array2<f64>,
//! }
//!
//! impl Operator<Array2<f64>> for Dense {
//!     fn apply(
//!         &mut self,
//!         input: &Array2<f64>,
//!         output: &mut Array2<f64>,
//!         _is_current: bool,
//!     ) -> Result<(), Error> {
//!         output.assign(&self.a.dot(input));
//!         Ok(())
//!     }
//! }
//!
//! # fn run() -> Result<(), Error> {
//! let mut operator = Dense {
//!     a: Array2::from_diag(&array![1.0, 2.0, 3.0, 4.0, 5.0]),
//! };
//! let mut y = Array2::from_shape_fn((5, 2), |(i, j)| 1.0 / (1.0 + (i + 2 * j) as f64));
//! let mut work = vec![Array2::<f64>::zeros((5, 2)); 3];
//! let mut eigenvalues = vec![0.0; 2];
//!
//! let result = Eigensolver::new(1e-10)?.solve(
//!     &mut operator,
//!     &mut IdentityPreconditioner::new(),
//!     &mut NoConstraint::new(),
//!     &mut y,
//!     &mut eigenvalues,
//!     &mut work,
//! )?;
//!
//! # assert!((eigenvalues[0] - 1.0).abs() < 1e-7);
//! # assert!((eigenvalues[1] - 2.0).abs() < 1e-7);
//! # assert!(result.iterations < 10_000);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```
//!
//! Two workspace blocks give plain steepest descent, three enable
//! conjugate-gradient with the Fletcher–Reeves update and four or more
//! enable Polak–Ribière.
//!
//! # Crate features
//!
//! - `slog-logger`: per-iteration progress logging via
//!   [`Eigensolver::with_logger`](`crate::solver::Eigensolver::with_logger`)
//!   (enabled by default)
//! - `serde1`: serde support for the configuration enums and the solve
//!   report (enabled by default)
//!
//! # References
//!
//! \[0\] M. C. Payne, M. P. Teter, D. C. Allan, T. A. Arias and
//! J. D. Joannopoulos (1992). Iterative minimization techniques for ab
//! initio total-energy calculations. Rev. Mod. Phys. 64, 1045.
//!
//! \[1\] A. Edelman, T. A. Arias and S. T. Smith (1998). The geometry of
//! algorithms with orthogonality constraints. SIAM J. Matrix Anal. Appl.
//! 20(2), 303–353.
#![warn(missing_docs)]
#![allow(unused_attributes)]
#![deny(clippy::float_cmp)]

/// Core types: errors, collaborator traits, float alias, logging helpers
#[macro_use]
pub mod core;
/// The eigensolver and its components
pub mod solver;
