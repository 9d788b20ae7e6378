// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Conjugate-gradient direction bookkeeping
//!
//! The search direction is `D ← γ·D + X` where `X` is the preconditioned
//! gradient. The flavor of the `γ` update is decided by how many workspace
//! blocks the caller supplied: with only two there is no room to carry a
//! direction at all (steepest descent), three afford Fletcher–Reeves and four
//! the Polak–Ribière update, which additionally needs the previous gradient.
//!
//! # References:
//!
//! \[0\] Jorge Nocedal and Stephen J. Wright (2006). Numerical Optimization.
//! Springer. ISBN 0-387-30303-0.

use crate::core::TraceminFloat;

/// The direction-update rule afforded by the workspace count
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CgFlavor {
    /// `D = X` every iteration
    SteepestDescent,
    /// `γ = tr(G†X) / tr(G†X)_prev`
    FletcherReeves,
    /// `γ = tr((G − G_prev)†X) / tr(G†X)_prev`
    PolakRibiere,
}

impl CgFlavor {
    pub(crate) fn for_workspaces(n_work: usize) -> Self {
        match n_work {
            0..=2 => CgFlavor::SteepestDescent,
            3 => CgFlavor::FletcherReeves,
            _ => CgFlavor::PolakRibiere,
        }
    }

    pub(crate) fn uses_cg(self) -> bool {
        self != CgFlavor::SteepestDescent
    }
}

/// The CG mixing factor `γ = numerator / tgx_prev`.
///
/// A zero `tgx_prev` marks the first iteration (or a degenerate gradient);
/// both give a steepest-descent step.
#[allow(clippy::float_cmp)]
pub(crate) fn conjugate_gamma<F: TraceminFloat>(numerator: F, tgx_prev: F) -> F {
    if tgx_prev == F::zero() {
        F::zero()
    } else {
        numerator / tgx_prev
    }
}

/// Whether the periodic steepest-descent reset fires on this iteration.
pub(crate) fn reset_due(reset_every: Option<u64>, iteration: u64) -> bool {
    match reset_every {
        Some(n) if n > 0 => (iteration + 1) % n == 0,
        _ => false,
    }
}
