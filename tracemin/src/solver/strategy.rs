// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Line-minimization strategy selection
//!
//! The exact line minimization needs two extra block inner products and the
//! Ridder iteration on top of what the approximate (single Newton step)
//! strategy does. Whether that is worth it depends on how expensive the
//! block operations are relative to each other, so the solver measures them
//! and estimates the per-iteration cost of both strategies from the
//! operation counts.

use crate::core::TraceminFloat;
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// Guess for the convergence slowdown factor caused by the approximate line
/// minimization. Deliberately conservative: the exact minimization is more
/// reliable and should only be abandoned for a large speed gain.
const APPROX_SLOWDOWN_GUESS: f64 = 2.0;

/// Largest fractional improvement of the exact line minimization (over one
/// Newton step) at which the approximate strategy is still considered.
const APPROX_IMPROVEMENT_THRESHOLD: f64 = 0.05;

/// How the line-minimization strategy is chosen
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum LinminPolicy {
    /// Measure operation times and switch automatically (the default)
    #[default]
    Adaptive,
    /// Always run the exact bracketing + Ridder minimization
    ForceExact,
    /// Always take the single Newton step
    ForceApprox,
}

/// The strategy used for one iteration
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LinminStrategy {
    Exact,
    Approximate,
}

/// Measured wall-clock seconds of the block operations of one iteration
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct OpTimes {
    /// One operator application `A·Z`
    pub operator: f64,
    /// One preconditioner application `K(G)`
    pub precondition: f64,
    /// One block inner product `Z†W`
    pub inner: f64,
    /// One block-times-small-matrix product `Z·S`
    pub block_prod: f64,
    /// One Gram matrix `Z†Z`
    pub gram: f64,
    /// The whole Ridder line minimization
    pub linmin: f64,
}

impl OpTimes {
    /// Estimated cost of an iteration with the exact line minimization
    pub(crate) fn exact_estimate(&self, projected_preconditioning: bool) -> f64 {
        let mut t = self.operator * 2.0
            + self.precondition
            + self.inner * 4.0
            + self.block_prod * 2.0
            + self.gram * 2.0
            + self.linmin;
        if projected_preconditioning {
            t += self.inner + self.block_prod;
        }
        t
    }

    /// Estimated cost of an iteration with the approximate line minimization
    pub(crate) fn approx_estimate(&self, projected_preconditioning: bool) -> f64 {
        let mut t = self.operator * 2.0
            + self.precondition
            + self.inner * 2.0
            + self.block_prod * 2.0
            + self.gram * 2.0;
        if projected_preconditioning {
            t += self.inner + self.block_prod;
        }
        t
    }
}

/// Pick the strategy for the next iteration.
///
/// The approximate strategy is only worth it when the last exact line
/// minimization barely improved on its Newton starting guess *and* the
/// estimated savings are large.
pub(crate) fn select_strategy<F: TraceminFloat>(
    policy: LinminPolicy,
    times: &OpTimes,
    last_improvement: F,
    projected_preconditioning: bool,
) -> LinminStrategy {
    match policy {
        LinminPolicy::ForceExact => LinminStrategy::Exact,
        LinminPolicy::ForceApprox => LinminStrategy::Approximate,
        LinminPolicy::Adaptive => {
            let improvement = last_improvement.to_f64().unwrap_or(f64::NAN);
            if improvement > 0.0
                && improvement <= APPROX_IMPROVEMENT_THRESHOLD
                && times.exact_estimate(projected_preconditioning)
                    > times.approx_estimate(projected_preconditioning) * APPROX_SLOWDOWN_GUESS
            {
                LinminStrategy::Approximate
            } else {
                LinminStrategy::Exact
            }
        }
    }
}
