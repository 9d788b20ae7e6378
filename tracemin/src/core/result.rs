// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # `SolveResult`
//!
//! Returned by a successful `Eigensolver::solve` call. The eigenvalues and
//! the transformed block live in the caller-supplied storage; this struct
//! carries the run statistics.

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

/// The outcome of a converged eigensolver run
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct SolveResult<F> {
    /// Number of outer iterations performed before the convergence test fired
    pub iterations: u64,
    /// Value of the trace functional at the last convergence test
    pub trace: F,
}

impl<F> std::fmt::Display for SolveResult<F>
where
    F: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SolveResult:")?;
        writeln!(f, "    iterations: {}", self.iterations)?;
        writeln!(f, "    trace:      {}", self.trace)?;
        Ok(())
    }
}
