// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Errors
//!
//! Every condition listed here is fatal; the solver does not attempt
//! recovery. Note that the runtime switch between the exact and the
//! approximate line minimization is ordinary control flow, not an error.

use thiserror::Error;

/// tracemin error type
#[derive(Clone, Debug, Error)]
pub enum TraceminError {
    /// Indicates an invalid parameter
    #[error("Invalid parameter: {text:?}")]
    InvalidParameter {
        /// Text
        text: String,
    },

    /// Fewer workspace blocks than the solver can run with
    #[error("Insufficient workspace: {available} block(s) supplied, at least 2 required")]
    InsufficientWorkspace {
        /// Number of workspace blocks supplied
        available: usize,
    },

    /// The line minimizer was handed an initial guess that does not lie
    /// downhill from the start of the bracket
    #[error("Line minimization: bad initial guess: {text:?}")]
    BadLineSearchGuess {
        /// Text
        text: String,
    },

    /// The line minimizer could not bracket a minimum of the trace
    #[error("Line minimization: failed to bracket minimum: {text:?}")]
    BracketingFailed {
        /// Text
        text: String,
    },

    /// The trace of the Rayleigh quotient became NaN or infinite
    #[error("Non-finite trace: {text:?}")]
    NonFiniteTrace {
        /// Text
        text: String,
    },

    /// The iteration cap was exhausted before the trace converged
    #[error("Failed to converge after {iterations} iterations")]
    NotConverged {
        /// Number of iterations performed
        iterations: u64,
    },
}
