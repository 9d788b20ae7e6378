// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! tracemin core
//!
//! Error handling, the traits describing the user-supplied collaborators
//! (operator, preconditioner, constraint), the float trait alias and the
//! logging helper used by the solver.

/// Macros
#[macro_use]
pub mod macros;
/// Error handling
mod errors;
/// Trait alias for float types
mod float;
/// Logging helper
#[cfg(feature = "slog-logger")]
mod logging;
/// Traits for the user-supplied collaborators
mod problem;
/// Definition of the return type of the solver
mod result;

pub use crate::solver::LinminPolicy;
pub use anyhow::Error;
pub use errors::TraceminError;
pub use float::TraceminFloat;
#[cfg(feature = "slog-logger")]
pub use logging::term_logger;
pub use problem::{Constraint, IdentityPreconditioner, NoConstraint, Operator, Preconditioner};
pub use result::SolveResult;
