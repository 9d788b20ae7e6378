// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Logging based on the `slog` crate
//!
//! The solver logs per-iteration progress and strategy decisions through an
//! [`slog::Logger`] handed to it via `Eigensolver::with_logger`. Any drain
//! works; this module provides the common terminal setup.

use slog::{o, Drain};
use slog_async::OverflowStrategy;

/// Build a logger which writes to the terminal in a blocking way.
///
/// # Example
///
/// ```
/// use tracemin::core::term_logger;
/// use tracemin::solver::Eigensolver;
///
/// let solver = Eigensolver::new(1e-8).unwrap().with_logger(term_logger());
/// ```
pub fn term_logger() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator)
        .use_original_order()
        .build()
        .fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(OverflowStrategy::Block)
        .build()
        .fuse();
    slog::Logger::root(drain, o!())
}
