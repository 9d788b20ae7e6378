// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Macros

/// Create a `TraceminError` from one of its text-carrying variants with a
/// provided message.
#[macro_export]
macro_rules! tracemin_error {
    ($variant:ident, $msg:expr) => {
        $crate::core::TraceminError::$variant {
            text: $msg.to_string(),
        }
        .into()
    };
}

/// Create a `TraceminError` wrapped in a closure for use in
/// `.ok_or_else(...)` methods on `Option`s.
#[macro_export]
macro_rules! tracemin_error_closure {
    ($variant:ident, $msg:expr) => {
        || -> $crate::core::Error { $crate::tracemin_error!($variant, $msg) }
    };
}

/// Lift an `f64` constant into the solver's real scalar type.
///
/// Step angles, tolerances and mixing coefficients are all real even for
/// complex blocks, so constants only ever need this one conversion. The
/// one-argument form relies on the solver-wide convention that the real
/// scalar parameter is named `F`; pass the type explicitly otherwise.
#[macro_export]
macro_rules! real {
    ($t:ident, $val:expr) => {
        <$t as num_traits::FromPrimitive>::from_f64($val)
            .expect("constant not representable in the scalar type")
    };
    ($val:expr) => {
        $crate::real!(F, $val)
    };
}

/// Generates a test asserting that `$t` is `Send`, `Sync` and `Clone` — the
/// bounds every piece of solver state keeps so configured solvers can be
/// cloned and moved across threads.
#[cfg(test)]
#[macro_export]
macro_rules! assert_send_sync_clone {
    ($n:ident, $t:ty) => {
        #[test]
        fn $n() {
            fn assert_bounds<T: Send + Sync + Clone>() {}
            assert_bounds::<$t>();
        }
    };
}
