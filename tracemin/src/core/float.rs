// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use num_traits::{Float, FloatConst, FromPrimitive, ToPrimitive};
#[cfg(feature = "serde1")]
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;

/// The real scalar type of the solver.
///
/// Trace values, step angles, tolerances and mixing coefficients are real
/// even when the block elements are complex, so this is the only scalar the
/// driver ever touches. The bounds are exactly what it consumes: `Float` for
/// arithmetic, `FloatConst` for the `±π` line-minimization bracket,
/// `FromPrimitive` for lifting constants via [`real!`](`crate::real`),
/// `ToPrimitive` for handing improvements to the timing-based strategy
/// controller, and `Display` for progress and error reporting. With the
/// `serde1` feature the scalar must additionally be (de)serializable so
/// solve reports can be stored.
///
/// Automatically implemented for every type satisfying the bounds, in
/// particular `f32` and `f64`.
#[cfg(feature = "serde1")]
pub trait TraceminFloat:
    'static
    + Float
    + FloatConst
    + FromPrimitive
    + ToPrimitive
    + Display
    + Serialize
    + DeserializeOwned
{
}

#[cfg(feature = "serde1")]
impl<I> TraceminFloat for I where
    I: 'static
        + Float
        + FloatConst
        + FromPrimitive
        + ToPrimitive
        + Display
        + Serialize
        + DeserializeOwned
{
}

/// The real scalar type of the solver.
///
/// Trace values, step angles, tolerances and mixing coefficients are real
/// even when the block elements are complex, so this is the only scalar the
/// driver ever touches. The bounds are exactly what it consumes: `Float` for
/// arithmetic, `FloatConst` for the `±π` line-minimization bracket,
/// `FromPrimitive` for lifting constants via [`real!`](`crate::real`),
/// `ToPrimitive` for handing improvements to the timing-based strategy
/// controller, and `Display` for progress and error reporting.
///
/// Automatically implemented for every type satisfying the bounds, in
/// particular `f32` and `f64`.
#[cfg(not(feature = "serde1"))]
pub trait TraceminFloat:
    'static + Float + FloatConst + FromPrimitive + ToPrimitive + Display
{
}

#[cfg(not(feature = "serde1"))]
impl<I> TraceminFloat for I where
    I: 'static + Float + FloatConst + FromPrimitive + ToPrimitive + Display
{
}
