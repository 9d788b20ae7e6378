// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

// Deactivating this lint here because the sign tests deliberately compare
// derivatives against exact zero, which is part of the termination contract.
#![allow(clippy::float_cmp)]

//! # Line minimization by root-finding on the derivative
//!
//! Minimizes a one-dimensional function to a fractional tolerance in `x` by
//! first bracketing the minimum (geometric stepping with doubling step
//! width) and then running Ridder's method on the *derivative* until it
//! crosses zero.
//!
//! ## References
//!
//! \[0\] C. Ridders (1979). A new algorithm for computing a single root of a
//! real continuous function. IEEE Trans. Circuits Syst. 26(11), 979–980.
//!
//! \[1\] W. H. Press, S. A. Teukolsky, W. T. Vetterling and B. P. Flannery
//! (1992). Numerical Recipes in C, 2nd ed., ch. 9.2. Cambridge University
//! Press.

use crate::core::{Error, TraceminFloat};

/// A scalar function together with its derivative, evaluated at mutable cost
/// (the trace functional reuses internal scratch matrices between calls).
pub(crate) trait LineFunction<F> {
    /// Evaluate the function at `x`
    fn value(&mut self, x: F) -> Result<F, Error>;
    /// Evaluate the function and its derivative at `x`
    fn value_and_deriv(&mut self, x: F) -> Result<(F, F), Error>;
}

/// Result of a successful line minimization
#[derive(Clone, Copy, Debug)]
pub(crate) struct LinminResult<F> {
    /// Location of the minimum
    pub theta: F,
    /// Fractional decrease of the function value relative to the initial
    /// guess: `2(f_start − f_end)/(|f_start| + |f_end| + tol)`
    pub improvement: F,
}

/// Minimize `func` between `xmin` and `xmax` to fractional tolerance
/// `tolerance` in `x`.
///
/// `f_xmin` and `df_xmin` are the values of the function and its derivative
/// at `xmin`; `x0` is an initial guess for the minimum. `x0` must lie in the
/// downhill direction from `xmin`: with `df_xmin < 0` we need `x0 > xmin`,
/// and the opposite for `df_xmin > 0` (in which case `xmax < x0 < xmin`,
/// not what one might expect). `xmax` must in turn be downhill from `x0`.
// The endpoint function values are carried along with the derivatives even
// though only the derivatives steer the iteration; the stores keep the
// endpoint triples consistent.
#[allow(unused_assignments)]
pub(crate) fn linmin<F, L>(
    mut xmin: F,
    mut f_xmin: F,
    mut df_xmin: F,
    mut xmax: F,
    mut x0: F,
    tolerance: F,
    func: &mut L,
) -> Result<LinminResult<F>, Error>
where
    F: TraceminFloat,
    L: LineFunction<F>,
{
    let half = real!(0.5);
    let two = real!(2.0);

    if !(df_xmin * (x0 - xmin) < F::zero()) {
        return Err(tracemin_error!(
            BadLineSearchGuess,
            format!("guess {} is not downhill from {}", x0, xmin)
        ));
    }
    let s = if xmax > xmin { F::one() } else { -F::one() };
    if !(x0 * s < xmax * s && x0 * s > xmin * s) {
        return Err(tracemin_error!(
            BadLineSearchGuess,
            format!("guess {} outside of [{}, {}]", x0, xmin, xmax)
        ));
    }

    // Bracket the minimum: march from xmin in doubling steps until the
    // derivative changes sign, halving the guess toward xmin whenever the
    // march runs out of the interval first.
    let mut f_xmax = F::zero();
    let mut df_xmax = F::zero();
    loop {
        let mut xmin2 = xmin;
        let mut f_xmin2 = f_xmin;
        let mut df_xmin2 = df_xmin;
        let dx = (x0 - xmin) * two;
        let mut x = xmin + dx;
        let mut f = F::zero();
        let mut df = F::zero();
        let mut bracketed = false;
        while x * s <= xmax * s {
            let (fv, dfv) = func.value_and_deriv(x)?;
            f = fv;
            df = dfv;
            if df * (x - xmin) > F::zero() {
                bracketed = true;
                break;
            }
            xmin2 = x;
            f_xmin2 = fv;
            df_xmin2 = dfv;
            x = x + dx;
        }
        if bracketed {
            xmin = xmin2;
            f_xmin = f_xmin2;
            df_xmin = df_xmin2;
            xmax = x;
            f_xmax = f;
            df_xmax = df;
            break;
        }
        x0 = half * (x0 + xmin);
        if !((x0 - xmin).abs() > tolerance * (x0.abs() + tolerance)) {
            return Err(tracemin_error!(
                BracketingFailed,
                format!("interval around {} collapsed without a sign change", xmin)
            ));
        }
    }

    if x0 * s <= xmin * s || x0 * s >= xmax * s {
        x0 = half * (xmin + xmax);
    }

    // Ridder's method on the derivative.
    if xmin > xmax {
        std::mem::swap(&mut xmin, &mut xmax);
        std::mem::swap(&mut f_xmin, &mut f_xmax);
        std::mem::swap(&mut df_xmin, &mut df_xmax);
    }

    let mut x_prev = x0;
    let mut f_xstart = F::zero();
    let mut first = true;
    loop {
        let (f_x0, df_x0) = func.value_and_deriv(x0)?;
        if first {
            f_xstart = f_x0;
            first = false;
        }

        if df_x0 == F::zero() {
            break;
        }
        if df_xmin == F::zero() {
            x0 = xmin;
            break;
        }
        if df_xmax == F::zero() {
            x0 = xmax;
            break;
        }

        let sign = if df_xmin > df_xmax { F::one() } else { -F::one() };
        let x =
            x0 + (x0 - xmin) * sign * df_x0 / (df_x0 * df_x0 - df_xmin * df_xmax).sqrt();

        if (x - x_prev)
            .abs()
            .max((x - xmin).abs().min((x - xmax).abs()))
            < tolerance * (x.abs() + tolerance)
        {
            x0 = x;
            break;
        }

        let (f, df) = func.value_and_deriv(x)?;

        if df * df_x0 > F::zero() || (df - df_x0) * (x - x0) < F::zero() {
            if x < x0 {
                if df_xmin * df > F::zero() || (df_xmin - df) * (xmin - x) < F::zero() {
                    xmin = x0;
                    f_xmin = f_x0;
                    df_xmin = df_x0;
                } else {
                    xmax = x;
                    f_xmax = f;
                    df_xmax = df;
                }
            } else if df_xmin * df_x0 > F::zero() || (df_xmin - df_x0) * (xmin - x0) < F::zero() {
                xmin = x;
                f_xmin = f;
                df_xmin = df;
            } else {
                xmax = x0;
                f_xmax = f_x0;
                df_xmax = df_x0;
            }
        } else if x < x0 {
            xmin = x;
            f_xmin = f;
            df_xmin = df;
            xmax = x0;
            f_xmax = f_x0;
            df_xmax = df_x0;
        } else {
            xmin = x0;
            f_xmin = f_x0;
            df_xmin = df_x0;
            xmax = x;
            f_xmax = f;
            df_xmax = df;
        }

        x0 = half * (xmin + xmax);
        x_prev = x;
    }

    let f_end = func.value(x0)?;
    let improvement = (f_xstart - f_end) * two / (f_xstart.abs() + f_end.abs() + tolerance);

    Ok(LinminResult {
        theta: x0,
        improvement,
    })
}
