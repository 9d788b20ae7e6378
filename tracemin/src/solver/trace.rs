// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # The trace functional along the search rotation
//!
//! For a block `Y` and a search direction `D`, the one-parameter family
//! `Y(θ) = cos(θ)·Y + (sin(θ)/‖D‖)·D` turns the trace of the Rayleigh
//! quotient into a scalar function of `θ`. Because
//! `Y(θ)†Y(θ)` and `Y(θ)†A·Y(θ)` are quadratic in `cos` and `sin`, both can
//! be assembled from six order-`p` matrices computed once per line
//! minimization — evaluating the trace at any `θ` then costs only small
//! matrix work, no operator applications.

use crate::core::{Error, TraceminFloat};
use crate::solver::linmin::LineFunction;
use tracemin_math::{MatAxpby, MatDot, SqInvHpd, SqProd};

/// The trace `tr((Y(θ)†Y(θ))⁻¹ · Y(θ)†A·Y(θ))` and its `θ`-derivative,
/// assembled from the order-`p` matrices of the current iterate and search
/// direction.
pub(crate) struct TraceFunc<M, F> {
    ytay: M,
    dtad: M,
    sym_ytad: M,
    yty: M,
    dtd: M,
    sym_ytd: M,
    d_norm: F,
    s1: M,
    s2: M,
    s3: M,
}

impl<M, F> TraceFunc<M, F>
where
    M: Clone + MatAxpby<F> + MatDot<F> + SqProd + SqInvHpd,
    F: TraceminFloat,
{
    /// `sym_ytd` and `sym_ytad` must already be symmetrized:
    /// `(Y†D + D†Y)/2` and `(Y†AD + D†AY)/2`.
    pub(crate) fn new(
        ytay: M,
        dtad: M,
        sym_ytad: M,
        yty: M,
        dtd: M,
        sym_ytd: M,
        d_norm: F,
    ) -> Self {
        let s1 = yty.clone();
        let s2 = yty.clone();
        let s3 = yty.clone();
        TraceFunc {
            ytay,
            dtad,
            sym_ytad,
            yty,
            dtd,
            sym_ytd,
            d_norm,
            s1,
            s2,
            s3,
        }
    }

    fn eval(&mut self, theta: F, want_deriv: bool) -> Result<(F, F), Error> {
        let two = real!(2.0);
        let c = theta.cos();
        let s = theta.sin() / self.d_norm;

        // Y(θ)†Y(θ) = c²·YtY + s²·DtD + 2sc·symYtD, then invert
        self.s1.clone_from(&self.yty);
        self.s1.axpby(c * c, s * s, &self.dtd);
        self.s1.axpby(F::one(), two * s * c, &self.sym_ytd);
        self.s1 = self.s1.inv_hpd()?;

        // Y(θ)†A·Y(θ)
        self.s2.clone_from(&self.ytay);
        self.s2.axpby(c * c, s * s, &self.dtad);
        self.s2.axpby(F::one(), two * s * c, &self.sym_ytad);

        let trace = self.s2.frob_dot(&self.s1);

        if !want_deriv {
            return Ok((trace, F::zero()));
        }

        let half = real!(0.5);
        let c2 = (theta + theta).cos();
        let s2 = (theta + theta).sin();
        let inv_dn = self.d_norm.recip();
        let inv_dn2 = inv_dn * inv_dn;

        // d/dθ of the numerator part
        self.s3.clone_from(&self.ytay);
        self.s3.axpby(F::one(), -inv_dn2, &self.dtad);
        self.s3.axpby(-half * s2, c2 * inv_dn, &self.sym_ytad);
        let mut deriv = self.s1.frob_dot(&self.s3);

        // (Y†Y)⁻¹ · Y†AY · (Y†Y)⁻¹ at θ, for the metric part
        let t = self.s1.prod(&self.s2);
        self.s2 = t.prod(&self.s1);

        self.s3.clone_from(&self.yty);
        self.s3.axpby(F::one(), -inv_dn2, &self.dtd);
        self.s3.axpby(-half * s2, c2 * inv_dn, &self.sym_ytd);

        deriv = deriv - self.s2.frob_dot(&self.s3);
        deriv = deriv * two;

        Ok((trace, deriv))
    }
}

impl<M, F> LineFunction<F> for TraceFunc<M, F>
where
    M: Clone + MatAxpby<F> + MatDot<F> + SqProd + SqInvHpd,
    F: TraceminFloat,
{
    fn value(&mut self, x: F) -> Result<F, Error> {
        Ok(self.eval(x, false)?.0)
    }

    fn value_and_deriv(&mut self, x: F) -> Result<(F, F), Error> {
        self.eval(x, true)
    }
}
