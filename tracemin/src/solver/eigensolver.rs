// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Preconditioned conjugate-gradient block eigensolver
//!
//! Minimizes `tr((Y†Y)⁻¹·Y†AY)` over blocks `Y` of `p` trial vectors. At the
//! minimum the block spans the invariant subspace belonging to the `p`
//! lowest eigenvalues of `A` and the trace equals their sum.
//!
//! The block is deliberately *not* kept orthonormal: working with the
//! inverse Gram matrix instead costs one small Cholesky inversion per
//! iteration and avoids re-orthonormalizations of the tall block entirely.
//! The only guard is a Frobenius rescaling of `Y` at the top of every
//! iteration which keeps `Y†Y` comfortably away from overflow.
//!
//! # References
//!
//! \[0\] M. C. Payne, M. P. Teter, D. C. Allan, T. A. Arias and
//! J. D. Joannopoulos (1992). Iterative minimization techniques for ab
//! initio total-energy calculations. Rev. Mod. Phys. 64, 1045.
//!
//! \[1\] A. Edelman, T. A. Arias and S. T. Smith (1998). The geometry of
//! algorithms with orthogonality constraints. SIAM J. Matrix Anal. Appl.
//! 20(2), 303–353.

use crate::core::{
    Constraint, Error, Operator, Preconditioner, SolveResult, TraceminError, TraceminFloat,
};
use crate::solver::direction::{conjugate_gamma, reset_due, CgFlavor};
use crate::solver::linmin::{linmin, LinminResult};
use crate::solver::strategy::{select_strategy, LinminPolicy, LinminStrategy, OpTimes};
use crate::solver::trace::TraceFunc;
use instant::Instant;
use tracemin_math::{
    BlockAddProd, BlockDiffSwap, BlockGram, BlockInner, BlockSetProd, BlockShape, MatAssign,
    MatAxpby, MatDot, MatScale, MatZero, SqEighMetric, SqInvHpd, SqProd, SqSym, SqTrace,
};

/// Hard cap on the number of outer iterations.
pub const MAX_ITERATIONS: u64 = 10_000;

/// Customary period for the conjugate-gradient reset, picked after some
/// experimentation. Whether it should scale with the problem size is an
/// open question.
pub const CG_RESET_ITERS: u64 = 70;

/// Additive fuzz in the relative convergence test, so that traces near zero
/// do not stall the test.
const CONVERGENCE_EPS: f64 = 1e-7;

/// Abort threshold of the approximate line minimization: a predicted trace
/// drop more than this factor beyond the last iteration's drop means the
/// quadratic model cannot be trusted.
const APPROX_TRUST_FACTOR: f64 = 20.0;

macro_rules! verbose {
    ($solver:expr, $($arg:tt)*) => {
        #[cfg(feature = "slog-logger")]
        if let Some(ref logger) = $solver.logger {
            slog::info!(logger, $($arg)*);
        }
    };
}

/// # Preconditioned conjugate-gradient block eigensolver
///
/// Computes the lowest `p` eigenpairs of a Hermitian operator by trace
/// minimization. See the [crate documentation](crate) for the algorithm and
/// a complete example.
///
/// The caller supplies the initial block `Y`, a slice receiving the
/// eigenvalues, and between two and four (or more) workspace blocks of the
/// same shape as `Y`. The workspace count selects the algorithm:
///
/// | workspaces | algorithm |
/// |---|---|
/// | 2 | steepest descent |
/// | 3 | CG, Fletcher–Reeves |
/// | ≥4 | CG, Polak–Ribière |
///
/// # Example
///
/// ```
/// use tracemin::solver::{Eigensolver, LinminPolicy, CG_RESET_ITERS};
///
/// let solver = Eigensolver::new(1e-10)
///     .unwrap()
///     .with_cg_reset(CG_RESET_ITERS)
///     .with_linmin_policy(LinminPolicy::ForceExact);
/// # let _ = solver;
/// ```
#[derive(Clone)]
pub struct Eigensolver<F> {
    /// Fractional tolerance on the change of the trace between iterations
    tolerance: F,
    /// Iteration cap
    max_iters: u64,
    /// Period of the steepest-descent reset, if any
    cg_reset: Option<u64>,
    /// How the line-minimization strategy is chosen
    linmin_policy: LinminPolicy,
    /// Project the preconditioned gradient back onto the tangent space
    projected_preconditioning: bool,
    /// Progress logger
    #[cfg(feature = "slog-logger")]
    logger: Option<slog::Logger>,
}

impl<F> Eigensolver<F>
where
    F: TraceminFloat,
{
    /// Construct an `Eigensolver` with the given convergence tolerance.
    ///
    /// The solver stops once the relative change of the trace between two
    /// iterations falls below `tolerance`. The same value is used as the
    /// fractional tolerance of the exact line minimization.
    ///
    /// # Example
    ///
    /// ```
    /// # use tracemin::solver::Eigensolver;
    /// # use tracemin::core::Error;
    /// # fn main() -> Result<(), Error> {
    /// let solver: Eigensolver<f64> = Eigensolver::new(1e-10)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(tolerance: F) -> Result<Self, Error> {
        if !(tolerance > F::zero()) {
            return Err(tracemin_error!(
                InvalidParameter,
                "`Eigensolver`: tolerance must be > 0."
            ));
        }
        Ok(Eigensolver {
            tolerance,
            max_iters: MAX_ITERATIONS,
            cg_reset: None,
            linmin_policy: LinminPolicy::default(),
            projected_preconditioning: false,
            #[cfg(feature = "slog-logger")]
            logger: None,
        })
    }

    /// Set the iteration cap (defaults to [`MAX_ITERATIONS`]).
    ///
    /// Exhausting the cap is reported as
    /// [`TraceminError::NotConverged`](`crate::core::TraceminError`).
    #[must_use]
    pub fn with_max_iters(mut self, iters: u64) -> Self {
        self.max_iters = iters;
        self
    }

    /// Periodically forget the accumulated search direction and restart from
    /// steepest descent every `every` iterations. [`CG_RESET_ITERS`] is a
    /// reasonable period.
    #[must_use]
    pub fn with_cg_reset(mut self, every: u64) -> Self {
        self.cg_reset = Some(every);
        self
    }

    /// Choose how the line-minimization strategy is selected per iteration
    /// (defaults to [`LinminPolicy::Adaptive`]).
    #[must_use]
    pub fn with_linmin_policy(mut self, policy: LinminPolicy) -> Self {
        self.linmin_policy = policy;
        self
    }

    /// After preconditioning, project the result back onto the tangent
    /// space: `X ← X − Y·(U·(Y†X))`. Useful when the preconditioner does not
    /// preserve the complement of `span(Y)`.
    #[must_use]
    pub fn with_projected_preconditioner(mut self) -> Self {
        self.projected_preconditioning = true;
        self
    }

    /// Attach a logger; the solver then reports the trace at every iteration
    /// together with the line-minimization decisions.
    ///
    /// Only available when the `slog-logger` feature is set.
    #[cfg(feature = "slog-logger")]
    #[must_use]
    pub fn with_logger(mut self, logger: slog::Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Run the solver.
    ///
    /// `y` holds the initial guess and, after a successful return, the
    /// converged block rotated onto eigenvector approximations (orthonormal
    /// up to the convergence tolerance). `eigenvalues` receives the `p`
    /// lowest eigenvalues in ascending order and must have exactly as many
    /// entries as `y` has columns. `work` supplies the workspace blocks.
    pub fn solve<O, K, C, B, M>(
        &self,
        operator: &mut O,
        preconditioner: &mut K,
        constraint: &mut C,
        y: &mut B,
        eigenvalues: &mut [F],
        work: &mut [B],
    ) -> Result<SolveResult<F>, Error>
    where
        O: Operator<B>,
        K: Preconditioner<B, M, F>,
        C: Constraint<B>,
        B: BlockGram<M>
            + BlockInner<M>
            + BlockSetProd<M>
            + BlockAddProd<M, F>
            + BlockDiffSwap
            + BlockShape
            + MatDot<F>
            + MatAxpby<F>
            + MatScale<F>
            + MatAssign
            + MatZero,
        M: Clone
            + SqTrace<F>
            + SqProd
            + SqSym
            + SqInvHpd
            + SqEighMetric<F>
            + MatDot<F>
            + MatAxpby<F>
            + MatScale<F>,
    {
        let n_work = work.len();
        if n_work < 2 {
            return Err(TraceminError::InsufficientWorkspace { available: n_work }.into());
        }
        let n = y.nrows();
        let p = y.ncols();
        if p == 0 || n < p {
            return Err(tracemin_error!(
                InvalidParameter,
                format!("`Eigensolver`: block of shape ({}, {}) is not tall", n, p)
            ));
        }
        if eigenvalues.len() != p {
            return Err(tracemin_error!(
                InvalidParameter,
                format!(
                    "`Eigensolver`: eigenvalue slice has {} entries, block has {} columns",
                    eigenvalues.len(),
                    p
                )
            ));
        }
        for w in work.iter() {
            if w.nrows() != n || w.ncols() != p {
                return Err(tracemin_error!(
                    InvalidParameter,
                    format!(
                        "`Eigensolver`: workspace of shape ({}, {}) does not match block ({}, {})",
                        w.nrows(),
                        w.ncols(),
                        n,
                        p
                    )
                ));
            }
        }

        let flavor = CgFlavor::for_workspaces(n_work);

        // Workspace roles. Without a CG direction the symbolic D falls back
        // onto X, and without a gradient history prev_G falls back onto G;
        // all role lookups below go through these indices.
        let ig = 0;
        let ix = 1;
        let id = if flavor.uses_cg() { 2 } else { ix };
        let ipg = if flavor == CgFlavor::PolakRibiere { 3 } else { ig };

        if flavor.uses_cg() {
            work[id].set_zero();
        }
        if flavor == CgFlavor::PolakRibiere {
            work[ipg].set_zero();
        }
        for ev in eigenvalues.iter_mut() {
            *ev = F::zero();
        }

        constraint.project(y)?;

        let p_f = real!(p as f64);
        let eps = real!(CONVERGENCE_EPS);
        let half = real!(0.5);
        let one = F::one();
        let two = real!(2.0);

        let mut prev_e = F::zero();
        let mut prev_tgx = F::zero();
        let mut prev_theta = half;
        let mut linmin_improvement = F::zero();
        let mut times = OpTimes::default();
        let mut strategy = match self.linmin_policy {
            LinminPolicy::ForceApprox => LinminStrategy::Approximate,
            _ => LinminStrategy::Exact,
        };

        let mut iteration: u64 = 0;
        let mut final_trace = F::zero();
        let converged = loop {
            if self.linmin_policy == LinminPolicy::ForceApprox {
                strategy = LinminStrategy::Approximate;
            }

            // Keep ‖Y‖_F ≈ √p so Y†Y stays well scaled across iterations.
            let clock = Instant::now();
            let mut yty = y.xtx();
            times.gram = clock.elapsed().as_secs_f64();

            let y_norm = (yty.trace_re() / p_f).sqrt();
            y.scale(y_norm.recip());
            yty.scale((y_norm * y_norm).recip());

            let u = yty.inv_hpd()?;

            // X = A·Y, then G = (A·Y)·U; U is Hermitian
            {
                let (g, x) = two_mut(work, ig, ix);
                let clock = Instant::now();
                operator.apply(y, x, true)?;
                times.operator = clock.elapsed().as_secs_f64();
                let clock = Instant::now();
                g.set_prod(x, &u);
                times.block_prod = clock.elapsed().as_secs_f64();
            }

            let clock = Instant::now();
            let ytayu = y.xty(&work[ig]);
            times.inner = clock.elapsed().as_secs_f64();

            let e = ytayu.trace_re();
            if !e.is_finite() {
                return Err(tracemin_error!(
                    NonFiniteTrace,
                    format!("trace became {} at iteration {}", e, iteration)
                ));
            }

            if iteration > 0
                && (e - prev_e).abs() < self.tolerance * half * (e.abs() + prev_e.abs() + eps)
            {
                final_trace = e;
                break true;
            }

            verbose!(
                self,
                "iteration {}: trace = {} ({}% change)",
                iteration + 1,
                e,
                real!(200.0) * (e - prev_e).abs() / (e.abs() + prev_e.abs() + eps)
            );

            // gradient of the trace functional: G = (I − Y·U·Y†)·A·Y·U
            let s1 = u.prod(&ytayu);
            work[ig].add_prod(-one, y, &s1);

            // X = K(G)
            {
                let (g, x) = two_mut(work, ig, ix);
                let clock = Instant::now();
                preconditioner.apply(g, x, y, None, &yty)?;
                times.precondition = clock.elapsed().as_secs_f64();
            }
            if self.projected_preconditioning {
                // X ← (I − Y·U·Y†)·X
                let ytx = y.xty(&work[ix]);
                let s1 = u.prod(&ytx);
                work[ix].add_prod(-one, y, &s1);
            }

            let tgx = work[ig].frob_dot(&work[ix]);

            // combine X with the previous search direction
            if flavor.uses_cg() {
                let numerator = if flavor == CgFlavor::PolakRibiere {
                    {
                        let (g, pg) = two_mut(work, ig, ipg);
                        g.diff_swap(pg);
                    }
                    work[ig].frob_dot(&work[ix])
                } else {
                    tgx
                };
                let mut gamma = conjugate_gamma(numerator, prev_tgx);
                if reset_due(self.cg_reset, iteration) {
                    gamma = F::zero();
                    verbose!(self, "resetting CG direction");
                }
                let (x, d) = two_mut(work, ix, id);
                d.axpby(gamma, one, x);
            }

            // minimize the trace along Y(θ) = cos(θ)·Y + (sin(θ)/‖D‖)·D
            let mut exact_this_iter = strategy == LinminStrategy::Exact;
            let mut theta = F::zero();

            if !exact_this_iter {
                // One step of Newton's method on the trace derivative, with
                // d²E estimated by a finite difference at a probe point.
                // Saves two O(n·p²) inner products over the exact strategy.
                let d_norm = (work[id].frob_dot(&work[id]) / p_f).sqrt();

                // dE = 2·tr(G†D); the prev_G slot holds the plain gradient
                // even when the Polak–Ribière pass has turned G into a
                // difference of gradients.
                let de = two * work[ipg].frob_dot(&work[id]) / d_norm;

                let t = if de > F::zero() {
                    -prev_theta.abs()
                } else {
                    prev_theta.abs()
                };
                y.axpby(one, t / d_norm, &work[id]);

                // local probe inverse; U must stay valid for the fallback
                let u_probe = y.xtx().inv_hpd()?;
                operator.apply(y, &mut work[ig], true)?;
                let s1 = y.xty(&work[ig]);
                let e2 = s1.frob_dot(&u_probe);

                let d2e = two * (e2 - e - de * t) / (t * t);
                theta = -de / d2e;

                if d2e < F::zero()
                    || -half * de * theta > real!(APPROX_TRUST_FACTOR) * (e - prev_e).abs()
                {
                    verbose!(self, "switching back to exact line minimization");
                    exact_this_iter = true;
                    y.axpby(one, -(t / d_norm), &work[id]);
                } else {
                    y.axpby(one, (theta - t) / d_norm, &work[id]);
                }
            }

            if exact_this_iter {
                {
                    let (g, d) = two_mut(work, ig, id);
                    operator.apply(d, g, false)?;
                }
                let dtd = work[id].xtx();
                let d_norm2 = dtd.trace_re() / p_f;
                let d_norm = d_norm2.sqrt();
                let dtad = work[id].xty(&work[ig]);
                let sym_ytd = y.xty(&work[id]).symmetrized();
                let sym_ytad = y.xty(&work[ig]).symmetrized();

                let s1 = u.prod(&sym_ytd);
                let de = two * (u.frob_dot(&sym_ytad) - ytayu.frob_dot(&s1)) / d_norm;

                let mut s2 = dtd.clone();
                s2.axpby(one, -real!(4.0), &sym_ytd.prod(&s1));
                let s3 = sym_ytad.prod(&s1);
                let s1b = u.prod(&s2);
                let d2e = two
                    * (u.frob_dot(&dtad) - ytayu.frob_dot(&s1b) - real!(4.0) * u.frob_dot(&s3))
                    / d_norm2;

                // Newton-Raphson guess for the root of dE(θ)
                theta = -de / d2e;

                if d2e < F::zero() {
                    verbose!(self, "near maximum in trace");
                    theta = if de > F::zero() {
                        -prev_theta.abs()
                    } else {
                        prev_theta.abs()
                    };
                } else if -half * de * theta > two * (e - prev_e).abs() {
                    verbose!(
                        self,
                        "large trace change predicted ({}%)",
                        -half * de * theta / e * real!(100.0)
                    );
                }
                if theta.abs() >= F::PI() {
                    verbose!(self, "large theta ({})", theta);
                    theta = if de > F::zero() {
                        -prev_theta.abs()
                    } else {
                        prev_theta.abs()
                    };
                }

                let ytay = ytayu.prod(&yty);
                let mut tf = TraceFunc::new(ytay, dtad, sym_ytad, yty, dtd, sym_ytd, d_norm);
                let xmax = if de > F::zero() { -F::PI() } else { F::PI() };
                let clock = Instant::now();
                let LinminResult { theta: t, improvement } =
                    linmin(F::zero(), e, de, xmax, theta, self.tolerance, &mut tf)?;
                times.linmin = clock.elapsed().as_secs_f64();
                theta = t;
                linmin_improvement = improvement;

                y.axpby(theta.cos(), theta.sin() / d_norm, &work[id]);
            }

            constraint.project(y)?;

            prev_tgx = tgx;
            prev_theta = theta;
            prev_e = e;

            let next = select_strategy(
                self.linmin_policy,
                &times,
                linmin_improvement,
                self.projected_preconditioning,
            );
            match (strategy, next) {
                (LinminStrategy::Exact, LinminStrategy::Approximate) => {
                    verbose!(self, "switching to approximate line minimization");
                }
                (LinminStrategy::Approximate, LinminStrategy::Exact) => {
                    verbose!(self, "switching back to exact line minimization");
                }
                _ => {}
            }
            strategy = next;

            iteration += 1;
            if iteration >= self.max_iters {
                break false;
            }
        };

        if !converged {
            return Err(TraceminError::NotConverged {
                iterations: iteration,
            }
            .into());
        }

        // Deliver eigenvalues: diagonalize Y†AY in the Y†Y metric and rotate
        // the block accordingly. V is normalized so the returned block is
        // orthonormal.
        let yty = y.xtx();
        operator.apply(y, &mut work[ix], true)?;
        let ytay = y.xty(&work[ix]);
        let (vals, v) = ytay.eigh_in_metric(&yty)?;
        for (dst, src) in eigenvalues.iter_mut().zip(vals) {
            *dst = src;
        }
        work[ix].set_prod(y, &v);
        y.assign_from(&work[ix]);

        Ok(SolveResult {
            iterations: iteration,
            trace: final_trace,
        })
    }
}

/// Two distinct mutable borrows out of one workspace slice.
fn two_mut<T>(slice: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j);
    let (head, tail) = slice.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IdentityPreconditioner, NoConstraint};
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2};
    use ndarray_linalg::eigh::Eigh;
    use ndarray_linalg::UPLO;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    assert_send_sync_clone!(test_eigensolver_traits, Eigensolver<f64>);

    struct Dense {
        a: Array2<f64>,
    }

    impl Operator<Array2<f64>> for Dense {
        fn apply(
            &mut self,
            input: &Array2<f64>,
            output: &mut Array2<f64>,
            _is_current: bool,
        ) -> Result<(), Error> {
            output.assign(&self.a.dot(input));
            Ok(())
        }
    }

    /// records the trace of the Rayleigh quotient at every iterate it sees
    struct Recording {
        a: Array2<f64>,
        traces: Vec<f64>,
    }

    impl Operator<Array2<f64>> for Recording {
        fn apply(
            &mut self,
            input: &Array2<f64>,
            output: &mut Array2<f64>,
            is_current: bool,
        ) -> Result<(), Error> {
            output.assign(&self.a.dot(input));
            if is_current {
                let gram_inv = input.xtx().inv_hpd()?;
                self.traces.push(input.xty(output).frob_dot(&gram_inv));
            }
            Ok(())
        }
    }

    struct Nan;

    impl Operator<Array2<f64>> for Nan {
        fn apply(
            &mut self,
            _input: &Array2<f64>,
            output: &mut Array2<f64>,
            _is_current: bool,
        ) -> Result<(), Error> {
            output.fill(f64::NAN);
            Ok(())
        }
    }

    struct Jacobi {
        inv_diag: Array1<f64>,
    }

    impl Preconditioner<Array2<f64>, Array2<f64>, f64> for Jacobi {
        fn apply(
            &mut self,
            gradient: &Array2<f64>,
            out: &mut Array2<f64>,
            _y: &Array2<f64>,
            _eigenvalues: Option<&[f64]>,
            _yty: &Array2<f64>,
        ) -> Result<(), Error> {
            out.assign(gradient);
            for (i, mut row) in out.rows_mut().into_iter().enumerate() {
                row *= self.inv_diag[i];
            }
            Ok(())
        }
    }

    /// keeps the block orthogonal to the first coordinate axis
    struct ZeroFirstComponent;

    impl Constraint<Array2<f64>> for ZeroFirstComponent {
        fn project(&mut self, y: &mut Array2<f64>) -> Result<(), Error> {
            y.row_mut(0).fill(0.0);
            Ok(())
        }
    }

    fn diag_operator(n: usize) -> Dense {
        Dense {
            a: Array2::from_diag(&Array1::from_iter((1..=n).map(|i| i as f64))),
        }
    }

    fn random_block(n: usize, p: usize, seed: u64) -> Array2<f64> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        Array2::from_shape_fn((n, p), |_| rng.gen_range(-1.0..1.0))
    }

    fn random_symmetric(n: usize, seed: u64) -> Array2<f64> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let m = Array2::from_shape_fn((n, n), |_| rng.gen_range(-1.0..1.0));
        (&m + &m.t()) * 0.5
    }

    fn workspaces(n: usize, p: usize, count: usize) -> Vec<Array2<f64>> {
        vec![Array2::zeros((n, p)); count]
    }

    /// ‖A·Y − Y·Λ‖_F for the returned (orthonormal) block
    fn residual(a: &Array2<f64>, y: &Array2<f64>, vals: &[f64]) -> f64 {
        let mut r = a.dot(y);
        for (j, mut col) in r.columns_mut().into_iter().enumerate() {
            col.zip_mut_with(&y.column(j), |ri, yi| *ri -= vals[j] * yi);
        }
        r.frob_dot(&r).sqrt()
    }

    #[test]
    fn test_diagonal_p1() {
        let n = 8;
        let mut op = diag_operator(n);
        let mut y = Array2::from_elem((n, 1), 1.0 / (n as f64).sqrt());
        let mut work = workspaces(n, 1, 3);
        let mut eigenvalues = vec![0.0];
        let result = Eigensolver::new(1e-10)
            .unwrap()
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .unwrap();
        assert_relative_eq!(eigenvalues[0], 1.0, epsilon = 1e-7);
        // block aligned with e₁ up to sign
        assert_relative_eq!(y[(0, 0)].abs(), 1.0, epsilon = 1e-4);
        assert!(result.iterations > 0);
        assert!(result.iterations < MAX_ITERATIONS);
    }

    #[test]
    fn test_diagonal_p3_polak_ribiere() {
        let n = 16;
        let mut op = diag_operator(n);
        let mut y = random_block(n, 3, 7);
        let mut work = workspaces(n, 3, 4);
        let mut eigenvalues = vec![0.0; 3];
        Eigensolver::new(1e-10)
            .unwrap()
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .unwrap();
        assert_relative_eq!(eigenvalues[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(eigenvalues[1], 2.0, epsilon = 1e-6);
        assert_relative_eq!(eigenvalues[2], 3.0, epsilon = 1e-6);
        assert!(residual(&op.a, &y, &eigenvalues) < 1e-4);
    }

    #[test]
    fn test_steepest_descent_only() {
        let n = 8;
        let mut op = diag_operator(n);
        let mut y = random_block(n, 1, 3);
        let mut work = workspaces(n, 1, 2);
        let mut eigenvalues = vec![0.0];
        Eigensolver::new(1e-9)
            .unwrap()
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .unwrap();
        assert_relative_eq!(eigenvalues[0], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_constraint_shifts_spectrum() {
        let n = 8;
        let mut op = diag_operator(n);
        let mut y = Array2::from_elem((n, 1), 1.0 / (n as f64).sqrt());
        let mut work = workspaces(n, 1, 3);
        let mut eigenvalues = vec![0.0];
        Eigensolver::new(1e-10)
            .unwrap()
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut ZeroFirstComponent,
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .unwrap();
        assert_relative_eq!(eigenvalues[0], 2.0, epsilon = 1e-7);
        assert_relative_eq!(y[(0, 0)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constraint_is_idempotent() {
        let mut c = ZeroFirstComponent;
        let mut y = random_block(6, 2, 3);
        c.project(&mut y).unwrap();
        let once = y.clone();
        c.project(&mut y).unwrap();
        assert_eq!(y, once);
    }

    #[test]
    fn test_fletcher_reeves_vs_polak_ribiere() {
        let n = 128;
        let p = 4;
        let a = random_symmetric(n, 11);
        let (reference, _) = a.eigh(UPLO::Lower).unwrap();

        let mut vals_fr = vec![0.0; p];
        let mut y_fr = random_block(n, p, 5);
        let mut work = workspaces(n, p, 3);
        let fr = Eigensolver::new(1e-10)
            .unwrap()
            .solve(
                &mut Dense { a: a.clone() },
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y_fr,
                &mut vals_fr,
                &mut work,
            )
            .unwrap();

        let mut vals_pr = vec![0.0; p];
        let mut y_pr = random_block(n, p, 5);
        let mut work = workspaces(n, p, 4);
        let pr = Eigensolver::new(1e-10)
            .unwrap()
            .solve(
                &mut Dense { a: a.clone() },
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y_pr,
                &mut vals_pr,
                &mut work,
            )
            .unwrap();

        for j in 0..p {
            assert_relative_eq!(vals_fr[j], reference[j], epsilon = 1e-6);
            assert_relative_eq!(vals_pr[j], reference[j], epsilon = 1e-6);
            assert_relative_eq!(vals_fr[j], vals_pr[j], epsilon = 1e-6);
        }
        // Polak–Ribière should not need substantially more iterations
        assert!(pr.iterations as f64 <= fr.iterations as f64 * 1.2 + 2.0);
    }

    #[test]
    fn test_forced_approximate_linmin() {
        let n = 16;
        let mut op = diag_operator(n);
        let mut y = random_block(n, 3, 13);
        let mut work = workspaces(n, 3, 3);
        let mut eigenvalues = vec![0.0; 3];
        Eigensolver::new(1e-10)
            .unwrap()
            .with_linmin_policy(LinminPolicy::ForceApprox)
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .unwrap();
        assert_relative_eq!(eigenvalues[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(eigenvalues[1], 2.0, epsilon = 1e-6);
        assert_relative_eq!(eigenvalues[2], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cg_reset_does_not_hurt_residual() {
        let n = 256;
        let p = 4;
        let a = Array2::from_diag(&Array1::from_iter((1..=n).map(|i| i as f64)));

        let mut vals_plain = vec![0.0; p];
        let mut y_plain = random_block(n, p, 21);
        let mut work = workspaces(n, p, 4);
        Eigensolver::new(1e-10)
            .unwrap()
            .solve(
                &mut Dense { a: a.clone() },
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y_plain,
                &mut vals_plain,
                &mut work,
            )
            .unwrap();

        let mut vals_reset = vec![0.0; p];
        let mut y_reset = random_block(n, p, 21);
        let mut work = workspaces(n, p, 4);
        Eigensolver::new(1e-10)
            .unwrap()
            .with_cg_reset(CG_RESET_ITERS)
            .solve(
                &mut Dense { a: a.clone() },
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y_reset,
                &mut vals_reset,
                &mut work,
            )
            .unwrap();

        let res_plain = residual(&a, &y_plain, &vals_plain);
        let res_reset = residual(&a, &y_reset, &vals_reset);
        assert!(res_reset < 10.0 * res_plain + 1e-6);
        for j in 0..p {
            assert_relative_eq!(vals_reset[j], vals_plain[j], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_jacobi_preconditioner_with_projection() {
        let n = 16;
        let a = Array2::from_diag(&Array1::from_iter((1..=n).map(|i| i as f64)));
        let inv_diag = Array1::from_iter((1..=n).map(|i| 1.0 / i as f64));
        let mut y = random_block(n, 3, 17);
        let mut work = workspaces(n, 3, 4);
        let mut eigenvalues = vec![0.0; 3];
        Eigensolver::new(1e-10)
            .unwrap()
            .with_projected_preconditioner()
            .solve(
                &mut Dense { a },
                &mut Jacobi { inv_diag },
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .unwrap();
        assert_relative_eq!(eigenvalues[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(eigenvalues[1], 2.0, epsilon = 1e-6);
        assert_relative_eq!(eigenvalues[2], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_trace_is_nonincreasing() {
        let n = 32;
        let mut op = Recording {
            a: random_symmetric(n, 3),
            traces: Vec::new(),
        };
        let mut y = random_block(n, 2, 9);
        let mut work = workspaces(n, 2, 4);
        let mut eigenvalues = vec![0.0; 2];
        Eigensolver::new(1e-10)
            .unwrap()
            .with_linmin_policy(LinminPolicy::ForceExact)
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .unwrap();
        assert!(op.traces.len() > 2);
        for w in op.traces.windows(2) {
            assert!(w[1] <= w[0] + 1e-9 * (w[0].abs() + 1.0));
        }
    }

    #[test]
    fn test_insufficient_workspace() {
        let n = 8;
        let mut op = diag_operator(n);
        let mut y = random_block(n, 1, 1);
        let mut work = workspaces(n, 1, 1);
        let mut eigenvalues = vec![0.0];
        let err = Eigensolver::new(1e-10)
            .unwrap()
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<TraceminError>(),
            Some(TraceminError::InsufficientWorkspace { available: 1 })
        ));
    }

    #[test]
    fn test_eigenvalue_slice_length_mismatch() {
        let n = 8;
        let mut op = diag_operator(n);
        let mut y = random_block(n, 2, 1);
        let mut work = workspaces(n, 2, 3);
        let mut eigenvalues = vec![0.0; 3];
        let err = Eigensolver::new(1e-10)
            .unwrap()
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<TraceminError>(),
            Some(TraceminError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_non_finite_trace_is_fatal() {
        let n = 8;
        let mut op = Nan;
        let mut y = random_block(n, 1, 1);
        let mut work = workspaces(n, 1, 3);
        let mut eigenvalues = vec![0.0];
        let err = Eigensolver::new(1e-10)
            .unwrap()
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<TraceminError>(),
            Some(TraceminError::NonFiniteTrace { .. })
        ));
    }

    #[test]
    fn test_iteration_cap_reports_nonconvergence() {
        let n = 16;
        let mut op = diag_operator(n);
        let mut y = random_block(n, 2, 19);
        let mut work = workspaces(n, 2, 4);
        let mut eigenvalues = vec![0.0; 2];
        let err = Eigensolver::new(1e-14)
            .unwrap()
            .with_max_iters(2)
            .solve(
                &mut op,
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<TraceminError>(),
            Some(TraceminError::NotConverged { iterations: 2 })
        ));
    }

    #[test]
    fn test_invalid_tolerance() {
        assert!(Eigensolver::new(0.0_f64).is_err());
        assert!(Eigensolver::new(-1.0_f64).is_err());
    }

    #[test]
    fn test_residual_bound() {
        let n = 64;
        let p = 3;
        let a = random_symmetric(n, 29);
        let mut y = random_block(n, p, 31);
        let mut work = workspaces(n, p, 4);
        let mut eigenvalues = vec![0.0; p];
        Eigensolver::new(1e-11)
            .unwrap()
            .solve(
                &mut Dense { a: a.clone() },
                &mut IdentityPreconditioner::new(),
                &mut NoConstraint::new(),
                &mut y,
                &mut eigenvalues,
                &mut work,
            )
            .unwrap();
        // the trace-based stopping criterion leaves a residual of roughly
        // sqrt(tolerance·gap); 1e-4 is a comfortable margin at tol = 1e-11
        assert!(residual(&a, &y, &eigenvalues) < 1e-4);
    }
}
