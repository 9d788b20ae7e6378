// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::ndarray_m::adjoint;
use crate::SqEighMetric;
use anyhow::Error;
use ndarray::Array2;
use ndarray_linalg::cholesky::Cholesky;
use ndarray_linalg::eigh::Eigh;
use ndarray_linalg::triangular::{Diag, SolveTriangular};
use ndarray_linalg::{Lapack, Scalar, UPLO};

impl<A> SqEighMetric<A::Real> for Array2<A>
where
    A: Scalar + Lapack,
{
    /// Reduce `A·v = λ·B·v` to a standard Hermitian problem via the Cholesky
    /// factor `B = L·L†`, solve `(L⁻¹·A·L⁻†)·w = λ·w`, and back-transform the
    /// eigenvectors as `v = L⁻†·w`.
    fn eigh_in_metric(&self, metric: &Self) -> Result<(Vec<A::Real>, Self), Error> {
        let l = metric.cholesky(UPLO::Lower)?;
        // z = L⁻¹·A, then (L⁻¹·z†) = L⁻¹·A·L⁻† since A is Hermitian
        let z = l.solve_triangular(UPLO::Lower, Diag::NonUnit, self)?;
        let c = l.solve_triangular(UPLO::Lower, Diag::NonUnit, &adjoint(&z))?;
        let (vals, w) = c.eigh(UPLO::Lower)?;
        let v = adjoint(&l).solve_triangular(UPLO::Upper, Diag::NonUnit, &w)?;
        Ok((vals.to_vec(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_identity_metric_reduces_to_eigh() {
        let a = array![[2.0_f64, 1.0], [1.0, 2.0]];
        let b = array![[1.0_f64, 0.0], [0.0, 1.0]];
        let (vals, _) = a.eigh_in_metric(&b).unwrap();
        assert_relative_eq!(vals[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(vals[1], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_metric_normalization() {
        let a = array![[3.0_f64, 1.0], [1.0, 4.0]];
        let b = array![[2.0_f64, 0.5], [0.5, 1.0]];
        let (vals, v) = a.eigh_in_metric(&b).unwrap();
        assert!(vals[0] <= vals[1]);
        // V†·B·V = I
        let vbv = adjoint(&v).dot(&b).dot(&v);
        assert_relative_eq!(vbv[(0, 0)], 1.0, epsilon = 1e-10);
        assert_relative_eq!(vbv[(1, 1)], 1.0, epsilon = 1e-10);
        assert_relative_eq!(vbv[(0, 1)], 0.0, epsilon = 1e-10);
        // A·V = B·V·diag(vals)
        let av = a.dot(&v);
        let bv = b.dot(&v);
        for j in 0..2 {
            for i in 0..2 {
                assert_relative_eq!(av[(i, j)], bv[(i, j)] * vals[j], epsilon = 1e-9);
            }
        }
    }
}
