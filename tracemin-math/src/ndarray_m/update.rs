// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::{BlockDiffSwap, MatAssign, MatAxpby, MatScale, MatZero};
use ndarray::{Array2, Zip};
use ndarray_linalg::Scalar;

impl<A> MatScale<A::Real> for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn scale(&mut self, a: A::Real) {
        let a = A::from_real(a);
        self.mapv_inplace(|v| v * a);
    }
}

impl<A> MatAxpby<A::Real> for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn axpby(&mut self, a: A::Real, b: A::Real, other: &Self) {
        let a = A::from_real(a);
        let b = A::from_real(b);
        self.zip_mut_with(other, |z, w| *z = a * *z + b * *w);
    }
}

impl<A> MatAssign for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn assign_from(&mut self, other: &Self) {
        self.assign(other);
    }
}

impl<A> MatZero for Array2<A>
where
    A: Scalar,
{
    #[inline]
    fn set_zero(&mut self) {
        self.fill(A::zero());
    }
}

impl<A> BlockDiffSwap for Array2<A>
where
    A: Scalar,
{
    fn diff_swap(&mut self, prev: &mut Self) {
        Zip::from(&mut *self).and(&mut *prev).for_each(|g, p| {
            let t = *g;
            *g = t - *p;
            *p = t;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use num_complex::Complex64;

    #[test]
    fn test_scale_complex_by_real() {
        let mut z = array![[Complex64::new(1.0, -2.0)]];
        z.scale(0.5);
        assert_relative_eq!(z[(0, 0)].re, 0.5, epsilon = 1e-12);
        assert_relative_eq!(z[(0, 0)].im, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axpby() {
        let mut z = array![[1.0_f64, 2.0], [3.0, 4.0]];
        let w = array![[10.0_f64, 10.0], [10.0, 10.0]];
        z.axpby(2.0, 0.5, &w);
        assert_relative_eq!(z[(0, 0)], 7.0, epsilon = 1e-12);
        assert_relative_eq!(z[(1, 1)], 13.0, epsilon = 1e-12);
    }

    #[test]
    fn test_diff_swap() {
        let mut g = array![[5.0_f64], [7.0]];
        let mut prev = array![[1.0_f64], [2.0]];
        g.diff_swap(&mut prev);
        // g now holds the difference, prev the incoming g
        assert_relative_eq!(g[(0, 0)], 4.0, epsilon = 1e-12);
        assert_relative_eq!(g[(1, 0)], 5.0, epsilon = 1e-12);
        assert_relative_eq!(prev[(0, 0)], 5.0, epsilon = 1e-12);
        assert_relative_eq!(prev[(1, 0)], 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_set_zero_and_assign() {
        let mut z = array![[1.0_f64], [2.0]];
        let w = array![[3.0_f64], [4.0]];
        z.set_zero();
        assert_relative_eq!(z[(0, 0)], 0.0, epsilon = 1e-12);
        z.assign_from(&w);
        assert_relative_eq!(z[(1, 0)], 4.0, epsilon = 1e-12);
    }
}
