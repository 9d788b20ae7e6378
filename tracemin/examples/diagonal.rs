// Copyright 2024-2026 tracemin developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use ndarray::{Array1, Array2};
use tracemin::core::{term_logger, Error, IdentityPreconditioner, NoConstraint, Operator};
use tracemin::solver::Eigensolver;

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

fn run() -> Result<(), Error> {
    let n = 24;
    let p = 3;

    // a simple diagonal operator with spectrum 1, 2, ..., n
    let mut operator = Dense {
        a: Array2::from_diag(&Array1::from_iter((1..=n).map(|i| i as f64))),
    };

    // a deterministic full-rank initial guess
    let mut y = Array2::from_shape_fn((n, p), |(i, j)| 1.0 / (1.0 + (i + 3 * j) as f64));
    let mut work = vec![Array2::<f64>::zeros((n, p)); 4];
    let mut eigenvalues = vec![0.0; p];

    let result = Eigensolver::new(1e-10)?
        .with_logger(term_logger())
        .solve(
            &mut operator,
            &mut IdentityPreconditioner::new(),
            &mut NoConstraint::new(),
            &mut y,
            &mut eigenvalues,
            &mut work,
        )?;

    println!("{}", result);
    println!("eigenvalues: {:?}", eigenvalues);

    Ok(())
}

fn main() {
    if let Err(ref e) = run() {
        println!("{}", e);
        std::process::exit(1);
    }
}
