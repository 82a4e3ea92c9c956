//! C9: dense `A = L D L^T` factorization for symmetric positive-definite `A`.
//!
//! Unlike the LU family, only the lower triangle is ever written. Each
//! elimination step needs the *reduced* column `i` (the Schur-complement
//! multipliers before they're divided by the pivot), so that column is
//! captured up front, before the in-place `inv_d` scaling overwrites it.

use linsolve_core::matrix::{DenseMatrix, DiagonalMatrix, HasShape, LowerUnitriangularMatrix};
use linsolve_core::NumericalFailure;

pub struct DenseCholeskyParts {
    pub d: DiagonalMatrix,
    pub l: LowerUnitriangularMatrix,
}

/// Runs the scaling pre-pass plus in-place symmetric elimination. Rejects
/// (via `Err`) as soon as a pivot is not strictly positive: that means `A`
/// (or its remaining Schur complement) isn't positive definite, which this
/// unpivoted factorization can't route around.
pub fn factorize(matrix: &DenseMatrix, epsilon: f64) -> Result<DenseCholeskyParts, NumericalFailure> {
    let n = matrix.rows();
    let s = matrix.entry_norm_max();
    if s == 0.0 {
        log::debug!("dense Cholesky: zero matrix, nothing to factorize");
        return Err(NumericalFailure);
    }

    let mut a = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            a[i * n + j] = matrix.value_at(i, j) / s;
        }
    }

    let eps = epsilon + 1e-100;
    let mut d_builder = DiagonalMatrix::zero_builder(n);
    let mut l_builder = LowerUnitriangularMatrix::unit(n);

    for i in 0..n {
        let d = a[i * n + i];
        if d <= eps {
            log::debug!("dense Cholesky: pivot {i} not positive enough (d={d} <= eps={eps})");
            return Err(NumericalFailure);
        }
        let inv_d = 1.0 / d;

        // Reduced column `i`, i.e. `l_ki * d` for each `k > i`, before the
        // division below overwrites it with `l_ki` itself.
        let reduced_col: Vec<f64> = (i + 1..n).map(|k| a[k * n + i]).collect();

        for j in (i + 1)..n {
            a[j * n + i] *= inv_d;
        }
        for j in (i + 1)..n {
            let l_ji = a[j * n + i];
            for k in (i + 1)..=j {
                a[j * n + k] -= l_ji * reduced_col[k - (i + 1)];
            }
        }

        d_builder.set_value(i, d * s);
        for j in (i + 1)..n {
            l_builder.set_value(j, i, a[j * n + i]);
        }
    }

    let d = d_builder.build();
    if d.determinant().is_singular() {
        log::debug!("dense Cholesky: post-scaling rebuild of D underflowed/overflowed to singular");
        return Err(NumericalFailure);
    }

    Ok(DenseCholeskyParts {
        d,
        l: l_builder.build(),
    })
}
