//! C8: dense `A = P L D U` factorization with partial (row) pivoting.
//!
//! Identical to [`crate::dense::factorize`]'s elimination once the pivot row
//! is chosen, but at each step the remaining rows are searched for the
//! largest-magnitude candidate in the pivot column and swapped into place
//! first. Unlike the unpivoted helper, a near-zero pivot here means the
//! matrix itself is (numerically) singular, since no row swap can rescue it.

use linsolve_core::matrix::{DenseMatrix, DiagonalMatrix, HasShape, LowerUnitriangularMatrix, PermutationMatrix};
use linsolve_core::NumericalFailure;

pub struct DenseLuPivotingParts {
    pub p: PermutationMatrix,
    pub d: DiagonalMatrix,
    pub l: LowerUnitriangularMatrix,
    /// `U^T`, stored as unit-lower-triangular since `U` is unit upper
    /// triangular.
    pub ut: LowerUnitriangularMatrix,
}

pub fn factorize(matrix: &DenseMatrix, epsilon: f64) -> Result<DenseLuPivotingParts, NumericalFailure> {
    let n = matrix.rows();
    let s = matrix.entry_norm_max();
    if s == 0.0 {
        log::debug!("dense LU (pivoting): zero matrix, nothing to factorize");
        return Err(NumericalFailure);
    }

    let mut a = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            a[i * n + j] = matrix.value_at(i, j) / s;
        }
    }

    let eps = epsilon + 1e-100;
    let mut p_builder = PermutationMatrix::unit_builder(n);
    let mut d_builder = DiagonalMatrix::zero_builder(n);
    let mut l_builder = LowerUnitriangularMatrix::unit(n);
    let mut ut_builder = LowerUnitriangularMatrix::unit(n);

    for i in 0..n {
        let mut pivot_row = i;
        let mut pivot_mag = a[i * n + i].abs();
        for r in (i + 1)..n {
            let mag = a[r * n + i].abs();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = r;
            }
        }
        if pivot_row != i {
            for k in 0..n {
                a.swap(i * n + k, pivot_row * n + k);
            }
            p_builder.swap_columns(i, pivot_row);
        }

        let d = a[i * n + i];
        if d.abs() <= eps {
            log::debug!("dense LU (pivoting): best available pivot {i} still failed (|{d}| <= {eps})");
            return Err(NumericalFailure);
        }
        let inv_d = 1.0 / d;

        for j in (i + 1)..n {
            a[j * n + i] *= inv_d;
        }
        for j in (i + 1)..n {
            let l_ji = a[j * n + i];
            for k in (i + 1)..n {
                a[j * n + k] -= l_ji * a[i * n + k];
            }
        }
        for k in (i + 1)..n {
            a[i * n + k] *= inv_d;
        }

        d_builder.set_value(i, d * s);
        for j in (i + 1)..n {
            l_builder.set_value(j, i, a[j * n + i]);
            ut_builder.set_value(j, i, a[i * n + j]);
        }
    }

    let d = d_builder.build();
    if d.determinant().is_singular() {
        log::debug!("dense LU (pivoting): post-scaling rebuild of D underflowed/overflowed to singular");
        return Err(NumericalFailure);
    }

    Ok(DenseLuPivotingParts {
        p: p_builder.build(),
        d,
        l: l_builder.build(),
        ut: ut_builder.build(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linsolve_core::matrix::LinearOperator;

    #[test]
    fn pivots_past_a_zero_that_would_defeat_the_unpivoted_helper() {
        let a = DenseMatrix::from_rows(&[
            vec![0.0, 1.0, 0.0, 0.0],
            vec![1.0, 2.0, 2.0, 0.0],
            vec![0.0, 3.0, 3.0, 3.0],
            vec![0.0, 0.0, 5.0, 4.0],
        ]);
        let parts = factorize(&a, 1e-12).expect("pivoting should succeed where unpivoted fails");
        assert!(!parts.d.determinant().is_singular());
    }

    #[test]
    fn reconstructs_the_original_matrix_via_p_l_d_u() {
        let a = DenseMatrix::from_rows(&[
            vec![2.0, 1.0, 1.0],
            vec![4.0, 3.0, 3.0],
            vec![8.0, 7.0, 9.0],
        ]);
        let parts = factorize(&a, 1e-12).expect("should factorize");

        // The recorded permutation satisfies `P A = L D U`, so
        // `A = P^T L D U`.
        for col in 0..3 {
            let mut e = vec![0.0; 3];
            e[col] = 1.0;
            let u_e = parts.ut.apply_transpose(&e);
            let du_e = parts.d.apply(&u_e);
            let ldu_e = parts.l.apply(&du_e);
            let pt_ldu_e = parts.p.inverse().apply(&ldu_e);
            let expected: Vec<f64> = (0..3).map(|r| a.value_at(r, col)).collect();
            for (x, y) in pt_ldu_e.iter().zip(expected.iter()) {
                assert!((x - y).abs() < 1e-9, "col {col}: {x} != {y}");
            }
        }
    }

    #[test]
    fn rejects_a_genuinely_singular_matrix() {
        let a = DenseMatrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert!(factorize(&a, 1e-12).is_err());
    }
}
