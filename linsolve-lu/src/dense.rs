//! C6: in-place Doolittle `A = L D U` factorization (no pivoting) on a dense
//! row-major buffer.

use linsolve_core::matrix::{DenseMatrix, DiagonalMatrix, HasShape, LowerUnitriangularMatrix};
use linsolve_core::NumericalFailure;

/// The collaborator matrices rebuilt from a successful elimination.
pub struct DenseLuParts {
    pub d: DiagonalMatrix,
    pub l: LowerUnitriangularMatrix,
    /// `U^T`, stored as unit-lower-triangular since `U` is unit upper
    /// triangular.
    pub ut: LowerUnitriangularMatrix,
}

/// Runs the scaling pre-pass plus in-place Doolittle elimination.
///
/// `epsilon` is the caller's regularity threshold; `spec.md` §4.2 adds a
/// small additive floor (`1e-100`) so an exact-zero pivot always rejects
/// even when the caller passes `epsilon = 0`.
pub fn factorize(matrix: &DenseMatrix, epsilon: f64) -> Result<DenseLuParts, NumericalFailure> {
    let n = matrix.rows();
    let s = matrix.entry_norm_max();
    if s == 0.0 {
        log::debug!("dense LU: zero matrix, nothing to factorize");
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
    let mut ut_builder = LowerUnitriangularMatrix::unit(n);

    for i in 0..n {
        let d = a[i * n + i];
        if d.abs() <= eps {
            log::debug!("dense LU: pivot {i} failed regularity test (|{d}| <= {eps})");
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
        log::debug!("dense LU: post-scaling rebuild of D underflowed/overflowed to singular");
        return Err(NumericalFailure);
    }

    Ok(DenseLuParts {
        d,
        l: l_builder.build(),
        ut: ut_builder.build(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorizes_the_spec_n4_example() {
        let a = DenseMatrix::from_rows(&[
            vec![1.0, 2.0, 3.0, 0.0],
            vec![3.0, 2.0, 4.0, 5.0],
            vec![0.0, 2.0, 3.0, 6.0],
            vec![0.0, 0.0, 1.0, 4.0],
        ]);
        let parts = factorize(&a, 1e-12).expect("should factorize");
        let det = parts.d.determinant();
        assert!((det.value() - 26.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_a_zero_pivot_without_pivoting() {
        let a = DenseMatrix::from_rows(&[
            vec![0.0, 1.0, 0.0, 0.0],
            vec![1.0, 2.0, 2.0, 0.0],
            vec![0.0, 3.0, 3.0, 3.0],
            vec![0.0, 0.0, 5.0, 4.0],
        ]);
        assert!(factorize(&a, 1e-12).is_err());
    }

    #[test]
    fn rejects_the_zero_matrix() {
        let a = DenseMatrix::from_rows(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
        assert!(factorize(&a, 1e-12).is_err());
    }

    #[test]
    fn single_element_matrix_factorizes() {
        let a = DenseMatrix::from_rows(&[vec![-2.0]]);
        let parts = factorize(&a, 1e-12).expect("should factorize");
        assert!((parts.d.determinant().value() - (-2.0)).abs() < 1e-9);
    }
}
