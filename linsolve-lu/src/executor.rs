//! Process-wide singleton [`FactorizationExecutor`] implementations for the
//! LU family (`spec.md` §5).

use linsolve_core::matrix::{BandMatrix, DenseMatrix, HasShape};
use linsolve_core::{check_element_count, FactorizationAcceptance, FactorizationExecutor};

use crate::solver::{BandLuSolver, DenseLuPivotingSolver, DenseLuSolver};
use crate::{band, dense, dense_pivoting};

/// Dense `A = L D U` factorization without pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseLuExecutor;

impl FactorizationExecutor<DenseMatrix, DenseLuSolver> for DenseLuExecutor {
    fn accepts_concretely(&self, matrix: &DenseMatrix) -> FactorizationAcceptance {
        check_element_count(matrix.rows() * matrix.cols())
    }

    fn apply_concretely(&self, matrix: &DenseMatrix, epsilon: f64) -> Option<DenseLuSolver> {
        let parts = dense::factorize(matrix, epsilon).ok()?;
        Some(DenseLuSolver::new(matrix.matrix_dimension(), parts.d, parts.l, parts.ut))
    }
}

/// Dense `A = P^T L D U` factorization with partial pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseLuPivotingExecutor;

impl FactorizationExecutor<DenseMatrix, DenseLuPivotingSolver> for DenseLuPivotingExecutor {
    fn accepts_concretely(&self, matrix: &DenseMatrix) -> FactorizationAcceptance {
        check_element_count(matrix.rows() * matrix.cols())
    }

    fn apply_concretely(&self, matrix: &DenseMatrix, epsilon: f64) -> Option<DenseLuPivotingSolver> {
        let parts = dense_pivoting::factorize(matrix, epsilon).ok()?;
        Some(DenseLuPivotingSolver::new(
            matrix.matrix_dimension(),
            parts.p,
            parts.d,
            parts.l,
            parts.ut,
        ))
    }
}

/// Banded `A = L D U` factorization without pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandLuExecutor;

impl FactorizationExecutor<BandMatrix, BandLuSolver> for BandLuExecutor {
    fn accepts_concretely(&self, matrix: &BandMatrix) -> FactorizationAcceptance {
        let band_dim = matrix.band_matrix_dimension();
        let width = band_dim.lower_bandwidth() + band_dim.upper_bandwidth() + 1;
        check_element_count(band_dim.n() * width)
    }

    fn apply_concretely(&self, matrix: &BandMatrix, epsilon: f64) -> Option<BandLuSolver> {
        let parts = band::factorize(matrix, epsilon).ok()?;
        let dim = linsolve_core::MatrixDimension::new(matrix.rows(), matrix.cols());
        Some(BandLuSolver::new(dim, parts.d, parts.l, parts.ut))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linsolve_core::{BandDimension, MatrixDimension};

    #[test]
    fn dense_executor_rejects_non_square_input() {
        let m = DenseMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert!(!DenseLuExecutor.accepts(&m).is_accepted());
    }

    #[test]
    fn dense_executor_factorizes_and_solves() {
        let m = DenseMatrix::from_rows(&[vec![2.0, 0.0], vec![0.0, 4.0]]);
        let solver = DenseLuExecutor.apply_default(&m).unwrap().unwrap();
        assert!((solver.determinant().value() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn dense_executor_returns_none_for_a_zero_pivot_without_pivoting() {
        let m = DenseMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 1.0]]);
        assert!(DenseLuExecutor.apply_default(&m).unwrap().is_none());
    }

    #[test]
    fn pivoting_executor_succeeds_where_the_unpivoted_one_fails() {
        let m = DenseMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 1.0]]);
        assert!(DenseLuPivotingExecutor.apply_default(&m).unwrap().is_some());
    }

    #[test]
    fn band_executor_factorizes_a_tridiagonal_matrix() {
        let dim = BandDimension::new(MatrixDimension::new(3, 3), 1, 1);
        let m = BandMatrix::from_dense_band(dim, |i, j| {
            if i == j {
                4.0
            } else if (i as i64 - j as i64).abs() == 1 {
                1.0
            } else {
                0.0
            }
        });
        let solver = BandLuExecutor.apply_default(&m).unwrap().unwrap();
        assert!(solver.determinant().value() > 0.0);
    }
}
