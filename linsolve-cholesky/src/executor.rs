//! Process-wide singleton [`FactorizationExecutor`] implementations for the
//! Cholesky family (`spec.md` §5). Each `accepts_concretely` enforces
//! symmetry on top of the element-count cap, since every member of this
//! family requires a symmetric target.

use linsolve_core::matrix::{BandMatrix, DenseMatrix, HasShape};
use linsolve_core::{check_element_count, FactorizationAcceptance, FactorizationExecutor, RejectionReason};

use crate::solver::{
    BandCholeskySolver, BandModifiedCholeskySolver, DenseCholeskySolver, DenseModifiedCholeskySolver,
};
use crate::{llt, modified};

fn check_dense_symmetric(matrix: &DenseMatrix) -> FactorizationAcceptance {
    if !matrix.is_marked_symmetric() {
        return FactorizationAcceptance::Rejected(RejectionReason::NotSymmetric);
    }
    check_element_count(matrix.rows() * matrix.cols())
}

fn check_band_symmetric(matrix: &BandMatrix) -> FactorizationAcceptance {
    let band_dim = matrix.band_matrix_dimension();
    if !band_dim.is_symmetric() {
        return FactorizationAcceptance::Rejected(RejectionReason::NotSymmetric);
    }
    let width = band_dim.lower_bandwidth() + band_dim.upper_bandwidth() + 1;
    check_element_count(band_dim.n() * width)
}

/// Dense `A = L D L^T` factorization, positive-definite only, no pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseCholeskyExecutor;

impl FactorizationExecutor<DenseMatrix, DenseCholeskySolver> for DenseCholeskyExecutor {
    fn accepts_concretely(&self, matrix: &DenseMatrix) -> FactorizationAcceptance {
        check_dense_symmetric(matrix)
    }

    fn apply_concretely(&self, matrix: &DenseMatrix, epsilon: f64) -> Option<DenseCholeskySolver> {
        let parts = llt::dense::factorize(matrix, epsilon).ok()?;
        Some(DenseCholeskySolver::new(matrix.matrix_dimension(), parts.d, parts.l))
    }
}

/// Banded `A = L D L^T` factorization, positive-definite only, no pivoting.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandCholeskyExecutor;

impl FactorizationExecutor<BandMatrix, BandCholeskySolver> for BandCholeskyExecutor {
    fn accepts_concretely(&self, matrix: &BandMatrix) -> FactorizationAcceptance {
        check_band_symmetric(matrix)
    }

    fn apply_concretely(&self, matrix: &BandMatrix, epsilon: f64) -> Option<BandCholeskySolver> {
        let parts = llt::band::factorize(matrix, epsilon).ok()?;
        let dim = linsolve_core::MatrixDimension::new(matrix.rows(), matrix.cols());
        Some(BandCholeskySolver::new(dim, parts.d, parts.l))
    }
}

/// Dense modified Cholesky with Bunch-Kaufman pivoting: `P A P^T = L M L^T`,
/// tolerating an indefinite `A`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseModifiedCholeskyExecutor;

impl FactorizationExecutor<DenseMatrix, DenseModifiedCholeskySolver> for DenseModifiedCholeskyExecutor {
    fn accepts_concretely(&self, matrix: &DenseMatrix) -> FactorizationAcceptance {
        check_dense_symmetric(matrix)
    }

    fn apply_concretely(&self, matrix: &DenseMatrix, epsilon: f64) -> Option<DenseModifiedCholeskySolver> {
        let parts = modified::dense_bunch_kaufman::factorize(matrix, epsilon).ok()?;
        Some(DenseModifiedCholeskySolver::new(
            matrix.matrix_dimension(),
            parts.p,
            parts.l,
            parts.m,
        ))
    }
}

/// Banded modified Cholesky, unpivoted: `A = L D L^T` tolerating an
/// indefinite `D`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandModifiedCholeskyExecutor;

impl FactorizationExecutor<BandMatrix, BandModifiedCholeskySolver> for BandModifiedCholeskyExecutor {
    fn accepts_concretely(&self, matrix: &BandMatrix) -> FactorizationAcceptance {
        check_band_symmetric(matrix)
    }

    fn apply_concretely(&self, matrix: &BandMatrix, epsilon: f64) -> Option<BandModifiedCholeskySolver> {
        let parts = modified::band::factorize(matrix, epsilon).ok()?;
        let dim = linsolve_core::MatrixDimension::new(matrix.rows(), matrix.cols());
        Some(BandModifiedCholeskySolver::new(dim, parts.d, parts.l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linsolve_core::{BandDimension, MatrixDimension};

    #[test]
    fn dense_executor_rejects_an_unmarked_matrix() {
        let m = DenseMatrix::from_rows(&[vec![2.0, 1.0], vec![3.0, 2.0]]);
        assert!(!DenseCholeskyExecutor.accepts(&m).is_accepted());
    }

    #[test]
    fn dense_executor_factorizes_a_marked_spd_matrix() {
        let m = DenseMatrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 2.0]]);
        let solver = DenseCholeskyExecutor.apply_default(&m).unwrap().unwrap();
        assert!((solver.determinant().value() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn band_executor_rejects_an_asymmetric_band() {
        let dim = BandDimension::new(MatrixDimension::new(3, 3), 1, 0);
        let m = BandMatrix::from_dense_band(dim, |i, j| if i == j { 1.0 } else { 0.5 });
        assert!(!BandCholeskyExecutor.accepts(&m).is_accepted());
    }

    #[test]
    fn dense_modified_executor_solves_an_indefinite_marked_matrix() {
        let m = DenseMatrix::from_rows(&[
            vec![0.0, 1.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 3.0, 1.0],
            vec![0.0, 0.0, 1.0, 2.0],
        ]);
        let solver = DenseModifiedCholeskyExecutor.apply_default(&m).unwrap().unwrap();
        assert!(!solver.is_singular());
    }

    #[test]
    fn band_modified_executor_accepts_an_indefinite_symmetric_band() {
        let dim = BandDimension::new(MatrixDimension::new(3, 3), 1, 1);
        let m = BandMatrix::from_dense_band(dim, |i, j| {
            if i == j {
                if i == 1 { -2.0 } else { 3.0 }
            } else if (i as i64 - j as i64).abs() == 1 {
                1.0
            } else {
                0.0
            }
        });
        let solver = BandModifiedCholeskyExecutor.apply_default(&m).unwrap().unwrap();
        assert!(!solver.is_singular());
    }
}
