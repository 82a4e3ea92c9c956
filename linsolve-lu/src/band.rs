//! C7: the banded counterpart of [`crate::dense::factorize`]. Without
//! pivoting, Doolittle elimination on a banded matrix never fills in outside
//! the original `(bL, bU)` band, so the working buffer stays a [`BandMatrix`].

use linsolve_core::matrix::{BandMatrix, DiagonalMatrix, LowerUnitriangularBandMatrix};
use linsolve_core::NumericalFailure;

pub struct BandLuParts {
    pub d: DiagonalMatrix,
    pub l: LowerUnitriangularBandMatrix,
    /// `U^T`, banded with bandwidth `bU`.
    pub ut: LowerUnitriangularBandMatrix,
}

pub fn factorize(matrix: &BandMatrix, epsilon: f64) -> Result<BandLuParts, NumericalFailure> {
    let band_dim = matrix.band_matrix_dimension();
    let n = band_dim.n();
    let bl = band_dim.lower_bandwidth();
    let bu = band_dim.upper_bandwidth();

    let s = matrix.entry_norm_max();
    if s == 0.0 {
        log::debug!("band LU: zero matrix, nothing to factorize");
        return Err(NumericalFailure);
    }

    let mut a = BandMatrix::from_dense_band(band_dim, |i, j| matrix.value_at(i, j) / s);
    let eps = epsilon + 1e-100;

    let mut d_builder = DiagonalMatrix::zero_builder(n);
    let mut l_builder = LowerUnitriangularBandMatrix::unit(n, bl);
    let mut ut_builder = LowerUnitriangularBandMatrix::unit(n, bu);

    for i in 0..n {
        let d = a.value_at(i, i);
        if d.abs() <= eps {
            log::debug!("band LU: pivot {i} failed regularity test (|{d}| <= {eps})");
            return Err(NumericalFailure);
        }
        let inv_d = 1.0 / d;
        let j_hi = (i + bl).min(n.saturating_sub(1));
        let k_hi = (i + bu).min(n.saturating_sub(1));

        for j in (i + 1)..=j_hi {
            let scaled = a.value_at(j, i) * inv_d;
            a.set_value(j, i, scaled);
        }
        for j in (i + 1)..=j_hi {
            let l_ji = a.value_at(j, i);
            for k in (i + 1)..=k_hi {
                let updated = a.value_at(j, k) - l_ji * a.value_at(i, k);
                a.set_value(j, k, updated);
            }
        }
        for k in (i + 1)..=k_hi {
            let scaled = a.value_at(i, k) * inv_d;
            a.set_value(i, k, scaled);
        }

        d_builder.set_value(i, d * s);
        for j in (i + 1)..=j_hi {
            l_builder.set_value(j, i, a.value_at(j, i));
        }
        for k in (i + 1)..=k_hi {
            ut_builder.set_value(k, i, a.value_at(i, k));
        }
    }

    let d = d_builder.build();
    if d.determinant().is_singular() {
        log::debug!("band LU: post-scaling rebuild of D underflowed/overflowed to singular");
        return Err(NumericalFailure);
    }

    Ok(BandLuParts {
        d,
        l: l_builder.build(),
        ut: ut_builder.build(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linsolve_core::matrix::LinearOperator;
    use linsolve_core::{BandDimension, MatrixDimension};

    fn tridiagonal(diag: &[f64], sub: &[f64], sup: &[f64]) -> BandMatrix {
        let n = diag.len();
        let dim = BandDimension::new(MatrixDimension::new(n, n), 1, 1);
        BandMatrix::from_dense_band(dim, |i, j| {
            if i == j {
                diag[i]
            } else if j + 1 == i {
                sub[j]
            } else if i + 1 == j {
                sup[i]
            } else {
                0.0
            }
        })
    }

    #[test]
    fn factorizes_a_tridiagonal_matrix() {
        let m = tridiagonal(&[4.0, 4.0, 4.0, 4.0], &[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]);
        let parts = factorize(&m, 1e-12).expect("should factorize");
        assert!(parts.d.determinant().value() > 0.0);
    }

    #[test]
    fn matches_the_dense_factorization_for_the_same_matrix() {
        use crate::dense;
        use linsolve_core::matrix::DenseMatrix;

        let banded = tridiagonal(&[2.0, 3.0, 4.0, 5.0], &[1.0, 1.0, 1.0], &[0.5, 0.5, 0.5]);
        let dense_equiv = DenseMatrix::from_rows(&(0..4)
            .map(|i| (0..4).map(|j| banded.value_at(i, j)).collect())
            .collect::<Vec<_>>());

        let band_parts = factorize(&banded, 1e-12).expect("band should factorize");
        let dense_parts = dense::factorize(&dense_equiv, 1e-12).expect("dense should factorize");

        assert!(
            (band_parts.d.determinant().value() - dense_parts.d.determinant().value()).abs() < 1e-9
        );
    }

    #[test]
    fn rejects_a_zero_pivot() {
        let m = tridiagonal(&[0.0, 4.0, 4.0], &[1.0, 1.0], &[1.0, 1.0]);
        assert!(factorize(&m, 1e-12).is_err());
    }

    #[test]
    fn l_and_ut_roundtrip_through_apply_and_inverse() {
        let m = tridiagonal(&[4.0, 4.0, 4.0, 4.0], &[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]);
        let parts = factorize(&m, 1e-12).expect("should factorize");
        let v = [1.0, 2.0, 3.0, 4.0];
        let applied = parts.l.apply(&v);
        let solved = parts.l.inverse().apply(&applied);
        for (a, b) in v.iter().zip(solved.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
