//! C11: banded modified-Cholesky — unpivoted `A = L D L^T` tolerating an
//! indefinite (possibly negative) `D`.
//!
//! Identical elimination to [`crate::llt::band::factorize`], but the pivot
//! test only guards against magnitude, not sign: pivoting (as the dense
//! Bunch-Kaufman helper does) would fill in outside the declared band, which
//! this banded variant must never do, so an indefinite banded matrix is
//! factorized as-is or rejected outright — there's no pivot-past-it option.

use linsolve_core::matrix::{BandMatrix, DiagonalMatrix, LowerUnitriangularBandMatrix};
use linsolve_core::NumericalFailure;

pub struct BandModifiedCholeskyParts {
    pub d: DiagonalMatrix,
    pub l: LowerUnitriangularBandMatrix,
}

pub fn factorize(
    matrix: &BandMatrix,
    epsilon: f64,
) -> Result<BandModifiedCholeskyParts, NumericalFailure> {
    let band_dim = matrix.band_matrix_dimension();
    let n = band_dim.n();
    let b = band_dim.lower_bandwidth();

    let s = matrix.entry_norm_max();
    if s == 0.0 {
        log::debug!("band modified Cholesky: zero matrix, nothing to factorize");
        return Err(NumericalFailure);
    }

    let mut a = BandMatrix::from_dense_band(band_dim, |i, j| matrix.value_at(i, j) / s);
    let eps = epsilon + 1e-100;

    let mut d_builder = DiagonalMatrix::zero_builder(n);
    let mut l_builder = LowerUnitriangularBandMatrix::unit(n, b);

    for i in 0..n {
        let d = a.value_at(i, i);
        if d.abs() <= eps {
            log::debug!("band modified Cholesky: pivot {i} failed regularity test (|{d}| <= {eps})");
            return Err(NumericalFailure);
        }
        let inv_d = 1.0 / d;
        let j_hi = (i + b).min(n.saturating_sub(1));

        for j in (i + 1)..=j_hi {
            let scaled = a.value_at(j, i) * inv_d;
            a.set_value(j, i, scaled);
        }
        for j in (i + 1)..=j_hi {
            let l_ji = a.value_at(j, i);
            for k in (i + 1)..=j {
                let updated = a.value_at(j, k) - l_ji * a.value_at(i, k);
                a.set_value(j, k, updated);
            }
        }

        d_builder.set_value(i, d * s);
        for j in (i + 1)..=j_hi {
            l_builder.set_value(j, i, a.value_at(j, i));
        }
    }

    let d = d_builder.build();
    if d.determinant().is_singular() {
        log::debug!("band modified Cholesky: post-scaling rebuild of D underflowed/overflowed to singular");
        return Err(NumericalFailure);
    }

    Ok(BandModifiedCholeskyParts {
        d,
        l: l_builder.build(),
    })
}
