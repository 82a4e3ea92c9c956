//! C10: the banded counterpart of [`crate::llt::dense::factorize`]. Assumes
//! a symmetric band (`lower_bandwidth == upper_bandwidth`); executors enforce
//! that structurally before this helper ever runs.
//!
//! As in the dense variant, only the lower triangle of the working buffer is
//! ever written. Each step needs the *reduced* sub-diagonal column `i`
//! (`l_ki * d` for `k > i`) before it's divided down to `l_ki`, so that
//! column is captured up front rather than re-read from the buffer mid-step.
//! [`crate::modified::dense_bunch_kaufman`] can't rely on a lower-triangle-
//! only invariant at all once row/column swaps are introduced, which is why
//! it mirrors writes into both triangles instead.

use linsolve_core::matrix::{BandMatrix, DiagonalMatrix, LowerUnitriangularBandMatrix};
use linsolve_core::NumericalFailure;

pub struct BandCholeskyParts {
    pub d: DiagonalMatrix,
    pub l: LowerUnitriangularBandMatrix,
}

pub fn factorize(matrix: &BandMatrix, epsilon: f64) -> Result<BandCholeskyParts, NumericalFailure> {
    let band_dim = matrix.band_matrix_dimension();
    let n = band_dim.n();
    let b = band_dim.lower_bandwidth();

    let s = matrix.entry_norm_max();
    if s == 0.0 {
        log::debug!("band Cholesky: zero matrix, nothing to factorize");
        return Err(NumericalFailure);
    }

    let mut a = BandMatrix::from_dense_band(band_dim, |i, j| matrix.value_at(i, j) / s);
    let eps = epsilon + 1e-100;

    let mut d_builder = DiagonalMatrix::zero_builder(n);
    let mut l_builder = LowerUnitriangularBandMatrix::unit(n, b);

    for i in 0..n {
        let d = a.value_at(i, i);
        if d <= eps {
            log::debug!("band Cholesky: pivot {i} not positive enough (d={d} <= eps={eps})");
            return Err(NumericalFailure);
        }
        let inv_d = 1.0 / d;
        let j_hi = (i + b).min(n.saturating_sub(1));

        // Reduced sub-diagonal column `i`, captured before the division
        // below overwrites `a.value_at(k, i)` with `l_ki` itself.
        let reduced_col: Vec<f64> = ((i + 1)..=j_hi).map(|k| a.value_at(k, i)).collect();

        for j in (i + 1)..=j_hi {
            let scaled = a.value_at(j, i) * inv_d;
            a.set_value(j, i, scaled);
        }
        for j in (i + 1)..=j_hi {
            let l_ji = a.value_at(j, i);
            for k in (i + 1)..=j {
                let updated = a.value_at(j, k) - l_ji * reduced_col[k - (i + 1)];
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
        log::debug!("band Cholesky: post-scaling rebuild of D underflowed/overflowed to singular");
        return Err(NumericalFailure);
    }

    Ok(BandCholeskyParts {
        d,
        l: l_builder.build(),
    })
}
