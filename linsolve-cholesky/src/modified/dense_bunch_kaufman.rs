//! C12: dense modified-Cholesky with Bunch-Kaufman pivoting — `A` symmetric
//! but possibly indefinite, factorized as `P A P^T = L M L^T` where `M` is a
//! [`Block2SymmetricDiagonal`] carrying 1x1 and 2x2 blocks.
//!
//! Unlike the other factorizations in this workspace, row/column swaps mean
//! the working buffer can't rely on "untouched upper triangle equals the
//! original value" — every write below the diagonal is mirrored above it, so
//! reads at `(r, c)` with `r < c` are always current regardless of how many
//! swaps have happened. `L`'s already-computed columns live in a parallel
//! `n x n` buffer for the same reason: a swap must carry a row's finished L
//! entries along with it.

use linsolve_core::matrix::{DenseMatrix, HasShape, LowerUnitriangularMatrix, PermutationMatrix};
use linsolve_core::{Block2SymmetricDiagonal, Block2SymmetricDiagonalBuilder, NumericalFailure};

pub struct DenseModifiedCholeskyParts {
    pub p: PermutationMatrix,
    pub l: LowerUnitriangularMatrix,
    pub m: Block2SymmetricDiagonal,
}

/// Bunch-Kaufman's pivot-size threshold: `(1 + sqrt(17)) / 8`.
fn alpha() -> f64 {
    (1.0 + 17f64.sqrt()) / 8.0
}

fn get(a: &[f64], n: usize, i: usize, j: usize) -> f64 {
    a[i * n + j]
}

fn set_mirrored(a: &mut [f64], n: usize, i: usize, j: usize, v: f64) {
    a[i * n + j] = v;
    a[j * n + i] = v;
}

fn swap_positions(
    a: &mut [f64],
    l_storage: &mut [f64],
    n: usize,
    p_builder: &mut linsolve_core::matrix::PermutationMatrixBuilder,
    i: usize,
    j: usize,
) {
    if i == j {
        return;
    }
    for col in 0..n {
        a.swap(i * n + col, j * n + col);
    }
    for row in 0..n {
        a.swap(row * n + i, row * n + j);
    }
    for col in 0..n {
        l_storage.swap(i * n + col, j * n + col);
    }
    p_builder.swap_columns(i, j);
}

fn pivot_1x1(
    a: &mut [f64],
    l_storage: &mut [f64],
    n: usize,
    block2: &mut Block2SymmetricDiagonalBuilder,
    k: usize,
    eps: f64,
    s: f64,
) -> Result<(), NumericalFailure> {
    let d = get(a, n, k, k);
    if d.abs() <= eps {
        return Err(NumericalFailure);
    }
    let inv_d = 1.0 / d;

    for j in (k + 1)..n {
        l_storage[j * n + k] = get(a, n, j, k) * inv_d;
    }
    for j in (k + 1)..n {
        let l_jk = l_storage[j * n + k];
        for m in (k + 1)..=j {
            let updated = get(a, n, j, m) - l_jk * get(a, n, k, m);
            set_mirrored(a, n, j, m, updated);
        }
    }

    block2.set_diag(k, d * s);
    Ok(())
}

fn pivot_2x2(
    a: &mut [f64],
    l_storage: &mut [f64],
    n: usize,
    block2: &mut Block2SymmetricDiagonalBuilder,
    k: usize,
    eps: f64,
    s: f64,
) -> Result<(), NumericalFailure> {
    let k1 = k + 1;
    let aa = get(a, n, k, k);
    let bb = get(a, n, k, k1);
    let cc = get(a, n, k1, k1);
    let det_e = aa * cc - bb * bb;
    if det_e.abs() <= eps {
        return Err(NumericalFailure);
    }
    let inv_det = 1.0 / det_e;

    for j in (k + 2)..n {
        let ajk = get(a, n, j, k);
        let ajk1 = get(a, n, j, k1);
        let l_jk = (ajk * cc - ajk1 * bb) * inv_det;
        let l_jk1 = (ajk1 * aa - ajk * bb) * inv_det;
        l_storage[j * n + k] = l_jk;
        l_storage[j * n + k1] = l_jk1;
    }
    for j in (k + 2)..n {
        let l_jk = l_storage[j * n + k];
        let l_jk1 = l_storage[j * n + k1];
        for m in (k + 2)..=j {
            let updated = get(a, n, j, m) - l_jk * get(a, n, k, m) - l_jk1 * get(a, n, k1, m);
            set_mirrored(a, n, j, m, updated);
        }
    }

    block2.set_diag(k, aa * s);
    block2.set_diag(k1, cc * s);
    block2.set_sub(k, bb * s);
    Ok(())
}

pub fn factorize(matrix: &DenseMatrix, epsilon: f64) -> Result<DenseModifiedCholeskyParts, NumericalFailure> {
    let n = matrix.rows();
    let s = matrix.entry_norm_max();
    if s == 0.0 {
        log::debug!("dense modified Cholesky: zero matrix, nothing to factorize");
        return Err(NumericalFailure);
    }

    let mut a = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            a[i * n + j] = matrix.value_at(i, j) / s;
        }
    }
    let mut l_storage = vec![0.0; n * n];

    let eps = epsilon + 1e-100;
    let alpha = alpha();
    let mut p_builder = PermutationMatrix::unit_builder(n);
    let mut block2_builder = Block2SymmetricDiagonal::zero_builder(n);

    let mut k = 0;
    while k < n {
        let a_kk = get(&a, n, k, k);

        let mut lambda = 0.0_f64;
        let mut r = k;
        for i in (k + 1)..n {
            let mag = get(&a, n, i, k).abs();
            if mag > lambda {
                lambda = mag;
                r = i;
            }
        }

        if lambda == 0.0 {
            pivot_1x1(&mut a, &mut l_storage, n, &mut block2_builder, k, eps, s)?;
            k += 1;
            continue;
        }
        if a_kk.abs() >= alpha * lambda {
            pivot_1x1(&mut a, &mut l_storage, n, &mut block2_builder, k, eps, s)?;
            k += 1;
            continue;
        }

        let mut sigma = 0.0_f64;
        for i in k..n {
            if i != r {
                sigma = sigma.max(get(&a, n, r, i).abs());
            }
        }

        if a_kk.abs() * sigma >= alpha * lambda * lambda {
            pivot_1x1(&mut a, &mut l_storage, n, &mut block2_builder, k, eps, s)?;
            k += 1;
            continue;
        }

        let a_rr = get(&a, n, r, r);
        if a_rr.abs() >= alpha * sigma {
            swap_positions(&mut a, &mut l_storage, n, &mut p_builder, k, r);
            pivot_1x1(&mut a, &mut l_storage, n, &mut block2_builder, k, eps, s)?;
            k += 1;
            continue;
        }

        swap_positions(&mut a, &mut l_storage, n, &mut p_builder, k + 1, r);
        pivot_2x2(&mut a, &mut l_storage, n, &mut block2_builder, k, eps, s)?;
        k += 2;
    }

    let mut l_builder = LowerUnitriangularMatrix::unit(n);
    for row in 0..n {
        for col in 0..row {
            let v = l_storage[row * n + col];
            if v != 0.0 {
                l_builder.set_value(row, col, v);
            }
        }
    }

    let m = block2_builder.build();
    if m.inverse_and_determinant().is_singular() {
        log::debug!("dense modified Cholesky: rebuilt block-diagonal factor is singular after scaling");
        return Err(NumericalFailure);
    }

    Ok(DenseModifiedCholeskyParts {
        p: p_builder.build(),
        l: l_builder.build(),
        m,
    })
}
