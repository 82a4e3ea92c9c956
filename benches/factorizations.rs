//! Cross-family comparison: for each matrix size, how do the four
//! factorization kinds compare against each other on an equivalent
//! well-conditioned input. Per-kernel benches that sweep a single family
//! across a wider size range live in that family's own crate
//! (`linsolve-core/benches/core.rs`, `linsolve-lu/benches/lu.rs`,
//! `linsolve-cholesky/benches/cholesky.rs`).

use criterion::{criterion_group, criterion_main, Criterion};
use linsolve::matrix::DenseMatrix;
use linsolve::{
    FactorizationExecutor, DENSE_CHOLESKY, DENSE_LU, DENSE_LU_PIVOTING, DENSE_MODIFIED_CHOLESKY,
};

fn spd(n: usize) -> DenseMatrix {
    let mut rows = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            rows[i][j] = if i == j {
                (n as f64) * 4.0
            } else {
                1.0 / (1.0 + (i as f64 - j as f64).abs())
            };
        }
    }
    DenseMatrix::from_rows(&rows)
}

fn factorization_family_comparison(c: &mut Criterion) {
    for n in [16, 64, 256] {
        let a = spd(n);

        c.bench_function(&format!("dense-lu-{n}"), |b| {
            b.iter(|| DENSE_LU.apply_default(&a).unwrap())
        });
        c.bench_function(&format!("dense-lu-pivoting-{n}"), |b| {
            b.iter(|| DENSE_LU_PIVOTING.apply_default(&a).unwrap())
        });
        c.bench_function(&format!("dense-cholesky-{n}"), |b| {
            b.iter(|| DENSE_CHOLESKY.apply_default(&a).unwrap())
        });
        c.bench_function(&format!("dense-modified-cholesky-{n}"), |b| {
            b.iter(|| DENSE_MODIFIED_CHOLESKY.apply_default(&a).unwrap())
        });
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = factorization_family_comparison
);
criterion_main!(benches);
