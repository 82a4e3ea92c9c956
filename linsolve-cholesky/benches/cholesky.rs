use criterion::{criterion_group, criterion_main, Criterion};
use linsolve_cholesky::{
    BandCholeskyExecutor, BandModifiedCholeskyExecutor, DenseCholeskyExecutor,
    DenseModifiedCholeskyExecutor,
};
use linsolve_core::matrix::DenseMatrix;
use linsolve_core::{BandDimension, FactorizationExecutor, MatrixDimension};

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

fn indefinite_symmetric(n: usize) -> DenseMatrix {
    let mut rows = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            rows[i][j] = if i == j {
                if i % 2 == 0 { 4.0 } else { -4.0 }
            } else {
                1.0 / (1.0 + (i as f64 - j as f64).abs())
            };
        }
    }
    DenseMatrix::from_rows(&rows)
}

fn dense_cholesky(c: &mut Criterion) {
    for n in [8, 32, 128, 512] {
        let a = spd(n);
        c.bench_function(&format!("dense-cholesky-{n}"), |b| {
            b.iter(|| DenseCholeskyExecutor.apply_default(&a).unwrap())
        });
    }
}

fn dense_modified_cholesky(c: &mut Criterion) {
    for n in [8, 32, 128, 512] {
        let a = indefinite_symmetric(n);
        c.bench_function(&format!("dense-modified-cholesky-{n}"), |b| {
            b.iter(|| DenseModifiedCholeskyExecutor.apply_default(&a).unwrap())
        });
    }
}

fn band_cholesky(c: &mut Criterion) {
    for n in [64, 512, 4096] {
        let dim = BandDimension::new(MatrixDimension::new(n, n), 2, 2);
        let m = linsolve_core::matrix::BandMatrix::from_dense_band(dim, |i, j| {
            if i == j {
                8.0
            } else {
                1.0 / (1.0 + (i as f64 - j as f64).abs())
            }
        });
        c.bench_function(&format!("band-cholesky-{n}"), |b| {
            b.iter(|| BandCholeskyExecutor.apply_default(&m).unwrap())
        });
    }
}

fn band_modified_cholesky(c: &mut Criterion) {
    for n in [64, 512, 4096] {
        let dim = BandDimension::new(MatrixDimension::new(n, n), 2, 2);
        let m = linsolve_core::matrix::BandMatrix::from_dense_band(dim, |i, j| {
            if i == j {
                if i % 2 == 0 { 4.0 } else { -4.0 }
            } else {
                1.0 / (1.0 + (i as f64 - j as f64).abs())
            }
        });
        c.bench_function(&format!("band-modified-cholesky-{n}"), |b| {
            b.iter(|| BandModifiedCholeskyExecutor.apply_default(&m).unwrap())
        });
    }
}

criterion_group!(
    benches,
    dense_cholesky,
    dense_modified_cholesky,
    band_cholesky,
    band_modified_cholesky
);
criterion_main!(benches);
