//! `linsolve`: direct linear-equation solvers for dense and banded real
//! matrices — LU (with and without partial pivoting), Cholesky, and modified
//! Cholesky with Bunch-Kaufman pivoting.
//!
//! This crate is a thin facade over [`linsolve_core`], [`linsolve_lu`], and
//! [`linsolve_cholesky`]: it re-exports their public surfaces and exposes one
//! process-wide singleton [`FactorizationExecutor`] per factorization kind,
//! per `spec.md` §5 ("Executor instances are process-wide singletons ...
//! stateless, and safe to share without locking"). None of these hold any
//! state; they're zero-sized types, free to call from any number of threads
//! without synchronization.
//!
//! ```
//! use linsolve::{matrix::DenseMatrix, DenseLuExecutor, FactorizationExecutor};
//!
//! let a = DenseMatrix::from_rows(&[
//!     vec![4.0, 3.0],
//!     vec![6.0, 3.0],
//! ]);
//! let solver = DenseLuExecutor.apply_default(&a).unwrap().unwrap();
//! let x = solver.solve(&[18.0, 21.0]).unwrap();
//! assert!((x[0] - 1.5).abs() < 1e-9);
//! ```

pub use linsolve_core::matrix;
pub use linsolve_core::{
    check_element_count, check_square, Block2SymmetricDiagonal, Block2SymmetricDiagonalBuilder,
    CoreError, DeterminantValues, FactorizationAcceptance, FactorizationExecutor,
    InverseAndDeterminant, LazyCache, NumericalFailure, RejectionReason, DEFAULT_EPSILON,
};
pub use linsolve_core::{BandDimension, MatrixDimension};

pub use linsolve_lu::{BandLuExecutor, BandLuSolver, DenseLuExecutor, DenseLuPivotingExecutor, DenseLuPivotingSolver, DenseLuSolver};

pub use linsolve_cholesky::{
    BandCholeskyExecutor, BandCholeskySolver, BandModifiedCholeskyExecutor, BandModifiedCholeskySolver,
    DenseCholeskyExecutor, DenseCholeskySolver, DenseModifiedCholeskyExecutor, DenseModifiedCholeskySolver,
};

/// Process-wide singleton for dense `A = L D U` factorization (no pivoting).
pub const DENSE_LU: DenseLuExecutor = DenseLuExecutor;
/// Process-wide singleton for dense `A = P^T L D U` factorization with
/// partial pivoting.
pub const DENSE_LU_PIVOTING: DenseLuPivotingExecutor = DenseLuPivotingExecutor;
/// Process-wide singleton for banded `A = L D U` factorization (no pivoting).
pub const BAND_LU: BandLuExecutor = BandLuExecutor;
/// Process-wide singleton for dense `A = L D L^T` factorization
/// (positive-definite only).
pub const DENSE_CHOLESKY: DenseCholeskyExecutor = DenseCholeskyExecutor;
/// Process-wide singleton for banded `A = L D L^T` factorization
/// (positive-definite only).
pub const BAND_CHOLESKY: BandCholeskyExecutor = BandCholeskyExecutor;
/// Process-wide singleton for dense modified Cholesky with Bunch-Kaufman
/// pivoting: `P A P^T = L M L^T`.
pub const DENSE_MODIFIED_CHOLESKY: DenseModifiedCholeskyExecutor = DenseModifiedCholeskyExecutor;
/// Process-wide singleton for banded modified Cholesky (unpivoted,
/// indefinite-tolerant): `A = L D L^T`.
pub const BAND_MODIFIED_CHOLESKY: BandModifiedCholeskyExecutor = BandModifiedCholeskyExecutor;
