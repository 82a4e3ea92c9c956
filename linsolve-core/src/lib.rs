//! Shared primitives for the `linsolve` factorization crates: the
//! determinant/inverse value types (C1, C2), the single-shot lazy cache
//! (C3), the structural-validation state machine (C4), the executor base
//! trait (C5), the block-2 symmetric diagonal used by Bunch–Kaufman (C13),
//! and the matrix-container collaborators `spec.md` §1/§6 treat as external.

pub mod block2;
pub mod determinant;
pub mod dim;
pub mod error;
pub mod executor;
pub mod inverse;
pub mod lazy;
pub mod logmag;
pub mod matrix;
pub mod validation;

pub use block2::{Block2SymmetricDiagonal, Block2SymmetricDiagonalBuilder};
pub use determinant::DeterminantValues;
pub use dim::{BandDimension, MatrixDimension};
pub use error::CoreError;
pub use executor::{FactorizationExecutor, NumericalFailure, DEFAULT_EPSILON};
pub use inverse::InverseAndDeterminant;
pub use lazy::LazyCache;
pub use validation::{check_element_count, check_square, FactorizationAcceptance, RejectionReason};
