//! The crate-wide error type surfaced from `apply`.
//!
//! Three kinds, per `spec.md` §7: an invalid caller-supplied epsilon, and the
//! three structural rejection reasons. Numerical failure is deliberately not
//! a variant here — it never crosses the `apply` boundary as an error, only
//! as `None` (see [`crate::executor::NumericalFailure`]).

use thiserror::Error;

/// Errors `apply` can return. Never constructed for a numerical failure.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// `epsilon` was NaN, negative, or infinite.
    #[error("epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),

    /// The target matrix is not square.
    #[error("matrix is not square: {rows} rows, {cols} cols")]
    NotSquare { rows: usize, cols: usize },

    /// The target matrix is not marked symmetric (Cholesky family).
    #[error("matrix is not symmetric")]
    NotSymmetric,

    /// The conceptually-needed packed element count exceeds the
    /// implementation's maximum representable index.
    #[error("effective element count {needed} exceeds index range {max}")]
    TooManyElements { needed: u128, max: u128 },
}
