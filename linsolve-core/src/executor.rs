//! [`FactorizationExecutor`]: the public entry point shared by every
//! factorization kind (C5).
//!
//! Each concrete factorization (dense LU, band LU, dense LU with partial
//! pivoting, dense/band Cholesky, dense/band modified Cholesky) implements
//! this trait once, as a zero-sized, stateless, process-wide singleton
//! (`spec.md` §5). The trait itself only validates squareness and epsilon
//! and wires the subtype hooks together; all the numerical substance lives
//! in `apply_concretely`.

use crate::error::CoreError;
use crate::matrix::shape::HasShape;
use crate::validation::{check_square, FactorizationAcceptance};

/// The default caller epsilon used by `apply_default`, matching `spec.md`
/// §4.1's "small fixed positive constant".
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Internal signal raised deep inside a numerical helper's constructor when
/// a pivot fails its regularity test. Never exposed outside this crate
/// family: executors catch it at the `apply` boundary and translate it to
/// `None`, per `spec.md` §9's guidance against exceptions for the expected
/// numerical-failure path.
#[derive(Debug, Clone, Copy)]
pub struct NumericalFailure;

/// Shared entry points for a single factorization kind over matrix type `M`,
/// producing solver type `S`.
pub trait FactorizationExecutor<M: HasShape, S> {
    /// Structural checks beyond squareness (symmetry, element-count caps).
    /// Default: no further restriction.
    fn accepts_concretely(&self, _matrix: &M) -> FactorizationAcceptance {
        FactorizationAcceptance::Accepted
    }

    /// The numerical work: scales, factorizes in place, and builds the
    /// solver. Must not panic on a merely-singular input; returns `None`
    /// in that case instead.
    fn apply_concretely(&self, matrix: &M, epsilon: f64) -> Option<S>;

    /// Full structural acceptance decision: squareness first, then the
    /// subtype's own hook. Side-effect-free; never raises.
    fn accepts(&self, matrix: &M) -> FactorizationAcceptance {
        let square = check_square(matrix.rows(), matrix.cols());
        if !square.is_accepted() {
            return square;
        }
        self.accepts_concretely(matrix)
    }

    /// Runs the full factorization.
    ///
    /// - `Err` if `epsilon` is not finite-and-nonnegative, or if `matrix` is
    ///   structurally rejected.
    /// - `Ok(None)` if the factorization is numerically impossible (e.g. a
    ///   zero pivot) even though the input was structurally acceptable.
    /// - `Ok(Some(solver))` on success.
    fn apply(&self, matrix: &M, epsilon: f64) -> Result<Option<S>, CoreError> {
        if !(epsilon.is_finite() && epsilon >= 0.0) {
            return Err(CoreError::InvalidEpsilon(epsilon));
        }
        let acceptance = self.accepts(matrix);
        if !acceptance.is_accepted() {
            return Err(acceptance.into_error());
        }
        Ok(self.apply_concretely(matrix, epsilon))
    }

    /// `apply(matrix, DEFAULT_EPSILON)`.
    fn apply_default(&self, matrix: &M) -> Result<Option<S>, CoreError> {
        self.apply(matrix, DEFAULT_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{check_element_count, RejectionReason};

    struct Toy {
        rows: usize,
        cols: usize,
    }
    impl HasShape for Toy {
        fn rows(&self) -> usize {
            self.rows
        }
        fn cols(&self) -> usize {
            self.cols
        }
    }

    struct ToyExecutor;
    impl FactorizationExecutor<Toy, i32> for ToyExecutor {
        fn accepts_concretely(&self, matrix: &Toy) -> FactorizationAcceptance {
            check_element_count(matrix.rows() * matrix.cols())
        }

        fn apply_concretely(&self, matrix: &Toy, epsilon: f64) -> Option<i32> {
            if epsilon > 0.5 {
                None
            } else {
                Some(matrix.rows() as i32)
            }
        }
    }

    #[test]
    fn non_square_is_rejected_before_the_subtype_hook_runs() {
        let exec = ToyExecutor;
        let matrix = Toy { rows: 2, cols: 3 };
        let outcome = exec.accepts(&matrix);
        assert_eq!(
            outcome,
            FactorizationAcceptance::Rejected(RejectionReason::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn invalid_epsilon_is_an_error() {
        let exec = ToyExecutor;
        let matrix = Toy { rows: 2, cols: 2 };
        assert_eq!(
            exec.apply(&matrix, f64::NAN).unwrap_err(),
            CoreError::InvalidEpsilon(f64::NAN)
        );
        assert!(exec.apply(&matrix, -1.0).is_err());
        assert!(exec.apply(&matrix, f64::INFINITY).is_err());
    }

    #[test]
    fn numerical_failure_surfaces_as_none_not_an_error() {
        let exec = ToyExecutor;
        let matrix = Toy { rows: 2, cols: 2 };
        assert_eq!(exec.apply(&matrix, 0.9).unwrap(), None);
        assert_eq!(exec.apply(&matrix, 0.1).unwrap(), Some(2));
    }

    #[test]
    fn apply_default_uses_the_default_epsilon() {
        let exec = ToyExecutor;
        let matrix = Toy { rows: 3, cols: 3 };
        assert_eq!(exec.apply_default(&matrix).unwrap(), Some(3));
    }
}
