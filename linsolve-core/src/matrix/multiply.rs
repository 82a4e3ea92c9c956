//! The matrix-multiply facade of `spec.md` §6: `multiply(m1, m2, ...)` and
//! `symmetricMultiply(innerDiag, outer)`, expressed over [`LinearOperator`]s
//! rather than as materialized matrices.

use super::operator::{Chain, LinearOperator, SymmetricOperator};

/// Composes operators left to right: `multiply(vec![a, b, c])` is the
/// operator for `c * b * a` (applied to a vector as `a` first, then `b`,
/// then `c`).
pub fn multiply(ops: Vec<Box<dyn LinearOperator>>) -> Chain {
    Chain::new(ops)
}

/// `outer * inner_diag * outer^T`.
pub fn symmetric_multiply(
    inner: Box<dyn LinearOperator>,
    outer: Box<dyn LinearOperator>,
) -> SymmetricOperator {
    SymmetricOperator::new(inner, outer)
}
