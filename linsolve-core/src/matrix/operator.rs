//! The composite-operator infrastructure used to express an inverse matrix
//! as a chain of triangular solves / diagonal scales / permutation applies,
//! rather than as a materialized dense matrix (`spec.md` §4.4: "The inverse
//! matrix object is a composite operator").
//!
//! This module, together with the rest of [`crate::matrix`], implements the
//! matrix-container collaborators that `spec.md` §1 and §6 name as external
//! and out of scope for the core's numerical substance; they exist here only
//! so the workspace builds and is testable end to end.

/// A linear map on `R^n`, evaluated by matrix-vector multiply. Every
/// collaborator matrix (dense, band, diagonal, permutation,
/// lower-unitriangular) implements this, as does every composite built from
/// them.
pub trait LinearOperator {
    fn dim(&self) -> usize;
    fn apply(&self, v: &[f64]) -> Vec<f64>;
    fn apply_transpose(&self, v: &[f64]) -> Vec<f64>;
}

impl LinearOperator for Box<dyn LinearOperator> {
    fn dim(&self) -> usize {
        (**self).dim()
    }
    fn apply(&self, v: &[f64]) -> Vec<f64> {
        (**self).apply(v)
    }
    fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
        (**self).apply_transpose(v)
    }
}

/// Flips `apply`/`apply_transpose` of the wrapped operator. Used to express
/// e.g. `U^-T` from a stored `U^T` whose own `.inverse()` only gives `U^-T`'s
/// *transpose*-apply directly: `Transposed(ut.inverse())` swaps them back.
pub struct Transposed<T>(pub T);

impl<T: LinearOperator> LinearOperator for Transposed<T> {
    fn dim(&self) -> usize {
        self.0.dim()
    }
    fn apply(&self, v: &[f64]) -> Vec<f64> {
        self.0.apply_transpose(v)
    }
    fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
        self.0.apply(v)
    }
}

/// A left-to-right composition `op_k * ... * op_2 * op_1`, stored as
/// `[op_1, op_2, ..., op_k]` and applied in that order: `apply(v)` computes
/// `op_k(...op_2(op_1(v)))`. `apply_transpose` runs the transposed ops in
/// reverse order, since `(op_k ... op_1)^T = op_1^T ... op_k^T`.
pub struct Chain {
    ops: Vec<Box<dyn LinearOperator>>,
    dim: usize,
}

impl Chain {
    pub fn new(ops: Vec<Box<dyn LinearOperator>>) -> Self {
        let dim = ops.first().map(|op| op.dim()).unwrap_or(0);
        Self { ops, dim }
    }
}

impl LinearOperator for Chain {
    fn dim(&self) -> usize {
        self.dim
    }

    fn apply(&self, v: &[f64]) -> Vec<f64> {
        let mut current = v.to_vec();
        for op in &self.ops {
            current = op.apply(&current);
        }
        current
    }

    fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
        let mut current = v.to_vec();
        for op in self.ops.iter().rev() {
            current = op.apply_transpose(&current);
        }
        current
    }
}

/// `outer * inner * outer^T`, the combinator `spec.md` §4.4 calls
/// `symmetricMultiply(innerDiag, outer)`. Always symmetric by construction,
/// regardless of whether `inner`/`outer` individually are.
pub struct SymmetricOperator {
    outer: Box<dyn LinearOperator>,
    inner: Box<dyn LinearOperator>,
}

impl SymmetricOperator {
    pub fn new(inner: Box<dyn LinearOperator>, outer: Box<dyn LinearOperator>) -> Self {
        Self { outer, inner }
    }
}

impl LinearOperator for SymmetricOperator {
    fn dim(&self) -> usize {
        self.outer.dim()
    }

    fn apply(&self, v: &[f64]) -> Vec<f64> {
        let t = self.outer.apply_transpose(v);
        let s = self.inner.apply(&t);
        self.outer.apply(&s)
    }

    fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
        // Symmetric by construction: A^T == A.
        self.apply(v)
    }
}

/// Capability marker: the carrying matrix equals its own transpose. Attached
/// to inverse objects produced by the symmetric (Cholesky-family)
/// factorizations, per `spec.md` §8's Cholesky-family symmetry property.
pub trait Symmetric {}

impl Symmetric for SymmetricOperator {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scale(f64, usize);
    impl LinearOperator for Scale {
        fn dim(&self) -> usize {
            self.1
        }
        fn apply(&self, v: &[f64]) -> Vec<f64> {
            v.iter().map(|x| x * self.0).collect()
        }
        fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
            self.apply(v)
        }
    }

    #[test]
    fn chain_applies_left_to_right() {
        let chain = Chain::new(vec![Box::new(Scale(2.0, 3)), Box::new(Scale(5.0, 3))]);
        assert_eq!(chain.apply(&[1.0, 1.0, 1.0]), vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn transposed_swaps_apply_and_apply_transpose() {
        struct Asymmetric;
        impl LinearOperator for Asymmetric {
            fn dim(&self) -> usize {
                1
            }
            fn apply(&self, v: &[f64]) -> Vec<f64> {
                vec![v[0] * 2.0]
            }
            fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
                vec![v[0] * 3.0]
            }
        }
        let t = Transposed(Asymmetric);
        assert_eq!(t.apply(&[1.0]), vec![3.0]);
        assert_eq!(t.apply_transpose(&[1.0]), vec![2.0]);
    }

    #[test]
    fn symmetric_operator_is_its_own_transpose() {
        let op = SymmetricOperator::new(Box::new(Scale(2.0, 2)), Box::new(Scale(3.0, 2)));
        let v = [1.0, -1.0];
        assert_eq!(op.apply(&v), op.apply_transpose(&v));
    }
}
