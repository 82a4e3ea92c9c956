//! C14 (Cholesky family): solver facades pairing a completed factorization
//! with a lazily-cached composite inverse and determinant (`spec.md` §4.4).
//!
//! Every variant expresses its inverse as a [`SymmetricOperator`]
//! (`outer * inner * outer^T`), which also carries the [`Symmetric`] marker
//! per `spec.md` §8 — for the plain/modified-band cases `outer = L^-T`, and
//! for the Bunch-Kaufman case `outer = P L^-T` folds the permutation into
//! the same shape.

use linsolve_core::matrix::{
    Chain, DiagonalMatrix, LinearOperator, LowerUnitriangularBandMatrix, LowerUnitriangularMatrix,
    PermutationMatrix, SymmetricOperator, Transposed,
};
use linsolve_core::{
    Block2SymmetricDiagonal, DeterminantValues, InverseAndDeterminant, LazyCache, MatrixDimension,
};

type SymmetricCache = LazyCache<
    InverseAndDeterminant<SymmetricOperator>,
    Box<dyn FnOnce() -> InverseAndDeterminant<SymmetricOperator>>,
>;
fn boxed_symmetric_producer(
    f: impl FnOnce() -> InverseAndDeterminant<SymmetricOperator> + 'static,
) -> Box<dyn FnOnce() -> InverseAndDeterminant<SymmetricOperator>> {
    Box::new(f)
}

/// `A^-1 = L^-T D^-1 L^-1`, expressed as `outer * inner * outer^T` with
/// `outer = L^-T` so that `outer^T = L^-1`.
fn unpivoted_dense_inverse_and_determinant(
    d: &DiagonalMatrix,
    l: &LowerUnitriangularMatrix,
) -> InverseAndDeterminant<SymmetricOperator> {
    let determinant = d.determinant();
    if determinant.is_singular() {
        return InverseAndDeterminant::singular();
    }
    let Some(d_inv) = d.inverse() else {
        return InverseAndDeterminant::singular();
    };
    let outer: Box<dyn LinearOperator> = Box::new(Transposed(l.inverse()));
    let inner: Box<dyn LinearOperator> = Box::new(d_inv);
    InverseAndDeterminant::nonsingular(SymmetricOperator::new(inner, outer), determinant)
}

fn unpivoted_band_inverse_and_determinant(
    d: &DiagonalMatrix,
    l: &LowerUnitriangularBandMatrix,
) -> InverseAndDeterminant<SymmetricOperator> {
    let determinant = d.determinant();
    if determinant.is_singular() {
        return InverseAndDeterminant::singular();
    }
    let Some(d_inv) = d.inverse() else {
        return InverseAndDeterminant::singular();
    };
    let outer: Box<dyn LinearOperator> = Box::new(Transposed(l.inverse()));
    let inner: Box<dyn LinearOperator> = Box::new(d_inv);
    InverseAndDeterminant::nonsingular(SymmetricOperator::new(inner, outer), determinant)
}

fn sqrt_diagonal(d: &DiagonalMatrix) -> Option<DiagonalMatrix> {
    let mut builder = DiagonalMatrix::zero_builder(d.n());
    for i in 0..d.n() {
        let v = d.value_at(i);
        if v <= 0.0 {
            return None;
        }
        let r = v.sqrt();
        if !r.is_finite() {
            return None;
        }
        builder.set_value(i, r);
    }
    Some(builder.build())
}

struct SqrtFactor {
    s: Chain,
    s_inv: Chain,
}

type SqrtCache = LazyCache<Option<SqrtFactor>, Box<dyn FnOnce() -> Option<SqrtFactor>>>;

fn boxed_sqrt_producer(
    f: impl FnOnce() -> Option<SqrtFactor> + 'static,
) -> Box<dyn FnOnce() -> Option<SqrtFactor>> {
    Box::new(f)
}

/// Solver for a dense `A = L D L^T` factorization (positive-definite only).
pub struct DenseCholeskySolver {
    dim: MatrixDimension,
    #[allow(dead_code)]
    d: DiagonalMatrix,
    #[allow(dead_code)]
    l: LowerUnitriangularMatrix,
    cache: SymmetricCache,
    sqrt_cache: SqrtCache,
}

impl DenseCholeskySolver {
    pub(crate) fn new(dim: MatrixDimension, d: DiagonalMatrix, l: LowerUnitriangularMatrix) -> Self {
        let (d_c, l_c) = (d.clone(), l.clone());
        let cache = LazyCache::new(boxed_symmetric_producer(move || {
            unpivoted_dense_inverse_and_determinant(&d_c, &l_c)
        }));
        let (d_s, l_s) = (d.clone(), l.clone());
        let sqrt_cache = LazyCache::new(boxed_sqrt_producer(move || {
            let sqrt_d = sqrt_diagonal(&d_s)?;
            let sqrt_d_inv = sqrt_d.inverse()?;
            let s = Chain::new(vec![Box::new(sqrt_d), Box::new(l_s.clone())]);
            let s_inv = Chain::new(vec![Box::new(l_s.inverse()), Box::new(sqrt_d_inv)]);
            Some(SqrtFactor { s, s_inv })
        }));
        Self { dim, d, l, cache, sqrt_cache }
    }

    /// The dimension of the matrix that was factorized.
    ///
    /// Returns the dimension rather than a reference to the original input
    /// matrix: the solver caches derived state (composite inverses, square
    /// roots) meant to outlive any borrow of its input, so it never retains
    /// one. See `DESIGN.md`'s Open Question #2.
    pub fn target(&self) -> MatrixDimension {
        self.dim
    }

    pub fn determinant(&self) -> DeterminantValues {
        self.cache.get().determinant()
    }

    pub fn sign_of_determinant(&self) -> i8 {
        self.determinant().sign()
    }

    pub fn log_abs_determinant(&self) -> f64 {
        self.determinant().log_abs()
    }

    pub fn is_singular(&self) -> bool {
        self.cache.get().is_singular()
    }

    pub fn inverse(&self) -> Option<&SymmetricOperator> {
        self.cache.get().inverse()
    }

    pub fn solve(&self, b: &[f64]) -> Option<Vec<f64>> {
        self.inverse().map(|op| op.apply(b))
    }

    /// `S` such that `A = S S^T`, with `S = L sqrt(D)`. `None` if `A` turns
    /// out not to be positive definite once `D` is examined entrywise.
    pub fn asymm_sqrt(&self) -> Option<&Chain> {
        self.sqrt_cache.get().as_ref().map(|f| &f.s)
    }

    pub fn inverse_asymm_sqrt(&self) -> Option<&Chain> {
        self.sqrt_cache.get().as_ref().map(|f| &f.s_inv)
    }
}

/// Solver for a banded `A = L D L^T` factorization (positive-definite only).
pub struct BandCholeskySolver {
    dim: MatrixDimension,
    #[allow(dead_code)]
    d: DiagonalMatrix,
    #[allow(dead_code)]
    l: LowerUnitriangularBandMatrix,
    cache: SymmetricCache,
}

impl BandCholeskySolver {
    pub(crate) fn new(dim: MatrixDimension, d: DiagonalMatrix, l: LowerUnitriangularBandMatrix) -> Self {
        let (d_c, l_c) = (d.clone(), l.clone());
        let cache = LazyCache::new(boxed_symmetric_producer(move || {
            unpivoted_band_inverse_and_determinant(&d_c, &l_c)
        }));
        Self { dim, d, l, cache }
    }

    /// The dimension of the matrix that was factorized.
    ///
    /// Returns the dimension rather than a reference to the original input
    /// matrix: the solver caches derived state (composite inverses, square
    /// roots) meant to outlive any borrow of its input, so it never retains
    /// one. See `DESIGN.md`'s Open Question #2.
    pub fn target(&self) -> MatrixDimension {
        self.dim
    }

    pub fn determinant(&self) -> DeterminantValues {
        self.cache.get().determinant()
    }

    pub fn sign_of_determinant(&self) -> i8 {
        self.determinant().sign()
    }

    pub fn log_abs_determinant(&self) -> f64 {
        self.determinant().log_abs()
    }

    pub fn is_singular(&self) -> bool {
        self.cache.get().is_singular()
    }

    pub fn inverse(&self) -> Option<&SymmetricOperator> {
        self.cache.get().inverse()
    }

    pub fn solve(&self, b: &[f64]) -> Option<Vec<f64>> {
        self.inverse().map(|op| op.apply(b))
    }
}

/// Solver for a banded modified (possibly indefinite) `A = L D L^T`
/// factorization. Same composite-inverse shape as [`BandCholeskySolver`];
/// no `asymm_sqrt`, since a negative `D` entry has no real square root.
pub struct BandModifiedCholeskySolver {
    dim: MatrixDimension,
    #[allow(dead_code)]
    d: DiagonalMatrix,
    #[allow(dead_code)]
    l: LowerUnitriangularBandMatrix,
    cache: SymmetricCache,
}

impl BandModifiedCholeskySolver {
    pub(crate) fn new(dim: MatrixDimension, d: DiagonalMatrix, l: LowerUnitriangularBandMatrix) -> Self {
        let (d_c, l_c) = (d.clone(), l.clone());
        let cache = LazyCache::new(boxed_symmetric_producer(move || {
            unpivoted_band_inverse_and_determinant(&d_c, &l_c)
        }));
        Self { dim, d, l, cache }
    }

    /// The dimension of the matrix that was factorized.
    ///
    /// Returns the dimension rather than a reference to the original input
    /// matrix: the solver caches derived state (composite inverses, square
    /// roots) meant to outlive any borrow of its input, so it never retains
    /// one. See `DESIGN.md`'s Open Question #2.
    pub fn target(&self) -> MatrixDimension {
        self.dim
    }

    pub fn determinant(&self) -> DeterminantValues {
        self.cache.get().determinant()
    }

    pub fn sign_of_determinant(&self) -> i8 {
        self.determinant().sign()
    }

    pub fn log_abs_determinant(&self) -> f64 {
        self.determinant().log_abs()
    }

    pub fn is_singular(&self) -> bool {
        self.cache.get().is_singular()
    }

    pub fn inverse(&self) -> Option<&SymmetricOperator> {
        self.cache.get().inverse()
    }

    pub fn solve(&self, b: &[f64]) -> Option<Vec<f64>> {
        self.inverse().map(|op| op.apply(b))
    }
}

/// Solver for the dense Bunch-Kaufman factorization `A = P^T L M L^T P`.
/// `A^-1 = P^T L^-T M^-1 L^-1 P`, built via `symmetric-square(outer) * M^-1`
/// with `outer = P^-1 L^-T` (so `outer^T = L^-1 P`, using `P^-1 == P^T` for a
/// permutation), giving `outer * inner * outer^T = P^-1 L^-T M^-1 L^-1 P`.
/// `det(A) = det(M)` since `det(P)^2 == 1`.
pub struct DenseModifiedCholeskySolver {
    dim: MatrixDimension,
    #[allow(dead_code)]
    p: PermutationMatrix,
    #[allow(dead_code)]
    l: LowerUnitriangularMatrix,
    #[allow(dead_code)]
    m: Block2SymmetricDiagonal,
    cache: SymmetricCache,
}

fn pivoted_modified_inverse_and_determinant(
    p: &PermutationMatrix,
    l: &LowerUnitriangularMatrix,
    m: &Block2SymmetricDiagonal,
) -> InverseAndDeterminant<SymmetricOperator> {
    let bundle = m.inverse_and_determinant();
    if bundle.is_singular() {
        return InverseAndDeterminant::singular();
    }
    let m_inv = bundle.inverse().unwrap().clone();
    let determinant = bundle.determinant();
    let outer_ops: Vec<Box<dyn LinearOperator>> =
        vec![Box::new(Transposed(l.inverse())), Box::new(p.inverse())];
    let outer: Box<dyn LinearOperator> = Box::new(Chain::new(outer_ops));
    let inner: Box<dyn LinearOperator> = Box::new(m_inv);
    InverseAndDeterminant::nonsingular(SymmetricOperator::new(inner, outer), determinant)
}

impl DenseModifiedCholeskySolver {
    pub(crate) fn new(
        dim: MatrixDimension,
        p: PermutationMatrix,
        l: LowerUnitriangularMatrix,
        m: Block2SymmetricDiagonal,
    ) -> Self {
        let (p_c, l_c, m_c) = (p.clone(), l.clone(), m.clone());
        let cache = LazyCache::new(boxed_symmetric_producer(move || {
            pivoted_modified_inverse_and_determinant(&p_c, &l_c, &m_c)
        }));
        Self { dim, p, l, m, cache }
    }

    /// The dimension of the matrix that was factorized.
    ///
    /// Returns the dimension rather than a reference to the original input
    /// matrix: the solver caches derived state (composite inverses, square
    /// roots) meant to outlive any borrow of its input, so it never retains
    /// one. See `DESIGN.md`'s Open Question #2.
    pub fn target(&self) -> MatrixDimension {
        self.dim
    }

    pub fn determinant(&self) -> DeterminantValues {
        self.cache.get().determinant()
    }

    pub fn sign_of_determinant(&self) -> i8 {
        self.determinant().sign()
    }

    pub fn log_abs_determinant(&self) -> f64 {
        self.determinant().log_abs()
    }

    pub fn is_singular(&self) -> bool {
        self.cache.get().is_singular()
    }

    pub fn inverse(&self) -> Option<&SymmetricOperator> {
        self.cache.get().inverse()
    }

    pub fn solve(&self, b: &[f64]) -> Option<Vec<f64>> {
        self.inverse().map(|op| op.apply(b))
    }
}
