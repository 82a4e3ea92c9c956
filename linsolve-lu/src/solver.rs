//! C14 (LU family): solver facades pairing a completed factorization with a
//! lazily-cached composite inverse and determinant (`spec.md` §4.4).
//!
//! Each solver owns its collaborator matrices (`D`, `L`, `U^T`, and — for the
//! pivoting variant — `P`) and defers building the composite inverse
//! operator until [`DenseLuSolver::inverse`] (or an equivalent) is first
//! called, via [`LazyCache`].

use linsolve_core::matrix::{
    Chain, DiagonalMatrix, LinearOperator, LowerUnitriangularBandMatrix, LowerUnitriangularMatrix,
    PermutationMatrix, Transposed,
};
use linsolve_core::{DeterminantValues, InverseAndDeterminant, LazyCache, MatrixDimension};

type InverseCache = LazyCache<InverseAndDeterminant<Chain>, Box<dyn FnOnce() -> InverseAndDeterminant<Chain>>>;

fn boxed_producer(
    f: impl FnOnce() -> InverseAndDeterminant<Chain> + 'static,
) -> Box<dyn FnOnce() -> InverseAndDeterminant<Chain>> {
    Box::new(f)
}

/// `A^-1 = U^-1 D^-1 L^-1`, expressed over the stored `U^T` via
/// [`Transposed`].
fn unpivoted_inverse_and_determinant<L>(
    d: &DiagonalMatrix,
    l_inv: L,
    ut: &LowerUnitriangularMatrix,
) -> InverseAndDeterminant<Chain>
where
    L: LinearOperator + 'static,
{
    let determinant = d.determinant();
    if determinant.is_singular() {
        return InverseAndDeterminant::singular();
    }
    let Some(d_inv) = d.inverse() else {
        return InverseAndDeterminant::singular();
    };
    let ops: Vec<Box<dyn LinearOperator>> = vec![
        Box::new(l_inv),
        Box::new(d_inv),
        Box::new(Transposed(ut.inverse())),
    ];
    InverseAndDeterminant::nonsingular(Chain::new(ops), determinant)
}

/// Solver for a dense `A = L D U` factorization (no pivoting).
pub struct DenseLuSolver {
    dim: MatrixDimension,
    #[allow(dead_code)]
    d: DiagonalMatrix,
    #[allow(dead_code)]
    l: LowerUnitriangularMatrix,
    #[allow(dead_code)]
    ut: LowerUnitriangularMatrix,
    cache: InverseCache,
}

impl DenseLuSolver {
    pub(crate) fn new(
        dim: MatrixDimension,
        d: DiagonalMatrix,
        l: LowerUnitriangularMatrix,
        ut: LowerUnitriangularMatrix,
    ) -> Self {
        let (d_c, l_c, ut_c) = (d.clone(), l.clone(), ut.clone());
        let cache = LazyCache::new(boxed_producer(move || {
            unpivoted_inverse_and_determinant(&d_c, l_c.inverse(), &ut_c)
        }));
        Self { dim, d, l, ut, cache }
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

    pub fn inverse(&self) -> Option<&Chain> {
        self.cache.get().inverse()
    }

    /// Solves `A x = b`, or `None` if the lazily-rechecked inverse turns out
    /// not to exist.
    pub fn solve(&self, b: &[f64]) -> Option<Vec<f64>> {
        self.inverse().map(|op| op.apply(b))
    }
}

/// Solver for a banded `A = L D U` factorization (no pivoting).
pub struct BandLuSolver {
    dim: MatrixDimension,
    #[allow(dead_code)]
    d: DiagonalMatrix,
    #[allow(dead_code)]
    l: LowerUnitriangularBandMatrix,
    #[allow(dead_code)]
    ut: LowerUnitriangularBandMatrix,
    cache: InverseCache,
}

fn unpivoted_band_inverse_and_determinant(
    d: &DiagonalMatrix,
    l: &LowerUnitriangularBandMatrix,
    ut: &LowerUnitriangularBandMatrix,
) -> InverseAndDeterminant<Chain> {
    let determinant = d.determinant();
    if determinant.is_singular() {
        return InverseAndDeterminant::singular();
    }
    let Some(d_inv) = d.inverse() else {
        return InverseAndDeterminant::singular();
    };
    let ops: Vec<Box<dyn LinearOperator>> = vec![
        Box::new(l.inverse()),
        Box::new(d_inv),
        Box::new(Transposed(ut.inverse())),
    ];
    InverseAndDeterminant::nonsingular(Chain::new(ops), determinant)
}

impl BandLuSolver {
    pub(crate) fn new(
        dim: MatrixDimension,
        d: DiagonalMatrix,
        l: LowerUnitriangularBandMatrix,
        ut: LowerUnitriangularBandMatrix,
    ) -> Self {
        let (d_c, l_c, ut_c) = (d.clone(), l.clone(), ut.clone());
        let cache = LazyCache::new(boxed_producer(move || {
            unpivoted_band_inverse_and_determinant(&d_c, &l_c, &ut_c)
        }));
        Self { dim, d, l, ut, cache }
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

    pub fn inverse(&self) -> Option<&Chain> {
        self.cache.get().inverse()
    }

    pub fn solve(&self, b: &[f64]) -> Option<Vec<f64>> {
        self.inverse().map(|op| op.apply(b))
    }
}

/// Solver for a dense `A = P^T L D U` factorization with partial pivoting.
/// `P` satisfies `P A = L D U`, so `A^-1 = U^-1 D^-1 L^-1 P`.
pub struct DenseLuPivotingSolver {
    dim: MatrixDimension,
    #[allow(dead_code)]
    p: PermutationMatrix,
    #[allow(dead_code)]
    d: DiagonalMatrix,
    #[allow(dead_code)]
    l: LowerUnitriangularMatrix,
    #[allow(dead_code)]
    ut: LowerUnitriangularMatrix,
    cache: InverseCache,
}

fn pivoted_inverse_and_determinant(
    p: &PermutationMatrix,
    d: &DiagonalMatrix,
    l: &LowerUnitriangularMatrix,
    ut: &LowerUnitriangularMatrix,
) -> InverseAndDeterminant<Chain> {
    let d_det = d.determinant();
    if d_det.is_singular() {
        return InverseAndDeterminant::singular();
    }
    let Some(d_inv) = d.inverse() else {
        return InverseAndDeterminant::singular();
    };
    let determinant = DeterminantValues::nonsingular(
        p.sign_of_determinant() * d_det.sign(),
        d_det.log_abs(),
    );
    let ops: Vec<Box<dyn LinearOperator>> = vec![
        Box::new(p.clone()),
        Box::new(l.inverse()),
        Box::new(d_inv),
        Box::new(Transposed(ut.inverse())),
    ];
    InverseAndDeterminant::nonsingular(Chain::new(ops), determinant)
}

impl DenseLuPivotingSolver {
    pub(crate) fn new(
        dim: MatrixDimension,
        p: PermutationMatrix,
        d: DiagonalMatrix,
        l: LowerUnitriangularMatrix,
        ut: LowerUnitriangularMatrix,
    ) -> Self {
        let (p_c, d_c, l_c, ut_c) = (p.clone(), d.clone(), l.clone(), ut.clone());
        let cache = LazyCache::new(boxed_producer(move || {
            pivoted_inverse_and_determinant(&p_c, &d_c, &l_c, &ut_c)
        }));
        Self { dim, p, d, l, ut, cache }
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

    pub fn inverse(&self) -> Option<&Chain> {
        self.cache.get().inverse()
    }

    pub fn solve(&self, b: &[f64]) -> Option<Vec<f64>> {
        self.inverse().map(|op| op.apply(b))
    }
}
