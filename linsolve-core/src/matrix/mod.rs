//! Matrix-container collaborators. `spec.md` §1 and §6 treat these as
//! external to the core's numerical substance; they are implemented here
//! only so the workspace is a complete, buildable, testable crate.

pub mod band;
pub mod dense;
pub mod diagonal;
pub mod multiply;
pub mod operator;
pub mod permutation;
pub mod shape;
pub mod triangular;

pub use band::BandMatrix;
pub use dense::DenseMatrix;
pub use diagonal::{DiagonalMatrix, DiagonalMatrixBuilder};
pub use operator::{Chain, LinearOperator, Symmetric, SymmetricOperator, Transposed};
pub use permutation::{PermutationMatrix, PermutationMatrixBuilder};
pub use shape::HasShape;
pub use triangular::{
    BandTriangularSolveOperator, LowerUnitriangularBandMatrix, LowerUnitriangularMatrix,
    TriangularSolveOperator,
};
