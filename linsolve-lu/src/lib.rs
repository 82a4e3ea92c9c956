//! LU-family factorizations: dense and banded `A = L D U` (no pivoting, C6/C7)
//! and dense `A = P^T L D U` with partial pivoting (C8), plus their solver
//! facades (C14) and process-wide executor singletons (`spec.md` §5).

pub mod band;
pub mod dense;
pub mod dense_pivoting;
pub mod executor;
pub mod solver;

pub use executor::{BandLuExecutor, DenseLuExecutor, DenseLuPivotingExecutor};
pub use solver::{BandLuSolver, DenseLuPivotingSolver, DenseLuSolver};
