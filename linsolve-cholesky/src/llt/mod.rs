//! Plain `A = L D L^T` factorization for symmetric positive-definite
//! matrices: dense (C9) and banded (C10).

pub mod band;
pub mod dense;
