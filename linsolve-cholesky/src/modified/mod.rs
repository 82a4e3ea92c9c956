//! Modified (indefinite-tolerant) Cholesky: unpivoted band (C11) and pivoted
//! dense Bunch-Kaufman (C12).

pub mod band;
pub mod dense_bunch_kaufman;
