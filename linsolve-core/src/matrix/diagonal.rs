//! [`DiagonalMatrix`] and its builder — the `DiagonalMatrix Builder`
//! collaborator of `spec.md` §6, used to hold a factorization's `D` (or
//! `sqrt(D)`) factor.

use super::operator::{LinearOperator, Symmetric};
use crate::determinant::DeterminantValues;
use crate::logmag::LogMagnitudeAccumulator;

#[derive(Debug, Clone)]
pub struct DiagonalMatrix {
    entries: Vec<f64>,
}

impl DiagonalMatrix {
    pub fn zero_builder(n: usize) -> DiagonalMatrixBuilder {
        DiagonalMatrixBuilder {
            entries: vec![0.0; n],
        }
    }

    pub fn n(&self) -> usize {
        self.entries.len()
    }

    pub fn value_at(&self, i: usize) -> f64 {
        self.entries[i]
    }

    /// `(sign, log|det|)` of this diagonal matrix, via the overflow-safe
    /// accumulator (`spec.md` §4.3's "This pattern is also how
    /// C9/C10/C11/C12 compute their final determinants via the diagonal
    /// factor's own sign+log accessors").
    pub fn determinant(&self) -> DeterminantValues {
        let mut sign: i8 = 1;
        let mut acc = LogMagnitudeAccumulator::new();
        for &d in &self.entries {
            if d == 0.0 {
                return DeterminantValues::singular();
            }
            if d < 0.0 {
                sign = -sign;
            }
            acc.accumulate(d.abs(), 1);
        }
        if self.entries.is_empty() {
            return DeterminantValues::nonsingular(1, 0.0);
        }
        DeterminantValues::nonsingular(sign, acc.log_abs())
    }

    pub fn sign_of_determinant(&self) -> i8 {
        self.determinant().sign()
    }

    pub fn log_abs_determinant(&self) -> f64 {
        self.determinant().log_abs()
    }

    /// The reciprocal diagonal matrix, or `None` if any entry is zero or the
    /// reciprocal is not finite.
    pub fn inverse(&self) -> Option<DiagonalMatrix> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for &d in &self.entries {
            let r = 1.0 / d;
            if !r.is_finite() {
                return None;
            }
            entries.push(r);
        }
        Some(DiagonalMatrix { entries })
    }
}

impl LinearOperator for DiagonalMatrix {
    fn dim(&self) -> usize {
        self.entries.len()
    }

    fn apply(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.entries.len());
        v.iter().zip(&self.entries).map(|(x, d)| x * d).collect()
    }

    fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
        self.apply(v)
    }
}

impl Symmetric for DiagonalMatrix {}

pub struct DiagonalMatrixBuilder {
    entries: Vec<f64>,
}

impl DiagonalMatrixBuilder {
    pub fn set_value(&mut self, i: usize, v: f64) {
        self.entries[i] = v;
    }

    pub fn build(self) -> DiagonalMatrix {
        DiagonalMatrix {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinant_tracks_sign_and_magnitude() {
        let mut b = DiagonalMatrix::zero_builder(3);
        b.set_value(0, 2.0);
        b.set_value(1, -3.0);
        b.set_value(2, 5.0);
        let d = b.build();
        let det = d.determinant();
        assert_eq!(det.sign(), -1);
        assert!((det.value() - (-30.0)).abs() < 1e-9);
    }

    #[test]
    fn zero_entry_is_singular() {
        let mut b = DiagonalMatrix::zero_builder(2);
        b.set_value(0, 1.0);
        b.set_value(1, 0.0);
        let d = b.build();
        assert!(d.determinant().is_singular());
        assert!(d.inverse().is_none());
    }

    #[test]
    fn inverse_is_elementwise_reciprocal() {
        let mut b = DiagonalMatrix::zero_builder(2);
        b.set_value(0, 2.0);
        b.set_value(1, 4.0);
        let d = b.build();
        let inv = d.inverse().unwrap();
        assert_eq!(inv.apply(&[1.0, 1.0]), vec![0.5, 0.25]);
    }
}
