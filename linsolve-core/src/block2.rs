//! [`Block2SymmetricDiagonal`] (C13): the block-diagonal `M` factor produced
//! by modified-Cholesky-with-Bunch–Kaufman-pivoting (`spec.md` §4.3), with
//! 1x1 and 2x2 symmetric blocks packed into two parallel arrays.

use crate::inverse::InverseAndDeterminant;
use crate::logmag::LogMagnitudeAccumulator;
use crate::matrix::operator::LinearOperator;
use crate::matrix::Symmetric;

/// `diag[i]` is the `(i, i)` entry. `sub[i]` is the `(i+1, i)` entry
/// (zero-padded; `sub[n-1]` is unused). Invariant: if `sub[i] != 0` then
/// `sub[i-1] == 0` (when `i > 0`) and `sub[i+1] == 0` (when `i+1 < n`) — no
/// two adjacent off-diagonal entries are both nonzero, so the 2x2 blocks
/// they define are disjoint. Enforced by the builder.
#[derive(Debug, Clone)]
pub struct Block2SymmetricDiagonal {
    diag: Vec<f64>,
    sub: Vec<f64>,
}

impl Block2SymmetricDiagonal {
    pub fn zero_builder(n: usize) -> Block2SymmetricDiagonalBuilder {
        Block2SymmetricDiagonalBuilder {
            diag: vec![0.0; n],
            sub: vec![0.0; n],
        }
    }

    pub fn n(&self) -> usize {
        self.diag.len()
    }

    pub fn diag(&self, i: usize) -> f64 {
        self.diag[i]
    }

    pub fn sub(&self, i: usize) -> f64 {
        self.sub[i]
    }

    /// Computes `M^-1` and `det(M)` in one sweep over the blocks, per
    /// `spec.md` §4.3. Returns an empty inverse (singular `M`) at the first
    /// block whose inverse isn't finite.
    pub fn inverse_and_determinant(&self) -> InverseAndDeterminant<Block2SymmetricDiagonal> {
        let n = self.n();
        let mut inv_diag = vec![0.0; n];
        let mut inv_sub = vec![0.0; n];
        let mut sign: i8 = 1;
        let mut acc = LogMagnitudeAccumulator::new();

        let mut i = 0;
        while i < n {
            if self.sub[i] != 0.0 && i + 1 < n {
                // Close the 2x2 block spanning (i, i+1).
                let a = self.diag[i];
                let c = self.diag[i + 1];
                let b = self.sub[i];

                let ac = a * c;
                let b2 = b * b;
                let scale: f64 = if ac.abs() > 1e300 || b2 > 1e300 {
                    1e150
                } else if ac.abs() < 1e-300 && b2 < 1e-300 {
                    1e-150
                } else {
                    1.0
                };

                let a_s = a / scale;
                let b_s = b / scale;
                let c_s = c / scale;
                let scaled_det = a_s * c_s - b_s * b_s;

                if scaled_det.abs() < 1e-305 {
                    return InverseAndDeterminant::singular();
                }

                let denom = scaled_det * scale;
                let inv_aa = c_s / denom;
                let inv_cc = a_s / denom;
                let inv_ac = -b_s / denom;

                if !(inv_aa.is_finite() && inv_cc.is_finite() && inv_ac.is_finite()) {
                    return InverseAndDeterminant::singular();
                }

                inv_diag[i] = inv_aa;
                inv_diag[i + 1] = inv_cc;
                inv_sub[i] = inv_ac;

                if scaled_det < 0.0 {
                    sign = -sign;
                }
                acc.accumulate(scaled_det.abs(), 1);
                acc.accumulate(scale, 2);

                i += 2;
            } else {
                // 1x1 block.
                let d = self.diag[i];
                let inv = 1.0 / d;
                if !inv.is_finite() {
                    return InverseAndDeterminant::singular();
                }
                inv_diag[i] = inv;
                if d < 0.0 {
                    sign = -sign;
                }
                acc.accumulate(d.abs(), 1);
                i += 1;
            }
        }

        let determinant = crate::determinant::DeterminantValues::nonsingular(sign, acc.log_abs());
        InverseAndDeterminant::nonsingular(
            Block2SymmetricDiagonal {
                diag: inv_diag,
                sub: inv_sub,
            },
            determinant,
        )
    }
}

impl LinearOperator for Block2SymmetricDiagonal {
    fn dim(&self) -> usize {
        self.n()
    }

    fn apply(&self, v: &[f64]) -> Vec<f64> {
        let n = self.n();
        assert_eq!(v.len(), n);
        let mut out = vec![0.0; n];
        let mut i = 0;
        while i < n {
            if self.sub[i] != 0.0 && i + 1 < n {
                let a = self.diag[i];
                let b = self.sub[i];
                let c = self.diag[i + 1];
                out[i] = a * v[i] + b * v[i + 1];
                out[i + 1] = b * v[i] + c * v[i + 1];
                i += 2;
            } else {
                out[i] = self.diag[i] * v[i];
                i += 1;
            }
        }
        out
    }

    fn apply_transpose(&self, v: &[f64]) -> Vec<f64> {
        // Symmetric by construction.
        self.apply(v)
    }
}

impl Symmetric for Block2SymmetricDiagonal {}

pub struct Block2SymmetricDiagonalBuilder {
    diag: Vec<f64>,
    sub: Vec<f64>,
}

impl Block2SymmetricDiagonalBuilder {
    pub fn set_diag(&mut self, i: usize, v: f64) {
        self.diag[i] = v;
    }

    /// Sets the `(i+1, i)` entry. Panics if that would give two adjacent
    /// nonzero `sub` entries, which would make the 2x2 blocks overlap.
    pub fn set_sub(&mut self, i: usize, v: f64) {
        if v != 0.0 {
            if i > 0 {
                assert_eq!(self.sub[i - 1], 0.0, "adjacent 2x2 blocks would overlap at index {i}");
            }
            if i + 1 < self.sub.len() {
                assert_eq!(
                    self.sub[i + 1],
                    0.0,
                    "adjacent 2x2 blocks would overlap at index {i}"
                );
            }
        }
        self.sub[i] = v;
    }

    pub fn build(self) -> Block2SymmetricDiagonal {
        Block2SymmetricDiagonal {
            diag: self.diag,
            sub: self.sub,
        }
    }
}
