//! [`DeterminantValues`]: a determinant represented as `(sign, log|det|)`
//! rather than as a single `f64`, so that matrices whose true determinant
//! under- or overflows `f64` still carry a meaningful value.

/// `sign * exp(log_abs)` reconstructs the ordinary determinant, accepting
/// that very small or very large magnitudes may underflow/overflow to `0`
/// or `±inf` at reconstruction time.
///
/// Invariant: `sign == 0` if and only if `log_abs == -inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeterminantValues {
    sign: i8,
    log_abs: f64,
}

impl DeterminantValues {
    /// Builds a nonsingular determinant value. `sign` must be `-1` or `+1`.
    pub fn nonsingular(sign: i8, log_abs: f64) -> Self {
        assert!(sign == -1 || sign == 1, "sign must be -1 or +1");
        assert!(log_abs.is_finite(), "log_abs of a nonsingular determinant must be finite");
        Self { sign, log_abs }
    }

    /// The determinant value of a singular matrix: `sign = 0`, `log_abs = -inf`.
    pub fn singular() -> Self {
        Self {
            sign: 0,
            log_abs: f64::NEG_INFINITY,
        }
    }

    pub fn sign(&self) -> i8 {
        self.sign
    }

    pub fn log_abs(&self) -> f64 {
        self.log_abs
    }

    pub fn is_singular(&self) -> bool {
        self.sign == 0
    }

    /// Reconstructs the ordinary `f64` determinant. May be `0.0` or `±inf`
    /// if `log_abs` is extreme enough that `exp` can't represent it.
    pub fn value(&self) -> f64 {
        if self.sign == 0 {
            0.0
        } else {
            f64::from(self.sign) * self.log_abs.exp()
        }
    }

    /// The determinant value of the inverse matrix: `(sign, -log_abs)`.
    /// Undefined (panics) when singular, since a singular matrix has no
    /// inverse.
    pub fn inverted(&self) -> Self {
        assert!(!self.is_singular(), "cannot invert the determinant of a singular matrix");
        Self {
            sign: self.sign,
            log_abs: -self.log_abs,
        }
    }
}
