//! [`FactorizationAcceptance`]: the structural accept/reject decision made
//! by `accepts` before any numerical work is attempted.

use crate::error::CoreError;

/// Why a matrix was structurally rejected. Each variant carries enough
/// context to build the user-visible [`CoreError`] it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    NotSquare { rows: usize, cols: usize },
    NotSymmetric,
    TooManyElements { needed: u128, max: u128 },
}

impl RejectionReason {
    /// Builds the user-visible error this rejection corresponds to.
    pub fn to_error(self) -> CoreError {
        match self {
            RejectionReason::NotSquare { rows, cols } => CoreError::NotSquare { rows, cols },
            RejectionReason::NotSymmetric => CoreError::NotSymmetric,
            RejectionReason::TooManyElements { needed, max } => {
                CoreError::TooManyElements { needed, max }
            }
        }
    }
}

/// The outcome of `accepts`: either the matrix is structurally fit for this
/// factorization kind, or it is rejected for a specific, reportable reason.
/// This is a pure, side-effect-free decision — it never raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorizationAcceptance {
    Accepted,
    Rejected(RejectionReason),
}

impl FactorizationAcceptance {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FactorizationAcceptance::Accepted)
    }

    /// Converts a rejection into its error; panics if called on `Accepted`
    /// (callers check `is_accepted` first, mirroring how `apply` only calls
    /// this after observing `Rejected`).
    pub fn into_error(self) -> CoreError {
        match self {
            FactorizationAcceptance::Accepted => {
                panic!("into_error called on an Accepted acceptance")
            }
            FactorizationAcceptance::Rejected(reason) => reason.to_error(),
        }
    }
}

/// Rejects non-square matrices; shared by every executor's `accepts`.
pub fn check_square(rows: usize, cols: usize) -> FactorizationAcceptance {
    if rows == cols {
        FactorizationAcceptance::Accepted
    } else {
        FactorizationAcceptance::Rejected(RejectionReason::NotSquare { rows, cols })
    }
}

/// Rejects effective element counts that would overflow the implementation's
/// maximum representable index (`spec.md` §3's hard size-limit invariant).
/// The source this spec distills from used 32-bit indices; we use `u32::MAX`
/// as the equivalent cap regardless of the host's native `usize` width, so
/// behavior is the same on 32- and 64-bit targets.
pub fn check_element_count(needed: usize) -> FactorizationAcceptance {
    let max = u32::MAX as u128;
    let needed = needed as u128;
    if needed <= max {
        FactorizationAcceptance::Accepted
    } else {
        FactorizationAcceptance::Rejected(RejectionReason::TooManyElements { needed, max })
    }
}
