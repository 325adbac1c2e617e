//! Error type shared by every witness, search and registration check.
//!
//! Division and inversion by zero are *not* errors: they follow the
//! algebraic convention documented in [`crate::field`]. Everything here is
//! either a violated precondition of a constructive search (a tolerance
//! that is not positive, a zero target, a witness that is too small) or a
//! law that failed to hold while registering a carrier.

use thiserror::Error;

/// Errors produced by the normed-structure algorithms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormError {
    /// A tolerance `ε` (or radius) that must be strictly positive was not.
    #[error("tolerance must be strictly positive, got {0}")]
    NonPositiveTolerance(f64),

    /// Inversion continuity was requested at zero.
    #[error("inversion is not continuous at zero")]
    ZeroTarget,

    /// A nondiscrete witness did not have norm strictly greater than one.
    #[error("witness must have norm > 1, got {0}")]
    TrivialWitness(f64),

    /// A bound that must be a finite real was infinite or NaN.
    #[error("bound must be finite, got {0}")]
    NonFinite(f64),

    /// An integer exponent search left the `i32` range.
    #[error("no exponent of base {base} within i32 range brackets {target}")]
    ExponentOutOfRange {
        /// Base of the power.
        base: f64,
        /// Value to bracket.
        target: f64,
    },

    /// Shell rescaling was asked to rescale the zero vector.
    #[error("cannot rescale the zero vector into a norm shell")]
    ZeroVector,

    /// A registration-time law check failed.
    #[error("law `{law}` violated: {detail}")]
    LawViolation {
        /// Short law name, e.g. `"triangle"`.
        law: &'static str,
        /// Offending values, formatted.
        detail: String,
    },

    /// A pointwise domination hypothesis `norm(f i) ≤ b i` failed.
    #[error("term {index} has norm {norm} exceeding its bound {bound}")]
    BoundViolated {
        /// Position of the failing term in the enumeration.
        index: usize,
        /// Norm of the term.
        norm: f64,
        /// The bound it was supposed to respect.
        bound: f64,
    },

    /// No vanishing-tail core was found within the configured horizon.
    #[error("no finite core with tail below {eps} within {horizon} terms")]
    NotSummable {
        /// Requested tail tolerance.
        eps: f64,
        /// Number of terms inspected.
        horizon: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NormError>;

/// Rejects `eps` unless it is strictly positive (NaN is rejected too).
pub(crate) fn ensure_positive(eps: f64) -> Result<()> {
    if eps > 0.0 {
        Ok(())
    } else {
        Err(NormError::NonPositiveTolerance(eps))
    }
}

impl NormError {
    pub(crate) fn law(law: &'static str, detail: impl Into<String>) -> Self {
        NormError::LawViolation {
            law,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive(1e-12).is_ok());
        assert_eq!(
            ensure_positive(0.0),
            Err(NormError::NonPositiveTolerance(0.0))
        );
        assert!(ensure_positive(f64::NAN).is_err());
    }

    #[test]
    fn test_display() {
        let e = NormError::law("triangle", "x=1, y=2");
        assert_eq!(e.to_string(), "law `triangle` violated: x=1, y=2");
        let e = NormError::NotSummable {
            eps: 0.5,
            horizon: 10,
        };
        assert!(e.to_string().contains("within 10 terms"));
    }
}
