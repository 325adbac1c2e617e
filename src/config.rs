//! Numeric tolerances and search limits.
//!
//! Laws such as `norm(a * b) = norm(a) * norm(b)` hold exactly over the
//! reals but only up to rounding over `f64`. Every check in this crate
//! therefore compares through a [`Tolerance`]. The remaining structs bound
//! the finite approximations used by the summability engine and the
//! randomized registration checks.
//!
//! All types derive `serde` traits so a host application can load them
//! from its own configuration files.

use serde::{Deserialize, Serialize};

/// Mixed absolute/relative comparison tolerance.
///
/// `a ≤ b` is accepted when `a ≤ b + abs + rel · max(|a|, |b|)`.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// let tol = Tolerance::default();
/// assert!(tol.approx_eq(0.1 + 0.2, 0.3));
/// assert!(!tol.approx_le(1.0 + 1e-6, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Absolute slack.
    pub abs: f64,
    /// Slack relative to the larger magnitude of the two operands.
    pub rel: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

impl Tolerance {
    /// Exact comparison, no slack at all.
    pub const EXACT: Tolerance = Tolerance { abs: 0.0, rel: 0.0 };

    fn slack(&self, a: f64, b: f64) -> f64 {
        let m = a.abs().max(b.abs());
        if m.is_finite() {
            self.abs + self.rel * m
        } else {
            0.0
        }
    }

    /// `a ≤ b` up to tolerance.
    pub fn approx_le(&self, a: f64, b: f64) -> bool {
        a <= b + self.slack(a, b)
    }

    /// Strict `a < b`. Slack only widens the non-strict relations, so a
    /// strict certificate never holds at equality.
    pub fn approx_lt(&self, a: f64, b: f64) -> bool {
        a < b
    }

    /// `a = b` up to tolerance.
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        (a - b).abs() <= self.slack(a, b)
    }
}

/// Finite-horizon limits for the summability engine.
///
/// A family is inspected on its first `horizon` indices. A vanishing-tail
/// core may use at most `max_core` of them, so the remaining
/// `horizon - max_core` terms act as evidence that the tail really is small.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummabilityConfig {
    /// Number of indices enumerated.
    pub horizon: usize,
    /// Largest admissible core.
    pub max_core: usize,
    /// Tail tolerance used when summability itself must be certified.
    pub tail_eps: f64,
    /// Tolerance for pointwise domination checks.
    pub tolerance: Tolerance,
}

impl Default for SummabilityConfig {
    fn default() -> Self {
        Self {
            horizon: 10_000,
            max_core: 5_000,
            tail_eps: 1e-9,
            tolerance: Tolerance::default(),
        }
    }
}

/// Parameters for randomized registration checks (see [`crate::laws`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LawConfig {
    /// Number of random samples drawn per carrier.
    pub samples: usize,
    /// RNG seed, so that a failing registration is reproducible.
    pub seed: u64,
    /// Samples are drawn with magnitude up to `scale`.
    pub scale: f64,
    /// Comparison tolerance for every law.
    pub tolerance: Tolerance,
}

impl Default for LawConfig {
    fn default() -> Self {
        Self {
            samples: 24,
            seed: 42,
            scale: 100.0,
            tolerance: Tolerance::default(),
        }
    }
}
