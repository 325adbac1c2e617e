//! The norm capability, its nonnegative projection, and law certificates.
//!
//! [`Norm`] on its own imposes no constraint; it only gains meaning once
//! combined with a group structure ([`crate::group::NormedGroup`]).
//!
//! Every law of the normed hierarchy is exposed as a pure function that
//! evaluates both sides at concrete arguments and returns a [`Bound`]. A
//! `Bound` is a certificate: it records `lhs`, `rhs` and the relation the
//! law promises, and can be checked against a [`Tolerance`].

use std::fmt;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::config::Tolerance;

/// A total map from a carrier to the nonnegative reals.
///
/// # Examples
/// ```
/// use u_normed::norm::Norm;
/// assert_eq!((-3.0_f64).norm(), 3.0);
/// assert_eq!((-3.0_f64).nnnorm().get(), 3.0);
/// ```
pub trait Norm {
    /// The norm `‖self‖`.
    fn norm(&self) -> f64;

    /// The norm as a type-level nonnegative real.
    fn nnnorm(&self) -> NNReal {
        NNReal::saturating(self.norm())
    }
}

/// A nonnegative real number.
///
/// This is the type-safe view used where a negative value would be a typing
/// hazard: distances and the norm of a norm.
///
/// # Examples
/// ```
/// use u_normed::norm::NNReal;
/// assert!(NNReal::new(-1.0).is_none());
/// assert_eq!(NNReal::new(2.5).unwrap().get(), 2.5);
/// assert_eq!(NNReal::saturating(-4.0), NNReal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct NNReal(f64);

impl NNReal {
    /// Zero.
    pub const ZERO: NNReal = NNReal(0.0);
    /// One.
    pub const ONE: NNReal = NNReal(1.0);

    /// Returns `None` for negative or NaN input.
    pub fn new(x: f64) -> Option<Self> {
        if x >= 0.0 {
            Some(NNReal(x))
        } else {
            None
        }
    }

    /// Clamps negative values and NaN to zero.
    pub fn saturating(x: f64) -> Self {
        NNReal(x.max(0.0))
    }

    /// The underlying real.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Larger of two nonnegative reals.
    pub fn max(self, other: Self) -> Self {
        NNReal(self.0.max(other.0))
    }
}

impl From<NNReal> for f64 {
    fn from(x: NNReal) -> f64 {
        x.0
    }
}

impl Add for NNReal {
    type Output = NNReal;
    fn add(self, rhs: NNReal) -> NNReal {
        NNReal(self.0 + rhs.0)
    }
}

impl Mul for NNReal {
    type Output = NNReal;
    fn mul(self, rhs: NNReal) -> NNReal {
        NNReal(self.0 * rhs.0)
    }
}

impl Norm for NNReal {
    fn norm(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for NNReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The relation a [`Bound`] asserts between its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// `lhs ≤ rhs`
    Le,
    /// `lhs < rhs`
    Lt,
    /// `lhs = rhs`
    Eq,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relation::Le => "≤",
            Relation::Lt => "<",
            Relation::Eq => "=",
        };
        f.write_str(s)
    }
}

/// A law evaluated at concrete arguments.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::norm::Bound;
/// let b = Bound::le(1.0, 2.0);
/// assert!(b.holds(&Tolerance::EXACT));
/// assert_eq!(b.slack(), 1.0);
/// assert!(!Bound::equal(1.0, 1.5).holds(&Tolerance::default()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    /// Left-hand side.
    pub lhs: f64,
    /// Right-hand side.
    pub rhs: f64,
    /// Promised relation.
    pub relation: Relation,
}

impl Bound {
    /// Certificate for `lhs ≤ rhs`.
    pub fn le(lhs: f64, rhs: f64) -> Self {
        Self {
            lhs,
            rhs,
            relation: Relation::Le,
        }
    }

    /// Certificate for `lhs < rhs`.
    pub fn lt(lhs: f64, rhs: f64) -> Self {
        Self {
            lhs,
            rhs,
            relation: Relation::Lt,
        }
    }

    /// Certificate for `lhs = rhs`.
    pub fn equal(lhs: f64, rhs: f64) -> Self {
        Self {
            lhs,
            rhs,
            relation: Relation::Eq,
        }
    }

    /// Whether the promised relation holds up to `tol`.
    pub fn holds(&self, tol: &Tolerance) -> bool {
        match self.relation {
            Relation::Le => tol.approx_le(self.lhs, self.rhs),
            Relation::Lt => tol.approx_lt(self.lhs, self.rhs),
            Relation::Eq => tol.approx_eq(self.lhs, self.rhs),
        }
    }

    /// `rhs - lhs`; nonnegative whenever an inequality holds exactly.
    pub fn slack(&self) -> f64 {
        self.rhs - self.lhs
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.relation, self.rhs)
    }
}

/// A value produced by a constructive search, together with the bound it
/// was searched for.
#[derive(Debug, Clone, PartialEq)]
pub struct Witness<T> {
    /// The element found.
    pub value: T,
    /// The inequality it satisfies, evaluated at `value`.
    pub bound: Bound,
}
