//! Normed fields, the nondiscrete refinement, and continuity of inversion.
//!
//! A [`NormedField`] strengthens submultiplicativity to equality:
//!
//! ```text
//! norm(a * b) = norm(a) * norm(b)
//! ```
//!
//! which forces `norm(1) = 1`, `norm(a⁻¹) = norm(a)⁻¹` and
//! `norm(a / b) = norm(a) / norm(b)`: the norm is a homomorphism of
//! multiplicative groups on nonzero elements.
//!
//! # Division by zero
//!
//! Inversion follows the algebraic convention `0⁻¹ = 0`, hence `a / 0 = 0`.
//! The real-side counterparts [`real_inv`] and [`real_div`] follow the same
//! convention, so every derived law stays an identity at zero as well:
//! `norm(a / 0) = norm(0) = 0 = real_div(norm(a), norm(0))`. No operation
//! raises on zero; callers that need a hard error guard with an explicit
//! nonzero check first.
//!
//! # Inversion continuity
//!
//! For `r ≠ 0` and `ε > 0` [`inv_continuity_delta`] returns exactly
//!
//! ```text
//! δ = min(ε · norm(r)² / 4, norm(r) / 2)
//! ```
//!
//! If `dist(x, r) < δ` then `norm(x) ≥ norm(r) / 2` (reverse triangle
//! inequality, since `δ ≤ norm(r)/2`), and from
//! `x⁻¹ − r⁻¹ = (r − x) · x⁻¹ · r⁻¹`:
//!
//! ```text
//! dist(x⁻¹, r⁻¹) ≤ dist(x, r) · norm(x)⁻¹ · norm(r)⁻¹ < δ · (2 / norm(r)) · norm(r)⁻¹ ≤ ε
//! ```

use tracing::trace;

use crate::error::{ensure_positive, NormError, Result};
use crate::norm::{Bound, Witness};
use crate::ring::{mul_continuity_delta, pow_nonneg, NormedRing};

/// A field with a multiplicative norm.
///
/// [`crate::laws::check_normed_field`] verifies the laws on samples.
pub trait NormedField: NormedRing {
    /// Multiplicative inverse, with `0⁻¹ = 0`.
    fn inverse(&self) -> Self;

    /// `self * other⁻¹`, so `a / 0 = 0`.
    fn divide(&self, other: &Self) -> Self {
        self.clone() * other.inverse()
    }

    /// Integer power; negative exponents raise the inverse, so small
    /// powers stay reachable when `self^|n|` alone would overflow.
    fn zpow(&self, n: i32) -> Self {
        if n >= 0 {
            self.pow_n(n.unsigned_abs())
        } else {
            self.inverse().pow_n(n.unsigned_abs())
        }
    }
}

/// A normed field with an element of norm strictly greater than one.
///
/// Its integer powers are unbounded and come arbitrarily close to zero,
/// which is what every scale-shifting argument needs.
pub trait NondiscreteNormedField: NormedField {
    /// An element `c` with `norm(c) > 1`.
    fn non_trivial() -> Self;
}

/// `x⁻¹` on the reals with `0⁻¹ = 0`.
pub fn real_inv(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        1.0 / x
    }
}

/// `a / b` on the reals with `a / 0 = 0`.
///
/// # Examples
/// ```
/// use u_normed::field::real_div;
/// assert_eq!(real_div(3.0, 2.0), 1.5);
/// assert_eq!(real_div(3.0, 0.0), 0.0);
/// ```
pub fn real_div(a: f64, b: f64) -> f64 {
    a * real_inv(b)
}

/// `xⁿ` on the reals for an integer `n`, with `0ⁿ = 0` for `n < 0`.
pub fn real_zpow(x: f64, n: i32) -> f64 {
    if n >= 0 {
        pow_nonneg(x, n.unsigned_abs())
    } else {
        pow_nonneg(real_inv(x), n.unsigned_abs())
    }
}

/// `norm(a * b) = norm(a) * norm(b)`.
pub fn norm_mul_eq<K: NormedField>(a: &K, b: &K) -> Bound {
    Bound::equal((a.clone() * b.clone()).norm(), a.norm() * b.norm())
}

/// `norm(1) = 1`.
pub fn norm_one<K: NormedField>() -> Bound {
    Bound::equal(K::one().norm(), 1.0)
}

/// `norm(a⁻¹) = norm(a)⁻¹`.
pub fn norm_inv<K: NormedField>(a: &K) -> Bound {
    Bound::equal(a.inverse().norm(), real_inv(a.norm()))
}

/// `norm(a / b) = norm(a) / norm(b)`.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::field::norm_div;
/// use num_complex::Complex64;
/// let b = norm_div(&Complex64::new(3.0, 4.0), &Complex64::new(0.0, 2.0));
/// assert!(b.holds(&Tolerance::default()));
/// assert!((b.rhs - 2.5).abs() < 1e-12);
/// // Division by zero follows the same convention on both sides.
/// assert_eq!(norm_div(&5.0_f64, &0.0).lhs, 0.0);
/// assert_eq!(norm_div(&5.0_f64, &0.0).rhs, 0.0);
/// ```
pub fn norm_div<K: NormedField>(a: &K, b: &K) -> Bound {
    Bound::equal(a.divide(b).norm(), real_div(a.norm(), b.norm()))
}

/// `norm(aⁿ) = norm(a)ⁿ` for every integer `n`.
pub fn norm_zpow<K: NormedField>(a: &K, n: i32) -> Bound {
    Bound::equal(a.zpow(n).norm(), real_zpow(a.norm(), n))
}

/// Continuity witness for inversion at `r ≠ 0`:
/// `δ = min(ε · norm(r)² / 4, norm(r) / 2)`.
///
/// # Errors
/// [`NormError::ZeroTarget`] for `r = 0`, [`NormError::NonPositiveTolerance`]
/// for `ε ≤ 0`.
///
/// # Examples
/// ```
/// use u_normed::field::inv_continuity_delta;
/// assert_eq!(inv_continuity_delta(&2.0_f64, 0.01).unwrap(), 0.01);
/// assert_eq!(inv_continuity_delta(&2.0_f64, 100.0).unwrap(), 1.0);
/// ```
pub fn inv_continuity_delta<K: NormedField>(r: &K, eps: f64) -> Result<f64> {
    ensure_positive(eps)?;
    let nr = r.norm();
    if nr == 0.0 {
        return Err(NormError::ZeroTarget);
    }
    Ok((eps * nr * nr / 4.0).min(nr / 2.0))
}

/// Joint continuity witness for `(x, y) ↦ x / y` at `(a, b)` with `b ≠ 0`.
///
/// Composes the multiplication witness at `(a, b⁻¹)` for `ε` with the
/// inversion witness at `b` for that multiplication radius.
pub fn div_continuity_delta<K: NormedField>(a: &K, b: &K, eps: f64) -> Result<f64> {
    ensure_positive(eps)?;
    if b.norm() == 0.0 {
        return Err(NormError::ZeroTarget);
    }
    let mul_delta = mul_continuity_delta(a, &b.inverse(), eps)?;
    let inv_delta = inv_continuity_delta(b, mul_delta)?;
    Ok(mul_delta.min(inv_delta))
}

/// Finds the integer `n` with `baseⁿ ≤ target < baseⁿ⁺¹`.
///
/// # Algorithm
/// Galloping search: the exponent step doubles away from `0` until the
/// predicate `baseⁿ ≤ target` flips, then bisection narrows the bracket.
/// O(log |n|) evaluations of `powf`.
///
/// # Errors
/// - [`NormError::TrivialWitness`] if `base ≤ 1`.
/// - [`NormError::NonPositiveTolerance`] if `target ≤ 0`.
/// - [`NormError::NonFinite`] if either argument is infinite or NaN.
/// - [`NormError::ExponentOutOfRange`] if no `i32` exponent brackets `target`.
///
/// # Examples
/// ```
/// use u_normed::field::zpow_bracket;
/// assert_eq!(zpow_bracket(2.0, 100.0).unwrap(), 6);
/// assert_eq!(zpow_bracket(2.0, 0.3).unwrap(), -2);
/// assert_eq!(zpow_bracket(10.0, 1.0).unwrap(), 0);
/// ```
pub fn zpow_bracket(base: f64, target: f64) -> Result<i32> {
    if !base.is_finite() {
        return Err(NormError::NonFinite(base));
    }
    if !target.is_finite() {
        return Err(NormError::NonFinite(target));
    }
    if base <= 1.0 {
        return Err(NormError::TrivialWitness(base));
    }
    ensure_positive(target)?;

    let below = |n: i32| base.powf(f64::from(n)) <= target;
    let out_of_range = || NormError::ExponentOutOfRange { base, target };

    // Invariant after galloping: below(lo) && !below(hi).
    let (mut lo, mut hi) = if below(0) {
        let (mut lo, mut step) = (0_i32, 1_i32);
        loop {
            let hi = lo.checked_add(step).ok_or_else(out_of_range)?;
            if !below(hi) {
                break (lo, hi);
            }
            lo = hi;
            step = step.saturating_mul(2);
        }
    } else {
        let (mut hi, mut step) = (0_i32, 1_i32);
        loop {
            let lo = hi.checked_sub(step).ok_or_else(out_of_range)?;
            if below(lo) {
                break (lo, hi);
            }
            hi = lo;
            step = step.saturating_mul(2);
        }
    };
    trace!(base, target, lo, hi, "exponent bracket found");

    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if below(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}

/// Exponent steps allowed after the `powf` bracket, to absorb rounding
/// differences against repeated multiplication.
const MAX_CORRECTIONS: usize = 4;

fn checked_witness<K: NondiscreteNormedField>() -> Result<(K, f64)> {
    let c = K::non_trivial();
    let nc = c.norm();
    if nc > 1.0 {
        Ok((c, nc))
    } else {
        Err(NormError::TrivialWitness(nc))
    }
}

/// An element of norm strictly greater than `r`: a power of the
/// nondiscrete witness.
///
/// The exponent from [`zpow_bracket`] is re-checked against the power
/// actually built, and raised while `norm(cᵉ) ≤ r`.
///
/// # Errors
/// [`NormError::ExponentOutOfRange`] when the power needed overflows.
///
/// # Examples
/// ```
/// use u_normed::field::exists_norm_gt;
/// let w = exists_norm_gt::<f64>(1000.0).unwrap();
/// assert!(w.value.abs() > 1000.0);
/// assert_eq!(w.value, 1024.0);
/// ```
pub fn exists_norm_gt<K: NondiscreteNormedField>(r: f64) -> Result<Witness<K>> {
    let (c, nc) = checked_witness::<K>()?;
    let out_of_range = || NormError::ExponentOutOfRange { base: nc, target: r };
    let mut e = if r < nc {
        1
    } else {
        zpow_bracket(nc, r)?.checked_add(1).ok_or_else(out_of_range)?
    };
    let mut value = c.zpow(e);
    for _ in 0..MAX_CORRECTIONS {
        if value.norm() > r {
            break;
        }
        e = e.checked_add(1).ok_or_else(out_of_range)?;
        value = c.zpow(e);
    }
    let nv = value.norm();
    if !(nv.is_finite() && nv > r) {
        return Err(out_of_range());
    }
    trace!(exponent = e, r, norm = nv, "large element found");
    Ok(Witness {
        value,
        bound: Bound::lt(r, nv),
    })
}

/// A nonzero element of norm strictly less than `r > 0`: a negative power
/// of the nondiscrete witness.
///
/// # Errors
/// [`NormError::NonPositiveTolerance`] for `r ≤ 0`,
/// [`NormError::ExponentOutOfRange`] when the power needed underflows to
/// zero.
///
/// # Examples
/// ```
/// use u_normed::field::exists_norm_lt;
/// let w = exists_norm_lt::<f64>(0.01).unwrap();
/// assert!(w.value != 0.0 && w.value.abs() < 0.01);
/// ```
pub fn exists_norm_lt<K: NondiscreteNormedField>(r: f64) -> Result<Witness<K>> {
    let (c, nc) = checked_witness::<K>()?;
    let out_of_range = || NormError::ExponentOutOfRange { base: nc, target: r };
    let mut e = zpow_bracket(nc, r)?.checked_sub(1).ok_or_else(out_of_range)?;
    let mut value = c.zpow(e);
    for _ in 0..MAX_CORRECTIONS {
        if value.norm() < r {
            break;
        }
        e = e.checked_sub(1).ok_or_else(out_of_range)?;
        value = c.zpow(e);
    }
    let nv = value.norm();
    if !(nv > 0.0 && nv < r) {
        return Err(out_of_range());
    }
    trace!(exponent = e, r, norm = nv, "small element found");
    Ok(Witness {
        value,
        bound: Bound::lt(nv, r),
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::Tolerance;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn inversion_witness_holds(
            r in prop_oneof![-1e3_f64..-1e-3, 1e-3_f64..1e3],
            eps in 1e-6_f64..10.0,
            t in -1.0_f64..1.0,
        ) {
            let delta = inv_continuity_delta(&r, eps).unwrap();
            let x = r + t * delta * 0.999;
            prop_assert!((x.inverse() - r.inverse()).abs() < eps);
        }

        #[test]
        fn bracket_contains_target(
            base in 1.01_f64..100.0,
            target in 1e-12_f64..1e12,
        ) {
            let n = zpow_bracket(base, target).unwrap();
            prop_assert!(base.powf(f64::from(n)) <= target);
            prop_assert!(target < base.powf(f64::from(n + 1)));
        }

        #[test]
        fn witnesses_hold_exactly(r in 1e-200_f64..1e200) {
            let big = exists_norm_gt::<f64>(r).unwrap();
            prop_assert!(big.bound.holds(&Tolerance::EXACT));
            let small = exists_norm_lt::<f64>(r).unwrap();
            prop_assert!(small.bound.holds(&Tolerance::EXACT));
            prop_assert!(small.value != 0.0);
        }
    }
}
