//! Normed rings: submultiplicative norms and continuity of multiplication.
//!
//! A [`NormedRing`] adds one law to [`NormedGroup`]:
//!
//! ```text
//! norm(a * b) ≤ norm(a) * norm(b)
//! ```
//!
//! From it follow `norm(aⁿ) ≤ norm(a)ⁿ` for `n ≥ 1` and joint continuity of
//! multiplication. The continuity argument decomposes
//!
//! ```text
//! x·y − a·b = x·(y − b) + (x − a)·b
//! ```
//!
//! and bounds each summand; with `norm(x − a) < δ`, `norm(y − b) < δ`,
//!
//! ```text
//! norm(x·y − a·b) < (norm(a) + δ)·δ + δ·norm(b) ≤ δ·(norm(a) + norm(b) + 1)   (δ ≤ 1)
//! ```
//!
//! so `δ = min(1, ε / (norm(a) + norm(b) + 1))` suffices. Scalar
//! multiplication in [`crate::space`] reuses the same template.

use std::num::NonZeroU32;
use std::ops::Mul;

use num_traits::One;

use crate::error::{ensure_positive, Result};
use crate::group::NormedGroup;
use crate::norm::Bound;

/// A ring whose norm is submultiplicative.
///
/// [`crate::laws::check_normed_ring`] verifies the law on samples.
pub trait NormedRing: NormedGroup + One + Mul<Output = Self> {
    /// `self^n` by binary exponentiation; `self^0 = 1`.
    fn pow_n(&self, n: u32) -> Self {
        let mut acc = Self::one();
        let mut base = self.clone();
        let mut e = n;
        while e > 0 {
            if e & 1 == 1 {
                acc = acc * base.clone();
            }
            e >>= 1;
            if e > 0 {
                base = base.clone() * base;
            }
        }
        acc
    }
}

/// Submultiplicativity `norm(a * b) ≤ norm(a) * norm(b)`.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::ring::norm_mul_le;
/// use num_bigint::BigInt;
/// assert!(norm_mul_le(&BigInt::from(-3), &BigInt::from(4)).holds(&Tolerance::EXACT));
/// ```
pub fn norm_mul_le<R: NormedRing>(a: &R, b: &R) -> Bound {
    Bound::le((a.clone() * b.clone()).norm(), a.norm() * b.norm())
}

/// `norm(aⁿ) ≤ norm(a)ⁿ` for `n ≥ 1`.
///
/// `n = 0` is excluded: `norm(1) ≤ 1` is not a consequence of
/// submultiplicativity alone.
pub fn norm_pow_le<R: NormedRing>(a: &R, n: NonZeroU32) -> Bound {
    let n = n.get();
    Bound::le(a.pow_n(n).norm(), pow_nonneg(a.norm(), n))
}

/// `xⁿ` for a real `x` by repeated squaring, avoiding `powi`'s `i32` range.
pub(crate) fn pow_nonneg(x: f64, n: u32) -> f64 {
    let mut acc = 1.0;
    let mut base = x;
    let mut e = n;
    while e > 0 {
        if e & 1 == 1 {
            acc *= base;
        }
        base *= base;
        e >>= 1;
    }
    acc
}

/// Joint continuity witness for `(x, y) ↦ x * y` at `(a, b)`:
/// `δ = min(1, ε / (norm(a) + norm(b) + 1))`.
///
/// # Examples
/// ```
/// use u_normed::ring::mul_continuity_delta;
/// let delta = mul_continuity_delta(&2.0_f64, &3.0_f64, 0.6).unwrap();
/// assert!((delta - 0.1).abs() < 1e-15);
/// let (x, y) = (2.0 + 0.099, 3.0 - 0.099);
/// assert!((x * y - 6.0_f64).abs() < 0.6);
/// ```
pub fn mul_continuity_delta<R: NormedRing>(a: &R, b: &R, eps: f64) -> Result<f64> {
    ensure_positive(eps)?;
    Ok(bilinear_delta(a.norm(), b.norm(), eps))
}

/// Shared witness for any bounded bilinear map `B` with
/// `norm(B(u, v)) ≤ norm(u) · norm(v)`, at `(u, v)` with the given norms.
pub(crate) fn bilinear_delta(norm_u: f64, norm_v: f64, eps: f64) -> f64 {
    (eps / (norm_u + norm_v + 1.0)).min(1.0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn mul_continuity_witness_holds(
            a in -1e3_f64..1e3,
            b in -1e3_f64..1e3,
            da in -1.0_f64..1.0,
            db in -1.0_f64..1.0,
            eps in 1e-4_f64..10.0,
        ) {
            let delta = mul_continuity_delta(&a, &b, eps).unwrap();
            let x = a + da * delta * 0.999;
            let y = b + db * delta * 0.999;
            prop_assert!((x * y - a * b).abs() < eps);
        }
    }
}
