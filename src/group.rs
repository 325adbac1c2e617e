//! Normed additive groups.
//!
//! A [`NormedGroup`] is an additive group with a norm; its distance is
//! derived as `dist(x, y) = norm(x - y)`. From the four core axioms
//!
//! - `norm(x) ≥ 0`,
//! - `norm(x) = 0 ⟺ x = 0`,
//! - `norm(-x) = norm(x)`,
//! - `norm(x + y) ≤ norm(x) + norm(y)`,
//!
//! this module derives the catalogue of inequalities that every later layer
//! reuses, together with explicit continuity witnesses showing that the norm
//! is continuous and that the group is a *uniform* additive group.
//!
//! # Witnesses
//!
//! Continuity facts are returned as `δ` values: for the tolerance `ε` that
//! was passed in, moving every argument by less than `δ` moves the result
//! by less than `ε`.
//!
//! | Operation | δ(ε) | Reason |
//! |---|---|---|
//! | `x ↦ norm(x)` | `ε` | `|norm(x) − norm(y)| ≤ norm(x − y)` |
//! | `(x, y) ↦ x + y` | `ε/2` | `norm((x+y) − (a+b)) ≤ norm(x−a) + norm(y−b)` |
//! | `(x, y) ↦ x − y` | `ε/2` | same decomposition |
//! | `x ↦ −x` | `ε` | `dist(−x, −a) = dist(x, a)` |

use std::ops::{Add, Neg, Sub};

use num_traits::Zero;

use crate::error::{ensure_positive, NormError, Result};
use crate::metric::eventually_within;
use crate::norm::{Bound, NNReal, Norm};
use crate::summable::kahan_sum;

/// An additive group whose norm induces its distance.
///
/// Implementors only supply the group operations and [`Norm::norm`]; the
/// distance is provided. Implementations must satisfy the axioms listed in
/// the module documentation; [`crate::laws::check_normed_group`] verifies
/// them on samples at registration time.
pub trait NormedGroup:
    Norm + Clone + PartialEq + Zero + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self>
{
    /// `dist(self, other) = norm(self - other)`.
    fn dist(&self, other: &Self) -> f64 {
        (self.clone() - other.clone()).norm()
    }

    /// Distance as a nonnegative real.
    fn nndist(&self, other: &Self) -> NNReal {
        NNReal::saturating(self.dist(other))
    }
}

/// `dist(x, y) = norm(x - y)`.
pub fn dist_eq_norm_sub<G: NormedGroup>(x: &G, y: &G) -> Bound {
    Bound::equal(x.dist(y), (x.clone() - y.clone()).norm())
}

/// `dist(x, y) = dist(y, x)`.
pub fn dist_comm<G: NormedGroup>(x: &G, y: &G) -> Bound {
    Bound::equal(x.dist(y), y.dist(x))
}

/// `norm(-x) = norm(x)`.
pub fn norm_neg<G: NormedGroup>(x: &G) -> Bound {
    Bound::equal((-x.clone()).norm(), x.norm())
}

/// Triangle inequality `norm(x + y) ≤ norm(x) + norm(y)`.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::group::norm_add_le;
/// let b = norm_add_le(&3.0_f64, &-5.0_f64);
/// assert_eq!((b.lhs, b.rhs), (2.0, 8.0));
/// assert!(b.holds(&Tolerance::EXACT));
/// ```
pub fn norm_add_le<G: NormedGroup>(x: &G, y: &G) -> Bound {
    Bound::le((x.clone() + y.clone()).norm(), x.norm() + y.norm())
}

/// `norm(x - y) ≤ norm(x) + norm(y)`.
pub fn norm_sub_le<G: NormedGroup>(x: &G, y: &G) -> Bound {
    Bound::le((x.clone() - y.clone()).norm(), x.norm() + y.norm())
}

/// Reverse triangle inequality `|norm(x) − norm(y)| ≤ norm(x − y)`.
pub fn abs_norm_sub_norm_le<G: NormedGroup>(x: &G, y: &G) -> Bound {
    Bound::le((x.norm() - y.norm()).abs(), (x.clone() - y.clone()).norm())
}

/// `dist(x, z) ≤ dist(x, y) + dist(y, z)`.
pub fn dist_triangle<G: NormedGroup>(x: &G, y: &G, z: &G) -> Bound {
    Bound::le(x.dist(z), x.dist(y) + y.dist(z))
}

/// Additive translation invariance `dist(x + z, y + z) = dist(x, y)`.
pub fn dist_add_right<G: NormedGroup>(x: &G, y: &G, z: &G) -> Bound {
    let lhs = (x.clone() + z.clone()).dist(&(y.clone() + z.clone()));
    Bound::equal(lhs, x.dist(y))
}

/// Subtractive translation invariance `dist(x - z, y - z) = dist(x, y)`.
pub fn dist_sub_right<G: NormedGroup>(x: &G, y: &G, z: &G) -> Bound {
    let lhs = (x.clone() - z.clone()).dist(&(y.clone() - z.clone()));
    Bound::equal(lhs, x.dist(y))
}

/// Subadditivity over a finite sum: `norm(Σ f) ≤ Σ norm(f)`.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::group::norm_sum_le;
/// let b = norm_sum_le([1.0_f64, -2.0, 3.0]);
/// assert_eq!(b.lhs, 2.0);
/// assert_eq!(b.rhs, 6.0);
/// assert!(b.holds(&Tolerance::EXACT));
/// ```
pub fn norm_sum_le<G, I>(terms: I) -> Bound
where
    G: NormedGroup,
    I: IntoIterator<Item = G>,
{
    let mut sum = G::zero();
    let mut norms = Vec::new();
    for t in terms {
        norms.push(t.norm());
        sum = sum + t;
    }
    Bound::le(sum.norm(), kahan_sum(&norms))
}

/// Pointwise-bounded subadditivity: if `norm(f i) ≤ b i` for every `i`
/// then `norm(Σ f) ≤ Σ b`.
///
/// Terms and bounds are zipped; extra elements on either side are ignored.
///
/// # Errors
/// [`NormError::BoundViolated`] naming the first term whose norm exceeds
/// its bound.
pub fn norm_sum_le_of_le<G, I, B>(terms: I, bounds: B) -> Result<Bound>
where
    G: NormedGroup,
    I: IntoIterator<Item = G>,
    B: IntoIterator<Item = f64>,
{
    let mut sum = G::zero();
    let mut bs = Vec::new();
    for (index, (t, b)) in terms.into_iter().zip(bounds).enumerate() {
        let norm = t.norm();
        if norm > b {
            return Err(NormError::BoundViolated {
                index,
                norm,
                bound: b,
            });
        }
        bs.push(b);
        sum = sum + t;
    }
    Ok(Bound::le(sum.norm(), kahan_sum(&bs)))
}

/// Continuity witness for the norm: `δ = ε`.
///
/// Squeezing `|norm(x) − norm(a)|` under `norm(x − a)` means any `x` within
/// `ε` of `a` has norm within `ε` of `norm(a)`.
pub fn norm_continuity_delta(eps: f64) -> Result<f64> {
    ensure_positive(eps)?;
    Ok(eps)
}

/// If `seq` stays within `eps` of `limit` from some index on, so do the
/// norms of `seq` with respect to `norm(limit)`; returns that index.
///
/// Returns `None` when `seq` itself never settles within `eps`.
///
/// # Examples
/// ```
/// use u_normed::group::tendsto_norm;
/// let seq: Vec<f64> = (1..50).map(|n| -1.0 - 1.0 / n as f64).collect();
/// assert_eq!(tendsto_norm(&seq, &-1.0, 0.1).unwrap(), Some(10));
/// ```
pub fn tendsto_norm<G: NormedGroup>(seq: &[G], limit: &G, eps: f64) -> Result<Option<usize>> {
    let delta = norm_continuity_delta(eps)?;
    Ok(eventually_within(seq, limit, delta, G::dist))
}

/// Uniform continuity witness for addition: `δ = ε / 2`.
///
/// # Examples
/// ```
/// use u_normed::group::add_uniform_delta;
/// assert_eq!(add_uniform_delta(0.2).unwrap(), 0.1);
/// assert!(add_uniform_delta(0.0).is_err());
/// ```
pub fn add_uniform_delta(eps: f64) -> Result<f64> {
    ensure_positive(eps)?;
    Ok(eps / 2.0)
}

/// Uniform continuity witness for subtraction: `δ = ε / 2`.
pub fn sub_uniform_delta(eps: f64) -> Result<f64> {
    ensure_positive(eps)?;
    Ok(eps / 2.0)
}

/// Uniform continuity witness for negation: `δ = ε`.
pub fn neg_uniform_delta(eps: f64) -> Result<f64> {
    ensure_positive(eps)?;
    Ok(eps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tolerance;
    use num_complex::Complex64;

    #[test]
    fn test_dist_is_norm_of_difference() {
        let x = 3.5_f64;
        let y = -1.5_f64;
        assert_eq!(x.dist(&y), 5.0);
        assert!(dist_eq_norm_sub(&x, &y).holds(&Tolerance::EXACT));
        assert!(dist_comm(&x, &y).holds(&Tolerance::EXACT));
    }

    #[test]
    fn test_complex_distance() {
        let x = Complex64::new(1.0, 1.0);
        let y = Complex64::new(4.0, 5.0);
        assert!((x.dist(&y) - 5.0).abs() < 1e-12);
        assert_eq!(x.nndist(&y).get(), x.dist(&y));
    }

    #[test]
    fn test_triangle_equality_case() {
        // y a nonnegative multiple of x: triangle inequality is tight
        let x = Complex64::new(1.0, 2.0);
        let y = x * 3.0;
        let b = norm_add_le(&x, &y);
        assert!(Tolerance::default().approx_eq(b.lhs, b.rhs));
    }

    #[test]
    fn test_reverse_triangle() {
        let b = abs_norm_sub_norm_le(&10.0_f64, &-4.0_f64);
        assert_eq!(b.lhs, 6.0);
        assert_eq!(b.rhs, 14.0);
    }

    #[test]
    fn test_translation_invariance() {
        let tol = Tolerance::default();
        let (x, y, z) = (1.25_f64, -7.0_f64, 100.0_f64);
        assert!(dist_add_right(&x, &y, &z).holds(&tol));
        assert!(dist_sub_right(&x, &y, &z).holds(&tol));
        assert!(dist_triangle(&x, &z, &y).holds(&tol));
    }

    #[test]
    fn test_norm_sum_empty() {
        let b = norm_sum_le(Vec::<f64>::new());
        assert_eq!((b.lhs, b.rhs), (0.0, 0.0));
    }

    #[test]
    fn test_norm_sum_le_of_le() {
        let b = norm_sum_le_of_le([1.0_f64, -2.0], [1.5, 2.0]).unwrap();
        assert_eq!(b.lhs, 1.0);
        assert_eq!(b.rhs, 3.5);
    }

    #[test]
    fn test_norm_sum_le_of_le_violation() {
        let err = norm_sum_le_of_le([1.0_f64, -3.0], [1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            NormError::BoundViolated {
                index: 1,
                norm: 3.0,
                bound: 2.0
            }
        );
    }

    #[test]
    fn test_uniform_witnesses() {
        assert_eq!(sub_uniform_delta(1.0).unwrap(), 0.5);
        assert_eq!(neg_uniform_delta(1.0).unwrap(), 1.0);
        assert_eq!(norm_continuity_delta(0.3).unwrap(), 0.3);
        assert!(neg_uniform_delta(-1.0).is_err());
    }

    #[test]
    fn test_tendsto_norm_never_settles() {
        let seq = [0.0_f64, 5.0, 0.0, 5.0];
        assert_eq!(tendsto_norm(&seq, &0.0, 1.0).unwrap(), None);
    }
}
