//! Sup-norm combinators: binary products and finite indexed products.
//!
//! Both [`Prod<A, B>`] and [`Pi<A, N>`] take the supremum of their
//! component norms through the single routine [`sup_norm`], and inherit every
//! layer their components carry:
//!
//! | Layer | Why the law survives the supremum |
//! |---|---|
//! | group | `max(‖a+a'‖, ‖b+b'‖) ≤ max(‖a‖+‖a'‖, ‖b‖+‖b'‖) ≤ max(‖a‖,‖b‖) + max(‖a'‖,‖b'‖)` |
//! | ring | `‖aa'‖ ≤ ‖a‖‖a'‖ ≤ max(‖a‖,‖b‖) · max(‖a'‖,‖b'‖)` for every component |
//! | space | `max(‖c‖‖a‖, ‖c‖‖b‖) = ‖c‖ · max(‖a‖, ‖b‖)` since `‖c‖ ≥ 0` |
//! | algebra | `max(‖embed k‖, ‖embed k‖) = ‖k‖` |
//!
//! Products of fields are not fields, so no field layer is provided.
//!
//! For `Pi<A, 0>` the norm is `0`, hence `norm(1) = 0`: ring laws still hold
//! but the algebra isometry needs `N ≥ 1`.

use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::field::NormedField;
use crate::group::NormedGroup;
use crate::norm::{Bound, Norm};
use crate::ring::NormedRing;
use crate::space::{NormedAlgebra, NormedSpace};

/// Supremum of finitely many norms; `0` for an empty family.
///
/// # Examples
/// ```
/// use u_normed::prod::sup_norm;
/// assert_eq!(sup_norm([1.0, 4.0, 2.5]), 4.0);
/// assert_eq!(sup_norm(std::iter::empty()), 0.0);
/// ```
pub fn sup_norm<I: IntoIterator<Item = f64>>(norms: I) -> f64 {
    norms.into_iter().fold(0.0, f64::max)
}

// ============================================================================
// Binary product
// ============================================================================

/// Binary product with the max norm.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::group::norm_add_le;
/// use u_normed::norm::Norm;
/// use u_normed::prod::Prod;
/// let x = Prod(3.0_f64, -4.0_f64);
/// let y = Prod(-1.0_f64, 0.5_f64);
/// assert_eq!(x.norm(), 4.0);
/// assert!(norm_add_le(&x, &y).holds(&Tolerance::EXACT));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Prod<A, B>(pub A, pub B);

impl<A: Add<Output = A>, B: Add<Output = B>> Add for Prod<A, B> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Prod(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl<A: Sub<Output = A>, B: Sub<Output = B>> Sub for Prod<A, B> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Prod(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl<A: Neg<Output = A>, B: Neg<Output = B>> Neg for Prod<A, B> {
    type Output = Self;
    fn neg(self) -> Self {
        Prod(-self.0, -self.1)
    }
}

impl<A: Mul<Output = A>, B: Mul<Output = B>> Mul for Prod<A, B> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Prod(self.0 * rhs.0, self.1 * rhs.1)
    }
}

impl<A: Zero, B: Zero> Zero for Prod<A, B> {
    fn zero() -> Self {
        Prod(A::zero(), B::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero() && self.1.is_zero()
    }
}

impl<A: One, B: One> One for Prod<A, B> {
    fn one() -> Self {
        Prod(A::one(), B::one())
    }
}

impl<A: Norm, B: Norm> Norm for Prod<A, B> {
    fn norm(&self) -> f64 {
        sup_norm([self.0.norm(), self.1.norm()])
    }
}

impl<A: NormedGroup, B: NormedGroup> NormedGroup for Prod<A, B> {}

impl<A: NormedRing, B: NormedRing> NormedRing for Prod<A, B> {}

impl<K, A, B> NormedSpace<K> for Prod<A, B>
where
    K: NormedField,
    A: NormedSpace<K>,
    B: NormedSpace<K>,
{
    fn smul(&self, c: &K) -> Self {
        Prod(self.0.smul(c), self.1.smul(c))
    }
}

impl<K, A, B> NormedAlgebra<K> for Prod<A, B>
where
    K: NormedField,
    A: NormedAlgebra<K>,
    B: NormedAlgebra<K>,
{
    fn embed(k: &K) -> Self {
        Prod(A::embed(k), B::embed(k))
    }
}

/// `norm(x.0) ≤ norm(x)`.
pub fn norm_fst_le<A: Norm, B: Norm>(x: &Prod<A, B>) -> Bound {
    Bound::le(x.0.norm(), x.norm())
}

/// `norm(x.1) ≤ norm(x)`.
pub fn norm_snd_le<A: Norm, B: Norm>(x: &Prod<A, B>) -> Bound {
    Bound::le(x.1.norm(), x.norm())
}

// ============================================================================
// Finite indexed product
// ============================================================================

/// Finite indexed product `A^N` with the sup norm.
///
/// # Examples
/// ```
/// use u_normed::norm::Norm;
/// use u_normed::prod::{pi_norm_le_iff, Pi};
/// let x = Pi([1.0_f64, -7.0, 3.0]);
/// assert_eq!(x.norm(), 7.0);
/// assert!(pi_norm_le_iff(&x, 7.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pi<A, const N: usize>(pub [A; N]);

impl<A, const N: usize> Pi<A, N> {
    /// Builds the family `i ↦ f(i)`.
    pub fn from_fn(f: impl FnMut(usize) -> A) -> Self {
        Pi(std::array::from_fn(f))
    }

    /// Componentwise combination of two families.
    fn zip_with(&self, rhs: &Self, f: impl Fn(A, A) -> A) -> Self
    where
        A: Clone,
    {
        Pi::from_fn(|i| f(self.0[i].clone(), rhs.0[i].clone()))
    }
}

impl<A: Clone + Add<Output = A>, const N: usize> Add for Pi<A, N> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl<A: Clone + Sub<Output = A>, const N: usize> Sub for Pi<A, N> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl<A: Neg<Output = A>, const N: usize> Neg for Pi<A, N> {
    type Output = Self;
    fn neg(self) -> Self {
        Pi(self.0.map(|a| -a))
    }
}

impl<A: Clone + Mul<Output = A>, const N: usize> Mul for Pi<A, N> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a * b)
    }
}

impl<A: Clone + Zero, const N: usize> Zero for Pi<A, N> {
    fn zero() -> Self {
        Pi::from_fn(|_| A::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.iter().all(Zero::is_zero)
    }
}

impl<A: Clone + One, const N: usize> One for Pi<A, N> {
    fn one() -> Self {
        Pi::from_fn(|_| A::one())
    }
}

impl<A: Norm, const N: usize> Norm for Pi<A, N> {
    fn norm(&self) -> f64 {
        sup_norm(self.0.iter().map(Norm::norm))
    }
}

impl<A: NormedGroup, const N: usize> NormedGroup for Pi<A, N> {}

impl<A: NormedRing, const N: usize> NormedRing for Pi<A, N> {}

impl<K, A, const N: usize> NormedSpace<K> for Pi<A, N>
where
    K: NormedField,
    A: NormedSpace<K>,
{
    fn smul(&self, c: &K) -> Self {
        Pi::from_fn(|i| self.0[i].smul(c))
    }
}

impl<K, A, const N: usize> NormedAlgebra<K> for Pi<A, N>
where
    K: NormedField,
    A: NormedAlgebra<K>,
{
    fn embed(k: &K) -> Self {
        Pi::from_fn(|_| A::embed(k))
    }
}

/// `norm(x[i]) ≤ norm(x)`.
///
/// # Panics
/// If `i ≥ N`.
pub fn norm_le_pi_norm<A: Norm, const N: usize>(x: &Pi<A, N>, i: usize) -> Bound {
    Bound::le(x.0[i].norm(), x.norm())
}

/// For `r ≥ 0`: `norm(x) ≤ r` iff every component has norm `≤ r`.
///
/// Returns whether the bound holds; both sides of the equivalence are
/// evaluated and must agree.
pub fn pi_norm_le_iff<A: Norm, const N: usize>(x: &Pi<A, N>, r: f64) -> bool {
    let whole = x.norm() <= r;
    let componentwise = x.0.iter().all(|a| a.norm() <= r);
    debug_assert!(r < 0.0 || whole == componentwise);
    whole && componentwise
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LawConfig, Tolerance};
    use crate::group::norm_add_le;
    use crate::laws;
    use crate::ring::norm_mul_le;
    use crate::space::{norm_embed, norm_smul};
    use num_bigint::BigInt;
    use num_complex::Complex64;

    #[test]
    fn test_product_sup_norm() {
        let a = Prod(2.0_f64, Complex64::new(0.0, -5.0));
        let b = Prod(-6.0_f64, Complex64::new(1.0, 1.0));
        assert_eq!(a.norm(), 5.0);
        assert_eq!(b.norm(), 6.0);
        let t = norm_add_le(&a, &b);
        assert!(t.holds(&Tolerance::default()));
        assert!(norm_fst_le(&a).holds(&Tolerance::EXACT));
        assert!(norm_snd_le(&a).holds(&Tolerance::EXACT));
    }

    #[test]
    fn test_product_dist_is_max_of_dists() {
        let a = Prod(1.0_f64, 10.0_f64);
        let b = Prod(4.0_f64, 9.0_f64);
        assert_eq!(a.dist(&b), 3.0);
    }

    #[test]
    fn test_product_ring_and_algebra() {
        let tol = Tolerance::default();
        let a = Prod(Complex64::new(1.0, 2.0), -3.0_f64);
        let b = Prod(Complex64::new(0.5, 0.0), 0.25_f64);
        assert!(norm_mul_le(&a, &b).holds(&tol));
        assert!(norm_smul(&-2.0_f64, &a).holds(&tol));
        assert!(norm_embed::<f64, Prod<Complex64, f64>>(&-7.5).holds(&Tolerance::EXACT));
    }

    #[test]
    fn test_pi_componentwise_bounds() {
        let x = Pi([Complex64::new(3.0, 4.0), Complex64::new(0.0, 1.0)]);
        assert_eq!(x.norm(), 5.0);
        assert!(norm_le_pi_norm(&x, 1).holds(&Tolerance::EXACT));
        assert!(pi_norm_le_iff(&x, 5.0));
        assert!(!pi_norm_le_iff(&x, 4.9));
    }

    #[test]
    fn test_pi_empty() {
        let x: Pi<f64, 0> = Pi([]);
        assert_eq!(x.norm(), 0.0);
        assert!(x.is_zero());
        assert_eq!(Pi::<f64, 0>::one().norm(), 0.0);
    }

    #[test]
    fn test_pi_arith() {
        let x = Pi([1.0_f64, 2.0, 3.0]);
        let y = Pi([0.5_f64, -2.0, 1.0]);
        assert_eq!(x + y, Pi([1.5, 0.0, 4.0]));
        assert_eq!(x - y, Pi([0.5, 4.0, 2.0]));
        assert_eq!(x * y, Pi([0.5, -4.0, 3.0]));
        assert_eq!(-y, Pi([-0.5, 2.0, -1.0]));
        assert_eq!(x.smul(&2.0_f64), Pi([2.0, 4.0, 6.0]));
    }

    #[test]
    fn test_combinators_register() {
        let cfg = LawConfig::default();
        laws::register_normed_algebra::<f64, Prod<f64, Complex64>>(&cfg).unwrap();
        laws::register_normed_algebra::<Complex64, Pi<Complex64, 3>>(&cfg).unwrap();
        laws::register_normed_ring::<Pi<BigInt, 2>>(&LawConfig {
            scale: 1e4,
            ..cfg
        })
        .unwrap();
    }

    #[test]
    fn test_nested_products() {
        let x = Prod(Pi([1.0_f64, -9.0]), Prod(2.0_f64, Complex64::new(0.0, 4.0)));
        assert_eq!(x.norm(), 9.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::Tolerance;
    use crate::group::norm_add_le;
    use crate::ring::norm_mul_le;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn prod_norm_is_max(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            prop_assert_eq!(Prod(a, b).norm(), a.abs().max(b.abs()));
        }

        #[test]
        fn pi_triangle_and_submult(
            xs in proptest::array::uniform4(-1e3_f64..1e3),
            ys in proptest::array::uniform4(-1e3_f64..1e3),
        ) {
            let (x, y) = (Pi(xs), Pi(ys));
            prop_assert!(norm_add_le(&x, &y).holds(&Tolerance::default()));
            prop_assert!(norm_mul_le(&x, &y).holds(&Tolerance::default()));
        }
    }
}
