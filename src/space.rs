//! Normed vector spaces and normed algebras over a normed field.
//!
//! A [`NormedSpace<K>`] is a normed group with a `K`-action that scales the
//! norm exactly:
//!
//! ```text
//! norm(c • x) = norm(c) · norm(x)
//! ```
//!
//! A [`NormedAlgebra<K>`] is additionally a normed ring whose structural
//! embedding of `K` is an isometry: `norm(embed(k)) = norm(k)`.
//!
//! Joint continuity of `(c, x) ↦ c • x` is the bilinear squeeze of
//! [`crate::ring`] with the scalar in the left slot:
//! `c'•x' − c•x = c'•(x' − x) + (c' − c)•x`.

use std::marker::PhantomData;
use std::ops::{Add, Neg, Sub};

use num_traits::Zero;

use crate::error::{ensure_positive, Result};
use crate::field::NormedField;
use crate::group::NormedGroup;
use crate::norm::{Bound, Norm};
use crate::ring::{bilinear_delta, NormedRing};

/// A normed group with a norm-homogeneous scalar action of `K`.
///
/// [`crate::laws::check_normed_space`] verifies the law on samples.
pub trait NormedSpace<K: NormedField>: NormedGroup {
    /// `c • self`.
    fn smul(&self, c: &K) -> Self;
}

/// A normed ring that is a normed space over `K` through an isometric
/// embedding of `K`.
///
/// The action must agree with the embedding: `c • x = embed(c) * x`.
pub trait NormedAlgebra<K: NormedField>: NormedSpace<K> + NormedRing {
    /// The structural ring map `K → Self`.
    fn embed(k: &K) -> Self;
}

/// `norm(c • x) = norm(c) · norm(x)`.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::space::norm_smul;
/// use num_complex::Complex64;
/// let b = norm_smul(&-2.0_f64, &Complex64::new(3.0, 4.0));
/// assert!(b.holds(&Tolerance::default()));
/// assert!((b.rhs - 10.0).abs() < 1e-12);
/// ```
pub fn norm_smul<K, E>(c: &K, x: &E) -> Bound
where
    K: NormedField,
    E: NormedSpace<K>,
{
    Bound::equal(x.smul(c).norm(), c.norm() * x.norm())
}

/// `dist(c • x, c • y) = norm(c) · dist(x, y)`.
pub fn dist_smul<K, E>(c: &K, x: &E, y: &E) -> Bound
where
    K: NormedField,
    E: NormedSpace<K>,
{
    Bound::equal(x.smul(c).dist(&y.smul(c)), c.norm() * x.dist(y))
}

/// Joint continuity witness for `(c', x') ↦ c' • x'` at `(c, x)`:
/// `δ = min(1, ε / (norm(c) + norm(x) + 1))`.
pub fn smul_continuity_delta<K, E>(c: &K, x: &E, eps: f64) -> Result<f64>
where
    K: NormedField,
    E: NormedSpace<K>,
{
    ensure_positive(eps)?;
    Ok(bilinear_delta(c.norm(), x.norm(), eps))
}

/// `norm(embed(k)) = norm(k)`.
pub fn norm_embed<K, A>(k: &K) -> Bound
where
    K: NormedField,
    A: NormedAlgebra<K>,
{
    Bound::equal(A::embed(k).norm(), k.norm())
}

/// Restriction of scalars.
///
/// If `L` is a normed algebra over `K` and `E` a normed space over `L`,
/// then `E` is a normed space over `K` with `c • x = embed(c) • x`. The
/// norm is unchanged; homogeneity follows from the isometry of `embed`.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::space::{norm_smul, RestrictScalars};
/// use num_complex::Complex64;
///
/// // C² over C, viewed as a real space.
/// type C2 = u_normed::prod::Prod<Complex64, Complex64>;
/// let v: RestrictScalars<Complex64, C2> =
///     RestrictScalars::new(u_normed::prod::Prod(Complex64::new(1.0, 1.0), Complex64::new(0.0, -3.0)));
/// assert!(norm_smul(&-0.5_f64, &v).holds(&Tolerance::default()));
/// ```
#[derive(Debug)]
pub struct RestrictScalars<L, E> {
    /// The underlying vector.
    pub inner: E,
    _scalars: PhantomData<fn() -> L>,
}

impl<L, E> RestrictScalars<L, E> {
    /// Wraps a vector of an `L`-space.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            _scalars: PhantomData,
        }
    }

    /// The underlying vector.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<L, E: Clone> Clone for RestrictScalars<L, E> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<L, E: PartialEq> PartialEq for RestrictScalars<L, E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<L, E: Add<Output = E>> Add for RestrictScalars<L, E> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.inner + rhs.inner)
    }
}

impl<L, E: Sub<Output = E>> Sub for RestrictScalars<L, E> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.inner - rhs.inner)
    }
}

impl<L, E: Neg<Output = E>> Neg for RestrictScalars<L, E> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.inner)
    }
}

impl<L, E: Zero> Zero for RestrictScalars<L, E> {
    fn zero() -> Self {
        Self::new(E::zero())
    }

    fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }
}

impl<L, E: Norm> Norm for RestrictScalars<L, E> {
    fn norm(&self) -> f64 {
        self.inner.norm()
    }
}

impl<L, E: NormedGroup> NormedGroup for RestrictScalars<L, E> {}

impl<K, L, E> NormedSpace<K> for RestrictScalars<L, E>
where
    K: NormedField,
    L: NormedField + NormedAlgebra<K>,
    E: NormedSpace<L>,
{
    fn smul(&self, c: &K) -> Self {
        Self::new(self.inner.smul(&L::embed(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tolerance;
    use crate::metric::ContinuityWitness;
    use crate::prod::Prod;
    use num_complex::Complex64;

    #[test]
    fn test_reals_over_reals() {
        let tol = Tolerance::EXACT;
        assert!(norm_smul(&-3.0_f64, &2.5_f64).holds(&tol));
        assert!(dist_smul(&-3.0_f64, &2.5_f64, &1.0_f64).holds(&tol));
    }

    #[test]
    fn test_complex_over_reals_and_complex() {
        let tol = Tolerance::default();
        let x = Complex64::new(-1.0, 2.0);
        assert!(norm_smul(&0.75_f64, &x).holds(&tol));
        assert!(norm_smul(&Complex64::new(0.0, 2.0), &x).holds(&tol));
        assert!(dist_smul(&Complex64::new(1.0, 1.0), &x, &Complex64::new(3.0, 0.0)).holds(&tol));
    }

    #[test]
    fn test_embedding_is_isometric() {
        assert!(norm_embed::<f64, Complex64>(&-4.0).holds(&Tolerance::EXACT));
        assert!(norm_embed::<f64, f64>(&-4.0).holds(&Tolerance::EXACT));
        let z = Complex64::new(3.0, -4.0);
        assert!(norm_embed::<Complex64, Complex64>(&z).holds(&Tolerance::default()));
    }

    #[test]
    fn test_algebra_action_matches_embedding() {
        let x = Complex64::new(2.0, -1.0);
        let c = 1.5_f64;
        assert_eq!(NormedSpace::<f64>::smul(&x, &c), Complex64::embed(&c) * x);
    }

    #[test]
    fn test_restrict_scalars_action() {
        let v: RestrictScalars<Complex64, Complex64> =
            RestrictScalars::new(Complex64::new(1.0, 2.0));
        let w = v.smul(&2.0_f64);
        assert_eq!(w.inner, Complex64::new(2.0, 4.0));
        let u = RestrictScalars::new(Complex64::new(0.0, 1.0));
        assert!(dist_smul(&2.0_f64, &v, &u).holds(&Tolerance::default()));
    }

    #[test]
    fn test_smul_continuity() {
        let c = Complex64::new(0.0, -2.0);
        let x = Prod(Complex64::new(1.0, 0.0), Complex64::new(0.5, 0.5));
        let eps = 1e-2;
        let delta = smul_continuity_delta(&c, &x, eps).unwrap();
        let w = ContinuityWitness { eps, delta };
        let h = delta * 0.99;
        let samples = vec![
            Prod(c + h, Prod(x.0 + h, x.1 - h)),
            Prod(c - Complex64::new(0.0, h), Prod(x.0, x.1 + Complex64::new(0.0, h))),
            Prod(c, x),
        ];
        assert!(w.check_at(
            |p: &Prod<Complex64, Prod<Complex64, Complex64>>| p.1.smul(&p.0),
            &Prod(c, x),
            &samples,
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::Tolerance;
    use num_complex::Complex64;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn complex_homogeneity(
            cr in -1e3_f64..1e3,
            ci in -1e3_f64..1e3,
            xr in -1e3_f64..1e3,
            xi in -1e3_f64..1e3,
        ) {
            let c = Complex64::new(cr, ci);
            let x = Complex64::new(xr, xi);
            prop_assert!(norm_smul(&c, &x).holds(&Tolerance::default()));
            prop_assert!(norm_smul(&cr, &x).holds(&Tolerance::default()));
        }
    }
}
