//! Registration-time law checks.
//!
//! Every trait in the hierarchy carries obligations that the type system
//! cannot see: the triangle inequality, submultiplicativity, the isometry of
//! an algebra embedding, and so on. The `check_*` functions evaluate those
//! obligations on caller-supplied samples; the `register_*` functions draw
//! the samples from [`crate::random`] according to a [`LawConfig`] and are
//! what a carrier's tests call once per instance.
//!
//! Each layer's check runs the checks of every layer below it, so
//! `register_nondiscrete_field::<K>` covers the group, ring and field laws
//! of `K` as well.
//!
//! # Examples
//! ```
//! use u_normed::config::LawConfig;
//! use u_normed::laws;
//! use u_normed::prod::Prod;
//!
//! laws::register_normed_space::<f64, Prod<f64, f64>>(&LawConfig::default()).unwrap();
//! ```

use std::any::type_name;
use std::fmt::Debug;
use std::num::NonZeroU32;

use num_traits::{One, Zero};
use tracing::{debug, warn};

use crate::config::{LawConfig, Tolerance};
use crate::error::{NormError, Result};
use crate::field::{self, NondiscreteNormedField, NormedField};
use crate::group::{self, NormedGroup};
use crate::metric::InducedMetric;
use crate::norm::Bound;
use crate::random::{sample_vec, Sample};
use crate::ring::{self, NormedRing};
use crate::space::{self, NormedAlgebra, NormedSpace};

/// Radii the nondiscrete search check is run at.
const SEARCH_RADII: [f64; 6] = [1e-12, 1e-3, 0.5, 1.0, 7.0, 1e9];

fn require(
    law: &'static str,
    bound: Bound,
    tol: &Tolerance,
    at: impl FnOnce() -> String,
) -> Result<()> {
    if bound.holds(tol) {
        Ok(())
    } else {
        Err(NormError::law(law, format!("{} at {}", bound, at())))
    }
}

fn logged<T>(layer: &'static str, samples: usize, result: Result<()>) -> Result<()> {
    match &result {
        Ok(()) => debug!(carrier = type_name::<T>(), layer, samples, "laws hold"),
        Err(e) => warn!(carrier = type_name::<T>(), layer, error = %e, "law violated"),
    }
    result
}

fn group_laws<G: NormedGroup + Debug + 'static>(samples: &[G], tol: &Tolerance) -> Result<()> {
    InducedMetric::<G>::of().verify(samples, tol)?;
    for x in samples {
        for y in samples {
            require("dist_eq_norm_sub", group::dist_eq_norm_sub(x, y), tol, || {
                format!("x = {x:?}, y = {y:?}")
            })?;
            require("norm_sub_le", group::norm_sub_le(x, y), tol, || {
                format!("x = {x:?}, y = {y:?}")
            })?;
            require("abs_norm_sub_norm_le", group::abs_norm_sub_norm_le(x, y), tol, || {
                format!("x = {x:?}, y = {y:?}")
            })?;
        }
    }
    Ok(())
}

/// Group laws: the four norm axioms, the induced metric axioms, and the
/// derived inequalities of [`crate::group`].
///
/// # Errors
/// [`NormError::LawViolation`] naming the first law that fails.
pub fn check_normed_group<G: NormedGroup + Debug + 'static>(
    samples: &[G],
    tol: &Tolerance,
) -> Result<()> {
    logged::<G>("group", samples.len(), group_laws(samples, tol))
}

fn ring_laws<R: NormedRing + Debug + 'static>(samples: &[R], tol: &Tolerance) -> Result<()> {
    group_laws(samples, tol)?;
    for a in samples {
        for b in samples {
            require("norm_mul_le", ring::norm_mul_le(a, b), tol, || {
                format!("a = {a:?}, b = {b:?}")
            })?;
        }
        for n in (2..=3).filter_map(NonZeroU32::new) {
            require("norm_pow_le", ring::norm_pow_le(a, n), tol, || {
                format!("a = {a:?}, n = {n}")
            })?;
        }
    }
    Ok(())
}

/// Ring laws: group laws plus submultiplicativity and its power form.
///
/// # Errors
/// [`NormError::LawViolation`] naming the first law that fails.
pub fn check_normed_ring<R: NormedRing + Debug + 'static>(
    samples: &[R],
    tol: &Tolerance,
) -> Result<()> {
    logged::<R>("ring", samples.len(), ring_laws(samples, tol))
}

fn field_laws<K: NormedField + Debug + 'static>(samples: &[K], tol: &Tolerance) -> Result<()> {
    ring_laws(samples, tol)?;
    require("norm_one", field::norm_one::<K>(), tol, String::new)?;
    for a in samples {
        require("norm_inv", field::norm_inv(a), tol, || format!("a = {a:?}"))?;
        for n in -3..=3 {
            require("norm_zpow", field::norm_zpow(a, n), tol, || {
                format!("a = {a:?}, n = {n}")
            })?;
        }
        for b in samples {
            require("norm_mul_eq", field::norm_mul_eq(a, b), tol, || {
                format!("a = {a:?}, b = {b:?}")
            })?;
            require("norm_div", field::norm_div(a, b), tol, || {
                format!("a = {a:?}, b = {b:?}")
            })?;
        }
    }
    Ok(())
}

/// Field laws: ring laws plus multiplicativity and its consequences for
/// `1`, inverses, quotients and integer powers.
///
/// # Errors
/// [`NormError::LawViolation`] naming the first law that fails.
pub fn check_normed_field<K: NormedField + Debug + 'static>(
    samples: &[K],
    tol: &Tolerance,
) -> Result<()> {
    logged::<K>("field", samples.len(), field_laws(samples, tol))
}

fn nondiscrete_laws<K: NondiscreteNormedField + Debug + 'static>(
    samples: &[K],
    tol: &Tolerance,
) -> Result<()> {
    field_laws(samples, tol)?;
    let c = K::non_trivial();
    require("non_trivial", Bound::lt(1.0, c.norm()), &Tolerance::EXACT, || {
        format!("c = {c:?}")
    })?;
    for r in SEARCH_RADII {
        let big = field::exists_norm_gt::<K>(r)?;
        require("exists_norm_gt", big.bound, &Tolerance::EXACT, || format!("r = {r}"))?;
        let small = field::exists_norm_lt::<K>(r)?;
        require("exists_norm_lt", small.bound, &Tolerance::EXACT, || format!("r = {r}"))?;
        if small.value.is_zero() {
            return Err(NormError::law("exists_norm_lt", format!("zero witness for r = {r}")));
        }
    }
    Ok(())
}

/// Nondiscrete field laws: field laws, a witness of norm `> 1`, and the
/// large/small element searches at a spread of radii.
///
/// # Errors
/// [`NormError::LawViolation`] naming the first law that fails, or the
/// search error itself.
pub fn check_nondiscrete_field<K: NondiscreteNormedField + Debug + 'static>(
    samples: &[K],
    tol: &Tolerance,
) -> Result<()> {
    logged::<K>("nondiscrete field", samples.len(), nondiscrete_laws(samples, tol))
}

fn space_laws<K, E>(scalars: &[K], vectors: &[E], tol: &Tolerance) -> Result<()>
where
    K: NormedField + Debug + 'static,
    E: NormedSpace<K> + Debug + 'static,
{
    group_laws(vectors, tol)?;
    for x in vectors {
        let unit = x.smul(&K::one());
        require("one_smul", Bound::le(unit.dist(x), 0.0), tol, || format!("x = {x:?}"))?;
        for c in scalars {
            require("norm_smul", space::norm_smul(c, x), tol, || {
                format!("c = {c:?}, x = {x:?}")
            })?;
            for y in vectors {
                require("dist_smul", space::dist_smul(c, x, y), tol, || {
                    format!("c = {c:?}, x = {x:?}, y = {y:?}")
                })?;
            }
        }
    }
    Ok(())
}

/// Space laws: group laws on the vectors plus `norm(c • x) = norm(c) · norm(x)`.
///
/// # Errors
/// [`NormError::LawViolation`] naming the first law that fails.
pub fn check_normed_space<K, E>(scalars: &[K], vectors: &[E], tol: &Tolerance) -> Result<()>
where
    K: NormedField + Debug + 'static,
    E: NormedSpace<K> + Debug + 'static,
{
    logged::<E>("space", vectors.len(), space_laws(scalars, vectors, tol))
}

fn algebra_laws<K, A>(scalars: &[K], elements: &[A], tol: &Tolerance) -> Result<()>
where
    K: NormedField + Debug + 'static,
    A: NormedAlgebra<K> + Debug + 'static,
{
    space_laws(scalars, elements, tol)?;
    ring_laws(elements, tol)?;
    for k in scalars {
        require("norm_embed", space::norm_embed::<K, A>(k), tol, || format!("k = {k:?}"))?;
        let e = A::embed(k);
        for x in elements {
            let gap = x.smul(k).dist(&(e.clone() * x.clone()));
            require("smul_eq_embed_mul", Bound::le(gap, 0.0), tol, || {
                format!("k = {k:?}, x = {x:?}")
            })?;
        }
    }
    Ok(())
}

/// Algebra laws: space and ring laws plus the isometric embedding and its
/// agreement with the scalar action.
///
/// # Errors
/// [`NormError::LawViolation`] naming the first law that fails.
pub fn check_normed_algebra<K, A>(scalars: &[K], elements: &[A], tol: &Tolerance) -> Result<()>
where
    K: NormedField + Debug + 'static,
    A: NormedAlgebra<K> + Debug + 'static,
{
    logged::<A>("algebra", elements.len(), algebra_laws(scalars, elements, tol))
}

// ============================================================================
// Randomized registration
// ============================================================================

fn draw<T: Sample + Zero>(cfg: &LawConfig, stream: u64) -> Vec<T> {
    let mut xs: Vec<T> = sample_vec(cfg.samples, cfg.seed.wrapping_add(stream), cfg.scale);
    xs.push(T::zero());
    xs
}

fn draw_with_one<T: Sample + Zero + One>(cfg: &LawConfig, stream: u64) -> Vec<T> {
    let mut xs = draw(cfg, stream);
    xs.push(T::one());
    xs
}

/// Registers `G` as a normed group after checking its laws on random samples.
///
/// # Errors
/// [`NormError::LawViolation`] for the first violated law.
pub fn register_normed_group<G: NormedGroup + Sample + Debug + 'static>(
    cfg: &LawConfig,
) -> Result<()> {
    check_normed_group(&draw::<G>(cfg, 0), &cfg.tolerance)
}

/// Registers `R` as a normed ring.
///
/// # Errors
/// [`NormError::LawViolation`] for the first violated law.
pub fn register_normed_ring<R: NormedRing + Sample + Debug + 'static>(
    cfg: &LawConfig,
) -> Result<()> {
    check_normed_ring(&draw_with_one::<R>(cfg, 0), &cfg.tolerance)
}

/// Registers `K` as a normed field.
///
/// # Errors
/// [`NormError::LawViolation`] for the first violated law.
pub fn register_normed_field<K: NormedField + Sample + Debug + 'static>(
    cfg: &LawConfig,
) -> Result<()> {
    check_normed_field(&draw_with_one::<K>(cfg, 0), &cfg.tolerance)
}

/// Registers `K` as a nondiscrete normed field.
///
/// # Errors
/// [`NormError::LawViolation`] for the first violated law.
pub fn register_nondiscrete_field<K: NondiscreteNormedField + Sample + Debug + 'static>(
    cfg: &LawConfig,
) -> Result<()> {
    check_nondiscrete_field(&draw_with_one::<K>(cfg, 0), &cfg.tolerance)
}

/// Registers `E` as a normed space over `K`.
///
/// # Errors
/// [`NormError::LawViolation`] for the first violated law.
pub fn register_normed_space<K, E>(cfg: &LawConfig) -> Result<()>
where
    K: NormedField + Sample + Debug + 'static,
    E: NormedSpace<K> + Sample + Debug + 'static,
{
    let scalars = draw_with_one::<K>(cfg, 1);
    check_normed_space(&scalars, &draw::<E>(cfg, 0), &cfg.tolerance)
}

/// Registers `A` as a normed algebra over `K`.
///
/// # Errors
/// [`NormError::LawViolation`] for the first violated law.
pub fn register_normed_algebra<K, A>(cfg: &LawConfig) -> Result<()>
where
    K: NormedField + Sample + Debug + 'static,
    A: NormedAlgebra<K> + Sample + Debug + 'static,
{
    let scalars = draw_with_one::<K>(cfg, 1);
    check_normed_algebra(&scalars, &draw_with_one::<A>(cfg, 0), &cfg.tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::norm::Norm;
    use crate::prod::{Pi, Prod};
    use num_complex::Complex64;
    use rand::Rng;
    use std::ops::{Add, Neg, Sub};

    /// Squared absolute value: positive definite and symmetric, but not
    /// subadditive.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Squared(f64);

    impl Add for Squared {
        type Output = Self;
        fn add(self, rhs: Self) -> Self {
            Squared(self.0 + rhs.0)
        }
    }

    impl Sub for Squared {
        type Output = Self;
        fn sub(self, rhs: Self) -> Self {
            Squared(self.0 - rhs.0)
        }
    }

    impl Neg for Squared {
        type Output = Self;
        fn neg(self) -> Self {
            Squared(-self.0)
        }
    }

    impl Zero for Squared {
        fn zero() -> Self {
            Squared(0.0)
        }
        fn is_zero(&self) -> bool {
            self.0 == 0.0
        }
    }

    impl Norm for Squared {
        fn norm(&self) -> f64 {
            self.0 * self.0
        }
    }

    impl NormedGroup for Squared {}

    impl Sample for Squared {
        fn sample<R: Rng>(rng: &mut R, scale: f64) -> Self {
            Squared(f64::sample(rng, scale))
        }
    }

    #[test]
    fn test_rejects_non_subadditive_norm() {
        let tol = Tolerance::default();
        let err = check_normed_group(&[Squared(1.0), Squared(1.0)], &tol).unwrap_err();
        assert!(matches!(err, NormError::LawViolation { law: "norm_add_le", .. }));
        assert!(register_normed_group::<Squared>(&LawConfig::default()).is_err());
    }

    /// Reals whose scalar action overshoots by a factor of two.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Overscaled(f64);

    impl Add for Overscaled {
        type Output = Self;
        fn add(self, rhs: Self) -> Self {
            Overscaled(self.0 + rhs.0)
        }
    }

    impl Sub for Overscaled {
        type Output = Self;
        fn sub(self, rhs: Self) -> Self {
            Overscaled(self.0 - rhs.0)
        }
    }

    impl Neg for Overscaled {
        type Output = Self;
        fn neg(self) -> Self {
            Overscaled(-self.0)
        }
    }

    impl Zero for Overscaled {
        fn zero() -> Self {
            Overscaled(0.0)
        }
        fn is_zero(&self) -> bool {
            self.0 == 0.0
        }
    }

    impl Norm for Overscaled {
        fn norm(&self) -> f64 {
            self.0.abs()
        }
    }

    impl NormedGroup for Overscaled {}

    impl NormedSpace<f64> for Overscaled {
        fn smul(&self, c: &f64) -> Self {
            Overscaled(2.0 * c * self.0)
        }
    }

    #[test]
    fn test_rejects_bad_scaling() {
        let tol = Tolerance::default();
        let vectors = [Overscaled(1.5), Overscaled(-3.0)];
        assert!(check_normed_group(&vectors, &tol).is_ok());
        let err = check_normed_space(&[0.5_f64], &vectors, &tol).unwrap_err();
        assert!(matches!(err, NormError::LawViolation { law: "one_smul", .. }));
    }

    #[test]
    fn test_space_registrations() {
        let cfg = LawConfig::default();
        register_normed_space::<f64, Pi<f64, 3>>(&cfg).unwrap();
        register_normed_space::<Complex64, Prod<Complex64, Complex64>>(&cfg).unwrap();
        register_normed_space::<f64, Prod<Complex64, Pi<f64, 2>>>(&cfg).unwrap();
    }

    #[test]
    fn test_field_registration_small_config() {
        let cfg = LawConfig {
            samples: 4,
            seed: 7,
            ..LawConfig::default()
        };
        register_normed_field::<f64>(&cfg).unwrap();
        register_normed_group::<Complex64>(&cfg).unwrap();
    }

    #[test]
    fn test_config_from_json() {
        let cfg: LawConfig = serde_json::from_str(r#"{ "samples": 6, "seed": 99 }"#).unwrap();
        assert_eq!(cfg.scale, 100.0);
        register_nondiscrete_field::<Complex64>(&cfg).unwrap();
    }
}
