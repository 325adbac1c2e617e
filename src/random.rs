//! Seeded sampling of carrier elements.
//!
//! Registration checks in [`crate::laws`] evaluate every law on random
//! elements of the carrier. [`Sample`] draws one element of a carrier with
//! magnitude up to a given scale; products sample componentwise.
//!
//! # Reproducibility
//!
//! Use [`create_rng`] with a fixed seed. The underlying algorithm
//! (SmallRng) is deterministic for a given seed on the same platform, so a
//! failing registration can be replayed exactly.

use num_bigint::BigInt;
use num_complex::Complex64;
use rand::Rng;

use crate::prod::{Pi, Prod};

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
///
/// # Examples
/// ```
/// use u_normed::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Carriers that can be sampled for law checks.
pub trait Sample: Sized {
    /// Draws an element with norm at most (roughly) `scale`.
    fn sample<R: Rng>(rng: &mut R, scale: f64) -> Self;
}

impl Sample for f64 {
    fn sample<R: Rng>(rng: &mut R, scale: f64) -> f64 {
        rng.random_range(-scale..=scale)
    }
}

impl Sample for Complex64 {
    fn sample<R: Rng>(rng: &mut R, scale: f64) -> Complex64 {
        let r = rng.random_range(0.0..=scale);
        let theta = rng.random_range(0.0..std::f64::consts::TAU);
        Complex64::from_polar(r, theta)
    }
}

impl Sample for BigInt {
    fn sample<R: Rng>(rng: &mut R, scale: f64) -> BigInt {
        let bound = scale.clamp(0.0, 2f64.powi(52)) as i64;
        BigInt::from(rng.random_range(-bound..=bound))
    }
}

impl<A: Sample, B: Sample> Sample for Prod<A, B> {
    fn sample<R: Rng>(rng: &mut R, scale: f64) -> Self {
        let a = A::sample(rng, scale);
        let b = B::sample(rng, scale);
        Prod(a, b)
    }
}

impl<A: Sample, const N: usize> Sample for Pi<A, N> {
    fn sample<R: Rng>(rng: &mut R, scale: f64) -> Self {
        Pi(std::array::from_fn(|_| A::sample(rng, scale)))
    }
}

/// Draws `n` samples from a fresh generator seeded with `seed`.
///
/// Small elements matter as much as large ones for the norm laws, so the
/// scale of each draw is itself spread over `[scale·10⁻⁶, scale]` on a log
/// scale.
///
/// # Examples
/// ```
/// use u_normed::random::sample_vec;
/// let xs: Vec<f64> = sample_vec(16, 7, 10.0);
/// assert_eq!(xs.len(), 16);
/// assert!(xs.iter().all(|x| x.abs() <= 10.0));
/// assert_eq!(xs, sample_vec::<f64>(16, 7, 10.0));
/// ```
pub fn sample_vec<T: Sample>(n: usize, seed: u64, scale: f64) -> Vec<T> {
    let mut rng = create_rng(seed);
    (0..n)
        .map(|_| {
            let decades: f64 = rng.random_range(0.0..=6.0);
            T::sample(&mut rng, scale * 10f64.powf(-decades))
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn samples_respect_scale(seed in 0_u64..10000, scale in 1e-3_f64..1e6) {
            let xs: Vec<f64> = sample_vec(16, seed, scale);
            prop_assert!(xs.iter().all(|x| x.abs() <= scale));
        }
    }
}
