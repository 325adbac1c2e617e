//! Registrations of the concrete number systems.
//!
//! | Carrier | Norm | Layers |
//! |---|---|---|
//! | `f64` | `|x|` | nondiscrete field; space and algebra over `f64` |
//! | `Complex64` | modulus | nondiscrete field; space and algebra over `f64` and itself |
//! | `BigInt` | `|n|`, rounded to `f64` | ring |
//!
//! The numeric types themselves come from `core`, `num-complex` and
//! `num-bigint`; this module only attaches norms to them. Integers use the
//! arbitrary-precision `BigInt` so that the group operations never
//! overflow. Each registration is checked by the
//! tests below through [`crate::laws`].

use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::ToPrimitive;

use crate::field::{real_inv, NondiscreteNormedField, NormedField};
use crate::group::NormedGroup;
use crate::norm::Norm;
use crate::ring::NormedRing;
use crate::space::{NormedAlgebra, NormedSpace};

// ============================================================================
// Reals
// ============================================================================

impl Norm for f64 {
    fn norm(&self) -> f64 {
        self.abs()
    }
}

impl NormedGroup for f64 {}
impl NormedRing for f64 {}

impl NormedField for f64 {
    fn inverse(&self) -> f64 {
        real_inv(*self)
    }
}

impl NondiscreteNormedField for f64 {
    fn non_trivial() -> f64 {
        2.0
    }
}

impl NormedSpace<f64> for f64 {
    fn smul(&self, c: &f64) -> f64 {
        c * self
    }
}

impl NormedAlgebra<f64> for f64 {
    fn embed(k: &f64) -> f64 {
        *k
    }
}

// ============================================================================
// Complex numbers
// ============================================================================

impl Norm for Complex64 {
    fn norm(&self) -> f64 {
        // `hypot`, avoiding overflow in re² + im²
        Complex64::norm(*self)
    }
}

impl NormedGroup for Complex64 {}
impl NormedRing for Complex64 {}

impl NormedField for Complex64 {
    fn inverse(&self) -> Complex64 {
        if *self == Complex64::new(0.0, 0.0) {
            *self
        } else {
            self.finv()
        }
    }
}

impl NondiscreteNormedField for Complex64 {
    fn non_trivial() -> Complex64 {
        Complex64::new(2.0, 0.0)
    }
}

impl NormedSpace<f64> for Complex64 {
    fn smul(&self, c: &f64) -> Complex64 {
        *self * *c
    }
}

impl NormedSpace<Complex64> for Complex64 {
    fn smul(&self, c: &Complex64) -> Complex64 {
        *c * *self
    }
}

impl NormedAlgebra<f64> for Complex64 {
    fn embed(k: &f64) -> Complex64 {
        Complex64::new(*k, 0.0)
    }
}

impl NormedAlgebra<Complex64> for Complex64 {
    fn embed(k: &Complex64) -> Complex64 {
        *k
    }
}

// ============================================================================
// Integers
// ============================================================================

impl Norm for BigInt {
    /// `|n|` rounded to the nearest `f64`; `inf` past `f64::MAX`.
    fn norm(&self) -> f64 {
        self.magnitude().to_f64().unwrap_or(f64::INFINITY)
    }
}

impl NormedGroup for BigInt {}
impl NormedRing for BigInt {}

#[cfg(test)]
mod tests {
    use crate::config::{LawConfig, Tolerance};
    use crate::group::NormedGroup;
    use crate::laws;
    use crate::norm::Norm;
    use num_bigint::BigInt;
    use num_complex::Complex64;

    #[test]
    fn test_reals_register() {
        let cfg = LawConfig::default();
        laws::register_nondiscrete_field::<f64>(&cfg).unwrap();
        laws::register_normed_algebra::<f64, f64>(&cfg).unwrap();
    }

    #[test]
    fn test_complex_register() {
        let cfg = LawConfig::default();
        laws::register_nondiscrete_field::<Complex64>(&cfg).unwrap();
        laws::register_normed_algebra::<f64, Complex64>(&cfg).unwrap();
        laws::register_normed_algebra::<Complex64, Complex64>(&cfg).unwrap();
    }

    #[test]
    fn test_integers_register() {
        let cfg = LawConfig {
            scale: 1e4,
            tolerance: Tolerance::EXACT,
            ..LawConfig::default()
        };
        laws::register_normed_ring::<BigInt>(&cfg).unwrap();
    }

    #[test]
    fn test_complex_inverse_uses_modulus() {
        use crate::field::NormedField;
        let z = Complex64::new(3.0, 4.0);
        let w = z.inverse();
        assert!((w - Complex64::new(0.12, -0.16)).norm() < 1e-15);
    }

    #[test]
    fn test_integer_norm_extremes() {
        assert_eq!(Norm::norm(&BigInt::from(i64::MIN)), 9.223372036854775808e18);
        assert_eq!(Norm::norm(&BigInt::from(-5)), 5.0);
        let huge = BigInt::from(1) << 2000_u32;
        assert_eq!(Norm::norm(&huge), f64::INFINITY);
    }

    #[test]
    fn test_integer_group_past_machine_range() {
        let max = BigInt::from(i64::MAX);
        let minus_one = BigInt::from(-1);
        assert_eq!(max.dist(&minus_one), 2f64.powi(63));
        assert_eq!(max.clone() - minus_one.clone(), BigInt::from(i64::MAX) + BigInt::from(1));
        let tol = Tolerance::EXACT;
        let min = BigInt::from(i64::MIN);
        assert!(crate::group::norm_add_le(&min, &min).holds(&tol));
        assert!(crate::group::norm_sub_le(&max, &min).holds(&tol));
        assert!(crate::ring::norm_mul_le(&max, &min).holds(&Tolerance::default()));
    }
}
