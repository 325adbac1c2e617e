//! Rescaling a nonzero vector into a norm shell.
//!
//! Given a scalar `c` with `norm(c) > 1`, every nonzero `x` can be moved by
//! an integer power of `c` into the annulus
//!
//! ```text
//! ε / norm(c) ≤ norm(d • x) ≤ ε
//! ```
//!
//! With `norm(c)ⁿ ≤ norm(x)/ε < norm(c)ⁿ⁺¹` the scalar `d = c^-(n+1)` gives
//! `norm(d • x) = norm(x) / norm(c)ⁿ⁺¹`, which lies in the shell by the two
//! sides of the bracket.
//!
//! The quotient `norm(x)/ε` is never formed: it can overflow or underflow
//! while the answer is representable. The exponent is estimated as
//! `⌊(ln norm(x) − ln ε) / ln norm(c)⌋` and then stepped until the scaled
//! vector, computed with the same arithmetic as `d`, lands in the shell.

use tracing::trace;

use crate::config::Tolerance;
use crate::error::{ensure_positive, NormError, Result};
use crate::field::{real_inv, NondiscreteNormedField, NormedField};
use crate::norm::{Bound, Norm};
use crate::space::NormedSpace;

/// Result of [`rescale_to_shell`]: the scalar plus its certificates.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellRescaling<K> {
    /// `d = c^-(n+1)`.
    pub scalar: K,
    /// The exponent `n` with `d = c^-(n+1)`.
    pub exponent: i32,
    /// `norm(d • x)`.
    pub scaled_norm: f64,
    /// `0 < norm(d)`, i.e. `d ≠ 0`.
    pub nonzero: Bound,
    /// `norm(d • x) ≤ ε`.
    pub upper: Bound,
    /// `ε / norm(c) ≤ norm(d • x)`.
    pub lower: Bound,
    /// `norm(d)⁻¹ ≤ ε⁻¹ · norm(c) · norm(x)`.
    pub inverse: Bound,
}

impl<K> ShellRescaling<K> {
    /// All four certificates, in declaration order.
    pub fn certificates(&self) -> [(&'static str, &Bound); 4] {
        [
            ("scalar_nonzero", &self.nonzero),
            ("shell_upper", &self.upper),
            ("shell_lower", &self.lower),
            ("scalar_inverse", &self.inverse),
        ]
    }

    /// Checks every certificate under `tol`.
    ///
    /// # Errors
    /// [`NormError::LawViolation`] naming the first certificate that fails.
    pub fn verify(&self, tol: &Tolerance) -> Result<()> {
        for (law, bound) in self.certificates() {
            if !bound.holds(tol) {
                return Err(NormError::law(law, bound.to_string()));
            }
        }
        Ok(())
    }
}

/// Finds `d = c^-(n+1)` moving `x` into the shell `[ε/norm(c), ε]`.
///
/// # Errors
/// - [`NormError::TrivialWitness`] if `norm(c) ≤ 1`.
/// - [`NormError::NonPositiveTolerance`] if `ε ≤ 0`.
/// - [`NormError::ZeroVector`] if `x = 0`.
/// - [`NormError::NonFinite`] if `norm(c)`, `ε` or `norm(x)` is infinite.
/// - [`NormError::ExponentOutOfRange`] when no `i32` power of `c` is
///   representable as the rescaling scalar, e.g. when `d` would overflow
///   or underflow to zero.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::shell::rescale_to_shell;
/// let s = rescale_to_shell(&2.0_f64, 1.0, &100.0_f64).unwrap();
/// assert_eq!(s.exponent, 6);
/// assert_eq!(s.scaled_norm, 100.0 / 128.0);
/// assert!(s.verify(&Tolerance::default()).is_ok());
/// ```
pub fn rescale_to_shell<K, E>(c: &K, eps: f64, x: &E) -> Result<ShellRescaling<K>>
where
    K: NormedField,
    E: NormedSpace<K>,
{
    let nc = c.norm();
    if nc <= 1.0 || nc.is_nan() {
        return Err(NormError::TrivialWitness(nc));
    }
    ensure_positive(eps)?;
    let nx = x.norm();
    if nx == 0.0 {
        return Err(NormError::ZeroVector);
    }
    for v in [nc, eps, nx] {
        if !v.is_finite() {
            return Err(NormError::NonFinite(v));
        }
    }

    let out_of_range = || NormError::ExponentOutOfRange {
        base: nc,
        target: nx / eps,
    };
    let floor = eps / nc;
    let mut n = log_exponent(nc, nx, eps).ok_or_else(out_of_range)?;
    for _ in 0..MAX_STEPS {
        let e = n
            .checked_add(1)
            .and_then(i32::checked_neg)
            .ok_or_else(out_of_range)?;
        let scalar = c.zpow(e);
        let nd = scalar.norm();
        let scaled_norm = x.smul(&scalar).norm();
        if !(nd.is_finite() && nd > 0.0 && scaled_norm.is_finite() && scaled_norm > 0.0) {
            return Err(out_of_range());
        }
        if scaled_norm > eps {
            n = n.checked_add(1).ok_or_else(out_of_range)?;
        } else if scaled_norm < floor {
            n = n.checked_sub(1).ok_or_else(out_of_range)?;
        } else {
            trace!(exponent = n, norm_c = nc, norm_x = nx, scaled_norm, "rescaled into shell");
            return Ok(ShellRescaling {
                exponent: n,
                scaled_norm,
                nonzero: Bound::lt(0.0, nd),
                upper: Bound::le(scaled_norm, eps),
                lower: Bound::le(floor, scaled_norm),
                inverse: Bound::le(real_inv(nd), nc * (nx / eps)),
                scalar,
            });
        }
    }
    Err(out_of_range())
}

/// Steps allowed from the logarithmic estimate to the exact exponent.
const MAX_STEPS: usize = 4;

/// `⌊(ln num − ln den) / ln base⌋` as an `i32`, if it is one.
fn log_exponent(base: f64, num: f64, den: f64) -> Option<i32> {
    let est = ((num.ln() - den.ln()) / base.ln()).floor();
    let in_range = est >= f64::from(i32::MIN) && est <= f64::from(i32::MAX);
    // NaN fails both comparisons
    in_range.then_some(est as i32)
}

/// [`rescale_to_shell`] with the field's own nondiscrete witness as `c`.
///
/// # Examples
/// ```
/// use u_normed::shell::rescale_with_witness;
/// use num_complex::Complex64;
/// let s = rescale_with_witness::<Complex64, _>(0.1, &Complex64::new(300.0, -400.0)).unwrap();
/// assert!(s.scaled_norm <= 0.1 && s.scaled_norm >= 0.05);
/// ```
pub fn rescale_with_witness<K, E>(eps: f64, x: &E) -> Result<ShellRescaling<K>>
where
    K: NondiscreteNormedField,
    E: NormedSpace<K>,
{
    rescale_to_shell(&K::non_trivial(), eps, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prod::{Pi, Prod};
    use num_complex::Complex64;
    use num_traits::Zero;

    #[test]
    fn test_shell_on_reals() {
        let s = rescale_to_shell(&2.0_f64, 1.0, &100.0_f64).unwrap();
        assert_eq!(s.exponent, 6);
        assert_eq!(s.scalar, 1.0 / 128.0);
        assert_eq!(s.scaled_norm, 100.0 / 128.0);
        assert!(s.verify(&Tolerance::EXACT).is_ok());
        // agrees with the doubling search on the quotient when it is finite
        assert_eq!(crate::field::zpow_bracket(2.0, 100.0), Ok(s.exponent));
    }

    #[test]
    fn test_shell_negative_exponent() {
        // norm(x)/ε = 0.3 ⇒ n = -2, d = 2
        let s = rescale_to_shell(&-2.0_f64, 1.0, &0.3_f64).unwrap();
        assert_eq!(s.exponent, -2);
        assert_eq!(s.scalar, -2.0);
        assert!((s.scaled_norm - 0.6).abs() < 1e-15);
        assert!(s.verify(&Tolerance::default()).is_ok());
    }

    #[test]
    fn test_shell_complex_scalar_on_product() {
        let c = Complex64::new(0.0, 3.0);
        let x = Prod(Complex64::new(1e5, 2.0), Complex64::new(-7.0, 0.0));
        let s = rescale_to_shell(&c, 1e-3, &x).unwrap();
        assert!(s.verify(&Tolerance::default()).is_ok());
        assert!(s.scaled_norm <= 1e-3 * (1.0 + 1e-9));
    }

    #[test]
    fn test_shell_real_scalar_on_complex_vectors() {
        let x = Pi([Complex64::new(0.0, 1e-8), Complex64::zero()]);
        let s = rescale_to_shell(&10.0_f64, 5.0, &x).unwrap();
        assert_eq!(s.exponent, -9);
        assert!(s.verify(&Tolerance::default()).is_ok());
    }

    #[test]
    fn test_shell_with_unrepresentable_ratio() {
        // norm(x)/ε overflows, but d = 2^-1030 is a subnormal f64.
        let s = rescale_to_shell(&2.0_f64, 1e-10, &1e300_f64).unwrap();
        assert_eq!(s.exponent, 1029);
        assert!(s.scalar > 0.0);
        assert!(s.verify(&Tolerance::default()).is_ok());
    }

    #[test]
    fn test_shell_at_float_limits() {
        let s = rescale_to_shell(&3.0_f64, 1.0, &1.7e308_f64).unwrap();
        assert!(s.scalar != 0.0);
        assert!(s.verify(&Tolerance::default()).is_ok());

        // d = 2^1328 overflows
        assert!(matches!(
            rescale_to_shell(&2.0_f64, 1e100, &1e-300_f64),
            Err(NormError::ExponentOutOfRange { .. })
        ));
        // d = 2^-1994 underflows to zero
        assert!(matches!(
            rescale_to_shell(&2.0_f64, 1e-300, &1e300_f64),
            Err(NormError::ExponentOutOfRange { .. })
        ));
        assert!(matches!(
            rescale_to_shell(&2.0_f64, f64::INFINITY, &1.0_f64),
            Err(NormError::NonFinite(_))
        ));
    }

    #[test]
    fn test_shell_at_exact_power() {
        let s = rescale_to_shell(&2.0_f64, 1.0, &64.0_f64).unwrap();
        assert!(s.scaled_norm == 1.0 || s.scaled_norm == 0.5);
        assert!(s.verify(&Tolerance::EXACT).is_ok());
    }

    #[test]
    fn test_shell_rejects() {
        assert_eq!(
            rescale_to_shell(&1.0_f64, 1.0, &3.0_f64),
            Err(NormError::TrivialWitness(1.0))
        );
        assert_eq!(
            rescale_to_shell(&2.0_f64, 0.0, &3.0_f64),
            Err(NormError::NonPositiveTolerance(0.0))
        );
        assert_eq!(
            rescale_to_shell(&2.0_f64, 1.0, &0.0_f64),
            Err(NormError::ZeroVector)
        );
    }
}
