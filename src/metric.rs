//! Norm-to-distance construction and numeric convergence predicates.
//!
//! A norm on an additive group induces a metric. Two equivalent routes are
//! offered by [`InducedMetric`]:
//!
//! 1. **From a translation-invariant distance** ([`InducedMetric::from_invariant_dist`]):
//!    the norm is read off as `norm(x) = dist(x, 0)`. Given
//!    `dist(x+z, y+z) ≤ dist(x, y)` and its converse, the equation
//!    `dist(x, y) = norm(x - y)` follows.
//! 2. **From the core norm axioms** ([`InducedMetric::from_core`]): distance is
//!    *defined* as `norm(x - y)`; the metric axioms (identity of
//!    indiscernibles, symmetry, triangle inequality) follow algebraically
//!    from `norm(x) = 0 ⟺ x = 0`, `norm(-x) = norm(x)` and the triangle
//!    inequality of the norm.
//!
//! Both constructors are total. Whether the supplied axioms actually hold is
//! a registration-time precondition: [`InducedMetric::verify`] checks it on
//! samples and rejects a malformed instance before it is ever used.
//!
//! Convergence and continuity are modelled as finite numeric predicates:
//! [`eventually_within`] for sequences and [`ContinuityWitness`] for `ε`–`δ`
//! statements.

use std::fmt::{self, Debug};
use std::ops::{Add, Neg, Sub};
use std::sync::Arc;

use num_traits::Zero;
use tracing::{debug, warn};

use crate::config::Tolerance;
use crate::error::{NormError, Result};
use crate::group::NormedGroup;
use crate::norm::NNReal;

/// The additive-group collaborator: everything the norm layers consume from
/// the carrier before a norm is attached.
pub trait AdditiveGroup:
    Clone + PartialEq + Zero + Add<Output = Self> + Sub<Output = Self> + Neg<Output = Self>
{
}

impl<T> AdditiveGroup for T where
    T: Clone + PartialEq + Zero + Add<Output = T> + Sub<Output = T> + Neg<Output = T>
{
}

type NormFn<T> = Arc<dyn Fn(&T) -> f64 + Send + Sync>;
type DistFn<T> = Arc<dyn Fn(&T, &T) -> f64 + Send + Sync>;

/// Which construction route produced an [`InducedMetric`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Built from the core norm axioms.
    Core,
    /// Built from a translation-invariant distance.
    InvariantDist,
}

/// A metric on an additive group, induced by a norm.
///
/// # Examples
/// ```
/// use u_normed::config::Tolerance;
/// use u_normed::metric::InducedMetric;
///
/// // Taxicab norm on pairs packed as complex numbers.
/// let m = InducedMetric::from_core(|z: &num_complex::Complex64| z.re.abs() + z.im.abs());
/// let a = num_complex::Complex64::new(1.0, 1.0);
/// let b = num_complex::Complex64::new(4.0, -3.0);
/// assert_eq!(m.dist(&a, &b), 7.0);
/// assert!(m.verify(&[a, b], &Tolerance::default()).is_ok());
/// ```
#[derive(Clone)]
pub struct InducedMetric<T> {
    norm: NormFn<T>,
    source_dist: Option<DistFn<T>>,
}

impl<T> Debug for InducedMetric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InducedMetric")
            .field("route", &self.route())
            .finish()
    }
}

impl<T> InducedMetric<T> {
    /// Construction route.
    pub fn route(&self) -> Route {
        if self.source_dist.is_some() {
            Route::InvariantDist
        } else {
            Route::Core
        }
    }
}

impl<T: AdditiveGroup + 'static> InducedMetric<T> {
    /// Route (ii): distance is `norm(x - y)`.
    pub fn from_core<N>(norm: N) -> Self
    where
        N: Fn(&T) -> f64 + Send + Sync + 'static,
    {
        Self {
            norm: Arc::new(norm),
            source_dist: None,
        }
    }

    /// Route (i): the norm is `dist(x, 0)` for a translation-invariant `dist`.
    pub fn from_invariant_dist<D>(dist: D) -> Self
    where
        D: Fn(&T, &T) -> f64 + Send + Sync + 'static,
    {
        let dist: DistFn<T> = Arc::new(dist);
        let d = Arc::clone(&dist);
        Self {
            norm: Arc::new(move |x: &T| d(x, &T::zero())),
            source_dist: Some(dist),
        }
    }

    /// The metric of an already registered normed group.
    pub fn of() -> Self
    where
        T: NormedGroup,
    {
        Self::from_core(|x: &T| x.norm())
    }

    /// `norm(x)`.
    pub fn norm(&self, x: &T) -> f64 {
        (self.norm)(x)
    }

    /// `dist(x, y) = norm(x - y)`.
    pub fn dist(&self, x: &T, y: &T) -> f64 {
        (self.norm)(&(x.clone() - y.clone()))
    }

    /// Distance as a nonnegative real.
    pub fn nndist(&self, x: &T, y: &T) -> NNReal {
        NNReal::saturating(self.dist(x, y))
    }

    /// Checks, on every sample (and every pair and triple of samples), the
    /// axioms this route relies on and the metric axioms derived from them.
    ///
    /// Zero is always added to the sample set.
    ///
    /// # Errors
    /// [`NormError::LawViolation`] describing the first failing law.
    pub fn verify(&self, samples: &[T], tol: &Tolerance) -> Result<()>
    where
        T: Debug,
    {
        let mut pts: Vec<T> = samples.to_vec();
        if !pts.iter().any(Zero::is_zero) {
            pts.push(T::zero());
        }
        let result = self.verify_points(&pts, tol);
        match &result {
            Ok(()) => debug!(
                route = ?self.route(),
                samples = pts.len(),
                "induced metric verified"
            ),
            Err(e) => warn!(route = ?self.route(), error = %e, "induced metric rejected"),
        }
        result
    }

    fn verify_points(&self, pts: &[T], tol: &Tolerance) -> Result<()>
    where
        T: Debug,
    {
        for x in pts {
            let n = self.norm(x);
            if n < 0.0 || n.is_nan() {
                return Err(NormError::law("norm_nonneg", format!("norm({x:?}) = {n}")));
            }
            if (n == 0.0) != x.is_zero() {
                return Err(NormError::law(
                    "norm_eq_zero_iff",
                    format!("norm({x:?}) = {n}"),
                ));
            }
            let nn = self.norm(&-x.clone());
            if !tol.approx_eq(nn, n) {
                return Err(NormError::law(
                    "norm_neg",
                    format!("norm(-{x:?}) = {nn}, norm({x:?}) = {n}"),
                ));
            }
        }

        for x in pts {
            for y in pts {
                let lhs = self.norm(&(x.clone() + y.clone()));
                let rhs = self.norm(x) + self.norm(y);
                if !tol.approx_le(lhs, rhs) {
                    return Err(NormError::law(
                        "norm_add_le",
                        format!("x = {x:?}, y = {y:?}: {lhs} > {rhs}"),
                    ));
                }
                let dxy = self.dist(x, y);
                if !tol.approx_eq(dxy, self.dist(y, x)) {
                    return Err(NormError::law("dist_comm", format!("x = {x:?}, y = {y:?}")));
                }
                if dxy == 0.0 && x != y {
                    return Err(NormError::law(
                        "eq_of_dist_eq_zero",
                        format!("x = {x:?}, y = {y:?}"),
                    ));
                }
                if let Some(d) = &self.source_dist {
                    let source = d(x, y);
                    if !tol.approx_eq(source, dxy) {
                        return Err(NormError::law(
                            "dist_eq_norm_sub",
                            format!("x = {x:?}, y = {y:?}: {source} vs {dxy}"),
                        ));
                    }
                }
            }
        }

        for x in pts {
            for y in pts {
                for z in pts {
                    let lhs = self.dist(x, z);
                    let rhs = self.dist(x, y) + self.dist(y, z);
                    if !tol.approx_le(lhs, rhs) {
                        return Err(NormError::law(
                            "dist_triangle",
                            format!("x = {x:?}, y = {y:?}, z = {z:?}"),
                        ));
                    }
                    if let Some(d) = &self.source_dist {
                        let shifted = d(&(x.clone() + z.clone()), &(y.clone() + z.clone()));
                        let plain = d(x, y);
                        if !tol.approx_le(shifted, plain) || !tol.approx_le(plain, shifted) {
                            return Err(NormError::law(
                                "dist_add_right",
                                format!("x = {x:?}, y = {y:?}, z = {z:?}: {shifted} vs {plain}"),
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Returns the first index from which every remaining element of `seq` lies
/// strictly within `eps` of `limit`, or `None` if the last element does not.
///
/// An empty sequence carries no evidence and yields `None`.
///
/// # Examples
/// ```
/// use u_normed::group::NormedGroup;
/// use u_normed::metric::eventually_within;
/// let seq = [5.0_f64, 0.5, 3.0, 0.25, 0.125];
/// assert_eq!(eventually_within(&seq, &0.0, 1.0, f64::dist), Some(3));
/// ```
pub fn eventually_within<T, D>(seq: &[T], limit: &T, eps: f64, dist: D) -> Option<usize>
where
    D: Fn(&T, &T) -> f64,
{
    let mut start = seq.len();
    for (i, x) in seq.iter().enumerate().rev() {
        if dist(x, limit) < eps {
            start = i;
        } else {
            break;
        }
    }
    (start < seq.len()).then_some(start)
}

/// An `ε`–`δ` continuity statement at a point.
///
/// # Examples
/// ```
/// use u_normed::metric::ContinuityWitness;
/// let w = ContinuityWitness { eps: 0.1, delta: 0.05 };
/// let samples: Vec<f64> = (0..100).map(|i| 1.0 + (i as f64 - 50.0) * 1e-3).collect();
/// assert!(w.check_at(|x: &f64| 2.0 * x, &1.0, &samples));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuityWitness {
    /// Output tolerance.
    pub eps: f64,
    /// Input radius guaranteeing it.
    pub delta: f64,
}

impl ContinuityWitness {
    /// Checks that every sample strictly within `delta` of `center` is mapped
    /// strictly within `eps` of `f(center)`. Samples outside the radius are
    /// ignored.
    pub fn check_at<X, Y, F>(&self, f: F, center: &X, samples: &[X]) -> bool
    where
        X: NormedGroup,
        Y: NormedGroup,
        F: Fn(&X) -> Y,
    {
        let image = f(center);
        samples
            .iter()
            .filter(|x| x.dist(center) < self.delta)
            .all(|x| f(x).dist(&image) < self.eps)
    }
}
