//! Unconditional summability by norm domination.
//!
//! A family `f : I → E` is summable when its partial sums over finite
//! subsets converge along the directed system of finite subsets. The
//! Cauchy form of that condition is the *vanishing tail*: for every `ε` there
//! is a finite core `S` such that every finite set disjoint from `S` has a
//! partial sum of norm `< ε`. By the triangle inequality it is enough to
//! control the norm sum over the complement of `S`.
//!
//! # Finite horizon
//!
//! Families are given as an enumeration of their index type plus a term
//! function, and are inspected on the first
//! [`SummabilityConfig::horizon`] indices. A core must be a prefix of at
//! most [`SummabilityConfig::max_core`] indices; the indices between the
//! core and the horizon are the evidence that the tail is small. Families
//! with fewer indices than the horizon are finite and always summable.
//!
//! # Numerics
//!
//! Sums of nonnegative reals (norm sums, bound sums, tails) use Neumaier
//! compensated summation, so their error does not grow with the horizon.

use tracing::{debug, trace};

use crate::config::SummabilityConfig;
use crate::error::{ensure_positive, NormError, Result};
use crate::group::NormedGroup;
use crate::norm::{Bound, Norm};

/// Running Neumaier compensated sum.
#[derive(Debug, Clone, Copy, Default)]
struct Compensated {
    sum: f64,
    c: f64,
}

impl Compensated {
    fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.c += (self.sum - t) + x;
        } else {
            self.c += (x - t) + self.sum;
        }
        self.sum = t;
    }

    fn value(&self) -> f64 {
        self.sum + self.c
    }
}

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// An improved variant of Kahan summation that also handles the case where
/// the addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *ZAMM* 54(1), pp. 39–51.
///
/// # Complexity
/// Time: O(n), Space: O(1)
///
/// # Examples
/// ```
/// use u_normed::summable::kahan_sum;
/// assert_eq!(kahan_sum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut acc = Compensated::default();
    for &x in data {
        acc.add(x);
    }
    acc.value()
}

/// Suffix sums `tails[k] = Σ_{j ≥ k} xs[j]`, with `tails[xs.len()] = 0`.
fn suffix_sums(xs: &[f64]) -> Vec<f64> {
    let mut tails = vec![0.0; xs.len() + 1];
    let mut acc = Compensated::default();
    for (k, &x) in xs.iter().enumerate().rev() {
        acc.add(x);
        tails[k] = acc.value();
    }
    tails
}

/// Evidence that a family's tail is small.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailCertificate {
    /// Size of the core: the first `core` enumerated indices.
    pub core: usize,
    /// Norm sum over the inspected indices outside the core.
    pub tail_norm: f64,
    /// Tolerance the tail was certified against.
    pub eps: f64,
    /// Number of indices actually inspected.
    pub inspected: usize,
}

impl TailCertificate {
    /// `tail_norm < eps`.
    pub fn bound(&self) -> Bound {
        Bound::lt(self.tail_norm, self.eps)
    }

    /// Whether index position `k` lies in the core.
    pub fn in_core(&self, k: usize) -> bool {
        k < self.core
    }
}

/// Smallest prefix core whose complement has norm sum `< eps`.
///
/// An enumeration that ends before the horizon is a finite family, so its
/// whole index set is an admissible core whatever `max_core` says.
fn tail_of_norms(norms: &[f64], eps: f64, cfg: &SummabilityConfig) -> Result<TailCertificate> {
    ensure_positive(eps)?;
    let tails = suffix_sums(norms);
    let limit = if norms.len() < cfg.horizon {
        norms.len()
    } else {
        cfg.max_core.min(norms.len())
    };
    let found = (0..=limit).find(|&k| tails[k] < eps);
    match found {
        Some(core) => {
            trace!(core, tail = tails[core], eps, "vanishing tail found");
            Ok(TailCertificate {
                core,
                tail_norm: tails[core],
                eps,
                inspected: norms.len(),
            })
        }
        None => {
            debug!(eps, horizon = cfg.horizon, tail = tails[limit], "no vanishing tail");
            Err(NormError::NotSummable {
                eps,
                horizon: cfg.horizon,
            })
        }
    }
}

/// Finds a finite core outside of which every finite partial sum of `f`
/// has norm `< eps`.
///
/// # Errors
/// - [`NormError::NonPositiveTolerance`] if `eps ≤ 0`.
/// - [`NormError::NotSummable`] if no core of at most `cfg.max_core`
///   indices works within the horizon.
///
/// # Examples
/// ```
/// use u_normed::config::SummabilityConfig;
/// use u_normed::summable::vanishing_tail;
/// let cfg = SummabilityConfig::default();
/// let cert = vanishing_tail(0_u32.., |n| 0.5_f64.powi(*n as i32), 1e-3, &cfg).unwrap();
/// // Σ_{n ≥ k} 2⁻ⁿ = 2¹⁻ᵏ < 10⁻³ first at k = 11.
/// assert_eq!(cert.core, 11);
/// ```
pub fn vanishing_tail<I, T, F>(
    indices: impl IntoIterator<Item = I>,
    f: F,
    eps: f64,
    cfg: &SummabilityConfig,
) -> Result<TailCertificate>
where
    T: NormedGroup,
    F: Fn(&I) -> T,
{
    let norms: Vec<f64> = indices
        .into_iter()
        .take(cfg.horizon)
        .map(|i| f(&i).norm())
        .collect();
    tail_of_norms(&norms, eps, cfg)
}

/// A summed family together with the evidence for its summability.
#[derive(Debug, Clone, PartialEq)]
pub struct Summable<T> {
    /// `Σ f` over the inspected indices.
    pub sum: T,
    /// `Σ norm(f)`.
    pub norm_sum: f64,
    /// `Σ g` for the dominating family (equal to `norm_sum` for absolute
    /// summability).
    pub dominating_sum: f64,
    /// Vanishing tail of the dominating family at `cfg.tail_eps`.
    pub tail: TailCertificate,
}

impl<T: Norm> Summable<T> {
    /// `norm(Σ f) ≤ Σ g`.
    pub fn norm_bound(&self) -> Bound {
        Bound::le(self.sum.norm(), self.dominating_sum)
    }

    /// `norm(Σ f) ≤ Σ norm(f)`.
    pub fn norm_sum_bound(&self) -> Bound {
        Bound::le(self.sum.norm(), self.norm_sum)
    }
}

/// Summability by domination: if `norm(f i) ≤ g i` and `g` is summable then
/// `f` is summable and `norm(Σ f) ≤ Σ g`.
///
/// Domination is checked on every inspected index under
/// `cfg.tolerance`; the tail of `g` is certified at `cfg.tail_eps`.
///
/// # Errors
/// - [`NormError::BoundViolated`] for the first index with
///   `norm(f i) > g i`.
/// - [`NormError::NotSummable`] if `g` has no vanishing tail.
///
/// # Examples
/// ```
/// use u_normed::config::{SummabilityConfig, Tolerance};
/// use u_normed::summable::summable_of_norm_bounded;
/// let s = summable_of_norm_bounded(
///     0_i32..,
///     |n| (-0.5_f64).powi(*n),
///     |n| 0.5_f64.powi(*n),
///     &SummabilityConfig::default(),
/// )
/// .unwrap();
/// assert!((s.sum - 2.0 / 3.0).abs() < 1e-12);
/// assert!(s.norm_bound().holds(&Tolerance::default()));
/// ```
pub fn summable_of_norm_bounded<I, T, F, G>(
    indices: impl IntoIterator<Item = I>,
    f: F,
    g: G,
    cfg: &SummabilityConfig,
) -> Result<Summable<T>>
where
    T: NormedGroup,
    F: Fn(&I) -> T,
    G: Fn(&I) -> f64,
{
    let mut terms = Vec::new();
    let mut norms = Vec::new();
    let mut bounds = Vec::new();
    for (index, i) in indices.into_iter().take(cfg.horizon).enumerate() {
        let t = f(&i);
        let norm = t.norm();
        let bound = g(&i);
        if !cfg.tolerance.approx_le(norm, bound) {
            return Err(NormError::BoundViolated { index, norm, bound });
        }
        terms.push(t);
        norms.push(norm);
        bounds.push(bound);
    }
    summarize(terms, &norms, &bounds, cfg)
}

/// Absolute summability implies summability: `g = norm ∘ f`.
///
/// # Errors
/// [`NormError::NotSummable`] if `norm ∘ f` has no vanishing tail.
pub fn summable_of_summable_norm<I, T, F>(
    indices: impl IntoIterator<Item = I>,
    f: F,
    cfg: &SummabilityConfig,
) -> Result<Summable<T>>
where
    T: NormedGroup,
    F: Fn(&I) -> T,
{
    let terms: Vec<T> = indices.into_iter().take(cfg.horizon).map(|i| f(&i)).collect();
    let norms: Vec<f64> = terms.iter().map(Norm::norm).collect();
    summarize(terms, &norms, &norms, cfg)
}

fn summarize<T: NormedGroup>(
    terms: Vec<T>,
    norms: &[f64],
    bounds: &[f64],
    cfg: &SummabilityConfig,
) -> Result<Summable<T>> {
    let tail = tail_of_norms(bounds, cfg.tail_eps, cfg)?;
    let sum = terms.into_iter().fold(T::zero(), |acc, t| acc + t);
    let norm_sum = kahan_sum(norms);
    let dominating_sum = kahan_sum(bounds);
    trace!(
        terms = norms.len(),
        core = tail.core,
        norm_sum,
        dominating_sum,
        "family summed"
    );
    Ok(Summable {
        sum,
        norm_sum,
        dominating_sum,
        tail,
    })
}

/// `Σ f` for an absolutely summable family.
///
/// # Errors
/// [`NormError::NotSummable`] when no vanishing tail is found; a
/// non-summable family has no sum rather than a conventional zero.
pub fn tsum<I, T, F>(
    indices: impl IntoIterator<Item = I>,
    f: F,
    cfg: &SummabilityConfig,
) -> Result<T>
where
    T: NormedGroup,
    F: Fn(&I) -> T,
{
    summable_of_summable_norm(indices, f, cfg).map(|s| s.sum)
}

/// `Σ f` over every index of a finite family.
///
/// # Examples
/// ```
/// use u_normed::summable::finite_sum;
/// use num_bigint::BigInt;
/// assert_eq!(finite_sum(1..=4, |n: &i64| BigInt::from(n * n)), BigInt::from(30));
/// ```
pub fn finite_sum<I, T, F>(indices: impl IntoIterator<Item = I>, f: F) -> T
where
    T: NormedGroup,
    F: Fn(&I) -> T,
{
    indices.into_iter().fold(T::zero(), |acc, i| acc + f(&i))
}

/// `norm(Σ f) ≤ Σ norm(f)` for an absolutely summable family.
///
/// # Errors
/// [`NormError::NotSummable`] when `norm ∘ f` has no vanishing tail.
pub fn norm_tsum_le_tsum_norm<I, T, F>(
    indices: impl IntoIterator<Item = I>,
    f: F,
    cfg: &SummabilityConfig,
) -> Result<Bound>
where
    T: NormedGroup,
    F: Fn(&I) -> T,
{
    summable_of_summable_norm(indices, f, cfg).map(|s| s.norm_sum_bound())
}
