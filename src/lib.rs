//! # u-normed
//!
//! Normed algebraic structures for generic numerics.
//!
//! This crate attaches norms to carrier types and layers the classical
//! hierarchy on top: normed groups, rings, fields, nondiscrete fields, vector
//! spaces and algebras. Every law a layer promises is available as a
//! [`norm::Bound`] certificate that can be checked numerically, and every
//! existential fact (continuity, large and small elements, rescaling into a
//! norm shell, summability) is returned as a constructive witness.
//!
//! ## Modules
//!
//! - [`norm`]: the `Norm` trait, nonnegative reals, bound certificates
//! - [`metric`]: the metric induced by a norm, convergence predicates
//! - [`group`]: normed additive groups and their inequalities
//! - [`ring`]: submultiplicative norms, continuity of multiplication
//! - [`field`]: multiplicative norms, inversion continuity, nondiscrete fields
//! - [`space`]: normed spaces and algebras, restriction of scalars
//! - [`shell`]: rescaling a nonzero vector into a norm shell
//! - [`prod`]: sup-norm products
//! - [`summable`]: summability by norm domination
//! - [`instances`]: `f64`, `Complex64` and `BigInt`
//! - [`laws`]: registration-time law checks
//! - [`random`]: seeded sampling for the law checks
//! - [`config`], [`error`]: tolerances and the error type
//!
//! ## Design Philosophy
//!
//! - **Laws are checked, not assumed**: implementing a trait is a promise;
//!   [`laws`] verifies it before a carrier is relied on
//! - **Witnesses over predicates**: searches return the value together with
//!   the inequality it satisfies
//! - **Property-based testing**: every inequality is exercised via proptest

pub mod config;
pub mod error;
pub mod field;
pub mod group;
pub mod instances;
pub mod laws;
pub mod metric;
pub mod norm;
pub mod prod;
pub mod random;
pub mod ring;
pub mod shell;
pub mod space;
pub mod summable;

pub use error::{NormError, Result};
pub use field::{NondiscreteNormedField, NormedField};
pub use group::NormedGroup;
pub use norm::{Bound, Norm};
pub use ring::NormedRing;
pub use space::{NormedAlgebra, NormedSpace};
