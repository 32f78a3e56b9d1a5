//! Distributional perturbation seed and sampler.
//!
//! A [`PerturbationSeed`] encapsulates one realized random perturbation of a
//! nominal distribution. Every draw issued against the same seed reuses the
//! identical realized perturbation, so several variables of one dataset are
//! subject to the same unknown distributional shift; draws from distinct
//! seeds are independent.

mod sampler;
mod seed;

pub use seed::PerturbationSeed;
