//! Calibrated inference: candidate fitting, perturbation-strength
//! estimation, and aggregation.
//!
//! The pipeline runs in three steps:
//!
//! 1. [`fit_candidate`] fits one model specification and extracts the
//!    target coefficient with its classical standard error.
//! 2. [`estimate_from_disagreement`] / [`estimate_from_background`] infer
//!    the unknown perturbation strength, either from how much the candidate
//!    fits disagree or from known population means of auxiliary covariates.
//! 3. [`Calibrator`] folds the inferred excess variance into a combined
//!    standard error and a `t(dof)` significance test.

mod calibrate;
mod fitter;
mod strength;

pub use calibrate::{calibrate_models, calibrate_with_moments, Aggregation, Calibrator};
pub use fitter::fit_candidate;
pub use strength::{
    estimate_from_background, estimate_from_disagreement, AuxiliaryMoment, StrengthEstimate,
};
