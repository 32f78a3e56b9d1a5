//! Calibrated inference for linear-model coefficients under distributional
//! uncertainty.
//!
//! Classical standard errors only account for sampling noise: the data are
//! assumed to come from one fixed distribution. This library additionally
//! models *distributional* uncertainty — the data-generating distribution is
//! itself randomly perturbed by an unknown, seed-specific amount — and
//! produces a single calibrated point estimate, standard error, and t-test
//! for a target coefficient that stays valid even though the perturbation
//! strength is unknown.
//!
//! The perturbation strength is inferred either from the disagreement among
//! several admissible model specifications fit to the same sample, or from
//! known population means of auxiliary covariates subject to the same
//! perturbation.
//!
//! # Example
//!
//! ```rust,ignore
//! use drcalib::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! // All variables drawn from one seed share the same realized
//! // distributional shift.
//! let seed = PerturbationSeed::new(500, 2.0, &mut rng)?;
//! let x1 = seed.draw(&mut rng, 0.0, 1.0)?;
//! let x2 = seed.draw(&mut rng, 0.0, 1.0)?;
//!
//! // Fit several admissible adjustment sets and calibrate.
//! let specs = vec![
//!     ModelSpec::new("y", ["x1"]),
//!     ModelSpec::new("y", ["x1", "x2"]),
//! ];
//! let result = calibrate_models(&specs, &data, "x1")?;
//! println!("{}", result);
//! ```
//!
//! # References
//!
//! - Jeong, Y. & Rothenhäusler, D. (2024). "Calibrated inference: statistical
//!   inference that accounts for both sampling uncertainty and distributional
//!   uncertainty." *Journal of the Royal Statistical Society, Series B*.

pub mod core;
pub mod diagnostics;
pub mod inference;
pub mod perturbation;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        CalibratedResult, CalibrationError, CalibrationMode, CandidateEstimate, Dataset,
        ModelSpec, RegressionResult,
    };
    pub use crate::diagnostics::{classify_condition_number, condition_number, ConditionSeverity};
    pub use crate::inference::{
        calibrate_models, calibrate_with_moments, estimate_from_background,
        estimate_from_disagreement, fit_candidate, Aggregation, AuxiliaryMoment, Calibrator,
        StrengthEstimate,
    };
    pub use crate::perturbation::PerturbationSeed;
    pub use crate::solvers::{FittedOls, FittedRegressor, OlsRegressor, Regressor};
}

pub use crate::core::{
    CalibratedResult, CalibrationError, CalibrationMode, CandidateEstimate, Dataset, ModelSpec,
    RegressionResult,
};
pub use crate::inference::{
    calibrate_models, calibrate_with_moments, AuxiliaryMoment, Calibrator, StrengthEstimate,
};
pub use crate::perturbation::PerturbationSeed;
