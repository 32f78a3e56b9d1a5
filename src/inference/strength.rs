//! Inferring the perturbation strength.
//!
//! Two interchangeable estimation modes produce a [`StrengthEstimate`]:
//! model disagreement (several candidate fits of the same target) or
//! background moments (known population means of auxiliary covariates).
//! Both invert the sampler's variance-inflation relationship — a
//! perturbation of strength `delta` inflates an estimator's variance by
//! `(1 + delta^2)` relative to its sampling variance.

use faer::Col;

use crate::core::{CalibrationError, CandidateEstimate};
use crate::utils::{col_mean, col_sample_variance, mean, sample_variance};

/// The inferred perturbation strength and its supporting quantities.
#[derive(Debug, Clone, Copy)]
pub struct StrengthEstimate {
    /// Perturbation-induced excess variance of the point estimate.
    pub excess_variance: f64,
    /// Inferred perturbation strength.
    pub delta_hat: f64,
    /// Effective pieces of information behind the inference: candidate
    /// models in disagreement mode, auxiliary covariates in background
    /// mode. Sizes the downstream `t` reference.
    pub dof: usize,
}

/// An auxiliary covariate with a known population mean, believed to be
/// subject to the same perturbation as the target variable.
#[derive(Debug, Clone)]
pub struct AuxiliaryMoment {
    /// Covariate name (for error messages).
    pub name: String,
    /// Observed sample of the covariate.
    pub observed: Col<f64>,
    /// Known population mean of the covariate.
    pub population_mean: f64,
}

impl AuxiliaryMoment {
    /// Create an auxiliary moment from a name, observed values, and the
    /// known population mean.
    pub fn new<S: Into<String>>(name: S, observed: Vec<f64>, population_mean: f64) -> Self {
        Self {
            name: name.into(),
            observed: Col::from_fn(observed.len(), |i| observed[i]),
            population_mean,
        }
    }
}

/// Mode A: infer the perturbation strength from the disagreement among
/// candidate estimates of the same target.
///
/// The between-model variance in excess of the average sampling variance
/// is attributed to the shared distributional perturbation. A negative
/// moment estimate is truncated at zero: a variance component cannot be
/// negative, and the clamp mirrors the standard random-effects
/// between-study variance estimator.
///
/// Fails with `InsufficientModels` if fewer than two estimates are given.
pub fn estimate_from_disagreement(
    estimates: &[CandidateEstimate],
) -> Result<StrengthEstimate, CalibrationError> {
    let k = estimates.len();
    if k < 2 {
        return Err(CalibrationError::InsufficientModels { got: k });
    }

    let points: Vec<f64> = estimates.iter().map(|e| e.point).collect();
    let v_between = sample_variance(&points);
    let v_within = mean(
        &estimates
            .iter()
            .map(CandidateEstimate::sampling_variance)
            .collect::<Vec<f64>>(),
    );

    if !(v_within > 0.0) || !v_within.is_finite() {
        return Err(CalibrationError::InvalidData {
            reason: "candidate estimates report zero or non-finite sampling variance".to_string(),
        });
    }

    let excess_variance = (v_between - v_within).max(0.0);
    let delta_hat = (excess_variance / v_within).sqrt();

    Ok(StrengthEstimate {
        excess_variance,
        delta_hat,
        dof: k,
    })
}

/// Mode B: infer the perturbation strength from known population means of
/// auxiliary covariates.
///
/// For each covariate the squared deviation of its sample mean from the
/// known population mean, relative to its sample variance, estimates the
/// total (sampling plus distributional) variance of a mean in units of
/// sampling variance; averaging over covariates and subtracting the
/// sampling unit gives `delta_hat^2`, truncated at zero. The target
/// variable's own sample variance converts this dimensionless factor into
/// an absolute excess variance for the target mean.
///
/// Fails with `InsufficientDegreesOfFreedom` when no auxiliary covariates
/// are supplied, and with `InvalidData` for length mismatches or a
/// zero-variance covariate.
pub fn estimate_from_background(
    target: &Col<f64>,
    auxiliary: &[AuxiliaryMoment],
) -> Result<StrengthEstimate, CalibrationError> {
    let m = auxiliary.len();
    if m == 0 {
        return Err(CalibrationError::InsufficientDegreesOfFreedom { dof: 0 });
    }

    let n = target.nrows();
    if n < 2 {
        return Err(CalibrationError::InvalidData {
            reason: format!("target sample needs at least 2 observations, got {n}"),
        });
    }

    let mut ratio_sum = 0.0;
    for aux in auxiliary {
        if aux.observed.nrows() != n {
            return Err(CalibrationError::InvalidData {
                reason: format!(
                    "auxiliary covariate `{}` has {} observations, expected {n}",
                    aux.name,
                    aux.observed.nrows()
                ),
            });
        }
        if !aux.population_mean.is_finite() {
            return Err(CalibrationError::InvalidData {
                reason: format!(
                    "auxiliary covariate `{}` has a non-finite population mean",
                    aux.name
                ),
            });
        }
        let variance = col_sample_variance(&aux.observed);
        if !(variance > 0.0) {
            return Err(CalibrationError::InvalidData {
                reason: format!("auxiliary covariate `{}` has zero sample variance", aux.name),
            });
        }
        let deviation = col_mean(&aux.observed) - aux.population_mean;
        ratio_sum += deviation * deviation / variance;
    }

    let avg_ratio = ratio_sum / m as f64;
    let delta_sq = (n as f64 * avg_ratio - 1.0).max(0.0);

    let target_variance = col_sample_variance(target);
    if !(target_variance > 0.0) {
        return Err(CalibrationError::InvalidData {
            reason: "target sample has zero variance".to_string(),
        });
    }
    let excess_variance = delta_sq * target_variance / n as f64;

    Ok(StrengthEstimate {
        excess_variance,
        delta_hat: delta_sq.sqrt(),
        dof: m,
    })
}
