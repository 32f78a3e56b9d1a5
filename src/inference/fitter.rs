//! Fitting candidate models and extracting the target coefficient.

use faer::Mat;

use crate::core::{CalibrationError, CandidateEstimate, Dataset, ModelSpec};
use crate::diagnostics::{classify_condition_number, condition_number};
use crate::solvers::{FittedRegressor, OlsRegressor, RegressionError, Regressor};

/// Fit one candidate specification on `data` and extract the point
/// estimate and classical standard error of the `target` predictor.
///
/// Fails with `TargetNotInModel` if `target` is not among the spec's
/// predictors, `InvalidData` for missing columns or malformed shapes, and
/// `SingularFit` if the design matrix is rank deficient.
pub fn fit_candidate(
    spec: &ModelSpec,
    data: &Dataset,
    target: &str,
) -> Result<CandidateEstimate, CalibrationError> {
    if !spec.contains_predictor(target) {
        return Err(CalibrationError::TargetNotInModel {
            target: target.to_string(),
            spec: spec.to_string(),
        });
    }
    if spec.predictors().is_empty() {
        return Err(CalibrationError::InvalidData {
            reason: format!("model `{spec}` has no predictors"),
        });
    }
    for (idx, name) in spec.predictors().iter().enumerate() {
        if spec.predictors()[..idx].contains(name) {
            return Err(CalibrationError::InvalidData {
                reason: format!("model `{spec}` lists predictor `{name}` twice"),
            });
        }
    }

    let y = data
        .column(spec.response())
        .ok_or_else(|| CalibrationError::InvalidData {
            reason: format!("response column `{}` not found", spec.response()),
        })?;

    let n = data.n_rows();
    let p = spec.predictors().len();
    let mut x = Mat::zeros(n, p);
    for (j, name) in spec.predictors().iter().enumerate() {
        let column = data
            .column(name)
            .ok_or_else(|| CalibrationError::InvalidData {
                reason: format!("predictor column `{name}` not found"),
            })?;
        for i in 0..n {
            x[(i, j)] = column[i];
        }
    }

    let fitted = OlsRegressor::builder()
        .with_intercept(true)
        .compute_inference(true)
        .build()
        .fit(&x, y)
        .map_err(|e| match e {
            RegressionError::SingularMatrix => CalibrationError::SingularFit {
                spec: spec.to_string(),
            },
            other => CalibrationError::InvalidData {
                reason: other.to_string(),
            },
        })?;

    let result = fitted.result();
    let target_idx = spec
        .predictors()
        .iter()
        .position(|name| name == target)
        .expect("target checked above");

    let point = result.coefficients[target_idx];
    let std_errors = result
        .std_errors
        .as_ref()
        .ok_or_else(|| CalibrationError::InvalidData {
            reason: "fit did not produce standard errors".to_string(),
        })?;
    let sampling_se = std_errors[target_idx];

    if !point.is_finite() || !sampling_se.is_finite() {
        return Err(CalibrationError::SingularFit {
            spec: spec.to_string(),
        });
    }
    if sampling_se == 0.0 {
        return Err(CalibrationError::InvalidData {
            reason: format!("fit of `{spec}` has zero residual variance"),
        });
    }

    let condition = classify_condition_number(condition_number(&x, true));

    Ok(CandidateEstimate {
        point,
        sampling_se,
        spec: spec.clone(),
        target: target.to_string(),
        condition,
    })
}
