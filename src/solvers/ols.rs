//! Ordinary Least Squares solver.
//!
//! Solves the normal equations with a partial-pivot inverse and computes
//! classical (model-based) coefficient inference: standard errors,
//! t-statistics, two-sided p-values, and t confidence intervals.
//!
//! A pivot below the rank tolerance means the design matrix is rank
//! deficient; the fit fails with `SingularMatrix` rather than silently
//! aliasing columns, because downstream calibration needs a defined
//! standard error for every candidate estimate.

use faer::{Col, Mat};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::core::RegressionResult;
use crate::solvers::traits::{FittedRegressor, RegressionError, Regressor};

/// Ordinary Least Squares estimator.
///
/// # Example
///
/// ```rust,ignore
/// use drcalib::solvers::{OlsRegressor, Regressor, FittedRegressor};
/// use faer::{Mat, Col};
///
/// let fitted = OlsRegressor::builder()
///     .with_intercept(true)
///     .compute_inference(true)
///     .build()
///     .fit(&x, &y)?;
///
/// let stats = fitted.result();
/// println!("beta = {:?}, se = {:?}", stats.coefficients, stats.std_errors);
/// ```
#[derive(Debug, Clone)]
pub struct OlsRegressor {
    with_intercept: bool,
    compute_inference: bool,
    confidence_level: f64,
    rank_tolerance: f64,
}

impl OlsRegressor {
    /// Create a regressor with default options (intercept and inference on).
    pub fn new() -> Self {
        Self {
            with_intercept: true,
            compute_inference: true,
            confidence_level: 0.95,
            rank_tolerance: 1e-10,
        }
    }

    /// Create a builder for configuring the regressor.
    pub fn builder() -> OlsRegressorBuilder {
        OlsRegressorBuilder::default()
    }
}

impl Default for OlsRegressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`OlsRegressor`].
#[derive(Debug, Clone)]
pub struct OlsRegressorBuilder {
    with_intercept: bool,
    compute_inference: bool,
    confidence_level: f64,
    rank_tolerance: f64,
}

impl Default for OlsRegressorBuilder {
    fn default() -> Self {
        let defaults = OlsRegressor::new();
        Self {
            with_intercept: defaults.with_intercept,
            compute_inference: defaults.compute_inference,
            confidence_level: defaults.confidence_level,
            rank_tolerance: defaults.rank_tolerance,
        }
    }
}

impl OlsRegressorBuilder {
    /// Whether to include an intercept term (default: true).
    pub fn with_intercept(mut self, include: bool) -> Self {
        self.with_intercept = include;
        self
    }

    /// Whether to compute inference statistics (default: true).
    pub fn compute_inference(mut self, compute: bool) -> Self {
        self.compute_inference = compute;
        self
    }

    /// Confidence level for intervals (default: 0.95).
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Pivot tolerance for rank-deficiency detection (default: 1e-10).
    pub fn rank_tolerance(mut self, tol: f64) -> Self {
        self.rank_tolerance = tol;
        self
    }

    /// Build the configured regressor.
    pub fn build(self) -> OlsRegressor {
        OlsRegressor {
            with_intercept: self.with_intercept,
            compute_inference: self.compute_inference,
            confidence_level: self.confidence_level,
            rank_tolerance: self.rank_tolerance,
        }
    }
}

/// A fitted OLS model.
#[derive(Debug, Clone)]
pub struct FittedOls {
    result: RegressionResult,
    with_intercept: bool,
}

impl FittedOls {
    /// Coefficient estimates (excluding intercept).
    pub fn coefficients(&self) -> &Col<f64> {
        &self.result.coefficients
    }
}

impl FittedRegressor for FittedOls {
    fn result(&self) -> &RegressionResult {
        &self.result
    }

    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        let n = x.nrows();
        let p = self.result.coefficients.nrows().min(x.ncols());
        let intercept = self.result.intercept.unwrap_or(0.0);
        Col::from_fn(n, |i| {
            let mut pred = intercept;
            for j in 0..p {
                pred += x[(i, j)] * self.result.coefficients[j];
            }
            pred
        })
    }
}

impl Regressor for OlsRegressor {
    type Fitted = FittedOls;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<FittedOls, RegressionError> {
        let n = x.nrows();
        let n_features = x.ncols();

        if n != y.nrows() {
            return Err(RegressionError::DimensionMismatch {
                x_rows: n,
                y_len: y.nrows(),
            });
        }

        let p = n_features + usize::from(self.with_intercept);
        if p == 0 {
            return Err(RegressionError::NumericalError(
                "model has no parameters".to_string(),
            ));
        }
        if n <= p {
            return Err(RegressionError::InsufficientObservations {
                needed: p + 1,
                got: n,
            });
        }

        // Augmented design with the intercept as the leading column.
        let mut design = Mat::zeros(n, p);
        for i in 0..n {
            let mut offset = 0;
            if self.with_intercept {
                design[(i, 0)] = 1.0;
                offset = 1;
            }
            for j in 0..n_features {
                design[(i, j + offset)] = x[(i, j)];
            }
        }

        // Normal equations: beta = (X'X)^-1 X'y
        let xtx = design.transpose() * &design;
        let xtx_inv = invert_spd(&xtx, self.rank_tolerance)?;

        let mut xty = Col::zeros(p);
        for j in 0..p {
            let mut sum = 0.0;
            for i in 0..n {
                sum += design[(i, j)] * y[i];
            }
            xty[j] = sum;
        }

        let mut beta = Col::zeros(p);
        for j in 0..p {
            let mut sum = 0.0;
            for l in 0..p {
                sum += xtx_inv[(j, l)] * xty[l];
            }
            beta[j] = sum;
        }

        let fitted_values = Col::from_fn(n, |i| {
            let mut pred = 0.0;
            for j in 0..p {
                pred += design[(i, j)] * beta[j];
            }
            pred
        });
        let residuals = Col::from_fn(n, |i| y[i] - fitted_values[i]);

        let rss: f64 = (0..n).map(|i| residuals[i] * residuals[i]).sum();
        let y_mean: f64 = (0..n).map(|i| y[i]).sum::<f64>() / n as f64;
        let tss: f64 = (0..n).map(|i| (y[i] - y_mean) * (y[i] - y_mean)).sum();

        let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { f64::NAN };
        let df = n - p;
        let adj_r_squared = if tss > 0.0 && df > 0 {
            1.0 - (rss / df as f64) / (tss / (n - 1) as f64)
        } else {
            f64::NAN
        };
        let mse = rss / n as f64;
        let rmse = mse.sqrt();

        let offset = usize::from(self.with_intercept);
        let intercept = self.with_intercept.then(|| beta[0]);
        let coefficients = Col::from_fn(n_features, |j| beta[j + offset]);

        let mut result = RegressionResult {
            coefficients,
            intercept,
            std_errors: None,
            intercept_std_error: None,
            t_statistics: None,
            p_values: None,
            conf_interval_lower: None,
            conf_interval_upper: None,
            confidence_level: self.confidence_level,
            r_squared,
            adj_r_squared,
            mse,
            rmse,
            residuals,
            fitted_values,
            n_observations: n,
            n_parameters: p,
        };

        if self.compute_inference {
            let sigma_sq = rss / df as f64;
            let full_se = Col::from_fn(p, |j| (sigma_sq * xtx_inv[(j, j)]).max(0.0).sqrt());

            let t_dist = StudentsT::new(0.0, 1.0, df as f64)
                .map_err(|e| RegressionError::NumericalError(e.to_string()))?;
            let t_crit = t_dist.inverse_cdf(1.0 - (1.0 - self.confidence_level) / 2.0);

            let se = Col::from_fn(n_features, |j| full_se[j + offset]);
            let t_stats = Col::from_fn(n_features, |j| {
                if se[j] > 0.0 {
                    result.coefficients[j] / se[j]
                } else {
                    f64::NAN
                }
            });
            let p_values = Col::from_fn(n_features, |j| {
                if t_stats[j].is_finite() {
                    2.0 * (1.0 - t_dist.cdf(t_stats[j].abs()))
                } else {
                    f64::NAN
                }
            });
            let ci_lower =
                Col::from_fn(n_features, |j| result.coefficients[j] - t_crit * se[j]);
            let ci_upper =
                Col::from_fn(n_features, |j| result.coefficients[j] + t_crit * se[j]);

            result.intercept_std_error = self.with_intercept.then(|| full_se[0]);
            result.std_errors = Some(se);
            result.t_statistics = Some(t_stats);
            result.p_values = Some(p_values);
            result.conf_interval_lower = Some(ci_lower);
            result.conf_interval_upper = Some(ci_upper);
        }

        Ok(FittedOls {
            result,
            with_intercept: self.with_intercept,
        })
    }
}

impl FittedOls {
    /// Whether the model was fit with an intercept.
    pub fn has_intercept(&self) -> bool {
        self.with_intercept
    }
}

/// Invert a symmetric positive semi-definite matrix by Gauss-Jordan
/// elimination with partial pivoting.
///
/// A pivot whose magnitude falls below `tol` times the largest initial
/// diagonal entry signals rank deficiency.
fn invert_spd(a: &Mat<f64>, tol: f64) -> Result<Mat<f64>, RegressionError> {
    let p = a.nrows();
    if a.ncols() != p {
        return Err(RegressionError::NumericalError(
            "matrix to invert is not square".to_string(),
        ));
    }

    let mut scale = 0.0f64;
    for j in 0..p {
        scale = scale.max(a[(j, j)].abs());
    }
    if scale == 0.0 {
        return Err(RegressionError::SingularMatrix);
    }
    let threshold = tol * scale;

    // Augment [A | I] and reduce in place.
    let mut work = Mat::zeros(p, 2 * p);
    for i in 0..p {
        for j in 0..p {
            work[(i, j)] = a[(i, j)];
        }
        work[(i, p + i)] = 1.0;
    }

    for col in 0..p {
        let mut pivot_row = col;
        let mut pivot_abs = work[(col, col)].abs();
        for row in (col + 1)..p {
            let candidate = work[(row, col)].abs();
            if candidate > pivot_abs {
                pivot_abs = candidate;
                pivot_row = row;
            }
        }
        if pivot_abs <= threshold || !pivot_abs.is_finite() {
            return Err(RegressionError::SingularMatrix);
        }
        if pivot_row != col {
            for j in 0..2 * p {
                let tmp = work[(col, j)];
                work[(col, j)] = work[(pivot_row, j)];
                work[(pivot_row, j)] = tmp;
            }
        }

        let pivot = work[(col, col)];
        for j in 0..2 * p {
            work[(col, j)] /= pivot;
        }
        for row in 0..p {
            if row == col {
                continue;
            }
            let factor = work[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * p {
                work[(row, j)] -= factor * work[(col, j)];
            }
        }
    }

    Ok(Mat::from_fn(p, p, |i, j| work[(i, p + j)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line_recovered() {
        // y = 2 + 3x, no noise
        let x = Mat::from_fn(10, 1, |i, _| i as f64);
        let y = Col::from_fn(10, |i| 2.0 + 3.0 * i as f64);

        let fitted = OlsRegressor::builder()
            .build()
            .fit(&x, &y)
            .unwrap();

        assert_relative_eq!(fitted.result().intercept.unwrap(), 2.0, epsilon = 1e-8);
        assert_relative_eq!(fitted.result().coefficients[0], 3.0, epsilon = 1e-8);
        assert_relative_eq!(fitted.result().r_squared, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_dimension_mismatch() {
        let x = Mat::from_fn(10, 1, |i, _| i as f64);
        let y = Col::from_fn(8, |i| i as f64);
        assert!(matches!(
            OlsRegressor::new().fit(&x, &y),
            Err(RegressionError::DimensionMismatch { x_rows: 10, y_len: 8 })
        ));
    }

    #[test]
    fn test_insufficient_observations() {
        let x = Mat::from_fn(2, 2, |i, j| (i + j) as f64);
        let y = Col::from_fn(2, |i| i as f64);
        assert!(matches!(
            OlsRegressor::new().fit(&x, &y),
            Err(RegressionError::InsufficientObservations { .. })
        ));
    }

    #[test]
    fn test_collinear_design_rejected() {
        // Second column is twice the first.
        let x = Mat::from_fn(20, 2, |i, j| (i + 1) as f64 * (j + 1) as f64);
        let y = Col::from_fn(20, |i| i as f64);
        assert!(matches!(
            OlsRegressor::new().fit(&x, &y),
            Err(RegressionError::SingularMatrix)
        ));
    }

    #[test]
    fn test_predict_matches_fitted_values() {
        let x = Mat::from_fn(15, 1, |i, _| i as f64 * 0.5);
        let y = Col::from_fn(15, |i| 1.0 + 0.7 * (i as f64 * 0.5) + ((i % 3) as f64 - 1.0) * 0.1);

        let fitted = OlsRegressor::new().fit(&x, &y).unwrap();
        let predictions = fitted.predict(&x);

        for i in 0..15 {
            assert_relative_eq!(
                predictions[i],
                fitted.result().fitted_values[i],
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn test_no_intercept_fit() {
        let x = Mat::from_fn(10, 1, |i, _| (i + 1) as f64);
        let y = Col::from_fn(10, |i| 2.5 * (i + 1) as f64);

        let fitted = OlsRegressor::builder()
            .with_intercept(false)
            .build()
            .fit(&x, &y)
            .unwrap();

        assert!(fitted.result().intercept.is_none());
        assert_relative_eq!(fitted.result().coefficients[0], 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_invert_spd_identity() {
        let a = Mat::from_fn(3, 3, |i, j| if i == j { 2.0 } else { 0.0 });
        let inv = invert_spd(&a, 1e-12).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 0.5 } else { 0.0 };
                assert_relative_eq!(inv[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }
}
