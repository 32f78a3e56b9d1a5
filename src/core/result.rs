//! Result types: the OLS fit summary and the calibrated report.

use std::fmt;

use faer::Col;

/// Summary statistics of one least-squares fit.
///
/// Inference fields (`std_errors` onward) are only populated when the
/// regressor was configured with `compute_inference(true)`.
#[derive(Debug, Clone)]
pub struct RegressionResult {
    /// Estimated coefficients (excluding intercept).
    pub coefficients: Col<f64>,
    /// Intercept term (`None` if the model was fit without one).
    pub intercept: Option<f64>,
    /// Standard errors of coefficients.
    pub std_errors: Option<Col<f64>>,
    /// Standard error of the intercept.
    pub intercept_std_error: Option<f64>,
    /// t-statistics for coefficients.
    pub t_statistics: Option<Col<f64>>,
    /// Two-sided p-values from the t-distribution.
    pub p_values: Option<Col<f64>>,
    /// Lower bounds of coefficient confidence intervals.
    pub conf_interval_lower: Option<Col<f64>>,
    /// Upper bounds of coefficient confidence intervals.
    pub conf_interval_upper: Option<Col<f64>>,
    /// Confidence level used for intervals (e.g., 0.95).
    pub confidence_level: f64,
    /// R-squared (coefficient of determination).
    pub r_squared: f64,
    /// Adjusted R-squared.
    pub adj_r_squared: f64,
    /// Mean squared error of the residuals.
    pub mse: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Residuals (`y - fitted_values`).
    pub residuals: Col<f64>,
    /// Fitted values on the training data.
    pub fitted_values: Col<f64>,
    /// Number of observations.
    pub n_observations: usize,
    /// Number of parameters (including intercept if present).
    pub n_parameters: usize,
}

impl RegressionResult {
    /// Residual degrees of freedom.
    pub fn residual_df(&self) -> usize {
        self.n_observations - self.n_parameters
    }
}

/// Which calibration mode produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationMode {
    /// Perturbation strength inferred from disagreement among candidate
    /// model fits.
    ModelDisagreement,
    /// Perturbation strength inferred from known population means of
    /// auxiliary covariates.
    BackgroundMoments,
}

/// The calibrated inference report.
///
/// Combines sampling and distributional uncertainty into one standard
/// error and test so that confidence intervals retain nominal coverage
/// despite the unknown perturbation strength.
#[derive(Debug, Clone)]
pub struct CalibratedResult {
    /// Calibrated point estimate of the target quantity.
    pub estimate: f64,
    /// Combined standard error (sampling plus excess variance).
    pub std_error: f64,
    /// Two-sided p-value from the `t(dof)` reference.
    pub p_value: f64,
    /// Inferred perturbation strength.
    pub delta_hat: f64,
    /// Test statistic `estimate / std_error`.
    pub t_statistic: f64,
    /// Confidence interval at `confidence_level`.
    pub conf_interval: (f64, f64),
    /// Degrees of freedom of the `t` reference (candidate models in
    /// disagreement mode, auxiliary covariates in background mode).
    pub dof: usize,
    /// Confidence level used for the interval.
    pub confidence_level: f64,
    /// Which calibration mode ran.
    pub mode: CalibrationMode,
}

impl fmt::Display for CalibratedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "estimate: {:.6}, std. error: {:.6}, p-value: {:.6}, delta_hat: {:.6}",
            self.estimate, self.std_error, self.p_value, self.delta_hat
        )
    }
}
