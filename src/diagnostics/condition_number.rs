//! Condition number of the design matrix.
//!
//! The condition number `κ(X) = σ_max / σ_min` measures how sensitive a
//! least-squares solve is to numerical error. Thresholds follow the usual
//! regression-diagnostics convention:
//!
//! - κ < 30: well-conditioned
//! - 30 ≤ κ < 100: moderate collinearity
//! - 100 ≤ κ < 1000: high collinearity
//! - κ ≥ 1000: severe collinearity
//!
//! # References
//!
//! - Belsley, D.A., Kuh, E. and Welsch, R.E. (1980). Regression Diagnostics.

use faer::Mat;

/// Severity classification of a design matrix's conditioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionSeverity {
    /// κ < 30: numerically stable.
    WellConditioned,
    /// 30 ≤ κ < 100: some instability possible.
    Moderate,
    /// 100 ≤ κ < 1000: instability likely.
    High,
    /// κ ≥ 1000 (or rank deficient): coefficients may be unreliable.
    Severe,
}

/// Compute the condition number of a design matrix.
///
/// # Arguments
///
/// * `x` - Feature matrix (n_samples x n_features)
/// * `with_intercept` - If true, prepend an intercept column
///
/// Returns `f64::INFINITY` for a rank-deficient matrix.
pub fn condition_number(x: &Mat<f64>, with_intercept: bool) -> f64 {
    let x_design = if with_intercept {
        let n = x.nrows();
        let p = x.ncols();
        let mut x_aug = Mat::zeros(n, p + 1);
        for i in 0..n {
            x_aug[(i, 0)] = 1.0;
            for j in 0..p {
                x_aug[(i, j + 1)] = x[(i, j)];
            }
        }
        x_aug
    } else {
        x.clone()
    };

    let svd = match x_design.svd() {
        Ok(svd) => svd,
        Err(_) => return f64::INFINITY,
    };
    let s = svd.S();
    let s_col = s.column_vector();

    let n_params = s_col.nrows();
    if n_params == 0 {
        return f64::INFINITY;
    }

    let mut s_max = f64::NEG_INFINITY;
    let mut s_min = f64::INFINITY;
    for i in 0..n_params {
        let si = s_col[i];
        if si > s_max {
            s_max = si;
        }
        if si < s_min {
            s_min = si;
        }
    }

    if s_min <= 0.0 || !s_min.is_finite() {
        return f64::INFINITY;
    }
    s_max / s_min
}

/// Classify a condition number into a severity bucket.
pub fn classify_condition_number(kappa: f64) -> ConditionSeverity {
    if kappa < 30.0 {
        ConditionSeverity::WellConditioned
    } else if kappa < 100.0 {
        ConditionSeverity::Moderate
    } else if kappa < 1000.0 {
        ConditionSeverity::High
    } else {
        ConditionSeverity::Severe
    }
}
