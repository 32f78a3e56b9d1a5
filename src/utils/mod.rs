//! Small moment helpers shared across the crate.

use faer::Col;

/// Arithmetic mean of a slice. Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with divisor `n - 1`. Returns 0.0 for fewer than two
/// values.
pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64
}

/// Arithmetic mean of a column vector.
pub fn col_mean(values: &Col<f64>) -> f64 {
    let n = values.nrows();
    if n == 0 {
        return f64::NAN;
    }
    (0..n).map(|i| values[i]).sum::<f64>() / n as f64
}

/// Sample variance of a column vector with divisor `n - 1`.
pub fn col_sample_variance(values: &Col<f64>) -> f64 {
    let n = values.nrows();
    if n < 2 {
        return 0.0;
    }
    let m = col_mean(values);
    (0..n).map(|i| (values[i] - m) * (values[i] - m)).sum::<f64>() / (n - 1) as f64
}
