//! Common traits and errors for regression solvers.

use faer::{Col, Mat};
use thiserror::Error;

use crate::core::RegressionResult;

/// Errors raised while fitting a regression model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// Feature matrix and target have different numbers of rows.
    #[error("dimension mismatch: x has {x_rows} rows but y has {y_len} values")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    /// Too few observations for the requested fit.
    #[error("insufficient observations: needed {needed}, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    /// The design matrix is singular or rank deficient.
    #[error("design matrix is singular or rank deficient")]
    SingularMatrix,

    /// A numerical operation failed.
    #[error("numerical error: {0}")]
    NumericalError(String),
}

/// An unfitted regression estimator.
pub trait Regressor {
    /// The fitted-model type this estimator produces.
    type Fitted: FittedRegressor;

    /// Fit the model to a feature matrix and target vector.
    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted regression model.
pub trait FittedRegressor {
    /// The fit summary.
    fn result(&self) -> &RegressionResult;

    /// Predict responses for new data.
    fn predict(&self, x: &Mat<f64>) -> Col<f64>;
}
