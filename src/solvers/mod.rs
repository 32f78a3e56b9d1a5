//! Regression solvers.
//!
//! The calibration pipeline consumes the solver as a black box that returns
//! coefficient estimates and their classical standard errors; only ordinary
//! least squares is needed here.

mod ols;
mod traits;

pub use ols::{FittedOls, OlsRegressor, OlsRegressorBuilder};
pub use traits::{FittedRegressor, RegressionError, Regressor};
