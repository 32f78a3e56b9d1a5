//! Error taxonomy for the calibration pipeline.
//!
//! All errors are detected eagerly at the boundary of the offending
//! operation and surfaced immediately. There is no silent recovery: a
//! miscalibrated result is strictly worse than a raised error, so ambiguous
//! numerical states are either truncated by an explicit documented rule
//! (the variance-component clamp in the strength estimator) or raised here.

use thiserror::Error;

/// Errors raised by seed construction, sampling, fitting, and calibration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// Malformed seed or sampler parameters (`n == 0`, `delta < 0`,
    /// `sd <= 0`, non-finite inputs).
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Malformed dataset shape: ragged or empty columns, missing columns,
    /// non-finite values, degenerate samples.
    #[error("invalid data: {reason}")]
    InvalidData { reason: String },

    /// The target predictor does not appear in a candidate model
    /// specification.
    #[error("target predictor `{target}` is not a predictor of `{spec}`")]
    TargetNotInModel { target: String, spec: String },

    /// The design matrix of a candidate fit is rank deficient, so the
    /// target coefficient's standard error is undefined.
    #[error("rank-deficient design matrix for `{spec}`")]
    SingularFit { spec: String },

    /// Model-disagreement calibration needs at least two candidate models.
    #[error("model-disagreement calibration needs at least 2 candidate models, got {got}")]
    InsufficientModels { got: usize },

    /// No valid `t` reference distribution can be formed.
    #[error("insufficient degrees of freedom for a t reference: {dof}")]
    InsufficientDegreesOfFreedom { dof: usize },
}
