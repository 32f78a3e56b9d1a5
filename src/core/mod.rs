//! Core types for calibrated inference.

mod dataset;
mod error;
mod estimate;
mod result;
mod spec;

pub use dataset::Dataset;
pub use error::CalibrationError;
pub use estimate::CandidateEstimate;
pub use result::{CalibratedResult, CalibrationMode, RegressionResult};
pub use spec::ModelSpec;
