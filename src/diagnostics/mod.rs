//! Design-matrix diagnostics.
//!
//! Candidate model fits are annotated with the conditioning of their design
//! matrix, which separates exact rank deficiency (a hard `SingularFit`
//! error) from near-collinearity that merely degrades numerical precision.

mod condition_number;

pub use condition_number::{classify_condition_number, condition_number, ConditionSeverity};
