//! Error types for valuation operations.
//!
//! Only malformed inputs and unusable configurations are errors here.
//! Valuations that produce no answer (no solvable rate, no invested
//! capital) report that through result values.

use thiserror::Error;

use jcurve_core::CoreError;
use jcurve_math::MathError;

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors arising from valuation inputs or configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A flow container or investment failed validation.
    #[error("invalid input: {0}")]
    Core(#[from] CoreError),

    /// The solver configuration is unusable.
    #[error("{0}")]
    Math(#[from] MathError),
}
