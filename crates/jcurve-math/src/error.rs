//! Error types for solver configuration.
//!
//! Numerical outcomes are never errors here: a solve that finds no root
//! reports that through [`RateSolution`](crate::solver::RateSolution).
//! `MathError` is reserved for configurations the solver cannot run with.

use thiserror::Error;

/// Result type alias for math operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors arising from invalid solver configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The solver configuration is unusable as given.
    #[error("invalid solver configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending setting.
        reason: String,
    },
}

impl MathError {
    /// Creates a [`MathError::InvalidConfig`] with the given reason.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
