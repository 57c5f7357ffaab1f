//! Error types for jcurve core inputs.
//!
//! Errors here cover only malformed inputs: non-finite numbers, empty
//! series, negative holding values. "No IRR exists" and "metrics are
//! undefined" are representable answers, not errors, and never appear in
//! this enum.

use thiserror::Error;

/// A specialized Result type for core input validation.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for constructing core value types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A cash flow carried a NaN or infinite field.
    #[error("Cash flow {index} is not finite (offset {offset_years} years, amount {amount})")]
    NonFiniteFlow {
        /// Position of the offending flow in the input collection.
        index: usize,
        /// The flow's time offset in years.
        offset_years: f64,
        /// The flow's signed amount.
        amount: f64,
    },

    /// A cash-flow series was constructed from zero flows.
    #[error("Cash flow series must contain at least one flow")]
    EmptySeries,

    /// A scalar input was out of range or not finite.
    #[error("Invalid {field}: {value} - {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: String,
        /// The rejected value.
        value: f64,
        /// Reason for invalidity.
        reason: String,
    },
}

impl CoreError {
    /// Creates a non-finite flow error.
    #[must_use]
    pub fn non_finite_flow(index: usize, offset_years: f64, amount: f64) -> Self {
        Self::NonFiniteFlow {
            index,
            offset_years,
            amount,
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }
}
