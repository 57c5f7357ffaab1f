//! Error types for portfolio aggregation.

use thiserror::Error;

use jcurve_analytics::AnalyticsError;
use jcurve_core::CoreError;

/// Result type alias for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors arising from aggregation inputs or configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// A member's flows or values failed validation.
    #[error("invalid member input: {0}")]
    Core(#[from] CoreError),

    /// A valuation could not run with the given configuration.
    #[error("{0}")]
    Analytics(#[from] AnalyticsError),
}
