//! # jcurve Portfolio
//!
//! Portfolio and group aggregation for private equity investments.
//!
//! This crate rolls member-level investments up to portfolio and group
//! KPIs using the jcurve valuation stack.
//!
//! ## Design Philosophy
//!
//! - **Sum first, ratio once**: aggregate multiples come from summed
//!   capital totals, never from averaging member multiples
//! - **Pooled rates**: the portfolio rate is solved over the union of
//!   member flow series, as if the portfolio were one investment
//! - **No-answer outcomes are values**: an unpriceable pool or an
//!   uncalled portfolio yields `None` fields, not errors
//! - **Config-driven parallelism**: optional rayon support with
//!   threshold-based switching
//!
//! ## Example
//!
//! ```rust
//! use jcurve_portfolio::prelude::*;
//!
//! let members = vec![
//!     Investment::realized(
//!         CashFlowSeries::from_pairs(&[(0.0, -1_000_000.0), (1.0, 1_200_000.0)]).unwrap(),
//!     ),
//!     Investment::realized(
//!         CashFlowSeries::from_pairs(&[(0.0, -500_000.0), (1.0, 700_000.0)]).unwrap(),
//!     ),
//! ];
//!
//! let result = aggregate(&members, &AggregationConfig::default()).unwrap();
//! assert_eq!(result.member_count, 2);
//!
//! // 1.9m over 1.5m of invested capital, not the 1.3 mean of member multiples.
//! let moic = result.multiples.unwrap().moic;
//! assert!((moic - 1.9 / 1.5).abs() < 1e-12);
//! ```
//!
//! ## Module Overview
//!
//! - [`aggregate`] - Portfolio and per-group roll-ups
//! - [`batch`] - Independent valuation of every member
//! - [`config`] - Aggregation and parallelism settings
//! - [`error`] - Error types
//! - [`parallel`] - Threshold-gated sequential/parallel iteration
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing for large
//!   collections

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod aggregate;
pub mod batch;
pub mod config;
pub mod error;
pub mod parallel;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregate::{aggregate, aggregate_by_group, AggregateResult, GroupedAggregates};
    pub use crate::batch::evaluate_all;
    pub use crate::config::AggregationConfig;
    pub use crate::error::{PortfolioError, PortfolioResult};

    // Re-export the member-level types callers need to build inputs.
    pub use jcurve_analytics::valuation::{ValuationConfig, ValuationResult};
    pub use jcurve_core::{CashFlowSeries, Investment};
}

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export aggregation types and functions
pub use aggregate::{aggregate, aggregate_by_group, AggregateResult, GroupedAggregates};

// Re-export batch valuation
pub use batch::evaluate_all;

// Re-export configuration
pub use config::AggregationConfig;

// Re-export parallel utilities
pub use parallel::{maybe_parallel_fold, maybe_parallel_map};
