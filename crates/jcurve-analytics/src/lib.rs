//! # jcurve Analytics
//!
//! Valuation engine for the jcurve private equity analytics library:
//!
//! - **Rate solving**: the annualized rate is the root of the net present
//!   value over an investment's flows, found by the hybrid solver in
//!   `jcurve-math`
//! - **Kernels**: interchangeable scalar and vectorized NPV evaluation,
//!   selected once per process against host capability
//! - **Multiples**: MOIC, DPI, RVPI, and TVPI over summed capital totals
//!
//! No-answer outcomes are values: flows without a sign change yield
//! `rate: None`, and zero invested capital yields `multiples: None`.
//! Errors are reserved for malformed inputs and unusable configuration.
//!
//! ## Feature flags
//!
//! - `simd` (default): compiles the vectorized NPV kernel; the host is
//!   still probed at runtime before it is used.
//!
//! ## Example
//!
//! ```rust
//! use jcurve_core::prelude::*;
//! use jcurve_analytics::prelude::*;
//!
//! let series = CashFlowSeries::from_pairs(&[
//!     (0.0, -1_000_000.0),
//!     (1.0, 50_000.0),
//!     (2.0, 1_500_000.0),
//! ])
//! .unwrap();
//!
//! let solution = solve_rate(&series, &ValuationConfig::default()).unwrap();
//! assert!(solution.converged);
//! assert!((solution.rate.unwrap() - 0.25).abs() < 1e-6);
//! ```

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
#![allow(clippy::unreadable_literal)]

pub mod backend;
pub mod error;
pub mod metrics;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::backend::{
        active_backend, backend_status, BackendChoice, BackendKind, BackendStatus,
        ValuationKernel,
    };
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::metrics::{capital_multiples, CapitalMultiples};
    pub use crate::valuation::{
        evaluate, npv, npv_derivative, solve_rate, ValuationConfig, ValuationResult,
    };
}

// Re-export commonly used items at crate root
pub use backend::{active_backend, backend_status, BackendChoice, BackendKind, BackendStatus};
pub use error::{AnalyticsError, AnalyticsResult};
pub use metrics::{capital_multiples, CapitalMultiples};
pub use valuation::{evaluate, npv, npv_derivative, solve_rate, ValuationConfig, ValuationResult};
