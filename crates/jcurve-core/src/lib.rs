//! # jcurve Core
//!
//! Core types for the jcurve private equity analytics library.
//!
//! This crate provides the foundational building blocks used throughout
//! jcurve:
//!
//! - **Cash flows**: signed movements with fractional-year offsets
//! - **Series**: immutable, sorted per-investment flow collections
//! - **Investments**: flow history plus residual value and grouping key
//! - **Capital totals**: the summable invested/distributed/current triple
//!
//! Sign convention everywhere: negative amounts are capital deployed,
//! positive amounts are capital returned. "No answer" outcomes (no solvable
//! rate, undefined multiples) are values in the downstream crates, never
//! errors; errors here are reserved for malformed inputs.
//!
//! ## Example
//!
//! ```rust
//! use jcurve_core::prelude::*;
//!
//! let flows = CashFlowSeries::from_pairs(&[
//!     (0.0, -1_000_000.0),
//!     (1.0, 50_000.0),
//!     (2.0, 1_500_000.0),
//! ])
//! .unwrap();
//! assert!(flows.has_sign_change());
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

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{CapitalTotals, CashFlow, CashFlowSeries, Investment, DAYS_PER_YEAR};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{CapitalTotals, CashFlow, CashFlowSeries, Investment};
