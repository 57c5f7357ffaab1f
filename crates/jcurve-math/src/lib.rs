//! # jcurve Math
//!
//! Root-finding for the jcurve private equity analytics library.
//!
//! The single export of substance is a hybrid rate solver: Newton-Raphson
//! from a configurable guess, falling back to bisection over a bounded
//! rate domain when Newton cannot make progress. The solver is written as
//! an explicit state machine so each transition (converge, hand off,
//! fail) can be observed and tested in isolation.
//!
//! This crate knows nothing about cash flows. Callers pass the valuation
//! function and its derivative as closures; see `jcurve-analytics` for
//! the net-present-value pairing.
//!
//! ## Example
//!
//! ```rust
//! use jcurve_math::prelude::*;
//!
//! // -100 now, +121 in two years: the annual rate is 10%.
//! let f = |r: f64| -100.0 + 121.0 / ((1.0 + r) * (1.0 + r));
//! let df = |r: f64| -242.0 / ((1.0 + r) * (1.0 + r) * (1.0 + r));
//!
//! let solution = solve_rate(f, df, &SolverConfig::default()).unwrap();
//! assert!(solution.converged);
//! assert!((solution.rate.unwrap() - 0.10).abs() < 1e-7);
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

pub mod error;
pub mod solver;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solver::{
        solve_rate, FailureReason, RateSolution, RateSolver, SolverConfig, SolverMethod,
        SolverState,
    };
}

// Re-export commonly used types at crate root
pub use error::{MathError, MathResult};
pub use solver::{solve_rate, RateSolution, RateSolver, SolverConfig};
