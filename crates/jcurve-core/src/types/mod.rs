//! Domain types for private equity cash-flow analytics.
//!
//! - [`CashFlow`]: one signed cash movement at a year offset
//! - [`CashFlowSeries`]: immutable, time-ordered flows for one investment
//! - [`Investment`]: flow history plus residual value and group key
//! - [`CapitalTotals`]: summed invested/distributed/current-value amounts

mod cashflow;
mod investment;

pub use cashflow::{CashFlow, CashFlowSeries, DAYS_PER_YEAR};
pub use investment::{CapitalTotals, Investment};
