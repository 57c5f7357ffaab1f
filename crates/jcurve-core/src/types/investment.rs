//! Per-investment input bundle and summed capital totals.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

use crate::error::{CoreError, CoreResult};

use super::cashflow::{CashFlow, CashFlowSeries};

/// One investment's cash-flow history, residual value, and optional group key.
///
/// `current_value` is the unrealized holding value as of `valued_at_years`
/// (same epoch as the flow series). Rate solving runs over
/// [`Investment::valuation_flows`], which treats a positive residual as a
/// final inflow at the valuation offset; capital multiples come from
/// [`Investment::totals`].
///
/// # Example
///
/// ```rust
/// use jcurve_core::types::{CashFlowSeries, Investment};
///
/// let flows = CashFlowSeries::from_pairs(&[(0.0, -1_000_000.0), (1.0, 250_000.0)]).unwrap();
/// let inv = Investment::new(flows, 1_500_000.0, 2.0)
///     .unwrap()
///     .with_group("Technology");
///
/// assert_eq!(inv.totals().invested, 1_000_000.0);
/// assert_eq!(inv.valuation_flows().flows().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Contribution and distribution history.
    flows: CashFlowSeries,
    /// Unrealized value held as of the valuation offset; zero once realized.
    current_value: f64,
    /// Valuation offset in years from the series epoch.
    valued_at_years: f64,
    /// Optional grouping key (sector, strategy, vintage, ...).
    group: Option<String>,
}

impl Investment {
    /// Creates an investment with an unrealized residual value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidValue`] when `current_value` is negative
    /// or either scalar is not finite.
    pub fn new(
        flows: CashFlowSeries,
        current_value: f64,
        valued_at_years: f64,
    ) -> CoreResult<Self> {
        if !current_value.is_finite() {
            return Err(CoreError::invalid_value(
                "current_value",
                current_value,
                "must be finite",
            ));
        }
        if current_value < 0.0 {
            return Err(CoreError::invalid_value(
                "current_value",
                current_value,
                "must be non-negative",
            ));
        }
        if !valued_at_years.is_finite() {
            return Err(CoreError::invalid_value(
                "valued_at_years",
                valued_at_years,
                "must be finite",
            ));
        }
        Ok(Self {
            flows,
            current_value,
            valued_at_years,
            group: None,
        })
    }

    /// Creates a fully realized investment: no residual value remains.
    #[must_use]
    pub fn realized(flows: CashFlowSeries) -> Self {
        let valued_at_years = flows.final_offset();
        Self {
            flows,
            current_value: 0.0,
            valued_at_years,
            group: None,
        }
    }

    /// Tags the investment with a grouping key.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Returns the cash-flow history.
    #[must_use]
    pub fn flows(&self) -> &CashFlowSeries {
        &self.flows
    }

    /// Returns the unrealized holding value.
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Returns the valuation offset in years.
    #[must_use]
    pub fn valued_at_years(&self) -> f64 {
        self.valued_at_years
    }

    /// Returns the grouping key, if any.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Returns the series the rate is solved over.
    ///
    /// A positive residual value is appended as a distribution at the
    /// valuation offset; a zero residual leaves the history untouched.
    #[must_use]
    pub fn valuation_flows(&self) -> CashFlowSeries {
        if self.current_value > 0.0 {
            let mut flows = self.flows.flows().to_vec();
            flows.push(CashFlow::new(self.valued_at_years, self.current_value));
            CashFlowSeries::from_validated(flows)
        } else {
            self.flows.clone()
        }
    }

    /// Sums the investment into capital totals by sign partition.
    #[must_use]
    pub fn totals(&self) -> CapitalTotals {
        CapitalTotals {
            invested: self.flows.total_contributed(),
            distributed: self.flows.total_distributed(),
            current_value: self.current_value,
        }
    }
}

/// Summed capital amounts for one investment or a whole collection.
///
/// All three fields are non-negative under the core sign convention.
/// Totals add field-wise, which is what capital-weighted aggregation sums
/// before computing ratios once.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapitalTotals {
    /// Capital deployed (positive).
    pub invested: f64,
    /// Capital returned (positive).
    pub distributed: f64,
    /// Unrealized holding value.
    pub current_value: f64,
}

impl CapitalTotals {
    /// Creates totals from the three summed components.
    #[must_use]
    pub fn new(invested: f64, distributed: f64, current_value: f64) -> Self {
        Self {
            invested,
            distributed,
            current_value,
        }
    }

    /// Realized plus unrealized value.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.distributed + self.current_value
    }

    /// Total value over capital deployed.
    #[must_use]
    pub fn net_gain(&self) -> f64 {
        self.total_value() - self.invested
    }
}

impl Add for CapitalTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            invested: self.invested + rhs.invested,
            distributed: self.distributed + rhs.distributed,
            current_value: self.current_value + rhs.current_value,
        }
    }
}

impl Sum for CapitalTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
