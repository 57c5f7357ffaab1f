//! Signed cash movements and the immutable series they form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Days per year used when converting calendar dates to year offsets.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// A single signed cash movement.
///
/// The sign convention follows fund accounting: negative amounts are capital
/// deployed into the investment (contributions), positive amounts are capital
/// returned (distributions or residual value). Time is expressed as fractional
/// years from a caller-chosen epoch, typically the first movement.
///
/// # Example
///
/// ```rust
/// use jcurve_core::types::CashFlow;
///
/// let cf = CashFlow::contribution(0.0, 1_000_000.0);
/// assert_eq!(cf.amount(), -1_000_000.0);
/// assert!(cf.is_contribution());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Years from the series epoch (fractional, may be negative).
    offset_years: f64,
    /// Signed amount: negative = capital out, positive = capital in.
    amount: f64,
}

impl CashFlow {
    /// Creates a cash flow with an explicit signed amount.
    #[must_use]
    pub fn new(offset_years: f64, amount: f64) -> Self {
        Self {
            offset_years,
            amount,
        }
    }

    /// Creates a contribution (capital deployed); the amount is stored negative.
    #[must_use]
    pub fn contribution(offset_years: f64, amount: f64) -> Self {
        Self::new(offset_years, -amount.abs())
    }

    /// Creates a distribution (capital returned); the amount is stored positive.
    #[must_use]
    pub fn distribution(offset_years: f64, amount: f64) -> Self {
        Self::new(offset_years, amount.abs())
    }

    /// Returns the time offset in years from the series epoch.
    #[must_use]
    pub fn offset_years(&self) -> f64 {
        self.offset_years
    }

    /// Returns the signed amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns true if capital flowed out (negative amount).
    #[must_use]
    pub fn is_contribution(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if capital flowed in (positive amount).
    #[must_use]
    pub fn is_distribution(&self) -> bool {
        self.amount > 0.0
    }

    fn is_finite(&self) -> bool {
        self.offset_years.is_finite() && self.amount.is_finite()
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2} @ {:.4}y", self.amount, self.offset_years)
    }
}

/// An immutable, time-ordered series of cash flows for one investment.
///
/// Construction validates that every flow is finite and that the series is
/// non-empty, then sorts ascending by time offset (stable, so flows on the
/// same offset keep their input order). The series cannot be mutated
/// afterwards; operations that extend it return a new series.
///
/// A series with at least one contribution and one distribution admits a
/// solvable rate of return; degenerate shapes are still constructible and
/// yield an absent rate downstream.
///
/// # Example
///
/// ```rust
/// use jcurve_core::types::CashFlowSeries;
///
/// let series = CashFlowSeries::from_pairs(&[(1.0, 50_000.0), (0.0, -1_000_000.0)]).unwrap();
/// assert_eq!(series.flows()[0].amount(), -1_000_000.0);
/// assert!(series.has_sign_change());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSeries {
    /// Flows sorted ascending by offset.
    flows: Vec<CashFlow>,
}

impl CashFlowSeries {
    /// Creates a series from a collection of flows, validating and sorting.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptySeries`] for zero flows and
    /// [`CoreError::NonFiniteFlow`] if any flow carries a NaN or infinity.
    pub fn new(flows: Vec<CashFlow>) -> CoreResult<Self> {
        if flows.is_empty() {
            return Err(CoreError::EmptySeries);
        }
        for (index, flow) in flows.iter().enumerate() {
            if !flow.is_finite() {
                return Err(CoreError::non_finite_flow(
                    index,
                    flow.offset_years,
                    flow.amount,
                ));
            }
        }
        Ok(Self::from_validated(flows))
    }

    /// Wraps flows that are already known finite, sorting by offset.
    pub(crate) fn from_validated(mut flows: Vec<CashFlow>) -> Self {
        flows.sort_by(|a, b| a.offset_years.total_cmp(&b.offset_years));
        Self { flows }
    }

    /// Creates a series from `(offset_years, amount)` pairs.
    ///
    /// # Errors
    ///
    /// Same validation as [`CashFlowSeries::new`].
    pub fn from_pairs(pairs: &[(f64, f64)]) -> CoreResult<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(offset_years, amount)| CashFlow::new(offset_years, amount))
                .collect(),
        )
    }

    /// Creates a series from dated amounts.
    ///
    /// The earliest date becomes the epoch; offsets are signed day counts
    /// divided by [`DAYS_PER_YEAR`].
    ///
    /// # Errors
    ///
    /// Same validation as [`CashFlowSeries::new`].
    pub fn from_dated(dated: &[(NaiveDate, f64)]) -> CoreResult<Self> {
        let epoch = dated
            .iter()
            .map(|&(date, _)| date)
            .min()
            .ok_or(CoreError::EmptySeries)?;
        Self::new(
            dated
                .iter()
                .map(|&(date, amount)| {
                    let days = date.signed_duration_since(epoch).num_days() as f64;
                    CashFlow::new(days / DAYS_PER_YEAR, amount)
                })
                .collect(),
        )
    }

    /// Merges several series into one time-ordered series.
    ///
    /// All member series must share the same epoch convention; the union is
    /// what portfolio-level rate solving runs on.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptySeries`] when no flows are supplied.
    pub fn union<'a, I>(series: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = &'a CashFlowSeries>,
    {
        let mut flows = Vec::new();
        for member in series {
            flows.extend_from_slice(&member.flows);
        }
        if flows.is_empty() {
            return Err(CoreError::EmptySeries);
        }
        // Members were validated at construction; only re-sorting is needed.
        Ok(Self::from_validated(flows))
    }

    /// Returns the flows as a slice, sorted ascending by offset.
    #[must_use]
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Returns an iterator over the flows.
    pub fn iter(&self) -> impl Iterator<Item = &CashFlow> {
        self.flows.iter()
    }

    /// Returns the earliest flow.
    #[must_use]
    pub fn first(&self) -> CashFlow {
        self.flows[0]
    }

    /// Returns the latest flow.
    #[must_use]
    pub fn last(&self) -> CashFlow {
        self.flows[self.flows.len() - 1]
    }

    /// Returns the latest time offset in years.
    #[must_use]
    pub fn final_offset(&self) -> f64 {
        self.last().offset_years
    }

    /// Total capital deployed, as a positive number.
    #[must_use]
    pub fn total_contributed(&self) -> f64 {
        self.flows
            .iter()
            .filter(|flow| flow.is_contribution())
            .map(|flow| -flow.amount)
            .sum()
    }

    /// Total capital returned, as a positive number.
    #[must_use]
    pub fn total_distributed(&self) -> f64 {
        self.flows
            .iter()
            .filter(|flow| flow.is_distribution())
            .map(|flow| flow.amount)
            .sum()
    }

    /// Net sum of all signed amounts.
    #[must_use]
    pub fn net_total(&self) -> f64 {
        self.flows.iter().map(|flow| flow.amount).sum()
    }

    /// Returns true if the series holds both a contribution and a distribution.
    ///
    /// Without a sign change NPV is monotone in sign and no rate can zero it.
    #[must_use]
    pub fn has_sign_change(&self) -> bool {
        self.flows.iter().any(CashFlow::is_contribution)
            && self.flows.iter().any(CashFlow::is_distribution)
    }
}

impl<'a> IntoIterator for &'a CashFlowSeries {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

impl IntoIterator for CashFlowSeries {
    type Item = CashFlow;
    type IntoIter = std::vec::IntoIter<CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.into_iter()
    }
}

impl TryFrom<Vec<CashFlow>> for CashFlowSeries {
    type Error = CoreError;

    fn try_from(flows: Vec<CashFlow>) -> CoreResult<Self> {
        Self::new(flows)
    }
}
