//! Portfolio and group aggregation.
//!
//! Aggregation follows one rule: sum capital first, compute ratios
//! once. The portfolio multiple is total value over total invested,
//! which weights every deal by the capital it deployed; a mean of
//! member multiples would let a small write-off move the headline as
//! much as a flagship exit. The portfolio rate is likewise solved over
//! the union of member flow series, pooled as if the portfolio were a
//! single investment, never averaged from member rates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use jcurve_analytics::metrics::{capital_multiples, CapitalMultiples};
use jcurve_analytics::valuation;
use jcurve_core::{CapitalTotals, CashFlowSeries, Investment};
use jcurve_math::solver::FailureReason;

use crate::config::AggregationConfig;
use crate::error::PortfolioResult;
use crate::parallel::{maybe_parallel_fold, maybe_parallel_map};

/// Aggregate KPIs for a collection of investments.
///
/// An empty collection aggregates to the default value: zero members,
/// zero totals, no rate, no multiples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Number of members aggregated.
    pub member_count: usize,
    /// Field-wise sum of member capital totals.
    pub totals: CapitalTotals,
    /// Pooled annualized rate over the union of member flows.
    pub rate: Option<f64>,
    /// Whether the pooled rate solve converged.
    pub converged: bool,
    /// Why the pooled solve gave up, when it ran and failed.
    pub failure: Option<FailureReason>,
    /// Multiples computed once from the summed totals.
    pub multiples: Option<CapitalMultiples>,
}

/// Aggregates keyed by group, with the whole-collection roll-up.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupedAggregates {
    /// One aggregate per group key.
    pub by_group: HashMap<String, AggregateResult>,
    /// Aggregate of members without a group key; absent when every
    /// member is classified.
    pub unclassified: Option<AggregateResult>,
    /// Aggregate of the full collection regardless of grouping.
    pub portfolio: AggregateResult,
}

/// Aggregates a collection into portfolio-level KPIs.
///
/// # Errors
///
/// Returns an error for an invalid valuation configuration. No-answer
/// outcomes (no pooled rate, nothing invested) are values in the
/// result.
pub fn aggregate(
    investments: &[Investment],
    config: &AggregationConfig,
) -> PortfolioResult<AggregateResult> {
    let members: Vec<&Investment> = investments.iter().collect();
    aggregate_members(&members, config)
}

/// Aggregates a collection bucketed by group key.
///
/// Each group is aggregated independently under the same rule as the
/// portfolio; members without a key land in the unclassified bucket.
///
/// # Errors
///
/// Returns an error for an invalid valuation configuration.
pub fn aggregate_by_group(
    investments: &[Investment],
    config: &AggregationConfig,
) -> PortfolioResult<GroupedAggregates> {
    let mut buckets: HashMap<String, Vec<&Investment>> = HashMap::new();
    let mut ungrouped: Vec<&Investment> = Vec::new();
    for investment in investments {
        match investment.group() {
            Some(group) => buckets
                .entry(group.to_string())
                .or_default()
                .push(investment),
            None => ungrouped.push(investment),
        }
    }

    let mut by_group = HashMap::with_capacity(buckets.len());
    for (group, members) in buckets {
        by_group.insert(group, aggregate_members(&members, config)?);
    }
    let unclassified = if ungrouped.is_empty() {
        None
    } else {
        Some(aggregate_members(&ungrouped, config)?)
    };

    Ok(GroupedAggregates {
        by_group,
        unclassified,
        portfolio: aggregate(investments, config)?,
    })
}

fn aggregate_members(
    members: &[&Investment],
    config: &AggregationConfig,
) -> PortfolioResult<AggregateResult> {
    if members.is_empty() {
        return Ok(AggregateResult::default());
    }

    let totals = maybe_parallel_fold(
        members,
        config,
        CapitalTotals::default(),
        |acc, member| acc + member.totals(),
        |a, b| a + b,
    );

    let series = maybe_parallel_map(members, config, |member| member.valuation_flows());
    let pooled = CashFlowSeries::union(&series)?;
    let solution = valuation::solve_rate(&pooled, &config.valuation)?;

    Ok(AggregateResult {
        member_count: members.len(),
        totals,
        rate: solution.rate,
        converged: solution.converged,
        failure: solution.failure,
        multiples: capital_multiples(&totals),
    })
}
