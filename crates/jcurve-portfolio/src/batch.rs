//! Batch valuation of investment collections.

use jcurve_analytics::valuation::{evaluate, ValuationResult};
use jcurve_core::Investment;

use crate::config::AggregationConfig;
use crate::error::PortfolioResult;
use crate::parallel::maybe_parallel_map;

/// Values every investment independently, preserving input order.
///
/// Members are valued with the configuration's valuation settings;
/// collections at or above the parallel threshold fan out across
/// threads when the `parallel` feature is enabled.
///
/// # Errors
///
/// Returns the first configuration error encountered. Member-level
/// no-answer outcomes stay values inside each [`ValuationResult`].
pub fn evaluate_all(
    investments: &[Investment],
    config: &AggregationConfig,
) -> PortfolioResult<Vec<ValuationResult>> {
    let results = maybe_parallel_map(investments, config, |investment| {
        evaluate(investment, &config.valuation)
    });
    results
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}
