//! Integration tests for jcurve-portfolio.
//!
//! These tests verify end-to-end aggregation over a realistic fund.

use approx::assert_relative_eq;
use jcurve_analytics::BackendChoice;
use jcurve_portfolio::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Creates a partially realized investment from flow pairs plus a holding
/// value.
fn deal(pairs: &[(f64, f64)], current_value: f64, valued_at_years: f64) -> Investment {
    Investment::new(
        CashFlowSeries::from_pairs(pairs).unwrap(),
        current_value,
        valued_at_years,
    )
    .unwrap()
}

/// Creates a fully realized investment from flow pairs.
fn realized_deal(pairs: &[(f64, f64)]) -> Investment {
    Investment::realized(CashFlowSeries::from_pairs(pairs).unwrap())
}

/// Creates a realistic four-deal fund.
///
/// - Alpha (buyout, realized): 12m in over two calls, 18m back
/// - Bravo (buyout, partial): 8m in, 3m back, holding 9m at year four
/// - Charlie (growth, unrealized): 5m in at year one, holding 7.5m
/// - Delta (ungrouped, underwater): 3m in, 0.5m back, holding 1m
fn create_fund() -> Vec<Investment> {
    vec![
        realized_deal(&[
            (0.0, -10_000_000.0),
            (0.5, -2_000_000.0),
            (2.0, 4_000_000.0),
            (3.5, 14_000_000.0),
        ])
        .with_group("buyout"),
        deal(
            &[(0.25, -8_000_000.0), (2.0, 3_000_000.0)],
            9_000_000.0,
            4.0,
        )
        .with_group("buyout"),
        deal(&[(1.0, -5_000_000.0)], 7_500_000.0, 4.0).with_group("growth"),
        deal(
            &[(1.5, -3_000_000.0), (3.0, 500_000.0)],
            1_000_000.0,
            4.0,
        ),
    ]
}

// =============================================================================
// MEMBER VALUATION TESTS
// =============================================================================

#[test]
fn test_members_value_independently() {
    let fund = create_fund();
    let results = evaluate_all(&fund, &AggregationConfig::default()).unwrap();

    assert_eq!(results.len(), 4);
    for result in &results {
        assert!(result.converged);
    }

    // Alpha returned 1.5x over 3.5 years, so its rate sits above 10%.
    assert!(results[0].rate.unwrap() > 0.1);
    // Charlie grew 5m to 7.5m over three years: (1.5)^(1/3) - 1.
    assert_relative_eq!(
        results[2].rate.unwrap(),
        1.5_f64.cbrt() - 1.0,
        max_relative = 1e-6
    );
    // Delta is underwater and prices at a negative rate.
    assert!(results[3].rate.unwrap() < 0.0);
}

#[test]
fn test_batch_matches_member_valuation() {
    let fund = create_fund();
    let config = AggregationConfig::default();

    let batch = evaluate_all(&fund, &config).unwrap();
    for (result, investment) in batch.iter().zip(&fund) {
        let direct = jcurve_analytics::evaluate(investment, &config.valuation).unwrap();
        assert_eq!(result, &direct);
    }
}

// =============================================================================
// PORTFOLIO AGGREGATION TESTS
// =============================================================================

#[test]
fn test_portfolio_totals_reconcile() {
    let fund = create_fund();
    let result = aggregate(&fund, &AggregationConfig::default()).unwrap();

    assert_eq!(result.member_count, 4);
    assert_relative_eq!(result.totals.invested, 28_000_000.0);
    assert_relative_eq!(result.totals.distributed, 21_500_000.0);
    assert_relative_eq!(result.totals.current_value, 17_500_000.0);
    assert_relative_eq!(result.totals.total_value(), 39_000_000.0);
}

#[test]
fn test_portfolio_multiples_from_summed_capital() {
    let fund = create_fund();
    let result = aggregate(&fund, &AggregationConfig::default()).unwrap();

    let m = result.multiples.unwrap();
    assert_relative_eq!(m.dpi, 21_500_000.0 / 28_000_000.0, max_relative = 1e-12);
    assert_relative_eq!(m.rvpi, 17_500_000.0 / 28_000_000.0, max_relative = 1e-12);
    assert_eq!(m.tvpi.to_bits(), (m.dpi + m.rvpi).to_bits());
    assert_eq!(m.moic.to_bits(), m.tvpi.to_bits());
}

#[test]
fn test_capital_weighting_beats_averaging() {
    // Members with multiples 1.2 and 1.4 on very different capital;
    // the pooled multiple weights the larger deal.
    let fund = vec![
        realized_deal(&[(0.0, -1_000_000.0), (1.0, 1_200_000.0)]),
        realized_deal(&[(0.0, -500_000.0), (1.0, 700_000.0)]),
    ];

    let result = aggregate(&fund, &AggregationConfig::default()).unwrap();
    let moic = result.multiples.unwrap().moic;
    assert_relative_eq!(moic, 1.9 / 1.5, max_relative = 1e-12);
    assert!((moic - 1.3).abs() > 0.03, "pooled multiple must not be the mean");
}

#[test]
fn test_pooled_rate_is_not_a_mean_of_member_rates() {
    // Member rates are 300% and 0%; their mean is 150%. The pooled
    // series is -400 now, +700 in a year, which prices at 75%.
    let fund = vec![
        realized_deal(&[(0.0, -100.0), (1.0, 400.0)]),
        realized_deal(&[(0.0, -300.0), (1.0, 300.0)]),
    ];

    let result = aggregate(&fund, &AggregationConfig::default()).unwrap();
    assert!(result.converged);
    let rate = result.rate.unwrap();
    assert_relative_eq!(rate, 0.75, max_relative = 1e-6);
    assert!((rate - 1.5).abs() > 0.5);
}

#[test]
fn test_pooling_identical_members_preserves_the_rate() {
    // Duplicating a deal scales every flow by the member count, which
    // leaves the root of the pooled value function unchanged.
    let single = vec![realized_deal(&[
        (0.0, -1_000_000.0),
        (1.0, 50_000.0),
        (2.0, 1_500_000.0),
    ])];
    let tripled = vec![single[0].clone(), single[0].clone(), single[0].clone()];
    let config = AggregationConfig::default();

    let one = aggregate(&single, &config).unwrap();
    let three = aggregate(&tripled, &config).unwrap();

    assert_relative_eq!(one.rate.unwrap(), 0.25, max_relative = 1e-9);
    assert_relative_eq!(
        three.rate.unwrap(),
        one.rate.unwrap(),
        max_relative = 1e-9
    );
    assert_relative_eq!(three.totals.invested, 3.0 * one.totals.invested);
}

// =============================================================================
// GROUPED AGGREGATION TESTS
// =============================================================================

#[test]
fn test_group_buckets() {
    let fund = create_fund();
    let grouped = aggregate_by_group(&fund, &AggregationConfig::default()).unwrap();

    assert_eq!(grouped.by_group.len(), 2);
    assert_eq!(grouped.by_group["buyout"].member_count, 2);
    assert_eq!(grouped.by_group["growth"].member_count, 1);
    assert_eq!(grouped.unclassified.unwrap().member_count, 1);
    assert_eq!(grouped.portfolio.member_count, 4);
}

#[test]
fn test_group_totals_reconcile_to_portfolio() {
    let fund = create_fund();
    let grouped = aggregate_by_group(&fund, &AggregationConfig::default()).unwrap();

    let mut invested = 0.0;
    let mut total_value = 0.0;
    for group in grouped.by_group.values() {
        invested += group.totals.invested;
        total_value += group.totals.total_value();
    }
    if let Some(rest) = grouped.unclassified {
        invested += rest.totals.invested;
        total_value += rest.totals.total_value();
    }

    assert_relative_eq!(invested, grouped.portfolio.totals.invested);
    assert_relative_eq!(total_value, grouped.portfolio.totals.total_value());
}

#[test]
fn test_each_group_prices_its_own_rate() {
    let fund = create_fund();
    let grouped = aggregate_by_group(&fund, &AggregationConfig::default()).unwrap();

    // Both real groups deployed capital and carry a sign change.
    assert!(grouped.by_group["buyout"].converged);
    assert!(grouped.by_group["growth"].converged);
    // The growth group is a single deal, so its pooled rate matches
    // the member's own rate.
    assert_relative_eq!(
        grouped.by_group["growth"].rate.unwrap(),
        1.5_f64.cbrt() - 1.0,
        max_relative = 1e-6
    );
    // The lone unclassified deal is underwater.
    assert!(grouped.unclassified.unwrap().rate.unwrap() < 0.0);
}

// =============================================================================
// CONFIGURATION TESTS
// =============================================================================

#[test]
fn test_sequential_and_threshold_paths_agree() {
    let fund = create_fund();
    let sequential = aggregate(&fund, &AggregationConfig::sequential()).unwrap();
    let eager = aggregate(&fund, &AggregationConfig::default().with_threshold(1)).unwrap();

    assert_eq!(sequential.member_count, eager.member_count);
    assert_relative_eq!(
        sequential.totals.invested,
        eager.totals.invested,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        sequential.rate.unwrap(),
        eager.rate.unwrap(),
        max_relative = 1e-9
    );
}

#[test]
fn test_backend_choice_does_not_move_the_rate() {
    let fund = create_fund();
    let reference = AggregationConfig::default()
        .with_valuation(ValuationConfig::default().with_backend(BackendChoice::Reference));
    let optimized = AggregationConfig::default()
        .with_valuation(ValuationConfig::default().with_backend(BackendChoice::Optimized));

    let a = aggregate(&fund, &reference).unwrap();
    let b = aggregate(&fund, &optimized).unwrap();

    assert!(a.converged && b.converged);
    assert_relative_eq!(a.rate.unwrap(), b.rate.unwrap(), max_relative = 1e-6);
    assert_eq!(a.multiples, b.multiples);
}

// =============================================================================
// INVARIANT TESTS
// =============================================================================

#[test]
fn test_tvpi_identity_holds_at_every_level() {
    let fund = create_fund();
    let grouped = aggregate_by_group(&fund, &AggregationConfig::default()).unwrap();

    let mut results: Vec<AggregateResult> = grouped.by_group.values().copied().collect();
    results.push(grouped.portfolio);
    if let Some(rest) = grouped.unclassified {
        results.push(rest);
    }

    for result in results {
        let m = result.multiples.unwrap();
        assert_eq!(m.tvpi.to_bits(), (m.dpi + m.rvpi).to_bits());
        assert_eq!(m.moic.to_bits(), m.tvpi.to_bits());
    }
}

#[test]
fn test_portfolio_totals_are_member_sums() {
    let fund = create_fund();
    let result = aggregate(&fund, &AggregationConfig::default()).unwrap();

    let invested: f64 = fund.iter().map(|i| i.totals().invested).sum();
    let distributed: f64 = fund.iter().map(|i| i.totals().distributed).sum();
    let current: f64 = fund.iter().map(|i| i.totals().current_value).sum();

    assert_relative_eq!(result.totals.invested, invested);
    assert_relative_eq!(result.totals.distributed, distributed);
    assert_relative_eq!(result.totals.current_value, current);
}
