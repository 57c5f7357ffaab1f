//! Property-based tests for aggregation invariants.
//!
//! These tests verify key mathematical properties that should always hold:
//! - Aggregate totals are field-wise sums of member totals
//! - The aggregate multiple is capital-weighted, bounded by member multiples
//! - TVPI is exactly DPI + RVPI, and MOIC is exactly TVPI
//! - Aggregation is deterministic and insensitive to member order
//! - Grouping covers every member exactly once

use jcurve_portfolio::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Generates a fund with N members with varying characteristics.
fn generate_fund(n: usize, seed: u64) -> Vec<Investment> {
    let groups = ["buyout", "growth", "venture", "credit"];
    let mut investments = Vec::with_capacity(n);

    for i in 0..n {
        // Use deterministic pseudo-random values based on seed and index
        let hash = simple_hash(seed, i as u64);

        let invested = 1_000_000.0 + (hash % 9_000_000) as f64;
        let hold_years = 1.0 + (hash % 28) as f64 / 4.0; // 1-8 years
        let multiple = 0.4 + (hash % 240) as f64 / 100.0; // 0.4x-2.8x
        let realized_share = (hash % 101) as f64 / 100.0; // 0-100%

        let total_value = invested * multiple;
        let distributed = total_value * realized_share;
        let current_value = total_value - distributed;

        let mut pairs = vec![(0.0, -invested)];
        if distributed > 0.0 {
            pairs.push((hold_years * 0.75, distributed));
        }

        let series = CashFlowSeries::from_pairs(&pairs).unwrap();
        let mut investment = Investment::new(series, current_value, hold_years).unwrap();
        if hash % 5 != 0 {
            investment = investment.with_group(groups[hash as usize % groups.len()]);
        }
        investments.push(investment);
    }

    investments
}

/// Simple deterministic hash for test data generation.
fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

fn close(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}

// =============================================================================
// PROPERTY: TOTALS ARE FIELD-WISE SUMS
// =============================================================================

#[test]
fn property_totals_are_member_sums() {
    let config = AggregationConfig::default();

    for seed in 0..10 {
        for size in [5, 10, 25, 50] {
            let fund = generate_fund(size, seed);
            let result = aggregate(&fund, &config).unwrap();

            let invested: f64 = fund.iter().map(|i| i.totals().invested).sum();
            let distributed: f64 = fund.iter().map(|i| i.totals().distributed).sum();
            let current: f64 = fund.iter().map(|i| i.totals().current_value).sum();

            assert_eq!(result.member_count, size);
            assert!(
                close(result.totals.invested, invested, 1e-12),
                "invested should be the member sum: {} vs {} for size={}, seed={}",
                result.totals.invested,
                invested,
                size,
                seed
            );
            assert!(
                close(result.totals.distributed, distributed, 1e-12),
                "distributed should be the member sum: {} vs {} for size={}, seed={}",
                result.totals.distributed,
                distributed,
                size,
                seed
            );
            assert!(
                close(result.totals.current_value, current, 1e-12),
                "current value should be the member sum: {} vs {} for size={}, seed={}",
                result.totals.current_value,
                current,
                size,
                seed
            );
        }
    }
}

// =============================================================================
// PROPERTY: AGGREGATE MULTIPLE IS CAPITAL-WEIGHTED
// =============================================================================

#[test]
fn property_multiple_is_capital_weighted() {
    let config = AggregationConfig::default();

    for seed in 0..10 {
        for size in [5, 10, 25, 50] {
            let fund = generate_fund(size, seed);
            let result = aggregate(&fund, &config).unwrap();

            let m = result.multiples.unwrap();
            let weighted = result.totals.total_value() / result.totals.invested;

            assert!(
                close(m.moic, weighted, 1e-12),
                "multiple should be total value over invested: {} vs {} for size={}, seed={}",
                m.moic,
                weighted,
                size,
                seed
            );
        }
    }
}

#[test]
fn property_multiple_is_bounded_by_members() {
    let config = AggregationConfig::default();

    for seed in 0..10 {
        for size in [5, 10, 25, 50] {
            let fund = generate_fund(size, seed);
            let result = aggregate(&fund, &config).unwrap();

            let member_multiples: Vec<f64> = fund
                .iter()
                .map(|i| {
                    let t = i.totals();
                    t.total_value() / t.invested
                })
                .collect();
            let min = member_multiples.iter().copied().fold(f64::INFINITY, f64::min);
            let max = member_multiples
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);

            let moic = result.multiples.unwrap().moic;
            assert!(
                moic >= min - 1e-9 && moic <= max + 1e-9,
                "capital-weighted multiple should lie within member range: {} not in [{}, {}] for size={}, seed={}",
                moic,
                min,
                max,
                size,
                seed
            );
        }
    }
}

// =============================================================================
// PROPERTY: TVPI = DPI + RVPI EXACTLY
// =============================================================================

#[test]
fn property_tvpi_is_exact_sum_of_dpi_and_rvpi() {
    let config = AggregationConfig::default();

    for seed in 0..10 {
        for size in [5, 10, 25, 50] {
            let fund = generate_fund(size, seed);
            let result = aggregate(&fund, &config).unwrap();

            let m = result.multiples.unwrap();
            assert_eq!(
                m.tvpi.to_bits(),
                (m.dpi + m.rvpi).to_bits(),
                "TVPI must be bit-identical to DPI + RVPI for size={}, seed={}",
                size,
                seed
            );
            assert_eq!(
                m.moic.to_bits(),
                m.tvpi.to_bits(),
                "MOIC must be bit-identical to TVPI for size={}, seed={}",
                size,
                seed
            );
        }
    }
}

// =============================================================================
// PROPERTY: AGGREGATION IS DETERMINISTIC
// =============================================================================

#[test]
fn property_aggregation_is_deterministic() {
    let config = AggregationConfig::default();

    for seed in 0..10 {
        for size in [5, 10, 25, 50] {
            let fund = generate_fund(size, seed);

            let first = aggregate(&fund, &config).unwrap();
            let second = aggregate(&fund, &config).unwrap();

            assert_eq!(
                first, second,
                "repeated aggregation should be identical for size={}, seed={}",
                size, seed
            );
        }
    }
}

#[test]
fn property_member_order_is_irrelevant() {
    let config = AggregationConfig::default();

    for seed in 0..10 {
        for size in [5, 10, 25] {
            let fund = generate_fund(size, seed);
            let mut reversed = fund.clone();
            reversed.reverse();

            let forward = aggregate(&fund, &config).unwrap();
            let backward = aggregate(&reversed, &config).unwrap();

            assert_eq!(forward.member_count, backward.member_count);
            assert!(
                close(forward.totals.invested, backward.totals.invested, 1e-12),
                "invested should not depend on order for size={}, seed={}",
                size,
                seed
            );
            assert!(
                forward.converged && backward.converged,
                "pooled solve should converge both ways for size={}, seed={}",
                size,
                seed
            );
            assert!(
                close(forward.rate.unwrap(), backward.rate.unwrap(), 1e-9),
                "pooled rate should not depend on order: {} vs {} for size={}, seed={}",
                forward.rate.unwrap(),
                backward.rate.unwrap(),
                size,
                seed
            );
        }
    }
}

// =============================================================================
// PROPERTY: POOLED RATE SOLVES THE UNION
// =============================================================================

#[test]
fn property_pooled_rate_prices_the_pool_to_zero() {
    let config = AggregationConfig::default();

    for seed in 0..5 {
        for size in [5, 10, 25] {
            let fund = generate_fund(size, seed);
            let result = aggregate(&fund, &config).unwrap();

            assert!(result.converged, "size={}, seed={}", size, seed);
            let rate = result.rate.unwrap();

            // Re-price every member flow at the pooled rate; the gross
            // magnitude scales the tolerance since pools carry millions.
            let mut npv = 0.0;
            let mut gross = 0.0;
            for investment in &fund {
                for flow in investment.valuation_flows().flows() {
                    let discounted = flow.amount() / (1.0 + rate).powf(flow.offset_years());
                    npv += discounted;
                    gross += discounted.abs();
                }
            }

            assert!(
                npv.abs() <= 1e-5 * gross.max(1.0),
                "pooled rate should zero the pooled value: npv={} gross={} for size={}, seed={}",
                npv,
                gross,
                size,
                seed
            );
        }
    }
}

// =============================================================================
// PROPERTY: GROUPING COVERS EVERY MEMBER
// =============================================================================

#[test]
fn property_grouping_covers_every_member() {
    let config = AggregationConfig::default();

    for seed in 0..10 {
        for size in [5, 10, 25, 50] {
            let fund = generate_fund(size, seed);
            let grouped = aggregate_by_group(&fund, &config).unwrap();

            let mut covered: usize = grouped.by_group.values().map(|r| r.member_count).sum();
            covered += grouped.unclassified.map_or(0, |r| r.member_count);

            assert_eq!(
                covered, size,
                "grouping should cover every member exactly once for size={}, seed={}",
                size, seed
            );
            assert_eq!(grouped.portfolio.member_count, size);

            for (group, result) in &grouped.by_group {
                assert!(
                    result.member_count > 0,
                    "group {} should never be empty for size={}, seed={}",
                    group,
                    size,
                    seed
                );
            }
        }
    }
}

#[test]
fn property_group_totals_reconcile() {
    let config = AggregationConfig::default();

    for seed in 0..10 {
        for size in [5, 10, 25, 50] {
            let fund = generate_fund(size, seed);
            let grouped = aggregate_by_group(&fund, &config).unwrap();

            let mut invested: f64 = grouped.by_group.values().map(|r| r.totals.invested).sum();
            invested += grouped.unclassified.map_or(0.0, |r| r.totals.invested);

            assert!(
                close(invested, grouped.portfolio.totals.invested, 1e-12),
                "group invested should reconcile to the portfolio: {} vs {} for size={}, seed={}",
                invested,
                grouped.portfolio.totals.invested,
                size,
                seed
            );
        }
    }
}

// =============================================================================
// PROPERTY: EMPTY COLLECTIONS AGGREGATE TO THE DEFAULT
// =============================================================================

#[test]
fn property_empty_fund_is_default() {
    let config = AggregationConfig::default();

    let result = aggregate(&[], &config).unwrap();
    assert_eq!(result, AggregateResult::default());

    let grouped = aggregate_by_group(&[], &config).unwrap();
    assert!(grouped.by_group.is_empty());
    assert_eq!(grouped.unclassified, None);
    assert_eq!(grouped.portfolio, AggregateResult::default());
}
