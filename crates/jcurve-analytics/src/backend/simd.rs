//! Vectorized NPV kernel.
//!
//! Four flows are evaluated per step. Discount factors come from
//! `exp(t · ln(1 + r))` across the lanes, and amounts are divided by the
//! factors rather than multiplied by reciprocals so zero offsets and
//! rates near the domain floor behave like the scalar kernel. The
//! remainder after the four-wide chunks is evaluated with the scalar
//! kernel directly.

use wide::f64x4;

use jcurve_core::CashFlow;

use super::{scalar::ScalarKernel, ValuationKernel};

const LANES: usize = 4;

/// Four-lane NPV kernel built on portable SIMD.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimdKernel;

#[inline]
fn lane_offsets(chunk: &[CashFlow]) -> f64x4 {
    f64x4::from([
        chunk[0].offset_years(),
        chunk[1].offset_years(),
        chunk[2].offset_years(),
        chunk[3].offset_years(),
    ])
}

#[inline]
fn lane_amounts(chunk: &[CashFlow]) -> f64x4 {
    f64x4::from([
        chunk[0].amount(),
        chunk[1].amount(),
        chunk[2].amount(),
        chunk[3].amount(),
    ])
}

#[inline]
fn horizontal_sum(v: f64x4) -> f64 {
    v.to_array().iter().sum()
}

impl ValuationKernel for SimdKernel {
    fn npv(&self, flows: &[CashFlow], rate: f64) -> f64 {
        let log_base = (1.0 + rate).ln();
        let log_splat = f64x4::splat(log_base);
        let mut acc = f64x4::splat(0.0);

        let chunks = flows.chunks_exact(LANES);
        let remainder = chunks.remainder();
        for chunk in chunks {
            let discount = (lane_offsets(chunk) * log_splat).exp();
            acc += lane_amounts(chunk) / discount;
        }

        horizontal_sum(acc) + ScalarKernel.npv(remainder, rate)
    }

    fn npv_derivative(&self, flows: &[CashFlow], rate: f64) -> f64 {
        let log_base = (1.0 + rate).ln();
        let log_splat = f64x4::splat(log_base);
        let one = f64x4::splat(1.0);
        let mut acc = f64x4::splat(0.0);

        let chunks = flows.chunks_exact(LANES);
        let remainder = chunks.remainder();
        for chunk in chunks {
            let offsets = lane_offsets(chunk);
            let discount = ((offsets + one) * log_splat).exp();
            acc -= (offsets * lane_amounts(chunk)) / discount;
        }

        horizontal_sum(acc) + ScalarKernel.npv_derivative(remainder, rate)
    }

    fn name(&self) -> &'static str {
        "optimized"
    }
}
