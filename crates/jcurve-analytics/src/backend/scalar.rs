//! Scalar reference NPV kernel.
//!
//! ## Formulas
//!
//! ```text
//! npv(r)  = Σ aᵢ / (1 + r)^tᵢ
//! npv'(r) = Σ -tᵢ · aᵢ / (1 + r)^(tᵢ + 1)
//! ```
//!
//! where `aᵢ` is the signed amount and `tᵢ` the year offset of flow `i`.

use jcurve_core::CashFlow;

use super::ValuationKernel;

/// Straightforward per-flow evaluation.
///
/// This kernel defines the semantics: the optimized kernel must agree
/// with it on rates to within solver tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel;

impl ValuationKernel for ScalarKernel {
    fn npv(&self, flows: &[CashFlow], rate: f64) -> f64 {
        let base = 1.0 + rate;
        flows
            .iter()
            .map(|flow| flow.amount() / base.powf(flow.offset_years()))
            .sum()
    }

    fn npv_derivative(&self, flows: &[CashFlow], rate: f64) -> f64 {
        let base = 1.0 + rate;
        flows
            .iter()
            .map(|flow| -flow.offset_years() * flow.amount() / base.powf(flow.offset_years() + 1.0))
            .sum()
    }

    fn name(&self) -> &'static str {
        "reference"
    }
}
