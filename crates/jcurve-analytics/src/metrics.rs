//! Capital multiple calculations.
//!
//! ## Formulas
//!
//! ```text
//! dpi  = distributed / invested
//! rvpi = current_value / invested
//! tvpi = dpi + rvpi
//! moic = tvpi
//! ```
//!
//! TVPI is defined as the sum of the two published ratios rather than as
//! a separate quotient, so `tvpi == dpi + rvpi` holds bit-for-bit and a
//! report that cross-foots the three columns always reconciles. MOIC is
//! the same number under a different name in this flow model, where
//! invested capital and paid-in capital coincide.

use serde::{Deserialize, Serialize};

use jcurve_core::CapitalTotals;

/// The standard private equity capital multiples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalMultiples {
    /// Multiple on invested capital. Carries the same value as `tvpi`.
    pub moic: f64,
    /// Distributions to paid-in: realized return per unit invested.
    pub dpi: f64,
    /// Residual value to paid-in: unrealized return per unit invested.
    pub rvpi: f64,
    /// Total value to paid-in, computed as `dpi + rvpi`.
    pub tvpi: f64,
}

/// Computes capital multiples from summed totals.
///
/// Returns `None` when nothing was invested: with a zero or negative
/// denominator the ratios are undefined, and absence is the honest
/// answer rather than zero, infinity, or an error.
pub fn capital_multiples(totals: &CapitalTotals) -> Option<CapitalMultiples> {
    if totals.invested <= 0.0 {
        return None;
    }
    let dpi = totals.distributed / totals.invested;
    let rvpi = totals.current_value / totals.invested;
    let tvpi = dpi + rvpi;
    Some(CapitalMultiples {
        moic: tvpi,
        dpi,
        rvpi,
        tvpi,
    })
}
