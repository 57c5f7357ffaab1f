//! Investment valuation: rate solving paired with capital multiples.
//!
//! The annualized rate is the root of the net present value function
//! over an investment's flows, with the current holding value appended
//! as a final inflow. Inputs that cannot have a rate (fewer than two
//! flows, or flows that never change sign) are answered with absent
//! values rather than errors.

use serde::{Deserialize, Serialize};

use jcurve_core::{CapitalTotals, CashFlowSeries, Investment};
use jcurve_math::solver::{FailureReason, RateSolution, SolverConfig};

use crate::backend::{self, BackendChoice};
use crate::error::AnalyticsResult;
use crate::metrics::{capital_multiples, CapitalMultiples};

/// Settings for a valuation run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Root-solver settings.
    pub solver: SolverConfig,
    /// Kernel preference for NPV evaluation.
    pub backend: BackendChoice,
}

impl ValuationConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the solver settings.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the kernel preference.
    #[must_use]
    pub fn with_backend(mut self, backend: BackendChoice) -> Self {
        self.backend = backend;
        self
    }

    /// Checks that the configuration can drive a valuation.
    ///
    /// # Errors
    ///
    /// Returns an error if the solver settings fail
    /// [`SolverConfig::validate`].
    pub fn validate(&self) -> AnalyticsResult<()> {
        self.solver.validate()?;
        Ok(())
    }
}

/// The outcome of valuing one investment.
///
/// Absent fields are answers, not errors: `rate` is `None` when no rate
/// exists for the flows, and `multiples` is `None` when nothing was
/// invested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Annualized rate, when one exists.
    pub rate: Option<f64>,
    /// Whether the rate solve converged.
    pub converged: bool,
    /// Why the rate solve gave up, when it ran and failed.
    pub failure: Option<FailureReason>,
    /// Capital multiples, absent when nothing was invested.
    pub multiples: Option<CapitalMultiples>,
    /// The summed totals the multiples were computed from.
    pub totals: CapitalTotals,
}

/// Net present value of a flow series at `rate`.
pub fn npv(flows: &CashFlowSeries, rate: f64, config: &ValuationConfig) -> f64 {
    backend::kernel_for(backend::resolve(config.backend)).npv(flows.flows(), rate)
}

/// Derivative of [`npv`] with respect to `rate`.
pub fn npv_derivative(flows: &CashFlowSeries, rate: f64, config: &ValuationConfig) -> f64 {
    backend::kernel_for(backend::resolve(config.backend)).npv_derivative(flows.flows(), rate)
}

/// Solves for the annualized rate of a flow series.
///
/// A series with fewer than two flows has no meaningful rate equation;
/// the solve is skipped and a not-attempted solution returned. All other
/// no-answer outcomes come from the solver itself.
///
/// # Errors
///
/// Returns an error only for an invalid solver configuration.
pub fn solve_rate(
    flows: &CashFlowSeries,
    config: &ValuationConfig,
) -> AnalyticsResult<RateSolution> {
    if flows.flows().len() < 2 {
        return Ok(RateSolution::not_attempted());
    }
    let kernel = backend::kernel_for(backend::resolve(config.backend));
    let f = |rate: f64| kernel.npv(flows.flows(), rate);
    let df = |rate: f64| kernel.npv_derivative(flows.flows(), rate);
    Ok(jcurve_math::solver::solve_rate(f, df, &config.solver)?)
}

/// Values one investment end to end.
///
/// The rate is solved over the investment's flows with the current value
/// appended as a terminal inflow; the multiples come from the summed
/// capital totals.
///
/// # Errors
///
/// Returns an error only for an invalid solver configuration.
pub fn evaluate(
    investment: &Investment,
    config: &ValuationConfig,
) -> AnalyticsResult<ValuationResult> {
    let flows = investment.valuation_flows();
    let solution = solve_rate(&flows, config)?;
    let totals = investment.totals();
    Ok(ValuationResult {
        rate: solution.rate,
        converged: solution.converged,
        failure: solution.failure,
        multiples: capital_multiples(&totals),
        totals,
    })
}
