//! Newton-Raphson phase of the hybrid solver.

use super::{bisection, SolverConfig, SolverMethod, SolverState, DERIVATIVE_FLOOR};

/// Advances one Newton-Raphson iteration.
///
/// Convergence requires the residual to meet tolerance at a rate strictly
/// inside the domain. The phase is abandoned for bisection when the
/// derivative magnitude drops below [`DERIVATIVE_FLOOR`], when a step
/// stalls without reaching tolerance, or when the iteration cap is hit.
/// A stalled step whose re-evaluated residual does meet tolerance is
/// accepted as converged, even on the domain boundary.
pub(crate) fn step<F, D>(
    f: &F,
    df: &D,
    config: &SolverConfig,
    rate: f64,
    iteration: u32,
) -> SolverState
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    if iteration >= config.max_newton_iterations {
        return bisection::enter(f, config);
    }

    let value = f(rate);
    if value.abs() < config.tolerance && rate > config.rate_min && rate < config.rate_max {
        return SolverState::Converged {
            rate,
            residual: value.abs(),
            method: SolverMethod::Newton,
        };
    }

    let slope = df(rate);
    if slope.abs() < DERIVATIVE_FLOOR {
        return bisection::enter(f, config);
    }

    let next = config.clamp_rate(rate - value / slope);
    if (next - rate).abs() < config.tolerance {
        let residual = f(next).abs();
        if residual < config.tolerance {
            return SolverState::Converged {
                rate: next,
                residual,
                method: SolverMethod::Newton,
            };
        }
        return bisection::enter(f, config);
    }

    SolverState::Newton {
        rate: next,
        iteration: iteration + 1,
    }
}
