//! Bisection fallback phase of the hybrid solver.
//!
//! The bracket always opens over the full configured rate domain. When
//! the function crosses zero more than once inside it, the phase homes in
//! on whichever root the midpoint tests steer it toward; callers that
//! need a specific root must narrow the domain.

use super::{FailureReason, SolverConfig, SolverMethod, SolverState};

/// Opens the bisection phase over the configured rate domain.
///
/// Fails immediately when the function has the same strict sign at both
/// ends, since no bracket exists to narrow.
pub(crate) fn enter<F>(f: &F, config: &SolverConfig) -> SolverState
where
    F: Fn(f64) -> f64,
{
    let low = config.rate_min;
    let high = config.rate_max;
    let f_low = f(low);
    let f_high = f(high);
    if f_low * f_high > 0.0 {
        return SolverState::Failed {
            reason: FailureReason::NoBracket,
        };
    }
    SolverState::Bisection {
        low,
        high,
        f_low,
        iteration: 0,
    }
}

/// Advances one bisection iteration.
///
/// Checks, in order: the iteration cap, the residual at the midpoint, and
/// the width of the narrowed bracket. Width collapse accepts the bracket
/// midpoint even when its residual still exceeds tolerance.
pub(crate) fn step<F>(
    f: &F,
    config: &SolverConfig,
    low: f64,
    high: f64,
    f_low: f64,
    iteration: u32,
) -> SolverState
where
    F: Fn(f64) -> f64,
{
    if iteration >= config.max_bisection_iterations {
        return SolverState::Failed {
            reason: FailureReason::IterationLimit,
        };
    }

    let mid = (low + high) / 2.0;
    let f_mid = f(mid);
    if f_mid.abs() < config.tolerance {
        return SolverState::Converged {
            rate: mid,
            residual: f_mid.abs(),
            method: SolverMethod::Bisection,
        };
    }

    // Keep the half of the bracket where the sign change lives.
    let (low, high, f_low) = if f_mid * f_low < 0.0 {
        (low, mid, f_low)
    } else {
        (mid, high, f_mid)
    };

    if high - low < config.tolerance {
        let rate = (low + high) / 2.0;
        return SolverState::Converged {
            rate,
            residual: f(rate).abs(),
            method: SolverMethod::Bisection,
        };
    }

    SolverState::Bisection {
        low,
        high,
        f_low,
        iteration: iteration + 1,
    }
}
