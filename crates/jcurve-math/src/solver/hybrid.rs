//! The composed Newton/bisection solver.

use crate::error::MathResult;

use super::{bisection, newton, RateSolution, SolverConfig, SolverState};

/// A steppable hybrid rate solver.
///
/// The solver owns the function, its derivative, and the current
/// [`SolverState`]. Each [`step`](Self::step) applies exactly one state
/// transition, so callers can drive the machine manually to observe the
/// Newton-to-bisection handoff, or call [`run`](Self::run) to advance to
/// a terminal state and summarize it.
pub struct RateSolver<F, D> {
    f: F,
    df: D,
    config: SolverConfig,
    state: SolverState,
    steps: u32,
}

impl<F, D> RateSolver<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    /// Creates a solver positioned at the Newton phase's starting guess.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidConfig`](crate::error::MathError) if
    /// the configuration fails [`SolverConfig::validate`].
    pub fn new(f: F, df: D, config: SolverConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self {
            f,
            df,
            state: SolverState::Newton {
                rate: config.initial_guess,
                iteration: 0,
            },
            config,
            steps: 0,
        })
    }

    /// The current state of the machine.
    #[must_use]
    pub fn state(&self) -> &SolverState {
        &self.state
    }

    /// State transitions taken so far.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Whether the machine has reached `Converged` or `Failed`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Applies one state transition. Terminal states are left untouched.
    pub fn step(&mut self) {
        let next = match self.state {
            SolverState::Newton { rate, iteration } => {
                newton::step(&self.f, &self.df, &self.config, rate, iteration)
            }
            SolverState::Bisection {
                low,
                high,
                f_low,
                iteration,
            } => bisection::step(&self.f, &self.config, low, high, f_low, iteration),
            SolverState::Converged { .. } | SolverState::Failed { .. } => return,
        };
        self.steps += 1;
        self.state = next;
    }

    /// Runs the machine to a terminal state and summarizes the outcome.
    ///
    /// Termination is guaranteed: the Newton phase hands off to bisection
    /// at its iteration cap, and the bisection phase fails at its own.
    #[must_use]
    pub fn run(mut self) -> RateSolution {
        loop {
            match self.state {
                SolverState::Converged {
                    rate,
                    residual,
                    method,
                } => return RateSolution::converged(rate, self.steps, residual, method),
                SolverState::Failed { reason } => {
                    return RateSolution::failed(self.steps, reason)
                }
                SolverState::Newton { .. } | SolverState::Bisection { .. } => self.step(),
            }
        }
    }
}

/// Solves `f(rate) = 0` with Newton-Raphson plus bisection fallback.
///
/// # Arguments
///
/// * `f` - The function whose root is sought
/// * `df` - The derivative of `f`
/// * `config` - Solver settings, validated before the solve starts
///
/// # Errors
///
/// Returns [`MathError::InvalidConfig`](crate::error::MathError) if the
/// configuration fails [`SolverConfig::validate`]. A solve that runs and
/// finds no root is not an error; see [`RateSolution`].
///
/// # Example
///
/// ```
/// use jcurve_math::solver::{solve_rate, SolverConfig};
///
/// // -100 now, +110 in one year: the rate is 10%.
/// let f = |r: f64| -100.0 + 110.0 / (1.0 + r);
/// let df = |r: f64| -110.0 / ((1.0 + r) * (1.0 + r));
/// let solution = solve_rate(f, df, &SolverConfig::default()).unwrap();
/// assert!(solution.converged);
/// assert!((solution.rate.unwrap() - 0.10).abs() < 1e-9);
/// ```
pub fn solve_rate<F, D>(f: F, df: D, config: &SolverConfig) -> MathResult<RateSolution>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    Ok(RateSolver::new(f, df, *config)?.run())
}
