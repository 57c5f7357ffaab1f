//! Hybrid root-finding for valuation rates.
//!
//! The solver is a small state machine: it opens with Newton-Raphson from
//! a configurable guess and hands off to bisection over the configured
//! rate domain whenever Newton stops making progress (flat derivative,
//! stalled step, or iteration cap). Each transition is a pure function of
//! the current [`SolverState`], which keeps every branch inspectable and
//! testable on its own.
//!
//! Terminal outcomes are values, not errors: a solve that finds no root
//! returns a [`RateSolution`] with `converged = false` and a
//! [`FailureReason`]. `Err` is reserved for configurations the machine
//! cannot start from (see [`SolverConfig::validate`]).

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

mod bisection;
mod hybrid;
mod newton;

pub use hybrid::{solve_rate, RateSolver};

/// Default starting guess for the Newton phase (10% annual rate).
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;

/// Default convergence tolerance on both residual and step size.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Default iteration cap for the Newton phase.
pub const DEFAULT_MAX_NEWTON_ITERATIONS: u32 = 50;

/// Default iteration cap for the bisection phase.
pub const DEFAULT_MAX_BISECTION_ITERATIONS: u32 = 100;

/// Default lower bound of the searchable rate domain.
///
/// Rates at or below −100% make the discount base `1 + r` non-positive,
/// so the domain floor sits just above it.
pub const DEFAULT_RATE_MIN: f64 = -0.999;

/// Default upper bound of the searchable rate domain (1000% annual rate).
pub const DEFAULT_RATE_MAX: f64 = 10.0;

/// Derivative magnitudes below this abandon Newton for bisection.
pub const DERIVATIVE_FLOOR: f64 = 1e-10;

/// Which phase of the hybrid solver produced a converged rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverMethod {
    /// Converged during the Newton-Raphson phase.
    Newton,
    /// Converged during the bisection fallback phase.
    Bisection,
}

impl std::fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Newton => write!(f, "Newton-Raphson"),
            Self::Bisection => write!(f, "Bisection"),
        }
    }
}

/// Why a solve terminated without a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// The function has the same sign at both ends of the rate domain, so
    /// bisection has no bracket to work with.
    NoBracket,
    /// The bisection phase exhausted its iteration cap without meeting
    /// the tolerance.
    IterationLimit,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoBracket => write!(f, "no sign change over the rate domain"),
            Self::IterationLimit => write!(f, "iteration limit reached"),
        }
    }
}

/// A state of the hybrid solver.
///
/// `Newton` and `Bisection` are working states; `Converged` and `Failed`
/// are terminal. [`RateSolver::step`] maps a working state to its
/// successor and leaves terminal states untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverState {
    /// Newton-Raphson iteration in progress.
    Newton {
        /// Current rate estimate.
        rate: f64,
        /// Newton iterations completed so far.
        iteration: u32,
    },
    /// Bisection over a sign-changing bracket in progress.
    Bisection {
        /// Lower end of the current bracket.
        low: f64,
        /// Upper end of the current bracket.
        high: f64,
        /// Function value at `low`, cached to avoid re-evaluation.
        f_low: f64,
        /// Bisection iterations completed so far.
        iteration: u32,
    },
    /// A root was found within tolerance.
    Converged {
        /// The solved rate.
        rate: f64,
        /// `|f(rate)|` at the solved rate.
        residual: f64,
        /// The phase that produced the rate.
        method: SolverMethod,
    },
    /// No root could be found.
    Failed {
        /// Why the solve gave up.
        reason: FailureReason,
    },
}

impl SolverState {
    /// Returns `true` for `Converged` and `Failed` states.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converged { .. } | Self::Failed { .. })
    }
}

/// Configuration for the hybrid rate solver.
///
/// All settings have defaults tuned for annualized investment rates;
/// override individual settings through the `with_*` builders.
///
/// ```
/// use jcurve_math::solver::SolverConfig;
///
/// let config = SolverConfig::new()
///     .with_tolerance(1e-9)
///     .with_rate_domain(-0.5, 5.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Starting rate for the Newton phase.
    pub initial_guess: f64,
    /// Convergence tolerance applied to residuals, step sizes, and
    /// bracket widths.
    pub tolerance: f64,
    /// Iteration cap for the Newton phase. Zero is legal and routes the
    /// solve straight to bisection.
    pub max_newton_iterations: u32,
    /// Iteration cap for the bisection phase. Must be at least 1.
    pub max_bisection_iterations: u32,
    /// Lower bound of the searchable rate domain. Must exceed −1.
    pub rate_min: f64,
    /// Upper bound of the searchable rate domain.
    pub rate_max: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            tolerance: DEFAULT_TOLERANCE,
            max_newton_iterations: DEFAULT_MAX_NEWTON_ITERATIONS,
            max_bisection_iterations: DEFAULT_MAX_BISECTION_ITERATIONS,
            rate_min: DEFAULT_RATE_MIN,
            rate_max: DEFAULT_RATE_MAX,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting guess for the Newton phase.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the Newton phase iteration cap.
    #[must_use]
    pub fn with_max_newton_iterations(mut self, cap: u32) -> Self {
        self.max_newton_iterations = cap;
        self
    }

    /// Sets the bisection phase iteration cap.
    #[must_use]
    pub fn with_max_bisection_iterations(mut self, cap: u32) -> Self {
        self.max_bisection_iterations = cap;
        self
    }

    /// Sets both ends of the searchable rate domain.
    #[must_use]
    pub fn with_rate_domain(mut self, min: f64, max: f64) -> Self {
        self.rate_min = min;
        self.rate_max = max;
        self
    }

    /// Checks that the configuration can drive a solve.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::InvalidConfig`] if the tolerance is not a
    /// positive finite number, the guess or domain bounds are non-finite,
    /// the domain is inverted or reaches −1, or the bisection cap is zero.
    pub fn validate(&self) -> MathResult<()> {
        if !self.initial_guess.is_finite() {
            return Err(MathError::invalid_config(format!(
                "initial guess must be finite, got {}",
                self.initial_guess
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(MathError::invalid_config(format!(
                "tolerance must be positive and finite, got {:e}",
                self.tolerance
            )));
        }
        if self.max_bisection_iterations == 0 {
            return Err(MathError::invalid_config(
                "bisection iteration cap must be at least 1",
            ));
        }
        if !self.rate_min.is_finite() || !self.rate_max.is_finite() {
            return Err(MathError::invalid_config(format!(
                "rate domain bounds must be finite, got [{}, {}]",
                self.rate_min, self.rate_max
            )));
        }
        if self.rate_min <= -1.0 {
            return Err(MathError::invalid_config(format!(
                "rate domain lower bound must exceed -1, got {}",
                self.rate_min
            )));
        }
        if self.rate_max <= self.rate_min {
            return Err(MathError::invalid_config(format!(
                "rate domain is inverted: [{}, {}]",
                self.rate_min, self.rate_max
            )));
        }
        Ok(())
    }

    /// Clamps a proposed rate into the configured domain.
    ///
    /// The min/max ordering sends a NaN step to the upper bound rather
    /// than letting it propagate through later iterations.
    pub(crate) fn clamp_rate(&self, rate: f64) -> f64 {
        rate.min(self.rate_max).max(self.rate_min)
    }
}

/// The outcome of a completed solve.
///
/// `rate` and `residual` are present exactly when `converged` is true;
/// `failure` is present exactly when the solver ran and gave up. A
/// solution with neither (`iterations == 0`) means no solve was
/// attempted, which callers use for inputs that cannot have a rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSolution {
    /// The solved rate, if one was found.
    pub rate: Option<f64>,
    /// Whether the solver met its tolerance.
    pub converged: bool,
    /// Total state transitions taken across both phases.
    pub iterations: u32,
    /// `|f(rate)|` at the solved rate, if one was found.
    pub residual: Option<f64>,
    /// The phase that produced the rate, if one was found.
    pub method: Option<SolverMethod>,
    /// Why the solve gave up, if it did.
    pub failure: Option<FailureReason>,
}

impl RateSolution {
    /// A solution for a converged solve.
    #[must_use]
    pub fn converged(rate: f64, iterations: u32, residual: f64, method: SolverMethod) -> Self {
        Self {
            rate: Some(rate),
            converged: true,
            iterations,
            residual: Some(residual),
            method: Some(method),
            failure: None,
        }
    }

    /// A solution for a solve that ran and found no root.
    #[must_use]
    pub fn failed(iterations: u32, reason: FailureReason) -> Self {
        Self {
            rate: None,
            converged: false,
            iterations,
            residual: None,
            method: None,
            failure: Some(reason),
        }
    }

    /// A solution recording that no solve was attempted.
    #[must_use]
    pub fn not_attempted() -> Self {
        Self {
            rate: None,
            converged: false,
            iterations: 0,
            residual: None,
            method: None,
            failure: None,
        }
    }
}
