//! Aggregation configuration.

use serde::{Deserialize, Serialize};

use jcurve_analytics::ValuationConfig;

/// Configuration for portfolio aggregation.
///
/// Controls parallelism and the valuation settings applied to members
/// and to the portfolio-level rate solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Enable parallel processing (requires the `parallel` feature).
    pub parallel: bool,

    /// Minimum member count to trigger parallel processing. Below this,
    /// sequential is faster due to thread overhead.
    pub parallel_threshold: usize,

    /// Valuation settings shared by member and portfolio solves.
    pub valuation: ValuationConfig,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 64,
            valuation: ValuationConfig::default(),
        }
    }
}

impl AggregationConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with parallel processing disabled.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the minimum member count for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Replaces the valuation settings.
    #[must_use]
    pub fn with_valuation(mut self, valuation: ValuationConfig) -> Self {
        self.valuation = valuation;
        self
    }

    /// Whether a collection of `count` members should be processed in
    /// parallel under this configuration.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}
