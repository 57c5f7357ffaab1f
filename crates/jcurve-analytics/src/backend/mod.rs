//! NPV kernel selection.
//!
//! Two interchangeable kernels evaluate present values over a flow
//! slice: a scalar reference implementation and a vectorized one behind
//! the `simd` feature. The host is probed once per process; the choice
//! is cached and every later query returns it. Requesting the optimized
//! kernel on a host that cannot run it falls back to the reference
//! kernel with an info-level log line, never an error.
//!
//! Both kernels implement the same two operations, and everything
//! downstream (rate solving, multiples) is shared code, so switching
//! kernels can only affect results through floating-point rounding in
//! the discount terms.

use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use jcurve_core::CashFlow;

mod scalar;
#[cfg(feature = "simd")]
mod simd;

pub use scalar::ScalarKernel;
#[cfg(feature = "simd")]
pub use simd::SimdKernel;

/// Cached outcome of the one-time host probe.
static ACTIVE_BACKEND: OnceLock<BackendKind> = OnceLock::new();

/// A present-value kernel over a sorted flow slice.
pub trait ValuationKernel: Send + Sync {
    /// Net present value of `flows` at `rate`.
    fn npv(&self, flows: &[CashFlow], rate: f64) -> f64;

    /// Derivative of [`npv`](Self::npv) with respect to `rate`.
    fn npv_derivative(&self, flows: &[CashFlow], rate: f64) -> f64;

    /// Short kernel name for logs and status reports.
    fn name(&self) -> &'static str;
}

/// Which kernel implementation is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Vectorized kernel.
    Optimized,
    /// Scalar kernel.
    Reference,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Optimized => write!(f, "optimized"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

/// Caller preference for kernel selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Use the optimized kernel whenever the host supports it.
    #[default]
    Auto,
    /// Prefer the optimized kernel; falls back to the reference kernel
    /// with a log line when it is compiled out or unsupported.
    Optimized,
    /// Always use the scalar reference kernel.
    Reference,
}

impl FromStr for BackendChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "optimized" => Ok(Self::Optimized),
            "reference" => Ok(Self::Reference),
            other => Err(format!(
                "unknown backend '{other}', expected auto, optimized, or reference"
            )),
        }
    }
}

/// Selection outcome reported by [`backend_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatus {
    /// Kernel the automatic probe settled on.
    pub active: BackendKind,
    /// Whether the optimized kernel was compiled in (`simd` feature).
    pub optimized_compiled: bool,
    /// Whether this host passed the capability probe.
    pub optimized_usable: bool,
}

/// Probes the host for vectorized kernel support.
#[allow(unreachable_code)]
fn probe_optimized() -> bool {
    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        return is_x86_feature_detected!("avx");
    }
    #[cfg(all(feature = "simd", target_arch = "aarch64"))]
    {
        // NEON is baseline on aarch64.
        return true;
    }
    false
}

/// The kernel kind the process-wide probe selected.
///
/// The first call probes the host and logs the selection; every later
/// call returns the cached choice. Per-call preferences (including a
/// forced kernel) never change it.
pub fn active_backend() -> BackendKind {
    *ACTIVE_BACKEND.get_or_init(|| {
        if probe_optimized() {
            log::info!("npv backend: optimized kernel selected");
            BackendKind::Optimized
        } else {
            log::info!("npv backend: optimized kernel unavailable, using reference");
            BackendKind::Reference
        }
    })
}

/// Reports the probe outcome without changing it.
pub fn backend_status() -> BackendStatus {
    let active = active_backend();
    BackendStatus {
        active,
        optimized_compiled: cfg!(feature = "simd"),
        optimized_usable: active == BackendKind::Optimized,
    }
}

/// Resolves a caller preference against host capability.
pub fn resolve(choice: BackendChoice) -> BackendKind {
    match choice {
        BackendChoice::Auto => active_backend(),
        BackendChoice::Reference => BackendKind::Reference,
        BackendChoice::Optimized => {
            if active_backend() == BackendKind::Optimized {
                BackendKind::Optimized
            } else {
                log::info!("optimized npv backend requested but unavailable, using reference");
                BackendKind::Reference
            }
        }
    }
}

/// Returns the kernel implementing `kind`.
///
/// With the `simd` feature compiled out, the optimized kind maps to the
/// scalar kernel; selection through [`resolve`] never produces it then,
/// but the mapping keeps direct calls total.
pub fn kernel_for(kind: BackendKind) -> &'static dyn ValuationKernel {
    match kind {
        #[cfg(feature = "simd")]
        BackendKind::Optimized => &SimdKernel,
        #[cfg(not(feature = "simd"))]
        BackendKind::Optimized => &ScalarKernel,
        BackendKind::Reference => &ScalarKernel,
    }
}
