//! Resolution selection and solver options.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Base mesh resolution `[nx, ny, nz]` before the environment factor.
pub const BASE_RESOLUTION: [usize; 3] = [128, 64, 64];

/// Environment variable holding the integer resolution multiplier.
pub const RES_FACTOR_ENV: &str = "UW_RESFACTOR";

/// Read the resolution factor from [`RES_FACTOR_ENV`].
///
/// Any failure (unset variable, non-integer, non-positive value) falls
/// back to 1. A single catch-all, not differentiated by error kind.
pub fn resolution_factor() -> usize {
    std::env::var(RES_FACTOR_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&f| f >= 1)
        .unwrap_or(1)
}

/// Base resolution scaled by an explicit factor.
pub fn resolution_with_factor(factor: usize) -> [usize; 3] {
    [
        BASE_RESOLUTION[0] * factor,
        BASE_RESOLUTION[1] * factor,
        BASE_RESOLUTION[2] * factor,
    ]
}

/// Mesh resolution after applying the environment factor.
pub fn resolution() -> [usize; 3] {
    resolution_with_factor(resolution_factor())
}

/// Stokes solver selection recorded in the run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SolverKind {
    /// Multigrid ("mg").
    #[default]
    #[serde(rename = "mg")]
    Multigrid,
    /// Direct factorization.
    #[serde(rename = "direct")]
    Direct,
}

/// Solver options carried by the model and the checkpoint manifest.
///
/// The kinematic run loop does not iterate a nonlinear solve itself; these
/// are part of the configuration surface handed to the run and archived with
/// every checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Solver backend.
    #[serde(default)]
    pub solver: SolverKind,
    /// Nonlinear tolerance for the first solve.
    #[serde(default = "default_initial_tolerance")]
    pub initial_nonlinear_tolerance: f64,
    /// Nonlinear tolerance for subsequent solves.
    #[serde(default = "default_tolerance")]
    pub nonlinear_tolerance: f64,
}

fn default_initial_tolerance() -> f64 {
    1.0e-2
}

fn default_tolerance() -> f64 {
    1.0e-2
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            solver: SolverKind::default(),
            initial_nonlinear_tolerance: default_initial_tolerance(),
            nonlinear_tolerance: default_tolerance(),
        }
    }
}

impl SolverOptions {
    /// Validate option ranges.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, tol) in [
            ("initial_nonlinear_tolerance", self.initial_nonlinear_tolerance),
            ("nonlinear_tolerance", self.nonlinear_tolerance),
        ] {
            if !(tol > 0.0 && tol <= 1.0) {
                return Err(EngineError::Config(format!(
                    "{name} must be in (0, 1], got {tol}"
                )));
            }
        }
        Ok(())
    }
}
