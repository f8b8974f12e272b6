// src/simulation/config.rs

use crate::error::{PlannerError, Result};

/// Settings shared by every optimization run from one optimizer.
///
/// Build through [`OptimizerConfig::new`] (or `Default`) so the bounds are
/// always validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig {
    z_clip: (f64, f64),
    sigma_min: f64,
}

impl OptimizerConfig {
    pub fn new(z_clip: (f64, f64), sigma_min: f64) -> Result<Self> {
        let (low, high) = z_clip;
        if !low.is_finite() || !high.is_finite() {
            return Err(PlannerError::invalid_configuration(format!(
                "z_clip bounds must be finite, got ({low}, {high})"
            )));
        }
        if low >= high {
            return Err(PlannerError::invalid_configuration(format!(
                "z_clip low ({low}) must be below high ({high})"
            )));
        }
        if !sigma_min.is_finite() || sigma_min <= 0.0 {
            return Err(PlannerError::invalid_configuration(format!(
                "sigma_min must be a positive number, got {sigma_min}"
            )));
        }
        Ok(Self { z_clip, sigma_min })
    }

    /// Range the balanced-cost z-score is clipped into.
    pub fn z_clip(&self) -> (f64, f64) {
        self.z_clip
    }

    /// Floor applied to every demand standard deviation.
    pub fn sigma_min(&self) -> f64 {
        self.sigma_min
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            z_clip: (-3.0, 3.0),
            sigma_min: 0.1,
        }
    }
}

/// Settings for the simulated expected-cost audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloConfig {
    samples: usize,
    /// `None` seeds from entropy; runs are then not reproducible.
    seed: Option<u64>,
}

impl MonteCarloConfig {
    pub fn new(samples: usize, seed: Option<u64>) -> Result<Self> {
        if samples == 0 {
            return Err(PlannerError::invalid_configuration(
                "monte carlo audit needs at least one sample",
            ));
        }
        Ok(Self { samples, seed })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            seed: None,
        }
    }
}
