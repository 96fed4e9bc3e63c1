//! Path loss exponent sweep feeding the range-vs-exponent plot.

use serde::{Deserialize, Serialize};

use super::error::ConfigurationError;
use super::path_loss::{PathLossModel, solve};
use super::units::km_to_ft;
use super::{MAX_PATH_LOSS_EXPONENT, MIN_PATH_LOSS_EXPONENT};

pub const DEFAULT_SWEEP_SAMPLES: usize = 100;
/// Upper bound on samples accepted by [`SweepDomain::validate`].
pub const MAX_SWEEP_SAMPLES: usize = 10_000;

/// Evenly spaced exponent samples over `[start, end]`, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepDomain {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for SweepDomain {
    fn default() -> Self {
        Self {
            start: MIN_PATH_LOSS_EXPONENT,
            end: MAX_PATH_LOSS_EXPONENT,
            samples: DEFAULT_SWEEP_SAMPLES,
        }
    }
}

impl SweepDomain {
    /// Check that the domain can be sampled inside the legal exponent range.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.samples < 2 {
            return Err(ConfigurationError::InvalidSweepDomain(format!(
                "at least 2 samples are required, got {}",
                self.samples
            )));
        }
        if self.samples > MAX_SWEEP_SAMPLES {
            return Err(ConfigurationError::InvalidSweepDomain(format!(
                "at most {} samples are allowed, got {}",
                MAX_SWEEP_SAMPLES, self.samples
            )));
        }
        if !(self.start < self.end) {
            return Err(ConfigurationError::InvalidSweepDomain(format!(
                "start {} must be less than end {}",
                self.start, self.end
            )));
        }
        let legal = MIN_PATH_LOSS_EXPONENT..=MAX_PATH_LOSS_EXPONENT;
        if !legal.contains(&self.start) || !legal.contains(&self.end) {
            return Err(ConfigurationError::InvalidSweepDomain(format!(
                "[{}, {}] leaves the exponent range [{}, {}]",
                self.start, self.end, MIN_PATH_LOSS_EXPONENT, MAX_PATH_LOSS_EXPONENT
            )));
        }
        Ok(())
    }

    /// Sample values in ascending index order.
    ///
    /// One sample yields `start`; zero samples yield nothing.
    pub fn exponents(&self) -> Vec<f64> {
        match self.samples {
            0 => Vec::new(),
            1 => vec![self.start],
            samples => {
                let last = (samples - 1) as f64;
                let step = (self.end - self.start) / last;
                (0..samples)
                    .map(|i| if i == samples - 1 { self.end } else { self.start + step * i as f64 })
                    .collect()
            }
        }
    }
}

/// One point of the sweep series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub exponent: f64,
    /// Plotted distance. Zero when the solver found no distance.
    pub distance_ft: f64,
    /// Whether the solver returned a real distance for this exponent.
    pub reachable: bool,
}

/// Solve the model at every exponent of `domain`.
///
/// Infeasible and undefined samples are clamped to 0 ft so the curve stays
/// continuous; `reachable` keeps them distinguishable. Points are computed
/// independently, in the order of [`SweepDomain::exponents`].
pub fn sweep(max_path_loss: f64, frequency_mhz: f64, model: PathLossModel, domain: &SweepDomain) -> Vec<SweepPoint> {
    domain
        .exponents()
        .into_iter()
        .map(|exponent| match solve(max_path_loss, frequency_mhz, exponent, model).distance_km() {
            Some(km) => SweepPoint {
                exponent,
                distance_ft: km_to_ft(km),
                reachable: true,
            },
            None => SweepPoint {
                exponent,
                distance_ft: 0.0,
                reachable: false,
            },
        })
        .collect()
}
