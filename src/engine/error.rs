use std::fmt;

use super::{MAX_PATH_LOSS_EXPONENT, MIN_PATH_LOSS_EXPONENT};

/// Parameter combinations rejected before the solver runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Frequency is zero, negative or not a number (MHz).
    NonPositiveFrequency(f64),
    /// Path loss exponent outside the legal range.
    ExponentOutOfRange(f64),
    /// Sweep domain cannot be sampled.
    InvalidSweepDomain(String),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::NonPositiveFrequency(freq) => {
                write!(f, "Frequency must be a positive number (got {} MHz).", freq)
            }
            ConfigurationError::ExponentOutOfRange(n) => write!(
                f,
                "Path loss exponent must be between {} and {} (got {}).",
                MIN_PATH_LOSS_EXPONENT, MAX_PATH_LOSS_EXPONENT, n
            ),
            ConfigurationError::InvalidSweepDomain(msg) => write!(f, "Invalid sweep domain: {}", msg),
        }
    }
}

impl std::error::Error for ConfigurationError {}
