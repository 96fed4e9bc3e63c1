//! Link budget parameters and reduction to a maximum allowable path loss.
//!
//! Units:
//! - Power: dBm
//! - Gains: dBi
//! - Losses and margins: dB
//! - Frequency: MHz

use serde::Serialize;

use super::error::ConfigurationError;
use super::path_loss::PathLossModel;
use super::{MAX_PATH_LOSS_EXPONENT, MIN_PATH_LOSS_EXPONENT};

/// Everything needed for one range evaluation.
///
/// Gains, losses and powers are unrestricted real numbers. Only
/// `frequency_mhz` and `path_loss_exponent` carry invariants, checked by
/// [`LinkParameters::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkParameters {
    /// Transmitter output power at the radio port (dBm).
    pub tx_power: f64,
    /// Transmit antenna gain (dBi).
    pub tx_antenna_gain: f64,
    /// Cable and connector loss on the transmit side (dB).
    pub tx_cable_loss: f64,
    /// Receive antenna gain (dBi).
    pub rx_antenna_gain: f64,
    /// Cable and connector loss on the receive side (dB).
    pub rx_cable_loss: f64,
    /// Allowance reserved for fading (dB).
    pub fade_margin: f64,
    /// Any other fixed loss in the path (dB).
    pub misc_loss: f64,
    /// Weakest signal the receiver can still decode (dBm).
    pub rx_sensitivity: f64,
    /// Carrier frequency (MHz). Must be strictly positive.
    pub frequency_mhz: f64,
    /// Path loss exponent (n), 2.0 for free space up to 10.0.
    pub path_loss_exponent: f64,
    /// Reference distance model used for the inversion.
    pub model: PathLossModel,
}

impl Default for LinkParameters {
    fn default() -> Self {
        Self {
            tx_power: 20.0,
            tx_antenna_gain: 0.0,
            tx_cable_loss: 0.0,
            rx_antenna_gain: 0.0,
            rx_cable_loss: 0.0,
            fade_margin: 0.0,
            misc_loss: 0.0,
            rx_sensitivity: -95.0,
            frequency_mhz: 2400.0,
            path_loss_exponent: 2.0,
            model: PathLossModel::default(),
        }
    }
}

impl LinkParameters {
    /// Maximum allowable path loss for these parameters (dB).
    pub fn max_path_loss(&self) -> f64 {
        reduce(
            self.tx_power,
            self.tx_antenna_gain,
            self.tx_cable_loss,
            self.rx_antenna_gain,
            self.rx_cable_loss,
            self.fade_margin,
            self.misc_loss,
            self.rx_sensitivity,
        )
    }

    /// Check the frequency and exponent invariants.
    ///
    /// NaN fails both checks.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.frequency_mhz.is_finite() && self.frequency_mhz > 0.0) {
            return Err(ConfigurationError::NonPositiveFrequency(self.frequency_mhz));
        }
        if !(MIN_PATH_LOSS_EXPONENT..=MAX_PATH_LOSS_EXPONENT).contains(&self.path_loss_exponent) {
            return Err(ConfigurationError::ExponentOutOfRange(self.path_loss_exponent));
        }
        Ok(())
    }

    /// Effective isotropic radiated power (dBm).
    pub fn eirp(&self) -> f64 {
        self.tx_power + self.tx_antenna_gain - self.tx_cable_loss
    }
}

/// Fold a link budget into the maximum path loss the link can tolerate.
///
/// # Formula
///
/// ```text
/// PL_max = P_tx + G_tx + G_rx - L_tx - L_rx - L_fade - L_misc - P_rx_sens
/// ```
///
/// At the maximum distance the received power equals the receiver
/// sensitivity, so whatever is left of the budget is what the path may
/// consume. A negative result means the sensitivity cannot be met at any
/// distance.
///
/// Implausible inputs are accepted as-is; the reduction never fails.
#[allow(clippy::too_many_arguments)]
pub fn reduce(
    tx_power: f64,
    tx_antenna_gain: f64,
    tx_cable_loss: f64,
    rx_antenna_gain: f64,
    rx_cable_loss: f64,
    fade_margin: f64,
    misc_loss: f64,
    rx_sensitivity: f64,
) -> f64 {
    tx_power + tx_antenna_gain + rx_antenna_gain - tx_cable_loss - rx_cable_loss - fade_margin - misc_loss - rx_sensitivity
}
