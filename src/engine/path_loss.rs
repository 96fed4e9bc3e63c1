//! Log-distance path loss models and their inversion.
//!
//! Both supported models are forms of
//!
//! ```text
//! PL(d) = PL(d₀) + 10 × n × log₁₀(d/d₀)
//! ```
//!
//! anchored at a reference distance d₀ of 1 meter or 1 kilometer. The
//! reference loss PL(d₀) is folded into a frequency term `20 × log₁₀(f_MHz)`
//! plus a per-model constant, so the solver only needs the model's constant
//! and the scale of its distance unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::units::km_to_m;

/// Free-space reference constant for the 1 meter model (dB).
const REFERENCE_1M_OFFSET: f64 = 27.55;
/// Free-space reference constant for the 1 kilometer model (dB).
const REFERENCE_1KM_OFFSET: f64 = 32.44;

/// Reference distance variant of the log-distance model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathLossModel {
    /// `PL(d) = 20 log₁₀(f) − 27.55 + 10n log₁₀(d_m)`.
    ///
    /// Common for indoor and short-range analysis.
    #[default]
    #[serde(rename = "1m")]
    ReferenceAt1Meter,
    /// `PL(d) = 20 log₁₀(f) + 32.44 + 10n log₁₀(d_km)`.
    ///
    /// The classic model for outdoor and long-range links.
    #[serde(rename = "1km")]
    ReferenceAt1Kilometer,
}

impl PathLossModel {
    /// Constant added to `PL − 20 log₁₀(f)` before dividing by `10n`.
    fn inversion_offset(self) -> f64 {
        match self {
            PathLossModel::ReferenceAt1Meter => REFERENCE_1M_OFFSET,
            PathLossModel::ReferenceAt1Kilometer => -REFERENCE_1KM_OFFSET,
        }
    }

    /// Native distance units per kilometer (meters or kilometers).
    fn units_per_km(self) -> f64 {
        match self {
            PathLossModel::ReferenceAt1Meter => km_to_m(1.0),
            PathLossModel::ReferenceAt1Kilometer => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PathLossModel::ReferenceAt1Meter => "Log-distance Model (1m reference)",
            PathLossModel::ReferenceAt1Kilometer => "Classic Model (1 km reference)",
        }
    }
}

impl fmt::Display for PathLossModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathLossModel::ReferenceAt1Meter => write!(f, "1m"),
            PathLossModel::ReferenceAt1Kilometer => write!(f, "1km"),
        }
    }
}

impl FromStr for PathLossModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1m" | "meter" | "reference-1m" => Ok(PathLossModel::ReferenceAt1Meter),
            "1km" | "kilometer" | "reference-1km" => Ok(PathLossModel::ReferenceAt1Kilometer),
            other => Err(format!("Unknown path loss model '{}', expected '1m' or '1km'", other)),
        }
    }
}

/// Outcome of inverting the path loss model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DistanceResult {
    /// Maximum distance in kilometers, positive and finite.
    Reachable { distance_km: f64 },
    /// The budget is negative; the receiver sensitivity is never met.
    Infeasible,
    /// The inversion produced a non-finite value.
    Undefined,
}

impl DistanceResult {
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            DistanceResult::Reachable { distance_km } => Some(*distance_km),
            _ => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, DistanceResult::Reachable { .. })
    }
}

/// Solve the log-distance model for the distance at which the path consumes
/// exactly `max_path_loss`.
///
/// # Formula
///
/// ```text
/// 1 m model:   d_m  = 10^((PL − 20 log₁₀(f) + 27.55) / (10n)),  d_km = d_m / 1000
/// 1 km model:  d_km = 10^((PL − 20 log₁₀(f) − 32.44) / (10n))
/// ```
///
/// # Parameters
///
/// - `max_path_loss`: Budget the path may consume (dB)
/// - `frequency_mhz`: Carrier frequency (MHz), expected `> 0`
/// - `path_loss_exponent`: n, expected in `[2.0, 10.0]`
/// - `model`: Reference distance variant
///
/// # Returns
///
/// - `Infeasible` when `max_path_loss < 0` for either model
/// - `Undefined` when the exponent term or the distance is not finite
/// - `Reachable` otherwise, always in kilometers
///
/// # Notes
///
/// Preconditions on frequency and exponent are the caller's to enforce. A
/// violation shows up here as `Undefined`, never as NaN or infinity.
pub fn solve(max_path_loss: f64, frequency_mhz: f64, path_loss_exponent: f64, model: PathLossModel) -> DistanceResult {
    if max_path_loss < 0.0 {
        return DistanceResult::Infeasible;
    }

    let log_term = (max_path_loss - frequency_term(frequency_mhz) + model.inversion_offset()) / (10.0 * path_loss_exponent);
    if !log_term.is_finite() {
        return DistanceResult::Undefined;
    }

    let distance_km = 10f64.powf(log_term) / model.units_per_km();
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return DistanceResult::Undefined;
    }

    DistanceResult::Reachable { distance_km }
}

/// Forward model: path loss (dB) over `distance_km` for the given model.
///
/// Inverse of [`solve`] for reachable results.
pub fn path_loss_at(distance_km: f64, frequency_mhz: f64, path_loss_exponent: f64, model: PathLossModel) -> f64 {
    let native_distance = distance_km * model.units_per_km();
    frequency_term(frequency_mhz) - model.inversion_offset() + 10.0 * path_loss_exponent * native_distance.log10()
}

fn frequency_term(frequency_mhz: f64) -> f64 {
    20.0 * frequency_mhz.log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODELS: [PathLossModel; 2] = [PathLossModel::ReferenceAt1Meter, PathLossModel::ReferenceAt1Kilometer];

    fn reachable_km(result: DistanceResult) -> f64 {
        result.distance_km().expect("expected a reachable distance")
    }

    #[test]
    fn one_meter_model_at_2400_mhz() {
        // (115 - 67.6042 + 27.55) / 20 ≈ 3.7473
        let km = reachable_km(solve(115.0, 2400.0, 2.0, PathLossModel::ReferenceAt1Meter));
        let expected = 10f64.powf((115.0 - 20.0 * 2400f64.log10() + 27.55) / 20.0) / 1000.0;
        assert!((km - expected).abs() < 1e-12);
        assert!((km - 5.588).abs() < 0.001);
    }

    #[test]
    fn one_kilometer_model_at_2400_mhz() {
        // (115 - 67.6042 - 32.44) / 20 ≈ 0.7478
        let km = reachable_km(solve(115.0, 2400.0, 2.0, PathLossModel::ReferenceAt1Kilometer));
        let expected = 10f64.powf((115.0 - 20.0 * 2400f64.log10() - 32.44) / 20.0);
        assert!((km - expected).abs() < 1e-12);
        assert!((km - 5.595).abs() < 0.001);
    }

    #[test]
    fn round_trip_reconstructs_path_loss() {
        for model in MODELS {
            for pl in [0.0, 40.0, 115.0, 160.0] {
                for n in [2.0, 2.7, 3.5, 6.0, 10.0] {
                    for f in [433.0, 868.0, 2400.0, 5800.0] {
                        let km = reachable_km(solve(pl, f, n, model));
                        let back = path_loss_at(km, f, n, model);
                        assert!((back - pl).abs() < 1e-9, "model {model} pl {pl} n {n} f {f}: got {back}");
                    }
                }
            }
        }
    }

    #[test]
    fn negative_budget_is_infeasible_for_both_models() {
        for model in MODELS {
            assert_eq!(solve(-30.0, 2400.0, 2.0, model), DistanceResult::Infeasible);
            assert_eq!(solve(-0.001, 2400.0, 10.0, model), DistanceResult::Infeasible);
        }
    }

    #[test]
    fn zero_budget_is_still_reachable() {
        for model in MODELS {
            assert!(solve(0.0, 2400.0, 2.0, model).is_reachable());
        }
    }

    #[test]
    fn distance_strictly_decreases_with_exponent() {
        for model in MODELS {
            let mut previous = f64::INFINITY;
            for step in 0..=80 {
                let n = 2.0 + step as f64 * 0.1;
                let km = reachable_km(solve(115.0, 2400.0, n, model));
                assert!(km < previous, "model {model} not decreasing at n {n}");
                previous = km;
            }
        }
    }

    #[test]
    fn models_agree_at_free_space_crossover() {
        // With n = 2 the two constants differ by only 0.01 dB once the 1 m
        // result is rescaled to kilometers.
        let one_m = reachable_km(solve(115.0, 2400.0, 2.0, PathLossModel::ReferenceAt1Meter));
        let one_km = reachable_km(solve(115.0, 2400.0, 2.0, PathLossModel::ReferenceAt1Kilometer));
        let ratio = one_km / one_m;
        assert!((ratio - 10f64.powf(0.01 / 20.0)).abs() < 1e-12);
        assert!((ratio - 1.0).abs() < 0.002);
    }

    #[test]
    fn degenerate_inputs_are_undefined() {
        for model in MODELS {
            assert_eq!(solve(115.0, 0.0, 2.0, model), DistanceResult::Undefined);
            assert_eq!(solve(115.0, -10.0, 2.0, model), DistanceResult::Undefined);
            assert_eq!(solve(115.0, 2400.0, 0.0, model), DistanceResult::Undefined);
            assert_eq!(solve(f64::NAN, 2400.0, 2.0, model), DistanceResult::Undefined);
            assert_eq!(solve(f64::INFINITY, 2400.0, 2.0, model), DistanceResult::Undefined);
        }
    }

    #[test]
    fn huge_budget_overflows_to_undefined() {
        assert_eq!(solve(1e6, 1.0, 2.0, PathLossModel::ReferenceAt1Kilometer), DistanceResult::Undefined);
    }

    #[test]
    fn model_parses_and_displays() {
        assert_eq!("1m".parse::<PathLossModel>().unwrap(), PathLossModel::ReferenceAt1Meter);
        assert_eq!(" 1KM ".parse::<PathLossModel>().unwrap(), PathLossModel::ReferenceAt1Kilometer);
        assert!("2m".parse::<PathLossModel>().is_err());
        for model in MODELS {
            assert_eq!(model.to_string().parse::<PathLossModel>().unwrap(), model);
        }
    }
}
