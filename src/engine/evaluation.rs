//! Single-call evaluation of a link, used by front-ends.
//!
//! High-level flow:
//! 1) Validate frequency, exponent and sweep domain; bail out before any
//!    computation on failure.
//! 2) Reduce the budget to a maximum path loss.
//! 3) Solve the chosen model and convert a reachable distance to all units.
//! 4) Sweep the exponent domain for the plot.
//!
//! Nothing is cached between calls; re-evaluate on every input change.

use log::{debug, warn};
use serde::Serialize;

use super::error::ConfigurationError;
use super::link_budget::LinkParameters;
use super::path_loss::{DistanceResult, path_loss_at, solve};
use super::sweep::{SweepDomain, SweepPoint, sweep};
use super::units::{Distances, to_units};

/// Current exponent and its distance, marked on top of the sweep curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingPoint {
    pub exponent: f64,
    pub distance_ft: f64,
}

/// Full result of evaluating one set of link parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub parameters: LinkParameters,
    /// Maximum allowable path loss (dB). Negative for an infeasible link.
    pub max_path_loss: f64,
    pub distance: DistanceResult,
    /// Present only when `distance` is reachable.
    pub distances: Option<Distances>,
    /// Present only when `distance` is reachable.
    pub operating_point: Option<OperatingPoint>,
    pub sweep: Vec<SweepPoint>,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.distance.is_reachable()
    }
}

/// Validate `parameters` and `domain`, then run the whole engine once.
///
/// # Returns
///
/// `Err(ConfigurationError)` without touching the solver when the inputs
/// break an invariant. An infeasible link is a regular `Ok` evaluation.
pub fn evaluate(parameters: &LinkParameters, domain: &SweepDomain) -> Result<Evaluation, ConfigurationError> {
    parameters.validate()?;
    domain.validate()?;

    let max_path_loss = parameters.max_path_loss();
    debug!("Max allowable path loss: {:.2} dB", max_path_loss);

    let distance = solve(
        max_path_loss,
        parameters.frequency_mhz,
        parameters.path_loss_exponent,
        parameters.model,
    );
    match distance {
        DistanceResult::Reachable { distance_km } => {
            let residual = path_loss_at(distance_km, parameters.frequency_mhz, parameters.path_loss_exponent, parameters.model) - max_path_loss;
            debug!(
                "Range with {} model at n={}: {:.4} km (round-trip residual {:.3e} dB)",
                parameters.model, parameters.path_loss_exponent, distance_km, residual
            )
        }
        DistanceResult::Infeasible => debug!("Link cannot be established, budget is {:.2} dB", max_path_loss),
        DistanceResult::Undefined => warn!(
            "Path loss inversion is undefined for PL={} dB, f={} MHz, n={}; inputs passed validation, this is a bug",
            max_path_loss, parameters.frequency_mhz, parameters.path_loss_exponent
        ),
    }

    let distances = distance.distance_km().map(to_units);
    let operating_point = distances.map(|d| OperatingPoint {
        exponent: parameters.path_loss_exponent,
        distance_ft: d.ft,
    });

    let sweep = sweep(max_path_loss, parameters.frequency_mhz, parameters.model, domain);
    debug!("Sweep produced {} points over n in [{}, {}]", sweep.len(), domain.start, domain.end);

    Ok(Evaluation {
        parameters: *parameters,
        max_path_loss,
        distance,
        distances,
        operating_point,
        sweep,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PathLossModel;

    fn scenario(model: PathLossModel) -> LinkParameters {
        LinkParameters {
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
            model,
        }
    }

    #[test]
    fn evaluates_wifi_scenario_with_1m_reference() {
        let eval = evaluate(&scenario(PathLossModel::ReferenceAt1Meter), &SweepDomain::default()).unwrap();
        assert!((eval.max_path_loss - 115.0).abs() < 1e-12);
        let d = eval.distances.unwrap();
        assert!((d.m - 5588.0).abs() < 1.0);
        assert_eq!(d.m, d.km * 1000.0);
        assert_eq!(eval.sweep.len(), 100);
        let point = eval.operating_point.unwrap();
        assert_eq!(point.exponent, 2.0);
        assert_eq!(point.distance_ft, d.ft);
        // n = 2.0 is the first sweep sample, so the marker sits on the curve
        assert_eq!(eval.sweep[0].distance_ft, point.distance_ft);
    }

    #[test]
    fn evaluates_wifi_scenario_with_1km_reference() {
        let eval = evaluate(&scenario(PathLossModel::ReferenceAt1Kilometer), &SweepDomain::default()).unwrap();
        let d = eval.distances.unwrap();
        assert!((d.km - 5.595).abs() < 0.001);
        assert!(eval.is_feasible());
    }

    #[test]
    fn nonsensical_sensitivity_is_infeasible_not_an_error() {
        for model in [PathLossModel::ReferenceAt1Meter, PathLossModel::ReferenceAt1Kilometer] {
            let params = LinkParameters {
                rx_sensitivity: 50.0,
                ..scenario(model)
            };
            let eval = evaluate(&params, &SweepDomain::default()).unwrap();
            assert!((eval.max_path_loss + 30.0).abs() < 1e-12);
            assert_eq!(eval.distance, DistanceResult::Infeasible);
            assert!(eval.distances.is_none() && eval.operating_point.is_none());
            assert!(eval.sweep.iter().all(|p| p.distance_ft == 0.0 && !p.reachable));
        }
    }

    #[test]
    fn non_positive_frequency_is_rejected() {
        for freq in [0.0, -1.0] {
            let params = LinkParameters {
                frequency_mhz: freq,
                ..LinkParameters::default()
            };
            assert_eq!(
                evaluate(&params, &SweepDomain::default()),
                Err(ConfigurationError::NonPositiveFrequency(freq))
            );
        }
    }

    #[test]
    fn out_of_range_exponent_is_rejected() {
        let params = LinkParameters {
            path_loss_exponent: 11.0,
            ..LinkParameters::default()
        };
        assert_eq!(
            evaluate(&params, &SweepDomain::default()),
            Err(ConfigurationError::ExponentOutOfRange(11.0))
        );
    }

    #[test]
    fn bad_sweep_domain_is_rejected() {
        let domain = SweepDomain { samples: 0, ..SweepDomain::default() };
        assert!(matches!(
            evaluate(&LinkParameters::default(), &domain),
            Err(ConfigurationError::InvalidSweepDomain(_))
        ));
    }

    #[test]
    fn non_finite_budget_is_undefined() {
        let params = LinkParameters {
            tx_power: f64::NAN,
            ..LinkParameters::default()
        };
        let eval = evaluate(&params, &SweepDomain::default()).unwrap();
        assert_eq!(eval.distance, DistanceResult::Undefined);
        assert!(!eval.is_feasible());
        assert!(eval.distances.is_none() && eval.operating_point.is_none());
        assert_eq!(eval.sweep.len(), 100);
        assert!(eval.sweep.iter().all(|p| !p.reachable && p.distance_ft == 0.0));
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let params = scenario(PathLossModel::ReferenceAt1Meter);
        let first = evaluate(&params, &SweepDomain::default()).unwrap();
        let second = evaluate(&params, &SweepDomain::default()).unwrap();
        assert_eq!(first, second);
    }
}
