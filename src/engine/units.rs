//! Distance unit conversions.

use serde::Serialize;

pub const METERS_PER_KILOMETER: f64 = 1000.0;
pub const MILES_PER_KILOMETER: f64 = 0.621371;
pub const FEET_PER_METER: f64 = 3.28084;

/// One distance expressed in the four display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distances {
    pub km: f64,
    pub m: f64,
    pub mi: f64,
    pub ft: f64,
}

/// Convert a distance in kilometers to all display units.
///
/// Feet are derived from meters, not kilometers, so `ft == m * 3.28084`
/// holds exactly. Non-finite input is propagated unchanged.
pub fn to_units(distance_km: f64) -> Distances {
    let m = km_to_m(distance_km);
    Distances {
        km: distance_km,
        m,
        mi: distance_km * MILES_PER_KILOMETER,
        ft: m_to_ft(m),
    }
}

pub fn km_to_m(km: f64) -> f64 {
    km * METERS_PER_KILOMETER
}

pub fn m_to_ft(m: f64) -> f64 {
    m * FEET_PER_METER
}

/// Shortcut used by the sweep, which plots in feet.
pub fn km_to_ft(km: f64) -> f64 {
    m_to_ft(km_to_m(km))
}
