//! Rendering of evaluations for the terminal.

use std::fmt::Write;

use crate::engine::{DistanceResult, Evaluation};

const INFEASIBLE_MESSAGE: &str = "Link cannot be established with the current parameters (Path Loss < 0).";
const UNDEFINED_MESSAGE: &str = "Distance is undefined for the current parameters.";

/// Human readable report. The sweep table is appended when `with_sweep` is set.
pub fn render_text(evaluation: &Evaluation, with_sweep: bool) -> String {
    let p = &evaluation.parameters;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Path loss model:      {}", p.model.label());
    let _ = writeln!(out, "Frequency:            {:.1} MHz", p.frequency_mhz);
    let _ = writeln!(out, "Path loss exponent:   {:.2}", p.path_loss_exponent);
    let _ = writeln!(out, "EIRP:                 {:.2} dBm", p.eirp());
    let _ = writeln!(out, "Max path loss:        {:.2} dB", evaluation.max_path_loss);
    let _ = writeln!(out);
    let _ = writeln!(out, "Maximum Communication Distance");

    match (&evaluation.distance, &evaluation.distances) {
        (DistanceResult::Reachable { .. }, Some(d)) => {
            let _ = writeln!(out, "  Kilometers:  {:.2}", d.km);
            let _ = writeln!(out, "  Meters:      {}", group_thousands(d.m));
            let _ = writeln!(out, "  Miles:       {:.2}", d.mi);
            let _ = writeln!(out, "  Feet:        {}", group_thousands(d.ft));
        }
        (DistanceResult::Infeasible, _) => {
            let _ = writeln!(out, "  {}", INFEASIBLE_MESSAGE);
        }
        _ => {
            let _ = writeln!(out, "  {}", UNDEFINED_MESSAGE);
        }
    }

    if with_sweep {
        let _ = writeln!(out);
        let _ = writeln!(out, "Impact of Path Loss Exponent on Range");
        let _ = writeln!(out, "  {:>8}  {:>16}", "n", "distance (ft)");
        for point in &evaluation.sweep {
            if point.reachable {
                let _ = writeln!(out, "  {:>8.3}  {:>16.2}", point.exponent, point.distance_ft);
            } else {
                let _ = writeln!(out, "  {:>8.3}  {:>16}", point.exponent, "-");
            }
        }
    }

    out
}

/// Two-decimal rendering with `,` between groups of three integer digits.
fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

pub fn render_json(evaluation: &Evaluation) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(evaluation)
}
