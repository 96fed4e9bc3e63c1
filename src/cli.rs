//! Command line arguments.
//!
//! Flags override values from `--config`, which in turn override the
//! built-in defaults.

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::LinkConfig;
use crate::engine::PathLossModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Maximum communication distance from a point-to-point link budget.
#[derive(Debug, Parser)]
#[command(name = "link-range-calculator", version, about)]
pub struct Cli {
    /// TOML link file with [link] and [sweep] tables
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Transmit power (dBm)
    #[arg(long, allow_negative_numbers = true)]
    pub tx_power: Option<f64>,
    /// Transmit antenna gain (dBi)
    #[arg(long, allow_negative_numbers = true)]
    pub tx_gain: Option<f64>,
    /// Transmit cable loss (dB)
    #[arg(long, allow_negative_numbers = true)]
    pub tx_cable_loss: Option<f64>,
    /// Receiver antenna gain (dBi)
    #[arg(long, allow_negative_numbers = true)]
    pub rx_gain: Option<f64>,
    /// Receiver cable loss (dB)
    #[arg(long, allow_negative_numbers = true)]
    pub rx_cable_loss: Option<f64>,
    /// Fade margin (dB)
    #[arg(long, allow_negative_numbers = true)]
    pub fade_margin: Option<f64>,
    /// Miscellaneous losses (dB)
    #[arg(long, allow_negative_numbers = true)]
    pub misc_loss: Option<f64>,
    /// Receiver sensitivity (dBm)
    #[arg(long, allow_negative_numbers = true)]
    pub rx_sensitivity: Option<f64>,
    /// Carrier frequency (MHz)
    #[arg(short, long, allow_negative_numbers = true)]
    pub frequency: Option<f64>,
    /// Path loss exponent n, 2.0 (free space) to 10.0
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub exponent: Option<f64>,
    /// Path loss reference model: 1m or 1km
    #[arg(short, long)]
    pub model: Option<PathLossModel>,

    /// Number of exponent samples in the sweep
    #[arg(long)]
    pub samples: Option<usize>,
    /// First exponent of the sweep
    #[arg(long, allow_negative_numbers = true)]
    pub sweep_start: Option<f64>,
    /// Last exponent of the sweep
    #[arg(long, allow_negative_numbers = true)]
    pub sweep_end: Option<f64>,

    /// Output rendering
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Include the exponent sweep table in text output
    #[arg(long)]
    pub sweep: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply command line overrides on top of `base`.
    pub fn apply_overrides(&self, base: LinkConfig) -> LinkConfig {
        let mut config = base;
        let p = &mut config.parameters;
        let overrides = [
            (&mut p.tx_power, self.tx_power),
            (&mut p.tx_antenna_gain, self.tx_gain),
            (&mut p.tx_cable_loss, self.tx_cable_loss),
            (&mut p.rx_antenna_gain, self.rx_gain),
            (&mut p.rx_cable_loss, self.rx_cable_loss),
            (&mut p.fade_margin, self.fade_margin),
            (&mut p.misc_loss, self.misc_loss),
            (&mut p.rx_sensitivity, self.rx_sensitivity),
            (&mut p.frequency_mhz, self.frequency),
            (&mut p.path_loss_exponent, self.exponent),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(model) = self.model {
            p.model = model;
        }

        let d = &mut config.domain;
        if let Some(start) = self.sweep_start {
            d.start = start;
        }
        if let Some(end) = self.sweep_end {
            d.end = end;
        }
        if let Some(samples) = self.samples {
            d.samples = samples;
        }
        config
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("link-range-calculator").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_arguments_keep_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.apply_overrides(LinkConfig::default()), LinkConfig::default());
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn negative_values_are_accepted() {
        let cli = parse(&["--rx-sensitivity", "-110", "--tx-gain", "-3.5"]);
        let config = cli.apply_overrides(LinkConfig::default());
        assert_eq!(config.parameters.rx_sensitivity, -110.0);
        assert_eq!(config.parameters.tx_antenna_gain, -3.5);
    }

    #[test]
    fn model_and_sweep_overrides() {
        let cli = parse(&["-m", "1km", "-n", "3.2", "--samples", "20", "--sweep-end", "5", "--format", "json"]);
        let config = cli.apply_overrides(LinkConfig::default());
        assert_eq!(config.parameters.model, PathLossModel::ReferenceAt1Kilometer);
        assert_eq!(config.parameters.path_loss_exponent, 3.2);
        assert_eq!(config.domain.samples, 20);
        assert_eq!(config.domain.end, 5.0);
        assert_eq!(config.domain.start, 2.0);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_model_is_a_usage_error() {
        assert!(Cli::try_parse_from(["link-range-calculator", "--model", "3m"]).is_err());
    }

    #[test]
    fn help_has_a_description() {
        use clap::CommandFactory;
        let about = Cli::command().get_about().map(|s| s.to_string()).unwrap_or_default();
        assert!(!about.trim().is_empty());
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Maximum communication distance"));
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["-vv"]).log_level(), LevelFilter::Debug);
        assert_eq!(parse(&["-vvvv"]).log_level(), LevelFilter::Trace);
    }
}
