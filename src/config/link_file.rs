//! Loading, parsing and validation of TOML link files.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::engine::{LinkParameters, PathLossModel, SweepDomain};

/// Error type for link file loading failures.
#[derive(Debug)]
pub enum ConfigLoadError {
    FileReadError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::FileReadError(msg) => write!(f, "Failed to read file: {}", msg),
            ConfigLoadError::ParseError(msg) => write!(f, "Failed to parse TOML: {}", msg),
            ConfigLoadError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

/// `[link]` table. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LinkSection {
    pub tx_power: Option<f64>,
    pub tx_antenna_gain: Option<f64>,
    pub tx_cable_loss: Option<f64>,
    pub rx_antenna_gain: Option<f64>,
    pub rx_cable_loss: Option<f64>,
    pub fade_margin: Option<f64>,
    pub misc_loss: Option<f64>,
    pub rx_sensitivity: Option<f64>,
    /// Carrier frequency in MHz.
    pub frequency: Option<f64>,
    pub path_loss_exponent: Option<f64>,
    /// `"1m"` or `"1km"`.
    pub model: Option<PathLossModel>,
}

/// `[sweep]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SweepSection {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub samples: Option<usize>,
}

/// Root of a link file as written on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkFile {
    #[serde(default)]
    pub link: LinkSection,
    #[serde(default)]
    pub sweep: SweepSection,
}

/// Fully resolved configuration ready for evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinkConfig {
    pub parameters: LinkParameters,
    pub domain: SweepDomain,
}

impl LinkFile {
    pub fn parse(content: &str) -> Result<Self, ConfigLoadError> {
        toml::from_str(content)
            .context("Invalid TOML link file")
            .map_err(|e| ConfigLoadError::ParseError(format!("{:#}", e)))
    }

    /// Fill unset fields from the defaults.
    pub fn resolve(&self) -> LinkConfig {
        let defaults = LinkConfig::default();
        let p = defaults.parameters;
        let d = defaults.domain;
        let link = &self.link;
        let sweep = &self.sweep;

        LinkConfig {
            parameters: LinkParameters {
                tx_power: link.tx_power.unwrap_or(p.tx_power),
                tx_antenna_gain: link.tx_antenna_gain.unwrap_or(p.tx_antenna_gain),
                tx_cable_loss: link.tx_cable_loss.unwrap_or(p.tx_cable_loss),
                rx_antenna_gain: link.rx_antenna_gain.unwrap_or(p.rx_antenna_gain),
                rx_cable_loss: link.rx_cable_loss.unwrap_or(p.rx_cable_loss),
                fade_margin: link.fade_margin.unwrap_or(p.fade_margin),
                misc_loss: link.misc_loss.unwrap_or(p.misc_loss),
                rx_sensitivity: link.rx_sensitivity.unwrap_or(p.rx_sensitivity),
                frequency_mhz: link.frequency.unwrap_or(p.frequency_mhz),
                path_loss_exponent: link.path_loss_exponent.unwrap_or(p.path_loss_exponent),
                model: link.model.unwrap_or(p.model),
            },
            domain: SweepDomain {
                start: sweep.start.unwrap_or(d.start),
                end: sweep.end.unwrap_or(d.end),
                samples: sweep.samples.unwrap_or(d.samples),
            },
        }
    }
}

impl LinkConfig {
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.parameters
            .validate()
            .and_then(|_| self.domain.validate())
            .map_err(|e| ConfigLoadError::ValidationError(e.to_string()))
    }
}

/// Load, resolve and validate a link file.
///
/// # Parameters
///
/// * `path` - Path to the TOML link file
///
/// # Returns
///
/// Resolved configuration or the first error encountered.
pub fn load_link_config(path: &Path) -> Result<LinkConfig, ConfigLoadError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("{}", path.display()))
        .map_err(|e| ConfigLoadError::FileReadError(format!("{:#}", e)))?;

    let config = LinkFile::parse(&content)?.resolve();
    config.validate()?;
    log::info!("Loaded link configuration from {}", path.display());
    Ok(config)
}
