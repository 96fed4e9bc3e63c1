use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, debug, info};

use crate::cli::{Cli, OutputFormat};
use crate::config::{LinkConfig, load_link_config};

mod cli;
mod config;
mod engine;
mod report;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter(Some("link_range_calculator"), cli.log_level())
        .parse_default_env()
        .init();

    info!("Starting up");

    let base = match &cli.config {
        Some(path) => load_link_config(path).with_context(|| format!("Cannot use link file {}", path.display()))?,
        None => LinkConfig::default(),
    };
    let config = cli.apply_overrides(base);
    debug!("Resolved parameters: {:?}", config.parameters);

    let evaluation = engine::evaluate(&config.parameters, &config.domain).context("Input Error")?;

    if !evaluation.is_feasible() {
        info!("No usable range at n={}", config.parameters.path_loss_exponent);
    }

    let output = match cli.format {
        OutputFormat::Text => report::render_text(&evaluation, cli.sweep),
        OutputFormat::Json => report::render_json(&evaluation).context("Failed to serialize evaluation")?,
    };
    println!("{}", output.trim_end());

    Ok(())
}
