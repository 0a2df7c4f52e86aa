//! pdm-risk - Predictive Maintenance Risk Scoring
//!
//! Loads the AI4I 2020 machine dataset, computes reliability KPIs and a
//! composite risk score, validates the risk buckets against observed
//! failures and exports tables and charts.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: ./ai4i2020.csv -> ./export, ./outputs
//! pdm-risk
//!
//! # Explicit paths, plus a JSON digest
//! pdm-risk --input data/ai4i2020.csv --export-dir out --json
//! ```
//!
//! # Environment Variables
//!
//! - `PDM_RISK_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pdm_risk::config::RiskConfig;
use pdm_risk::pipeline::{self, ExportOptions};
use pdm_risk::reporting::render_summary;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "pdm-risk")]
#[command(about = "Predictive maintenance KPIs and risk scoring for the AI4I dataset")]
#[command(version)]
struct CliArgs {
    /// TOML config file (overrides PDM_RISK_CONFIG and ./risk_config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Input CSV (overrides data.input_path)
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Directory for CSV/JSON exports (overrides output.export_dir)
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Directory for chart images (overrides output.charts_dir)
    #[arg(long, value_name = "DIR")]
    charts_dir: Option<PathBuf>,

    /// Also write kpi_summary.json
    #[arg(long)]
    json: bool,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,
}

impl CliArgs {
    /// Resolve the config file, then apply command-line overrides.
    fn resolve_config(&self) -> Result<RiskConfig> {
        let mut config = match &self.config {
            Some(path) => RiskConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RiskConfig::load(),
        };

        if let Some(input) = &self.input {
            config.data.input_path = input.clone();
        }
        if let Some(dir) = &self.export_dir {
            config.output.export_dir = dir.clone();
        }
        if let Some(dir) = &self.charts_dir {
            config.output.charts_dir = dir.clone();
        }
        Ok(config)
    }

    fn export_options(&self, config: &RiskConfig) -> ExportOptions {
        ExportOptions {
            charts: !self.no_charts,
            json_summary: self.json || config.output.write_json_summary,
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the summary only.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = args.resolve_config()?;
    let options = args.export_options(&config);

    info!(
        input = %config.data.input_path.display(),
        export_dir = %config.output.export_dir.display(),
        charts_dir = %config.output.charts_dir.display(),
        "Starting risk analysis"
    );

    let analysis = pipeline::run(&config, options).with_context(|| {
        format!("Risk analysis of {} failed", config.data.input_path.display())
    })?;

    print!("{}", render_summary(&analysis.kpis, &analysis.risk));
    Ok(())
}
