use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use growth_analyzer_lib::analysis::solow::DEFAULT_CAPITAL_SHARE;
use growth_analyzer_lib::config::AppConfig;
use growth_analyzer_lib::core::orchestrator::{self, SolowInputs};

/// Arguments for `solow`
#[derive(Args, Debug)]
pub struct SolowArgs {
    /// Output series (registry slug or raw source id)
    #[arg(long, default_value = "us_real_gdp")]
    pub gdp: String,
    /// Capital series
    #[arg(long, default_value = "us_fixed_investment")]
    pub capital: String,
    /// Labour series
    #[arg(long, default_value = "us_employment")]
    pub labor: String,
    /// Capital share of income
    #[arg(long, default_value_t = DEFAULT_CAPITAL_SHARE)]
    pub alpha: f64,
    /// First observation date, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,
    /// Last observation date, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,
    /// Read series from a local JSON file instead of FRED
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

pub async fn solow_command(args: SolowArgs, config: &AppConfig) -> Result<Value> {
    let window = super::merge_window(config.window, args.start.as_deref(), args.end.as_deref())?;
    let source = orchestrator::build_source(config, args.data_file.as_deref(), window)?;

    let inputs = SolowInputs {
        output: &args.gdp,
        capital: &args.capital,
        labor: &args.labor,
    };
    let points = orchestrator::run_solow(&*source, &inputs, args.alpha).await?;
    Ok(serde_json::to_value(points)?)
}
