use anyhow::{Result, bail};
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;

use growth_analyzer_lib::analysis::business_cycle::{CycleComparison, CycleSummary};
use growth_analyzer_lib::analysis::hp_filter::DEFAULT_LAMBDAS;
use growth_analyzer_lib::config::AppConfig;
use growth_analyzer_lib::core::orchestrator;

/// Arguments for `cycles`
#[derive(Args, Debug)]
pub struct CyclesArgs {
    /// First output series (registry slug or raw source id)
    #[arg(long, default_value = "us_real_gdp")]
    pub left: String,
    /// Second output series
    #[arg(long, default_value = "jp_real_gdp")]
    pub right: String,
    /// Smoothing parameter, repeatable (default: 10, 100, 1600)
    #[arg(long = "lambda")]
    pub lambdas: Vec<f64>,
    /// First observation date, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,
    /// Last observation date, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,
    /// Read series from a local JSON file instead of FRED
    #[arg(long)]
    pub data_file: Option<PathBuf>,
    /// Include the trend and cycle series in the output
    #[arg(long)]
    pub with_series: bool,
}

pub async fn cycles_command(args: CyclesArgs, config: &AppConfig) -> Result<Value> {
    let lambdas = if args.lambdas.is_empty() {
        DEFAULT_LAMBDAS.to_vec()
    } else {
        args.lambdas.clone()
    };
    if let Some(bad) = lambdas.iter().find(|l| !l.is_finite() || **l <= 0.0) {
        bail!("--lambda must be positive, got {}", bad);
    }

    let window = super::merge_window(config.window, args.start.as_deref(), args.end.as_deref())?;
    let source = orchestrator::build_source(config, args.data_file.as_deref(), window)?;

    let report = orchestrator::run_cycle_comparison(&*source, &args.left, &args.right, &lambdas).await?;
    Ok(Value::Array(
        report.iter().map(|row| render(row, args.with_series)).collect(),
    ))
}

fn render(row: &CycleComparison, with_series: bool) -> Value {
    let side = |summary: &CycleSummary| {
        let mut value = json!({
            "label": summary.label,
            "std_dev": summary.std_dev,
        });
        if with_series {
            value["trend"] = json!(summary.decomposition.trend);
            value["cycle"] = json!(summary.decomposition.cycle);
        }
        value
    };

    json!({
        "lambda": row.lambda,
        "left": side(&row.left),
        "right": side(&row.right),
        "correlation": row.correlation,
        "common_periods": row.common_periods,
    })
}
