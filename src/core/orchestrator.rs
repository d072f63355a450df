use anyhow::{Context, Result};
use std::ops::RangeInclusive;
use std::path::Path;

use crate::analysis::business_cycle::{compare_cycles, CycleComparison, LabeledSeries};
use crate::analysis::growth_accounting::{account_panel, CountryPanel, PanelReport};
use crate::analysis::solow::{solow_residual, FactorSeries, SolowPoint};
use crate::config::AppConfig;
use crate::core::rate_limiter::RateLimiter;
use crate::core::timeseries::TimeSeries;
use crate::fetcher::fred::{FredFetcher, ObservationWindow};
use crate::fetcher::local::LocalFileSource;
use crate::fetcher::DataSource;
use crate::models::CountryYearObservation;
use crate::series::registry::Registry;

/// Picks the local file when one is configured, FRED otherwise.
pub fn build_source(
    config: &AppConfig,
    data_file: Option<&Path>,
    window: ObservationWindow,
) -> Result<Box<dyn DataSource>> {
    match data_file.or(config.data_file.as_deref()) {
        Some(path) => Ok(Box::new(LocalFileSource::open(path, window)?)),
        None => {
            let key = config.require_fred_key()?;
            Ok(Box::new(FredFetcher::new(key.to_string(), window)))
        }
    }
}

/// Resolves a slug through the registry, fetches it and validates the ordering.
pub async fn fetch_series(source: &dyn DataSource, slug: &str) -> Result<TimeSeries> {
    let symbol = Registry::resolve_symbol(slug);
    tracing::info!(slug, %symbol, source = source.name(), "Fetching series");

    RateLimiter::wait(source.kind()).await;

    let points = source
        .fetch_data(&symbol)
        .await
        .with_context(|| format!("Fetch failed for {} ({})", slug, symbol))?;

    let series = TimeSeries::from_unsorted(points)
        .with_context(|| format!("Series {} ({}) has duplicate periods", slug, symbol))?;
    tracing::debug!(slug, count = series.len(), "Series ready");
    Ok(series)
}

/// HP-filter cycles of two output series, compared for every λ.
pub async fn run_cycle_comparison(
    source: &dyn DataSource,
    left_slug: &str,
    right_slug: &str,
    lambdas: &[f64],
) -> Result<Vec<CycleComparison>> {
    let left = fetch_series(source, left_slug).await?;
    let right = fetch_series(source, right_slug).await?;

    let left_label = Registry::display_name(left_slug);
    let right_label = Registry::display_name(right_slug);

    let report = compare_cycles(
        LabeledSeries { label: &left_label, levels: &left },
        LabeledSeries { label: &right_label, levels: &right },
        lambdas,
    )
    .context("Cycle comparison failed")?;

    for row in &report {
        tracing::info!(
            lambda = row.lambda,
            left_std = row.left.std_dev,
            right_std = row.right.std_dev,
            correlation = row.correlation,
            "Cycle comparison"
        );
    }
    Ok(report)
}

/// Slugs (or raw source ids) of the three Solow inputs.
#[derive(Debug, Clone)]
pub struct SolowInputs<'a> {
    pub output: &'a str,
    pub capital: &'a str,
    pub labor: &'a str,
}

pub async fn run_solow(
    source: &dyn DataSource,
    inputs: &SolowInputs<'_>,
    alpha: f64,
) -> Result<Vec<SolowPoint>> {
    let output = fetch_series(source, inputs.output).await?;
    let capital = fetch_series(source, inputs.capital).await?;
    let labor = fetch_series(source, inputs.labor).await?;

    let points = solow_residual(
        FactorSeries { output: &output, capital: &capital, labor: &labor },
        alpha,
    )
    .context("Solow residual estimation failed")?;

    tracing::info!(periods = points.len(), alpha, "Solow residual estimated");
    Ok(points)
}

/// Panel filters applied before growth accounting.
#[derive(Debug, Clone, Default)]
pub struct PanelSelection<'a> {
    pub years: Option<RangeInclusive<i32>>,
    pub countries: Option<&'a [&'a str]>,
}

pub fn run_growth_accounting(
    observations: Vec<CountryYearObservation>,
    selection: &PanelSelection<'_>,
) -> PanelReport {
    let mut panel = CountryPanel::from_observations(observations);
    if let Some(years) = &selection.years {
        panel = panel.restrict_years(years.clone());
    }
    if let Some(codes) = selection.countries {
        panel = panel.retain_countries(codes);
    }
    tracing::info!(countries = panel.len(), "Running growth accounting");

    let report = account_panel(&panel);
    if !report.failures.is_empty() {
        tracing::warn!(failed = report.failures.len(), succeeded = report.results.len(), "Some countries could not be accounted for");
    }
    report
}
