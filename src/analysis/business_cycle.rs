//! Cross-country comparison of HP-filter cycles.
//!
//! Each level series is log-transformed and filtered on its own full sample.
//! Volatility is the sample standard deviation of each cycle; co-movement is
//! the Pearson correlation of the two cycles over their common periods.

use crate::analysis::hp_filter::{decompose, TrendCycle};
use crate::analysis::statistics::{pearson_correlation, std_dev};
use crate::core::timeseries::{align_series, TimeSeries};
use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;

/// A level series with the label it is reported under.
#[derive(Debug, Clone, Copy)]
pub struct LabeledSeries<'a> {
    pub label: &'a str,
    pub levels: &'a TimeSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSummary {
    pub label: String,
    pub std_dev: f64,
    pub decomposition: TrendCycle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleComparison {
    pub lambda: f64,
    pub left: CycleSummary,
    pub right: CycleSummary,
    /// Correlation of the two cycles over their common periods.
    pub correlation: f64,
    pub common_periods: usize,
}

pub fn compare_cycles(
    left: LabeledSeries<'_>,
    right: LabeledSeries<'_>,
    lambdas: &[f64],
) -> AnalysisResult<Vec<CycleComparison>> {
    if lambdas.is_empty() {
        return Err(AnalysisError::invalid_parameter(
            "lambdas",
            "at least one smoothing parameter is required",
        ));
    }

    let left_log = left.levels.ln()?;
    let right_log = right.levels.ln()?;

    lambdas
        .iter()
        .map(|&lambda| {
            let left_summary = summarize(left.label, &left_log, lambda)?;
            let right_summary = summarize(right.label, &right_log, lambda)?;

            let aligned = align_series(&[
                &left_summary.decomposition.cycle,
                &right_summary.decomposition.cycle,
            ]);
            let correlation = pearson_correlation(&aligned[0].values(), &aligned[1].values())?;

            Ok(CycleComparison {
                lambda,
                left: left_summary,
                right: right_summary,
                correlation,
                common_periods: aligned[0].len(),
            })
        })
        .collect()
}

fn summarize(label: &str, log_levels: &TimeSeries, lambda: f64) -> AnalysisResult<CycleSummary> {
    let decomposition = decompose(log_levels, lambda)?;
    let std_dev = std_dev(&decomposition.cycle.values())?;
    Ok(CycleSummary {
        label: label.to_string(),
        std_dev,
        decomposition,
    })
}
