//! Solow-residual TFP growth under Cobb–Douglas with a fixed capital share.
//!
//! Per period, with Δlog growth rates g:
//!
//! ```text
//! tfp = g_Y - α g_K - (1 - α) g_L
//! ```

use crate::core::timeseries::{align_series, TimeSeries};
use crate::error::{AnalysisError, AnalysisResult};
use chrono::NaiveDate;
use serde::Serialize;

/// Capital share of income used when none is given.
pub const DEFAULT_CAPITAL_SHARE: f64 = 0.33;

/// Growth decomposition for one period, in Δlog units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolowPoint {
    pub date: NaiveDate,
    pub output_growth: f64,
    pub capital_growth: f64,
    pub labor_growth: f64,
    pub capital_contribution: f64,
    pub labor_contribution: f64,
    pub tfp_growth: f64,
}

/// Level series for one economy.
#[derive(Debug, Clone, Copy)]
pub struct FactorSeries<'a> {
    pub output: &'a TimeSeries,
    pub capital: &'a TimeSeries,
    pub labor: &'a TimeSeries,
}

/// Estimates TFP growth as the Solow residual.
///
/// The three series are inner-joined on their periods; sub-annual inputs are
/// first averaged into calendar years so growth is year-on-year.
pub fn solow_residual(factors: FactorSeries<'_>, alpha: f64) -> AnalysisResult<Vec<SolowPoint>> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(AnalysisError::invalid_parameter(
            "alpha",
            format!("capital share must lie in (0, 1), got {}", alpha),
        ));
    }

    // 1. Common periods, then annual frequency
    let aligned = align_series(&[factors.output, factors.capital, factors.labor]);
    let annual: Vec<TimeSeries> = aligned
        .into_iter()
        .map(|series| {
            if series.is_annual() {
                series
            } else {
                series.resample_annual_mean()
            }
        })
        .collect();

    let n = annual[0].len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData { required: 2, actual: n });
    }

    // 2. Δlog growth
    let output = annual[0].log_diff()?;
    let capital = annual[1].log_diff()?;
    let labor = annual[2].log_diff()?;

    // 3. Residual and contributions
    let points = output
        .points()
        .iter()
        .zip(capital.values())
        .zip(labor.values())
        .map(|((y, g_k), g_l)| {
            let capital_contribution = alpha * g_k;
            let labor_contribution = (1.0 - alpha) * g_l;
            SolowPoint {
                date: y.date,
                output_growth: y.value,
                capital_growth: g_k,
                labor_growth: g_l,
                capital_contribution,
                labor_contribution,
                tfp_growth: y.value - capital_contribution - labor_contribution,
            }
        })
        .collect();

    Ok(points)
}
