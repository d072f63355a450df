use crate::error::{AnalysisError, AnalysisResult};
use crate::models::DataPoint;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Ordered sequence of dated values with strictly increasing periods.
///
/// Gaps are allowed by the type but not interpolated; callers that need a
/// gap-free series (the HP filter does) must resolve them first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<DataPoint>,
}

impl TimeSeries {
    /// Builds a series, failing with `UnorderedPeriods` when a period does not
    /// come strictly after its predecessor.
    pub fn new(points: Vec<DataPoint>) -> AnalysisResult<Self> {
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].date <= pair[0].date)
        {
            return Err(AnalysisError::UnorderedPeriods { index: index + 1 });
        }
        Ok(Self { points })
    }

    /// Sorts by date first. Duplicate dates are still rejected.
    pub fn from_unsorted(mut points: Vec<DataPoint>) -> AnalysisResult<Self> {
        points.sort_by_key(|dp| dp.date);
        Self::new(points)
    }

    pub fn from_parts(periods: &[NaiveDate], values: &[f64]) -> AnalysisResult<Self> {
        if periods.len() != values.len() {
            return Err(AnalysisError::LengthMismatch {
                left: periods.len(),
                right: values.len(),
            });
        }
        Self::new(
            periods
                .iter()
                .zip(values)
                .map(|(&date, &value)| DataPoint { date, value })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn periods(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|dp| dp.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|dp| dp.value).collect()
    }

    /// Same periods, new values.
    pub fn with_values(&self, values: &[f64]) -> AnalysisResult<Self> {
        if values.len() != self.points.len() {
            return Err(AnalysisError::LengthMismatch {
                left: self.points.len(),
                right: values.len(),
            });
        }
        Ok(Self {
            points: self
                .points
                .iter()
                .zip(values)
                .map(|(dp, &value)| DataPoint { date: dp.date, value })
                .collect(),
        })
    }

    /// Natural logarithm of every value.
    pub fn ln(&self) -> AnalysisResult<Self> {
        let mut points = Vec::with_capacity(self.points.len());
        for dp in &self.points {
            if dp.value <= 0.0 || dp.value.is_nan() {
                return Err(AnalysisError::NonPositiveValue {
                    field: "value",
                    period: dp.date.to_string(),
                    value: dp.value,
                });
            }
            points.push(DataPoint { date: dp.date, value: dp.value.ln() });
        }
        Ok(Self { points })
    }

    /// Period-on-period change of the natural log, dated at the later period.
    /// The result is one point shorter than the input.
    pub fn log_diff(&self) -> AnalysisResult<Self> {
        let logged = self.ln()?;
        let points = logged
            .points
            .windows(2)
            .map(|pair| DataPoint {
                date: pair[1].date,
                value: pair[1].value - pair[0].value,
            })
            .collect();
        Ok(Self { points })
    }

    /// Calendar-year means, each dated at December 31 of its year.
    pub fn resample_annual_mean(&self) -> Self {
        let mut buckets: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
        for dp in &self.points {
            let entry = buckets.entry(dp.date.year()).or_insert((0.0, 0));
            entry.0 += dp.value;
            entry.1 += 1;
        }

        let points = buckets
            .into_iter()
            .filter_map(|(year, (sum, count))| {
                NaiveDate::from_ymd_opt(year, 12, 31).map(|date| DataPoint {
                    date,
                    value: sum / count as f64,
                })
            })
            .collect();
        Self { points }
    }

    /// Keeps the points inside the inclusive window. `None` leaves that side open.
    pub fn restrict(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let points = self
            .points
            .iter()
            .filter(|dp| start.map_or(true, |s| dp.date >= s))
            .filter(|dp| end.map_or(true, |e| dp.date <= e))
            .copied()
            .collect();
        Self { points }
    }

    /// True when every point falls on December 31, i.e. the series is already annual.
    pub fn is_annual(&self) -> bool {
        let years: BTreeSet<i32> = self.points.iter().map(|dp| dp.date.year()).collect();
        years.len() == self.points.len()
            && self.points.iter().all(|dp| dp.date.month() == 12 && dp.date.day() == 31)
    }
}

/// Inner-joins several series on their periods.
///
/// Returns one series per input, all sharing exactly the periods present in
/// every input. Unlike a forward fill, nothing is invented for missing periods.
pub fn align_series(series_list: &[&TimeSeries]) -> Vec<TimeSeries> {
    if series_list.is_empty() {
        return Vec::new();
    }

    // 1. Periods common to all inputs
    let mut common: BTreeSet<NaiveDate> = series_list[0].points.iter().map(|dp| dp.date).collect();
    for series in &series_list[1..] {
        let dates: BTreeSet<NaiveDate> = series.points.iter().map(|dp| dp.date).collect();
        common = common.intersection(&dates).copied().collect();
    }

    // 2. Filter each input down to them (order is preserved, so no re-check needed)
    series_list
        .iter()
        .map(|series| TimeSeries {
            points: series
                .points
                .iter()
                .filter(|dp| common.contains(&dp.date))
                .copied()
                .collect(),
        })
        .collect()
}
