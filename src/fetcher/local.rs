use async_trait::async_trait;
use crate::models::{CountryYearObservation, DataPoint};
use crate::series::registry::SourceType;
use super::fred::ObservationWindow;
use super::DataSource;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawPoint {
    date: NaiveDate,
    value: Option<f64>,
}

/// Series read from a local JSON file of the form
/// `{ "GDPC1": [{ "date": "1994-01-01", "value": 10000.0 }, ...], ... }`.
///
/// Keys are source symbols, so a file exported from FRED can stand in for the
/// remote API. Null values are skipped like FRED's ".".
pub struct LocalFileSource {
    series: HashMap<String, Vec<DataPoint>>,
    window: ObservationWindow,
}

impl LocalFileSource {
    pub fn open(path: &Path, window: ObservationWindow) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read series file {}", path.display()))?;
        let source = Self::from_json(&content, window)
            .with_context(|| format!("Invalid series file {}", path.display()))?;
        tracing::info!(path = %path.display(), series = source.series.len(), "Local series file loaded");
        Ok(source)
    }

    pub fn from_json(content: &str, window: ObservationWindow) -> Result<Self> {
        let raw: HashMap<String, Vec<RawPoint>> = serde_json::from_str(content)?;
        let series = raw
            .into_iter()
            .map(|(id, points)| {
                let mut points: Vec<DataPoint> = points
                    .into_iter()
                    .filter_map(|p| p.value.map(|value| DataPoint { date: p.date, value }))
                    .collect();
                points.sort_by_key(|p| p.date);
                (id, points)
            })
            .collect();
        Ok(Self { series, window })
    }
}

#[async_trait]
impl DataSource for LocalFileSource {
    fn name(&self) -> &str {
        "local"
    }

    fn kind(&self) -> SourceType {
        SourceType::Local
    }

    async fn fetch_data(&self, series_id: &str) -> Result<Vec<DataPoint>> {
        let points = self
            .series
            .get(series_id)
            .ok_or_else(|| anyhow!("Series '{}' not found in local file", series_id))?;

        Ok(points
            .iter()
            .filter(|p| self.window.start.map_or(true, |s| p.date >= s))
            .filter(|p| self.window.end.map_or(true, |e| p.date <= e))
            .copied()
            .collect())
    }
}

/// A panel row as stored on disk; any field may be missing.
#[derive(Debug, Deserialize)]
struct RawPanelRow {
    country_code: Option<String>,
    country: Option<String>,
    year: Option<i32>,
    output: Option<f64>,
    capital_stock: Option<f64>,
    employment: Option<f64>,
    average_hours: Option<f64>,
    labor_share: Option<f64>,
    tfp_level: Option<f64>,
}

impl RawPanelRow {
    fn complete(self) -> Option<CountryYearObservation> {
        let country_code = self.country_code?;
        Some(CountryYearObservation {
            country: self.country.unwrap_or_else(|| country_code.clone()),
            country_code,
            year: self.year?,
            output: self.output?,
            capital_stock: self.capital_stock?,
            employment: self.employment?,
            average_hours: self.average_hours?,
            labor_share: self.labor_share?,
            tfp_level: self.tfp_level?,
        })
    }
}

/// Parses a JSON array of panel rows, dropping rows with a missing field.
pub fn parse_panel(content: &str) -> Result<Vec<CountryYearObservation>> {
    let raw: Vec<RawPanelRow> = serde_json::from_str(content)?;
    let total = raw.len();
    let rows: Vec<CountryYearObservation> = raw.into_iter().filter_map(RawPanelRow::complete).collect();

    let dropped = total - rows.len();
    if dropped > 0 {
        tracing::info!(dropped, kept = rows.len(), "Dropped panel rows with missing fields");
    }
    Ok(rows)
}

pub fn load_panel(path: &Path) -> Result<Vec<CountryYearObservation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read panel file {}", path.display()))?;
    parse_panel(&content).with_context(|| format!("Invalid panel file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_local_source_filters_and_sorts() {
        let content = json!({
            "GDPC1": [
                { "date": "1995-01-01", "value": 3.0 },
                { "date": "1994-01-01", "value": 1.0 },
                { "date": "1994-04-01", "value": null }
            ]
        })
        .to_string();

        let source = LocalFileSource::from_json(&content, ObservationWindow::default()).unwrap();
        let points = source.fetch_data("GDPC1").await.unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, 1.0);
        assert_eq!(points[1].value, 3.0);

        assert!(source.fetch_data("PNFI").await.is_err());
    }

    #[tokio::test]
    async fn test_local_source_applies_window() {
        let content = json!({
            "X": [
                { "date": "1990-01-01", "value": 1.0 },
                { "date": "2000-01-01", "value": 2.0 },
                { "date": "2010-01-01", "value": 3.0 }
            ]
        })
        .to_string();
        let window = ObservationWindow {
            start: NaiveDate::from_ymd_opt(1995, 1, 1),
            end: NaiveDate::from_ymd_opt(2005, 1, 1),
        };

        let source = LocalFileSource::from_json(&content, window).unwrap();
        let points = source.fetch_data("X").await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 2.0);
    }

    #[test]
    fn test_parse_panel_drops_incomplete_rows() {
        let content = json!([
            { "country_code": "AUS", "country": "Australia", "year": 1990, "output": 1.0,
              "capital_stock": 2.0, "employment": 3.0, "average_hours": 1700.0,
              "labor_share": 0.6, "tfp_level": 0.9 },
            { "country_code": "AUS", "country": "Australia", "year": 1991, "output": 1.1,
              "capital_stock": null, "employment": 3.0, "average_hours": 1700.0,
              "labor_share": 0.6, "tfp_level": 0.9 },
            { "country_code": "AUT", "year": 1990, "output": 1.0,
              "capital_stock": 2.0, "employment": 3.0, "average_hours": 1600.0,
              "labor_share": 0.55, "tfp_level": 1.0 }
        ])
        .to_string();

        let rows = parse_panel(&content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].country, "Australia");
        // Missing display name falls back to the code
        assert_eq!(rows[1].country, "AUT");
    }

    #[test]
    fn test_parse_panel_rejects_non_array() {
        assert!(parse_panel("{\"rows\": []}").is_err());
    }
}
