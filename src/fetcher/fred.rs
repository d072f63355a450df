use async_trait::async_trait;
use crate::models::DataPoint;
use crate::series::registry::SourceType;
use super::DataSource;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

const OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// Optional inclusive bounds passed to FRED as observation_start / observation_end.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObservationWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

pub struct FredFetcher {
    api_key: String,
    client: Client,
    window: ObservationWindow,
}

impl FredFetcher {
    pub fn new(api_key: String, window: ObservationWindow) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("GrowthAnalyzer/0.1"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        // FRED keys are 32 lower-case alphanumerics
        Self { api_key: api_key.trim().to_lowercase(), client, window }
    }

    fn query(&self, series_id: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("series_id", series_id.to_string()),
            ("api_key", self.api_key.clone()),
            ("file_type", "json".to_string()),
        ];
        if let Some(start) = self.window.start {
            params.push(("observation_start", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.window.end {
            params.push(("observation_end", end.format("%Y-%m-%d").to_string()));
        }
        params
    }

    fn parse_observations(json: &Value) -> Result<Vec<DataPoint>> {
        let observations = json["observations"]
            .as_array()
            .ok_or_else(|| anyhow!("No observations found in FRED response"))?;

        let mut data_points = Vec::new();

        for obs in observations {
            // "date": "2023-01-01", "value": "123.45"
            if let (Some(date_str), Some(value_str)) = (obs["date"].as_str(), obs["value"].as_str()) {
                // "." marks a missing value
                if value_str == "." {
                    continue;
                }

                if let Ok(value) = value_str.parse::<f64>() {
                    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?;
                    data_points.push(DataPoint { date, value });
                }
            }
        }

        Ok(data_points)
    }
}

#[async_trait]
impl DataSource for FredFetcher {
    fn name(&self) -> &str {
        "fred"
    }

    fn kind(&self) -> SourceType {
        SourceType::Fred
    }

    async fn fetch_data(&self, series_id: &str) -> Result<Vec<DataPoint>> {
        // Never log the key itself
        tracing::debug!(series_id, key_len = self.api_key.len(), "FRED fetch");

        if self.api_key.is_empty() {
            return Err(anyhow!("FRED API key is empty or missing"));
        }

        if self.api_key.len() != 32 {
            tracing::warn!(key_len = self.api_key.len(), "FRED API key is not 32 characters; the request will likely fail");
        }

        let resp = self.client
            .get(OBSERVATIONS_URL)
            .query(&self.query(series_id))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("FRED API Error: {} - Body: {}", status, error_text));
        }

        let json: Value = resp.json().await?;
        let points = Self::parse_observations(&json)?;
        tracing::info!(series_id, count = points.len(), "FRED observations fetched");
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_response() {
        let json_data = json!({
            "observations": [
                { "date": "2023-01-01", "value": "123.45" },
                { "date": "2023-04-01", "value": "124.56" }
            ]
        });

        let points = FredFetcher::parse_observations(&json_data).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, 123.45);
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());
    }

    #[test]
    fn test_parse_missing_value() {
        let json_data = json!({
            "observations": [
                { "date": "2023-01-01", "value": "." },
                { "date": "2023-04-01", "value": "100.0" }
            ]
        });

        let points = FredFetcher::parse_observations(&json_data).unwrap();
        assert_eq!(points.len(), 1); // "." should be skipped
        assert_eq!(points[0].value, 100.0);
    }

    #[test]
    fn test_parse_invalid_format() {
        let json_data = json!({ "error_message": "Bad Request. The value for variable api_key is not registered." });
        let result = FredFetcher::parse_observations(&json_data);
        assert!(result.is_err());
    }

    #[test]
    fn test_query_includes_window() {
        let window = ObservationWindow {
            start: NaiveDate::from_ymd_opt(1994, 1, 1),
            end: NaiveDate::from_ymd_opt(2024, 1, 1),
        };
        let fetcher = FredFetcher::new("  ABCDEF  ".to_string(), window);
        let params = fetcher.query("GDPC1");

        assert!(params.contains(&("api_key", "abcdef".to_string())));
        assert!(params.contains(&("observation_start", "1994-01-01".to_string())));
        assert!(params.contains(&("observation_end", "2024-01-01".to_string())));
    }

    #[test]
    fn test_query_without_window() {
        let fetcher = FredFetcher::new("key".to_string(), ObservationWindow::default());
        let params = fetcher.query("CE16OV");
        assert_eq!(params.len(), 3);
    }
}
