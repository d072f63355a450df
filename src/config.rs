//! Runtime configuration from the environment (and `.env`, via dotenvy).

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::fetcher::fred::ObservationWindow;

pub const FRED_API_KEY: &str = "FRED_API_KEY";
pub const OBSERVATION_START: &str = "GROWTH_ANALYZER_OBSERVATION_START";
pub const OBSERVATION_END: &str = "GROWTH_ANALYZER_OBSERVATION_END";
pub const DATA_FILE: &str = "GROWTH_ANALYZER_DATA_FILE";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub fred_api_key: Option<String>,
    pub window: ObservationWindow,
    pub data_file: Option<PathBuf>,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let fred_api_key = non_empty(FRED_API_KEY);
        if let Some(key) = &fred_api_key {
            if key.len() != 32 {
                tracing::warn!(key_len = key.len(), "{} is not 32 characters", FRED_API_KEY);
            }
        }

        let window = ObservationWindow {
            start: non_empty(OBSERVATION_START)
                .map(|v| parse_date(OBSERVATION_START, &v))
                .transpose()?,
            end: non_empty(OBSERVATION_END)
                .map(|v| parse_date(OBSERVATION_END, &v))
                .transpose()?,
        };

        Ok(Self {
            fred_api_key,
            window,
            data_file: non_empty(DATA_FILE).map(PathBuf::from),
        })
    }

    pub fn require_fred_key(&self) -> Result<&str> {
        self.fred_api_key
            .as_deref()
            .ok_or_else(|| anyhow!("{} is not set (environment or .env)", FRED_API_KEY))
    }
}

pub fn parse_date(name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("{} must be YYYY-MM-DD, got '{}'", name, value))
}
