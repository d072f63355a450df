//! CLI command handlers
//!
//! - `cycles`: HP-filter cycle comparison of two output series
//! - `growth`: growth accounting over a country panel file
//! - `solow`: Solow-residual TFP growth
//! - `series`: registered series

pub mod cycles;
pub mod growth;
pub mod solow;

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;

use growth_analyzer_lib::config::parse_date;
use growth_analyzer_lib::fetcher::fred::ObservationWindow;
use growth_analyzer_lib::series::Registry;

/// CLI dates override the configured window side by side.
pub(crate) fn merge_window(
    configured: ObservationWindow,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<ObservationWindow> {
    let parse = |name: &str, value: Option<&str>| -> Result<Option<NaiveDate>> {
        value.map(|v| parse_date(name, v)).transpose()
    };
    Ok(ObservationWindow {
        start: parse("--start", start)?.or(configured.start),
        end: parse("--end", end)?.or(configured.end),
    })
}

pub fn list_series() -> Result<Value> {
    Ok(serde_json::to_value(Registry::get_all_series())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_window_prefers_flags() {
        let configured = ObservationWindow {
            start: NaiveDate::from_ymd_opt(1990, 1, 1),
            end: NaiveDate::from_ymd_opt(2022, 1, 1),
        };
        let window = merge_window(configured, Some("1994-01-01"), None).unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(1994, 1, 1));
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2022, 1, 1));

        assert!(merge_window(configured, Some("01/01/1994"), None).is_err());
    }
}
