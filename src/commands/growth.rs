use anyhow::{Result, bail};
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;

use growth_analyzer_lib::analysis::growth_accounting::PanelReport;
use growth_analyzer_lib::core::orchestrator::{self, PanelSelection};
use growth_analyzer_lib::fetcher::local::load_panel;
use growth_analyzer_lib::series::{OECD_SAMPLE, SAMPLE_FIRST_YEAR, SAMPLE_LAST_YEAR};

/// Arguments for `growth`
#[derive(Args, Debug)]
pub struct GrowthArgs {
    /// JSON array of country-year observations
    #[arg(long)]
    pub panel: PathBuf,
    /// First year of the sample
    #[arg(long, default_value_t = SAMPLE_FIRST_YEAR)]
    pub from: i32,
    /// Last year of the sample
    #[arg(long, default_value_t = SAMPLE_LAST_YEAR)]
    pub to: i32,
    /// Keep every country in the file instead of the OECD sample
    #[arg(long)]
    pub all_countries: bool,
    /// Decimals in the printed figures
    #[arg(long, default_value_t = 2)]
    pub decimals: u32,
}

pub fn growth_command(args: GrowthArgs) -> Result<Value> {
    if args.from > args.to {
        bail!("--from ({}) must not be after --to ({})", args.from, args.to);
    }

    let observations = load_panel(&args.panel)?;
    let sample: &[&str] = &OECD_SAMPLE;
    let selection = PanelSelection {
        years: Some(args.from..=args.to),
        countries: if args.all_countries { None } else { Some(sample) },
    };

    let report = orchestrator::run_growth_accounting(observations, &selection);
    Ok(render(&report, args.decimals))
}

/// Rounds for display only; the average was taken over unrounded figures.
fn render(report: &PanelReport, decimals: u32) -> Value {
    let results: Vec<Value> = report
        .results
        .iter()
        .map(|r| {
            let mut rounded = r.clone();
            rounded.figures = r.figures.rounded(decimals);
            json!(rounded)
        })
        .collect();

    let average = report.average.map(|avg| {
        let mut value = json!(avg.rounded(decimals));
        value["country"] = json!("Average");
        value
    });

    json!({
        "results": results,
        "average": average,
        "failures": report.failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_analyzer_lib::analysis::growth_accounting::CountryFailure;
    use growth_analyzer_lib::{AnalysisError, GrowthAccountingResult, GrowthFigures};

    #[test]
    fn test_render_rounds_and_labels_average() {
        let figures = GrowthFigures { output_growth: 7.17734, ..Default::default() };
        let report = PanelReport {
            results: vec![GrowthAccountingResult {
                country_code: "USA".to_string(),
                country: "United States".to_string(),
                start_year: 1990,
                end_year: 2019,
                figures,
            }],
            failures: vec![CountryFailure {
                country_code: "GRC".to_string(),
                error: AnalysisError::DegenerateSpan { year: 1990 },
            }],
            average: Some(figures),
        };

        let value = render(&report, 2);
        assert_eq!(value["results"][0]["output_growth"], json!(7.18));
        assert_eq!(value["average"]["country"], json!("Average"));
        assert_eq!(value["average"]["output_growth"], json!(7.18));
        assert!(value["failures"][0]["error"].is_string());
    }
}
