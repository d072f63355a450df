use growth_analyzer_lib::analysis::growth_accounting::{account_growth, account_panel, CountryPanel};
use growth_analyzer_lib::core::orchestrator::{run_growth_accounting, PanelSelection};
use growth_analyzer_lib::{AnalysisError, CountryYearObservation};

fn row(code: &str, year: i32, output: f64) -> CountryYearObservation {
    CountryYearObservation {
        country_code: code.to_string(),
        country: format!("Country {}", code),
        year,
        output,
        capital_stock: 500.0,
        employment: 20.0,
        average_hours: 1700.0,
        labor_share: 0.65,
        tfp_level: 1.0,
    }
}

#[test]
fn doubling_output_over_a_decade() {
    let result = account_growth(&[row("CAN", 2000, 100.0), row("CAN", 2010, 200.0)]).unwrap();
    let rounded = result.figures.rounded(2);
    assert_eq!(rounded.output_growth, 7.18);
}

#[test]
fn same_year_span_fails() {
    let err = account_growth(&[row("CAN", 2000, 100.0), row("CAN", 2000, 200.0)]).unwrap_err();
    assert_eq!(err, AnalysisError::DegenerateSpan { year: 2000 });
}

#[test]
fn average_row_is_unweighted_mean() {
    // (1.02^10) and (1.04^10) growth factors give exactly 2% and 4% a year
    let panel = CountryPanel::from_observations(vec![
        row("AAA", 2000, 100.0),
        row("AAA", 2010, 100.0 * 1.02f64.powi(10)),
        row("BBB", 2000, 100.0),
        row("BBB", 2010, 100.0 * 1.04f64.powi(10)),
    ]);
    let report = account_panel(&panel);

    assert_eq!(report.results.len(), 2);
    let average = report.average.unwrap();
    assert!((average.output_growth - 3.0).abs() < 1e-9);
}

#[test]
fn one_bad_country_does_not_stop_the_panel() {
    let mut broken = row("GRC", 1990, 100.0);
    broken.capital_stock = -1.0;
    let observations = vec![
        row("AUS", 1990, 100.0),
        row("AUS", 2019, 180.0),
        broken,
        row("GRC", 2019, 120.0),
    ];

    let report = run_growth_accounting(observations, &PanelSelection::default());

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].country_code, "AUS");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].country_code, "GRC");
    assert!(matches!(
        report.failures[0].error,
        AnalysisError::NonPositiveValue { field: "capital_stock", .. }
    ));
    // Average covers the successful country only
    assert_eq!(report.average.unwrap(), report.results[0].figures);
}

#[test]
fn empty_selection_has_no_average() {
    let observations = vec![row("AUS", 1990, 100.0), row("AUS", 2019, 180.0)];
    let codes = ["USA"];
    let report = run_growth_accounting(
        observations,
        &PanelSelection { years: None, countries: Some(&codes) },
    );
    assert!(report.results.is_empty());
    assert!(report.average.is_none());
}
