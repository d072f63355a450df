use growth_analyzer_lib::core::orchestrator::{run_cycle_comparison, run_solow, SolowInputs};
use growth_analyzer_lib::fetcher::fred::ObservationWindow;
use growth_analyzer_lib::fetcher::local::{load_panel, LocalFileSource};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

fn annual(start_year: i32, values: &[f64]) -> Value {
    Value::Array(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| json!({ "date": format!("{}-01-01", start_year + i as i32), "value": v }))
            .collect(),
    )
}

fn write_json(content: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[tokio::test]
async fn cycle_comparison_from_local_file() {
    let us: Vec<f64> = (0..30).map(|i| 10000.0 * 1.025f64.powi(i) * (1.0 + 0.01 * (i as f64).sin())).collect();
    let jp: Vec<f64> = (0..30).map(|i| 500.0 * 1.01f64.powi(i) * (1.0 + 0.01 * (i as f64).sin())).collect();
    let file = write_json(&json!({
        "GDPC1": annual(1990, &us),
        // Japanese data starts later; only the overlap is correlated
        "JPNRGDPEXP": annual(1995, &jp[5..]),
    }));

    let source = LocalFileSource::open(file.path(), ObservationWindow::default()).unwrap();
    let report = run_cycle_comparison(&source, "us_real_gdp", "jp_real_gdp", &[10.0, 100.0])
        .await
        .unwrap();

    assert_eq!(report.len(), 2);
    for row in &report {
        assert_eq!(row.common_periods, 25);
        assert_eq!(row.left.decomposition.cycle.len(), 30);
        assert_eq!(row.right.decomposition.cycle.len(), 25);
        assert!(row.left.std_dev > 0.0);
        // Both cycles share the same sine component
        assert!(row.correlation > 0.5, "correlation {}", row.correlation);
    }
}

#[tokio::test]
async fn missing_series_is_an_error() {
    let file = write_json(&json!({ "GDPC1": annual(1990, &[1.0, 2.0, 3.0]) }));
    let source = LocalFileSource::open(file.path(), ObservationWindow::default()).unwrap();
    assert!(run_cycle_comparison(&source, "us_real_gdp", "jp_real_gdp", &[10.0]).await.is_err());
}

#[tokio::test]
async fn solow_residual_from_local_file() {
    let gdp: Vec<f64> = (0..6).map(|i| 100.0 * 1.03f64.powi(i)).collect();
    let capital: Vec<f64> = (0..6).map(|i| 300.0 * 1.03f64.powi(i)).collect();
    let labor: Vec<f64> = (0..6).map(|i| 50.0 * 1.03f64.powi(i)).collect();
    let file = write_json(&json!({
        "GDPC1": annual(2000, &gdp),
        "PNFI": annual(2000, &capital),
        "CE16OV": annual(2000, &labor),
    }));

    let source = LocalFileSource::open(file.path(), ObservationWindow::default()).unwrap();
    let inputs = SolowInputs { output: "us_real_gdp", capital: "us_fixed_investment", labor: "us_employment" };
    let points = run_solow(&source, &inputs, 0.33).await.unwrap();

    assert_eq!(points.len(), 5);
    // Balanced growth leaves nothing for TFP
    assert!(points.iter().all(|p| p.tfp_growth.abs() < 1e-9));
}

#[test]
fn panel_file_drops_incomplete_rows() {
    let file = write_json(&json!([
        { "country_code": "NZL", "country": "New Zealand", "year": 1990, "output": 80.0,
          "capital_stock": 250.0, "employment": 1.6, "average_hours": 1800.0,
          "labor_share": 0.55, "tfp_level": 0.95 },
        { "country_code": "NZL", "country": "New Zealand", "year": 2019, "output": 190.0,
          "capital_stock": 700.0, "employment": 2.6, "average_hours": 1750.0,
          "labor_share": 0.57, "tfp_level": null }
    ]));

    let rows = load_panel(file.path()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].year, 1990);
}
