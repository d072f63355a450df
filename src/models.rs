use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// A single dated observation as delivered by a data source.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// One country-year row of a growth-accounting panel.
///
/// Field names follow the Penn World Table variables they are usually
/// loaded from (rgdpna, rkna, emp, avh, labsh, rtfpna).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CountryYearObservation {
    pub country_code: String,
    pub country: String,
    pub year: i32,
    /// Real GDP at constant national prices.
    pub output: f64,
    /// Capital stock at constant national prices.
    pub capital_stock: f64,
    /// Persons engaged.
    pub employment: f64,
    /// Average annual hours worked per person engaged.
    pub average_hours: f64,
    /// Share of labour compensation in GDP, strictly between 0 and 1.
    pub labor_share: f64,
    /// TFP level at constant national prices.
    pub tfp_level: f64,
}

/// The scalar outputs of growth accounting for one country (or the average row).
///
/// Growth figures are annualized percentages; the shares are plain ratios of
/// each contribution to `output_growth` and are not normalized to sum to one.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct GrowthFigures {
    pub output_growth: f64,
    pub tfp_growth: f64,
    pub capital_deepening: f64,
    pub tfp_share: f64,
    pub capital_share: f64,
}

impl GrowthFigures {
    /// Rounds every field for display. Aggregation must use the raw figures.
    pub fn rounded(&self, decimals: u32) -> Self {
        let factor = 10f64.powi(decimals as i32);
        let round = |x: f64| (x * factor).round() / factor;
        Self {
            output_growth: round(self.output_growth),
            tfp_growth: round(self.tfp_growth),
            capital_deepening: round(self.capital_deepening),
            tfp_share: round(self.tfp_share),
            capital_share: round(self.capital_share),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GrowthAccountingResult {
    pub country_code: String,
    pub country: String,
    pub start_year: i32,
    pub end_year: i32,
    #[serde(flatten)]
    pub figures: GrowthFigures,
}
