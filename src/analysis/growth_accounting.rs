//! Growth accounting over a country panel.
//!
//! Labour-productivity growth is split into a capital-deepening term and a
//! TFP term, each annualized over the first and last observed year:
//!
//! ```text
//! g(x)              = ((x[tN] / x[t0])^(1 / (tN - t0)) - 1) * 100
//! capital deepening = mean(α[t0], α[tN]) * g(k),   k = (K / hours)^α
//! TFP growth        = g(A)
//! ```
//!
//! Only two terms are accounted for, so the two shares of `g(y)` need not sum
//! to one and are reported as computed.

use crate::analysis::statistics::mean;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{CountryYearObservation, GrowthAccountingResult, GrowthFigures};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

/// Quantities derived from one observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    /// Capital share of income, `1 - labor_share`.
    pub alpha: f64,
    /// Employment times average hours.
    pub effective_labor: f64,
    /// Output per hour worked.
    pub labor_productivity: f64,
    /// `(capital_stock / effective_labor)^alpha`.
    pub capital_intensity_term: f64,
}

impl DerivedQuantities {
    pub fn from_observation(obs: &CountryYearObservation) -> AnalysisResult<Self> {
        let positive_fields = [
            ("output", obs.output),
            ("capital_stock", obs.capital_stock),
            ("employment", obs.employment),
            ("average_hours", obs.average_hours),
            ("tfp_level", obs.tfp_level),
        ];
        for (field, value) in positive_fields {
            if !(value > 0.0) {
                return Err(AnalysisError::NonPositiveValue {
                    field,
                    period: obs.year.to_string(),
                    value,
                });
            }
        }
        if !(obs.labor_share > 0.0 && obs.labor_share < 1.0) {
            return Err(AnalysisError::invalid_parameter(
                "labor_share",
                format!("must lie in (0, 1), got {} in {}", obs.labor_share, obs.year),
            ));
        }

        let alpha = 1.0 - obs.labor_share;
        let effective_labor = obs.employment * obs.average_hours;
        Ok(Self {
            alpha,
            effective_labor,
            labor_productivity: obs.output / effective_labor,
            capital_intensity_term: (obs.capital_stock / effective_labor).powf(alpha),
        })
    }
}

/// Annualized growth rate in percent between two positive levels `years` apart.
pub fn annualized_growth(start: f64, end: f64, years: i32) -> f64 {
    ((end / start).powf(1.0 / years as f64) - 1.0) * 100.0
}

/// Accounts for one country's growth over its full observed span.
///
/// `observations` must belong to one country and be sorted by strictly
/// increasing year.
pub fn account_growth(observations: &[CountryYearObservation]) -> AnalysisResult<GrowthAccountingResult> {
    // 1. Shape of the span
    let (first, last) = match observations {
        [first, .., last] => (first, last),
        _ => {
            return Err(AnalysisError::InsufficientData {
                required: 2,
                actual: observations.len(),
            })
        }
    };
    if first.year == last.year {
        return Err(AnalysisError::DegenerateSpan { year: first.year });
    }
    if let Some(index) = observations
        .windows(2)
        .position(|pair| pair[1].year <= pair[0].year)
    {
        return Err(AnalysisError::UnorderedPeriods { index: index + 1 });
    }
    if let Some(stray) = observations
        .iter()
        .find(|obs| obs.country_code != first.country_code)
    {
        return Err(AnalysisError::invalid_parameter(
            "country_code",
            format!(
                "observations mix {} and {}",
                first.country_code, stray.country_code
            ),
        ));
    }

    // 2. Every row must be usable, not just the endpoints
    let derived = observations
        .iter()
        .map(DerivedQuantities::from_observation)
        .collect::<AnalysisResult<Vec<_>>>()?;
    let (start, end) = (&derived[0], &derived[derived.len() - 1]);
    let years = last.year - first.year;

    // 3. Growth rates and contributions
    let output_growth = annualized_growth(start.labor_productivity, end.labor_productivity, years);
    let capital_growth =
        annualized_growth(start.capital_intensity_term, end.capital_intensity_term, years);
    let tfp_growth = annualized_growth(first.tfp_level, last.tfp_level, years);

    let alpha_avg = (start.alpha + end.alpha) / 2.0;
    let capital_deepening = alpha_avg * capital_growth;

    Ok(GrowthAccountingResult {
        country_code: first.country_code.clone(),
        country: first.country.clone(),
        start_year: first.year,
        end_year: last.year,
        figures: GrowthFigures {
            output_growth,
            tfp_growth,
            capital_deepening,
            tfp_share: tfp_growth / output_growth,
            capital_share: capital_deepening / output_growth,
        },
    })
}

/// Unweighted mean of each field across countries.
pub fn average_figures(figures: &[GrowthFigures]) -> AnalysisResult<GrowthFigures> {
    let field = |f: fn(&GrowthFigures) -> f64| -> AnalysisResult<f64> {
        mean(&figures.iter().map(f).collect::<Vec<_>>())
    };
    Ok(GrowthFigures {
        output_growth: field(|g| g.output_growth)?,
        tfp_growth: field(|g| g.tfp_growth)?,
        capital_deepening: field(|g| g.capital_deepening)?,
        tfp_share: field(|g| g.tfp_share)?,
        capital_share: field(|g| g.capital_share)?,
    })
}

/// Observations grouped by country code, each group sorted by year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryPanel {
    countries: BTreeMap<String, Vec<CountryYearObservation>>,
}

impl CountryPanel {
    pub fn from_observations(observations: Vec<CountryYearObservation>) -> Self {
        let mut countries: BTreeMap<String, Vec<CountryYearObservation>> = BTreeMap::new();
        for obs in observations {
            countries.entry(obs.country_code.clone()).or_default().push(obs);
        }
        for rows in countries.values_mut() {
            rows.sort_by_key(|obs| obs.year);
        }
        Self { countries }
    }

    /// Drops rows outside `years`; countries left without rows disappear.
    pub fn restrict_years(mut self, years: RangeInclusive<i32>) -> Self {
        for rows in self.countries.values_mut() {
            rows.retain(|obs| years.contains(&obs.year));
        }
        self.countries.retain(|_, rows| !rows.is_empty());
        self
    }

    pub fn retain_countries(mut self, codes: &[&str]) -> Self {
        let keep: BTreeSet<&str> = codes.iter().copied().collect();
        self.countries.retain(|code, _| keep.contains(code.as_str()));
        self
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn country_codes(&self) -> impl Iterator<Item = &str> {
        self.countries.keys().map(String::as_str)
    }

    pub fn observations(&self, country_code: &str) -> Option<&[CountryYearObservation]> {
        self.countries.get(country_code).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryFailure {
    pub country_code: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: AnalysisError,
}

fn serialize_error<S: serde::Serializer>(err: &AnalysisError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&err.to_string())
}

/// Outcome of accounting for a whole panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelReport {
    /// Successful countries, ordered by country code.
    pub results: Vec<GrowthAccountingResult>,
    pub failures: Vec<CountryFailure>,
    /// Mean over `results`; `None` when no country succeeded.
    pub average: Option<GrowthFigures>,
}

/// Runs [`account_growth`] for every country. A failing country is recorded in
/// `failures` and never stops the others.
pub fn account_panel(panel: &CountryPanel) -> PanelReport {
    let mut results = Vec::new();
    let mut failures = Vec::new();

    for (code, rows) in &panel.countries {
        match account_growth(rows) {
            Ok(result) => {
                tracing::debug!(
                    country = %code,
                    output_growth = result.figures.output_growth,
                    "growth accounting complete"
                );
                results.push(result);
            }
            Err(error) => {
                tracing::warn!(country = %code, %error, "growth accounting failed");
                failures.push(CountryFailure {
                    country_code: code.clone(),
                    error,
                });
            }
        }
    }

    let figures: Vec<GrowthFigures> = results.iter().map(|r| r.figures).collect();
    let average = if figures.is_empty() {
        None
    } else {
        average_figures(&figures).ok()
    };

    PanelReport {
        results,
        failures,
        average,
    }
}
