use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceType {
    Fred,
    /// Local JSON series file
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frequency {
    Monthly,
    Quarterly,
    Annual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    /// Real output, input to the cycle comparison and the Solow residual
    Output,
    /// Capital stock or its investment proxy
    Capital,
    /// Employment
    Labor,
}

// ============================================================================
// METADATA STRUCT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SeriesMetadata {
    pub slug: String,
    pub name: String,
    pub source: SourceType,
    pub source_symbol: String,
    pub frequency: Frequency,
    pub role: Role,
    pub unit: String,
    pub description: Option<String>,
}

macro_rules! series {
    ($slug:expr, $name:expr, $source:expr, $sym:expr, $freq:expr, $role:expr, $unit:expr, $desc:expr) => {
        SeriesMetadata {
            slug: $slug.to_string(),
            name: $name.to_string(),
            source: $source,
            source_symbol: $sym.to_string(),
            frequency: $freq,
            role: $role,
            unit: $unit.to_string(),
            description: Some($desc.to_string()),
        }
    };
}

// ============================================================================
// STATIC SERIES REGISTRY (Lazy initialization, O(1) lookup)
// ============================================================================

static SERIES: Lazy<Vec<SeriesMetadata>> = Lazy::new(|| {
    vec![
        series!("us_real_gdp", "US Real GDP", SourceType::Fred, "GDPC1", Frequency::Quarterly, Role::Output,
                "Billions of chained 2017 dollars, SAAR", "Real gross domestic product of the United States"),
        series!("jp_real_gdp", "Japan Real GDP", SourceType::Fred, "JPNRGDPEXP", Frequency::Quarterly, Role::Output,
                "Billions of chained 2015 yen, SA", "Real gross domestic product of Japan"),
        series!("us_fixed_investment", "US Private Nonresidential Fixed Investment", SourceType::Fred, "PNFI",
                Frequency::Quarterly, Role::Capital, "Billions of dollars, SAAR",
                "Capital proxy for the US Solow residual"),
        series!("us_employment", "US Civilian Employment", SourceType::Fred, "CE16OV", Frequency::Monthly,
                Role::Labor, "Thousands of persons, SA", "Employment level, 16 years and over"),
    ]
});

/// HashMap for O(1) slug -> index lookup
static SERIES_MAP: Lazy<HashMap<String, usize>> = Lazy::new(|| {
    SERIES
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.slug.clone(), idx))
        .collect()
});

/// OECD members in the 1990–2019 growth-accounting sample (ISO 3166 alpha-3).
pub const OECD_SAMPLE: [&str; 22] = [
    "AUS", "AUT", "BEL", "CAN", "DNK", "FIN", "FRA", "DEU", "GRC", "ISL", "IRL",
    "ITA", "JPN", "NLD", "NZL", "NOR", "PRT", "ESP", "SWE", "CHE", "GBR", "USA",
];

pub const SAMPLE_FIRST_YEAR: i32 = 1990;
pub const SAMPLE_LAST_YEAR: i32 = 2019;

// ============================================================================
// REGISTRY STRUCT & IMPL
// ============================================================================

pub struct Registry;

impl Registry {
    pub fn get_all_series() -> &'static Vec<SeriesMetadata> {
        &SERIES
    }

    pub fn get_by_role(role: Role) -> Vec<SeriesMetadata> {
        SERIES.iter().filter(|s| s.role == role).cloned().collect()
    }

    /// O(1) lookup by slug
    pub fn get_metadata(slug: &str) -> Option<SeriesMetadata> {
        SERIES_MAP
            .get(slug)
            .and_then(|&idx| SERIES.get(idx))
            .cloned()
    }

    /// Symbol to request from the source.
    ///
    /// Registered slugs map to their source symbol. Anything else is passed
    /// through untouched, so raw FRED ids (e.g. "GDPC1") and ids present in a
    /// local file still work.
    pub fn resolve_symbol(slug: &str) -> String {
        Self::get_metadata(slug)
            .map(|m| m.source_symbol)
            .unwrap_or_else(|| slug.to_string())
    }

    /// Human-readable label, falling back to the slug.
    pub fn display_name(slug: &str) -> String {
        Self::get_metadata(slug)
            .map(|m| m.name)
            .unwrap_or_else(|| slug.to_string())
    }
}
