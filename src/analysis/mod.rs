pub mod business_cycle;
pub mod growth_accounting;
pub mod hp_filter;
pub mod solow;
pub mod statistics;

pub use business_cycle::{compare_cycles, CycleComparison, CycleSummary, LabeledSeries};
pub use growth_accounting::{account_growth, account_panel, average_figures, CountryPanel, PanelReport};
pub use hp_filter::{decompose, hp_filter, TrendCycle};
pub use solow::{solow_residual, FactorSeries, SolowPoint};
