//! Macro time-series analysis: HP-filter business cycles, growth accounting
//! across a country panel, and Solow-residual TFP growth.
//!
//! The numerical core (`analysis`, `core::timeseries`) is pure and
//! synchronous and reports failures through [`error::AnalysisError`].
//! Data acquisition (`fetcher`), pacing and the async pipelines
//! (`core::orchestrator`) wrap it for the `growth-analyzer` binary.

pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod series;

pub use crate::core::timeseries::TimeSeries;
pub use error::{AnalysisError, AnalysisResult};
pub use models::{CountryYearObservation, DataPoint, GrowthAccountingResult, GrowthFigures};
