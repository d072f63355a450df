//! Error types for the numerical core.
//!
//! Data sources, the orchestrator and the CLI work with `anyhow::Result`;
//! everything under `analysis` and `core::timeseries` reports failures
//! through [`AnalysisError`] so batch callers can keep them per unit of work.

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Validation failures raised before or during a computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Fewer observations than the computation needs.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A tuning constant or input field is outside its valid range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Two paired series have different lengths.
    #[error("Length mismatch: left series has {left} values, right series has {right}")]
    LengthMismatch { left: usize, right: usize },

    /// First and last observation fall in the same year.
    #[error("Degenerate span: first and last observation are both in {year}")]
    DegenerateSpan { year: i32 },

    /// A value fed to a logarithm or power is zero or negative.
    #[error("Non-positive value {value} for `{field}` at {period}")]
    NonPositiveValue {
        field: &'static str,
        period: String,
        value: f64,
    },

    /// Periods do not strictly increase.
    #[error("Periods out of order at index {index}: each period must be later than the previous one")]
    UnorderedPeriods { index: usize },

    /// NaN or infinity where a finite number is required.
    #[error("Non-finite value {value} at index {index}")]
    NonFiniteValue { index: usize, value: f64 },
}

impl AnalysisError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
