//! Hodrick–Prescott trend/cycle decomposition.
//!
//! The trend τ minimizes
//!
//! ```text
//! Σ (y_t − τ_t)² + λ Σ [(τ_{t+1} − τ_t) − (τ_t − τ_{t−1})]²
//! ```
//!
//! whose normal equations `(I + λ DᵀD) τ = y` (D the second-difference
//! operator) are symmetric positive definite and pentadiagonal. They are
//! solved in O(n) with a banded Cholesky factorization.

use crate::core::timeseries::TimeSeries;
use crate::error::{AnalysisError, AnalysisResult};
use serde::Serialize;

/// Conventional λ for annual data.
pub const LAMBDA_ANNUAL: f64 = 10.0;
/// Intermediate smoothing between annual and quarterly conventions.
pub const LAMBDA_INTERMEDIATE: f64 = 100.0;
/// Conventional λ for quarterly data.
pub const LAMBDA_QUARTERLY: f64 = 1600.0;

pub const DEFAULT_LAMBDAS: [f64; 3] = [LAMBDA_ANNUAL, LAMBDA_INTERMEDIATE, LAMBDA_QUARTERLY];

/// Second differences need three points.
pub const MIN_OBSERVATIONS: usize = 3;

/// Additive decomposition of a series: `value[t] = trend[t] + cycle[t]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendCycle {
    pub trend: TimeSeries,
    pub cycle: TimeSeries,
}

/// Splits a (log-level) series into trend and cycle.
pub fn decompose(series: &TimeSeries, lambda: f64) -> AnalysisResult<TrendCycle> {
    let (cycle, trend) = hp_filter(&series.values(), lambda)?;
    Ok(TrendCycle {
        trend: series.with_values(&trend)?,
        cycle: series.with_values(&cycle)?,
    })
}

/// Slice form of [`decompose`]. Returns `(cycle, trend)`.
pub fn hp_filter(values: &[f64], lambda: f64) -> AnalysisResult<(Vec<f64>, Vec<f64>)> {
    let n = values.len();
    if n < MIN_OBSERVATIONS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: n,
        });
    }
    if !(lambda > 0.0) || !lambda.is_finite() {
        return Err(AnalysisError::invalid_parameter(
            "lambda",
            format!("must be a positive finite number, got {}", lambda),
        ));
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(AnalysisError::NonFiniteValue { index, value });
    }

    let bands = PentaBands::new(n, lambda);
    let trend = bands.solve(values)?;
    let cycle = values.iter().zip(&trend).map(|(y, t)| y - t).collect();

    Ok((cycle, trend))
}

/// Upper bands of the symmetric matrix `I + λ DᵀD`.
///
/// `diag[i] = A[i][i]`, `off1[i] = A[i][i+1]`, `off2[i] = A[i][i+2]`.
struct PentaBands {
    diag: Vec<f64>,
    off1: Vec<f64>,
    off2: Vec<f64>,
}

impl PentaBands {
    fn new(n: usize, lambda: f64) -> Self {
        let mut diag = vec![1.0; n];
        let mut off1 = vec![0.0; n.saturating_sub(1)];
        let mut off2 = vec![0.0; n.saturating_sub(2)];

        // Each row r of D holds (1, -2, 1) at columns r, r+1, r+2; accumulate λ·DᵀD row by row.
        const STENCIL: [f64; 3] = [1.0, -2.0, 1.0];
        for r in 0..n - 2 {
            for a in 0..3 {
                for b in a..3 {
                    let coef = lambda * STENCIL[a] * STENCIL[b];
                    match b - a {
                        0 => diag[r + a] += coef,
                        1 => off1[r + a] += coef,
                        _ => off2[r + a] += coef,
                    }
                }
            }
        }

        Self { diag, off1, off2 }
    }

    /// Solves `A x = rhs` via `A = L Lᵀ` with L lower triangular of bandwidth 2.
    fn solve(&self, rhs: &[f64]) -> AnalysisResult<Vec<f64>> {
        let n = self.diag.len();

        // 1. Factorize: l0 = L[i][i], l1 = L[i][i-1], l2 = L[i][i-2]
        let mut l0 = vec![0.0; n];
        let mut l1 = vec![0.0; n];
        let mut l2 = vec![0.0; n];
        for i in 0..n {
            if i >= 2 {
                l2[i] = self.off2[i - 2] / l0[i - 2];
            }
            if i >= 1 {
                let overlap = if i >= 2 { l2[i] * l1[i - 1] } else { 0.0 };
                l1[i] = (self.off1[i - 1] - overlap) / l0[i - 1];
            }
            let pivot = self.diag[i] - l1[i] * l1[i] - l2[i] * l2[i];
            if !(pivot > 0.0) || !pivot.is_finite() {
                return Err(AnalysisError::invalid_parameter(
                    "lambda",
                    format!("smoothing system is numerically singular at row {}", i),
                ));
            }
            l0[i] = pivot.sqrt();
        }

        // 2. Forward substitution: L z = rhs
        let mut z = vec![0.0; n];
        for i in 0..n {
            let mut acc = rhs[i];
            if i >= 1 {
                acc -= l1[i] * z[i - 1];
            }
            if i >= 2 {
                acc -= l2[i] * z[i - 2];
            }
            z[i] = acc / l0[i];
        }

        // 3. Back substitution: Lᵀ x = z
        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut acc = z[i];
            if i + 1 < n {
                acc -= l1[i + 1] * x[i + 1];
            }
            if i + 2 < n {
                acc -= l2[i + 2] * x[i + 2];
            }
            x[i] = acc / l0[i];
        }

        Ok(x)
    }
}
