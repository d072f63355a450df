use crate::error::{AnalysisError, AnalysisResult};

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> AnalysisResult<f64> {
    if values.is_empty() {
        return Err(AnalysisError::InsufficientData { required: 1, actual: 0 });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(values: &[f64]) -> AnalysisResult<f64> {
    if values.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            actual: values.len(),
        });
    }

    let mean = mean(values)?;
    let variance: f64 = values
        .iter()
        .map(|value| {
            let diff = mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;

    Ok(variance.sqrt())
}

/// Pearson correlation coefficient between two equally long series.
///
/// A side with zero variance yields 0.0.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> AnalysisResult<f64> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }

    let n = x.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData { required: 2, actual: n });
    }

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let mut numer = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;

    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;

        numer += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    if denom_x == 0.0 || denom_y == 0.0 {
        return Ok(0.0);
    }

    let correlation = numer / (denom_x.sqrt() * denom_y.sqrt());

    // Clamp to [-1.0, 1.0] against rounding
    Ok(correlation.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_correlation() {
        // Perfect positive correlation
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![2.0, 4.0, 6.0];
        let corr = pearson_correlation(&a, &b).unwrap();
        assert!((corr - 1.0).abs() < 1e-9);

        // Perfect negative correlation
        let c = vec![3.0, 2.0, 1.0];
        let corr_neg = pearson_correlation(&a, &c).unwrap();
        assert!((corr_neg - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_length_mismatch() {
        assert_eq!(
            pearson_correlation(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(AnalysisError::LengthMismatch { left: 3, right: 2 })
        );
    }

    #[test]
    fn test_pearson_flat_series() {
        let corr = pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(corr, 0.0);
    }

    #[test]
    fn test_std_dev_is_sample() {
        // Mean = 20, squared deviations sum to 200, n - 1 = 2
        let sd = std_dev(&[10.0, 20.0, 30.0]).unwrap();
        assert!((sd - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_needs_two_values() {
        assert_eq!(
            std_dev(&[1.0]),
            Err(AnalysisError::InsufficientData { required: 2, actual: 1 })
        );
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0]).unwrap(), 3.0);
        assert!(mean(&[]).is_err());
    }
}
