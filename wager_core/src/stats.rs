//! Dispersion and interval statistics over simulated trial outcomes.

/// z-score for a two-sided 95% interval under the normal approximation.
/// Small iteration counts would call for a t-distribution correction; the
/// engine targets trial counts >= 1,000 where the difference is negligible.
const Z_95: f64 = 1.96;

/// Confidence level label attached to intervals, in percent
pub const CONFIDENCE_LEVEL_PCT: f64 = 95.0;

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance: average squared deviation from the mean
pub fn variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Mean over standard deviation; 0 at zero dispersion, by convention
pub fn sharpe_ratio(mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        return 0.0;
    }
    mean / std_dev
}

/// Two-sided 95% interval on the mean: `mean ± 1.96 * sigma / sqrt(n)`
pub fn confidence_half_width(std_dev: f64, n: u64) -> f64 {
    Z_95 * std_dev / (n as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[2.0, 4.0, 6.0]) - 4.0).abs() < 1e-12);
        assert!((mean(&[-1.0, 1.0]) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_variance_constant_series_is_zero() {
        let values = [3.0; 50];
        let m = mean(&values);
        assert_eq!(variance(&values, m), 0.0);
    }

    #[test]
    fn test_variance_known_value() {
        // {1, 2, 3, 4, 5}: mean 3, population variance 2
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let m = mean(&values);
        assert!((variance(&values, m) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sharpe_zero_dispersion_convention() {
        assert_eq!(sharpe_ratio(5.0, 0.0), 0.0);
        assert_eq!(sharpe_ratio(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_sharpe_basic() {
        assert!((sharpe_ratio(2.0, 4.0) - 0.5).abs() < 1e-12);
        assert!((sharpe_ratio(-2.0, 4.0) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_half_width_shrinks_with_n() {
        let at_100 = confidence_half_width(10.0, 100);
        let at_10_000 = confidence_half_width(10.0, 10_000);
        assert!((at_100 - 1.96).abs() < 1e-12);
        // 100x the samples tightens the interval by 10x
        assert!((at_100 / at_10_000 - 10.0).abs() < 1e-9);
    }
}
