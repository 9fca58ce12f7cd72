//! Shared statistical primitives.

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected sample variance (ddof = 1)
///
/// Undefined for fewer than two observations; reported as 0.0 there so
/// downstream ratios fall into their documented degenerate branches.
pub fn sample_variance(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_squared_diff: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    sum_squared_diff / (n - 1) as f64
}

/// Pearson product-moment correlation between two equal-length series
///
/// Returns 0.0 on length mismatch, fewer than two pairs, or zero variance
/// in either series.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return 0.0;
    }
    let mx = mean(xs);
    let my = mean(ys);

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return 0.0;
    }
    covariance / (var_x * var_y).sqrt()
}

/// Standard logistic function, numerically stable at extreme arguments
///
/// The branch on sign keeps the exponential argument non-positive, so the
/// result saturates to 0.0 or 1.0 instead of overflowing.
#[inline]
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let exp_x = x.exp();
        exp_x / (1.0 + exp_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_sample_variance_bessel_corrected() {
        assert_eq!(sample_variance(&[]), 0.0);
        assert_eq!(sample_variance(&[3.0]), 0.0);
        // 0/1 column with two of each: sum of squared deviations 1.0, n-1 = 3
        assert!((sample_variance(&[1.0, 1.0, 0.0, 0.0]) - 1.0 / 3.0).abs() < 1e-12);
        assert!((sample_variance(&[2.0, 4.0, 6.0]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson_correlation(&xs, &ys) - 1.0).abs() < 1e-12);

        let inverted = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson_correlation(&xs, &inverted) + 1.0).abs() < 1e-12);

        // Zero variance in one series
        assert_eq!(pearson_correlation(&xs, &[5.0, 5.0, 5.0, 5.0]), 0.0);
        // Mismatched lengths
        assert_eq!(pearson_correlation(&xs, &ys[..3]), 0.0);
    }

    #[test]
    fn test_logistic_midpoint_and_symmetry() {
        assert!((logistic(0.0) - 0.5).abs() < 1e-12);
        assert!((logistic(2.0) + logistic(-2.0) - 1.0).abs() < 1e-12);
        assert!(logistic(1.0) > 0.7 && logistic(1.0) < 0.75);
    }

    #[test]
    fn test_logistic_saturates_without_overflow() {
        assert_eq!(logistic(800.0), 1.0);
        assert_eq!(logistic(-800.0), 0.0);
        assert!(logistic(f64::MAX).is_finite());
        assert!(logistic(f64::MIN).is_finite());
    }
}
