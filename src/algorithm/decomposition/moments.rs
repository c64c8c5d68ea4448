//! Weighted moment utilities
//!
//! Population (not sample) moments over a value vector and a weight vector
//! aligned by row. Weights need not sum to one; every function divides by the
//! weight total. Degenerate inputs (zero weight mass, zero variance) follow
//! IEEE semantics and yield `NaN` or infinities rather than errors.

/// Scale weights so they sum to one
#[must_use]
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    weights.iter().map(|w| w / total).collect()
}

/// Weighted mean `sum(w * x) / sum(w)`
#[must_use]
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    debug_assert_eq!(values.len(), weights.len());
    let (weighted_sum, weight_total) = values
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(sum, total), (x, w)| (w.mul_add(*x, sum), total + w));
    weighted_sum / weight_total
}

/// Weighted population variance around the weighted mean
#[must_use]
pub fn weighted_variance(values: &[f64], weights: &[f64]) -> f64 {
    let mean = weighted_mean(values, weights);
    weighted_variance_about(values, weights, mean)
}

/// Weighted population variance around a precomputed mean
#[must_use]
pub fn weighted_variance_about(values: &[f64], weights: &[f64], mean: f64) -> f64 {
    debug_assert_eq!(values.len(), weights.len());
    let (squared_sum, weight_total) = values
        .iter()
        .zip(weights)
        .fold((0.0, 0.0), |(sum, total), (x, w)| {
            let deviation = x - mean;
            (w * deviation * deviation + sum, total + w)
        });
    squared_sum / weight_total
}

/// Weighted Pearson correlation of two series under one weight vector
#[must_use]
pub fn weighted_correlation(x: &[f64], y: &[f64], weights: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    let mean_x = weighted_mean(x, weights);
    let mean_y = weighted_mean(y, weights);

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut weight_total = 0.0;
    for ((a, b), w) in x.iter().zip(y).zip(weights) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += w * dx * dy;
        var_x += w * dx * dx;
        var_y += w * dy * dy;
        weight_total += w;
    }

    (covariance / weight_total) / ((var_x / weight_total) * (var_y / weight_total)).sqrt()
}

/// Half the squared coefficient of variation, `variance / (2 * mean^2)`
#[must_use]
pub fn scv(mean: f64, variance: f64) -> f64 {
    variance / (2.0 * mean * mean)
}
