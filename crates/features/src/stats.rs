//! Statistical utilities for windowed feature generation.
//!
//! This module provides the slice statistics the rolling-window generator
//! dispatches to. All functions are pure and return `None` when the input
//! cannot support the statistic (empty slice, too few observations, zero
//! spread for skewness).

/// Calculate the mean of a slice of values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculate the sample variance (n-1 denominator).
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean_val = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean_val).powi(2)).sum();
    Some(sum_sq / (n - 1) as f64)
}

/// Calculate the sample standard deviation (n-1 denominator).
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(|v| v.sqrt())
}

/// Calculate the median of a slice of values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Calculate the adjusted Fisher-Pearson sample skewness.
///
/// `G1 = g1 * sqrt(n(n-1)) / (n-2)` where `g1 = m3 / m2^(3/2)` over the
/// population moments. Requires at least 3 observations and nonzero spread.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }

    let mean_val = mean(values)?;
    let nf = n as f64;
    let m2: f64 = values.iter().map(|v| (v - mean_val).powi(2)).sum::<f64>() / nf;
    let m3: f64 = values.iter().map(|v| (v - mean_val).powi(3)).sum::<f64>() / nf;

    if m2 == 0.0 {
        return None;
    }

    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

/// Get the maximum value of a slice.
pub fn max(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
}

/// Get the minimum value of a slice.
pub fn min(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.min(v))))
}
