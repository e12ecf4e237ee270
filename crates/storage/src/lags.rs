//! Lag-feature shifting for model training.
//!
//! Runs downstream of the feature engine: every selected column gains
//! `{col}_{i}` companions holding the value `i` rows earlier, then rows left
//! incomplete by the shifting (or already incomplete in the source) are
//! dropped so the training table has no nulls.

use types::{FeatureFrame, FrameError};

/// Append `window_size` lags for every column except the target (which is
/// lagged too when `target_lag` is set), then drop incomplete rows.
pub fn lags(
    frame: &FeatureFrame,
    target: &str,
    window_size: usize,
    target_lag: bool,
) -> FeatureFrame {
    let selected: Vec<String> = frame
        .column_names()
        .iter()
        .filter(|name| target_lag || name.as_str() != target)
        .cloned()
        .collect();
    let config: Vec<(Vec<String>, usize)> = vec![(selected, window_size)];

    // Columns come from the frame itself, so the lookup cannot fail.
    lags_custom(frame, &config).unwrap_or_else(|_| frame.clone())
}

/// Append per-group lag columns, then drop incomplete rows.
///
/// Each `(columns, depth)` entry lags every named column 1..=depth rows.
/// Fails with [`FrameError::MissingColumn`] when a named column is absent.
pub fn lags_custom(
    frame: &FeatureFrame,
    config: &[(Vec<String>, usize)],
) -> Result<FeatureFrame, FrameError> {
    let mut out = frame.clone();

    for (columns, depth) in config {
        for name in columns {
            let source = frame.require(name)?.to_vec();
            for shift in 1..=*depth {
                out.push_column(&format!("{name}_{shift}"), lag_column(&source, shift));
            }
        }
    }

    // dropna: keep only rows where every column holds a value.
    let keep: Vec<bool> = (0..out.len())
        .map(|row| {
            out.column_names()
                .iter()
                .all(|name| out.column(name).is_some_and(|col| col[row].is_some()))
        })
        .collect();
    Ok(out.filter_rows(&keep))
}

/// Shift a column down by `shift` rows, nulling the head.
fn lag_column(values: &[Option<f64>], shift: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for i in shift..values.len() {
        out[i] = values[i - shift];
    }
    out
}
