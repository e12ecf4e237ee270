//! Combinatorial windowed-aggregate generator.
//!
//! For every enabled combination of (window, source feature, function) this
//! module appends one derived column to the frame, named
//! `{feature}_{function}_{window}`. The enumeration nests window outermost
//! and function innermost, and functions always iterate in the declared
//! registry order, so the appended column order is deterministic for a given
//! configuration.
//!
//! Combinations are independent of each other (each reads only its source
//! column and writes its own output), so they are computed in parallel and
//! appended in enumeration order afterwards.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use types::{FeatureFrame, FrameError};

use crate::stats;

// =============================================================================
// Function Registry
// =============================================================================

/// The closed vocabulary of windowed aggregate functions.
///
/// `ALL` fixes the iteration order; configuration maps are resolved against
/// it so that enabling functions in any order yields the same column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggFn {
    Mean,
    Std,
    Sum,
    Max,
    Min,
    Median,
    Skew,
    Diff,
    PctChange,
}

impl AggFn {
    /// Every function, in declared iteration order.
    pub const ALL: [AggFn; 9] = [
        AggFn::Mean,
        AggFn::Std,
        AggFn::Sum,
        AggFn::Max,
        AggFn::Min,
        AggFn::Median,
        AggFn::Skew,
        AggFn::Diff,
        AggFn::PctChange,
    ];

    /// Canonical name, used in configuration maps and column names.
    pub fn name(self) -> &'static str {
        match self {
            AggFn::Mean => "mean",
            AggFn::Std => "std",
            AggFn::Sum => "sum",
            AggFn::Max => "max",
            AggFn::Min => "min",
            AggFn::Median => "median",
            AggFn::Skew => "skew",
            AggFn::Diff => "diff",
            AggFn::PctChange => "pct_change",
        }
    }

    /// Look up a function by name. Unknown names resolve to `None` and are
    /// silently skipped by the generator.
    pub fn from_name(name: &str) -> Option<AggFn> {
        AggFn::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Differencing functions are exempted for pass-through features and
    /// gain `_class` companions when class emission is on.
    pub fn is_differencing(self) -> bool {
        matches!(self, AggFn::Diff | AggFn::PctChange)
    }

    /// Evaluate a trailing statistic over one full window of observations.
    ///
    /// Differencing functions are not trailing statistics and always return
    /// `None` here; [`compute`] routes them through their span-based paths.
    fn evaluate(self, window: &[f64]) -> Option<f64> {
        match self {
            AggFn::Mean => stats::mean(window),
            AggFn::Std => stats::sample_std_dev(window),
            AggFn::Sum => Some(window.iter().sum()),
            AggFn::Max => stats::max(window),
            AggFn::Min => stats::min(window),
            AggFn::Median => stats::median(window),
            AggFn::Skew => stats::skewness(window),
            AggFn::Diff | AggFn::PctChange => None,
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for one windowed-feature generation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Function toggles by name. Unknown names are ignored; missing names
    /// count as disabled.
    pub functions: HashMap<String, bool>,
    /// Window sizes (positive), outermost enumeration axis.
    pub windows: Vec<usize>,
    /// Source column names, middle enumeration axis.
    pub features: Vec<String>,
    /// Emit `{column}_class` sign columns for differencing functions.
    pub emit_class: bool,
    /// Features exempt from `diff`/`pct_change` (non-numeric pass-through
    /// columns carried along for the model).
    #[serde(default = "default_passthrough")]
    pub passthrough: HashSet<String>,
}

fn default_passthrough() -> HashSet<String> {
    HashSet::from(["type".to_string()])
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            functions: HashMap::new(),
            windows: Vec::new(),
            features: Vec::new(),
            emit_class: false,
            passthrough: default_passthrough(),
        }
    }
}

impl WindowConfig {
    /// Create a config over the given windows and source features, with no
    /// functions enabled yet.
    pub fn new(windows: Vec<usize>, features: Vec<impl Into<String>>) -> Self {
        Self {
            windows,
            features: features.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Enable a function by name.
    pub fn enable(mut self, function: &str) -> Self {
        self.functions.insert(function.to_string(), true);
        self
    }

    /// Enable class-column emission for differencing functions.
    pub fn with_class(mut self) -> Self {
        self.emit_class = true;
        self
    }

    /// Resolve the enabled functions against the registry, in declared
    /// order. Unknown names in the map never match and drop out here.
    fn active_functions(&self) -> Vec<AggFn> {
        AggFn::ALL
            .into_iter()
            .filter(|f| self.functions.get(f.name()).copied().unwrap_or(false))
            .collect()
    }
}

// =============================================================================
// Generator
// =============================================================================

/// One (window, feature, function) combination scheduled for computation.
struct Combination {
    window: usize,
    feature: String,
    source: usize,
    function: AggFn,
}

/// Append every enabled windowed-aggregate column to the frame.
///
/// Fails with [`FrameError::MissingColumn`] if a requested source feature is
/// absent. Empty windows/features or an all-disabled function map is a
/// no-op, not an error.
pub fn compute(frame: &mut FeatureFrame, config: &WindowConfig) -> Result<(), FrameError> {
    let active = config.active_functions();
    if active.is_empty() || config.windows.is_empty() || config.features.is_empty() {
        return Ok(());
    }

    // Source columns are snapshotted up front so generated columns never
    // feed back into the same pass.
    let mut sources: Vec<Vec<Option<f64>>> = Vec::with_capacity(config.features.len());
    for feature in &config.features {
        sources.push(frame.require(feature)?.to_vec());
    }

    // Window outermost, feature, then function innermost.
    let mut combinations = Vec::new();
    for &window in &config.windows {
        for (source, feature) in config.features.iter().enumerate() {
            for &function in &active {
                if config.passthrough.contains(feature) && function.is_differencing() {
                    continue;
                }
                combinations.push(Combination {
                    window,
                    feature: feature.clone(),
                    source,
                    function,
                });
            }
        }
    }

    let columns: Vec<(String, Vec<Option<f64>>)> = combinations
        .par_iter()
        .flat_map(|combo| {
            let name = format!("{}_{}_{}", combo.feature, combo.function.name(), combo.window);
            let values = apply(combo.function, &sources[combo.source], combo.window);

            let mut out = Vec::with_capacity(2);
            if config.emit_class && combo.function.is_differencing() {
                let class = class_column(&values);
                out.push((name.clone(), values));
                out.push((format!("{name}_class"), class));
            } else {
                out.push((name, values));
            }
            out
        })
        .collect();

    for (name, values) in columns {
        frame.push_column(&name, values);
    }
    Ok(())
}

/// Apply one function over a source column.
fn apply(function: AggFn, values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    match function {
        AggFn::Diff => difference(values, window.saturating_sub(1)),
        AggFn::PctChange => pct_change(values, window),
        _ => rolling(function, values, window),
    }
}

/// Trailing statistic over the most recent `window` observations. Null until
/// the window is full; a null inside the window poisons the statistic.
fn rolling(function: AggFn, values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    let mut buf = Vec::with_capacity(window);
    for (i, cell) in out.iter_mut().enumerate().skip(window - 1) {
        buf.clear();
        let trailing = &values[i + 1 - window..=i];
        if trailing.iter().all(|v| v.is_some()) {
            buf.extend(trailing.iter().flatten());
            *cell = function.evaluate(&buf);
        }
    }
    out
}

/// Current value minus the value `span` rows earlier.
fn difference(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for (i, cell) in out.iter_mut().enumerate().skip(span) {
        *cell = match (values[i], values[i - span]) {
            (Some(cur), Some(prev)) => Some(cur - prev),
            _ => None,
        };
    }
    out
}

/// Fractional change against the value `span` rows earlier. Null on a zero
/// denominator.
fn pct_change(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for (i, cell) in out.iter_mut().enumerate().skip(span) {
        *cell = match (values[i], values[i - span]) {
            (Some(cur), Some(prev)) if prev != 0.0 => Some((cur - prev) / prev),
            _ => None,
        };
    }
    out
}

/// Two-way sign class: 1 for strictly positive, -1 otherwise. Nulls
/// propagate so rows without a defined change carry no class either.
fn class_column(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| v.map(|x| if x > 0.0 { 1.0 } else { -1.0 }))
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use types::{Bar, HIGH};

    fn ts(i: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 3)
            .unwrap()
            .and_hms_opt(i / 4, (i % 4) * 15, 0)
            .unwrap()
    }

    /// Frame whose high column carries the given values.
    fn frame_with_highs(highs: &[f64]) -> FeatureFrame {
        let bars: Vec<Bar> = highs
            .iter()
            .enumerate()
            .map(|(i, &h)| Bar::new(ts(i as u32), h - 0.5, h, h - 1.0, h - 0.2))
            .collect();
        FeatureFrame::from_bars(&bars)
    }

    fn unwrap_col(frame: &FeatureFrame, name: &str) -> Vec<Option<f64>> {
        frame.column(name).unwrap_or_else(|| panic!("no {name}")).to_vec()
    }

    #[test]
    fn test_rolling_mean_reference_series() {
        let mut frame = frame_with_highs(&[10.0, 12.0, 11.0, 13.0, 9.0]);
        let config = WindowConfig::new(vec![3], vec![HIGH]).enable("mean");
        compute(&mut frame, &config).unwrap();

        assert_eq!(
            unwrap_col(&frame, "high_mean_3"),
            vec![None, None, Some(11.0), Some(12.0), Some(11.0)]
        );
    }

    #[test]
    fn test_diff_and_class_reference_series() {
        let mut frame = frame_with_highs(&[10.0, 12.0, 11.0, 13.0, 9.0]);
        let config = WindowConfig::new(vec![3], vec![HIGH])
            .enable("diff")
            .with_class();
        compute(&mut frame, &config).unwrap();

        // Window 3 diffs over a span of 2 rows.
        assert_eq!(
            unwrap_col(&frame, "high_diff_3"),
            vec![None, None, Some(1.0), Some(1.0), Some(-2.0)]
        );
        assert_eq!(
            unwrap_col(&frame, "high_diff_3_class"),
            vec![None, None, Some(1.0), Some(1.0), Some(-1.0)]
        );
    }

    #[test]
    fn test_class_maps_zero_to_down() {
        let values = vec![None, Some(0.0), Some(2.0), Some(-1.0)];
        assert_eq!(
            class_column(&values),
            vec![None, Some(-1.0), Some(1.0), Some(-1.0)]
        );
    }

    #[test]
    fn test_pct_change_spans_window_and_skips_zero_denominator() {
        let values = vec![Some(0.0), Some(2.0), Some(3.0)];
        assert_eq!(pct_change(&values, 1), vec![None, None, Some(0.5)]);
    }

    #[test]
    fn test_column_order_is_window_feature_function() {
        let mut frame = frame_with_highs(&[10.0, 12.0, 11.0, 13.0, 9.0]);
        let config = WindowConfig::new(vec![3, 5], vec!["high", "low"])
            .enable("pct_change")
            .enable("mean");
        compute(&mut frame, &config).unwrap();

        // mean precedes pct_change regardless of enable order.
        let expected = [
            "high_mean_3",
            "high_pct_change_3",
            "low_mean_3",
            "low_pct_change_3",
            "high_mean_5",
            "high_pct_change_5",
            "low_mean_5",
            "low_pct_change_5",
        ];
        assert_eq!(&frame.column_names()[4..], &expected);
    }

    #[test]
    fn test_generated_column_count() {
        let mut frame = frame_with_highs(&[10.0, 12.0, 11.0, 13.0, 9.0]);
        frame.push_column("type", vec![Some(1.0); 5]);

        let config = WindowConfig::new(vec![2, 3], vec!["high", "low", "type"])
            .enable("mean")
            .enable("sum")
            .enable("diff");
        let before = frame.column_names().len();
        compute(&mut frame, &config).unwrap();

        // 2 windows x 3 features x 3 functions = 18, minus 2 diff exemptions
        // for the pass-through feature.
        assert_eq!(frame.column_names().len() - before, 16);
    }

    #[test]
    fn test_disabled_and_unknown_functions_are_no_ops() {
        let mut frame = frame_with_highs(&[10.0, 12.0, 11.0]);
        let before = frame.column_names().len();

        let mut config = WindowConfig::new(vec![2], vec![HIGH]);
        config.functions.insert("mean".to_string(), false);
        config.functions.insert("variance".to_string(), true);
        compute(&mut frame, &config).unwrap();

        assert_eq!(frame.column_names().len(), before);
    }

    #[test]
    fn test_missing_feature_is_fatal() {
        let mut frame = frame_with_highs(&[10.0, 12.0]);
        let config = WindowConfig::new(vec![2], vec!["volume"]).enable("mean");
        let err = compute(&mut frame, &config).unwrap_err();
        assert_eq!(err, FrameError::MissingColumn("volume".to_string()));
    }

    #[test]
    fn test_short_history_yields_nulls_not_errors() {
        let mut frame = frame_with_highs(&[10.0, 12.0]);
        let config = WindowConfig::new(vec![5], vec![HIGH]).enable("mean");
        compute(&mut frame, &config).unwrap();
        assert_eq!(unwrap_col(&frame, "high_mean_5"), vec![None, None]);
    }

    #[test]
    fn test_null_poisons_trailing_window() {
        let mut frame = frame_with_highs(&[10.0, 12.0, 11.0, 13.0]);
        frame.push_column("gappy", vec![Some(1.0), None, Some(3.0), Some(4.0)]);

        let config = WindowConfig::new(vec![2], vec!["gappy"]).enable("sum");
        compute(&mut frame, &config).unwrap();
        assert_eq!(
            unwrap_col(&frame, "gappy_sum_2"),
            vec![None, None, None, Some(7.0)]
        );
    }

    #[test]
    fn test_std_window_one_is_null() {
        let mut frame = frame_with_highs(&[10.0, 12.0, 11.0]);
        let config = WindowConfig::new(vec![1], vec![HIGH]).enable("std");
        compute(&mut frame, &config).unwrap();
        assert_eq!(unwrap_col(&frame, "high_std_1"), vec![None, None, None]);
    }

    #[test]
    fn test_row_count_and_order_preserved() {
        let mut frame = frame_with_highs(&[10.0, 12.0, 11.0, 13.0, 9.0]);
        let index_before = frame.index().to_vec();
        let config = WindowConfig::new(vec![3], vec![HIGH])
            .enable("mean")
            .enable("skew")
            .enable("pct_change")
            .with_class();
        compute(&mut frame, &config).unwrap();

        assert_eq!(frame.len(), 5);
        assert_eq!(frame.index(), index_before.as_slice());
    }
}
