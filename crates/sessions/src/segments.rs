//! Session-run segmentation.
//!
//! A segment is a maximal run of consecutive rows sharing one session label;
//! a new segment starts at row 0 and at every label change. Segments hold
//! plain row indices, detected once per classification pass and then used to
//! drive the fractal write sequence, so downstream code never reselects rows
//! by label.

use types::SessionLabel;

/// One maximal run of rows sharing a session label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Label shared by every row in the run.
    pub label: SessionLabel,
    /// First row index.
    pub first: usize,
    /// Last row index (inclusive).
    pub last: usize,
    /// Row with the maximum high; earliest row on ties.
    pub high_idx: usize,
    /// Row with the minimum low; earliest row on ties.
    pub low_idx: usize,
}

impl Segment {
    /// Number of rows in the run.
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// A segment always spans at least one row.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Partition labeled rows into segments and locate each run's extrema.
///
/// Null high/low cells never win the extremum scan; a run with no populated
/// cells falls back to its first row. Ties resolve to the earliest index.
///
/// # Panics
/// Panics if `high` or `low` disagree with `labels` on length.
pub fn detect(
    labels: &[SessionLabel],
    high: &[Option<f64>],
    low: &[Option<f64>],
) -> Vec<Segment> {
    assert_eq!(labels.len(), high.len());
    assert_eq!(labels.len(), low.len());

    let mut segments = Vec::new();
    if labels.is_empty() {
        return segments;
    }

    let mut first = 0;
    for i in 1..=labels.len() {
        let boundary = i == labels.len() || labels[i] != labels[first];
        if boundary {
            let last = i - 1;
            segments.push(Segment {
                label: labels[first],
                first,
                last,
                high_idx: extremum(high, first, last, |candidate, best| candidate > best),
                low_idx: extremum(low, first, last, |candidate, best| candidate < best),
            });
            first = i;
        }
    }
    segments
}

/// Earliest row in `[first, last]` whose value beats every prior one.
fn extremum(
    values: &[Option<f64>],
    first: usize,
    last: usize,
    beats: impl Fn(f64, f64) -> bool,
) -> usize {
    let mut best_idx = first;
    let mut best: Option<f64> = None;
    for (i, value) in values.iter().enumerate().take(last + 1).skip(first) {
        if let Some(v) = *value
            && best.is_none_or(|b| beats(v, b))
        {
            best = Some(v);
            best_idx = i;
        }
    }
    best_idx
}
