//! UTC trading-session classification.
//!
//! Session windows are data: fixed `(label, start, end)` tables in UTC
//! fractional hours, half-open `[start, end)`, wrapping past midnight when
//! `start >= end`. Overlap windows are tested before plain sessions and the
//! first match wins, so every row gets exactly one label.

use types::{FeatureFrame, SessionLabel};

/// Overlap windows, in precedence order.
const OVERLAPS: [(SessionLabel, f64, f64); 3] = [
    (SessionLabel::OverlapSydneyTokyo, 20.0, 2.0),
    (SessionLabel::OverlapTokyoLondon, 4.0, 5.0),
    (SessionLabel::OverlapLondonNewYork, 8.0, 13.0),
];

/// Plain session windows, tested after the overlaps, in precedence order.
const SESSIONS: [(SessionLabel, f64, f64); 4] = [
    (SessionLabel::Sydney, 17.0, 2.0),
    (SessionLabel::Tokyo, 20.0, 5.0),
    (SessionLabel::London, 4.0, 13.0),
    (SessionLabel::NewYork, 8.0, 17.0),
];

/// Half-open interval membership with midnight wraparound.
///
/// For `start < end` this is ordinary containment; otherwise the interval
/// crosses midnight and membership is `t >= start || t < end`.
pub fn in_range(t: f64, start: f64, end: f64) -> bool {
    if start < end {
        t >= start && t < end
    } else {
        t >= start || t < end
    }
}

/// Classify one fractional hour in `[0, 24)`.
pub fn classify_time(t: f64) -> SessionLabel {
    OVERLAPS
        .iter()
        .chain(SESSIONS.iter())
        .find(|&&(_, start, end)| in_range(t, start, end))
        .map(|&(label, _, _)| label)
        .unwrap_or(SessionLabel::None)
}

/// Label every row of the frame by its timestamp's time of day.
pub fn classify(frame: &FeatureFrame) -> Vec<SessionLabel> {
    use chrono::Timelike;

    frame
        .index()
        .iter()
        .map(|ts| classify_time(ts.hour() as f64 + ts.minute() as f64 / 60.0))
        .collect()
}

/// Append one indicator column per label in the fixed vocabulary.
///
/// Columns are named by the label and zero-filled for categories absent from
/// `labels`; no separate label column is stored.
///
/// # Panics
/// Panics if `labels` and the frame disagree on row count.
pub fn one_hot(frame: &mut FeatureFrame, labels: &[SessionLabel]) {
    assert_eq!(labels.len(), frame.len(), "label count must match frame rows");

    for target in SessionLabel::ALL {
        let indicator = labels
            .iter()
            .map(|&l| Some(if l == target { 1.0 } else { 0.0 }))
            .collect();
        frame.push_column(target.as_str(), indicator);
    }
}
