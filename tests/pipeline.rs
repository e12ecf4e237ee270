//! Integration tests for the full feature pipeline.
//!
//! Drives the real stage sequence (bars, windowed aggregates, calendar
//! attributes, session classification, fractal extraction, export) over a
//! deterministic synthetic series and over hand-built frames.

use std::sync::Arc;

use acquire::{FetchRequest, SyntheticBars};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use features::window::WindowConfig;
use sessions::{AXIS, PEAKS};
use types::{Bar, FeatureFrame, SessionLabel};

fn m15_series(bars: usize) -> Vec<Bar> {
    let provider = SyntheticBars {
        bars,
        ..Default::default()
    };
    let handle = acquire::spawn(Arc::new(provider), vec![FetchRequest::new("EURUSD", "m15")]);
    let mut frames = handle.collect().expect("synthetic fetch");
    frames.remove("eurusd_m15").expect("requested key present")
}

#[test]
fn test_full_pipeline_column_contract() {
    let bars = m15_series(200);
    let mut frame = FeatureFrame::from_bars(&bars);

    let window = WindowConfig::new(vec![3, 5], vec!["high", "low", "close"])
        .enable("mean")
        .enable("std")
        .enable("diff")
        .enable("pct_change")
        .with_class();
    features::window::compute(&mut frame, &window).expect("window pass");

    // 2 windows x 3 features x 4 functions, plus one class column per
    // differencing column: 24 + 12.
    let generated = frame.column_names().len() - 4;
    assert_eq!(generated, 36);

    features::calendar::compute(
        &mut frame,
        &["hour".to_string(), "dayofweek".to_string(), "week".to_string()],
    );
    let labels = sessions::classify(&frame);
    sessions::one_hot(&mut frame, &labels);
    sessions::extract_fractals(&mut frame, &labels).expect("fractal pass");

    // Same rows in, same rows out; every contract column present.
    assert_eq!(frame.len(), 200);
    for name in ["high_mean_3", "close_pct_change_5_class", "hour", "week"] {
        assert!(frame.has_column(name), "missing {name}");
    }
    for label in SessionLabel::ALL {
        assert!(frame.has_column(label.as_str()));
    }
    assert!(frame.has_column(AXIS) && frame.has_column(PEAKS));
}

#[test]
fn test_every_row_gets_exactly_one_session() {
    let bars = m15_series(24 * 4); // one full day at 15-minute steps
    let frame = FeatureFrame::from_bars(&bars);
    let labels = sessions::classify(&frame);

    assert!(labels.iter().all(|&l| l != SessionLabel::None));

    let mut one_hot_frame = frame.clone();
    sessions::one_hot(&mut one_hot_frame, &labels);
    for row in 0..one_hot_frame.len() {
        let marked: f64 = SessionLabel::ALL
            .iter()
            .filter_map(|l| one_hot_frame.column(l.as_str()).and_then(|c| c[row]))
            .sum();
        assert_eq!(marked, 1.0, "row {row} marked {marked} sessions");
    }
}

#[test]
fn test_uniform_label_series_yields_one_segment() {
    // 10:00-12:45 sits inside the London / New York overlap throughout.
    let start: NaiveDateTime = NaiveDate::from_ymd_opt(2025, 2, 3)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let bars: Vec<Bar> = (0..12)
        .map(|i| {
            let ts = start + Duration::minutes(15 * i);
            let v = 1.1 + i as f64 * 0.001;
            Bar::new(ts, v, v + 0.002, v - 0.002, v + 0.001)
        })
        .collect();

    let mut frame = FeatureFrame::from_bars(&bars);
    let labels = sessions::classify(&frame);
    assert!(
        labels
            .iter()
            .all(|&l| l == SessionLabel::OverlapLondonNewYork)
    );

    sessions::extract_fractals(&mut frame, &labels).unwrap();

    let axis = frame.column(AXIS).unwrap();
    let peaks = frame.column(PEAKS).unwrap();

    // One segment spanning the whole series: anchors at the ends only.
    assert_eq!(axis[0], Some(bars[0].open));
    assert_eq!(axis[11], Some(bars[11].close));
    assert_eq!(axis.iter().flatten().count(), 2);

    // Monotonic series: high at the last row, low at the first.
    assert_eq!(peaks[11], Some(bars[11].high));
    assert_eq!(peaks[0], Some(bars[0].low));
    assert_eq!(peaks.iter().flatten().count(), 2);
}

#[test]
fn test_marked_cells_only_on_designated_rows() {
    let bars = m15_series(300);
    let mut frame = FeatureFrame::from_bars(&bars);
    let labels = sessions::classify(&frame);
    sessions::extract_fractals(&mut frame, &labels).unwrap();

    let high = frame.column("high").unwrap().to_vec();
    let low = frame.column("low").unwrap().to_vec();
    let segments = sessions::segments::detect(&labels, &high, &low);

    let mut designated = vec![false; frame.len()];
    for seg in &segments {
        designated[seg.first] = true;
        designated[seg.last] = true;
        designated[seg.high_idx] = true;
        designated[seg.low_idx] = true;
    }

    let axis = frame.column(AXIS).unwrap();
    let peaks = frame.column(PEAKS).unwrap();
    for row in 0..frame.len() {
        if axis[row].is_some() || peaks[row].is_some() {
            assert!(designated[row], "row {row} marked outside any segment");
        }
    }

    // Segments partition the series exhaustively and disjointly.
    assert_eq!(segments[0].first, 0);
    assert_eq!(segments.last().unwrap().last, frame.len() - 1);
    for pair in segments.windows(2) {
        assert_eq!(pair[1].first, pair[0].last + 1);
    }
}

#[test]
fn test_disabled_everything_is_identity() {
    let bars = m15_series(50);
    let mut frame = FeatureFrame::from_bars(&bars);
    let names_before = frame.column_names().to_vec();

    let window = WindowConfig::new(Vec::<usize>::new(), Vec::<String>::new());
    features::window::compute(&mut frame, &window).unwrap();
    features::calendar::compute(&mut frame, &[]);

    assert_eq!(frame.column_names(), names_before.as_slice());
    assert_eq!(frame.len(), 50);
}

#[test]
fn test_lagged_export_round_trip() {
    let bars = m15_series(100);
    let mut frame = FeatureFrame::from_bars(&bars);

    let window = WindowConfig::new(vec![3], vec!["close"]).enable("mean");
    features::window::compute(&mut frame, &window).unwrap();

    let lagged = storage::lags(&frame, "close", 2, false);
    // Warmup nulls from the rolling mean (2) plus lag depth (2) drop 4 rows.
    assert_eq!(lagged.len(), 96);
    assert!(lagged.has_column("close_mean_3_1"));

    let path = std::env::temp_dir().join(format!(
        "fx-featurelab-pipeline-{}.parquet",
        std::process::id()
    ));
    storage::write_frame(&lagged, &path).expect("parquet export");
    assert!(std::fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_classification_matches_clock_time() {
    let bars = m15_series(100);
    let frame = FeatureFrame::from_bars(&bars);
    let labels = sessions::classify(&frame);

    for (ts, label) in frame.index().iter().zip(&labels) {
        let t = ts.hour() as f64 + ts.minute() as f64 / 60.0;
        assert_eq!(sessions::classify::classify_time(t), *label);
    }
}
