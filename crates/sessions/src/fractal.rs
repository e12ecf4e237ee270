//! Per-segment fractal axis extraction.
//!
//! Each segment contributes up to four structural points: its open and close
//! anchors on the `axis` column and its high/low extrema on the `peaks`
//! column. The writes are planned as an explicit ordered list and applied in
//! that order, so the override rules (close over open on a one-row segment,
//! low over high when the extrema coincide) are first-class behavior rather
//! than an accident of column assignment.

use smallvec::SmallVec;
use types::{CLOSE, FeatureFrame, FrameError, HIGH, LOW, OPEN, SessionLabel};

use crate::segments::{self, Segment};

/// Name of the session open/close anchor column.
pub const AXIS: &str = "axis";
/// Name of the session extremum column.
pub const PEAKS: &str = "peaks";

/// Target column of a planned write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FractalColumn {
    Axis,
    Peaks,
}

/// One planned cell assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CellWrite {
    row: usize,
    column: FractalColumn,
    value: f64,
}

/// Plan a segment's writes in the fixed order: open anchor, close anchor,
/// high peak, low peak. Later entries override earlier ones landing on the
/// same cell. Null source cells contribute no write.
fn plan(
    segment: &Segment,
    open: &[Option<f64>],
    high: &[Option<f64>],
    low: &[Option<f64>],
    close: &[Option<f64>],
) -> SmallVec<[CellWrite; 4]> {
    let mut writes = SmallVec::new();
    let mut push = |row: usize, column: FractalColumn, value: Option<f64>| {
        if let Some(value) = value {
            writes.push(CellWrite { row, column, value });
        }
    };

    push(segment.first, FractalColumn::Axis, open[segment.first]);
    push(segment.last, FractalColumn::Axis, close[segment.last]);
    push(segment.high_idx, FractalColumn::Peaks, high[segment.high_idx]);
    push(segment.low_idx, FractalColumn::Peaks, low[segment.low_idx]);
    writes
}

/// Append `axis` and `peaks` columns holding each segment's structural
/// points; every row not selected by a write stays null.
///
/// Requires the four OHLC columns and a label per row. `labels` must come
/// from the classification pass over this same frame.
///
/// # Panics
/// Panics if `labels` and the frame disagree on row count.
pub fn extract(frame: &mut FeatureFrame, labels: &[SessionLabel]) -> Result<(), FrameError> {
    assert_eq!(labels.len(), frame.len(), "label count must match frame rows");

    let open = frame.require(OPEN)?.to_vec();
    let high = frame.require(HIGH)?.to_vec();
    let low = frame.require(LOW)?.to_vec();
    let close = frame.require(CLOSE)?.to_vec();

    let mut axis = vec![None; frame.len()];
    let mut peaks = vec![None; frame.len()];

    for segment in segments::detect(labels, &high, &low) {
        for write in plan(&segment, &open, &high, &low, &close) {
            match write.column {
                FractalColumn::Axis => axis[write.row] = Some(write.value),
                FractalColumn::Peaks => peaks[write.row] = Some(write.value),
            }
        }
    }

    frame.push_column(AXIS, axis);
    frame.push_column(PEAKS, peaks);
    Ok(())
}
