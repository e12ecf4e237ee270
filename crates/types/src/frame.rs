//! Timestamp-indexed feature table.
//!
//! [`FeatureFrame`] is the data structure every pipeline stage reads and
//! writes: an ordered timestamp index plus named, nullable `f64` columns.
//! Column append order is part of the output contract (downstream training
//! code addresses columns positionally after export), so the frame preserves
//! insertion order and overwrites in place when a name is reused.
//!
//! The frame does **not** validate index uniqueness or ordering. Callers
//! guarantee a strictly increasing, duplicate-free timestamp index; feeding
//! an unsorted or duplicated index silently produces undefined segment and
//! extremum results downstream.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::bar::Bar;
use crate::error::FrameError;

/// Name of the opening-price column.
pub const OPEN: &str = "open";
/// Name of the high-price column.
pub const HIGH: &str = "high";
/// Name of the low-price column.
pub const LOW: &str = "low";
/// Name of the closing-price column.
pub const CLOSE: &str = "close";

/// The four OHLC columns every input frame carries, in canonical order.
pub const OHLC_COLUMNS: [&str; 4] = [OPEN, HIGH, LOW, CLOSE];

/// A timestamp-indexed table of nullable numeric columns.
#[derive(Debug, Clone, Default)]
pub struct FeatureFrame {
    index: Vec<NaiveDateTime>,
    names: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
    lookup: HashMap<String, usize>,
}

impl FeatureFrame {
    /// Create an empty frame over the given timestamp index.
    pub fn new(index: Vec<NaiveDateTime>) -> Self {
        Self {
            index,
            names: Vec::new(),
            columns: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Build a frame from OHLC bars, populating the four price columns.
    pub fn from_bars(bars: &[Bar]) -> Self {
        let mut frame = Self::new(bars.iter().map(|b| b.timestamp).collect());
        frame.push_column(OPEN, bars.iter().map(|b| Some(b.open)).collect());
        frame.push_column(HIGH, bars.iter().map(|b| Some(b.high)).collect());
        frame.push_column(LOW, bars.iter().map(|b| Some(b.low)).collect());
        frame.push_column(CLOSE, bars.iter().map(|b| Some(b.close)).collect());
        frame
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the frame has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The timestamp index.
    #[inline]
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Column names in append order.
    #[inline]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Check whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.lookup.get(name).map(|&i| self.columns[i].as_slice())
    }

    /// Get a column by name, failing with [`FrameError::MissingColumn`].
    pub fn require(&self, name: &str) -> Result<&[Option<f64>], FrameError> {
        self.column(name)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))
    }

    /// Append a column, or overwrite it in place if the name already exists.
    ///
    /// Overwriting preserves the column's original position, matching the
    /// assignment semantics of a tabular engine.
    ///
    /// # Panics
    /// Panics if `values.len()` differs from the frame's row count.
    pub fn push_column(&mut self, name: &str, values: Vec<Option<f64>>) {
        assert_eq!(
            values.len(),
            self.index.len(),
            "column {} has {} rows, frame has {}",
            name,
            values.len(),
            self.index.len()
        );
        if let Some(&i) = self.lookup.get(name) {
            self.columns[i] = values;
        } else {
            self.lookup.insert(name.to_string(), self.columns.len());
            self.names.push(name.to_string());
            self.columns.push(values);
        }
    }

    /// Keep only the rows where `keep` is true, preserving order.
    ///
    /// Used by the lag collaborator to drop rows left incomplete by
    /// shifting.
    ///
    /// # Panics
    /// Panics if `keep.len()` differs from the frame's row count.
    pub fn filter_rows(&self, keep: &[bool]) -> Self {
        assert_eq!(keep.len(), self.index.len());
        let select = |col: &[Option<f64>]| {
            col.iter()
                .zip(keep)
                .filter(|&(_, &k)| k)
                .map(|(v, _)| *v)
                .collect()
        };
        let mut filtered = Self::new(
            self.index
                .iter()
                .zip(keep)
                .filter(|&(_, &k)| k)
                .map(|(t, _)| *t)
                .collect(),
        );
        for name in &self.names {
            filtered.push_column(name, select(&self.columns[self.lookup[name]]));
        }
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(i: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 3)
            .unwrap()
            .and_hms_opt(0, i * 15, 0)
            .unwrap()
    }

    fn sample_bars() -> Vec<Bar> {
        (0..4)
            .map(|i| {
                let base = 1.1 + i as f64 * 0.01;
                Bar::new(ts(i), base, base + 0.005, base - 0.005, base + 0.002)
            })
            .collect()
    }

    #[test]
    fn test_from_bars_populates_ohlc() {
        let frame = FeatureFrame::from_bars(&sample_bars());
        assert_eq!(frame.len(), 4);
        assert_eq!(frame.column_names(), &OHLC_COLUMNS);
        assert_eq!(frame.column(OPEN).unwrap()[0], Some(1.1));
        assert_eq!(frame.column(CLOSE).unwrap()[3], Some(1.132));
    }

    #[test]
    fn test_require_missing_column() {
        let frame = FeatureFrame::from_bars(&sample_bars());
        let err = frame.require("volume").unwrap_err();
        assert_eq!(err, FrameError::MissingColumn("volume".to_string()));
    }

    #[test]
    fn test_push_column_overwrites_in_place() {
        let mut frame = FeatureFrame::from_bars(&sample_bars());
        frame.push_column("extra", vec![Some(1.0); 4]);
        frame.push_column(OPEN, vec![None; 4]);

        // Overwriting open must not move it to the end.
        assert_eq!(frame.column_names()[0], OPEN);
        assert_eq!(frame.column(OPEN).unwrap()[0], None);
        assert_eq!(frame.column_names().len(), 5);
    }

    #[test]
    fn test_filter_rows() {
        let frame = FeatureFrame::from_bars(&sample_bars());
        let filtered = frame.filter_rows(&[false, true, false, true]);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.index()[0], ts(1));
        assert_eq!(filtered.column(OPEN).unwrap(), &[Some(1.11), Some(1.13)]);
    }
}
