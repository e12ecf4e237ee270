//! OHLC bar type shared across the pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single OHLC observation for one time interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Interval start timestamp (naive UTC).
    pub timestamp: NaiveDateTime,
    /// Opening price.
    pub open: f64,
    /// Highest price during the interval.
    pub high: f64,
    /// Lowest price during the interval.
    pub low: f64,
    /// Closing price.
    pub close: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: NaiveDateTime, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Round all four prices to `decimals` decimal places.
    ///
    /// Forex quotes are carried at 5 decimals throughout the pipeline.
    pub fn rounded(self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        let round = |v: f64| (v * scale).round() / scale;
        Self {
            timestamp: self.timestamp,
            open: round(self.open),
            high: round(self.high),
            low: round(self.low),
            close: round(self.close),
        }
    }

    /// Check if this is a bullish bar (close > open).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Get the bar range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
