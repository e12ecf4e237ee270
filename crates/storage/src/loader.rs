//! CSV OHLC loading and month-range slicing.
//!
//! Input files carry a `date,open,high,low,close` header (extra columns are
//! ignored), timestamps formatted `%Y-%m-%d %H:%M:%S`, rows already in
//! ascending order. Prices are rounded to 5 decimals on ingest so every
//! stage downstream works at pip precision.

use std::path::Path;

use chrono::{Datelike, NaiveDateTime};
use serde::Deserialize;
use tracing::info;
use types::Bar;

use crate::error::StorageError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PRICE_DECIMALS: u32 = 5;

/// Raw CSV row; unknown columns are skipped by serde.
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

/// Load an OHLC CSV file into bars, rounding prices to pip precision.
pub fn load_ohlc<P: AsRef<Path>>(path: P) -> Result<Vec<Bar>, StorageError> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut bars = Vec::new();

    for (row, record) in reader.deserialize::<CsvRow>().enumerate() {
        let record = record?;
        let timestamp = NaiveDateTime::parse_from_str(&record.date, TIMESTAMP_FORMAT)
            .map_err(|_| StorageError::BadTimestamp {
                row,
                value: record.date.clone(),
            })?;
        bars.push(
            Bar::new(timestamp, record.open, record.high, record.low, record.close)
                .rounded(PRICE_DECIMALS),
        );
    }

    info!(path = %path.as_ref().display(), rows = bars.len(), "loaded OHLC csv");
    Ok(bars)
}

/// Slice bars to a `[from, to]` month range, both bounds inclusive and given
/// as `(year, month)`.
///
/// The slice starts at the first row of the from-month (absent rows there
/// are an error) and ends at the last row of the to-month, falling back to
/// the end of the data when that month is not present.
pub fn slice_months(
    bars: &[Bar],
    from: (i32, u32),
    to: (i32, u32),
) -> Result<Vec<Bar>, StorageError> {
    let in_month = |bar: &Bar, (year, month): (i32, u32)| {
        bar.timestamp.year() == year && bar.timestamp.month() == month
    };

    let start = bars
        .iter()
        .position(|b| in_month(b, from))
        .ok_or(StorageError::RangeStartNotFound {
            year: from.0,
            month: from.1,
        })?;
    let end = bars
        .iter()
        .rposition(|b| in_month(b, to))
        .map(|i| i + 1)
        .unwrap_or(bars.len());

    Ok(bars[start..end].to_vec())
}
