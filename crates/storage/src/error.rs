//! Error types for storage operations.

/// Errors raised while loading, slicing, or exporting frames.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unparseable timestamp {value:?} at row {row}")]
    BadTimestamp { row: usize, value: String },

    #[error("no rows found for start month {year}-{month:02}")]
    RangeStartNotFound { year: i32, month: u32 },

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}
