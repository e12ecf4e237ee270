//! Data loading, merging, lagging, and export for the fx-featurelab
//! pipeline.
//!
//! Everything in this crate is plumbing around the feature engine: CSV
//! ingest with month-range slicing, keep-last merging of historical and
//! freshly acquired bars, lag-feature shifting for training tables, and
//! Parquet export of the finished frame.
//!
//! # Modules
//!
//! - [`loader`] - CSV OHLC ingest and `(year, month)` range slicing
//! - [`merge`] - historical/recent series merging with keep-last dedup
//! - [`lags`] - lag-column generation with incomplete-row dropping
//! - [`parquet`] - feature-table export

pub mod error;
pub mod lags;
pub mod loader;
pub mod merge;
pub mod parquet;

pub use error::StorageError;
pub use lags::{lags, lags_custom};
pub use loader::{load_ohlc, slice_months};
pub use merge::merge;
pub use parquet::write_frame;
