//! Shared data model for the fx-featurelab pipeline.
//!
//! This crate defines the types every stage exchanges:
//!
//! - [`Bar`] - a single OHLC observation
//! - [`FeatureFrame`] - the timestamp-indexed, append-ordered feature table
//! - [`SessionLabel`] - the closed trading-session vocabulary
//! - [`FrameError`] - frame access failures
//!
//! # Design Notes
//!
//! - All derived feature values are `Option<f64>`; `None` models the nulls a
//!   trailing window produces before enough history exists.
//! - Column append order is deterministic and part of the export contract.
//! - Index validity (unique, strictly increasing timestamps) is a documented
//!   caller responsibility, not something the frame enforces.

mod bar;
mod error;
mod frame;
mod session;

pub use bar::Bar;
pub use error::FrameError;
pub use frame::{CLOSE, FeatureFrame, HIGH, LOW, OHLC_COLUMNS, OPEN};
pub use session::SessionLabel;
