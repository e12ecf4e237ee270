//! Trading-session classification and fractal segmentation.
//!
//! This crate labels every row of a frame with its UTC market session
//! (handling overlapping and midnight-wrapping windows), partitions the
//! labeled series into session runs, and marks each run's structural points.
//!
//! # Modules
//!
//! - [`classify`] - session windows, wraparound membership, one-hot encoding
//! - [`segments`] - session-run detection with per-run extrema
//! - [`fractal`] - `axis`/`peaks` extraction via an ordered write plan
//!
//! Classification must run before extraction: [`fractal::extract`] consumes
//! the label vector [`classify::classify`] produces for the same frame.
//!
//! # Example
//!
//! ```
//! use types::{Bar, FeatureFrame};
//!
//! # let bars: Vec<Bar> = Vec::new();
//! let mut frame = FeatureFrame::from_bars(&bars);
//! let labels = sessions::classify(&frame);
//! sessions::one_hot(&mut frame, &labels);
//! sessions::extract_fractals(&mut frame, &labels)?;
//! # Ok::<(), types::FrameError>(())
//! ```

pub mod classify;
pub mod fractal;
pub mod segments;

pub use classify::{classify, one_hot};
pub use fractal::extract as extract_fractals;
pub use fractal::{AXIS, PEAKS};
pub use segments::Segment;
