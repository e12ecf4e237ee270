//! Feature synthesis for the fx-featurelab pipeline.
//!
//! This crate holds the combinatorial windowed-aggregate generator and the
//! calendar attribute extractor, the stages that turn a raw OHLC frame into
//! model-ready numeric features.
//!
//! # Modules
//!
//! - [`window`] - windowed aggregates over a (window, feature, function)
//!   cross product, with differencing exemptions and sign classes
//! - [`calendar`] - calendar attributes derived from the timestamp index
//! - [`stats`] - slice statistics the window generator dispatches to
//!
//! # Example
//!
//! ```
//! use features::window::{self, WindowConfig};
//! use types::{Bar, FeatureFrame};
//!
//! # let bars: Vec<Bar> = Vec::new();
//! let mut frame = FeatureFrame::from_bars(&bars);
//! let config = WindowConfig::new(vec![3, 5, 8], vec!["high", "low"])
//!     .enable("mean")
//!     .enable("diff")
//!     .with_class();
//! window::compute(&mut frame, &config)?;
//! # Ok::<(), types::FrameError>(())
//! ```

pub mod calendar;
pub mod stats;
pub mod window;

pub use calendar::CalendarField;
pub use window::{AggFn, WindowConfig};
