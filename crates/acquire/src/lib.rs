//! Background historical-bar acquisition.
//!
//! The pipeline treats data acquisition as an external collaborator: a
//! [`BarProvider`] delivers each `(symbol, timeframe)` request as one
//! complete bar series, and [`fetcher::spawn`] runs the requests on a
//! background worker so the caller can poll [`FetchHandle::is_complete`]
//! and consume finished, static tables only.
//!
//! ```text
//! ┌──────────────┐   (key, bars)    ┌──────────────┐
//! │ fetch worker │ ───────────────► │ FetchHandle  │──► collect()
//! │  (thread)    │    (channel)     │ (polled)     │
//! └──────────────┘                  └──────────────┘
//! ```

pub mod fetcher;
pub mod provider;
pub mod synthetic;

pub use fetcher::{FetchHandle, spawn};
pub use provider::{AcquireError, BarProvider, FetchRequest};
pub use synthetic::SyntheticBars;
