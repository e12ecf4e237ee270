//! fx-featurelab - Main binary
//!
//! Turns an OHLC series into a Parquet feature table for model training:
//!
//! ```text
//! csv / synthetic ──► windowed aggregates ──► calendar ──► sessions ──►
//! fractal axis ──► optional lags ──► parquet
//! ```
//!
//! Input comes from a CSV file (`--input`) or, for demos and smoke tests,
//! from the synthetic random-walk provider (`--synthetic`), which exercises
//! the same background-acquisition path a broker connection would.

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use acquire::{AcquireError, FetchRequest, SyntheticBars};
use clap::Parser;
use storage::StorageError;
use tracing::info;
use tracing_subscriber::EnvFilter;
use types::{Bar, FeatureFrame, FrameError};

pub use config::{ConfigError, PipelineConfig};

/// fx-featurelab - OHLC feature synthesis for model training
#[derive(Parser, Debug)]
#[command(name = "fx-featurelab")]
#[command(about = "Windowed, calendar, session and fractal features over OHLC data")]
#[command(version)]
struct Args {
    /// Input OHLC CSV (date,open,high,low,close)
    #[arg(long, env = "FXL_INPUT", required_unless_present = "synthetic")]
    input: Option<PathBuf>,

    /// Output Parquet path
    #[arg(long, env = "FXL_OUTPUT", default_value = "features.parquet")]
    output: PathBuf,

    /// Pipeline config JSON (absent keys keep defaults)
    #[arg(long, env = "FXL_CONFIG")]
    config: Option<PathBuf>,

    /// Range start month, YYYY-MM
    #[arg(long)]
    from: Option<String>,

    /// Range end month, YYYY-MM
    #[arg(long)]
    to: Option<String>,

    /// Generate a synthetic series instead of reading a CSV
    #[arg(long)]
    synthetic: bool,

    /// Bars per synthetic series
    #[arg(long, default_value_t = 500)]
    synthetic_bars: usize,
}

/// Errors surfaced by a pipeline run.
#[derive(Debug, thiserror::Error)]
enum PipelineError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Acquire(#[from] AcquireError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid month {0:?}, expected YYYY-MM")]
    BadMonth(String),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), PipelineError> {
    let config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let start = Instant::now();

    // Phase 1: materialize the bar series.
    let mut bars = if args.synthetic {
        synthetic_bars(args.synthetic_bars)?
    } else {
        // required_unless_present guarantees the path here.
        let path = args.input.clone().unwrap_or_default();
        storage::load_ohlc(path)?
    };

    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        bars = storage::slice_months(&bars, parse_month(from)?, parse_month(to)?)?;
    }

    // Phase 2: windowed aggregates.
    let mut frame = FeatureFrame::from_bars(&bars);
    features::window::compute(&mut frame, &config.window_config())?;

    // Phase 3: calendar attributes.
    features::calendar::compute(&mut frame, &config.calendar_fields);

    // Phase 4: sessions, then fractals (classification feeds extraction).
    if config.sessions || config.fractals {
        let labels = sessions::classify(&frame);
        if config.sessions {
            sessions::one_hot(&mut frame, &labels);
        }
        if config.fractals {
            sessions::extract_fractals(&mut frame, &labels)?;
        }
    }

    // Phase 5: lag table for training.
    if config.lag_depth > 0 {
        frame = storage::lags(
            &frame,
            &config.lag_target,
            config.lag_depth,
            config.lag_target_too,
        );
    }

    // Phase 6: export.
    storage::write_frame(&frame, &args.output)?;

    let elapsed = start.elapsed();
    eprintln!("╔═══════════════════════════════════════════════════════╗");
    eprintln!(
        "║  fx-featurelab  │  {:>8} rows  │  {:>4} columns       ║",
        frame.len(),
        frame.column_names().len()
    );
    eprintln!(
        "║  {:<38}  │  {:>6.2}s  ║",
        args.output.display(),
        elapsed.as_secs_f64()
    );
    eprintln!("╚═══════════════════════════════════════════════════════╝");
    Ok(())
}

/// Fetch one synthetic series through the background-acquisition path.
fn synthetic_bars(count: usize) -> Result<Vec<Bar>, PipelineError> {
    let provider = Arc::new(SyntheticBars {
        bars: count,
        ..Default::default()
    });
    let handle = acquire::spawn(provider, vec![FetchRequest::new("EURUSD", "m15")]);

    // The acquisition collaborator exposes completion as a polled flag.
    while !handle.is_complete() {
        thread::sleep(Duration::from_millis(20));
    }

    let mut frames = handle.collect()?;
    let bars = frames.remove("eurusd_m15").unwrap_or_default();
    info!(rows = bars.len(), "synthetic series ready");
    Ok(bars)
}

/// Parse a `YYYY-MM` month argument.
fn parse_month(value: &str) -> Result<(i32, u32), PipelineError> {
    let bad = || PipelineError::BadMonth(value.to_string());

    let (year, month) = value.split_once('-').ok_or_else(bad)?;
    let year: i32 = year.parse().map_err(|_| bad())?;
    let month: u32 = month.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&month) {
        return Err(bad());
    }
    Ok((year, month))
}
