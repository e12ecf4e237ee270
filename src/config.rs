//! Central configuration for the feature pipeline.
//!
//! All pipeline parameters live here, loadable from a JSON file and
//! overridable from the CLI. Defaults mirror the EURUSD M15 training setup.

use std::collections::HashMap;
use std::path::Path;

use features::AggFn;
use features::window::WindowConfig;
use serde::{Deserialize, Serialize};

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Master configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Windowed Features
    // ─────────────────────────────────────────────────────────────────────────
    /// Aggregate-function toggles by name. Unknown names are ignored.
    pub functions: HashMap<String, bool>,
    /// Window sizes for the aggregate cross product.
    pub windows: Vec<usize>,
    /// Source columns for the aggregate cross product.
    pub features: Vec<String>,
    /// Emit sign-class columns for diff / pct_change.
    pub emit_class: bool,
    /// Pass-through columns exempt from differencing functions.
    pub passthrough: Vec<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Calendar Features
    // ─────────────────────────────────────────────────────────────────────────
    /// Calendar fields to extract from the timestamp index.
    pub calendar_fields: Vec<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Sessions & Fractals
    // ─────────────────────────────────────────────────────────────────────────
    /// Append one-hot session indicator columns.
    pub sessions: bool,
    /// Append per-session axis/peaks fractal columns.
    pub fractals: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Lag Features
    // ─────────────────────────────────────────────────────────────────────────
    /// Lag depth; 0 disables lagging.
    pub lag_depth: usize,
    /// Column excluded from lagging (the training target).
    pub lag_target: String,
    /// Lag the target column as well.
    pub lag_target_too: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        // Every function name is listed so a config file only has to flip
        // booleans; the default pass generates differencing features only.
        let functions = AggFn::ALL
            .into_iter()
            .map(|f| (f.name().to_string(), f.is_differencing()))
            .collect();

        Self {
            functions,
            windows: vec![3, 5, 8],
            features: vec!["high".to_string(), "low".to_string()],
            emit_class: true,
            passthrough: vec!["type".to_string()],

            calendar_fields: vec![
                "hour".to_string(),
                "dayofweek".to_string(),
                "week".to_string(),
                "month".to_string(),
            ],

            sessions: true,
            fractals: true,

            lag_depth: 0,
            lag_target: "close".to_string(),
            lag_target_too: false,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file; absent keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder-style setters
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the aggregate window sizes.
    pub fn windows(mut self, windows: Vec<usize>) -> Self {
        self.windows = windows;
        self
    }

    /// Set the aggregate source columns.
    pub fn features(mut self, features: Vec<impl Into<String>>) -> Self {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Enable one aggregate function.
    pub fn enable(mut self, function: &str) -> Self {
        self.functions.insert(function.to_string(), true);
        self
    }

    /// Set the lag depth (0 disables lagging).
    pub fn lag_depth(mut self, depth: usize) -> Self {
        self.lag_depth = depth;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived views
    // ─────────────────────────────────────────────────────────────────────────

    /// The window-generator slice of this config.
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            functions: self.functions.clone(),
            windows: self.windows.clone(),
            features: self.features.clone(),
            emit_class: self.emit_class,
            passthrough: self.passthrough.iter().cloned().collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preset Configurations
// ─────────────────────────────────────────────────────────────────────────────

impl PipelineConfig {
    /// Sessions and fractal points only: chart annotation, no aggregates.
    pub fn swing_annotation() -> Self {
        let mut config = Self::default();
        config.functions.values_mut().for_each(|v| *v = false);
        config.calendar_fields.clear();
        config
    }

    /// Every statistic over OHLC with a 3-deep lag table.
    pub fn dense_training() -> Self {
        let mut config = Self::default();
        config.functions.values_mut().for_each(|v| *v = true);
        config.features = vec![
            "open".to_string(),
            "high".to_string(),
            "low".to_string(),
            "close".to_string(),
        ];
        config.lag_depth = 3;
        config
    }
}
