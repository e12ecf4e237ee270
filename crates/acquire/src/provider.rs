//! Bar-provider abstraction.

use serde::{Deserialize, Serialize};
use types::Bar;

/// One historical-data request: a symbol at a timeframe alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Instrument symbol, e.g. `EURUSD`.
    pub symbol: String,
    /// Timeframe alias, e.g. `m15`.
    pub timeframe: String,
}

impl FetchRequest {
    /// Create a new request.
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
        }
    }

    /// Result-map key: `{symbol}_{timeframe}`, lowercased.
    pub fn key(&self) -> String {
        format!("{}_{}", self.symbol, self.timeframe).to_lowercase()
    }

    /// Cartesian product of symbols and timeframes, one request each.
    pub fn product(symbols: &[&str], timeframes: &[&str]) -> Vec<FetchRequest> {
        symbols
            .iter()
            .flat_map(|s| timeframes.iter().map(|t| FetchRequest::new(*s, *t)))
            .collect()
    }
}

/// Errors raised during acquisition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcquireError {
    /// The provider failed to deliver a request.
    #[error("provider error for {key}: {message}")]
    Provider { key: String, message: String },

    /// The background worker died before delivering every request.
    #[error("fetch worker disconnected after {delivered} of {expected} results")]
    Disconnected { delivered: usize, expected: usize },
}

/// Source of historical bars for one request at a time.
///
/// Implementations block until the request's bars are complete; partial or
/// streaming delivery is not part of the contract. The returned series is
/// expected sorted ascending with unique timestamps.
pub trait BarProvider: Send + Sync {
    /// Fetch the complete bar series for one request.
    fn fetch(&self, request: &FetchRequest) -> Result<Vec<Bar>, AcquireError>;
}
