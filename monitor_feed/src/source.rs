//! Data source abstraction.
//!
//! The `QuoteSource` trait hides the provider behind a single call so the fetcher
//! and the aggregator can be exercised with in-memory sources in tests.
use monitor_common::{DailyBar, Result};

/// A provider of the latest daily bars for a symbol.
pub trait QuoteSource: Send + Sync {
    /// Human-readable provider name, used in log lines.
    fn name(&self) -> &str;

    /// Latest trading-day bars for `symbol`, oldest first.
    ///
    /// An empty vector is a valid answer and means the provider has no data.
    fn latest_bars(&self, symbol: &str) -> Result<Vec<DailyBar>>;
}
