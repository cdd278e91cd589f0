//! Single-symbol fetch with placeholder recovery.
use chrono::{DateTime, Utc};
use log::{debug, warn};
use monitor_common::{QuoteRow, SymbolSpec};

use crate::source::QuoteSource;

/// Fetch the latest bars for `spec` and build its row.
///
/// Never fails: network errors, provider errors, empty results and unusable prices
/// are logged and replaced by [`QuoteRow::unavailable`].
pub fn fetch_row(
    source: &dyn QuoteSource,
    spec: &SymbolSpec,
    captured_at: DateTime<Utc>,
) -> QuoteRow {
    let result = source
        .latest_bars(&spec.symbol)
        .and_then(|bars| QuoteRow::from_bars(spec, &bars, captured_at));

    match result {
        Ok(row) => {
            debug!(
                "{} {} price={} change={}",
                source.name(),
                spec.symbol,
                row.price_text(),
                row.change_text()
            );
            row
        }
        Err(e) => {
            warn!("Failed to fetch {} ({}): {}", spec.name, spec.symbol, e);
            QuoteRow::unavailable(spec, captured_at)
        }
    }
}
