//! Data provider endpoints and polling constants shared by the feed and the dashboard.

/// Base URL of the Yahoo Finance chart API.
pub const YAHOO_CHART_BASE: &str = "https://query2.finance.yahoo.com";
/// User agent sent with every provider request; Yahoo rejects empty agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Default polling interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Helper to build the chart URL for the latest daily bar of `symbol`.
pub fn chart_url(base: &str, symbol: &str) -> String {
    format!(
        "{}/v8/finance/chart/{}?range=1d&interval=1d",
        base.trim_end_matches('/'),
        symbol
    )
}
