//! Error types shared between the feed engine and the dashboard.
//!
//! The `MonitorError` enum unifies common failure cases for I/O, provider
//! requests, parsing, channel communication and configuration, allowing crates
//! to propagate a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the feed and the dashboard.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// I/O error originating from the standard library, terminal or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing a symbol file into `SymbolSpec` values.
    #[error("Parse symbols file error: {0}")]
    ParseSymbolsFile(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Transport-level failure talking to the data provider (connect, timeout, status).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered but returned no usable bars for the symbol.
    #[error("No data for symbol: {symbol}")]
    NoData {
        /// Symbol that returned an empty result.
        symbol: String,
    },

    /// The provider payload did not have the expected shape.
    #[error("Unexpected response format: {0}")]
    ResponseFormat(String),

    /// Crossbeam/channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Crossbeam/channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// A time zone name that chrono-tz does not know.
    #[error("Unknown time zone: {0}")]
    Timezone(String),

    /// A fetch worker could not be started or terminated abnormally.
    #[error("Worker failure: {0}")]
    Worker(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_and_keep_their_message() {
        let err: MonitorError = io::Error::new(io::ErrorKind::NotFound, "symbols.csv").into();
        assert!(matches!(err, MonitorError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: symbols.csv");
    }

    #[test]
    fn symbol_file_errors_carry_context() {
        let err = MonitorError::ParseSymbolsFile("line 3: unknown category `Crypto`".into());
        assert_eq!(
            err.to_string(),
            "Parse symbols file error: line 3: unknown category `Crypto`"
        );
    }
}
