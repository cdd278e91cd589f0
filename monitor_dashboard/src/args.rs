//! Command-line arguments for the stock monitor.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use monitor_common::net::DEFAULT_INTERVAL_MS;
use strum::Display;

/// How the dashboard presents its cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Full-screen terminal dashboard.
    Tui,
    /// Run a single cycle, print it and exit.
    Once,
    /// Print every cycle to stdout until Ctrl+C.
    Stream,
}

/// Output encoding for the `once` and `stream` modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, color-coded text table.
    Table,
    /// One JSON document per cycle.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Market index and equity quote monitor", long_about = None)]
pub struct Args {
    /// Presentation mode.
    #[clap(long, value_enum, default_value_t = Mode::Tui)]
    pub mode: Mode,

    /// Output encoding for `once` and `stream`.
    #[clap(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Polling interval in milliseconds.
    #[clap(
        long,
        default_value_t = DEFAULT_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(100..)
    )]
    pub interval_ms: u64,

    /// Optional symbol file replacing the built-in table.
    /// One `SYMBOL,Name,Category` per line; `#` starts a comment.
    #[clap(long)]
    pub symbols: Option<String>,

    /// Home time zone (IANA name) for the system clock and the update column.
    #[clap(long, default_value = "Asia/Taipei")]
    pub home_tz: String,

    /// Fetch worker count; defaults to one worker per symbol.
    #[clap(long)]
    pub workers: Option<usize>,

    /// Log destination while the full-screen dashboard owns the terminal.
    #[clap(long, default_value = "stock_monitor.log")]
    pub log_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard() {
        let args = Args::try_parse_from(["stock_monitor"]).unwrap();
        assert_eq!(args.mode, Mode::Tui);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.interval_ms, 1000);
        assert_eq!(args.home_tz, "Asia/Taipei");
        assert!(args.symbols.is_none());
        assert!(args.workers.is_none());
    }

    #[test]
    fn parses_stream_json() {
        let args = Args::try_parse_from([
            "stock_monitor",
            "--mode",
            "stream",
            "--format",
            "json",
            "--interval-ms",
            "5000",
            "--workers",
            "4",
        ])
        .unwrap();
        assert_eq!(args.mode, Mode::Stream);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.interval_ms, 5000);
        assert_eq!(args.workers, Some(4));
        assert_eq!(args.mode.to_string(), "stream");
    }

    #[test]
    fn rejects_too_short_interval() {
        assert!(Args::try_parse_from(["stock_monitor", "--interval-ms", "10"]).is_err());
    }
}
