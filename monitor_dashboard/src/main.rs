//! Stock Monitor — polls index and equity quotes and shows them in a color-coded
//! table next to live clocks for New York, Taipei and London.
//!
//! Every interval the poller runs one cycle: all symbols are fetched concurrently
//! from Yahoo Finance, failed symbols become `N/A` placeholder rows, and the table is
//! sorted by category then name. Gains are painted red, losses green.
//!
//! Usage example (CLI):
//! ```bash
//! stock_monitor                                   # full-screen dashboard
//! stock_monitor --mode once --format json         # one snapshot as JSON
//! stock_monitor --mode stream --symbols ./symbols.csv --interval-ms 5000
//! ```
//!
//! The symbol file holds one `SYMBOL,Name,Category` per line; see
//! `monitor_common::symbols` for details.
#![warn(missing_docs)]
mod app;
mod args;
mod text;
mod tui;
mod ui;

use crate::args::{Args, Mode, OutputFormat};
use chrono::Utc;
use clap::Parser;
use log::{error, info};
use monitor_common::symbols::{SymbolParser, default_symbols};
use monitor_common::{MonitorError, Result, SymbolSpec};
use monitor_feed::{
    BatchAggregator, Cycle, CycleReport, Poller, Snapshot, WorldClock, YahooSource,
};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

/// How long `stream` mode waits for a report before re-checking Ctrl+C.
const STREAM_POLL: Duration = Duration::from_millis(200);

fn main() -> Result<(), MonitorError> {
    let args = Args::parse();
    init_logger(&args)?;
    info!("Starting stock monitor in {} mode", args.mode);

    let symbols = load_symbols(args.symbols.as_deref())?;
    let home = WorldClock::parse_zone(&args.home_tz)?;
    let source = Arc::new(YahooSource::new()?);

    let mut aggregator = BatchAggregator::new(source, symbols);
    if let Some(workers) = args.workers {
        aggregator = aggregator.with_workers(workers);
    }
    info!(
        "Tracking {} symbols with {} workers",
        aggregator.symbols().len(),
        aggregator.workers()
    );

    let cycle = Cycle::new(aggregator, WorldClock::markets(home));
    let interval = Duration::from_millis(args.interval_ms);

    match args.mode {
        Mode::Tui => tui::run(cycle, interval),
        Mode::Once => run_once(&cycle, args.format),
        Mode::Stream => run_stream(cycle, interval, args.format),
    }
}

/// Run a single cycle and print it; a failed cycle is an error exit.
fn run_once(cycle: &Cycle, format: OutputFormat) -> Result<()> {
    match cycle.run(Utc::now()) {
        CycleReport::Updated(snapshot) => print_snapshot(&snapshot, format),
        CycleReport::Failed { reason, .. } => Err(MonitorError::Format(format!(
            "update failed: {reason}"
        ))),
    }
}

/// Print every cycle until Ctrl+C.
fn run_stream(cycle: Cycle, interval: Duration, format: OutputFormat) -> Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| MonitorError::Format(format!("failed to set Ctrl+C handler: {e}")))?;
    }

    let poller = Poller::start(cycle, interval)?;
    info!("Streaming. Press Ctrl+C to exit.");

    while !shutdown.load(Ordering::Relaxed) {
        match poller.reports().recv_timeout(STREAM_POLL) {
            Ok(CycleReport::Updated(snapshot)) => print_snapshot(&snapshot, format)?,
            Ok(CycleReport::Failed { reason, .. }) => error!("Update failed: {}", reason),
            Err(e) if e.is_timeout() => continue,
            Err(e) => return Err(MonitorError::ChannelRecv(e.to_string())),
        }
    }

    info!("Stream loop stopping...");
    poller.shutdown()
}

fn print_snapshot(snapshot: &Snapshot, format: OutputFormat) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Table => {
            let color = std::io::stdout().is_terminal();
            writeln!(stdout, "{}", text::render_table(snapshot, color))?;
        }
        OutputFormat::Json => writeln!(stdout, "{}", text::render_json(snapshot)?)?,
    }
    stdout.flush()?;
    Ok(())
}

/// Built-in table, or the parsed symbol file when one is given.
fn load_symbols(path: Option<&str>) -> Result<Vec<SymbolSpec>> {
    let Some(raw) = path else {
        return Ok(default_symbols());
    };

    let file_path = normalize_path(raw);
    if !is_file_exist(&file_path) {
        return Err(MonitorError::ParseSymbolsFile(format!(
            "symbols file not found: {}",
            file_path.display()
        )));
    }

    let file = File::open(&file_path)?;
    let symbols = SymbolSpec::parse_from_reader(BufReader::new(file))?;
    if symbols.is_empty() {
        return Err(MonitorError::ParseSymbolsFile(format!(
            "no symbols in {}",
            file_path.display()
        )));
    }
    info!("Loaded {} symbols from {}", symbols.len(), file_path.display());
    Ok(symbols)
}

/// The full-screen dashboard owns the terminal, so its logs go to a file.
fn init_logger(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env();

    if args.mode == Mode::Tui {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(normalize_path(&args.log_file))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}
