//! Batch fan-out of per-symbol fetches.
//!
//! `BatchAggregator::collect` pushes one job per configured symbol into a
//! crossbeam channel, lets a pool of scoped worker threads drain it, and joins on
//! every result before sorting. The pool defaults to one worker per symbol.
//!
//! Failure model:
//! - a failed fetch is already a placeholder row (see `fetcher`);
//! - a worker that panics is logged and every row it did not deliver becomes a
//!   placeholder, so the batch still has one row per symbol;
//! - only a failure to start a worker thread fails the whole batch.

use chrono::{DateTime, Utc};
use crossbeam_channel::unbounded;
use log::{debug, error, warn};
use monitor_common::quote::sort_rows;
use monitor_common::{MonitorError, QuoteRow, Result, SymbolSpec};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::fetcher::fetch_row;
use crate::source::QuoteSource;

/// Fetches every configured symbol concurrently and returns the sorted table.
pub struct BatchAggregator {
    source: Arc<dyn QuoteSource>,
    symbols: Vec<SymbolSpec>,
    workers: usize,
}

impl BatchAggregator {
    /// Create an aggregator with one worker per symbol.
    pub fn new(source: Arc<dyn QuoteSource>, symbols: Vec<SymbolSpec>) -> Self {
        let workers = symbols.len().max(1);
        Self {
            source,
            symbols,
            workers,
        }
    }

    /// Override the pool size; clamped to `1..=symbol count`.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.clamp(1, self.symbols.len().max(1));
        self
    }

    /// Configured symbols in configuration order.
    pub fn symbols(&self) -> &[SymbolSpec] {
        &self.symbols
    }

    /// Effective pool size.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run one batch: fetch every symbol, wait for all of them, sort by (category, name).
    pub fn collect(&self, captured_at: DateTime<Utc>) -> Result<Vec<QuoteRow>> {
        let total = self.symbols.len();
        if total == 0 {
            return Ok(Vec::new());
        }
        let started = Instant::now();

        let (job_tx, job_rx) = unbounded::<usize>();
        let (row_tx, row_rx) = unbounded::<(usize, QuoteRow)>();
        for index in 0..total {
            job_tx
                .send(index)
                .map_err(|e| MonitorError::ChannelSend(e.to_string()))?;
        }
        drop(job_tx);

        let mut slots: Vec<Option<QuoteRow>> = vec![None; total];
        let source: &dyn QuoteSource = self.source.as_ref();
        let symbols = self.symbols.as_slice();

        let spawn_error = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.workers);
            let mut spawn_error = None;

            for worker in 0..self.workers {
                let job_rx = job_rx.clone();
                let row_tx = row_tx.clone();
                let spawned = thread::Builder::new()
                    .name(format!("quote-fetch-{worker}"))
                    .spawn_scoped(scope, move || {
                        for index in job_rx.iter() {
                            let row = fetch_row(source, &symbols[index], captured_at);
                            if row_tx.send((index, row)).is_err() {
                                break;
                            }
                        }
                    });
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        spawn_error = Some(e);
                        break;
                    }
                }
            }
            drop(row_tx);

            for (index, row) in row_rx.iter() {
                slots[index] = Some(row);
            }
            for handle in handles {
                if handle.join().is_err() {
                    error!("A quote fetch worker panicked");
                }
            }
            spawn_error
        });

        if let Some(e) = spawn_error {
            return Err(MonitorError::Worker(format!(
                "failed to start fetch worker: {e}"
            )));
        }

        let mut rows: Vec<QuoteRow> = slots
            .into_iter()
            .zip(symbols)
            .map(|(slot, spec)| {
                slot.unwrap_or_else(|| {
                    warn!("No result for {} ({}); using placeholder", spec.name, spec.symbol);
                    QuoteRow::unavailable(spec, captured_at)
                })
            })
            .collect();
        sort_rows(&mut rows);

        debug!(
            "Fetched {} symbols with {} workers in {:?}",
            total,
            self.workers,
            started.elapsed()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_common::{Category, DailyBar};

    struct Flat;

    impl QuoteSource for Flat {
        fn name(&self) -> &str {
            "flat"
        }

        fn latest_bars(&self, _symbol: &str) -> Result<Vec<DailyBar>> {
            Ok(vec![DailyBar {
                timestamp: 0,
                open: 10.0,
                close: 10.0,
                volume: 1,
            }])
        }
    }

    fn symbols(n: usize) -> Vec<SymbolSpec> {
        (0..n)
            .map(|i| SymbolSpec::new(&format!("S{i}"), &format!("Name {i}"), Category::Adr))
            .collect()
    }

    #[test]
    fn pool_defaults_to_symbol_count() {
        let aggregator = BatchAggregator::new(Arc::new(Flat), symbols(5));
        assert_eq!(aggregator.workers(), 5);
    }

    #[test]
    fn pool_size_is_clamped() {
        let aggregator = BatchAggregator::new(Arc::new(Flat), symbols(3));
        assert_eq!(aggregator.with_workers(0).workers(), 1);
        let aggregator = BatchAggregator::new(Arc::new(Flat), symbols(3));
        assert_eq!(aggregator.with_workers(64).workers(), 3);
    }

    #[test]
    fn empty_configuration_yields_empty_table() {
        let aggregator = BatchAggregator::new(Arc::new(Flat), Vec::new());
        assert!(aggregator.collect(Utc::now()).unwrap().is_empty());
    }

    #[test]
    fn single_worker_still_fetches_everything() {
        let aggregator = BatchAggregator::new(Arc::new(Flat), symbols(6)).with_workers(1);
        let rows = aggregator.collect(Utc::now()).unwrap();
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(QuoteRow::is_available));
    }
}
